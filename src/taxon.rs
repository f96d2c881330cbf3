use alloc::string::String;

/// One leaf's identity: an opaque id, a display symbol, and a species label.
///
/// Taxa are supplied by the caller and are immutable for the duration of a
/// build. Their position in the input list is preserved throughout — it is
/// the index exposed by [`TreeNode::Leaf`](crate::tree::TreeNode) and used
/// for annotation lookup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Taxon {
    /// Stable identifier, e.g. an ortholog gene id.
    pub id: String,
    /// Display symbol, e.g. a gene symbol.
    pub symbol: String,
    /// Species label, e.g. a binomial name.
    pub species: String,
}

impl Taxon {
    pub fn new(
        id: impl Into<String>,
        symbol: impl Into<String>,
        species: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            symbol: symbol.into(),
            species: species.into(),
        }
    }
}

/// Pluggable pairwise distance strategy.
///
/// Implementations must be symmetric (`distance(a, b) == distance(b, a)`)
/// and non-negative; [`DistanceMatrix::from_metric`](crate::matrix::DistanceMatrix::from_metric)
/// calls the metric once per unordered pair and mirrors the result, so an
/// asymmetric implementation is silently symmetrized rather than detected.
pub trait DistanceMetric {
    fn distance(&self, a: &Taxon, b: &Taxon) -> f64;
}

impl<F> DistanceMetric for F
where
    F: Fn(&Taxon, &Taxon) -> f64,
{
    fn distance(&self, a: &Taxon, b: &Taxon) -> f64 {
        self(a, b)
    }
}

/// Default distance strategy: scaled absolute difference of per-species
/// divergence-time constants.
///
/// Each species is mapped to an approximate divergence time from human in
/// million years; the distance between two taxa is the absolute difference
/// of their constants, scaled by 0.01. Species not in the table fall back
/// to [`DivergenceTimeMetric::DEFAULT_DIVERGENCE_MYA`].
///
/// This is a coarse placeholder, not a sequence-derived distance. Callers
/// needing biologically meaningful trees should supply their own metric
/// (any `Fn(&Taxon, &Taxon) -> f64` works).
#[derive(Clone, Copy, Debug, Default)]
pub struct DivergenceTimeMetric;

impl DivergenceTimeMetric {
    /// Fallback divergence time for species missing from the table.
    pub const DEFAULT_DIVERGENCE_MYA: f64 = 500.0;

    const SCALE: f64 = 0.01;

    pub fn new() -> Self {
        Self
    }

    /// Approximate divergence time from human, in million years.
    ///
    /// Matching is case-insensitive and accepts both binomial and a few
    /// common names.
    pub fn divergence_time(species: &str) -> f64 {
        let species = species.to_lowercase();
        match species.as_str() {
            "homo sapiens" | "human" => 0.0,
            "pan troglodytes" | "chimpanzee" => 6.7,
            "macaca mulatta" | "macaque" => 29.4,
            "mus musculus" | "mouse" => 90.0,
            "rattus norvegicus" | "rat" => 90.0,
            "canis lupus familiaris" | "dog" => 96.0,
            "bos taurus" | "cow" => 96.0,
            "gallus gallus" | "chicken" => 312.0,
            "xenopus tropicalis" | "frog" => 352.0,
            "danio rerio" | "zebrafish" => 435.0,
            "drosophila melanogaster" | "fly" => 797.0,
            "caenorhabditis elegans" | "worm" => 797.0,
            "saccharomyces cerevisiae" | "yeast" => 1105.0,
            _ => Self::DEFAULT_DIVERGENCE_MYA,
        }
    }
}

impl DistanceMetric for DivergenceTimeMetric {
    fn distance(&self, a: &Taxon, b: &Taxon) -> f64 {
        let ta = Self::divergence_time(&a.species);
        let tb = Self::divergence_time(&b.species);
        (ta - tb).abs() * Self::SCALE
    }
}
