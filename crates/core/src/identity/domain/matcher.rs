use crate::identity::domain::identity::IdentityIndex;
use crate::shared::embedding::Embedding;

/// Default maximum Euclidean distance for two embeddings to count as the
/// same person.
pub const DEFAULT_TOLERANCE: f64 = 0.6;

/// Decides which known identity, if any, a new embedding belongs to.
///
/// Scans known embeddings in index order and returns the first one within
/// tolerance. This is first-match-wins, not nearest-neighbour: a later,
/// closer identity never beats an earlier one that qualifies. Counts in
/// existing reports depend on this ordering.
#[derive(Clone, Copy, Debug)]
pub struct Matcher {
    tolerance: f64,
}

impl Matcher {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the lowest index whose distance is `<= tolerance`.
    pub fn find_match<'a, I>(&self, embedding: &Embedding, known: I) -> Option<IdentityIndex>
    where
        I: IntoIterator<Item = &'a Embedding>,
    {
        known
            .into_iter()
            .position(|candidate| embedding.distance(candidate) <= self.tolerance)
            .map(IdentityIndex::new)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE)
    }
}
