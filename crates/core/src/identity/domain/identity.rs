use std::fmt;

use crate::shared::embedding::Embedding;
use crate::shared::thumbnail::Thumbnail;

/// Stable handle of an identity inside a gallery.
///
/// Assigned in creation order and never reused or renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityIndex(usize);

impl IdentityIndex {
    pub fn new(value: usize) -> Self {
        Self(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Display for IdentityIndex {
    /// One-based, the way people count identities.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// A distinct person observed across the scanned videos.
///
/// The reference embedding and thumbnail are captured from the first
/// detection and never change; only the occurrence count moves.
#[derive(Clone, Debug)]
pub struct Identity {
    reference_embedding: Embedding,
    occurrence_count: u32,
    thumbnail: Thumbnail,
}

impl Identity {
    pub(crate) fn new(reference_embedding: Embedding, thumbnail: Thumbnail) -> Self {
        Self {
            reference_embedding,
            occurrence_count: 1,
            thumbnail,
        }
    }

    pub fn reference_embedding(&self) -> &Embedding {
        &self.reference_embedding
    }

    pub fn occurrence_count(&self) -> u32 {
        self.occurrence_count
    }

    pub fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    pub(crate) fn record_occurrence(&mut self) {
        self.occurrence_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_identity_counts_once() {
        let id = Identity::new(Embedding::new(vec![0.1]), Thumbnail::from_jpeg(vec![1]));
        assert_eq!(id.occurrence_count(), 1);
    }

    #[test]
    fn test_record_occurrence_keeps_reference_data() {
        let mut id = Identity::new(Embedding::new(vec![0.1, 0.2]), Thumbnail::from_jpeg(vec![9]));
        id.record_occurrence();
        assert_eq!(id.occurrence_count(), 2);
        assert_eq!(id.reference_embedding().as_slice(), &[0.1, 0.2]);
        assert_eq!(id.thumbnail().jpeg_bytes(), &[9]);
    }

    #[test]
    fn test_index_display_is_one_based() {
        assert_eq!(IdentityIndex::new(0).to_string(), "#1");
        assert_eq!(IdentityIndex::new(41).to_string(), "#42");
    }
}
