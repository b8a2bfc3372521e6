use thiserror::Error;

use crate::identity::domain::identity::{Identity, IdentityIndex};
use crate::shared::embedding::Embedding;
use crate::shared::thumbnail::Thumbnail;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GalleryError {
    #[error("identity {index} does not exist (gallery holds {len})")]
    UnknownIdentity { index: IdentityIndex, len: usize },
}

/// Read-only view of one identity handed to report rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct GalleryEntry {
    pub index: IdentityIndex,
    pub occurrence_count: u32,
    pub thumbnail: Thumbnail,
}

/// Append-only collection of known identities.
///
/// Indices equal append position. Entries are never removed, merged or
/// reordered, and `increment` is the only mutation of an existing entry.
#[derive(Clone, Debug, Default)]
pub struct IdentityGallery {
    identities: Vec<Identity>,
}

impl IdentityGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a new identity seen once and returns its index.
    pub fn append(&mut self, embedding: Embedding, thumbnail: Thumbnail) -> IdentityIndex {
        let index = IdentityIndex::new(self.identities.len());
        self.identities.push(Identity::new(embedding, thumbnail));
        index
    }

    pub fn increment(&mut self, index: IdentityIndex) -> Result<(), GalleryError> {
        let len = self.identities.len();
        let identity = self
            .identities
            .get_mut(index.value())
            .ok_or(GalleryError::UnknownIdentity { index, len })?;
        identity.record_occurrence();
        Ok(())
    }

    /// Reference embeddings in index order.
    pub fn all_embeddings(&self) -> impl ExactSizeIterator<Item = &Embedding> + '_ {
        self.identities.iter().map(Identity::reference_embedding)
    }

    pub fn snapshot(&self) -> Vec<GalleryEntry> {
        self.identities
            .iter()
            .enumerate()
            .map(|(i, identity)| GalleryEntry {
                index: IdentityIndex::new(i),
                occurrence_count: identity.occurrence_count(),
                thumbnail: identity.thumbnail().clone(),
            })
            .collect()
    }

    pub fn get(&self, index: IdentityIndex) -> Option<&Identity> {
        self.identities.get(index.value())
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(tag: u8) -> Thumbnail {
        Thumbnail::from_jpeg(vec![tag])
    }

    fn emb(v: f32) -> Embedding {
        Embedding::new(vec![v, v])
    }

    #[test]
    fn test_append_assigns_sequential_indices() {
        let mut gallery = IdentityGallery::new();
        assert_eq!(gallery.append(emb(0.0), thumb(0)), IdentityIndex::new(0));
        assert_eq!(gallery.append(emb(1.0), thumb(1)), IdentityIndex::new(1));
        assert_eq!(gallery.append(emb(2.0), thumb(2)), IdentityIndex::new(2));
        assert_eq!(gallery.len(), 3);
    }

    #[test]
    fn test_append_starts_at_count_one() {
        let mut gallery = IdentityGallery::new();
        let idx = gallery.append(emb(0.0), thumb(0));
        assert_eq!(gallery.get(idx).unwrap().occurrence_count(), 1);
    }

    #[test]
    fn test_increment_only_changes_count() {
        let mut gallery = IdentityGallery::new();
        let idx = gallery.append(emb(0.5), thumb(7));
        gallery.increment(idx).unwrap();
        gallery.increment(idx).unwrap();

        let identity = gallery.get(idx).unwrap();
        assert_eq!(identity.occurrence_count(), 3);
        assert_eq!(identity.reference_embedding(), &emb(0.5));
        assert_eq!(identity.thumbnail(), &thumb(7));
    }

    #[test]
    fn test_increment_unknown_index_errors_without_mutation() {
        let mut gallery = IdentityGallery::new();
        gallery.append(emb(0.0), thumb(0));
        let err = gallery.increment(IdentityIndex::new(5)).unwrap_err();
        assert_eq!(
            err,
            GalleryError::UnknownIdentity {
                index: IdentityIndex::new(5),
                len: 1
            }
        );
        assert_eq!(gallery.snapshot()[0].occurrence_count, 1);
    }

    #[test]
    fn test_all_embeddings_in_index_order() {
        let mut gallery = IdentityGallery::new();
        gallery.append(emb(3.0), thumb(0));
        gallery.append(emb(1.0), thumb(1));
        let embeddings: Vec<_> = gallery.all_embeddings().cloned().collect();
        assert_eq!(embeddings, vec![emb(3.0), emb(1.0)]);
    }

    #[test]
    fn test_snapshot_reports_counts_and_thumbnails() {
        let mut gallery = IdentityGallery::new();
        let a = gallery.append(emb(0.0), thumb(10));
        gallery.append(emb(1.0), thumb(20));
        gallery.increment(a).unwrap();

        let snapshot = gallery.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].index, IdentityIndex::new(0));
        assert_eq!(snapshot[0].occurrence_count, 2);
        assert_eq!(snapshot[0].thumbnail, thumb(10));
        assert_eq!(snapshot[1].occurrence_count, 1);
        assert_eq!(snapshot[1].thumbnail, thumb(20));
    }

    #[test]
    fn test_empty_gallery() {
        let gallery = IdentityGallery::new();
        assert!(gallery.is_empty());
        assert_eq!(gallery.all_embeddings().len(), 0);
        assert!(gallery.snapshot().is_empty());
    }
}
