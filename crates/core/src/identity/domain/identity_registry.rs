use crate::identity::domain::identity::IdentityIndex;
use crate::identity::domain::identity_gallery::{GalleryError, IdentityGallery};
use crate::identity::domain::matcher::Matcher;
use crate::identity::domain::video_dedup_tracker::VideoDedupTracker;
use crate::shared::embedding::Embedding;
use crate::shared::thumbnail::Thumbnail;

/// What happened to one observed embedding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Became a new identity, counted once for the current video.
    Created(IdentityIndex),
    /// Matched an identity not yet counted in this video; count went up.
    Reappeared(IdentityIndex),
    /// Matched an identity already counted in this video.
    AlreadyCounted(IdentityIndex),
    /// Unmatched, but no thumbnail could be produced, so nothing was stored.
    Discarded,
}

/// Owns the gallery and the per-video dedup state and applies the
/// match -> append/increment protocol as one step.
///
/// `observe` takes `&mut self`, so matching and appending cannot
/// interleave; a concurrent driver has to serialize on this type.
#[derive(Debug)]
pub struct IdentityRegistry {
    gallery: IdentityGallery,
    matcher: Matcher,
    tracker: VideoDedupTracker,
}

impl IdentityRegistry {
    pub fn new(matcher: Matcher) -> Self {
        Self {
            gallery: IdentityGallery::new(),
            matcher,
            tracker: VideoDedupTracker::new(),
        }
    }

    /// Starts a new video: nothing has been counted in it yet.
    pub fn begin_video(&mut self) {
        self.tracker.reset();
    }

    /// Feeds one detected embedding through the matcher and updates counts.
    ///
    /// `make_thumbnail` runs only when the embedding is new. If it yields
    /// `None` the embedding is dropped and never enters the gallery.
    pub fn observe<F>(
        &mut self,
        embedding: Embedding,
        make_thumbnail: F,
    ) -> Result<Observation, GalleryError>
    where
        F: FnOnce() -> Option<Thumbnail>,
    {
        if let Some(index) = self
            .matcher
            .find_match(&embedding, self.gallery.all_embeddings())
        {
            if self.tracker.mark_and_check(index) {
                self.gallery.increment(index)?;
                return Ok(Observation::Reappeared(index));
            }
            return Ok(Observation::AlreadyCounted(index));
        }

        let Some(thumbnail) = make_thumbnail() else {
            return Ok(Observation::Discarded);
        };
        let index = self.gallery.append(embedding, thumbnail);
        self.tracker.mark_and_check(index);
        Ok(Observation::Created(index))
    }

    pub fn gallery(&self) -> &IdentityGallery {
        &self.gallery
    }

    pub fn into_gallery(self) -> IdentityGallery {
        self.gallery
    }
}
