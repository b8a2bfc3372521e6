use std::collections::HashSet;

use crate::identity::domain::identity::IdentityIndex;

/// Remembers which identities were already counted in the current video.
///
/// Gates `IdentityGallery::increment` so an identity is counted at most
/// once per video however many frames it appears in.
#[derive(Debug, Default)]
pub struct VideoDedupTracker {
    counted: HashSet<IdentityIndex>,
}

impl VideoDedupTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything; call before the first frame of each video.
    pub fn reset(&mut self) {
        self.counted.clear();
    }

    /// Returns `true` and records `index` if it was not yet counted in
    /// this video; returns `false` otherwise.
    pub fn mark_and_check(&mut self, index: IdentityIndex) -> bool {
        self.counted.insert(index)
    }
}
