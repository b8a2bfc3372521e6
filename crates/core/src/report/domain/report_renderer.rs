use std::path::Path;

use crate::identity::domain::identity_gallery::GalleryEntry;
use crate::shared::thumbnail::Thumbnail;

/// One identity as shown in the report, after ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedIdentity {
    /// One-based display position.
    pub rank: usize,
    pub occurrence_count: u32,
    pub thumbnail: Thumbnail,
}

/// Writes a human-readable artifact for a finished gallery.
pub trait ReportRenderer {
    fn render(
        &self,
        entries: &[GalleryEntry],
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Orders entries by occurrence count, most frequent first.
///
/// The sort is stable: identities with equal counts keep gallery order,
/// so the earliest-seen one ranks higher.
pub fn rank(entries: &[GalleryEntry]) -> Vec<RankedIdentity> {
    let mut sorted: Vec<&GalleryEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, e)| RankedIdentity {
            rank: i + 1,
            occurrence_count: e.occurrence_count,
            thumbnail: e.thumbnail.clone(),
        })
        .collect()
}

/// Renders `entries` to `output_path` unless the gallery is empty.
///
/// Returns whether a report was written. An empty gallery leaves the
/// filesystem untouched.
pub fn write_report(
    renderer: &dyn ReportRenderer,
    entries: &[GalleryEntry],
    output_path: &Path,
) -> Result<bool, Box<dyn std::error::Error>> {
    if entries.is_empty() {
        return Ok(false);
    }
    renderer.render(entries, output_path)?;
    Ok(true)
}
