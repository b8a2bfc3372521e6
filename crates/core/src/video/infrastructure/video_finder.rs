use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively collects video files under `root`, sorted by full path.
///
/// Extensions are matched case-insensitively and may be given with or
/// without a leading dot. Unreadable directory entries are logged and
/// skipped.
pub fn find_videos(root: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let wanted: Vec<String> = extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    let mut videos: Vec<PathBuf> = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {e}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, &wanted))
        .collect();

    videos.sort();
    videos
}

fn has_extension(path: &Path, wanted: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| wanted.iter().any(|w| w.eq_ignore_ascii_case(ext)))
}
