use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

const APP_DIR_NAME: &str = "Face Report";

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("download failed for {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
    #[error("model {name} not found in {searched:?}")]
    NotFound { name: String, searched: Vec<PathBuf> },
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve a model file by name, checking local locations before downloading.
///
/// Resolution order:
/// 1. User cache directory (platform-specific)
/// 2. Bundled directory (`--model-dir` or a packaged install)
/// 3. Download from `url` into the cache
pub fn resolve(
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    resolve_in(&model_cache_dir()?, name, url, bundled_dir, progress)
}

/// Resolve a model that has no download source.
pub fn resolve_local(name: &str, bundled_dir: Option<&Path>) -> Result<PathBuf, ModelResolveError> {
    let searched = candidates(&model_cache_dir()?, name, bundled_dir);
    find_existing(name, searched)
}

/// Platform-specific model cache directory.
///
/// - macOS: `~/Library/Application Support/Face Report/models/`
/// - Linux: `$XDG_CACHE_HOME/Face Report/models/` or `~/.cache/Face Report/models/`
/// - Windows: `%LOCALAPPDATA%/Face Report/models/`
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::cache_dir();

    base.map(|d| d.join(APP_DIR_NAME).join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

fn resolve_in(
    cache_dir: &Path,
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Ok(path) = find_existing(name, candidates(cache_dir, name, bundled_dir)) {
        return Ok(path);
    }

    log::info!("Downloading model {name} from {url}");
    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    let dest = cache_dir.join(name);
    download(url, &dest, progress)?;
    Ok(dest)
}

fn candidates(cache_dir: &Path, name: &str, bundled_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![cache_dir.join(name)];
    if let Some(dir) = bundled_dir {
        paths.push(dir.join(name));
    }
    paths
}

fn find_existing(name: &str, searched: Vec<PathBuf>) -> Result<PathBuf, ModelResolveError> {
    match searched.iter().find(|p| p.is_file()) {
        Some(path) => Ok(path.clone()),
        None => Err(ModelResolveError::NotFound {
            name: name.to_string(),
            searched,
        }),
    }
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url).map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;
    if !response.status().is_success() {
        return Err(ModelResolveError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    let total = response.content_length().unwrap_or(0);
    let bytes = response.bytes().map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    // Written under a temporary name and renamed so a partial file is never
    // mistaken for a cached model.
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(write_error(&temp_path))?;

    let mut downloaded: u64 = 0;
    for chunk in bytes.chunks(1024 * 1024) {
        file.write_all(chunk).map_err(write_error(&temp_path))?;
        downloaded += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(downloaded, total);
        }
    }
    file.flush().map_err(write_error(&temp_path))?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(write_error(dest))?;
    Ok(())
}

fn write_error(path: &Path) -> impl FnOnce(std::io::Error) -> ModelResolveError {
    let path = path.to_path_buf();
    move |source| ModelResolveError::Write { path, source }
}
