use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::detection::domain::face_embedder::{FaceDetection, FaceEmbedder};
use crate::identity::domain::identity_gallery::IdentityGallery;
use crate::identity::domain::identity_registry::{IdentityRegistry, Observation};
use crate::identity::domain::matcher::Matcher;
use crate::pipeline::frame_sampler::FrameSampler;
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::report::domain::thumbnail_generator::ThumbnailGenerator;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// `(videos_done, videos_total)`; returning `false` cancels the scan.
pub type ScanProgressFn = Box<dyn Fn(usize, usize) -> bool + Send>;

const DEBUG_OUTLINE_COLOR: [u8; 3] = [0, 255, 0];
const DEBUG_OUTLINE_THICKNESS: i32 = 2;

/// Counters describing what a scan went through.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub videos_scanned: usize,
    pub videos_skipped: usize,
    pub frames_sampled: usize,
    pub faces_detected: usize,
    pub faces_discarded: usize,
}

#[derive(Debug)]
pub struct ScanResult {
    pub gallery: IdentityGallery,
    pub stats: ScanStats,
}

struct DebugFrames {
    writer: Box<dyn ImageWriter>,
    dir: PathBuf,
}

/// Walks the given videos in order and folds every sampled face into an
/// identity gallery.
///
/// Each identity is counted at most once per video. Failures are scoped:
/// an unopenable video is skipped, a decode error ends only that video and
/// an embedder error drops only that frame.
pub struct BuildGalleryUseCase {
    reader: Box<dyn VideoReader>,
    embedder: Box<dyn FaceEmbedder>,
    thumbnailer: Box<dyn ThumbnailGenerator>,
    registry: IdentityRegistry,
    sampler: FrameSampler,
    logger: Box<dyn PipelineLogger>,
    on_progress: Option<ScanProgressFn>,
    debug: Option<DebugFrames>,
}

impl BuildGalleryUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        embedder: Box<dyn FaceEmbedder>,
        thumbnailer: Box<dyn ThumbnailGenerator>,
        matcher: Matcher,
        sampler: FrameSampler,
        logger: Box<dyn PipelineLogger>,
        on_progress: Option<ScanProgressFn>,
    ) -> Self {
        Self {
            reader,
            embedder,
            thumbnailer,
            registry: IdentityRegistry::new(matcher),
            sampler,
            logger,
            on_progress,
            debug: None,
        }
    }

    /// Saves the first sampled frame with faces of every video, outlined,
    /// as `<dir>/found_<stem>_<frame count>.jpg`.
    pub fn with_debug_frames(mut self, writer: Box<dyn ImageWriter>, dir: &Path) -> Self {
        self.debug = Some(DebugFrames {
            writer,
            dir: dir.to_path_buf(),
        });
        self
    }

    /// Scans `videos` in the order given.
    ///
    /// Returns `Err` only when the progress callback cancels the run or the
    /// gallery rejects an update.
    pub fn execute(mut self, videos: &[PathBuf]) -> Result<ScanResult, Box<dyn std::error::Error>> {
        let total = videos.len();
        let mut stats = ScanStats::default();

        for (position, path) in videos.iter().enumerate() {
            self.report_progress(position, total)?;
            self.scan_video(path, position, total, &mut stats)?;
            self.logger.progress(position + 1, total);
        }
        self.report_progress(total, total)?;

        self.logger.info(&format!(
            "Scan finished: {} unique identities from {} videos ({} skipped)",
            self.registry.gallery().len(),
            stats.videos_scanned,
            stats.videos_skipped
        ));
        self.logger.summary();

        Ok(ScanResult {
            gallery: self.registry.into_gallery(),
            stats,
        })
    }

    fn scan_video(
        &mut self,
        path: &Path,
        position: usize,
        total: usize,
        stats: &mut ScanStats,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let name = display_name(path);
        let metadata = match self.reader.open(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                self.logger.warn(&format!("Could not open video {name}: {e}"));
                stats.videos_skipped += 1;
                return Ok(());
            }
        };
        stats.videos_scanned += 1;
        self.logger.info(&scan_start_message(
            &name,
            metadata.expected_samples(self.sampler.interval()),
        ));
        self.registry.begin_video();

        let Self {
            reader,
            embedder,
            thumbnailer,
            registry,
            sampler,
            logger,
            on_progress,
            debug,
        } = self;

        let mut debug_pending = debug.is_some();
        let mut frame_count = 0usize;
        let mut decode_start = Instant::now();
        let mut outcome: Result<(), Box<dyn std::error::Error>> = Ok(());

        for item in reader.frames() {
            let frame = match item {
                Ok(frame) => frame,
                Err(e) => {
                    logger.warn(&format!(
                        "Decode error in {name} after frame {frame_count}, stopping this video: {e}"
                    ));
                    break;
                }
            };
            frame_count += 1;
            if !sampler.is_sampled(frame_count) {
                continue;
            }
            logger.timing("decode", elapsed_ms(decode_start));

            // Cancellation is also honoured between frames of a long video.
            if let Some(callback) = on_progress.as_ref() {
                if !callback(position, total) {
                    outcome = Err("Cancelled".into());
                    break;
                }
            }
            stats.frames_sampled += 1;

            let detect_start = Instant::now();
            let detections = match embedder.detect_and_embed(&frame) {
                Ok(detections) => detections,
                Err(e) => {
                    logger.warn(&format!(
                        "Face analysis failed on frame {frame_count} of {name}: {e}"
                    ));
                    decode_start = Instant::now();
                    continue;
                }
            };
            logger.timing("detect", elapsed_ms(detect_start));
            logger.metric("faces_per_frame", detections.len() as f64);
            stats.faces_detected += detections.len();

            if debug_pending && !detections.is_empty() {
                if let Some(debug) = debug.as_ref() {
                    save_debug_frame(debug, &mut **logger, &frame, &detections, path, frame_count);
                }
                debug_pending = false;
            }

            let match_start = Instant::now();
            for detection in detections {
                let FaceDetection { region, embedding } = detection;
                let observation = match registry
                    .observe(embedding, || thumbnailer.crop_and_encode(&frame, &region))
                {
                    Ok(observation) => observation,
                    Err(e) => {
                        outcome = Err(e.into());
                        break;
                    }
                };
                match observation {
                    Observation::Created(index) => {
                        logger.info(&format!("New identity {index} found in {name}"));
                    }
                    Observation::Reappeared(index) => {
                        logger.info(&format!("Identity {index} seen again in new file {name}"));
                    }
                    Observation::AlreadyCounted(_) => {}
                    Observation::Discarded => {
                        stats.faces_discarded += 1;
                        log::debug!(
                            "Dropped face at {region:?} in frame {frame_count} of {name}: empty crop"
                        );
                    }
                }
            }
            logger.timing("match", elapsed_ms(match_start));
            if outcome.is_err() {
                break;
            }
            decode_start = Instant::now();
        }

        reader.close();
        outcome
    }

    fn report_progress(&self, current: usize, total: usize) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(ref callback) = self.on_progress {
            if !callback(current, total) {
                return Err("Cancelled".into());
            }
        }
        Ok(())
    }
}

fn save_debug_frame(
    debug: &DebugFrames,
    logger: &mut dyn PipelineLogger,
    frame: &Frame,
    detections: &[FaceDetection],
    video: &Path,
    frame_count: usize,
) {
    let mut annotated = frame.clone();
    for detection in detections {
        annotated.outline(&detection.region, DEBUG_OUTLINE_COLOR, DEBUG_OUTLINE_THICKNESS);
    }
    let stem = video
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());
    let path = debug.dir.join(format!("found_{stem}_{frame_count}.jpg"));
    match debug.writer.write(&path, &annotated) {
        Ok(()) => logger.info(&format!(
            "[DEBUG] {} faces in {}, saved {}",
            detections.len(),
            display_name(video),
            path.display()
        )),
        Err(e) => logger.warn(&format!("Could not save debug frame {}: {e}", path.display())),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn scan_start_message(name: &str, expected_samples: Option<usize>) -> String {
    match expected_samples {
        Some(n) => format!("Scanning {name} (~{n} sampled frames)"),
        None => format!("Scanning {name}"),
    }
}

fn elapsed_ms(since: Instant) -> f64 {
    since.elapsed().as_secs_f64() * 1000.0
}
