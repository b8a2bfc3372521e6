use std::path::PathBuf;
use std::process;

use clap::Parser;

use face_report_core::detection::domain::face_detector::FaceDetector;
use face_report_core::detection::infrastructure::arcface_encoder::ArcFaceEncoder;
use face_report_core::detection::infrastructure::detecting_face_embedder::DetectingFaceEmbedder;
use face_report_core::detection::infrastructure::onnx_blazeface_detector::{
    self, OnnxBlazefaceDetector,
};
use face_report_core::detection::infrastructure::onnx_yolo_detector::{self, OnnxYoloDetector};
use face_report_core::detection::infrastructure::scaled_face_detector::ScaledFaceDetector;
use face_report_core::identity::domain::matcher::Matcher;
use face_report_core::pipeline::build_gallery_use_case::{BuildGalleryUseCase, ScanProgressFn};
use face_report_core::pipeline::frame_sampler::FrameSampler;
use face_report_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use face_report_core::pipeline::scan_config::{DetectionModel, ScanConfig};
use face_report_core::report::domain::report_renderer::write_report;
use face_report_core::report::infrastructure::html_report_renderer::HtmlReportRenderer;
use face_report_core::report::infrastructure::jpeg_thumbnail_generator::JpegThumbnailGenerator;
use face_report_core::shared::constants::{
    BLAZEFACE_MODEL_NAME, EMBEDDING_MODEL_NAME, EMBEDDING_MODEL_URL, YOLO_MODEL_NAME,
    YOLO_MODEL_URL,
};
use face_report_core::shared::model_resolver;
use face_report_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use face_report_core::video::infrastructure::image_file_writer::ImageFileWriter;
use face_report_core::video::infrastructure::video_finder::find_videos;

/// Counts how many video files each distinct face appears in.
#[derive(Parser)]
#[command(name = "face-report", version)]
struct Cli {
    /// Root directory with camera folders, searched recursively.
    #[arg(long)]
    input_dir: PathBuf,

    /// Where to write the HTML report.
    #[arg(long, default_value = "face_report.html")]
    output_html: PathBuf,

    /// Face detection model: yolo (accurate) or blazeface (fast).
    #[arg(long, default_value = "yolo")]
    model: String,

    /// Frame scale factor before detection (0.5 halves each side, 1.0 keeps it).
    #[arg(long, default_value = "0.5")]
    scale: f64,

    /// Analyse every Nth frame.
    #[arg(long, default_value = "25")]
    skip_frames: usize,

    /// Maximum embedding distance for two faces to be the same person.
    #[arg(long, default_value = "0.6")]
    tolerance: f64,

    /// Video file extensions to include (comma-separated).
    #[arg(long, value_delimiter = ',', default_value = "mp4")]
    extensions: Vec<String>,

    /// Directory searched for model files before downloading.
    #[arg(long)]
    model_dir: Option<PathBuf>,

    /// Save the first frame with faces of every video to debug_frames/.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> Result<ScanConfig, Box<dyn std::error::Error>> {
        let mut config = ScanConfig::new(self.input_dir);
        config.output_html = self.output_html;
        config.model = self.model.parse::<DetectionModel>()?;
        config.frame_scale = self.scale;
        config.frame_sampling_interval = self.skip_frames;
        config.comparison_tolerance = self.tolerance;
        config.extensions = self.extensions;
        config.model_dir = self.model_dir;
        config.debug = self.debug;
        config.validate()?;
        Ok(config)
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    log::info!("Searching for video files...");
    let videos = find_videos(&config.input_dir, &config.extensions);
    if videos.is_empty() {
        log::info!(
            "No video files ({}) found in {}",
            config.extensions.join(", "),
            config.input_dir.display()
        );
        return Ok(());
    }
    log::info!("Found {} video files to analyse.", videos.len());
    log::info!("{}", config.banner());

    let embedder = build_embedder(&config)?;
    let progress: ScanProgressFn = Box::new(|current, total| {
        eprint!("\rOverall progress: {current}/{total} videos");
        true
    });

    let mut use_case = BuildGalleryUseCase::new(
        Box::new(FfmpegReader::new()),
        embedder,
        Box::new(JpegThumbnailGenerator::default()),
        Matcher::new(config.comparison_tolerance),
        FrameSampler::new(config.frame_sampling_interval),
        Box::new(StdoutPipelineLogger::new()),
        Some(progress),
    );
    if let Some(dir) = config.debug_dir() {
        log::info!("Debug mode on, frames will be saved to {}", dir.display());
        use_case = use_case.with_debug_frames(Box::new(ImageFileWriter::default()), dir);
    }

    let result = use_case.execute(&videos)?;
    eprintln!();

    let entries = result.gallery.snapshot();
    if write_report(&HtmlReportRenderer::new(), &entries, &config.output_html)? {
        log::info!(
            "Report with {} unique identities written to {}",
            entries.len(),
            config.output_html.display()
        );
    } else {
        log::info!("No faces found, report not written.");
    }
    Ok(())
}

fn build_embedder(
    config: &ScanConfig,
) -> Result<Box<DetectingFaceEmbedder>, Box<dyn std::error::Error>> {
    let bundled = config.model_dir.as_deref();

    let detector: Box<dyn FaceDetector> = match config.model {
        DetectionModel::Yolo => {
            log::info!("Resolving model: {YOLO_MODEL_NAME}");
            let path = model_resolver::resolve(
                YOLO_MODEL_NAME,
                YOLO_MODEL_URL,
                bundled,
                Some(Box::new(|d: u64, t: u64| download_progress("face detection", d, t))),
            )?;
            Box::new(OnnxYoloDetector::new(
                &path,
                onnx_yolo_detector::DEFAULT_CONFIDENCE,
            )?)
        }
        DetectionModel::BlazeFace => {
            log::info!("Resolving model: {BLAZEFACE_MODEL_NAME}");
            let path = model_resolver::resolve_local(BLAZEFACE_MODEL_NAME, bundled)?;
            Box::new(OnnxBlazefaceDetector::new(
                &path,
                onnx_blazeface_detector::DEFAULT_CONFIDENCE,
            )?)
        }
    };
    let detector = ScaledFaceDetector::new(detector, config.frame_scale)?;

    log::info!("Resolving model: {EMBEDDING_MODEL_NAME}");
    let encoder_path = model_resolver::resolve(
        EMBEDDING_MODEL_NAME,
        EMBEDDING_MODEL_URL,
        bundled,
        Some(Box::new(|d: u64, t: u64| download_progress("face embedding", d, t))),
    )?;
    let encoder = ArcFaceEncoder::new(&encoder_path)?;

    Ok(Box::new(DetectingFaceEmbedder::new(
        Box::new(detector),
        Box::new(encoder),
    )))
}

fn download_progress(what: &str, downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading {what} model... {pct}%");
        if downloaded >= total {
            eprintln!();
        }
    } else {
        eprint!("\rDownloading {what} model... {downloaded} bytes");
    }
}
