pub mod html_report_renderer;
pub mod jpeg_thumbnail_generator;
