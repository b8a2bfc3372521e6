pub mod report_renderer;
pub mod thumbnail_generator;
