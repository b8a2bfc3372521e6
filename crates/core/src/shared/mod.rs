pub mod constants;
pub mod embedding;
pub mod frame;
pub mod model_resolver;
pub mod region;
pub mod thumbnail;
pub mod video_metadata;
