pub mod build_gallery_use_case;
pub mod frame_sampler;
pub mod pipeline_logger;
pub mod scan_config;
