pub mod identity;
pub mod identity_gallery;
pub mod identity_registry;
pub mod matcher;
pub mod video_dedup_tracker;
