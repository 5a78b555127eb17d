// Library exports for reuse by other applications and tests
pub mod cli;
pub mod config_file;
pub mod image_processing;
pub mod utils;

// Re-export commonly used types
pub use cli::MirrorMode;
pub use image_processing::{
    CornerHighlight, PixelRule, ProcessingConfig, ProcessingEngine, ProcessingResult,
};
