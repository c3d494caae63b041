pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{load_targets_from_file, load_targets_from_source, normalize_target};
