/// TOML configuration loading and validation.
pub mod config;
/// Text post-processing for model output.
pub mod text;
