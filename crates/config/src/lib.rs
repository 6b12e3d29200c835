// Configuration loading

pub mod framework;

pub use framework::{ConfigError, FrameworkConfig};
