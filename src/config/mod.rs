//! Configuration module for Fintrack
//!
//! - Platform path resolution with an environment override
//! - User settings persistence (display preferences and category lists)

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::Settings;
