// Configuration module
pub mod grid_config;

pub use grid_config::GridConfig;
