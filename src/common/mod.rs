pub mod config;
pub mod disk;
pub mod errors;
pub mod format;
