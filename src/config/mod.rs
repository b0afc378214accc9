//! Configuration module for flashdeck
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::FlashdeckPaths;
pub use settings::Settings;
