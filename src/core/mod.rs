//! Core module - Shared data structures and utilities
//!
//! This module provides:
//! - Result model (ScanResult, ScanReport)
//! - Diagnostics sink
//! - Rendering functions for different output formats
//! - Path utilities
//! - File reading with an explicit encoding

pub mod diagnostics;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
