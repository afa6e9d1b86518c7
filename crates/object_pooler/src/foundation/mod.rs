//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types for positioning pooled objects
//! - Handle-based collections backing the scene arena
//! - Logging utilities

pub mod math;
pub mod collections;
pub mod logging;
