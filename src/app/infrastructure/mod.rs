//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Error types
//! - Platform theme detection
//! - Render surfaces (system browser)
//! - Event-loop timers

pub mod error;
pub mod platform;
pub mod surface;
pub mod timer;
