//! Shared records and storage seams
//!
//! This module contains the types and traits used across the controllers and
//! store implementations.

pub mod traits;
pub mod types;
