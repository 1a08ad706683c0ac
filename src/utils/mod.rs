//! Utility functions shared across layers.
//!
//! - [`vanity`] - Vanity link generation
//! - [`db_error`] - Database error classification

pub mod db_error;
pub mod vanity;
