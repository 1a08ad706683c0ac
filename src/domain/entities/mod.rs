//! Core domain entities.
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewLinkBundle`] carries what the client sent, [`LinkBundle`] is what
//! ends up stored.

pub mod link_bundle;

pub use link_bundle::{LinkBundle, NewLinkBundle};
