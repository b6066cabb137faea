//! Resource definitions module.
//!
//! Each resource family is defined in its own file with its URIs, metadata
//! and content renderer.

mod facilities;

pub use facilities::FacilitiesResource;
