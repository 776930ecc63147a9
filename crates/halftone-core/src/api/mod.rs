//! Public API for the halftone-core crate.
//!
//! This module provides the high-level API: the [`Separator`] builder, the
//! [`Separation`] it produces, and the [`HalftoneError`] unified error type.

mod builder;
mod error;

pub use builder::{Separation, Separator};
pub use error::{Axis, ConfigurationError, DegenerateGeometryError, HalftoneError};
pub(crate) use error::{require_non_negative, require_positive};
