//! Halftoner
//!
//! Halftone color separation server and CLI for tiled large-format prints.
//! This library exposes modules for integration testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
