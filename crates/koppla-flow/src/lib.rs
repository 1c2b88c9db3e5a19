#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod document;
pub mod edit;
pub mod editor;
mod error;
pub mod icon;
pub mod keys;
mod navigate;
pub mod save;
pub mod validate;

#[doc(hidden)]
pub mod prelude;

pub use error::{ModelError, ModelResult};

/// Tracing target for document model operations.
pub const TRACING_TARGET: &str = "koppla_flow";
