#![forbid(unsafe_code)]

//! Core domain model and processing pipeline for babylog.
//!
//! This crate provides:
//! - Domain types (kinds, raw records, events, derived columns)
//! - Raw record loading and normalization
//! - Day-boundary splitting and derived column computation
//! - Sleep extrapolation for the under-logged early period
//! - Export of the finalized timeline and chart-facing views

pub mod types;
pub mod error;
pub mod kind;
pub mod config;
pub mod logging;
pub mod timestamp;
pub mod aliases;
pub mod loader;
pub mod normalize;
pub mod split;
pub mod derived;
pub mod extrapolate;
pub mod pipeline;
pub mod export;
pub mod view;

// Re-export commonly used types
pub use error::{Error, Result, TimestampError};
pub use types::*;
pub use kind::{EventKind, UnknownEventKind};
pub use config::Config;
pub use aliases::AliasTable;
pub use loader::load_raw_records;
pub use normalize::{normalize, Normalized};
pub use split::split_multi_day;
pub use derived::recompute;
pub use extrapolate::{add_birth_event, extrapolate};
pub use pipeline::{build_timeline, Timeline};
pub use export::{write_aliases_json, write_timeline_csv};
