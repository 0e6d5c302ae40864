//! chart-props: property-sheet engine for histogram chart configuration.
//!
//! The crate turns a nested chart configuration graph into a flat,
//! categorized list of editable settings, stages user edits, validates
//! them and writes them back. Rendering and layout storage stay behind the
//! `ChartService` contract.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ApplyReport, ChartPropertiesEditor, EditorConfig, SeriesSelection};
pub use error::{ChartError, ChartResult};
