//! # platecalc
//!
//! Surface area of triangle meshes and the electroplating arithmetic that
//! consumes it.
//!
//! Meshes are read from STL (text or binary) and 3MF (ZIP package or bare
//! model XML). Every mesh is reduced to a flat list of triangles in a known
//! unit; the area is summed in mm² and reported in dm², the unit plating
//! current densities are quoted in. The [`plating`] module turns an area
//! into current, time and thickness using Faraday's law.
//!
//! ## Example
//!
//! ```no_run
//! use platecalc::{MeasureConfig, measure_paths};
//!
//! let report = measure_paths(["bracket.stl", "housing.3mf"], &MeasureConfig::default());
//! for failure in &report.failed {
//!     eprintln!("skipped {}: {}", failure.name, failure.error);
//! }
//! println!("total area: {:.4} dm²", report.total_area());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod area;
pub mod batch;
pub mod config;
pub mod error;
pub mod model;
pub mod opc;
pub mod parser;
pub mod plating;
pub mod units;
pub mod writer;

pub use batch::{
    BatchReport, FileFailure, FileResult, MeshFormat, measure_batch, measure_bytes, measure_path,
    measure_paths,
};
pub use config::{MeasureConfig, SniffPolicy};
pub use error::{Error, Result};
pub use model::{Transform, Triangle, TriangleMesh};
pub use plating::{
    Material, PlatingMode, PlatingReport, PlatingRequest, Stage, StageOutcome, StageTarget,
    accumulate_stages, evaluate,
};
pub use units::LengthUnit;
