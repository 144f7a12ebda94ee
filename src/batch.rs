//! Per-file measurement and batch aggregation
//!
//! Each file is measured on its own. A file either yields a [`FileResult`]
//! or fails as a whole; a failure never stops the other files in a batch
//! from being measured. [`BatchReport`] keeps both sides so callers can show
//! or log what was dropped.

use crate::area::mesh_area;
use crate::config::MeasureConfig;
use crate::error::{Error, Result};
use crate::model::TriangleMesh;
use crate::parser::{parse_3mf, parse_stl};
use log::{debug, warn};
use std::path::Path;

/// Mesh file formats, identified by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeshFormat {
    /// STL, text or binary
    Stl,
    /// 3MF package (or bare 3MF model XML)
    ThreeMf,
}

impl MeshFormat {
    /// Detect format from a file name's extension (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .and_then(|ext| match ext.as_str() {
                "stl" => Some(MeshFormat::Stl),
                "3mf" => Some(MeshFormat::ThreeMf),
                _ => None,
            })
    }
}

/// Surface area of one successfully measured file
#[derive(Debug, Clone, PartialEq)]
pub struct FileResult {
    /// File name, used as a label only
    pub name: String,
    /// Surface area in dm²
    pub area_dm2: f64,
    /// Number of triangles measured
    pub triangle_count: usize,
}

/// A file that could not be measured
#[derive(Debug)]
pub struct FileFailure {
    /// File name, used as a label only
    pub name: String,
    /// Why the file was dropped
    pub error: Error,
}

/// Outcome of measuring a batch of files
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Files that produced an area, in input order
    pub succeeded: Vec<FileResult>,
    /// Files that were dropped, in input order
    pub failed: Vec<FileFailure>,
}

impl BatchReport {
    /// Sum of all successful areas in dm²
    pub fn total_area(&self) -> f64 {
        self.succeeded.iter().map(|r| r.area_dm2).sum()
    }

    /// Whether every file in the batch was measured
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of files seen
    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// Whether the batch held no files
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn record(&mut self, name: &str, outcome: Result<FileResult>) {
        // A batch total only ever sums finite areas, whatever the per-file setting
        let outcome = outcome.and_then(|result| {
            if result.area_dm2.is_finite() {
                Ok(result)
            } else {
                Err(Error::NonFiniteArea(result.area_dm2))
            }
        });

        match outcome {
            Ok(result) => {
                debug!(
                    "{}: {} triangles, {} dm²",
                    result.name, result.triangle_count, result.area_dm2
                );
                self.succeeded.push(result);
            }
            Err(error) => {
                warn!("Dropping {}: {}", name, error);
                self.failed.push(FileFailure {
                    name: name.to_string(),
                    error,
                });
            }
        }
    }
}

/// Decode a file's bytes into a mesh, choosing the parser by extension
pub fn decode(name: &str, bytes: &[u8], config: &MeasureConfig) -> Result<TriangleMesh> {
    let format = MeshFormat::from_name(name).ok_or_else(|| Error::unsupported_file_type(name))?;

    match format {
        MeshFormat::Stl => parse_stl(bytes, config.default_unit(), config.sniff_policy()),
        MeshFormat::ThreeMf => parse_3mf(bytes),
    }
}

/// Measure one file held in memory
///
/// # Example
///
/// ```
/// use platecalc::{MeasureConfig, measure_bytes};
///
/// let stl = b"solid t
/// facet normal 0 0 1
///  outer loop
///   vertex 0 0 0
///   vertex 100 0 0
///   vertex 0 100 0
///  endloop
/// endfacet
/// endsolid t
/// ";
/// let result = measure_bytes("t.stl", stl, &MeasureConfig::default()).unwrap();
/// assert_eq!(result.area_dm2, 0.5);
/// ```
pub fn measure_bytes(name: &str, bytes: &[u8], config: &MeasureConfig) -> Result<FileResult> {
    let mesh = decode(name, bytes, config)?;
    if mesh.is_empty() {
        return Err(Error::EmptyMesh);
    }

    let area_dm2 = mesh_area(&mesh);
    if config.rejects_non_finite() && !area_dm2.is_finite() {
        return Err(Error::NonFiniteArea(area_dm2));
    }

    Ok(FileResult {
        name: name.to_string(),
        area_dm2,
        triangle_count: mesh.len(),
    })
}

/// Label used for a file on disk: its file name, or the whole path if it has none
fn label_for(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read a file from disk and measure it, labelling it with its file name
pub fn measure_path(path: &Path, config: &MeasureConfig) -> Result<FileResult> {
    let name = label_for(path);

    // Reject unknown extensions before touching the file system
    MeshFormat::from_name(&name).ok_or_else(|| Error::unsupported_file_type(&name))?;

    let bytes = std::fs::read(path)?;
    measure_bytes(&name, &bytes, config)
}

/// Measure a batch of in-memory files
///
/// Every file is attempted; failures are logged and collected in
/// [`BatchReport::failed`]. A NaN or infinite area always counts as a
/// failure here, even when `config` lets [`measure_bytes`] return it.
pub fn measure_batch<I, N, B>(files: I, config: &MeasureConfig) -> BatchReport
where
    I: IntoIterator<Item = (N, B)>,
    N: AsRef<str>,
    B: AsRef<[u8]>,
{
    let mut report = BatchReport::default();
    for (name, bytes) in files {
        let name = name.as_ref();
        report.record(name, measure_bytes(name, bytes.as_ref(), config));
    }
    report
}

/// Measure a batch of files on disk
pub fn measure_paths<I, P>(paths: I, config: &MeasureConfig) -> BatchReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut report = BatchReport::default();
    for path in paths {
        let path = path.as_ref();
        report.record(&label_for(path), measure_path(path, config));
    }
    report
}
