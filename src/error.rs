//! Error types for mesh measurement
//!
//! Every failure that can stop a single file from producing a surface area is
//! represented here. Errors carry a code so log lines can be grouped by cause.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and archive errors
//! - **E2xxx**: XML and binary layout errors
//! - **E3xxx**: Mesh content errors
//! - **E4xxx**: Unsupported input
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error reading file
//! - `E1002`: ZIP archive format error
//! - `E1003`: No model entry found in archive
//! - `E2001`: XML parsing error
//! - `E2002`: XML attribute error
//! - `E2003`: Invalid XML content
//! - `E2004`: Truncated or malformed binary STL
//! - `E3001`: Mesh contains no triangles
//! - `E3002`: Computed area is NaN or infinite
//! - `E4001`: Unsupported file type

use std::io;
use thiserror::Error;

/// Result type for measurement operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a file into a surface area
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading the file
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Corrupted or truncated 3MF archive
    /// - Unsupported compression method
    #[error("[E1002] ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// No entry in the archive could be used as the model document
    ///
    /// **Error Code**: E1003
    ///
    /// **Suggestions**:
    /// - Check the archive contains `3D/3dmodel.model` or another `.model` entry
    #[error("[E1003] No model found: {0}")]
    MissingModel(String),

    /// XML parsing error
    ///
    /// **Error Code**: E2001
    #[error("[E2001] XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error
    ///
    /// **Error Code**: E2002
    #[error("[E2002] XML attribute error: {0}")]
    XmlAttr(String),

    /// Invalid XML content
    ///
    /// **Error Code**: E2003
    ///
    /// **Common Causes**:
    /// - Model document is not valid UTF-8
    #[error("[E2003] Invalid XML: {0}")]
    InvalidXml(String),

    /// Binary STL buffer is shorter than its header and declared records require
    ///
    /// **Error Code**: E2004
    #[error("[E2004] Malformed binary STL: {0}")]
    MalformedBinary(String),

    /// The file decoded to zero triangles
    ///
    /// **Error Code**: E3001
    #[error("[E3001] Mesh contains no triangles")]
    EmptyMesh,

    /// The computed area is NaN or infinite
    ///
    /// **Error Code**: E3002
    ///
    /// **Common Causes**:
    /// - `nan` or `inf` tokens in ASCII STL vertex lines
    /// - Binary STL records holding non-finite floats
    #[error("[E3002] Surface area is not finite: {0}")]
    NonFiniteArea(f64),

    /// The file extension is not one this crate can read
    ///
    /// **Error Code**: E4001
    #[error("[E4001] Unsupported file type: {0}")]
    UnsupportedFileType(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlAttr(format!("Attribute parsing failed: {}", err))
    }
}

impl Error {
    /// Create a MalformedBinary error describing how many bytes were needed
    ///
    /// # Arguments
    /// * `what` - The part of the layout being read (e.g., "triangle count")
    /// * `needed` - Number of bytes the layout requires
    /// * `available` - Number of bytes actually present
    pub fn malformed_binary(what: &str, needed: usize, available: usize) -> Self {
        Error::MalformedBinary(format!(
            "reading {} needs {} bytes, buffer has {}",
            what, needed, available
        ))
    }

    /// Create an UnsupportedFileType error for a file name
    pub fn unsupported_file_type(name: &str) -> Self {
        Error::UnsupportedFileType(format!(
            "'{}' (expected a .stl or .3mf extension)",
            name
        ))
    }
}
