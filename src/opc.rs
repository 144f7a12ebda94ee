//! ZIP container handling for 3MF files
//!
//! 3MF files are ZIP archives holding an XML model document, usually at
//! `3D/3dmodel.model`. Exporters do not all agree on that path, so the model
//! entry is located with a fixed list of fallbacks; see [`resolve_model_entry`].

use crate::error::{Error, Result};
use log::debug;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Leading bytes of a ZIP local file header
pub const ZIP_SIGNATURE: &[u8; 2] = b"PK";

/// Main 3D model file path within the 3MF archive
pub const MODEL_PATH: &str = "3D/3dmodel.model";

/// Model file name used by exporters that skip the `3D/` folder
pub const MODEL_FILE_NAME: &str = "3dmodel.model";

/// Extension of 3MF model parts
pub const MODEL_EXTENSION: &str = ".model";

/// Extension of plain XML parts
pub const XML_EXTENSION: &str = ".xml";

/// Whether a buffer starts with the ZIP signature
pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(ZIP_SIGNATURE)
}

/// Pick the archive entry that holds the model document
///
/// Rules are tried in order and the first entry (in archive order) matching
/// the earliest rule wins:
/// 1. `3D/3dmodel.model`
/// 2. `3dmodel.model`
/// 3. any `.model` entry, or an `.xml` entry whose name contains `model`
/// 4. any `.xml` entry
pub fn resolve_model_entry<S: AsRef<str>>(names: &[S]) -> Option<&str> {
    let names: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    let lowered: Vec<String> = names.iter().map(|n| n.to_ascii_lowercase()).collect();

    let exact = |wanted: &str| {
        names
            .iter()
            .position(|&name| name.strip_prefix('/').unwrap_or(name) == wanted)
    };
    let matching = |pred: &dyn Fn(&str) -> bool| lowered.iter().position(|name| pred(name));

    let index = exact(MODEL_PATH)
        .or_else(|| exact(MODEL_FILE_NAME))
        .or_else(|| {
            matching(&|name| {
                name.ends_with(MODEL_EXTENSION)
                    || (name.ends_with(XML_EXTENSION) && name.contains("model"))
            })
        })
        .or_else(|| matching(&|name| name.ends_with(XML_EXTENSION)))?;

    Some(names[index])
}

/// An opened 3MF archive
pub struct Package<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    /// Open a 3MF package from a reader
    pub fn open(reader: R) -> Result<Self> {
        let archive = ZipArchive::new(reader)?;
        Ok(Self { archive })
    }

    /// Names of all file entries in archive order (directories excluded)
    ///
    /// Names come from the central directory; entries are not opened, so an
    /// entry that cannot be decompressed is still listed.
    pub fn file_names(&self) -> Vec<String> {
        (0..self.archive.len())
            .filter_map(|i| self.archive.name_for_index(i))
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect()
    }

    /// Locate the model document entry
    pub fn resolve_model_path(&self) -> Result<String> {
        let names = self.file_names();
        let path = resolve_model_entry(&names).ok_or_else(|| {
            Error::MissingModel(format!(
                "none of {} archive entries is a .model or .xml part",
                names.len()
            ))
        })?;
        debug!("Using archive entry '{}' as model document", path);
        Ok(path.to_string())
    }

    /// Read the model document
    pub fn get_model(&mut self) -> Result<String> {
        let path = self.resolve_model_path()?;
        self.get_file(&path)
    }

    /// Get a file by name from the archive
    pub fn get_file(&mut self, name: &str) -> Result<String> {
        let mut file = self.archive.by_name(name)?;
        let mut content = String::new();
        file.read_to_string(&mut content)?;
        Ok(content)
    }

    /// Get the number of entries in the archive
    pub fn len(&self) -> usize {
        self.archive.len()
    }

    /// Check if the archive is empty
    pub fn is_empty(&self) -> bool {
        self.archive.len() == 0
    }
}
