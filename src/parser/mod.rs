//! Mesh file decoding
//!
//! Both parsers produce a [`TriangleMesh`](crate::model::TriangleMesh):
//! [`stl`] keeps coordinates in the caller's unit, [`threemf`] always returns
//! millimeters because 3MF documents declare their own unit.

pub mod stl;
pub mod threemf;

pub use stl::{SoupFormat, parse_ascii_stl, parse_binary_stl, parse_stl, sniff_format};
pub use threemf::{parse_3mf, parse_model_xml};
