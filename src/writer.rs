//! Triangle-soup (STL) encoders
//!
//! Both writers emit one facet per triangle. Facet normals are recomputed
//! from the vertex winding; degenerate facets get a zero normal. The binary
//! attribute word is always zero.

use crate::error::Result;
use crate::model::Triangle;
use crate::parser::stl::{HEADER_LEN, RECORD_LEN};
use nalgebra::Vector3;
use std::io::Write;

/// Unit normal of a triangle, or the zero vector when it has no area
pub fn facet_normal(triangle: &Triangle) -> Vector3<f64> {
    let n = (triangle.b - triangle.a).cross(&(triangle.c - triangle.a));
    let len = n.norm();
    if len > 0.0 && len.is_finite() {
        n / len
    } else {
        Vector3::zeros()
    }
}

/// Write triangles as a binary STL stream
///
/// `header` is truncated or zero-padded to 80 bytes. Coordinates are
/// narrowed to `f32`.
pub fn write_binary_stl<W: Write>(triangles: &[Triangle], header: &str, mut writer: W) -> Result<()> {
    let mut head = [0u8; HEADER_LEN];
    let bytes = header.as_bytes();
    let n = bytes.len().min(HEADER_LEN);
    head[..n].copy_from_slice(&bytes[..n]);
    writer.write_all(&head)?;

    let count = u32::try_from(triangles.len()).unwrap_or(u32::MAX);
    writer.write_all(&count.to_le_bytes())?;

    let mut record = Vec::with_capacity(RECORD_LEN);
    for triangle in triangles.iter().take(count as usize) {
        record.clear();
        let normal = facet_normal(triangle);
        for v in normal.iter() {
            record.extend_from_slice(&(*v as f32).to_le_bytes());
        }
        for p in triangle.vertices() {
            for v in p.coords.iter() {
                record.extend_from_slice(&(*v as f32).to_le_bytes());
            }
        }
        record.extend_from_slice(&0u16.to_le_bytes());
        writer.write_all(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// Write triangles as an ASCII STL stream named `name`
pub fn write_ascii_stl<W: Write>(name: &str, triangles: &[Triangle], mut writer: W) -> Result<()> {
    writeln!(writer, "solid {}", name)?;
    for triangle in triangles {
        let n = facet_normal(triangle);
        writeln!(writer, "  facet normal {:e} {:e} {:e}", n.x, n.y, n.z)?;
        writeln!(writer, "    outer loop")?;
        for p in triangle.vertices() {
            writeln!(writer, "      vertex {:e} {:e} {:e}", p.x, p.y, p.z)?;
        }
        writeln!(writer, "    endloop")?;
        writeln!(writer, "  endfacet")?;
    }
    writeln!(writer, "endsolid {}", name)?;
    writer.flush()?;
    Ok(())
}
