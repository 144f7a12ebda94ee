//! 3MF model decoding
//!
//! Only the parts of a 3MF document that carry surface geometry are read:
//! the document unit, each object's mesh, and each object's `transform`
//! attribute. Everything else (materials, build items, components,
//! metadata) is skipped.
//!
//! Decoding is lenient. Missing or unparsable vertex coordinates read as 0,
//! triangles with unusable indices are dropped, and a malformed transform is
//! treated as the identity. Only XML syntax errors fail the document.

use crate::error::{Error, Result};
use crate::model::{Transform, Triangle, TriangleMesh};
use crate::opc::{Package, is_zip};
use crate::units::LengthUnit;
use log::debug;
use nalgebra::Point3;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::io::Cursor;

/// Decode a 3MF file, or a bare model document, into millimeter triangles
///
/// Buffers starting with the ZIP signature are opened as archives and the
/// model entry is located with [`crate::opc::resolve_model_entry`]. Anything
/// else is read directly as UTF-8 model XML.
pub fn parse_3mf(bytes: &[u8]) -> Result<TriangleMesh> {
    if is_zip(bytes) {
        let mut package = Package::open(Cursor::new(bytes))?;
        let xml = package.get_model()?;
        parse_model_xml(&xml)
    } else {
        let xml = std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidXml(format!("model document is not UTF-8: {}", e)))?;
        parse_model_xml(xml)
    }
}

/// Mesh data collected for the object currently being read
struct ObjectState {
    transform: Option<Transform>,
    mesh: Option<MeshState>,
}

#[derive(Default)]
struct MeshState {
    vertices: Vec<Point3<f64>>,
    triangles: Vec<Option<[usize; 3]>>,
}

/// Decode 3MF model XML into millimeter triangles
///
/// Each object's transform is applied to its own triangles first; the
/// document unit is applied once to all triangles afterwards. The returned
/// mesh is always in millimeters.
pub fn parse_model_xml(xml: &str) -> Result<TriangleMesh> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut unit = LengthUnit::Millimeter;
    let mut triangles = Vec::new();
    let mut object: Option<ObjectState> = None;
    let mut dropped = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"model" => unit = decode_unit(e),
                b"object" => {
                    object = Some(ObjectState {
                        transform: decode_transform(e),
                        mesh: None,
                    });
                }
                b"mesh" => {
                    if let Some(ref mut obj) = object {
                        obj.mesh = Some(MeshState::default());
                    }
                }
                name => decode_mesh_element(name, e, object.as_mut()),
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"model" => unit = decode_unit(e),
                name => decode_mesh_element(name, e, object.as_mut()),
            },
            Event::End(ref e) => match e.local_name().as_ref() {
                b"mesh" => {
                    if let Some(ref mut obj) = object {
                        if let Some(mesh) = obj.mesh.take() {
                            dropped += resolve_mesh(mesh, obj.transform.as_ref(), &mut triangles);
                        }
                    }
                }
                b"object" => object = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if dropped > 0 {
        debug!("Dropped {} triangles with out-of-range vertex indices", dropped);
    }

    let scale = unit.mm_per_unit();
    if scale != 1.0 {
        for triangle in &mut triangles {
            *triangle = triangle.scaled(scale);
        }
    }

    debug!(
        "3MF model decoded: {} triangles, document unit {}",
        triangles.len(),
        unit
    );

    Ok(TriangleMesh::new(triangles, LengthUnit::Millimeter))
}

/// Record a `<vertex>` or `<triangle>` into the open mesh, if any
fn decode_mesh_element(name: &[u8], e: &BytesStart, object: Option<&mut ObjectState>) {
    let Some(mesh) = object.and_then(|obj| obj.mesh.as_mut()) else {
        return;
    };

    match name {
        b"vertex" => mesh.vertices.push(decode_vertex(e)),
        b"triangle" => mesh.triangles.push(decode_triangle(e)),
        _ => {}
    }
}

/// Turn indexed triangles into positioned ones, returning how many were dropped
fn resolve_mesh(
    mesh: MeshState,
    transform: Option<&Transform>,
    out: &mut Vec<Triangle>,
) -> usize {
    let vertices = &mesh.vertices;
    let before = out.len();
    let total = mesh.triangles.len();

    out.extend(mesh.triangles.iter().flatten().filter_map(|&[v1, v2, v3]| {
        let triangle = Triangle::new(
            *vertices.get(v1)?,
            *vertices.get(v2)?,
            *vertices.get(v3)?,
        );
        Some(match transform {
            Some(t) => t.apply_triangle(&triangle),
            None => triangle,
        })
    }));

    total - (out.len() - before)
}

/// Read an attribute's unescaped value, skipping malformed attributes
fn attr_value<'a>(e: &'a BytesStart, key: &[u8]) -> Option<Cow<'a, str>> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == key)?
        .unescape_value()
        .ok()
}

fn decode_unit(e: &BytesStart) -> LengthUnit {
    match attr_value(e, b"unit") {
        Some(name) => {
            let unit = LengthUnit::from_name(&name);
            if unit.is_none() {
                debug!("Unknown model unit '{}', using millimeter", name);
            }
            unit.unwrap_or_default()
        }
        None => LengthUnit::Millimeter,
    }
}

fn decode_transform(e: &BytesStart) -> Option<Transform> {
    let text = attr_value(e, b"transform")?;
    let transform = Transform::parse(&text);
    if transform.is_none() {
        debug!("Ignoring malformed object transform '{}'", text);
    }
    transform
}

fn decode_vertex(e: &BytesStart) -> Point3<f64> {
    let coord = |key: &[u8]| {
        attr_value(e, key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    Point3::new(coord(b"x"), coord(b"y"), coord(b"z"))
}

fn decode_triangle(e: &BytesStart) -> Option<[usize; 3]> {
    let index = |key: &[u8]| attr_value(e, key)?.trim().parse::<usize>().ok();
    Some([index(b"v1")?, index(b"v2")?, index(b"v3")?])
}
