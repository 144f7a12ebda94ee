//! Shared fixtures for integration tests
//!
//! Builds triangle-soup buffers, model documents and 3MF packages in memory.

#![allow(dead_code)]

use platecalc::Triangle;
use platecalc::writer::{write_ascii_stl, write_binary_stl};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

pub const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="model" ContentType="application/vnd.ms-package.3dmanufacturing-3dmodel+xml"/>
</Types>"#;

pub const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Target="/3D/3dmodel.model" Id="rel0" Type="http://schemas.microsoft.com/3dmanufacturing/2013/01/3dmodel"/>
</Relationships>"#;

/// Axis-aligned box with one corner at `origin`, as 12 triangles
pub fn cuboid(origin: [f64; 3], size: [f64; 3]) -> Vec<Triangle> {
    let [ox, oy, oz] = origin;
    let [sx, sy, sz] = size;
    let p = |x: f64, y: f64, z: f64| [ox + x * sx, oy + y * sy, oz + z * sz];
    let quads = [
        [p(0., 0., 0.), p(0., 1., 0.), p(1., 1., 0.), p(1., 0., 0.)],
        [p(0., 0., 1.), p(1., 0., 1.), p(1., 1., 1.), p(0., 1., 1.)],
        [p(0., 0., 0.), p(1., 0., 0.), p(1., 0., 1.), p(0., 0., 1.)],
        [p(0., 1., 0.), p(0., 1., 1.), p(1., 1., 1.), p(1., 1., 0.)],
        [p(0., 0., 0.), p(0., 0., 1.), p(0., 1., 1.), p(0., 1., 0.)],
        [p(1., 0., 0.), p(1., 1., 0.), p(1., 1., 1.), p(1., 0., 1.)],
    ];
    quads
        .iter()
        .flat_map(|q| {
            [
                Triangle::from_coords(q[0], q[1], q[2]),
                Triangle::from_coords(q[0], q[2], q[3]),
            ]
        })
        .collect()
}

/// Surface area of an axis-aligned box in the square of its length unit
pub fn cuboid_area(size: [f64; 3]) -> f64 {
    let [x, y, z] = size;
    2.0 * (x * y + y * z + x * z)
}

pub fn binary_stl(triangles: &[Triangle]) -> Vec<u8> {
    let mut out = Vec::new();
    write_binary_stl(triangles, "platecalc test fixture", &mut out).unwrap();
    out
}

pub fn ascii_stl(name: &str, triangles: &[Triangle]) -> Vec<u8> {
    let mut out = Vec::new();
    write_ascii_stl(name, triangles, &mut out).unwrap();
    out
}

/// One `<object>` element with an indexed mesh built from `triangles`
pub fn object_xml(id: u32, triangles: &[Triangle], transform: Option<&str>) -> String {
    let mut xml = match transform {
        Some(t) => format!("<object id=\"{}\" type=\"model\" transform=\"{}\">", id, t),
        None => format!("<object id=\"{}\" type=\"model\">", id),
    };
    xml.push_str("<mesh><vertices>");
    for tri in triangles {
        for p in tri.vertices() {
            xml.push_str(&format!("<vertex x=\"{}\" y=\"{}\" z=\"{}\"/>", p.x, p.y, p.z));
        }
    }
    xml.push_str("</vertices><triangles>");
    for i in 0..triangles.len() {
        xml.push_str(&format!(
            "<triangle v1=\"{}\" v2=\"{}\" v3=\"{}\"/>",
            3 * i,
            3 * i + 1,
            3 * i + 2
        ));
    }
    xml.push_str("</triangles></mesh></object>");
    xml
}

/// A complete model document around pre-rendered `<object>` elements
pub fn model_xml(unit: &str, objects: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<model unit="{}" xml:lang="en-US" xmlns="http://schemas.microsoft.com/3dmanufacturing/core/2015/02">
  <resources>{}</resources>
  <build><item objectid="1"/></build>
</model>"#,
        unit,
        objects.concat()
    )
}

/// ZIP archive holding `entries` in the given order
pub fn zip_entries(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Rewrite the compression method recorded for `name` in both ZIP headers
pub fn set_compression_method(mut bytes: Vec<u8>, name: &str, method: u16) -> Vec<u8> {
    for i in 0..bytes.len().saturating_sub(4) {
        let (name_at, method_at) = match &bytes[i..i + 4] {
            b"PK\x03\x04" => (30, 8),
            b"PK\x01\x02" => (46, 10),
            _ => continue,
        };
        let stored = bytes.get(i + name_at..i + name_at + name.len());
        if stored == Some(name.as_bytes()) {
            bytes[i + method_at..i + method_at + 2].copy_from_slice(&method.to_le_bytes());
        }
    }
    bytes
}

/// Standard 3MF package with the model at `model_path`
pub fn package_3mf(model_path: &str, model: &str) -> Vec<u8> {
    zip_entries(&[
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", RELS.as_bytes()),
        (model_path, model.as_bytes()),
    ])
}

pub fn assert_close(actual: f64, expected: f64, rel: f64) {
    let scale = expected.abs().max(f64::MIN_POSITIVE);
    assert!(
        ((actual - expected) / scale).abs() <= rel,
        "expected {} got {} (relative tolerance {})",
        expected,
        actual,
        rel
    );
}
