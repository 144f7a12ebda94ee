//! STL (triangle soup) decoding
//!
//! STL comes in a text flavour (`solid` / `facet` / `vertex` lines) and a
//! binary flavour (80-byte header, little-endian triangle count, 50-byte
//! records). There is no reliable marker telling the two apart, so the
//! buffer is sniffed first; see [`sniff_format`].

use crate::config::SniffPolicy;
use crate::error::{Error, Result};
use crate::model::{Triangle, TriangleMesh};
use crate::units::LengthUnit;
use log::{debug, trace};

/// Keyword a text STL starts with
pub const ASCII_KEYWORD: &str = "solid";

/// Number of leading bytes inspected when sniffing
pub const SNIFF_WINDOW: usize = 100;

/// Size of the binary header, skipped unconditionally
pub const HEADER_LEN: usize = 80;

/// Size of the little-endian triangle count following the header
pub const COUNT_LEN: usize = 4;

/// Size of one binary triangle record
pub const RECORD_LEN: usize = 50;

/// Offset of the first vertex inside a record (after the unused normal)
const RECORD_VERTEX_OFFSET: usize = 12;

/// Outcome of sniffing an STL buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoupFormat {
    /// Text STL
    Text,
    /// Binary STL
    Binary,
    /// Starts like text STL, but its length matches the binary layout exactly
    Ambiguous,
}

impl SoupFormat {
    /// Collapse `Ambiguous` into a concrete format under `policy`
    pub fn resolve(self, policy: SniffPolicy) -> SoupFormat {
        match (self, policy) {
            (SoupFormat::Ambiguous, SniffPolicy::PreferBinary) => SoupFormat::Binary,
            (SoupFormat::Ambiguous, SniffPolicy::PreferText) => SoupFormat::Text,
            (format, _) => format,
        }
    }
}

/// Whether the first bytes look like a text STL
///
/// The first [`SNIFF_WINDOW`] bytes must hold no NUL byte, contain a line
/// break, and start with `solid` once trimmed (case-insensitive).
pub fn looks_like_text(bytes: &[u8]) -> bool {
    let window = &bytes[..bytes.len().min(SNIFF_WINDOW)];
    if window.contains(&0) {
        return false;
    }

    let text = String::from_utf8_lossy(window);
    let starts_with_keyword = text
        .trim_start()
        .get(..ASCII_KEYWORD.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(ASCII_KEYWORD));

    starts_with_keyword && (text.contains('\n') || text.contains('\r'))
}

/// Triangle count declared by a binary header, if the buffer is long enough to hold one
pub fn declared_triangle_count(bytes: &[u8]) -> Option<u32> {
    let raw = bytes.get(HEADER_LEN..HEADER_LEN + COUNT_LEN)?;
    let mut count = [0u8; COUNT_LEN];
    count.copy_from_slice(raw);
    Some(u32::from_le_bytes(count))
}

/// Total byte length of a binary STL holding `count` triangles
///
/// Returns `None` when the length does not fit in `usize`.
pub fn binary_len_for(count: u32) -> Option<usize> {
    usize::try_from(count)
        .ok()?
        .checked_mul(RECORD_LEN)?
        .checked_add(HEADER_LEN + COUNT_LEN)
}

/// Classify an STL buffer as text, binary or ambiguous
///
/// `Ambiguous` needs a NUL-free sniff window, so all four count bytes are
/// non-zero. That means at least 0x01010101 declared triangles (a file of
/// roughly 842 MB); for ordinary files the [`SniffPolicy`] has no effect.
pub fn sniff_format(bytes: &[u8]) -> SoupFormat {
    let exact_binary = declared_triangle_count(bytes)
        .and_then(binary_len_for)
        .is_some_and(|len| len == bytes.len());

    classify(looks_like_text(bytes), exact_binary)
}

fn classify(text_like: bool, exact_binary: bool) -> SoupFormat {
    match (text_like, exact_binary) {
        (false, _) => SoupFormat::Binary,
        (true, true) => SoupFormat::Ambiguous,
        (true, false) => SoupFormat::Text,
    }
}

/// Decode a text STL
///
/// Vertex lines are collected three at a time; every third vertex emits a
/// triangle. `endfacet` drops any partially collected facet, as does the end
/// of input. Vertex lines whose coordinates fail to parse are ignored.
pub fn parse_ascii_stl(bytes: &[u8]) -> Vec<Triangle> {
    let text = String::from_utf8_lossy(bytes);
    let mut triangles = Vec::new();
    let mut pending: Vec<[f64; 3]> = Vec::with_capacity(3);

    for line in text.lines() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(keyword) = tokens.first() else {
            continue;
        };

        if keyword.eq_ignore_ascii_case("vertex") && tokens.len() == 4 {
            match parse_coords(&tokens[1..]) {
                Some(coords) => pending.push(coords),
                None => {
                    trace!("Skipping unparsable vertex line: {}", line.trim());
                    continue;
                }
            }

            if pending.len() == 3 {
                triangles.push(Triangle::from_coords(pending[0], pending[1], pending[2]));
                pending.clear();
            }
        } else if keyword.eq_ignore_ascii_case("endfacet") {
            pending.clear();
        }
    }

    triangles
}

fn parse_coords(tokens: &[&str]) -> Option<[f64; 3]> {
    let x = tokens.first()?.parse::<f64>().ok()?;
    let y = tokens.get(1)?.parse::<f64>().ok()?;
    let z = tokens.get(2)?.parse::<f64>().ok()?;
    Some([x, y, z])
}

/// Decode a binary STL
///
/// Buffers no longer than the header decode to zero triangles. A buffer
/// that ends inside the triangle count is an error. Otherwise exactly the
/// declared number of records is read; bytes past the last record are
/// ignored, and a buffer that ends early is an error.
pub fn parse_binary_stl(bytes: &[u8]) -> Result<Vec<Triangle>> {
    let Some(count) = declared_triangle_count(bytes) else {
        if bytes.len() > HEADER_LEN {
            return Err(Error::malformed_binary(
                "triangle count",
                HEADER_LEN + COUNT_LEN,
                bytes.len(),
            ));
        }
        return Ok(Vec::new());
    };

    let end = binary_len_for(count)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| {
            let needed = (count as usize)
                .saturating_mul(RECORD_LEN)
                .saturating_add(HEADER_LEN + COUNT_LEN);
            Error::malformed_binary(
                &format!("{} triangle records", count),
                needed,
                bytes.len(),
            )
        })?;

    let records = &bytes[HEADER_LEN + COUNT_LEN..end];
    let triangles = records
        .chunks_exact(RECORD_LEN)
        .map(|record| {
            let vertex = |index: usize| {
                let base = RECORD_VERTEX_OFFSET + index * 12;
                [
                    f64::from(f32_at(record, base)),
                    f64::from(f32_at(record, base + 4)),
                    f64::from(f32_at(record, base + 8)),
                ]
            };
            Triangle::from_coords(vertex(0), vertex(1), vertex(2))
        })
        .collect();

    Ok(triangles)
}

#[inline]
fn f32_at(record: &[u8], offset: usize) -> f32 {
    let mut raw = [0u8; 4];
    raw.copy_from_slice(&record[offset..offset + 4]);
    f32::from_le_bytes(raw)
}

/// Sniff and decode an STL buffer whose coordinates are in `unit`
pub fn parse_stl(bytes: &[u8], unit: LengthUnit, policy: SniffPolicy) -> Result<TriangleMesh> {
    let sniffed = sniff_format(bytes);
    let format = sniffed.resolve(policy);
    debug!(
        "STL sniffed as {:?}, reading as {:?} ({} bytes)",
        sniffed,
        format,
        bytes.len()
    );

    let triangles = match format {
        SoupFormat::Binary => parse_binary_stl(bytes)?,
        _ => parse_ascii_stl(bytes),
    };

    Ok(TriangleMesh::new(triangles, unit))
}
