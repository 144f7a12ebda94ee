//! Data structures shared by the parsers and the area engine

use crate::units::LengthUnit;
use nalgebra::{Matrix3, Point3, Vector3};

/// Number of values in a 3×4 affine transform attribute
pub const TRANSFORM_VALUE_COUNT: usize = 12;

/// A triangle given by three vertex positions
///
/// Vertex order is kept as decoded. Degenerate triangles (collinear or
/// coincident vertices) are ordinary values with zero area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub a: Point3<f64>,
    /// Second vertex
    pub b: Point3<f64>,
    /// Third vertex
    pub c: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three points
    pub fn new(a: Point3<f64>, b: Point3<f64>, c: Point3<f64>) -> Self {
        Self { a, b, c }
    }

    /// Create a triangle from raw coordinate triples
    pub fn from_coords(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Self {
        Self::new(Point3::from(a), Point3::from(b), Point3::from(c))
    }

    /// The three vertices in order
    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// Apply `f` to every vertex
    pub fn map_vertices<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Point3<f64>) -> Point3<f64>,
    {
        Self::new(f(&self.a), f(&self.b), f(&self.c))
    }

    /// Multiply every coordinate by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        self.map_vertices(|p| Point3::from(p.coords * factor))
    }

    /// Whether every coordinate is finite
    pub fn is_finite(&self) -> bool {
        self.vertices()
            .iter()
            .all(|p| p.coords.iter().all(|v| v.is_finite()))
    }
}

/// Triangles decoded from one file plus the unit their coordinates use
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriangleMesh {
    /// Triangles in decode order
    pub triangles: Vec<Triangle>,
    /// Unit of every coordinate in `triangles`
    pub unit: LengthUnit,
}

impl TriangleMesh {
    /// Create a mesh from triangles in the given unit
    pub fn new(triangles: Vec<Triangle>, unit: LengthUnit) -> Self {
        Self { triangles, unit }
    }

    /// Number of triangles
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// A 3×4 affine transform `p' = M·p + t`
///
/// The 12 values are read row by row: `m00 m01 m02 t0 m10 m11 m12 t1 m20 m21 m22 t2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Rotation/scale part
    pub matrix: Matrix3<f64>,
    /// Translation part
    pub translation: Vector3<f64>,
}

impl Transform {
    /// The identity transform
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    /// Build a transform from 12 row-major values
    pub fn from_row_major(values: &[f64; TRANSFORM_VALUE_COUNT]) -> Self {
        let v = values;
        Self {
            matrix: Matrix3::new(v[0], v[1], v[2], v[4], v[5], v[6], v[8], v[9], v[10]),
            translation: Vector3::new(v[3], v[7], v[11]),
        }
    }

    /// Parse a whitespace-separated transform attribute
    ///
    /// Returns `None` unless the text holds exactly 12 finite numbers.
    pub fn parse(text: &str) -> Option<Self> {
        let values = text
            .split_whitespace()
            .map(|token| token.parse::<f64>().ok().filter(|v| v.is_finite()))
            .collect::<Option<Vec<f64>>>()?;

        let values: [f64; TRANSFORM_VALUE_COUNT] = values.try_into().ok()?;
        Some(Self::from_row_major(&values))
    }

    /// Transform a single point
    #[inline]
    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.matrix * point.coords + self.translation)
    }

    /// Transform every vertex of a triangle
    pub fn apply_triangle(&self, triangle: &Triangle) -> Triangle {
        triangle.map_vertices(|p| self.apply(p))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}
