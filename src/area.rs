//! Surface area of triangle meshes
//!
//! Each triangle's area is half the magnitude of the cross product of two of
//! its edges. This is exact for any orientation in space; no projection or
//! normal approximation is involved.
//!
//! Coordinates are converted to millimeters before the cross product is
//! taken, areas are summed in mm², and the sum is reported in dm².

use crate::model::{Triangle, TriangleMesh};
use crate::units::{LengthUnit, area_to_canonical, length_to_canonical};
use nalgebra::Point3;

/// Area of one triangle in the square of its coordinate unit
///
/// Degenerate triangles give 0. NaN coordinates give NaN.
///
/// # Example
/// ```
/// use platecalc::{Triangle, area::triangle_area};
///
/// let tri = Triangle::from_coords([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
/// assert_eq!(triangle_area(&tri), 0.5);
/// ```
#[inline]
pub fn triangle_area(triangle: &Triangle) -> f64 {
    let e1 = triangle.b - triangle.a;
    let e2 = triangle.c - triangle.a;
    e1.cross(&e2).norm() * 0.5
}

/// Total area in mm² of triangles whose coordinates are in `unit`
pub fn surface_area_mm2(triangles: &[Triangle], unit: LengthUnit) -> f64 {
    let to_mm = |p: &Point3<f64>| p.map(|v| length_to_canonical(v, unit));
    triangles
        .iter()
        .map(|triangle| triangle_area(&triangle.map_vertices(to_mm)))
        .sum()
}

/// Total area in dm² of triangles whose coordinates are in `unit`
pub fn surface_area(triangles: &[Triangle], unit: LengthUnit) -> f64 {
    area_to_canonical(surface_area_mm2(triangles, unit))
}

/// Total area in dm² of a decoded mesh
pub fn mesh_area(mesh: &TriangleMesh) -> f64 {
    surface_area(&mesh.triangles, mesh.unit)
}
