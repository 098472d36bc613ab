//! Per-face tangent space derivation.
//!
//! A triangle's tangent and binormal are the object-space directions in which
//! the texture coordinates u and v increase. They are solved from the two
//! triangle edges and the matching texture-space edges.

use glam::{Vec2, Vec3};
use log::debug;

use crate::error::{Result, TbnError};


/// Floats per face in the flat position buffer (3 corners x xyz).
pub const POSITION_STRIDE: usize = 9;
/// Floats per face in the flat texture coordinate buffer (3 corners x uv).
pub const TEXCOORD_STRIDE: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TangentSpace {
    pub tangent: Vec3,
    pub binormal: Vec3,
}

/// Positions and texture coordinates of one triangle, aligned by corner.
#[derive(Debug, Clone, Copy)]
pub struct TriangleGeometry {
    pub positions: [Vec3; 3],
    pub tex_coords: [Vec2; 3],
}

/// Why a triangle has no well-defined tangent space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degeneracy {
    /// The texture-space triangle has (near) zero area.
    Uv,
    /// The solved basis has zero length, e.g. a zero-area triangle in object space.
    Geometry,
}

impl TriangleGeometry {
    pub fn new(positions: [Vec3; 3], tex_coords: [Vec2; 3]) -> Self {
        Self { positions, tex_coords }
    }

    /// Reads face `face` out of flat per-face buffers.
    ///
    /// The caller guarantees both slices hold at least `face + 1` faces.
    fn from_buffers(face: usize, vertices: &[f32], tex_coords: &[f32]) -> Self {
        let p = &vertices[face * POSITION_STRIDE..(face + 1) * POSITION_STRIDE];
        let t = &tex_coords[face * TEXCOORD_STRIDE..(face + 1) * TEXCOORD_STRIDE];

        Self {
            positions: [
                Vec3::new(p[0], p[1], p[2]),
                Vec3::new(p[3], p[4], p[5]),
                Vec3::new(p[6], p[7], p[8]),
            ],
            tex_coords: [
                Vec2::new(t[0], t[1]),
                Vec2::new(t[2], t[3]),
                Vec2::new(t[4], t[5]),
            ],
        }
    }
}

/// Computes the normalized tangent and binormal of a single triangle.
pub fn compute_tangent_space(
    triangle: &TriangleGeometry,
    epsilon: f32,
) -> std::result::Result<TangentSpace, Degeneracy> {
    let [v0, v1, v2] = triangle.positions;
    let [t0, t1, t2] = triangle.tex_coords;

    // Object space edges
    let e0 = v1 - v0;
    let e1 = v2 - v0;

    // Texture space edges
    let dt0 = t1 - t0;
    let dt1 = t2 - t0;

    // Twice the UV area against the longer edge squared, so collinear and
    // near-duplicate corners are caught at any UV scale
    let det = dt0.perp_dot(dt1);
    let scale = dt0.length_squared().max(dt1.length_squared());
    if !det.is_finite() || det.abs() <= epsilon * scale {
        return Err(Degeneracy::Uv);
    }
    let r = 1.0 / det;

    let tangent = (e0 * dt1.y - e1 * dt0.y) * r;
    let binormal = (e1 * dt0.x - e0 * dt1.x) * r;

    match (tangent.try_normalize(), binormal.try_normalize()) {
        (Some(tangent), Some(binormal)) => Ok(TangentSpace { tangent, binormal }),
        _ => Err(Degeneracy::Geometry),
    }
}

/// Computes one tangent space per face, in face order.
pub fn compute_all(
    face_count: usize,
    vertices: Option<&[f32]>,
    tex_coords: Option<&[f32]>,
    epsilon: f32,
) -> Result<Vec<TangentSpace>> {
    let vertices = vertices
        .ok_or_else(|| TbnError::InvalidBuffer("missing vertex buffer".to_string()))?;
    let tex_coords = tex_coords
        .ok_or_else(|| TbnError::InvalidBuffer("missing texture coordinate buffer".to_string()))?;

    if vertices.len() < face_count * POSITION_STRIDE {
        return Err(TbnError::InvalidBuffer(format!(
            "vertex buffer holds {} floats, {} faces need {}",
            vertices.len(),
            face_count,
            face_count * POSITION_STRIDE
        )));
    }
    if tex_coords.len() < face_count * TEXCOORD_STRIDE {
        return Err(TbnError::InvalidBuffer(format!(
            "texture coordinate buffer holds {} floats, {} faces need {}",
            tex_coords.len(),
            face_count,
            face_count * TEXCOORD_STRIDE
        )));
    }

    let spaces = (0..face_count)
        .map(|face| {
            let triangle = TriangleGeometry::from_buffers(face, vertices, tex_coords);
            compute_tangent_space(&triangle, epsilon).map_err(|degeneracy| match degeneracy {
                Degeneracy::Uv => TbnError::DegenerateUv { face },
                Degeneracy::Geometry => TbnError::DegenerateGeometry { face },
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Computed tangent space for {} faces", spaces.len());
    Ok(spaces)
}
