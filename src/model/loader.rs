use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};

use super::face::{Corner, Face, RecordCounts};
use crate::error::{Result, TbnError};

#[derive(Debug, Default)]
struct ObjData {
    positions: Vec<[f32; 3]>,
    tex_coords: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
    tangents: Vec<[f32; 3]>,
    binormals: Vec<[f32; 3]>,
    faces: Vec<Face>,
}

impl ObjData {
    fn counts(&self) -> RecordCounts {
        RecordCounts {
            positions: self.positions.len(),
            tex_coords: self.tex_coords.len(),
            normals: self.normals.len(),
            tangents: self.tangents.len(),
            binormals: self.binormals.len(),
        }
    }

    fn process_face(&mut self, face_tokens: &[&str]) -> std::result::Result<(), String> {
        // Anything after a comment marker is not a corner
        let corner_tokens: Vec<&str> = face_tokens
            .iter()
            .copied()
            .take_while(|token| !token.starts_with('#'))
            .collect();

        if corner_tokens.len() != 3 {
            return Err(format!(
                "face has {} corners, only triangulated faces are supported",
                corner_tokens.len()
            ));
        }

        let counts = self.counts();
        let corners = [
            Corner::parse(corner_tokens[0], &counts)?,
            Corner::parse(corner_tokens[1], &counts)?,
            Corner::parse(corner_tokens[2], &counts)?,
        ];
        self.faces.push(Face { corners });

        Ok(())
    }

    fn process_line(&mut self, line: &str) -> std::result::Result<(), String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return Ok(());
        }

        match tokens[0] {
            "v" => self.positions.push(parse_floats::<3>(&tokens[1..])?),
            "vt" => self.tex_coords.push(parse_floats::<2>(&tokens[1..])?),
            "vn" => self.normals.push(parse_floats::<3>(&tokens[1..])?),
            "vtan" => self.tangents.push(parse_floats::<3>(&tokens[1..])?),
            "vbi" => self.binormals.push(parse_floats::<3>(&tokens[1..])?),
            "f" => self.process_face(&tokens[1..])?,
            _ => {}
        }

        Ok(())
    }
}

/// Parses the first `N` tokens as floats. Extra components (e.g. `w`) are ignored.
fn parse_floats<const N: usize>(tokens: &[&str]) -> std::result::Result<[f32; N], String> {
    if tokens.len() < N {
        return Err(format!("expected {} components, found {}", N, tokens.len()));
    }

    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(tokens) {
        *value = token
            .parse::<f32>()
            .map_err(|_| format!("invalid number '{}'", token))?;
    }
    Ok(values)
}

/// Geometry extracted from an OBJ document, flattened per face.
///
/// `vertices` holds 9 floats per face (3 corners x xyz) and `tex_coords`
/// 6 floats per face (3 corners x uv), in face order. `tangents` and
/// `binormals` are the raw `vtan` / `vbi` records.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub faces: Vec<Face>,
    pub vertices: Vec<f32>,
    pub tex_coords: Option<Vec<f32>>,
    pub normals: Option<Vec<f32>>,
    pub tangents: Option<Vec<f32>>,
    pub binormals: Option<Vec<f32>>,
}

impl ModelData {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TbnError::io(path, e))?;
        Self::from_reader(BufReader::new(file)).map_err(|e| match e {
            TbnError::Io { source, .. } => TbnError::io(path, source),
            other => other,
        })
    }

    pub fn parse(source: &str) -> Result<Self> {
        Self::from_reader(source.as_bytes())
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut obj_data = ObjData::default();

        for (number, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| TbnError::io("<reader>", e))?;
            obj_data
                .process_line(&line)
                .map_err(|msg| TbnError::MalformedDocument(format!("line {}: {}", number + 1, msg)))?;
        }

        let model = Self::flatten(obj_data);
        debug!(
            "Extracted {} faces (texcoords: {}, normals: {}, tangents: {})",
            model.face_count(),
            model.tex_coords.is_some(),
            model.normals.is_some(),
            model.tangents.is_some()
        );
        Ok(model)
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// True when the document already carries generated tangent space records.
    pub fn has_tangent_space(&self) -> bool {
        self.tangents.is_some() || self.binormals.is_some()
    }

    fn flatten(obj_data: ObjData) -> Self {
        let corners = || obj_data.faces.iter().flat_map(|face| face.corners.iter());

        let vertices = corners()
            .flat_map(|corner| obj_data.positions[corner.position])
            .collect();

        // Texcoords and normals only count when every corner references one
        let tex_coords = if !obj_data.faces.is_empty() && corners().all(|c| c.tex_coord.is_some()) {
            Some(
                corners()
                    .filter_map(|c| c.tex_coord)
                    .flat_map(|i| obj_data.tex_coords[i])
                    .collect(),
            )
        } else {
            if corners().any(|c| c.tex_coord.is_some()) {
                warn!("Some face corners have no texture coordinate, ignoring texture coordinates");
            }
            None
        };

        let normals = if !obj_data.faces.is_empty() && corners().all(|c| c.normal.is_some()) {
            Some(
                corners()
                    .filter_map(|c| c.normal)
                    .flat_map(|i| obj_data.normals[i])
                    .collect(),
            )
        } else {
            None
        };

        let records = |records: &[[f32; 3]]| -> Option<Vec<f32>> {
            if records.is_empty() {
                None
            } else {
                Some(records.iter().flatten().copied().collect())
            }
        };

        Self {
            tangents: records(&obj_data.tangents),
            binormals: records(&obj_data.binormals),
            vertices,
            tex_coords,
            normals,
            faces: obj_data.faces,
        }
    }
}
