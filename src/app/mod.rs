use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::Config;
use crate::error::{Result, TbnError};
use crate::model::ModelData;
use crate::patch::patch;
use crate::tangent::compute_all;


/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: PathBuf,
    pub faces: usize,
}

/// Generates tangent space for the OBJ file at `path` and rewrites it in place.
///
/// Every check runs and the complete new text is built before the file is
/// written, so a failure at any step leaves the file untouched.
pub fn generate<P: AsRef<Path>>(path: P, config: &Config) -> Result<Report> {
    let path = path.as_ref();
    validate_path(path, config)?;

    info!("Reading {}", path.display());
    let bytes = fs::read(path).map_err(|e| TbnError::io(path, e))?;
    let source = String::from_utf8(bytes)
        .map_err(|e| TbnError::MalformedDocument(format!("not valid UTF-8: {}", e.utf8_error())))?;

    let model = ModelData::parse(&source)?;
    if model.tex_coords.is_none() {
        return Err(TbnError::NoTextureCoordinates);
    }
    if model.has_tangent_space() {
        return Err(TbnError::TangentAlreadyPresent);
    }

    let spaces = compute_all(
        model.face_count(),
        Some(model.vertices.as_slice()),
        model.tex_coords.as_deref(),
        config.degenerate_epsilon,
    )?;
    // Buffers are no longer needed once the tangent space exists
    let faces = model.face_count();
    drop(model);

    let patched = patch(&source, &spaces, &config.tool_name)?;
    debug!("Patched document is {} bytes (was {})", patched.len(), source.len());

    fs::write(path, patched).map_err(|e| TbnError::io(path, e))?;
    info!("Wrote tangent space for {} faces to {}", faces, path.display());

    Ok(Report {
        path: path.to_path_buf(),
        faces,
    })
}

fn validate_path(path: &Path, config: &Config) -> Result<()> {
    let len = path.as_os_str().len();
    if len == 0 {
        return Err(TbnError::InvalidArguments("empty path".to_string()));
    }
    if len >= config.max_path_len {
        return Err(TbnError::InvalidArguments(format!(
            "path is {} bytes long, it must be shorter than {}",
            len, config.max_path_len
        )));
    }
    if !path.is_file() {
        return Err(TbnError::InvalidArguments(format!(
            "{} is not a readable file",
            path.display()
        )));
    }
    Ok(())
}
