/// Resolved (0-based) attribute indices of one face corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Corner {
    pub position: usize,
    pub tex_coord: Option<usize>,
    pub normal: Option<usize>,
    pub tangent: Option<usize>,
    pub binormal: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub corners: [Corner; 3],
}

/// Counts of each record kind seen so far, used to resolve relative indices.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RecordCounts {
    pub positions: usize,
    pub tex_coords: usize,
    pub normals: usize,
    pub tangents: usize,
    pub binormals: usize,
}

impl Corner {
    /// Parses `p`, `p/t`, `p//n`, `p/t/n` or `p/t/n/tan/bi`.
    pub(crate) fn parse(token: &str, counts: &RecordCounts) -> Result<Self, String> {
        let indices: Vec<&str> = token.split('/').collect();
        if indices.len() > 5 {
            return Err(format!("too many indices in corner '{}'", token));
        }

        let position = indices
            .first()
            .and_then(|s| resolve(s, counts.positions).transpose())
            .ok_or_else(|| format!("missing position index in corner '{}'", token))??;

        let optional = |slot: usize, count: usize| -> Result<Option<usize>, String> {
            match indices.get(slot) {
                Some(s) => resolve(s, count),
                None => Ok(None),
            }
        };

        Ok(Self {
            position,
            tex_coord: optional(1, counts.tex_coords)?,
            normal: optional(2, counts.normals)?,
            tangent: optional(3, counts.tangents)?,
            binormal: optional(4, counts.binormals)?,
        })
    }
}

/// Resolves a 1-based or negative (relative) OBJ index. Empty slots are `None`.
fn resolve(raw: &str, count: usize) -> Result<Option<usize>, String> {
    if raw.is_empty() {
        return Ok(None);
    }

    let index = raw
        .parse::<i64>()
        .map_err(|_| format!("invalid index '{}'", raw))?;

    // OBJ indices are 1-based
    let resolved = if index < 0 {
        count as i64 + index
    } else {
        index - 1
    };

    if resolved < 0 || resolved >= count as i64 {
        return Err(format!("index {} out of range ({} records)", index, count));
    }

    Ok(Some(resolved as usize))
}
