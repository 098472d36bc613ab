//! Rewrites an OBJ document so it carries the generated tangent space.
//!
//! The patch appends a `vtan` block and a `vbi` block after the normals
//! section and extends every face corner from `p/t/n` to `p/t/n/tan/bi`.
//! Tangent space is per face: all corners of face `k` reference entry `k + 1`.
//! Lines outside the inserted regions are emitted byte-for-byte.

mod document;

use log::debug;

use crate::error::{Result, TbnError};
use crate::tangent::TangentSpace;
use document::{Document, Record};

#[cfg(test)]
mod tests;

pub const TANGENT_KEYWORD: &str = "vtan";
pub const BINORMAL_KEYWORD: &str = "vbi";

const NORMAL_KEYWORD: &str = "vn";
const FACE_KEYWORD: &str = "f";

/// Produces the patched document text. The input is never modified.
pub fn patch(source: &str, spaces: &[TangentSpace], tool: &str) -> Result<String> {
    if spaces.is_empty() {
        return Err(TbnError::EmptyInput);
    }

    let doc = Document::parse(source);
    if doc.contains_keyword(TANGENT_KEYWORD) || doc.contains_keyword(BINORMAL_KEYWORD) {
        return Err(TbnError::TangentAlreadyPresent);
    }

    let insert_after = attribute_insertion_point(&doc)?;
    let faces = doc.positions_of(FACE_KEYWORD);
    if faces.len() != spaces.len() {
        return Err(TbnError::MalformedDocument(format!(
            "document has {} face records but {} tangent spaces were computed",
            faces.len(),
            spaces.len()
        )));
    }

    // Rewrite face lines in place, indices are unchanged by this step
    let mut records = doc.records.clone();
    for (face, &index) in faces.iter().enumerate() {
        let augmented = augment_face(&records[index].text, face + 1)
            .map_err(|msg| TbnError::MalformedDocument(format!("face {}: {}", face + 1, msg)))?;
        records[index].text = augmented.into();
    }

    let last_face = faces[faces.len() - 1];
    if records[last_face].ending.is_empty() {
        records[last_face].ending = doc.eol;
    }
    let marker = doc.line(format!("# Reorganize by {}", tool));
    let blocks = attribute_blocks(&doc, spaces, tool);

    let mut patched = Vec::with_capacity(records.len() + blocks.len() + 1);
    for (index, record) in records.into_iter().enumerate() {
        patched.push(record);
        if index == insert_after {
            patched.extend(blocks.iter().cloned());
        }
        if index == last_face {
            patched.push(marker.clone());
        }
    }

    debug!(
        "Patched {} faces, attribute blocks inserted after line {}",
        spaces.len(),
        insert_after + 1
    );

    Ok(Document { records: patched, eol: doc.eol }.render())
}

/// Index of the blank line closing the normals section.
fn attribute_insertion_point(doc: &Document) -> Result<usize> {
    let last_normal = doc.rposition_keyword(NORMAL_KEYWORD).ok_or_else(|| {
        TbnError::MalformedDocument("no vertex normal records".to_string())
    })?;

    doc.records
        .iter()
        .enumerate()
        .skip(last_normal + 1)
        .find(|(_, record)| record.is_blank() && !record.ending.is_empty())
        .map(|(index, _)| index)
        .ok_or_else(|| {
            TbnError::MalformedDocument(format!(
                "no blank line after the last vertex normal (line {})",
                last_normal + 1
            ))
        })
}

/// The `vtan` block followed by the `vbi` block, each closed by a summary comment and a blank line.
fn attribute_blocks<'a>(doc: &Document<'a>, spaces: &[TangentSpace], tool: &str) -> Vec<Record<'a>> {
    let mut lines = Vec::with_capacity(2 * spaces.len() + 4);

    for space in spaces {
        let t = space.tangent;
        lines.push(doc.line(format!("{} {:.6} {:.6} {:.6}", TANGENT_KEYWORD, t.x, t.y, t.z)));
    }
    lines.push(doc.line(format!("# {} tangents (Gen by {})", spaces.len(), tool)));
    lines.push(doc.line(""));

    for space in spaces {
        let b = space.binormal;
        lines.push(doc.line(format!("{} {:.6} {:.6} {:.6}", BINORMAL_KEYWORD, b.x, b.y, b.z)));
    }
    lines.push(doc.line(format!("# {} binormals (Gen by {})", spaces.len(), tool)));
    lines.push(doc.line(""));

    lines
}

/// Appends `/index/index` to each of the three corner tokens of a face line.
fn augment_face(line: &str, index: usize) -> std::result::Result<String, String> {
    let suffix = format!("/{}/{}", index, index);

    let spans = token_spans(line);
    // spans[0] is the `f` keyword; a `#` token starts a trailing comment
    let corners: Vec<(usize, usize)> = spans
        .iter()
        .skip(1)
        .take_while(|&&(start, _)| !line[start..].starts_with('#'))
        .copied()
        .collect();

    if corners.len() != 3 {
        return Err(format!(
            "expected 3 corners, found {} in '{}'",
            corners.len(),
            line
        ));
    }

    let mut out = String::with_capacity(line.len() + 3 * suffix.len());
    let mut cursor = 0;
    for &(_, end) in &corners {
        out.push_str(&line[cursor..end]);
        out.push_str(&suffix);
        cursor = end;
    }
    out.push_str(&line[cursor..]);

    Ok(out)
}

/// Byte ranges `(start, end)` of the whitespace-delimited tokens of `line`.
fn token_spans(line: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                spans.push((s, i));
                start = None;
            }
            (false, None) => start = Some(i),
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, line.len()));
    }

    spans
}
