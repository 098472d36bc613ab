use super::*;
use crate::model::ModelData;
use crate::tangent::compute_all;
use glam::Vec3;

const TOOL: &str = "tbn-gen";

const TRIANGLE: &str = "\
# Exported triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
# 3 vertices

vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
# 3 texture coords

vn 0.0 0.0 1.0
# 1 vertex normals

g Triangle
f 1/1/1 2/2/1 3/3/1
# 1 faces

";

fn axis_space() -> TangentSpace {
    TangentSpace {
        tangent: Vec3::X,
        binormal: Vec3::Y,
    }
}

/// A document with `faces` identical triangles sharing three vertices.
fn repeated_triangles(faces: usize) -> String {
    let mut source = String::from(
        "v 0 0 0\nv 1 0 0\nv 0 1 0\n\nvt 0 0\nvt 1 0\nvt 0 1\n\nvn 0 0 1\n\ng Mesh\n",
    );
    for _ in 0..faces {
        source.push_str("f 1/1/1 2/2/1 3/3/1\n");
    }
    source
}

fn spaces_for(source: &str) -> Vec<TangentSpace> {
    let model = ModelData::parse(source).unwrap();
    compute_all(
        model.face_count(),
        Some(model.vertices.as_slice()),
        model.tex_coords.as_deref(),
        crate::config::DEFAULT_DEGENERATE_EPSILON,
    )
    .unwrap()
}

#[test]
fn test_single_face_output() {
    let patched = patch(TRIANGLE, &[axis_space()], TOOL).unwrap();

    let expected = "\
# Exported triangle
v 0.0 0.0 0.0
v 1.0 0.0 0.0
v 0.0 1.0 0.0
# 3 vertices

vt 0.0 0.0
vt 1.0 0.0
vt 0.0 1.0
# 3 texture coords

vn 0.0 0.0 1.0
# 1 vertex normals

vtan 1.000000 0.000000 0.000000
# 1 tangents (Gen by tbn-gen)

vbi 0.000000 1.000000 0.000000
# 1 binormals (Gen by tbn-gen)

g Triangle
f 1/1/1/1/1 2/2/1/1/1 3/3/1/1/1
# Reorganize by tbn-gen
# 1 faces

";
    assert_eq!(patched, expected);
}

#[test]
fn test_content_before_insertion_is_untouched() {
    let patched = patch(TRIANGLE, &[axis_space()], TOOL).unwrap();
    let prefix_len = TRIANGLE.find("g Triangle").unwrap();
    assert!(patched.starts_with(&TRIANGLE[..prefix_len]));
}

#[test]
fn test_negative_components_format() {
    let space = TangentSpace {
        tangent: Vec3::new(-0.5, 0.25, -1.0),
        binormal: Vec3::new(0.333333, -0.1234567, 0.0),
    };
    let patched = patch(TRIANGLE, &[space], TOOL).unwrap();
    assert!(patched.contains("vtan -0.500000 0.250000 -1.000000\n"));
    assert!(patched.contains("vbi 0.333333 -0.123457 0.000000\n"));
}

#[test]
fn test_every_face_has_five_indices() {
    let source = repeated_triangles(12);
    let patched = patch(&source, &spaces_for(&source), TOOL).unwrap();

    let face_lines: Vec<&str> = patched.lines().filter(|l| l.starts_with("f ")).collect();
    assert_eq!(face_lines.len(), 12, "Face count should be unchanged");

    for (face, line) in face_lines.iter().enumerate() {
        let corners: Vec<&str> = line.split_whitespace().skip(1).collect();
        assert_eq!(corners.len(), 3, "Face {} should have three corners", face);
        for corner in corners {
            let indices: Vec<&str> = corner.split('/').collect();
            assert_eq!(indices.len(), 5, "Corner '{}' should have five indices", corner);
            assert_eq!(indices[3], (face + 1).to_string());
            assert_eq!(indices[4], (face + 1).to_string());
        }
    }
}

#[test]
fn test_round_trip_indices() {
    let source = repeated_triangles(15);
    let spaces = spaces_for(&source);
    let patched = patch(&source, &spaces, TOOL).unwrap();

    let model = ModelData::parse(&patched).unwrap();
    assert_eq!(model.face_count(), 15);
    assert_eq!(model.tangents.as_ref().map(Vec::len), Some(15 * 3));
    assert_eq!(model.binormals.as_ref().map(Vec::len), Some(15 * 3));

    for (face, data) in model.faces.iter().enumerate() {
        for corner in &data.corners {
            assert_eq!(corner.tangent, Some(face), "Tangent index of face {}", face);
            assert_eq!(corner.binormal, Some(face), "Binormal index of face {}", face);
        }
    }
}

#[test]
fn test_empty_input() {
    let result = patch(TRIANGLE, &[], TOOL);
    assert!(matches!(result, Err(TbnError::EmptyInput)));
}

#[test]
fn test_already_patched() {
    let patched = patch(TRIANGLE, &[axis_space()], TOOL).unwrap();
    let result = patch(&patched, &[axis_space()], TOOL);
    assert!(matches!(result, Err(TbnError::TangentAlreadyPresent)));
}

#[test]
fn test_missing_normals() {
    let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\n\nvt 0 0\nvt 1 0\nvt 0 1\n\nf 1/1 2/2 3/3\n";
    let result = patch(source, &[axis_space()], TOOL);
    assert!(matches!(result, Err(TbnError::MalformedDocument(_))));
}

#[test]
fn test_no_blank_line_after_normals() {
    let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\nf 1/1/1 2/2/1 3/3/1\n";
    let result = patch(source, &[axis_space()], TOOL);
    assert!(matches!(result, Err(TbnError::MalformedDocument(_))));
}

#[test]
fn test_whitespace_line_is_not_a_section_break() {
    let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\n  \t\nf 1/1/1 2/2/1 3/3/1\n";
    let result = patch(source, &[axis_space()], TOOL);
    assert!(matches!(result, Err(TbnError::MalformedDocument(_))));

    // The first empty line after the normals is used instead
    let source = "vn 0 0 1\n \n# normals\n\nf 1/1/1 2/2/1 3/3/1\n";
    let patched = patch(source, &[axis_space()], TOOL).unwrap();
    assert!(patched.starts_with("vn 0 0 1\n \n# normals\n\nvtan 1.000000 0.000000 0.000000\n"));
}

#[test]
fn test_face_count_mismatch() {
    let source = repeated_triangles(2);

    let result = patch(&source, &[axis_space()], TOOL);
    assert!(matches!(result, Err(TbnError::MalformedDocument(_))));

    let result = patch(&source, &[axis_space(); 3], TOOL);
    assert!(matches!(result, Err(TbnError::MalformedDocument(_))));
}

#[test]
fn test_quad_face_is_rejected() {
    let source = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\n\nf 1//1 2//1 3//1 4//1\n";
    let result = patch(source, &[axis_space()], TOOL);
    assert!(matches!(result, Err(TbnError::MalformedDocument(_))));
}

#[test]
fn test_crlf_line_endings() {
    let source = TRIANGLE.replace('\n', "\r\n");
    let patched = patch(&source, &[axis_space()], TOOL).unwrap();

    assert!(patched.contains("vtan 1.000000 0.000000 0.000000\r\n"));
    assert!(patched.contains("f 1/1/1/1/1 2/2/1/1/1 3/3/1/1/1\r\n# Reorganize by tbn-gen\r\n"));
    assert!(!patched.replace("\r\n", "").contains('\n'), "No bare LF should be introduced");
}

#[test]
fn test_records_between_faces_are_untouched() {
    let source = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
vn 0 0 1

usemtl red
s 1
f 1/1/1 2/2/1 3/3/1
usemtl blue
s off
f 3/3/1 2/2/1 1/1/1
";
    let patched = patch(source, &[axis_space(), axis_space()], TOOL).unwrap();
    let tail = &patched[patched.find("usemtl red").unwrap()..];
    assert_eq!(
        tail,
        "\
usemtl red
s 1
f 1/1/1/1/1 2/2/1/1/1 3/3/1/1/1
usemtl blue
s off
f 3/3/1/2/2 2/2/1/2/2 1/1/1/2/2
# Reorganize by tbn-gen
"
    );
}

#[test]
fn test_last_face_without_newline() {
    let source = "vn 0 0 1\n\nf 1/1/1 2/2/1 3/3/1";
    let patched = patch(source, &[axis_space()], TOOL).unwrap();
    assert!(patched.ends_with("f 1/1/1/1/1 2/2/1/1/1 3/3/1/1/1\n# Reorganize by tbn-gen\n"));
}

#[test]
fn test_augment_face_keeps_separators() {
    assert_eq!(
        augment_face("f 1/2/3\t4/5/6  7/8/9 # tri", 4).unwrap(),
        "f 1/2/3/4/4\t4/5/6/4/4  7/8/9/4/4 # tri"
    );
    assert_eq!(augment_face("f 1//1 2//2 3//3", 12).unwrap(), "f 1//1/12/12 2//2/12/12 3//3/12/12");
    assert_eq!(augment_face("f 1/1/1 2/2/1 3/3/1 ", 1).unwrap(), "f 1/1/1/1/1 2/2/1/1/1 3/3/1/1/1 ");
    assert!(augment_face("f 1 2", 1).is_err());
    assert!(augment_face("f", 1).is_err());
}

#[test]
fn test_token_spans() {
    assert_eq!(token_spans("f 1 22  333 "), vec![(0, 1), (2, 3), (4, 6), (8, 11)]);
    assert!(token_spans("   ").is_empty());
}
