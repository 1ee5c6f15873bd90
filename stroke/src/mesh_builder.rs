//! Triangulation of finished extruder chains.

use quill_core::mesh::{Mesh, Vertex};
use quill_core::profile_function;

use crate::fat_line::FatLine;

/// Triangulate a chain of extruders into one raw mesh in screen space.
///
/// Each line contributes a strip zipping its forward and backward sides,
/// plus fans over its start and end caps. Lines without an outline are
/// skipped. Triangles come out counter-clockwise.
pub fn build_line_mesh(lines: &[FatLine]) -> Mesh {
    profile_function!();
    let mut mesh = Mesh::new();
    for line in lines {
        let piece = line_mesh(line);
        if !piece.idx.is_empty() {
            mesh.append(&piece);
        }
    }
    mesh.normalize_triangle_orientation();
    log::debug!(
        "built stroke mesh: {} lines, {} vertices, {} triangles",
        lines.len(),
        mesh.verts.len(),
        mesh.idx.len() / 3
    );
    mesh
}

fn line_mesh(line: &FatLine) -> Mesh {
    let (fwd, back) = (line.forward_line(), line.backward_line());
    let (start_cap, end_cap) = (line.start_cap(), line.end_cap());
    if fwd.is_empty() || back.is_empty() {
        return cap_only_mesh(start_cap, end_cap);
    }

    let len = fwd.len() + back.len() + start_cap.len() + end_cap.len();
    let mut verts: Vec<Vertex> = Vec::with_capacity(len);
    verts.extend_from_slice(fwd);
    verts.extend_from_slice(back);
    verts.extend_from_slice(start_cap);
    verts.extend_from_slice(end_cap);

    let f = |i: usize| i as u32;
    let b = |j: usize| (fwd.len() + j) as u32;
    let s = |k: usize| (fwd.len() + back.len() + k) as u32;
    let e = |k: usize| (fwd.len() + back.len() + start_cap.len() + k) as u32;

    let mut idx = Vec::new();

    // Zip the two sides, advancing whichever lags in relative progress.
    let (last_f, last_b) = (fwd.len() - 1, back.len() - 1);
    let (mut i, mut j) = (0, 0);
    while i < last_f || j < last_b {
        let advance_fwd = if i == last_f {
            false
        } else if j == last_b {
            true
        } else {
            (i + 1) as f32 / last_f as f32 <= (j + 1) as f32 / last_b as f32
        };
        if advance_fwd {
            idx.extend([f(i), b(j), f(i + 1)]);
            i += 1;
        } else {
            idx.extend([f(i), b(j), b(j + 1)]);
            j += 1;
        }
    }

    // Start fan around back[0], end fan around fwd[last].
    let start_ring: Vec<u32> = (0..start_cap.len()).map(s).chain([f(0)]).collect();
    for pair in start_ring.windows(2) {
        idx.extend([b(0), pair[0], pair[1]]);
    }
    let end_ring: Vec<u32> = (0..end_cap.len()).map(e).chain([b(last_b)]).collect();
    for pair in end_ring.windows(2) {
        idx.extend([f(last_f), pair[0], pair[1]]);
    }

    Mesh::from_verts(verts).with_indices(idx)
}

/// A joined line closed before any sample: its end cap hangs off the join
/// edge, fanned around the join's backward vertex.
fn cap_only_mesh(start_cap: &[Vertex], end_cap: &[Vertex]) -> Mesh {
    let [join_back, join_fwd] = start_cap else {
        return Mesh::new();
    };
    if end_cap.is_empty() {
        return Mesh::new();
    }
    let verts: Vec<Vertex> = [*join_back, *join_fwd]
        .into_iter()
        .chain(end_cap.iter().copied())
        .collect();
    let idx = (1..verts.len() as u32 - 1).flat_map(|k| [0, k, k + 1]).collect();
    Mesh::from_verts(verts).with_indices(idx)
}
