// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Flattening of a multi-primitive model into a single mesh.

use crate::decode_lane::BoxError;
use tessera_core::{
    math::Aabb,
    resource::{Mesh, PrimitiveTopology},
};

/// Concatenates `meshes` into one indexed triangle list.
///
/// Indices are rebased onto the merged vertex buffer, and non-indexed meshes
/// get sequential indices. An optional attribute stream survives only if
/// every input mesh carries it.
pub fn merge_meshes(meshes: Vec<Mesh>) -> Result<Mesh, BoxError> {
    if meshes.is_empty() {
        return Err("Cannot merge an empty mesh list".into());
    }
    if let Some(bad) = meshes
        .iter()
        .find(|mesh| mesh.primitive_type != PrimitiveTopology::TriangleList)
    {
        return Err(format!(
            "Cannot merge mesh {:?} with topology {:?}, only triangle lists are supported",
            bad.name, bad.primitive_type
        )
        .into());
    }

    let keep_normals = meshes.iter().all(|m| m.normals.is_some());
    let keep_tex_coords = meshes.iter().all(|m| m.tex_coords.is_some());
    let keep_tangents = meshes.iter().all(|m| m.tangents.is_some());
    let keep_colors = meshes.iter().all(|m| m.colors.is_some());

    let name = match meshes.as_slice() {
        [only] => only.name.clone(),
        _ => None,
    };

    let mut merged = Mesh {
        name,
        normals: keep_normals.then(Vec::new),
        tex_coords: keep_tex_coords.then(Vec::new),
        tangents: keep_tangents.then(Vec::new),
        colors: keep_colors.then(Vec::new),
        indices: Some(Vec::new()),
        primitive_type: PrimitiveTopology::TriangleList,
        bounding_box: Aabb::INVALID,
        ..Default::default()
    };

    for mesh in meshes {
        let base = u32::try_from(merged.positions.len())
            .map_err(|_| "Merged mesh exceeds the u32 index range")?;
        let vertex_count = mesh.positions.len() as u32;

        if let Some(indices) = merged.indices.as_mut() {
            match mesh.indices {
                Some(local) => indices.extend(local.into_iter().map(|i| i + base)),
                None => indices.extend(base..base + vertex_count),
            }
        }

        merged.bounding_box = merged.bounding_box.merge(&mesh.bounding_box);
        merged.positions.extend(mesh.positions);
        append(&mut merged.normals, mesh.normals);
        append(&mut merged.tex_coords, mesh.tex_coords);
        append(&mut merged.tangents, mesh.tangents);
        append(&mut merged.colors, mesh.colors);
    }

    Ok(merged)
}

fn append<T>(dst: &mut Option<Vec<T>>, src: Option<Vec<T>>) {
    if let (Some(dst), Some(src)) = (dst.as_mut(), src) {
        dst.extend(src);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::math::{Vec2, Vec3};

    fn triangle(offset: f32, indexed: bool) -> Mesh {
        let positions = vec![
            Vec3::new(offset, 0.0, 0.0),
            Vec3::new(offset + 1.0, 0.0, 0.0),
            Vec3::new(offset, 1.0, 0.0),
        ];
        Mesh {
            bounding_box: Aabb::from_points(&positions).unwrap(),
            positions,
            tex_coords: Some(vec![Vec2::ZERO; 3]),
            indices: indexed.then(|| vec![2, 1, 0]),
            ..Default::default()
        }
    }

    #[test]
    fn indices_are_rebased_and_generated() {
        let mut second = triangle(5.0, false);
        second.tex_coords = None;
        let merged = merge_meshes(vec![triangle(0.0, true), second]).unwrap();

        assert_eq!(merged.vertex_count(), 6);
        assert_eq!(merged.indices.as_deref(), Some(&[2, 1, 0, 3, 4, 5][..]));
        assert!(merged.tex_coords.is_none());
        assert_eq!(merged.bounding_box.max.x, 6.0);
    }

    #[test]
    fn shared_streams_are_kept() {
        let merged = merge_meshes(vec![triangle(0.0, true), triangle(1.0, true)]).unwrap();
        assert_eq!(merged.tex_coords.map(|t| t.len()), Some(6));
    }

    #[test]
    fn strips_and_empty_input_are_rejected() {
        assert!(merge_meshes(Vec::new()).is_err());

        let mut strip = triangle(0.0, false);
        strip.primitive_type = PrimitiveTopology::TriangleStrip;
        assert!(merge_meshes(vec![strip]).is_err());
    }
}
