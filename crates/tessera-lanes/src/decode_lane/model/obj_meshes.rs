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

//! Wavefront OBJ parsing.

use crate::decode_lane::BoxError;
use ahash::AHashMap;
use anyhow::Context;
use tessera_core::{
    math::{Aabb, Vec2, Vec3},
    resource::{Mesh, PrimitiveTopology},
};

/// Parses every object of an OBJ file. Materials are ignored.
pub(super) fn decode(bytes: &[u8]) -> Result<Vec<Mesh>, BoxError> {
    let obj_text = std::str::from_utf8(bytes).context("OBJ file is not valid UTF-8")?;

    let (models, _materials) = tobj::load_obj_buf(
        &mut std::io::Cursor::new(obj_text),
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |_| Ok((Vec::new(), AHashMap::new())),
    )
    .context("Failed to parse OBJ file")?;

    if models.is_empty() {
        return Err("No models found in OBJ file".into());
    }

    Ok(models.into_iter().map(into_mesh).collect())
}

fn into_mesh(model: tobj::Model) -> Mesh {
    let mesh = model.mesh;

    let positions: Vec<Vec3> = mesh
        .positions
        .chunks_exact(3)
        .map(|v| Vec3::new(v[0], v[1], v[2]))
        .collect();

    let normals = (!mesh.normals.is_empty()).then(|| {
        mesh.normals
            .chunks_exact(3)
            .map(|n| Vec3::new(n[0], n[1], n[2]))
            .collect()
    });

    let tex_coords = (!mesh.texcoords.is_empty()).then(|| {
        mesh.texcoords
            .chunks_exact(2)
            .map(|t| Vec2::new(t[0], t[1]))
            .collect()
    });

    let bounding_box = Aabb::from_points(&positions).unwrap_or(Aabb::INVALID);

    Mesh {
        name: (!model.name.is_empty()).then_some(model.name),
        positions,
        normals,
        tex_coords,
        tangents: None,
        colors: None,
        indices: Some(mesh.indices),
        primitive_type: PrimitiveTopology::TriangleList,
        bounding_box,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_triangulated() {
        let meshes = decode(
            b"v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\n",
        )
        .unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].index_count(), 6);
        assert!(meshes[0].normals.is_some());
        assert!(meshes[0].tex_coords.is_none());
    }

    #[test]
    fn invalid_utf8_fails() {
        assert!(decode(&[0xff, 0xfe, 0x00]).is_err());
    }

    #[test]
    fn empty_file_has_no_models() {
        assert!(decode(b"# nothing here\n").is_err());
    }
}
