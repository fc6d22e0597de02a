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

//! glTF 2.0 parsing, for both the JSON (`.gltf`) and binary (`.glb`) containers.

use crate::decode_lane::{BoxError, DecodeContext};
use base64::Engine;
use gltf::{mesh::Reader, Buffer};
use tessera_core::{
    math::{Aabb, Vec2, Vec3, Vec4},
    resource::{Mesh, PrimitiveTopology},
};

const DATA_URI_PREFIXES: [&str; 2] = [
    "data:application/octet-stream;base64,",
    "data:application/gltf-buffer;base64,",
];

/// Parses every primitive of every mesh in the document.
pub(super) fn decode(bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Vec<Mesh>, BoxError> {
    let gltf =
        gltf::Gltf::from_slice(bytes).map_err(|e| format!("Failed to parse GLTF file: {e}"))?;

    let buffer_data =
        load_buffer_data(&gltf, ctx).map_err(|e| format!("Failed to load GLTF buffer data: {e}"))?;

    let mut meshes = Vec::new();
    for mesh in gltf.document.meshes() {
        let primitive_count = mesh.primitives().len();
        for primitive in mesh.primitives() {
            let get_buffer_data =
                |buffer: Buffer<'_>| buffer_data.get(buffer.index()).map(Vec::as_slice);
            let reader = primitive.reader(get_buffer_data);

            let name = mesh.name().map(|name| {
                if primitive_count > 1 {
                    format!("{name}#{}", primitive.index())
                } else {
                    name.to_string()
                }
            });

            let bounding_box = {
                let bb = primitive.bounding_box();
                Aabb::from_min_max(Vec3::from(bb.min), Vec3::from(bb.max))
            };

            meshes.push(Mesh {
                name,
                positions: extract_positions(&reader)?,
                normals: extract_normals(&reader),
                tex_coords: extract_tex_coords(&reader),
                tangents: extract_tangents(&reader),
                colors: extract_colors(&reader),
                indices: extract_indices(&reader),
                primitive_type: map_primitive_type(primitive.mode()),
                bounding_box,
            });
        }
    }

    if meshes.is_empty() {
        return Err("No meshes found in GLTF file".into());
    }
    Ok(meshes)
}

fn load_buffer_data(gltf: &gltf::Gltf, ctx: &DecodeContext<'_>) -> Result<Vec<Vec<u8>>, BoxError> {
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        match buffer.source() {
            gltf::buffer::Source::Bin => {
                let blob = gltf
                    .blob
                    .as_deref()
                    .ok_or("GLB file references binary chunk but it is missing")?;
                buffer_data.push(blob.to_vec());
            }
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                buffer_data.push(decode_data_uri(uri)?);
            }
            gltf::buffer::Source::Uri(uri) => {
                buffer_data.push(ctx.resolver.resolve(&ctx.sibling(uri))?);
            }
        }
    }
    Ok(buffer_data)
}

fn decode_data_uri(uri: &str) -> Result<Vec<u8>, BoxError> {
    let payload = DATA_URI_PREFIXES
        .iter()
        .find_map(|prefix| uri.strip_prefix(prefix))
        .ok_or_else(|| format!("Unsupported data URI format: {uri}"))?;
    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

fn extract_positions<'a, 's, F>(reader: &Reader<'a, 's, F>) -> Result<Vec<Vec3>, BoxError>
where
    F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
{
    reader
        .read_positions()
        .map(|iter| iter.map(Vec3::from).collect())
        .ok_or_else(|| "Vertex positions attribute not found".into())
}

fn extract_normals<'a, 's, F>(reader: &Reader<'a, 's, F>) -> Option<Vec<Vec3>>
where
    F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
{
    reader
        .read_normals()
        .map(|iter| iter.map(Vec3::from).collect())
}

fn extract_tex_coords<'a, 's, F>(reader: &Reader<'a, 's, F>) -> Option<Vec<Vec2>>
where
    F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
{
    reader
        .read_tex_coords(0)
        .map(|iter| iter.into_f32().map(Vec2::from).collect())
}

fn extract_tangents<'a, 's, F>(reader: &Reader<'a, 's, F>) -> Option<Vec<Vec4>>
where
    F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
{
    reader
        .read_tangents()
        .map(|iter| iter.map(Vec4::from).collect())
}

fn extract_colors<'a, 's, F>(reader: &Reader<'a, 's, F>) -> Option<Vec<Vec4>>
where
    F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
{
    reader
        .read_colors(0)
        .map(|iter| iter.into_rgba_f32().map(Vec4::from).collect())
}

fn extract_indices<'a, 's, F>(reader: &Reader<'a, 's, F>) -> Option<Vec<u32>>
where
    F: Clone + Fn(Buffer<'a>) -> Option<&'s [u8]>,
{
    reader.read_indices().map(|iter| iter.into_u32().collect())
}

fn map_primitive_type(mode: gltf::mesh::Mode) -> PrimitiveTopology {
    match mode {
        gltf::mesh::Mode::Triangles => PrimitiveTopology::TriangleList,
        gltf::mesh::Mode::TriangleStrip => PrimitiveTopology::TriangleStrip,
        gltf::mesh::Mode::Lines => PrimitiveTopology::LineList,
        gltf::mesh::Mode::LineStrip => PrimitiveTopology::LineStrip,
        gltf::mesh::Mode::Points => PrimitiveTopology::PointList,
        // Loops and fans have no direct counterpart.
        _ => PrimitiveTopology::TriangleList,
    }
}
