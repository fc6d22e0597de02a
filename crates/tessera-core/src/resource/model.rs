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

//! Decoded 3D geometry.

use crate::{
    asset::Asset,
    math::{Aabb, Vec2, Vec3, Vec4},
};

/// How vertices are assembled into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrimitiveTopology {
    /// Every vertex is a point.
    PointList,
    /// Every pair of vertices is a line.
    LineList,
    /// Consecutive vertices form a polyline.
    LineStrip,
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Consecutive vertices form a triangle strip.
    TriangleStrip,
}

/// A single drawable primitive: vertex streams plus optional indices.
///
/// This is the `Model`/`Alternate` shape: the alternate engine merges every
/// primitive of a file into one `Mesh`.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    /// Name from the source file, if it had one.
    pub name: Option<String>,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals.
    pub normals: Option<Vec<Vec3>>,
    /// First UV set.
    pub tex_coords: Option<Vec<Vec2>>,
    /// Vertex tangents, `w` holds the handedness.
    pub tangents: Option<Vec<Vec4>>,
    /// Vertex colors as linear RGBA.
    pub colors: Option<Vec<Vec4>>,
    /// Index data.
    pub indices: Option<Vec<u32>>,
    /// Primitive assembly.
    pub primitive_type: PrimitiveTopology,
    /// Bounds of `positions`.
    pub bounding_box: Aabb,
}

impl Asset for Mesh {}

impl Mesh {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of indices, or of vertices for non-indexed meshes.
    pub fn index_count(&self) -> usize {
        self.indices
            .as_ref()
            .map_or(self.positions.len(), |indices| indices.len())
    }
}

/// Every mesh found in a model file, in source order.
///
/// This is the `Model`/`Standard` shape.
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// One entry per source primitive.
    pub meshes: Vec<Mesh>,
    /// Union of the meshes' bounds.
    pub bounding_box: Aabb,
}

impl Asset for Model {}

impl Model {
    /// Builds a model and computes its bounds.
    pub fn new(meshes: Vec<Mesh>) -> Self {
        let bounding_box = meshes
            .iter()
            .fold(Aabb::INVALID, |acc, mesh| acc.merge(&mesh.bounding_box));
        Self {
            meshes,
            bounding_box,
        }
    }

    /// Total vertex count across meshes.
    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    /// Looks a mesh up by its source name.
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes
            .iter()
            .find(|mesh| mesh.name.as_deref() == Some(name))
    }
}
