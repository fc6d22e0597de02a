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

//! Decoders for model files (`glb`, `gltf`, `obj`).
//!
//! Both backends share the per-format parsers; they differ in what they keep.
//! The standard backend returns every primitive as its own [`Mesh`] inside a
//! [`Model`], the alternate backend merges them into a single [`Mesh`].

mod gltf_meshes;
mod merge;
mod obj_meshes;

pub use merge::merge_meshes;

use super::{BoxError, DecodeContext, ResourceDecoder};
use tessera_core::resource::{Mesh, Model};

fn decode_meshes(bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Vec<Mesh>, BoxError> {
    match ctx.extension {
        "glb" | "gltf" => gltf_meshes::decode(bytes, ctx),
        "obj" => obj_meshes::decode(bytes),
        other => Err(format!("No model parser for extension '.{other}'").into()),
    }
}

/// Standard model decoder: one [`Mesh`] per source primitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelDecoder;

impl ResourceDecoder<Model> for ModelDecoder {
    fn strategy_name(&self) -> &'static str {
        "ModelDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Model, BoxError> {
        Ok(Model::new(decode_meshes(bytes, ctx)?))
    }
}

/// Alternate model decoder: all primitives merged into one indexed [`Mesh`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MergedMeshDecoder;

impl ResourceDecoder<Mesh> for MergedMeshDecoder {
    fn strategy_name(&self) -> &'static str {
        "MergedMeshDecoder"
    }

    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Mesh, BoxError> {
        let meshes = decode_meshes(bytes, ctx)?;
        Ok(merge_meshes(meshes)?)
    }
}
