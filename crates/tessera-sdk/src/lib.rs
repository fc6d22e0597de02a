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

//! The public-facing SDK of Tessera.
//!
//! Re-exports the pieces an application needs to declare and load resources,
//! plus a few conveniences on top of the registry.

use anyhow::{Context, Result};
use std::path::Path;

pub use tessera_agents as agents;
pub use tessera_core as core;
pub use tessera_lanes as lanes;
pub use tessera_telemetry as telemetry;

pub mod prelude {
    //! Everything needed for the common case: `use tessera_sdk::prelude::*;`.
    pub use tessera_agents::{
        DecoderTable, LazyResource, LoadProgress, RegistryConfig, RegistryError,
        RegistryProgress, ResourceKey, ResourceRegistry,
    };
    pub use tessera_core::{
        resource::{
            CubeMap, DataDocument, DataTable, EnvironmentMap, Image, Mesh, Model, Texture,
        },
        AssetHandle, Backend, Resource, ResourceKind, TypedResource,
    };
    pub use tessera_lanes::{FileSystemFetcher, MemoryFetcher, ResourceDecoder};
    pub use tessera_telemetry::init_logging;
}

/// Declares every file of `dir` whose extension is supported, on `backend`.
///
/// `dir` is relative to nothing: the registry's own base path still applies
/// to the declared filenames, so callers normally pass the base path here.
/// Subdirectories and unsupported files are skipped. Returns the declared
/// filenames, sorted.
pub fn declare_directory(
    registry: &tessera_agents::ResourceRegistry,
    dir: impl AsRef<Path>,
    backend: tessera_core::Backend,
) -> Result<Vec<String>> {
    let dir = dir.as_ref();
    let mut filenames = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to list directory '{}'", dir.display()))?
    {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
            log::warn!("Skipping non UTF-8 filename in '{}'", dir.display());
            continue;
        };
        if tessera_core::classify(&filename).is_err() {
            log::debug!("Skipping unsupported file '{filename}'");
            continue;
        }
        filenames.push(filename);
    }

    filenames.sort();
    for filename in &filenames {
        registry.declare_with(filename, backend)?;
    }
    Ok(filenames)
}
