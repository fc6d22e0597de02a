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

//! Error taxonomy of the resource registry.

use tessera_core::{Backend, ResourceKind, ResourceShape, UnsupportedExtension};
use tessera_lanes::BoxError;
use thiserror::Error;

/// Errors surfaced by [`super::ResourceRegistry`].
///
/// Declaration and lookup errors are raised synchronously and never modify the
/// registry. Only [`RegistryError::LoadFailure`] comes out of `load`.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The filename's extension maps to no resource kind.
    #[error("Unsupported file extension: .{extension}")]
    UnsupportedExtension {
        /// Raw extension without the dot, empty if the filename had none.
        extension: String,
    },

    /// The decoder table has no decoder for this kind on this backend.
    #[error("No decoder for {kind} resources on the {backend} backend")]
    UnsupportedCombination {
        /// Classified kind.
        kind: ResourceKind,
        /// Requested backend.
        backend: Backend,
    },

    /// The name was never declared.
    #[error("Resource '{name}' not found. Did you add it to the resources?")]
    NotDeclared {
        /// Requested name.
        name: String,
    },

    /// The name is declared but has not been decoded yet.
    #[error("Resource '{name}' not loaded yet. Call load() first.")]
    NotLoaded {
        /// Requested name.
        name: String,
    },

    /// Typed access asked for a different shape than the one declared.
    #[error("Resource '{name}' is declared as {actual}, not {expected}")]
    ShapeMismatch {
        /// Requested name.
        name: String,
        /// Shape of the requested Rust type.
        expected: ResourceShape,
        /// Shape of the declaration.
        actual: ResourceShape,
    },

    /// Fetching or decoding one resource failed during `load`.
    #[error("Failed to load resource '{filename}': {source}")]
    LoadFailure {
        /// Filename as declared.
        filename: String,
        /// The fetcher's or decoder's error.
        #[source]
        source: BoxError,
    },

    /// A lazy lookup lost its registry before the resource was delivered.
    #[error("Resource '{name}' was never delivered: its registry was dropped")]
    LazyAbandoned {
        /// Requested name.
        name: String,
    },

    /// Invalid configuration.
    #[error("Invalid registry configuration: {0}")]
    Config(String),
}

impl From<UnsupportedExtension> for RegistryError {
    fn from(err: UnsupportedExtension) -> Self {
        RegistryError::UnsupportedExtension {
            extension: err.extension,
        }
    }
}

/// A specialized `Result` for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
