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

//! Decoders, one per resource shape.
//!
//! | Shape                        | Decoder                  |
//! |------------------------------|--------------------------|
//! | model / standard             | [`ModelDecoder`]         |
//! | model / alternate            | [`MergedMeshDecoder`]    |
//! | texture / standard           | [`TextureDecoder`]       |
//! | texture / alternate          | [`ImageDecoder`]         |
//! | environment_map / standard   | [`EnvironmentMapDecoder`]|
//! | environment_map / alternate  | [`CubeMapDecoder`]       |
//! | data / standard              | [`DocumentDecoder`]      |
//! | data / alternate             | [`TableDecoder`]         |

mod data_decoder;
mod environment_decoder;
mod model;
mod texture_decoder;

pub use data_decoder::*;
pub use environment_decoder::*;
pub use model::*;
pub use texture_decoder::*;

use crate::fetch_lane::ExternalResolver;
use std::error::Error;
use tessera_core::asset::Asset;

/// Error type returned by decoders. Must be thread-safe because decoding runs
/// on the blocking pool.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// What a decoder knows about the file it is decoding besides its bytes.
#[derive(Clone, Copy)]
pub struct DecodeContext<'a> {
    /// Full path the bytes were fetched from.
    pub path: &'a str,
    /// Extension of `path`, without the dot.
    pub extension: &'a str,
    /// Fetches files referenced by the decoded one (glTF external buffers).
    pub resolver: &'a dyn ExternalResolver,
}

impl<'a> DecodeContext<'a> {
    /// Builds a context, taking the extension from the last dot of `path`.
    pub fn new(path: &'a str, resolver: &'a dyn ExternalResolver) -> Self {
        let file = path.rsplit('/').next().unwrap_or(path);
        let extension = file.rsplit_once('.').map_or("", |(_, ext)| ext);
        Self {
            path,
            extension,
            resolver,
        }
    }

    /// Path of a file referenced relative to the one being decoded.
    pub fn sibling(&self, uri: &str) -> String {
        match self.path.rsplit_once('/') {
            Some((dir, _)) => format!("{dir}/{uri}"),
            None => uri.to_string(),
        }
    }
}

/// A type that decodes one kind of resource from raw bytes.
///
/// This is CPU-bound work and may block; callers run it off the async
/// executor. Each implementation produces exactly one asset type `A`.
pub trait ResourceDecoder<A: Asset>: Send + Sync + 'static {
    /// Short name used in logs.
    fn strategy_name(&self) -> &'static str;

    /// Decodes `bytes` into an `A`.
    fn decode(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<A, BoxError>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Resolver that has no files.
    pub struct NoFiles;

    impl ExternalResolver for NoFiles {
        fn resolve(&self, path: &str) -> Result<Vec<u8>, BoxError> {
            Err(format!("no such file: {path}").into())
        }
    }

    pub fn ctx<'a>(path: &'a str) -> DecodeContext<'a> {
        DecodeContext::new(path, &NoFiles)
    }
}
