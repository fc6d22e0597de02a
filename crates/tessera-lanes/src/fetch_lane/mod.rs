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

//! Fetch lanes: the I/O half of loading.
//!
//! A fetcher turns a resource path into raw bytes. It knows nothing about
//! formats; decoding happens afterwards in a [`crate::decode_lane`] decoder.

mod file_system;
mod memory;

pub use file_system::FileSystemFetcher;
pub use memory::MemoryFetcher;

use crate::decode_lane::BoxError;
use async_trait::async_trait;

/// Synchronous access to files referenced from inside another file, such as
/// the external buffers of a `.gltf`. Called from the blocking decode pool.
pub trait ExternalResolver: Send + Sync {
    /// Reads the file at `path`.
    fn resolve(&self, path: &str) -> Result<Vec<u8>, BoxError>;
}

/// Asynchronous source of resource bytes.
#[async_trait]
pub trait ResourceFetcher: ExternalResolver + 'static {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Reads every byte of the resource at `path`.
    async fn fetch(&self, path: &str) -> anyhow::Result<Vec<u8>>;
}
