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

use super::{ExternalResolver, ResourceFetcher};
use crate::decode_lane::BoxError;
use anyhow::Context;
use async_trait::async_trait;

/// Reads resources from the local filesystem. Paths are used as given,
/// relative ones resolve against the working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemFetcher;

impl FileSystemFetcher {
    /// Creates a new `FileSystemFetcher`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ResourceFetcher for FileSystemFetcher {
    fn name(&self) -> &'static str {
        "FileSystemFetcher"
    }

    async fn fetch(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file '{path}'"))?;
        log::trace!("Read {} bytes from '{}'", bytes.len(), path);
        Ok(bytes)
    }
}

impl ExternalResolver for FileSystemFetcher {
    fn resolve(&self, path: &str) -> Result<Vec<u8>, BoxError> {
        std::fs::read(path)
            .map_err(|e| format!("Failed to read external file '{path}': {e}").into())
    }
}
