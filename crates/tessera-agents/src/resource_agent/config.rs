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

//! Registry configuration.

use super::error::{RegistryError, Result};
use serde::{Deserialize, Serialize};
use tessera_core::Backend;

/// Settings of a [`super::ResourceRegistry`].
///
/// Every field has a default, so a RON file only needs the ones it changes:
///
/// ```ron
/// (
///     base_path: "assets",
///     default_backend: alternate,
///     max_concurrent_loads: Some(4),
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Directory prepended to every declared filename.
    pub base_path: String,
    /// Backend used by `declare` when none is given.
    pub default_backend: Backend,
    /// Upper bound on entries fetched and decoded at the same time.
    /// `None` issues every entry at once.
    pub max_concurrent_loads: Option<usize>,
}

impl RegistryConfig {
    /// Default settings rooted at `base_path`.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: strip_trailing_slashes(base_path.into()),
            ..Self::default()
        }
    }

    /// Parses and validates a configuration written in RON.
    pub fn from_ron(text: &str) -> Result<Self> {
        let config: Self = ron::from_str(text).map_err(|e| RegistryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// The same settings with trailing slashes stripped from `base_path`.
    pub fn normalized(mut self) -> Self {
        self.base_path = strip_trailing_slashes(self.base_path);
        self
    }

    /// Rejects settings the loader cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.max_concurrent_loads == Some(0) {
            return Err(RegistryError::Config(
                "max_concurrent_loads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Full path of `filename`: the base path without trailing slashes, a
    /// slash, then the filename. An empty base path yields `/<filename>`.
    pub fn resolve(&self, filename: &str) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), filename)
    }
}

fn strip_trailing_slashes(mut base_path: String) -> String {
    let len = base_path.trim_end_matches('/').len();
    base_path.truncate(len);
    base_path
}
