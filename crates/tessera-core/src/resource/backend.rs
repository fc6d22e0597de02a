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

//! Decoder families and the (kind, backend) pairing.

use super::ResourceKind;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Selects which decoder family handles a declared resource.
///
/// The backend changes the concrete type of the decoded object, not merely its
/// value: a texture decoded by [`Backend::Standard`] is a
/// [`Texture`](super::Texture), by [`Backend::Alternate`] an
/// [`Image`](super::Image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// The default decoder family. GPU-ready, normalized outputs.
    #[default]
    #[serde(alias = "default")]
    Standard,
    /// The alternate engine. Keeps source formats and coarser layouts.
    Alternate,
}

impl Backend {
    /// Both backends.
    pub const ALL: [Backend; 2] = [Backend::Standard, Backend::Alternate];

    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Standard => "standard",
            Backend::Alternate => "alternate",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "standard" => Ok(Backend::Standard),
            "alternate" => Ok(Backend::Alternate),
            other => Err(format!("unknown backend '{other}'")),
        }
    }
}

/// The (kind, backend) pair fixed at declaration time.
///
/// Each shape maps to exactly one decoded Rust type, see the table in
/// [`crate::resource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceShape {
    /// What the file contains.
    pub kind: ResourceKind,
    /// Who decodes it.
    pub backend: Backend,
}

impl ResourceShape {
    /// Pairs a kind with a backend.
    pub const fn new(kind: ResourceKind, backend: Backend) -> Self {
        Self { kind, backend }
    }

    /// All eight shapes.
    pub fn all() -> impl Iterator<Item = ResourceShape> {
        Backend::ALL.into_iter().flat_map(|backend| {
            ResourceKind::ALL
                .into_iter()
                .map(move |kind| ResourceShape::new(kind, backend))
        })
    }
}

impl fmt::Display for ResourceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.backend)
    }
}
