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

//! Extension classification.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The category of decoded object a file extension maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// 3D geometry (`glb`, `gltf`, `obj`).
    Model,
    /// 2D images sampled by materials.
    Texture,
    /// High dynamic range panoramas used for image based lighting.
    EnvironmentMap,
    /// Structured data (`json`, `ron`).
    Data,
}

/// Extension table, matched case-sensitively against the text after the last dot.
const EXTENSIONS: &[(&str, ResourceKind)] = &[
    ("glb", ResourceKind::Model),
    ("gltf", ResourceKind::Model),
    ("obj", ResourceKind::Model),
    ("png", ResourceKind::Texture),
    ("jpg", ResourceKind::Texture),
    ("jpeg", ResourceKind::Texture),
    ("webp", ResourceKind::Texture),
    ("bmp", ResourceKind::Texture),
    ("tga", ResourceKind::Texture),
    ("hdr", ResourceKind::EnvironmentMap),
    ("exr", ResourceKind::EnvironmentMap),
    ("json", ResourceKind::Data),
    ("ron", ResourceKind::Data),
];

impl ResourceKind {
    /// All kinds, in table order.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Model,
        ResourceKind::Texture,
        ResourceKind::EnvironmentMap,
        ResourceKind::Data,
    ];

    /// Looks up the kind registered for a bare extension (no leading dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, kind)| *kind)
    }

    /// The extensions that classify as this kind.
    pub fn extensions(self) -> impl Iterator<Item = &'static str> {
        EXTENSIONS
            .iter()
            .filter(move |(_, kind)| *kind == self)
            .map(|(ext, _)| *ext)
    }

    /// Stable lowercase identifier, also used as the metrics label.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Model => "model",
            ResourceKind::Texture => "texture",
            ResourceKind::EnvironmentMap => "environment_map",
            ResourceKind::Data => "data",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a filename's extension has no kind mapping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported file extension: .{extension}")]
pub struct UnsupportedExtension {
    /// The raw extension, without the dot. Empty when the filename has none.
    pub extension: String,
}

/// Splits a filename at its last dot into the resource name and the extension.
///
/// A filename without a dot is entirely name.
pub fn split_name(filename: &str) -> (&str, Option<&str>) {
    match filename.rsplit_once('.') {
        Some((name, ext)) => (name, Some(ext)),
        None => (filename, None),
    }
}

/// Classifies a filename into a [`ResourceKind`] using its last extension.
pub fn classify(filename: &str) -> Result<ResourceKind, UnsupportedExtension> {
    let extension = split_name(filename).1.unwrap_or_default();
    ResourceKind::from_extension(extension).ok_or_else(|| UnsupportedExtension {
        extension: extension.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_extension_classifies() {
        for (ext, kind) in EXTENSIONS {
            assert_eq!(classify(&format!("asset.{ext}")), Ok(*kind));
        }
    }

    #[test]
    fn last_dot_wins() {
        assert_eq!(classify("scene.backup.glb"), Ok(ResourceKind::Model));
        assert_eq!(split_name("scene.backup.glb"), ("scene.backup", Some("glb")));
        assert_eq!(classify("hero.glb.png"), Ok(ResourceKind::Texture));
    }

    #[test]
    fn unknown_extension_carries_the_literal_extension() {
        let err = classify("x.txt").unwrap_err();
        assert_eq!(err.extension, "txt");
        assert_eq!(err.to_string(), "Unsupported file extension: .txt");
    }

    #[test]
    fn matching_is_case_sensitive() {
        let err = classify("photo.PNG").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .PNG");
    }

    #[test]
    fn missing_extension_is_unsupported() {
        assert_eq!(split_name("README"), ("README", None));
        assert_eq!(
            classify("README").unwrap_err().to_string(),
            "Unsupported file extension: ."
        );
    }

    #[test]
    fn extensions_are_listed_per_kind() {
        let env: Vec<_> = ResourceKind::EnvironmentMap.extensions().collect();
        assert_eq!(env, vec!["hdr", "exr"]);
        assert!(ResourceKind::Data.extensions().any(|e| e == "ron"));
    }
}
