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

//! Decoded structured data.

use crate::asset::Asset;
use serde_json::Value;
use std::collections::BTreeMap;

/// A parsed data file as a JSON value tree.
///
/// This is the `Data`/`Standard` shape. RON sources are converted to the same tree.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDocument {
    /// Root value.
    pub root: Value,
}

impl Asset for DataDocument {}

impl DataDocument {
    /// Looks a value up with a JSON pointer (`/materials/0/name`).
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        self.root.pointer(pointer)
    }

    /// Deserializes the whole document into `T`.
    pub fn deserialize<T: serde::de::DeserializeOwned>(&self) -> serde_json::Result<T> {
        T::deserialize(&self.root)
    }
}

/// A data file flattened into dot-separated key paths mapping to leaf values.
///
/// This is the `Data`/`Alternate` shape. Objects contribute `parent.child`
/// segments, arrays contribute their index (`lights.0.color`). Empty objects
/// and arrays are kept as leaves so no key disappears.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataTable {
    /// Leaf values by key path, sorted.
    pub entries: BTreeMap<String, Value>,
}

impl Asset for DataTable {}

impl DataTable {
    /// Flattens a value tree. A scalar root is stored under the empty key.
    pub fn flatten(root: &Value) -> Self {
        let mut entries = BTreeMap::new();
        flatten_into(&mut entries, String::new(), root);
        Self { entries }
    }

    /// Leaf value at `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` if there are no leaves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_into(out: &mut BTreeMap<String, Value>, prefix: String, value: &Value) {
    let join = |key: &str| {
        if prefix.is_empty() {
            key.to_string()
        } else {
            format!("{prefix}.{key}")
        }
    };
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                flatten_into(out, join(key), child);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(out, join(&index.to_string()), child);
            }
        }
        leaf => {
            out.insert(prefix, leaf.clone());
        }
    }
}
