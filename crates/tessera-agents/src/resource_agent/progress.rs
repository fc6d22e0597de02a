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

//! Progress snapshots.

use tessera_core::Resource;

/// Percentage of `loaded` over `total`, `100` when there is nothing to load.
pub(crate) fn percentage(loaded: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        loaded as f64 / total as f64 * 100.0
    }
}

/// How many declared entries currently hold a decoded resource.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegistryProgress {
    /// Declared entries.
    pub total: usize,
    /// Entries holding a resource.
    pub loaded: usize,
    /// `loaded / total * 100`, or `100` for an empty registry.
    pub percentage: f64,
}

/// The entry whose completion triggered a [`LoadProgress`] report.
#[derive(Debug, Clone)]
pub struct LoadedEntry {
    /// Declared name.
    pub name: String,
    /// The freshly decoded resource.
    pub resource: Resource,
}

/// Reported once per successfully decoded entry during a `load` call, in
/// completion order.
#[derive(Debug, Clone)]
pub struct LoadProgress {
    /// Entries in this load call.
    pub total: usize,
    /// Entries of this call decoded so far, including `current`.
    pub loaded: usize,
    /// `loaded / total * 100`.
    pub percentage: f64,
    /// The entry that just completed.
    pub current: LoadedEntry,
}

#[cfg(test)]
mod tests {
    use super::percentage;

    #[test]
    fn percentage_edges() {
        assert_eq!(percentage(0, 0), 100.0);
        assert_eq!(percentage(0, 4), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 3), 100.0);
    }
}
