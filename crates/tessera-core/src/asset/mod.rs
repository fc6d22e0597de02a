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

//! Provides the foundational traits for Tessera's asset system.
//!
//! - The [`Asset`] trait: a marker for every type a decoder may produce.
//! - The [`AssetHandle`]: the shared, reference-counted form in which the
//!   registry hands decoded assets out to callers.

mod handle;

pub use handle::*;

/// A marker trait for types that can be managed by the asset system.
///
/// The supertraits are required because decoding happens on tokio's blocking
/// pool and the result is shared between the registry, lazy subscribers and
/// progress callbacks:
/// - `Send` + `Sync`: the asset can be moved and shared across threads.
/// - `'static`: the asset owns all of its data.
///
/// # Examples
///
/// ```
/// use tessera_core::asset::Asset;
///
/// struct Heightfield {
///     samples: Vec<f32>,
/// }
///
/// impl Asset for Heightfield {}
/// ```
pub trait Asset: Send + Sync + 'static {}
