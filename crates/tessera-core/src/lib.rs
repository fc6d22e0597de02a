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

//! # Tessera Core
//!
//! Foundational crate containing the asset traits, resource kinds, decoder
//! backends and the decoded resource types shared by every other crate of
//! the workspace. It knows nothing about how resources are fetched or decoded.

#![warn(missing_docs)]

pub mod asset;
pub mod math;
pub mod resource;

pub use asset::{Asset, AssetHandle};
pub use resource::{
    classify, split_name, Backend, Resource, ResourceKind, ResourceShape, TypedResource,
    UnsupportedExtension,
};
