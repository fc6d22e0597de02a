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

//! The resource agent: the tactical side of loading.
//!
//! It owns the declarations and decides what gets loaded, while the lanes from
//! `tessera-lanes` do the actual fetching and decoding:
//!
//! - [`ResourceRegistry`] keeps the declarations, answers lookups and hands
//!   out lazy futures.
//! - [`DecoderTable`] maps each (backend, kind) pair to a decoder lane.
//! - `load` fans out one task per declaration and reports progress as they
//!   complete.

mod config;
mod dispatch;
mod error;
mod lazy;
mod orchestrator;
mod progress;
mod registry;

pub use config::RegistryConfig;
pub use dispatch::DecoderTable;
pub use error::{RegistryError, Result};
pub use lazy::{LazyResource, TypedLazyResource};
pub use progress::{LoadProgress, LoadedEntry, RegistryProgress};
pub use registry::{DeclarationInfo, ResourceKey, ResourceRegistry, ResourceRegistryBuilder};
