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

//! # Tessera Agents
//!
//! Agents drive the lanes. This crate holds the resource agent: a registry of
//! named resources, the dispatch table choosing a decoder per declaration, and
//! the orchestrator loading everything concurrently.

#![warn(missing_docs)]

pub mod resource_agent;

pub use resource_agent::{
    DecoderTable, DeclarationInfo, LazyResource, LoadProgress, LoadedEntry, RegistryConfig,
    RegistryError, RegistryProgress, ResourceKey, ResourceRegistry, ResourceRegistryBuilder,
    TypedLazyResource,
};
