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

//! # Tessera Lanes
//!
//! The "data plane" of resource loading. Lanes are swappable strategies with no
//! knowledge of the registry:
//!
//! - [`fetch_lane`]: I/O. Turns a path into bytes (filesystem or in-memory).
//! - [`decode_lane`]: CPU work. Turns bytes into one concrete resource type, one
//!   decoder per (kind, backend) shape.

pub mod decode_lane;
pub mod fetch_lane;

pub use decode_lane::{BoxError, DecodeContext, ResourceDecoder};
pub use fetch_lane::{ExternalResolver, FileSystemFetcher, MemoryFetcher, ResourceFetcher};
