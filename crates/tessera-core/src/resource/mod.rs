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

//! The vocabulary of the resource registry.
//!
//! A declared file is classified into a [`ResourceKind`] from its extension and
//! paired with a [`Backend`]. The resulting [`ResourceShape`] fixes, before any
//! I/O happens, which concrete Rust type the decoded [`Resource`] will carry:
//!
//! | Kind             | `Backend::Standard`   | `Backend::Alternate` |
//! |------------------|-----------------------|----------------------|
//! | `Model`          | [`Model`]             | [`Mesh`]             |
//! | `Texture`        | [`Texture`]           | [`Image`]            |
//! | `EnvironmentMap` | [`EnvironmentMap`]    | [`CubeMap`]          |
//! | `Data`           | [`DataDocument`]      | [`DataTable`]        |

mod backend;
mod data;
mod decoded;
mod environment;
mod kind;
mod model;
mod texture;

pub use backend::*;
pub use data::*;
pub use decoded::*;
pub use environment::*;
pub use kind::*;
pub use model::*;
pub use texture::*;
