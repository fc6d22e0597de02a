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

//! The decoded resource, one variant per [`ResourceShape`].

use super::{
    Backend, CubeMap, DataDocument, DataTable, EnvironmentMap, Image, Mesh, Model, ResourceKind,
    ResourceShape, Texture,
};
use crate::asset::{Asset, AssetHandle};

/// A decoded resource as stored by the registry.
///
/// The variant is always the one implied by the declaration's shape, so a
/// caller that knows the shape can rely on [`TypedResource::from_resource`]
/// succeeding. Cloning is cheap and preserves instance identity.
#[derive(Debug, Clone)]
pub enum Resource {
    /// `Model` decoded by the standard backend.
    Model(AssetHandle<Model>),
    /// `Model` decoded by the alternate backend.
    Mesh(AssetHandle<Mesh>),
    /// `Texture` decoded by the standard backend.
    Texture(AssetHandle<Texture>),
    /// `Texture` decoded by the alternate backend.
    Image(AssetHandle<Image>),
    /// `EnvironmentMap` decoded by the standard backend.
    EnvironmentMap(AssetHandle<EnvironmentMap>),
    /// `EnvironmentMap` decoded by the alternate backend.
    CubeMap(AssetHandle<CubeMap>),
    /// `Data` decoded by the standard backend.
    Document(AssetHandle<DataDocument>),
    /// `Data` decoded by the alternate backend.
    Table(AssetHandle<DataTable>),
}

impl Resource {
    /// The shape this variant belongs to.
    pub fn shape(&self) -> ResourceShape {
        match self {
            Resource::Model(_) => Model::SHAPE,
            Resource::Mesh(_) => Mesh::SHAPE,
            Resource::Texture(_) => Texture::SHAPE,
            Resource::Image(_) => Image::SHAPE,
            Resource::EnvironmentMap(_) => EnvironmentMap::SHAPE,
            Resource::CubeMap(_) => CubeMap::SHAPE,
            Resource::Document(_) => DataDocument::SHAPE,
            Resource::Table(_) => DataTable::SHAPE,
        }
    }

    /// Typed view, `None` if this resource has another shape.
    pub fn downcast<T: TypedResource>(&self) -> Option<AssetHandle<T>> {
        T::from_resource(self)
    }

    /// Returns `true` if both resources are the same decoded instance.
    pub fn same_instance(&self, other: &Resource) -> bool {
        match (self, other) {
            (Resource::Model(a), Resource::Model(b)) => AssetHandle::ptr_eq(a, b),
            (Resource::Mesh(a), Resource::Mesh(b)) => AssetHandle::ptr_eq(a, b),
            (Resource::Texture(a), Resource::Texture(b)) => AssetHandle::ptr_eq(a, b),
            (Resource::Image(a), Resource::Image(b)) => AssetHandle::ptr_eq(a, b),
            (Resource::EnvironmentMap(a), Resource::EnvironmentMap(b)) => {
                AssetHandle::ptr_eq(a, b)
            }
            (Resource::CubeMap(a), Resource::CubeMap(b)) => AssetHandle::ptr_eq(a, b),
            (Resource::Document(a), Resource::Document(b)) => AssetHandle::ptr_eq(a, b),
            (Resource::Table(a), Resource::Table(b)) => AssetHandle::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// An [`Asset`] bound to exactly one [`ResourceShape`].
///
/// This is the compile-time facade over the dynamically checked registry:
/// asking for a `Texture` is asking for the `Texture`/`Standard` shape, and
/// the registry can reject a mismatch before anything is loaded.
pub trait TypedResource: Asset + Sized {
    /// The shape producing this type.
    const SHAPE: ResourceShape;

    /// Wraps a handle into the matching [`Resource`] variant.
    fn into_resource(handle: AssetHandle<Self>) -> Resource;

    /// Extracts the handle if `resource` is this type's variant.
    fn from_resource(resource: &Resource) -> Option<AssetHandle<Self>>;
}

macro_rules! typed_resource {
    ($ty:ty, $variant:ident, $kind:ident, $backend:ident) => {
        impl TypedResource for $ty {
            const SHAPE: ResourceShape = ResourceShape::new(ResourceKind::$kind, Backend::$backend);

            fn into_resource(handle: AssetHandle<Self>) -> Resource {
                Resource::$variant(handle)
            }

            fn from_resource(resource: &Resource) -> Option<AssetHandle<Self>> {
                match resource {
                    Resource::$variant(handle) => Some(handle.clone()),
                    _ => None,
                }
            }
        }
    };
}

typed_resource!(Model, Model, Model, Standard);
typed_resource!(Mesh, Mesh, Model, Alternate);
typed_resource!(Texture, Texture, Texture, Standard);
typed_resource!(Image, Image, Texture, Alternate);
typed_resource!(EnvironmentMap, EnvironmentMap, EnvironmentMap, Standard);
typed_resource!(CubeMap, CubeMap, EnvironmentMap, Alternate);
typed_resource!(DataDocument, Document, Data, Standard);
typed_resource!(DataTable, Table, Data, Alternate);
