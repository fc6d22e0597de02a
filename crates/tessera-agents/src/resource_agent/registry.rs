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

//! The resource registry: declarations, lookups and typed access.

use super::{
    config::RegistryConfig,
    dispatch::DecoderTable,
    error::{RegistryError, Result},
    lazy::{LazyBroker, LazyResource, TypedLazyResource},
    progress::{percentage, RegistryProgress},
};
use indexmap::IndexMap;
use std::{
    fmt,
    marker::PhantomData,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};
use tessera_core::{
    classify, split_name, AssetHandle, Backend, Resource, ResourceKind, ResourceShape,
    TypedResource,
};
use tessera_lanes::{FileSystemFetcher, ResourceFetcher};
use tessera_telemetry::MetricsRegistry;
use tokio::sync::Semaphore;

/// One declared name.
pub(crate) struct Entry {
    pub(crate) filename: String,
    pub(crate) shape: ResourceShape,
    pub(crate) path: String,
    /// Distinguishes this declaration from earlier ones of the same name.
    pub(crate) generation: u64,
    pub(crate) resource: Option<Resource>,
}

/// Everything guarded by the registry lock.
#[derive(Default)]
pub(crate) struct State {
    pub(crate) entries: IndexMap<String, Entry>,
    pub(crate) lazy: LazyBroker,
    last_generation: u64,
}

pub(crate) struct Inner {
    pub(crate) config: RegistryConfig,
    pub(crate) decoders: DecoderTable,
    pub(crate) fetcher: Arc<dyn ResourceFetcher>,
    pub(crate) limiter: Option<Arc<Semaphore>>,
    metrics: MetricsRegistry,
    state: Mutex<State>,
}

impl Inner {
    /// Never held across an `.await`.
    pub(crate) fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// A statically typed name returned by [`ResourceRegistry::declare_typed`].
pub struct ResourceKey<T> {
    name: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ResourceKey<T> {
    /// The declared name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<T> Clone for ResourceKey<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for ResourceKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ResourceKey").field(&self.name).finish()
    }
}

/// A read-only view of one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationInfo {
    /// Filename without its last extension.
    pub name: String,
    /// Filename as declared.
    pub filename: String,
    /// Kind classified from the extension.
    pub kind: ResourceKind,
    /// Backend chosen at declaration.
    pub backend: Backend,
    /// Path handed to the fetcher.
    pub path: String,
    /// Whether a decoded resource is stored.
    pub loaded: bool,
}

/// A registry of named resources loaded concurrently.
///
/// Resources are declared by filename; the name is the filename without its
/// last extension, and the extension together with the backend fixes which
/// [`Resource`] variant the entry will hold. [`ResourceRegistry::load`] then
/// decodes every declaration at once.
///
/// The registry is a cheap handle: clones share the same declarations, so
/// chaining `declare` calls and calling it repeatedly on a held reference are
/// the same thing.
///
/// ```no_run
/// # async fn run() -> Result<(), tessera_agents::RegistryError> {
/// use tessera_agents::ResourceRegistry;
///
/// let registry = ResourceRegistry::new("assets");
/// registry.declare("hero.glb")?.declare("sky.hdr")?;
/// registry.load().await?;
/// let hero = registry.get("hero")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ResourceRegistry {
    pub(crate) inner: Arc<Inner>,
}

impl ResourceRegistry {
    /// An empty registry reading files below `base_path`.
    pub fn new(base_path: impl Into<String>) -> Self {
        Self::builder().base_path(base_path).build()
    }

    /// An empty registry using `config`.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self::builder().config(config).build()
    }

    /// Starts building a registry with custom lanes.
    pub fn builder() -> ResourceRegistryBuilder {
        ResourceRegistryBuilder::default()
    }

    /// Declares `filename` on the configured default backend.
    pub fn declare(&self, filename: &str) -> Result<&Self> {
        self.declare_with(filename, self.inner.config.default_backend)
    }

    /// Declares `filename` on `backend`.
    ///
    /// Re-declaring a name replaces the earlier declaration and drops its
    /// decoded resource. Fails without touching the registry if the extension
    /// is unknown or the decoder table has no slot for the shape.
    pub fn declare_with(&self, filename: &str, backend: Backend) -> Result<&Self> {
        let kind = classify(filename)?;
        let shape = ResourceShape::new(kind, backend);
        if !self.inner.decoders.supports(shape) {
            return Err(RegistryError::UnsupportedCombination { kind, backend });
        }

        let (name, _) = split_name(filename);
        let path = self.inner.config.resolve(filename);

        let mut state = self.inner.lock();
        state.last_generation += 1;
        let generation = state.last_generation;
        let previous = state.entries.insert(
            name.to_string(),
            Entry {
                filename: filename.to_string(),
                shape,
                path: path.clone(),
                generation,
                resource: None,
            },
        );
        drop(state);

        if previous.is_some() {
            log::debug!("Re-declared '{name}' as {shape} at '{path}'");
        } else {
            log::debug!("Declared '{name}' as {shape} at '{path}'");
        }
        Ok(self)
    }

    /// By-value [`ResourceRegistry::declare`] for builder chains.
    pub fn with(self, filename: &str) -> Result<Self> {
        self.declare(filename)?;
        Ok(self)
    }

    /// By-value [`ResourceRegistry::declare_with`] for builder chains.
    pub fn with_backend(self, filename: &str, backend: Backend) -> Result<Self> {
        self.declare_with(filename, backend)?;
        Ok(self)
    }

    /// Declares `filename` as a `T`, returning a key for typed retrieval.
    ///
    /// The backend comes from `T`; the extension must classify as `T`'s kind.
    pub fn declare_typed<T: TypedResource>(&self, filename: &str) -> Result<ResourceKey<T>> {
        let kind = classify(filename)?;
        let (name, _) = split_name(filename);
        if kind != T::SHAPE.kind {
            return Err(RegistryError::ShapeMismatch {
                name: name.to_string(),
                expected: T::SHAPE,
                actual: ResourceShape::new(kind, T::SHAPE.backend),
            });
        }
        self.declare_with(filename, T::SHAPE.backend)?;
        Ok(ResourceKey {
            name: name.to_string(),
            _marker: PhantomData,
        })
    }

    /// Declared names in first-declaration order.
    pub fn names(&self) -> Vec<String> {
        self.inner.lock().entries.keys().cloned().collect()
    }

    /// Returns `true` if `name` is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.inner.lock().entries.contains_key(name)
    }

    /// Describes the declaration of `name`.
    pub fn declaration(&self, name: &str) -> Option<DeclarationInfo> {
        let state = self.inner.lock();
        let entry = state.entries.get(name)?;
        Some(DeclarationInfo {
            name: name.to_string(),
            filename: entry.filename.clone(),
            kind: entry.shape.kind,
            backend: entry.shape.backend,
            path: entry.path.clone(),
            loaded: entry.resource.is_some(),
        })
    }

    /// The decoded resource of `name`.
    pub fn get(&self, name: &str) -> Result<Resource> {
        let state = self.inner.lock();
        let entry = state.entries.get(name).ok_or_else(|| not_declared(name))?;
        entry
            .resource
            .clone()
            .ok_or_else(|| RegistryError::NotLoaded {
                name: name.to_string(),
            })
    }

    /// The decoded resource of `name` as a `T`.
    ///
    /// The declared shape is checked before the loaded state, so asking for
    /// the wrong type fails even before `load`.
    pub fn get_as<T: TypedResource>(&self, name: &str) -> Result<AssetHandle<T>> {
        let state = self.inner.lock();
        let entry = state.entries.get(name).ok_or_else(|| not_declared(name))?;
        check_shape::<T>(name, entry.shape)?;
        let resource = entry
            .resource
            .as_ref()
            .ok_or_else(|| RegistryError::NotLoaded {
                name: name.to_string(),
            })?;
        T::from_resource(resource).ok_or_else(|| RegistryError::ShapeMismatch {
            name: name.to_string(),
            expected: T::SHAPE,
            actual: resource.shape(),
        })
    }

    /// Typed retrieval through a key from [`ResourceRegistry::declare_typed`].
    pub fn get_key<T: TypedResource>(&self, key: &ResourceKey<T>) -> Result<AssetHandle<T>> {
        self.get_as::<T>(key.name())
    }

    /// A future of the resource of `name`, without starting a load.
    ///
    /// Ready immediately if `name` is loaded. Otherwise it settles when a
    /// later `load` decodes the current declaration of `name`.
    pub fn get_lazy(&self, name: &str) -> Result<LazyResource> {
        self.lookup_lazy(name, |_| Ok(()))
    }

    /// Typed [`ResourceRegistry::get_lazy`]. The shape is checked right away.
    pub fn get_lazy_as<T: TypedResource>(&self, name: &str) -> Result<TypedLazyResource<T>> {
        let lazy = self.lookup_lazy(name, |shape| check_shape::<T>(name, shape))?;
        Ok(TypedLazyResource::new(lazy))
    }

    /// Checks the declared shape and parks the lookup under one guard, so a
    /// concurrent re-declaration cannot slip in between.
    fn lookup_lazy(
        &self,
        name: &str,
        check: impl FnOnce(ResourceShape) -> Result<()>,
    ) -> Result<LazyResource> {
        let mut guard = self.inner.lock();
        let state = &mut *guard;
        let entry = state.entries.get(name).ok_or_else(|| not_declared(name))?;
        check(entry.shape)?;
        if let Some(resource) = &entry.resource {
            return Ok(LazyResource::ready(name, resource.clone()));
        }
        let receiver = state.lazy.subscribe(name);
        log::trace!(
            "Lazy lookup of '{name}' parked, {} waiting",
            state.lazy.pending(name)
        );
        Ok(LazyResource::pending(name, receiver))
    }

    /// Returns `true` if every declared entry holds a resource. An empty
    /// registry is loaded.
    pub fn is_loaded(&self) -> bool {
        self.inner
            .lock()
            .entries
            .values()
            .all(|entry| entry.resource.is_some())
    }

    /// Counts of declared and loaded entries.
    pub fn progress(&self) -> RegistryProgress {
        let state = self.inner.lock();
        let total = state.entries.len();
        let loaded = state
            .entries
            .values()
            .filter(|entry| entry.resource.is_some())
            .count();
        RegistryProgress {
            total,
            loaded,
            percentage: percentage(loaded, total),
        }
    }

    /// The configuration this registry was built with.
    pub fn config(&self) -> &RegistryConfig {
        &self.inner.config
    }

    /// The decoder table.
    pub fn decoders(&self) -> &DecoderTable {
        &self.inner.decoders
    }

    /// The metrics registry decode metrics are recorded into.
    pub fn metrics(&self) -> &MetricsRegistry {
        &self.inner.metrics
    }
}

impl fmt::Debug for ResourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = self.progress();
        f.debug_struct("ResourceRegistry")
            .field("base_path", &self.inner.config.base_path)
            .field("declared", &progress.total)
            .field("loaded", &progress.loaded)
            .finish()
    }
}

fn not_declared(name: &str) -> RegistryError {
    RegistryError::NotDeclared {
        name: name.to_string(),
    }
}

fn check_shape<T: TypedResource>(name: &str, declared: ResourceShape) -> Result<()> {
    if declared == T::SHAPE {
        Ok(())
    } else {
        Err(RegistryError::ShapeMismatch {
            name: name.to_string(),
            expected: T::SHAPE,
            actual: declared,
        })
    }
}

/// Builds a [`ResourceRegistry`] with custom configuration and lanes.
#[derive(Default)]
pub struct ResourceRegistryBuilder {
    config: RegistryConfig,
    decoders: Option<DecoderTable>,
    fetcher: Option<Arc<dyn ResourceFetcher>>,
    metrics: Option<MetricsRegistry>,
}

impl ResourceRegistryBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config.normalized();
        self
    }

    /// Directory prepended to every filename. Trailing slashes are stripped.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config = RegistryConfig {
            base_path: base_path.into(),
            ..self.config
        }
        .normalized();
        self
    }

    /// Backend used by `declare`.
    pub fn default_backend(mut self, backend: Backend) -> Self {
        self.config.default_backend = backend;
        self
    }

    /// Caps how many entries are fetched and decoded at once.
    pub fn max_concurrent_loads(mut self, limit: usize) -> Self {
        self.config.max_concurrent_loads = Some(limit);
        self
    }

    /// Uses `decoders` instead of [`DecoderTable::with_defaults`].
    pub fn decoders(mut self, decoders: DecoderTable) -> Self {
        self.decoders = Some(decoders);
        self
    }

    /// Uses `fetcher` instead of a [`FileSystemFetcher`].
    pub fn fetcher(mut self, fetcher: Arc<dyn ResourceFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    /// Records decode metrics into `metrics` instead of a private registry.
    pub fn metrics(mut self, metrics: MetricsRegistry) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Finishes the registry.
    pub fn build(self) -> ResourceRegistry {
        let metrics = self.metrics.unwrap_or_default();
        let mut decoders = self.decoders.unwrap_or_else(DecoderTable::with_defaults);
        decoders.attach_metrics(&metrics);

        let limiter = match self.config.max_concurrent_loads {
            Some(0) => {
                log::warn!("max_concurrent_loads of 0 ignored, loads are unbounded");
                None
            }
            Some(limit) => Some(Arc::new(Semaphore::new(limit))),
            None => None,
        };

        ResourceRegistry {
            inner: Arc::new(Inner {
                config: self.config,
                decoders,
                fetcher: self
                    .fetcher
                    .unwrap_or_else(|| Arc::new(FileSystemFetcher::new())),
                limiter,
                metrics,
                state: Mutex::new(State::default()),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::resource::{DataDocument, DataTable, Model, Texture};

    #[test]
    fn declare_classifies_and_resolves_paths() {
        let registry = ResourceRegistry::new("assets/");
        registry
            .declare("hero.glb")
            .unwrap()
            .declare_with("sky.hdr", Backend::Alternate)
            .unwrap();

        let hero = registry.declaration("hero").unwrap();
        assert_eq!(hero.kind, ResourceKind::Model);
        assert_eq!(hero.backend, Backend::Standard);
        assert_eq!(hero.path, "assets/hero.glb");
        assert!(!hero.loaded);

        let sky = registry.declaration("sky").unwrap();
        assert_eq!(sky.kind, ResourceKind::EnvironmentMap);
        assert_eq!(sky.backend, Backend::Alternate);
        assert_eq!(registry.names(), vec!["hero", "sky"]);
    }

    #[test]
    fn only_the_last_dot_is_the_extension() {
        let registry = ResourceRegistry::new("a");
        registry.declare("hero.v2.png").unwrap();
        assert!(registry.contains("hero.v2"));
        assert_eq!(
            registry.declaration("hero.v2").unwrap().kind,
            ResourceKind::Texture
        );
    }

    #[test]
    fn unsupported_extension_leaves_the_registry_untouched() {
        let registry = ResourceRegistry::new("a");
        let err = registry.declare("notes.txt").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file extension: .txt");
        let err = registry.declare("README").unwrap_err();
        assert!(matches!(err, RegistryError::UnsupportedExtension { extension } if extension.is_empty()));
        assert!(registry.declare("hero.GLB").is_err());
        assert!(registry.names().is_empty());
    }

    #[test]
    fn missing_decoder_slot_rejects_the_declaration() {
        let mut decoders = DecoderTable::with_defaults();
        decoders.remove(Texture::SHAPE);
        let registry = ResourceRegistry::builder().decoders(decoders).build();

        let err = registry.declare("albedo.png").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::UnsupportedCombination {
                kind: ResourceKind::Texture,
                backend: Backend::Standard
            }
        ));
        assert!(registry.declare_with("albedo.png", Backend::Alternate).is_ok());
    }

    #[test]
    fn redeclaring_keeps_one_entry_with_the_new_shape() {
        let registry = ResourceRegistry::new("a");
        registry.declare("level.json").unwrap();
        registry.declare_with("level.ron", Backend::Alternate).unwrap();

        assert_eq!(registry.names(), vec!["level"]);
        let info = registry.declaration("level").unwrap();
        assert_eq!(info.filename, "level.ron");
        assert_eq!(info.backend, Backend::Alternate);
    }

    #[test]
    fn by_value_builder_shares_state_with_clones() {
        let held = ResourceRegistry::new("a");
        let chained = held
            .clone()
            .with("a.glb")
            .unwrap()
            .with_backend("b.png", Backend::Alternate)
            .unwrap();
        assert_eq!(held.names(), chained.names());
        assert_eq!(held.names().len(), 2);
    }

    #[test]
    fn lookups_before_load() {
        let registry = ResourceRegistry::new("a");
        registry.declare("a.glb").unwrap();

        assert!(matches!(
            registry.get("missing"),
            Err(RegistryError::NotDeclared { .. })
        ));
        assert_eq!(
            registry.get("a").unwrap_err().to_string(),
            "Resource 'a' not loaded yet. Call load() first."
        );
        assert!(!registry.is_loaded());
        assert!(matches!(
            registry.get_lazy("missing"),
            Err(RegistryError::NotDeclared { .. })
        ));
        assert!(!registry.get_lazy("a").unwrap().is_ready());
    }

    #[test]
    fn typed_access_checks_shape_before_loading() {
        let registry = ResourceRegistry::new("a");
        let key = registry.declare_typed::<Model>("hero.glb").unwrap();
        assert_eq!(key.name(), "hero");

        assert!(matches!(
            registry.get_key(&key),
            Err(RegistryError::NotLoaded { .. })
        ));
        assert!(matches!(
            registry.get_as::<Texture>("hero"),
            Err(RegistryError::ShapeMismatch { .. })
        ));
        assert!(matches!(
            registry.get_lazy_as::<DataDocument>("hero"),
            Err(RegistryError::ShapeMismatch { .. })
        ));

        let err = registry.declare_typed::<DataTable>("hero.png").unwrap_err();
        assert!(matches!(err, RegistryError::ShapeMismatch { .. }));
        assert_eq!(registry.names(), vec!["hero"]);
    }

    #[test]
    fn empty_registry_progress() {
        let registry = ResourceRegistry::new("a");
        assert!(registry.is_loaded());
        let progress = registry.progress();
        assert_eq!((progress.total, progress.loaded), (0, 0));
        assert_eq!(progress.percentage, 100.0);
    }

    #[test]
    fn config_drives_the_default_backend() {
        let registry = ResourceRegistry::builder()
            .base_path("cdn")
            .default_backend(Backend::Alternate)
            .build();
        registry.declare("ui.png").unwrap();
        assert_eq!(registry.declaration("ui").unwrap().backend, Backend::Alternate);
        assert_eq!(registry.config().base_path, "cdn");
    }

    #[test]
    fn base_path_joins_with_a_single_slash() {
        for (base, expected) in [
            ("", "/a.glb"),
            ("/", "/a.glb"),
            ("assets//", "assets/a.glb"),
        ] {
            let registry = ResourceRegistry::new(base);
            registry.declare("a.glb").unwrap();
            assert_eq!(registry.declaration("a").unwrap().path, expected);
        }

        let registry = ResourceRegistry::builder()
            .config(RegistryConfig::new("x"))
            .base_path("cdn///")
            .build();
        assert_eq!(registry.config().base_path, "cdn");

        let registry = ResourceRegistry::with_config(RegistryConfig {
            base_path: "raw/".to_string(),
            ..RegistryConfig::default()
        });
        assert_eq!(registry.config().base_path, "raw");
    }

    #[test]
    fn typed_lazy_lookup_checks_shape_before_parking() {
        let registry = ResourceRegistry::new("a");
        registry.declare("albedo.png").unwrap();

        let err = registry.get_lazy_as::<DataTable>("albedo").unwrap_err();
        assert!(matches!(err, RegistryError::ShapeMismatch { .. }));
        assert_eq!(registry.inner.lock().lazy.pending("albedo"), 0);

        let _lazy = registry.get_lazy_as::<Texture>("albedo").unwrap();
        assert_eq!(registry.inner.lock().lazy.pending("albedo"), 1);
    }
}
