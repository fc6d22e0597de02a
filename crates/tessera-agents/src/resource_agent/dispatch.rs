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

//! The decoder dispatch table: one decoder per (backend, kind) slot.

use super::error::RegistryError;
use std::{collections::HashMap, marker::PhantomData, sync::Arc};
use tessera_core::{AssetHandle, Backend, Resource, ResourceKind, ResourceShape, TypedResource};
use tessera_lanes::{
    decode_lane::{
        CubeMapDecoder, DocumentDecoder, EnvironmentMapDecoder, ImageDecoder, MergedMeshDecoder,
        ModelDecoder, TableDecoder, TextureDecoder,
    },
    BoxError, DecodeContext, ExternalResolver, ResourceDecoder, ResourceFetcher,
};
use tessera_telemetry::{CounterHandle, HistogramHandle, MetricsRegistry, ScopedMetricTimer};

/// Type-erased decoder stored in a slot.
trait AnyDecoder: Send + Sync {
    fn strategy_name(&self) -> &'static str;
    fn decode_any(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Resource, BoxError>;
}

/// Adapts a typed `ResourceDecoder<A>` to [`AnyDecoder`].
struct DecoderWrapper<A, D>(D, PhantomData<fn() -> A>);

impl<A: TypedResource, D: ResourceDecoder<A>> AnyDecoder for DecoderWrapper<A, D> {
    fn strategy_name(&self) -> &'static str {
        self.0.strategy_name()
    }

    fn decode_any(&self, bytes: &[u8], ctx: &DecodeContext<'_>) -> Result<Resource, BoxError> {
        let asset: A = self.0.decode(bytes, ctx)?;
        Ok(A::into_resource(AssetHandle::new(asset)))
    }
}

/// Metric handles recorded around every decode.
struct DecodeMetrics {
    /// Decode time in milliseconds, fetch excluded.
    decode_time_ms: HistogramHandle,
    /// Resources fetched and decoded successfully.
    loaded_total: CounterHandle,
    /// Resources whose fetch or decode failed.
    failed_total: CounterHandle,
}

impl DecodeMetrics {
    fn new(registry: &MetricsRegistry) -> tessera_telemetry::MetricsResult<Self> {
        Ok(Self {
            decode_time_ms: registry.register_histogram(
                "resources",
                "decode_time",
                vec![1.0, 5.0, 16.0, 33.0, 100.0, 500.0],
            )?,
            loaded_total: registry.register_counter("resources", "loaded_total")?,
            failed_total: registry.register_counter("resources", "failed_total")?,
        })
    }

    fn record(&self, succeeded: bool) {
        let counter = if succeeded {
            &self.loaded_total
        } else {
            &self.failed_total
        };
        if let Err(e) = counter.increment() {
            log::warn!("Failed to record resource metric: {e}");
        }
    }
}

/// Lets a decoder read sibling files through the fetcher that fetched it.
struct FetcherResolver<'a>(&'a dyn ResourceFetcher);

impl ExternalResolver for FetcherResolver<'_> {
    fn resolve(&self, path: &str) -> Result<Vec<u8>, BoxError> {
        self.0.resolve(path)
    }
}

/// Maps every [`ResourceShape`] to the decoder producing it.
///
/// Lookups go backend first, then kind. [`DecoderTable::with_defaults`] fills
/// all eight slots with the lanes shipped in `tessera-lanes`; any slot can be
/// replaced with [`DecoderTable::register`].
pub struct DecoderTable {
    backends: HashMap<Backend, HashMap<ResourceKind, Arc<dyn AnyDecoder>>>,
    metrics: Option<Arc<DecodeMetrics>>,
}

impl DecoderTable {
    /// A table with no decoders at all.
    pub fn empty() -> Self {
        Self {
            backends: HashMap::new(),
            metrics: None,
        }
    }

    /// A table with the built-in decoder for every shape.
    pub fn with_defaults() -> Self {
        let mut table = Self::empty();
        table
            .register(ModelDecoder)
            .register(MergedMeshDecoder)
            .register(TextureDecoder)
            .register(ImageDecoder)
            .register(EnvironmentMapDecoder)
            .register(CubeMapDecoder)
            .register(DocumentDecoder)
            .register(TableDecoder);
        table
    }

    /// Puts `decoder` in the slot of `A::SHAPE`, replacing what was there.
    pub fn register<A: TypedResource>(&mut self, decoder: impl ResourceDecoder<A>) -> &mut Self {
        let shape = A::SHAPE;
        let wrapped = DecoderWrapper(decoder, PhantomData);
        self.backends
            .entry(shape.backend)
            .or_default()
            .insert(shape.kind, Arc::new(wrapped));
        self
    }

    /// Empties the slot of `shape`, returning whether it held a decoder.
    pub fn remove(&mut self, shape: ResourceShape) -> bool {
        self.backends
            .get_mut(&shape.backend)
            .and_then(|kinds| kinds.remove(&shape.kind))
            .is_some()
    }

    /// Returns `true` if some decoder produces `shape`.
    pub fn supports(&self, shape: ResourceShape) -> bool {
        self.slot(shape).is_some()
    }

    /// Name of the decoder in the slot of `shape`.
    pub fn strategy_name(&self, shape: ResourceShape) -> Option<&'static str> {
        self.slot(shape).map(|decoder| decoder.strategy_name())
    }

    /// Starts recording decode metrics into `registry`.
    pub fn attach_metrics(&mut self, registry: &MetricsRegistry) {
        match DecodeMetrics::new(registry) {
            Ok(metrics) => self.metrics = Some(Arc::new(metrics)),
            Err(e) => log::warn!("Resource metrics disabled: {e}"),
        }
    }

    fn slot(&self, shape: ResourceShape) -> Option<&Arc<dyn AnyDecoder>> {
        self.backends.get(&shape.backend)?.get(&shape.kind)
    }

    /// Fetches `path` and decodes it into the [`Resource`] variant of `shape`.
    ///
    /// The fetch runs on the calling task; decoding runs on tokio's blocking
    /// pool.
    pub async fn load(
        &self,
        shape: ResourceShape,
        path: &str,
        fetcher: &Arc<dyn ResourceFetcher>,
    ) -> Result<Resource, BoxError> {
        let result = self.fetch_and_decode(shape, path, fetcher).await;
        if let Some(metrics) = &self.metrics {
            metrics.record(result.is_ok());
        }
        result
    }

    async fn fetch_and_decode(
        &self,
        shape: ResourceShape,
        path: &str,
        fetcher: &Arc<dyn ResourceFetcher>,
    ) -> Result<Resource, BoxError> {
        let decoder = self
            .slot(shape)
            .cloned()
            .ok_or(RegistryError::UnsupportedCombination {
                kind: shape.kind,
                backend: shape.backend,
            })?;

        let bytes = fetcher.fetch(path).await?;
        log::trace!(
            "Fetched {} bytes for '{}' via {}",
            bytes.len(),
            path,
            fetcher.name()
        );

        let fetcher = Arc::clone(fetcher);
        let metrics = self.metrics.clone();
        let path = path.to_string();
        tokio::task::spawn_blocking(move || {
            let _timer = metrics
                .as_ref()
                .map(|m| ScopedMetricTimer::new(&m.decode_time_ms));
            let resolver = FetcherResolver(fetcher.as_ref());
            let ctx = DecodeContext::new(&path, &resolver);
            decoder.decode_any(&bytes, &ctx)
        })
        .await
        .map_err(|e| format!("Decoder task failed: {e}"))?
    }
}

impl Default for DecoderTable {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for DecoderTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut slots: Vec<String> = ResourceShape::all()
            .filter_map(|shape| {
                self.strategy_name(shape)
                    .map(|name| format!("{shape} => {name}"))
            })
            .collect();
        slots.sort();
        f.debug_struct("DecoderTable").field("slots", &slots).finish()
    }
}
