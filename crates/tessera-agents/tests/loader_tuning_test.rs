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

mod common;

use anyhow::Result;
use common::{memory_files, BASE, LEVEL_JSON};
use std::time::Duration;
use tessera_agents::{DecoderTable, RegistryConfig, RegistryError, ResourceRegistry};
use tessera_core::{resource::DataTable, Backend};
use tessera_lanes::{BoxError, DecodeContext, ResourceDecoder};
use tessera_telemetry::{MetricId, MetricsRegistry};

fn level_files(count: usize) -> Vec<(String, Vec<u8>)> {
    (0..count)
        .map(|i| (format!("level_{i}.json"), LEVEL_JSON.as_bytes().to_vec()))
        .collect()
}

fn declare_all(registry: &ResourceRegistry, files: &[(String, Vec<u8>)]) -> Result<()> {
    for (filename, _) in files {
        registry.declare(filename)?;
    }
    Ok(())
}

fn as_refs(files: &[(String, Vec<u8>)]) -> Vec<(&str, Vec<u8>)> {
    files
        .iter()
        .map(|(name, bytes)| (name.as_str(), bytes.clone()))
        .collect()
}

#[tokio::test]
async fn concurrency_limit_caps_overlapping_loads() -> Result<()> {
    let levels = level_files(6);
    let fetcher = memory_files(&as_refs(&levels), Duration::from_millis(30));
    let registry = ResourceRegistry::builder()
        .base_path(BASE)
        .max_concurrent_loads(2)
        .fetcher(fetcher.clone())
        .build();
    declare_all(&registry, &levels)?;

    registry.load().await?;

    assert!(registry.is_loaded());
    assert!(fetcher.peak_in_flight() <= 2, "{}", fetcher.peak_in_flight());
    Ok(())
}

#[tokio::test]
async fn unbounded_loads_all_start_at_once() -> Result<()> {
    let levels = level_files(6);
    let fetcher = memory_files(&as_refs(&levels), Duration::from_millis(30));
    let registry = ResourceRegistry::builder()
        .base_path(BASE)
        .fetcher(fetcher.clone())
        .build();
    declare_all(&registry, &levels)?;

    registry.load().await?;

    assert!(fetcher.peak_in_flight() > 2, "{}", fetcher.peak_in_flight());
    Ok(())
}

#[tokio::test]
async fn metrics_follow_successes_and_failures() -> Result<()> {
    let metrics = MetricsRegistry::new();
    let fetcher = memory_files(
        &[("level.json", LEVEL_JSON.as_bytes().to_vec())],
        Duration::ZERO,
    );
    let registry = ResourceRegistry::builder()
        .base_path(BASE)
        .fetcher(fetcher.clone())
        .metrics(metrics.clone())
        .build();
    registry.declare("level.json")?;
    registry.load().await?;
    registry.load().await?;

    fetcher.insert("assets/level.json", b"{ broken".to_vec());
    assert!(registry.load().await.is_err());

    let counter = |name: &str| {
        metrics
            .get(&MetricId::new("resources", name))
            .ok()
            .and_then(|value| value.as_counter())
    };
    assert_eq!(counter("loaded_total"), Some(2));
    assert_eq!(counter("failed_total"), Some(1));
    let decode_time = registry
        .metrics()
        .get(&MetricId::new("resources", "decode_time"))?;
    assert_eq!(decode_time.sample_count(), Some(3));
    Ok(())
}

struct PanickingDecoder;

impl ResourceDecoder<DataTable> for PanickingDecoder {
    fn strategy_name(&self) -> &'static str {
        "PanickingDecoder"
    }

    fn decode(&self, _bytes: &[u8], _ctx: &DecodeContext<'_>) -> Result<DataTable, BoxError> {
        panic!("decoder bug");
    }
}

#[tokio::test]
async fn decoder_panic_becomes_a_load_failure() -> Result<()> {
    let mut decoders = DecoderTable::with_defaults();
    decoders.register(PanickingDecoder);
    let fetcher = memory_files(
        &[("level.json", LEVEL_JSON.as_bytes().to_vec())],
        Duration::ZERO,
    );
    let registry = ResourceRegistry::builder()
        .base_path(BASE)
        .decoders(decoders)
        .fetcher(fetcher)
        .build();

    registry.declare_with("level.json", Backend::Alternate)?;
    assert!(matches!(
        registry.load().await,
        Err(RegistryError::LoadFailure { filename, .. }) if filename == "level.json"
    ));

    registry.declare("level.json")?;
    registry.load().await?;
    assert!(registry.is_loaded());
    Ok(())
}

#[tokio::test]
async fn registry_from_ron_config() -> Result<()> {
    let config = RegistryConfig::from_ron(
        r#"(base_path: "assets/", default_backend: alternate, max_concurrent_loads: Some(1))"#,
    )?;
    let fetcher = memory_files(
        &[("level.json", LEVEL_JSON.as_bytes().to_vec())],
        Duration::ZERO,
    );
    let registry = ResourceRegistry::builder()
        .config(config)
        .fetcher(fetcher)
        .build();

    registry.declare("level.json")?;
    assert_eq!(registry.declaration("level").unwrap().path, "assets/level.json");
    registry.load().await?;
    let table = registry.get_as::<DataTable>("level")?;
    assert_eq!(table.get("name"), Some(&serde_json::json!("docks")));
    Ok(())
}
