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

use super::{ExternalResolver, ResourceFetcher};
use crate::decode_lane::BoxError;
use ahash::AHashMap;
use async_trait::async_trait;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex, PoisonError,
    },
    time::Duration,
};

#[derive(Clone)]
struct MemoryFile {
    bytes: Vec<u8>,
    latency: Duration,
}

#[derive(Default)]
struct Files {
    entries: AHashMap<String, MemoryFile>,
    fetch_counts: AHashMap<String, usize>,
}

/// Serves resources from an in-memory map.
///
/// Used to embed resources in a binary and to drive the loader in tests: each
/// file can carry an artificial latency, and the fetcher records how often
/// each path was fetched and how many fetches overlapped.
#[derive(Default)]
pub struct MemoryFetcher {
    files: Mutex<Files>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MemoryFetcher {
    /// Creates an empty fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> std::sync::MutexGuard<'_, Files> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Adds or replaces a file served immediately.
    pub fn insert(&self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.insert_with_latency(path, bytes, Duration::ZERO);
    }

    /// Adds or replaces a file whose fetch completes after `latency`.
    pub fn insert_with_latency(
        &self,
        path: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        latency: Duration,
    ) {
        self.files().entries.insert(
            path.into(),
            MemoryFile {
                bytes: bytes.into(),
                latency,
            },
        );
    }

    /// Removes a file, returning whether it existed.
    pub fn remove(&self, path: &str) -> bool {
        self.files().entries.remove(path).is_some()
    }

    /// How many times `path` was fetched, including failed fetches.
    pub fn fetch_count(&self, path: &str) -> usize {
        self.files().fetch_counts.get(path).copied().unwrap_or(0)
    }

    /// Fetches currently waiting on their latency.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Highest number of overlapping fetches seen so far.
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

struct InFlightGuard<'a>(&'a AtomicUsize);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ResourceFetcher for MemoryFetcher {
    fn name(&self) -> &'static str {
        "MemoryFetcher"
    }

    async fn fetch(&self, path: &str) -> anyhow::Result<Vec<u8>> {
        let file = {
            let mut files = self.files();
            *files.fetch_counts.entry(path.to_string()).or_default() += 1;
            files.entries.get(path).cloned()
        };
        let file = file.ok_or_else(|| anyhow::anyhow!("No in-memory file at '{path}'"))?;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _guard = InFlightGuard(&self.in_flight);

        if !file.latency.is_zero() {
            tokio::time::sleep(file.latency).await;
        }
        log::trace!("Served {} bytes for '{}'", file.bytes.len(), path);
        Ok(file.bytes)
    }
}

impl ExternalResolver for MemoryFetcher {
    fn resolve(&self, path: &str) -> Result<Vec<u8>, BoxError> {
        self.files()
            .entries
            .get(path)
            .map(|file| file.bytes.clone())
            .ok_or_else(|| format!("No in-memory file at '{path}'").into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn serves_inserted_bytes_and_counts_fetches() {
        let fetcher = MemoryFetcher::new();
        fetcher.insert("a/b.json", b"{}".to_vec());

        assert_eq!(fetcher.fetch("a/b.json").await.unwrap(), b"{}");
        assert!(fetcher.fetch("a/missing.json").await.is_err());
        assert_eq!(fetcher.fetch_count("a/b.json"), 1);
        assert_eq!(fetcher.fetch_count("a/missing.json"), 1);
        assert_eq!(fetcher.resolve("a/b.json").unwrap(), b"{}");

        assert!(fetcher.remove("a/b.json"));
        assert!(fetcher.fetch("a/b.json").await.is_err());
    }

    #[tokio::test]
    async fn overlapping_fetches_are_tracked() {
        let fetcher = Arc::new(MemoryFetcher::new());
        fetcher.insert_with_latency("slow", vec![1], Duration::from_millis(50));

        let a = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.fetch("slow").await }
        });
        let b = tokio::spawn({
            let fetcher = fetcher.clone();
            async move { fetcher.fetch("slow").await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(fetcher.peak_in_flight(), 2);
        assert_eq!(fetcher.in_flight(), 0);
    }
}
