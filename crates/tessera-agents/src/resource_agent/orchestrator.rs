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

//! Concurrent loading of every declared entry.

use super::{
    error::{RegistryError, Result},
    progress::{percentage, LoadProgress, LoadedEntry},
    registry::{Inner, ResourceRegistry},
};
use futures::{stream::FuturesUnordered, FutureExt, StreamExt};
use std::sync::Arc;
use tessera_core::{Resource, ResourceShape};
use tessera_lanes::BoxError;

/// What a load task needs to know about its entry, copied out of the lock.
struct LoadJob {
    name: String,
    filename: String,
    shape: ResourceShape,
    path: String,
    generation: u64,
}

impl ResourceRegistry {
    /// Decodes every declared entry concurrently.
    ///
    /// See [`ResourceRegistry::load_with_progress`].
    pub async fn load(&self) -> Result<()> {
        self.load_with_progress(|_| {}).await
    }

    /// Decodes every declared entry concurrently, reporting each success.
    ///
    /// Every entry is decoded again, loaded or not. `on_progress` runs on the
    /// calling task once per stored entry, in completion order. A result whose
    /// name was re-declared while it decoded is dropped without a report.
    ///
    /// Returns on the first failure with [`RegistryError::LoadFailure`]. The
    /// other entries keep loading in the background and still store their
    /// results; the failed entry keeps whatever it held before.
    pub async fn load_with_progress<F>(&self, mut on_progress: F) -> Result<()>
    where
        F: FnMut(LoadProgress),
    {
        let jobs = self.snapshot_jobs();
        let total = jobs.len();
        if total == 0 {
            log::debug!("Nothing declared, load is a no-op");
            return Ok(());
        }
        log::info!("Loading {total} resources");

        let mut pending: FuturesUnordered<_> = jobs
            .into_iter()
            .map(|job| {
                let name = job.name.clone();
                let filename = job.filename.clone();
                tokio::spawn(run_job(Arc::clone(&self.inner), job))
                    .map(move |joined| (name, filename, joined))
            })
            .collect();

        let mut loaded = 0;
        while let Some((name, filename, joined)) = pending.next().await {
            let outcome = joined
                .map_err(|e| BoxError::from(format!("Load task panicked: {e}")))
                .and_then(|decoded| decoded);

            match outcome {
                Ok(None) => {}
                Ok(Some(resource)) => {
                    loaded += 1;
                    on_progress(LoadProgress {
                        total,
                        loaded,
                        percentage: percentage(loaded, total),
                        current: LoadedEntry { name, resource },
                    });
                }
                Err(source) => {
                    log::info!(
                        "Load aborted after {loaded}/{total} resources, {} still running",
                        pending.len()
                    );
                    return Err(RegistryError::LoadFailure { filename, source });
                }
            }
        }

        log::info!("Loaded {loaded} of {total} resources");
        Ok(())
    }

    fn snapshot_jobs(&self) -> Vec<LoadJob> {
        self.inner
            .lock()
            .entries
            .iter()
            .map(|(name, entry)| LoadJob {
                name: name.clone(),
                filename: entry.filename.clone(),
                shape: entry.shape,
                path: entry.path.clone(),
                generation: entry.generation,
            })
            .collect()
    }
}

/// Fetches and decodes one entry, then stores the result. Yields `None` when
/// the result was stale and nothing was stored.
async fn run_job(
    inner: Arc<Inner>,
    job: LoadJob,
) -> std::result::Result<Option<Resource>, BoxError> {
    let _permit = match &inner.limiter {
        Some(limiter) => Some(Arc::clone(limiter).acquire_owned().await?),
        None => None,
    };

    match inner
        .decoders
        .load(job.shape, &job.path, &inner.fetcher)
        .await
    {
        Ok(resource) => Ok(commit(&inner, &job, &resource).then_some(resource)),
        Err(e) => {
            log::warn!("Failed to load resource '{}': {}", job.filename, e);
            Err(e)
        }
    }
}

/// Stores `resource` if `job` still describes the current declaration of its
/// name, and wakes the lazy lookups parked on that name. Returns whether it
/// stored anything.
fn commit(inner: &Inner, job: &LoadJob, resource: &Resource) -> bool {
    let mut guard = inner.lock();
    let state = &mut *guard;
    match state.entries.get_mut(&job.name) {
        Some(entry) if entry.generation == job.generation => {
            entry.resource = Some(resource.clone());
            let delivered = state.lazy.fire(&job.name, resource);
            log::debug!(
                "Loaded '{}' as {} ({delivered} lazy lookups resolved)",
                job.name,
                job.shape
            );
            true
        }
        _ => {
            log::debug!(
                "Dropped stale result for '{}': it was re-declared while loading",
                job.name
            );
            false
        }
    }
}
