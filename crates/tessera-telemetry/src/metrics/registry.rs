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

//! Registry for managing metrics.

use super::{MetricId, MetricValue, MetricsError, MetricsResult};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

type Store = Arc<Mutex<HashMap<MetricId, MetricValue>>>;

fn lock(store: &Store) -> MutexGuard<'_, HashMap<MetricId, MetricValue>> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Central in-memory registry of metrics.
///
/// Cloning the registry shares the underlying store. Handles returned by the
/// `register_*` methods write straight into it.
#[derive(Debug, Clone, Default)]
pub struct MetricsRegistry {
    store: Store,
}

impl MetricsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a counter starting at zero. Re-registering returns a handle
    /// to the existing counter.
    pub fn register_counter(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> MetricsResult<CounterHandle> {
        let id = MetricId::new(namespace, name);
        self.register(&id, MetricValue::Counter(0), "counter")?;
        Ok(CounterHandle {
            id,
            store: self.store.clone(),
        })
    }

    /// Registers a histogram with ascending bucket upper bounds.
    pub fn register_histogram(
        &self,
        namespace: impl Into<String>,
        name: impl Into<String>,
        buckets: Vec<f64>,
    ) -> MetricsResult<HistogramHandle> {
        let id = MetricId::new(namespace, name);
        let bucket_counts = vec![0; buckets.len() + 1];
        self.register(
            &id,
            MetricValue::Histogram {
                buckets,
                bucket_counts,
                sum: 0.0,
                count: 0,
            },
            "histogram",
        )?;
        Ok(HistogramHandle {
            id,
            store: self.store.clone(),
        })
    }

    fn register(
        &self,
        id: &MetricId,
        initial: MetricValue,
        expected: &'static str,
    ) -> MetricsResult<()> {
        let mut store = lock(&self.store);
        match store.get(id) {
            Some(existing) if existing.type_name() != expected => Err(MetricsError::TypeMismatch {
                id: id.to_string(),
                expected,
                found: existing.type_name(),
            }),
            Some(_) => Ok(()),
            None => {
                store.insert(id.clone(), initial);
                Ok(())
            }
        }
    }

    /// Current value of a metric.
    pub fn get(&self, id: &MetricId) -> MetricsResult<MetricValue> {
        lock(&self.store)
            .get(id)
            .cloned()
            .ok_or_else(|| MetricsError::NotFound(id.to_string()))
    }

    /// Every metric, sorted by id for stable output.
    pub fn snapshot(&self) -> Vec<(MetricId, MetricValue)> {
        let mut all: Vec<_> = lock(&self.store)
            .iter()
            .map(|(id, value)| (id.clone(), value.clone()))
            .collect();
        all.sort_by_key(|(id, _)| id.to_string());
        all
    }

    /// Number of registered metrics.
    pub fn metric_count(&self) -> usize {
        lock(&self.store).len()
    }
}

/// Handle for counter operations.
#[derive(Debug, Clone)]
pub struct CounterHandle {
    id: MetricId,
    store: Store,
}

impl CounterHandle {
    /// Increments by one and returns the new value.
    pub fn increment(&self) -> MetricsResult<u64> {
        self.increment_by(1)
    }

    /// Increments by `amount` and returns the new value.
    pub fn increment_by(&self, amount: u64) -> MetricsResult<u64> {
        let mut store = lock(&self.store);
        match store.get_mut(&self.id) {
            Some(MetricValue::Counter(value)) => {
                *value += amount;
                Ok(*value)
            }
            Some(other) => Err(MetricsError::TypeMismatch {
                id: self.id.to_string(),
                expected: "counter",
                found: other.type_name(),
            }),
            None => Err(MetricsError::NotFound(self.id.to_string())),
        }
    }

    /// Current value.
    pub fn get(&self) -> MetricsResult<u64> {
        match lock(&self.store).get(&self.id) {
            Some(MetricValue::Counter(value)) => Ok(*value),
            Some(other) => Err(MetricsError::TypeMismatch {
                id: self.id.to_string(),
                expected: "counter",
                found: other.type_name(),
            }),
            None => Err(MetricsError::NotFound(self.id.to_string())),
        }
    }

    /// The metric id.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

/// Handle for histogram operations.
#[derive(Debug, Clone)]
pub struct HistogramHandle {
    id: MetricId,
    store: Store,
}

impl HistogramHandle {
    /// Records one sample.
    pub fn observe(&self, sample: f64) -> MetricsResult<()> {
        let mut store = lock(&self.store);
        match store.get_mut(&self.id) {
            Some(MetricValue::Histogram {
                buckets,
                bucket_counts,
                sum,
                count,
            }) => {
                let slot = buckets
                    .iter()
                    .position(|bound| sample <= *bound)
                    .unwrap_or(buckets.len());
                bucket_counts[slot] += 1;
                *sum += sample;
                *count += 1;
                Ok(())
            }
            Some(other) => Err(MetricsError::TypeMismatch {
                id: self.id.to_string(),
                expected: "histogram",
                found: other.type_name(),
            }),
            None => Err(MetricsError::NotFound(self.id.to_string())),
        }
    }

    /// The full histogram value.
    pub fn get(&self) -> MetricsResult<MetricValue> {
        lock(&self.store)
            .get(&self.id)
            .cloned()
            .ok_or_else(|| MetricsError::NotFound(self.id.to_string()))
    }

    /// The metric id.
    pub fn id(&self) -> &MetricId {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_increments_and_reads_back() {
        let registry = MetricsRegistry::new();
        let counter = registry.register_counter("resources", "loaded_total").unwrap();
        assert_eq!(counter.increment().unwrap(), 1);
        assert_eq!(counter.increment_by(4).unwrap(), 5);
        assert_eq!(
            registry.get(counter.id()).unwrap(),
            MetricValue::Counter(5)
        );
    }

    #[test]
    fn re_registering_shares_the_metric() {
        let registry = MetricsRegistry::new();
        let a = registry.register_counter("resources", "failed_total").unwrap();
        let b = registry.register_counter("resources", "failed_total").unwrap();
        a.increment().unwrap();
        assert_eq!(b.get().unwrap(), 1);
        assert_eq!(registry.metric_count(), 1);
    }

    #[test]
    fn re_registering_with_another_type_fails() {
        let registry = MetricsRegistry::new();
        registry.register_counter("resources", "x").unwrap();
        let err = registry
            .register_histogram("resources", "x", vec![1.0])
            .unwrap_err();
        assert!(matches!(err, MetricsError::TypeMismatch { .. }));
    }

    #[test]
    fn histogram_buckets_samples() {
        let registry = MetricsRegistry::new();
        let hist = registry
            .register_histogram("resources", "decode_time", vec![1.0, 10.0])
            .unwrap();
        hist.observe(0.5).unwrap();
        hist.observe(5.0).unwrap();
        hist.observe(50.0).unwrap();
        match hist.get().unwrap() {
            MetricValue::Histogram {
                bucket_counts,
                sum,
                count,
                ..
            } => {
                assert_eq!(bucket_counts, vec![1, 1, 1]);
                assert_eq!(count, 3);
                assert!((sum - 55.5).abs() < f64::EPSILON);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn snapshot_is_sorted() {
        let registry = MetricsRegistry::new();
        registry.register_counter("b", "z").unwrap();
        registry.register_counter("a", "y").unwrap();
        let names: Vec<_> = registry
            .snapshot()
            .into_iter()
            .map(|(id, _)| id.to_string())
            .collect();
        assert_eq!(names, vec!["a:y", "b:z"]);
    }
}
