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

//! Metric identities and values.

pub mod registry;

use std::fmt;
use thiserror::Error;

/// Identifies a metric by namespace, name and optional labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MetricId {
    /// Grouping, e.g. `resources`.
    pub namespace: String,
    /// Name within the namespace, e.g. `loaded_total`.
    pub name: String,
    /// Key/value labels, kept in insertion order.
    pub labels: Vec<(String, String)>,
}

impl MetricId {
    /// Creates an unlabeled id.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            labels: Vec::new(),
        }
    }

    /// Adds a label.
    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push((key.into(), value.into()));
        self
    }
}

impl fmt::Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.name)?;
        if !self.labels.is_empty() {
            let labels: Vec<_> = self
                .labels
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect();
            write!(f, "{{{}}}", labels.join(","))?;
        }
        Ok(())
    }
}

/// Current value of a metric.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    /// Monotonic count.
    Counter(u64),
    /// Bucketed samples.
    Histogram {
        /// Upper bounds of the buckets, ascending.
        buckets: Vec<f64>,
        /// Samples per bucket; one extra trailing slot counts overflow.
        bucket_counts: Vec<u64>,
        /// Sum of every sample.
        sum: f64,
        /// Number of samples.
        count: u64,
    },
}

impl MetricValue {
    /// Counter value, if this is a counter.
    pub fn as_counter(&self) -> Option<u64> {
        match self {
            MetricValue::Counter(v) => Some(*v),
            _ => None,
        }
    }

    /// Sample count, if this is a histogram.
    pub fn sample_count(&self) -> Option<u64> {
        match self {
            MetricValue::Histogram { count, .. } => Some(*count),
            _ => None,
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            MetricValue::Counter(_) => "counter",
            MetricValue::Histogram { .. } => "histogram",
        }
    }
}

/// Errors raised by metric operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// No metric is registered under this id.
    #[error("Metric not found: {0}")]
    NotFound(String),
    /// The metric exists with another type.
    #[error("Metric {id} is a {found}, expected a {expected}")]
    TypeMismatch {
        /// The metric.
        id: String,
        /// The type the operation needs.
        expected: &'static str,
        /// The registered type.
        found: &'static str,
    },
}

/// Result alias for metric operations.
pub type MetricsResult<T> = Result<T, MetricsError>;
