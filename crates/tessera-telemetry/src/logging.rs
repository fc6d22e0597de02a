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

//! `env_logger` bootstrap.

use log::LevelFilter;

/// Installs `env_logger` as the global logger.
///
/// `default_level` applies when `RUST_LOG` is unset; otherwise `RUST_LOG` wins.
/// Safe to call more than once: returns `false` if a logger was already set.
pub fn init_logging(default_level: LevelFilter) -> bool {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(default_level)
        .format_timestamp_millis()
        .parse_default_env();
    builder.try_init().is_ok()
}

/// Like [`init_logging`] but routes output through the test harness capture.
pub fn init_test_logging() {
    let _ = env_logger::Builder::new()
        .filter_level(LevelFilter::Debug)
        .parse_default_env()
        .is_test(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected_quietly() {
        init_test_logging();
        assert!(!init_logging(LevelFilter::Info));
    }
}
