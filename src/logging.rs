// Copyright (c) 2025 ADBC Drivers Contributors
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

//! Logging setup for catalog resolution.
//!
//! Installs a `tracing-subscriber` writing to a file or stderr. Catalog calls
//! log the synthesized query text, the chosen schema strategy and every
//! administrative command issued during a fan-out at `debug`; probe failures
//! are logged at `warn`.
//!
//! ## Configuration priority
//!
//! 1. `redshift.log_level` / `redshift.log_file` session options (highest)
//! 2. `RUST_LOG` environment variable
//! 3. Default: `warn`
//!
//! ```bash
//! RUST_LOG=redshift_metadata=debug ./my_app
//! ```

use std::sync::OnceLock;
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

const CRATE_TARGET: &str = "redshift_metadata";

static LOGGING_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Logging configuration taken from the session options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// "OFF", "ERROR", "WARN", "INFO", "DEBUG" or "TRACE".
    pub level: Option<String>,
    /// Log file path; stderr when unset.
    pub file: Option<String>,
}

impl LogConfig {
    /// Whether logging is switched off entirely.
    pub fn is_off(&self) -> bool {
        self.level
            .as_deref()
            .map(|l| l.eq_ignore_ascii_case("off"))
            .unwrap_or(false)
    }

    /// The `EnvFilter` directive for an explicit level, if one is configured.
    pub fn directive(&self) -> Option<String> {
        self.level
            .as_ref()
            .map(|level| format!("{}={}", CRATE_TARGET, level.to_lowercase()))
    }
}

/// Install the tracing subscriber.
///
/// Runs at most once per process; later calls are no-ops, as are calls made
/// after the host application installed its own global subscriber.
pub fn init_logging(config: &LogConfig) {
    LOGGING_INITIALIZED.get_or_init(|| {
        if config.is_off() {
            return;
        }

        let filter = match config.directive() {
            Some(directive) => EnvFilter::new(directive),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", CRATE_TARGET))),
        };

        match config.file.as_deref() {
            Some(path) => {
                let file = match std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                {
                    Ok(f) => f,
                    Err(e) => {
                        eprintln!("redshift-metadata: failed to open log file {}: {}", path, e);
                        return;
                    }
                };

                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(file)
                            .with_target(false)
                            .with_ansi(false)
                            .with_timer(SystemTime),
                    )
                    .try_init()
                    .ok();
            }
            None => {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(
                        fmt::layer()
                            .with_writer(std::io::stderr)
                            .with_target(false)
                            .with_ansi(false)
                            .with_timer(SystemTime),
                    )
                    .try_init()
                    .ok();
            }
        }
    });
}
