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

//! Schema pattern resolution.
//!
//! Decides which family of catalog views answers a request. The decision is
//! made per call from the schema argument and the session flags; the only
//! backend round trip is the external-schema probe.

use crate::error::Result;
use crate::metadata::filter::escape_literal;
use crate::session::SessionConfig;
use std::fmt;
use tracing::{debug, warn};

/// Which catalog views a query is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaStrategy {
    /// `pg_catalog` tables of the connected database.
    Local,
    /// `svv_*` views that cover local, external and shared objects.
    Universal,
    /// `svv_external_*` views.
    External,
}

impl fmt::Display for SchemaStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SchemaStrategy::Local => "local",
            SchemaStrategy::Universal => "universal",
            SchemaStrategy::External => "external",
        };
        f.write_str(s)
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub strategy: SchemaStrategy,
    /// The external-schema probe errored and `Local` was assumed.
    pub probe_failed: bool,
}

impl Resolution {
    fn of(strategy: SchemaStrategy) -> Self {
        Self {
            strategy,
            probe_failed: false,
        }
    }
}

/// Runs the external-schema probe.
pub trait SchemaProber {
    /// Execute `sql` and report whether it returned at least one row.
    fn has_rows(&self, sql: &str) -> Result<bool>;
}

/// Query matching external schemas against `schema_pattern`.
pub fn probe_query(schema_pattern: &str) -> String {
    format!(
        "select 1 from svv_external_schemas where schemaname like '{}'",
        escape_literal(schema_pattern)
    )
}

/// Choose the strategy for a schema argument.
///
/// An empty pattern or a multi-database session always uses the universal
/// views. Otherwise the pattern is probed against the external schemas. A
/// failed probe falls back to `Local`.
pub fn resolve(
    schema_pattern: &str,
    session: &SessionConfig,
    prober: &dyn SchemaProber,
) -> Resolution {
    let resolution = if schema_pattern.is_empty() || !session.is_single_database() {
        Resolution::of(SchemaStrategy::Universal)
    } else {
        match prober.has_rows(&probe_query(schema_pattern)) {
            Ok(true) => Resolution::of(SchemaStrategy::External),
            Ok(false) => Resolution::of(SchemaStrategy::Local),
            Err(e) => {
                warn!(
                    "External schema probe failed for '{}', using local catalog: {}",
                    schema_pattern, e
                );
                Resolution {
                    strategy: SchemaStrategy::Local,
                    probe_failed: true,
                }
            }
        }
    };
    debug!(
        "Schema pattern '{}' resolved to {} strategy",
        schema_pattern, resolution.strategy
    );
    resolution
}
