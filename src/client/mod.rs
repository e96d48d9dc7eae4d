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

//! Statement execution interface consumed by catalog resolution.
//!
//! Transport, authentication and session handling live behind
//! [`MetadataClient`]; this crate only submits SQL text and reads back rows.

use crate::error::Result;
use crate::reader::ResultReader;
use async_trait::async_trait;

/// Result of executing one statement.
pub struct ExecuteResult {
    /// Reader positioned before the first row.
    pub reader: Box<dyn ResultReader + Send>,
}

impl std::fmt::Debug for ExecuteResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecuteResult").finish_non_exhaustive()
    }
}

/// Abstract interface for the backend that runs catalog statements.
///
/// Implementations execute one statement at a time on the connection's
/// statement context. Catalog resolution never issues overlapping calls.
#[async_trait]
pub trait MetadataClient: Send + Sync + std::fmt::Debug {
    /// Execute a SQL statement (a catalog query or a `SHOW` command) and
    /// return a reader over its rows.
    async fn execute_statement(&self, sql: &str) -> Result<ExecuteResult>;
}
