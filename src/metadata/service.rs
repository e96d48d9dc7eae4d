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

//! Metadata service for executing catalog statements.
//!
//! [`MetadataService`] runs statements on the [`MetadataClient`] one at a
//! time, blocking on the async client through a runtime handle. It serves
//! the synthesized catalog queries and the external-schema probe, and
//! resolves catalogs, schemas, tables and columns through `SHOW` commands
//! when the session asks for the server API.
//!
//! ## Example
//!
//! ```ignore
//! let service = MetadataService::new(client, session, runtime);
//! let schemas = service.list_schemas(Some("dev"), Some("sales%"))?;
//! let columns = service.list_columns(Some("dev"), Some("public"), Some("orders"), None)?;
//! ```

use crate::client::{ExecuteResult, MetadataClient};
use crate::error::{RedshiftErrorHelper, Result, SQLSTATE_GENERAL_ERROR};
use crate::metadata::filter::{exact_name, like_matches};
use crate::metadata::parse::{has_rows, parse_catalogs, parse_columns, parse_schemas, parse_tables};
use crate::metadata::sql::SqlCommandBuilder;
use crate::metadata::strategy::SchemaProber;
use crate::metadata::types::{CatalogRow, ColumnRow, SchemaRow, TableRow};
use crate::reader::drain;
use crate::session::SessionConfig;
use arrow_array::RecordBatch;
use std::sync::Arc;
use tracing::debug;

/// Service for executing metadata statements.
#[derive(Debug)]
pub struct MetadataService {
    /// The client executing SQL statements.
    client: Arc<dyn MetadataClient>,
    session: SessionConfig,
    /// Runtime handle for async execution.
    runtime: tokio::runtime::Handle,
}

impl MetadataService {
    pub fn new(
        client: Arc<dyn MetadataClient>,
        session: SessionConfig,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        Self {
            client,
            session,
            runtime,
        }
    }

    /// Run one statement to completion on the calling thread.
    fn execute(&self, sql: &str) -> Result<ExecuteResult> {
        debug!("Executing metadata query: {}", sql);
        self.runtime
            .block_on(async { self.client.execute_statement(sql).await })
            .map_err(|e| {
                if e.get_sqlstate().is_none() {
                    e.sqlstate(SQLSTATE_GENERAL_ERROR)
                } else {
                    e
                }
            })
    }

    /// Execute a catalog query and return every batch it produced.
    pub fn execute_query(&self, sql: &str) -> Result<Vec<RecordBatch>> {
        let mut result = self.execute(sql)?;
        let batches = drain(result.reader.as_mut())?;
        debug!(
            "Query returned {} rows",
            batches.iter().map(|b| b.num_rows()).sum::<usize>()
        );
        Ok(batches)
    }

    /// List databases matching `pattern`.
    ///
    /// A single-database session only sees the connected database, which is
    /// returned without a round trip when it matches. This mirrors the
    /// `current_database()` scoping of the catalog queries; a database that
    /// `SHOW DATABASES` would hide from the user (no usage grant) is still
    /// listed.
    pub fn list_catalogs(&self, pattern: Option<&str>) -> Result<Vec<CatalogRow>> {
        if self.session.is_single_database() {
            let database = self.connected_database("list_catalogs")?;
            let catalogs = if like_matches(pattern.unwrap_or(""), database) {
                vec![CatalogRow {
                    database_name: database.to_string(),
                }]
            } else {
                Vec::new()
            };
            debug!("Found {} catalogs", catalogs.len());
            return Ok(catalogs);
        }

        let sql = SqlCommandBuilder::new()
            .with_pattern(pattern)
            .build_show_databases();
        let catalogs = self
            .execute(&sql)
            .and_then(parse_catalogs)
            .map_err(|e| e.context("list_catalogs", "SHOW DATABASES"))?;

        debug!("Found {} catalogs", catalogs.len());
        Ok(catalogs)
    }

    /// List schemas of every database matching `catalog`.
    pub fn list_schemas(
        &self,
        catalog: Option<&str>,
        schema_pattern: Option<&str>,
    ) -> Result<Vec<SchemaRow>> {
        let mut schemas = Vec::new();
        for database in self.resolve_catalogs(catalog)? {
            let sql = SqlCommandBuilder::new()
                .with_catalog(Some(&database))
                .with_pattern(schema_pattern)
                .build_show_schemas()?;
            let rows = self
                .execute(&sql)
                .and_then(parse_schemas)
                .map_err(|e| e.context("list_schemas", "SHOW SCHEMAS"))?;
            schemas.extend(rows);
        }

        debug!("Found {} schemas", schemas.len());
        Ok(schemas)
    }

    /// List tables of every schema matching `catalog` and `schema`.
    ///
    /// An exact schema name is used as is; otherwise the schemas of each
    /// catalog are listed first.
    pub fn list_tables(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table_pattern: Option<&str>,
    ) -> Result<Vec<TableRow>> {
        let mut tables = Vec::new();
        for (database, schema_name) in self.resolve_schemas(catalog, schema)? {
            let sql = SqlCommandBuilder::new()
                .with_catalog(Some(&database))
                .with_schema(Some(&schema_name))
                .with_pattern(table_pattern)
                .build_show_tables()?;
            let rows = self
                .execute(&sql)
                .and_then(parse_tables)
                .map_err(|e| e.context("list_tables", "SHOW TABLES"))?;
            tables.extend(rows);
        }

        debug!("Found {} tables", tables.len());
        Ok(tables)
    }

    /// List columns of every table matching `catalog`, `schema` and `table`.
    ///
    /// With exact catalog, schema and table names this is a single
    /// `SHOW COLUMNS` call.
    pub fn list_columns(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
        column_pattern: Option<&str>,
    ) -> Result<Vec<ColumnRow>> {
        let metadata_id = self.session.metadata_id();
        let targets: Vec<(String, String, String)> =
            match table.and_then(|t| exact_name(t, metadata_id)) {
                Some(table_name) => self
                    .resolve_schemas(catalog, schema)?
                    .into_iter()
                    .map(|(database, schema_name)| (database, schema_name, table_name.clone()))
                    .collect(),
                None => self
                    .list_tables(catalog, schema, table)?
                    .into_iter()
                    .map(|t| (t.database_name, t.schema_name, t.table_name))
                    .collect(),
            };

        let mut columns = Vec::new();
        for (database, schema_name, table_name) in targets {
            let sql = SqlCommandBuilder::new()
                .with_catalog(Some(&database))
                .with_schema(Some(&schema_name))
                .with_table(Some(&table_name))
                .with_pattern(column_pattern)
                .build_show_columns()?;
            let rows = self
                .execute(&sql)
                .and_then(parse_columns)
                .map_err(|e| e.context("list_columns", "SHOW COLUMNS"))?;
            columns.extend(rows);
        }

        debug!("Found {} columns", columns.len());
        Ok(columns)
    }

    fn connected_database(&self, operation: &str) -> Result<&str> {
        self.session.database().ok_or_else(|| {
            RedshiftErrorHelper::invalid_state().message(format!(
                "{}: no connected database for a single-database session",
                operation
            ))
        })
    }

    /// Database names addressed by a catalog argument.
    fn resolve_catalogs(&self, catalog: Option<&str>) -> Result<Vec<String>> {
        if !self.session.is_single_database() {
            if let Some(name) = catalog.and_then(|c| exact_name(c, self.session.metadata_id())) {
                return Ok(vec![name]);
            }
        }
        Ok(self
            .list_catalogs(catalog)?
            .into_iter()
            .map(|c| c.database_name)
            .collect())
    }

    /// `(database, schema)` pairs addressed by catalog and schema arguments.
    fn resolve_schemas(
        &self,
        catalog: Option<&str>,
        schema: Option<&str>,
    ) -> Result<Vec<(String, String)>> {
        match schema.and_then(|s| exact_name(s, self.session.metadata_id())) {
            Some(schema_name) => Ok(self
                .resolve_catalogs(catalog)?
                .into_iter()
                .map(|database| (database, schema_name.clone()))
                .collect()),
            None => Ok(self
                .list_schemas(catalog, schema)?
                .into_iter()
                .map(|s| (s.database_name, s.schema_name))
                .collect()),
        }
    }
}

impl SchemaProber for MetadataService {
    fn has_rows(&self, sql: &str) -> Result<bool> {
        self.execute(sql).and_then(has_rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::reader::BatchReader;
    use arrow_array::{ArrayRef, StringArray};
    use arrow_schema::{DataType, Field, Schema};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock client answering by statement prefix and recording every call.
    #[derive(Debug, Default)]
    struct MockClient {
        replies: HashMap<String, Vec<(&'static str, Vec<&'static str>)>>,
        failing: Option<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl MockClient {
        fn reply(mut self, sql: &str, columns: Vec<(&'static str, Vec<&'static str>)>) -> Self {
            self.replies.insert(sql.to_string(), columns);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MetadataClient for MockClient {
        async fn execute_statement(&self, sql: &str) -> Result<ExecuteResult> {
            self.calls.lock().unwrap().push(sql.to_string());
            if self.failing.is_some_and(|prefix| sql.starts_with(prefix)) {
                return Err(RedshiftErrorHelper::io().message("permission denied"));
            }
            let columns = self.replies.get(sql).cloned().unwrap_or_default();
            let fields: Vec<Field> = columns
                .iter()
                .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
                .collect();
            let schema = Arc::new(Schema::new(fields));
            if columns.is_empty() {
                return Ok(ExecuteResult {
                    reader: Box::new(BatchReader::empty(schema)),
                });
            }
            let arrays: Vec<ArrayRef> = columns
                .into_iter()
                .map(|(_, values)| Arc::new(StringArray::from(values)) as ArrayRef)
                .collect();
            let batch = RecordBatch::try_new(schema, arrays).unwrap();
            Ok(ExecuteResult {
                reader: Box::new(BatchReader::from_batches(vec![batch]).unwrap()),
            })
        }
    }

    fn multi_db() -> SessionConfig {
        SessionConfig::new()
            .with_database("dev")
            .with_datashare_enabled(true)
            .with_current_db_only(false)
            .with_server_api(true)
    }

    fn service(client: Arc<MockClient>, session: SessionConfig) -> (MetadataService, tokio::runtime::Runtime) {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let service = MetadataService::new(client, session, runtime.handle().clone());
        (service, runtime)
    }

    #[test]
    fn test_list_catalogs_single_database_skips_call() {
        let client = Arc::new(MockClient::default());
        let (service, _rt) = service(client.clone(), SessionConfig::new().with_database("dev"));

        let catalogs = service.list_catalogs(None).unwrap();
        assert_eq!(catalogs.len(), 1);
        assert_eq!(catalogs[0].database_name, "dev");
        assert!(service.list_catalogs(Some("qa%")).unwrap().is_empty());
        assert!(client.calls().is_empty());
    }

    #[test]
    fn test_list_catalogs_single_database_requires_database() {
        let client = Arc::new(MockClient::default());
        let (service, _rt) = service(client, SessionConfig::new());
        let err = service.list_catalogs(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_list_schemas_enumerates_catalogs() {
        let client = Arc::new(
            MockClient::default()
                .reply("SHOW DATABASES;", vec![("database_name", vec!["dev", "share"])])
                .reply(
                    "SHOW SCHEMAS FROM DATABASE \"dev\";",
                    vec![("database_name", vec!["dev"]), ("schema_name", vec!["public"])],
                )
                .reply(
                    "SHOW SCHEMAS FROM DATABASE \"share\";",
                    vec![("database_name", vec!["share"]), ("schema_name", vec!["sales"])],
                ),
        );
        let (service, _rt) = service(client.clone(), multi_db());

        let schemas = service.list_schemas(Some("%"), None).unwrap();
        assert_eq!(schemas.len(), 2);
        assert_eq!(schemas[1].schema_name, "sales");
        assert_eq!(client.calls().len(), 3);
    }

    #[test]
    fn test_list_columns_exact_names_issue_one_call() {
        let client = Arc::new(MockClient::default());
        let (service, _rt) = service(client.clone(), multi_db());

        let columns = service
            .list_columns(Some("dev"), Some("public"), Some("orders"), None)
            .unwrap();
        assert!(columns.is_empty());
        assert_eq!(
            client.calls(),
            vec!["SHOW COLUMNS FROM TABLE \"dev\".\"public\".\"orders\";".to_string()]
        );
    }

    #[test]
    fn test_list_tables_exact_schema_issues_one_call() {
        let client = Arc::new(MockClient::default().reply(
            "SHOW TABLES FROM SCHEMA \"dev\".\"public\" LIKE 'ord%';",
            vec![
                ("database_name", vec!["dev"]),
                ("schema_name", vec!["public"]),
                ("table_name", vec!["orders"]),
                ("table_type", vec!["TABLE"]),
            ],
        ));
        let (service, _rt) = service(client.clone(), multi_db());

        let tables = service
            .list_tables(Some("dev"), Some("public"), Some("ord%"))
            .unwrap();
        assert_eq!(tables.len(), 1);
        assert_eq!(client.calls().len(), 1);
    }

    #[test]
    fn test_failure_aborts_with_context() {
        let client = Arc::new(MockClient {
            failing: Some("SHOW TABLES"),
            ..Default::default()
        });
        let (service, _rt) = service(client, multi_db());

        let err = service
            .list_columns(Some("dev"), Some("public"), Some("ord%"), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "list_tables: Error in SHOW TABLES: permission denied"
        );
        assert_eq!(err.get_sqlstate(), Some(SQLSTATE_GENERAL_ERROR));
    }

    #[test]
    fn test_probe_reports_rows() {
        let client = Arc::new(MockClient::default().reply(
            "select 1",
            vec![("?column?", vec!["1"])],
        ));
        let (service, _rt) = service(client, SessionConfig::new());
        assert!(service.has_rows("select 1").unwrap());
        assert!(!service.has_rows("select 2").unwrap());
    }
}
