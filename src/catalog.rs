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

//! Catalog entry points.
//!
//! [`Catalog`] answers one catalog request per method call. Each call
//! validates its arguments, checks the short-circuit and empty-by-construction
//! cases, picks a schema strategy when the operation needs one, then takes
//! exactly one path:
//!
//! - a synthesized query, executed once and conformed to the fixed shape, or
//! - a `SHOW` command fan-out through [`MetadataService`], assembled by the
//!   result builder.

use crate::client::MetadataClient;
use crate::error::Result;
use crate::logging::init_logging;
use crate::metadata::builder::{
    conform, empty_batch, finalize, row_count, shared_schema, Intermediate, RowSet,
};
use crate::metadata::filter::{ShowTableTypes, TableTypeFilter, SHOW_TABLE_TYPES};
use crate::metadata::query::{self, short_circuit, uses_strategy, QueryText};
use crate::metadata::service::MetadataService;
use crate::metadata::strategy::{resolve, SchemaStrategy};
use crate::metadata::types::{CatalogOperation, CatalogRequest, MATCH_ALL};
use crate::session::SessionConfig;

use arrow_array::{RecordBatch, RecordBatchIterator};
use arrow_schema::ArrowError;
use std::sync::Arc;
use tracing::debug;

/// Reader over the batches of one catalog result.
pub type CatalogReader =
    RecordBatchIterator<std::vec::IntoIter<std::result::Result<RecordBatch, ArrowError>>>;

/// Catalog metadata for one session.
///
/// # Example
///
/// ```ignore
/// let catalog = Catalog::new(client, session, runtime.handle().clone());
/// let reader = catalog.tables(
///     &CatalogRequest::new()
///         .with_catalog("dev")
///         .with_schema("public")
///         .with_table_types("TABLE,VIEW"),
/// )?;
/// ```
#[derive(Debug)]
pub struct Catalog {
    session: SessionConfig,
    service: MetadataService,
}

impl Catalog {
    /// Create the entry points for a session. Installs logging from the
    /// session's log options on first use.
    pub fn new(
        client: Arc<dyn MetadataClient>,
        session: SessionConfig,
        runtime: tokio::runtime::Handle,
    ) -> Self {
        init_logging(session.log_config());
        let service = MetadataService::new(client, session.clone(), runtime);
        Self { session, service }
    }

    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// All catalogs visible to the session, in the tables shape.
    pub fn catalogs(&self) -> Result<CatalogReader> {
        self.tables(&CatalogRequest::new().with_catalog(MATCH_ALL))
    }

    /// All schemas visible to the session, in the tables shape.
    pub fn schemas(&self) -> Result<CatalogReader> {
        self.tables(&CatalogRequest::new().with_schema(MATCH_ALL))
    }

    /// The seven table types, in the tables shape.
    pub fn table_types(&self) -> Result<CatalogReader> {
        self.tables(&CatalogRequest::new().with_table_types(MATCH_ALL))
    }

    /// Tables matching the catalog, schema, table and table type arguments.
    ///
    /// The match-all marker `%` in exactly one of catalog, schema or table
    /// types, with the other names empty, enumerates that dimension instead.
    pub fn tables(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        let operation = CatalogOperation::Tables;

        if let Some(sql) = short_circuit(request, &self.session) {
            if self.session.use_server_api() {
                return self.enumerate_with_server_api(request);
            }
            debug!("Enumerating with short-circuit query");
            return self.run_query(operation, QueryText::Sql(sql));
        }

        if self.session.use_server_api() {
            let types = ShowTableTypes::parse(request.table_types_str());
            let tables = self
                .service
                .list_tables(
                    request.catalog.as_deref(),
                    request.schema.as_deref(),
                    request.object.as_deref(),
                )?
                .into_iter()
                .filter(|t| types.accepts(&t.table_type))
                .collect();
            return self.finalize(operation, RowSet::Tables(tables));
        }

        if matches!(
            TableTypeFilter::parse(request.table_types_str()),
            TableTypeFilter::NoMatch
        ) {
            debug!("No recognized table type in '{}'", request.table_types_str());
            return Ok(reader(operation, vec![empty_batch(operation)]));
        }

        self.run_operation(operation, request)
    }

    /// Columns matching the catalog, schema, table and column arguments.
    pub fn columns(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        let operation = CatalogOperation::Columns;
        if self.session.use_server_api() {
            let columns = self.service.list_columns(
                request.catalog.as_deref(),
                request.schema.as_deref(),
                request.object.as_deref(),
                request.column.as_deref(),
            )?;
            return self.finalize(operation, RowSet::Columns(columns));
        }
        self.run_operation(operation, request)
    }

    /// Index statistics. Always the empty statistics shape; the table name is
    /// required.
    pub fn statistics(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::Statistics, request)
    }

    /// Row identifier or row version columns of a table.
    pub fn special_columns(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::SpecialColumns, request)
    }

    pub fn primary_keys(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::PrimaryKeys, request)
    }

    /// Foreign keys between the primary key table (`schema`/`object`) and the
    /// foreign key table (`fk_schema`/`fk_table`).
    pub fn foreign_keys(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::ForeignKeys, request)
    }

    pub fn table_privileges(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::TablePrivileges, request)
    }

    pub fn column_privileges(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::ColumnPrivileges, request)
    }

    pub fn procedures(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::Procedures, request)
    }

    pub fn procedure_columns(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::ProcedureColumns, request)
    }

    /// Supported data types, all of them for `SQL_ALL_TYPES`.
    pub fn type_info(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        self.run_operation(CatalogOperation::TypeInfo, request)
    }

    /// Resolve the strategy if the operation needs one, then build and run
    /// its query.
    fn run_operation(
        &self,
        operation: CatalogOperation,
        request: &CatalogRequest,
    ) -> Result<CatalogReader> {
        let strategy = self.strategy_for(operation, request)?;
        let query = query::build(operation, strategy, request, &self.session)?;
        self.run_query(operation, query)
    }

    fn strategy_for(
        &self,
        operation: CatalogOperation,
        request: &CatalogRequest,
    ) -> Result<Option<SchemaStrategy>> {
        if !uses_strategy(operation) {
            return Ok(None);
        }
        let resolution = resolve(request.schema_str(), &self.session, &self.service);
        debug!("Using {} strategy for {}", resolution.strategy, operation);
        Ok(Some(resolution.strategy))
    }

    fn run_query(&self, operation: CatalogOperation, query: QueryText) -> Result<CatalogReader> {
        let batches = match query {
            QueryText::Empty => vec![empty_batch(operation)],
            QueryText::Sql(sql) => {
                let batches = self
                    .service
                    .execute_query(&sql)
                    .map_err(|e| e.context(operation.name(), "query execution"))?;
                conform(operation, batches)?
            }
        };
        debug!("Found {} rows for {}", row_count(&batches), operation);
        Ok(reader(operation, batches))
    }

    /// Catalog, schema or table type enumeration through `SHOW` commands.
    fn enumerate_with_server_api(&self, request: &CatalogRequest) -> Result<CatalogReader> {
        let rows = if request.catalog_str() == MATCH_ALL {
            RowSet::Catalogs(self.service.list_catalogs(None)?)
        } else if request.schema_str() == MATCH_ALL {
            RowSet::Schemas(self.service.list_schemas(None, None)?)
        } else {
            RowSet::TableTypes(SHOW_TABLE_TYPES.iter().map(|t| t.to_string()).collect())
        };
        self.finalize(CatalogOperation::Tables, rows)
    }

    fn finalize(&self, operation: CatalogOperation, rows: RowSet) -> Result<CatalogReader> {
        let batch = finalize(operation, Intermediate::Rows(rows), self.session.odbc_version())?;
        debug!("Found {} rows for {}", batch.num_rows(), operation);
        Ok(reader(operation, vec![batch]))
    }
}

fn reader(operation: CatalogOperation, batches: Vec<RecordBatch>) -> CatalogReader {
    RecordBatchIterator::new(
        batches.into_iter().map(Ok).collect::<Vec<_>>(),
        shared_schema(operation),
    )
}
