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

//! Redshift catalog metadata resolution
//!
//! This crate answers the catalog requests of an ODBC-style Redshift driver
//! (tables, columns, keys, privileges, procedures and type info) and returns
//! each result as Arrow batches in the fixed ODBC column layout.
//!
//! ## Overview
//!
//! - [`Catalog`] - One method per catalog operation
//! - [`SessionConfig`] - Session flags that decide how requests are resolved
//! - [`MetadataClient`] - The statement executor supplied by the driver
//!
//! ## Resolution paths
//!
//! - **Local**: joins over the `pg_catalog` tables of the connected database
//! - **Universal**: the `svv_*` views, spanning databases in datashare mode
//! - **External**: the `svv_external_*` views for federated schemas
//! - **Server API**: `SHOW DATABASES/SCHEMAS/TABLES/COLUMNS` fan-out
//!
//! ## Example
//!
//! ```ignore
//! use redshift_metadata::{Catalog, CatalogRequest, SessionConfig};
//!
//! let session = SessionConfig::new()
//!     .with_database("dev")
//!     .with_datashare_enabled(true)
//!     .with_current_db_only(false);
//! let catalog = Catalog::new(client, session, runtime.handle().clone());
//!
//! let reader = catalog.columns(
//!     &CatalogRequest::new()
//!         .with_catalog("dev")
//!         .with_schema("public")
//!         .with_object("orders"),
//! )?;
//! ```
//!
//! ## Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `adbc.connection.catalog` | | Connected database |
//! | `redshift.catalog.current_db_only` | true | Restrict metadata to the connected database |
//! | `redshift.catalog.datashare_enabled` | false | Session can see other databases |
//! | `redshift.catalog.external_database` | false | Connected database is external |
//! | `redshift.metadata.metadata_id` | false | Treat name arguments as identifiers |
//! | `redshift.metadata.use_server_api` | false | Resolve through `SHOW` commands |
//! | `redshift.odbc_version` | 3 | ODBC version of the application (2 or 3) |
//! | `redshift.log_level` | | Log level |
//! | `redshift.log_file` | | Log file, stderr when unset |

pub mod catalog;
pub mod client;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod reader;
pub mod session;

// Re-export main types
pub use catalog::{Catalog, CatalogReader};
pub use client::{ExecuteResult, MetadataClient};
pub use error::{Error, ErrorKind, RedshiftErrorHelper, Result};
pub use metadata::{CatalogOperation, CatalogRequest, IdentifierType, SchemaStrategy};
pub use reader::{BatchReader, ResultReader};
pub use session::{OdbcVersion, SessionConfig};
