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

//! Data structures for catalog requests and intermediate results.
//!
//! A [`CatalogRequest`] carries the pattern arguments of one catalog call.
//! The row structs mirror the columns returned by the `SHOW DATABASES`,
//! `SHOW SCHEMAS`, `SHOW TABLES` and `SHOW COLUMNS` administrative commands
//! and are accumulated by the `MetadataService` before the post-processor
//! turns them into the fixed result shape.

use std::fmt;

/// The match-all marker that enumerates a dimension.
pub const MATCH_ALL: &str = "%";

/// `SQL_NO_NULLS`: special columns must exclude nullable columns.
pub const SQL_NO_NULLS: i16 = 0;
/// `SQL_NULLABLE`.
pub const SQL_NULLABLE: i16 = 1;
/// `SQL_ALL_TYPES` for type info requests.
pub const SQL_ALL_TYPES: i16 = 0;

/// Catalog operations exposed by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOperation {
    Tables,
    Columns,
    Statistics,
    SpecialColumns,
    PrimaryKeys,
    ForeignKeys,
    TablePrivileges,
    ColumnPrivileges,
    Procedures,
    ProcedureColumns,
    TypeInfo,
}

impl CatalogOperation {
    /// Name used in log lines and error context.
    pub fn name(self) -> &'static str {
        match self {
            CatalogOperation::Tables => "tables",
            CatalogOperation::Columns => "columns",
            CatalogOperation::Statistics => "statistics",
            CatalogOperation::SpecialColumns => "special_columns",
            CatalogOperation::PrimaryKeys => "primary_keys",
            CatalogOperation::ForeignKeys => "foreign_keys",
            CatalogOperation::TablePrivileges => "table_privileges",
            CatalogOperation::ColumnPrivileges => "column_privileges",
            CatalogOperation::Procedures => "procedures",
            CatalogOperation::ProcedureColumns => "procedure_columns",
            CatalogOperation::TypeInfo => "type_info",
        }
    }
}

impl fmt::Display for CatalogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row identifier kinds accepted by special columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierType {
    /// `SQL_BEST_ROWID`: the optimal set of columns identifying a row.
    BestRowId = 1,
    /// `SQL_ROWVER`: columns updated whenever any value in the row changes.
    RowVer = 2,
}

impl IdentifierType {
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(IdentifierType::BestRowId),
            2 => Some(IdentifierType::RowVer),
            _ => None,
        }
    }

    pub fn code(self) -> i16 {
        self as i16
    }
}

/// Arguments of one catalog call.
///
/// Every name field is `None` when the caller passed a null argument. An
/// empty string is "unconstrained" for filtering purposes, but a `None`
/// table is rejected by operations that require a table.
///
/// ```ignore
/// let request = CatalogRequest::new()
///     .with_catalog("dev")
///     .with_schema("public")
///     .with_table_types("TABLE,VIEW");
/// ```
#[derive(Debug, Clone)]
pub struct CatalogRequest {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    /// Table name for table-level calls, procedure name for procedure calls.
    pub object: Option<String>,
    pub column: Option<String>,
    /// Comma separated table type list, optionally single-quoted.
    pub table_types: Option<String>,
    /// Raw identifier kind; validated when the special columns query is built.
    pub identifier_type: i16,
    pub nullable: i16,
    pub unique: i16,
    pub data_type: i16,
    /// Referencing side of a foreign key lookup. The referenced side is
    /// `catalog`/`schema`/`object`.
    pub fk_catalog: Option<String>,
    pub fk_schema: Option<String>,
    pub fk_table: Option<String>,
}

impl Default for CatalogRequest {
    fn default() -> Self {
        Self {
            catalog: None,
            schema: None,
            object: None,
            column: None,
            table_types: None,
            identifier_type: IdentifierType::BestRowId.code(),
            nullable: SQL_NULLABLE,
            unique: 0,
            data_type: SQL_ALL_TYPES,
            fk_catalog: None,
            fk_schema: None,
            fk_table: None,
        }
    }
}

impl CatalogRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: impl Into<String>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Set the table (or procedure) name argument.
    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn with_table_types(mut self, table_types: impl Into<String>) -> Self {
        self.table_types = Some(table_types.into());
        self
    }

    pub fn with_identifier_type(mut self, code: i16) -> Self {
        self.identifier_type = code;
        self
    }

    pub fn with_nullable(mut self, nullable: i16) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_unique(mut self, unique: i16) -> Self {
        self.unique = unique;
        self
    }

    pub fn with_data_type(mut self, data_type: i16) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn with_foreign_table(
        mut self,
        catalog: Option<&str>,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> Self {
        self.fk_catalog = catalog.map(str::to_string);
        self.fk_schema = schema.map(str::to_string);
        self.fk_table = table.map(str::to_string);
        self
    }

    pub fn catalog_str(&self) -> &str {
        self.catalog.as_deref().unwrap_or("")
    }

    pub fn schema_str(&self) -> &str {
        self.schema.as_deref().unwrap_or("")
    }

    pub fn object_str(&self) -> &str {
        self.object.as_deref().unwrap_or("")
    }

    pub fn column_str(&self) -> &str {
        self.column.as_deref().unwrap_or("")
    }

    pub fn table_types_str(&self) -> &str {
        self.table_types.as_deref().unwrap_or("")
    }
}

/// Protocol type descriptor for one column or type.
///
/// `None` is the "not applicable" value and is reported as SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Native type name reported in `TYPE_NAME`.
    pub type_name: String,
    /// Concise SQL type code (`DATA_TYPE`).
    pub sql_type: i16,
    /// Non-concise SQL type code (`SQL_DATA_TYPE`).
    pub sql_data_type: i16,
    /// Datetime/interval subcode (`SQL_DATETIME_SUB`).
    pub datetime_sub: Option<i16>,
    pub column_size: Option<i32>,
    pub decimal_digits: Option<i16>,
    pub octet_length: Option<i32>,
    pub buffer_length: Option<i32>,
    pub num_prec_radix: Option<i16>,
    /// 0 no nulls, 1 nullable, 2 unknown.
    pub nullable: i16,
}

/// Database information from `SHOW DATABASES`.
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub database_name: String,
}

/// Schema information from `SHOW SCHEMAS`.
#[derive(Debug, Clone)]
pub struct SchemaRow {
    pub database_name: String,
    pub schema_name: String,
}

/// Table information from `SHOW TABLES`.
#[derive(Debug, Clone)]
pub struct TableRow {
    pub database_name: String,
    pub schema_name: String,
    pub table_name: String,
    /// Type as reported by the server, e.g. "TABLE" or "VIEW".
    pub table_type: String,
    pub remarks: Option<String>,
}

/// Column information from `SHOW COLUMNS`.
#[derive(Debug, Clone)]
pub struct ColumnRow {
    pub database_name: String,
    pub schema_name: String,
    pub table_name: String,
    pub column_name: String,
    /// 1-based position of the column in its table.
    pub ordinal_position: i32,
    pub column_default: Option<String>,
    /// "YES", "NO" or empty when unknown.
    pub is_nullable: String,
    /// Native type name, possibly with a precision suffix like `time(3)`.
    pub data_type: String,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    pub remarks: Option<String>,
}
