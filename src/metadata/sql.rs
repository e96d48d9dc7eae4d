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

//! SQL command builder for the administrative `SHOW` commands.
//!
//! Builds `SHOW DATABASES`, `SHOW SCHEMAS`, `SHOW TABLES` and `SHOW COLUMNS`
//! with an optional `LIKE` filter on the listed level.

use crate::error::{RedshiftErrorHelper, Result};
use crate::metadata::filter::escape_literal;
use crate::metadata::types::MATCH_ALL;

/// Builds `SHOW` commands for metadata queries.
///
/// The enclosing levels are exact identifiers; only the level being listed
/// takes a pattern.
///
/// # Examples
///
/// ```ignore
/// let sql = SqlCommandBuilder::new()
///     .with_catalog(Some("dev"))
///     .with_schema(Some("public"))
///     .with_pattern(Some("order%"))
///     .build_show_tables()?;
/// assert_eq!(sql, "SHOW TABLES FROM SCHEMA \"dev\".\"public\" LIKE 'order%';");
/// ```
#[derive(Debug, Default)]
pub struct SqlCommandBuilder {
    catalog: Option<String>,
    schema: Option<String>,
    table: Option<String>,
    pattern: Option<String>,
}

impl SqlCommandBuilder {
    /// Create a new builder with no filters set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: Option<&str>) -> Self {
        self.catalog = catalog.map(|s| s.to_string());
        self
    }

    pub fn with_schema(mut self, schema: Option<&str>) -> Self {
        self.schema = schema.map(|s| s.to_string());
        self
    }

    pub fn with_table(mut self, table: Option<&str>) -> Self {
        self.table = table.map(|s| s.to_string());
        self
    }

    /// Set the `LIKE` pattern for the listed level. `None`, empty and `%`
    /// list everything and add no clause.
    pub fn with_pattern(mut self, pattern: Option<&str>) -> Self {
        self.pattern = pattern
            .filter(|p| !Self::is_null_or_wildcard(p))
            .map(|p| p.to_string());
        self
    }

    pub fn build_show_databases(&self) -> String {
        self.finish("SHOW DATABASES".to_string())
    }

    /// `SHOW SCHEMAS FROM DATABASE "{catalog}"`; the catalog is required.
    pub fn build_show_schemas(&self) -> Result<String> {
        let catalog = Self::required(&self.catalog, "catalog", "SHOW SCHEMAS")?;
        Ok(self.finish(format!(
            "SHOW SCHEMAS FROM DATABASE {}",
            Self::escape_identifier(catalog)
        )))
    }

    /// `SHOW TABLES FROM SCHEMA "{catalog}"."{schema}"`.
    pub fn build_show_tables(&self) -> Result<String> {
        let catalog = Self::required(&self.catalog, "catalog", "SHOW TABLES")?;
        let schema = Self::required(&self.schema, "schema", "SHOW TABLES")?;
        Ok(self.finish(format!(
            "SHOW TABLES FROM SCHEMA {}.{}",
            Self::escape_identifier(catalog),
            Self::escape_identifier(schema)
        )))
    }

    /// `SHOW COLUMNS FROM TABLE "{catalog}"."{schema}"."{table}"`.
    pub fn build_show_columns(&self) -> Result<String> {
        let catalog = Self::required(&self.catalog, "catalog", "SHOW COLUMNS")?;
        let schema = Self::required(&self.schema, "schema", "SHOW COLUMNS")?;
        let table = Self::required(&self.table, "table", "SHOW COLUMNS")?;
        Ok(self.finish(format!(
            "SHOW COLUMNS FROM TABLE {}.{}.{}",
            Self::escape_identifier(catalog),
            Self::escape_identifier(schema),
            Self::escape_identifier(table)
        )))
    }

    fn finish(&self, mut sql: String) -> String {
        if let Some(ref pattern) = self.pattern {
            sql.push_str(&format!(" LIKE '{}'", escape_literal(pattern)));
        }
        sql.push(';');
        sql
    }

    fn required<'a>(value: &'a Option<String>, what: &str, command: &str) -> Result<&'a str> {
        match value.as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(RedshiftErrorHelper::invalid_argument()
                .message(format!("{} is required for {}", what, command))),
        }
    }

    fn is_null_or_wildcard(value: &str) -> bool {
        value.is_empty() || value == MATCH_ALL
    }

    /// Wrap an identifier in double quotes, doubling embedded quotes.
    fn escape_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
