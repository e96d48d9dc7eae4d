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

//! Result parsing for `SHOW` commands.
//!
//! Parses `ExecuteResult` readers into the intermediate row structs that
//! the result builder turns into catalog results. Columns are looked up by
//! the names Redshift reports for each command.

use crate::client::ExecuteResult;
use crate::error::{RedshiftErrorHelper, Result};
use crate::metadata::types::{CatalogRow, ColumnRow, SchemaRow, TableRow};
use arrow_array::cast::AsArray;
use arrow_array::types::{Int16Type, Int32Type, Int64Type};
use arrow_array::RecordBatch;
use arrow_schema::DataType;

/// Get the index of a column by name, or return an error.
fn column_index(batch: &RecordBatch, name: &str) -> Result<usize> {
    batch.schema().index_of(name).map_err(|_| {
        RedshiftErrorHelper::invalid_state()
            .message(format!("Expected column '{}' in metadata result", name))
    })
}

fn optional_index(batch: &RecordBatch, name: &str) -> Option<usize> {
    batch.schema().index_of(name).ok()
}

/// Get a string value from a column at a given row, returning error if not string type.
fn get_string_value(batch: &RecordBatch, col_idx: usize, row: usize) -> Result<String> {
    Ok(get_optional_string_value(batch, col_idx, row)?.unwrap_or_default())
}

/// Get an optional string value from a column at a given row.
fn get_optional_string_value(
    batch: &RecordBatch,
    col_idx: usize,
    row: usize,
) -> Result<Option<String>> {
    let array = batch.column(col_idx);
    if array.is_null(row) {
        return Ok(None);
    }
    match array.data_type() {
        DataType::Utf8 => Ok(Some(array.as_string::<i32>().value(row).to_string())),
        DataType::LargeUtf8 => Ok(Some(array.as_string::<i64>().value(row).to_string())),
        dt => Err(RedshiftErrorHelper::invalid_state()
            .message(format!("Expected string column, got {:?}", dt))),
    }
}

/// Get an optional i32 value from a column at a given row.
///
/// Integer columns of any width are accepted, as are numeric strings.
fn get_optional_int32_value(
    batch: &RecordBatch,
    col_idx: usize,
    row: usize,
) -> Result<Option<i32>> {
    let array = batch.column(col_idx);
    if array.is_null(row) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Int16 => i64::from(array.as_primitive::<Int16Type>().value(row)),
        DataType::Int32 => i64::from(array.as_primitive::<Int32Type>().value(row)),
        DataType::Int64 => array.as_primitive::<Int64Type>().value(row),
        DataType::Utf8 | DataType::LargeUtf8 => {
            let text = get_string_value(batch, col_idx, row)?;
            match text.trim().parse::<i64>() {
                Ok(v) => v,
                Err(_) if text.trim().is_empty() => return Ok(None),
                Err(_) => {
                    return Err(RedshiftErrorHelper::invalid_state()
                        .message(format!("Expected integer value, got '{}'", text)))
                }
            }
        }
        dt => {
            return Err(RedshiftErrorHelper::invalid_state()
                .message(format!("Expected int column, got {:?}", dt)))
        }
    };
    i32::try_from(value).map(Some).map_err(|_| {
        RedshiftErrorHelper::invalid_state()
            .message(format!("Integer value {} out of range", value))
    })
}

/// Parse databases from SHOW DATABASES result.
/// Result columns: `database_name: Utf8`
pub fn parse_catalogs(result: ExecuteResult) -> Result<Vec<CatalogRow>> {
    let mut catalogs = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let db_idx = column_index(&batch, "database_name")?;
        for row in 0..batch.num_rows() {
            catalogs.push(CatalogRow {
                database_name: get_string_value(&batch, db_idx, row)?,
            });
        }
    }
    Ok(catalogs)
}

/// Parse schemas from SHOW SCHEMAS result.
/// Result columns: `database_name: Utf8`, `schema_name: Utf8`
pub fn parse_schemas(result: ExecuteResult) -> Result<Vec<SchemaRow>> {
    let mut schemas = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let db_idx = column_index(&batch, "database_name")?;
        let schema_idx = column_index(&batch, "schema_name")?;
        for row in 0..batch.num_rows() {
            schemas.push(SchemaRow {
                database_name: get_string_value(&batch, db_idx, row)?,
                schema_name: get_string_value(&batch, schema_idx, row)?,
            });
        }
    }
    Ok(schemas)
}

/// Parse tables from SHOW TABLES result.
/// Result columns: `database_name`, `schema_name`, `table_name`,
///                 `table_type`, `remarks?`
pub fn parse_tables(result: ExecuteResult) -> Result<Vec<TableRow>> {
    let mut tables = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let db_idx = column_index(&batch, "database_name")?;
        let schema_idx = column_index(&batch, "schema_name")?;
        let name_idx = column_index(&batch, "table_name")?;
        let type_idx = column_index(&batch, "table_type")?;
        let remarks_idx = optional_index(&batch, "remarks");
        for row in 0..batch.num_rows() {
            let remarks = match remarks_idx {
                Some(idx) => get_optional_string_value(&batch, idx, row)?,
                None => None,
            };
            tables.push(TableRow {
                database_name: get_string_value(&batch, db_idx, row)?,
                schema_name: get_string_value(&batch, schema_idx, row)?,
                table_name: get_string_value(&batch, name_idx, row)?,
                table_type: get_string_value(&batch, type_idx, row)?,
                remarks,
            });
        }
    }
    Ok(tables)
}

/// Parse columns from SHOW COLUMNS result.
/// Result columns: `database_name`, `schema_name`, `table_name`,
///                 `column_name`, `ordinal_position`, `column_default?`,
///                 `is_nullable`, `data_type`, `character_maximum_length?`,
///                 `numeric_precision?`, `numeric_scale?`, `remarks?`
pub fn parse_columns(result: ExecuteResult) -> Result<Vec<ColumnRow>> {
    let mut columns = Vec::new();
    let mut reader = result.reader;

    while let Some(batch) = reader.next_batch()? {
        let db_idx = column_index(&batch, "database_name")?;
        let schema_idx = column_index(&batch, "schema_name")?;
        let table_idx = column_index(&batch, "table_name")?;
        let name_idx = column_index(&batch, "column_name")?;
        let type_idx = column_index(&batch, "data_type")?;
        let ordinal_idx = column_index(&batch, "ordinal_position")?;

        // Optional columns
        let default_idx = optional_index(&batch, "column_default");
        let nullable_idx = optional_index(&batch, "is_nullable");
        let length_idx = optional_index(&batch, "character_maximum_length");
        let precision_idx = optional_index(&batch, "numeric_precision");
        let scale_idx = optional_index(&batch, "numeric_scale");
        let remarks_idx = optional_index(&batch, "remarks");

        let opt_string = |idx: Option<usize>, row: usize| -> Result<Option<String>> {
            match idx {
                Some(i) => get_optional_string_value(&batch, i, row),
                None => Ok(None),
            }
        };
        let opt_int = |idx: Option<usize>, row: usize| -> Result<Option<i32>> {
            match idx {
                Some(i) => get_optional_int32_value(&batch, i, row),
                None => Ok(None),
            }
        };

        for row in 0..batch.num_rows() {
            columns.push(ColumnRow {
                database_name: get_string_value(&batch, db_idx, row)?,
                schema_name: get_string_value(&batch, schema_idx, row)?,
                table_name: get_string_value(&batch, table_idx, row)?,
                column_name: get_string_value(&batch, name_idx, row)?,
                ordinal_position: get_optional_int32_value(&batch, ordinal_idx, row)?
                    .unwrap_or_default(),
                column_default: opt_string(default_idx, row)?,
                is_nullable: opt_string(nullable_idx, row)?.unwrap_or_default(),
                data_type: get_string_value(&batch, type_idx, row)?,
                character_maximum_length: opt_int(length_idx, row)?,
                numeric_precision: opt_int(precision_idx, row)?,
                numeric_scale: opt_int(scale_idx, row)?,
                remarks: opt_string(remarks_idx, row)?,
            });
        }
    }
    Ok(columns)
}

/// Whether the reader produces at least one row. Stops at the first
/// non-empty batch.
pub fn has_rows(result: ExecuteResult) -> Result<bool> {
    let mut reader = result.reader;
    while let Some(batch) = reader.next_batch()? {
        if batch.num_rows() > 0 {
            return Ok(true);
        }
    }
    Ok(false)
}
