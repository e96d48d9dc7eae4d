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

//! Result assembly for catalog operations.
//!
//! Two entry points produce batches in the fixed shape declared in
//! [`crate::metadata::schemas`]:
//!
//! - [`finalize`] turns the intermediate rows gathered by `SHOW` commands
//!   into a sorted batch, expanding column type names into their ODBC
//!   descriptors.
//! - [`conform`] matches the batches of a direct catalog query to the fixed
//!   shape by position, renaming columns and casting any whose type differs.
//!
//! # Example
//!
//! ```ignore
//! let tables = service.list_tables(Some("dev"), Some("public"), None)?;
//! let batch = finalize(
//!     CatalogOperation::Tables,
//!     Intermediate::Rows(RowSet::Tables(tables)),
//!     OdbcVersion::V3,
//! )?;
//! ```

use crate::error::{RedshiftErrorHelper, Result};
use crate::metadata::schemas::result_schema;
use crate::metadata::type_mapping::{describe, ColumnShape};
use crate::metadata::types::{CatalogOperation, CatalogRow, ColumnRow, SchemaRow, TableRow, TypeDescriptor};
use crate::session::OdbcVersion;

use arrow_array::{Array, ArrayRef, Int16Array, Int32Array, RecordBatch, StringArray};
use arrow_schema::SchemaRef;
use std::sync::Arc;

/// Rows gathered through the `SHOW` commands.
#[derive(Debug, Clone)]
pub enum RowSet {
    Catalogs(Vec<CatalogRow>),
    Schemas(Vec<SchemaRow>),
    Tables(Vec<TableRow>),
    TableTypes(Vec<String>),
    Columns(Vec<ColumnRow>),
}

impl RowSet {
    /// The operation whose result shape these rows fill.
    fn operation(&self) -> CatalogOperation {
        match self {
            RowSet::Columns(_) => CatalogOperation::Columns,
            _ => CatalogOperation::Tables,
        }
    }
}

/// Input of [`finalize`]: rows, or a result known to be empty.
#[derive(Debug, Clone)]
pub enum Intermediate {
    Rows(RowSet),
    Empty,
}

/// A zero-row batch in the shape of `operation`.
pub fn empty_batch(operation: CatalogOperation) -> RecordBatch {
    RecordBatch::new_empty(shared_schema(operation))
}

/// Build the result batch for `operation` from intermediate rows.
///
/// # Errors
///
/// Returns `InvalidState` when the rows do not belong to `operation`.
pub fn finalize(
    operation: CatalogOperation,
    rows: Intermediate,
    odbc_version: OdbcVersion,
) -> Result<RecordBatch> {
    let rows = match rows {
        Intermediate::Empty => return Ok(empty_batch(operation)),
        Intermediate::Rows(rows) => rows,
    };
    if rows.operation() != operation {
        return Err(RedshiftErrorHelper::invalid_state().message(format!(
            "Rows for {} cannot fill a {} result",
            rows.operation(),
            operation
        )));
    }

    let schema = shared_schema(operation);
    let arrays = match rows {
        RowSet::Catalogs(mut catalogs) => {
            catalogs.sort_by(|a, b| a.database_name.cmp(&b.database_name));
            let names: Vec<Option<&str>> =
                catalogs.iter().map(|c| Some(c.database_name.as_str())).collect();
            name_only_arrays(names.clone(), vec![None; names.len()], vec![None; names.len()])
        }
        RowSet::Schemas(mut schemas) => {
            schemas.sort_by(|a, b| {
                a.database_name
                    .cmp(&b.database_name)
                    .then_with(|| a.schema_name.cmp(&b.schema_name))
            });
            name_only_arrays(
                schemas.iter().map(|s| Some(s.database_name.as_str())).collect(),
                schemas.iter().map(|s| Some(s.schema_name.as_str())).collect(),
                vec![None; schemas.len()],
            )
        }
        RowSet::TableTypes(mut types) => {
            types.sort();
            name_only_arrays(
                vec![None; types.len()],
                vec![None; types.len()],
                types.iter().map(|t| Some(t.as_str())).collect(),
            )
        }
        RowSet::Tables(mut tables) => {
            tables.sort_by(|a, b| {
                a.table_type
                    .cmp(&b.table_type)
                    .then_with(|| a.schema_name.cmp(&b.schema_name))
                    .then_with(|| a.table_name.cmp(&b.table_name))
            });
            tables_arrays(&tables)
        }
        RowSet::Columns(mut columns) => {
            columns.sort_by(|a, b| {
                a.schema_name
                    .cmp(&b.schema_name)
                    .then_with(|| a.table_name.cmp(&b.table_name))
                    .then_with(|| a.ordinal_position.cmp(&b.ordinal_position))
            });
            columns_arrays(&columns, odbc_version)
        }
    };

    Ok(RecordBatch::try_new(schema, arrays)?)
}

/// Tables-shaped arrays where only the catalog, schema or type is known.
fn name_only_arrays(
    catalogs: Vec<Option<&str>>,
    schemas: Vec<Option<&str>>,
    types: Vec<Option<&str>>,
) -> Vec<ArrayRef> {
    let len = catalogs.len();
    vec![
        Arc::new(StringArray::from(catalogs)),
        Arc::new(StringArray::from(schemas)),
        Arc::new(StringArray::new_null(len)),
        Arc::new(StringArray::from(types)),
        Arc::new(StringArray::new_null(len)),
    ]
}

fn tables_arrays(tables: &[TableRow]) -> Vec<ArrayRef> {
    vec![
        Arc::new(StringArray::from_iter_values(
            tables.iter().map(|t| t.database_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            tables.iter().map(|t| t.schema_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            tables.iter().map(|t| t.table_name.as_str()),
        )),
        Arc::new(StringArray::from_iter_values(
            tables.iter().map(|t| t.table_type.as_str()),
        )),
        Arc::new(StringArray::from(
            tables.iter().map(|t| t.remarks.as_deref()).collect::<Vec<_>>(),
        )),
    ]
}

/// Columns-shaped arrays, with each native type expanded into its
/// descriptor.
fn columns_arrays(columns: &[ColumnRow], odbc_version: OdbcVersion) -> Vec<ArrayRef> {
    let descriptors: Vec<TypeDescriptor> = columns
        .iter()
        .map(|c| {
            describe(
                &ColumnShape {
                    data_type: &c.data_type,
                    character_maximum_length: c.character_maximum_length,
                    numeric_precision: c.numeric_precision,
                    numeric_scale: c.numeric_scale,
                    is_nullable: &c.is_nullable,
                },
                odbc_version,
            )
        })
        .collect();

    let strings = |f: fn(&ColumnRow) -> &str| -> ArrayRef {
        Arc::new(StringArray::from_iter_values(columns.iter().map(f)))
    };
    let optional_strings = |f: fn(&ColumnRow) -> Option<&str>| -> ArrayRef {
        Arc::new(StringArray::from(columns.iter().map(f).collect::<Vec<_>>()))
    };
    let int16s = |f: fn(&TypeDescriptor) -> Option<i16>| -> ArrayRef {
        Arc::new(Int16Array::from(descriptors.iter().map(f).collect::<Vec<_>>()))
    };
    let int32s = |f: fn(&TypeDescriptor) -> Option<i32>| -> ArrayRef {
        Arc::new(Int32Array::from(descriptors.iter().map(f).collect::<Vec<_>>()))
    };

    vec![
        strings(|c| c.database_name.as_str()),
        strings(|c| c.schema_name.as_str()),
        strings(|c| c.table_name.as_str()),
        strings(|c| c.column_name.as_str()),
        int16s(|d| Some(d.sql_type)),
        Arc::new(StringArray::from_iter_values(
            descriptors.iter().map(|d| d.type_name.as_str()),
        )),
        int32s(|d| d.column_size),
        int32s(|d| d.buffer_length),
        int16s(|d| d.decimal_digits),
        int16s(|d| d.num_prec_radix),
        int16s(|d| Some(d.nullable)),
        optional_strings(|c| c.remarks.as_deref()),
        optional_strings(|c| c.column_default.as_deref()),
        int16s(|d| Some(d.sql_data_type)),
        int16s(|d| d.datetime_sub),
        int32s(|d| d.octet_length),
        Arc::new(Int32Array::from_iter_values(
            columns.iter().map(|c| c.ordinal_position),
        )),
        strings(|c| c.is_nullable.as_str()),
    ]
}

/// Fit the batches of a direct catalog query to the shape of `operation`.
///
/// Columns are matched by position and take the fixed names. A column whose
/// type differs from the fixed type is cast. No batches at all yields one
/// empty batch.
///
/// # Errors
///
/// Returns `InvalidState` when a batch has the wrong number of columns, or
/// an error when a column cannot be cast.
pub fn conform(operation: CatalogOperation, batches: Vec<RecordBatch>) -> Result<Vec<RecordBatch>> {
    let schema = shared_schema(operation);
    if batches.is_empty() {
        return Ok(vec![RecordBatch::new_empty(schema)]);
    }
    batches
        .into_iter()
        .map(|batch| conform_batch(operation, &schema, batch))
        .collect()
}

fn conform_batch(
    operation: CatalogOperation,
    schema: &SchemaRef,
    batch: RecordBatch,
) -> Result<RecordBatch> {
    if batch.num_columns() != schema.fields().len() {
        return Err(RedshiftErrorHelper::invalid_state().message(format!(
            "Expected {} columns in {} result, got {}",
            schema.fields().len(),
            operation,
            batch.num_columns()
        )));
    }
    let columns = batch
        .columns()
        .iter()
        .zip(schema.fields().iter())
        .map(|(array, field)| {
            if array.data_type() == field.data_type() {
                Ok(Arc::clone(array))
            } else {
                arrow_cast::cast(array.as_ref(), field.data_type()).map_err(|e| {
                    RedshiftErrorHelper::io().message(format!(
                        "Cannot convert {} column {} from {}: {}",
                        operation,
                        field.name(),
                        array.data_type(),
                        e
                    ))
                })
            }
        })
        .collect::<Result<Vec<ArrayRef>>>()?;
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Number of rows across `batches`.
pub fn row_count(batches: &[RecordBatch]) -> usize {
    batches.iter().map(|b| b.num_rows()).sum()
}

/// Schema of `operation`, shared with readers built from its batches.
pub fn shared_schema(operation: CatalogOperation) -> SchemaRef {
    Arc::new(result_schema(operation))
}
