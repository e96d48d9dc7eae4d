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

//! Arrow schema definitions for catalog results.
//!
//! Every catalog operation returns one flat result shape, in ODBC column
//! order with ODBC 3 column names, whichever path produced the rows:
//!
//! - tables (also catalogs, schemas and table types): 5 columns
//! - columns: 18 columns
//! - statistics: 13 columns
//! - special columns: 8 columns
//! - primary keys: 6 columns, foreign keys: 14 columns
//! - table privileges: 7 columns, column privileges: 8 columns
//! - procedures: 8 columns, procedure columns: 19 columns
//! - type info: 19 columns
//!
//! All fields are nullable; the server reports NULL for missing metadata.

use crate::metadata::types::CatalogOperation;
use arrow_schema::{DataType, Field, Schema};

fn utf8(name: &str) -> Field {
    Field::new(name, DataType::Utf8, true)
}

fn int16(name: &str) -> Field {
    Field::new(name, DataType::Int16, true)
}

fn int32(name: &str) -> Field {
    Field::new(name, DataType::Int32, true)
}

/// Returns the fixed schema for `operation`.
pub fn result_schema(operation: CatalogOperation) -> Schema {
    match operation {
        CatalogOperation::Tables => tables_schema(),
        CatalogOperation::Columns => columns_schema(),
        CatalogOperation::Statistics => statistics_schema(),
        CatalogOperation::SpecialColumns => special_columns_schema(),
        CatalogOperation::PrimaryKeys => primary_keys_schema(),
        CatalogOperation::ForeignKeys => foreign_keys_schema(),
        CatalogOperation::TablePrivileges => table_privileges_schema(),
        CatalogOperation::ColumnPrivileges => column_privileges_schema(),
        CatalogOperation::Procedures => procedures_schema(),
        CatalogOperation::ProcedureColumns => procedure_columns_schema(),
        CatalogOperation::TypeInfo => type_info_schema(),
    }
}

/// Returns the schema for tables results.
///
/// Catalog, schema and table type enumeration share this shape, with the
/// unused columns NULL.
pub fn tables_schema() -> Schema {
    Schema::new(vec![
        utf8("TABLE_CAT"),
        utf8("TABLE_SCHEM"),
        utf8("TABLE_NAME"),
        utf8("TABLE_TYPE"),
        utf8("REMARKS"),
    ])
}

/// Returns the schema for columns results.
///
/// The type descriptor fields:
/// - `DATA_TYPE`: Int16 - concise SQL type code
/// - `COLUMN_SIZE`: Int32 - precision or maximum length
/// - `BUFFER_LENGTH`: Int32 - transfer octet length
/// - `DECIMAL_DIGITS`: Int16 - scale or fractional seconds precision
/// - `NUM_PREC_RADIX`: Int16 - 2 or 10, NULL for non-numeric types
/// - `NULLABLE`: Int16 - 0 no nulls, 1 nullable, 2 unknown
/// - `SQL_DATA_TYPE` / `SQL_DATETIME_SUB`: Int16 - verbose type and subcode
/// - `CHAR_OCTET_LENGTH`: Int32 - NULL for non-character types
pub fn columns_schema() -> Schema {
    Schema::new(vec![
        utf8("TABLE_CAT"),
        utf8("TABLE_SCHEM"),
        utf8("TABLE_NAME"),
        utf8("COLUMN_NAME"),
        int16("DATA_TYPE"),
        utf8("TYPE_NAME"),
        int32("COLUMN_SIZE"),
        int32("BUFFER_LENGTH"),
        int16("DECIMAL_DIGITS"),
        int16("NUM_PREC_RADIX"),
        int16("NULLABLE"),
        utf8("REMARKS"),
        utf8("COLUMN_DEF"),
        int16("SQL_DATA_TYPE"),
        int16("SQL_DATETIME_SUB"),
        int32("CHAR_OCTET_LENGTH"),
        int32("ORDINAL_POSITION"),
        utf8("IS_NULLABLE"),
    ])
}

pub fn statistics_schema() -> Schema {
    Schema::new(vec![
        utf8("TABLE_CAT"),
        utf8("TABLE_SCHEM"),
        utf8("TABLE_NAME"),
        int16("NON_UNIQUE"),
        utf8("INDEX_QUALIFIER"),
        utf8("INDEX_NAME"),
        int16("TYPE"),
        int16("ORDINAL_POSITION"),
        utf8("COLUMN_NAME"),
        utf8("ASC_OR_DESC"),
        int32("CARDINALITY"),
        int32("PAGES"),
        utf8("FILTER_CONDITION"),
    ])
}

pub fn special_columns_schema() -> Schema {
    Schema::new(vec![
        int16("SCOPE"),
        utf8("COLUMN_NAME"),
        int16("DATA_TYPE"),
        utf8("TYPE_NAME"),
        int32("COLUMN_SIZE"),
        int32("BUFFER_LENGTH"),
        int16("DECIMAL_DIGITS"),
        int16("PSEUDO_COLUMN"),
    ])
}

pub fn primary_keys_schema() -> Schema {
    Schema::new(vec![
        utf8("TABLE_CAT"),
        utf8("TABLE_SCHEM"),
        utf8("TABLE_NAME"),
        utf8("COLUMN_NAME"),
        int16("KEY_SEQ"),
        utf8("PK_NAME"),
    ])
}

pub fn foreign_keys_schema() -> Schema {
    Schema::new(vec![
        utf8("PKTABLE_CAT"),
        utf8("PKTABLE_SCHEM"),
        utf8("PKTABLE_NAME"),
        utf8("PKCOLUMN_NAME"),
        utf8("FKTABLE_CAT"),
        utf8("FKTABLE_SCHEM"),
        utf8("FKTABLE_NAME"),
        utf8("FKCOLUMN_NAME"),
        int16("KEY_SEQ"),
        int16("UPDATE_RULE"),
        int16("DELETE_RULE"),
        utf8("FK_NAME"),
        utf8("PK_NAME"),
        int16("DEFERRABILITY"),
    ])
}

pub fn table_privileges_schema() -> Schema {
    Schema::new(vec![
        utf8("TABLE_CAT"),
        utf8("TABLE_SCHEM"),
        utf8("TABLE_NAME"),
        utf8("GRANTOR"),
        utf8("GRANTEE"),
        utf8("PRIVILEGE"),
        utf8("IS_GRANTABLE"),
    ])
}

pub fn column_privileges_schema() -> Schema {
    Schema::new(vec![
        utf8("TABLE_CAT"),
        utf8("TABLE_SCHEM"),
        utf8("TABLE_NAME"),
        utf8("COLUMN_NAME"),
        utf8("GRANTOR"),
        utf8("GRANTEE"),
        utf8("PRIVILEGE"),
        utf8("IS_GRANTABLE"),
    ])
}

pub fn procedures_schema() -> Schema {
    Schema::new(vec![
        utf8("PROCEDURE_CAT"),
        utf8("PROCEDURE_SCHEM"),
        utf8("PROCEDURE_NAME"),
        int32("NUM_INPUT_PARAMS"),
        int32("NUM_OUTPUT_PARAMS"),
        int32("NUM_RESULT_SETS"),
        utf8("REMARKS"),
        int16("PROCEDURE_TYPE"),
    ])
}

/// Returns the schema for procedure columns results.
///
/// `COLUMN_TYPE` is 1 in, 2 in/out, 3 result column, 4 out, 5 return value.
pub fn procedure_columns_schema() -> Schema {
    Schema::new(vec![
        utf8("PROCEDURE_CAT"),
        utf8("PROCEDURE_SCHEM"),
        utf8("PROCEDURE_NAME"),
        utf8("COLUMN_NAME"),
        int16("COLUMN_TYPE"),
        int16("DATA_TYPE"),
        utf8("TYPE_NAME"),
        int32("COLUMN_SIZE"),
        int32("BUFFER_LENGTH"),
        int16("DECIMAL_DIGITS"),
        int16("NUM_PREC_RADIX"),
        int16("NULLABLE"),
        utf8("REMARKS"),
        utf8("COLUMN_DEF"),
        int16("SQL_DATA_TYPE"),
        int16("SQL_DATETIME_SUB"),
        int32("CHAR_OCTET_LENGTH"),
        int32("ORDINAL_POSITION"),
        utf8("IS_NULLABLE"),
    ])
}

pub fn type_info_schema() -> Schema {
    Schema::new(vec![
        utf8("TYPE_NAME"),
        int16("DATA_TYPE"),
        int32("COLUMN_SIZE"),
        utf8("LITERAL_PREFIX"),
        utf8("LITERAL_SUFFIX"),
        utf8("CREATE_PARAMS"),
        int16("NULLABLE"),
        int16("CASE_SENSITIVE"),
        int16("SEARCHABLE"),
        int16("UNSIGNED_ATTRIBUTE"),
        int16("FIXED_PREC_SCALE"),
        int16("AUTO_UNIQUE_VALUE"),
        utf8("LOCAL_TYPE_NAME"),
        int16("MINIMUM_SCALE"),
        int16("MAXIMUM_SCALE"),
        int16("SQL_DATA_TYPE"),
        int16("SQL_DATETIME_SUB"),
        int32("NUM_PREC_RADIX"),
        int16("INTERVAL_PRECISION"),
    ])
}
