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

//! Catalog query synthesis.
//!
//! [`build`] turns a [`CatalogRequest`] into the text of one statement. It
//! never talks to the server; the schema strategy has already been chosen
//! by the caller. Builders are looked up in a table keyed by operation and,
//! for tables and columns, by strategy.

use crate::error::{
    RedshiftErrorHelper, Result, SQLSTATE_INVALID_IDENTIFIER_TYPE, SQLSTATE_NULL_POINTER,
};
use crate::metadata::filter::{
    order_by, CatalogScope, FilterClause, TableType, TableTypeFilter, TableTypeStyle,
};
use crate::metadata::strategy::SchemaStrategy;
use crate::metadata::templates;
use crate::metadata::type_mapping::{
    column_size_case, data_type_case, datetime_sub_case, decimal_digits_case, octet_length_case,
    radix_case, sql_data_type_case, type_info_query, type_name_case, ColumnTypeSource,
};
use crate::metadata::types::{CatalogOperation, CatalogRequest, IdentifierType, MATCH_ALL, SQL_NO_NULLS};
use crate::session::{OdbcVersion, SessionConfig};
use tracing::debug;

/// Synthesized statement, or a result known to be empty without asking the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryText {
    Sql(String),
    Empty,
}

pub type QueryBuilder = fn(&CatalogRequest, &SessionConfig) -> Result<QueryText>;

struct Route {
    operation: CatalogOperation,
    strategy: Option<SchemaStrategy>,
    build: QueryBuilder,
}

const fn route(
    operation: CatalogOperation,
    strategy: Option<SchemaStrategy>,
    build: QueryBuilder,
) -> Route {
    Route {
        operation,
        strategy,
        build,
    }
}

static ROUTES: &[Route] = &[
    route(CatalogOperation::Tables, Some(SchemaStrategy::Local), tables_local),
    route(CatalogOperation::Tables, Some(SchemaStrategy::Universal), tables_universal),
    route(CatalogOperation::Tables, Some(SchemaStrategy::External), tables_external),
    route(CatalogOperation::Columns, Some(SchemaStrategy::Local), columns_local),
    route(CatalogOperation::Columns, Some(SchemaStrategy::Universal), columns_universal),
    route(CatalogOperation::Columns, Some(SchemaStrategy::External), columns_external),
    route(CatalogOperation::Statistics, None, statistics),
    route(CatalogOperation::SpecialColumns, None, special_columns),
    route(CatalogOperation::PrimaryKeys, None, primary_keys),
    route(CatalogOperation::ForeignKeys, None, foreign_keys),
    route(CatalogOperation::TablePrivileges, None, table_privileges),
    route(CatalogOperation::ColumnPrivileges, None, column_privileges),
    route(CatalogOperation::Procedures, None, procedures),
    route(CatalogOperation::ProcedureColumns, None, procedure_columns),
    route(CatalogOperation::TypeInfo, None, type_info),
];

/// Whether the operation's query depends on the schema strategy.
pub fn uses_strategy(operation: CatalogOperation) -> bool {
    matches!(
        operation,
        CatalogOperation::Tables | CatalogOperation::Columns
    )
}

/// Build the statement for `operation`.
///
/// `strategy` is ignored by operations that have a single template. Tables
/// and columns without a strategy use the universal views.
pub fn build(
    operation: CatalogOperation,
    strategy: Option<SchemaStrategy>,
    request: &CatalogRequest,
    session: &SessionConfig,
) -> Result<QueryText> {
    let key = if uses_strategy(operation) {
        Some(strategy.unwrap_or(SchemaStrategy::Universal))
    } else {
        None
    };
    let route = ROUTES
        .iter()
        .find(|r| r.operation == operation && r.strategy == key)
        .ok_or_else(|| {
            RedshiftErrorHelper::invalid_state()
                .message(format!("No query template for {}", operation))
        })?;
    let query = (route.build)(request, session)?;
    if let QueryText::Sql(sql) = &query {
        debug!("Synthesized {} query: {}", operation, sql);
    }
    Ok(query)
}

/// Enumeration requests answered by a fixed query regardless of strategy.
///
/// A `%` catalog, schema or table type argument lists that dimension when
/// every other name argument is empty.
pub fn short_circuit(request: &CatalogRequest, session: &SessionConfig) -> Option<String> {
    let catalog = request.catalog_str();
    let schema = request.schema_str();
    let table = request.object_str();
    let types = request.table_types_str();
    let single = session.is_single_database();

    if catalog == MATCH_ALL && schema.is_empty() && table.is_empty() && types.is_empty() {
        return Some(if single {
            templates::ALL_CATALOGS.to_string()
        } else {
            templates::ALL_CATALOGS_DATASHARE.to_string()
        });
    }
    if schema == MATCH_ALL && catalog.is_empty() && table.is_empty() && types.is_empty() {
        return Some(if single {
            templates::ALL_SCHEMAS.to_string()
        } else {
            templates::ALL_SCHEMAS_DATASHARE.to_string()
        });
    }
    if types == MATCH_ALL
        && catalog.is_empty()
        && schema.is_empty()
        && table.is_empty()
    {
        return Some(all_table_types());
    }
    None
}

fn all_table_types() -> String {
    let rows = TableType::ALL
        .iter()
        .map(|t| {
            format!(
                " SELECT DISTINCT NULL as TABLE_CAT, NULL as TABLE_SCHEM, NULL as TABLE_NAME, '{}' as TABLE_TYPE, NULL as REMARKS ",
                t.name()
            )
        })
        .collect::<Vec<_>>()
        .join(" UNION ");
    format!("{}{}", rows, order_by("TABLE_TYPE"))
}

fn type_filter(request: &CatalogRequest) -> TableTypeFilter {
    TableTypeFilter::parse(request.table_types_str())
}

fn finish_tables(
    base: &str,
    filter: FilterClause,
    types: TableTypeFilter,
    style: TableTypeStyle,
) -> QueryText {
    let mut filter = filter;
    match types {
        TableTypeFilter::NoMatch => return QueryText::Empty,
        TableTypeFilter::Types(types) => {
            filter.table_types(&types, style);
        }
        TableTypeFilter::Unconstrained => {}
    }
    QueryText::Sql(format!(
        "{}{}{}",
        base,
        filter.into_sql(),
        order_by("TABLE_TYPE,TABLE_SCHEM,TABLE_NAME")
    ))
}

fn tables_local(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .like_or_equal("n.nspname", request.schema_str(), metadata_id)
        .like_or_equal("c.relname", request.object_str(), metadata_id);
    Ok(finish_tables(
        templates::TABLES_LOCAL,
        filter,
        type_filter(request),
        TableTypeStyle::Predicates,
    ))
}

fn tables_universal(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let single = session.is_single_database();
    let (base, scope) = if single {
        (templates::TABLES_UNIVERSAL_SINGLE, CatalogScope::Connected)
    } else {
        (templates::TABLES_UNIVERSAL_ALL, CatalogScope::Column("TABLE_CAT"))
    };
    let metadata_id = session.metadata_id();
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), scope, single)
        .like_or_equal("TABLE_SCHEM", request.schema_str(), metadata_id)
        .like_or_equal("TABLE_NAME", request.object_str(), metadata_id);
    Ok(finish_tables(base, filter, type_filter(request), TableTypeStyle::NameList))
}

fn tables_external(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .like_or_equal("TABLE_SCHEM", request.schema_str(), metadata_id)
        .like_or_equal("TABLE_NAME", request.object_str(), metadata_id);
    Ok(finish_tables(
        templates::TABLES_EXTERNAL,
        filter,
        type_filter(request),
        TableTypeStyle::NameList,
    ))
}

/// Source expressions for the eighteen columns result.
struct ColumnProjection<'a> {
    catalog: &'a str,
    schema: &'a str,
    table: &'a str,
    column: &'a str,
    type_name: String,
    source: ColumnTypeSource,
    nullable: &'a str,
    remarks: &'a str,
    column_def: &'a str,
    ordinal: &'a str,
    is_nullable: &'a str,
}

impl ColumnProjection<'_> {
    fn select(&self, odbc_version: OdbcVersion) -> String {
        let src = &self.source;
        format!(
            "SELECT {} AS TABLE_CAT, {} AS TABLE_SCHEM, {} AS TABLE_NAME, {} AS COLUMN_NAME, \
             {} AS DATA_TYPE, {} AS TYPE_NAME, {} AS COLUMN_SIZE, NULL AS BUFFER_LENGTH, \
             {} AS DECIMAL_DIGITS, {} AS NUM_PREC_RADIX, {} AS NULLABLE, {} AS REMARKS, \
             {} AS COLUMN_DEF, {} AS SQL_DATA_TYPE, {} AS SQL_DATETIME_SUB, \
             {} AS CHAR_OCTET_LENGTH, {} AS ORDINAL_POSITION, {} AS IS_NULLABLE ",
            self.catalog,
            self.schema,
            self.table,
            self.column,
            data_type_case(src, odbc_version),
            self.type_name,
            column_size_case(src),
            decimal_digits_case(src),
            radix_case(src),
            self.nullable,
            self.remarks,
            self.column_def,
            sql_data_type_case(src),
            datetime_sub_case(src),
            octet_length_case(src),
            self.ordinal,
            self.is_nullable,
        )
    }
}

const LOCAL_COLUMNS_FROM: &str = "FROM pg_catalog.pg_namespace n \
     JOIN pg_catalog.pg_class c ON (c.relnamespace = n.oid) \
     JOIN pg_catalog.pg_attribute a ON (a.attrelid = c.oid) \
     JOIN pg_catalog.pg_type t ON (a.atttypid = t.oid) \
     LEFT JOIN pg_catalog.pg_attrdef def ON (a.attrelid = def.adrelid AND a.attnum = def.adnum) \
     LEFT JOIN pg_catalog.pg_description dsc ON (c.oid = dsc.objoid AND a.attnum = dsc.objsubid) \
     LEFT JOIN pg_catalog.pg_class dc ON (dc.oid = dsc.classoid AND dc.relname = 'pg_class') \
     LEFT JOIN pg_catalog.pg_namespace dn ON (dc.relnamespace = dn.oid AND dn.nspname = 'pg_catalog') \
     WHERE a.attnum > 0 AND NOT a.attisdropped ";

const LATE_BINDING_COLUMNS_FROM: &str = "FROM (select lbv_cols.schemaname, lbv_cols.tablename, \
     lbv_cols.columnname, lbv_cols.columntype, lbv_cols.columnnum \
     from pg_get_late_binding_view_cols() lbv_cols(schemaname name, tablename name, \
     columnname name, columntype text, columnnum int)) lbv_columns WHERE true ";

fn columns_local(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let single = session.is_single_database();
    let odbc = session.odbc_version();

    let stored = ColumnProjection {
        catalog: "current_database()",
        schema: "n.nspname",
        table: "c.relname",
        column: "a.attname",
        type_name: type_name_case("t.typname"),
        source: ColumnTypeSource::pg_attribute(),
        nullable: "CASE WHEN a.attnotnull OR (t.typtype = 'd' AND t.typnotnull) THEN 0 ELSE 1 END",
        remarks: "dsc.description",
        column_def: "pg_catalog.pg_get_expr(def.adbin, def.adrelid)",
        ordinal: "a.attnum",
        is_nullable: "CASE WHEN a.attnotnull OR (t.typtype = 'd' AND t.typnotnull) THEN 'NO' ELSE 'YES' END",
    };
    let mut stored_filter = FilterClause::new();
    stored_filter
        .catalog(request.catalog_str(), CatalogScope::Connected, single)
        .like_or_equal("n.nspname", request.schema_str(), metadata_id)
        .like_or_equal("c.relname", request.object_str(), metadata_id)
        .like_or_equal("a.attname", request.column_str(), metadata_id);

    let late_source = ColumnTypeSource::declared_type("columntype");
    let late = ColumnProjection {
        catalog: "current_database()",
        schema: "schemaname",
        table: "tablename",
        column: "columnname",
        type_name: type_name_case(&late_source.type_key),
        source: late_source,
        nullable: "2",
        remarks: "NULL",
        column_def: "NULL",
        ordinal: "columnnum",
        is_nullable: "''",
    };
    let mut late_filter = FilterClause::new();
    late_filter
        .catalog(request.catalog_str(), CatalogScope::Connected, single)
        .like_or_equal("schemaname", request.schema_str(), metadata_id)
        .like_or_equal("tablename", request.object_str(), metadata_id)
        .like_or_equal("columnname", request.column_str(), metadata_id);

    Ok(QueryText::Sql(format!(
        "SELECT * FROM ({}{}{} UNION ALL {}{}{}){}",
        stored.select(odbc),
        LOCAL_COLUMNS_FROM,
        stored_filter.into_sql(),
        late.select(odbc),
        LATE_BINDING_COLUMNS_FROM,
        late_filter.into_sql(),
        order_by("TABLE_SCHEM, TABLE_NAME, ORDINAL_POSITION")
    )))
}

const INFORMATION_SCHEMA_NULLABLE: &str =
    "CASE is_nullable WHEN 'YES' THEN 1 WHEN 'NO' THEN 0 ELSE 2 END";

fn columns_universal(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let single = session.is_single_database();
    let odbc = session.odbc_version();
    let mut filter = FilterClause::new();

    let sql = if single {
        let projection = ColumnProjection {
            catalog: "current_database()",
            schema: "table_schema",
            table: "table_name",
            column: "column_name",
            type_name: format!("COALESCE(domain_name, {})", type_name_case("data_type")),
            source: ColumnTypeSource::information_schema(Some("datetime_precision")),
            nullable: INFORMATION_SCHEMA_NULLABLE,
            remarks: "remarks",
            column_def: "column_default",
            ordinal: "ordinal_position",
            is_nullable: "is_nullable",
        };
        filter
            .catalog(request.catalog_str(), CatalogScope::Connected, single)
            .like_or_equal("table_schema", request.schema_str(), metadata_id)
            .like_or_equal("table_name", request.object_str(), metadata_id)
            .like_or_equal("column_name", request.column_str(), metadata_id);
        format!(
            "{}FROM svv_columns WHERE true {}{}",
            projection.select(odbc),
            filter.into_sql(),
            order_by("table_schem, table_name, ORDINAL_POSITION")
        )
    } else {
        let projection = ColumnProjection {
            catalog: "database_name",
            schema: "schema_name",
            table: "table_name",
            column: "column_name",
            type_name: type_name_case("data_type"),
            source: ColumnTypeSource::information_schema(None),
            nullable: INFORMATION_SCHEMA_NULLABLE,
            remarks: "remarks",
            column_def: "column_default",
            ordinal: "ordinal_position",
            is_nullable: "is_nullable",
        };
        filter
            .catalog(request.catalog_str(), CatalogScope::Column("database_name"), single)
            .like_or_equal("schema_name", request.schema_str(), metadata_id)
            .like_or_equal("table_name", request.object_str(), metadata_id)
            .like_or_equal("column_name", request.column_str(), metadata_id);
        format!(
            "{}FROM PG_CATALOG.svv_all_columns WHERE true {}{}",
            projection.select(odbc),
            filter.into_sql(),
            order_by("TABLE_CAT, TABLE_SCHEM, TABLE_NAME, ORDINAL_POSITION")
        )
    };
    Ok(QueryText::Sql(sql))
}

fn columns_external(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let source = ColumnTypeSource::declared_type("external_type");
    let projection = ColumnProjection {
        catalog: "current_database()",
        schema: "schemaname",
        table: "tablename",
        column: "columnname",
        type_name: type_name_case(&source.type_key),
        source,
        nullable: "CASE is_nullable WHEN 'true' THEN 1 WHEN 'false' THEN 0 ELSE 2 END",
        remarks: "NULL",
        column_def: "NULL",
        ordinal: "columnnum",
        is_nullable: "CASE is_nullable WHEN 'true' THEN 'YES' WHEN 'false' THEN 'NO' ELSE '' END",
    };
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .like_or_equal("schemaname", request.schema_str(), metadata_id)
        .like_or_equal("tablename", request.object_str(), metadata_id)
        .like_or_equal("columnname", request.column_str(), metadata_id);
    Ok(QueryText::Sql(format!(
        "{}FROM svv_external_columns WHERE true {}{}",
        projection.select(session.odbc_version()),
        filter.into_sql(),
        order_by("table_schem, table_name, ORDINAL_POSITION")
    )))
}

fn null_table_error() -> crate::error::Error {
    RedshiftErrorHelper::invalid_argument()
        .message("Invalid use of null pointer")
        .sqlstate(SQLSTATE_NULL_POINTER)
}

fn statistics(request: &CatalogRequest, _session: &SessionConfig) -> Result<QueryText> {
    if request.object.is_none() {
        return Err(null_table_error());
    }
    Ok(QueryText::Sql(templates::STATISTICS_NO_RESULT.to_string()))
}

fn special_columns(request: &CatalogRequest, _session: &SessionConfig) -> Result<QueryText> {
    if request.object.is_none() {
        return Err(null_table_error());
    }
    let kind = IdentifierType::from_code(request.identifier_type).ok_or_else(|| {
        RedshiftErrorHelper::invalid_argument()
            .message("An invalid IdentifierType value was specified")
            .sqlstate(SQLSTATE_INVALID_IDENTIFIER_TYPE)
    })?;
    let schema = request.schema_str();
    let table = request.object_str();
    let relation = || {
        let mut filter = FilterClause::new();
        filter.equal("n.nspname", schema).equal("c.relname", table);
        filter.into_sql()
    };

    let sql = match kind {
        IdentifierType::BestRowId => {
            let mut key_filter = FilterClause::new();
            if request.nullable == SQL_NO_NULLS {
                key_filter.equal("a.attnotnull", "t");
            }
            format!(
                "{}{}{}{}{}{}{}{}",
                templates::ROWID_PART_1,
                relation(),
                templates::ROWID_PART_2,
                key_filter.into_sql(),
                templates::ROWID_PART_3,
                relation(),
                templates::ROWID_PART_4,
                order_by("SCOPE")
            )
        }
        IdentifierType::RowVer => format!(
            "{}{}{}{}{}",
            templates::ROWVER_PART_1,
            relation(),
            templates::ROWVER_PART_2,
            relation(),
            order_by("SCOPE")
        ),
    };
    Ok(QueryText::Sql(sql))
}

fn primary_keys(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .equal("n.nspname", request.schema_str())
        .equal("ct.relname", request.object_str());
    Ok(QueryText::Sql(format!(
        "{}{}{}",
        templates::PRIMARY_KEYS,
        filter.into_sql(),
        order_by("TABLE_SCHEM,TABLE_NAME,KEY_SEQ")
    )))
}

fn foreign_keys(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let single = session.is_single_database();
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, single)
        .equal("n.nspname", request.schema_str())
        .equal("c.relname", request.object_str())
        .catalog(
            request.fk_catalog.as_deref().unwrap_or(""),
            CatalogScope::Connected,
            single,
        )
        .equal("fn.nspname", request.fk_schema.as_deref().unwrap_or(""))
        .equal("fc.relname", request.fk_table.as_deref().unwrap_or(""));
    Ok(QueryText::Sql(format!(
        "{}{}{}",
        templates::FOREIGN_KEYS,
        filter.into_sql(),
        order_by("FKTABLE_SCHEM,FKTABLE_NAME,KEY_SEQ")
    )))
}

fn table_privileges(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .like_or_equal("n.nspname", request.schema_str(), metadata_id)
        .like_or_equal("c.relname", request.object_str(), metadata_id);
    Ok(QueryText::Sql(format!(
        "{}{}{}",
        templates::table_privileges(),
        filter.into_sql(),
        order_by("TABLE_SCHEM,TABLE_NAME,PRIVILEGE")
    )))
}

fn column_privileges(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    if request.object.is_none() {
        return Err(null_table_error());
    }
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .equal("n.nspname", request.schema_str())
        .equal("c.relname", request.object_str())
        .like_or_equal("a.attname", request.column_str(), session.metadata_id());
    Ok(QueryText::Sql(format!(
        "{}{}{}",
        templates::column_privileges(),
        filter.into_sql(),
        order_by("TABLE_SCHEM,TABLE_NAME,COLUMN_NAME,PRIVILEGE")
    )))
}

fn procedures(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .like_or_equal("n.nspname", request.schema_str(), metadata_id);
    if request.schema_str().is_empty() {
        filter.raw(templates::PROCEDURES_VISIBLE);
    }
    filter.like_or_equal("p.proname", request.object_str(), metadata_id);
    Ok(QueryText::Sql(format!(
        "{}{}{}",
        templates::PROCEDURES,
        filter.into_sql(),
        order_by("PROCEDURE_SCHEM,PROCEDURE_NAME")
    )))
}

fn procedure_columns(request: &CatalogRequest, session: &SessionConfig) -> Result<QueryText> {
    let metadata_id = session.metadata_id();
    let src = ColumnTypeSource::declared_type("PARAM_TYPE");
    let projection = format!(
        "SELECT PROCEDURE_CAT, PROCEDURE_SCHEM, PROCEDURE_NAME, COLUMN_NAME, \
         CAST(COLUMN_TYPE AS SMALLINT) AS COLUMN_TYPE, {} AS DATA_TYPE, {} AS TYPE_NAME, \
         {} AS COLUMN_SIZE, NULL AS BUFFER_LENGTH, {} AS DECIMAL_DIGITS, {} AS NUM_PREC_RADIX, \
         CAST(2 AS SMALLINT) AS NULLABLE, NULL AS REMARKS, NULL AS COLUMN_DEF, \
         {} AS SQL_DATA_TYPE, {} AS SQL_DATETIME_SUB, {} AS CHAR_OCTET_LENGTH, \
         ORDINAL_POSITION, '' AS IS_NULLABLE ",
        data_type_case(&src, session.odbc_version()),
        type_name_case(&src.type_key),
        column_size_case(&src),
        decimal_digits_case(&src),
        radix_case(&src),
        sql_data_type_case(&src),
        datetime_sub_case(&src),
        octet_length_case(&src),
    );
    let mut filter = FilterClause::new();
    filter
        .catalog(request.catalog_str(), CatalogScope::Connected, session.is_single_database())
        .like_or_equal("PROCEDURE_SCHEM", request.schema_str(), metadata_id)
        .like_or_equal("PROCEDURE_NAME", request.object_str(), metadata_id)
        .like_or_equal("COLUMN_NAME", request.column_str(), metadata_id);
    Ok(QueryText::Sql(format!(
        "{}FROM ({}) params WHERE true {}{}",
        projection,
        templates::PROCEDURE_PARAMETERS,
        filter.into_sql(),
        order_by("PROCEDURE_SCHEM,PROCEDURE_NAME,ORDINAL_POSITION")
    )))
}

fn type_info(request: &CatalogRequest, _session: &SessionConfig) -> Result<QueryText> {
    type_info_query(request.data_type).map(QueryText::Sql)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SQLSTATE_INVALID_DATA_TYPE};

    fn sql(query: QueryText) -> String {
        match query {
            QueryText::Sql(sql) => sql,
            QueryText::Empty => panic!("expected a statement"),
        }
    }

    fn build_sql(
        operation: CatalogOperation,
        strategy: Option<SchemaStrategy>,
        request: &CatalogRequest,
        session: &SessionConfig,
    ) -> String {
        sql(build(operation, strategy, request, session).unwrap())
    }

    #[test]
    fn test_every_operation_has_a_route() {
        let operations = [
            CatalogOperation::Tables,
            CatalogOperation::Columns,
            CatalogOperation::Statistics,
            CatalogOperation::SpecialColumns,
            CatalogOperation::PrimaryKeys,
            CatalogOperation::ForeignKeys,
            CatalogOperation::TablePrivileges,
            CatalogOperation::ColumnPrivileges,
            CatalogOperation::Procedures,
            CatalogOperation::ProcedureColumns,
            CatalogOperation::TypeInfo,
        ];
        let request = CatalogRequest::new().with_object("t");
        let session = SessionConfig::new();
        for op in operations {
            assert!(build(op, None, &request, &session).is_ok(), "{}", op);
        }
    }

    #[test]
    fn test_local_tables_with_pattern_and_types() {
        let request = CatalogRequest::new()
            .with_catalog("dev")
            .with_schema("sales")
            .with_object("cust%")
            .with_table_types("TABLE,VIEW");
        let sql = build_sql(
            CatalogOperation::Tables,
            Some(SchemaStrategy::Local),
            &request,
            &SessionConfig::new(),
        );
        assert!(sql.starts_with(templates::TABLES_LOCAL));
        assert!(sql.contains(" AND current_database() LIKE  'dev' "));
        assert!(sql.contains(" AND n.nspname LIKE 'sales' "));
        assert!(sql.contains(" AND c.relname LIKE 'cust%' "));
        assert!(sql.contains(" AND (false  OR ( c.relkind = 'r'"));
        assert!(sql.ends_with(" ORDER BY TABLE_TYPE,TABLE_SCHEM,TABLE_NAME "));
    }

    #[test]
    fn test_metadata_id_uses_equality() {
        let request = CatalogRequest::new().with_schema("my_schema").with_object("t_1");
        let session = SessionConfig::new().with_metadata_id(true);
        let sql = build_sql(
            CatalogOperation::Tables,
            Some(SchemaStrategy::External),
            &request,
            &session,
        );
        assert!(sql.contains(" AND TABLE_SCHEM = 'my_schema' "));
        assert!(sql.contains(" AND TABLE_NAME = 't_1' "));
    }

    #[test]
    fn test_universal_tables_multi_database_scopes_by_column() {
        let session = SessionConfig::new()
            .with_datashare_enabled(true)
            .with_current_db_only(false);
        let request = CatalogRequest::new()
            .with_catalog("shared_db")
            .with_table_types("'VIEW'");
        let sql = build_sql(CatalogOperation::Tables, None, &request, &session);
        assert!(sql.starts_with(templates::TABLES_UNIVERSAL_ALL));
        assert!(sql.contains(" AND TABLE_CAT = 'shared_db' "));
        assert!(sql.contains(" AND TABLE_TYPE IN ( 'VIEW' ) "));
    }

    #[test]
    fn test_unrecognized_table_types_are_empty() {
        let request = CatalogRequest::new().with_table_types("SYNONYM");
        for strategy in [
            SchemaStrategy::Local,
            SchemaStrategy::Universal,
            SchemaStrategy::External,
        ] {
            let query = build(
                CatalogOperation::Tables,
                Some(strategy),
                &request,
                &SessionConfig::new(),
            )
            .unwrap();
            assert_eq!(query, QueryText::Empty);
        }
    }

    #[test]
    fn test_escaped_values_in_filters() {
        let request = CatalogRequest::new().with_schema("o'brien");
        let sql = build_sql(
            CatalogOperation::Tables,
            Some(SchemaStrategy::Universal),
            &request,
            &SessionConfig::new(),
        );
        assert!(sql.contains("TABLE_SCHEM LIKE 'o''brien'"));
    }

    #[test]
    fn test_short_circuits() {
        let session = SessionConfig::new();
        let catalogs = CatalogRequest::new().with_catalog("%");
        assert_eq!(
            short_circuit(&catalogs, &session).as_deref(),
            Some(templates::ALL_CATALOGS)
        );

        let schemas = CatalogRequest::new().with_schema("%");
        let multi = SessionConfig::new()
            .with_datashare_enabled(true)
            .with_current_db_only(false);
        assert_eq!(
            short_circuit(&schemas, &multi).as_deref(),
            Some(templates::ALL_SCHEMAS_DATASHARE)
        );

        let types = short_circuit(&CatalogRequest::new().with_table_types("%"), &session).unwrap();
        for t in TableType::ALL {
            assert!(types.contains(&format!("'{}' as TABLE_TYPE", t.name())));
        }
        assert_eq!(types.matches(" UNION ").count(), 6);
        assert!(types.ends_with(" ORDER BY TABLE_TYPE "));

        let not_alone = CatalogRequest::new().with_catalog("%").with_schema("public");
        assert!(short_circuit(&not_alone, &session).is_none());
    }

    #[test]
    fn test_short_circuits_require_empty_table_types() {
        let session = SessionConfig::new();
        let catalogs = CatalogRequest::new().with_catalog("%").with_table_types("TABLE");
        assert!(short_circuit(&catalogs, &session).is_none());

        let schemas = CatalogRequest::new().with_schema("%").with_table_types("VIEW");
        assert!(short_circuit(&schemas, &session).is_none());
    }

    #[test]
    fn test_local_columns_union_late_binding_views() {
        let request = CatalogRequest::new()
            .with_schema("public")
            .with_object("orders")
            .with_column("id");
        let sql = build_sql(
            CatalogOperation::Columns,
            Some(SchemaStrategy::Local),
            &request,
            &SessionConfig::new(),
        );
        assert!(sql.starts_with("SELECT * FROM (SELECT current_database() AS TABLE_CAT"));
        assert!(sql.contains(" AND a.attname LIKE 'id' "));
        assert!(sql.contains(" UNION ALL "));
        assert!(sql.contains("pg_get_late_binding_view_cols()"));
        assert!(sql.contains(" AND columnname LIKE 'id' "));
        assert!(sql.ends_with(" ORDER BY TABLE_SCHEM, TABLE_NAME, ORDINAL_POSITION "));
    }

    #[test]
    fn test_columns_project_eighteen_columns() {
        let request = CatalogRequest::new().with_schema("ext");
        let sql = build_sql(
            CatalogOperation::Columns,
            Some(SchemaStrategy::External),
            &request,
            &SessionConfig::new(),
        );
        let aliases = [
            "TABLE_CAT", "TABLE_SCHEM", "TABLE_NAME", "COLUMN_NAME", "DATA_TYPE", "TYPE_NAME",
            "COLUMN_SIZE", "BUFFER_LENGTH", "DECIMAL_DIGITS", "NUM_PREC_RADIX", "NULLABLE",
            "REMARKS", "COLUMN_DEF", "SQL_DATA_TYPE", "SQL_DATETIME_SUB", "CHAR_OCTET_LENGTH",
            "ORDINAL_POSITION", "IS_NULLABLE",
        ];
        for alias in aliases {
            assert!(sql.contains(&format!(" AS {}", alias)), "{}", alias);
        }
        assert!(sql.contains("FROM svv_external_columns WHERE true "));
    }

    #[test]
    fn test_universal_columns_multi_database_is_not_connected_scoped() {
        let session = SessionConfig::new()
            .with_datashare_enabled(true)
            .with_current_db_only(false);
        let request = CatalogRequest::new().with_catalog("other");
        let sql = build_sql(CatalogOperation::Columns, None, &request, &session);
        assert!(sql.contains("FROM PG_CATALOG.svv_all_columns"));
        assert!(sql.contains(" AND database_name = 'other' "));
        assert!(!sql.contains("current_database() LIKE"));
    }

    #[test]
    fn test_odbc2_columns_report_odbc2_datetime_codes() {
        let request = CatalogRequest::new();
        let v2 = SessionConfig::new().with_odbc_version(OdbcVersion::V2);
        let sql = build_sql(CatalogOperation::Columns, None, &request, &v2);
        assert!(sql.contains("THEN 9 "));
        assert!(!sql.contains("THEN 91 "));
    }

    #[test]
    fn test_primary_keys_use_equality() {
        let request = CatalogRequest::new().with_schema("s_1").with_object("orders");
        let sql = build_sql(CatalogOperation::PrimaryKeys, None, &request, &SessionConfig::new());
        assert!(sql.contains(" AND n.nspname = 's_1' "));
        assert!(sql.contains(" AND ct.relname = 'orders' "));
        assert!(sql.ends_with(" ORDER BY TABLE_SCHEM,TABLE_NAME,KEY_SEQ "));
    }

    #[test]
    fn test_foreign_keys_filter_both_sides() {
        let request = CatalogRequest::new()
            .with_schema("public")
            .with_object("customers")
            .with_foreign_table(None, Some("sales"), Some("orders"));
        let sql = build_sql(CatalogOperation::ForeignKeys, None, &request, &SessionConfig::new());
        assert!(sql.contains(" AND c.relname = 'customers' "));
        assert!(sql.contains(" AND fn.nspname = 'sales' "));
        assert!(sql.contains(" AND fc.relname = 'orders' "));
        assert!(sql.ends_with(" ORDER BY FKTABLE_SCHEM,FKTABLE_NAME,KEY_SEQ "));
    }

    #[test]
    fn test_procedures_visibility_without_schema() {
        let session = SessionConfig::new();
        let any = build_sql(CatalogOperation::Procedures, None, &CatalogRequest::new(), &session);
        assert!(any.contains("pg_function_is_visible(p.prooid)"));

        let scoped = build_sql(
            CatalogOperation::Procedures,
            None,
            &CatalogRequest::new().with_schema("etl").with_object("load%"),
            &session,
        );
        assert!(!scoped.contains("pg_function_is_visible"));
        assert!(scoped.contains(" AND p.proname LIKE 'load%' "));
    }

    #[test]
    fn test_procedure_columns_shape() {
        let request = CatalogRequest::new().with_object("refresh").with_column("%");
        let sql = build_sql(
            CatalogOperation::ProcedureColumns,
            None,
            &request,
            &SessionConfig::new(),
        );
        assert!(sql.contains(") params WHERE true "));
        assert!(sql.contains(" AND PROCEDURE_NAME LIKE 'refresh' "));
        assert!(sql.ends_with(" ORDER BY PROCEDURE_SCHEM,PROCEDURE_NAME,ORDINAL_POSITION "));
    }

    #[test]
    fn test_special_columns_best_row_id() {
        let request = CatalogRequest::new()
            .with_schema("public")
            .with_object("orders")
            .with_nullable(SQL_NO_NULLS);
        let sql = build_sql(CatalogOperation::SpecialColumns, None, &request, &SessionConfig::new());
        assert_eq!(sql.matches(" AND c.relname = 'orders' ").count(), 2);
        assert!(sql.contains(" AND a.attnotnull = 't' "));
        assert!(sql.ends_with(" ORDER BY SCOPE "));
    }

    #[test]
    fn test_special_columns_row_version() {
        let request = CatalogRequest::new()
            .with_object("orders")
            .with_identifier_type(IdentifierType::RowVer.code());
        let sql = build_sql(CatalogOperation::SpecialColumns, None, &request, &SessionConfig::new());
        assert!(sql.starts_with(templates::ROWVER_PART_1));
        assert!(sql.contains("'oid'"));
    }

    #[test]
    fn test_special_columns_errors() {
        let session = SessionConfig::new();
        let bad_kind = CatalogRequest::new().with_object("t").with_identifier_type(3);
        let err = build(CatalogOperation::SpecialColumns, None, &bad_kind, &session).unwrap_err();
        assert_eq!(err.get_sqlstate(), Some(SQLSTATE_INVALID_IDENTIFIER_TYPE));

        let no_table = CatalogRequest::new().with_identifier_type(3);
        let err = build(CatalogOperation::SpecialColumns, None, &no_table, &session).unwrap_err();
        assert_eq!(err.get_sqlstate(), Some(SQLSTATE_NULL_POINTER));
        assert_eq!(err.kind(), ErrorKind::InvalidArguments);
    }

    #[test]
    fn test_table_is_required() {
        let session = SessionConfig::new();
        for op in [CatalogOperation::Statistics, CatalogOperation::ColumnPrivileges] {
            let err = build(op, None, &CatalogRequest::new(), &session).unwrap_err();
            assert_eq!(err.get_sqlstate(), Some(SQLSTATE_NULL_POINTER));
        }
        let sql = build_sql(
            CatalogOperation::Statistics,
            None,
            &CatalogRequest::new().with_object(""),
            &session,
        );
        assert_eq!(sql, templates::STATISTICS_NO_RESULT);
    }

    #[test]
    fn test_privileges_filters() {
        let session = SessionConfig::new();
        let table = build_sql(
            CatalogOperation::TablePrivileges,
            None,
            &CatalogRequest::new().with_schema("pub%"),
            &session,
        );
        assert!(table.contains(" AND n.nspname LIKE 'pub%' "));
        assert!(table.ends_with(" ORDER BY TABLE_SCHEM,TABLE_NAME,PRIVILEGE "));

        let column = build_sql(
            CatalogOperation::ColumnPrivileges,
            None,
            &CatalogRequest::new()
                .with_schema("public")
                .with_object("orders")
                .with_column("amount%"),
            &session,
        );
        assert!(column.contains(" AND n.nspname = 'public' "));
        assert!(column.contains(" AND a.attname LIKE 'amount%' "));
    }

    #[test]
    fn test_type_info_rejects_unknown_code() {
        let session = SessionConfig::new();
        let all = build_sql(CatalogOperation::TypeInfo, None, &CatalogRequest::new(), &session);
        assert_eq!(all.matches(" UNION SELECT ").count(), 20);

        let err = build(
            CatalogOperation::TypeInfo,
            None,
            &CatalogRequest::new().with_data_type(999),
            &session,
        )
        .unwrap_err();
        assert_eq!(err.get_sqlstate(), Some(SQLSTATE_INVALID_DATA_TYPE));
    }
}
