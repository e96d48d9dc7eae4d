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

//! End-to-end tests of the catalog entry points.
//!
//! Each test scripts the backend with a recording [`MockClient`] and checks
//! both the statements issued and the shape of the result.

use super::mock::{catalog as open_catalog, collect, one_row, strings, utf8_batch, MockClient};
use arrow_array::cast::AsArray;
use arrow_array::types::{Int16Type, Int32Type};
use arrow_schema::DataType;
use redshift_metadata::{CatalogRequest, Error, ErrorKind, Result, SessionConfig};
use std::sync::Arc;

const PROBE: &str = "svv_external_schemas";
const LOCAL_TABLES: &str = "FROM pg_namespace n, pg_class c";

fn single_database() -> SessionConfig {
    SessionConfig::new().with_database("dev")
}

fn multi_database() -> SessionConfig {
    SessionConfig::new()
        .with_database("dev")
        .with_datashare_enabled(true)
        .with_current_db_only(false)
}

fn failure<T>(result: Result<T>) -> Error {
    match result {
        Ok(_) => panic!("expected the request to fail"),
        Err(err) => err,
    }
}

fn tables_reply(rows: &[(&str, &str, &str)]) -> arrow_array::RecordBatch {
    utf8_batch(&[
        ("table_cat", rows.iter().map(|_| Some("dev")).collect()),
        ("table_schem", rows.iter().map(|r| Some(r.0)).collect()),
        ("table_name", rows.iter().map(|r| Some(r.1)).collect()),
        ("table_type", rows.iter().map(|r| Some(r.2)).collect()),
        ("remarks", rows.iter().map(|_| None::<&str>).collect()),
    ])
}

#[test]
fn test_tables_local_strategy_in_single_database_session() {
    let client = Arc::new(MockClient::new().on(
        LOCAL_TABLES,
        tables_reply(&[("public", "orders", "TABLE"), ("public", "recent", "VIEW")]),
    ));
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let batches = collect(
        catalog
            .tables(
                &CatalogRequest::new()
                    .with_catalog("dev")
                    .with_schema("public")
                    .with_object("")
                    .with_table_types("TABLE,VIEW"),
            )
            .unwrap(),
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0],
        "select 1 from svv_external_schemas where schemaname like 'public'"
    );
    let sql = &calls[1];
    assert!(sql.contains(LOCAL_TABLES));
    assert!(sql.contains(" AND current_database() LIKE  'dev' "));
    assert!(sql.contains(" AND n.nspname LIKE 'public' "));
    assert!(!sql.contains("c.relname LIKE"));
    assert!(sql.contains("c.relkind = 'r' AND n.nspname !~ '^pg_'"));
    assert!(sql.contains("c.relkind = 'v' AND n.nspname <> 'pg_catalog'"));
    assert!(!sql.contains("c.relkind = 'r' AND n.nspname = 'pg_toast'"));
    assert!(sql.ends_with(" ORDER BY TABLE_TYPE,TABLE_SCHEM,TABLE_NAME "));

    assert_eq!(batches[0].schema().field(0).name(), "TABLE_CAT");
    assert_eq!(strings(&batches, "TABLE_NAME"), vec!["orders", "recent"]);
}

#[test]
fn test_tables_universal_strategy_in_multi_database_session() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), multi_database());

    let batches = collect(
        catalog
            .tables(
                &CatalogRequest::new()
                    .with_catalog("dev")
                    .with_schema("public")
                    .with_table_types("TABLE,VIEW"),
            )
            .unwrap(),
    );

    let calls = client.calls();
    assert_eq!(calls.len(), 1, "no probe in a multi-database session");
    let sql = &calls[0];
    assert!(sql.contains("PG_CATALOG.SVV_ALL_TABLES"));
    assert!(sql.contains(" AND TABLE_CAT = 'dev' "));
    assert!(!sql.contains("current_database() LIKE"));
    assert!(sql.contains(" AND TABLE_TYPE IN ( 'TABLE', 'VIEW' ) "));

    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].num_rows(), 0);
    assert_eq!(batches[0].num_columns(), 5);
}

#[test]
fn test_columns_server_api_with_table_pattern() {
    let client = Arc::new(
        MockClient::new()
            .on(
                "SHOW TABLES",
                utf8_batch(&[
                    ("database_name", vec![Some("dev"), Some("dev")]),
                    ("schema_name", vec![Some("public"), Some("public")]),
                    ("table_name", vec![Some("customers"), Some("cust_notes")]),
                    ("table_type", vec![Some("TABLE"), Some("TABLE")]),
                ]),
            )
            .on(
                "\"customers\"",
                utf8_batch(&[
                    ("database_name", vec![Some("dev"), Some("dev")]),
                    ("schema_name", vec![Some("public"), Some("public")]),
                    ("table_name", vec![Some("customers"), Some("customers")]),
                    ("column_name", vec![Some("name"), Some("id")]),
                    ("ordinal_position", vec![Some("2"), Some("1")]),
                    ("is_nullable", vec![Some("YES"), Some("NO")]),
                    ("data_type", vec![Some("character varying"), Some("integer")]),
                    ("character_maximum_length", vec![Some("64"), None]),
                ]),
            )
            .on(
                "\"cust_notes\"",
                utf8_batch(&[
                    ("database_name", vec![Some("dev")]),
                    ("schema_name", vec![Some("public")]),
                    ("table_name", vec![Some("cust_notes")]),
                    ("column_name", vec![Some("body")]),
                    ("ordinal_position", vec![Some("1")]),
                    ("is_nullable", vec![Some("YES")]),
                    ("data_type", vec![Some("super")]),
                ]),
            ),
    );
    let (catalog, _rt) = open_catalog(client.clone(), single_database().with_server_api(true));

    let batches = collect(
        catalog
            .columns(
                &CatalogRequest::new()
                    .with_catalog("dev")
                    .with_schema("public")
                    .with_object("cust%"),
            )
            .unwrap(),
    );

    assert_eq!(
        client.calls(),
        vec![
            "SHOW TABLES FROM SCHEMA \"dev\".\"public\" LIKE 'cust%';".to_string(),
            "SHOW COLUMNS FROM TABLE \"dev\".\"public\".\"customers\";".to_string(),
            "SHOW COLUMNS FROM TABLE \"dev\".\"public\".\"cust_notes\";".to_string(),
        ]
    );

    let batch = &batches[0];
    assert_eq!(batch.num_columns(), 18);
    assert_eq!(strings(&batches, "TABLE_NAME"), vec!["cust_notes", "customers", "customers"]);
    assert_eq!(strings(&batches, "COLUMN_NAME"), vec!["body", "id", "name"]);

    let data_type = batch.column(4).as_primitive::<Int16Type>();
    assert_eq!(data_type.value(0), -1);
    assert_eq!(data_type.value(1), 4);
    assert_eq!(data_type.value(2), 12);
    let size = batch.column(6).as_primitive::<Int32Type>();
    assert_eq!(size.value(2), 64);
    let nullable = batch.column(10).as_primitive::<Int16Type>();
    assert_eq!(nullable.value(1), 0);
    assert_eq!(nullable.value(2), 1);
}

#[test]
fn test_type_info_unknown_code_makes_no_call() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let err = failure(catalog.type_info(&CatalogRequest::new().with_data_type(1234)));
    assert_eq!(err.get_sqlstate(), Some("HY004"));
    assert!(client.calls().is_empty());
}

#[test]
fn test_type_info_all_types() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    catalog.type_info(&CatalogRequest::new()).unwrap();
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].matches(" UNION SELECT ").count(), 20);
}

#[test]
fn test_special_columns_invalid_identifier_type_makes_no_call() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let err = failure(
        catalog.special_columns(
            &CatalogRequest::new()
                .with_schema("public")
                .with_object("orders")
                .with_identifier_type(3),
        ),
    );
    assert_eq!(err.kind(), ErrorKind::InvalidArguments);
    assert_eq!(err.get_sqlstate(), Some("HY097"));
    assert_eq!(err.to_string(), "An invalid IdentifierType value was specified");
    assert!(client.calls().is_empty());
}

#[test]
fn test_special_columns_row_version() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let batches = collect(
        catalog
            .special_columns(
                &CatalogRequest::new()
                    .with_schema("public")
                    .with_object("orders")
                    .with_identifier_type(2),
            )
            .unwrap(),
    );
    assert_eq!(batches[0].num_columns(), 8);
    let calls = client.calls();
    assert!(calls[0].contains("'xmin' as COLUMN_NAME"));
    assert!(calls[0].contains(" AND c.relname = 'orders' "));
}

#[test]
fn test_schema_probe_selects_external_or_local() {
    let client = Arc::new(MockClient::new().on(PROBE, one_row()));
    let (catalog, _rt) = open_catalog(client.clone(), single_database());
    let request = CatalogRequest::new().with_schema("ext_%");

    catalog.tables(&request).unwrap();
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[0].contains("where schemaname like 'ext_%'"));
    assert!(calls[1].contains("FROM svv_external_tables"));

    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());
    catalog.tables(&request).unwrap();
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].contains(LOCAL_TABLES));
}

#[test]
fn test_probe_failure_falls_back_to_local() {
    let client = Arc::new(MockClient::new().fail(PROBE, "relation does not exist"));
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    catalog
        .columns(&CatalogRequest::new().with_schema("sales"))
        .unwrap();
    let calls = client.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls[1].contains("pg_get_late_binding_view_cols()"));
}

#[test]
fn test_probe_escapes_quotes() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    catalog
        .tables(&CatalogRequest::new().with_schema("o'brien"))
        .unwrap();
    let calls = client.calls();
    assert!(calls[0].ends_with("like 'o''brien'"));
    assert!(calls[1].contains(" AND n.nspname LIKE 'o''brien' "));
}

#[test]
fn test_unrecognized_table_types_make_no_call() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let batches = collect(
        catalog
            .tables(&CatalogRequest::new().with_schema("public").with_table_types("SYNONYM"))
            .unwrap(),
    );
    assert!(client.calls().is_empty());
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].num_rows(), 0);
    assert_eq!(batches[0].num_columns(), 5);
}

#[test]
fn test_exact_names_issue_one_show_columns() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), multi_database().with_server_api(true));

    catalog
        .columns(
            &CatalogRequest::new()
                .with_catalog("dev")
                .with_schema("public")
                .with_object("orders"),
        )
        .unwrap();
    assert_eq!(
        client.calls(),
        vec!["SHOW COLUMNS FROM TABLE \"dev\".\"public\".\"orders\";".to_string()]
    );
}

#[test]
fn test_fan_out_failure_reports_operation_and_phase() {
    let client = Arc::new(MockClient::new().fail("SHOW TABLES", "permission denied for schema"));
    let (catalog, _rt) = open_catalog(client.clone(), multi_database().with_server_api(true));

    let err = failure(
        catalog.columns(
            &CatalogRequest::new()
                .with_catalog("dev")
                .with_schema("public")
                .with_object("ord%"),
        ),
    );
    assert_eq!(
        err.to_string(),
        "list_tables: Error in SHOW TABLES: permission denied for schema"
    );
    assert_eq!(err.get_sqlstate(), Some("HY000"));
    assert_eq!(client.calls().len(), 1);
}

#[test]
fn test_server_api_tables_filter_types() {
    let client = Arc::new(MockClient::new().on(
        "SHOW TABLES",
        utf8_batch(&[
            ("database_name", vec![Some("dev"), Some("dev")]),
            ("schema_name", vec![Some("public"), Some("public")]),
            ("table_name", vec![Some("orders"), Some("recent")]),
            ("table_type", vec![Some("TABLE"), Some("VIEW")]),
        ]),
    ));
    let (catalog, _rt) = open_catalog(client.clone(), single_database().with_server_api(true));

    let batches = collect(
        catalog
            .tables(
                &CatalogRequest::new()
                    .with_catalog("dev")
                    .with_schema("public")
                    .with_table_types("'VIEW'"),
            )
            .unwrap(),
    );
    assert_eq!(strings(&batches, "TABLE_NAME"), vec!["recent"]);
}

#[test]
fn test_server_api_tables_external_table_type() {
    let client = Arc::new(MockClient::new().on(
        "SHOW TABLES",
        utf8_batch(&[
            ("database_name", vec![Some("dev"), Some("dev")]),
            ("schema_name", vec![Some("spectrum"), Some("spectrum")]),
            ("table_name", vec![Some("ext_sales"), Some("local_sales")]),
            ("table_type", vec![Some("EXTERNAL TABLE"), Some("TABLE")]),
        ]),
    ));
    let (catalog, _rt) = open_catalog(client.clone(), single_database().with_server_api(true));
    let request = CatalogRequest::new().with_catalog("dev").with_schema("spectrum");

    let external = collect(
        catalog
            .tables(&request.clone().with_table_types("EXTERNAL TABLE"))
            .unwrap(),
    );
    assert_eq!(strings(&external, "TABLE_NAME"), vec!["ext_sales"]);
    assert_eq!(strings(&external, "TABLE_TYPE"), vec!["EXTERNAL TABLE"]);

    let tables = collect(catalog.tables(&request.with_table_types("'TABLE'")).unwrap());
    assert_eq!(strings(&tables, "TABLE_NAME"), vec!["local_sales"]);
    assert_eq!(client.calls().len(), 2);
}

#[test]
fn test_catalogs_short_circuit() {
    let client = Arc::new(MockClient::new().on(
        "SVV_REDSHIFT_DATABASES",
        utf8_batch(&[
            ("table_cat", vec![Some("dev"), Some("share")]),
            ("table_schem", vec![None, None]),
            ("table_name", vec![None, None]),
            ("table_type", vec![None, None]),
            ("remarks", vec![None, None]),
        ]),
    ));
    let (catalog, _rt) = open_catalog(client.clone(), multi_database());

    let batches = collect(catalog.catalogs().unwrap());
    assert_eq!(client.calls().len(), 1, "short-circuit skips the probe");
    assert_eq!(strings(&batches, "TABLE_CAT"), vec!["dev", "share"]);
}

#[test]
fn test_catalogs_server_api_single_database() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database().with_server_api(true));

    let batches = collect(catalog.catalogs().unwrap());
    assert!(client.calls().is_empty());
    assert_eq!(strings(&batches, "TABLE_CAT"), vec!["dev"]);
}

#[test]
fn test_table_types() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database().with_server_api(true));
    let batches = collect(catalog.table_types().unwrap());
    assert!(client.calls().is_empty());
    assert_eq!(
        strings(&batches, "TABLE_TYPE"),
        vec![
            "EXTERNAL TABLE",
            "SYSTEM TABLE",
            "SYSTEM VIEW",
            "TABLE",
            "TEMPORARY TABLE",
            "TEMPORARY VIEW",
            "VIEW",
        ]
    );

    let (catalog, _rt) = open_catalog(client.clone(), single_database());
    catalog.table_types().unwrap();
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].matches(" UNION ").count(), 6);
    assert!(calls[0].contains("'SYSTEM TOAST TABLE' as TABLE_TYPE"));
}

#[test]
fn test_statistics_requires_table() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let err = failure(catalog.statistics(&CatalogRequest::new().with_schema("public")));
    assert_eq!(err.get_sqlstate(), Some("HY009"));
    assert!(client.calls().is_empty());

    let batches = collect(
        catalog
            .statistics(&CatalogRequest::new().with_object("orders"))
            .unwrap(),
    );
    assert_eq!(client.calls().len(), 1);
    assert_eq!(batches[0].num_rows(), 0);
    assert_eq!(batches[0].num_columns(), 13);
}

#[test]
fn test_primary_keys_result_is_conformed() {
    let reply = {
        use arrow_array::{ArrayRef, Int32Array, RecordBatch, StringArray};
        use arrow_schema::{Field, Schema};
        let schema = Schema::new(vec![
            Field::new("table_cat", DataType::Utf8, true),
            Field::new("table_schem", DataType::Utf8, true),
            Field::new("table_name", DataType::Utf8, true),
            Field::new("column_name", DataType::Utf8, true),
            Field::new("key_seq", DataType::Int32, true),
            Field::new("pk_name", DataType::Utf8, true),
        ]);
        let arrays: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["dev"])),
            Arc::new(StringArray::from(vec!["public"])),
            Arc::new(StringArray::from(vec!["orders"])),
            Arc::new(StringArray::from(vec!["id"])),
            Arc::new(Int32Array::from(vec![1])),
            Arc::new(StringArray::from(vec!["orders_pkey"])),
        ];
        RecordBatch::try_new(Arc::new(schema), arrays).unwrap()
    };
    let client = Arc::new(MockClient::new().on("indisprimary", reply));
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let batches = collect(
        catalog
            .primary_keys(&CatalogRequest::new().with_schema("public").with_object("orders"))
            .unwrap(),
    );
    let batch = &batches[0];
    assert_eq!(batch.schema().field(4).name(), "KEY_SEQ");
    assert_eq!(batch.column(4).data_type(), &DataType::Int16);
    assert_eq!(batch.column(4).as_primitive::<Int16Type>().value(0), 1);
    assert_eq!(strings(&batches, "PK_NAME"), vec!["orders_pkey"]);

    let sql = &client.calls()[0];
    assert!(sql.contains(" AND n.nspname = 'public' "));
    assert!(sql.contains(" AND ct.relname = 'orders' "));
}

#[test]
fn test_result_width_mismatch_is_an_error() {
    let client = Arc::new(MockClient::new().on("pg_proc_info", one_row()));
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let err = failure(catalog.procedures(&CatalogRequest::new()));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
    assert!(client.calls()[0].contains("pg_function_is_visible(p.prooid)"));
}

#[test]
fn test_backend_failure_on_direct_query() {
    let client = Arc::new(MockClient::new().fail("pg_constraint", "canceled"));
    let (catalog, _rt) = open_catalog(client.clone(), single_database());

    let request = CatalogRequest::new().with_schema("public").with_object("orders");
    let err = failure(catalog.foreign_keys(&request));
    assert_eq!(err.get_sqlstate(), Some("HY000"));
    assert_eq!(err.get_context(), Some(("foreign_keys", "query execution")));
}

#[test]
fn test_metadata_id_uses_equality() {
    let client = Arc::new(MockClient::new());
    let (catalog, _rt) = open_catalog(client.clone(), multi_database().with_metadata_id(true));

    catalog
        .tables(&CatalogRequest::new().with_schema("sales_2024").with_object("t_%"))
        .unwrap();
    let sql = &client.calls()[0];
    assert!(sql.contains(" AND TABLE_SCHEM = 'sales_2024' "));
    assert!(sql.contains(" AND TABLE_NAME = 't_%' "));
}
