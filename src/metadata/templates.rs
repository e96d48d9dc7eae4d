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

//! Fixed catalog query text.
//!
//! Base queries end inside an open `WHERE` so filter fragments from
//! [`crate::metadata::filter`] can be appended directly. Column templates
//! whose type columns are generated live in [`crate::metadata::query`].

/// Tables from `pg_class`, typed from `relkind` and the namespace.
pub const TABLES_LOCAL: &str = " SELECT CAST(current_database() AS VARCHAR(124)) as TABLE_CAT, \
 n.nspname as TABLE_SCHEM, c.relname as TABLE_NAME, \
 CASE n.nspname ~ '^pg_' OR n.nspname = 'information_schema' \
 WHEN true THEN CASE \
 WHEN n.nspname = 'pg_catalog' OR n.nspname = 'information_schema' THEN CASE c.relkind \
 WHEN 'r' THEN 'SYSTEM TABLE' WHEN 'v' THEN 'SYSTEM VIEW' ELSE NULL END \
 WHEN n.nspname = 'pg_toast' THEN CASE c.relkind \
 WHEN 'r' THEN 'SYSTEM TOAST TABLE' ELSE NULL END \
 ELSE CASE c.relkind \
 WHEN 'r' THEN 'TEMPORARY TABLE' WHEN 'v' THEN 'TEMPORARY VIEW' ELSE NULL END \
 END \
 WHEN false THEN CASE c.relkind \
 WHEN 'r' THEN 'TABLE' WHEN 'v' THEN 'VIEW' \
 WHEN 'f' THEN 'FOREIGN TABLE' WHEN 'm' THEN 'MATERIALIZED VIEW' ELSE NULL END \
 ELSE NULL \
 END as TABLE_TYPE, \
 d.description as REMARKS \
 FROM pg_namespace n, pg_class c \
 LEFT JOIN pg_description d ON (c.oid=d.objoid AND d.objsubid=0) \
 LEFT JOIN pg_catalog.pg_class dc ON (d.classoid=dc.oid AND dc.relname='pg_class') \
 LEFT JOIN pg_catalog.pg_namespace dn ON (dn.oid=dc.relnamespace AND dn.nspname='pg_catalog') \
 WHERE n.oid=c.relnamespace ";

/// Tables of the connected database from `svv_tables`.
pub const TABLES_UNIVERSAL_SINGLE: &str = "SELECT * FROM (SELECT CAST(current_database() AS VARCHAR(124)) AS TABLE_CAT, \
 table_schema AS TABLE_SCHEM, table_name AS TABLE_NAME, \
 CAST(CASE table_type \
 WHEN 'BASE TABLE' THEN CASE \
 WHEN table_schema = 'pg_catalog' OR table_schema = 'information_schema' THEN 'SYSTEM TABLE' \
 WHEN table_schema = 'pg_toast' THEN 'SYSTEM TOAST TABLE' \
 WHEN table_schema ~ '^pg_' AND table_schema != 'pg_toast' THEN 'TEMPORARY TABLE' \
 ELSE 'TABLE' END \
 WHEN 'VIEW' THEN CASE \
 WHEN table_schema = 'pg_catalog' OR table_schema = 'information_schema' THEN 'SYSTEM VIEW' \
 WHEN table_schema = 'pg_toast' THEN NULL \
 WHEN table_schema ~ '^pg_' AND table_schema != 'pg_toast' THEN 'TEMPORARY VIEW' \
 ELSE 'VIEW' END \
 WHEN 'EXTERNAL TABLE' THEN 'TABLE' \
 END AS VARCHAR(124)) AS TABLE_TYPE, \
 REMARKS FROM svv_tables) WHERE true ";

/// Tables of every database visible to the session.
pub const TABLES_UNIVERSAL_ALL: &str = "SELECT * FROM (SELECT CAST(DATABASE_NAME AS VARCHAR(124)) AS TABLE_CAT, \
 SCHEMA_NAME AS TABLE_SCHEM, TABLE_NAME AS TABLE_NAME, \
 CAST(CASE \
 WHEN SCHEMA_NAME = 'information_schema' AND TABLE_TYPE = 'TABLE' THEN 'SYSTEM TABLE' \
 WHEN SCHEMA_NAME = 'information_schema' AND TABLE_TYPE = 'VIEW' THEN 'SYSTEM VIEW' \
 ELSE TABLE_TYPE END AS VARCHAR(124)) AS TABLE_TYPE, \
 REMARKS FROM PG_CATALOG.SVV_ALL_TABLES) WHERE true ";

/// Tables registered in external schemas.
pub const TABLES_EXTERNAL: &str = "SELECT * FROM (SELECT CAST(current_database() AS VARCHAR(124)) AS TABLE_CAT, \
 schemaname AS TABLE_SCHEM, tablename AS TABLE_NAME, \
 'TABLE' AS TABLE_TYPE, NULL AS REMARKS FROM svv_external_tables) WHERE true ";

pub const ALL_CATALOGS: &str = " SELECT DISTINCT current_database() as TABLE_CAT, NULL as TABLE_SCHEM, \
 NULL as TABLE_NAME, NULL as TABLE_TYPE, NULL as REMARKS ORDER BY TABLE_CAT ";

pub const ALL_CATALOGS_DATASHARE: &str = " SELECT CAST(database_name AS varchar(124)) AS TABLE_CAT, \
 NULL as TABLE_SCHEM, NULL as TABLE_NAME, NULL as TABLE_TYPE, NULL as REMARKS \
 FROM PG_CATALOG.SVV_REDSHIFT_DATABASES ORDER BY TABLE_CAT ";

/// Schemas holding at least one table or view the user can access.
pub const ALL_SCHEMAS: &str = " SELECT DISTINCT current_database() as TABLE_CAT, n.nspname as TABLE_SCHEM, \
 NULL as TABLE_NAME, NULL as TABLE_TYPE, NULL as REMARKS \
 FROM pg_namespace n, pg_class c LEFT JOIN pg_description d ON (c.oid=d.objoid AND d.objsubid=0) \
 WHERE n.oid=c.relnamespace \
 AND n.nspname <> 'pg_toast' \
 AND (n.nspname !~ '^pg_temp_' OR n.nspname = (pg_catalog.current_schemas(true))[1]) \
 AND (n.nspname !~ '^pg_toast_temp_' \
 OR n.nspname = replace((pg_catalog.current_schemas(true))[1], 'pg_temp_', 'pg_toast_temp_')) \
 AND (has_table_privilege(c.oid, 'SELECT') OR has_table_privilege(c.oid, 'INSERT') \
 OR has_table_privilege(c.oid, 'UPDATE') OR has_table_privilege(c.oid, 'DELETE')) \
 AND has_schema_privilege(n.oid, 'USAGE'::text) \
 AND c.relkind in ('r','v') \
 ORDER BY TABLE_SCHEM ";

pub const ALL_SCHEMAS_DATASHARE: &str = " SELECT DISTINCT CAST(database_name AS varchar(124)) AS TABLE_CAT, \
 CAST(schema_name AS varchar(124)) AS TABLE_SCHEM, NULL as TABLE_NAME, \
 NULL as TABLE_TYPE, NULL as REMARKS \
 FROM PG_CATALOG.SVV_ALL_SCHEMAS ORDER BY TABLE_CAT, TABLE_SCHEM ";

pub const PROCEDURES: &str = "SELECT current_database() AS PROCEDURE_CAT, n.nspname AS PROCEDURE_SCHEM, \
 p.proname AS PROCEDURE_NAME, NULL as NUM_INPUT_PARAMS, NULL as NUM_OUTPUT_PARAMS, \
 NULL as NUM_RESULT_SETS, d.description AS REMARKS, \
 CASE WHEN p.prokind='f' or p.proargmodes is not null THEN 2 \
 WHEN p.prokind='p' THEN 1 ELSE 0 END AS PROCEDURE_TYPE \
 FROM pg_catalog.pg_namespace n, pg_catalog.pg_proc_info p \
 LEFT JOIN pg_catalog.pg_description d ON (p.prooid=d.objoid) \
 LEFT JOIN pg_catalog.pg_class c ON (d.classoid=c.oid AND c.relname='pg_proc') \
 LEFT JOIN pg_catalog.pg_namespace pn ON (c.relnamespace=pn.oid AND pn.nspname='pg_catalog') \
 WHERE p.pronamespace=n.oid ";

/// Restricts procedures to the search path when no schema is given.
pub const PROCEDURES_VISIBLE: &str = " AND pg_function_is_visible(p.prooid) ";

/// One row per argument of each procedure plus one per returned value.
///
/// `PARAM_TYPE` is the `format_type` text the outer projection derives the
/// type columns from.
pub const PROCEDURE_PARAMETERS: &str = "SELECT current_database() AS PROCEDURE_CAT, \
 n.nspname AS PROCEDURE_SCHEM, p.proname AS PROCEDURE_NAME, \
 COALESCE(p.proargnames[s.pos], '') AS COLUMN_NAME, \
 CASE COALESCE(p.proargmodes[s.pos], 'i') \
 WHEN 'i' THEN 1 WHEN 'b' THEN 2 WHEN 'o' THEN 4 WHEN 't' THEN 3 ELSE 0 END AS COLUMN_TYPE, \
 pg_catalog.format_type(COALESCE(p.proallargtypes[s.pos], p.proargtypes[s.pos - 1]), NULL) AS PARAM_TYPE, \
 s.pos AS ORDINAL_POSITION \
 FROM pg_catalog.pg_proc_info p JOIN pg_catalog.pg_namespace n ON (n.oid = p.pronamespace), \
 (SELECT generate_series(1, current_setting('max_function_args')::int) AS pos) s \
 WHERE s.pos <= COALESCE(array_upper(p.proallargtypes, 1), array_upper(p.proargtypes, 1) + 1) \
 UNION ALL \
 SELECT current_database(), n.nspname, p.proname, '', \
 CASE WHEN p.proretset THEN 3 ELSE 5 END, \
 pg_catalog.format_type(p.prorettype, NULL), 0 \
 FROM pg_catalog.pg_proc_info p JOIN pg_catalog.pg_namespace n ON (n.oid = p.pronamespace) \
 WHERE p.prokind = 'f' AND p.prorettype <> 'pg_catalog.void'::regtype ";

pub const PRIMARY_KEYS: &str = "SELECT current_database() AS TABLE_CAT, n.nspname AS TABLE_SCHEM, \
 ct.relname AS TABLE_NAME, a.attname AS COLUMN_NAME, a.attnum AS KEY_SEQ, ci.relname AS PK_NAME \
 FROM pg_catalog.pg_namespace n, pg_catalog.pg_class ct, pg_catalog.pg_class ci, \
 pg_catalog.pg_attribute a, pg_catalog.pg_index i \
 WHERE ct.oid=i.indrelid AND ci.oid=i.indexrelid AND a.attrelid=ci.oid \
 AND i.indisprimary AND ct.relnamespace = n.oid ";

pub const FOREIGN_KEYS: &str = " SELECT distinct current_database() as PKTABLE_CAT, n.nspname as PKTABLE_SCHEM, \
 c.relname as PKTABLE_NAME, a.attname as PKCOLUMN_NAME, current_database() as FKTABLE_CAT, \
 fn.nspname as FKTABLE_SCHEM, fc.relname as FKTABLE_NAME, fa.attname as FKCOLUMN_NAME, \
 s.n as KEY_SEQ, NULL as UPDATE_RULE, NULL as DELETE_RULE, f.conname as FK_NAME, pr.conname as PK_NAME, \
 (CASE WHEN NOT f.condeferred THEN 7 WHEN f.condeferrable THEN 5 ELSE 6 END) as DEFERRABILITY \
 FROM pg_catalog.pg_attribute a, pg_catalog.pg_attribute fa, pg_catalog.pg_class c, pg_catalog.pg_class fc, \
 pg_catalog.pg_namespace n, pg_catalog.pg_namespace fn, pg_catalog.pg_constraint f \
 left join pg_catalog.pg_constraint pr on (f.conrelid=pr.conrelid and pr.contype='p'), \
 (SELECT * FROM generate_series(1, current_setting('max_index_keys')::int, 1)) s(n) \
 WHERE fn.oid=fc.relnamespace AND n.oid=c.relnamespace AND c.oid=f.confrelid AND fc.oid=f.conrelid \
 AND a.attrelid=f.confrelid AND fa.attrelid=f.conrelid AND a.attnum=f.confkey[s.n] AND fa.attnum=f.conkey[s.n] \
 AND f.contype='f' AND f.conkey[s.n]<>0 AND has_schema_privilege(n.oid, 'USAGE') ";

/// Grantee/grantor pairs for every privilege kind on a relation.
const PRIVILEGE_SOURCES: &str = " pg_catalog.pg_user u, \
 (SELECT z.usename, z.usesysid, x.grosysid FROM pg_catalog.pg_user z \
 LEFT JOIN pg_catalog.pg_group x ON z.usesysid = ANY(x.grolist)) o, \
 (((((( (SELECT 'SELECT' UNION ALL SELECT 'INSERT') UNION ALL SELECT 'UPDATE') UNION ALL SELECT 'DELETE') \
 UNION ALL SELECT 'REFERENCES') UNION ALL SELECT 'RULE') UNION ALL SELECT 'TRIGGER') ) p(type) ";

const PRIVILEGE_GRANTED: &str = " (c.relkind in ('r','v') AND (c.relowner=o.usesysid AND u.usesysid=c.relowner) \
 OR (aclcontains(c.relacl, makeaclitem(0,0,u.usesysid,p.type,FALSE)) \
 OR aclcontains(c.relacl, makeaclitem(o.usesysid,o.grosysid,u.usesysid,p.type,FALSE)) \
 OR aclcontains(c.relacl, makeaclitem(0,o.grosysid,u.usesysid,p.type,FALSE)))) ";

const PRIVILEGE_COLUMNS: &str = " CASE WHEN u.usename=o.usename THEN '_SYSTEM'::text ELSE u.usename END as GRANTOR, \
 o.usename as GRANTEE, p.type as PRIVILEGE, \
 CASE WHEN aclcontains(c.relacl, makeaclitem(o.usesysid,o.grosysid,u.usesysid,p.type,TRUE)) \
 THEN 'YES'::text ELSE 'NO'::text END as IS_GRANTABLE ";

pub fn table_privileges() -> String {
    format!(
        " SELECT current_database() as TABLE_CAT, n.nspname as TABLE_SCHEM, c.relname as TABLE_NAME,{} \
         FROM pg_catalog.pg_class c, pg_catalog.pg_namespace n,{} \
         WHERE c.relnamespace=n.oid AND{}",
        PRIVILEGE_COLUMNS, PRIVILEGE_SOURCES, PRIVILEGE_GRANTED
    )
}

pub fn column_privileges() -> String {
    format!(
        " SELECT DISTINCT current_database() as TABLE_CAT, n.nspname as TABLE_SCHEM, c.relname as TABLE_NAME, \
         a.attname as COLUMN_NAME,{} \
         FROM pg_catalog.pg_attribute a, pg_catalog.pg_class c, pg_catalog.pg_namespace n,{} \
         WHERE a.attnum>0 AND NOT a.attisdropped AND a.attrelid = c.oid AND c.relnamespace=n.oid AND{}",
        PRIVILEGE_COLUMNS, PRIVILEGE_SOURCES, PRIVILEGE_GRANTED
    )
}

/// Statistics shape with no rows.
pub const STATISTICS_NO_RESULT: &str = " SELECT NULL as TABLE_CAT, NULL as TABLE_SCHEM, NULL as TABLE_NAME, \
 NULL as NON_UNIQUE, NULL as INDEX_QUALIFIER, NULL as INDEX_NAME, NULL as TYPE, \
 NULL as ORDINAL_POSITION, NULL as COLUMN_NAME, NULL as ASC_OR_DESC, NULL as CARDINALITY, \
 NULL as PAGES, NULL as FILTER_CONDITION FROM (SELECT 1 where 1=0) ";

/// Best row id: key columns of the table's constraints and indexes. Schema
/// and table filters go after this part.
pub const ROWID_PART_1: &str = " select 2 as SCOPE, COLUMN_NAME, \
 (case atttypid \
 when 16 then (-7) when 18 then 1 when 1042 then 1 when 20 then (-5) when 21 then 5 \
 when 23 then 4 when 700 then 7 when 701 then 8 when 19 then 12 when 1043 then 12 \
 when 1082 then 91 when 1114 then 93 when 1083 then 92 when 1266 then 12 when 1700 then 2 \
 else 0 end) as DATA_TYPE, \
 (case atttypid \
 when 1042 then 'CHARACTER' when 18 then 'CHARACTER' when 1043 then 'CHARACTER VARYING' \
 when 19 then 'CHARACTER VARYING' when 21 then 'SMALLINT' when 23 then 'INTEGER' \
 when 20 then 'BIGINT' when 700 then 'REAL' when 701 then 'DOUBLE PRECISION' when 16 then 'BOOL' \
 when 1082 then 'DATE' when 1114 then 'TIMESTAMP' when 1083 then 'TIME' when 1266 then 'TIMETZ' \
 when 1700 then 'NUMERIC' else 'UNKNOWN' end) as TYPE_NAME, \
 (case when atttypid=1700 then (case when atttypmod=-1 then 1003 \
 else (case when atttypmod/65536>38 then atttypmod/65536+3 else atttypmod/65536 end) end) \
 when atttypmod>0 and (atttypid=1042 or atttypid=19 or atttypid=18) then atttypmod-4 \
 when atttypid=21 then 5 when atttypid=23 then 10 when atttypid=20 then 19 \
 when atttypid=700 then 15 when atttypid=701 then 53 when atttypid=16 then 1 \
 when atttypid=1082 then 10 when atttypid=1114 then 26 when atttypid=1083 then 15 \
 when atttypid=1266 then 21 else atttypmod end) as COLUMN_SIZE, \
 (case when atttypid=1700 then (case when atttypmod=-1 then 1003 \
 when atttypmod/65536>38 then atttypmod/65536+3 \
 when ((atttypmod-4)%65536)>0 then atttypmod/65536+2 else atttypmod/65536+1 end) \
 when (atttypid=1042 or atttypid=19 or atttypid=18) then atttypmod-4 \
 when atttypid=1082 then 6 when atttypid=1114 then 16 when atttypid=1083 then 6 \
 when atttypid=1266 then 21 else attlen end) as BUFFER_LENGTH, \
 (case when atttypid=1700 and atttypmod>0 then atttypmod%65536-4 \
 when atttypid=1114 then 6 when atttypid=1083 then 6 when atttypid=1266 then 6 \
 when (atttypid=21 or atttypid=23 or atttypid=20) then 0 else NULL end) as DECIMAL_DIGITS, \
 1::int2 as PSEUDO_COLUMN \
 FROM (SELECT NULL as TABLE_CAT, w.nspname as TABLE_SCHEM, w.relname as TABLE_NAME, \
 i.unique as NON_UNIQUE, w.nspname as INDEX_QUALIFIER, i.conname as INDEX_NAME, i.type as TYPE, \
 s.n as ORDINAL_POSITION, a.attname as COLUMN_NAME, 'A'::char as ASC_OR_DESC, NULL as CARDINALITY, \
 COALESCE(i.pages, w.relpages) as PAGES, i.consrc as FILTER_CONDITION, \
 a.atttypmod as atttypmod, a.atttypid atttypid, a.attlen attlen \
 FROM (SELECT c.oid, c.relpages, NULL, n.nspname, c.relname \
 FROM pg_catalog.pg_namespace n, pg_catalog.pg_class c WHERE c.relnamespace=n.oid ";

/// Closes the relation subquery and joins key columns. A not-null filter on
/// `a.attnotnull` may follow.
pub const ROWID_PART_2: &str = " ) w LEFT JOIN (SELECT 3 AS type, NULL AS pages, 1 AS unique, conrelid, conname, \
 string_to_array(array_to_string(conkey,' '),' ') AS conkey, consrc \
 FROM pg_catalog.pg_constraint WHERE contype='c' \
 UNION SELECT CASE WHEN i.indisclustered THEN 1 WHEN m.amname='hash' THEN 2 ELSE 3 END, \
 c.relpages, CASE WHEN i.indisunique THEN 0 ELSE 1 END, i.indrelid, c.relname, \
 string_to_array(array_to_string(ARRAY[i.indkey],' '),' '), NULL FROM pg_catalog.pg_index i \
 LEFT JOIN pg_catalog.pg_class c ON c.oid=i.indexrelid, pg_catalog.pg_am m WHERE m.oid=c.relam) i \
 ON (i.conrelid=w.oid), (SELECT * FROM generate_series(1, current_setting('max_index_keys')::int, 1)) s(n), \
 pg_catalog.pg_attribute a \
 WHERE a.attrelid=w.oid AND a.attnum=i.conkey[s.n-1]::int2 ";

/// Placeholder row per table; schema and table filters go after this part.
pub const ROWID_PART_3: &str = " UNION SELECT NULL, n.nspname, c.relname, null, null, null, 0, null, null, \
 null, null, null, null, null, null, null \
 FROM pg_catalog.pg_namespace n, pg_catalog.pg_class c WHERE c.relnamespace=n.oid";

pub const ROWID_PART_4: &str = " ) WHERE COLUMN_NAME is not null";

/// `xmin` row version column.
pub const ROWVER_PART_1: &str = " SELECT 0 as SCOPE, 'xmin' as COLUMN_NAME, 4::int2 as DATA_TYPE, 'integer' as TYPE_NAME, \
 10 as COLUMN_SIZE, 4 as BUFFER_LENGTH, 0::int2 as DECIMAL_DIGITS, 2::int2 as PSEUDO_COLUMN \
 FROM pg_catalog.pg_class c, pg_catalog.pg_namespace n \
 WHERE c.relnamespace = n.oid AND has_schema_privilege(n.oid, 'USAGE'::text) ";

/// `oid` row version column for tables created with OIDs.
pub const ROWVER_PART_2: &str = " UNION SELECT 0, 'oid', 4::int2, 'oid', 10, 4, 0::int2, 2::int2 \
 FROM pg_catalog.pg_class c, pg_catalog.pg_namespace n \
 WHERE c.relnamespace = n.oid AND c.relhasoids AND has_schema_privilege(n.oid, 'USAGE'::text) ";
