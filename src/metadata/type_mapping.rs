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

//! Redshift native type → ODBC type descriptor mapping.
//!
//! One table, [`NATIVE_TYPES`], drives both resolution paths:
//!
//! - [`describe`] expands a type name reported by `SHOW COLUMNS` into a
//!   [`TypeDescriptor`] on the client.
//! - The `*_case` generators emit the SQL `CASE` expressions the direct-query
//!   column templates use to derive the same descriptor columns server-side.
//!
//! The module also owns the static `SQLGetTypeInfo` rows and the `UNION`
//! query built from them.

use crate::error::{RedshiftErrorHelper, Result, SQLSTATE_INVALID_DATA_TYPE};
use crate::metadata::filter::escape_literal;
use crate::metadata::types::{TypeDescriptor, SQL_ALL_TYPES};
use crate::session::OdbcVersion;
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Column size reported for types without a natural bound.
pub const UNBOUNDED_SIZE: i32 = 2147483647;
/// Fractional seconds precision used when the type carries none.
const DEFAULT_FRACTIONAL_PRECISION: i16 = 6;

/// `SQL_DATETIME`, the non-concise code shared by date/time types.
const SQL_DATETIME: i16 = 9;
/// `SQL_INTERVAL`, the non-concise code shared by interval types.
const SQL_INTERVAL: i16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Size {
    Fixed(i32),
    CharLength,
    NumericPrecision,
    Unbounded,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digits {
    Fixed(i16),
    NumericScale,
    /// Declared fractional seconds precision, 6 when absent.
    FractionalSeconds,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BufferLength {
    Fixed(i32),
    CharLength,
    /// 8 bytes up to 19 digits of precision, 16 above.
    Numeric,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Octets {
    CharLength,
    Unbounded,
    Null,
}

/// One Redshift native type and every spelling that refers to it.
#[derive(Debug)]
pub struct NativeType {
    /// Short name reported as `TYPE_NAME`.
    pub name: &'static str,
    /// All lowercase spellings, the short name included.
    pub aliases: &'static [&'static str],
    /// Concise ODBC 3 type code.
    pub sql_type: i16,
    /// Non-concise type code.
    pub sql_data_type: i16,
    pub datetime_sub: Option<i16>,
    size: Size,
    buffer: BufferLength,
    digits: Digits,
    radix: Option<i16>,
    octets: Octets,
}

impl NativeType {
    /// Whether the concise code is one of the ODBC 3 date/time codes that
    /// ODBC 2 applications see as 9, 10 and 11.
    fn is_datetime(&self) -> bool {
        self.sql_data_type == SQL_DATETIME
    }
}

macro_rules! native {
    ($name:expr, [$($alias:expr),*], $t:expr, $nt:expr, $sub:expr,
     $size:expr, $buf:expr, $digits:expr, $radix:expr, $oct:expr) => {
        NativeType {
            name: $name,
            aliases: &[$($alias),*],
            sql_type: $t,
            sql_data_type: $nt,
            datetime_sub: $sub,
            size: $size,
            buffer: $buf,
            digits: $digits,
            radix: $radix,
            octets: $oct,
        }
    };
}

use BufferLength as B;
use Digits as D;
use Octets as O;
use Size as S;

/// The recognized native types.
pub static NATIVE_TYPES: &[NativeType] = &[
    native!("bool", ["bool", "boolean", "bit"], -7, -7, None,
        S::Fixed(1), B::Fixed(1), D::Null, Some(10), O::Null),
    native!("int2", ["int2", "smallint"], 5, 5, None,
        S::Fixed(5), B::Fixed(2), D::Fixed(0), Some(10), O::Null),
    native!("int4", ["int4", "integer", "int"], 4, 4, None,
        S::Fixed(10), B::Fixed(4), D::Fixed(0), Some(10), O::Null),
    native!("int8", ["int8", "bigint"], -5, -5, None,
        S::Fixed(19), B::Fixed(8), D::Fixed(0), Some(10), O::Null),
    native!("oid", ["oid"], -5, -5, None,
        S::Fixed(10), B::Fixed(8), D::Fixed(0), Some(10), O::Null),
    // Float sizes follow the SHOW COLUMNS expansion (7/6, 15/15) on both
    // paths. Older catalog queries reported 8 and 17.
    native!("float4", ["float4", "real"], 7, 7, None,
        S::Fixed(7), B::Fixed(4), D::Fixed(6), Some(10), O::Null),
    native!("float8", ["float8", "double precision", "double"], 8, 8, None,
        S::Fixed(15), B::Fixed(8), D::Fixed(15), Some(10), O::Null),
    native!("float", ["float"], 6, 6, None,
        S::Fixed(15), B::Fixed(8), D::Fixed(15), Some(10), O::Null),
    native!("numeric", ["numeric"], 2, 2, None,
        S::NumericPrecision, B::Numeric, D::NumericScale, Some(10), O::Null),
    native!("decimal", ["decimal"], 3, 3, None,
        S::NumericPrecision, B::Numeric, D::NumericScale, Some(10), O::Null),
    native!("varchar", ["varchar", "character varying", "nvarchar", "text"], 12, 12, None,
        S::CharLength, B::CharLength, D::Null, Some(0), O::CharLength),
    native!("string", ["string"], 12, 12, None,
        S::CharLength, B::CharLength, D::Null, Some(0), O::CharLength),
    native!("name", ["name"], 12, 12, None,
        S::Fixed(128), B::Fixed(128), D::Null, Some(0), O::CharLength),
    native!("char", ["char", "character", "nchar", "bpchar", "\"char\""], 1, 1, None,
        S::CharLength, B::CharLength, D::Null, Some(0), O::CharLength),
    native!("date", ["date"], 91, SQL_DATETIME, Some(1),
        S::Fixed(10), B::Fixed(6), D::Null, Some(10), O::Null),
    native!("time", ["time", "time without time zone"], 92, SQL_DATETIME, Some(2),
        S::Fixed(15), B::Fixed(6), D::FractionalSeconds, Some(10), O::Null),
    native!("timetz", ["timetz", "time with time zone"], 92, SQL_DATETIME, Some(2),
        S::Fixed(21), B::Fixed(6), D::FractionalSeconds, Some(10), O::Null),
    native!("timestamp", ["timestamp", "timestamp without time zone"], 93, SQL_DATETIME, Some(3),
        S::Fixed(29), B::Fixed(16), D::FractionalSeconds, Some(10), O::Null),
    native!("timestamptz", ["timestamptz", "timestamp with time zone"], 93, SQL_DATETIME, Some(3),
        S::Fixed(35), B::Fixed(16), D::FractionalSeconds, Some(10), O::Null),
    native!("intervaly2m",
        ["intervaly2m", "interval year to month", "interval year", "interval month"],
        107, SQL_INTERVAL, Some(7),
        S::Fixed(32), B::Fixed(8), D::Fixed(0), Some(10), O::Null),
    native!("intervald2s",
        ["intervald2s", "interval day to second", "interval day", "interval second"],
        110, SQL_INTERVAL, Some(10),
        S::Fixed(64), B::Fixed(20), D::FractionalSeconds, Some(10), O::Null),
    native!("super", ["super"], -1, -1, None,
        S::Null, B::Null, D::Null, Some(10), O::Null),
    native!("geometry", ["geometry"], -4, -4, None,
        S::Null, B::Null, D::Null, Some(10), O::Null),
    native!("geography", ["geography"], -4, -4, None,
        S::Null, B::Null, D::Null, Some(2), O::Null),
    native!("varbyte", ["varbyte", "varbinary", "binary varying"], -4, -4, None,
        S::Null, B::Null, D::Null, Some(2), O::Unbounded),
    native!("binary", ["binary"], -4, -4, None,
        S::Null, B::Null, D::Null, Some(10), O::Null),
    native!("bytea", ["bytea"], -2, -2, None,
        S::Null, B::Null, D::Null, Some(10), O::Null),
    native!("hllsketch", ["hllsketch"], 0, 0, None,
        S::Null, B::Null, D::Null, Some(10), O::Unbounded),
    native!("ARRAY", ["array"], 2003, 2003, None,
        S::Null, B::Null, D::Null, Some(10), O::Null),
];

/// Descriptor for names outside the table.
static UNKNOWN_TYPE: NativeType = native!("", [], 0, 0, None,
    S::Unbounded, B::Fixed(UNBOUNDED_SIZE), D::Fixed(0), Some(10), O::Null);

/// Nested `SUPER` projections reported by `SHOW COLUMNS`.
static NESTED_TYPE: NativeType = native!("", [], -1, -1, None,
    S::Null, B::Null, D::Null, Some(10), O::Null);

fn type_index() -> &'static HashMap<&'static str, &'static NativeType> {
    static INDEX: OnceLock<HashMap<&'static str, &'static NativeType>> = OnceLock::new();
    INDEX.get_or_init(|| {
        NATIVE_TYPES
            .iter()
            .flat_map(|t| t.aliases.iter().map(move |alias| (*alias, t)))
            .collect()
    })
}

/// Find the native type for a bare lowercase type name.
pub fn lookup(type_name: &str) -> Option<&'static NativeType> {
    type_index().get(type_name).copied()
}

fn modifier_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(\s*(\d+)\s*(?:,\s*(\d+)\s*)?\)").ok())
        .as_ref()
}

/// A type name split into its bare name and any `(p[,s])` modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedTypeName {
    base: String,
    first: Option<i32>,
    second: Option<i32>,
}

fn parse_type_name(raw: &str) -> ParsedTypeName {
    let lowered = raw.trim().to_lowercase();
    let Some(re) = modifier_regex() else {
        return ParsedTypeName {
            base: lowered,
            first: None,
            second: None,
        };
    };
    let (first, second) = match re.captures(&lowered) {
        Some(caps) => (
            caps.get(1).and_then(|m| m.as_str().parse().ok()),
            caps.get(2).and_then(|m| m.as_str().parse().ok()),
        ),
        None => (None, None),
    };
    let stripped = re.replace_all(&lowered, " ");
    let base = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    ParsedTypeName {
        base,
        first,
        second,
    }
}

/// Column shape as reported by `SHOW COLUMNS`.
#[derive(Debug, Clone, Default)]
pub struct ColumnShape<'a> {
    pub data_type: &'a str,
    pub character_maximum_length: Option<i32>,
    pub numeric_precision: Option<i32>,
    pub numeric_scale: Option<i32>,
    /// "YES", "NO" or anything else for unknown.
    pub is_nullable: &'a str,
}

/// Expand a native type into its protocol descriptor.
///
/// Unrecognized names still produce a complete descriptor with the
/// `SQL_UNKNOWN_TYPE` code and the raw name.
pub fn describe(shape: &ColumnShape<'_>, odbc_version: OdbcVersion) -> TypeDescriptor {
    let parsed = parse_type_name(shape.data_type);
    let (native, type_name) = match lookup(&parsed.base) {
        Some(t) => (t, t.name.to_string()),
        None if parsed.base.starts_with('_') => match lookup("array") {
            Some(t) => (t, t.name.to_string()),
            None => (&UNKNOWN_TYPE, parsed.base.clone()),
        },
        None if ["array", "map", "struct"]
            .iter()
            .any(|p| parsed.base.starts_with(p)) =>
        {
            (&NESTED_TYPE, shape.data_type.trim().to_string())
        }
        None => (&UNKNOWN_TYPE, shape.data_type.trim().to_string()),
    };

    let char_length = shape.character_maximum_length.or(parsed.first);
    let precision = shape.numeric_precision.or(parsed.first);
    let scale = shape.numeric_scale.or(parsed.second);
    let fractional = parsed.first.and_then(|p| i16::try_from(p).ok());

    let column_size = match native.size {
        Size::Fixed(n) => Some(n),
        Size::CharLength => char_length,
        Size::NumericPrecision => precision,
        Size::Unbounded => Some(UNBOUNDED_SIZE),
        Size::Null => None,
    };
    let buffer_length = match native.buffer {
        BufferLength::Fixed(n) => Some(n),
        BufferLength::CharLength => char_length,
        BufferLength::Numeric => Some(if precision.unwrap_or(i32::MAX) <= 19 { 8 } else { 16 }),
        BufferLength::Null => None,
    };
    let decimal_digits = match native.digits {
        Digits::Fixed(n) => Some(n),
        Digits::NumericScale => scale.and_then(|s| i16::try_from(s).ok()),
        Digits::FractionalSeconds => Some(fractional.unwrap_or(DEFAULT_FRACTIONAL_PRECISION)),
        Digits::Null => None,
    };
    let octet_length = match native.octets {
        Octets::CharLength => char_length,
        Octets::Unbounded => Some(UNBOUNDED_SIZE),
        Octets::Null => None,
    };

    TypeDescriptor {
        type_name,
        sql_type: concise_for_version(native, odbc_version),
        sql_data_type: native.sql_data_type,
        datetime_sub: native.datetime_sub,
        column_size,
        decimal_digits,
        octet_length,
        buffer_length,
        num_prec_radix: native.radix,
        nullable: nullable_code(shape.is_nullable),
    }
}

fn concise_for_version(native: &NativeType, odbc_version: OdbcVersion) -> i16 {
    match (odbc_version, native.is_datetime()) {
        (OdbcVersion::V2, true) => odbc3_to_odbc2(native.sql_type),
        _ => native.sql_type,
    }
}

/// `IS_NULLABLE` text to the `NULLABLE` code.
pub fn nullable_code(is_nullable: &str) -> i16 {
    match is_nullable {
        "YES" => 1,
        "NO" => 0,
        _ => 2,
    }
}

/// Map ODBC 2 date/time and tinyint codes to their ODBC 3 equivalents.
pub fn odbc2_to_odbc3(code: i16) -> i16 {
    match code {
        9 => 91,
        10 => 92,
        11 => 93,
        -6 => -7,
        other => other,
    }
}

fn odbc3_to_odbc2(code: i16) -> i16 {
    match code {
        91 => 9,
        92 => 10,
        93 => 11,
        other => other,
    }
}

/// SQL expressions a column template exposes for type derivation.
///
/// Every field is a SQL expression evaluated per row; `"NULL"` when the
/// source cannot supply it.
#[derive(Debug, Clone)]
pub struct ColumnTypeSource {
    /// Yields the bare lowercase type name, arrays folded to `'array'`.
    pub type_key: String,
    pub char_length: String,
    pub precision: String,
    pub scale: String,
    pub fractional_precision: String,
}

impl ColumnTypeSource {
    /// `pg_attribute` joined with `pg_type` as `a` and `t`.
    pub fn pg_attribute() -> Self {
        Self {
            type_key: "regexp_replace(t.typname, '^_.+', 'array')".to_string(),
            char_length: "CASE WHEN a.atttypmod > 4 THEN a.atttypmod - 4 END".to_string(),
            precision: "CASE WHEN a.atttypmod > 4 THEN ((a.atttypmod - 4) >> 16) & 65535 END"
                .to_string(),
            scale: "CASE WHEN a.atttypmod > 4 THEN (a.atttypmod - 4) & 65535 END".to_string(),
            fractional_precision: "CASE WHEN a.atttypmod >= 0 THEN a.atttypmod END".to_string(),
        }
    }

    /// `information_schema`-style views with split length columns.
    pub fn information_schema(datetime_precision: Option<&str>) -> Self {
        Self {
            type_key: "regexp_replace(data_type, '^_.+', 'array')".to_string(),
            char_length: "character_maximum_length".to_string(),
            precision: "numeric_precision".to_string(),
            scale: "numeric_scale".to_string(),
            fractional_precision: datetime_precision.unwrap_or("NULL").to_string(),
        }
    }

    /// A single text column holding the full declaration, e.g. `decimal(10,2)`
    /// or `integer[]`.
    pub fn declared_type(column: &str) -> Self {
        let nth = |n: u32| {
            format!(
                "CAST(NULLIF(regexp_substr({}, '[0-9]+', 1, {}), '') AS INT)",
                column, n
            )
        };
        Self {
            type_key: format!(
                r"regexp_replace(regexp_replace(lower({}), '\(.*\)', ''), '^_.+|.+\[\]$', 'array')",
                column
            ),
            char_length: nth(1),
            precision: nth(1),
            scale: nth(2),
            fractional_precision: nth(1),
        }
    }
}

fn quoted_aliases(native: &NativeType) -> String {
    native
        .aliases
        .iter()
        .map(|a| format!("'{}'", escape_literal(a)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build `CASE WHEN key IN (..) THEN v ... ELSE default END`, skipping
/// types whose value equals the default.
fn searched_case<F>(key: &str, default: &str, mut value: F) -> String
where
    F: FnMut(&NativeType) -> String,
{
    let mut sql = String::from("CASE");
    for native in NATIVE_TYPES {
        let v = value(native);
        if v == default {
            continue;
        }
        sql.push_str(&format!(
            " WHEN {} IN ({}) THEN {}",
            key,
            quoted_aliases(native),
            v
        ));
    }
    sql.push_str(&format!(" ELSE {} END", default));
    sql
}

/// `DATA_TYPE` expression.
pub fn data_type_case(src: &ColumnTypeSource, odbc_version: OdbcVersion) -> String {
    format!(
        "CAST({} AS SMALLINT)",
        searched_case(&src.type_key, "0", |t| concise_for_version(t, odbc_version)
            .to_string())
    )
}

/// `TYPE_NAME` expression folding long spellings into short names.
pub fn type_name_case(raw_type: &str) -> String {
    let mut sql = format!("CASE {}", raw_type);
    for native in NATIVE_TYPES {
        for alias in native.aliases.iter().filter(|a| **a != native.name) {
            sql.push_str(&format!(
                " WHEN '{}' THEN '{}'",
                escape_literal(alias),
                escape_literal(native.name)
            ));
        }
    }
    sql.push_str(&format!(" ELSE {} END", raw_type));
    sql
}

/// `COLUMN_SIZE` expression.
pub fn column_size_case(src: &ColumnTypeSource) -> String {
    let default = UNBOUNDED_SIZE.to_string();
    searched_case(&src.type_key, &default, |t| match t.size {
        Size::Fixed(n) => n.to_string(),
        Size::CharLength => src.char_length.clone(),
        Size::NumericPrecision => src.precision.clone(),
        Size::Unbounded => UNBOUNDED_SIZE.to_string(),
        Size::Null => "NULL".to_string(),
    })
}

/// `DECIMAL_DIGITS` expression.
pub fn decimal_digits_case(src: &ColumnTypeSource) -> String {
    searched_case(&src.type_key, "0", |t| match t.digits {
        Digits::Fixed(n) => n.to_string(),
        Digits::NumericScale => src.scale.clone(),
        Digits::FractionalSeconds => format!(
            "COALESCE({}, {})",
            src.fractional_precision, DEFAULT_FRACTIONAL_PRECISION
        ),
        Digits::Null => "NULL".to_string(),
    })
}

/// `NUM_PREC_RADIX` expression.
pub fn radix_case(src: &ColumnTypeSource) -> String {
    searched_case(&src.type_key, "10", |t| match t.radix {
        Some(r) => r.to_string(),
        None => "NULL".to_string(),
    })
}

/// `SQL_DATA_TYPE` expression.
pub fn sql_data_type_case(src: &ColumnTypeSource) -> String {
    format!(
        "CAST({} AS SMALLINT)",
        searched_case(&src.type_key, "0", |t| t.sql_data_type.to_string())
    )
}

/// `SQL_DATETIME_SUB` expression.
pub fn datetime_sub_case(src: &ColumnTypeSource) -> String {
    format!(
        "CAST({} AS SMALLINT)",
        searched_case(&src.type_key, "NULL", |t| match t.datetime_sub {
            Some(sub) => sub.to_string(),
            None => "NULL".to_string(),
        })
    )
}

/// `CHAR_OCTET_LENGTH` expression; NULL outside character and binary types.
pub fn octet_length_case(src: &ColumnTypeSource) -> String {
    searched_case(&src.type_key, "NULL", |t| match t.octets {
        Octets::CharLength => src.char_length.clone(),
        Octets::Unbounded => UNBOUNDED_SIZE.to_string(),
        Octets::Null => "NULL".to_string(),
    })
}

/// One row of the `SQLGetTypeInfo` result.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfoRow {
    pub type_name: &'static str,
    pub data_type: i16,
    pub column_size: Option<i32>,
    pub literal_prefix: Option<&'static str>,
    pub literal_suffix: Option<&'static str>,
    pub create_params: Option<&'static str>,
    pub nullable: i16,
    pub case_sensitive: i16,
    pub searchable: i16,
    pub unsigned_attribute: Option<i16>,
    pub fixed_prec_scale: i16,
    pub auto_unique_value: Option<i16>,
    pub local_type_name: &'static str,
    pub minimum_scale: Option<i16>,
    pub maximum_scale: Option<i16>,
    pub sql_data_type: i16,
    pub sql_datetime_sub: Option<i16>,
    pub num_prec_radix: Option<i32>,
    pub interval_precision: Option<i16>,
}

macro_rules! type_info {
    ($name:expr, $t:expr, $size:expr, $pre:expr, $suf:expr, $params:expr,
     $nullable:expr, $case:expr, $search:expr, $unsigned:expr, $fixed:expr,
     $auto:expr, $local:expr, $min:expr, $max:expr, $sqlt:expr, $sub:expr,
     $radix:expr) => {
        TypeInfoRow {
            type_name: $name,
            data_type: $t,
            column_size: $size,
            literal_prefix: $pre,
            literal_suffix: $suf,
            create_params: $params,
            nullable: $nullable,
            case_sensitive: $case,
            searchable: $search,
            unsigned_attribute: $unsigned,
            fixed_prec_scale: $fixed,
            auto_unique_value: $auto,
            local_type_name: $local,
            minimum_scale: $min,
            maximum_scale: $max,
            sql_data_type: $sqlt,
            sql_datetime_sub: $sub,
            num_prec_radix: $radix,
            interval_precision: None,
        }
    };
}

const QUOTE: Option<&str> = Some("'");
const BINARY_PARAMS: Option<&str> = Some("max length");

/// Supported data types in `SQLGetTypeInfo` order.
pub static TYPE_INFO_ROWS: [TypeInfoRow; 21] = [
    type_info!("boolean", -7, Some(1), None, None, None,
        1, 0, 2, None, 0, None, "boolean", Some(0), Some(0), -7, None, Some(10)),
    type_info!("bigint", -5, Some(19), None, None, None,
        1, 0, 3, Some(0), 0, Some(0), "bigint", Some(0), Some(0), -5, None, Some(10)),
    type_info!("character", 1, Some(65535), QUOTE, QUOTE, Some("length"),
        1, 1, 3, None, 0, None, "char", None, None, 1, None, None),
    type_info!("numeric", 2, Some(19), None, None, Some("precision,scale"),
        1, 0, 3, Some(0), 0, Some(0), "numeric", Some(0), Some(18), 2, None, Some(10)),
    type_info!("integer", 4, Some(10), None, None, None,
        1, 0, 3, Some(0), 0, Some(0), "integer", Some(0), Some(0), 4, None, Some(10)),
    type_info!("smallint", 5, Some(5), None, None, None,
        1, 0, 3, Some(0), 0, Some(0), "smallint", Some(0), Some(0), 5, None, Some(10)),
    type_info!("real", 7, Some(24), None, None, None,
        1, 0, 3, Some(0), 0, Some(0), "real", None, None, 7, None, Some(2)),
    type_info!("double precision", 8, Some(53), None, None, None,
        1, 0, 3, Some(0), 0, Some(0), "double precision", None, None, 8, None, Some(2)),
    type_info!("character varying", 12, Some(65535), QUOTE, QUOTE, BINARY_PARAMS,
        1, 1, 3, None, 0, None, "varchar", None, None, 12, None, None),
    type_info!("date", 91, Some(10), Some("{d '"), Some("'}"), None,
        1, 0, 3, None, 0, None, "date", None, None, 9, Some(1), None),
    type_info!("timestamp", 93, Some(26), Some("{ts '"), Some("'}"), None,
        1, 0, 3, None, 0, None, "timestamp", Some(0), Some(6), 9, Some(3), None),
    type_info!("time", 92, Some(15), Some("{t '"), Some("'}"), None,
        1, 0, 3, None, 0, None, "time", Some(0), Some(6), 9, Some(2), None),
    type_info!("timetz", 92, Some(21), QUOTE, QUOTE, None,
        1, 0, 3, None, 0, None, "timetz", Some(0), Some(6), 9, Some(2), None),
    type_info!("timestamptz", 93, Some(35), QUOTE, QUOTE, None,
        1, 0, 3, None, 0, None, "timestamptz", Some(0), Some(6), 9, Some(3), None),
    type_info!("bpchar", 1, Some(256), QUOTE, QUOTE, Some("length"),
        1, 1, 3, None, 0, None, "bpchar", None, None, 1, None, None),
    type_info!("geometry", -4, Some(1000000), QUOTE, QUOTE, BINARY_PARAMS,
        1, 1, 3, None, 0, None, "geometry", None, None, -4, None, None),
    type_info!("super", -1, Some(4194304), QUOTE, QUOTE, BINARY_PARAMS,
        1, 1, 3, None, 0, None, "super", None, None, -1, None, None),
    type_info!("varbyte", -4, Some(1000000), QUOTE, QUOTE, BINARY_PARAMS,
        1, 1, 3, None, 0, None, "varbyte", None, None, -4, None, None),
    type_info!("geography", -4, Some(1000000), QUOTE, QUOTE, BINARY_PARAMS,
        1, 0, 3, None, 0, None, "geography", None, None, -4, None, None),
    type_info!("intervaly2m", 107, Some(32), QUOTE, QUOTE, None,
        1, 0, 3, None, 0, None, "intervaly2m", Some(0), Some(0), 7, None, None),
    type_info!("intervald2s", 110, Some(64), QUOTE, QUOTE, None,
        1, 0, 3, None, 0, None, "intervald2s", Some(0), Some(0), 10, None, None),
];

/// Select the rows answering a type info request.
///
/// `SQL_ALL_TYPES` selects every row; any other code selects the first row
/// with that `DATA_TYPE` after ODBC 2 codes are mapped.
pub fn select_type_info_rows(data_type: i16) -> Result<Vec<&'static TypeInfoRow>> {
    if data_type == SQL_ALL_TYPES {
        return Ok(TYPE_INFO_ROWS.iter().collect());
    }
    let wanted = odbc2_to_odbc3(data_type);
    TYPE_INFO_ROWS
        .iter()
        .find(|row| row.data_type == wanted)
        .map(|row| vec![row])
        .ok_or_else(|| {
            RedshiftErrorHelper::invalid_argument()
                .message("Invalid SQL data type")
                .sqlstate(SQLSTATE_INVALID_DATA_TYPE)
        })
}

fn text_or_null(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => format!("'{}'", escape_literal(v)),
        _ => "NULL".to_string(),
    }
}

fn number_or_null<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "NULL".to_string(), |v| v.to_string())
}

fn render_type_info_row(row: &TypeInfoRow) -> String {
    [
        format!("'{}' AS TYPE_NAME", escape_literal(row.type_name)),
        format!("{}::int2 AS DATA_TYPE", row.data_type),
        format!("{} AS COLUMN_SIZE", number_or_null(row.column_size)),
        format!("{} AS LITERAL_PREFIX", text_or_null(row.literal_prefix)),
        format!("{} AS LITERAL_SUFFIX", text_or_null(row.literal_suffix)),
        format!("{} AS CREATE_PARAMS", text_or_null(row.create_params)),
        format!("{}::int2 AS NULLABLE", row.nullable),
        format!("{}::int2 AS CASE_SENSITIVE", row.case_sensitive),
        format!("{}::int2 AS SEARCHABLE", row.searchable),
        format!("{} AS UNSIGNED_ATTRIBUTE", number_or_null(row.unsigned_attribute)),
        format!("{}::int2 AS FIXED_PREC_SCALE", row.fixed_prec_scale),
        format!("{} AS AUTO_UNIQUE_VALUE", number_or_null(row.auto_unique_value)),
        format!("'{}' AS LOCAL_TYPE_NAME", escape_literal(row.local_type_name)),
        format!("{} AS MINIMUM_SCALE", number_or_null(row.minimum_scale)),
        format!("{} AS MAXIMUM_SCALE", number_or_null(row.maximum_scale)),
        format!("{}::int2 AS SQL_DATA_TYPE", row.sql_data_type),
        format!("{} AS SQL_DATETIME_SUB", number_or_null(row.sql_datetime_sub)),
        format!("{} AS NUM_PREC_RADIX", number_or_null(row.num_prec_radix)),
        format!("{} AS INTERVAL_PRECISION", number_or_null(row.interval_precision)),
    ]
    .join(", ")
}

/// Build the `UNION SELECT` query over the selected type info rows.
pub fn type_info_query(data_type: i16) -> Result<String> {
    let rows = select_type_info_rows(data_type)?;
    let body = rows
        .iter()
        .map(|row| render_type_info_row(row))
        .collect::<Vec<_>>()
        .join(" UNION SELECT ");
    Ok(format!(" SELECT {} ORDER BY DATA_TYPE ", body))
}
