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

//! `WHERE` clause fragments for catalog queries.
//!
//! Every fragment starts with ` AND ` so it can be appended after a template
//! that ends inside a `WHERE`. Values are embedded as single-quoted literals
//! with embedded quotes doubled; nothing else is rewritten, so `%` and `_`
//! keep their `LIKE` meaning.

use std::borrow::Cow;

/// Double every single quote so `value` can sit inside `'...'`.
pub fn escape_literal(value: &str) -> Cow<'_, str> {
    if value.contains('\'') {
        Cow::Owned(value.replace('\'', "''"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Whether `name` matches exactly one object name.
///
/// In metadata-id mode every name is literal. Otherwise a name is exact
/// when it has no `%` or `_` that is not preceded by a backslash.
pub fn is_exact_name(name: &str, metadata_id: bool) -> bool {
    if name.is_empty() {
        return false;
    }
    if metadata_id {
        return true;
    }
    let mut escaped = false;
    for c in name.chars() {
        match c {
            '\\' if !escaped => escaped = true,
            '%' | '_' if !escaped => return false,
            _ => escaped = false,
        }
    }
    true
}

/// The literal name an exact pattern refers to, with backslash escapes removed.
///
/// Returns `None` when the pattern is not exact.
pub fn exact_name(name: &str, metadata_id: bool) -> Option<String> {
    if !is_exact_name(name, metadata_id) {
        return None;
    }
    if metadata_id {
        return Some(name.to_string());
    }
    let mut literal = String::with_capacity(name.len());
    let mut escaped = false;
    for c in name.chars() {
        if c == '\\' && !escaped {
            escaped = true;
            continue;
        }
        escaped = false;
        literal.push(c);
    }
    Some(literal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternToken {
    AnyRun,
    AnyOne,
    Literal(char),
}

/// Evaluate a `LIKE` pattern against `value` the way the server would.
///
/// An empty pattern matches everything.
pub fn like_matches(pattern: &str, value: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    let mut tokens = Vec::new();
    let mut escaped = false;
    for c in pattern.chars() {
        match c {
            '\\' if !escaped => escaped = true,
            '%' if !escaped => tokens.push(PatternToken::AnyRun),
            '_' if !escaped => tokens.push(PatternToken::AnyOne),
            _ => {
                escaped = false;
                tokens.push(PatternToken::Literal(c));
            }
        }
    }

    let chars: Vec<char> = value.chars().collect();
    // reachable[i]: the tokens so far can consume exactly chars[..i]
    let mut reachable = vec![false; chars.len() + 1];
    reachable[0] = true;
    for token in tokens {
        let mut next = vec![false; chars.len() + 1];
        match token {
            PatternToken::AnyRun => {
                let mut seen = false;
                for (i, slot) in next.iter_mut().enumerate() {
                    seen |= reachable[i];
                    *slot = seen;
                }
            }
            PatternToken::AnyOne => {
                for i in 0..chars.len() {
                    next[i + 1] = reachable[i];
                }
            }
            PatternToken::Literal(c) => {
                for i in 0..chars.len() {
                    next[i + 1] = reachable[i] && chars[i] == c;
                }
            }
        }
        reachable = next;
    }
    reachable[chars.len()]
}

/// How a catalog argument is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogScope {
    /// Compare against `current_database()`.
    Connected,
    /// Compare against a database-name column, unless the session only sees
    /// the connected database.
    Column(&'static str),
}

/// An incrementally built filter clause.
#[derive(Debug, Default)]
pub struct FilterClause {
    sql: String,
    values: Vec<String>,
}

impl FilterClause {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_comparison(&mut self, column: &str, op: &str, value: &str) {
        let escaped = escape_literal(value);
        self.sql
            .push_str(&format!(" AND {} {} '{}' ", column, op, escaped));
        self.values.push(escaped.into_owned());
    }

    /// ` AND {column} LIKE '{value}' `, or `=` in metadata-id mode.
    ///
    /// Skipped when `value` is empty.
    pub fn like_or_equal(&mut self, column: &str, value: &str, metadata_id: bool) -> &mut Self {
        if !value.is_empty() {
            let op = if metadata_id { "=" } else { "LIKE" };
            self.push_comparison(column, op, value);
        }
        self
    }

    /// ` AND {column} = '{value}' `. Skipped when `value` is empty.
    pub fn equal(&mut self, column: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.push_comparison(column, "=", value);
        }
        self
    }

    /// Scope the query to a catalog. Skipped when `catalog` is empty.
    pub fn catalog(&mut self, catalog: &str, scope: CatalogScope, single_database: bool) -> &mut Self {
        if catalog.is_empty() {
            return self;
        }
        match scope {
            CatalogScope::Column(column) if !single_database => {
                self.push_comparison(column, "=", catalog)
            }
            _ => {
                let escaped = escape_literal(catalog);
                self.sql.push_str(&format!(
                    " AND current_database() LIKE  '{}' ",
                    escaped
                ));
                self.values.push(escaped.into_owned());
            }
        }
        self
    }

    /// Append a fixed fragment.
    pub fn raw(&mut self, fragment: &str) -> &mut Self {
        self.sql.push_str(fragment);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.sql
    }

    /// Escaped literals in the order they were embedded.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn into_sql(self) -> String {
        self.sql
    }
}

/// ` ORDER BY {columns} `
pub fn order_by(columns: &str) -> String {
    format!(" ORDER BY {} ", columns)
}

/// Table type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    Table,
    View,
    SystemTable,
    SystemView,
    SystemToastTable,
    TemporaryTable,
    TemporaryView,
}

impl TableType {
    pub const ALL: [TableType; 7] = [
        TableType::Table,
        TableType::View,
        TableType::SystemTable,
        TableType::SystemView,
        TableType::TemporaryTable,
        TableType::TemporaryView,
        TableType::SystemToastTable,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TableType::Table => "TABLE",
            TableType::View => "VIEW",
            TableType::SystemTable => "SYSTEM TABLE",
            TableType::SystemView => "SYSTEM VIEW",
            TableType::SystemToastTable => "SYSTEM TOAST TABLE",
            TableType::TemporaryTable => "TEMPORARY TABLE",
            TableType::TemporaryView => "TEMPORARY VIEW",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    /// Predicate over `pg_class c` and `pg_namespace n`.
    fn local_predicate(self) -> &'static str {
        match self {
            TableType::Table => {
                " OR ( c.relkind = 'r' AND n.nspname !~ '^pg_' AND n.nspname <> 'information_schema' ) "
            }
            TableType::View => {
                " OR ( c.relkind = 'v' AND n.nspname <> 'pg_catalog' AND n.nspname <> 'information_schema' ) "
            }
            TableType::SystemTable => {
                " OR ( c.relkind = 'r' AND (n.nspname = 'pg_catalog' OR n.nspname = 'information_schema') ) "
            }
            TableType::SystemView => {
                " OR ( c.relkind = 'v' AND (n.nspname = 'pg_catalog' OR n.nspname = 'information_schema') ) "
            }
            TableType::SystemToastTable => " OR ( c.relkind = 'r' AND n.nspname = 'pg_toast' ) ",
            TableType::TemporaryTable => " OR ( c.relkind = 'r' AND n.nspname ~ '^pg_temp_' ) ",
            TableType::TemporaryView => " OR ( c.relkind = 'v' AND n.nspname ~ '^pg_temp_' ) ",
        }
    }
}

/// Parsed table type argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableTypeFilter {
    /// No type argument; every type qualifies.
    Unconstrained,
    /// Recognized types, in argument order without duplicates.
    Types(Vec<TableType>),
    /// A type argument with no recognized entry. Nothing can match.
    NoMatch,
}

impl TableTypeFilter {
    /// Parse a comma separated list such as `'TABLE','VIEW'` or `TABLE, VIEW`.
    pub fn parse(table_types: &str) -> Self {
        if table_types.trim().is_empty() {
            return TableTypeFilter::Unconstrained;
        }
        let mut types = Vec::new();
        for token in table_types.split(',') {
            let token = token.trim();
            let token = token
                .strip_prefix('\'')
                .and_then(|t| t.strip_suffix('\''))
                .unwrap_or(token)
                .trim();
            if let Some(t) = TableType::from_name(token) {
                if !types.contains(&t) {
                    types.push(t);
                }
            }
        }
        if types.is_empty() {
            TableTypeFilter::NoMatch
        } else {
            TableTypeFilter::Types(types)
        }
    }
}

/// Table types reported by `SHOW TABLES`.
pub const SHOW_TABLE_TYPES: [&str; 7] = [
    "EXTERNAL TABLE",
    "SYSTEM TABLE",
    "SYSTEM VIEW",
    "TABLE",
    "TEMPORARY TABLE",
    "TEMPORARY VIEW",
    "VIEW",
];

/// Table type argument applied to `SHOW TABLES` rows.
///
/// Entries are matched against the reported type by exact name, so any
/// type the server reports can be requested, including `EXTERNAL TABLE`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowTableTypes {
    names: Option<Vec<String>>,
}

impl ShowTableTypes {
    /// Parse a comma separated list; entries are trimmed and unquoted.
    pub fn parse(table_types: &str) -> Self {
        if table_types.trim().is_empty() {
            return Self { names: None };
        }
        let names = table_types
            .split(',')
            .map(|token| {
                let token = token.trim();
                token
                    .strip_prefix('\'')
                    .and_then(|t| t.strip_suffix('\''))
                    .unwrap_or(token)
                    .trim()
                    .to_string()
            })
            .collect();
        Self { names: Some(names) }
    }

    pub fn accepts(&self, table_type: &str) -> bool {
        match &self.names {
            None => true,
            Some(names) => names.iter().any(|n| n == table_type),
        }
    }
}

/// Rendering of a type filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableTypeStyle {
    /// Disjunction of `relkind`/`nspname` predicates.
    Predicates,
    /// `TABLE_TYPE IN (...)` over a derived type column.
    NameList,
}

impl FilterClause {
    /// Append the type filter; no-op for an empty list.
    pub fn table_types(&mut self, types: &[TableType], style: TableTypeStyle) -> &mut Self {
        if types.is_empty() {
            return self;
        }
        match style {
            TableTypeStyle::Predicates => {
                self.sql.push_str(" AND (false ");
                for t in types {
                    self.sql.push_str(t.local_predicate());
                }
                self.sql.push_str(" ) ");
            }
            TableTypeStyle::NameList => {
                let names = types
                    .iter()
                    .map(|t| format!("'{}'", t.name()))
                    .collect::<Vec<_>>()
                    .join(", ");
                self.sql
                    .push_str(&format!(" AND TABLE_TYPE IN ( {} ) ", names));
            }
        }
        self
    }
}
