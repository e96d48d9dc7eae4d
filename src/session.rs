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

//! Session-scoped settings consulted by catalog resolution.

use crate::error::RedshiftErrorHelper;
use crate::logging::LogConfig;
use adbc_core::error::Result;
use adbc_core::options::{OptionConnection, OptionValue};
use adbc_core::Optionable;

pub const OPT_CURRENT_DB_ONLY: &str = "redshift.catalog.current_db_only";
pub const OPT_DATASHARE_ENABLED: &str = "redshift.catalog.datashare_enabled";
pub const OPT_EXTERNAL_DATABASE: &str = "redshift.catalog.external_database";
pub const OPT_METADATA_ID: &str = "redshift.metadata.metadata_id";
pub const OPT_USE_SERVER_API: &str = "redshift.metadata.use_server_api";
pub const OPT_ODBC_VERSION: &str = "redshift.odbc_version";
pub const OPT_LOG_LEVEL: &str = "redshift.log_level";
pub const OPT_LOG_FILE: &str = "redshift.log_file";

/// ODBC behavior version reported by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OdbcVersion {
    V2,
    V3,
}

/// Connection settings that decide how catalog requests are resolved.
///
/// The visibility mode (single vs. multi database) is derived from these
/// flags on every request and never cached, since any of them may change
/// between calls.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Name of the database this connection is attached to.
    database: Option<String>,
    current_db_only: bool,
    datashare_enabled: bool,
    external_database: bool,
    /// When set, name arguments are compared with `=` instead of `LIKE`.
    metadata_id: bool,
    /// Resolve catalogs/schemas/tables/columns through `SHOW` commands.
    use_server_api: bool,
    odbc_version: OdbcVersion,
    log_config: LogConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            database: None,
            current_db_only: true,
            datashare_enabled: false,
            external_database: false,
            metadata_id: false,
            use_server_api: false,
            odbc_version: OdbcVersion::V3,
            log_config: LogConfig::default(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    pub fn with_current_db_only(mut self, value: bool) -> Self {
        self.current_db_only = value;
        self
    }

    pub fn with_datashare_enabled(mut self, value: bool) -> Self {
        self.datashare_enabled = value;
        self
    }

    pub fn with_external_database(mut self, value: bool) -> Self {
        self.external_database = value;
        self
    }

    pub fn with_metadata_id(mut self, value: bool) -> Self {
        self.metadata_id = value;
        self
    }

    pub fn with_server_api(mut self, value: bool) -> Self {
        self.use_server_api = value;
        self
    }

    pub fn with_odbc_version(mut self, version: OdbcVersion) -> Self {
        self.odbc_version = version;
        self
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    pub fn current_db_only(&self) -> bool {
        self.current_db_only
    }

    pub fn datashare_enabled(&self) -> bool {
        self.datashare_enabled
    }

    pub fn external_database(&self) -> bool {
        self.external_database
    }

    pub fn metadata_id(&self) -> bool {
        self.metadata_id
    }

    pub fn use_server_api(&self) -> bool {
        self.use_server_api
    }

    pub fn odbc_version(&self) -> OdbcVersion {
        self.odbc_version
    }

    pub fn log_config(&self) -> &LogConfig {
        &self.log_config
    }

    /// Whether only the connected database is visible to catalog calls.
    ///
    /// An external database forces single-database semantics regardless of
    /// the datashare setting.
    pub fn is_single_database(&self) -> bool {
        if self.external_database {
            return true;
        }
        self.current_db_only || !self.datashare_enabled
    }

    /// Parse a boolean option value.
    fn parse_bool_option(value: &OptionValue) -> Option<bool> {
        match value {
            OptionValue::String(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            OptionValue::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    /// Parse an integer option value.
    fn parse_int_option(value: &OptionValue) -> Option<i64> {
        match value {
            OptionValue::String(s) => s.trim().parse().ok(),
            OptionValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    fn set_bool(
        slot: &mut bool,
        key: &OptionConnection,
        value: &OptionValue,
    ) -> Result<()> {
        match Self::parse_bool_option(value) {
            Some(v) => {
                *slot = v;
                Ok(())
            }
            None => Err(invalid_option(key, value)),
        }
    }
}

fn invalid_option(key: &OptionConnection, value: &OptionValue) -> adbc_core::error::Error {
    RedshiftErrorHelper::set_invalid_option(key.as_ref(), &format!("{:?}", value)).to_adbc()
}

impl Optionable for SessionConfig {
    type Option = OptionConnection;

    fn set_option(&mut self, key: Self::Option, value: OptionValue) -> Result<()> {
        match key {
            OptionConnection::CurrentCatalog => {
                if let OptionValue::String(s) = value {
                    self.database = Some(s);
                    Ok(())
                } else {
                    Err(invalid_option(&key, &value))
                }
            }
            OptionConnection::Other(ref s) => match s.as_str() {
                OPT_CURRENT_DB_ONLY => Self::set_bool(&mut self.current_db_only, &key, &value),
                OPT_DATASHARE_ENABLED => {
                    Self::set_bool(&mut self.datashare_enabled, &key, &value)
                }
                OPT_EXTERNAL_DATABASE => {
                    Self::set_bool(&mut self.external_database, &key, &value)
                }
                OPT_METADATA_ID => Self::set_bool(&mut self.metadata_id, &key, &value),
                OPT_USE_SERVER_API => Self::set_bool(&mut self.use_server_api, &key, &value),
                OPT_ODBC_VERSION => match Self::parse_int_option(&value) {
                    Some(2) => {
                        self.odbc_version = OdbcVersion::V2;
                        Ok(())
                    }
                    Some(3) => {
                        self.odbc_version = OdbcVersion::V3;
                        Ok(())
                    }
                    _ => Err(invalid_option(&key, &value)),
                },
                OPT_LOG_LEVEL => {
                    if let OptionValue::String(v) = value {
                        self.log_config.level = Some(v);
                        Ok(())
                    } else {
                        Err(invalid_option(&key, &value))
                    }
                }
                OPT_LOG_FILE => {
                    if let OptionValue::String(v) = value {
                        self.log_config.file = Some(v);
                        Ok(())
                    } else {
                        Err(invalid_option(&key, &value))
                    }
                }
                _ => Err(RedshiftErrorHelper::set_unknown_option(key.as_ref()).to_adbc()),
            },
            _ => Err(RedshiftErrorHelper::set_unknown_option(key.as_ref()).to_adbc()),
        }
    }

    fn get_option_string(&self, key: Self::Option) -> Result<String> {
        let flag = |v: bool| if v { "true" } else { "false" }.to_string();
        match key {
            OptionConnection::CurrentCatalog => self.database.clone().ok_or_else(|| {
                RedshiftErrorHelper::invalid_state()
                    .message("option 'current catalog' is not set")
                    .to_adbc()
            }),
            OptionConnection::Other(ref s) => match s.as_str() {
                OPT_CURRENT_DB_ONLY => Ok(flag(self.current_db_only)),
                OPT_DATASHARE_ENABLED => Ok(flag(self.datashare_enabled)),
                OPT_EXTERNAL_DATABASE => Ok(flag(self.external_database)),
                OPT_METADATA_ID => Ok(flag(self.metadata_id)),
                OPT_USE_SERVER_API => Ok(flag(self.use_server_api)),
                OPT_LOG_LEVEL => self.log_config.level.clone().ok_or_else(|| {
                    RedshiftErrorHelper::invalid_state()
                        .message(format!("option '{}' is not set", OPT_LOG_LEVEL))
                        .to_adbc()
                }),
                OPT_LOG_FILE => self.log_config.file.clone().ok_or_else(|| {
                    RedshiftErrorHelper::invalid_state()
                        .message(format!("option '{}' is not set", OPT_LOG_FILE))
                        .to_adbc()
                }),
                _ => Err(RedshiftErrorHelper::get_unknown_option(key.as_ref()).to_adbc()),
            },
            _ => Err(RedshiftErrorHelper::get_unknown_option(key.as_ref()).to_adbc()),
        }
    }

    fn get_option_bytes(&self, key: Self::Option) -> Result<Vec<u8>> {
        Err(RedshiftErrorHelper::get_unknown_option(key.as_ref()).to_adbc())
    }

    fn get_option_int(&self, key: Self::Option) -> Result<i64> {
        match key {
            OptionConnection::Other(ref s) if s == OPT_ODBC_VERSION => Ok(match self.odbc_version {
                OdbcVersion::V2 => 2,
                OdbcVersion::V3 => 3,
            }),
            _ => Err(RedshiftErrorHelper::get_unknown_option(key.as_ref()).to_adbc()),
        }
    }

    fn get_option_double(&self, key: Self::Option) -> Result<f64> {
        Err(RedshiftErrorHelper::get_unknown_option(key.as_ref()).to_adbc())
    }
}
