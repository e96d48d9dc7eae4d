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

//! Error type for the metadata engine.
//!
//! Errors are built through [`RedshiftErrorHelper`] constructors and refined
//! with chained setters:
//!
//! ```ignore
//! return Err(RedshiftErrorHelper::invalid_argument()
//!     .message("Invalid SQL data type")
//!     .sqlstate("HY004"));
//! ```
//!
//! Every error converts to an [`adbc_core::error::Error`] via [`Error::to_adbc`],
//! carrying the ADBC status code and the ODBC SQLSTATE when one is known.

use adbc_core::error::Status;
use std::ffi::c_char;
use std::fmt;

/// SQLSTATE reported for a failed backend call.
pub const SQLSTATE_GENERAL_ERROR: &str = "HY000";
/// SQLSTATE reported for an unrecognized protocol data type code.
pub const SQLSTATE_INVALID_DATA_TYPE: &str = "HY004";
/// SQLSTATE reported when a required name argument is missing.
pub const SQLSTATE_NULL_POINTER: &str = "HY009";
/// SQLSTATE reported for an unsupported special-columns identifier kind.
pub const SQLSTATE_INVALID_IDENTIFIER_TYPE: &str = "HY097";

/// Broad classification of an error, mapped onto ADBC status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArguments,
    InvalidState,
    Io,
    NotImplemented,
    NotFound,
}

impl ErrorKind {
    fn status(self) -> Status {
        match self {
            ErrorKind::InvalidArguments => Status::InvalidArguments,
            ErrorKind::InvalidState => Status::InvalidState,
            ErrorKind::Io => Status::IO,
            ErrorKind::NotImplemented => Status::NotImplemented,
            ErrorKind::NotFound => Status::NotFound,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::InvalidArguments => "invalid arguments",
            ErrorKind::InvalidState => "invalid state",
            ErrorKind::Io => "io",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::NotFound => "not found",
        };
        f.write_str(s)
    }
}

/// Error raised by catalog resolution.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.render())]
pub struct Error {
    kind: ErrorKind,
    message: String,
    sqlstate: Option<String>,
    context: Option<(String, String)>,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: String::new(),
            sqlstate: None,
            context: None,
        }
    }

    /// Sets the human readable message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the five character ODBC SQLSTATE.
    pub fn sqlstate(mut self, sqlstate: &str) -> Self {
        self.sqlstate = Some(sqlstate.to_string());
        self
    }

    /// Records the catalog operation and the phase that failed.
    ///
    /// The first context attached wins, so the innermost failing call is
    /// what the caller sees.
    pub fn context(mut self, operation: &str, phase: &str) -> Self {
        if self.context.is_none() {
            self.context = Some((operation.to_string(), phase.to_string()));
        }
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn get_message(&self) -> &str {
        &self.message
    }

    pub fn get_sqlstate(&self) -> Option<&str> {
        self.sqlstate.as_deref()
    }

    /// Returns the `(operation, phase)` pair, if one was attached.
    pub fn get_context(&self) -> Option<(&str, &str)> {
        self.context
            .as_ref()
            .map(|(op, phase)| (op.as_str(), phase.as_str()))
    }

    fn render(&self) -> String {
        match &self.context {
            Some((op, phase)) => format!("{}: Error in {}: {}", op, phase, self.message),
            None if self.message.is_empty() => self.kind.to_string(),
            None => self.message.clone(),
        }
    }

    /// Converts into the ADBC error type returned across the driver API.
    pub fn to_adbc(&self) -> adbc_core::error::Error {
        let mut err =
            adbc_core::error::Error::with_message_and_status(self.render(), self.kind.status());
        if let Some(state) = &self.sqlstate {
            let mut raw: [c_char; 5] = [0; 5];
            for (slot, byte) in raw.iter_mut().zip(state.bytes()) {
                *slot = byte as c_char;
            }
            err.sqlstate = raw;
        }
        err
    }
}

impl From<Error> for adbc_core::error::Error {
    fn from(value: Error) -> Self {
        value.to_adbc()
    }
}

impl From<arrow_schema::ArrowError> for Error {
    fn from(value: arrow_schema::ArrowError) -> Self {
        RedshiftErrorHelper::io().message(format!("Arrow error: {}", value))
    }
}

/// Constructors for [`Error`], one per failure class.
pub struct RedshiftErrorHelper;

impl RedshiftErrorHelper {
    pub fn invalid_argument() -> Error {
        Error::new(ErrorKind::InvalidArguments)
    }

    pub fn invalid_state() -> Error {
        Error::new(ErrorKind::InvalidState)
    }

    pub fn io() -> Error {
        Error::new(ErrorKind::Io).sqlstate(SQLSTATE_GENERAL_ERROR)
    }

    pub fn not_implemented() -> Error {
        Error::new(ErrorKind::NotImplemented)
    }

    pub fn not_found() -> Error {
        Error::new(ErrorKind::NotFound)
    }

    pub fn set_unknown_option(key: &str) -> Error {
        Self::not_found().message(format!("Unknown option: {}", key))
    }

    pub fn set_invalid_option(key: &str, value: &str) -> Error {
        Self::invalid_argument().message(format!("Invalid value for option {}: {}", key, value))
    }

    pub fn get_unknown_option(key: &str) -> Error {
        Self::not_found().message(format!("Option not set or unknown: {}", key))
    }
}
