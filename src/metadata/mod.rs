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

//! Catalog metadata resolution.
//!
//! This module turns catalog requests into backend statements and the
//! replies into the fixed result shapes.
//!
//! ## Module Structure
//!
//! - `types`: Catalog requests and intermediate rows
//! - `type_mapping`: Native type names to ODBC type descriptors
//! - `strategy`: Schema strategy selection and the external-schema probe
//! - `filter`: Filter fragments, escaping and table type filters
//! - `templates`: Fixed catalog query text
//! - `query`: Query synthesis per operation and strategy
//! - `sql`: `SHOW` command builder
//! - `parse`: `SHOW` result parsing
//! - `service`: Statement execution and the `SHOW` fan-out
//! - `schemas`: Fixed Arrow result schemas
//! - `builder`: Result batch assembly and conformance

pub mod builder;
pub mod filter;
pub mod parse;
pub mod query;
pub mod schemas;
pub mod service;
pub mod sql;
pub mod strategy;
pub mod templates;
pub mod type_mapping;
pub mod types;

// Re-export commonly used types
pub use service::MetadataService;
pub use sql::SqlCommandBuilder;
pub use strategy::SchemaStrategy;
pub use types::{CatalogOperation, CatalogRequest, IdentifierType, TypeDescriptor};
