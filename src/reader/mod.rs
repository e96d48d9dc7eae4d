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

//! Row readers for statement results.
//!
//! This module provides:
//! - `ResultReader`: the uniform batch-at-a-time interface every executed
//!   statement hands back, whether it ran a synthesized catalog query or a
//!   `SHOW` command
//! - `BatchReader`: an in-memory reader over pre-built batches

use crate::error::Result;
use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use std::collections::VecDeque;

/// Trait for reading result batches from an executed statement.
pub trait ResultReader: Send {
    /// Get the schema of the result.
    fn schema(&self) -> Result<SchemaRef>;

    /// Get the next record batch, or None if end of results.
    fn next_batch(&mut self) -> Result<Option<RecordBatch>>;
}

/// Reader over batches already held in memory.
///
/// Used by clients whose transport materializes the whole reply, and by
/// tests to script backend responses.
#[derive(Debug)]
pub struct BatchReader {
    schema: SchemaRef,
    batches: VecDeque<RecordBatch>,
}

impl BatchReader {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self {
            schema,
            batches: batches.into(),
        }
    }

    /// Build a reader from batches that share one schema.
    ///
    /// Returns `None` when `batches` is empty since there is no schema to
    /// report; use [`BatchReader::empty`] for that case.
    pub fn from_batches(batches: Vec<RecordBatch>) -> Option<Self> {
        let schema = batches.first()?.schema();
        Some(Self::new(schema, batches))
    }

    /// A reader with a schema and no rows.
    pub fn empty(schema: SchemaRef) -> Self {
        Self::new(schema, Vec::new())
    }
}

impl ResultReader for BatchReader {
    fn schema(&self) -> Result<SchemaRef> {
        Ok(self.schema.clone())
    }

    fn next_batch(&mut self) -> Result<Option<RecordBatch>> {
        Ok(self.batches.pop_front())
    }
}

/// Drain a reader fully, returning every batch it produced.
pub fn drain(reader: &mut dyn ResultReader) -> Result<Vec<RecordBatch>> {
    let mut batches = Vec::new();
    while let Some(batch) = reader.next_batch()? {
        batches.push(batch);
    }
    Ok(batches)
}
