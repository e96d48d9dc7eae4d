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

//! Recording mock client for catalog tests.

use arrow_array::{ArrayRef, RecordBatch, StringArray};
use arrow_schema::{DataType, Field, Schema};
use async_trait::async_trait;
use redshift_metadata::{
    BatchReader, Catalog, CatalogReader, ExecuteResult, MetadataClient, RedshiftErrorHelper,
    Result, SessionConfig,
};
use std::sync::{Arc, Mutex};

#[derive(Debug)]
enum Reply {
    Rows(RecordBatch),
    Fail(String),
}

/// Answers each statement with the first rule whose fragment it contains.
/// Statements matching no rule get an empty result.
#[derive(Debug, Default)]
pub struct MockClient {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<String>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `batch` to statements containing `fragment`.
    pub fn on(mut self, fragment: &str, batch: RecordBatch) -> Self {
        self.rules.push((fragment.to_string(), Reply::Rows(batch)));
        self
    }

    /// Fail statements containing `fragment`.
    pub fn fail(mut self, fragment: &str, message: &str) -> Self {
        self.rules
            .push((fragment.to_string(), Reply::Fail(message.to_string())));
        self
    }

    /// Every statement executed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataClient for MockClient {
    async fn execute_statement(&self, sql: &str) -> Result<ExecuteResult> {
        self.calls.lock().unwrap().push(sql.to_string());
        let reply = self
            .rules
            .iter()
            .find(|(fragment, _)| sql.contains(fragment.as_str()))
            .map(|(_, reply)| reply);
        let reader = match reply {
            Some(Reply::Rows(batch)) => BatchReader::new(batch.schema(), vec![batch.clone()]),
            Some(Reply::Fail(message)) => {
                return Err(RedshiftErrorHelper::io().message(message.clone()))
            }
            None => BatchReader::empty(Arc::new(Schema::empty())),
        };
        Ok(ExecuteResult {
            reader: Box::new(reader),
        })
    }
}

/// A batch of nullable string columns.
pub fn utf8_batch(columns: &[(&str, Vec<Option<&str>>)]) -> RecordBatch {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, _)| Field::new(*name, DataType::Utf8, true))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .iter()
        .map(|(_, values)| Arc::new(StringArray::from(values.clone())) as ArrayRef)
        .collect();
    RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays).unwrap()
}

/// A one-row reply, used where only the presence of a row matters.
pub fn one_row() -> RecordBatch {
    utf8_batch(&[("?column?", vec![Some("1")])])
}

/// Catalog over `client`, with the runtime it blocks on.
pub fn catalog(client: Arc<MockClient>, session: SessionConfig) -> (Catalog, tokio::runtime::Runtime) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let catalog = Catalog::new(client, session, runtime.handle().clone());
    (catalog, runtime)
}

pub fn collect(reader: CatalogReader) -> Vec<RecordBatch> {
    reader.map(|batch| batch.unwrap()).collect()
}

/// Non-null values of a string column across `batches`.
pub fn strings(batches: &[RecordBatch], column: &str) -> Vec<String> {
    use arrow_array::cast::AsArray;
    batches
        .iter()
        .flat_map(|batch| {
            let idx = batch.schema().index_of(column).unwrap();
            batch
                .column(idx)
                .as_string::<i32>()
                .iter()
                .flatten()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}
