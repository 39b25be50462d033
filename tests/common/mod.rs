// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
//! Common utilities and helpers for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use arrow::array::{Int64Array, RecordBatch};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use flightline::error::DriverError;
use flightline::{Chunk, ChunkStream};

pub fn int64_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, false)]))
}

/// Single-column chunk of tagged values, used to track provenance across the
/// fan-in.
pub fn int64_chunk(values: &[i64]) -> Chunk {
    let batch = RecordBatch::try_new(
        int64_schema(),
        vec![Arc::new(Int64Array::from(values.to_vec()))],
    )
    .expect("build test batch");
    Chunk::new(batch)
}

pub fn chunk_values(chunk: &Chunk) -> Vec<i64> {
    use arrow::array::AsArray;
    use arrow::datatypes::Int64Type;
    chunk
        .column(0)
        .as_primitive::<Int64Type>()
        .values()
        .to_vec()
}

/// Replays a fixed script of stream events, then reports exhaustion.
pub struct ScriptedStream {
    events: Vec<Result<Option<Chunk>, DriverError>>,
}

impl ScriptedStream {
    pub fn new(mut events: Vec<Result<Option<Chunk>, DriverError>>) -> Self {
        events.reverse();
        Self { events }
    }

    /// One single-value chunk per entry of `values`, then clean exhaustion.
    pub fn of_values(values: &[i64]) -> Self {
        Self::new(values.iter().map(|v| Ok(Some(int64_chunk(&[*v])))).collect())
    }
}

impl ChunkStream for ScriptedStream {
    fn next_chunk(&mut self) -> Result<Option<Chunk>, DriverError> {
        self.events.pop().unwrap_or(Ok(None))
    }
}

/// Never exhausts; yields `tag`-marked chunks with an incrementing sequence.
pub struct EndlessStream {
    tag: i64,
    next_seq: i64,
}

impl EndlessStream {
    pub fn new(tag: i64) -> Self {
        Self { tag, next_seq: 0 }
    }
}

impl ChunkStream for EndlessStream {
    fn next_chunk(&mut self) -> Result<Option<Chunk>, DriverError> {
        let value = self.tag * 1_000_000 + self.next_seq;
        self.next_seq += 1;
        Ok(Some(int64_chunk(&[value])))
    }
}
