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
use thiserror::Error;

/// Errors surfaced by the driver core.
///
/// A `DriverError` produced by one endpoint stream travels through the chunk
/// queue and out of `FlightChunkBuffer::get_next`, aborting the whole fan-in.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Endpoint URI could not be parsed into a channel target.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// A remote data stream failed or is malformed.
    #[error("flight stream error: {0}")]
    Stream(String),

    /// Arrow error while decoding or handling record batches.
    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Arrow Flight protocol error.
    #[error("flight error: {0}")]
    Flight(#[from] arrow_flight::error::FlightError),

    /// gRPC transport error.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// gRPC status returned by the server.
    #[error("grpc error: {0}")]
    Grpc(#[from] tonic::Status),

    /// The global flight runtime is unavailable or misused.
    #[error("runtime error: {0}")]
    Runtime(String),

    /// No cell accessor exists for a column type.
    #[error("unsupported column type: {0}")]
    Unsupported(String),
}
