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
//! Blocking Arrow Flight client facade.
//!
//! The driver consumer runs on plain OS threads, so every Flight call is
//! driven to completion on the shared flight runtime; no async surface leaks
//! out of this module.

use std::time::Duration;

use arrow::array::RecordBatch;
use arrow_flight::decode::FlightRecordBatchStream;
use arrow_flight::error::FlightError;
use arrow_flight::flight_service_client::FlightServiceClient;
use arrow_flight::{FlightDescriptor, FlightInfo, Ticket};
use futures::{StreamExt, TryStreamExt};
use tonic::transport::Channel;

use crate::client::chunk::Chunk;
use crate::client::chunk_buffer::ChunkStream;
use crate::common::config;
use crate::error::DriverError;
use crate::flightline_logging::{debug, info};
use crate::runtime::flight_runtime;

/// Connection to one Flight service location.
///
/// Cheap to clone per call internally; the fan-in shares one client across
/// endpoints without locations and opens dedicated clients for endpoints
/// that name their own.
pub struct FlightClient {
    inner: FlightServiceClient<Channel>,
    endpoint: String,
}

impl FlightClient {
    /// Connect to a Flight server, e.g. `http://host:32010`.
    pub fn connect(endpoint: &str) -> Result<Self, DriverError> {
        info!("connecting to flight endpoint {}", endpoint);

        let uri = endpoint.to_string();
        let timeout = Duration::from_millis(config::client_connect_timeout_ms());
        let channel = flight_runtime::block_on(async move {
            let endpoint = Channel::from_shared(uri)
                .map_err(|e| DriverError::InvalidEndpoint(e.to_string()))?;
            endpoint
                .connect_timeout(timeout)
                .connect()
                .await
                .map_err(DriverError::from)
        })
        .map_err(DriverError::Runtime)??;

        Ok(Self {
            inner: FlightServiceClient::new(channel),
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Resolve a query into a `FlightInfo` describing the endpoints that
    /// serve its result partitions.
    pub fn get_flight_info(&self, query: impl Into<String>) -> Result<FlightInfo, DriverError> {
        let descriptor = FlightDescriptor::new_cmd(query.into());
        let mut client = self.inner.clone();
        flight_runtime::block_on(async move {
            let response = client.get_flight_info(descriptor).await?;
            Ok(response.into_inner())
        })
        .map_err(DriverError::Runtime)?
    }

    /// Open the record-batch stream behind one endpoint ticket.
    pub fn do_get(&self, ticket: Ticket) -> Result<FlightDataStream, DriverError> {
        debug!("opening flight stream on {}", self.endpoint);

        let mut client = self.inner.clone();
        let stream = flight_runtime::block_on(async move {
            let response = client.do_get(ticket).await?;
            let stream = response.into_inner().map_err(FlightError::from);
            Ok::<_, DriverError>(FlightRecordBatchStream::new_from_flight_data(stream))
        })
        .map_err(DriverError::Runtime)??;

        Ok(FlightDataStream::new(stream))
    }
}

/// Blocking pull adapter over one decoded Flight stream.
pub struct FlightDataStream {
    inner: FlightRecordBatchStream,
}

impl FlightDataStream {
    pub(crate) fn new(inner: FlightRecordBatchStream) -> Self {
        Self { inner }
    }

    /// Pull the next record batch; `Ok(None)` once the stream is cleanly
    /// exhausted.
    pub fn next_batch(&mut self) -> Result<Option<RecordBatch>, DriverError> {
        let next = flight_runtime::block_on(self.inner.next()).map_err(DriverError::Runtime)?;
        match next {
            None => Ok(None),
            Some(Ok(batch)) => Ok(Some(batch)),
            Some(Err(err)) => Err(DriverError::Flight(err)),
        }
    }
}

impl ChunkStream for FlightDataStream {
    fn next_chunk(&mut self) -> Result<Option<Chunk>, DriverError> {
        Ok(self.next_batch()?.map(Chunk::new))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_to_unreachable_endpoint_fails() {
        let result = FlightClient::connect("http://127.0.0.1:1");
        assert!(result.is_err());
    }

    #[test]
    fn connect_rejects_malformed_uri() {
        let result = FlightClient::connect("not a uri");
        assert!(matches!(result, Err(DriverError::InvalidEndpoint(_))));
    }
}
