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
//! Fan-in of per-endpoint Flight streams into one consumable chunk sequence.
//!
//! Responsibilities:
//! - Opens one stream per endpoint of a `FlightInfo` (through the shared
//!   client, or through a dedicated connection when the endpoint names its
//!   own locations) and runs one producer thread per stream.
//! - Bounds the number of undelivered chunks across all endpoints and
//!   surfaces the first stream failure by aborting the whole fan-in.
//!
//! Key exported interfaces:
//! - Types: `FlightChunkBuffer`, `EndpointStream`.
//! - Traits: `ChunkStream`.
//!
//! Current limitations:
//! - Chunks from different endpoints interleave in arrival order; only the
//!   order within a single endpoint's stream is preserved.

use std::sync::Arc;

use arrow_flight::FlightInfo;

use crate::client::chunk::Chunk;
use crate::client::flight_client::FlightClient;
use crate::common::config;
use crate::error::DriverError;
use crate::flightline_logging::{debug, warn};
use crate::runtime::blocking_queue::BlockingQueue;

/// One ordered stream of chunks, pulled synchronously.
pub trait ChunkStream: Send + 'static {
    /// Next chunk of this stream; `Ok(None)` once cleanly exhausted.
    fn next_chunk(&mut self) -> Result<Option<Chunk>, DriverError>;
}

/// A stream paired with the dedicated connection that serves it, if any.
///
/// Endpoints without explicit locations read through the statement's shared
/// client and carry no keep-alive handle.
pub struct EndpointStream {
    stream: Box<dyn ChunkStream>,
    keep_alive: Option<Arc<FlightClient>>,
}

impl EndpointStream {
    pub fn new(stream: Box<dyn ChunkStream>, keep_alive: Option<Arc<FlightClient>>) -> Self {
        Self { stream, keep_alive }
    }
}

struct ChunkItem {
    result: Result<Chunk, DriverError>,
    // Owned by every item the stream yields, so the dedicated connection
    // stays open for exactly as long as its data is still in flight.
    _keep_alive: Option<Arc<FlightClient>>,
}

/// Bounded fan-in buffer over all endpoint streams of one result set.
pub struct FlightChunkBuffer {
    queue: BlockingQueue<ChunkItem>,
}

impl FlightChunkBuffer {
    /// Open every endpoint stream of `info` and start its producer.
    ///
    /// Queue capacity comes from the `chunk_buffer_capacity` config knob.
    /// Fails wholesale if any endpoint stream cannot be opened.
    pub fn try_new(client: &FlightClient, info: &FlightInfo) -> Result<Self, DriverError> {
        let mut streams = Vec::with_capacity(info.endpoint.len());
        for endpoint in &info.endpoint {
            let ticket = endpoint
                .ticket
                .clone()
                .ok_or_else(|| DriverError::Stream("flight endpoint carries no ticket".into()))?;

            if endpoint.location.is_empty() {
                let stream = client.do_get(ticket)?;
                streams.push(EndpointStream::new(Box::new(stream), None));
            } else {
                // The endpoint names its own locations; data must be read
                // through a connection to one of them, not the original one.
                let dedicated = Arc::new(FlightClient::connect(&endpoint.location[0].uri)?);
                let stream = dedicated.do_get(ticket)?;
                streams.push(EndpointStream::new(Box::new(stream), Some(dedicated)));
            }
        }
        Ok(Self::from_streams(streams, config::chunk_buffer_capacity()))
    }

    /// Build the fan-in over already-opened streams.
    pub fn from_streams(streams: Vec<EndpointStream>, queue_capacity: usize) -> Self {
        let queue = BlockingQueue::new(queue_capacity);
        debug!(
            "starting chunk fan-in: {} endpoint streams, capacity {}",
            streams.len(),
            queue_capacity
        );
        for endpoint_stream in streams {
            let EndpointStream {
                mut stream,
                keep_alive,
            } = endpoint_stream;
            let mut failed = false;
            queue.add_producer(move || {
                if failed {
                    return None;
                }
                match stream.next_chunk() {
                    Ok(Some(chunk)) => Some(ChunkItem {
                        result: Ok(chunk),
                        _keep_alive: keep_alive.clone(),
                    }),
                    Ok(None) => None,
                    Err(err) => {
                        // Surface the failure exactly once, then end this
                        // producer; the consumer aborts the whole fan-in.
                        failed = true;
                        Some(ChunkItem {
                            result: Err(err),
                            _keep_alive: keep_alive.clone(),
                        })
                    }
                }
            });
        }
        Self { queue }
    }

    /// Next chunk from any endpoint; `Ok(None)` once every stream has
    /// drained.
    ///
    /// The first stream error closes the queue, stopping all remaining
    /// producers, and is returned to the caller; chunks other endpoints had
    /// already produced but not delivered are discarded with it.
    pub fn get_next(&self) -> Result<Option<Chunk>, DriverError> {
        let Some(item) = self.queue.pop() else {
            return Ok(None);
        };
        match item.result {
            Ok(chunk) => Ok(Some(chunk)),
            Err(err) => {
                warn!("endpoint stream failed, aborting fan-in: {}", err);
                self.close();
                Err(err)
            }
        }
    }

    /// Shut down all producers and release their connections. Idempotent.
    pub fn close(&self) {
        self.queue.close();
    }
}

impl Drop for FlightChunkBuffer {
    fn drop(&mut self) {
        self.close();
    }
}
