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
use crate::flightline_config::config as flightline_app_config;

pub(crate) fn chunk_buffer_capacity() -> usize {
    flightline_app_config()
        .ok()
        .map(|c| c.runtime.chunk_buffer_capacity)
        .unwrap_or(5)
}

pub(crate) fn client_connect_timeout_ms() -> u64 {
    flightline_app_config()
        .ok()
        .map(|c| c.client.connect_timeout_ms)
        .unwrap_or(20_000)
}

pub(crate) fn flight_runtime_worker_threads() -> usize {
    flightline_app_config()
        .ok()
        .map(|c| c.runtime.flight_runtime_worker_threads)
        .unwrap_or(2)
}

pub(crate) fn flight_runtime_max_blocking_threads() -> usize {
    flightline_app_config()
        .ok()
        .map(|c| c.runtime.flight_runtime_max_blocking_threads)
        .unwrap_or(16)
}
