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
use crate::flightline_logging::debug;

/// Non-fatal warning sink filled by the cell accessors.
///
/// The surrounding driver layer owns one per statement and turns its records
/// into status diagnostics; the accessors only append here. Truncation never
/// surfaces as an error, only as a record in this sink.
#[derive(Debug, Default)]
pub struct Diagnostics {
    truncations: usize,
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cell did not fit its target slot and a prefix was copied.
    pub fn add_truncation_warning(&mut self) {
        self.truncations += 1;
        debug!("cell value truncated to fit target buffer");
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn truncation_count(&self) -> usize {
        self.truncations
    }

    pub fn has_warnings(&self) -> bool {
        self.truncations > 0 || !self.warnings.is_empty()
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}
