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

/// Length-indicator value for a NULL cell.
pub const NULL_DATA: i64 = -1;

/// `value_offset` sentinel meaning the cell has been fully drained and must
/// not be fetched again.
pub const VALUE_OFFSET_DONE: i64 = -1;

/// Broken-down calendar timestamp written by the timestamp accessor.
///
/// `fraction` is the sub-second part in nanoseconds, always non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(C)]
pub struct TimestampValue {
    pub year: i16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub fraction: u32,
}

/// Caller-owned target storage, one variant per target C type family.
///
/// Every variant holds one slot per row; `Bytes` is the raw storage for
/// variable-width cells, carved into `buffer_length`-sized slots.
pub enum BindingBuffer<'a> {
    I8(&'a mut [i8]),
    I16(&'a mut [i16]),
    I32(&'a mut [i32]),
    I64(&'a mut [i64]),
    U8(&'a mut [u8]),
    U16(&'a mut [u16]),
    U32(&'a mut [u32]),
    U64(&'a mut [u64]),
    F32(&'a mut [f32]),
    F64(&'a mut [f64]),
    Bit(&'a mut [u8]),
    Bytes(&'a mut [u8]),
    Timestamp(&'a mut [TimestampValue]),
}

/// Caller-supplied description of where cell values land.
///
/// `buffer_length` is the per-row slot size in bytes; it is only meaningful
/// for `Bytes` buffers, where the caller decides how much of each cell fits.
/// If an indicator array is bound, each row's slot receives the value's
/// byte length (pre-truncation) or [`NULL_DATA`].
pub struct ColumnBinding<'a> {
    pub buffer: BindingBuffer<'a>,
    pub buffer_length: usize,
    pub indicators: Option<&'a mut [i64]>,
}

impl<'a> ColumnBinding<'a> {
    pub fn new(buffer: BindingBuffer<'a>, buffer_length: usize) -> Self {
        Self {
            buffer,
            buffer_length,
            indicators: None,
        }
    }

    pub fn with_indicators(mut self, indicators: &'a mut [i64]) -> Self {
        self.indicators = Some(indicators);
        self
    }

    pub(crate) fn set_indicator(&mut self, row: usize, value: i64) {
        if let Some(indicators) = self.indicators.as_deref_mut() {
            indicators[row] = value;
        }
    }
}
