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
//! Timestamp cell accessor.
//!
//! Splits a raw integer timestamp into whole seconds and a sub-second
//! remainder using the unit's divisor. Both divisions floor toward negative
//! infinity, so a value one tick before the epoch lands on 1969-12-31 with a
//! positive fraction instead of wrapping the day boundary.

use std::mem::size_of;

use arrow::array::{Array, PrimitiveArray};
use arrow::datatypes::ArrowTimestampType;
use chrono::{Datelike, Timelike};

use super::binding::{BindingBuffer, ColumnBinding, NULL_DATA, TimestampValue};
use super::calendar::{NANOS_PER_SECOND, datetime_from_seconds_since_epoch, unit_divisor};
use super::diagnostics::Diagnostics;
use super::{CellAccessor, RowStatus};

/// Converts integer timestamps of one arrow time unit into broken-down
/// calendar slots.
pub struct TimestampAccessor<U: ArrowTimestampType> {
    array: PrimitiveArray<U>,
}

impl<U: ArrowTimestampType> std::fmt::Debug for TimestampAccessor<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimestampAccessor")
            .field("array", &self.array)
            .finish()
    }
}

impl<U: ArrowTimestampType> TimestampAccessor<U> {
    pub fn new(array: PrimitiveArray<U>) -> Self {
        Self { array }
    }
}

impl<U: ArrowTimestampType> CellAccessor for TimestampAccessor<U> {
    fn move_single_cell(
        &self,
        binding: &mut ColumnBinding<'_>,
        row: usize,
        _value_offset: &mut i64,
        _update_value_offset: bool,
        diagnostics: &mut Diagnostics,
    ) -> RowStatus {
        assert!(
            row < self.array.len(),
            "row {row} out of range for array of length {}",
            self.array.len()
        );
        if self.array.is_null(row) {
            binding.set_indicator(row, NULL_DATA);
            return RowStatus::Success;
        }

        let raw = self.array.value(row);
        let divisor = unit_divisor(U::UNIT);
        let seconds = raw.div_euclid(divisor);
        let sub_second_ticks = raw.rem_euclid(divisor);

        let Some(utc) = datetime_from_seconds_since_epoch(seconds) else {
            diagnostics.add_warning(format!(
                "timestamp value {raw} is outside the representable calendar range"
            ));
            return RowStatus::Error;
        };

        {
            let BindingBuffer::Timestamp(slots) = &mut binding.buffer else {
                panic!("column binding does not accept timestamp values");
            };
            slots[row] = TimestampValue {
                year: utc.year() as i16,
                month: utc.month() as u16,
                day: utc.day() as u16,
                hour: utc.hour() as u16,
                minute: utc.minute() as u16,
                second: utc.second() as u16,
                fraction: (sub_second_ticks * (NANOS_PER_SECOND / divisor)) as u32,
            };
        }
        binding.set_indicator(row, size_of::<TimestampValue>() as i64);
        RowStatus::Success
    }

    fn cell_length(&self, _binding: &ColumnBinding<'_>) -> usize {
        size_of::<TimestampValue>()
    }

    fn num_cells(&self) -> usize {
        self.array.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::TimestampMillisecondArray;
    use arrow::datatypes::TimestampMillisecondType;

    fn decode_one(raw: i64) -> TimestampValue {
        let accessor = TimestampAccessor::<TimestampMillisecondType>::new(
            TimestampMillisecondArray::from(vec![raw]),
        );
        let mut slots = [TimestampValue::default(); 1];
        let mut binding = ColumnBinding::new(BindingBuffer::Timestamp(&mut slots), 0);
        let mut diagnostics = Diagnostics::new();
        let mut value_offset = 0_i64;
        let status =
            accessor.move_single_cell(&mut binding, 0, &mut value_offset, false, &mut diagnostics);
        assert_eq!(status, RowStatus::Success);
        slots[0]
    }

    #[test]
    fn epoch_decodes_to_midnight_1970() {
        assert_eq!(
            decode_one(0),
            TimestampValue {
                year: 1970,
                month: 1,
                day: 1,
                hour: 0,
                minute: 0,
                second: 0,
                fraction: 0
            }
        );
    }

    #[test]
    fn negative_millis_floor_toward_negative_infinity() {
        // One and a half seconds before the epoch: the day boundary must not
        // wrap and the fraction must stay positive.
        assert_eq!(
            decode_one(-1500),
            TimestampValue {
                year: 1969,
                month: 12,
                day: 31,
                hour: 23,
                minute: 59,
                second: 58,
                fraction: 500_000_000
            }
        );
    }
}
