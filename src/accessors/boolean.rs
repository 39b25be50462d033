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
use arrow::array::{Array, BooleanArray};

use super::binding::{BindingBuffer, ColumnBinding, NULL_DATA};
use super::diagnostics::Diagnostics;
use super::{CellAccessor, RowStatus};

/// Unpacks arrow's bit-packed booleans into one `0`/`1` byte per row.
#[derive(Debug)]
pub struct BooleanAccessor {
    array: BooleanArray,
}

impl BooleanAccessor {
    pub fn new(array: BooleanArray) -> Self {
        Self { array }
    }
}

impl CellAccessor for BooleanAccessor {
    fn move_single_cell(
        &self,
        binding: &mut ColumnBinding<'_>,
        row: usize,
        _value_offset: &mut i64,
        _update_value_offset: bool,
        _diagnostics: &mut Diagnostics,
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
        {
            let BindingBuffer::Bit(slots) = &mut binding.buffer else {
                panic!("column binding does not accept boolean values");
            };
            slots[row] = u8::from(self.array.value(row));
        }
        binding.set_indicator(row, 1);
        RowStatus::Success
    }

    fn cell_length(&self, _binding: &ColumnBinding<'_>) -> usize {
        1
    }

    fn num_cells(&self) -> usize {
        self.array.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_zero_or_one_bytes() {
        let accessor = BooleanAccessor::new(BooleanArray::from(vec![
            Some(true),
            Some(false),
            None,
        ]));
        let mut slots = [9_u8; 3];
        let mut indicators = [0_i64; 3];
        let mut binding =
            ColumnBinding::new(BindingBuffer::Bit(&mut slots), 0).with_indicators(&mut indicators);
        let mut diagnostics = Diagnostics::new();
        let mut value_offset = 0_i64;

        for row in 0..3 {
            accessor.move_single_cell(&mut binding, row, &mut value_offset, false, &mut diagnostics);
        }

        assert_eq!(slots[0], 1);
        assert_eq!(slots[1], 0);
        // The null row's slot is untouched.
        assert_eq!(slots[2], 9);
        assert_eq!(indicators[0], 1);
        assert_eq!(indicators[2], NULL_DATA);
    }
}
