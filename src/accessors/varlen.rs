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
//! Variable-width (binary/text) cell accessor with partial-fetch support.
//!
//! A cell larger than its target slot is copied prefix-first; the caller
//! carries `value_offset` across repeated calls for the same row to drain
//! the remainder, and the length indicator always reports how many bytes
//! were still unfetched before the copy.

use arrow::array::{Array, GenericByteArray};
use arrow::datatypes::ByteArrayType;

use super::binding::{BindingBuffer, ColumnBinding, NULL_DATA, VALUE_OFFSET_DONE};
use super::diagnostics::Diagnostics;
use super::{CellAccessor, RowStatus};

/// Copies binary or text cells into `buffer_length`-sized byte slots.
pub struct VarLenAccessor<T: ByteArrayType> {
    array: GenericByteArray<T>,
}

impl<T: ByteArrayType> std::fmt::Debug for VarLenAccessor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VarLenAccessor")
            .field("array", &self.array)
            .finish()
    }
}

impl<T: ByteArrayType> VarLenAccessor<T> {
    pub fn new(array: GenericByteArray<T>) -> Self {
        Self { array }
    }
}

impl<T> CellAccessor for VarLenAccessor<T>
where
    T: ByteArrayType,
    T::Native: AsRef<[u8]>,
{
    fn move_single_cell(
        &self,
        binding: &mut ColumnBinding<'_>,
        row: usize,
        value_offset: &mut i64,
        update_value_offset: bool,
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

        let cell: &[u8] = self.array.value(row).as_ref();
        assert!(
            *value_offset >= 0,
            "cell already fully drained; reset the value offset before re-fetching"
        );
        let offset = *value_offset as usize;
        assert!(
            offset <= cell.len(),
            "value offset {offset} beyond cell length {}",
            cell.len()
        );
        let stride = binding.buffer_length;
        assert!(stride > 0, "variable-width binding needs a positive buffer length");

        let remaining = cell.len() - offset;
        let copy_len = remaining.min(stride);
        {
            let BindingBuffer::Bytes(out) = &mut binding.buffer else {
                panic!("column binding does not accept variable-width values");
            };
            let slot = &mut out[row * stride..row * stride + copy_len];
            slot.copy_from_slice(&cell[offset..offset + copy_len]);
        }

        // The indicator reports how much was left to fetch, not how much fit.
        binding.set_indicator(row, remaining as i64);

        if remaining > stride {
            diagnostics.add_truncation_warning();
            if update_value_offset {
                *value_offset += copy_len as i64;
            }
            RowStatus::SuccessWithInfo
        } else {
            if update_value_offset {
                *value_offset = VALUE_OFFSET_DONE;
            }
            RowStatus::Success
        }
    }

    fn cell_length(&self, binding: &ColumnBinding<'_>) -> usize {
        binding.buffer_length
    }

    fn num_cells(&self) -> usize {
        self.array.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;

    #[test]
    fn short_cell_copies_whole_value() {
        let accessor = VarLenAccessor::new(StringArray::from(vec!["ab"]));
        let mut out = [0_u8; 8];
        let mut indicators = [0_i64; 1];
        let mut binding =
            ColumnBinding::new(BindingBuffer::Bytes(&mut out), 8).with_indicators(&mut indicators);
        let mut diagnostics = Diagnostics::new();
        let mut value_offset = 0_i64;

        let status =
            accessor.move_single_cell(&mut binding, 0, &mut value_offset, true, &mut diagnostics);

        assert_eq!(status, RowStatus::Success);
        assert_eq!(&out[..2], b"ab");
        assert_eq!(indicators[0], 2);
        assert_eq!(value_offset, VALUE_OFFSET_DONE);
        assert!(!diagnostics.has_warnings());
    }

    #[test]
    fn oversized_cell_drains_across_calls() {
        let accessor = VarLenAccessor::new(StringArray::from(vec!["0123456789"]));
        let mut out = [0_u8; 6];
        let mut indicators = [0_i64; 1];
        let mut diagnostics = Diagnostics::new();
        let mut value_offset = 0_i64;

        // Each partial fetch re-binds the same caller buffer, as a GetData
        // loop would.
        let status = {
            let mut binding = ColumnBinding::new(BindingBuffer::Bytes(&mut out), 6)
                .with_indicators(&mut indicators);
            accessor.move_single_cell(&mut binding, 0, &mut value_offset, true, &mut diagnostics)
        };
        assert_eq!(status, RowStatus::SuccessWithInfo);
        assert_eq!(&out[..6], b"012345");
        assert_eq!(indicators[0], 10);
        assert_eq!(value_offset, 6);
        assert_eq!(diagnostics.truncation_count(), 1);

        let status = {
            let mut binding = ColumnBinding::new(BindingBuffer::Bytes(&mut out), 6)
                .with_indicators(&mut indicators);
            accessor.move_single_cell(&mut binding, 0, &mut value_offset, true, &mut diagnostics)
        };
        assert_eq!(status, RowStatus::Success);
        assert_eq!(&out[..4], b"6789");
        assert_eq!(indicators[0], 4);
        assert_eq!(value_offset, VALUE_OFFSET_DONE);
        assert_eq!(diagnostics.truncation_count(), 1);
    }

    #[test]
    fn column_wise_binding_leaves_offset_alone() {
        let accessor = VarLenAccessor::new(StringArray::from(vec!["abcdef", "gh"]));
        let mut out = [0_u8; 8];
        let mut indicators = [0_i64; 2];
        let mut binding =
            ColumnBinding::new(BindingBuffer::Bytes(&mut out), 4).with_indicators(&mut indicators);
        let mut diagnostics = Diagnostics::new();
        let mut value_offset = 0_i64;

        // Binding by column: resumption state must not leak between rows.
        accessor.move_single_cell(&mut binding, 0, &mut value_offset, false, &mut diagnostics);
        accessor.move_single_cell(&mut binding, 1, &mut value_offset, false, &mut diagnostics);

        assert_eq!(&out[..4], b"abcd");
        assert_eq!(&out[4..6], b"gh");
        assert_eq!(indicators[0], 6);
        assert_eq!(indicators[1], 2);
        assert_eq!(value_offset, 0);
        assert_eq!(diagnostics.truncation_count(), 1);
    }
}
