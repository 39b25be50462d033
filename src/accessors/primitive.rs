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
use std::mem::size_of;

use arrow::array::{Array, PrimitiveArray};
use arrow::datatypes::ArrowPrimitiveType;

use super::binding::{BindingBuffer, ColumnBinding, NULL_DATA};
use super::diagnostics::Diagnostics;
use super::{CellAccessor, RowStatus};

/// Native types that have a matching fixed-width binding variant.
pub(crate) trait FixedWidthTarget: Copy {
    fn slot<'b>(buffer: &'b mut BindingBuffer<'_>, row: usize) -> &'b mut Self;
}

macro_rules! impl_fixed_width_target {
    ($native:ty, $variant:ident) => {
        impl FixedWidthTarget for $native {
            fn slot<'b>(buffer: &'b mut BindingBuffer<'_>, row: usize) -> &'b mut Self {
                match buffer {
                    BindingBuffer::$variant(slots) => &mut slots[row],
                    _ => panic!(concat!(
                        "column binding does not accept ",
                        stringify!($native),
                        " values"
                    )),
                }
            }
        }
    };
}

impl_fixed_width_target!(i8, I8);
impl_fixed_width_target!(i16, I16);
impl_fixed_width_target!(i32, I32);
impl_fixed_width_target!(i64, I64);
impl_fixed_width_target!(u8, U8);
impl_fixed_width_target!(u16, U16);
impl_fixed_width_target!(u32, U32);
impl_fixed_width_target!(u64, U64);
impl_fixed_width_target!(f32, F32);
impl_fixed_width_target!(f64, F64);

/// Direct copy of fixed-width numeric cells into typed slots.
///
/// Never truncates; the value offset is not consulted.
pub struct PrimitiveAccessor<P: ArrowPrimitiveType> {
    array: PrimitiveArray<P>,
}

impl<P: ArrowPrimitiveType> std::fmt::Debug for PrimitiveAccessor<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimitiveAccessor")
            .field("array", &self.array)
            .finish()
    }
}

impl<P: ArrowPrimitiveType> PrimitiveAccessor<P> {
    pub fn new(array: PrimitiveArray<P>) -> Self {
        Self { array }
    }
}

impl<P> CellAccessor for PrimitiveAccessor<P>
where
    P: ArrowPrimitiveType,
    P::Native: FixedWidthTarget,
{
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
        *P::Native::slot(&mut binding.buffer, row) = self.array.value(row);
        binding.set_indicator(row, size_of::<P::Native>() as i64);
        RowStatus::Success
    }

    fn cell_length(&self, _binding: &ColumnBinding<'_>) -> usize {
        size_of::<P::Native>()
    }

    fn num_cells(&self) -> usize {
        self.array.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use arrow::datatypes::Int32Type;

    #[test]
    fn copies_values_and_sets_indicators() {
        let accessor = PrimitiveAccessor::<Int32Type>::new(Int32Array::from(vec![
            Some(10),
            None,
            Some(-3),
        ]));
        let mut values = [0_i32; 3];
        let mut indicators = [0_i64; 3];
        let mut binding =
            ColumnBinding::new(BindingBuffer::I32(&mut values), 0).with_indicators(&mut indicators);
        let mut diagnostics = Diagnostics::new();
        let mut value_offset = 0_i64;

        for row in 0..3 {
            let status =
                accessor.move_single_cell(&mut binding, row, &mut value_offset, false, &mut diagnostics);
            assert_eq!(status, RowStatus::Success);
        }

        assert_eq!(values[0], 10);
        assert_eq!(values[2], -3);
        assert_eq!(indicators[0], 4);
        assert_eq!(indicators[1], NULL_DATA);
        assert_eq!(indicators[2], 4);
        assert!(!diagnostics.has_warnings());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_row_is_a_caller_bug() {
        let accessor = PrimitiveAccessor::<Int32Type>::new(Int32Array::from(vec![1]));
        let mut values = [0_i32; 2];
        let mut binding = ColumnBinding::new(BindingBuffer::I32(&mut values), 0);
        let mut diagnostics = Diagnostics::new();
        let mut value_offset = 0_i64;
        accessor.move_single_cell(&mut binding, 1, &mut value_offset, false, &mut diagnostics);
    }
}
