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
//! Cell accessors: copy one columnar cell into a caller-owned buffer slot.
//!
//! Responsibilities:
//! - One accessor variant per target type family (fixed-width numeric,
//!   boolean, variable-width binary/text, timestamp), all behind the shared
//!   [`CellAccessor`] entry contract.
//! - Truncation of oversized variable-width cells is reported through the
//!   diagnostics sink and resumable through the caller-carried value offset;
//!   it is never an error.
//!
//! Key exported interfaces:
//! - Traits: `CellAccessor`.
//! - Types: `ColumnBinding`, `BindingBuffer`, `Diagnostics`, `RowStatus`,
//!   `TimestampValue`.
//! - Functions: `create_accessor`.

pub mod binding;
pub mod boolean;
pub mod calendar;
pub mod diagnostics;
pub mod primitive;
pub mod timestamp;
pub mod varlen;

use arrow::array::{ArrayRef, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int8Type, Int16Type, Int32Type, Int64Type, TimeUnit,
    TimestampMicrosecondType, TimestampMillisecondType, TimestampNanosecondType,
    TimestampSecondType, UInt8Type, UInt16Type, UInt32Type, UInt64Type,
};

use crate::error::DriverError;

pub use binding::{BindingBuffer, ColumnBinding, NULL_DATA, TimestampValue, VALUE_OFFSET_DONE};
pub use boolean::BooleanAccessor;
pub use diagnostics::Diagnostics;
pub use primitive::PrimitiveAccessor;
pub use timestamp::TimestampAccessor;
pub use varlen::VarLenAccessor;

/// Per-row outcome of a cell move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Success,
    /// The cell was processed but with a diagnostic attached (truncation).
    SuccessWithInfo,
    /// The cell could not be materialized (e.g. unrepresentable timestamp).
    Error,
}

/// Shared entry contract of every accessor variant.
pub trait CellAccessor: std::fmt::Debug {
    /// Copy the cell at `row` into the binding's slot for that row.
    ///
    /// `value_offset` is the caller-carried cursor into a partially fetched
    /// variable-width cell; it is advanced (or reset to
    /// [`VALUE_OFFSET_DONE`]) only when `update_value_offset` is set, so
    /// column-wise bindings do not share resumption state across rows.
    /// Fixed-width variants ignore it.
    ///
    /// Panics on contract violations: `row` out of range, or a binding
    /// variant that does not match the accessor's target type.
    fn move_single_cell(
        &self,
        binding: &mut ColumnBinding<'_>,
        row: usize,
        value_offset: &mut i64,
        update_value_offset: bool,
        diagnostics: &mut Diagnostics,
    ) -> RowStatus;

    /// Size in bytes of one cell slot under this binding.
    fn cell_length(&self, binding: &ColumnBinding<'_>) -> usize;

    /// Number of cells in the underlying array.
    fn num_cells(&self) -> usize;

    /// Copy the first `row_count` cells into the binding, row by row.
    ///
    /// Returns the number of rows processed (clamped to the array length).
    /// Statuses of individual rows are reflected through the diagnostics
    /// sink and indicator slots, matching column-wise fetch semantics.
    fn copy_cells(
        &self,
        binding: &mut ColumnBinding<'_>,
        row_count: usize,
        value_offset: &mut i64,
        update_value_offset: bool,
        diagnostics: &mut Diagnostics,
    ) -> usize {
        let rows = row_count.min(self.num_cells());
        for row in 0..rows {
            self.move_single_cell(binding, row, value_offset, update_value_offset, diagnostics);
        }
        rows
    }
}

/// Build the accessor matching an array's data type.
///
/// Column types the driver cannot materialize yield
/// [`DriverError::Unsupported`]; the set of server-side schemas is not under
/// caller control, so this is a runtime error rather than a panic.
pub fn create_accessor(array: &ArrayRef) -> Result<Box<dyn CellAccessor>, DriverError> {
    match array.data_type() {
        DataType::Int8 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<Int8Type>().clone(),
        ))),
        DataType::Int16 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<Int16Type>().clone(),
        ))),
        DataType::Int32 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<Int32Type>().clone(),
        ))),
        DataType::Int64 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<Int64Type>().clone(),
        ))),
        DataType::UInt8 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<UInt8Type>().clone(),
        ))),
        DataType::UInt16 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<UInt16Type>().clone(),
        ))),
        DataType::UInt32 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<UInt32Type>().clone(),
        ))),
        DataType::UInt64 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<UInt64Type>().clone(),
        ))),
        DataType::Float32 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<Float32Type>().clone(),
        ))),
        DataType::Float64 => Ok(Box::new(PrimitiveAccessor::new(
            array.as_primitive::<Float64Type>().clone(),
        ))),
        DataType::Boolean => Ok(Box::new(BooleanAccessor::new(array.as_boolean().clone()))),
        DataType::Utf8 => Ok(Box::new(VarLenAccessor::new(
            array.as_string::<i32>().clone(),
        ))),
        DataType::LargeUtf8 => Ok(Box::new(VarLenAccessor::new(
            array.as_string::<i64>().clone(),
        ))),
        DataType::Binary => Ok(Box::new(VarLenAccessor::new(
            array.as_binary::<i32>().clone(),
        ))),
        DataType::LargeBinary => Ok(Box::new(VarLenAccessor::new(
            array.as_binary::<i64>().clone(),
        ))),
        DataType::Timestamp(TimeUnit::Second, _) => Ok(Box::new(TimestampAccessor::new(
            array.as_primitive::<TimestampSecondType>().clone(),
        ))),
        DataType::Timestamp(TimeUnit::Millisecond, _) => Ok(Box::new(TimestampAccessor::new(
            array.as_primitive::<TimestampMillisecondType>().clone(),
        ))),
        DataType::Timestamp(TimeUnit::Microsecond, _) => Ok(Box::new(TimestampAccessor::new(
            array.as_primitive::<TimestampMicrosecondType>().clone(),
        ))),
        DataType::Timestamp(TimeUnit::Nanosecond, _) => Ok(Box::new(TimestampAccessor::new(
            array.as_primitive::<TimestampNanosecondType>().clone(),
        ))),
        other => Err(DriverError::Unsupported(format!(
            "no cell accessor for arrow type {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Date32Array, Int64Array};
    use std::sync::Arc;

    #[test]
    fn factory_covers_supported_types() {
        let array: ArrayRef = Arc::new(Int64Array::from(vec![1_i64, 2]));
        let accessor = create_accessor(&array).expect("int64 accessor");
        assert_eq!(accessor.num_cells(), 2);
    }

    #[test]
    fn factory_rejects_unsupported_types() {
        let array: ArrayRef = Arc::new(Date32Array::from(vec![1, 2]));
        let err = create_accessor(&array).expect_err("date32 unsupported");
        assert!(matches!(err, DriverError::Unsupported(_)));
    }
}
