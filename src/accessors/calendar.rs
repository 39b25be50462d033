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
use arrow::datatypes::TimeUnit;
use chrono::{DateTime, Utc};

pub(crate) const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Ticks of `unit` per whole second.
pub(crate) fn unit_divisor(unit: TimeUnit) -> i64 {
    match unit {
        TimeUnit::Second => 1,
        TimeUnit::Millisecond => 1_000,
        TimeUnit::Microsecond => 1_000_000,
        TimeUnit::Nanosecond => 1_000_000_000,
    }
}

/// Broken-down UTC time for whole seconds since the Unix epoch.
///
/// Uses the proleptic Gregorian calendar, so pre-1970 and pre-1582 seconds
/// resolve the same way arrow and chrono interpret them. `None` when the
/// value is outside chrono's representable year range.
pub(crate) fn datetime_from_seconds_since_epoch(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn epoch_is_jan_first_1970() {
        let dt = datetime_from_seconds_since_epoch(0).expect("epoch");
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute(), dt.second()),
            (1970, 1, 1, 0, 0, 0)
        );
    }

    #[test]
    fn one_second_before_epoch_is_last_1969_second() {
        let dt = datetime_from_seconds_since_epoch(-1).expect("pre-epoch");
        assert_eq!(
            (dt.year(), dt.month(), dt.day(), dt.hour(), dt.minute(), dt.second()),
            (1969, 12, 31, 23, 59, 59)
        );
    }

    #[test]
    fn divisors_match_units() {
        assert_eq!(unit_divisor(TimeUnit::Second), 1);
        assert_eq!(unit_divisor(TimeUnit::Millisecond), 1_000);
        assert_eq!(unit_divisor(TimeUnit::Microsecond), 1_000_000);
        assert_eq!(unit_divisor(TimeUnit::Nanosecond), 1_000_000_000);
    }
}
