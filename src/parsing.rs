// parsing.rs
// Copyright 2024 Matti Hänninen
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License. You may obtain a copy of
// the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations under
// the License.

//! Low-level helpers shared by the component and version parsers.

use crate::error::{Error, ValueProblem};

/// The number of dot-separated segments a version may have.
pub const SEGMENTS: std::ops::RangeInclusive<usize> = 2..=4;

/// Splits `s` into the leading run of ASCII digits and the remainder.
pub fn split_leading_int(s: &str) -> (&str, &str) {
  let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
  s.split_at(end)
}

/// Splits a dotted string into its segments.  Empty segments are retained.
pub fn split_segments(s: &str) -> Vec<&str> {
  s.split('.').collect()
}

/// Checks the segment count of a version source and returns it unchanged.
pub fn check_segment_count(input: &str, count: usize) -> Result<usize, Error> {
  if SEGMENTS.contains(&count) {
    Ok(count)
  } else {
    tracing::debug!(input, count, "wrong number of version segments");
    Err(Error::bad_format(input, "expected 2 to 4 segments"))
  }
}

/// Reads a non-empty run of ASCII digits as an unsigned number.
pub fn parse_digits<T>(arg: &'static str, digits: &str) -> Result<T, Error>
where
  T: std::str::FromStr,
{
  if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
    return Err(Error::bad_format(digits, "expected digits"));
  }
  // only overflow remains possible
  digits
    .parse()
    .map_err(|_| Error::bad_value(arg, ValueProblem::OutOfRange(digits.into())))
}

/// Converts a signed integer argument into an unsigned one.
pub fn non_negative<T>(arg: &'static str, value: i64) -> Result<T, Error>
where
  T: TryFrom<i64>,
{
  if value < 0 {
    return Err(Error::bad_value(arg, ValueProblem::Negative(value)));
  }
  T::try_from(value).map_err(|_| {
    Error::bad_value(arg, ValueProblem::OutOfRange(value.to_string()))
  })
}
