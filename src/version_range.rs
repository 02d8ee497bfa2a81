// version_range.rs
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

use std::{fmt, str};

use crate::{error::Error, version::Version};

/// A range of versions written like a Rust range, e.g. `1.0..2.0`, `..=1.4.2`
/// or `0.9..`.
#[derive(Clone, Debug, PartialEq)]
pub struct VersionRange {
  pub start: Option<Version>,
  pub end: Option<Version>,
  pub inclusive: bool,
}

impl VersionRange {
  /// The versions from `start` up to, but excluding, its next breaking
  /// version.
  pub fn non_breaking_from(start: &Version) -> Result<Self, Error> {
    Ok(Self {
      start: Some(start.clone()),
      end: Some(start.next_breaking()?),
      inclusive: false,
    })
  }

  pub fn contains(&self, version: &Version) -> bool {
    version.cmp_to_range(self).is_eq()
  }

  fn is_empty(&self) -> bool {
    match (&self.start, &self.end) {
      (Some(start), Some(end)) if self.inclusive => start > end,
      (Some(start), Some(end)) => start >= end,
      _ => false,
    }
  }
}

impl str::FromStr for VersionRange {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (start, end) = s
      .split_once("..")
      .ok_or_else(|| bad_range(s, "missing `..`"))?;
    let (end, inclusive) = match end.strip_prefix('=') {
      Some(end) => (end, true),
      None => (end, false),
    };
    let range = Self {
      start: endpoint(s, start)?,
      end: endpoint(s, end)?,
      inclusive,
    };
    if inclusive && range.end.is_none() {
      Err(bad_range(s, "`..=` needs an end"))
    } else if range.is_empty() {
      Err(bad_range(s, "empty range"))
    } else {
      Ok(range)
    }
  }
}

fn endpoint(range: &str, s: &str) -> Result<Option<Version>, Error> {
  if s.is_empty() {
    return Ok(None);
  }
  s.parse().map(Some).map_err(|e: Error| {
    tracing::debug!(range, endpoint = s, error = %e, "bad range endpoint");
    Error::BadRange(range.to_owned())
  })
}

fn bad_range(range: &str, reason: &str) -> Error {
  tracing::debug!(range, reason, "bad version range");
  Error::BadRange(range.to_owned())
}

impl fmt::Display for VersionRange {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let endpoint = |v: &Option<Version>| {
      v.as_ref().map(Version::to_string).unwrap_or_default()
    };
    let op = if self.inclusive { "..=" } else { ".." };
    write!(f, "{}{}{}", endpoint(&self.start), op, endpoint(&self.end))
  }
}
