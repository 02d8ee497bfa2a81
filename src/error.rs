// error.rs
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

use crate::{value::Kind, version::Version, version_range::VersionRange};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
  #[error("{arg} must be {expected}, got {found}")]
  InvalidArgumentType {
    arg: &'static str,
    expected: &'static str,
    found: Kind,
  },
  #[error("bad value for {arg}: {problem}")]
  InvalidArgumentValue {
    arg: &'static str,
    problem: ValueProblem,
  },
  #[error("bad format \"{input}\": {reason}")]
  ParseFormat { input: String, reason: &'static str },
  #[error("no input")]
  NoInput,
  #[error("cannot read stdin")]
  CannotReadStdIn,
  #[error("cannot read file {0}")]
  CannotReadFile(String),
  #[error("bad config file {0}: {1}")]
  BadConfigFile(String, String),
  #[error("cannot parse value literal: {0}")]
  BadLiteral(String),
  #[error("bad version range: {0}")]
  BadRange(String),
  #[error("unknown version range {0}")]
  UnknownRange(String),
  #[error("version {0} is not valid (strict mode)")]
  StrictModeViolation(String),
  #[error("verord version {0} is too old; required {1}")]
  TooOldVersion(Version, VersionRange),
  #[error("verord version {0} is too new; required {1}")]
  TooNewVersion(Version, VersionRange),
}

/// The coarse classification of the value-layer errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
  InvalidArgumentType,
  InvalidArgumentValue,
  ParseFormat,
}

impl Error {
  /// Returns the value-layer kind of the error or `None` for the errors raised
  /// by the command-line front end.
  pub fn kind(&self) -> Option<ErrorKind> {
    match self {
      Error::InvalidArgumentType { .. } => Some(ErrorKind::InvalidArgumentType),
      Error::InvalidArgumentValue { .. } => {
        Some(ErrorKind::InvalidArgumentValue)
      }
      Error::ParseFormat { .. } => Some(ErrorKind::ParseFormat),
      _ => None,
    }
  }

  pub(crate) fn bad_value(arg: &'static str, problem: ValueProblem) -> Self {
    Error::InvalidArgumentValue { arg, problem }
  }

  pub(crate) fn bad_type(
    arg: &'static str,
    expected: &'static str,
    found: Kind,
  ) -> Self {
    Error::InvalidArgumentType {
      arg,
      expected,
      found,
    }
  }

  pub(crate) fn bad_format(
    input: impl Into<String>,
    reason: &'static str,
  ) -> Self {
    Error::ParseFormat {
      input: input.into(),
      reason,
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueProblem {
  #[error("negative value {0}")]
  Negative(i64),
  #[error("value {0} out of range")]
  OutOfRange(String),
  #[error("suffix \"{0}\" contains invalid characters")]
  SuffixCharacters(String),
  #[error("suffix \"{0}\" contains consecutive separators")]
  ConsecutiveSeparators(String),
  #[error("suffix \"{0}\" starts with a digit")]
  AmbiguousSuffix(String),
  #[error("revision given without a build")]
  SkippedLevel,
}
