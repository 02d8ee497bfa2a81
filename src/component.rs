// component.rs
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

use std::{
  cmp::{self, Ordering},
  fmt, str,
  sync::OnceLock,
};

use regex::Regex;
use serde_with::{DeserializeFromStr, SerializeDisplay};

use crate::{
  compare::{self, RelativeOrder},
  error::{Error, ValueProblem},
  natural, parsing,
  value::Value,
};

/// An integer fused with an optional suffix, e.g. the `2-3-g726351` in
/// `2.3.2-3-g726351`.
///
/// A component is in exactly one of three states:
///
/// - *null*: there is no integer part (and hence no suffix),
/// - *default*: the integer part is zero and there is no suffix,
/// - *defined*: anything else.
#[derive(
  Clone, Debug, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr,
)]
pub struct Component {
  int_value: Option<u64>,
  string_value: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentState {
  Null,
  Default,
  Defined,
}

impl Component {
  /// Constructs a component from its parts.
  ///
  /// The suffix is discarded when there is no integer part.
  pub fn new(
    int_value: Option<i64>,
    string_value: Option<&str>,
  ) -> Result<Self, Error> {
    Self::new_arg("component", int_value, string_value)
  }

  pub(crate) fn new_arg(
    arg: &'static str,
    int_value: Option<i64>,
    string_value: Option<&str>,
  ) -> Result<Self, Error> {
    match int_value {
      None => Ok(Self::null()),
      Some(i) => Self::from_parts(
        arg,
        parsing::non_negative(arg, i)?,
        string_value.unwrap_or_default(),
      ),
    }
  }

  fn from_parts(
    arg: &'static str,
    int_value: u64,
    string_value: &str,
  ) -> Result<Self, Error> {
    check_suffix(arg, int_value, string_value)?;
    Ok(Self {
      int_value: Some(int_value),
      string_value: string_value.to_owned(),
    })
  }

  /// The null component.
  pub fn null() -> Self {
    Self {
      int_value: None,
      string_value: String::new(),
    }
  }

  /// Normalizes a value into a component.
  ///
  /// Accepts components, integers, strings of the form `<digits><suffix>`, and
  /// null.  An empty or blank string yields the null component.
  pub fn parse(value: &Value) -> Result<Self, Error> {
    Self::parse_arg("component", value)
  }

  pub(crate) fn parse_arg(
    arg: &'static str,
    value: &Value,
  ) -> Result<Self, Error> {
    match value {
      Value::Component(c) => Ok(c.clone()),
      Value::Null => Ok(Self::null()),
      Value::Int(i) => Self::new_arg(arg, Some(*i), None),
      Value::Text(s) => Self::parse_str_arg(arg, s),
      other => Err(Error::bad_type(
        arg,
        "a component, an integer, or a string",
        other.kind(),
      )),
    }
  }

  fn parse_str_arg(arg: &'static str, s: &str) -> Result<Self, Error> {
    if s.trim().is_empty() {
      return Ok(Self::null());
    }
    let (digits, suffix) = parsing::split_leading_int(s);
    if digits.is_empty() {
      tracing::debug!(input = s, "component lacks a leading integer");
      return Err(Error::bad_format(s, "expected a leading integer"));
    }
    Self::from_parts(arg, parsing::parse_digits(arg, digits)?, suffix)
  }

  pub fn int_value(&self) -> Option<u64> {
    self.int_value
  }

  pub fn string_value(&self) -> &str {
    &self.string_value
  }

  pub fn state(&self) -> ComponentState {
    match self.int_value {
      None => ComponentState::Null,
      Some(0) if self.string_value.is_empty() => ComponentState::Default,
      Some(_) => ComponentState::Defined,
    }
  }

  pub fn is_null(&self) -> bool {
    self.state() == ComponentState::Null
  }

  pub fn is_default(&self) -> bool {
    self.state() == ComponentState::Default
  }

  pub fn is_defined(&self) -> bool {
    self.state() == ComponentState::Defined
  }

  pub fn has_suffix(&self) -> bool {
    !self.string_value.is_empty()
  }

  /// The component as an `[int, suffix]` pair.
  fn as_tuple(&self) -> Value {
    Value::Seq(vec![
      self.int_value.map_or(Value::Null, |i| {
        i64::try_from(i).map_or(Value::Float(i as f64), Value::Int)
      }),
      Value::Text(self.string_value.clone()),
    ])
  }
}

fn suffix_token_pattern() -> &'static Regex {
  static PATTERN: OnceLock<Regex> = OnceLock::new();
  PATTERN.get_or_init(|| {
    Regex::new(r"^[a-z0-9](?:[a-z0-9-]*[a-z0-9])?$")
      .expect("suffix token pattern is a valid regex")
  })
}

// The suffix is checked as a part of the whole token, i.e. together with the
// integer it follows.  This is what allows `git describe` style suffixes like
// `-3-g726351`.
fn check_suffix(
  arg: &'static str,
  int_value: u64,
  suffix: &str,
) -> Result<(), Error> {
  if suffix.is_empty() {
    return Ok(());
  }
  let problem = if !suffix
    .bytes()
    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
  {
    ValueProblem::SuffixCharacters(suffix.into())
  } else if suffix.contains("--") {
    ValueProblem::ConsecutiveSeparators(suffix.into())
  } else if suffix.starts_with(|c: char| c.is_ascii_digit()) {
    ValueProblem::AmbiguousSuffix(suffix.into())
  } else if !suffix_token_pattern().is_match(&format!("{int_value}{suffix}")) {
    ValueProblem::SuffixCharacters(suffix.into())
  } else {
    return Ok(());
  };
  tracing::debug!(arg, suffix, "rejected component suffix");
  Err(Error::bad_value(arg, problem))
}

impl From<u64> for Component {
  fn from(int_value: u64) -> Self {
    Self {
      int_value: Some(int_value),
      string_value: String::new(),
    }
  }
}

impl str::FromStr for Component {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::parse_str_arg("component", s)
  }
}

impl fmt::Display for Component {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if let Some(i) = self.int_value {
      write!(f, "{}{}", i, self.string_value)?;
    }
    Ok(())
  }
}

impl cmp::Ord for Component {
  fn cmp(&self, rhs: &Self) -> Ordering {
    // `None < Some(_)` puts the null component first
    self
      .int_value
      .cmp(&rhs.int_value)
      .then_with(|| natural::compare(&self.string_value, &rhs.string_value))
  }
}

impl cmp::PartialOrd for Component {
  fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
    Some(self.cmp(rhs))
  }
}

impl RelativeOrder for Component {
  fn relative_order(&self, other: &Value) -> Option<Ordering> {
    match other {
      Value::Component(c) => Some(self.cmp(c)),
      Value::Null => Some(self.cmp(&Self::null())),
      Value::Int(_) | Value::Float(_) | Value::Seq(_) | Value::Map(_) => {
        Some(Ordering::Less)
      }
      Value::Text(s) => match s.parse::<Self>() {
        Ok(c) => Some(self.cmp(&c)),
        Err(_) => Some(Ordering::Less),
      },
      _ => None,
    }
  }

  fn equals(&self, other: &Value) -> bool {
    match other {
      Value::Component(c) => self == c,
      other => {
        compare::compare(&self.as_tuple(), other) == Some(Ordering::Equal)
      }
    }
  }
}
