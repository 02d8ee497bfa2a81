// value.rs
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

use std::{borrow::Cow, fmt};

use crate::{compare::RelativeOrder, component::Component, version::Version};

/// Any value the generic comparator can place into an order.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Int(i64),
  Float(f64),
  Text(String),
  Seq(Vec<Value>),
  /// A sequence with string keys; the entries keep their order.
  Map(Vec<(String, Value)>),
  Component(Component),
  Version(Version),
  Object(Object),
}

/// An opaque value of a named class.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
  pub class: String,
  pub fields: Vec<(String, Value)>,
}

pub type Entries<'a> = Box<dyn Iterator<Item = (Cow<'a, str>, &'a Value)> + 'a>;

/// The coarse classification of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
  Null,
  Bool,
  Int,
  Float,
  Text,
  Array,
  Object,
}

impl Kind {
  pub fn is_numeric(&self) -> bool {
    matches!(self, Kind::Int | Kind::Float)
  }

  pub fn name(&self) -> &'static str {
    match self {
      Kind::Null => "null",
      Kind::Bool => "boolean",
      Kind::Int => "integer",
      Kind::Float => "float",
      Kind::Text => "string",
      Kind::Array => "array",
      Kind::Object => "object",
    }
  }
}

impl fmt::Display for Kind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl Value {
  pub fn kind(&self) -> Kind {
    match self {
      Value::Null => Kind::Null,
      Value::Bool(_) => Kind::Bool,
      Value::Int(_) => Kind::Int,
      Value::Float(_) => Kind::Float,
      Value::Text(_) => Kind::Text,
      Value::Seq(_) | Value::Map(_) => Kind::Array,
      Value::Component(_) | Value::Version(_) | Value::Object(_) => {
        Kind::Object
      }
    }
  }

  /// The capability to order the value against arbitrary other values.
  pub fn as_relative_order(&self) -> Option<&dyn RelativeOrder> {
    match self {
      Value::Component(c) => Some(c as &dyn RelativeOrder),
      Value::Version(v) => Some(v as &dyn RelativeOrder),
      _ => None,
    }
  }

  /// The value as text, if it has a textual form.
  pub fn stringify(&self) -> Option<Cow<'_, str>> {
    match self {
      Value::Null => Some(Cow::Borrowed("")),
      Value::Bool(true) => Some(Cow::Borrowed("1")),
      Value::Bool(false) => Some(Cow::Borrowed("")),
      Value::Int(i) => Some(Cow::Owned(i.to_string())),
      Value::Float(f) => Some(Cow::Owned(f.to_string())),
      Value::Text(s) => Some(Cow::Borrowed(s)),
      Value::Component(c) => Some(Cow::Owned(c.to_string())),
      Value::Version(v) => Some(Cow::Owned(v.to_string())),
      Value::Seq(_) | Value::Map(_) | Value::Object(_) => None,
    }
  }

  /// Iterates the keys and values of an array-kind value.  Sequences are
  /// keyed by their indices.
  pub fn entries(&self) -> Option<Entries<'_>> {
    match self {
      Value::Seq(items) => Some(Box::new(
        items
          .iter()
          .enumerate()
          .map(|(ix, v)| (Cow::Owned(ix.to_string()), v)),
      )),
      Value::Map(entries) => Some(Box::new(
        entries.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), v)),
      )),
      _ => None,
    }
  }

  /// The number of entries in an array-kind value.
  pub fn entry_count(&self) -> Option<usize> {
    match self {
      Value::Seq(items) => Some(items.len()),
      Value::Map(entries) => Some(entries.len()),
      _ => None,
    }
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Int(i)
  }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self {
    Value::Float(f)
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::Text(s.to_owned())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::Text(s)
  }
}

impl From<Vec<Value>> for Value {
  fn from(items: Vec<Value>) -> Self {
    Value::Seq(items)
  }
}

impl From<Component> for Value {
  fn from(c: Component) -> Self {
    Value::Component(c)
  }
}

impl From<Version> for Value {
  fn from(v: Version) -> Self {
    Value::Version(v)
  }
}

impl From<Object> for Value {
  fn from(o: Object) -> Self {
    Value::Object(o)
  }
}

// Renders the value literal syntax understood by `crate::literal`.
impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Value::Null => write!(f, "nil"),
      Value::Bool(b) => write!(f, "{}", b),
      Value::Int(i) => write!(f, "{}", i),
      Value::Float(x) => write!(f, "{:?}", x),
      Value::Text(s) => write_quoted(f, s),
      Value::Seq(items) => {
        write!(f, "[")?;
        for (ix, item) in items.iter().enumerate() {
          if ix > 0 {
            write!(f, " ")?;
          }
          write!(f, "{}", item)?;
        }
        write!(f, "]")
      }
      Value::Map(entries) => write_entries(f, entries),
      Value::Component(c) => {
        write!(f, "c")?;
        write_quoted(f, &c.to_string())
      }
      Value::Version(v) => {
        write!(f, "v")?;
        write_quoted(f, &v.to_string())
      }
      Value::Object(o) => {
        write!(f, "#{}", o.class)?;
        write_entries(f, &o.fields)
      }
    }
  }
}

fn write_entries(
  f: &mut fmt::Formatter,
  entries: &[(String, Value)],
) -> fmt::Result {
  write!(f, "{{")?;
  for (ix, (k, v)) in entries.iter().enumerate() {
    if ix > 0 {
      write!(f, " ")?;
    }
    write_quoted(f, k)?;
    write!(f, " {}", v)?;
  }
  write!(f, "}}")
}

fn write_quoted(f: &mut fmt::Formatter, s: &str) -> fmt::Result {
  write!(f, "\"")?;
  for c in s.chars() {
    match c {
      '"' => write!(f, "\\\"")?,
      '\\' => write!(f, "\\\\")?,
      '\n' => write!(f, "\\n")?,
      '\t' => write!(f, "\\t")?,
      c => write!(f, "{}", c)?,
    }
  }
  write!(f, "\"")
}
