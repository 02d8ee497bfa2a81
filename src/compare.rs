// compare.rs
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

//! The generic comparator.
//!
//! [`compare`] places two arbitrary [`Value`]s into an order.  Values that know
//! how to order themselves against anything (see [`RelativeOrder`]) are asked
//! first.  Otherwise the pair is dispatched on its classification, in this
//! order of precedence:
//!
//! 1. booleans only compare with booleans (`false < true`),
//! 2. numbers are greater than any non-number,
//! 3. strings compare naturally with anything that has a textual form but are
//!    less than objects and arrays,
//! 4. arrays compare by size first and then entry by entry, and
//! 5. objects are greater than null and equal objects are equal; objects of
//!    the same class compare field by field.
//!
//! Anything else is *incomparable* which is reported as `None`.

use std::cmp::Ordering;

use crate::{
  natural,
  value::{Kind, Object, Value},
};

/// The capability to order a value against arbitrary other values.
pub trait RelativeOrder {
  /// The position of `self` relative to `other`, or `None` if the two are
  /// incomparable.
  fn relative_order(&self, other: &Value) -> Option<Ordering>;

  fn equals(&self, other: &Value) -> bool {
    self.relative_order(other) == Some(Ordering::Equal)
  }
}

pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
  if let Some(l) = left.as_relative_order() {
    return l.relative_order(right);
  }
  if let Some(r) = right.as_relative_order() {
    return r.relative_order(left).map(Ordering::reverse);
  }
  let result = match (left.kind(), right.kind()) {
    // `false` and `true` encode as 0 and 1
    (Kind::Bool, Kind::Bool) => compare_bools(left, right),
    (Kind::Bool, _) | (_, Kind::Bool) => None,
    (l, r) if l.is_numeric() || r.is_numeric() => compare_numbers(left, right),
    (Kind::Text, _) | (_, Kind::Text) => compare_text(left, right),
    (Kind::Array, _) | (_, Kind::Array) => compare_arrays(left, right),
    _ => compare_objects(left, right),
  };
  if result.is_none() {
    tracing::trace!(%left, %right, "incomparable values");
  }
  result
}

fn compare_bools(left: &Value, right: &Value) -> Option<Ordering> {
  match (left, right) {
    (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
    _ => None,
  }
}

#[derive(Clone, Copy, Debug)]
enum Number {
  Int(i64),
  Float(f64),
}

impl Number {
  fn of(value: &Value) -> Option<Self> {
    match value {
      Value::Int(i) => Some(Number::Int(*i)),
      Value::Float(f) => Some(Number::Float(*f)),
      _ => None,
    }
  }

  fn is_nan(self) -> bool {
    matches!(self, Number::Float(f) if f.is_nan())
  }
}

pub fn compare_numbers(left: &Value, right: &Value) -> Option<Ordering> {
  match (Number::of(left), Number::of(right)) {
    (Some(l), Some(r)) => Some(number_order(l, r)),
    (Some(_), None) => Some(Ordering::Greater),
    (None, Some(_)) => compare_numbers(right, left).map(Ordering::reverse),
    (None, None) => None,
  }
}

// A NaN on the right makes the left greater; one on the left alone makes the
// left less so that the order stays antisymmetric.
fn number_order(left: Number, right: Number) -> Ordering {
  match (left, right) {
    (Number::Int(l), Number::Int(r)) => l.cmp(&r),
    _ if right.is_nan() => {
      if left.is_nan() {
        Ordering::Equal
      } else {
        Ordering::Greater
      }
    }
    _ if left.is_nan() => Ordering::Less,
    (Number::Int(l), Number::Float(r)) => int_float_order(l, r),
    (Number::Float(l), Number::Int(r)) => int_float_order(r, l).reverse(),
    (Number::Float(l), Number::Float(r)) => {
      l.partial_cmp(&r).unwrap_or(Ordering::Equal)
    }
  }
}

// Exact order of an integer against a non-NaN float.  Converting the integer
// to `f64` would lose precision above 2^53.
fn int_float_order(i: i64, f: f64) -> Ordering {
  // 2^63, exactly representable
  const BOUND: f64 = 9_223_372_036_854_775_808.0;
  if f >= BOUND {
    return Ordering::Less;
  }
  if f < -BOUND {
    return Ordering::Greater;
  }
  let whole = f.trunc();
  // in [-2^63, 2^63) and hence exact
  let whole_int = whole as i64;
  i.cmp(&whole_int).then_with(|| {
    0.0f64.partial_cmp(&(f - whole)).unwrap_or(Ordering::Equal)
  })
}

pub fn compare_text(left: &Value, right: &Value) -> Option<Ordering> {
  match (left, right) {
    (Value::Text(l), _) => {
      if right.kind() == Kind::Object {
        return Some(Ordering::Less);
      }
      match right.stringify() {
        Some(r) => Some(natural::compare(l, &r)),
        None => Some(Ordering::Less),
      }
    }
    (_, Value::Text(_)) => compare_text(right, left).map(Ordering::reverse),
    _ => None,
  }
}

pub fn compare_arrays(left: &Value, right: &Value) -> Option<Ordering> {
  match (left.entries(), right.entries()) {
    (Some(l_entries), Some(r_entries)) => {
      let size = left.entry_count().cmp(&right.entry_count());
      if size != Ordering::Equal {
        return Some(size);
      }
      for ((l_key, l_value), (r_key, r_value)) in l_entries.zip(r_entries) {
        let key_order = natural::compare(&l_key, &r_key);
        if key_order != Ordering::Equal {
          return Some(key_order);
        }
        match compare(l_value, r_value) {
          Some(Ordering::Equal) => continue,
          other => return other,
        }
      }
      Some(Ordering::Equal)
    }
    (Some(_), None) => match right.kind() {
      // null counts as an empty array
      Kind::Null => left.entry_count().map(|n| n.cmp(&0)),
      Kind::Object => Some(Ordering::Less),
      _ => None,
    },
    (None, Some(_)) => compare_arrays(right, left).map(Ordering::reverse),
    (None, None) => None,
  }
}

pub fn compare_objects(left: &Value, right: &Value) -> Option<Ordering> {
  match (left, right) {
    (Value::Null, Value::Null) => Some(Ordering::Equal),
    (Value::Object(l), Value::Object(r)) => compare_same_class(l, r),
    (Value::Object(_), _) => Some(Ordering::Greater),
    (_, Value::Object(_)) => Some(Ordering::Less),
    _ => None,
  }
}

fn compare_same_class(left: &Object, right: &Object) -> Option<Ordering> {
  if left == right {
    return Some(Ordering::Equal);
  }
  if left.class != right.class
    || left.fields.len() != right.fields.len()
    || left
      .fields
      .iter()
      .zip(right.fields.iter())
      .any(|((l, _), (r, _))| l != r)
  {
    return None;
  }
  for ((_, l), (_, r)) in left.fields.iter().zip(right.fields.iter()) {
    match compare(l, r) {
      Some(Ordering::Equal) => continue,
      other => return other,
    }
  }
  Some(Ordering::Equal)
}
