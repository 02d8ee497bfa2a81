// sort.rs
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

//! Sorting with the generic comparator.
//!
//! The generic comparator is only a partial order and `slice::sort_by` is
//! allowed to panic when handed one.  The merge sort here never panics; the
//! relative order of mutually incomparable values is unspecified.

use std::cmp::Ordering;

use crate::{compare::compare, value::Value};

/// The ordering to use for sorting: incomparable pairs count as equal.
pub fn sort_order(a: &Value, b: &Value) -> Ordering {
  compare(a, b).unwrap_or(Ordering::Equal)
}

pub fn sort(values: &mut Vec<Value>) {
  sort_by(values, sort_order)
}

pub fn sort_descending(values: &mut Vec<Value>) {
  sort_by(values, |a, b| sort_order(b, a))
}

/// Stable merge sort that tolerates inconsistent comparators.
pub fn sort_by<T, F>(items: &mut Vec<T>, mut order: F)
where
  F: FnMut(&T, &T) -> Ordering,
{
  let taken = std::mem::take(items);
  *items = merge_sort(taken, &mut order);
}

fn merge_sort<T, F>(mut items: Vec<T>, order: &mut F) -> Vec<T>
where
  F: FnMut(&T, &T) -> Ordering,
{
  if items.len() <= 1 {
    return items;
  }
  let right = items.split_off(items.len() / 2);
  let left = merge_sort(items, order);
  let right = merge_sort(right, order);

  let mut merged = Vec::with_capacity(left.len() + right.len());
  let mut left = left.into_iter().peekable();
  let mut right = right.into_iter().peekable();
  loop {
    let take_left = match (left.peek(), right.peek()) {
      (Some(l), Some(r)) => order(r, l) != Ordering::Less,
      (Some(_), None) => true,
      (None, Some(_)) => false,
      (None, None) => break,
    };
    let next = if take_left { left.next() } else { right.next() };
    merged.extend(next);
  }
  merged
}

/// Tells whether no comparable pair of neighbours is out of order.
pub fn is_sorted(values: &[Value]) -> bool {
  values
    .windows(2)
    .all(|w| compare(&w[0], &w[1]) != Some(Ordering::Greater))
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::version::Version;

  fn versions(ss: &[&str]) -> Vec<Value> {
    ss.iter()
      .map(|s| Value::Version(s.parse::<Version>().unwrap()))
      .collect()
  }

  #[test]
  fn sorts_versions() {
    let mut values = versions(&["1.10", "1.2.3", "0.9", "1.2", "1.2.3rc1"]);
    sort(&mut values);
    assert_eq!(values, versions(&["0.9", "1.2", "1.2.3", "1.2.3rc1", "1.10"]));
    sort_descending(&mut values);
    assert_eq!(values, versions(&["1.10", "1.2.3rc1", "1.2.3", "1.2", "0.9"]));
  }

  #[test]
  fn sorts_mixed_values() {
    let mut values = vec![
      Value::from("b"),
      Value::Int(3),
      Value::Null,
      Value::Float(-1.5),
      Value::from("a10"),
      Value::from("a2"),
    ];
    sort(&mut values);
    assert!(is_sorted(&values));
    assert_eq!(
      values,
      vec![
        Value::Null,
        Value::from("a2"),
        Value::from("a10"),
        Value::from("b"),
        Value::Float(-1.5),
        Value::Int(3),
      ]
    );
  }

  #[test]
  fn incomparable_values_do_not_panic() {
    let mut values = vec![
      Value::Bool(true),
      Value::Int(2),
      Value::Bool(false),
      Value::Int(1),
      Value::from("x"),
    ];
    sort(&mut values);
    assert_eq!(values.len(), 5);
  }

  #[test]
  fn large_integers_and_floats() {
    let two_53 = 9_007_199_254_740_992i64;
    let mut values = vec![
      Value::Int(two_53 + 1),
      Value::Float(two_53 as f64),
      Value::Int(two_53),
      Value::Int(two_53 + 3),
      Value::Float(two_53 as f64 + 2.0),
    ];
    sort(&mut values);
    assert!(is_sorted(&values));
    assert_eq!(values[4], Value::Int(two_53 + 3));
  }

  #[test]
  fn stable() {
    let mut pairs = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
    sort_by(&mut pairs, |x, y| x.0.cmp(&y.0));
    assert_eq!(pairs, vec![(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
  }

  #[test]
  fn sortedness() {
    assert!(is_sorted(&[]));
    assert!(is_sorted(&[Value::Int(1), Value::Int(1), Value::Int(2)]));
    assert!(!is_sorted(&[Value::Int(2), Value::Int(1)]));
  }
}
