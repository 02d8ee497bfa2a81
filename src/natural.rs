// natural.rs
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

//! Natural string ordering.
//!
//! Runs of ASCII digits are compared by their numeric value and everything else
//! character by character, so that `"a2" < "a10"`.  Strings that are equal
//! under this rule (e.g. `"a01"` and `"a1"`) are finally ordered bytewise which
//! keeps the ordering consistent with string equality.

use std::cmp::Ordering;

pub fn compare(a: &str, b: &str) -> Ordering {
  let mut a_it = Chunks::new(a);
  let mut b_it = Chunks::new(b);
  loop {
    let ord = match (a_it.next(), b_it.next()) {
      (None, None) => return a.cmp(b),
      (None, Some(_)) => return Ordering::Less,
      (Some(_), None) => return Ordering::Greater,
      (Some(Chunk::Digits(x)), Some(Chunk::Digits(y))) => compare_digits(x, y),
      (Some(Chunk::Text(x)), Some(Chunk::Text(y))) => x.cmp(y),
      (Some(Chunk::Digits(_)), Some(Chunk::Text(_))) => Ordering::Less,
      (Some(Chunk::Text(_)), Some(Chunk::Digits(_))) => Ordering::Greater,
    };
    if ord != Ordering::Equal {
      return ord;
    }
  }
}

// Arbitrarily long digit runs without overflow: strip the leading zeros, then
// the longer run is the bigger number.
fn compare_digits(a: &str, b: &str) -> Ordering {
  let a = a.trim_start_matches('0');
  let b = b.trim_start_matches('0');
  a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[derive(Debug, PartialEq)]
enum Chunk<'a> {
  Digits(&'a str),
  Text(&'a str),
}

struct Chunks<'a> {
  rest: &'a str,
}

impl<'a> Chunks<'a> {
  fn new(s: &'a str) -> Self {
    Self { rest: s }
  }
}

impl<'a> Iterator for Chunks<'a> {
  type Item = Chunk<'a>;

  fn next(&mut self) -> Option<Self::Item> {
    let first = self.rest.chars().next()?;
    let digits = first.is_ascii_digit();
    let end = self
      .rest
      .find(|c: char| c.is_ascii_digit() != digits)
      .unwrap_or(self.rest.len());
    let (chunk, rest) = self.rest.split_at(end);
    self.rest = rest;
    Some(if digits {
      Chunk::Digits(chunk)
    } else {
      Chunk::Text(chunk)
    })
  }
}
