// literal.rs
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

//! Textual value literals.
//!
//! ```text
//! nil  true  -12  1.5  NaN  "text"  v"1.2.3"  c"2rc1"
//! [1 2 3]  {"key" value}  #Point{"x" 1 "y" 2}
//! ```
//!
//! Commas count as whitespace.  The `Display` implementation of [`Value`]
//! produces this syntax.

use std::str;

use pest::Parser;
use pest_derive::Parser;

use crate::{
  error::Error,
  value::{Object, Value},
};

#[allow(missing_debug_implementations)]
#[derive(Parser)]
#[grammar = "literal.pest"]
struct LiteralLanguage;

type Pair<'a> = pest::iterators::Pair<'a, Rule>;
type Pairs<'a> = pest::iterators::Pairs<'a, Rule>;

pub fn parse_value(s: &str) -> Result<Value, Error> {
  let top_pair = LiteralLanguage::parse(Rule::value_expr, s)
    .map_err(|e| bad_literal(s, e))?
    .next()
    .expect("grammar guarantees value expression")
    .into_inner()
    .next()
    .expect("grammar guarantees a value");
  value_from_pair(s, top_pair)
}

pub fn parse_values(s: &str) -> Result<Vec<Value>, Error> {
  LiteralLanguage::parse(Rule::values_expr, s)
    .map_err(|e| bad_literal(s, e))?
    .next()
    .expect("grammar guarantees values expression")
    .into_inner()
    .filter(|p| !matches!(p.as_rule(), Rule::EOI))
    .map(|p| value_from_pair(s, p))
    .collect()
}

fn bad_literal(s: &str, e: pest::error::Error<Rule>) -> Error {
  tracing::debug!(input = s, error = %e, "cannot parse value literal");
  Error::BadLiteral(s.to_owned())
}

fn value_from_pair(source: &str, pair: Pair) -> Result<Value, Error> {
  match pair.as_rule() {
    Rule::null => Ok(Value::Null),
    Rule::boolean => Ok(Value::Bool(pair.as_str() == "true")),
    Rule::integer => pair
      .as_str()
      .parse()
      .map(Value::Int)
      // grammar does not limit the integer to i64
      .map_err(|_| Error::BadLiteral(source.to_owned())),
    Rule::float => pair
      .as_str()
      .parse()
      .map(Value::Float)
      .map_err(|_| Error::BadLiteral(source.to_owned())),
    Rule::string => Ok(Value::Text(text_from_pair(pair))),
    Rule::version => Ok(Value::Version(text_from_pair(pair).parse()?)),
    Rule::component => Ok(Value::Component(text_from_pair(pair).parse()?)),
    Rule::seq => pair
      .into_inner()
      .map(|p| value_from_pair(source, p))
      .collect::<Result<_, _>>()
      .map(Value::Seq),
    Rule::map => entries_from_pairs(source, pair.into_inner()).map(Value::Map),
    Rule::object => {
      let mut inner = pair.into_inner();
      let class = inner
        .next()
        .expect("grammar guarantees a class name")
        .as_str()
        .to_owned();
      let body = inner.next().expect("grammar guarantees an object body");
      Ok(Value::Object(Object {
        class,
        fields: entries_from_pairs(source, body.into_inner())?,
      }))
    }
    _ => unreachable!("grammar guarantees a value"),
  }
}

fn entries_from_pairs(
  source: &str,
  pairs: Pairs,
) -> Result<Vec<(String, Value)>, Error> {
  pairs
    .map(|entry| {
      let mut inner = entry.into_inner();
      let key = text_from_pair(inner.next().expect("grammar guarantees a key"));
      let value = value_from_pair(
        source,
        inner.next().expect("grammar guarantees a value"),
      )?;
      Ok((key, value))
    })
    .collect()
}

fn text_from_pair(pair: Pair) -> String {
  let raw = pair
    .into_inner()
    .next()
    .expect("grammar guarantees text")
    .as_str();
  let mut text = String::with_capacity(raw.len());
  let mut chars = raw.chars();
  while let Some(c) = chars.next() {
    if c == '\\' {
      match chars.next() {
        Some('n') => text.push('\n'),
        Some('t') => text.push('\t'),
        // grammar guarantees `\"` or `\\`
        Some(c) => text.push(c),
        None => (),
      }
    } else {
      text.push(c);
    }
  }
  text
}

impl str::FromStr for Value {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_value(s)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::{component::Component, error::ErrorKind, version::Version};

  fn p(s: &str) -> Value {
    parse_value(s).unwrap()
  }

  #[test]
  fn scalars() {
    assert_eq!(p("nil"), Value::Null);
    assert_eq!(p("null"), Value::Null);
    assert_eq!(p("true"), Value::Bool(true));
    assert_eq!(p(" false "), Value::Bool(false));
    assert_eq!(p("42"), Value::Int(42));
    assert_eq!(p("-7"), Value::Int(-7));
    assert_eq!(p("1.5"), Value::Float(1.5));
    assert_eq!(p("-2.0e3"), Value::Float(-2000.0));
    assert_eq!(p("1e21"), Value::Float(1e21));
    assert_eq!(p("inf"), Value::Float(f64::INFINITY));
    assert_eq!(p("-inf"), Value::Float(f64::NEG_INFINITY));
    assert!(matches!(p("NaN"), Value::Float(f) if f.is_nan()));
  }

  #[test]
  fn strings() {
    assert_eq!(p(r#""hello""#), Value::from("hello"));
    assert_eq!(p(r#""""#), Value::from(""));
    assert_eq!(p(r#""a \"b\" \\ \n\t""#), Value::from("a \"b\" \\ \n\t"));
  }

  #[test]
  fn versions_and_components() {
    assert_eq!(
      p(r#"v"2.3.2-3-g726351""#),
      Value::Version("2.3.2-3-g726351".parse::<Version>().unwrap())
    );
    assert_eq!(
      p(r#"c"2rc1""#),
      Value::Component("2rc1".parse::<Component>().unwrap())
    );
    assert_eq!(p(r#"c"""#), Value::Component(Component::null()));
    assert_eq!(
      parse_value(r#"v"1""#).unwrap_err().kind(),
      Some(ErrorKind::ParseFormat)
    );
    assert_eq!(
      parse_value(r#"c"1a--0""#).unwrap_err().kind(),
      Some(ErrorKind::InvalidArgumentValue)
    );
  }

  #[test]
  fn compounds() {
    assert_eq!(
      p("[1, 2 [3]]"),
      Value::Seq(vec![
        Value::Int(1),
        Value::Int(2),
        Value::Seq(vec![Value::Int(3)])
      ])
    );
    assert_eq!(
      p(r#"{"a" 1, "b" [nil]}"#),
      Value::Map(vec![
        ("a".into(), Value::Int(1)),
        ("b".into(), Value::Seq(vec![Value::Null])),
      ])
    );
    assert_eq!(
      p(r#"#Point{"x" 1 "y" 2}"#),
      Value::Object(Object {
        class: "Point".into(),
        fields: vec![("x".into(), Value::Int(1)), ("y".into(), Value::Int(2))],
      })
    );
    assert_eq!(
      p("#Empty{}"),
      Value::Object(Object {
        class: "Empty".into(),
        fields: vec![],
      })
    );
  }

  #[test]
  fn several_values() {
    assert_eq!(
      parse_values(r#"1 "1" true"#).unwrap(),
      vec![Value::Int(1), Value::from("1"), Value::Bool(true)]
    );
    assert_eq!(parse_values("").unwrap(), vec![]);
  }

  #[test]
  fn bad_literals() {
    for s in [
      "",
      "1a",
      "nilly",
      "[1",
      r#""open"#,
      r#"{1 2}"#,
      "99999999999999999999",
      "1 2",
      "1.",
      "# Point{}",
    ] {
      assert_eq!(
        parse_value(s),
        Err(Error::BadLiteral(s.to_owned())),
        "{:?}",
        s
      );
    }
  }

  #[test]
  fn display_round_trips() {
    for s in [
      "nil",
      "[true -3 2.5 \"x\\\"y\" v\"1.0.2\" c\"3a\"]",
      r#"{"k" [1.0 {"n" nil}]}"#,
      r#"#Point{"x" 1 "y" -2}"#,
    ] {
      let value = p(s);
      assert_eq!(p(&value.to_string()), value);
    }
  }
}
