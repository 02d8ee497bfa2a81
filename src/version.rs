// version.rs
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

use std::{cmp, fmt, str};

use serde::de;
use serde_with::SerializeDisplay;

use crate::{
  compare::RelativeOrder,
  component::{Component, ComponentState},
  error::{Error, ValueProblem},
  parsing,
  value::Value,
  version_range::VersionRange,
};

pub fn crate_version() -> Result<Version, Error> {
  env!("CARGO_PKG_VERSION").parse()
}

/// A version number of the form `major.minor[.build[.revision]]`.
///
/// The ordering is lexicographic over the four fields; the null build or
/// revision precedes every other one.
#[derive(
  Clone,
  Debug,
  PartialEq,
  Eq,
  Hash,
  PartialOrd,
  Ord,
  SerializeDisplay,
)]
pub struct Version {
  major: u32,
  minor: u32,
  build: Component,
  revision: Component,
}

impl Version {
  pub fn new(
    major: u32,
    minor: u32,
    build: Component,
    revision: Component,
  ) -> Result<Self, Error> {
    if build.is_null() && !revision.is_null() {
      return Err(Error::bad_value("revision", ValueProblem::SkippedLevel));
    }
    Ok(Self {
      major,
      minor,
      build,
      revision,
    })
  }

  /// Constructs a version from untyped parts.
  ///
  /// The major and minor must be non-negative integers (or strings of digits);
  /// the build and revision go through [`Component::parse`].
  pub fn from_values(
    major: &Value,
    minor: &Value,
    build: &Value,
    revision: &Value,
  ) -> Result<Self, Error> {
    Self::new(
      level("major", major)?,
      level("minor", minor)?,
      Component::parse_arg("build", build)?,
      Component::parse_arg("revision", revision)?,
    )
  }

  /// Normalizes a value into a version.
  ///
  /// - a version is passed through,
  /// - an integer `n` becomes `n.0`,
  /// - a float becomes `integral.fractional`,
  /// - a sequence of two to four parts is read positionally, and
  /// - a string is read as a dotted version.
  pub fn parse(value: &Value) -> Result<Self, Error> {
    match value {
      Value::Version(v) => Ok(v.clone()),
      Value::Int(n) => Self::new(
        parsing::non_negative("major", *n)?,
        0,
        Component::null(),
        Component::null(),
      ),
      Value::Float(f) => Self::from_float(*f),
      Value::Seq(items) => Self::from_parts(value, items.iter()),
      Value::Map(entries) => {
        Self::from_parts(value, entries.iter().map(|(_, v)| v))
      }
      Value::Text(s) => s.parse(),
      other => Err(Error::bad_type(
        "version",
        "a version, a number, a sequence, or a string",
        other.kind(),
      )),
    }
  }

  fn from_parts<'a>(
    source: &Value,
    parts: impl ExactSizeIterator<Item = &'a Value>,
  ) -> Result<Self, Error> {
    parsing::check_segment_count(&source.to_string(), parts.len())?;
    let parts = parts.collect::<Vec<_>>();
    let part = |ix: usize| parts.get(ix).copied().unwrap_or(&Value::Null);
    Self::from_values(part(0), part(1), part(2), part(3))
  }

  fn from_float(f: f64) -> Result<Self, Error> {
    if !f.is_finite() {
      return Err(Error::bad_format(f.to_string(), "not a finite number"));
    }
    if f < 0.0 {
      return Err(Error::bad_value(
        "version",
        ValueProblem::OutOfRange(f.to_string()),
      ));
    }
    // `+ 0.0` turns a negative zero positive; `Display` never uses exponents
    let s = (f + 0.0).to_string();
    let (major, minor) = s.split_once('.').unwrap_or((&s, "0"));
    Self::new(
      parsing::parse_digits("major", major)?,
      parsing::parse_digits("minor", minor)?,
      Component::null(),
      Component::null(),
    )
  }

  pub fn major(&self) -> u32 {
    self.major
  }

  pub fn minor(&self) -> u32 {
    self.minor
  }

  pub fn build(&self) -> &Component {
    &self.build
  }

  pub fn revision(&self) -> &Component {
    &self.revision
  }

  /// Tells whether the version is well-formed enough to be published.
  ///
  /// Versions that fail this check are still constructible.
  pub fn is_valid(&self) -> bool {
    use ComponentState::*;
    match (
      self.major > 0 || self.minor > 0,
      self.build.state(),
      self.revision.state(),
      self.build.has_suffix(),
      self.revision.has_suffix(),
    ) {
      (false, _, _, _, _) => false,
      (true, Null, Null, _, _) => true,
      (true, Defined, Null, _, _) => true,
      (true, Default, Null, _, _) => false,
      // not constructible, kept for completeness of the table
      (true, Null, _, _, revision_suffix) => revision_suffix,
      (true, _, _, build_suffix, _) => !build_suffix,
    }
  }

  /// The first version that may break compatibility with this one: the next
  /// minor for `0.x` versions and the next major otherwise.
  pub fn next_breaking(&self) -> Result<Self, Error> {
    let (arg, bumped) = match (self.major, self.minor) {
      (0, minor) => ("minor", minor.checked_add(1).map(|m| (0, m))),
      (major, _) => ("major", major.checked_add(1).map(|m| (m, 0))),
    };
    let (major, minor) = bumped.ok_or_else(|| {
      Error::bad_value(arg, ValueProblem::OutOfRange(self.to_string()))
    })?;
    Ok(Self {
      major,
      minor,
      build: Component::null(),
      revision: Component::null(),
    })
  }

  /// Places the version below (`Less`), within (`Equal`) or above (`Greater`)
  /// the range.
  pub fn cmp_to_range(&self, range: &VersionRange) -> cmp::Ordering {
    let below = range.start.as_ref().is_some_and(|start| self < start);
    let above = range.end.as_ref().is_some_and(|end| match self.cmp(end) {
      cmp::Ordering::Less => false,
      cmp::Ordering::Equal => !range.inclusive,
      cmp::Ordering::Greater => true,
    });
    if below {
      cmp::Ordering::Less
    } else if above {
      cmp::Ordering::Greater
    } else {
      cmp::Ordering::Equal
    }
  }
}

fn level(arg: &'static str, value: &Value) -> Result<u32, Error> {
  match value {
    Value::Int(i) => parsing::non_negative(arg, *i),
    Value::Text(s) if is_digits(s) => parsing::parse_digits(arg, s),
    other => Err(Error::bad_type(arg, "a non-negative integer", other.kind())),
  }
}

fn is_digits(s: &str) -> bool {
  !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl str::FromStr for Version {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let segments = parsing::split_segments(s);
    parsing::check_segment_count(s, segments.len())?;
    let segment = |ix: usize| segments.get(ix).copied().unwrap_or_default();
    Self::new(
      parsing::parse_digits("major", segment(0))?,
      parsing::parse_digits("minor", segment(1))?,
      Component::parse_arg("build", &Value::Text(segment(2).into()))?,
      Component::parse_arg("revision", &Value::Text(segment(3).into()))?,
    )
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}.{}", self.major, self.minor)?;
    if !self.revision.is_null() {
      write!(f, ".{}.{}", self.build, self.revision)
    } else if !self.build.is_null() {
      write!(f, ".{}", self.build)
    } else {
      Ok(())
    }
  }
}

impl RelativeOrder for Version {
  fn relative_order(&self, other: &Value) -> Option<cmp::Ordering> {
    match other {
      Value::Version(v) => Some(self.cmp(v)),
      Value::Int(_) | Value::Float(_) | Value::Null => {
        Some(cmp::Ordering::Greater)
      }
      Value::Text(_) | Value::Seq(_) | Value::Map(_) => {
        match Self::parse(other) {
          Ok(v) => Some(self.cmp(&v)),
          Err(_) => Some(cmp::Ordering::Greater),
        }
      }
      _ => None,
    }
  }

  fn equals(&self, other: &Value) -> bool {
    matches!(other, Value::Version(v) if v == self)
  }
}

impl<'de> de::Deserialize<'de> for Version {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: de::Deserializer<'de>,
  {
    deserializer.deserialize_any(VersionVisitor)
  }
}

struct VersionVisitor;

impl<'de> de::Visitor<'de> for VersionVisitor {
  type Value = Version;

  fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "a version string, number, or sequence of parts")
  }

  fn visit_str<E: de::Error>(self, s: &str) -> Result<Version, E> {
    s.parse().map_err(E::custom)
  }

  fn visit_i64<E: de::Error>(self, n: i64) -> Result<Version, E> {
    Version::parse(&Value::Int(n)).map_err(E::custom)
  }

  fn visit_u64<E: de::Error>(self, n: u64) -> Result<Version, E> {
    let n = i64::try_from(n).map_err(|_| E::custom("version out of range"))?;
    self.visit_i64(n)
  }

  fn visit_f64<E: de::Error>(self, f: f64) -> Result<Version, E> {
    Version::parse(&Value::Float(f)).map_err(E::custom)
  }

  fn visit_seq<A>(self, mut seq: A) -> Result<Version, A::Error>
  where
    A: de::SeqAccess<'de>,
  {
    let mut parts = vec![];
    while let Some(Part(v)) = seq.next_element()? {
      parts.push(v);
    }
    Version::parse(&Value::Seq(parts)).map_err(de::Error::custom)
  }
}

/// A single element of a version given as a sequence.
struct Part(Value);

impl<'de> de::Deserialize<'de> for Part {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: de::Deserializer<'de>,
  {
    struct PartVisitor;

    impl<'de> de::Visitor<'de> for PartVisitor {
      type Value = Part;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "an integer or a string")
      }

      fn visit_i64<E: de::Error>(self, n: i64) -> Result<Part, E> {
        Ok(Part(Value::Int(n)))
      }

      fn visit_u64<E: de::Error>(self, n: u64) -> Result<Part, E> {
        i64::try_from(n)
          .map(|n| Part(Value::Int(n)))
          .map_err(|_| E::custom("version part out of range"))
      }

      fn visit_str<E: de::Error>(self, s: &str) -> Result<Part, E> {
        Ok(Part(Value::Text(s.to_owned())))
      }

      fn visit_unit<E: de::Error>(self) -> Result<Part, E> {
        Ok(Part(Value::Null))
      }

      fn visit_none<E: de::Error>(self) -> Result<Part, E> {
        Ok(Part(Value::Null))
      }
    }

    deserializer.deserialize_any(PartVisitor)
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::error::ErrorKind;

  fn v(s: &str) -> Version {
    s.parse().unwrap()
  }

  fn c(s: &str) -> Component {
    s.parse().unwrap()
  }

  #[test]
  fn parse_good_version_strings() {
    let x = v("1.0");
    assert_eq!((x.major(), x.minor()), (1, 0));
    assert!(x.build().is_null());
    assert!(x.revision().is_null());
    assert_eq!(x.to_string(), "1.0");

    let x = v("2.3.2-3-g726351");
    assert_eq!(x.build().int_value(), Some(2));
    assert_eq!(x.build().string_value(), "-3-g726351");
    assert!(x.revision().is_null());
    assert_eq!(x.to_string(), "2.3.2-3-g726351");

    let x = v("123.456.789.10rc1");
    assert_eq!(x.major(), 123);
    assert_eq!(x.minor(), 456);
    assert_eq!(x.build(), &c("789"));
    assert_eq!(x.revision(), &c("10rc1"));
  }

  #[test]
  fn try_parsing_bad_version_strings() {
    for s in ["", "1", "1.2.3.4.5", "whatever", "1.x", "x.1", " 1.0", "1..2"] {
      assert_eq!(
        s.parse::<Version>().unwrap_err().kind(),
        Some(ErrorKind::ParseFormat),
        "{:?}",
        s
      );
    }
    assert_eq!(
      "1.0.1a--0".parse::<Version>().unwrap_err(),
      Error::bad_value(
        "build",
        ValueProblem::ConsecutiveSeparators("a--0".into())
      )
    );
    assert_eq!(
      "1.0.2.3A".parse::<Version>().unwrap_err(),
      Error::bad_value("revision", ValueProblem::SuffixCharacters("A".into()))
    );
  }

  #[test]
  fn empty_trailing_segments_are_null() {
    assert_eq!(v("1.0."), v("1.0"));
    assert_eq!(v("1.0.."), v("1.0"));
  }

  #[test]
  fn skipped_level_is_rejected() {
    assert_eq!(
      Version::new(1, 0, Component::null(), c("1")).unwrap_err(),
      Error::bad_value("revision", ValueProblem::SkippedLevel)
    );
    assert_eq!(
      Version::new(1, 0, Component::null(), c("0")).unwrap_err(),
      Error::bad_value("revision", ValueProblem::SkippedLevel)
    );
    assert!(Version::new(1, 0, c("0"), c("1")).is_ok());
  }

  #[test]
  fn from_values_checks_type_and_range_separately() {
    let null = Value::Null;
    assert_eq!(
      Version::from_values(&Value::Float(1.0), &Value::Int(0), &null, &null)
        .unwrap_err(),
      Error::bad_type(
        "major",
        "a non-negative integer",
        crate::value::Kind::Float
      )
    );
    assert_eq!(
      Version::from_values(&Value::Int(1), &Value::Int(-2), &null, &null)
        .unwrap_err(),
      Error::bad_value("minor", ValueProblem::Negative(-2))
    );
    assert_eq!(
      Version::from_values(&Value::Int(1), &Value::Null, &null, &null)
        .unwrap_err()
        .kind(),
      Some(ErrorKind::InvalidArgumentType)
    );
    assert_eq!(
      Version::from_values(
        &Value::Text("1".into()),
        &Value::Int(2),
        &Value::Int(3),
        &Value::Text("4b".into())
      ),
      Ok(v("1.2.3.4b"))
    );
  }

  #[test]
  fn parse_other_shapes() {
    let original = v("3.1.4");
    assert_eq!(
      Version::parse(&Value::Version(original.clone())),
      Ok(original)
    );
    assert_eq!(Version::parse(&Value::Int(5)), Ok(v("5.0")));
    assert_eq!(Version::parse(&Value::Float(1.5)), Ok(v("1.5")));
    assert_eq!(Version::parse(&Value::Float(2.0)), Ok(v("2.0")));
    assert_eq!(Version::parse(&Value::Float(-0.0)), Ok(v("0.0")));
    assert_eq!(
      Version::parse(&Value::Seq(vec![
        Value::Int(1),
        Value::Int(2),
        Value::Text("3rc1".into()),
      ])),
      Ok(v("1.2.3rc1"))
    );
    assert_eq!(
      Version::parse(&Value::Map(vec![
        ("major".into(), Value::Int(4)),
        ("minor".into(), Value::Int(5)),
      ])),
      Ok(v("4.5"))
    );
  }

  #[test]
  fn parse_bad_shapes() {
    assert_eq!(
      Version::parse(&Value::Int(-1)).unwrap_err().kind(),
      Some(ErrorKind::InvalidArgumentValue)
    );
    assert_eq!(
      Version::parse(&Value::Float(-1.5)).unwrap_err().kind(),
      Some(ErrorKind::InvalidArgumentValue)
    );
    assert_eq!(
      Version::parse(&Value::Float(f64::NAN)).unwrap_err().kind(),
      Some(ErrorKind::ParseFormat)
    );
    assert_eq!(
      Version::parse(&Value::Seq(vec![Value::Int(1)]))
        .unwrap_err()
        .kind(),
      Some(ErrorKind::ParseFormat)
    );
    assert_eq!(
      Version::parse(&Value::Seq(vec![Value::Int(1); 5]))
        .unwrap_err()
        .kind(),
      Some(ErrorKind::ParseFormat)
    );
    assert_eq!(
      Version::parse(&Value::Bool(true)).unwrap_err().kind(),
      Some(ErrorKind::InvalidArgumentType)
    );
  }

  #[test]
  fn display_version_string() {
    assert_eq!(v("1.0").to_string(), "1.0");
    assert_eq!(v("1.0.3").to_string(), "1.0.3");
    assert_eq!(
      Version::new(1, 0, c("0"), c("0")).unwrap().to_string(),
      "1.0.0.0"
    );
    assert_eq!(
      Version::new(1, 0, c("0"), Component::null())
        .unwrap()
        .to_string(),
      "1.0.0"
    );
    assert_eq!(v("1.2.0.5").to_string(), "1.2.0.5");
  }

  #[test]
  fn validity_truth_table() {
    let null = Component::null;
    let rows = [
      // (major, minor, build, revision, valid)
      (0, 0, null(), null(), false),
      (0, 0, c("1"), null(), false),
      (1, 0, null(), null(), true),
      (0, 1, null(), null(), true),
      (1, 0, c("0"), null(), false),
      (1, 0, c("1"), null(), true),
      (1, 0, c("1a"), null(), true),
      (1, 0, c("0a"), null(), true),
      (1, 0, c("0"), c("0"), true),
      (1, 0, c("0"), c("1"), true),
      (1, 0, c("0"), c("1a"), true),
      (1, 0, c("1"), c("0"), true),
      (1, 0, c("1"), c("2"), true),
      (1, 0, c("1"), c("2a"), true),
      (1, 0, c("1a"), c("0"), false),
      (1, 0, c("1a"), c("2"), false),
      (1, 0, c("1a"), c("2b"), false),
    ];
    for (major, minor, build, revision, valid) in rows {
      let x = Version::new(major, minor, build, revision).unwrap();
      assert_eq!(x.is_valid(), valid, "{}", x);
    }
    assert!(!v("0.0").is_valid());
    assert!(v("1.0").is_valid());
  }

  #[test]
  fn valid_versions_round_trip() {
    for s in [
      "1.0",
      "0.1",
      "2.3.2-3-g726351",
      "1.0.0.0",
      "4.5.6.7b",
      "9.9.1a",
    ] {
      let x = v(s);
      assert!(x.is_valid(), "{}", s);
      assert_eq!(v(&x.to_string()), x);
    }
  }

  #[test]
  fn version_ordering() {
    assert!(v("1.0") < v("2.0"));
    assert!(v("1.2") < v("1.10"));
    assert!(v("1.2") < v("1.2.0"));
    assert!(v("1.2.0") < v("1.2.1"));
    assert!(v("1.2.1") < v("1.2.1a"));
    assert!(v("1.2.1rc2") < v("1.2.1rc10"));
    assert!(v("1.2.1") < v("1.2.1.0"));
    assert!(v("1.2.9.9") < v("1.2.10"));
    assert_eq!(v("1.2.3").cmp(&v("1.2.3")), cmp::Ordering::Equal);
  }

  #[test]
  fn relative_order_against_other_values() {
    use cmp::Ordering::*;
    let x = v("1.2.3");
    assert_eq!(x.relative_order(&Value::Version(v("1.2.4"))), Some(Less));
    assert_eq!(x.relative_order(&Value::Int(100)), Some(Greater));
    assert_eq!(x.relative_order(&Value::Float(1.5)), Some(Greater));
    assert_eq!(x.relative_order(&Value::Null), Some(Greater));
    assert_eq!(x.relative_order(&Value::Text("1.2.3".into())), Some(Equal));
    assert_eq!(x.relative_order(&Value::Text("1.10".into())), Some(Less));
    assert_eq!(x.relative_order(&Value::Text("junk".into())), Some(Greater));
    assert_eq!(
      x.relative_order(&Value::Seq(vec![Value::Int(1), Value::Int(1)])),
      Some(Greater)
    );
    assert_eq!(x.relative_order(&Value::Bool(false)), None);
    assert_eq!(x.relative_order(&Value::Component(c("1"))), None);
  }

  #[test]
  fn equality_requires_a_version() {
    let x = v("1.2.3");
    assert!(x.equals(&Value::Version(v("1.2.3"))));
    assert!(!x.equals(&Value::Version(v("1.2.3.0"))));
    assert!(!x.equals(&Value::Text("1.2.3".into())));
  }

  #[test]
  fn next_breaking() {
    assert_eq!(v("0.3.1").next_breaking(), Ok(v("0.4")));
    assert_eq!(v("1.3.1").next_breaking(), Ok(v("2.0")));
  }

  #[test]
  fn next_breaking_at_the_top_of_the_range() {
    assert_eq!(
      v("4294967295.0").next_breaking(),
      Err(Error::bad_value(
        "major",
        ValueProblem::OutOfRange("4294967295.0".into())
      ))
    );
    assert_eq!(
      v("0.4294967295").next_breaking(),
      Err(Error::bad_value(
        "minor",
        ValueProblem::OutOfRange("0.4294967295".into())
      ))
    );
    assert_eq!(v("4294967294.7").next_breaking(), Ok(v("4294967295.0")));
  }

  #[test]
  fn crate_version_parses() {
    assert!(crate_version().is_ok());
  }

  #[test]
  fn serde_accepts_several_shapes() {
    #[derive(Debug, serde::Deserialize, serde::Serialize)]
    struct Doc {
      v: Version,
    }
    let doc: Doc = toml::from_str(r#"v = "2.3.2-3-g726351""#).unwrap();
    assert_eq!(doc.v, v("2.3.2-3-g726351"));
    let doc: Doc = toml::from_str("v = 3").unwrap();
    assert_eq!(doc.v, v("3.0"));
    let doc: Doc = toml::from_str("v = 1.5").unwrap();
    assert_eq!(doc.v, v("1.5"));
    let doc: Doc = toml::from_str(r#"v = [1, 2, "3a"]"#).unwrap();
    assert_eq!(doc.v, v("1.2.3a"));
    assert!(toml::from_str::<Doc>(r#"v = "1""#).is_err());
    assert_eq!(
      toml::to_string(&Doc { v: v("1.0.2") }).unwrap().trim(),
      r#"v = "1.0.2""#
    );
  }
}
