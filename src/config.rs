// config.rs
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
  collections::HashMap,
  fs,
  path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_with::{serde_as, DisplayFromStr};

use crate::{error::Error, version::Version, version_range::VersionRange};

pub const CONFIG_FILE_NAME: &str = "verord.toml";

/// Settings read from `verord.toml`.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Reject versions that are not valid.
  pub strict: bool,
  /// Sort in descending order by default.
  pub descending: bool,
  /// Named version ranges.
  #[serde_as(as = "HashMap<_, DisplayFromStr>")]
  pub ranges: HashMap<String, VersionRange>,
}

impl Config {
  /// Loads the configuration from `path` or, if not given, from the nearest
  /// `verord.toml` in the current directory or its ancestors.  Falls back to
  /// the defaults when there is no such file.
  pub fn load(path: Option<&Path>) -> Result<Self, Error> {
    let path = match path {
      Some(p) => Some(p.to_owned()),
      None => nearest_config_file(CONFIG_FILE_NAME),
    };
    match path {
      Some(p) => {
        tracing::debug!(path = %p.display(), "loading configuration");
        let s = fs::read_to_string(&p)
          .map_err(|_| Error::CannotReadFile(p.display().to_string()))?;
        Self::from_toml(&s, &p)
      }
      None => Ok(Self::default()),
    }
  }

  pub fn from_toml(s: &str, origin: &Path) -> Result<Self, Error> {
    toml::from_str(s).map_err(|e| {
      Error::BadConfigFile(origin.display().to_string(), e.message().to_owned())
    })
  }

  /// Resolves a range given either by name or as a range expression.
  pub fn range(&self, name_or_expr: &str) -> Result<VersionRange, Error> {
    if let Some(r) = self.ranges.get(name_or_expr) {
      return Ok(r.clone());
    }
    if name_or_expr.contains("..") {
      name_or_expr.parse()
    } else {
      Err(Error::UnknownRange(name_or_expr.to_owned()))
    }
  }

  /// Passes the version through unless strict mode rejects it.
  pub fn check(&self, version: Version) -> Result<Version, Error> {
    if self.strict && !version.is_valid() {
      Err(Error::StrictModeViolation(version.to_string()))
    } else {
      Ok(version)
    }
  }
}

fn nearest_config_file(file_name: &str) -> Option<PathBuf> {
  let dir = PathBuf::from(".").canonicalize().ok()?;
  dir
    .ancestors()
    .map(|d| d.join(file_name))
    .find(|p| p.is_file())
}
