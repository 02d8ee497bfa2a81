// lib.rs
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

#![deny(
  future_incompatible,
  missing_debug_implementations,
  nonstandard_style,
  rust_2021_compatibility
)]

pub mod cli;
pub mod compare;
pub mod component;
pub mod config;
pub mod error;
pub mod literal;
pub mod natural;
pub mod parsing;
pub mod sort;
pub mod value;
pub mod version;
pub mod version_range;

pub use self::{
  compare::{compare, RelativeOrder},
  component::{Component, ComponentState},
  error::{Error, ErrorKind},
  value::{Kind, Value},
  version::Version,
  version_range::VersionRange,
};
