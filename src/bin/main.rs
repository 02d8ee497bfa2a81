// main.rs
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
  rust_2021_compatibility,
  unused
)]

use std::{cmp::Ordering, io, process};

use verord::{
  cli::{self, Command, Operands, SourceArg},
  compare::compare,
  config::Config,
  error::Error,
  literal, sort,
  version::{self, Version},
};

fn main() {
  let args = cli::Args::from_command_line().unwrap_or_else(die);

  init_logging(args.verbose);

  let config = Config::load(args.config_file.as_deref()).unwrap_or_else(die);

  // Check version requirement
  if let Some(ref r) = args.version_requirement {
    let r = config.range(r).unwrap_or_else(die);
    let v = version::crate_version().unwrap_or_else(die);
    match v.cmp_to_range(&r) {
      Ordering::Less => die(Error::TooOldVersion(v, r)),
      Ordering::Greater => die(Error::TooNewVersion(v, r)),
      Ordering::Equal => (),
    }
  }

  let success = run(&args.command, &config).unwrap_or_else(die);
  if !success {
    process::exit(1);
  }
}

fn die<T>(e: Error) -> T {
  eprintln!("Error: {}", e);
  process::exit(1);
}

fn init_logging(verbose: bool) {
  use tracing_subscriber::{
    layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
  };

  let filter = if verbose {
    EnvFilter::new("verord=debug,warn")
  } else {
    EnvFilter::try_from_env("VERORD_LOG")
      .unwrap_or_else(|_| EnvFilter::new("warn"))
  };

  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(io::stderr),
    )
    .init();
}

/// Executes the command and tells whether it succeeded.
fn run(command: &Command, config: &Config) -> Result<bool, Error> {
  match command {
    Command::Parse { fields, versions } => {
      for s in versions {
        let v = config.check(s.parse()?)?;
        if *fields {
          println!(
            "{}\tmajor={} minor={} build={} revision={}\t{}",
            v,
            v.major(),
            v.minor(),
            v.build(),
            v.revision(),
            validity(&v)
          );
        } else {
          println!("{}\t{}", v, validity(&v));
        }
      }
      Ok(true)
    }

    Command::Compare {
      operands,
      left,
      right,
    } => {
      let order = match operands {
        Operands::Versions => {
          let l: Version = left.parse()?;
          let r: Version = right.parse()?;
          Some(l.cmp(&r))
        }
        Operands::Values => compare(
          &literal::parse_value(left)?,
          &literal::parse_value(right)?,
        ),
      };
      println!(
        "{}",
        match order {
          Some(Ordering::Less) => "<",
          Some(Ordering::Equal) => "=",
          Some(Ordering::Greater) => ">",
          None => "incomparable",
        }
      );
      Ok(true)
    }

    Command::Sort {
      operands,
      reverse,
      source,
    } => {
      let inputs = load_inputs(source)?;
      let descending = config.descending != *reverse;
      match operands {
        Operands::Versions => {
          let mut versions = inputs
            .iter()
            .map(|s| config.check(s.parse()?))
            .collect::<Result<Vec<_>, _>>()?;
          if descending {
            versions.sort_by(|a, b| b.cmp(a));
          } else {
            versions.sort();
          }
          for v in versions {
            println!("{}", v);
          }
        }
        Operands::Values => {
          let mut values = inputs
            .iter()
            .map(|s| literal::parse_value(s))
            .collect::<Result<Vec<_>, _>>()?;
          if descending {
            sort::sort_descending(&mut values);
          } else {
            sort::sort(&mut values);
          }
          for v in values {
            println!("{}", v);
          }
        }
      }
      Ok(true)
    }

    Command::Valid { versions } => {
      let mut all_valid = true;
      for s in versions {
        let v: Version = s.parse()?;
        all_valid &= v.is_valid();
        println!("{}\t{}", v, validity(&v));
      }
      Ok(all_valid)
    }

    Command::Within { version, range } => {
      let v = config.check(version.parse()?)?;
      let r = config.range(range)?;
      let order = v.cmp_to_range(&r);
      println!(
        "{}",
        match order {
          Ordering::Less => "below",
          Ordering::Equal => "within",
          Ordering::Greater => "above",
        }
      );
      Ok(order.is_eq())
    }
  }
}

fn validity(v: &Version) -> &'static str {
  if v.is_valid() {
    "valid"
  } else {
    "invalid"
  }
}

fn load_inputs(source: &SourceArg) -> Result<Vec<String>, Error> {
  let lines = match source {
    SourceArg::Args(args) => args.clone(),
    SourceArg::Pipe => io::stdin()
      .lines()
      .collect::<Result<_, _>>()
      .map_err(|_| Error::CannotReadStdIn)?,
  };
  Ok(
    lines
      .iter()
      .map(|s| s.trim())
      .filter(|s| !s.is_empty())
      .map(str::to_owned)
      .collect(),
  )
}
