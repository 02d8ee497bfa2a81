// cli.rs
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
  io::{self, IsTerminal},
  path,
};

use clap::Parser;

use crate::error::Error;

#[derive(Debug)]
pub struct Args {
  pub config_file: Option<path::PathBuf>,
  pub verbose: bool,
  pub version_requirement: Option<String>,
  pub command: Command,
}

impl Args {
  pub fn from_command_line() -> Result<Self, Error> {
    Self::try_from(Cli::parse())
  }
}

#[derive(Debug, PartialEq)]
pub enum Command {
  Parse {
    fields: bool,
    versions: Vec<String>,
  },
  Compare {
    operands: Operands,
    left: String,
    right: String,
  },
  Sort {
    operands: Operands,
    reverse: bool,
    source: SourceArg,
  },
  Valid {
    versions: Vec<String>,
  },
  Within {
    version: String,
    range: String,
  },
}

/// How to read the operands of `compare` and `sort`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operands {
  Versions,
  Values,
}

impl Operands {
  fn from_flag(values: bool) -> Self {
    if values {
      Operands::Values
    } else {
      Operands::Versions
    }
  }
}

#[derive(Debug, PartialEq)]
pub enum SourceArg {
  Pipe,
  Args(Vec<String>),
}

impl TryFrom<Cli> for Args {
  type Error = Error;

  fn try_from(cli: Cli) -> Result<Self, Self::Error> {
    let command = match cli.command {
      CliCommand::Parse { fields, versions } => {
        Command::Parse { fields, versions }
      }
      CliCommand::Compare {
        values,
        left,
        right,
      } => Command::Compare {
        operands: Operands::from_flag(values),
        left,
        right,
      },
      CliCommand::Sort {
        values,
        reverse,
        inputs,
      } => {
        let source = if !inputs.is_empty() {
          SourceArg::Args(inputs)
        } else if !io::stdin().is_terminal() {
          SourceArg::Pipe
        } else {
          return Err(Error::NoInput);
        };
        Command::Sort {
          operands: Operands::from_flag(values),
          reverse,
          source,
        }
      }
      CliCommand::Valid { versions } => Command::Valid { versions },
      CliCommand::Within { version, range } => {
        Command::Within { version, range }
      }
    };
    Ok(Self {
      config_file: cli.config,
      verbose: cli.verbose,
      version_requirement: cli.require,
      command,
    })
  }
}

#[derive(Debug, clap::Parser)]
#[command(
  about = "Parse, compare, and sort four-part version numbers",
  version,
  max_term_width = 80
)]
struct Cli {
  /// Read configuration from FILE
  ///
  /// If not given then the nearest verord.toml file in the current working
  /// directory or its ancestors is used, if any.
  #[arg(long, short, value_name = "FILE", global = true)]
  config: Option<path::PathBuf>,

  /// Log diagnostics to standard error
  ///
  /// The VERORD_LOG environment variable gives finer control over what gets
  /// logged.
  #[arg(long, short, global = true)]
  verbose: bool,

  /// Abort unless the program version lies within RANGE
  ///
  /// RANGE is either a range expression like "0.1..0.2" or the name of a range
  /// defined in the configuration file.
  #[arg(long, value_name = "RANGE", global = true)]
  require: Option<String>,

  #[command(subcommand)]
  command: CliCommand,
}

#[derive(Debug, clap::Subcommand)]
enum CliCommand {
  /// Normalize versions and show whether they are valid
  Parse {
    /// Show the individual fields
    #[arg(long, short)]
    fields: bool,

    #[arg(value_name = "VERSION", required = true)]
    versions: Vec<String>,
  },

  /// Compare two operands and print <, =, > or "incomparable"
  Compare {
    /// Read the operands as value literals instead of versions
    #[arg(long)]
    values: bool,

    #[arg(value_name = "A")]
    left: String,

    #[arg(value_name = "B")]
    right: String,
  },

  /// Sort operands in ascending order
  ///
  /// The operands are read one per line from the standard input when none are
  /// given on the command line.
  Sort {
    /// Read the operands as value literals instead of versions
    #[arg(long)]
    values: bool,

    /// Reverse the configured sort direction
    #[arg(long, short)]
    reverse: bool,

    #[arg(value_name = "OPERAND")]
    inputs: Vec<String>,
  },

  /// Check that versions are valid; fails if any is not
  Valid {
    #[arg(value_name = "VERSION", required = true)]
    versions: Vec<String>,
  },

  /// Tell whether VERSION is below, within or above RANGE
  ///
  /// Fails unless the version is within the range.
  Within {
    version: String,

    range: String,
  },
}

#[cfg(test)]
mod test {
  use super::*;

  fn args(argv: &[&str]) -> Result<Args, Error> {
    let cli = Cli::try_parse_from(argv).expect("command line parses");
    Args::try_from(cli)
  }

  #[test]
  fn global_options() {
    let a = args(&[
      "verord",
      "valid",
      "1.0",
      "--config",
      "x.toml",
      "-v",
      "--require",
      "stable",
    ])
    .unwrap();
    assert_eq!(a.config_file, Some(path::PathBuf::from("x.toml")));
    assert!(a.verbose);
    assert_eq!(a.version_requirement.as_deref(), Some("stable"));
    assert_eq!(
      a.command,
      Command::Valid {
        versions: vec!["1.0".into()]
      }
    );
  }

  #[test]
  fn subcommands() {
    assert_eq!(
      args(&["verord", "parse", "--fields", "1.0", "2.0"])
        .unwrap()
        .command,
      Command::Parse {
        fields: true,
        versions: vec!["1.0".into(), "2.0".into()],
      }
    );
    assert_eq!(
      args(&["verord", "compare", "--values", "1", "\"1\""])
        .unwrap()
        .command,
      Command::Compare {
        operands: Operands::Values,
        left: "1".into(),
        right: "\"1\"".into(),
      }
    );
    assert_eq!(
      args(&["verord", "sort", "-r", "1.2", "1.10"])
        .unwrap()
        .command,
      Command::Sort {
        operands: Operands::Versions,
        reverse: true,
        source: SourceArg::Args(vec!["1.2".into(), "1.10".into()]),
      }
    );
    assert_eq!(
      args(&["verord", "within", "1.5", "1.0..2.0"])
        .unwrap()
        .command,
      Command::Within {
        version: "1.5".into(),
        range: "1.0..2.0".into(),
      }
    );
  }

  #[test]
  fn missing_operands_are_rejected_by_clap() {
    assert!(Cli::try_parse_from(["verord", "valid"]).is_err());
    assert!(Cli::try_parse_from(["verord", "compare", "1.0"]).is_err());
    assert!(Cli::try_parse_from(["verord"]).is_err());
  }
}
