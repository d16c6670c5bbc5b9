// Dweve Formation - Referential integrity checks for configuration tables
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CLI command definitions and argument parsing.

use crate::commands;
use crate::error::CliError;
use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

/// Report format for `check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Top-level CLI commands.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use formation_cli::cli::Commands;
///
/// #[derive(Parser)]
/// struct Cli {
///     #[command(subcommand)]
///     command: Commands,
/// }
/// ```
#[derive(Subcommand)]
pub enum Commands {
    /// Check every formation declared in the given tables
    ///
    /// Each formation's referenced values must exist in their target
    /// columns. Exits with status 1 if any error is found.
    Check {
        /// Table files (.csv, .json) or directories containing them
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Check formations in parallel
        #[arg(short, long)]
        parallel: bool,
    },

    /// List each formation's possible references and the file dependency map
    Refs {
        /// Table files (.csv, .json) or directories containing them
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,
    },

    /// Extract references from one content string
    ///
    /// The formation may be given with or without its format(...) wrapper.
    Extract {
        /// Formation text
        #[arg(value_name = "FORMATION")]
        formation: String,

        /// Cell content to read against the formation
        #[arg(value_name = "CONTENT")]
        content: String,

        /// Discriminant value selecting a decoration branch
        #[arg(short, long)]
        discriminant: Option<String>,
    },
}

impl Commands {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Returns `Err` if inputs cannot be loaded, or if the command found
    /// reference errors.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Check {
                paths,
                format,
                parallel,
            } => commands::check(&paths, format, parallel),
            Commands::Refs { paths } => commands::refs(&paths),
            Commands::Extract {
                formation,
                content,
                discriminant,
            } => commands::extract(&formation, &content, discriminant.as_deref()),
        }
    }
}
