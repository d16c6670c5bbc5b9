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

//! Formation CLI library: command definitions and implementations.
//!
//! # Commands
//!
//! - **check**: check every formation declared in a set of tables
//! - **refs**: list possible references and file dependencies
//! - **extract**: read one content string against a formation
//!
//! ```no_run
//! use formation_cli::commands::extract;
//!
//! # fn main() -> Result<(), formation_cli::error::CliError> {
//! extract("format(ItemCfg.id,PH)", "1001,5", None)?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod tables;
