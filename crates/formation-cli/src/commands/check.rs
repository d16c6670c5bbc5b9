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

//! Check command - relation checks over a set of tables

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::tables::{load_workspace, Workspace};
use colored::Colorize;
use formation_core::{CheckOptions, Datasets, Formation, FormationError, RelationReport};
use formation_csv::LoadConfig;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::debug;

/// Load the tables under `paths`, then check every formation they declare.
///
/// # Errors
///
/// Returns `ReferenceErrors` when any formation failed to build or any
/// check found an error, after the full report has been printed.
///
/// # Examples
///
/// ```no_run
/// use formation_cli::cli::OutputFormat;
/// use formation_cli::commands::check;
/// use std::path::PathBuf;
///
/// # fn main() -> Result<(), formation_cli::error::CliError> {
/// check(&[PathBuf::from("tables")], OutputFormat::Text, true)?;
/// # Ok(())
/// # }
/// ```
pub fn check(paths: &[PathBuf], format: OutputFormat, parallel: bool) -> Result<(), CliError> {
    let workspace = load_workspace(paths, &LoadConfig::default())?;
    let reports = run_checks(
        &workspace.formations,
        &workspace.datasets,
        &CheckOptions::default(),
        parallel,
    );

    let count = workspace.setup_errors.len()
        + reports.iter().map(|report| report.errors.len()).sum::<usize>();

    match format {
        OutputFormat::Json => print_json(&workspace, &reports, count)?,
        OutputFormat::Text => print_text(&workspace, &reports, count),
    }

    debug!(formations = reports.len(), errors = count, parallel, "check finished");
    if count > 0 {
        Err(CliError::ReferenceErrors { count })
    } else {
        Ok(())
    }
}

/// Check each formation against `datasets`, keeping formation order.
pub fn run_checks(
    formations: &[Formation],
    datasets: &Datasets,
    options: &CheckOptions,
    parallel: bool,
) -> Vec<RelationReport> {
    if parallel {
        formations
            .par_iter()
            .map(|formation| formation.relation_check_with_options(datasets, options))
            .collect()
    } else {
        formations
            .iter()
            .map(|formation| formation.relation_check_with_options(datasets, options))
            .collect()
    }
}

fn describe(err: &FormationError) -> String {
    match err.row {
        Some(row) => format!("row {}: {}", row + 1, err),
        None => err.to_string(),
    }
}

fn print_text(workspace: &Workspace, reports: &[RelationReport], count: usize) {
    for (table, err) in &workspace.setup_errors {
        println!("{} {} - could not build formation:", "✗".red().bold(), table);
        println!("  {}", err);
    }

    let mut failed = 0;
    for report in reports {
        let name = format!("{}.{}", report.file, report.field);
        if report.is_ok() {
            println!("{} {}", "✓".green().bold(), name);
            continue;
        }

        failed += 1;
        println!(
            "{} {} - {} error(s):",
            "✗".red().bold(),
            name,
            report.errors.len()
        );
        for err in &report.errors {
            println!("  {}", describe(err));
        }
    }

    println!();
    println!(
        "{} {} formation(s) checked, {} passed, {} failed, {} error(s)",
        "Summary:".bold(),
        reports.len(),
        reports.len() - failed,
        failed + workspace.setup_errors.len(),
        count
    );
}

fn errors_json(errors: &[FormationError]) -> serde_json::Value {
    errors
        .iter()
        .map(|err| {
            serde_json::json!({
                "kind": err.kind.to_string(),
                "message": err.message,
                "row": err.row.map(|row| row + 1),
            })
        })
        .collect()
}

fn print_json(
    workspace: &Workspace,
    reports: &[RelationReport],
    count: usize,
) -> Result<(), CliError> {
    let json = serde_json::json!({
        "ok": count == 0,
        "error_count": count,
        "setup_errors": workspace.setup_errors.iter().map(|(table, err)| {
            serde_json::json!({
                "table": table,
                "kind": err.kind.to_string(),
                "message": err.message,
            })
        }).collect::<Vec<_>>(),
        "formations": reports.iter().map(|report| {
            serde_json::json!({
                "file": report.file,
                "field": report.field,
                "ok": report.is_ok(),
                "errors": errors_json(&report.errors),
            })
        }).collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
