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

//! Input collection: tables from `.csv` files, datasets from `.json` files.

use crate::error::CliError;
use formation_core::{Dataset, Datasets, Formation, FormationError};
use formation_csv::{load_table_path, LoadConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Every table named on the command line, plus the formations their
/// CSV notes declare.
#[derive(Debug, Default)]
pub struct Workspace {
    pub datasets: Datasets,
    pub formations: Vec<Formation>,
    /// Formations that could not be built, keyed by table name.
    pub setup_errors: Vec<(String, FormationError)>,
}

/// Expand paths into table files. Directories are scanned (not
/// recursively) for `.csv` and `.json` files, in name order.
///
/// # Errors
///
/// Returns `InvalidInput` for a file with another extension or a path that
/// does not exist, and `Io` if a directory cannot be read.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut inputs = Vec::new();

    for path in paths {
        if path.is_dir() {
            let entries = fs::read_dir(path).map_err(|e| CliError::io_error(path, e))?;
            let mut found = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| CliError::io_error(path, e))?;
                let file = entry.path();
                if file.is_file() && is_table(&file) {
                    found.push(file);
                }
            }
            found.sort();
            inputs.extend(found);
        } else if path.is_file() {
            if !is_table(path) {
                return Err(CliError::invalid_input(format!(
                    "'{}' is not a .csv or .json table",
                    path.display()
                )));
            }
            inputs.push(path.clone());
        } else {
            return Err(CliError::invalid_input(format!(
                "'{}' does not exist",
                path.display()
            )));
        }
    }

    Ok(inputs)
}

fn is_table(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some("csv") | Some("json"))
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
}

fn table_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Load every input into one workspace. A table loaded twice keeps the
/// later copy.
pub fn load_workspace(paths: &[PathBuf], config: &LoadConfig) -> Result<Workspace, CliError> {
    let mut workspace = Workspace::default();

    for path in collect_inputs(paths)? {
        let (name, dataset) = if extension(&path).as_deref() == Some("json") {
            (table_name(&path), load_json(&path)?)
        } else {
            let table = load_table_path(&path, config).map_err(|e| CliError::load(&path, e))?;
            let (formations, errors) = table.formations();
            workspace.formations.extend(formations);
            workspace
                .setup_errors
                .extend(errors.into_iter().map(|err| (table.name.clone(), err)));
            (table.name, table.dataset)
        };

        debug!(table = %name, path = %path.display(), "loaded input");
        if workspace.datasets.insert(name.clone(), dataset).is_some() {
            warn!(table = %name, "table loaded more than once, the last one wins");
        }
    }

    Ok(workspace)
}

fn load_json(path: &Path) -> Result<Dataset, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))?;
    serde_json::from_str(&text).map_err(|e| CliError::json(format!("{}: {}", path.display(), e)))
}
