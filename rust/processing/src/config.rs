// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Build configuration loaded from environment variables.

use houseforge_geometry::ShellRole;
use std::path::PathBuf;

/// Build configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    /// Build floors and windows on the rayon pool.
    pub parallel: bool,
    /// Number of worker threads; 0 uses the global rayon pool.
    pub worker_threads: usize,
    /// What the wall shell is carved for.
    pub shell_role: ShellRole,
    /// OBJ output path; the JSON summary is written next to it.
    pub output: PathBuf,
}

impl BuildConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            parallel: std::env::var("HOUSEFORGE_PARALLEL")
                .ok()
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.parallel),
            worker_threads: std::env::var("HOUSEFORGE_WORKER_THREADS")
                .unwrap_or_else(|_| num_cpus::get().to_string())
                .parse()
                .unwrap_or_else(|_| num_cpus::get()),
            shell_role: match std::env::var("HOUSEFORGE_SHELL_ROLE") {
                Ok(name) => ShellRole::from_name(&name).unwrap_or_else(|| {
                    tracing::warn!(value = %name, "unknown shell role, using facade");
                    ShellRole::Facade
                }),
                Err(_) => defaults.shell_role,
            },
            output: std::env::var("HOUSEFORGE_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
        }
    }

    /// Sequential build, used to check parallel output against.
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Path of the JSON summary written alongside the OBJ.
    pub fn summary_path(&self) -> PathBuf {
        self.output.with_extension("json")
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            worker_threads: 0,
            shell_role: ShellRole::Facade,
            output: PathBuf::from("house.obj"),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
