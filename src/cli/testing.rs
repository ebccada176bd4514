// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Test-suite command arguments.
//!
//! ```text
//! test        [-v] [--no-color] [--capture MODE] [-m MODULE] [-k EXPR] [-x] [-o OPTS] [-w]
//! integration (same flags, runs integration/)
//! coverage    [-r REPORT] [-o OPTS]
//! ```

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct TestArgs {
    /// Passes --verbose to pytest.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Disables colored output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// pytest capture mode.
    #[arg(long, value_name = "MODE", default_value = "sys")]
    pub capture: String,

    /// Runs only `<suite>/<MODULE>.py`.
    #[arg(short = 'm', long, value_name = "MODULE")]
    pub module: Option<String>,

    /// pytest -k selection expression.
    #[arg(short = 'k', value_name = "EXPR")]
    pub k: Option<String>,

    /// Stops on the first failure.
    #[arg(short = 'x', long = "exitfirst")]
    pub x: bool,

    /// Extra options passed through to pytest.
    #[arg(short = 'o', long, value_name = "OPTS", allow_hyphen_values = true)]
    pub opts: Option<String>,

    /// Keeps warnings in the summary.
    #[arg(short = 'w', long = "warnings")]
    pub warnings: bool,
}

impl Default for TestArgs {
    fn default() -> Self {
        Self {
            verbose: false,
            no_color: false,
            capture: "sys".to_string(),
            module: None,
            k: None,
            x: false,
            opts: None,
            warnings: false,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct CoverageArgs {
    /// Coverage report format; `html` is opened afterwards.
    #[arg(short = 'r', long, value_name = "REPORT", default_value = "term")]
    pub report: String,

    /// Extra options passed through to pytest.
    #[arg(short = 'o', long, value_name = "OPTS", allow_hyphen_values = true)]
    pub opts: Option<String>,
}
