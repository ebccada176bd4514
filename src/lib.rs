// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |      release / docs / testing / ...
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |   TOML, layered settings  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!             release        git     tools
//!          changelog,     gix/CLI   pytest/sphinx/
//!          convergence              setup/twine/..
//!
//!   +-----------------------------------------+
//!   |  core   process builder and runner      |
//!   +-----------------------------------------+
//!   |  foundation   error, logging, utility   |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod release;
pub mod tools;
pub mod utility;
