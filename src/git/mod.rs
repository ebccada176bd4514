// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations module.
//!
//! ```text
//!        Public API
//!      query.rs  cmd.rs
//!          \      /
//!           v    v
//!      ,------------------,
//!      | backend (traits) |
//!      '--+----------+----'
//!         |          |
//!         v          v
//!    GitQuery    GitMutation
//!   (gix, read)  (CLI, write)
//!         |          |
//!         v          v
//!    GixBackend  ShellBackend
//!    .is_repo    .commit_all
//!    .branch     .tag_annotated
//!    .tags       .clone
//!    .changes    .checkout
//! ```
//!
//! **`GixBackend`**: pure Rust, no subprocess, read-only.
//! **`ShellBackend`**: git CLI for writes.

pub mod backend;
pub mod cmd;
pub mod query;
