// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:    find_files()     glob pattern matching, sorted
//!          snapshot()       path -> mtime, for polling watchers
//!          WalkOptions      max_depth, hidden, gitignore, skips
//! copy:    copy_dir_contents_async() recursive directory copy
//! scratch: ScratchDir       temp dir that may outlive the run
//! ```

pub mod copy;
pub mod scratch;
pub mod walk;
