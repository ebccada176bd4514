// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core process management.
//!
//! ```text
//!              core
//!               |
//!            process
//!               |
//!   ProcessBuilder --> ProcessOutput
//!   which lookup, cancellation, stdin payloads
//! ```

pub mod process;
