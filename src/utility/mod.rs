// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! console      confirm()  yes/no prompts
//! environment  in_ci()    CIRCLECI / TRAVIS detection
//! fs
//!   walk:    find_files(), snapshot(), WalkOptions
//!   copy:    copy_dir_contents_async()
//!   scratch: ScratchDir
//! shell        split_words()  quoted option strings
//! ```

pub mod console;
pub mod environment;
pub mod fs;
pub mod shell;
