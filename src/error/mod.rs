// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!             ChoresError (~24 bytes)
//!                     |
//!   +------+------+---+---+-------+-----+
//!   |      |      |       |       |     |
//!   v      v      v       v       v     v
//! Bail    Git    Cfg   Release  Proc  Io/Other
//!         Box    Box     Box     Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Git     Gix, CommandFailed, NotARepository
//!   Config  ParseError, MissingKey, InvalidValue
//!   Release UndefinedReleaseType, MissingBucket, Unconverged, VersionOverflow
//!   Process SpawnFailed, NonZeroExit, OutputError
//!
//! All variants boxed => ChoresError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ChoresError`].
pub type ChoresResult<T> = std::result::Result<T, ChoresError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ChoresError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Release convergence error.
    #[error("release error: {0}")]
    Release(#[from] Box<ReleaseError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`ChoresError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> ChoresError {
    ChoresError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ChoresError {
                fn from(err: $error) -> Self {
                    ChoresError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    GitError => Git,
    ConfigError => Config,
    ReleaseError => Release,
    ProcessError => Process,
    std::io::Error => Io,
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to discover repository from path.
    #[error("failed to discover repository: {0}")]
    Discover(#[from] Box<gix::discover::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Path is not inside a git repository.
    #[error("not a git repository: {path}")]
    NotARepository { path: String },

    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },

    /// Configuration file not found.
    #[error("config file not found: {0}")]
    NotFound(String),
}

// --- Release Errors ---

/// Release convergence errors.
#[derive(Debug, Error)]
pub enum ReleaseError {
    /// Branch is neither a bugfix line nor a feature line.
    #[error(
        "You don't seem to be on a release-related branch; why are you trying to cut a release?"
    )]
    UndefinedReleaseType { branch: String },

    /// Changelog has no bucket for the current line.
    #[error("changelog has no '{bucket}' bucket")]
    MissingBucket { bucket: String },

    /// Bugfix line has no prior release to increment.
    #[error("no released versions found on the {line} line")]
    NoLineRelease { line: String },

    /// Changelog has no releases at all.
    #[error("changelog contains no released versions")]
    NoReleases,

    /// Next version would not fit in a version component.
    #[error("can't compute the version after {version}")]
    VersionOverflow { version: String },

    /// Version string is not valid semver.
    #[error("invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },

    /// User declined the proposed actions.
    #[error("Aborting.")]
    Aborted,

    /// State still diverges after preparing.
    #[error("Something went wrong! Please fix.")]
    Unconverged,
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with non-zero status.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}
