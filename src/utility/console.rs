// chores-rs: Project Task Runner
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Interactive yes/no prompts.
//!
//! ```text
//! "Take the above actions? [Y/n] "
//!   ""        --> default
//!   y | yes   --> true
//!   n | no    --> false
//!   other     --> complain on stderr, ask again
//!   EOF       --> UnexpectedEof error, nothing is assumed
//! ```
//!
//! [`password`] reads a secret without echoing it.

use std::io::{self, BufRead, Write};

const NOT_UNDERSTOOD: &str = "I didn't understand you. Please specify '(y)es' or '(n)o'.";

/// Asks `question` on stdout and reads the answer from stdin.
///
/// # Errors
///
/// Returns an error if the terminal cannot be read or written, or if stdin
/// closes before an answer arrives.
pub fn confirm(question: &str, default_yes: bool) -> io::Result<bool> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    confirm_with(
        question,
        default_yes,
        &mut stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    )
}

/// [`confirm`] over arbitrary streams; complaints go to `errors`.
///
/// # Errors
///
/// Returns an error if reading or writing fails, and
/// `io::ErrorKind::UnexpectedEof` if `input` ends without an answer.
pub fn confirm_with<R: BufRead, W: Write, E: Write>(
    question: &str,
    default_yes: bool,
    input: &mut R,
    output: &mut W,
    errors: &mut E,
) -> io::Result<bool> {
    let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
    loop {
        write!(output, "{question} {suffix} ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer to {question:?}: input closed"),
            ));
        }

        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default_yes),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(errors, "{NOT_UNDERSTOOD}")?,
        }
    }
}

/// Prompts for a secret on the terminal without echo.
///
/// # Errors
///
/// Returns an error if there is no terminal to read from.
pub fn password(prompt: &str) -> io::Result<String> {
    dialoguer::Password::new()
        .with_prompt(prompt.trim_end().trim_end_matches(':'))
        .allow_empty_password(true)
        .interact()
        .map_err(io::Error::other)
}
