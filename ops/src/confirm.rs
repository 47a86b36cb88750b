use crate::error::{self, Result};
use snafu::ResultExt;
use std::io::BufRead;

/// The exact text an operator must type before anything is deleted.
pub const CONFIRMATION_KEYWORD: &str = "DELETE";

/// Read one line from `input` and report whether its bytes are exactly [`CONFIRMATION_KEYWORD`].
/// Only the line terminator is stripped; surrounding spaces or a different case do not match. End
/// of input and bytes that are not text count as a refusal.
pub fn confirmed<R: BufRead>(mut input: R) -> Result<bool> {
    let mut line = Vec::new();
    input
        .read_until(b'\n', &mut line)
        .context(error::ConfirmationSnafu)?;
    let answer = line
        .strip_suffix(b"\n")
        .map(|rest| rest.strip_suffix(b"\r").unwrap_or(rest))
        .unwrap_or(&line[..]);
    Ok(answer == CONFIRMATION_KEYWORD.as_bytes())
}
