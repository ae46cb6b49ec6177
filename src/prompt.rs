//! Interactive prompts over any reader/writer pair

use crate::exceptions::{InstallerError, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(InstallerError::InvalidChoice("no input".to_string()));
    }
    Ok(line.trim().to_string())
}

/// List `options` as `[1] ..`, `[2] ..` and read a 1-based selection.
///
/// Non-numeric, zero and out-of-range answers are rejected with
/// [`InstallerError::InvalidChoice`]; there is no re-prompt.
pub fn choose<R, W, T>(input: &mut R, output: &mut W, options: &[T], prompt: &str) -> Result<T>
where
    R: BufRead,
    W: Write,
    T: Display + Clone,
{
    for (i, option) in options.iter().enumerate() {
        writeln!(output, "[{}] {}", i + 1, option)?;
    }
    write!(output, "{} [1-{}]: ", prompt, options.len())?;
    output.flush()?;

    let answer = read_answer(input)?;
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|idx| options.get(idx))
        .cloned()
        .ok_or(InstallerError::InvalidChoice(answer))
}

/// Ask a yes/no question; only `y` or `yes` (any case) count as yes
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<bool> {
    write!(output, "{question} (y/n) ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Whether to reboot after installing.
///
/// An explicit `--reboot`/`--no-reboot` (`flag`) wins, then `assume_yes`;
/// otherwise the user is asked.
pub fn reboot_decision<R: BufRead, W: Write>(
    flag: Option<bool>,
    assume_yes: bool,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    match flag {
        Some(reboot) => Ok(reboot),
        None if assume_yes => Ok(true),
        None => confirm(input, output, "Reboot now ?"),
    }
}
