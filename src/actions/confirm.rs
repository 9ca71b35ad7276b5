//! Yes/no gate in front of destructive actions

use std::io::{self, BufRead, Write};

/// Ask a yes/no question and wait for the answer
///
/// Only `y` (case-insensitive, surrounding whitespace ignored) counts as
/// consent. End of input counts as a refusal.
pub fn confirm<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{} (y/n): ", prompt)?;
    output.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
