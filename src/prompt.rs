//! Plain-text startup prompts.
//!
//! The `run` command collects any parameter not given on the command line by
//! asking on stdin before the batch starts.

use std::io::{self, BufRead, Write};

/// Print `label: ` and read one trimmed line from stdin.
pub fn prompt_line(label: &str) -> io::Result<String> {
    let mut out = io::stdout();
    write!(out, "{label}: ")?;
    out.flush()?;

    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed while waiting for input",
        ));
    }
    Ok(line.trim().to_string())
}

/// Ask a yes/no question, repeating until the answer is recognizable.
pub fn prompt_yes_no(label: &str) -> io::Result<bool> {
    loop {
        let answer = prompt_line(&format!("{label} (y/n)"))?;
        match parse_yes_no(&answer) {
            Some(value) => return Ok(value),
            None => println!("Please answer 'y' or 'n'."),
        }
    }
}

/// Interpret a y/n answer; `None` when unrecognizable.
pub fn parse_yes_no(answer: &str) -> Option<bool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
