//! Logging helpers: level selection for the binary, and escaping of raw player
//! input (session ids, typed commands) before it lands in a log line.

use std::fmt::Write;

use log::LevelFilter;

/// Longest input echoed into a log line before it is cut with an ellipsis.
pub const MAX_LOGGED_INPUT: usize = 120;

/// Pick the log level for a run.
///
/// `-v`/`-vv` always win. Otherwise the configured level applies, except that an
/// interactive session with no log file drops to `Warn`, because console log lines
/// would land between prompts.
pub fn select_level(configured: Option<&str>, verbosity: u8, interactive: bool, has_file: bool) -> LevelFilter {
    match verbosity {
        0 if interactive && !has_file => LevelFilter::Warn,
        0 => configured
            .and_then(|level| level.parse().ok())
            .unwrap_or(LevelFilter::Info),
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c.is_control() => {
            let _ = write!(out, "\\x{:02X}", c as u32);
        }
        c => out.push(c),
    }
}

/// Render player input as a single log-safe line, truncated to [`MAX_LOGGED_INPUT`] chars.
pub fn escape_log(input: &str) -> String {
    let mut chars = input.chars();
    let mut out = chars
        .by_ref()
        .take(MAX_LOGGED_INPUT)
        .fold(String::with_capacity(input.len().min(MAX_LOGGED_INPUT)), |mut acc, ch| {
            push_escaped(&mut acc, ch);
            acc
        });
    if chars.next().is_some() {
        out.push('…');
    }
    out
}
