//! Response rendering
//!
//! Writers take any [`core::fmt::Write`] sink; the firmware renders into a
//! [`Response`] and ships it out in USB packets. Every line ends in `\n`.

use core::fmt::{self, Write};

use heapless::String;

use crate::command::ParseError;
use crate::line::MAX_LINE_LEN;

/// Worst case: an unknown command echoing a full line, plus the help listing
pub const MAX_RESPONSE_LEN: usize = MAX_LINE_LEN + 256;

/// Buffer holding the response to one line
pub type Response = String<MAX_RESPONSE_LEN>;

/// Command names and descriptions shown by `help`
pub const HELP: [(&str, &str); 3] = [
    ("i2c", "i2c command"),
    ("config", "Get or set configuration"),
    ("help", "Print this!"),
];

/// `OK` followed by each byte as ` XX`
pub fn write_ok<W: Write>(out: &mut W, data: &[u8]) -> fmt::Result {
    out.write_str("OK")?;
    for byte in data {
        write!(out, " {byte:02X}")?;
    }
    out.write_char('\n')
}

/// `ERR <code>` for a failed transaction
pub fn write_error_code<W: Write>(out: &mut W, code: i8) -> fmt::Result {
    writeln!(out, "ERR {code}")
}

/// Bare `OK` or `ERR` for configuration commands
pub fn write_status<W: Write>(out: &mut W, ok: bool) -> fmt::Result {
    out.write_str(if ok { "OK\n" } else { "ERR\n" })
}

/// Help listing, or the single entry for `topic`
///
/// An unknown topic prints nothing.
pub fn write_help<W: Write>(out: &mut W, topic: Option<&str>) -> fmt::Result {
    for (name, description) in HELP {
        if topic.map_or(true, |t| t == name) {
            writeln!(out, "{name} - {description}")?;
        }
    }
    Ok(())
}

/// Error line for a rejected input line
pub fn write_parse_error<W: Write>(out: &mut W, error: &ParseError<'_>) -> fmt::Result {
    writeln!(out, "{error}")?;
    if error.shows_help() {
        write_help(out, None)?;
    }
    Ok(())
}
