//! Line assembly from the raw byte stream
//!
//! Bytes are collected until `\r` or `\n`. A `\r\n` pair produces a single
//! line because empty lines are dropped. A line longer than
//! [`MAX_LINE_LEN`] is dropped whole and reported as [`LineTooLong`] when
//! its terminator arrives.

use heapless::Vec;

/// Longest line kept, in bytes
pub const MAX_LINE_LEN: usize = 511;

/// One complete input line, without its terminator
pub type Line = Vec<u8, MAX_LINE_LEN>;

/// A line overflowed the buffer and was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineTooLong;

/// Accumulates bytes into lines
#[derive(Debug, Clone, Default)]
pub struct LineAssembler {
    buffer: Line,
    overflowed: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a single byte
    ///
    /// Returns `Some` when `byte` terminates a non-empty line: the line
    /// itself, or [`LineTooLong`] if bytes were lost.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Line, LineTooLong>> {
        match byte {
            b'\r' | b'\n' => {
                let line = core::mem::take(&mut self.buffer);
                if core::mem::take(&mut self.overflowed) {
                    return Some(Err(LineTooLong));
                }
                (!line.is_empty()).then_some(Ok(line))
            }
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Fed = Result<std::vec::Vec<u8>, LineTooLong>;

    fn lines(assembler: &mut LineAssembler, input: &[u8]) -> std::vec::Vec<Fed> {
        input
            .iter()
            .filter_map(|&b| assembler.feed(b))
            .map(|line| line.map(|l| l.to_vec()))
            .collect()
    }

    #[test]
    fn test_crlf_yields_one_line() {
        let mut assembler = LineAssembler::new();
        assert_eq!(lines(&mut assembler, b"help\r\n"), [Ok(b"help".to_vec())]);
        assert_eq!(
            lines(&mut assembler, b"a\rb\nc\r\n"),
            [Ok(b"a".to_vec()), Ok(b"b".to_vec()), Ok(b"c".to_vec())]
        );
    }

    #[test]
    fn test_empty_lines_ignored() {
        assert!(lines(&mut LineAssembler::new(), b"\r\n\n\r\r").is_empty());
    }

    #[test]
    fn test_partial_line_held_back() {
        let mut assembler = LineAssembler::new();
        assert!(lines(&mut assembler, b"i2c 50").is_empty());
        assert_eq!(lines(&mut assembler, b" 1\n"), [Ok(b"i2c 50 1".to_vec())]);
    }

    #[test]
    fn test_overlong_line_rejected() {
        let mut assembler = LineAssembler::new();
        let mut input = std::vec![b'x'; MAX_LINE_LEN + 40];
        input.extend_from_slice(b"\r\nnext\n");

        assert_eq!(
            lines(&mut assembler, &input),
            [Err(LineTooLong), Ok(b"next".to_vec())]
        );
    }

    #[test]
    fn test_line_at_limit_kept() {
        let mut assembler = LineAssembler::new();
        let mut input = std::vec![b'x'; MAX_LINE_LEN];
        input.push(b'\n');

        let fed = lines(&mut assembler, &input);
        assert_eq!(fed.len(), 1);
        assert_eq!(fed[0].as_ref().map(|l| l.len()), Ok(MAX_LINE_LEN));
    }
}
