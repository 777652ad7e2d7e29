//! Splitting a line into space-separated tokens

use heapless::Vec;

/// Most tokens taken from one line; the rest are ignored
///
/// Leaves room for the command, the address, the read length and a full
/// 124-byte write.
pub const MAX_TOKENS: usize = 128;

/// Tokens of one line, borrowed from it
pub type Tokens<'a> = Vec<&'a str, MAX_TOKENS>;

/// Split `line` on runs of spaces
pub fn tokenize(line: &str) -> Tokens<'_> {
    let mut tokens = Vec::new();
    for token in line.split(' ').filter(|t| !t.is_empty()) {
        if tokens.push(token).is_err() {
            break;
        }
    }
    tokens
}
