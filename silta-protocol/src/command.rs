//! Console commands and their parser

use core::fmt;

use heapless::Vec;

use crate::line::LineTooLong;
use crate::token::tokenize;

/// Most data bytes accepted by `i2c`
pub const MAX_WRITE_BYTES: usize = 124;

/// Largest read length accepted by `i2c`
pub const MAX_READ_BYTES: usize = 128;

/// Arguments of the `i2c` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I2cCommand {
    /// 7-bit device address, taken from bits 7..1 of the 8-bit address
    /// the host sends
    pub address: u8,
    /// Number of bytes to read back
    pub read_len: u8,
    /// Bytes to write first
    pub write: Vec<u8, MAX_WRITE_BYTES>,
}

/// Keys understood by `config`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigKey {
    /// Bus clock in Hz
    I2cSpeed,
    /// Bus pin pair index
    I2cPins,
}

impl ConfigKey {
    /// Every key with its console name
    pub const ALL: [(ConfigKey, &'static str); 2] = [
        (ConfigKey::I2cSpeed, "i2cspeed"),
        (ConfigKey::I2cPins, "i2cpins"),
    ];

    /// Look up a key by its console name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(key, _)| *key)
    }
}

/// A `config` assignment with its decoded value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigSetting {
    I2cSpeed(u32),
    I2cPins(u32),
}

/// One parsed console line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `i2c <addr> <rlen> [byte ...]`
    I2c(I2cCommand),
    /// `config <key>`
    ConfigGet(ConfigKey),
    /// `config <key> <value>`
    ConfigSet(ConfigSetting),
    /// `help [command]`
    Help { topic: Option<&'a str> },
}

/// Why a line could not be turned into a [`Command`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError<'a> {
    /// Line overflowed the input buffer
    LineTooLong,
    /// Line is not valid UTF-8
    InvalidUtf8,
    /// First token names no command
    UnknownCommand(&'a str),
    /// `i2c` without address and read length
    NotEnoughArguments,
    /// Address is not hex or above 0xFF
    InvalidAddress,
    /// Read length is not a decimal number
    InvalidReadLength,
    /// Read length above [`MAX_READ_BYTES`]
    ReadTooLong,
    /// More than [`MAX_WRITE_BYTES`] data bytes
    WriteTooLong,
    /// Data byte is not hex or above 0xFF
    InvalidByte,
    /// `config` without a key
    MissingKey,
    /// `config` with a key it does not know
    UnknownKey(&'a str),
    /// `config` value is not a decimal number
    InvalidValue,
}

impl<'a> ParseError<'a> {
    /// Check whether the help listing should follow the error line
    pub fn shows_help(&self) -> bool {
        matches!(self, ParseError::UnknownCommand(_))
    }
}

impl From<LineTooLong> for ParseError<'_> {
    fn from(_: LineTooLong) -> Self {
        ParseError::LineTooLong
    }
}

impl fmt::Display for ParseError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::LineTooLong => f.write_str("ERR: Line too long"),
            ParseError::InvalidUtf8 => f.write_str("ERR: Invalid input"),
            ParseError::UnknownCommand(name) => write!(f, "Unknown command '{name}'"),
            ParseError::NotEnoughArguments => f.write_str("ERR: I2C Not enough arguments"),
            ParseError::InvalidAddress => f.write_str("ERR: I2C Invalid address"),
            ParseError::InvalidReadLength => f.write_str("ERR: I2C Invalid read length"),
            ParseError::ReadTooLong => f.write_str("ERR: I2C Not enough space in rBuff"),
            ParseError::WriteTooLong => f.write_str("ERR: I2C Not enough space in wBuff"),
            ParseError::InvalidByte => f.write_str("ERR: I2C Invalid byte"),
            ParseError::MissingKey | ParseError::InvalidValue => f.write_str("ERR"),
            ParseError::UnknownKey(key) => write!(f, "ERR Unknown key '{key}'"),
        }
    }
}

/// Parse one input line
///
/// Returns `Ok(None)` for a line without tokens.
pub fn parse_line(line: &[u8]) -> Result<Option<Command<'_>>, ParseError<'_>> {
    let line = core::str::from_utf8(line).map_err(|_| ParseError::InvalidUtf8)?;
    let tokens = tokenize(line);

    let Some((&name, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let command = match name {
        "i2c" => Command::I2c(parse_i2c(args)?),
        "config" => parse_config(args)?,
        "help" => Command::Help {
            topic: args.first().copied(),
        },
        _ => return Err(ParseError::UnknownCommand(name)),
    };

    Ok(Some(command))
}

fn parse_i2c<'a>(args: &[&'a str]) -> Result<I2cCommand, ParseError<'a>> {
    let [address, read_len, bytes @ ..] = args else {
        return Err(ParseError::NotEnoughArguments);
    };

    // 8-bit bus address; the R/W bit is chosen per phase
    let address = parse_hex(address)
        .and_then(|a| u8::try_from(a).ok())
        .ok_or(ParseError::InvalidAddress)?
        >> 1;
    let read_len = read_len
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidReadLength)?;

    if bytes.len() > MAX_WRITE_BYTES {
        return Err(ParseError::WriteTooLong);
    }
    if read_len as usize > MAX_READ_BYTES {
        return Err(ParseError::ReadTooLong);
    }

    let mut write = Vec::new();
    for byte in bytes {
        let byte = parse_hex(byte)
            .and_then(|b| u8::try_from(b).ok())
            .ok_or(ParseError::InvalidByte)?;
        write.push(byte).map_err(|_| ParseError::WriteTooLong)?;
    }

    Ok(I2cCommand {
        address,
        read_len: read_len as u8,
        write,
    })
}

fn parse_config<'a>(args: &[&'a str]) -> Result<Command<'a>, ParseError<'a>> {
    let Some((&name, rest)) = args.split_first() else {
        return Err(ParseError::MissingKey);
    };
    let key = ConfigKey::from_name(name).ok_or(ParseError::UnknownKey(name))?;

    let Some(value) = rest.first() else {
        return Ok(Command::ConfigGet(key));
    };
    let value = value.parse::<u32>().map_err(|_| ParseError::InvalidValue)?;

    Ok(Command::ConfigSet(match key {
        ConfigKey::I2cSpeed => ConfigSetting::I2cSpeed(value),
        ConfigKey::I2cPins => ConfigSetting::I2cPins(value),
    }))
}

/// Hex number with an optional `0x` prefix
fn parse_hex(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}
