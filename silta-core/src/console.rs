//! Console command dispatch
//!
//! Turns protocol [`Command`]s into bridge calls and renders the results.

use core::fmt::{self, Write};

use silta_hal::{I2cPeripheral, I2cRegisters, MillisClock, PinMapping, PinMux};
use silta_protocol::{parse_line, response, Command, ConfigSetting, LineAssembler, ParseError};

use crate::i2c::I2cBridge;

/// Line-oriented front end of the bridge
pub struct Console<'s, P, C, M> {
    bridge: I2cBridge<'s, P, C, M>,
    lines: LineAssembler,
}

impl<'s, P, C, M> Console<'s, P, C, M>
where
    P: I2cRegisters + I2cPeripheral,
    C: MillisClock,
    M: PinMux,
{
    pub fn new(bridge: I2cBridge<'s, P, C, M>) -> Self {
        Self {
            bridge,
            lines: LineAssembler::new(),
        }
    }

    /// Feed one received byte
    ///
    /// When `byte` completes a line, the command runs and its response is
    /// written to `out`. An overflowed line is answered with an error and
    /// never runs. Returns whether a line was handled.
    pub fn feed<W: Write>(&mut self, byte: u8, out: &mut W) -> Result<bool, fmt::Error> {
        match self.lines.feed(byte) {
            Some(Ok(line)) => self.handle_line(&line, out)?,
            Some(Err(e)) => response::write_parse_error(out, &ParseError::from(e))?,
            None => return Ok(false),
        }
        Ok(true)
    }

    /// Parse and run one complete line
    pub fn handle_line<W: Write>(&mut self, line: &[u8], out: &mut W) -> fmt::Result {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Ok(()),
            Err(e) => return response::write_parse_error(out, &e),
        };

        match command {
            Command::I2c(cmd) => match self.bridge.execute(cmd.address, &cmd.write, cmd.read_len) {
                Ok(data) => response::write_ok(out, &data),
                Err(e) => response::write_error_code(out, e.code()),
            },
            // Both keys are write-only
            Command::ConfigGet(_) => response::write_status(out, false),
            Command::ConfigSet(setting) => {
                let ok = self.apply(setting);
                response::write_status(out, ok)
            }
            Command::Help { topic } => response::write_help(out, topic),
        }
    }

    pub fn bridge(&self) -> &I2cBridge<'s, P, C, M> {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut I2cBridge<'s, P, C, M> {
        &mut self.bridge
    }

    fn apply(&mut self, setting: ConfigSetting) -> bool {
        match setting {
            ConfigSetting::I2cSpeed(hz) => self.bridge.set_speed(hz).is_ok(),
            ConfigSetting::I2cPins(index) => match PinMapping::from_index(index) {
                Some(pair) => {
                    self.bridge.select_pins(pair);
                    true
                }
                None => false,
            },
        }
    }
}
