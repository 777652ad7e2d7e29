//! I2C master transaction engine
//!
//! Executes one write-then-read transaction by polling the peripheral's
//! status register. Every wait shares one deadline computed when the call
//! starts, so a transaction can never block for longer than
//! [`TRANSACTION_TIMEOUT_MS`] however the bus misbehaves.
//!
//! STOP is issued and the error interrupt masked on every exit path,
//! leaving the bus idle for an immediate retry.

use embedded_hal::i2c::{ErrorType, I2c, Operation};
use silta_hal::{I2cRegisters, MillisClock, Status};

use super::error::I2cError;
use super::request::{ReadBuffer, TransactionRequest};
use crate::bus::{BusShared, Deadline};
use crate::state::{Event, Outcome, State};

/// Budget for a whole transaction, both phases included
pub const TRANSACTION_TIMEOUT_MS: u32 = 50;

/// Read/write bit appended to the address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Write = 0,
    Read = 1,
}

/// Register-polling I2C master
///
/// # Type parameters
/// - `P`: register port of the peripheral
/// - `C`: millisecond clock used for the deadline
pub struct I2cMaster<'s, P, C> {
    port: P,
    clock: C,
    shared: &'s BusShared,
    state: State,
}

impl<'s, P: I2cRegisters, C: MillisClock> I2cMaster<'s, P, C> {
    /// Create an engine on top of an initialized peripheral
    ///
    /// `shared` must be the same object the bus-error interrupt writes to.
    pub fn new(port: P, clock: C, shared: &'s BusShared) -> Self {
        Self {
            port,
            clock,
            shared,
            state: State::Idle,
        }
    }

    /// Write `write`, then read `read_len` bytes from `address`
    ///
    /// Either phase is skipped when empty; with both empty this is a
    /// presence check.
    pub fn execute(
        &mut self,
        address: u8,
        write: &[u8],
        read_len: u8,
    ) -> Result<ReadBuffer, I2cError> {
        let request = TransactionRequest::new(address, write, read_len)?;
        self.execute_request(&request)
    }

    /// Run a prepared transaction
    pub fn execute_request(
        &mut self,
        request: &TransactionRequest<'_>,
    ) -> Result<ReadBuffer, I2cError> {
        let shared = self.shared;
        let _claim = shared.claim().ok_or(I2cError::Busy)?;

        self.state = State::Idle;
        shared.latch().clear();
        let deadline = Deadline::after(&self.clock, TRANSACTION_TIMEOUT_MS);

        let result = self.run(request, deadline);
        self.release(&result);
        result
    }

    /// State reached by the last transaction
    pub fn state(&self) -> State {
        self.state
    }

    /// The register port
    pub fn port(&self) -> &P {
        &self.port
    }

    /// The register port, for reconfiguration while the bus is idle
    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    fn run(
        &mut self,
        request: &TransactionRequest<'_>,
        deadline: Deadline,
    ) -> Result<ReadBuffer, I2cError> {
        self.wait_while_busy(deadline)?;
        self.port.set_error_interrupt(true);

        if !request.write().is_empty() || request.is_presence_check() {
            self.write_phase(request.address(), request.write(), deadline)?;
        }

        let mut buffer = ReadBuffer::new();
        if request.read_len() > 0 {
            self.read_phase(request.address(), request.read_len(), &mut buffer, deadline)?;
        }

        Ok(buffer)
    }

    fn release(&mut self, result: &Result<ReadBuffer, I2cError>) {
        self.port.generate_stop();
        self.port.set_error_interrupt(false);

        let outcome = match result {
            Ok(_) => Outcome::Success,
            Err(e) => e.outcome(),
        };
        self.advance(Event::StopIssued(outcome));
        self.advance(Event::Released);
    }

    fn write_phase(&mut self, address: u8, bytes: &[u8], deadline: Deadline) -> Result<(), I2cError> {
        self.start(deadline)?;
        self.send_address(address, Direction::Write, deadline)?;

        // SR1 then SR2 clears ADDR and releases SCL
        let _ = self.port.read_sr2();
        self.advance(Event::AddressAcked);

        for &byte in bytes {
            self.port.write_data(byte);
            self.wait_for(Status::BTF, I2cError::DataNack, deadline)?;
            self.advance(Event::ByteWritten);
        }

        Ok(())
    }

    fn read_phase(
        &mut self,
        address: u8,
        len: u8,
        buffer: &mut ReadBuffer,
        deadline: Deadline,
    ) -> Result<(), I2cError> {
        self.start(deadline)?;
        self.send_address(address, Direction::Read, deadline)?;

        // A single byte must already be NACKed when ADDR is cleared
        self.port.set_ack(len > 1);
        let _ = self.port.read_sr2();
        self.advance(Event::AddressAcked);

        let len = usize::from(len);
        for index in 0..len {
            self.wait_for(Status::RXNE, I2cError::DataNack, deadline)?;

            // Reading DR clocks in the next byte; the last one gets a NACK
            if index + 2 == len {
                self.port.set_ack(false);
            }

            buffer
                .push(self.port.read_data())
                .map_err(|_| I2cError::InvalidRequest)?;
            self.advance(Event::ByteRead);
        }

        Ok(())
    }

    fn start(&mut self, deadline: Deadline) -> Result<(), I2cError> {
        self.port.generate_start();
        self.wait_for(Status::START, I2cError::BusFault, deadline)?;
        self.advance(Event::StartGenerated);
        Ok(())
    }

    fn send_address(
        &mut self,
        address: u8,
        direction: Direction,
        deadline: Deadline,
    ) -> Result<(), I2cError> {
        self.port.write_data((address << 1) | direction as u8);
        self.wait_for(Status::ADDR, I2cError::AddressNack, deadline)
    }

    fn wait_while_busy(&mut self, deadline: Deadline) -> Result<(), I2cError> {
        loop {
            let status = Status::from_registers(0, self.port.read_sr2());
            if !status.any(Status::BUSY) {
                return Ok(());
            }
            if deadline.has_passed(self.clock.now_ms()) {
                return Err(I2cError::Timeout);
            }
        }
    }

    /// Poll SR1 until one of `flags` is set
    ///
    /// Error flags in SR1 or in the latch end the wait: an acknowledge
    /// failure maps to `nack`, anything else to `BusFault`.
    fn wait_for(&mut self, flags: u32, nack: I2cError, deadline: Deadline) -> Result<(), I2cError> {
        loop {
            let status = Status::from_registers(self.port.read_sr1(), 0);
            let errors = Status((status.0 | self.shared.latch().get().0) & Status::ERRORS);

            if !errors.is_clear() {
                self.port.clear_errors(errors);
                return Err(if errors.is_nack() {
                    nack
                } else {
                    I2cError::BusFault
                });
            }
            if status.any(flags) {
                return Ok(());
            }
            if deadline.has_passed(self.clock.now_ms()) {
                return Err(I2cError::Timeout);
            }
        }
    }

    fn advance(&mut self, event: Event) {
        self.state = self.state.transition(event);
    }
}

impl<P: I2cRegisters, C: MillisClock> ErrorType for I2cMaster<'_, P, C> {
    type Error = I2cError;
}

/// Blocking embedded-hal bus
///
/// Only the sequences the engine can run are accepted: nothing (presence
/// check), a single write, a single read, or a write followed by a read.
/// Anything else is an `InvalidRequest`.
impl<P: I2cRegisters, C: MillisClock> I2c for I2cMaster<'_, P, C> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        match operations {
            [] => self.execute(address, &[], 0).map(drop),
            [Operation::Write(bytes)] => self.execute(address, bytes, 0).map(drop),
            [Operation::Read(buffer)] => self.read_into(address, &[], buffer),
            [Operation::Write(bytes), Operation::Read(buffer)] => {
                self.read_into(address, bytes, buffer)
            }
            _ => Err(I2cError::InvalidRequest),
        }
    }
}

impl<P: I2cRegisters, C: MillisClock> I2cMaster<'_, P, C> {
    fn read_into(&mut self, address: u8, write: &[u8], buffer: &mut [u8]) -> Result<(), I2cError> {
        let len = u8::try_from(buffer.len()).map_err(|_| I2cError::InvalidRequest)?;
        let data = self.execute(address, write, len)?;
        buffer.copy_from_slice(&data);
        Ok(())
    }
}
