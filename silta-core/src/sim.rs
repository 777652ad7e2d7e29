//! Simulated I2C bus for host tests
//!
//! Models the STM32F4 I2C register behavior closely enough to drive every
//! branch of the engine: START/ADDR/BTF/RXNE flags, acknowledge failures
//! reported through SR1 and/or the error interrupt, a stuck bus, and a
//! stall injected at any wait point. Every bus-level event is recorded so
//! tests can inspect exactly what went out on the wire.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use silta_hal::{
    ClockConfig, I2cPeripheral, I2cRegisters, MillisClock, PinMapping, PinMode, PinMux, Status,
};

use crate::bus::ErrorLatch;

const SB: u16 = Status::START as u16;
const ADDR: u16 = Status::ADDR as u16;
const BTF: u16 = Status::BTF as u16;
const RXNE: u16 = Status::RXNE as u16;
const TXE: u16 = Status::TXE as u16;
const TRANSFER_FLAGS: u16 = SB | ADDR | BTF | RXNE | TXE;
const SR2_MSL: u16 = (Status::MASTER >> 16) as u16;
const SR2_BUSY: u16 = (Status::BUSY >> 16) as u16;

/// Manually advanced millisecond clock, wrapping after `u32::MAX`
#[derive(Debug, Default)]
pub struct TickCounter {
    ms: Cell<u32>,
}

impl TickCounter {
    pub const fn new() -> Self {
        Self::starting_at(0)
    }

    pub const fn starting_at(ms: u32) -> Self {
        Self { ms: Cell::new(ms) }
    }

    pub fn tick(&self) {
        self.advance(1);
    }

    pub fn advance(&self, ms: u32) {
        self.ms.set(self.ms.get().wrapping_add(ms));
    }
}

impl MillisClock for TickCounter {
    fn now_ms(&self) -> u32 {
        self.ms.get()
    }
}

/// Something that happened on the simulated wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Start,
    Address { address: u8, read: bool, acked: bool },
    Write { byte: u8, acked: bool },
    /// `acked` is the master's ACK bit at the moment the byte was clocked in
    Read { byte: u8, acked: bool },
    Stop,
}

impl BusEvent {
    pub fn is_data(&self) -> bool {
        matches!(self, BusEvent::Write { .. } | BusEvent::Read { .. })
    }
}

/// Wait point at which the bus stops making progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stall {
    /// SR2.BUSY never clears
    Busy,
    /// START is never generated
    Start,
    /// Address phase never completes
    Address,
    /// Write byte `n` (within the current START) never completes
    Write(usize),
    /// Read byte `n` is never clocked in
    Read(usize),
}

/// Simulated device on the bus
#[derive(Debug, Clone)]
pub struct Target {
    pub address: u8,
    /// Bytes returned by read phases, restarting at each START
    pub data: Vec<u8>,
    /// Bytes written by the master
    pub received: Vec<u8>,
    /// Index of the write byte (within one START) the device refuses
    pub nack_write_at: Option<usize>,
    read_pos: usize,
}

impl Target {
    pub fn new(address: u8) -> Self {
        Self {
            address,
            data: Vec::new(),
            received: Vec::new(),
            nack_write_at: None,
            read_pos: 0,
        }
    }

    pub fn with_data(mut self, data: &[u8]) -> Self {
        self.data = data.to_vec();
        self
    }

    pub fn nack_write_at(mut self, index: usize) -> Self {
        self.nack_write_at = Some(index);
        self
    }
}

/// Peripheral lifecycle operations seen by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriphOp {
    Deinit,
    Init(ClockConfig),
    Enable,
}

#[derive(Debug)]
struct PinBank {
    modes: [PinMode; 2],
    log: Vec<(PinMapping, PinMode)>,
}

/// Simulated pin multiplexer; clones share the same pin bank
#[derive(Debug, Clone)]
pub struct SimMux(Rc<RefCell<PinBank>>);

impl Default for SimMux {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(PinBank {
            modes: [PinMode::Input; 2],
            log: Vec::new(),
        })))
    }
}

impl SimMux {
    pub fn mode(&self, pair: PinMapping) -> PinMode {
        self.0.borrow().modes[pair.index() as usize]
    }

    /// Pairs currently routed to the peripheral
    pub fn routed(&self) -> Vec<PinMapping> {
        PinMapping::ALL
            .into_iter()
            .filter(|pair| self.mode(*pair) == PinMode::AlternateOpenDrain)
            .collect()
    }

    pub fn log(&self) -> Vec<(PinMapping, PinMode)> {
        self.0.borrow().log.clone()
    }
}

impl PinMux for SimMux {
    fn configure(&mut self, pair: PinMapping, mode: PinMode) {
        let mut bank = self.0.borrow_mut();
        bank.modes[pair.index() as usize] = mode;
        bank.log.push((pair, mode));
    }
}

#[derive(Debug, Clone, Copy)]
struct Active {
    target: Option<usize>,
    read: bool,
}

/// Simulated I2C peripheral plus the devices attached to it
pub struct SimBus<'a> {
    clock: &'a TickCounter,
    latch: Option<&'a ErrorLatch>,
    hook: Option<Box<dyn FnMut() + 'a>>,
    pins: Option<SimMux>,
    pub targets: Vec<Target>,
    pub events: Vec<BusEvent>,
    /// Pin pairs that carried each recorded event
    pub lines: Vec<PinMapping>,
    pub periph_log: Vec<PeriphOp>,
    pub irq_log: Vec<bool>,
    pub clock_config: Option<ClockConfig>,
    sr1: u16,
    rx: u8,
    ack: bool,
    error_irq: bool,
    active: Option<Active>,
    last_read_acked: bool,
    writes: usize,
    reads: usize,
    busy_reads: usize,
    stall: Option<Stall>,
    nack_via_latch_only: bool,
    fault_on_address: bool,
    reads_per_ms: u32,
    register_reads: u32,
    min_speed: u32,
}

impl<'a> SimBus<'a> {
    pub fn new(clock: &'a TickCounter) -> Self {
        Self {
            clock,
            latch: None,
            hook: None,
            pins: None,
            targets: Vec::new(),
            events: Vec::new(),
            lines: Vec::new(),
            periph_log: Vec::new(),
            irq_log: Vec::new(),
            clock_config: None,
            sr1: 0,
            rx: 0,
            ack: false,
            error_irq: false,
            active: None,
            last_read_acked: false,
            writes: 0,
            reads: 0,
            busy_reads: 0,
            stall: None,
            nack_via_latch_only: false,
            fault_on_address: false,
            reads_per_ms: 10,
            register_reads: 0,
            min_speed: 1,
        }
    }

    /// Deliver error interrupts into `latch` while the source is enabled
    pub fn with_latch(mut self, latch: &'a ErrorLatch) -> Self {
        self.latch = Some(latch);
        self
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.targets.push(target);
        self
    }

    /// Slowest clock the simulated dividers can produce
    pub fn with_min_speed(mut self, hz: u32) -> Self {
        self.min_speed = hz;
        self
    }

    pub fn with_pins(mut self, pins: SimMux) -> Self {
        self.pins = Some(pins);
        self
    }

    pub fn stall_at(mut self, stall: Stall) -> Self {
        self.stall = Some(stall);
        self
    }

    /// Report SR2.BUSY for the next `reads` reads of SR2
    pub fn busy_for(mut self, reads: usize) -> Self {
        self.busy_reads = reads;
        self
    }

    /// Report acknowledge failures only through the error interrupt
    pub fn nack_via_latch_only(mut self) -> Self {
        self.nack_via_latch_only = true;
        self
    }

    /// Raise a bus error when the next address byte goes out
    pub fn fault_on_address(mut self) -> Self {
        self.fault_on_address = true;
        self
    }

    /// Run `hook` on every SR1 read (i.e. inside the engine's poll loops)
    pub fn on_poll(mut self, hook: impl FnMut() + 'a) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    pub fn error_irq_enabled(&self) -> bool {
        self.error_irq
    }

    pub fn ack_enabled(&self) -> bool {
        self.ack
    }

    pub fn sr1(&self) -> u16 {
        self.sr1
    }

    pub fn target(&self, address: u8) -> &Target {
        self.targets
            .iter()
            .find(|t| t.address == address)
            .expect("no such target")
    }

    pub fn data_events(&self) -> usize {
        self.events.iter().filter(|e| e.is_data()).count()
    }

    /// ACK bit of each received byte, in order
    pub fn read_acks(&self) -> Vec<bool> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::Read { acked, .. } => Some(*acked),
                _ => None,
            })
            .collect()
    }

    pub fn clear_logs(&mut self) {
        self.events.clear();
        self.lines.clear();
        self.periph_log.clear();
        self.irq_log.clear();
    }

    fn record(&mut self, event: BusEvent) {
        self.events.push(event);
        if let Some(pins) = &self.pins {
            self.lines.extend(pins.routed());
        }
    }

    fn poll_tick(&mut self) {
        self.register_reads += 1;
        if self.register_reads % self.reads_per_ms == 0 {
            self.clock.tick();
        }
    }

    fn raise_error(&mut self, bit: u32) {
        let bit = bit as u16;
        if !(bit == Status::ACK_FAILURE as u16 && self.nack_via_latch_only) {
            self.sr1 |= bit;
        }
        if self.error_irq {
            if let Some(latch) = self.latch {
                latch.record(Status::from_registers(self.sr1 | bit, SR2_MSL | SR2_BUSY));
                self.error_irq = false;
            }
        }
    }

    fn clock_in_byte(&mut self) {
        let Some(active) = self.active else {
            return;
        };
        if !active.read || self.stall == Some(Stall::Read(self.reads)) {
            return;
        }
        self.reads += 1;

        let byte = match active.target {
            Some(index) => {
                let target = &mut self.targets[index];
                let byte = target.data.get(target.read_pos).copied().unwrap_or(0xFF);
                target.read_pos += 1;
                byte
            }
            None => 0xFF,
        };

        self.rx = byte;
        self.sr1 |= RXNE;
        self.last_read_acked = self.ack;
        self.record(BusEvent::Read {
            byte,
            acked: self.ack,
        });
    }
}

impl I2cRegisters for SimBus<'_> {
    fn read_sr1(&mut self) -> u16 {
        if let Some(hook) = self.hook.as_mut() {
            hook();
        }
        self.poll_tick();
        self.sr1
    }

    fn read_sr2(&mut self) -> u16 {
        self.poll_tick();

        let mut sr2 = 0;
        if self.stall == Some(Stall::Busy) {
            sr2 |= SR2_BUSY;
        } else if self.busy_reads > 0 {
            self.busy_reads -= 1;
            sr2 |= SR2_BUSY;
        }
        if self.active.is_some() {
            sr2 |= SR2_MSL | SR2_BUSY;
        }

        // SR1 then SR2 clears ADDR; in receive mode the first byte follows
        if self.sr1 & ADDR != 0 {
            self.sr1 &= !ADDR;
            self.clock_in_byte();
        }

        sr2
    }

    fn write_data(&mut self, byte: u8) {
        self.sr1 &= !(BTF | TXE);

        if self.sr1 & SB != 0 {
            self.sr1 &= !SB;
            if self.stall == Some(Stall::Address) {
                return;
            }

            let address = byte >> 1;
            let read = byte & 1 == 1;
            let target = self.targets.iter().position(|t| t.address == address);
            self.record(BusEvent::Address {
                address,
                read,
                acked: target.is_some(),
            });
            self.active = Some(Active { target, read });

            if self.fault_on_address {
                self.raise_error(Status::BUS_ERROR);
            } else if target.is_some() {
                self.sr1 |= ADDR;
            } else {
                self.raise_error(Status::ACK_FAILURE);
            }
            return;
        }

        let Some(active) = self.active else {
            return;
        };
        if active.read || self.stall == Some(Stall::Write(self.writes)) {
            return;
        }
        let index = self.writes;
        self.writes += 1;

        let acked = match active.target {
            Some(t) => {
                let target = &mut self.targets[t];
                if target.nack_write_at == Some(index) {
                    false
                } else {
                    target.received.push(byte);
                    true
                }
            }
            None => false,
        };

        self.record(BusEvent::Write { byte, acked });
        if acked {
            self.sr1 |= BTF | TXE;
        } else {
            self.raise_error(Status::ACK_FAILURE);
        }
    }

    fn read_data(&mut self) -> u8 {
        if self.sr1 & RXNE != 0 {
            self.sr1 &= !RXNE;
            if self.last_read_acked {
                self.clock_in_byte();
            }
        }
        self.rx
    }

    fn generate_start(&mut self) {
        if self.stall == Some(Stall::Start) {
            return;
        }
        self.writes = 0;
        self.reads = 0;
        for target in &mut self.targets {
            target.read_pos = 0;
        }
        self.sr1 &= !TRANSFER_FLAGS;
        self.sr1 |= SB;
        self.record(BusEvent::Start);
    }

    fn generate_stop(&mut self) {
        self.record(BusEvent::Stop);
        self.active = None;
        self.sr1 &= !TRANSFER_FLAGS;
    }

    fn set_ack(&mut self, enabled: bool) {
        self.ack = enabled;
    }

    fn clear_errors(&mut self, status: Status) {
        self.sr1 &= !((status.0 & Status::ERRORS) as u16);
    }

    fn set_error_interrupt(&mut self, enabled: bool) {
        self.error_irq = enabled;
        self.irq_log.push(enabled);
    }
}

impl I2cPeripheral for SimBus<'_> {
    fn deinit(&mut self) {
        self.periph_log.push(PeriphOp::Deinit);
        self.clock_config = None;
        self.error_irq = false;
        self.ack = false;
        self.sr1 = 0;
    }

    fn init(&mut self, config: &ClockConfig) {
        self.periph_log.push(PeriphOp::Init(*config));
        self.clock_config = Some(*config);
    }

    fn enable(&mut self) {
        self.periph_log.push(PeriphOp::Enable);
    }

    fn supports(&self, config: &ClockConfig) -> bool {
        config.is_supported() && config.frequency >= self.min_speed
    }
}
