//! Silta - USB I2C Bridge Firmware
//!
//! Main firmware binary for STM32F407 boards. Exposes a line-oriented
//! console over USB CDC-ACM that runs I2C transactions on I2C1.
//!
//! Named after the Finnish word for "bridge".

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::InterruptExt;
use embassy_stm32::{bind_interrupts, peripherals, usb};
use embassy_usb::class::cdc_acm::{CdcAcmClass, State};
use embassy_usb::Builder;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use silta_core::bus::BusShared;
use silta_core::console::Console;
use silta_core::i2c::I2cBridge;
use silta_hal_stm32f4::{I2c1Pins, I2c1Port};

use crate::board::{EmbassyClock, SerialNumber, PCLK1_HZ};
use crate::tasks::{console_task, led_task, usb_device_task};

mod board;
mod tasks;

bind_interrupts!(struct Irqs {
    OTG_FS => usb::InterruptHandler<peripherals::USB_OTG_FS>;
});

/// Error latch and in-flight flag shared with the I2C1 error interrupt
static BUS: BusShared = BusShared::new();

// Static cells for USB buffers (must live forever)
static EP_OUT_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static CDC_STATE: StaticCell<State> = StaticCell::new();
static SERIAL: StaticCell<SerialNumber> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Silta firmware starting...");

    let p = embassy_stm32::init(board::clock_config());
    info!("Peripherals initialized");

    // Heartbeat LED (PD15)
    let led = Output::new(p.PD15, Level::Low, Speed::Low);
    spawner.spawn(led_task(led)).unwrap();

    // I2C bridge: PairA at 100 kHz, as at every boot
    let mut bridge = I2cBridge::new(
        I2c1Port::new(PCLK1_HZ),
        EmbassyClock,
        I2c1Pins::new(),
        &BUS,
    );
    if let Err(e) = bridge.init() {
        error!("I2C init failed: {}", e);
    }
    // SAFETY: the handler only touches I2C1 status registers and the latch
    unsafe { interrupt::I2C1_ER.enable() };
    info!(
        "I2C1 ready on {} at {} Hz",
        bridge.pins(),
        bridge.clock_config().frequency
    );

    // USB CDC-ACM
    let mut usb_config = usb::Config::default();
    usb_config.vbus_detection = false;
    let driver = usb::Driver::new_fs(
        p.USB_OTG_FS,
        Irqs,
        p.PA12,
        p.PA11,
        EP_OUT_BUF.init([0; 256]),
        usb_config,
    );

    let serial = SERIAL.init(board::serial_number());
    let mut config = embassy_usb::Config::new(board::USB_VID, board::USB_PID);
    config.manufacturer = Some(board::USB_MANUFACTURER);
    config.product = Some(board::USB_PRODUCT);
    config.serial_number = Some(serial.as_str());
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    let mut builder = Builder::new(
        driver,
        config,
        CONFIG_DESCRIPTOR.init([0; 256]),
        BOS_DESCRIPTOR.init([0; 256]),
        MSOS_DESCRIPTOR.init([0; 256]),
        CONTROL_BUF.init([0; 64]),
    );
    let class = CdcAcmClass::new(&mut builder, CDC_STATE.init(State::new()), 64);
    let usb = builder.build();
    info!("USB serial number {}", serial.as_str());

    spawner.spawn(usb_device_task(usb)).unwrap();
    spawner.spawn(console_task(class, Console::new(bridge))).unwrap();

    info!("All tasks started");
}

/// I2C1 bus-error interrupt
///
/// Captures SR1/SR2 into the latch and masks the error source until the
/// next transaction re-enables it.
#[interrupt]
fn I2C1_ER() {
    let mut port = I2c1Port::new(PCLK1_HZ);
    BUS.latch().capture(&mut port);
}
