//! Console over USB CDC-ACM
//!
//! Reads packets from the host, feeds them byte by byte to the console and
//! writes each response back in max-size packets.

use defmt::*;
use embassy_usb::class::cdc_acm::CdcAcmClass;
use embassy_usb::driver::EndpointError;
use silta_core::console::Console;
use silta_hal_stm32f4::{I2c1Pins, I2c1Port};
use silta_protocol::Response;

use super::usb::UsbDriver;
use crate::board::EmbassyClock;

/// CDC-ACM packet size
pub const PACKET_SIZE: usize = 64;

/// Console bound to the board's I2C1
pub type FwConsole = Console<'static, I2c1Port, EmbassyClock, I2c1Pins>;

/// Host went away mid-exchange
struct Disconnected;

impl From<EndpointError> for Disconnected {
    fn from(e: EndpointError) -> Self {
        match e {
            EndpointError::BufferOverflow => defmt::panic!("USB buffer overflow"),
            EndpointError::Disabled => Disconnected,
        }
    }
}

/// Console task - serves one host connection at a time
#[embassy_executor::task]
pub async fn console_task(mut class: CdcAcmClass<'static, UsbDriver>, mut console: FwConsole) {
    info!("Console task started");

    loop {
        class.wait_connection().await;
        info!("USB connected");
        let _ = serve(&mut class, &mut console).await;
        info!("USB disconnected");
    }
}

async fn serve(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    console: &mut FwConsole,
) -> Result<(), Disconnected> {
    let mut packet = [0u8; PACKET_SIZE];
    let mut response = Response::new();

    loop {
        let n = class.read_packet(&mut packet).await?;

        for &byte in &packet[..n] {
            response.clear();
            match console.feed(byte, &mut response) {
                Ok(true) => {
                    debug!("state after line: {}", console.bridge().state());
                    send(class, response.as_bytes()).await?;
                }
                Ok(false) => {}
                Err(_) => {
                    warn!("Response truncated");
                    send(class, response.as_bytes()).await?;
                }
            }
        }
    }
}

async fn send(
    class: &mut CdcAcmClass<'static, UsbDriver>,
    bytes: &[u8],
) -> Result<(), Disconnected> {
    for chunk in bytes.chunks(PACKET_SIZE) {
        class.write_packet(chunk).await?;
    }
    // A full last packet needs a zero-length packet to end the transfer
    if !bytes.is_empty() && bytes.len() % PACKET_SIZE == 0 {
        class.write_packet(&[]).await?;
    }
    Ok(())
}
