//! Heartbeat LED

use defmt::*;
use embassy_stm32::gpio::Output;
use embassy_time::Timer;

use crate::board::{LED_OFF_MS, LED_ON_MS};

/// Short blink once per second while the executor is alive
#[embassy_executor::task]
pub async fn led_task(mut led: Output<'static>) {
    info!("LED task started");

    loop {
        led.set_high();
        Timer::after_millis(LED_ON_MS).await;
        led.set_low();
        Timer::after_millis(LED_OFF_MS).await;
    }
}
