//! Embassy async tasks
//!
//! The console task owns the bridge; the others only touch their own
//! peripherals.

pub mod console;
pub mod led;
pub mod usb;

pub use console::{console_task, FwConsole};
pub use led::led_task;
pub use usb::{usb_device_task, UsbDriver};
