//! USB device task

use embassy_stm32::peripherals::USB_OTG_FS;
use embassy_stm32::usb::Driver;
use embassy_usb::UsbDevice;

/// OTG_FS driver type shared by the USB tasks
pub type UsbDriver = Driver<'static, USB_OTG_FS>;

/// Runs the USB stack (enumeration, control requests)
#[embassy_executor::task]
pub async fn usb_device_task(mut usb: UsbDevice<'static, UsbDriver>) {
    usb.run().await;
}
