//! Bus configuration
//!
//! Pin pair selection and clock speed. Both settings are volatile: they live
//! in RAM and are re-applied from defaults at boot.

pub mod pins;

pub use pins::BusConfigurator;
