//! Driver binding traits
//!
//! These traits define the interface between the rasterizer and a
//! controller-specific driver.

pub mod device;

pub use device::Device;
