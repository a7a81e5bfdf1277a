//! Testing utilities
//!
//! An in-memory [`Device`](crate::device::Device) that records every command,
//! so motion sequencing can be verified without a camera attached.

pub mod mock_device;

pub use mock_device::{DeviceCall, MockDevice};
