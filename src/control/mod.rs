//! Control primitives used by the per-tick loop.

pub mod hysteresis;
pub mod sampler;

pub use hysteresis::{HeaterState, Hysteresis};
pub use sampler::{SampleAction, Sampler};
