//! Temperature sensing: device helpers and a host-side simulation.
//!
//! The control loop only sees [`SensorPort`](crate::app::ports::SensorPort);
//! [`ds18b20`] holds the device facts behind it and [`simulated`] provides
//! a room model implementing the port for the host binary and tests.

pub mod ds18b20;
pub mod simulated;
