//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the per-tick control rules for the thermostat:
//! sensor sampling, target resolution against the user settings, and the
//! heater decision.  All interaction with hardware and time happens through
//! **port traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
