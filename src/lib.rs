//! Thermite thermostat library.
//!
//! Exposes the schedule model, the settings store and the control loop for
//! the host binary, integration tests and fuzzing.  Hardware, time and
//! transport sit behind the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod api;
pub mod app;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod schedule;
pub mod sensors;
pub mod settings;
pub mod update;
