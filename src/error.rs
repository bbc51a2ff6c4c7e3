//! Unified error types for the Thermite controller.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level control loop's error handling uniform.  All variants are `Copy`
//! so they can be passed through events and API responses without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Every fallible operation in the controller funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The temperature sensor could not be found or read.
    Sensor(SensorError),
    /// The heater relay could not be driven.
    Actuator(ActuatorError),
    /// A settings update was rejected.
    Validation(ValidationError),
    /// Peripheral initialisation failed.
    Init(&'static str),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Validation(e) => write!(f, "validation: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// No device answered on the bus.
    NotFound,
    /// The device ROM code failed its CRC-8 check.
    AddressCrcMismatch,
    /// The device stopped answering (reads back as the disconnected sentinel).
    Disconnected,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "no sensor found"),
            Self::AddressCrcMismatch => write!(f, "sensor address CRC mismatch"),
            Self::Disconnected => write!(f, "sensor disconnected"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// GPIO set failed.
    GpioWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

/// Which rule a settings patch broke.
///
/// Returned by [`Updatable::check`](crate::update::Updatable::check); a patch
/// that yields one of these is never applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The document is not JSON, or a field has the wrong JSON type.
    Malformed,
    /// `name` is empty.
    NameEmpty,
    /// `name` is longer than 15 bytes.
    NameTooLong,
    /// A temperature lies outside `[10.0, 30.0]` °C (or is NaN).
    TemperatureOutOfRange,
    /// `schedule` does not hold exactly 12 bytes.
    ScheduleLength(usize),
    /// A `schedule` entry is outside `0..=255`.
    ScheduleByteOutOfRange,
    /// `weeklySchedule` is outside `0..=0x3FFF`.
    WeeklyScheduleOutOfRange,
    /// Exactly one of `overrideStart`/`overrideEnd` is zero.
    OverrideHalfSet,
    /// An override bound is negative.
    OverrideNegative,
    /// `overrideStart` is after `overrideEnd`.
    OverrideInverted,
    /// A fixed-size collection does not hold exactly four entries.
    WrongCount { field: &'static str, len: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed => write!(f, "malformed settings document"),
            Self::NameEmpty => write!(f, "name is empty"),
            Self::NameTooLong => write!(f, "name exceeds 15 bytes"),
            Self::TemperatureOutOfRange => write!(f, "temperature outside 10..=30 C"),
            Self::ScheduleLength(len) => write!(f, "schedule has {len} entries, expected 12"),
            Self::ScheduleByteOutOfRange => write!(f, "schedule entry outside 0..=255"),
            Self::WeeklyScheduleOutOfRange => write!(f, "weekly schedule outside 0..=0x3FFF"),
            Self::OverrideHalfSet => write!(f, "override start/end must both be zero or both set"),
            Self::OverrideNegative => write!(f, "override bound is negative"),
            Self::OverrideInverted => write!(f, "override start is after end"),
            Self::WrongCount { field, len } => {
                write!(f, "{field} has {len} entries, expected 4")
            }
        }
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
