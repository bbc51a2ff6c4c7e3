//! DS18B20 one-wire thermometer helpers.
//!
//! The bus transport lives behind [`SensorPort`](crate::app::ports::SensorPort);
//! this module only holds the device facts the control loop depends on:
//! ROM-code validation, resolution-dependent conversion time, and the
//! scratchpad temperature encoding.
//!
//! Conversions are non-blocking: the loop issues a request, then comes back
//! after [`Resolution::conversion_delay_ms`] to read the result.

use crate::error::SensorError;

/// Family code of the DS18B20 in byte 0 of its ROM.
pub const FAMILY_CODE: u8 = 0x28;

/// Temperature reported by the bus library when the device does not answer.
pub const DISCONNECTED_C: f32 = -127.0;

/// 64-bit ROM code: family, 48-bit serial, CRC-8 of the first seven bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorAddress(pub [u8; 8]);

impl SensorAddress {
    /// Build an address for `family`/`serial` with a correct CRC byte.
    pub fn with_crc(family: u8, serial: [u8; 6]) -> Self {
        let mut rom = [0u8; 8];
        rom[0] = family;
        rom[1..7].copy_from_slice(&serial);
        rom[7] = crc8(&rom[..7]);
        Self(rom)
    }

    pub fn family(&self) -> u8 {
        self.0[0]
    }

    /// Check the trailing CRC byte against the first seven.
    pub fn verify(&self) -> Result<(), SensorError> {
        if crc8(&self.0[..7]) == self.0[7] {
            Ok(())
        } else {
            Err(SensorError::AddressCrcMismatch)
        }
    }
}

impl core::fmt::Display for SensorAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            write!(f, "{b:02X}")?;
        }
        Ok(())
    }
}

/// Dallas/Maxim one-wire CRC-8 (x^8 + x^5 + x^4 + 1, LSB first, init 0).
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc = 0u8;
    for &byte in data {
        let mut b = byte;
        for _ in 0..8 {
            let mix = (crc ^ b) & 0x01;
            crc >>= 1;
            if mix != 0 {
                crc ^= 0x8C;
            }
            b >>= 1;
        }
    }
    crc
}

/// ADC resolution; each extra bit doubles the conversion time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Bits9,
    Bits10,
    Bits11,
    Bits12,
}

impl Resolution {
    /// Map a configured bit count (9–12).
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            9 => Some(Self::Bits9),
            10 => Some(Self::Bits10),
            11 => Some(Self::Bits11),
            12 => Some(Self::Bits12),
            _ => None,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Bits9 => 9,
            Self::Bits10 => 10,
            Self::Bits11 => 11,
            Self::Bits12 => 12,
        }
    }

    /// Worst-case conversion time: 750 ms at 12 bits, halved per bit dropped.
    pub fn conversion_delay_ms(self) -> u32 {
        750 >> (12 - self.bits())
    }

    /// Low scratchpad bits that are undefined at this resolution.
    fn undefined_mask(self) -> i16 {
        (1 << (12 - self.bits())) - 1
    }
}

/// Decode the scratchpad temperature register (1/16 °C per LSB).
pub fn raw_to_celsius(raw: i16, resolution: Resolution) -> f32 {
    f32::from(raw & !resolution.undefined_mask()) / 16.0
}

/// Encode a temperature as the device would report it at `resolution`.
pub fn celsius_to_raw(celsius: f32, resolution: Resolution) -> i16 {
    let raw = (celsius * 16.0).round().clamp(-55.0 * 16.0, 125.0 * 16.0) as i16;
    raw & !resolution.undefined_mask()
}

/// Map the bus library's disconnected sentinel to an error.
#[allow(clippy::float_cmp)]
pub fn check_reading(celsius: f32) -> Result<f32, SensorError> {
    if celsius == DISCONNECTED_C {
        Err(SensorError::Disconnected)
    } else {
        Ok(celsius)
    }
}
