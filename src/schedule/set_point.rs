//! Named target temperatures.

use serde::{Deserialize, Serialize};

use super::name::Name;
use crate::error::ValidationError;
use crate::update::{self, Updatable};

/// A named target temperature, referenced by index 0–3 from daily schedules.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetPoint {
    name: Name,
    #[serde(rename = "tempTarget")]
    target: f32,
}

impl SetPoint {
    /// Build a set point from trusted values (built-in defaults, tests).
    pub fn new(name: Name, target: f32) -> Self {
        Self { name, target }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Target temperature in °C.
    pub fn target(&self) -> f32 {
        self.target
    }
}

/// Partial edit of a [`SetPoint`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetPointPatch {
    pub name: Option<String>,
    pub temp_target: Option<f64>,
}

impl Updatable for SetPoint {
    type Patch = SetPointPatch;

    fn check(&self, patch: &SetPointPatch) -> Result<(), ValidationError> {
        if let Some(name) = &patch.name {
            Name::check(name)?;
        }
        if let Some(t) = patch.temp_target {
            update::check_temperature(t)?;
        }
        Ok(())
    }

    fn apply(&mut self, patch: &SetPointPatch) {
        if let Some(name) = patch.name.as_deref().and_then(Name::truncating) {
            self.name = name;
        }
        if let Some(t) = patch.temp_target {
            self.target = t as f32;
        }
    }
}
