//! Device and sensor description.
//!
//! A device carries a closed set of sensor kinds. Only the depth variant can
//! answer how many meters one depth unit is worth.

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sensor {
    Depth { name: String, depth_scale: f32 },
    Color { name: String },
    Motion { name: String },
}

impl Sensor {
    pub fn name(&self) -> &str {
        match self {
            Sensor::Depth { name, .. } | Sensor::Color { name } | Sensor::Motion { name } => name,
        }
    }

    /// Meters per depth unit, only for depth-capable sensors.
    pub fn depth_scale(&self) -> Option<f32> {
        match self {
            Sensor::Depth { depth_scale, .. } => Some(*depth_scale),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    #[serde(default)]
    pub serial: Option<String>,
    pub sensors: Vec<Sensor>,
}

impl Device {
    /// Scale of the first depth sensor, scanning in declaration order.
    pub fn depth_scale(&self) -> Option<f32> {
        self.sensors.iter().find_map(Sensor::depth_scale)
    }

    /// Same as `depth_scale` but a missing depth sensor is an error.
    pub fn require_depth_scale(&self) -> Result<f32, Error> {
        match self.depth_scale() {
            Some(scale) if scale > 0.0 && scale.is_finite() => Ok(scale),
            Some(scale) => Err(Error::Recording(format!(
                "depth sensor reports unusable depth scale {scale}"
            ))),
            None => Err(Error::NoDepthSensor),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }
}
