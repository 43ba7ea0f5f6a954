use serde::{Deserialize, Serialize};

use crate::MPH_TO_MPS;

/// Parameters controlling how the road graph is weighted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Assumed constant driving speed, miles per hour
    pub speed_mph: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self { speed_mph: 25.0 }
    }
}

impl NetworkConfig {
    /// Driving speed in meters per second
    pub fn speed_mps(&self) -> f64 {
        self.speed_mph * MPH_TO_MPS
    }
}
