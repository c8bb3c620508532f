use serde::{Deserialize, Serialize};
use std::fmt;

/// One full set of channel measurements from a device. Never merged
/// field-by-field; a new reading fully replaces the old one.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct Reading {
    pub co: f32,
    pub co2: f32,
    pub temperature: f32,
    pub humidity: f32,
    pub noise: f32,

    pub pm_10: f32,
    pub pm_25: f32,
    pub pm_100: f32,

    pub pm_particles_03: f32,
    pub pm_particles_05: f32,
    pub pm_particles_10: f32,
    pub pm_particles_25: f32,
    pub pm_particles_50: f32,
    pub pm_particles_100: f32,
}

impl Reading {
    pub fn air_quality(&self) -> AirQuality {
        AirQuality::from_pm_25(self.pm_25)
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PM2.5 {:.2} µg/m³ / CO {:.2} ppm / CO2 {:.2} ppm / T {:.1} °C / H {:.1} % / N {:.1} dB",
            self.pm_25, self.co, self.co2, self.temperature, self.humidity, self.noise
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AirQuality {
    Good,
    Moderate,
    Sensitive,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AirQuality {
    pub fn from_pm_25(pm_25: f32) -> AirQuality {
        if pm_25 <= 12.0 {
            AirQuality::Good
        } else if pm_25 <= 35.4 {
            AirQuality::Moderate
        } else if pm_25 <= 55.4 {
            AirQuality::Sensitive
        } else if pm_25 <= 150.4 {
            AirQuality::Unhealthy
        } else if pm_25 <= 250.4 {
            AirQuality::VeryUnhealthy
        } else {
            AirQuality::Hazardous
        }
    }
}

impl fmt::Display for AirQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirQuality::Good => write!(f, "Good"),
            AirQuality::Moderate => write!(f, "Moderate"),
            AirQuality::Sensitive => write!(f, "Sensitive"),
            AirQuality::Unhealthy => write!(f, "Unhealthy"),
            AirQuality::VeryUnhealthy => write!(f, "Very Unhealthy"),
            AirQuality::Hazardous => write!(f, "Hazardous"),
        }
    }
}
