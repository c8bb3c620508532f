use std::fmt;

use chrono_humanize::HumanTime;

use crate::{DeviceState, History};

pub struct Overview<'a>(pub &'a DeviceState);

impl fmt::Display for Overview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        write!(f, "{}: ", state.device.name.to_uppercase())?;

        match &state.reading {
            Some(reading) => write!(
                f,
                "{} / PM2.5 {:.2} µg/m³ / CO {:.2} ppm / CO2 {:.2} ppm",
                reading.air_quality(),
                reading.pm_25,
                reading.co,
                reading.co2
            )?,
            None => write!(f, "no reading yet")?,
        }

        if !state.active {
            write!(f, " [offline]")?;
        }

        Ok(())
    }
}

pub struct Detail<'a>(pub &'a DeviceState);

impl fmt::Display for Detail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        write!(
            f,
            "{} ({})",
            state.device.name.to_uppercase(),
            state.device.box_
        )?;

        if !state.active {
            write!(f, " [offline]")?;
        }

        match &state.reading {
            Some(reading) => write!(f, ": {}", reading)?,
            None => write!(f, ": no reading yet")?,
        }

        if let Some(last_updated) = state.last_updated {
            write!(f, ", updated {}", HumanTime::from(last_updated))?;
        }

        Ok(())
    }
}

pub struct Trend<'a>(pub &'a History);

impl fmt::Display for Trend<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let history = self.0;
        let readings = history.readings();

        match (readings.first(), readings.last()) {
            (Some(first), Some(last)) => write!(
                f,
                "{}: {} samples from {} to {}",
                history.select(),
                readings.len(),
                first.created_at,
                last.created_at
            ),
            _ => write!(f, "{}: no samples", history.select()),
        }
    }
}
