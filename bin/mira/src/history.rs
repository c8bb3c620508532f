use airwave::{Api, Select, TimedReading};
use log::debug;

use crate::Result;

/// Historical window for one device. Each fetch supersedes the
/// previous result; a failed fetch leaves it in place.
pub struct History {
    device_id: String,
    select: Select,
    readings: Vec<TimedReading>,
}

impl History {
    pub fn new(device_id: String, select: Select) -> History {
        History {
            device_id,
            select,
            readings: Vec::new(),
        }
    }

    pub fn select(&self) -> Select {
        self.select
    }

    pub fn readings(&self) -> &[TimedReading] {
        &self.readings
    }

    pub async fn refresh(&mut self, api: &Api) -> Result<()> {
        let select = self.select;
        let outcome = api.device_readings(&self.device_id, select).await;

        self.apply(select, outcome)
    }

    pub async fn change_select(&mut self, api: &Api, select: Select) -> Result<()> {
        let outcome = api.device_readings(&self.device_id, select).await;

        self.apply(select, outcome)
    }

    fn apply(
        &mut self,
        select: Select,
        outcome: airwave::Result<Vec<TimedReading>>,
    ) -> Result<()> {
        let readings = outcome?;
        debug!(
            "loaded {} readings for {} over {}",
            readings.len(),
            self.device_id,
            select
        );

        self.select = select;
        self.readings = readings;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airwave::Reading;
    use chrono::{TimeZone, Utc};

    fn timed_reading(hour: u32) -> TimedReading {
        TimedReading {
            data: Reading {
                pm_25: 9.5,
                ..Default::default()
            },
            created_at: Utc.with_ymd_and_hms(2025, 3, 14, hour, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_success_supersedes_previous_result() {
        let mut history = History::new("d1".to_string(), Select::Hours24);

        history
            .apply(Select::Hours24, Ok(vec![timed_reading(6), timed_reading(7)]))
            .unwrap();
        assert_eq!(history.readings().len(), 2);

        history
            .apply(Select::Days7, Ok(vec![timed_reading(8)]))
            .unwrap();

        assert_eq!(history.select(), Select::Days7);
        assert_eq!(history.readings(), &[timed_reading(8)]);
    }

    #[test]
    fn test_failure_retains_previous_result() {
        let mut history = History::new("d1".to_string(), Select::Hours24);

        history
            .apply(Select::Hours24, Ok(vec![timed_reading(6)]))
            .unwrap();

        let result = history.apply(Select::Days7, Err(airwave::Error::StreamClosed));

        assert!(result.is_err());
        assert_eq!(history.select(), Select::Hours24);
        assert_eq!(history.readings(), &[timed_reading(6)]);
    }
}
