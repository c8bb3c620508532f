use std::collections::HashMap;

use airwave::{Device, LastReading, Reading};
use chrono::{DateTime, Utc};
use log::debug;

#[derive(Clone, Debug, PartialEq)]
pub struct DeviceState {
    pub device: Device,
    pub reading: Option<Reading>,
    pub active: bool,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Authoritative device id to state map for one session. All mutation
/// runs on the session's event loop; readers get immutable views.
#[derive(Debug, Default)]
pub struct Fleet {
    devices: HashMap<String, DeviceState>,
}

impl Fleet {
    pub fn new() -> Fleet {
        Fleet {
            devices: HashMap::new(),
        }
    }

    /// Replaces the whole map from a bulk read.
    pub fn apply_snapshot(&mut self, devices: Vec<Device>, readings: Vec<LastReading>) {
        let mut readings: HashMap<String, LastReading> = readings
            .into_iter()
            .map(|reading| (reading.id.clone(), reading))
            .collect();

        self.devices = devices
            .into_iter()
            .map(|device| {
                let (reading, last_updated) = match readings.remove(&device.id) {
                    Some(reading) => (Some(reading.data), reading.updated_at),
                    None => (None, None),
                };

                let state = DeviceState {
                    active: device.active,
                    reading,
                    last_updated,
                    device,
                };

                (state.device.id.clone(), state)
            })
            .collect();
    }

    /// Applies a pushed reading. Events for unknown devices are
    /// dropped, never inserted. Returns whether the reading changed.
    pub fn apply_reading(&mut self, id: &str, reading: Reading) -> bool {
        let state = match self.devices.get_mut(id) {
            Some(state) => state,
            None => {
                debug!("dropped reading for unknown device {id}");
                return false;
            }
        };

        state.active = true;

        // identical reading: device is back online, freshness untouched
        if state.reading.as_ref() == Some(&reading) {
            return false;
        }

        state.reading = Some(reading);
        state.last_updated = Some(Utc::now());

        true
    }

    /// Applies a connectivity change. An inactive device keeps its last
    /// reading visible. Returns whether the flag changed.
    pub fn apply_active(&mut self, id: &str, active: bool) -> bool {
        let state = match self.devices.get_mut(id) {
            Some(state) => state,
            None => {
                debug!("dropped active flag for unknown device {id}");
                return false;
            }
        };

        let changed = state.active != active;
        state.active = active;

        changed
    }

    pub fn device(&self, id: &str) -> Option<&DeviceState> {
        self.devices.get(id)
    }

    /// Point-in-time copy for display, ordered by device name.
    pub fn snapshot(&self) -> Vec<DeviceState> {
        let mut states: Vec<DeviceState> = self.devices.values().cloned().collect();
        states.sort_by(|a, b| a.device.name.cmp(&b.device.name));

        states
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn device(id: &str, active: bool) -> Device {
        Device {
            id: id.to_string(),
            name: id.to_string(),
            box_: "test site".to_string(),
            lat: 4.17,
            long: 73.5,
            active,
        }
    }

    fn reading(pm_25: f32) -> Reading {
        Reading {
            pm_25,
            co: 0.4,
            co2: 412.0,
            temperature: 29.5,
            humidity: 78.0,
            noise: 52.3,
            ..Default::default()
        }
    }

    fn last_reading(id: &str, pm_25: f32) -> LastReading {
        LastReading {
            id: id.to_string(),
            data: reading(pm_25),
            updated_at: Some(Utc.with_ymd_and_hms(2025, 3, 14, 6, 30, 0).unwrap()),
        }
    }

    fn populated_fleet() -> Fleet {
        let mut fleet = Fleet::new();
        fleet.apply_snapshot(
            vec![device("d1", true), device("d2", true)],
            vec![last_reading("d1", 9.5)],
        );

        fleet
    }

    #[test]
    fn test_snapshot_populates_devices_and_readings() {
        let fleet = populated_fleet();

        assert_eq!(fleet.len(), 2);

        let d1 = fleet.device("d1").unwrap();
        assert_eq!(d1.reading, Some(reading(9.5)));
        assert!(d1.active);
        assert_eq!(
            d1.last_updated,
            Some(Utc.with_ymd_and_hms(2025, 3, 14, 6, 30, 0).unwrap())
        );

        let d2 = fleet.device("d2").unwrap();
        assert_eq!(d2.reading, None);
        assert!(d2.active);
        assert_eq!(d2.last_updated, None);
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut fleet = Fleet::new();

        fleet.apply_snapshot(
            vec![device("d1", true), device("d2", false)],
            vec![last_reading("d1", 9.5)],
        );
        let first = fleet.snapshot();

        fleet.apply_snapshot(
            vec![device("d1", true), device("d2", false)],
            vec![last_reading("d1", 9.5)],
        );
        let second = fleet.snapshot();

        assert_eq!(first, second);
    }

    #[test]
    fn test_snapshot_replaces_wholesale() {
        let mut fleet = populated_fleet();

        fleet.apply_snapshot(vec![device("d3", true)], vec![]);

        assert_eq!(fleet.len(), 1);
        assert!(fleet.device("d1").is_none());
        assert!(fleet.device("d3").is_some());
    }

    #[test]
    fn test_changed_reading_is_stored_with_receipt_time() {
        let mut fleet = populated_fleet();

        let before = Utc::now();
        assert!(fleet.apply_reading("d2", reading(14.0)));

        let d2 = fleet.device("d2").unwrap();
        assert_eq!(d2.reading, Some(reading(14.0)));
        assert!(d2.active);
        assert!(d2.last_updated.unwrap() >= before);
    }

    #[test]
    fn test_duplicate_reading_only_forces_active() {
        let mut fleet = populated_fleet();
        fleet.apply_active("d1", false);

        let before = fleet.device("d1").unwrap().last_updated;

        assert!(!fleet.apply_reading("d1", reading(9.5)));

        let d1 = fleet.device("d1").unwrap();
        assert!(d1.active);
        assert_eq!(d1.reading, Some(reading(9.5)));
        assert_eq!(d1.last_updated, before);
    }

    #[test]
    fn test_unknown_device_is_dropped() {
        let mut fleet = populated_fleet();
        let before = fleet.snapshot();

        assert!(!fleet.apply_reading("ghost", reading(14.0)));
        assert!(!fleet.apply_active("ghost", false));

        assert_eq!(fleet.len(), 2);
        assert_eq!(fleet.snapshot(), before);
    }

    #[test]
    fn test_active_flag_is_independent_of_reading() {
        let mut fleet = populated_fleet();

        assert!(fleet.apply_active("d1", false));

        let d1 = fleet.device("d1").unwrap();
        assert!(!d1.active);
        assert_eq!(d1.reading, Some(reading(9.5)));

        // same flag again is not a change
        assert!(!fleet.apply_active("d1", false));
    }

    #[test]
    fn test_reading_update_overrides_inactivation() {
        let mut fleet = populated_fleet();

        fleet.apply_active("d1", false);
        assert!(fleet.apply_reading("d1", reading(33.0)));

        let d1 = fleet.device("d1").unwrap();
        assert!(d1.active);
        assert_eq!(d1.reading, Some(reading(33.0)));
    }

    #[test]
    fn test_last_updated_is_monotonic() {
        let mut fleet = populated_fleet();

        fleet.apply_reading("d1", reading(10.0));
        let first = fleet.device("d1").unwrap().last_updated.unwrap();

        fleet.apply_reading("d1", reading(11.0));
        let second = fleet.device("d1").unwrap().last_updated.unwrap();

        assert!(second >= first);
    }

    #[test]
    fn test_snapshot_view_is_detached() {
        let mut fleet = populated_fleet();
        let view = fleet.snapshot();

        fleet.apply_reading("d2", reading(14.0));

        let d2 = view.iter().find(|state| state.device.id == "d2").unwrap();
        assert_eq!(d2.reading, None);
    }
}
