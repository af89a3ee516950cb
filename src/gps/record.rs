// src/gps/record.rs
//! GPS record shared across parse calls

use chrono::{DateTime, Utc};

/// Running composite of the receiver's last known state.
///
/// The record is never replaced wholesale: each NMEA decoder updates only
/// the fields its sentence type carries and leaves the rest at their last
/// known value.
///
/// Sign conventions differ by sentence type and are kept that way on
/// purpose. A GGA sentence stores `lat`/`lon` signed (negative for the
/// southern/western hemisphere) without touching `ns`/`ew`; a GLL sentence
/// stores unsigned magnitudes and records the hemisphere in `ns`/`ew`.
/// Consumers must check the indicator characters before assuming a sign.
#[derive(Debug, Clone)]
pub struct GpsRecord {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Latitude hemisphere indicator, `N` or `S` (blank until a GLL fix).
    pub ns: char,
    /// Longitude in decimal degrees.
    pub lon: f64,
    /// Longitude hemisphere indicator, `E` or `W` (blank until a GLL fix).
    pub ew: char,
    /// Altitude above mean sea level in meters.
    pub altitude: f32,
    /// Horizontal dilution of precision.
    pub hdop: f32,
    /// Number of satellites used in the measurement.
    pub satellite_count: u32,
    /// Whether the receiver currently reports a position solution.
    pub fix: bool,
    /// UTC time of the last successful measurement, either a 9-character
    /// `hhmmss.ss` string or empty.
    pub last_measure: String,
    /// Wall-clock time the record was last fed a buffer, set by the
    /// acquisition loop rather than the decoders.
    pub timestamp: Option<DateTime<Utc>>,
}

impl Default for GpsRecord {
    fn default() -> Self {
        Self {
            lat: 0.0,
            ns: ' ',
            lon: 0.0,
            ew: ' ',
            altitude: 0.0,
            hdop: 0.0,
            satellite_count: 0,
            fix: false,
            last_measure: String::new(),
            timestamp: None,
        }
    }
}

impl GpsRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the receiver reports a valid position solution
    pub fn has_fix(&self) -> bool {
        self.fix
    }

    /// Get the age of the record in seconds
    pub fn age_seconds(&self) -> Option<i64> {
        self.timestamp
            .map(|ts| Utc::now().signed_duration_since(ts).num_seconds())
    }

    /// Check if the record is recent (within 10 seconds)
    pub fn is_recent(&self) -> bool {
        self.age_seconds().map_or(false, |age| age < 10)
    }

    /// Update the timestamp to now
    pub fn update_timestamp(&mut self) {
        self.timestamp = Some(Utc::now());
    }

    /// Fix status description for display
    pub fn fix_description(&self) -> &'static str {
        if self.fix {
            "Fix"
        } else {
            "No fix"
        }
    }

    /// Format the last measurement time as `hh:mm:ss.ss UTC`
    pub fn format_last_measure(&self) -> String {
        match (
            self.last_measure.get(0..2),
            self.last_measure.get(2..4),
            self.last_measure.get(4..9),
        ) {
            (Some(h), Some(m), Some(s)) => format!("{}:{}:{} UTC", h, m, s),
            _ => "Unknown".to_string(),
        }
    }

    /// Format a coordinate with its hemisphere indicator for display
    pub fn format_coordinate(value: f64, indicator: char) -> String {
        format!("{:>12.6}° {}", value, indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_blank() {
        let record = GpsRecord::new();
        assert_eq!(record.lat, 0.0);
        assert_eq!(record.ns, ' ');
        assert!(!record.has_fix());
        assert!(record.last_measure.is_empty());
        assert!(record.timestamp.is_none());
        assert!(record.age_seconds().is_none());
    }

    #[test]
    fn test_update_timestamp() {
        let mut record = GpsRecord::new();
        record.update_timestamp();
        assert!(record.is_recent());
        assert_eq!(record.age_seconds(), Some(0));
    }

    #[test]
    fn test_format_last_measure() {
        let mut record = GpsRecord::new();
        assert_eq!(record.format_last_measure(), "Unknown");

        record.last_measure = "123519.00".to_string();
        assert_eq!(record.format_last_measure(), "12:35:19.00 UTC");
    }

    #[test]
    fn test_fix_description() {
        let mut record = GpsRecord::new();
        assert_eq!(record.fix_description(), "No fix");
        record.fix = true;
        assert_eq!(record.fix_description(), "Fix");
    }
}
