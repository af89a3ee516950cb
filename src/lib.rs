// src/lib.rs
//! GPS Receiver Library
//!
//! Parses the NMEA-0183 byte stream of a serial GPS receiver into a running
//! [`GpsRecord`] and provides the acquisition and display plumbing around it.
//!
//! Note the dual sign convention carried by the record: GGA sentences store
//! signed coordinates, GLL sentences store unsigned magnitudes plus the
//! `ns`/`ew` hemisphere indicators. See [`GpsRecord`] for details.

pub mod config;
pub mod display;
pub mod error;
pub mod gps;
pub mod monitor;

// Re-export main types for convenience
pub use error::{GpsError, Result};
pub use gps::record::GpsRecord;
pub use monitor::{GpsMonitor, GpsSource};
