// src/monitor.rs
//! Main GPS receiver coordination

use crate::{
    display::terminal::TerminalDisplay,
    error::{GpsError, Result},
    gps::{nmea, record::GpsRecord},
};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};
use tokio::io::AsyncReadExt;
use tokio_serial::SerialPortBuilderExt;

/// Size of one serial read. Each chunk is handed to the parser as-is; a
/// sentence split across two reads fails the checksum gate and is dropped
/// rather than reassembled.
const READ_BUF_LEN: usize = 512;

/// GPS data source configuration
#[derive(Debug, Clone)]
pub enum GpsSource {
    Serial { port: String, baudrate: u32 },
}

/// Coordinates data acquisition and display around the shared record
pub struct GpsMonitor {
    record: Arc<RwLock<GpsRecord>>,
    running: Arc<AtomicBool>,
}

impl GpsMonitor {
    /// Create a new GPS monitor
    pub fn new() -> Self {
        Self {
            record: Arc::new(RwLock::new(GpsRecord::new())),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Clone the monitor (shares record and running flag)
    pub fn clone(&self) -> Self {
        Self {
            record: Arc::clone(&self.record),
            running: Arc::clone(&self.running),
        }
    }

    /// Start collecting data from the specified source
    pub async fn start(&self, source: GpsSource) -> Result<()> {
        match source {
            GpsSource::Serial { port, baudrate } => {
                self.connect_serial(&port, baudrate).await?;
            }
        }
        Ok(())
    }

    /// Start the terminal display
    pub async fn run_display(&self) -> Result<()> {
        let terminal_display = TerminalDisplay::new();
        terminal_display
            .run(Arc::clone(&self.record), Arc::clone(&self.running))
            .await
    }

    /// Connect to a GPS receiver via serial port
    async fn connect_serial(&self, port: &str, baudrate: u32) -> Result<()> {
        println!("Connecting to GPS on {} at {} baud...", port, baudrate);

        let mut serial = tokio_serial::new(port, baudrate)
            .timeout(Duration::from_millis(1000))
            .open_native_async()
            .map_err(|e| {
                GpsError::Connection(format!("Failed to open serial port {}: {}", port, e))
            })?;

        println!("Connected successfully!");

        let record = Arc::clone(&self.record);
        let running = Arc::clone(&self.running);

        tokio::spawn(async move {
            let mut buf = [0u8; READ_BUF_LEN];

            while running.load(Ordering::Relaxed) {
                match serial.read(&mut buf).await {
                    Ok(0) => break, // EOF
                    Ok(n) => {
                        let mut record_guard = record.write().unwrap();
                        record_guard.update_timestamp();
                        nmea::parse(&mut record_guard, &buf[..n]);
                    }
                    Err(e) => {
                        eprintln!("Error reading from serial port: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(())
    }

    /// Stop the monitor
    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    /// Check if the monitor is running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Get a snapshot of the current record
    pub fn get_record(&self) -> GpsRecord {
        self.record.read().unwrap().clone()
    }
}

impl Default for GpsMonitor {
    fn default() -> Self {
        Self::new()
    }
}

/// List available serial ports
pub async fn list_serial_ports() -> Result<()> {
    let ports = tokio_serial::available_ports()
        .map_err(|e| GpsError::Other(format!("Failed to list serial ports: {}", e)))?;

    if ports.is_empty() {
        println!("No serial ports found.");
    } else {
        println!("Available serial ports:");
        for port in ports {
            println!("  {} - {:?}", port.port_name, port.port_type);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_lifecycle() {
        let monitor = GpsMonitor::new();
        assert!(monitor.is_running());

        let shared = monitor.clone();
        shared.stop();
        assert!(!monitor.is_running());
    }

    #[test]
    fn test_get_record_snapshot() {
        let monitor = GpsMonitor::new();
        let record = monitor.get_record();
        assert!(!record.has_fix());
        assert!(record.timestamp.is_none());
    }
}
