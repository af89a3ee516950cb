// src/display/terminal.rs
//! Terminal-based display implementation

use crate::{
    error::{GpsError, Result},
    gps::GpsRecord,
};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType, DisableLineWrap, EnableLineWrap},
};
use std::{
    io::{self, Write},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, RwLock,
    },
    time::Duration,
};
use tokio::time::sleep;

pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }

    /// Start the terminal display loop
    pub async fn run(
        &self,
        record: Arc<RwLock<GpsRecord>>,
        running: Arc<AtomicBool>,
    ) -> Result<()> {
        let mut stdout = io::stdout();
        execute!(stdout, Hide, DisableLineWrap).map_err(GpsError::Io)?;

        // Set up Ctrl+C handler
        let running_clone = Arc::clone(&running);
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            running_clone.store(false, Ordering::Relaxed);
        });

        while running.load(Ordering::Relaxed) {
            execute!(stdout, Clear(ClearType::All), MoveTo(0, 0)).map_err(GpsError::Io)?;

            let snapshot = record.read().unwrap().clone();
            self.render_display(&mut stdout, &snapshot)?;

            stdout.flush().map_err(GpsError::Io)?;
            sleep(Duration::from_secs(1)).await;
        }

        execute!(stdout, Show, EnableLineWrap).map_err(GpsError::Io)?;
        println!("\nShutting down...");
        Ok(())
    }

    /// Render the GPS record to the terminal
    fn render_display(&self, stdout: &mut impl Write, record: &GpsRecord) -> Result<()> {
        // Header
        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            Print("GPS Receiver - NMEA Serial Monitor (Rust)"),
            Print("\n"),
            Print("=".repeat(60)),
            Print("\n"),
            ResetColor
        )
        .map_err(GpsError::Io)?;

        // Last update and staleness
        let update_str = match record.timestamp {
            Some(ts) => ts.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            None => "No data received".to_string(),
        };
        let age_str = match record.age_seconds() {
            Some(age) if !record.is_recent() => format!(" (stale, {}s old)", age),
            _ => String::new(),
        };
        execute!(
            stdout,
            Print(format!("Last Update: {}{}\n\n", update_str, age_str))
        )
        .map_err(GpsError::Io)?;

        self.render_position_section(stdout, record)?;
        self.render_quality_section(stdout, record)?;
        self.render_time_section(stdout, record)?;

        // Footer
        execute!(
            stdout,
            SetForegroundColor(Color::Green),
            Print("=".repeat(60)),
            Print("\n"),
            Print("Press Ctrl+C to exit"),
            Print("\n"),
            ResetColor
        )
        .map_err(GpsError::Io)?;

        Ok(())
    }

    fn render_position_section(&self, stdout: &mut impl Write, record: &GpsRecord) -> Result<()> {
        execute!(
            stdout,
            SetForegroundColor(Color::Yellow),
            Print("POSITION:\n"),
            ResetColor
        )
        .map_err(GpsError::Io)?;

        execute!(
            stdout,
            Print(format!(
                "  Latitude:  {}\n",
                GpsRecord::format_coordinate(record.lat, record.ns)
            ))
        )
        .map_err(GpsError::Io)?;

        execute!(
            stdout,
            Print(format!(
                "  Longitude: {}\n",
                GpsRecord::format_coordinate(record.lon, record.ew)
            ))
        )
        .map_err(GpsError::Io)?;

        execute!(
            stdout,
            Print(format!("  Altitude:  {:>12.1} m\n\n", record.altitude))
        )
        .map_err(GpsError::Io)?;

        Ok(())
    }

    fn render_quality_section(&self, stdout: &mut impl Write, record: &GpsRecord) -> Result<()> {
        execute!(
            stdout,
            SetForegroundColor(Color::Magenta),
            Print("QUALITY:\n"),
            ResetColor
        )
        .map_err(GpsError::Io)?;

        execute!(
            stdout,
            Print(format!("  Satellites: {:>11}\n", record.satellite_count))
        )
        .map_err(GpsError::Io)?;

        execute!(
            stdout,
            Print(format!("  HDOP:       {:>11.1}\n", record.hdop))
        )
        .map_err(GpsError::Io)?;

        execute!(
            stdout,
            Print(format!("  Fix:        {:>11}\n\n", record.fix_description()))
        )
        .map_err(GpsError::Io)?;

        Ok(())
    }

    fn render_time_section(&self, stdout: &mut impl Write, record: &GpsRecord) -> Result<()> {
        execute!(
            stdout,
            SetForegroundColor(Color::Cyan),
            Print("TIME:\n"),
            ResetColor
        )
        .map_err(GpsError::Io)?;

        execute!(
            stdout,
            Print(format!(
                "  Last Measure: {}\n\n",
                record.format_last_measure()
            ))
        )
        .map_err(GpsError::Io)?;

        Ok(())
    }
}

impl Default for TerminalDisplay {
    fn default() -> Self {
        Self::new()
    }
}
