// src/main.rs
//! GPS Receiver - serial NMEA monitoring tool

use clap::Parser;
use gps_receiver::{config::GpsConfig, monitor, GpsMonitor, GpsSource, Result};

#[derive(Parser)]
#[command(name = "gps-receiver", version, about = "Serial NMEA GPS receiver monitor")]
struct Args {
    /// Serial port connected to the receiver (e.g. /dev/ttyUSB0)
    #[arg(short, long)]
    port: Option<String>,

    /// Serial baud rate
    #[arg(short, long)]
    baudrate: Option<u32>,

    /// List available serial ports and exit
    #[arg(short, long)]
    list: bool,

    /// Persist the supplied serial settings as the new defaults
    #[arg(long)]
    save: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.list {
        return monitor::list_serial_ports().await;
    }

    // Load configuration; command-line arguments take precedence
    let mut config = GpsConfig::load().unwrap_or_default();
    if let Some(port) = args.port {
        let baudrate = args.baudrate.unwrap_or(config.serial_baudrate);
        config.update_serial(port, baudrate);
    } else if let Some(baudrate) = args.baudrate {
        config.serial_baudrate = baudrate;
    }

    if args.save {
        config.save()?;
    }

    let port = match config.serial_port.clone() {
        Some(port) => port,
        None => {
            eprintln!("No serial port configured.");
            eprintln!("Pass one with --port, or persist it with --port <PORT> --save.");
            std::process::exit(1);
        }
    };

    println!("Starting GPS Receiver...");

    let monitor = GpsMonitor::new();
    monitor
        .start(GpsSource::Serial {
            port,
            baudrate: config.serial_baudrate,
        })
        .await?;

    monitor.run_display().await
}
