//! Serial bench probe.
//!
//! Lists candidate serial ports, or opens one and issues a query (by
//! default `*IDN?`) to find out what is on the other end.

use anyhow::{Context, Result};
use clap::Parser;

use labbench::transport::SerialTransport;
use labbench::ScpiSession;

#[derive(Parser)]
#[command(name = "labbench_probe", about = "Probe instruments on the serial bus")]
struct Args {
    /// Serial port to probe; lists available ports when omitted.
    port: Option<String>,

    /// Baud rate.
    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Command to send.
    #[arg(long, default_value = "*IDN?")]
    command: String,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let Some(port_name) = args.port else {
        let ports = serialport::available_ports().context("Failed to enumerate serial ports")?;
        if ports.is_empty() {
            println!("No serial ports found");
        }
        for port in ports {
            println!("{}", port.port_name);
        }
        return Ok(());
    };

    let transport = SerialTransport::open(&port_name, args.baud)
        .with_context(|| format!("Failed to open '{}' at {} baud", port_name, args.baud))?;
    let session = ScpiSession::new(port_name.as_str(), Box::new(transport));

    let reply = session
        .query(&args.command)
        .with_context(|| format!("No reply to '{}' on {}", args.command, port_name))?;
    println!("{}", reply);

    Ok(())
}
