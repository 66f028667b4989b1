use std::env;

use gw_instek_psu::{psu::GwPsu, serial::SerialTransport, types::IdentityStatus};
use inquire::Select;

// Configuration constants - adjust these for your setup
const OUTPUT_VOLTAGE_V: f64 = 5.0;
const CURRENT_LIMIT_A: f64 = 0.1;
const OVP_V: f64 = 6.0;
const OCP_A: f64 = 0.2;
const STABILIZATION_DELAY_MS: u64 = 1000;

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Get serial port from command line arg or interactive selection
    let port_name = env::args().nth(1).unwrap_or_else(|| {
        let ports = serialport::available_ports().expect("Failed to enumerate serial ports");

        if ports.is_empty() {
            eprintln!("No serial ports found!");
            std::process::exit(1);
        }

        let port_names: Vec<String> = ports.iter().map(|p| p.port_name.clone()).collect();

        Select::new("Select a serial port:", port_names)
            .prompt()
            .expect("Failed to select port")
    });

    println!("Using port: {}", port_name);

    let mut psu: GwPsu<SerialTransport> =
        GwPsu::open(&port_name).expect("Failed to open serial port");

    match psu.check_identity().expect("Identity query failed") {
        IdentityStatus::Matched => println!("Found {}", psu.config().identity.trim_end()),
        IdentityStatus::Mismatch(reply) => {
            eprintln!("Unexpected device: {}", String::from_utf8_lossy(&reply).trim_end());
            std::process::exit(1);
        }
        IdentityStatus::Unreachable(err) => {
            eprintln!("PSU not responding: {}", err);
            std::process::exit(1);
        }
    }

    psu.set_ovp(OVP_V).unwrap();
    psu.set_ocp(OCP_A).unwrap();
    println!(
        "Protection levels: OVP {}V, OCP {}A",
        psu.read_ovp().unwrap(),
        psu.read_ocp().unwrap()
    );

    psu.set_voltage(OUTPUT_VOLTAGE_V).unwrap();
    println!("Set output voltage to {}V", OUTPUT_VOLTAGE_V);

    psu.set_current(CURRENT_LIMIT_A).unwrap();
    println!("Set current limit to {}A", CURRENT_LIMIT_A);

    psu.on().unwrap();
    println!("Output enabled: {}", psu.output_status().unwrap());

    // Wait for output to stabilize
    std::thread::sleep(std::time::Duration::from_millis(STABILIZATION_DELAY_MS));

    println!(
        "Voltage {:.3}V, current {:.3}A, power {:.3}W",
        psu.read_voltage().unwrap(),
        psu.read_current().unwrap(),
        psu.read_power().unwrap()
    );

    psu.off().unwrap();
    println!("Output enabled: {}", psu.output_status().unwrap());

    psu.close().unwrap();
}
