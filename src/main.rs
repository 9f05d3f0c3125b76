// avrcalc - Main Entry Point
//
// Thin command-line front end over the library: a timer table printer and a
// fuse register decoder. All computation lives in the library modules.

use avrcalc::{DecodedField, DeviceDatabase, HardwareConfig, Settings, TimerRequest};
use std::collections::BTreeMap;
use std::env;

const SETTINGS_FILE: &str = "avrcalc.toml";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("timer") => run_timer(&args[1..]),
        Some("fuse") => run_fuse(&args[1..]),
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn print_usage() {
    println!("avrcalc v0.1.0");
    println!();
    println!("Usage:");
    println!("  avrcalc timer <target_seconds> [cpu_hz] [width_bits]");
    println!("      Evaluate all prescalers for a CTC interval.");
    println!("      cpu_hz defaults to the configured frequency, width to 16.");
    println!();
    println!("  avrcalc fuse <device_db.json> <device> <register> [hex_byte]");
    println!("      Decode a fuse register byte against the device database.");
    println!("      hex_byte defaults to the register's factory default.");
}

fn run_timer(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default(SETTINGS_FILE);

    let target_seconds: f64 = args
        .first()
        .ok_or("missing target duration in seconds")?
        .parse()?;
    let cpu_hz: f64 = match args.get(1) {
        Some(raw) => raw.parse()?,
        None => settings.default_frequency_hz,
    };
    let width_bits: u32 = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => 16,
    };

    let request = TimerRequest::with_width_bits(cpu_hz, target_seconds, width_bits)?;
    let results = request.solve();

    println!(
        "Timer settings for {} s @ {} Hz ({}-bit counter)",
        target_seconds, cpu_hz, width_bits
    );
    println!();
    println!(
        "{:>9}  {:>12}  {:>9}  {:>9}  {:>9}  {:>12}  {:>10}",
        "Prescaler", "Total Ticks", "Overflows", "Remainder", "Compare", "Real Time", "Error %"
    );
    for r in &results {
        let compare = match r.compare_value {
            Some(v) => v.to_string(),
            None => "N/A".to_string(),
        };
        println!(
            "{:>9}  {:>12}  {:>9}  {:>9}  {:>9}  {:>12.6}  {:>10.4}",
            r.prescaler,
            r.total_ticks,
            r.overflow_count,
            r.remainder_ticks,
            compare,
            r.achieved_seconds,
            r.error_percent
        );
    }

    // Print the snippet for the best feasible row (smallest error)
    let best = results
        .iter()
        .filter(|r| r.feasible)
        .min_by(|a, b| a.error_percent.abs().total_cmp(&b.error_percent.abs()));

    println!();
    match best {
        Some(r) => {
            println!("Generated code (prescaler {}):", r.prescaler);
            println!();
            println!("{}", r.code);
        }
        None => {
            println!("No prescaler fits this duration in a single hardware cycle.");
        }
    }

    Ok(())
}

fn run_fuse(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default(SETTINGS_FILE);

    let db_path = args.first().ok_or("missing device database path")?;
    let device_name = args.get(1).ok_or("missing device name")?;
    let register_name = args.get(2).ok_or("missing register name")?;

    let db = DeviceDatabase::load(db_path)?;
    let device = db
        .find(device_name)
        .ok_or_else(|| format!("unknown device '{}'", device_name))?;
    let register = device
        .fuse_register(register_name)
        .ok_or_else(|| format!("device has no '{}' fuse register", register_name))?;

    let byte = match args.get(3) {
        Some(raw) => u8::from_str_radix(raw.trim_start_matches("0x"), 16)?,
        None => register.default_value,
    };

    println!("{} ({})", device.name, device.summary());
    println!();
    println!("{} register = 0x{:02X}", register.name, byte);

    let decoded = register.decode(byte);
    for field in register.sorted_fields() {
        let value = match &decoded[&field.name] {
            DecodedField::Enum { bits, label } => match label {
                Some(label) => label.clone(),
                None => format!("unknown (0x{:02X})", bits),
            },
            DecodedField::Programmed(true) => "programmed".to_string(),
            DecodedField::Programmed(false) => "unprogrammed".to_string(),
        };
        println!(
            "  {:<28} mask 0x{:02X}  {}",
            field.display_name(),
            field.mask,
            value
        );
    }

    let hardware = HardwareConfig {
        programmer: settings.programmer.unwrap_or_else(|| "usbasp".to_string()),
        partno: device.partno.clone(),
        port: Some(settings.port),
        bit_clock: Some(settings.bit_clock),
    };

    let mut values = BTreeMap::new();
    values.insert(register.name.clone(), byte);

    println!();
    println!("Write command:");
    println!("  {}", hardware.write_command(&values, false)?);

    Ok(())
}
