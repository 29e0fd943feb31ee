use gifford_core::{KeystreamEngine, REFERENCE_KEY, io};
use std::path::Path;

pub fn run(
    input: Option<&str>,
    output: Option<&str>,
    key_hex: Option<&str>,
    no_battery: bool,
    report_path: Option<&str>,
) {
    let key = match key_hex {
        None => REFERENCE_KEY,
        Some(hex) => match super::parse_key(hex) {
            Some(k) => k,
            None => {
                eprintln!("Invalid key '{hex}': expected 16 hex digits.");
                std::process::exit(2);
            }
        },
    };

    let input = input
        .map(str::to_string)
        .unwrap_or_else(|| super::prompt_path("Input file"));
    let output = output
        .map(str::to_string)
        .unwrap_or_else(|| super::prompt_path("Output file"));

    let mut data = match io::read_bytes(Path::new(&input)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to read {input}: {e}");
            std::process::exit(1);
        }
    };

    let mut engine = KeystreamEngine::new(key);
    engine.transform(&mut data);

    if let Err(e) = io::write_bytes(Path::new(&output), &data) {
        eprintln!("Failed to write {output}: {e}");
        std::process::exit(1);
    }
    println!("Processed {} bytes: {input} -> {output}", data.len());

    if !no_battery {
        super::report_battery(engine.observation_sequence(), report_path);
    }
}
