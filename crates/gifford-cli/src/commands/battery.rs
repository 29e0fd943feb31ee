use gifford_core::io;
use std::path::Path;

pub fn run(file: &str, report_path: Option<&str>) {
    let data = match io::read_bytes(Path::new(file)) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("Failed to read {file}: {e}");
            std::process::exit(1);
        }
    };
    println!("Analyzing {} bytes from {file}", data.len());
    super::report_battery(&data, report_path);
}
