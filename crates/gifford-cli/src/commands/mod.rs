pub mod battery;
pub mod process;

use gifford_tests::TestResult;
use std::io::{self, BufRead, Write};

/// Parse a 16-hex-digit engine key.
pub fn parse_key(hex: &str) -> Option<[u8; 8]> {
    let hex = hex.trim();
    // Byte length alone is not enough: a multibyte character could straddle
    // a slice boundary below.
    if hex.len() != 16 || !hex.is_ascii() {
        return None;
    }
    let mut key = [0u8; 8];
    for (i, slot) in key.iter_mut().enumerate() {
        *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
    }
    Some(key)
}

/// Interactive path prompt, used when a path flag is omitted.
pub fn prompt_path(label: &str) -> String {
    print!("{label}: ");
    io::stdout().flush().ok();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() || line.trim().is_empty() {
        eprintln!("No path given.");
        std::process::exit(1);
    }
    line.trim().to_string()
}

/// Print counts and battery results, one line per test (one per
/// autocorrelation lag), then optionally write the results as JSON.
pub fn report_battery(data: &[u8], report_path: Option<&str>) {
    println!("Ones: {}", gifford_tests::count_ones(data));
    println!("Zeros: {}", gifford_tests::count_zeros(data));

    let results = gifford_tests::run_all(data);
    for r in &results {
        let verdict = if r.passed { "passed" } else { "not passed" };
        println!("{} {}: {:.6}  [{}]", r.name, verdict, r.statistic, r.details);
    }

    if let Some(path) = report_path {
        write_report(path, &results);
    }
}

fn write_report(path: &str, results: &[TestResult]) {
    let json = match serde_json::to_string_pretty(results) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Failed to serialize report: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = std::fs::write(path, json) {
        eprintln!("Failed to write report to {path}: {e}");
        std::process::exit(1);
    }
    println!("Report saved to: {path}");
}

#[cfg(test)]
mod tests {
    use super::parse_key;

    #[test]
    fn parse_key_accepts_reference_key() {
        assert_eq!(
            parse_key("c1d87933da598c36"),
            Some(gifford_core::REFERENCE_KEY)
        );
        assert_eq!(
            parse_key(" C1D87933DA598C36 "),
            Some(gifford_core::REFERENCE_KEY)
        );
    }

    #[test]
    fn parse_key_rejects_malformed_input() {
        assert_eq!(parse_key(""), None);
        assert_eq!(parse_key("c1d87933da598c"), None);
        assert_eq!(parse_key("c1d87933da598c3g"), None);
        assert_eq!(parse_key("c1d87933da598c3636"), None);
        // 16 bytes, but a multibyte char sits across a digit-pair boundary.
        assert_eq!(parse_key("aб0123456789abc"), None);
    }
}
