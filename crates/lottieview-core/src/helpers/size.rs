// crates/lottieview-core/src/helpers/size.rs
//
// File-size display formatting for the controls panel.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Base-1024, two decimals, capped at GB. None renders as "Unknown".
///
/// ```
/// use lottieview_core::helpers::size::format_file_size;
/// assert_eq!(format_file_size(Some(2_097_152)), "2.00 MB");
/// assert_eq!(format_file_size(None), "Unknown");
/// ```
pub fn format_file_size(bytes: Option<u64>) -> String {
    let Some(bytes) = bytes else {
        return "Unknown".to_string();
    };
    if bytes == 0 {
        return "0 B".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}
