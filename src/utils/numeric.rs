use crate::error::{ProcessingError, Result};

/// Round to `digits` decimal places, ties to even.
///
/// # Examples
/// ```
/// use meteo_datasets::utils::round_to;
///
/// assert_eq!(round_to(12.34, 1), 12.3);
/// assert_eq!(round_to(0.25, 1), 0.2);
/// ```
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round_ties_even() / factor
}

/// Parse a single-byte field delimiter such as `;` or `,`.
pub fn parse_delimiter(delimiter: &str) -> Result<u8> {
    match delimiter.as_bytes() {
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(ProcessingError::Config(format!(
            "Delimiter must be a single ASCII character, got: '{}'",
            delimiter
        ))),
    }
}
