//! Laptop serial number formatting.
//!
//! Convention: `{prefix}{YYMMDD}{seq}`
//!
//! - `prefix` = two-letter brand code, looked up by case-insensitive
//!   substring match against [`BRAND_PREFIXES`] (first match wins,
//!   `"UN"` when nothing matches)
//! - `YYMMDD` = purchase date
//! - `seq` = same-day sequence number, zero-padded to at least two digits
//!
//! The sequence itself is allocated atomically by the store; this module
//! only formats it.

use chrono::NaiveDate;

/// Brand substring to serial prefix, in match priority order.
pub const BRAND_PREFIXES: &[(&str, &str)] = &[
    ("dell", "DE"),
    ("lenovo", "LE"),
    ("hp", "HP"),
    ("asus", "AS"),
    ("acer", "AC"),
    ("apple", "AP"),
    ("toshiba", "TO"),
    ("samsung", "SA"),
    ("msi", "MS"),
    ("alienware", "AW"),
    ("surface", "SF"),
];

/// Prefix used when the brand matches no entry in [`BRAND_PREFIXES`].
pub const UNKNOWN_BRAND_PREFIX: &str = "UN";

/// Resolve the two-letter serial prefix for a brand name.
///
/// ```
/// use inventory_core::serial::brand_prefix;
///
/// assert_eq!(brand_prefix("Dell"), "DE");
/// assert_eq!(brand_prefix("Microsoft Surface"), "SF");
/// assert_eq!(brand_prefix("Framework"), "UN");
/// ```
pub fn brand_prefix(brand: &str) -> &'static str {
    let lower = brand.to_lowercase();
    BRAND_PREFIXES
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map(|(_, prefix)| *prefix)
        .unwrap_or(UNKNOWN_BRAND_PREFIX)
}

/// Format a serial number from its parts.
///
/// ```
/// use chrono::NaiveDate;
/// use inventory_core::serial::serial_number;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
/// assert_eq!(serial_number("Lenovo", date, 1), "LE25030701");
/// ```
pub fn serial_number(brand: &str, date_purchased: NaiveDate, seq: i64) -> String {
    format!(
        "{}{}{:02}",
        brand_prefix(brand),
        date_purchased.format("%y%m%d"),
        seq
    )
}
