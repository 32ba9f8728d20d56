//! Money and date parsing. Both parsers return `None` as the unparseable
//! signal; the calling builder turns that into a warning instead of failing
//! the run.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Optional sign, optional currency symbol, digits with optional thousands
/// separators, optional 1-2 decimal places. Anything else is unparseable.
static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<sign>-)?\s*(?:£|\$|€)?\s*(?P<whole>\d{1,3}(?:,\d{3})*|\d+)(?:\.(?P<frac>\d{1,2}))?$")
        .unwrap()
});

/// Parse a money-like raw value into integer minor currency units (pence).
/// Accepts thousands separators and a leading currency symbol; rejects any
/// non-numeric remainder.
pub fn parse_amount_minor(raw: &str) -> Option<i64> {
    let caps = AMOUNT_RE.captures(raw.trim())?;

    let whole: i64 = caps
        .name("whole")?
        .as_str()
        .replace(',', "")
        .parse()
        .ok()?;
    let minor = match caps.name("frac") {
        // ".5" means 50 minor units, ".50" also 50
        Some(frac) if frac.as_str().len() == 1 => frac.as_str().parse::<i64>().ok()? * 10,
        Some(frac) => frac.as_str().parse::<i64>().ok()?,
        None => 0,
    };

    let magnitude = whole.checked_mul(100)?.checked_add(minor)?;
    if caps.name("sign").is_some() {
        Some(-magnitude)
    } else {
        Some(magnitude)
    }
}

/// Normalize a raw "DD/MM/YYYY" or "D Month YYYY" date into a fixed ISO
/// calendar-date string. Out-of-range day/month or an unrecognized month
/// name yields `None`.
pub fn parse_date_iso(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let parsed = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d %B %Y"))
        .ok()?;
    Some(parsed.format("%Y-%m-%d").to_string())
}
