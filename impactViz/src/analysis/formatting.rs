// Locale-independent number formatting: ',' groups thousands, '.' marks decimals

pub const UNIT_TONNES: &str = "ton/año";
pub const UNIT_EMISSIONS: &str = "tCO₂e/año";

/// Format with a fixed number of decimals and comma thousands separators
pub fn format_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    // "-0.00" is not worth a sign
    if value.is_sign_negative() && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

pub fn format_tonnage(value: f64, unit: &str) -> String {
    format!("{:.2} {}", value, unit)
}

pub fn format_currency(value: f64) -> String {
    format!("USD {}", format_thousands(value, 2))
}

pub fn format_count(value: u32) -> String {
    value.to_string()
}
