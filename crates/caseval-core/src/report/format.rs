use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Currency with thousands separators and no decimal places: `$1,234,567`.
pub fn currency(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let bytes = digits.as_bytes();
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*b as char);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// A fraction rendered as a percentage to one decimal place: 0.052 -> `5.2%`.
pub fn percent_of_rate(rate: Decimal) -> String {
    percent(rate * dec!(100))
}

/// A value already in percentage points, to one decimal place.
pub fn percent(points: Decimal) -> String {
    format!("{:.1}%", points.round_dp(1))
}

/// Signed percentage points, always carrying a sign: `+1.5%` / `-1.5%`.
pub fn signed_percent(points: Decimal) -> String {
    let rounded = points.round_dp(1);
    if rounded < Decimal::ZERO {
        format!("{rounded:.1}%")
    } else {
        // abs() keeps a value that rounded up to zero from printing as -0.0
        format!("+{:.1}%", rounded.abs())
    }
}

/// A plain ratio to two decimal places.
pub fn ratio(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(currency(dec!(0)), "$0");
        assert_eq!(currency(dec!(954)), "$954");
        assert_eq!(currency(dec!(1000)), "$1,000");
        assert_eq!(currency(dec!(29500000)), "$29,500,000");
        assert_eq!(currency(dec!(-1234567)), "-$1,234,567");
    }

    #[test]
    fn test_currency_rounds_to_whole() {
        assert_eq!(currency(dec!(954545.45)), "$954,545");
        assert_eq!(currency(dec!(1999.6)), "$2,000");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent_of_rate(dec!(0.05)), "5.0%");
        assert_eq!(percent_of_rate(dec!(0.125)), "12.5%");
        assert_eq!(percent(dec!(-2)), "-2.0%");
        assert_eq!(signed_percent(dec!(2)), "+2.0%");
        assert_eq!(signed_percent(dec!(-2)), "-2.0%");
        assert_eq!(signed_percent(Decimal::ZERO), "+0.0%");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(dec!(2.5)), "2.50");
        assert_eq!(ratio(dec!(1.666)), "1.67");
    }
}
