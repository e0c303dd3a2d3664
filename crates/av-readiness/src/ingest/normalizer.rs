pub(crate) fn normalize_header(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let collapsed = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.to_ascii_lowercase()
}

/// Renders an identifier the way it is keyed on the map.
///
/// Numeric FIPS codes often arrive as floats (`37183.0`); those are printed
/// without the fractional part.
pub(crate) fn identifier_from_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

pub(crate) fn identifier_from_text(value: &str) -> String {
    let trimmed = value.trim();
    match trimmed.parse::<f64>() {
        Ok(number) if trimmed.contains('.') => identifier_from_number(number),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_lose_invisible_characters_and_case() {
        assert_eq!(normalize_header("\u{feff}GEOID"), "geoid");
        assert_eq!(normalize_header("  County\u{200b}   Name "), "county name");
    }

    #[test]
    fn float_fips_codes_drop_the_decimal_part() {
        assert_eq!(identifier_from_number(37183.0), "37183");
        assert_eq!(identifier_from_text(" 37183.0 "), "37183");
        assert_eq!(identifier_from_text("37183052101"), "37183052101");
        assert_eq!(identifier_from_text("0500000US37183"), "0500000US37183");
    }
}
