/// Subject and indicator catalogs shared across the codebase.
/// Subject codes are ISO-3 country codes accepted by the World Bank API.

// Primary subject; every chart plots this country's series first
pub const PRIMARY_SUBJECT: &str = "ETH";

// Comparison subjects offered on the control surface
pub const KENYA: &str = "KEN";
pub const SUDAN: &str = "SDN";
pub const SOUTH_SUDAN: &str = "SSD";
pub const DJIBOUTI: &str = "DJI";

// Indicator codes (World Bank series identifiers)
pub const GDP: &str = "NY.GDP.MKTP.CD";
pub const GDP_GROWTH: &str = "NY.GDP.MKTP.KD.ZG";
pub const INFLATION: &str = "FP.CPI.TOTL.ZG";
pub const UNEMPLOYMENT: &str = "SL.UEM.TOTL.ZS";

// Earliest year the API carries data for; used by the "all" window
pub const EARLIEST_YEAR: i32 = 1960;

// Chart series colors (primary green, comparison red)
pub const PRIMARY_COLOR: (u8, u8, u8) = (0x04, 0x6a, 0x38);
pub const COMPARISON_COLOR: (u8, u8, u8) = (0xda, 0x29, 0x1c);

/// Resolve a subject code to its display name. Unknown codes pass
/// through unchanged rather than erroring.
pub fn subject_display_name(code: &str) -> String {
    match code {
        PRIMARY_SUBJECT => "Ethiopia".to_string(),
        KENYA => "Kenya".to_string(),
        SUDAN => "Sudan".to_string(),
        SOUTH_SUDAN => "South Sudan".to_string(),
        DJIBOUTI => "Djibouti".to_string(),
        other => other.to_string(),
    }
}

/// Convert a user-friendly indicator alias to the World Bank code.
/// Codes given directly pass through unchanged.
pub fn indicator_alias_to_code(alias: &str) -> String {
    match alias {
        "gdp" => GDP.to_string(),
        "gdp_growth" => GDP_GROWTH.to_string(),
        "inflation" => INFLATION.to_string(),
        "unemployment" => UNEMPLOYMENT.to_string(),
        other => other.to_string(),
    }
}

/// Get all supported comparison subject codes
pub fn get_supported_subjects() -> Vec<&'static str> {
    vec![KENYA, SUDAN, SOUTH_SUDAN, DJIBOUTI]
}

/// Get all cataloged (alias, code) indicator pairs
pub fn get_cataloged_indicators() -> Vec<(&'static str, &'static str)> {
    vec![
        ("gdp", GDP),
        ("gdp_growth", GDP_GROWTH),
        ("inflation", INFLATION),
        ("unemployment", UNEMPLOYMENT),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_subject_codes_resolve_to_display_names() {
        assert_eq!(subject_display_name("ETH"), "Ethiopia");
        assert_eq!(subject_display_name("SSD"), "South Sudan");
    }

    #[test]
    fn unknown_subject_code_passes_through() {
        assert_eq!(subject_display_name("XYZ"), "XYZ");
    }

    #[test]
    fn indicator_aliases_map_to_codes() {
        assert_eq!(indicator_alias_to_code("gdp"), GDP);
        assert_eq!(indicator_alias_to_code("NY.GDP.MKTP.CD"), GDP);
    }
}
