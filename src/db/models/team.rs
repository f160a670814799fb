#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Team {
    pub team_name: String,
    /// Hex color, e.g. `#FF5733`
    pub color: String,
    /// Path of the banner image on disk
    pub banner: String,
    pub rank: Option<String>,
    /// Open roster spots are shown as trialing
    pub trialing: bool,
}

impl Team {
    /// Parse the stored hex color into an RGB value
    pub fn color_value(&self) -> Option<u32> {
        parse_hex_color(&self.color)
    }
}

/// Parse `#RRGGBB`, `RRGGBB` or `0xRRGGBB`
pub fn parse_hex_color(raw: &str) -> Option<u32> {
    let hex = raw
        .trim()
        .trim_start_matches('#')
        .trim_start_matches("0x")
        .trim_start_matches("0X");

    if hex.len() != 6 {
        return None;
    }

    u32::from_str_radix(hex, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FF5733"), Some(0xFF5733));
        assert_eq!(parse_hex_color("ff5733"), Some(0xFF5733));
        assert_eq!(parse_hex_color("0x00AAFF"), Some(0x00AAFF));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("purple"), None);
    }
}
