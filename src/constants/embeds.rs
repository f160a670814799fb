use serenity::all::{Colour, CreateEmbed};

use crate::db::models::Team;

// ============================================================================
// Color Palette
// ============================================================================

/// Community brand color
pub const PRIMARY_COLOR: Colour = Colour::from_rgb(155, 89, 182);

/// Success color - Emerald green
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(16, 185, 129);

/// Error color
pub const ERROR_COLOR: Colour = Colour::new(0xE02B2B);

/// Warning color - Amber
pub const WARNING_COLOR: Colour = Colour::from_rgb(245, 158, 11);

// ============================================================================
// Text Formatting
// ============================================================================

/// Section divider (thin line)
pub const DIVIDER: &str = "───────────────────────";

/// Bullet point character
pub const BULLET: &str = "•";

// ============================================================================
// Embed Builders
// ============================================================================

/// Create a standard/primary embed
pub fn standard_embed() -> CreateEmbed {
    CreateEmbed::new().color(PRIMARY_COLOR)
}

/// Create a success embed
pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

/// Create an error embed
pub fn error_embed() -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR)
}

/// Create a warning embed
pub fn warning_embed() -> CreateEmbed {
    CreateEmbed::new().color(WARNING_COLOR)
}

/// Embed in a team's own color, falling back to the brand color
pub fn team_embed(team: &Team) -> CreateEmbed {
    let color = team.color_value().map(Colour::new).unwrap_or(PRIMARY_COLOR);
    CreateEmbed::new().color(color)
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Format a list of items with bullet points
pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    items
        .iter()
        .map(|item| format!("{} {}", BULLET, item.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_list() {
        assert_eq!(bullet_list(&["a", "b"]), "• a\n• b");
        assert_eq!(bullet_list::<&str>(&[]), "");
    }
}
