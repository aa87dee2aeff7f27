use csmeta_shared::Difficulty;

pub const ACCENT: &str = "#22c55e";
pub const SITE_HEADING: &str = "#eab308";
pub const MUTED: &str = "#9ca3af";

/// Format RGBA as a CSS color string.
pub fn rgba_css(r: u8, g: u8, b: u8, a: f64) -> String {
    format!("rgba({r},{g},{b},{a})")
}

/// Inline style for a difficulty pill: tinted background, bright text.
pub fn difficulty_badge_style(difficulty: Difficulty) -> String {
    let ((tr, tg, tb), (br, bg, bb)) = difficulty.badge_rgb();
    format!(
        "color: {}; background: {}; padding: 4px 8px; border-radius: 4px; font-size: 0.85rem;",
        rgba_css(tr, tg, tb, 1.0),
        rgba_css(br, bg, bb, 0.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_rgba() {
        assert_eq!(rgba_css(34, 197, 94, 0.2), "rgba(34,197,94,0.2)");
    }

    #[test]
    fn badge_uses_tinted_background() {
        let style = difficulty_badge_style(Difficulty::Hard);
        assert!(style.contains("color: rgba(248,113,113,1)"));
        assert!(style.contains("background: rgba(239,68,68,0.2)"));
    }
}
