use leptos::prelude::*;

/// Stroke glyphs drawn on a 24x24 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Check,
    Close,
    Crosshair,
    Filter,
    LogIn,
    LogOut,
    Map,
    MapPin,
    Play,
    Plus,
    Search,
}

impl Glyph {
    #[cfg(test)]
    pub const ALL: [Glyph; 11] = [
        Self::Check,
        Self::Close,
        Self::Crosshair,
        Self::Filter,
        Self::LogIn,
        Self::LogOut,
        Self::Map,
        Self::MapPin,
        Self::Play,
        Self::Plus,
        Self::Search,
    ];

    pub fn body(self) -> &'static str {
        match self {
            Self::Check => r#"<path d="M20 6 9 17l-5-5"/>"#,
            Self::Close => r#"<path d="M18 6 6 18"/><path d="m6 6 12 12"/>"#,
            Self::Crosshair => {
                r#"<circle cx="12" cy="12" r="10"/><line x1="22" x2="18" y1="12" y2="12"/><line x1="6" x2="2" y1="12" y2="12"/><line x1="12" x2="12" y1="6" y2="2"/><line x1="12" x2="12" y1="22" y2="18"/>"#
            }
            Self::Filter => r#"<polygon points="22 3 2 3 10 12.46 10 19 14 21 14 12.46 22 3"/>"#,
            Self::LogIn => {
                r#"<path d="M15 3h4a2 2 0 0 1 2 2v14a2 2 0 0 1-2 2h-4"/><polyline points="10 17 15 12 10 7"/><line x1="15" x2="3" y1="12" y2="12"/>"#
            }
            Self::LogOut => {
                r#"<path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4"/><polyline points="16 17 21 12 16 7"/><line x1="21" x2="9" y1="12" y2="12"/>"#
            }
            Self::Map => {
                r#"<polygon points="3 6 9 3 15 6 21 3 21 18 15 21 9 18 3 21"/><line x1="9" x2="9" y1="3" y2="18"/><line x1="15" x2="15" y1="6" y2="21"/>"#
            }
            Self::MapPin => {
                r#"<path d="M20 10c0 6-8 12-8 12s-8-6-8-12a8 8 0 0 1 16 0Z"/><circle cx="12" cy="10" r="3"/>"#
            }
            Self::Play => r#"<polygon points="6 3 20 12 6 21 6 3"/>"#,
            Self::Plus => r#"<path d="M5 12h14"/><path d="M12 5v14"/>"#,
            Self::Search => r#"<circle cx="11" cy="11" r="8"/><path d="m21 21-4.3-4.3"/>"#,
        }
    }
}

pub fn icon(glyph: Glyph, size: u32, color: &'static str) -> impl IntoView {
    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            width=size.to_string()
            height=size.to_string()
            viewBox="0 0 24 24"
            fill="none"
            stroke=color
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            style="flex-shrink: 0; display: block;"
            inner_html=glyph.body()
        />
    }
}

pub fn check(size: u32, color: &'static str) -> impl IntoView {
    icon(Glyph::Check, size, color)
}

pub fn close(size: u32, color: &'static str) -> impl IntoView {
    icon(Glyph::Close, size, color)
}

#[cfg(test)]
mod tests {
    use super::Glyph;

    #[test]
    fn every_glyph_is_self_closing_markup() {
        for glyph in Glyph::ALL {
            let body = glyph.body();
            assert!(body.starts_with('<'), "{glyph:?}");
            assert!(body.ends_with("/>"), "{glyph:?}");
            assert_eq!(
                body.matches('<').count(),
                body.matches("/>").count(),
                "{glyph:?}"
            );
        }
    }
}
