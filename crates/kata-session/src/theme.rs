use kata_core::settings::InitialTheme;

/// The two fixed color schemes. Held in memory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Dark,
    Light,
}

/// Hex colors for each widget role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub accent: &'static str,
    pub on_accent: &'static str,
    pub entry: &'static str,
    pub border: &'static str,
}

pub const DARK: Palette = Palette {
    background: "#0f172a",
    card: "#111827",
    text: "#e5e7eb",
    muted: "#9ca3af",
    accent: "#818cf8",
    on_accent: "#ffffff",
    entry: "#1f2933",
    border: "#374151",
};

pub const LIGHT: Palette = Palette {
    background: "#f3f4f6",
    card: "#ffffff",
    text: "#111827",
    muted: "#6b7280",
    accent: "#6366f1",
    on_accent: "#ffffff",
    entry: "#f9fafb",
    border: "#e5e7eb",
};

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

impl From<InitialTheme> for Theme {
    fn from(t: InitialTheme) -> Self {
        match t {
            InitialTheme::Dark => Self::Dark,
            InitialTheme::Light => Self::Light,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_palettes_differ() {
        assert_eq!(Theme::Dark.palette().background, "#0f172a");
        assert_eq!(Theme::Light.palette().background, "#f3f4f6");
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
    }

    #[test]
    fn test_colors_are_hex() {
        for p in [&DARK, &LIGHT] {
            for c in [
                p.background,
                p.card,
                p.text,
                p.muted,
                p.accent,
                p.on_accent,
                p.entry,
                p.border,
            ] {
                assert!(c.len() == 7 && c.starts_with('#'), "bad color {c}");
                assert!(c[1..].chars().all(|ch| ch.is_ascii_hexdigit()));
            }
        }
    }
}
