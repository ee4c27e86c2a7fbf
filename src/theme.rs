use libadwaita::ColorScheme;

/// Light/dark presentation flag. Only affects colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn color_scheme(self) -> ColorScheme {
        match self {
            Theme::Light => ColorScheme::ForceLight,
            Theme::Dark => ColorScheme::ForceDark,
        }
    }

    /// CSS class carried by themed widgets, see `style.css`.
    pub fn css_class(self) -> &'static str {
        match self {
            Theme::Light => "theme-light",
            Theme::Dark => "theme-dark",
        }
    }

    pub fn other_css_class(self) -> &'static str {
        self.toggled().css_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_twice_returns_to_start() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::default().toggled().toggled(), Theme::Light);
    }

    #[test]
    fn maps_to_forced_color_scheme() {
        assert_eq!(Theme::Dark.color_scheme(), ColorScheme::ForceDark);
        assert_eq!(Theme::Light.color_scheme(), ColorScheme::ForceLight);
    }

    #[test]
    fn css_classes_differ_per_theme() {
        assert_eq!(Theme::Dark.css_class(), "theme-dark");
        assert_eq!(Theme::Dark.other_css_class(), "theme-light");
        assert_ne!(Theme::Light.css_class(), Theme::Dark.css_class());
    }
}
