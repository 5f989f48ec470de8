#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Class the page root carries in dark mode; light mode carries none.
    pub fn root_class(self) -> Option<&'static str> {
        match self {
            Theme::Dark => Some("dark"),
            Theme::Light => None,
        }
    }
}

/// Current theme choice. A stored preference wins over the system setting;
/// persisting the preference is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeState {
    current: Theme,
}

impl ThemeState {
    pub fn resolve(stored: Option<Theme>, system_prefers_dark: bool) -> Self {
        let current = stored.unwrap_or(if system_prefers_dark {
            Theme::Dark
        } else {
            Theme::Light
        });
        Self { current }
    }

    pub fn current(&self) -> Theme {
        self.current
    }

    /// Flips the theme and returns the new value for the caller to persist.
    pub fn toggle(&mut self) -> Theme {
        self.current = match self.current {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        self.current
    }
}
