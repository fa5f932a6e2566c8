use std::fmt;

/// The four root screens. Exactly one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Main,
    Details,
    Prod,
}

impl View {
    pub const NAV: [View; 3] = [View::Main, View::Details, View::Prod];

    pub fn token(self) -> &'static str {
        match self {
            View::Login => "login",
            View::Main => "main",
            View::Details => "details",
            View::Prod => "prod",
        }
    }

    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "login" => Some(View::Login),
            "main" => Some(View::Main),
            "details" => Some(View::Details),
            "prod" => Some(View::Prod),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Login => "Sign in",
            View::Main => "Tasks",
            View::Details => "Details",
            View::Prod => "Productivity",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            View::Login => "♟",
            View::Main => "♜",
            View::Details => "♝",
            View::Prod => "♛",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_round_trip() {
        for view in [View::Login, View::Main, View::Details, View::Prod] {
            assert_eq!(View::parse(view.token()), Some(view));
        }
        assert_eq!(View::parse("settings"), None);
    }
}
