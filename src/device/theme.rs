/// Light/dark color scheme of the current page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// Dark exactly on the listed routes.
    pub fn for_route(path: &str, dark_routes: &[String]) -> Self {
        if dark_routes.iter().any(|r| r == path) {
            Self::Dark
        } else {
            Self::Light
        }
    }

    /// Fill for the transition overlay: it contrasts with the page it covers.
    pub fn overlay_fill(self) -> &'static str {
        match self {
            Self::Dark => "var(--color-white)",
            Self::Light => "var(--color-black)",
        }
    }
}
