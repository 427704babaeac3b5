use series_model::{DEFAULT_THEME, RouteContext, Theme};

/// Query parameter that overrides the document's theme for one activation.
pub const THEME_QUERY_PARAM: &str = "theme";

/// Pick the activation's theme: a non-empty `theme` query parameter, then
/// the document default, then [`DEFAULT_THEME`].
pub fn resolve_theme(route: &RouteContext, document_default: Option<&str>) -> Theme {
    let non_empty = |value: &&str| !value.is_empty();

    route
        .query(THEME_QUERY_PARAM)
        .filter(non_empty)
        .or_else(|| document_default.filter(non_empty))
        .map(Theme::from)
        .unwrap_or_else(|| Theme::from(DEFAULT_THEME))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> RouteContext {
        RouteContext::new("", ["go"])
    }

    #[test]
    fn query_overrides_document_default() {
        let theme = resolve_theme(&route().with_query("theme", "purple"), Some("orange"));
        assert!(theme.is_purple());

        let theme = resolve_theme(&route().with_query("theme", "blue"), Some("purple"));
        assert!(!theme.is_purple());
        assert_eq!(theme.as_str(), "blue");
    }

    #[test]
    fn document_default_applies_without_query() {
        assert!(resolve_theme(&route(), Some("purple")).is_purple());
        assert!(resolve_theme(&route().with_query("theme", ""), Some("purple")).is_purple());
    }

    #[test]
    fn falls_back_to_orange() {
        assert_eq!(resolve_theme(&route(), None), Theme::Orange);
        assert_eq!(resolve_theme(&route(), Some("")), Theme::Orange);
    }
}
