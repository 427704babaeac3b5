/// What the detail section should show once the pipeline has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome<N> {
    /// Empty the section.
    Cleared,
    /// Attach the produced view.
    Rendered(N),
    /// Replace the section's content with a user-facing message.
    Error(String),
}

impl<N> DetailOutcome<N> {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            DetailOutcome::Cleared => "cleared",
            DetailOutcome::Rendered(_) => "rendered",
            DetailOutcome::Error(_) => "error",
        }
    }
}

/// Handle to a navigation link whose visibility can be toggled.
pub trait NavLink: Send + Sync + 'static {
    /// Apply or remove the hidden presentation flag.
    fn set_hidden(&self, hidden: bool);

    /// Whether the hidden flag is currently applied.
    fn is_hidden(&self) -> bool;
}

/// The hosting document's mount points.
pub trait PageDocument: Send + Sync {
    /// Node type accepted by the document.
    type Node;
    /// Handle type returned for nav link lookups.
    type NavLink: NavLink;

    /// Append a node to the application root.
    fn append_to_root(&self, node: Self::Node);

    /// Place the navigation bar in its container.
    fn mount_navigation(&self, nav_bar: Self::Node);

    /// Look up a link inside the navigation container by element id.
    fn nav_link(&self, id: &str) -> Option<Self::NavLink>;

    /// Apply the pipeline's outcome to the detail section.
    fn render_detail(&self, outcome: DetailOutcome<Self::Node>);
}
