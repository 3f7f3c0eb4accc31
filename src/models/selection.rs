use serde::Deserialize;

/// Title the user is currently looking at.
///
/// Request-scoped: it travels in the page's query string and is never stored server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<String>,
}

impl SelectionState {
    pub fn with_selected(title: impl Into<String>) -> Self {
        Self {
            selected: Some(title.into()),
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}

/// User interactions the page controller reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The submit button was pressed with the select box showing this title
    Submit(String),
    /// A recommendation card was clicked
    PickRecommendation(String),
    /// Plain page load
    Refresh,
}

/// Raw query string of the page
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Value of the select box, sent by the submit button
    pub movie: Option<String>,
    /// Title of a clicked recommendation card
    pub pick: Option<String>,
}

impl PageQuery {
    /// A card click takes precedence over the select box.
    pub fn into_event(self) -> UiEvent {
        match (self.pick, self.movie) {
            (Some(title), _) if !title.trim().is_empty() => UiEvent::PickRecommendation(title),
            (_, Some(title)) if !title.trim().is_empty() => UiEvent::Submit(title),
            _ => UiEvent::Refresh,
        }
    }
}
