use std::fmt;

/// A user interaction on a named page element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UiEvent {
    Click(String),
    Submit(String),
}

impl UiEvent {
    pub fn click(id: &str) -> UiEvent {
        UiEvent::Click(id.to_string())
    }

    pub fn submit(id: &str) -> UiEvent {
        UiEvent::Submit(id.to_string())
    }
}

impl fmt::Display for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UiEvent::Click(id) => write!(f, "click on `{}`", id),
            UiEvent::Submit(id) => write!(f, "submit on `{}`", id),
        }
    }
}
