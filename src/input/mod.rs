//! Keyboard paging

/// Keys that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagingKey {
    Left,
    Right,
}

impl PagingKey {
    /// Map a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Left),
            "ArrowRight" => Some(Self::Right),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Left => "ArrowLeft",
            Self::Right => "ArrowRight",
        }
    }
}

/// What kind of element holds focus when a key arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    TextArea,
    /// `<input type="text">` only.
    TextInput,
    #[default]
    Other,
}

impl Focus {
    /// Classify an element by tag name and, for inputs, its `type`.
    pub fn from_element(tag_name: &str, input_type: Option<&str>) -> Self {
        if tag_name.eq_ignore_ascii_case("textarea") {
            Focus::TextArea
        } else if tag_name.eq_ignore_ascii_case("input")
            && input_type.is_some_and(|t| t.eq_ignore_ascii_case("text"))
        {
            Focus::TextInput
        } else {
            Focus::Other
        }
    }

    /// Arrow keys belong to the text control while editing.
    pub fn suppresses_paging(self) -> bool {
        matches!(self, Focus::TextArea | Focus::TextInput)
    }
}

/// Page a key press should move to, or `None` to ignore it.
pub fn route(key: PagingKey, focus: Focus, current_page: u32, max_page: u32) -> Option<u32> {
    if focus.suppresses_paging() {
        return None;
    }
    match key {
        PagingKey::Left if current_page > 1 => Some(current_page - 1),
        PagingKey::Right if current_page < max_page => Some(current_page + 1),
        _ => None,
    }
}
