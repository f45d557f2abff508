use serde::{Deserialize, Serialize};

/// What the assistant hands back for every command.
///
/// `speak = false` marks feedback that is visual or physical (media keys,
/// lights, a page opening); the caller shows `text` but does not voice it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub text: String,
    pub speak: bool,
}

impl Response {
    pub fn new(text: impl Into<String>, speak: bool) -> Self {
        Self {
            text: text.into(),
            speak,
        }
    }

    /// Response read aloud to the user
    pub fn spoken(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// Response shown without speech
    pub fn silent(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }

    /// Empty silent response, used when the action itself is the feedback
    pub fn done() -> Self {
        Self::silent(String::new())
    }
}
