//! Fortune: the value served by the fortune service.

use serde::{Deserialize, Serialize};

/// A fortune. Identity is `id`; unknown JSON fields are ignored when decoding.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fortune {
    pub id: i64,
    pub text: String,
}

impl Fortune {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

impl std::fmt::Display for Fortune {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}: {}", self.id, self.text)
    }
}
