//! Board model.

use chrono::{DateTime, Utc};

/// Board entity representing a named forum section.
#[derive(Debug, Clone)]
pub struct Board {
    /// Unique board ID.
    pub id: i64,
    /// Board name (unique).
    pub name: String,
    /// Board description.
    pub description: String,
    /// Board creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Data for creating a new board.
#[derive(Debug, Clone)]
pub struct NewBoard {
    /// Board name.
    pub name: String,
    /// Board description.
    pub description: String,
}

impl NewBoard {
    /// Create a new board with an empty description.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_builder() {
        let board = NewBoard::new("general").with_description("Anything goes");
        assert_eq!(board.name, "general");
        assert_eq!(board.description, "Anything goes");
        assert!(NewBoard::new("empty").description.is_empty());
    }
}
