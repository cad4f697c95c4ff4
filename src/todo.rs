//! Core data structures for the todoboard application.
//!
//! This module contains the records held by the store: todos, their
//! comments, and the closed set of categories a todo can belong to.
use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::TodoError;

/// The category a todo is filed under
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    #[default]
    Personal,
    Health,
    Learning,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Health => "health",
            Category::Learning => "learning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TodoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "work" => Ok(Category::Work),
            "personal" => Ok(Category::Personal),
            "health" => Ok(Category::Health),
            "learning" => Ok(Category::Learning),
            other => Err(TodoError::InvalidInput {
                message: format!(
                    "Unknown category '{}', expected one of: work, personal, health, learning",
                    other
                ),
            }),
        }
    }
}

/// A comment left on a todo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Unique identifier for the comment
    pub id: String,
    /// Comment body, stored exactly as submitted
    pub text: String,
    /// Display identifier of whoever wrote it
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// Carried in the model; nothing increments it yet
    pub likes: u64,
}

/// Represents a single todo on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique identifier, assigned once at creation
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    /// Percentage done. Nominally 0..=100, but stored as given.
    pub progress: i32,
    pub category: Category,
    pub likes: u64,
    /// Comments in the order they were added
    pub comments: Vec<Comment>,
    /// Display identifier of the author (shortened address or `anonymous`)
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// Refreshed by completion and progress edits
    pub updated_at: DateTime<Utc>,
    /// Visibility chosen at creation
    pub is_public: bool,
}

impl Todo {
    /// Creates a fresh, untouched todo
    pub fn new(id: String, input: NewTodo, created_by: String, now: DateTime<Utc>) -> Self {
        let description = Some(input.description).filter(|d| !d.is_empty());

        Todo {
            id,
            title: input.title,
            description,
            completed: false,
            progress: 0,
            category: input.category,
            likes: 0,
            comments: Vec::new(),
            created_by,
            created_at: now,
            updated_at: now,
            is_public: input.is_public,
        }
    }
}

/// The fields a caller supplies when creating a todo
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub is_public: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        NewTodo {
            title: title.into(),
            description: String::new(),
            category,
            is_public: true,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn public(mut self, is_public: bool) -> Self {
        self.is_public = is_public;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_parses_case_insensitively() {
        assert_eq!("Work".parse::<Category>().unwrap(), Category::Work);
        assert_eq!(" health ".parse::<Category>().unwrap(), Category::Health);
        assert!("chores".parse::<Category>().is_err());
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Learning).unwrap();
        assert_eq!(json, "\"learning\"");
    }

    #[test]
    fn new_todo_starts_untouched() {
        let now = Utc::now();
        let input = NewTodo::new("Ship it", Category::Work)
            .description("before friday")
            .public(false);
        let todo = Todo::new("42".to_string(), input, "anonymous".to_string(), now);

        assert!(!todo.completed);
        assert_eq!(todo.progress, 0);
        assert_eq!(todo.likes, 0);
        assert!(todo.comments.is_empty());
        assert!(!todo.is_public);
        assert_eq!(todo.description.as_deref(), Some("before friday"));
        assert_eq!(todo.created_at, todo.updated_at);
    }

    #[test]
    fn empty_description_is_stored_as_none() {
        let todo = Todo::new(
            "7".to_string(),
            NewTodo::new("X", Category::Personal),
            "anonymous".to_string(),
            Utc::now(),
        );
        assert_eq!(todo.description, None);
    }
}
