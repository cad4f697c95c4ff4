//! The records every board starts with.
use chrono::{DateTime, NaiveDate, Utc};

use crate::{Category, Comment, Todo};

/// Midnight UTC on the given day
fn day(year: i32, month: u32, date: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, date)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

fn comment(id: &str, text: &str, author: &str, created_at: DateTime<Utc>, likes: u64) -> Comment {
    Comment {
        id: id.to_string(),
        text: text.to_string(),
        author: author.to_string(),
        created_at,
        likes,
    }
}

/// The three sample todos the store is created with
pub fn seed_todos() -> Vec<Todo> {
    vec![
        Todo {
            id: "1".to_string(),
            title: "Complete OnchainKit Integration".to_string(),
            description: Some("Integrate wallet connection and identity components".to_string()),
            completed: false,
            progress: 75,
            category: Category::Work,
            likes: 12,
            comments: vec![comment(
                "1",
                "Looking forward to seeing this!",
                "alice.eth",
                day(2024, 1, 15),
                3,
            )],
            created_by: "dev.base".to_string(),
            created_at: day(2024, 1, 10),
            updated_at: day(2024, 1, 15),
            is_public: true,
        },
        Todo {
            id: "2".to_string(),
            title: "Daily Workout Routine".to_string(),
            description: Some("30 minutes of cardio and strength training".to_string()),
            completed: true,
            progress: 100,
            category: Category::Health,
            likes: 8,
            comments: Vec::new(),
            created_by: "fitness.base".to_string(),
            created_at: day(2024, 1, 12),
            updated_at: day(2024, 1, 15),
            is_public: true,
        },
        Todo {
            id: "3".to_string(),
            title: "Learn React Hooks".to_string(),
            description: Some("Master useState, useEffect, and custom hooks".to_string()),
            completed: false,
            progress: 60,
            category: Category::Learning,
            likes: 15,
            comments: vec![
                comment(
                    "2",
                    "Great choice! Hooks are powerful",
                    "react.dev",
                    day(2024, 1, 14),
                    5,
                ),
                comment(
                    "3",
                    "Check out the official docs!",
                    "coder.base",
                    day(2024, 1, 14),
                    2,
                ),
            ],
            created_by: "student.eth".to_string(),
            created_at: day(2024, 1, 8),
            updated_at: day(2024, 1, 14),
            is_public: true,
        },
    ]
}
