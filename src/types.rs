//! Shared types for the todoboard application.
//!
//! This module contains the crate-wide Result alias, the view filters, the
//! board statistics and the subcommands understood by the CLI.
use std::{fmt, path::PathBuf, str::FromStr};

use clap::Subcommand;

use crate::{Category, Todo, TodoError};

/// A specialized Result type for todoboard operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Which todos a view shows
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    /// Everything, newest first
    #[default]
    All,
    /// Todos created by the current actor
    Mine,
    /// Todos marked public
    Public,
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterMode::All => "all",
            FilterMode::Mine => "mine",
            FilterMode::Public => "public",
        };
        f.write_str(name)
    }
}

impl FromStr for FilterMode {
    type Err = TodoError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(FilterMode::All),
            "mine" => Ok(FilterMode::Mine),
            "public" => Ok(FilterMode::Public),
            other => Err(TodoError::InvalidInput {
                message: format!("Unknown filter '{}', expected all, mine or public", other),
            }),
        }
    }
}

/// Summary figures shown under every list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardStats {
    /// Number of todos in the view
    pub total: usize,
    /// How many of them are completed
    pub completed: usize,
    /// Mean progress, rounded to the nearest whole percent with halves going up (0 when empty)
    pub average_progress: i64,
}

impl BoardStats {
    pub fn from_todos(todos: &[&Todo]) -> Self {
        let total = todos.len();
        let completed = todos.iter().filter(|t| t.completed).count();
        let average_progress = if total == 0 {
            0
        } else {
            let sum: i64 = todos.iter().map(|t| i64::from(t.progress)).sum();
            (sum as f64 / total as f64 + 0.5).floor() as i64
        };

        BoardStats {
            total,
            completed,
            average_progress,
        }
    }
}

/// Available subcommands for the todoboard application
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// List todos
    List {
        /// Which todos to show (all, mine, public)
        #[clap(short, long, default_value = "all")]
        filter: FilterMode,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,

        /// Show descriptions and comments
        #[clap(short, long)]
        detailed: bool,
    },

    /// Show a single todo with its comments
    Show {
        /// ID of the todo
        id: String,

        /// Format output as raw JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Create a new todo
    Add {
        /// Title of the todo
        #[clap(short = 'T', long)]
        title: String,

        /// Optional longer description
        #[clap(short, long)]
        description: Option<String>,

        /// Category (work, personal, health, learning)
        #[clap(short = 'C', long)]
        category: Option<Category>,

        /// Share the todo publicly
        #[clap(long, conflicts_with = "private")]
        public: bool,

        /// Keep the todo private
        #[clap(long)]
        private: bool,
    },

    /// Flip a todo between done and not done
    Toggle {
        /// ID of the todo
        id: String,
    },

    /// Set the progress percentage of a todo
    Progress {
        /// ID of the todo
        id: String,

        /// New progress value (0-100)
        #[clap(value_parser = clap::value_parser!(i32).range(0..=100))]
        progress: i32,
    },

    /// Like a todo
    Like {
        /// ID of the todo
        id: String,
    },

    /// Comment on a todo
    Comment {
        /// ID of the todo
        id: String,

        /// Comment text
        text: String,
    },

    /// Show totals for a view
    Stats {
        /// Which todos to count (all, mine, public)
        #[clap(short, long, default_value = "all")]
        filter: FilterMode,
    },

    /// Write a view to a JSON file
    Export {
        /// Path of the file to write
        #[clap(short, long)]
        output: PathBuf,

        /// Which todos to export (all, mine, public)
        #[clap(short, long, default_value = "all")]
        filter: FilterMode,
    },

    /// Configuration management
    Config {
        /// Show current configuration
        #[clap(short = 'S', long)]
        show: bool,

        /// Update a configuration setting (key=value)
        #[clap(short, long)]
        set: Option<String>,

        /// Reset configuration to defaults
        #[clap(short, long)]
        reset: bool,
    },

    /// Start an interactive session that keeps the board in memory
    Shell,
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::NewTodo;

    fn todo_with(progress: i32, completed: bool) -> Todo {
        let mut todo = Todo::new(
            progress.to_string(),
            NewTodo::new("t", Category::Work),
            "anonymous".to_string(),
            Utc::now(),
        );
        todo.progress = progress;
        todo.completed = completed;
        todo
    }

    #[test]
    fn filter_mode_parses() {
        assert_eq!("Public".parse::<FilterMode>().unwrap(), FilterMode::Public);
        assert_eq!("mine".parse::<FilterMode>().unwrap(), FilterMode::Mine);
        assert!("friends".parse::<FilterMode>().is_err());
        assert_eq!(FilterMode::default().to_string(), "all");
    }

    #[test]
    fn stats_of_empty_view_are_zero() {
        let stats = BoardStats::from_todos(&[]);
        assert_eq!(
            stats,
            BoardStats {
                total: 0,
                completed: 0,
                average_progress: 0
            }
        );
    }

    #[test]
    fn stats_round_average_progress() {
        let a = todo_with(100, true);
        let b = todo_with(0, false);
        let c = todo_with(0, false);
        let stats = BoardStats::from_todos(&[&a, &b, &c]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.average_progress, 33);

        let d = todo_with(1, false);
        let half = BoardStats::from_todos(&[&a, &d]);
        // 50.5 rounds up
        assert_eq!(half.average_progress, 51);
    }

    #[test]
    fn negative_half_rounds_toward_positive() {
        let a = todo_with(-1, false);
        let b = todo_with(0, false);
        assert_eq!(BoardStats::from_todos(&[&a, &b]).average_progress, 0);

        let c = todo_with(-3, false);
        assert_eq!(BoardStats::from_todos(&[&c, &b]).average_progress, -1);
    }
}
