//! CLI module for the todoboard application
//!
//! This module turns parsed commands into calls on the todo store and
//! renders what comes back. It is the only place input is validated; the
//! store trusts whatever reaches it.
use std::{
    io::{BufRead, Write},
    path::{Path, PathBuf},
    sync::Arc,
};

use clap::{Parser, Subcommand};
use console::{style, StyledObject};
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::{
    validate_comment, validate_title, write_atomically, Actor, BoardStats, Category, Commands,
    Config, FilterMode, NewTodo, Result, Todo, TodoError, TodoStore,
};

const BAR_WIDTH: usize = 10;

/// One line typed into the interactive shell
#[derive(Parser, Debug)]
#[clap(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[clap(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand, Debug)]
enum ShellCommand {
    #[clap(flatten)]
    Board(Commands),

    /// Leave the shell
    #[clap(alias = "exit")]
    Quit,
}

/// Splits a shell line into words the way a POSIX shell would
fn split_line(line: &str) -> Result<Vec<String>> {
    shell_words::split(line.trim()).map_err(|e| TodoError::CommandError {
        message: format!("Could not parse line: {}", e),
    })
}

/// CLI Application handler - processes commands against one TodoStore
pub struct App {
    /// The board every command reads and edits
    store: Arc<Mutex<TodoStore>>,

    /// Application configuration
    config: Config,

    /// Who todos and comments are attributed to
    actor: Actor,

    /// Where `config` edits are written
    config_path: Option<PathBuf>,

    /// Whether to display verbose output
    verbose: bool,
}

impl App {
    /// Create a new CLI application around the given store
    pub fn new(store: Arc<Mutex<TodoStore>>, config: Config, actor: Actor, verbose: bool) -> Self {
        Self {
            store,
            config,
            actor,
            config_path: None,
            verbose,
        }
    }

    /// Sets the file the `config` command reads and writes
    pub fn with_config_path(mut self, path: Option<PathBuf>) -> Self {
        self.config_path = path;
        self
    }

    /// Run a command, writing to stdout and reading the shell from stdin
    pub async fn run(&self, command: Commands) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.run_with_io(command, &mut stdin.lock(), &mut stdout.lock())
            .await
    }

    /// Run a command against explicit input and output streams
    pub async fn run_with_io<R: BufRead, W: Write>(
        &self,
        command: Commands,
        input: &mut R,
        out: &mut W,
    ) -> Result<()> {
        match command {
            Commands::Shell => self.run_shell(input, out).await,
            other => self.execute(other, out).await,
        }
    }

    /// Execute a single board command
    pub async fn execute<W: Write>(&self, command: Commands, out: &mut W) -> Result<()> {
        info!("Running command: {:?}", command);

        match command {
            Commands::List {
                filter,
                json,
                detailed,
            } => self.list_todos(filter, json, detailed, out).await?,

            Commands::Show { id, json } => self.show_todo(&id, json, out).await?,

            Commands::Add {
                title,
                description,
                category,
                public,
                private,
            } => {
                self.add_todo(title, description, category, public, private, out)
                    .await?
            }

            Commands::Toggle { id } => self.toggle_todo(&id, out).await?,

            Commands::Progress { id, progress } => self.set_progress(&id, progress, out).await?,

            Commands::Like { id } => self.like_todo(&id, out).await?,

            Commands::Comment { id, text } => self.comment_on(&id, &text, out).await?,

            Commands::Stats { filter } => {
                let store = self.store.lock().await;
                let view = store.filter(filter, &self.actor);
                self.write_stats(&BoardStats::from_todos(&view), out)?;
            }

            Commands::Export { output, filter } => self.export(&output, filter, out).await?,

            Commands::Config { show, set, reset } => {
                self.handle_config(show, set, reset, out)?
            }

            Commands::Shell => {
                writeln!(out, "Already in a shell")?;
            }
        }

        Ok(())
    }

    /// Reads commands line by line until EOF or `quit`
    async fn run_shell<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<()> {
        info!("Starting interactive shell as {}", self.actor.display());
        writeln!(
            out,
            "todoboard shell - acting as {}. Type 'help' for commands, 'quit' to leave.",
            self.actor.display()
        )?;

        let mut line = String::new();
        loop {
            write!(out, "> ")?;
            out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("Shell input closed");
                break;
            }

            let words = match split_line(&line) {
                Ok(words) => words,
                Err(e) => {
                    warn!("Shell line rejected: {}", e);
                    writeln!(out, "Error: {}", e)?;
                    continue;
                }
            };
            if words.is_empty() {
                continue;
            }

            let parsed = match ShellLine::try_parse_from(&words) {
                Ok(parsed) => parsed,
                Err(e) => {
                    write!(out, "{}", e.render())?;
                    continue;
                }
            };

            match parsed.command {
                ShellCommand::Quit => break,
                ShellCommand::Board(command) => {
                    if let Err(e) = self.execute(command, out).await {
                        warn!("Shell command failed: {}", e);
                        writeln!(out, "Error: {}", e)?;
                    }
                }
            }
        }

        writeln!(out, "Bye")?;
        Ok(())
    }

    async fn list_todos<W: Write>(
        &self,
        filter: FilterMode,
        json: bool,
        detailed: bool,
        out: &mut W,
    ) -> Result<()> {
        let store = self.store.lock().await;
        let view = store.filter(filter, &self.actor);

        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
            return Ok(());
        }

        if view.is_empty() {
            let hint = match filter {
                FilterMode::Mine => "Create your first todo to get started!",
                _ => "Be the first to share a todo with the community!",
            };
            writeln!(out, "No todos yet. {}", hint)?;
        } else {
            self.display_todos_text(&view, detailed, out)?;
        }

        writeln!(out)?;
        self.write_stats(&BoardStats::from_todos(&view), out)
    }

    async fn show_todo<W: Write>(&self, id: &str, json: bool, out: &mut W) -> Result<()> {
        let store = self.store.lock().await;
        let Some(todo) = store.get(id) else {
            return self.report_missing(id, out);
        };

        if json {
            writeln!(out, "{}", serde_json::to_string_pretty(todo)?)?;
        } else {
            self.display_todo(todo, true, out)?;
        }
        Ok(())
    }

    async fn add_todo<W: Write>(
        &self,
        title: String,
        description: Option<String>,
        category: Option<Category>,
        public: bool,
        private: bool,
        out: &mut W,
    ) -> Result<()> {
        let title = validate_title(&title)?;
        let description = description
            .map(|d| d.trim().to_string())
            .unwrap_or_default();
        let category = category.unwrap_or(self.config.default_category);
        let is_public = if private {
            false
        } else {
            public || self.config.default_public
        };

        let input = NewTodo {
            title,
            description,
            category,
            is_public,
        };

        let mut store = self.store.lock().await;
        let todo = store.create(input, &self.actor);
        writeln!(out, "Todo created with ID: {}", todo.id)?;
        if self.verbose {
            self.display_todo(todo, true, out)?;
        }
        Ok(())
    }

    async fn toggle_todo<W: Write>(&self, id: &str, out: &mut W) -> Result<()> {
        let mut store = self.store.lock().await;
        if !store.toggle_complete(id) {
            return self.report_missing(id, out);
        }

        if let Some(todo) = store.get(id) {
            let state = if todo.completed { "done" } else { "not done" };
            writeln!(
                out,
                "Todo {} marked {} (progress {}%)",
                todo.id, state, todo.progress
            )?;
        }
        Ok(())
    }

    async fn set_progress<W: Write>(&self, id: &str, progress: i32, out: &mut W) -> Result<()> {
        let mut store = self.store.lock().await;
        if !store.update_progress(id, progress) {
            return self.report_missing(id, out);
        }

        if let Some(todo) = store.get(id) {
            writeln!(
                out,
                "Todo {} progress {} {}%",
                todo.id,
                self.progress_bar(todo),
                todo.progress
            )?;
        }
        Ok(())
    }

    async fn like_todo<W: Write>(&self, id: &str, out: &mut W) -> Result<()> {
        let mut store = self.store.lock().await;
        if !store.like(id) {
            return self.report_missing(id, out);
        }

        if let Some(todo) = store.get(id) {
            writeln!(out, "Todo {} now has {} likes", todo.id, todo.likes)?;
        }
        Ok(())
    }

    async fn comment_on<W: Write>(&self, id: &str, text: &str, out: &mut W) -> Result<()> {
        let text = validate_comment(text)?;

        let mut store = self.store.lock().await;
        if !store.add_comment(id, text, &self.actor) {
            return self.report_missing(id, out);
        }

        if let Some(todo) = store.get(id) {
            writeln!(
                out,
                "Comment added to todo {} ({} comments)",
                todo.id,
                todo.comments.len()
            )?;
        }
        Ok(())
    }

    async fn export<W: Write>(&self, output: &Path, filter: FilterMode, out: &mut W) -> Result<()> {
        let store = self.store.lock().await;
        let view = store.filter(filter, &self.actor);

        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(TodoError::DirectoryError {
                    path: parent.to_path_buf(),
                });
            }
        }

        let json = serde_json::to_string_pretty(&view)?;
        write_atomically(output, json.as_bytes())?;

        info!("Exported {} todos to {}", view.len(), output.display());
        writeln!(
            out,
            "Exported {} todo{} to {}",
            view.len(),
            if view.len() == 1 { "" } else { "s" },
            output.display()
        )?;
        Ok(())
    }

    fn handle_config<W: Write>(
        &self,
        show: bool,
        set: Option<String>,
        reset: bool,
        out: &mut W,
    ) -> Result<()> {
        if !reset && set.is_none() {
            writeln!(out, "{}", serde_json::to_string_pretty(&self.config)?)?;
            return Ok(());
        }

        let path = self
            .config_path
            .as_deref()
            .ok_or_else(|| TodoError::ConfigError {
                message: "No configuration file location available".to_string(),
            })?;

        let mut config = if reset {
            Config::default()
        } else {
            self.config.clone()
        };

        if let Some(assignment) = set {
            let (key, value) =
                assignment
                    .split_once('=')
                    .ok_or_else(|| TodoError::ConfigError {
                        message: format!("Expected key=value, got '{}'", assignment),
                    })?;
            config.set(key, value)?;
        }

        config.save(path)?;
        writeln!(
            out,
            "Configuration saved to {} (applies from the next start)",
            path.display()
        )?;
        if show {
            writeln!(out, "{}", serde_json::to_string_pretty(&config)?)?;
        }
        Ok(())
    }

    fn report_missing<W: Write>(&self, id: &str, out: &mut W) -> Result<()> {
        writeln!(out, "No todo with ID {}", id)?;
        Ok(())
    }

    /// Display todos in text format
    fn display_todos_text<W: Write>(
        &self,
        todos: &[&Todo],
        detailed: bool,
        out: &mut W,
    ) -> Result<()> {
        // Use terminal width for separators if available
        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for (i, todo) in todos.iter().enumerate() {
            if i > 0 {
                writeln!(out, "{}", "-".repeat(term_width.min(50)))?;
            }
            self.display_todo(todo, detailed, out)?;
        }

        Ok(())
    }

    fn display_todo<W: Write>(&self, todo: &Todo, detailed: bool, out: &mut W) -> Result<()> {
        let check = if todo.completed { "[x]" } else { "[ ]" };
        let visibility = if todo.is_public { "" } else { " (private)" };

        writeln!(
            out,
            "{} {} {}{}",
            check,
            style(format!("#{}", todo.id)).dim(),
            style(&todo.title).bold(),
            visibility
        )?;
        writeln!(
            out,
            "    {} | {} {}% | {} like{} | {} comment{}",
            self.category_label(todo.category),
            self.progress_bar(todo),
            todo.progress,
            todo.likes,
            if todo.likes == 1 { "" } else { "s" },
            todo.comments.len(),
            if todo.comments.len() == 1 { "" } else { "s" }
        )?;
        writeln!(
            out,
            "    by {} on {}",
            todo.created_by,
            todo.created_at.format("%Y-%m-%d")
        )?;

        if detailed {
            if let Some(description) = &todo.description {
                writeln!(out, "\n    {}", description)?;
            }
            if !todo.comments.is_empty() {
                writeln!(out)?;
                for comment in &todo.comments {
                    writeln!(
                        out,
                        "    - {} ({}): {}",
                        style(&comment.author).cyan(),
                        comment.created_at.format("%Y-%m-%d"),
                        comment.text
                    )?;
                }
            }
        }

        Ok(())
    }

    fn write_stats<W: Write>(&self, stats: &BoardStats, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Total: {} | Completed: {} | Progress: {}%",
            stats.total, stats.completed, stats.average_progress
        )?;
        Ok(())
    }

    fn category_label(&self, category: Category) -> StyledObject<&'static str> {
        let label = style(category.as_str());
        match category {
            Category::Work => label.blue(),
            Category::Personal => label.green(),
            Category::Health => label.red(),
            Category::Learning => label.magenta(),
        }
    }

    fn progress_bar(&self, todo: &Todo) -> String {
        let filled = (todo.progress.clamp(0, 100) as usize * BAR_WIDTH) / 100;
        format!(
            "[{}{}]",
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled)
        )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const ADDRESS: &str = "0x1234567890abcdef1234";

    fn app_with(address: Option<&str>) -> (App, Arc<Mutex<TodoStore>>) {
        console::set_colors_enabled(false);
        let store = Arc::new(Mutex::new(TodoStore::new()));
        let app = App::new(
            Arc::clone(&store),
            Config::default(),
            Actor::new(address.map(str::to_string)),
            false,
        );
        (app, store)
    }

    async fn run(app: &App, command: Commands) -> String {
        let mut out = Vec::new();
        app.execute(command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    fn add(title: &str, private: bool) -> Commands {
        Commands::Add {
            title: title.to_string(),
            description: None,
            category: None,
            public: false,
            private,
        }
    }

    #[tokio::test]
    async fn list_shows_seed_and_stats() {
        let (app, _) = app_with(None);
        let output = run(
            &app,
            Commands::List {
                filter: FilterMode::All,
                json: false,
                detailed: false,
            },
        )
        .await;

        assert!(output.contains("Complete OnchainKit Integration"));
        assert!(output.contains("Daily Workout Routine"));
        assert!(output.contains("Total: 3 | Completed: 1 | Progress: 78%"));
    }

    #[tokio::test]
    async fn add_trims_title_and_uses_config_defaults() {
        let (app, store) = app_with(Some(ADDRESS));
        let output = run(&app, add("  Plan trip  ", false)).await;
        assert!(output.starts_with("Todo created with ID: "));

        let store = store.lock().await;
        let head = &store.todos()[0];
        assert_eq!(head.title, "Plan trip");
        assert_eq!(head.category, Category::Personal);
        assert!(head.is_public);
        assert_eq!(head.created_by, "0x1234...1234");
    }

    #[tokio::test]
    async fn blank_title_never_reaches_store() {
        let (app, store) = app_with(None);
        let mut out = Vec::new();
        let result = app.execute(add("   ", false), &mut out).await;

        assert!(matches!(result, Err(TodoError::InvalidInput { .. })));
        assert_eq!(store.lock().await.len(), 3);
    }

    #[tokio::test]
    async fn blank_comment_is_rejected() {
        let (app, store) = app_with(None);
        let mut out = Vec::new();
        let result = app
            .execute(
                Commands::Comment {
                    id: "1".to_string(),
                    text: "  ".to_string(),
                },
                &mut out,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(store.lock().await.get("1").unwrap().comments.len(), 1);
    }

    #[tokio::test]
    async fn unknown_id_is_reported_not_failed() {
        let (app, _) = app_with(None);
        let output = run(&app, Commands::Like { id: "99".to_string() }).await;
        assert_eq!(output.trim(), "No todo with ID 99");
    }

    #[tokio::test]
    async fn private_todo_is_hidden_from_public_view() {
        let (app, _) = app_with(Some(ADDRESS));
        run(&app, add("Secret", true)).await;

        let output = run(
            &app,
            Commands::Stats {
                filter: FilterMode::Public,
            },
        )
        .await;
        assert_eq!(output.trim(), "Total: 3 | Completed: 1 | Progress: 78%");
    }

    #[tokio::test]
    async fn shell_keeps_state_between_lines() {
        let (app, store) = app_with(Some(ADDRESS));
        let script = "add --title \"Read a book\" --category learning\n\
                      like 1\n\
                      like 1\n\
                      toggle 2\n\
                      bogus\n\
                      list --filter mine\n\
                      quit\n\
                      like 1\n";
        let mut input = Cursor::new(script.as_bytes());
        let mut out = Vec::new();

        app.run_with_io(Commands::Shell, &mut input, &mut out)
            .await
            .unwrap();
        let output = String::from_utf8(out).unwrap();

        let store = store.lock().await;
        assert_eq!(store.len(), 4);
        assert_eq!(store.todos()[0].title, "Read a book");
        assert_eq!(store.get("1").unwrap().likes, 14);
        assert!(!store.get("2").unwrap().completed);
        assert!(output.contains("Read a book"));
        assert!(output.contains("Total: 1 | Completed: 0 | Progress: 0%"));
        assert!(output.trim_end().ends_with("Bye"));
    }

    #[tokio::test]
    async fn export_writes_view_as_json() {
        let (app, _) = app_with(None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.json");

        let output = run(
            &app,
            Commands::Export {
                output: path.clone(),
                filter: FilterMode::Public,
            },
        )
        .await;
        assert!(output.contains("Exported 3 todos"));

        let written: Vec<Todo> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let ids: Vec<&str> = written.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn unbalanced_quote_is_a_command_error() {
        assert!(matches!(
            split_line("add --title \"oops"),
            Err(TodoError::CommandError { .. })
        ));
        assert_eq!(split_line("like 1\n").unwrap(), vec!["like", "1"]);
    }

    #[tokio::test]
    async fn shell_reports_unparseable_line_and_continues() {
        let (app, store) = app_with(None);
        let mut input = Cursor::new("comment 1 \"unterminated\nlike 1\nquit\n".as_bytes());
        let mut out = Vec::new();

        app.run_with_io(Commands::Shell, &mut input, &mut out)
            .await
            .unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(output.contains("Error: Could not parse line"));
        let store = store.lock().await;
        assert_eq!(store.get("1").unwrap().comments.len(), 1);
        assert_eq!(store.get("1").unwrap().likes, 13);
    }

    #[tokio::test]
    async fn config_set_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let (app, _) = app_with(None);
        let app = app.with_config_path(Some(path.clone()));

        let output = run(
            &app,
            Commands::Config {
                show: false,
                set: Some("default_category=work".to_string()),
                reset: false,
            },
        )
        .await;
        assert!(output.contains("Configuration saved"));
        assert_eq!(
            Config::load(Some(&path)).unwrap().default_category,
            Category::Work
        );

        let mut out = Vec::new();
        let result = app
            .execute(
                Commands::Config {
                    show: false,
                    set: Some("no-equals-sign".to_string()),
                    reset: false,
                },
                &mut out,
            )
            .await;
        assert!(matches!(result, Err(TodoError::ConfigError { .. })));
    }

    #[test]
    fn progress_bar_scales_and_clamps() {
        let (app, _) = app_with(None);
        let mut todo = TodoStore::new().todos()[0].clone();
        assert_eq!(app.progress_bar(&todo), "[#######---]");
        todo.progress = 150;
        assert_eq!(app.progress_bar(&todo), "[##########]");
        todo.progress = -3;
        assert_eq!(app.progress_bar(&todo), "[----------]");
    }
}
