use chrono::Utc;
use log::{debug, info, trace};

use crate::{seed::seed_todos, Actor, Comment, FilterMode, NewTodo, Todo};

/// Hands out unique ids for todos and comments.
///
/// Ids are the current Unix time in milliseconds, bumped past the last id
/// issued whenever the clock has not moved on.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}

/// Owns the board's todos, newest first, and every edit made to them.
///
/// The store never fails: operations addressed at an unknown id do nothing
/// and report `false`. Input validation (blank titles, blank comments,
/// progress range) belongs to the caller.
#[derive(Debug, Clone)]
pub struct TodoStore {
    /// Todos ordered most recent first
    todos: Vec<Todo>,

    /// Source of fresh todo and comment ids
    ids: IdGenerator,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    /// Creates a store holding the seed todos
    pub fn new() -> Self {
        let store = Self::with_todos(seed_todos());
        info!("Todo store initialized with {} seed todos", store.len());
        store
    }

    /// Creates a store with no todos at all
    pub fn empty() -> Self {
        Self::with_todos(Vec::new())
    }

    /// Creates a store over the given todos, kept in the order given
    pub fn with_todos(todos: Vec<Todo>) -> Self {
        Self {
            todos,
            ids: IdGenerator::default(),
        }
    }

    /// All todos, newest first
    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Looks a todo up by id
    pub fn get(&self, id: &str) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Todo> {
        let found = self.todos.iter_mut().find(|t| t.id == id);
        if found.is_none() {
            debug!("No todo with id {}, ignoring", id);
        }
        found
    }

    /// Creates a todo attributed to `actor` and puts it at the head of the board
    pub fn create(&mut self, input: NewTodo, actor: &Actor) -> &Todo {
        let id = self.ids.next_id();
        let todo = Todo::new(id, input, actor.display(), Utc::now());
        debug!("Creating todo {} by {}", todo.id, todo.created_by);

        self.todos.insert(0, todo);
        &self.todos[0]
    }

    /// Flips completion. Completing forces progress to 100; reopening
    /// leaves progress where it was.
    pub fn toggle_complete(&mut self, id: &str) -> bool {
        let Some(todo) = self.get_mut(id) else {
            return false;
        };

        todo.completed = !todo.completed;
        if todo.completed {
            todo.progress = 100;
        }
        todo.updated_at = Utc::now();

        debug!(
            "Todo {} completed={} progress={}",
            todo.id, todo.completed, todo.progress
        );
        true
    }

    /// Sets progress exactly as given. Completion follows `progress == 100`.
    pub fn update_progress(&mut self, id: &str, progress: i32) -> bool {
        let Some(todo) = self.get_mut(id) else {
            return false;
        };

        todo.progress = progress;
        todo.completed = progress == 100;
        todo.updated_at = Utc::now();

        debug!(
            "Todo {} progress={} completed={}",
            todo.id, todo.progress, todo.completed
        );
        true
    }

    /// Adds one like, every time it is called
    pub fn like(&mut self, id: &str) -> bool {
        let Some(todo) = self.get_mut(id) else {
            return false;
        };

        todo.likes = todo.likes.saturating_add(1);
        trace!("Todo {} now has {} likes", todo.id, todo.likes);
        true
    }

    /// Appends a comment by `actor`. The todo's `updated_at` is left alone.
    pub fn add_comment(&mut self, id: &str, text: &str, actor: &Actor) -> bool {
        let Some(index) = self.todos.iter().position(|t| t.id == id) else {
            debug!("No todo with id {}, ignoring comment", id);
            return false;
        };

        let comment = Comment {
            id: self.ids.next_id(),
            text: text.to_string(),
            author: actor.display(),
            created_at: Utc::now(),
            likes: 0,
        };
        debug!("Adding comment {} to todo {}", comment.id, id);

        self.todos[index].comments.push(comment);
        true
    }

    /// Returns the todos visible under `mode`, in board order.
    ///
    /// `Mine` keeps todos whose author string contains the first six
    /// characters of the actor's address; without an address it is empty.
    pub fn filter(&self, mode: FilterMode, actor: &Actor) -> Vec<&Todo> {
        let view: Vec<&Todo> = match mode {
            FilterMode::All => self.todos.iter().collect(),
            FilterMode::Public => self.todos.iter().filter(|t| t.is_public).collect(),
            FilterMode::Mine => match actor.address_prefix() {
                Some(prefix) => self
                    .todos
                    .iter()
                    .filter(|t| t.created_by.contains(&prefix))
                    .collect(),
                None => Vec::new(),
            },
        };

        trace!("Filter {} matched {} todos", mode, view.len());
        view
    }
}
