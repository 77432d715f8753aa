//! The thought/task store: in-memory collections, state transitions, and
//! a best-effort JSON persistence round-trip.
//!
//! The store is the sole writer of persisted state. Every mutation saves
//! synchronously under the write lock, so callers never observe a partial
//! write. Persistence failures are logged and swallowed: the in-memory
//! state stays authoritative for the session.

use chrono::{DateTime, Local, Utc};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{Task, Thought};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const THOUGHTS_FILE: &str = "thoughts.json";
const TASKS_FILE: &str = "tasks.json";

pub struct Store {
    dir: PathBuf,
    thoughts: RwLock<Vec<Thought>>,
    tasks: RwLock<Vec<Task>>,
}

impl Store {
    /// Open the store at `dir`, loading both collections. A missing or
    /// unreadable file yields an empty collection; startup never blocks
    /// on storage.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            tracing::warn!("could not create data dir {:?}: {}", dir, e);
        }
        let thoughts = load_collection(&dir.join(THOUGHTS_FILE));
        let tasks = load_collection(&dir.join(TASKS_FILE));
        Self {
            dir,
            thoughts: RwLock::new(thoughts),
            tasks: RwLock::new(tasks),
        }
    }

    /// Current snapshot of the thought collection, newest first.
    pub fn thoughts(&self) -> Vec<Thought> {
        self.thoughts.read().clone()
    }

    /// Current snapshot of the task collection, newest first.
    pub fn tasks(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    pub fn find_thought(&self, id: &str) -> Option<Thought> {
        self.thoughts.read().iter().find(|t| t.id == id).cloned()
    }

    pub fn find_task(&self, id: &str) -> Option<Task> {
        self.tasks.read().iter().find(|t| t.id == id).cloned()
    }

    /// Prepend a sorted batch, preserving its internal order.
    pub fn ingest_thoughts(&self, batch: Vec<Thought>) {
        let mut thoughts = self.thoughts.write();
        let existing = std::mem::take(&mut *thoughts);
        *thoughts = batch.into_iter().chain(existing).collect();
        self.save(THOUGHTS_FILE, &*thoughts);
    }

    /// Insert a single thought at the front, or replace it in place when
    /// a thought with the same id exists (a reframe projection folding
    /// back into the collection).
    pub fn upsert_thought(&self, thought: Thought) {
        let mut thoughts = self.thoughts.write();
        match thoughts.iter_mut().find(|t| t.id == thought.id) {
            Some(slot) => *slot = thought,
            None => thoughts.insert(0, thought),
        }
        self.save(THOUGHTS_FILE, &*thoughts);
    }

    /// The "let go" action: remove a thought by id.
    pub fn let_go(&self, id: &str) -> bool {
        let mut thoughts = self.thoughts.write();
        let before = thoughts.len();
        thoughts.retain(|t| t.id != id);
        let removed = thoughts.len() != before;
        if removed {
            self.save(THOUGHTS_FILE, &*thoughts);
        }
        removed
    }

    /// Construct a task from a thought and prepend it. The thought stays
    /// in its collection.
    pub fn turn_into_action(&self, thought: &Thought) -> Task {
        let now = Utc::now();
        let task = Task {
            id: format!("task-{}", Uuid::new_v4()),
            title: thought.title.clone(),
            category: thought.category,
            derived_from: thought.derived_quote.clone(),
            due_date: now,
            completed: false,
            created_at: Local::now().format("%d/%m/%Y").to_string(),
            is_today: true,
        };
        let mut tasks = self.tasks.write();
        tasks.insert(0, task.clone());
        self.save(TASKS_FILE, &*tasks);
        task
    }

    pub fn toggle_complete(&self, id: &str) -> bool {
        self.with_task(id, |task| task.completed = !task.completed)
    }

    pub fn mark_complete(&self, id: &str) -> bool {
        self.with_task(id, |task| task.completed = true)
    }

    /// Replace a task's title and/or due date. `is_today` is recomputed
    /// whenever the due date changes.
    pub fn edit_task(
        &self,
        id: &str,
        title: Option<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> bool {
        self.with_task(id, |task| {
            if let Some(title) = title {
                task.title = title;
            }
            if let Some(due) = due_date {
                task.due_date = due;
                task.is_today = Task::compute_is_today(due);
            }
        })
    }

    pub fn delete_task(&self, id: &str) -> bool {
        let mut tasks = self.tasks.write();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        let removed = tasks.len() != before;
        if removed {
            self.save(TASKS_FILE, &*tasks);
        }
        removed
    }

    fn with_task(&self, id: &str, apply: impl FnOnce(&mut Task)) -> bool {
        let mut tasks = self.tasks.write();
        match tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                apply(task);
                self.save(TASKS_FILE, &*tasks);
                true
            }
            None => false,
        }
    }

    fn save<T: Serialize>(&self, file: &str, items: &[T]) {
        let path = self.dir.join(file);
        let json = match serde_json::to_string_pretty(items) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("could not serialize {}: {}", file, e);
                return;
            }
        };
        if let Err(e) = fs::write(&path, json) {
            tracing::warn!("could not save {:?}: {}", path, e);
        }
    }
}

fn load_collection<T: DeserializeOwned>(path: &Path) -> Vec<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return Vec::new(),
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("could not parse {:?}, starting empty: {}", path, e);
            Vec::new()
        }
    }
}
