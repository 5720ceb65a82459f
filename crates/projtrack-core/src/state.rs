//! Observable project store
//!
//! `ProjectState` is the single source of truth for the project list. Every
//! mutation pushes an owned snapshot of the full list to each subscriber, in
//! registration order, before the mutating call returns.
//!
//! The store is single-threaded: it is shared with `Rc` and mutated through
//! `RefCell`, so it is `!Send` and `!Sync`.

use crate::project::Project;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};

/// Callback invoked with a snapshot of the project list after each change
pub type Listener = Rc<dyn Fn(Vec<Project>)>;

/// Append-only project list with synchronous change notification
#[derive(Default)]
pub struct ProjectState {
    projects: RefCell<Vec<Project>>,
    listeners: RefCell<Vec<Listener>>,
}

impl ProjectState {
    /// Create an empty store with no subscribers
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for all future changes
    ///
    /// Listeners are never deduplicated and cannot be removed. A listener
    /// registered now is not told about projects added earlier.
    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(Vec<Project>) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        listeners.push(Rc::new(listener));
        debug!(subscribers = listeners.len(), "Registered project listener");
    }

    /// Append a new active project and notify every listener
    ///
    /// The store does not validate its arguments; callers run the form
    /// validation first.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Project {
        let project = Project::new(title, description, people);
        self.projects.borrow_mut().push(project.clone());

        info!(
            id = %project.id,
            title = %project.title,
            people = project.people,
            "Project added"
        );

        self.notify();
        project
    }

    /// Snapshot of every project in insertion order
    pub fn projects(&self) -> Vec<Project> {
        self.projects.borrow().clone()
    }

    /// Number of projects in the store
    pub fn len(&self) -> usize {
        self.projects.borrow().len()
    }

    /// Whether the store holds no projects
    pub fn is_empty(&self) -> bool {
        self.projects.borrow().is_empty()
    }

    /// Number of registered listeners
    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    // No borrow is held while a listener runs, so listeners may read the
    // store or add to it. Listeners registered mid-notification wait for the
    // next change.
    fn notify(&self) {
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        debug!(subscribers = listeners.len(), "Notifying project listeners");

        for listener in listeners {
            let snapshot = self.projects();
            listener(snapshot);
        }
    }
}

impl fmt::Debug for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectState")
            .field("projects", &self.projects.borrow())
            .field("listeners", &self.subscriber_count())
            .finish()
    }
}
