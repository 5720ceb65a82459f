//! Project list views
//!
//! A `ProjectList` shows the projects of one status. It subscribes to the
//! store when attached and redraws its whole view from every snapshot.

use crate::project::{Project, ProjectStatus};
use crate::state::ProjectState;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

#[derive(Debug, Default)]
struct ListView {
    assigned: Vec<Project>,
    redraws: usize,
}

/// A rendered list of projects with a single status
#[derive(Debug, Clone)]
pub struct ProjectList {
    kind: ProjectStatus,
    show_ids: bool,
    view: Rc<RefCell<ListView>>,
}

impl ProjectList {
    /// Create a list for `kind` and subscribe it to `store`
    ///
    /// The list starts empty even if the store already holds projects; it
    /// fills in on the next change.
    pub fn attach(kind: ProjectStatus, store: &ProjectState) -> Self {
        let list = Self {
            kind,
            show_ids: false,
            view: Rc::new(RefCell::new(ListView::default())),
        };

        let view = Rc::clone(&list.view);
        store.subscribe(move |projects| {
            let mut view = view.borrow_mut();
            view.assigned = projects.into_iter().filter(|p| p.has_status(kind)).collect();
            view.redraws += 1;
            debug!(list = kind.as_str(), items = view.assigned.len(), "Redrew project list");
        });

        list
    }

    /// Show each project's id next to its title
    pub fn with_ids(mut self, show_ids: bool) -> Self {
        self.show_ids = show_ids;
        self
    }

    pub fn kind(&self) -> ProjectStatus {
        self.kind
    }

    /// Element id of the list, e.g. `active-projects-list`
    pub fn list_id(&self) -> String {
        format!("{}-projects-list", self.kind.as_str())
    }

    /// Heading text, e.g. `ACTIVE PROJECTS`
    pub fn heading(&self) -> String {
        format!("{} PROJECTS", self.kind.as_str().to_uppercase())
    }

    /// Projects currently shown
    pub fn items(&self) -> Vec<Project> {
        self.view.borrow().assigned.clone()
    }

    /// Titles currently shown, in store order
    pub fn titles(&self) -> Vec<String> {
        self.view
            .borrow()
            .assigned
            .iter()
            .map(|p| p.title.clone())
            .collect()
    }

    /// How many snapshots this list has drawn
    pub fn redraw_count(&self) -> usize {
        self.view.borrow().redraws
    }

    /// Render the heading and one line per project
    pub fn render(&self) -> String {
        let view = self.view.borrow();
        let mut lines = vec![self.heading()];

        if view.assigned.is_empty() {
            lines.push("  (none)".to_string());
        }
        lines.extend(view.assigned.iter().map(|project| {
            if self.show_ids {
                format!("  - {} [{}]", project.title, project.id)
            } else {
                format!("  - {}", project.title)
            }
        }));

        lines.push(String::new());
        lines.join("\n")
    }
}
