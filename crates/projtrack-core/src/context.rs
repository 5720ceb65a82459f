//! Application context
//!
//! The context is built once at startup and owns the process's only project
//! store. Components receive the store from the context instead of reaching
//! for a global.

use crate::config::Config;
use crate::form::ProjectInput;
use crate::project::ProjectStatus;
use crate::state::ProjectState;
use crate::view::ProjectList;
use std::rc::Rc;
use tracing::debug;

/// Shared state for one running application
#[derive(Debug)]
pub struct AppContext {
    config: Config,
    store: Rc<ProjectState>,
}

impl AppContext {
    /// Build the context and its empty store
    pub fn init(config: Config) -> Self {
        debug!("Initializing application context");
        Self {
            config,
            store: Rc::new(ProjectState::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The project store; every call returns the same instance
    pub fn store(&self) -> Rc<ProjectState> {
        Rc::clone(&self.store)
    }

    /// A fresh form using the configured rules
    pub fn project_input(&self) -> ProjectInput {
        ProjectInput::new(self.config.form.clone())
    }

    /// Attach one list per status, in display order
    pub fn project_lists(&self) -> Vec<ProjectList> {
        ProjectStatus::ALL
            .into_iter()
            .map(|kind| {
                ProjectList::attach(kind, &self.store).with_ids(self.config.display.show_ids)
            })
            .collect()
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::init(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_is_shared() {
        let ctx = AppContext::default();
        let a = ctx.store();
        let b = ctx.store();
        assert!(Rc::ptr_eq(&a, &b));

        a.add_project("Build API", "desc", 3);
        assert_eq!(b.len(), 1);
    }

    #[test]
    fn test_contexts_are_independent() {
        let first = AppContext::default();
        let second = AppContext::default();
        first.store().add_project("Build API", "desc", 3);
        assert!(second.store().is_empty());
    }

    #[test]
    fn test_lists_follow_display_config() {
        let mut config = Config::default();
        config.display.show_ids = true;
        let ctx = AppContext::init(config);

        let lists = ctx.project_lists();
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].kind(), ProjectStatus::Active);
        assert_eq!(ctx.store().subscriber_count(), 2);

        let project = ctx.store().add_project("Build API", "desc", 3);
        assert!(lists[0].render().contains(&project.id));
    }

    #[test]
    fn test_project_input_uses_config_rules() {
        let mut config = Config::default();
        config.form.people_max = 9;
        let ctx = AppContext::init(config);

        let mut form = ctx.project_input();
        form.fill("Build API", "Public REST surface", "9");
        assert!(form.submit(&ctx.store()).is_ok());
    }
}
