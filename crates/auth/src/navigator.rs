//! Navigation seam: in-app route changes and full-page external redirects.

use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Client-side route change (e.g. `/manager`).
    Internal(String),
    /// Browser leaves the application (OAuth provider, hosted checkout).
    External(String),
}

pub trait Navigator {
    fn navigate(&self, path: &str);

    fn redirect_external(&self, url: &str);
}

impl<T: Navigator + ?Sized> Navigator for Rc<T> {
    fn navigate(&self, path: &str) {
        (**self).navigate(path)
    }

    fn redirect_external(&self, url: &str) {
        (**self).redirect_external(url)
    }
}

/// Navigator that only records where it was asked to go.
///
/// Used by native tests and headless tooling; clones share one history.
#[derive(Debug, Clone, Default)]
pub struct HistoryNavigator {
    history: Rc<RefCell<Vec<Navigation>>>,
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<Navigation> {
        self.history.borrow().clone()
    }

    pub fn last(&self) -> Option<Navigation> {
        self.history.borrow().last().cloned()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, path: &str) {
        self.history
            .borrow_mut()
            .push(Navigation::Internal(path.to_string()));
    }

    fn redirect_external(&self, url: &str) {
        self.history
            .borrow_mut()
            .push(Navigation::External(url.to_string()));
    }
}
