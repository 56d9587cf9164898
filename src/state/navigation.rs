//! Route history for the wizard.
//!
//! Navigation does not render anything; it records the routes the wizard
//! asked to visit so callers (and tests) can follow where it went.

use log::*;

/// Records every route the wizard navigates to, most recent last.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Router {
    history: Vec<String>,
}

impl Router {
    pub fn new() -> Self {
        Router::default()
    }

    /// Navigate to the given route.
    ///
    pub fn push(&mut self, route: impl Into<String>) -> &mut Self {
        let route = route.into();
        debug!("Navigating to {}", route);
        self.history.push(route);
        self
    }

    /// The route most recently navigated to.
    ///
    pub fn current(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}
