use crate::config::UiConfig;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

impl Route {
    pub fn path(self, ui: &UiConfig) -> &str {
        match self {
            Route::Login => &ui.login_route,
            Route::Dashboard => &ui.dashboard_route,
        }
    }
}

/// Blocking notifications and view navigation.
pub trait Shell: Send + Sync {
    fn alert(&self, message: &str);

    fn navigate(&self, route: Route);
}

/// Shell for the command-line front end: alerts go to stderr.
pub struct TerminalShell {
    ui: UiConfig,
}

impl TerminalShell {
    pub fn new(ui: UiConfig) -> Self {
        Self { ui }
    }
}

impl Shell for TerminalShell {
    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }

    fn navigate(&self, route: Route) {
        info!("Navigating to {}", route.path(&self.ui));
    }
}
