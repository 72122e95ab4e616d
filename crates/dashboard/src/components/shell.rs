//! Dashboard shell: sidebar navigation, topbar and user panel.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::services::{Navigator, Route, SessionCapability, SessionState};

/// A sidebar destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub name: &'static str,
    pub route: Route,
}

/// Sidebar destinations, in display order.
#[must_use]
pub fn navigation() -> Vec<NavItem> {
    vec![NavItem {
        name: "My Stores",
        route: Route::StoreList,
    }]
}

/// Rendered sidebar link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub href: String,
    pub active: bool,
}

/// Signed-in user as shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPanel {
    pub initial: String,
    pub display_name: String,
    pub role_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSnapshot {
    pub user: Option<UserPanel>,
    pub greeting: String,
    pub nav: Vec<NavLink>,
    pub sidebar_open: bool,
}

/// Layout chrome around every dashboard page.
pub struct Shell {
    session: Arc<dyn SessionCapability>,
    navigator: Arc<dyn Navigator>,
    sidebar_open: AtomicBool,
}

impl Shell {
    #[must_use]
    pub fn new(session: Arc<dyn SessionCapability>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            session,
            navigator,
            sidebar_open: AtomicBool::new(false),
        }
    }

    /// Open the mobile sidebar from the topbar control.
    pub fn open(&self) {
        self.sidebar_open.store(true, Ordering::SeqCst);
    }

    pub fn close(&self) {
        self.sidebar_open.store(false, Ordering::SeqCst);
    }

    pub fn backdrop_click(&self) {
        self.close();
    }

    /// Follow a sidebar link; the mobile sidebar closes.
    pub fn navigate(&self, item: &NavItem) {
        self.close();
        self.navigator.navigate(item.route.clone());
    }

    #[must_use]
    pub fn is_sidebar_open(&self) -> bool {
        self.sidebar_open.load(Ordering::SeqCst)
    }

    /// End the session and return to the site root.
    pub async fn sign_out(&self) {
        self.session.logout().await;
        self.navigator.navigate(Route::Root);
    }

    #[must_use]
    pub fn snapshot(&self, current_path: &str) -> ShellSnapshot {
        let user = match self.session.state() {
            SessionState::Authenticated(profile) => Some(profile),
            SessionState::Loading | SessionState::Anonymous => None,
        };

        let greeting = format!(
            "Welcome back, {}!",
            user.as_ref().map_or("User", |u| u.greeting_name())
        );

        let nav = navigation()
            .into_iter()
            .map(|item| {
                let href = item.route.path();
                NavLink {
                    name: item.name,
                    active: current_path == href
                        || current_path.starts_with(&format!("{href}/")),
                    href,
                }
            })
            .collect();

        ShellSnapshot {
            user: user.map(|u| UserPanel {
                initial: u.initial(),
                display_name: u.display_name(),
                role_label: u.role_label(),
            }),
            greeting,
            nav,
            sidebar_open: self.is_sidebar_open(),
        }
    }
}
