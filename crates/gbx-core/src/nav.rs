//! Destinations and the navigation authorization gate.
//!
//! Every attempted transition consults [`gate`], which reconciles two
//! independently resolved pieces of state (setup completion and the
//! session credential) into a single routing outcome. The decision
//! itself ([`decide`]) is a pure function; `gate` only adds the await on
//! the setup status so no outcome is ever produced while that state is
//! unresolved.

use crate::api::ApiClient;
use crate::credentials::CredentialStore;
use crate::setup::{SetupStatus, SetupStatusCache};

/// Static access metadata for a destination. Never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// A session credential is required to enter.
    pub requires_auth: bool,
    /// Part of the first-run setup wizard.
    pub is_setup_route: bool,
    /// Display title.
    pub title: &'static str,
}

/// Navigable destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Setup,
    Dashboard,
    Remotes,
    Jobs,
    Logs,
}

impl Route {
    /// Returns all routes for iteration.
    pub fn all() -> &'static [Route] {
        &[
            Route::Login,
            Route::Setup,
            Route::Dashboard,
            Route::Remotes,
            Route::Jobs,
            Route::Logs,
        ]
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Setup => "/setup",
            Route::Dashboard => "/",
            Route::Remotes => "/remotes",
            Route::Jobs => "/jobs",
            Route::Logs => "/logs",
        }
    }

    pub fn descriptor(self) -> &'static RouteDescriptor {
        const LOGIN: RouteDescriptor = RouteDescriptor {
            requires_auth: false,
            is_setup_route: false,
            title: "Login",
        };
        const SETUP: RouteDescriptor = RouteDescriptor {
            requires_auth: false,
            is_setup_route: true,
            title: "Setup",
        };
        const DASHBOARD: RouteDescriptor = RouteDescriptor {
            requires_auth: true,
            is_setup_route: false,
            title: "Dashboard",
        };
        const REMOTES: RouteDescriptor = RouteDescriptor {
            requires_auth: true,
            is_setup_route: false,
            title: "Remotes",
        };
        const JOBS: RouteDescriptor = RouteDescriptor {
            requires_auth: true,
            is_setup_route: false,
            title: "Jobs",
        };
        const LOGS: RouteDescriptor = RouteDescriptor {
            requires_auth: true,
            is_setup_route: false,
            title: "Logs",
        };

        match self {
            Route::Login => &LOGIN,
            Route::Setup => &SETUP,
            Route::Dashboard => &DASHBOARD,
            Route::Remotes => &REMOTES,
            Route::Jobs => &JOBS,
            Route::Logs => &LOGS,
        }
    }
}

/// Outcome of a gated navigation. Produced fresh per transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Allow,
    /// Setup is incomplete; only setup destinations are reachable.
    RedirectSetup,
    /// A credential is needed; `return_path` is where the caller wanted
    /// to go.
    RedirectLogin { return_path: String },
    /// The destination no longer applies (already logged in / set up).
    RedirectDashboard,
}

/// Gates a transition to `route`, resolving the setup status first.
///
/// The await on [`SetupStatusCache::check`] is the suspension point: the
/// gate never emits an outcome while the status is unresolved, and
/// concurrent navigations share one status fetch.
pub async fn gate(
    route: Route,
    full_path: &str,
    credentials: &CredentialStore,
    setup: &SetupStatusCache,
    api: &ApiClient,
) -> GateOutcome {
    let status = setup.check(api).await;
    decide(route, full_path, credentials.is_present(), status)
}

/// Pure routing decision over resolved inputs.
///
/// Rules are evaluated in a fixed order and the first match wins; every
/// input combination yields exactly one outcome. Setup-completeness
/// dominates, authentication is only consulted once setup is resolved,
/// and the early returns for setup/login destinations make self-redirect
/// loops structurally impossible.
pub fn decide(
    route: Route,
    full_path: &str,
    credential_present: bool,
    status: SetupStatus,
) -> GateOutcome {
    let descriptor = route.descriptor();

    if status == SetupStatus::Required {
        return if descriptor.is_setup_route {
            GateOutcome::Allow
        } else {
            GateOutcome::RedirectSetup
        };
    }

    // Setup is complete; the wizard is no longer a valid destination.
    if descriptor.is_setup_route {
        return if credential_present {
            GateOutcome::RedirectDashboard
        } else {
            GateOutcome::RedirectLogin {
                return_path: full_path.to_string(),
            }
        };
    }

    if descriptor.requires_auth && !credential_present {
        return GateOutcome::RedirectLogin {
            return_path: full_path.to_string(),
        };
    }

    if route == Route::Login && credential_present {
        return GateOutcome::RedirectDashboard;
    }

    GateOutcome::Allow
}
