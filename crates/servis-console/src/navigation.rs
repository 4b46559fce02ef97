use servis_client::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    Customers,
    Devices,
    Repairs,
    Inventory,
    Reports,
    Settings,
}

impl Route {
    pub const ALL: [Route; 9] = [
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Customers,
        Route::Devices,
        Route::Repairs,
        Route::Inventory,
        Route::Reports,
        Route::Settings,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/",
            Route::Customers => "/customers",
            Route::Devices => "/devices",
            Route::Repairs => "/repairs",
            Route::Inventory => "/inventory",
            Route::Reports => "/reports",
            Route::Settings => "/settings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Route::Login | Route::Register)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(Route),
    Redirect(Route),
}

impl Navigation {
    pub fn destination(self) -> Route {
        match self {
            Navigation::Allow(route) | Navigation::Redirect(route) => route,
        }
    }
}

/// Protected routes need a session token; the login page is skipped when
/// one is already present.
pub fn guard(route: Route, session: &SessionStore) -> Navigation {
    let authenticated = session.is_authenticated();
    match route {
        Route::Login if authenticated => Navigation::Redirect(Route::Dashboard),
        r if !r.is_public() && !authenticated => {
            tracing::debug!(path = r.path(), "no session, redirecting to login");
            Navigation::Redirect(Route::Login)
        }
        r => Navigation::Allow(r),
    }
}
