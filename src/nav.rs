use serde::Serialize;

/// Fade duration used by every page transition.
pub const FADE_DURATION_MS: u64 = 500;

/// Client-side routes, one per page component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    Home,
    Tokens,
    Transactions,
    WebWallet,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::Tokens,
        Route::Transactions,
        Route::WebWallet,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Tokens => "/tokens",
            Route::Transactions => "/transactions",
            Route::WebWallet => "/web-wallet",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Label shown in the navigation shell.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Tokens => "Tokens",
            Route::Transactions => "Transactions",
            Route::WebWallet => "Web Wallet",
        }
    }
}

/// One link in the persistent header.
#[derive(Debug, Clone, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

/// Links rendered by the navigation shell, in display order.
pub fn nav_links() -> Vec<NavLink> {
    Route::ALL
        .iter()
        .map(|r| NavLink {
            label: r.label(),
            path: r.path(),
        })
        .collect()
}

/// A fade animation keyed by the route path it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fade {
    pub route: Route,
    pub duration_ms: u64,
}

/// Page transition controller: purely presentational, keyed by route path.
/// Navigating starts a fade for the new route; the newest route replaces any
/// in-flight animation. No cancellation, no queuing.
#[derive(Debug)]
pub struct PageTransition {
    current: Route,
    active: Option<Fade>,
}

impl PageTransition {
    pub fn new() -> Self {
        Self {
            current: Route::Home,
            active: None,
        }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    pub fn active_fade(&self) -> Option<Fade> {
        self.active
    }

    pub fn navigate(&mut self, route: Route) -> Fade {
        let fade = Fade {
            route,
            duration_ms: FADE_DURATION_MS,
        };
        self.current = route;
        self.active = Some(fade);
        fade
    }
}

impl Default for PageTransition {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths_round_trip() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/nope"), None);
    }

    #[test]
    fn test_nav_links_cover_all_routes() {
        let links = nav_links();
        assert_eq!(links.len(), Route::ALL.len());
        assert_eq!(links[0].path, "/");
    }

    #[test]
    fn test_newest_navigation_replaces_fade() {
        let mut nav = PageTransition::new();
        nav.navigate(Route::Tokens);
        let fade = nav.navigate(Route::WebWallet);

        assert_eq!(nav.current(), Route::WebWallet);
        assert_eq!(nav.active_fade(), Some(fade));
        assert_eq!(fade.duration_ms, FADE_DURATION_MS);
        assert_eq!(fade.route, Route::WebWallet);
    }
}
