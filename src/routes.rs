//! Screens of the client, addressed the same way the web routes are so that
//! invite links shared from the browser work here too.

use std::time::{Duration, Instant};

pub const GROUPS_PATH: &str = "/group-study";
pub const ROOM_PATH_PREFIX: &str = "/group-study/room/";
pub const INVITE_PATH_PREFIX: &str = "/group-invite/";
pub const LOGIN_PATH: &str = "/login";

/// Delay before a forced redirect to the login screen after the session expired.
pub const SESSION_EXPIRED_REDIRECT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Groups,
    Room(i64),
    Invite(i64),
    Login,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Groups => GROUPS_PATH.to_string(),
            Route::Room(id) => format!("{}{}", ROOM_PATH_PREFIX, id),
            Route::Invite(id) => format!("{}{}", INVITE_PATH_PREFIX, id),
            Route::Login => LOGIN_PATH.to_string(),
        }
    }

    /// Parses a route path. A leading `#` (hash routing) and a trailing `/`
    /// are ignored.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.trim().trim_start_matches('#');
        let path = path.strip_suffix('/').unwrap_or(path);
        if path == GROUPS_PATH {
            return Some(Route::Groups);
        }
        if path == LOGIN_PATH {
            return Some(Route::Login);
        }
        if let Some(id) = path.strip_prefix(ROOM_PATH_PREFIX) {
            return id.parse().ok().map(Route::Room);
        }
        if let Some(id) = path.strip_prefix(INVITE_PATH_PREFIX) {
            return id.parse().ok().map(Route::Invite);
        }
        None
    }
}

pub fn invite_link(web_base_url: &str, group_id: i64) -> String {
    format!(
        "{}/#{}",
        web_base_url.trim_end_matches('/'),
        Route::Invite(group_id).path()
    )
}

/// Extracts the group id from an invite link, an invite route, or a bare id.
pub fn parse_invite_target(input: &str) -> Option<i64> {
    let input = input.trim();
    if let Ok(id) = input.parse::<i64>() {
        return Some(id);
    }
    let route_part = match input.find('#') {
        Some(idx) => &input[idx..],
        None => match input.find(INVITE_PATH_PREFIX) {
            Some(idx) => &input[idx..],
            None => return None,
        },
    };
    match Route::parse(route_part)? {
        Route::Invite(id) => Some(id),
        _ => None,
    }
}

/// A navigation that should happen once its deadline passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledRedirect {
    pub route: Route,
    pub due: Instant,
}

impl ScheduledRedirect {
    pub fn after(route: Route, delay: Duration) -> Self {
        Self {
            route,
            due: Instant::now() + delay,
        }
    }

    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}
