//! Tests for routes: path round trips, invite links, scheduled redirects

#[cfg(test)]
mod route_parsing {
    use groupstudy::routes::Route;

    #[test]
    fn paths() {
        assert_eq!(Route::Groups.path(), "/group-study");
        assert_eq!(Route::Room(12).path(), "/group-study/room/12");
        assert_eq!(Route::Invite(3).path(), "/group-invite/3");
        assert_eq!(Route::Login.path(), "/login");
    }

    #[test]
    fn parse_known_routes() {
        assert_eq!(Route::parse("/group-study"), Some(Route::Groups));
        assert_eq!(Route::parse("/group-study/room/12"), Some(Route::Room(12)));
        assert_eq!(Route::parse("/group-invite/3"), Some(Route::Invite(3)));
        assert_eq!(Route::parse("/login"), Some(Route::Login));
    }

    #[test]
    fn parse_ignores_hash_and_trailing_slash() {
        assert_eq!(Route::parse("#/group-invite/3/"), Some(Route::Invite(3)));
        assert_eq!(Route::parse("/group-study/"), Some(Route::Groups));
    }

    #[test]
    fn parse_rejects_bad_ids_and_unknown_paths() {
        assert_eq!(Route::parse("/group-invite/abc"), None);
        assert_eq!(Route::parse("/group-study/room/"), None);
        assert_eq!(Route::parse("/settings"), None);
    }
}

#[cfg(test)]
mod invite_links {
    use groupstudy::routes::{invite_link, parse_invite_target};

    #[test]
    fn builds_hash_route_link() {
        assert_eq!(
            invite_link("https://study.example.com", 5),
            "https://study.example.com/#/group-invite/5"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_dropped() {
        assert_eq!(
            invite_link("https://study.example.com/", 5),
            "https://study.example.com/#/group-invite/5"
        );
    }

    #[test]
    fn parses_full_link() {
        let link = invite_link("https://study.example.com", 42);
        assert_eq!(parse_invite_target(&link), Some(42));
    }

    #[test]
    fn parses_route_and_bare_id() {
        assert_eq!(parse_invite_target("/group-invite/8"), Some(8));
        assert_eq!(parse_invite_target(" 15 "), Some(15));
    }

    #[test]
    fn rejects_non_invite_targets() {
        assert_eq!(parse_invite_target("https://study.example.com/#/group-study/room/3"), None);
        assert_eq!(parse_invite_target("hello"), None);
        assert_eq!(parse_invite_target(""), None);
    }
}

#[cfg(test)]
mod scheduled_redirects {
    use groupstudy::routes::{Route, ScheduledRedirect, SESSION_EXPIRED_REDIRECT_DELAY};
    use std::time::{Duration, Instant};

    #[test]
    fn not_due_before_delay() {
        let r = ScheduledRedirect::after(Route::Login, Duration::from_secs(60));
        assert!(!r.is_due(Instant::now()));
    }

    #[test]
    fn due_after_delay() {
        let r = ScheduledRedirect::after(Route::Login, Duration::from_millis(10));
        assert!(r.is_due(Instant::now() + Duration::from_millis(20)));
    }

    #[test]
    fn session_expiry_delay_is_one_and_a_half_seconds() {
        assert_eq!(SESSION_EXPIRED_REDIRECT_DELAY, Duration::from_millis(1500));
    }
}
