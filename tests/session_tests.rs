//! Tests for session storage fallbacks, the pending invite file and config parsing

fn scratch_dir(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("groupstudy-test-{}-{}", std::process::id(), name));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[cfg(test)]
mod session_file_tests {
    use super::scratch_dir;
    use groupstudy::models::CurrentUser;
    use groupstudy::session::{load_session_file, store_session_file, Session};

    #[test]
    fn missing_file_is_signed_out() {
        let dir = scratch_dir("missing");
        assert!(load_session_file(&dir.join(".session")).unwrap().is_none());
    }

    #[test]
    fn stored_session_loads_back() {
        let dir = scratch_dir("store");
        let path = dir.join(".session");
        let session = Session {
            access_token: "tok".to_string(),
            user: CurrentUser {
                id: 42,
                username: Some("kim".to_string()),
                profile_image: None,
            },
        };
        store_session_file(&path, &session).unwrap();

        let loaded = load_session_file(&path).unwrap().unwrap();
        assert_eq!(loaded.access_token, "tok");
        assert_eq!(loaded.user, session.user);
    }

    #[test]
    fn corrupt_file_is_signed_out() {
        let dir = scratch_dir("corrupt");
        let path = dir.join(".session");
        std::fs::write(&path, "{not json").unwrap();
        assert!(load_session_file(&path).unwrap().is_none());
    }
}

#[cfg(test)]
mod pending_invite_tests {
    use super::scratch_dir;
    use groupstudy::session::{save_pending_invite_in, take_pending_invite_in};

    #[test]
    fn nothing_pending() {
        let dir = scratch_dir("none-pending");
        assert_eq!(take_pending_invite_in(&dir).unwrap(), None);
    }

    #[test]
    fn pending_invite_is_taken_once() {
        let dir = scratch_dir("pending");
        save_pending_invite_in(&dir, "http://localhost:5173/#/group-invite/9").unwrap();
        assert_eq!(
            take_pending_invite_in(&dir).unwrap().as_deref(),
            Some("http://localhost:5173/#/group-invite/9")
        );
        assert_eq!(take_pending_invite_in(&dir).unwrap(), None);
    }

    #[test]
    fn blank_pending_invite_is_ignored() {
        let dir = scratch_dir("blank");
        save_pending_invite_in(&dir, "  \n").unwrap();
        assert_eq!(take_pending_invite_in(&dir).unwrap(), None);
    }
}

#[cfg(test)]
mod config_tests {
    use super::scratch_dir;
    use groupstudy::config::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.web_base_url, DEFAULT_WEB_BASE_URL);
        assert_eq!(config.refresh_interval_secs, 30);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn blank_urls_fall_back_to_defaults() {
        let config = parse_config("api_base_url = \"\"\nweb_base_url = \" \"").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.web_base_url, DEFAULT_WEB_BASE_URL);
    }

    #[test]
    fn values_are_read() {
        let config = parse_config(
            "api_base_url = \"https://api.example.com\"\nrefresh_interval_secs = 60\nlog_level = \"debug\"",
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
        assert_eq!(config.refresh_interval().as_secs(), 60);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn refresh_interval_has_a_floor() {
        let config = parse_config("refresh_interval_secs = 1").unwrap();
        assert_eq!(config.refresh_interval().as_secs(), 5);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(parse_config("api_base_url = ").is_err());
    }

    #[test]
    fn first_load_writes_template() {
        let dir = scratch_dir("config");
        let path = dir.join("config.toml");
        let config = load_config_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("web_base_url"));
    }
}
