use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zeroize::Zeroize;

use crate::models::CurrentUser;

const KEYRING_SERVICE: &str = "groupstudy-client";
const SESSION_FILE: &str = ".session";
const PENDING_INVITE_FILE: &str = "pending_invite";

/// Bearer token plus the profile of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: CurrentUser,
}

impl Drop for Session {
    fn drop(&mut self) {
        self.access_token.zeroize();
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
    #[serde(default)]
    user: Option<CurrentUser>,
}

impl Drop for LoginResponse {
    fn drop(&mut self) {
        self.access_token.zeroize();
    }
}

fn keyring_entry(name: &str) -> Option<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, name).ok()
}

fn session_file_path() -> Result<PathBuf> {
    Ok(crate::config::config_dir()?.join(SESSION_FILE))
}

pub fn store_session(session: &Session) -> Result<()> {
    if store_session_keyring(session) {
        return Ok(());
    }
    // Fall back to a file in the config dir (protected by OS user permissions)
    store_session_file(&session_file_path()?, session)
}

fn store_session_keyring(session: &Session) -> bool {
    let Some(token_entry) = keyring_entry("token") else { return false };
    let Some(user_entry) = keyring_entry("user") else { return false };
    let Ok(user_json) = serde_json::to_string(&session.user) else { return false };

    if token_entry.set_password(&session.access_token).is_err() {
        return false;
    }
    user_entry.set_password(&user_json).is_ok()
}

pub fn store_session_file(path: &Path, session: &Session) -> Result<()> {
    let mut json = serde_json::to_string(session)?;
    let written = std::fs::write(path, &json);
    json.zeroize();
    written.with_context(|| format!("Could not write {}", path.display()))
}

pub fn load_session() -> Result<Option<Session>> {
    if let Some(session) = load_session_keyring() {
        return Ok(Some(session));
    }
    load_session_file(&session_file_path()?)
}

fn load_session_keyring() -> Option<Session> {
    let access_token = keyring_entry("token")?
        .get_password()
        .ok()
        .filter(|s| !s.is_empty())?;
    let user_json = keyring_entry("user")?.get_password().ok()?;
    let user: CurrentUser = serde_json::from_str(&user_json).ok()?;
    Some(Session { access_token, user })
}

/// A missing or corrupt session file reads as "not signed in".
pub fn load_session_file(path: &Path) -> Result<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut json = std::fs::read_to_string(path)?;
    let result = serde_json::from_str(&json);
    json.zeroize();
    match result {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable session file");
            Ok(None)
        }
    }
}

pub fn clear_session() -> Result<()> {
    for key in ["token", "user"] {
        if let Some(entry) = keyring_entry(key) {
            let _ = entry.delete_credential();
        }
    }
    if let Ok(path) = session_file_path() {
        wipe_file(&path);
    }
    Ok(())
}

fn wipe_file(path: &Path) {
    if path.exists() {
        // Overwrite before delete
        let len = std::fs::metadata(path).map(|m| m.len() as usize).unwrap_or(0);
        let _ = std::fs::write(path, vec![0u8; len]);
        let _ = std::fs::remove_file(path);
    }
}

/// Signs in with email and password. When the login response carries no
/// profile it is fetched from `/api/users/me`.
pub async fn login(
    client: &reqwest::Client,
    api_base_url: &str,
    email: &str,
    password: &str,
) -> Result<Session> {
    let base = api_base_url.trim_end_matches('/');
    let body = serde_json::json!({ "email": email, "password": password });
    let resp = client
        .post(format!("{}/api/auth/login", base))
        .json(&body)
        .send()
        .await
        .context("Could not reach the study service")?;
    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        anyhow::bail!("Login failed ({}): {}", status, text);
    }
    let login: LoginResponse = resp.json().await.context("Invalid login response")?;

    let user = match login.user.clone() {
        Some(user) => user,
        None => {
            use crate::client::{StudyApi, StudyClient};
            let api = StudyClient::with_client(client.clone(), base, login.access_token.clone());
            api.current_user()
                .await
                .context("Failed to load user profile")?
        }
    };

    Ok(Session {
        access_token: login.access_token.clone(),
        user,
    })
}

// ---- Pending invite ----

pub fn save_pending_invite(link: &str) -> Result<()> {
    save_pending_invite_in(&crate::config::config_dir()?, link)
}

pub fn take_pending_invite() -> Result<Option<String>> {
    take_pending_invite_in(&crate::config::config_dir()?)
}

/// Remembers an invite that arrived before sign-in so it can be resumed
/// after `--login`.
pub fn save_pending_invite_in(dir: &Path, link: &str) -> Result<()> {
    std::fs::write(dir.join(PENDING_INVITE_FILE), link)?;
    Ok(())
}

/// Returns the pending invite, if any, and forgets it.
pub fn take_pending_invite_in(dir: &Path) -> Result<Option<String>> {
    let path = dir.join(PENDING_INVITE_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let link = std::fs::read_to_string(&path)?;
    std::fs::remove_file(&path)?;
    let link = link.trim().to_string();
    Ok((!link.is_empty()).then_some(link))
}
