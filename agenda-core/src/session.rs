//! Session holder: the bearer token and where it is persisted.
//!
//! There is no refresh, rotation or expiry check. A stale token only shows
//! up as failed requests.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::agenda_config::home_dir;
use crate::client::ApiClient;
use crate::error::{AgendaError, AgendaResult};

const SESSION_FILE: &str = "session.toml";

/// In-memory session. An empty token means signed out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Session {
            token: token.into(),
        }
    }

    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    pub fn clear(&mut self) {
        self.token.clear();
    }
}

#[derive(Serialize, Deserialize)]
struct SessionData {
    token: String,
}

/// File-backed token storage under the agenda home directory.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TokenStore { path: path.into() }
    }

    /// Store at the default location.
    pub fn open_default() -> AgendaResult<Self> {
        Ok(Self::in_dir(&home_dir()?))
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restore the persisted session. A missing file is a signed-out session.
    pub fn load(&self) -> AgendaResult<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let contents = std::fs::read_to_string(&self.path)?;
        let data: SessionData = toml::from_str(&contents).map_err(|e| {
            AgendaError::Serialization(format!(
                "Failed to parse session from {}: {e}",
                self.path.display()
            ))
        })?;

        Ok(Session::new(data.token))
    }

    pub fn save(&self, session: &Session) -> AgendaResult<()> {
        let data = SessionData {
            token: session.token().unwrap_or_default().to_string(),
        };
        let contents = toml::to_string_pretty(&data)
            .map_err(|e| AgendaError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&self.path, contents)?;

        // Owner-only, the file holds a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    pub fn clear(&self) -> AgendaResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// Auth endpoints

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "bearer")]
    pub token_type: String,
}

fn bearer() -> String {
    "bearer".to_string()
}

#[derive(Debug, Serialize)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
}

pub const MIN_PASSWORD_LEN: usize = 8;

/// Exchange credentials for an access token.
pub async fn login(api: &ApiClient, email: &str, password: &str) -> AgendaResult<TokenResponse> {
    api.post_anonymous("/api/auth/login", &Credentials { email, password })
        .await
}

/// Create an account. Short passwords are rejected before any request.
pub async fn register(api: &ApiClient, user: &NewUser) -> AgendaResult<User> {
    if user.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AgendaError::InvalidInput(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if !user.email.contains('@') {
        return Err(AgendaError::InvalidInput(format!(
            "'{}' is not an email address",
            user.email
        )));
    }

    api.post_anonymous("/api/auth/register", user).await
}
