use std::fmt::Display;
use std::fs;
use std::io::{self, Read, Write};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use file_lock::{FileLock, FileOptions};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Who the client acts as. `Patient` is a visitor browsing the patient
/// dashboard without an account session; `LoggedPatient` holds a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Role {
    #[serde(rename = "admin")]
    #[value(name = "admin")]
    Admin,

    #[serde(rename = "doctor")]
    #[value(name = "doctor")]
    Doctor,

    #[serde(rename = "patient")]
    #[value(name = "patient")]
    Patient,

    #[serde(rename = "loggedPatient")]
    #[value(name = "loggedPatient")]
    LoggedPatient,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Patient => "patient",
            Role::LoggedPatient => "loggedPatient",
        }
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "admin" => Role::Admin,
            "doctor" => Role::Doctor,
            "patient" => Role::Patient,
            "loggedPatient" => Role::LoggedPatient,
            _ => bail!("unknown role '{s}'"),
        })
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client-held authentication state. The token is opaque: it is never checked
/// for shape or expiry, the server's rejection is the only invalidation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    role: Option<Role>,
}

impl Session {
    pub fn new(token: Option<String>, role: Option<Role>) -> Self {
        Self {
            token: token.filter(|t| !t.is_empty()),
            role,
        }
    }

    pub fn logged_in(token: String, role: Role) -> Self {
        Self::new(Some(token), Some(role))
    }

    pub fn with_role(role: Role) -> Self {
        Self::new(None, Some(role))
    }

    /// Any non-empty token counts.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }
}

/// On-disk shape, keyed like the browser storage it replaces. An unknown
/// `userRole` is kept as a string so the session still loads; it simply grants
/// nothing.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    token: Option<String>,

    #[serde(default, rename = "userRole", skip_serializing_if = "Option::is_none")]
    user_role: Option<String>,
}

/// Session persisted in a single JSON file, read and written under an advisory
/// lock.
pub struct SessionStore {
    path: String,
}

impl SessionStore {
    pub fn new(path: impl ToString) -> Self {
        Self {
            path: path.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// A missing or unreadable file is an empty session.
    pub fn load(&self) -> Result<Session> {
        let data = match self.read()? {
            Some(data) => data,
            None => return Ok(Session::default()),
        };

        let stored: StoredSession = match serde_json::from_slice(&data) {
            Ok(stored) => stored,
            Err(_) => {
                warn!("Session file has invalid data, we will ignore it");
                return Ok(Session::default());
            }
        };

        let role = match stored.user_role {
            Some(ref role) => match role.parse() {
                Ok(role) => Some(role),
                Err(_) => {
                    warn!("Session file has unknown role '{role}', ignore it");
                    None
                }
            },
            None => None,
        };

        Ok(Session::new(stored.token, role))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        let stored = StoredSession {
            token: session.token.clone(),
            user_role: session.role.map(|r| r.as_str().to_string()),
        };
        let data = serde_json::to_vec(&stored).context("encode session")?;
        self.write(&data)
            .with_context(|| format!("write session file '{}'", self.path))?;
        debug!("Session saved to '{}'", self.path);
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("remove session file '{}'", self.path))
            }
        }
    }

    fn read(&self) -> Result<Option<Vec<u8>>> {
        let opts = FileOptions::new().read(true);
        let mut lock = match FileLock::lock(&self.path, true, opts) {
            Ok(lock) => lock,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("lock session file '{}'", self.path))
            }
        };

        let mut data = Vec::new();
        lock.file
            .read_to_end(&mut data)
            .with_context(|| format!("read session file '{}'", self.path))?;
        Ok(Some(data))
    }

    fn write(&self, data: &[u8]) -> Result<()> {
        let opts = FileOptions::new().write(true).truncate(true).create(true);
        let mut lock = FileLock::lock(&self.path, true, opts)?;
        lock.file.write_all(data)?;
        Ok(())
    }
}
