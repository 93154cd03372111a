use std::path::PathBuf;
use std::{env, fs, io};

use anyhow::{bail, Context, Result};
use clap::Args;
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const APP_NAME: &str = "clinicdesk";

pub struct PathSet {
    pub config_path: PathBuf,
    pub data_path: PathBuf,
}

impl PathSet {
    pub fn new(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => match env::var("CLINICDESK_CONFIG") {
                Ok(path) => PathBuf::from(path),
                Err(_) if is_root() => PathBuf::from("/etc").join(APP_NAME),
                Err(_) => home_dir()?.join(".config").join(APP_NAME),
            },
        };

        let data_path = match data_path {
            Some(path) => path,
            None => match env::var("CLINICDESK_DATA") {
                Ok(path) => PathBuf::from(path),
                Err(_) if is_root() => PathBuf::from("/var/lib").join(APP_NAME),
                Err(_) => home_dir()?.join(".local").join("share").join(APP_NAME),
            },
        };

        fs::create_dir_all(&config_path)
            .with_context(|| format!("ensure config directory: {}", config_path.display()))?;
        fs::create_dir_all(&data_path)
            .with_context(|| format!("ensure data directory: {}", data_path.display()))?;

        Ok(Self {
            config_path,
            data_path,
        })
    }

    /// Reads `<name>.toml` from the config dir. The flag tells whether the
    /// file existed or the defaults were used.
    pub fn load_config<T, F>(&self, name: &str, default_func: F) -> Result<(T, bool)>
    where
        T: CommonConfig + DeserializeOwned,
        F: FnOnce() -> T,
    {
        let path = self.config_path.join(format!("{name}.toml"));
        let (mut cfg, from_file): (T, bool) = match fs::read_to_string(&path) {
            Ok(s) => (toml::from_str(&s).context("parse config toml")?, true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => (default_func(), false),
            Err(err) => {
                return Err(err).context(format!("read config file: {}", path.display()));
            }
        };

        cfg.complete(self).context("validate config")?;
        Ok((cfg, from_file))
    }
}

fn home_dir() -> Result<PathBuf> {
    match env::var_os("HOME").or_else(|| env::var_os("USERPROFILE")) {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => bail!("could not determine home directory, please set --config-path and --data-path"),
    }
}

#[cfg(unix)]
fn is_root() -> bool {
    unsafe { libc::geteuid() == 0 }
}

#[cfg(not(unix))]
fn is_root() -> bool {
    false
}

pub trait CommonConfig {
    fn default() -> Self;
    fn complete(&mut self, ps: &PathSet) -> Result<()>;
}

/// See: [`shellexpand::full`].
pub fn expandenv(name: &str, s: impl AsRef<str>) -> Result<String> {
    let s =
        shellexpand::full(s.as_ref()).with_context(|| format!("expand env value for '{name}'"))?;
    Ok(s.to_string())
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Directory holding `client.toml`. Defaults to `$CLINICDESK_CONFIG` or
    /// `~/.config/clinicdesk`.
    #[arg(long)]
    pub config_path: Option<PathBuf>,

    /// Directory holding the session file. Defaults to `$CLINICDESK_DATA` or
    /// `~/.local/share/clinicdesk`.
    #[arg(long)]
    pub data_path: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn build_path_set(&self) -> Result<PathSet> {
        PathSet::new(self.config_path.clone(), self.data_path.clone())
    }

    pub fn load<T>(&self, name: &str) -> Result<(T, bool)>
    where
        T: CommonConfig + DeserializeOwned,
    {
        let ps = self.build_path_set()?;
        ps.load_config(name, T::default)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ClientConfig {
    /// Base url of the clinic REST backend, every endpoint path is appended to it.
    #[serde(default = "ClientConfig::default_api_url")]
    pub api_url: String,

    #[serde(default = "ClientConfig::default_session_path")]
    pub session_path: String,

    #[serde(default = "ClientConfig::default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl CommonConfig for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: Self::default_api_url(),
            session_path: Self::default_session_path(),
            log_level: Self::default_log_level(),
            accept_invalid_certs: false,
        }
    }

    fn complete(&mut self, ps: &PathSet) -> Result<()> {
        self.api_url = expandenv("api_url", &self.api_url)?;
        self.api_url = self.api_url.trim_end_matches('/').to_string();
        if self.api_url.is_empty() {
            bail!("api_url cannot be empty");
        }
        let parsed = match Url::parse(&self.api_url) {
            Ok(url) => url,
            Err(_) => bail!("invalid api_url '{}'", self.api_url),
        };
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => bail!("invalid api_url scheme, expect 'http' or 'https', not '{scheme}'"),
        }

        self.session_path = expandenv("session_path", &self.session_path)?;
        if self.session_path.is_empty() {
            let path = ps.data_path.join("session");
            self.session_path = format!("{}", path.display());
        }

        match self.log_level.as_str() {
            "error" | "warn" | "info" | "debug" => {}
            level => bail!("unknown log_level '{level}', expect error, warn, info or debug"),
        }

        Ok(())
    }
}

impl ClientConfig {
    pub fn default_api_url() -> String {
        String::from("http://127.0.0.1:8080")
    }

    pub fn default_session_path() -> String {
        String::new()
    }

    pub fn default_log_level() -> String {
        String::from("info")
    }
}
