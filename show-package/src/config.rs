use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Management server address used when `-m` is not given.
pub const LOCAL_SERVER: &str = "127.0.0.1";
/// Web API port used when `-n` is not given.
pub const DEFAULT_PORT: u16 = 443;
pub const CONFIG_ENV: &str = "SHOW_PACKAGE_CONFIG";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Debug,
    Info,
}

impl LogLevel {
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
        }
    }
}

/// Effective settings of one run, assembled from defaults, the defaults file
/// and the command line.
#[derive(Clone)]
pub struct RunConfiguration {
    pub server: String,
    pub port: Option<u16>,
    pub port_explicitly_set: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub domain: Option<String>,
    pub unsafe_tls: bool,
    pub requested_gateway: Option<String>,
    pub requested_package: Option<String>,
    pub show_hit_counts: bool,
    pub show_package_list_only: bool,
    pub keep_staging_dir: bool,
    pub proxy: Option<String>,
    pub custom_template_dir: Option<PathBuf>,
    pub output_path_hint: Option<String>,
    pub log_level: LogLevel,
}

impl Default for RunConfiguration {
    fn default() -> Self {
        Self {
            server: LOCAL_SERVER.to_string(),
            port: None,
            port_explicitly_set: false,
            username: None,
            password: None,
            domain: None,
            unsafe_tls: false,
            requested_gateway: None,
            requested_package: None,
            show_hit_counts: false,
            show_package_list_only: false,
            keep_staging_dir: false,
            proxy: None,
            custom_template_dir: None,
            output_path_hint: None,
            log_level: LogLevel::Debug,
        }
    }
}

impl fmt::Debug for RunConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunConfiguration")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("port_explicitly_set", &self.port_explicitly_set)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| crate::flags::PASSWORD_MASK))
            .field("domain", &self.domain)
            .field("unsafe_tls", &self.unsafe_tls)
            .field("requested_gateway", &self.requested_gateway)
            .field("requested_package", &self.requested_package)
            .field("show_hit_counts", &self.show_hit_counts)
            .field("show_package_list_only", &self.show_package_list_only)
            .field("keep_staging_dir", &self.keep_staging_dir)
            .field("proxy", &self.proxy)
            .field("custom_template_dir", &self.custom_template_dir)
            .field("output_path_hint", &self.output_path_hint)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl RunConfiguration {
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    pub fn domain_or_empty(&self) -> &str {
        self.domain.as_deref().unwrap_or("")
    }

    /// Root login relies on local trust: talking to the local server without
    /// a user name.
    pub fn is_root_login(&self) -> bool {
        self.server == LOCAL_SERVER && self.username.as_deref().map_or(true, str::is_empty)
    }
}

/// Optional per-user defaults file. Credentials are never read from it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Defaults {
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub proxy: Option<String>,
    #[serde(default)]
    pub template_dir: Option<PathBuf>,
    #[serde(default)]
    pub unsafe_tls: Option<bool>,
    #[serde(default)]
    pub output: Option<String>,
}

impl Defaults {
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path).map_err(|e| Error::io("read config file", path, e))?;
        serde_yaml::from_str(&data)
            .map_err(|e| Error::Config(format!("parse '{}': {}", path.display(), e)))
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Ok(v) = std::env::var(CONFIG_ENV) {
            if !v.is_empty() {
                return Some(PathBuf::from(v));
            }
        }
        ProjectDirs::from("", "", "show-package").map(|proj| proj.config_dir().join("config.yaml"))
    }

    pub fn apply(&self, cfg: &mut RunConfiguration) {
        if let Some(server) = self.server.clone() {
            cfg.server = server;
        }
        if let Some(port) = self.port {
            cfg.port = Some(port);
            cfg.port_explicitly_set = true;
        }
        if let Some(domain) = self.domain.clone() {
            cfg.domain = Some(domain);
        }
        if let Some(proxy) = self.proxy.clone() {
            cfg.proxy = Some(proxy);
        }
        if let Some(dir) = self.template_dir.clone() {
            cfg.custom_template_dir = Some(dir);
        }
        if let Some(unsafe_tls) = self.unsafe_tls {
            cfg.unsafe_tls = unsafe_tls;
        }
        if let Some(output) = self.output.clone() {
            cfg.output_path_hint = Some(output);
        }
    }

    pub fn into_configuration(self) -> RunConfiguration {
        let mut cfg = RunConfiguration::default();
        self.apply(&mut cfg);
        cfg
    }
}
