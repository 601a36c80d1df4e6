use crate::config::RunConfiguration;
use crate::error::{Error, Result};
use crate::flags::PASSWORD_MASK;
use serde::Serialize;
use std::fmt;
use std::io::{self, BufRead, IsTerminal, Write};
use tracing::{debug, error};

/// Source of credentials that were not given on the command line.
pub trait CredentialPrompt {
    fn read_username(&mut self) -> Result<String>;
    fn read_password(&mut self) -> Result<String>;
}

/// Reads from the controlling terminal; never falls back to piped input.
pub struct TerminalPrompt;

fn require_terminal(what: &'static str) -> Result<()> {
    if io::stdin().is_terminal() {
        return Ok(());
    }
    error!("no interactive terminal available to read the {}", what);
    println!("Couldn't get an interactive terminal to read the {}", what);
    Err(Error::Interactive(what))
}

impl CredentialPrompt for TerminalPrompt {
    fn read_username(&mut self) -> Result<String> {
        require_terminal("user name")?;
        let mut stdout = io::stdout();
        write!(stdout, "Enter user name: ")
            .and_then(|_| stdout.flush())
            .map_err(|e| Error::io("write prompt", "<stdout>", e))?;
        let mut line = String::new();
        io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::io("read user name", "<terminal>", e))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn read_password(&mut self) -> Result<String> {
        require_terminal("password")?;
        rpassword::prompt_password("Enter password: ")
            .map_err(|e| Error::io("read password", "<terminal>", e))
    }
}

/// Body of the management login call. Always read-only.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct LoginPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(rename = "read-only")]
    pub read_only: bool,
}

impl LoginPayload {
    pub fn is_root(&self) -> bool {
        self.user.is_none()
    }
}

impl fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPayload")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| PASSWORD_MASK))
            .field("domain", &self.domain)
            .field("read_only", &self.read_only)
            .finish()
    }
}

fn given(v: &Option<String>) -> Option<String> {
    v.clone().filter(|s| !s.is_empty())
}

/// Builds the login body, prompting only for what is missing.
pub fn login_payload(cfg: &RunConfiguration, prompt: &mut dyn CredentialPrompt) -> Result<LoginPayload> {
    let (user, password) = if cfg.is_root_login() {
        (None, None)
    } else {
        let user = match given(&cfg.username) {
            Some(u) => u,
            None => prompt.read_username()?,
        };
        let password = match given(&cfg.password) {
            Some(p) => p,
            None => prompt.read_password()?,
        };
        (Some(user), Some(password))
    };
    debug!("Login with 'read-only' flag.");
    Ok(LoginPayload { user, password, domain: given(&cfg.domain), read_only: true })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Scripted {
        asked: Vec<&'static str>,
    }

    impl CredentialPrompt for Scripted {
        fn read_username(&mut self) -> Result<String> {
            self.asked.push("user");
            Ok("typed-user".into())
        }

        fn read_password(&mut self) -> Result<String> {
            self.asked.push("password");
            Ok("typed-pass".into())
        }
    }

    #[test]
    fn root_login_sends_no_credentials() {
        let cfg = RunConfiguration { domain: Some("SMC User".into()), ..Default::default() };
        let mut prompt = Scripted::default();
        let payload = login_payload(&cfg, &mut prompt).unwrap();
        assert!(payload.is_root());
        assert!(prompt.asked.is_empty());
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body, serde_json::json!({"domain": "SMC User", "read-only": true}));
    }

    #[test]
    fn missing_password_is_prompted() {
        let cfg = RunConfiguration {
            server: "10.1.1.1".into(),
            username: Some("admin".into()),
            ..Default::default()
        };
        let mut prompt = Scripted::default();
        let payload = login_payload(&cfg, &mut prompt).unwrap();
        assert_eq!(prompt.asked, vec!["password"]);
        assert_eq!(payload.user.as_deref(), Some("admin"));
        assert_eq!(payload.password.as_deref(), Some("typed-pass"));
        assert!(!format!("{:?}", payload).contains("typed-pass"));
    }

    #[test]
    fn remote_server_prompts_for_both() {
        let cfg = RunConfiguration { server: "mgmt".into(), ..Default::default() };
        let mut prompt = Scripted::default();
        login_payload(&cfg, &mut prompt).unwrap();
        assert_eq!(prompt.asked, vec!["user", "password"]);
    }
}
