//! Phase orchestration around the external collaborators.

use crate::prompt::{login_payload, CredentialPrompt, LoginPayload};
use crate::session::RunSession;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Management web API client.
pub trait ManagementApi {
    fn login(&mut self, payload: &LoginPayload) -> Result<()>;
    /// Fills the session's accumulation files and lookup tables.
    fn fetch(&mut self, session: &mut RunSession) -> Result<()>;
    fn logout(&mut self) -> Result<()>;
}

pub trait ReportRenderer {
    /// Seals the accumulation files and writes the HTML report into the
    /// staging directory.
    fn render(&mut self, session: &mut RunSession) -> Result<()>;
}

pub trait Packager {
    fn package(&mut self, staging_dir: &Path, tar_path: &Path) -> Result<()>;
}

/// Runs login, fetch, render and package, and always finishes the session.
#[tracing::instrument(level = "info", skip_all)]
pub fn run(
    mut session: RunSession,
    prompt: &mut dyn CredentialPrompt,
    api: &mut dyn ManagementApi,
    renderer: &mut dyn ReportRenderer,
    packager: &mut dyn Packager,
) -> Result<()> {
    let outcome = phases(&mut session, prompt, api, renderer, packager);
    let cleaned = session.finish();
    outcome?;
    if !cleaned {
        warn!("staging area was not fully cleaned up");
    }
    Ok(())
}

fn phases(
    session: &mut RunSession,
    prompt: &mut dyn CredentialPrompt,
    api: &mut dyn ManagementApi,
    renderer: &mut dyn ReportRenderer,
    packager: &mut dyn Packager,
) -> Result<()> {
    let payload = login_payload(session.config(), prompt)?;
    api.login(&payload).context("login to management server")?;
    info!(server = %session.config().server, "logged in");

    let fetched = api.fetch(session).context("fetch policy package");
    if let Err(e) = api.logout() {
        warn!(error = %e, "logout failed");
    }
    fetched?;

    if session.config().show_package_list_only {
        info!(packages = session.installed_packages().len(), "package list only, skipping report");
        return Ok(());
    }

    renderer.render(session).context("render report")?;
    let paths = session.paths().clone();
    packager
        .package(&paths.staging_dir, &paths.tar_path)
        .context("package report")?;
    info!(tar = %paths.tar_path.display(), "report written");
    Ok(())
}
