use crate::config::{Defaults, RunConfiguration};
use crate::error::{Error, Result};
use crate::flags::{self, Action};
use crate::output::emit_data;
use crate::paths;
use crate::prompt::{login_payload, TerminalPrompt};
use crate::session::RunSession;
use crate::templates;
use crate::util::RunStamp;
use crate::logging;
use std::io::Write;
use tracing::{debug, info};

/// Outcome of scanning the command line.
#[derive(Debug)]
pub enum Resolution {
    Resolved {
        config: RunConfiguration,
        /// Space separated echo of every recognised switch, password masked.
        debug_summary: String,
    },
    /// `-h` was seen; usage has been printed and the run must stop successfully.
    Help,
}

pub fn resolve(args: &[String], out: &mut dyn Write) -> Result<Resolution> {
    resolve_with(RunConfiguration::default(), args, out)
}

/// Applies `args` on top of `base`, left to right. Later duplicates win.
pub fn resolve_with(
    mut config: RunConfiguration,
    args: &[String],
    out: &mut dyn Write,
) -> Result<Resolution> {
    let mut echoes: Vec<String> = Vec::new();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg.chars().count() < 2 {
            return Err(usage(
                out,
                format!(
                    "invalid argument: '{}'. The Flag should start with '-' and then the flag letter",
                    arg
                ),
            ));
        }
        let Some(option) = flags::lookup(arg) else {
            let _ = writeln!(out, "Unsupported option: {}", arg);
            let _ = flags::write_catalog(out);
            i += 1;
            continue;
        };
        match option.action {
            Action::Help => {
                let _ = flags::write_usage(out);
                return Ok(Resolution::Help);
            }
            Action::Apply(apply) if !option.takes_value() => {
                apply(&mut config, "").map_err(|m| usage(out, m))?;
                i += 1;
            }
            Action::Apply(apply) => {
                let Some(value) = args.get(i + 1) else {
                    return Err(usage(
                        out,
                        format!(
                            "The format of an argument should be: <flag , value>; '{}' has no value",
                            arg
                        ),
                    ));
                };
                apply(&mut config, value).map_err(|m| usage(out, m))?;
                i += 2;
            }
        }
        echoes.push((option.echo)(&config));
    }
    Ok(Resolution::Resolved { config, debug_summary: echoes.join(" ") })
}

fn usage(out: &mut dyn Write, message: String) -> Error {
    let _ = writeln!(out, "Usage: {}", message);
    Error::Usage(message)
}

/// Binary entry: prepares the run and reports it.
pub fn run(args: &[String]) -> anyhow::Result<()> {
    let stamp = RunStamp::now();
    let mut stdout = std::io::stdout();
    let base = Defaults::load()?.into_configuration();
    let (config, debug_summary) = match resolve_with(base, args, &mut stdout)? {
        Resolution::Help => return Ok(()),
        Resolution::Resolved { config, debug_summary } => (config, debug_summary),
    };

    let templates = templates::resolve(config.custom_template_dir.as_deref())?;
    let cwd = std::env::current_dir()?;
    let planned = paths::plan(config.output_path_hint.as_deref(), &cwd, &stamp)?;
    let mut session = RunSession::open(config, planned, templates)?;

    let log_file = logging::configure(
        &session.paths().staging_dir,
        &stamp,
        session.config().log_level,
        &debug_summary,
    );
    info!(staging = %session.paths().staging_dir.display(), "staging area ready");

    let payload = match login_payload(session.config(), &mut TerminalPrompt) {
        Ok(payload) => payload,
        Err(err) => {
            session.finish();
            return Err(err.into());
        }
    };
    debug!(root_login = payload.is_root(), "login payload prepared");

    let report = serde_json::json!({
        "version": flags::TOOL_VERSION,
        "server": session.config().server,
        "port": session.config().effective_port(),
        "login": if payload.is_root() { "root" } else { "credentials" },
        "staging_dir": session.paths().staging_dir.display().to_string(),
        "tar_path": session.paths().tar_path.display().to_string(),
        "log_file": log_file.map(|p| p.display().to_string()),
        "templates": session.templates().describe(),
        "keep_staging_dir": session.config().keep_staging_dir,
    });
    let emitted = emit_data(&report);
    let cleaned = session.finish();
    emitted?;
    if !cleaned {
        anyhow::bail!("failed to clean up the staging area");
    }
    Ok(())
}
