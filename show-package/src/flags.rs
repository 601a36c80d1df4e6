//! Catalog of the recognised command line switches.
//!
//! Every switch is defined once: what it does to the configuration, how it is
//! described in the usage text, and how it is echoed into the debug summary.

use crate::config::{LogLevel, RunConfiguration, DEFAULT_PORT, LOCAL_SERVER};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;

pub const TOOL_VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));
pub const PASSWORD_MASK: &str = "*****";

pub type ApplyFn = fn(&mut RunConfiguration, &str) -> Result<(), String>;

#[derive(Clone, Copy)]
pub enum Action {
    Apply(ApplyFn),
    /// Print the usage guide and stop.
    Help,
}

pub struct FlagOption {
    pub flag: &'static str,
    /// Value placeholder shown in the usage text; `None` for switches.
    pub placeholder: Option<&'static str>,
    pub action: Action,
    pub describe: fn() -> Vec<String>,
    pub echo: fn(&RunConfiguration) -> String,
}

impl FlagOption {
    pub fn takes_value(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn usage_line(&self) -> String {
        match self.placeholder {
            Some(p) => format!("[{} {}]", self.flag, p),
            None => format!("[{}]", self.flag),
        }
    }
}

fn lines(text: &[&str]) -> Vec<String> {
    text.iter().map(|s| s.to_string()).collect()
}

fn shown(v: &Option<String>) -> &str {
    v.as_deref().unwrap_or("")
}

pub static CATALOG: &[FlagOption] = &[
    FlagOption {
        flag: "-m",
        placeholder: Some("server-IP"),
        action: Action::Apply(|cfg, v| {
            cfg.server = v.to_string();
            Ok(())
        }),
        describe: || {
            vec![
                "Management server ip address.".into(),
                format!("Default value is {{{}}}.", LOCAL_SERVER),
            ]
        },
        echo: |cfg| format!("server:(-m)={}", cfg.server),
    },
    FlagOption {
        flag: "-n",
        placeholder: Some("port-number"),
        action: Action::Apply(|cfg, v| {
            let port = v
                .trim()
                .parse::<u16>()
                .map_err(|_| format!("invalid port number: '{}'", v))?;
            cfg.port = Some(port);
            cfg.port_explicitly_set = true;
            Ok(())
        }),
        describe: || {
            vec![
                "Port of WebAPI server on management server.".into(),
                format!("Default {{{}}}.", DEFAULT_PORT),
            ]
        },
        echo: |cfg| format!("port:(-n)={}", cfg.effective_port()),
    },
    FlagOption {
        flag: "-g",
        placeholder: Some("gateway-name"),
        action: Action::Apply(|cfg, v| {
            cfg.requested_gateway = Some(v.to_string());
            Ok(())
        }),
        describe: || {
            lines(&[
                "Gateway name.",
                "Shows the policy packages which are installed on this gateway.",
            ])
        },
        echo: |cfg| format!("userRequestGateway:(-g)={}", shown(&cfg.requested_gateway)),
    },
    FlagOption {
        flag: "-u",
        placeholder: Some("user-name"),
        action: Action::Apply(|cfg, v| {
            cfg.username = Some(v.to_string());
            Ok(())
        }),
        describe: || lines(&["Management administrator user name."]),
        echo: |cfg| format!("username:(-u)={}", shown(&cfg.username)),
    },
    FlagOption {
        flag: "-p",
        placeholder: Some("password"),
        action: Action::Apply(|cfg, v| {
            cfg.password = Some(v.to_string());
            Ok(())
        }),
        describe: || lines(&["Management administrator password."]),
        echo: |_| format!("password:(-p)={}", PASSWORD_MASK),
    },
    FlagOption {
        flag: "-d",
        placeholder: Some("domain-name"),
        action: Action::Apply(|cfg, v| {
            cfg.domain = Some(v.to_string());
            Ok(())
        }),
        describe: || lines(&["Name, uid or IP-address of the management domain."]),
        echo: |cfg| format!("domain:(-d)={}", shown(&cfg.domain)),
    },
    FlagOption {
        flag: "-b",
        placeholder: None,
        action: Action::Apply(|cfg, _| {
            cfg.unsafe_tls = true;
            Ok(())
        }),
        describe: || lines(&["UNSAFE! Ignore certificate verification.", "Default {false}"]),
        echo: |cfg| format!("unsafe:(-b)={}", cfg.unsafe_tls),
    },
    FlagOption {
        flag: "-r",
        placeholder: None,
        action: Action::Apply(|cfg, _| {
            cfg.keep_staging_dir = true;
            Ok(())
        }),
        describe: || lines(&["Keep show package temporary folder."]),
        echo: |cfg| format!("deleteTemporaryFile:(-r)={}", !cfg.keep_staging_dir),
    },
    FlagOption {
        flag: "-o",
        placeholder: Some("path"),
        action: Action::Apply(|cfg, v| {
            cfg.output_path_hint = Some(v.to_string());
            Ok(())
        }),
        describe: || {
            vec![
                "Result path.".into(),
                "Path where to store the result tar file.".into(),
                format!("Or path with {} suffix in order to set tar file name.", crate::util::TAR_SUFFIX),
                "The default is the current directory.".into(),
            ]
        },
        echo: |cfg| format!("folderPath:(-o)={}", shown(&cfg.output_path_hint)),
    },
    FlagOption {
        flag: "-k",
        placeholder: Some("package-name"),
        action: Action::Apply(|cfg, v| {
            cfg.requested_package = Some(v.to_string());
            Ok(())
        }),
        describe: || lines(&["Package name.", "The policy package to show."]),
        echo: |cfg| format!("userRequestPackage:(-k)={}", shown(&cfg.requested_package)),
    },
    FlagOption {
        flag: "-v",
        placeholder: None,
        action: Action::Apply(|cfg, _| {
            cfg.show_package_list_only = true;
            Ok(())
        }),
        describe: || lines(&["List the existing policy packages."]),
        echo: |cfg| format!("showPackagesList:(-v)={}", cfg.show_package_list_only),
    },
    FlagOption {
        flag: "-c",
        placeholder: None,
        action: Action::Apply(|cfg, _| {
            cfg.show_hit_counts = true;
            Ok(())
        }),
        describe: || lines(&["Show Access Policy rules hit counts.", "Default {false}"]),
        echo: |cfg| format!("showRulesHitCounts:(-c)={}", cfg.show_hit_counts),
    },
    FlagOption {
        flag: "-x",
        placeholder: Some("proxy-settings"),
        action: Action::Apply(|cfg, v| {
            cfg.proxy = Some(v.to_string());
            Ok(())
        }),
        describe: || lines(&["Proxy settings example: user:password@proxy.server:port"]),
        echo: |cfg| format!("proxy:(-x)={}", shown(&cfg.proxy)),
    },
    FlagOption {
        flag: "-t",
        placeholder: Some("path"),
        action: Action::Apply(|cfg, v| {
            cfg.custom_template_dir = Some(PathBuf::from(v));
            Ok(())
        }),
        describe: || {
            lines(&[
                "Custom Template Path.",
                "Path where the custom templates are stored.",
                "The default templates are bundled into the tool.",
            ])
        },
        echo: |cfg| {
            let dir = cfg
                .custom_template_dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            format!("templateDirectory:(-t)={}", dir)
        },
    },
    FlagOption {
        flag: "-s",
        placeholder: None,
        action: Action::Apply(|cfg, _| {
            cfg.log_level = LogLevel::Info;
            Ok(())
        }),
        describe: || lines(&["Minimal debug information."]),
        echo: |_| "debug:(-s)=true".to_string(),
    },
    FlagOption {
        flag: "-h",
        placeholder: None,
        action: Action::Help,
        describe: || lines(&["Usage guide."]),
        echo: |_| "help:(-h)=true".to_string(),
    },
];

static INDEX: Lazy<HashMap<&'static str, &'static FlagOption>> =
    Lazy::new(|| CATALOG.iter().map(|o| (o.flag, o)).collect());

pub fn lookup(flag: &str) -> Option<&'static FlagOption> {
    INDEX.get(flag).copied()
}

fn write_description(out: &mut dyn Write, option: &FlagOption) -> io::Result<()> {
    for line in (option.describe)() {
        writeln!(out, "\t{}", line)?;
    }
    Ok(())
}

/// Full usage guide: version banner and one block per catalog entry.
pub fn write_usage(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "show-package version: {}", TOOL_VERSION)?;
    writeln!(out)?;
    writeln!(out, "show-package optional-switches")?;
    writeln!(out)?;
    writeln!(out, "optional-switches:")?;
    writeln!(out, "---------------")?;
    for option in CATALOG {
        writeln!(out, "{}", option.usage_line())?;
        write_description(out, option)?;
    }
    writeln!(out)?;
    out.flush()
}

/// Short listing shown after an unsupported switch: flag and description only.
pub fn write_catalog(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Supported options:")?;
    for option in CATALOG {
        writeln!(out, "{}", option.flag)?;
        write_description(out, option)?;
    }
    out.flush()
}
