use show_package::cli::{resolve, Resolution};
use show_package::config::RunConfiguration;
use show_package::flags::{CATALOG, PASSWORD_MASK};
use show_package::Error;

fn args(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn resolved(v: &[&str]) -> (RunConfiguration, String) {
    let mut sink = Vec::new();
    match resolve(&args(v), &mut sink).unwrap() {
        Resolution::Resolved { config, debug_summary } => (config, debug_summary),
        Resolution::Help => panic!("unexpected help"),
    }
}

#[test]
fn credentials_and_gateway_scenario() {
    let (cfg, summary) = resolved(&["-u", "alice", "-p", "secret", "-g", "GW1"]);
    assert_eq!(cfg.username.as_deref(), Some("alice"));
    assert_eq!(cfg.password.as_deref(), Some("secret"));
    assert_eq!(cfg.requested_gateway.as_deref(), Some("GW1"));
    assert_eq!(cfg.server, show_package::config::LOCAL_SERVER);
    assert!(cfg.port.is_none() && !cfg.port_explicitly_set);
    assert!(!cfg.unsafe_tls && !cfg.keep_staging_dir && !cfg.show_hit_counts);
    assert!(cfg.requested_package.is_none() && cfg.domain.is_none() && cfg.proxy.is_none());
    assert!(!summary.contains("secret"));
    assert!(summary.contains(&format!("password:(-p)={}", PASSWORD_MASK)));
}

#[test]
fn one_echo_per_value_flag_in_input_order() {
    let input = [
        "-m", "mgmt", "-n", "4434", "-g", "gw", "-u", "u", "-p", "p", "-d", "dom", "-o", "/tmp/x",
        "-k", "pkg", "-x", "a:b@c:1", "-t", "/tpl",
    ];
    let (cfg, summary) = resolved(&input);
    let echoes: Vec<&str> = summary.split(' ').collect();
    assert_eq!(echoes.len(), 10);
    let flags: Vec<&str> = input.iter().step_by(2).copied().collect();
    for (echo, flag) in echoes.iter().zip(flags) {
        assert!(echo.contains(&format!("({})=", flag)), "{echo} vs {flag}");
    }
    assert_eq!(cfg.effective_port(), 4434);
    assert!(cfg.port_explicitly_set);
}

#[test]
fn switches_set_their_booleans() {
    let (cfg, summary) = resolved(&["-b", "-r", "-v", "-c", "-s"]);
    assert!(cfg.unsafe_tls && cfg.keep_staging_dir && cfg.show_package_list_only && cfg.show_hit_counts);
    assert_eq!(cfg.log_level, show_package::config::LogLevel::Info);
    assert_eq!(summary.split(' ').count(), 5);
}

#[test]
fn trailing_value_flag_is_usage_error() {
    for option in CATALOG.iter().filter(|o| o.takes_value()) {
        let mut sink = Vec::new();
        let err = resolve(&args(&["-c", option.flag]), &mut sink).unwrap_err();
        assert!(matches!(err, Error::Usage(_)), "{}", option.flag);
    }
}

#[test]
fn single_character_token_is_usage_error_anywhere() {
    for input in [vec!["x"], vec!["-c", "-"], vec!["-u", "bob", "q", "-c"]] {
        let mut sink = Vec::new();
        let err = resolve(&args(&input), &mut sink).unwrap_err();
        assert!(matches!(err, Error::Usage(_)), "{input:?}");
        assert!(String::from_utf8(sink).unwrap().starts_with("Usage:"));
    }
}

#[test]
fn help_prints_one_block_per_entry() {
    let mut sink = Vec::new();
    let res = resolve(&args(&["-c", "-h", "-m"]), &mut sink).unwrap();
    assert!(matches!(res, Resolution::Help));
    let text = String::from_utf8(sink).unwrap();
    let blocks: Vec<&str> = text.lines().filter(|l| l.starts_with('[')).collect();
    assert_eq!(blocks.len(), CATALOG.len());
    for option in CATALOG {
        assert!(blocks.iter().any(|b| b.starts_with(&format!("[{}", option.flag))));
    }
}
