use show_package::config::{Defaults, CONFIG_ENV};
use show_package::Error;
use std::fs;

#[test]
fn missing_defaults_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let defaults = Defaults::load_from(&dir.path().join("absent.yaml")).unwrap();
    assert_eq!(defaults, Defaults::default());
}

#[test]
fn defaults_file_is_parsed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "server: 10.2.2.2\ndomain: Global\nunsafe_tls: true\n").unwrap();
    let cfg = Defaults::load_from(&path).unwrap().into_configuration();
    assert_eq!(cfg.server, "10.2.2.2");
    assert_eq!(cfg.domain.as_deref(), Some("Global"));
    assert!(cfg.unsafe_tls);
    assert!(cfg.password.is_none());
}

#[test]
fn broken_defaults_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    fs::write(&path, "port: [not a number\n").unwrap();
    assert!(matches!(Defaults::load_from(&path), Err(Error::Config(_))));
}

#[test]
fn config_path_honours_env_override() {
    std::env::set_var(CONFIG_ENV, "/etc/show-package.yaml");
    let path = Defaults::config_path().unwrap();
    std::env::remove_var(CONFIG_ENV);
    assert_eq!(path, std::path::PathBuf::from("/etc/show-package.yaml"));
}
