use show_package::config::LogLevel;
use show_package::logging::configure;
use show_package::util::RunStamp;
use std::path::Path;

// Installs the process-wide subscriber, so it lives alone in this test binary.
#[test]
fn unwritable_log_dir_falls_back_to_stderr() {
    let missing = Path::new("/nonexistent/show-package/staging");
    let log_file = configure(missing, &RunStamp::now(), LogLevel::Debug, "server:(-m)=127.0.0.1");
    assert!(log_file.is_none());

    // the fallback subscriber is installed: logging keeps working
    tracing::info!("still logging after fallback");
    assert!(tracing::dispatcher::has_been_set());
}

#[test]
fn fallback_stays_soft_when_called_again() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone");
    assert!(configure(&missing, &RunStamp::now(), LogLevel::Info, "").is_none());
}
