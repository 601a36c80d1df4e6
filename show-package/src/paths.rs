use crate::error::{Error, Result};
use crate::util::{random_token, RunStamp, TAR_SUFFIX};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Absolute locations chosen for one run. Fixed once the staging directory exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedPaths {
    pub staging_dir: PathBuf,
    pub tar_path: PathBuf,
}

/// Splits the `-o` hint into the result directory and the tar file path.
pub fn derive_targets(hint: Option<&str>, cwd: &Path, stamp: &RunStamp) -> Result<(PathBuf, PathBuf)> {
    let hint = match hint.filter(|h| !h.is_empty()) {
        None => return Ok((cwd.to_path_buf(), cwd.join(stamp.tar_name()))),
        Some(h) => h,
    };
    let user_path = normalize_lexical(&cwd.join(hint));
    if hint.ends_with(TAR_SUFFIX) {
        let parent = user_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| {
                Error::path(
                    format!("Cannot resolve the directory of '{}'", user_path.display()),
                    &user_path,
                )
            })?
            .to_path_buf();
        Ok((parent, user_path))
    } else {
        let tar = user_path.join(stamp.tar_name());
        Ok((user_path, tar))
    }
}

/// Chooses and creates a fresh staging directory under the result directory.
///
/// The tar target is checked before anything is created so that a collision
/// leaves no directory behind.
#[tracing::instrument(level = "info", skip_all)]
pub fn plan(hint: Option<&str>, cwd: &Path, stamp: &RunStamp) -> Result<PlannedPaths> {
    let (result_dir, tar_path) = derive_targets(hint, cwd, stamp)?;

    if tar_path.exists() {
        let message = format!("File '{}' is already exists!", tar_path.display());
        println!("{}", message);
        return Err(Error::path(message, tar_path));
    }

    let staging_dir = result_dir.join(random_token());
    establish_empty_dir(&staging_dir)?;
    debug!(staging = %staging_dir.display(), tar = %tar_path.display(), "planned output paths");
    Ok(PlannedPaths { staging_dir, tar_path })
}

/// Creates `dir` when missing, then insists it is an empty directory.
pub fn establish_empty_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        if let Err(e) = fs::create_dir(dir) {
            let message = format!("Failed to create output directory '{}': {}", dir.display(), e);
            println!("{}", message);
            return Err(Error::path(message, dir));
        }
    }
    if !dir.is_dir() {
        let message = format!("'{}' is not a directory!", dir.display());
        println!("{}", message);
        return Err(Error::path(message, dir));
    }
    let mut entries = fs::read_dir(dir).map_err(|e| Error::io("list directory", dir, e))?;
    if entries.next().is_some() {
        let message = format!("Directory '{}' is not empty!", dir.display());
        println!("{}", message);
        return Err(Error::path(message, dir));
    }
    Ok(())
}

fn normalize_lexical(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component.as_os_str());
                }
            }
            _ => normalized.push(component.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_hint_uses_cwd_and_generated_name() {
        let stamp = RunStamp::now();
        let (dir, tar) = derive_targets(None, Path::new("/work"), &stamp).unwrap();
        assert_eq!(dir, Path::new("/work"));
        assert_eq!(tar, Path::new("/work").join(stamp.tar_name()));
    }

    #[test]
    fn tar_hint_is_taken_literally() {
        let stamp = RunStamp::now();
        let (dir, tar) =
            derive_targets(Some("/out/report.tar.gz"), Path::new("/work"), &stamp).unwrap();
        assert_eq!(dir, Path::new("/out"));
        assert_eq!(tar, Path::new("/out/report.tar.gz"));
    }

    #[test]
    fn relative_hints_resolve_against_cwd() {
        let stamp = RunStamp::now();
        let (dir, tar) =
            derive_targets(Some("./runs/../reports"), Path::new("/work"), &stamp).unwrap();
        assert_eq!(dir, Path::new("/work/reports"));
        assert_eq!(tar, Path::new("/work/reports").join(stamp.tar_name()));

        let (dir, _) = derive_targets(Some("x.tar.gz"), Path::new("/work"), &stamp).unwrap();
        assert_eq!(dir, Path::new("/work"));
    }
}
