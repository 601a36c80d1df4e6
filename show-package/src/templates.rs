use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

pub const INDEX_TEMPLATE: &str = "index.html";
pub const OBJECTS_TEMPLATE: &str = "objects.html";
pub const RULEBASE_TEMPLATE: &str = "rulebase.html";

const REQUIRED: [&str; 3] = [RULEBASE_TEMPLATE, INDEX_TEMPLATE, OBJECTS_TEMPLATE];

/// Where the report renderer reads its templates from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSource {
    Bundled,
    Custom(PathBuf),
}

impl TemplateSource {
    pub fn template_path(&self, name: &str) -> Option<PathBuf> {
        match self {
            TemplateSource::Bundled => None,
            TemplateSource::Custom(dir) => Some(dir.join(name)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Bundled => "bundled".to_string(),
            TemplateSource::Custom(dir) => dir.display().to_string(),
        }
    }
}

pub fn resolve(custom_dir: Option<&Path>) -> Result<TemplateSource> {
    let dir = match custom_dir.filter(|d| !d.as_os_str().is_empty()) {
        None => return Ok(TemplateSource::Bundled),
        Some(dir) => dir,
    };
    if !dir.exists() {
        let message = format!("Provided template directory [{}] does not exist!", dir.display());
        println!("{}", message);
        return Err(Error::Template(message));
    }
    if REQUIRED.iter().any(|name| !dir.join(name).exists()) {
        let message = format!(
            "Template files: {}, {} and {} were not found in the directory: '{}'.",
            RULEBASE_TEMPLATE,
            INDEX_TEMPLATE,
            OBJECTS_TEMPLATE,
            dir.display()
        );
        println!("{}", message);
        return Err(Error::Template(message));
    }
    Ok(TemplateSource::Custom(dir.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn no_directory_means_bundled() {
        assert_eq!(resolve(None).unwrap(), TemplateSource::Bundled);
    }

    #[test]
    fn missing_directory_is_rejected() {
        let err = resolve(Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn incomplete_directory_names_all_templates() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(INDEX_TEMPLATE), "<html/>").unwrap();
        let err = resolve(Some(dir.path())).unwrap_err();
        let msg = err.to_string();
        for name in REQUIRED {
            assert!(msg.contains(name), "{msg}");
        }
    }

    #[test]
    fn complete_directory_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        for name in REQUIRED {
            fs::write(dir.path().join(name), "<html/>").unwrap();
        }
        let source = resolve(Some(dir.path())).unwrap();
        assert_eq!(source.template_path(INDEX_TEMPLATE), Some(dir.path().join(INDEX_TEMPLATE)));
    }
}
