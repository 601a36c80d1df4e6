use crate::config::RunConfiguration;
use crate::error::Result;
use crate::paths::PlannedPaths;
use crate::staging::StagingArea;
use crate::templates::TemplateSource;
use std::collections::{HashMap, HashSet};
use std::fs;
use tracing::{info, warn};

/// Everything one run owns: settings, planned paths, open staging files and
/// the lookup tables filled while fetching.
#[derive(Debug)]
pub struct RunSession {
    config: RunConfiguration,
    paths: PlannedPaths,
    templates: TemplateSource,
    staging: StagingArea,
    uid_to_name: HashMap<String, String>,
    known_inline_layers: HashSet<String>,
    installed_packages: Vec<String>,
    finished: bool,
}

impl RunSession {
    pub fn open(config: RunConfiguration, paths: PlannedPaths, templates: TemplateSource) -> Result<Self> {
        let staging = match StagingArea::open(&paths.staging_dir) {
            Ok(staging) => staging,
            Err(err) => {
                if !config.keep_staging_dir {
                    let _ = fs::remove_dir_all(&paths.staging_dir);
                }
                return Err(err);
            }
        };
        Ok(Self {
            config,
            paths,
            templates,
            staging,
            uid_to_name: HashMap::new(),
            known_inline_layers: HashSet::new(),
            installed_packages: Vec::new(),
            finished: false,
        })
    }

    pub fn config(&self) -> &RunConfiguration {
        &self.config
    }

    pub fn paths(&self) -> &PlannedPaths {
        &self.paths
    }

    pub fn templates(&self) -> &TemplateSource {
        &self.templates
    }

    pub fn staging(&mut self) -> &mut StagingArea {
        &mut self.staging
    }

    pub fn remember_name(&mut self, uid: impl Into<String>, name: impl Into<String>) {
        self.uid_to_name.insert(uid.into(), name.into());
    }

    pub fn name_of(&self, uid: &str) -> Option<&str> {
        self.uid_to_name.get(uid).map(String::as_str)
    }

    pub fn uid_to_name(&self) -> &HashMap<String, String> {
        &self.uid_to_name
    }

    /// Inline layers accumulate across packages.
    pub fn add_known_inline_layer(&mut self, layer: impl Into<String>) {
        self.known_inline_layers.insert(layer.into());
    }

    pub fn is_known_inline_layer(&self, layer: &str) -> bool {
        self.known_inline_layers.contains(layer)
    }

    pub fn add_installed_package(&mut self, package: impl Into<String>) {
        self.installed_packages.push(package.into());
    }

    pub fn installed_packages(&self) -> &[String] {
        &self.installed_packages
    }

    /// Closes and deletes the accumulation files, then removes the staging
    /// directory unless it is to be kept. Runs at most once; returns whether
    /// everything was released.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return true;
        }
        self.finished = true;
        let mut ok = self.staging.close();
        if !ok {
            warn!("accumulation files were not fully cleaned up");
        }
        if self.config.keep_staging_dir {
            info!(dir = %self.paths.staging_dir.display(), "keeping staging directory");
        } else if let Err(e) = fs::remove_dir_all(&self.paths.staging_dir) {
            warn!(dir = %self.paths.staging_dir.display(), error = %e, "failed to remove staging directory");
            ok = false;
        }
        ok
    }
}

impl Drop for RunSession {
    fn drop(&mut self) {
        self.finish();
    }
}
