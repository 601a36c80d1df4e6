use chrono::{DateTime, Local};
use uuid::Uuid;

pub const FILE_PREFIX: &str = "show_package-";
pub const TAR_SUFFIX: &str = ".tar.gz";
pub const LOG_SUFFIX: &str = ".elg";

/// Startup timestamp shared by the tar and log file names of one run.
#[derive(Clone, Debug)]
pub struct RunStamp {
    started: DateTime<Local>,
}

impl RunStamp {
    pub fn now() -> Self {
        Self { started: Local::now() }
    }

    pub fn at(started: DateTime<Local>) -> Self {
        Self { started }
    }

    pub fn label(&self) -> String {
        self.started.format("%Y-%m-%d_%H-%M-%S").to_string()
    }

    pub fn tar_name(&self) -> String {
        format!("{}{}{}", FILE_PREFIX, self.label(), TAR_SUFFIX)
    }

    pub fn log_name(&self) -> String {
        format!("{}{}{}", FILE_PREFIX, self.label(), LOG_SUFFIX)
    }
}

/// Random version-4 UUID used to name the staging directory.
pub fn random_token() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn names_share_the_startup_stamp() {
        let stamp = RunStamp::at(Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap());
        assert_eq!(stamp.tar_name(), "show_package-2024-03-09_07-05-01.tar.gz");
        assert_eq!(stamp.log_name(), "show_package-2024-03-09_07-05-01.elg");
    }

    #[test]
    fn tokens_are_v4_uuids_and_distinct() {
        let a = random_token();
        let b = random_token();
        let parsed = Uuid::parse_str(&a).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
        assert_eq!(parsed.to_string(), a);
        assert_ne!(a, b);
    }
}
