use directories::ProjectDirs;
use std::path::PathBuf;

pub const APP_NAME: &str = "edgecue";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("", "", APP_NAME) {
            proj_dirs.config_dir().join("config.json")
        } else {
            PathBuf::from(format!("{APP_NAME}_config.json"))
        }
    }
}
