use directories::ProjectDirs;
use std::path::PathBuf;

pub const APP_QUALIFIER: &str = "org";
pub const APP_ORG: &str = "groupkeys";
pub const APP_NAME: &str = "gk";

pub fn config_dir() -> anyhow::Result<PathBuf> {
    let dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .ok_or_else(|| anyhow::anyhow!("cannot determine config directory"))?;
    Ok(dirs.config_dir().to_path_buf())
}

pub fn config_file() -> anyhow::Result<PathBuf> {
    if let Ok(override_path) = std::env::var("GK_CONFIG") {
        return Ok(PathBuf::from(override_path));
    }
    Ok(config_dir()?.join("config.json"))
}
