use anyhow::{Context, Result};
use std::path::PathBuf;

/// Path of a file under the app's config directory. Shared by the config
/// and profile stores so the app-name segment lives in one place.
pub fn config_file(name: &str) -> Result<PathBuf> {
    let dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(dir.join("courtside").join(name))
}

pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;

    if hours > 0 {
        format!("{}h {:02}m", hours, rest)
    } else {
        format!("{}m", rest)
    }
}
