use anyhow::Result;
use serde::Deserialize;
use std::{fmt, fs, path::Path};

#[derive(Debug, Deserialize)]
struct BuildInfo {
    #[serde(default)]
    version: Option<String>,
}

/// Result of reading the installed metadata file. "File absent" and
/// "version key absent" are distinct states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstalledVersion {
    NotInstalled,
    Unknown,
    Installed(String),
}

impl fmt::Display for InstalledVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstalledVersion::NotInstalled => write!(f, "Not installed"),
            InstalledVersion::Unknown => write!(f, "unknown"),
            InstalledVersion::Installed(v) => write!(f, "{v}"),
        }
    }
}

/// Reads the version out of `resources/build_info.json`. Unreadable or
/// keyless metadata reports `Unknown` rather than failing the run; the
/// value is purely informational.
pub fn read(metadata_path: &Path) -> InstalledVersion {
    if !metadata_path.exists() {
        return InstalledVersion::NotInstalled;
    }
    match parse_file(metadata_path) {
        Ok(Some(version)) => InstalledVersion::Installed(version),
        _ => InstalledVersion::Unknown,
    }
}

fn parse_file(path: &Path) -> Result<Option<String>> {
    let contents = fs::read_to_string(path)?;
    let info: BuildInfo = serde_json::from_str(&contents)?;
    Ok(info
        .version
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty()))
}
