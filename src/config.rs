use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

pub const DEFAULT_DOWNLOAD_URL: &str =
    "https://discord.com/api/download?platform=linux&format=tar.gz";

/// Name of the final install directory under the install root.
pub const APP_DIR_NAME: &str = "discord";

const ARCHIVE_FILE_NAME: &str = "discord.tar.gz";

#[derive(Debug, Clone)]
pub struct Config {
    pub download_url: String,
    pub install_root: PathBuf,
    pub scratch_dir: PathBuf,
    /// `.desktop` file to write after install; `None` skips the step.
    pub desktop_entry_path: Option<PathBuf>,
    /// Symlink to the installed binary; `None` skips the step.
    pub bin_symlink_path: Option<PathBuf>,
    /// External tools that must resolve on PATH before the run starts.
    pub required_tools: Vec<String>,
}

impl Config {
    pub fn defaults(home: &Path) -> Self {
        Self {
            download_url: DEFAULT_DOWNLOAD_URL.to_string(),
            install_root: home.join(".local").join("opt"),
            scratch_dir: home.join(".cache").join("discordup"),
            desktop_entry_path: None,
            bin_symlink_path: None,
            required_tools: Vec::new(),
        }
    }

    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let home = dirs::home_dir().context("home directory not found")?;
        let mut cfg = Self::defaults(&home);

        let args: Vec<String> = args.into_iter().collect();
        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--url" => cfg.download_url = take_value(&args, &mut i, "--url")?,
                "--install-root" => {
                    cfg.install_root = PathBuf::from(take_value(&args, &mut i, "--install-root")?)
                }
                "--scratch-dir" => {
                    cfg.scratch_dir = PathBuf::from(take_value(&args, &mut i, "--scratch-dir")?)
                }
                "--require" => cfg.required_tools.push(take_value(&args, &mut i, "--require")?),
                "--desktop-entry" => {
                    cfg.desktop_entry_path = Some(default_desktop_entry_path(&home))
                }
                "--symlink" => cfg.bin_symlink_path = Some(default_symlink_path(&home)),
                other => bail!("unknown argument: {other}"),
            }
            i += 1;
        }
        Ok(cfg)
    }

    /// Final install directory, `<install_root>/discord`.
    pub fn install_dir(&self) -> PathBuf {
        self.install_root.join(APP_DIR_NAME)
    }

    /// Path the downloaded archive is staged at.
    pub fn archive_path(&self) -> PathBuf {
        self.scratch_dir.join(ARCHIVE_FILE_NAME)
    }

    /// Metadata file shipped inside the installed tree.
    pub fn metadata_path(&self) -> PathBuf {
        self.install_dir().join("resources").join("build_info.json")
    }

    /// The executable inside the installed tree.
    pub fn installed_exe(&self) -> PathBuf {
        self.install_dir().join("Discord")
    }
}

fn default_desktop_entry_path(home: &Path) -> PathBuf {
    home.join(".local")
        .join("share")
        .join("applications")
        .join("discord.desktop")
}

fn default_symlink_path(home: &Path) -> PathBuf {
    home.join(".local").join("bin").join("discord")
}

fn take_value(args: &[String], i: &mut usize, key: &str) -> Result<String> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.clone()),
        None => bail!("{key} requires a value"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config> {
        Config::from_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_are_rooted_at_home() {
        let home = PathBuf::from("/home/alex");
        let cfg = Config::defaults(&home);
        assert_eq!(cfg.install_root, home.join(".local").join("opt"));
        assert_eq!(cfg.scratch_dir, home.join(".cache").join("discordup"));
        assert_eq!(cfg.install_dir(), home.join(".local/opt/discord"));
        assert!(cfg.desktop_entry_path.is_none());
        assert!(cfg.bin_symlink_path.is_none());
        assert!(cfg.required_tools.is_empty());
    }

    #[test]
    fn metadata_path_is_under_resources() {
        let cfg = Config::defaults(Path::new("/home/alex"));
        assert_eq!(
            cfg.metadata_path(),
            PathBuf::from("/home/alex/.local/opt/discord/resources/build_info.json")
        );
    }

    #[test]
    fn flags_override_defaults() {
        let cfg = parse(&[
            "--url",
            "http://localhost/d.tar.gz",
            "--install-root",
            "/tmp/opt",
            "--require",
            "tar",
            "--require",
            "wget",
        ])
        .unwrap();
        assert_eq!(cfg.download_url, "http://localhost/d.tar.gz");
        assert_eq!(cfg.install_root, PathBuf::from("/tmp/opt"));
        assert_eq!(cfg.required_tools, vec!["tar", "wget"]);
    }

    #[test]
    fn desktop_and_symlink_flags_enable_hooks() {
        let cfg = parse(&["--desktop-entry", "--symlink"]).unwrap();
        let entry = cfg.desktop_entry_path.unwrap();
        assert!(entry.ends_with("applications/discord.desktop"));
        let link = cfg.bin_symlink_path.unwrap();
        assert!(link.ends_with(".local/bin/discord"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse(&["--bogus"]).unwrap_err();
        assert!(err.to_string().contains("unknown argument"));
    }

    #[test]
    fn missing_value_is_rejected() {
        let err = parse(&["--url"]).unwrap_err();
        assert!(err.to_string().contains("requires a value"));
    }
}
