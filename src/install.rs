use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{archive, config::Config, desktop, download, output, preflight, version};

pub fn run(cfg: &Config) -> Result<()> {
    run_with_deps(cfg, download::fetch)
}

/// The whole pipeline with an injected fetch function so tests can run it
/// against local fixtures. Order: preflight, version banner, scratch setup,
/// download, staged extraction, swap, optional hooks, cleanup, version
/// banner. Any failed step aborts the run; the scratch directory is only
/// removed on the success path.
pub fn run_with_deps(
    cfg: &Config,
    mut fetch: impl FnMut(&str, &Path) -> Result<()>,
) -> Result<()> {
    preflight::check_tools(&cfg.required_tools)?;

    output::kv("installed version", &version::read(&cfg.metadata_path()).to_string());

    fs::create_dir_all(&cfg.scratch_dir)
        .with_context(|| format!("create {}", cfg.scratch_dir.display()))?;

    let archive_path = cfg.archive_path();
    output::info(&format!("Downloading {}", cfg.download_url));
    fetch(&cfg.download_url, &archive_path)?;

    fs::create_dir_all(&cfg.install_root)
        .with_context(|| format!("create {}", cfg.install_root.display()))?;

    // Staging lives next to the final directory so the swap is a rename,
    // not a cross-filesystem copy.
    let staging = staging_dir(&cfg.install_root);
    fs::create_dir_all(&staging)
        .with_context(|| format!("create {}", staging.display()))?;
    let swapped = stage_and_swap(cfg, &archive_path, &staging);
    if staging.exists() {
        let _ = fs::remove_dir_all(&staging);
    }
    swapped?;
    output::success(&format!("Installed into {}", cfg.install_dir().display()));

    run_post_install_hooks(cfg)?;

    fs::remove_dir_all(&cfg.scratch_dir)
        .with_context(|| format!("remove {}", cfg.scratch_dir.display()))?;

    output::kv("installed version", &version::read(&cfg.metadata_path()).to_string());
    Ok(())
}

/// Extracts into the staging directory, validates the archive shape, then
/// swaps the new tree into place. The previous install is renamed aside
/// first and restored if the swap fails.
fn stage_and_swap(cfg: &Config, archive_path: &Path, staging: &Path) -> Result<()> {
    output::info("Extracting archive");
    archive::unpack_tar_gz(archive_path, staging)?;
    let packaged = archive::sole_top_level_dir(staging)?;

    let install_dir = cfg.install_dir();
    let mut backup = ReplaceGuard::create(&install_dir)?;
    match fs::rename(&packaged, &install_dir)
        .with_context(|| format!("move {} -> {}", packaged.display(), install_dir.display()))
    {
        Ok(()) => {
            backup.cleanup()?;
            Ok(())
        }
        Err(err) => {
            let _ = backup.restore();
            Err(err)
        }
    }
}

fn run_post_install_hooks(cfg: &Config) -> Result<()> {
    if let Some(entry_path) = &cfg.desktop_entry_path {
        desktop::write_entry(entry_path, &cfg.install_dir())?;
        output::success(&format!("Wrote desktop entry {}", entry_path.display()));
    }
    if let Some(link) = &cfg.bin_symlink_path {
        desktop::link_binary(link, &cfg.installed_exe())?;
        output::success(&format!("Linked {}", link.display()));
        if let Some(dir) = desktop::link_dir_missing_from_path(link) {
            output::warning(&format!("{} is not on your PATH", dir.display()));
        }
    }
    Ok(())
}

fn nonce() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos()
}

fn staging_dir(install_root: &Path) -> PathBuf {
    install_root.join(format!(".{}.staging.{}", crate::config::APP_DIR_NAME, nonce()))
}

/// Renames an existing install aside so a failed swap can put it back.
struct ReplaceGuard {
    backup: Option<PathBuf>,
    install_dir: PathBuf,
}

impl ReplaceGuard {
    fn create(install_dir: &Path) -> Result<Self> {
        let backup = if install_dir.exists() {
            let backup = install_dir.with_file_name(format!(
                "{}.backup.{}",
                crate::config::APP_DIR_NAME,
                nonce()
            ));
            fs::rename(install_dir, &backup).with_context(|| {
                format!("rename {} -> {}", install_dir.display(), backup.display())
            })?;
            Some(backup)
        } else {
            None
        };
        Ok(Self {
            backup,
            install_dir: install_dir.to_path_buf(),
        })
    }

    fn restore(&mut self) -> Result<()> {
        if let Some(backup) = self.backup.take() {
            if !self.install_dir.exists() {
                fs::rename(&backup, &self.install_dir).with_context(|| {
                    format!("restore {} -> {}", backup.display(), self.install_dir.display())
                })?;
            }
        }
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if let Some(backup) = self.backup.take() {
            if backup.exists() {
                fs::remove_dir_all(&backup)
                    .with_context(|| format!("remove {}", backup.display()))?;
            }
        }
        Ok(())
    }
}
