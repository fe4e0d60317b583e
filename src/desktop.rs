use anyhow::{Context, Result, bail};
use std::{
    env,
    ffi::OsStr,
    fs,
    path::{Path, PathBuf},
};

/// Freedesktop menu entry pointing at the installed tree.
pub fn entry_contents(install_dir: &Path) -> String {
    let exec = install_dir.join("Discord");
    let icon = install_dir.join("discord.png");
    format!(
        "[Desktop Entry]\n\
         Version=1.0\n\
         Type=Application\n\
         Name=Discord\n\
         Comment=All-in-one voice and text chat\n\
         Exec={}\n\
         Icon={}\n\
         Terminal=false\n\
         Categories=Network;InstantMessaging;\n",
        exec.display(),
        icon.display()
    )
}

pub fn write_entry(entry_path: &Path, install_dir: &Path) -> Result<()> {
    if let Some(parent) = entry_path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(entry_path, entry_contents(install_dir))
        .with_context(|| format!("write {}", entry_path.display()))?;
    Ok(())
}

/// Replaces whatever sits at `link` with a symlink to `target`.
pub fn link_binary(link: &Path, target: &Path) -> Result<()> {
    if !target.exists() {
        bail!("symlink target {} does not exist", target.display());
    }
    if let Some(parent) = link.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    if fs::symlink_metadata(link).is_ok() {
        fs::remove_file(link).with_context(|| format!("remove {}", link.display()))?;
    }
    std::os::unix::fs::symlink(target, link)
        .with_context(|| format!("symlink {} -> {}", link.display(), target.display()))?;
    Ok(())
}

/// Whether `dir` appears in a PATH-style variable. Used for the advisory
/// warning after creating the symlink.
pub fn dir_on_path(dir: &Path, path_var: &OsStr) -> bool {
    env::split_paths(path_var).any(|p| p == dir)
}

pub fn link_dir_missing_from_path(link: &Path) -> Option<PathBuf> {
    let parent = link.parent()?;
    let path_var = env::var_os("PATH")?;
    if dir_on_path(parent, &path_var) {
        None
    } else {
        Some(parent.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_points_at_installed_exe_and_icon() {
        let contents = entry_contents(Path::new("/home/alex/.local/opt/discord"));
        assert!(contents.starts_with("[Desktop Entry]\n"));
        assert!(contents.contains("Exec=/home/alex/.local/opt/discord/Discord\n"));
        assert!(contents.contains("Icon=/home/alex/.local/opt/discord/discord.png\n"));
    }

    #[test]
    fn write_entry_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let entry = tmp.path().join("applications").join("discord.desktop");
        write_entry(&entry, Path::new("/opt/discord")).unwrap();
        let contents = fs::read_to_string(&entry).unwrap();
        assert!(contents.contains("Name=Discord"));
    }

    #[test]
    fn link_binary_replaces_existing_link() {
        let tmp = tempfile::tempdir().unwrap();
        let target_old = tmp.path().join("old-exe");
        let target_new = tmp.path().join("new-exe");
        fs::write(&target_old, "old").unwrap();
        fs::write(&target_new, "new").unwrap();

        let link = tmp.path().join("bin").join("discord");
        link_binary(&link, &target_old).unwrap();
        link_binary(&link, &target_new).unwrap();

        assert_eq!(fs::read_link(&link).unwrap(), target_new);
        assert_eq!(fs::read_to_string(&link).unwrap(), "new");
    }

    #[test]
    fn link_binary_rejects_missing_target() {
        let tmp = tempfile::tempdir().unwrap();
        let link = tmp.path().join("discord");
        let err = link_binary(&link, &tmp.path().join("no-such-exe")).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn dir_on_path_matches_exact_entries() {
        let path_var = std::ffi::OsString::from("/usr/bin:/home/alex/.local/bin");
        assert!(dir_on_path(Path::new("/home/alex/.local/bin"), &path_var));
        assert!(!dir_on_path(Path::new("/home/alex/bin"), &path_var));
    }
}
