use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tar::Archive;

/// Unpacks a gzip-compressed tarball into `dest`. A corrupt or truncated
/// archive fails here; `tar::Archive::unpack` already refuses entries that
/// escape `dest`.
pub fn unpack_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let file =
        fs::File::open(archive).with_context(|| format!("open {}", archive.display()))?;
    let decoder = GzDecoder::new(file);
    let mut tar = Archive::new(decoder);
    tar.unpack(dest)
        .with_context(|| format!("extract {} into {}", archive.display(), dest.display()))?;
    Ok(())
}

/// The upstream tarball is expected to contain exactly one top-level
/// directory. Anything else means the archive shape changed and the
/// install must not proceed.
pub fn sole_top_level_dir(dir: &Path) -> Result<PathBuf> {
    let mut entries =
        fs::read_dir(dir).with_context(|| format!("read_dir {}", dir.display()))?;

    let first = match entries.next() {
        Some(ent) => ent?,
        None => bail!("archive was empty: nothing extracted into {}", dir.display()),
    };
    if entries.next().is_some() {
        bail!(
            "unexpected archive shape: more than one top-level entry in {}",
            dir.display()
        );
    }
    if !first.file_type()?.is_dir() {
        bail!(
            "unexpected archive shape: top-level entry {} is not a directory",
            first.path().display()
        );
    }
    Ok(first.path())
}
