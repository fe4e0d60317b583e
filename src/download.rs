use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::{fs, io, path::Path, time::Duration};

/// Streaming HTTP GET to `dest`. Redirects are followed by the default
/// client policy. Shows a byte progress bar when the server reports a
/// Content-Length, a spinner otherwise. No retry, no resume.
pub fn fetch(url: &str, dest: &Path) -> Result<()> {
    let resp = reqwest::blocking::get(url)
        .with_context(|| format!("http GET {url}"))?
        .error_for_status()
        .with_context(|| format!("download failed for {url}"))?;

    let bar = progress_bar(resp.content_length());
    let mut reader = bar.wrap_read(resp);

    let mut file =
        fs::File::create(dest).with_context(|| format!("create {}", dest.display()))?;
    io::copy(&mut reader, &mut file).with_context(|| format!("write {}", dest.display()))?;
    bar.finish_and_clear();

    Ok(())
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(len) => {
            let bar = ProgressBar::new(len);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({eta})")
                    .unwrap(),
            );
            bar
        }
        None => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {bytes}")
                    .unwrap(),
            );
            spinner.enable_steady_tick(Duration::from_millis(80));
            spinner
        }
    }
}
