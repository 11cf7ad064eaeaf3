//! Output artifact writing.
//!
//! A run's artifacts are committed together: every one is first written to
//! a sibling `<name>.tmp` and flushed, and only then are they renamed over
//! their destinations. Any failure before the renames removes all the
//! temporaries, so a failed run leaves no new artifact behind.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::verbose::vprintln;

/// One file to produce.
pub struct Artifact<'a> {
    /// Destination path.
    pub path: &'a Path,
    /// Complete file contents.
    pub contents: &'a [u8],
}

/// Write every artifact, replacing previous files, or none of them.
pub fn commit_all(artifacts: &[Artifact<'_>]) -> Result<()> {
    for artifact in artifacts {
        if artifact.path.is_dir() {
            bail!("cannot replace {}: it is a directory", artifact.path.display());
        }
    }

    let mut staged = Vec::with_capacity(artifacts.len());
    let result = stage_then_rename(artifacts, &mut staged);
    if result.is_err() {
        for tmp_path in &staged {
            let _ = fs::remove_file(tmp_path);
        }
    }
    result?;

    for artifact in artifacts {
        vprintln!("  wrote {} ({} bytes)", artifact.path.display(), artifact.contents.len());
    }
    Ok(())
}

fn stage_then_rename(artifacts: &[Artifact<'_>], staged: &mut Vec<PathBuf>) -> Result<()> {
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        let tmp_path = tmp_path_for(artifact.path);
        staged.push(tmp_path.clone());
        write_synced(&tmp_path, artifact.contents)?;
    }

    for (artifact, tmp_path) in artifacts.iter().zip(staged.iter()) {
        fs::rename(tmp_path, artifact.path)
            .with_context(|| format!("replacing {}", artifact.path.display()))?;
    }
    Ok(())
}

fn write_synced(path: &Path, contents: &[u8]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(contents)
        .with_context(|| format!("writing {}", path.display()))?;
    let file = writer
        .into_inner()
        .map_err(|e| e.into_error())
        .with_context(|| format!("flushing {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("syncing {}", path.display()))
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}
