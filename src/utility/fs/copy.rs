// init-repo: Manifest Submodule Bootstrapper
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{FsError, InitError, Result};
use anyhow::Context;
use std::path::Path;
use tokio::fs;

/// Copies `src` to `dst`, creating missing parent directories of `dst` and
/// overwriting an existing file. A directory `src` is copied recursively.
///
/// Returns the number of files copied.
///
/// # Example
/// ```no_run
/// use init_repo::utility::fs::copy::copy_file_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_file_async(Path::new("lib/hal/Makefile"), Path::new("Makefile")).await?;
/// # Ok(())
/// # }
/// ```
/// # Errors
///
/// Returns `FsError::NotFound` if `src` does not exist, or an error if any IO
/// operation fails.
pub async fn copy_file_async(src: &Path, dst: &Path) -> Result<usize> {
    let metadata = match fs::metadata(src).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(InitError::from(FsError::NotFound(src.display().to_string())).into());
        }
        Err(e) => {
            return Err(InitError::from(FsError::IoError {
                path: src.display().to_string(),
                source: e,
            })
            .into());
        }
    };

    if metadata.is_dir() {
        return copy_dir_contents_async(src, dst).await;
    }

    if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }

    fs::copy(src, dst)
        .await
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(1)
}

/// Recursively copies all contents from `src` directory to `dst` directory.
///
/// Creates `dst` if it doesn't exist. Returns the number of files copied.
///
/// # Errors
///
/// Returns an error if any IO operation fails (creating directory, reading, copying).
pub async fn copy_dir_contents_async(src: &Path, dst: &Path) -> Result<usize> {
    fs::create_dir_all(dst)
        .await
        .with_context(|| format!("failed to create directory {}", dst.display()))?;

    let mut entries = fs::read_dir(src)
        .await
        .with_context(|| format!("failed to read directory {}", src.display()))?;

    let mut copied = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| format!("failed to read entry from {}", src.display()))?
    {
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if entry.file_type().await?.is_dir() {
            copied += Box::pin(copy_dir_contents_async(&src_path, &dst_path)).await?;
        } else {
            fs::copy(&src_path, &dst_path).await.with_context(|| {
                format!(
                    "failed to copy {} to {}",
                    src_path.display(),
                    dst_path.display()
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}
