//! File system fragment source
//!
//! Discovers declaration fragments under the configured roots and parses
//! them. Paths are returned relative to the base directory and sorted, so a
//! fixed tree always merges in the same order.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::config::LayoutConfig;
use crate::domain::entities::Fragment;
use crate::error::{ZitifyError, ZitifyResult};

pub struct FsFragmentSource<'a> {
    layout: &'a LayoutConfig,
}

impl<'a> FsFragmentSource<'a> {
    pub fn new(layout: &'a LayoutConfig) -> Self {
        Self { layout }
    }

    /// All fragment paths, services first, then identities.
    pub fn discover(&self, base: &Path) -> ZitifyResult<Vec<PathBuf>> {
        let mut discovered = Vec::new();

        for root in self.layout.fragment_roots() {
            let abs_root = base.join(&root);
            if !abs_root.is_dir() {
                tracing::debug!(root = %abs_root.display(), "fragment root missing; skipping");
                continue;
            }

            let mut found = Vec::new();
            for entry in WalkBuilder::new(&abs_root)
                .standard_filters(false)
                .hidden(true)
                .follow_links(true)
                .build()
            {
                let entry = entry.map_err(walk_error)?;
                let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
                if !is_file || !self.layout.has_fragment_extension(entry.path()) {
                    continue;
                }
                let rel = entry
                    .path()
                    .strip_prefix(base)
                    .unwrap_or(entry.path())
                    .to_path_buf();
                found.push(rel);
            }

            found.sort();
            discovered.extend(found);
        }

        Ok(discovered)
    }

    /// Read and parse one fragment. A missing file is an empty fragment.
    pub fn read(&self, base: &Path, rel: &Path) -> ZitifyResult<Fragment> {
        let content = match fs::read_to_string(base.join(rel)) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %rel.display(), "fragment disappeared before it was read");
                return Ok(Fragment::empty(rel));
            }
            Err(e) => return Err(e.into()),
        };

        Fragment::parse(rel, &content, &self.layout.root_key).map_err(|e| {
            ZitifyError::FragmentParse {
                path: rel.to_path_buf(),
                message: e.to_string(),
            }
        })
    }
}

fn walk_error(err: ignore::Error) -> ZitifyError {
    let message = err.to_string();
    match err.into_io_error() {
        Some(io_err) => ZitifyError::Io(io_err),
        None => ZitifyError::Io(io::Error::other(message)),
    }
}
