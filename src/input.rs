use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;

use crate::debug;

/// Read-only view of the input file, shared by every worker for the whole
/// run and released only after the reduction has consumed their results.
#[derive(Debug)]
pub struct InputFile {
    map: Mmap,
}

impl InputFile {
    /// Opens, stats and memory-maps the file. Any failure is fatal for the
    /// run and carries the underlying OS error. Mapping an empty file fails.
    pub fn open(path: &Path) -> Result<InputFile> {
        let file = File::open(path)
            .with_context(|| format!("Unable to open {}", path.display()))?;

        let metadata = file
            .metadata()
            .with_context(|| format!("Unable to stat {}", path.display()))?;

        // SAFETY: the map is read-only and the file is not expected to
        // change while hashed; a concurrent writer is outside the tool's
        // contract and would only make the mapped bytes unstable.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("Unable to map {}", path.display()))?;

        debug!("Mapped {} ({} bytes)", path.display(), metadata.len());

        Ok(InputFile { map })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.map
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.len() == 0
    }
}
