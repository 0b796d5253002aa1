use std::fs;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

pub const DEFAULT_TASK_FILE: &str = "tasks.txt";

/// Flat text file holding one task display string per line.
#[derive(Debug, Clone)]
pub struct TaskFile {
    path: PathBuf,
}

impl Default for TaskFile {
    fn default() -> Self {
        Self::new(DEFAULT_TASK_FILE)
    }
}

impl TaskFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name shown to the user in status messages.
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    /// Overwrites the whole file. Entries are written verbatim, so an
    /// entry containing a newline splits into two lines on the next load.
    #[tracing::instrument(skip(self, entries), fields(file = %self.path.display(), count = entries.len()))]
    pub fn save(&self, entries: &[String]) -> anyhow::Result<()> {
        let file = fs::File::create(&self.path)
            .with_context(|| format!("failed to create {}", self.path.display()))?;
        let mut out = BufWriter::new(file);
        for entry in entries {
            writeln!(out, "{entry}")
                .with_context(|| format!("failed writing {}", self.path.display()))?;
        }
        out.flush()
            .with_context(|| format!("failed flushing {}", self.path.display()))?;

        info!(count = entries.len(), "saved task file");
        Ok(())
    }

    /// `Ok(None)` when the file does not exist yet.
    #[tracing::instrument(skip(self), fields(file = %self.path.display()))]
    pub fn load(&self) -> anyhow::Result<Option<Vec<String>>> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("task file not found");
                return Ok(None);
            }
            Err(err) => {
                return Err(err)
                    .with_context(|| format!("failed to open {}", self.path.display()));
            }
        };

        let mut out = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.with_context(|| {
                format!("failed reading {} line {}", self.path.display(), idx + 1)
            })?;
            out.push(line.trim_end().to_string());
        }

        info!(count = out.len(), "loaded task file");
        Ok(Some(out))
    }
}
