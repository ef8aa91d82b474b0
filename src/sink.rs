//! Destinations for a rendered document.

use crate::error::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Accepts the rendered document and persists it. Called once per export;
/// a failure is returned to the caller and never retried.
pub trait DocumentSink {
    fn persist(&mut self, document: &str) -> Result<()>;
}

/// Writes `<name>.md`, optionally inside a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(dir: Option<&Path>, name: &str) -> Self {
        let file_name = if name.ends_with(".md") {
            name.to_string()
        } else {
            format!("{}.md", name)
        };

        let path = match dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        };
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSink for FileSink {
    fn persist(&mut self, document: &str) -> Result<()> {
        fs::write(&self.path, document).map_err(|source| Error::Sink {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), "Documentation was created correctly");
        Ok(())
    }
}

/// Writes the document to any writer, e.g. stdout.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DocumentSink for WriterSink<W> {
    fn persist(&mut self, document: &str) -> Result<()> {
        self.writer.write_all(document.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}
