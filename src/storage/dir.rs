use super::{JournalStorage, JournalStream, MmapReader, MmapWriter};
use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
    initial_capacity: usize,
}

impl DirStorage {
    pub const DEFAULT_CAPACITY: usize = 64 * 1024;

    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            initial_capacity: Self::DEFAULT_CAPACITY,
        }
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn path_of(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl JournalStorage for DirStorage {
    fn open_read(&self, name: &str) -> io::Result<Box<dyn JournalStream>> {
        Ok(Box::new(MmapReader::open(self.path_of(name))?))
    }

    fn open_write(&self, name: &str) -> io::Result<Box<dyn JournalStream>> {
        std::fs::create_dir_all(&self.root)?;
        Ok(Box::new(MmapWriter::create(
            self.path_of(name),
            self.initial_capacity,
        )?))
    }
}
