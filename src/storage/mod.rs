pub mod dir;
pub mod header;
pub mod mmap_reader;
pub mod mmap_writer;

pub use dir::DirStorage;
pub use header::FileHeader;
pub use mmap_reader::MmapReader;
pub use mmap_writer::MmapWriter;

use std::io;

pub const EVENTS_FILE: &str = "journal.dat";
pub const DATA_FILE: &str = "journaldata.dat";

/// One sequential byte stream, opened either for reading or for writing.
///
/// Reads and writes report how many bytes were transferred; a count short of
/// the request is for the caller to judge.
pub trait JournalStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn write(&mut self, buf: &[u8]) -> io::Result<usize>;

    fn close(&mut self) -> io::Result<()>;
}

pub trait JournalStorage {
    fn open_read(&self, name: &str) -> io::Result<Box<dyn JournalStream>>;

    fn open_write(&self, name: &str) -> io::Result<Box<dyn JournalStream>>;
}
