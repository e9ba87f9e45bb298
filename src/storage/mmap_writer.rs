use super::{FileHeader, JournalStream};
use memmap2::MmapMut;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

pub struct MmapWriter {
    file: Option<File>,
    mmap: Option<MmapMut>,
    capacity: usize,
    write_offset: usize,
}

impl MmapWriter {
    pub const MIN_CAPACITY: usize = 4096;

    pub fn create<P: AsRef<Path>>(path: P, capacity: usize) -> io::Result<Self> {
        let capacity = capacity.max(Self::MIN_CAPACITY);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;

        file.set_len(capacity as u64)?;
        let mmap = unsafe { MmapMut::map_mut(&file)? };

        let mut writer = Self {
            file: Some(file),
            mmap: Some(mmap),
            capacity,
            write_offset: FileHeader::SIZE,
        };

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        writer.write_file_header(&FileHeader::new(now))?;

        Ok(writer)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.write_offset - FileHeader::SIZE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn available(&self) -> usize {
        self.capacity - self.write_offset
    }

    pub fn file_header(&self) -> Option<FileHeader> {
        self.mmap.as_deref().and_then(FileHeader::from_bytes)
    }

    fn closed() -> io::Error {
        io::Error::new(io::ErrorKind::BrokenPipe, "journal stream is closed")
    }

    fn grow(&mut self, needed: usize) -> io::Result<()> {
        let mut capacity = self.capacity;
        while capacity - self.write_offset < needed {
            capacity = capacity.checked_mul(2).ok_or_else(|| {
                io::Error::new(io::ErrorKind::OutOfMemory, "journal stream too large")
            })?;
        }

        let file = self.file.as_ref().ok_or_else(Self::closed)?;
        // Unmap before resizing the file underneath.
        if let Some(mmap) = self.mmap.take() {
            mmap.flush()?;
        }
        file.set_len(capacity as u64)?;
        self.mmap = Some(unsafe { MmapMut::map_mut(file)? });
        self.capacity = capacity;

        log::debug!("journal stream grown to {} bytes", capacity);
        Ok(())
    }

    fn write_file_header(&mut self, header: &FileHeader) -> io::Result<()> {
        let mmap = self.mmap.as_mut().ok_or_else(Self::closed)?;
        mmap[..FileHeader::SIZE].copy_from_slice(&header.to_bytes());
        Ok(())
    }

    #[inline]
    fn update_file_header(&mut self) -> io::Result<()> {
        let length = self.len() as u64;
        let mmap = self.mmap.as_mut().ok_or_else(Self::closed)?;
        mmap[16..24].copy_from_slice(&length.to_le_bytes());
        Ok(())
    }
}

impl JournalStream for MmapWriter {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "journal stream opened for writing",
        ))
    }

    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.mmap.is_none() {
            return Err(Self::closed());
        }
        if buf.len() > self.available() {
            self.grow(buf.len())?;
        }

        let start = self.write_offset;
        let mmap = self.mmap.as_mut().ok_or_else(Self::closed)?;
        mmap[start..start + buf.len()].copy_from_slice(buf);

        self.write_offset += buf.len();
        self.update_file_header()?;

        Ok(buf.len())
    }

    fn close(&mut self) -> io::Result<()> {
        let Some(mmap) = self.mmap.take() else {
            return Ok(());
        };
        mmap.flush()?;
        drop(mmap);

        if let Some(file) = self.file.take() {
            file.set_len(self.write_offset as u64)?;
            file.sync_all()?;
        }
        Ok(())
    }
}

impl Drop for MmapWriter {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::error!("failed to close journal stream: {}", e);
        }
    }
}
