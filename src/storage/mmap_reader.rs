use super::{FileHeader, JournalStream};
use memmap2::{Advice, Mmap};
use std::fs::File;
use std::io;
use std::path::Path;

pub struct MmapReader {
    mmap: Option<Mmap>,
    offset: usize,
    end: usize,
}

impl MmapReader {
    pub fn open<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let file = File::open(path)?;
        let len = file.metadata()?.len() as usize;

        if len < FileHeader::SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "File too small for header",
            ));
        }

        let mmap = unsafe { Mmap::map(&file)? };

        let file_header = FileHeader::from_bytes(&mmap)
            .filter(FileHeader::validate)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "Invalid file header"))?;

        // A file cut short after recording replays only what is really there.
        let committed = FileHeader::SIZE.saturating_add(file_header.length as usize);
        let end = committed.min(mmap.len());

        if let Err(e) = mmap.advise(Advice::Sequential) {
            log::debug!("madvise(sequential) failed: {}", e);
        }

        Ok(Self {
            mmap: Some(mmap),
            offset: FileHeader::SIZE,
            end,
        })
    }
}

impl JournalStream for MmapReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(mmap) = &self.mmap else {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "journal stream is closed",
            ));
        };

        let n = buf.len().min(self.end - self.offset);
        buf[..n].copy_from_slice(&mmap[self.offset..self.offset + n]);
        self.offset += n;
        Ok(n)
    }

    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "journal stream opened for reading",
        ))
    }

    fn close(&mut self) -> io::Result<()> {
        self.mmap = None;
        Ok(())
    }
}
