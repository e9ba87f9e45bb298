#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub created_at: i64,
    pub length: u64,
}

impl FileHeader {
    pub const SIZE: usize = 64;
    pub const MAGIC: [u8; 4] = *b"EVJR";
    pub const VERSION: u32 = 1;

    pub fn new(created_at: i64) -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            created_at,
            length: 0,
        }
    }

    #[inline]
    pub fn validate(&self) -> bool {
        self.magic == Self::MAGIC && self.version == Self::VERSION
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic);
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..16].copy_from_slice(&self.created_at.to_le_bytes());
        buf[16..24].copy_from_slice(&self.length.to_le_bytes());
        buf
    }

    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::SIZE {
            return None;
        }
        let mut word = [0u8; 8];
        let mut half = [0u8; 4];

        let mut magic = [0u8; 4];
        magic.copy_from_slice(&buf[0..4]);
        half.copy_from_slice(&buf[4..8]);
        let version = u32::from_le_bytes(half);
        word.copy_from_slice(&buf[8..16]);
        let created_at = i64::from_le_bytes(word);
        word.copy_from_slice(&buf[16..24]);
        let length = u64::from_le_bytes(word);

        Some(Self {
            magic,
            version,
            created_at,
            length,
        })
    }
}
