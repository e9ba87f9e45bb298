use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Constructed,
    Running,
    Faulted,
    ShutDown,
}

impl fmt::Display for LoopState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Constructed => "constructed",
            Self::Running => "running",
            Self::Faulted => "faulted",
            Self::ShutDown => "shut down",
        })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    pub primary: u64,
    pub pushed: u64,
    pub secondary: u64,
    pub synthesized: u64,
}

impl PassStats {
    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.primary + self.secondary + self.synthesized
    }
}
