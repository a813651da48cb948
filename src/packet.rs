use std::fmt::Display;

use crate::quantities::Time;

#[derive(Hash, PartialEq, Eq, Clone, Copy, Debug)]
pub struct SourceId {
    index: usize,
}

impl SourceId {
    #[must_use]
    pub const fn new(index: usize) -> SourceId {
        SourceId { index }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.index
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.index)
    }
}

/// The unit of work. Created on arrival, moved through the buffer into the
/// departure event, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub id: u64,
    pub source: SourceId,
    pub size: u64,
    pub arrival: Time,
}
