use crate::{config::SimulationConfig, packet::Packet, quantities::Float};

pub mod fcfs;
pub mod wfq;

pub use fcfs::Fcfs;
pub use wfq::Wfq;

/// The scheduling/drop policy behind the link. A discipline owns the buffer and
/// any bookkeeping of its own (virtual time for WFQ); the simulator owns the
/// clock, the link and the statistics.
pub trait Discipline {
    /// Short name used in report headings and output file names.
    const NAME: &'static str;

    fn from_config(config: &SimulationConfig) -> Self;

    /// Admits an arriving packet, returning the victim when the buffer
    /// overflows. The victim may be the arriving packet itself.
    fn enqueue(&mut self, packet: Packet) -> Option<Packet>;

    /// Removes the next packet to transmit.
    fn dequeue(&mut self) -> Option<Packet>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The per-source quantity Jain's fairness index is computed over.
    fn fairness_share(bytes: Float, weight: Float) -> Float;
}
