use std::{cmp::Reverse, collections::BinaryHeap};

use ordered_float::NotNan;

use super::Discipline;
use crate::{config::SimulationConfig, packet::Packet, quantities::Float};

#[derive(Debug)]
struct Entry {
    finish: NotNan<Float>,
    packet: Packet,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.finish == other.finish && self.packet.id == other.packet.id
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Packet id breaks finish-time ties, keeping heap order deterministic.
        self.finish
            .cmp(&other.finish)
            .then_with(|| self.packet.id.cmp(&other.packet.id))
    }
}

/// Weighted fair queuing: the buffer is ordered by per-packet virtual finish
/// time, approximating GPS service in proportion to source weights. On
/// overflow the packet holding the smallest finish time is dropped.
#[derive(Debug)]
pub struct Wfq {
    limit: usize,
    weights: Vec<Float>,
    last_finish: Vec<Float>,
    system_virtual_time: Float,
    heap: BinaryHeap<Reverse<Entry>>,
}

impl Wfq {
    /// The virtual start of the most recent dispatch.
    #[must_use]
    pub const fn virtual_time(&self) -> Float {
        self.system_virtual_time
    }

    #[must_use]
    pub fn last_finish(&self, source: usize) -> Float {
        self.last_finish[source]
    }

    /// Stamps an arriving packet with its virtual finish time
    /// `F = max(V, lastFinish) + size / weight` and records it as the source's
    /// latest finish. Stamping happens before admission, so a packet dropped on
    /// overflow still advances its source's finish time.
    fn stamp(&mut self, packet: &Packet) -> NotNan<Float> {
        let index = packet.source.index();
        let start = Float::max(self.system_virtual_time, self.last_finish[index]);
        let finish = start + packet.size as Float / self.weights[index];
        debug_assert!(finish >= self.last_finish[index]);
        self.last_finish[index] = finish;
        NotNan::new(finish).unwrap()
    }
}

impl Discipline for Wfq {
    const NAME: &'static str = "wfq";

    fn from_config(config: &SimulationConfig) -> Wfq {
        let weights: Vec<Float> = config.sources.iter().map(|s| s.weight).collect();
        Wfq {
            limit: config.buffer_size,
            last_finish: vec![0.; weights.len()],
            weights,
            system_virtual_time: 0.,
            heap: BinaryHeap::new(),
        }
    }

    fn enqueue(&mut self, packet: Packet) -> Option<Packet> {
        let finish = self.stamp(&packet);
        let entry = Entry { finish, packet };
        if self.heap.len() < self.limit {
            self.heap.push(Reverse(entry));
            return None;
        }
        // Keep the `limit` largest finish times among buffer and arrival. The
        // buffered minimum loses ties, matching the pop-then-push swap.
        if let Some(Reverse(min)) = self.heap.peek() {
            if entry < *min {
                return Some(entry.packet);
            }
        }
        let victim = self.heap.pop().map(|Reverse(e)| e.packet);
        self.heap.push(Reverse(entry));
        victim
    }

    fn dequeue(&mut self) -> Option<Packet> {
        self.heap.pop().map(|Reverse(entry)| {
            let index = entry.packet.source.index();
            // Pin the system virtual time to the departing packet's virtual
            // start time.
            self.system_virtual_time =
                entry.finish.into_inner() - entry.packet.size as Float / self.weights[index];
            entry.packet
        })
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn fairness_share(bytes: Float, weight: Float) -> Float {
        if weight > 0. {
            bytes / weight
        } else {
            0.
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Wfq;
    use crate::{
        config::{SimulationConfig, SourceConfig},
        discipline::{testing::packet, Discipline},
    };

    fn wfq(buffer_size: usize, weights: &[f64]) -> Wfq {
        let sources = weights
            .iter()
            .map(|&weight| SourceConfig {
                packet_rate: 1.,
                min_size: 1,
                max_size: 1,
                weight,
                start_frac: 0.,
                end_frac: 1.,
            })
            .collect();
        Wfq::from_config(&SimulationConfig {
            simulation_time: 1.,
            link_capacity: 1.,
            buffer_size,
            sources,
        })
    }

    #[test]
    fn finish_times_accumulate_per_source() {
        let mut q = wfq(10, &[2.]);
        q.enqueue(packet(0, 0, 1000));
        assert_eq!(q.last_finish(0), 500.);
        q.enqueue(packet(1, 0, 1000));
        assert_eq!(q.last_finish(0), 1000.);

        assert_eq!(q.dequeue().unwrap().id, 0);
        assert_eq!(q.virtual_time(), 0.);
        assert_eq!(q.dequeue().unwrap().id, 1);
        assert_eq!(q.virtual_time(), 500.);
    }

    #[test]
    fn heavier_sources_finish_earlier() {
        let mut q = wfq(10, &[1., 9.]);
        q.enqueue(packet(0, 0, 900));
        q.enqueue(packet(1, 1, 900));
        // Source 1's finish time is 100 against source 0's 900.
        assert_eq!(q.dequeue().unwrap().source.index(), 1);
        assert_eq!(q.dequeue().unwrap().source.index(), 0);
    }

    #[test]
    fn overflow_drops_the_smallest_finish_time() {
        let mut q = wfq(2, &[1.]);
        q.enqueue(packet(0, 0, 1000));
        q.enqueue(packet(1, 0, 1000));
        let victim = q.enqueue(packet(2, 0, 1000)).unwrap();
        assert_eq!(victim.id, 0);
        assert_eq!(q.len(), 2);
        // The swapped-in arrival keeps its stamp.
        assert_eq!(q.last_finish(0), 3000.);
    }

    #[test]
    fn a_tied_arrival_displaces_the_buffered_packet() {
        let mut q = wfq(1, &[1., 1.]);
        q.enqueue(packet(0, 0, 1000));
        // Finish times tie at 1000; the buffered packet is the pre-swap
        // minimum and loses.
        let victim = q.enqueue(packet(1, 1, 1000)).unwrap();
        assert_eq!(victim.id, 0);
        assert_eq!(q.dequeue().unwrap().id, 1);
    }

    #[test]
    fn the_arriving_packet_can_be_the_victim() {
        let mut q = wfq(1, &[1., 100.]);
        q.enqueue(packet(0, 0, 1000));
        // Finish time 10 against the buffered 1000: the arrival holds the
        // smallest finish time and is dropped itself.
        let victim = q.enqueue(packet(1, 1, 1000)).unwrap();
        assert_eq!(victim.id, 1);
        assert_eq!(q.len(), 1);
        // The drop still advanced the source's finish time.
        assert_eq!(q.last_finish(1), 10.);
        assert_eq!(q.dequeue().unwrap().id, 0);
    }

    #[test]
    fn zero_capacity_retains_a_single_candidate() {
        let mut q = wfq(0, &[1.]);
        assert_eq!(q.enqueue(packet(0, 0, 1000)), None);
        assert_eq!(q.len(), 1);
        let victim = q.enqueue(packet(1, 0, 1000)).unwrap();
        assert_eq!(victim.id, 0);
        assert_eq!(q.dequeue().unwrap().id, 1);
        assert!(q.is_empty());
    }

    #[test]
    fn finish_times_never_regress() {
        let mut q = wfq(4, &[1., 3.]);
        let sizes = [700, 100, 1300, 400, 900, 200];
        let mut previous = [0., 0.];
        for (id, size) in sizes.into_iter().enumerate() {
            let source = id % 2;
            q.enqueue(packet(id as u64, source, size));
            assert!(q.last_finish(source) >= previous[source]);
            previous[source] = q.last_finish(source);
        }
    }
}
