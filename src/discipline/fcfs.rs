use std::collections::VecDeque;

use super::Discipline;
use crate::{config::SimulationConfig, packet::Packet, quantities::Float};

/// First-come-first-serve: a FIFO buffer with tail-drop admission.
#[derive(Debug)]
pub struct Fcfs {
    limit: usize,
    queue: VecDeque<Packet>,
}

impl Discipline for Fcfs {
    const NAME: &'static str = "fcfs";

    fn from_config(config: &SimulationConfig) -> Fcfs {
        Fcfs {
            limit: config.buffer_size,
            queue: VecDeque::new(),
        }
    }

    fn enqueue(&mut self, packet: Packet) -> Option<Packet> {
        if self.queue.len() < self.limit {
            self.queue.push_back(packet);
            None
        } else {
            Some(packet)
        }
    }

    fn dequeue(&mut self) -> Option<Packet> {
        self.queue.pop_front()
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn fairness_share(bytes: Float, _weight: Float) -> Float {
        bytes
    }
}
