use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{
    packet::{Packet, SourceId},
    quantities::Time,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Arrival { source: SourceId },
    Departure { packet: Packet },
}

#[derive(Debug)]
struct Scheduled {
    time: Time,
    seq: u64,
    event: Event,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Equal times resolve in scheduling order, keeping runs deterministic.
        self.time
            .cmp(&other.time)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// Min-heap of pending events, bounded by the simulation horizon.
#[derive(Debug)]
pub struct EventQueue {
    horizon: Time,
    current_time: Time,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
}

impl EventQueue {
    #[must_use]
    pub fn new(horizon: Time) -> EventQueue {
        EventQueue {
            horizon,
            current_time: Time::SIM_START,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Admits the event unless it falls past the horizon, in which case it is
    /// silently discarded.
    pub fn schedule(&mut self, time: Time, event: Event) {
        assert!(time >= self.current_time);
        if time <= self.horizon {
            self.queue.push(Reverse(Scheduled {
                time,
                seq: self.next_seq,
                event,
            }));
            self.next_seq += 1;
        }
    }

    pub fn pop_next(&mut self) -> Option<(Time, Event)> {
        self.queue.pop().map(|Reverse(Scheduled { time, event, .. })| {
            self.current_time = time;
            (time, event)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Event, EventQueue};
    use crate::{packet::SourceId, quantities::Time};

    fn arrival(index: usize) -> Event {
        Event::Arrival {
            source: SourceId::new(index),
        }
    }

    #[test]
    fn events_come_out_in_time_order() {
        let mut queue = EventQueue::new(Time::from_sim_start(100.));
        queue.schedule(Time::from_sim_start(3.), arrival(3));
        queue.schedule(Time::from_sim_start(1.), arrival(1));
        queue.schedule(Time::from_sim_start(2.), arrival(2));

        let order: Vec<_> = std::iter::from_fn(|| queue.pop_next()).collect();
        assert_eq!(
            order,
            vec![
                (Time::from_sim_start(1.), arrival(1)),
                (Time::from_sim_start(2.), arrival(2)),
                (Time::from_sim_start(3.), arrival(3)),
            ]
        );
    }

    #[test]
    fn equal_times_resolve_in_scheduling_order() {
        let mut queue = EventQueue::new(Time::from_sim_start(100.));
        let t = Time::from_sim_start(5.);
        for index in 0..4 {
            queue.schedule(t, arrival(index));
        }
        for index in 0..4 {
            assert_eq!(queue.pop_next(), Some((t, arrival(index))));
        }
    }

    #[test]
    fn events_past_the_horizon_are_discarded() {
        let mut queue = EventQueue::new(Time::from_sim_start(10.));
        queue.schedule(Time::from_sim_start(10.), arrival(0));
        queue.schedule(Time::from_sim_start(10.1), arrival(1));
        assert_eq!(
            queue.pop_next(),
            Some((Time::from_sim_start(10.), arrival(0)))
        );
        assert_eq!(queue.pop_next(), None);
    }

    #[test]
    #[should_panic(expected = "time >= self.current_time")]
    fn scheduling_into_the_past_panics() {
        let mut queue = EventQueue::new(Time::from_sim_start(10.));
        queue.schedule(Time::from_sim_start(5.), arrival(0));
        queue.pop_next();
        queue.schedule(Time::from_sim_start(4.), arrival(0));
    }
}
