use crate::{
    config::SimulationConfig,
    discipline::Discipline,
    event::{Event, EventQueue},
    logging::Logger,
    packet::{Packet, SourceId},
    quantities::{seconds, Float, Rate, Time, TimeSpan},
    rand::Rng,
    source::Source,
    stats::{reduce, SimulationResults, SourceStats},
};

/// The discrete-event engine: one shared link drained at a constant byte rate,
/// fed through the discipline's buffer. Single-threaded and fully
/// deterministic for a given config and seed.
pub struct Simulator<D, L> {
    horizon: TimeSpan,
    capacity: Rate,
    sources: Vec<Source>,
    stats: Vec<SourceStats>,
    events: EventQueue,
    discipline: D,
    clock: Time,
    link_busy: bool,
    next_packet_id: u64,
    rng: Rng,
    logger: L,
}

impl<D, L> Simulator<D, L>
where
    D: Discipline,
    L: Logger,
{
    #[must_use]
    pub fn new(config: &SimulationConfig, seed: u64, logger: L) -> Simulator<D, L> {
        let sources = config
            .sources
            .iter()
            .enumerate()
            .map(|(i, s)| Source::from_config(SourceId::new(i), s, config.simulation_time))
            .collect::<Vec<_>>();
        Simulator {
            horizon: seconds(config.simulation_time),
            capacity: Rate::new(config.link_capacity),
            stats: vec![SourceStats::default(); sources.len()],
            events: EventQueue::new(Time::SIM_START + seconds(config.simulation_time)),
            discipline: D::from_config(config),
            sources,
            clock: Time::SIM_START,
            link_busy: false,
            next_packet_id: 1,
            rng: Rng::from_seed(seed),
            logger,
        }
    }

    /// Runs to the horizon and reduces the counters to the final report.
    pub fn run(mut self) -> SimulationResults {
        for source in &self.sources {
            self.events.schedule(
                source.start_time(),
                Event::Arrival {
                    source: source.id(),
                },
            );
        }

        let end = Time::SIM_START + self.horizon;
        while let Some((time, event)) = self.events.pop_next() {
            debug_assert!(time >= self.clock);
            self.clock = time;
            if self.clock > end {
                break;
            }
            match event {
                Event::Arrival { source } => self.handle_arrival(source),
                Event::Departure { packet } => self.handle_departure(packet),
            }
        }

        let weights: Vec<Float> = self.sources.iter().map(Source::weight).collect();
        reduce::<D>(&self.stats, &weights, self.capacity, self.horizon)
    }

    fn handle_arrival(&mut self, id: SourceId) {
        let source = &self.sources[id.index()];
        if let Some(next) = source.next_arrival(self.clock, &mut self.rng) {
            self.events.schedule(next, Event::Arrival { source: id });
        }

        let packet = Packet {
            id: self.next_packet_id,
            source: id,
            size: source.draw_size(&mut self.rng),
            arrival: self.clock,
        };
        self.next_packet_id += 1;
        self.stats[id.index()].generated += 1;
        log!(
            self.logger,
            "t = {} src {id} generated packet {} ({}B)",
            self.clock,
            packet.id,
            packet.size
        );

        if let Some(victim) = self.discipline.enqueue(packet) {
            self.stats[victim.source.index()].dropped += 1;
            log!(
                self.logger,
                "t = {} dropped packet {} from src {}",
                self.clock,
                victim.id,
                victim.source
            );
        }

        self.try_start_transmission();
    }

    fn handle_departure(&mut self, packet: Packet) {
        self.link_busy = false;
        log!(
            self.logger,
            "t = {} src {} packet {} departed",
            self.clock,
            packet.source,
            packet.id
        );

        let stats = &mut self.stats[packet.source.index()];
        stats.transmitted += 1;
        stats.bytes_transmitted += packet.size as Float;
        stats.total_delay += self.clock - packet.arrival;

        self.try_start_transmission();
    }

    fn try_start_transmission(&mut self) {
        if self.link_busy {
            return;
        }
        if let Some(packet) = self.discipline.dequeue() {
            self.link_busy = true;
            let transmission = packet.size as Float / self.capacity;
            self.events
                .schedule(self.clock + transmission, Event::Departure { packet });
        }
    }
}
