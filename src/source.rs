use crate::{
    config::SourceConfig,
    packet::SourceId,
    quantities::{seconds, Float, Time},
    rand::{ContinuousDistribution, DiscreteDistribution, Rng},
};

/// A traffic generator. Immutable once built; all per-run state lives in the
/// simulator and the discipline.
#[derive(Debug)]
pub struct Source {
    id: SourceId,
    weight: Float,
    start: Time,
    end: Time,
    arrival_dist: ContinuousDistribution,
    size_dist: DiscreteDistribution,
}

impl Source {
    #[must_use]
    pub fn from_config(id: SourceId, config: &SourceConfig, simulation_time: Float) -> Source {
        Source {
            id,
            weight: config.weight,
            start: Time::from_sim_start(config.start_frac * simulation_time),
            end: Time::from_sim_start(config.end_frac * simulation_time),
            arrival_dist: ContinuousDistribution::Exponential {
                rate: config.packet_rate,
            },
            size_dist: DiscreteDistribution::Uniform {
                min: config.min_size,
                max: config.max_size,
            },
        }
    }

    #[must_use]
    pub const fn id(&self) -> SourceId {
        self.id
    }

    #[must_use]
    pub const fn weight(&self) -> Float {
        self.weight
    }

    /// The instant of the source's first (seed) arrival.
    #[must_use]
    pub const fn start_time(&self) -> Time {
        self.start
    }

    /// Draws the next interarrival gap. The tentative instant is discarded when
    /// it falls at or beyond the end of the activation window; the source then
    /// produces no further arrivals.
    #[must_use]
    pub fn next_arrival(&self, now: Time, rng: &mut Rng) -> Option<Time> {
        let tentative = now + seconds(rng.sample(&self.arrival_dist));
        (tentative < self.end).then_some(tentative)
    }

    #[must_use]
    pub fn draw_size(&self, rng: &mut Rng) -> u64 {
        rng.sample(&self.size_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::Source;
    use crate::{
        config::SourceConfig,
        packet::SourceId,
        quantities::Time,
        rand::Rng,
    };

    fn source(start_frac: f64, end_frac: f64) -> Source {
        Source::from_config(
            SourceId::new(0),
            &SourceConfig {
                packet_rate: 100.,
                min_size: 100,
                max_size: 200,
                weight: 1.,
                start_frac,
                end_frac,
            },
            10.,
        )
    }

    #[test]
    fn window_fractions_scale_with_the_horizon() {
        let s = source(0.25, 0.75);
        assert_eq!(s.start_time(), Time::from_sim_start(2.5));
    }

    #[test]
    fn arrivals_never_leave_the_window() {
        let s = source(0., 0.5);
        let mut rng = Rng::from_seed(3);
        let mut now = s.start_time();
        while let Some(next) = s.next_arrival(now, &mut rng) {
            assert!(next < Time::from_sim_start(5.));
            assert!(next >= now);
            now = next;
        }
    }

    #[test]
    fn empty_window_stops_after_the_seed_arrival() {
        let s = source(0.5, 0.5);
        let mut rng = Rng::from_seed(3);
        assert_eq!(s.next_arrival(s.start_time(), &mut rng), None);
    }

    #[test]
    fn sizes_stay_in_bounds() {
        let s = source(0., 1.);
        let mut rng = Rng::from_seed(5);
        for _ in 0..1000 {
            let size = s.draw_size(&mut rng);
            assert!((100..=200).contains(&size));
        }
    }
}
