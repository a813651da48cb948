use std::{fs, path::Path, str::FromStr};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::quantities::Float;

/// One traffic source, as declared in the input file. The activation window is
/// given as fractions of the simulation horizon.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SourceConfig {
    pub packet_rate: Float,
    pub min_size: u64,
    pub max_size: u64,
    pub weight: Float,
    pub start_frac: Float,
    pub end_frac: Float,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub simulation_time: Float,
    pub link_capacity: Float,
    pub buffer_size: usize,
    pub sources: Vec<SourceConfig>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config file is empty")]
    Empty,

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: could not parse {value:?} as a number")]
    NotANumber { line: usize, value: String },

    #[error("declared {declared} sources but found only {found} source lines")]
    MissingSources { declared: usize, found: usize },

    #[error("buffer size must be non-negative, got {0}")]
    NegativeBufferSize(i64),

    #[error("simulation time must be positive")]
    NonPositiveSimulationTime,

    #[error("link capacity must be positive")]
    NonPositiveCapacity,

    #[error("source {idx}: packet rate must be positive")]
    NonPositiveRate { idx: usize },

    #[error("source {idx}: weight must be positive")]
    NonPositiveWeight { idx: usize },

    #[error("source {idx}: packet sizes must be positive")]
    ZeroSize { idx: usize },

    #[error("source {idx}: minimum size {min} exceeds maximum size {max}")]
    SizeRange { idx: usize, min: u64, max: u64 },

    #[error("source {idx}: activation fraction must lie in [0, 1]")]
    FracRange { idx: usize },

    #[error("source {idx}: activation window ends before it starts")]
    WindowOrder { idx: usize },
}

fn field<T: FromStr>(line: usize, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::NotANumber {
        line,
        value: raw.to_owned(),
    })
}

fn fields<'a>(
    line: usize,
    raw: &'a str,
    expected: usize,
) -> Result<Vec<&'a str>, ConfigError> {
    let found: Vec<&str> = raw.split_whitespace().collect();
    if found.len() == expected {
        Ok(found)
    } else {
        Err(ConfigError::FieldCount {
            line,
            expected,
            found: found.len(),
        })
    }
}

impl FromStr for SimulationConfig {
    type Err = ConfigError;

    /// Parses the line-oriented format: a header line
    /// `numSources simulationTime linkCapacity bufferSize` followed by one
    /// `packetRate minSize maxSize weight startFrac endFrac` line per source.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l))
            .filter(|(_, l)| !l.trim().is_empty());

        let (line, header) = lines.next().ok_or(ConfigError::Empty)?;
        let header = fields(line, header, 4)?;
        let num_sources: usize = field(line, header[0])?;
        let simulation_time = field(line, header[1])?;
        let link_capacity = field(line, header[2])?;
        let buffer_size: i64 = field(line, header[3])?;
        let buffer_size = usize::try_from(buffer_size)
            .map_err(|_| ConfigError::NegativeBufferSize(buffer_size))?;

        let mut sources = Vec::with_capacity(num_sources);
        for found in 0..num_sources {
            let (line, raw) = lines.next().ok_or(ConfigError::MissingSources {
                declared: num_sources,
                found,
            })?;
            let raw = fields(line, raw, 6)?;
            sources.push(SourceConfig {
                packet_rate: field(line, raw[0])?,
                min_size: field(line, raw[1])?,
                max_size: field(line, raw[2])?,
                weight: field(line, raw[3])?,
                start_frac: field(line, raw[4])?,
                end_frac: field(line, raw[5])?,
            });
        }

        let config = SimulationConfig {
            simulation_time,
            link_capacity,
            buffer_size,
            sources,
        };
        config.validate()?;
        Ok(config)
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn num_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation_time <= 0. {
            return Err(ConfigError::NonPositiveSimulationTime);
        }
        if self.link_capacity <= 0. {
            return Err(ConfigError::NonPositiveCapacity);
        }
        for (idx, s) in self.sources.iter().enumerate() {
            if s.packet_rate <= 0. {
                return Err(ConfigError::NonPositiveRate { idx });
            }
            if s.weight <= 0. {
                return Err(ConfigError::NonPositiveWeight { idx });
            }
            if s.min_size == 0 {
                return Err(ConfigError::ZeroSize { idx });
            }
            if s.min_size > s.max_size {
                return Err(ConfigError::SizeRange {
                    idx,
                    min: s.min_size,
                    max: s.max_size,
                });
            }
            for frac in [s.start_frac, s.end_frac] {
                if !(0. ..=1.).contains(&frac) {
                    return Err(ConfigError::FracRange { idx });
                }
            }
            if s.end_frac < s.start_frac {
                return Err(ConfigError::WindowOrder { idx });
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> anyhow::Result<SimulationConfig> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("could not open input file {}", path.display()))?;
        raw.parse()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}
