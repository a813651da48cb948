use std::{
    fmt::Display,
    ops::{Add, AddAssign, Div, Sub},
};

pub type Float = f64;

#[derive(Debug, Default, PartialEq, PartialOrd, Clone, Copy)]
pub struct TimeSpan {
    ts: Float,
}

impl TimeSpan {
    pub const ZERO: TimeSpan = TimeSpan::new(0.);

    #[must_use]
    pub const fn new(ts: Float) -> TimeSpan {
        TimeSpan { ts }
    }

    #[must_use]
    pub const fn seconds(&self) -> Float {
        self.ts
    }
}

#[must_use]
pub const fn seconds(ts: Float) -> TimeSpan {
    TimeSpan::new(ts)
}

impl Add for TimeSpan {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        TimeSpan::new(self.ts + rhs.ts)
    }
}

impl AddAssign for TimeSpan {
    fn add_assign(&mut self, rhs: Self) {
        self.ts += rhs.ts;
    }
}

impl Div<Float> for TimeSpan {
    type Output = TimeSpan;

    fn div(self, rhs: Float) -> Self::Output {
        TimeSpan::new(self.ts / rhs)
    }
}

impl Display for TimeSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.ts)
    }
}

#[derive(Debug, PartialEq, PartialOrd, Clone, Copy)]
pub struct Rate {
    r: Float,
}

impl Rate {
    #[must_use]
    pub const fn new(r: Float) -> Rate {
        Rate { r }
    }

    #[must_use]
    pub const fn value(&self) -> Float {
        self.r
    }
}

impl Div<Rate> for Float {
    type Output = TimeSpan;

    fn div(self, rhs: Rate) -> Self::Output {
        TimeSpan::new(self / rhs.r)
    }
}

impl Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s^-1", self.r)
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Time {
    t: Float,
}

impl Time {
    pub const SIM_START: Time = Time { t: 0. };

    #[must_use]
    pub const fn from_sim_start(t: Float) -> Time {
        Time { t }
    }

    #[must_use]
    pub const fn value(&self) -> Float {
        self.t
    }
}

impl Eq for Time {}

impl PartialOrd for Time {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Time {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.t.total_cmp(&other.t)
    }
}

impl Sub<Time> for Time {
    type Output = TimeSpan;

    fn sub(self, Time { t }: Time) -> Self::Output {
        TimeSpan::new(self.t - t)
    }
}

impl Add<TimeSpan> for Time {
    type Output = Time;

    fn add(self, rhs: TimeSpan) -> Self::Output {
        Time::from_sim_start(self.t + rhs.ts)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}t", self.t)
    }
}
