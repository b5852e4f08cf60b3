// src/sim/mod.rs - Simulation clock and position state
use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Bounds (inclusive, whole seconds) for the random gap between
/// successive simulation timestamps.
pub const CLOCK_STEP_SECS: (i64, i64) = (30, 60);

/// A geographic coordinate in decimal degrees.
///
/// `Copy` on purpose: advancers hand out value copies, so callers can
/// never reach back into the shared position through a returned value.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Monotonically advancing simulation time.
///
/// Each advance adds a uniform random whole-second duration in
/// [`CLOCK_STEP_SECS`]. The lower bound is positive, so returned
/// timestamps strictly increase and never repeat.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    current: DateTime<Utc>,
}

impl SimulationClock {
    /// Clock starting at the moment the simulation starts.
    pub fn starting_now() -> Self {
        Self::starting_at(Utc::now())
    }

    pub fn starting_at(start: DateTime<Utc>) -> Self {
        Self { current: start }
    }

    /// Advance by a random gap and return the new timestamp.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> DateTime<Utc> {
        let gap = rng.random_range(CLOCK_STEP_SECS.0..=CLOCK_STEP_SECS.1);
        self.current += Duration::seconds(gap);
        self.current
    }

    pub fn current(&self) -> DateTime<Utc> {
        self.current
    }
}

/// A straight-line journey split into equal steps.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub step_count: u32,
}

impl Route {
    pub fn new(origin: Coordinate, destination: Coordinate, step_count: u32) -> Self {
        Self {
            origin,
            destination,
            step_count,
        }
    }

    /// Per-step increment, computed independently per axis.
    pub fn step_increment(&self) -> (f64, f64) {
        let steps = f64::from(self.step_count);
        (
            (self.destination.latitude - self.origin.latitude) / steps,
            (self.destination.longitude - self.origin.longitude) / steps,
        )
    }
}

/// Smoothly interpolated vehicle position.
///
/// Each advance moves by the fixed route increment plus independent
/// uniform jitter on each axis. Drift off the origin-destination
/// segment is accepted; there is no clamping.
#[derive(Debug, Clone)]
pub struct SimulationPosition {
    current: Coordinate,
    lat_increment: f64,
    lon_increment: f64,
    jitter: f64,
}

impl SimulationPosition {
    pub fn new(route: Route, jitter: f64) -> Self {
        let (lat_increment, lon_increment) = route.step_increment();
        Self {
            current: route.origin,
            lat_increment,
            lon_increment,
            jitter,
        }
    }

    /// Advance one step along the route and return a copy of the new
    /// position.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Coordinate {
        self.current.latitude += self.lat_increment;
        self.current.longitude += self.lon_increment;
        self.current.latitude += rng.random_range(-self.jitter..=self.jitter);
        self.current.longitude += rng.random_range(-self.jitter..=self.jitter);
        self.current
    }

    pub fn current(&self) -> Coordinate {
        self.current
    }

    pub fn increments(&self) -> (f64, f64) {
        (self.lat_increment, self.lon_increment)
    }
}

/// The mutable state of one simulated journey: clock plus position,
/// owned exclusively by the journey driver. Each simulated device gets
/// its own independent pair; nothing here is shared across devices.
#[derive(Debug, Clone)]
pub struct SimulationState {
    pub clock: SimulationClock,
    pub position: SimulationPosition,
}

impl SimulationState {
    pub fn new(clock: SimulationClock, position: SimulationPosition) -> Self {
        Self { clock, position }
    }
}
