use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

/// Identifies the timer a scheduled tick belongs to.
///
/// A tick is only applied if its token still matches the live session and timer
/// generation. Restarting, pausing or finishing bumps the generation, so ticks that
/// were already in flight are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerToken {
    pub session: u64,
    pub kind: TimerKind,
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
pub enum TimerKind {
    Elapsed,
    Rest,
}

#[derive(Debug, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct RestDuration(u32);

impl RestDuration {
    pub const DEFAULT: RestDuration = RestDuration(90);

    pub fn new(seconds: u32) -> Result<Self, RestDurationError> {
        if !(1..=3600).contains(&seconds) {
            return Err(RestDurationError::OutOfRange(seconds));
        }
        Ok(Self(seconds))
    }
}

impl Default for RestDuration {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for RestDuration {
    type Error = RestDurationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        RestDuration::new(value)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RestDurationError {
    #[error("Rest duration must be in the range 1 to 3600 s ({0})")]
    OutOfRange(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Applied(u32),
    Finished,
    Stale,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RestState {
    #[default]
    Idle,
    Running {
        remaining: u32,
        total: u32,
    },
}

#[derive(Debug, Default, Clone)]
pub struct RestTimer {
    state: RestState,
    generation: u64,
}

impl RestTimer {
    #[must_use]
    pub fn state(&self) -> RestState {
        self.state
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        matches!(self.state, RestState::Running { .. })
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Starts counting down from the full duration, replacing any running countdown.
    pub fn start(&mut self, duration: RestDuration) -> u64 {
        self.generation += 1;
        self.state = RestState::Running {
            remaining: duration.0,
            total: duration.0,
        };
        self.generation
    }

    pub fn tick(&mut self, generation: u64) -> Tick {
        if generation != self.generation {
            return Tick::Stale;
        }
        match self.state {
            RestState::Idle => Tick::Stale,
            RestState::Running { remaining, total } => {
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.stop();
                    Tick::Finished
                } else {
                    self.state = RestState::Running { remaining, total };
                    Tick::Applied(remaining)
                }
            }
        }
    }

    /// Ends the countdown early. Returns `false` if no countdown was running.
    pub fn skip(&mut self) -> bool {
        if self.is_running() {
            self.stop();
            true
        } else {
            false
        }
    }

    fn stop(&mut self) {
        self.generation += 1;
        self.state = RestState::Idle;
    }
}

/// Counts whole seconds while running.
#[derive(Debug, Default, Clone)]
pub struct Stopwatch {
    elapsed: u32,
    running: bool,
    generation: u64,
}

impl Stopwatch {
    #[must_use]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn start(&mut self) -> u64 {
        if !self.running {
            self.generation += 1;
            self.running = true;
        }
        self.generation
    }

    pub fn stop(&mut self) {
        if self.running {
            self.generation += 1;
            self.running = false;
        }
    }

    pub fn tick(&mut self, generation: u64) -> Tick {
        if !self.running || generation != self.generation {
            return Tick::Stale;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        Tick::Applied(self.elapsed)
    }
}
