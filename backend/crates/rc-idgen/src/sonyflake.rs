//! Sonyflake-style distributed id generator.
//!
//! ```text
//! | 1 bit: unused | 39 bits: elapsed 10ms ticks | 8 bits: sequence | 16 bits: machine id |
//! ```
//!
//! Ids from one generator are strictly increasing. Generators configured with
//! distinct machine ids never collide. Up to 256 ids are issued per tick; when
//! the sequence wraps, the generator borrows the next tick and sleeps until
//! the wall clock has caught up.
//!
//! A clock that moves backwards does not produce duplicates: the generator
//! keeps issuing from the last tick it used.

use crate::{BITS_MACHINE_ID, BITS_SEQUENCE, BITS_TIME, IdGenError, Result, TIME_UNIT_MS};

use rc_core::{AllocationError, IdGenerator};

use std::panic::Location;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use log::debug;

const SEQUENCE_MASK: u16 = (1 << BITS_SEQUENCE) - 1;
const MACHINE_ID_MASK: u64 = (1 << BITS_MACHINE_ID) - 1;

#[derive(Debug, Clone)]
pub struct SonyflakeSettings {
    /// Epoch for the time component. Must not be in the future.
    pub start_time: DateTime<Utc>,
    pub machine_id: u16,
}

/// Components of an id, as returned by [`Sonyflake::decompose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdParts {
    pub id: u64,
    /// Elapsed ticks since the start time.
    pub time: u64,
    pub sequence: u64,
    pub machine_id: u64,
}

#[derive(Debug)]
struct State {
    elapsed: i64,
    sequence: u16,
}

#[derive(Debug)]
pub struct Sonyflake {
    start_time: DateTime<Utc>,
    machine_id: u16,
    state: Mutex<State>,
}

impl Sonyflake {
    pub fn new(settings: SonyflakeSettings) -> Result<Self> {
        if settings.start_time > Utc::now() {
            return Err(IdGenError::StartTimeAhead {
                start_time: settings.start_time,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        debug!(
            "Sonyflake initialized: machine_id={}, start_time={}",
            settings.machine_id, settings.start_time
        );

        Ok(Self {
            start_time: settings.start_time,
            machine_id: settings.machine_id,
            state: Mutex::new(State {
                elapsed: 0,
                sequence: SEQUENCE_MASK,
            }),
        })
    }

    pub fn machine_id(&self) -> u16 {
        self.machine_id
    }

    /// Issue the next id, sleeping first if the sequence for the current tick
    /// is used up.
    pub async fn generate(&self) -> Result<u64> {
        let (id, overtime) = self.reserve(Utc::now())?;

        if let Some(overtime) = overtime {
            tokio::time::sleep(overtime).await;
        }

        Ok(id)
    }

    /// Allocate an id against `now` and report how far ahead of the clock the
    /// allocation ran, if at all.
    pub(crate) fn reserve(&self, now: DateTime<Utc>) -> Result<(u64, Option<Duration>)> {
        let elapsed_ms = (now - self.start_time).num_milliseconds();
        let current = elapsed_ms / TIME_UNIT_MS;

        let mut state = self.state.lock().map_err(|e| IdGenError::Internal {
            message: format!("state lock poisoned: {e}"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut overtime = None;
        if state.elapsed < current {
            state.elapsed = current;
            state.sequence = 0;
        } else {
            state.sequence = (state.sequence + 1) & SEQUENCE_MASK;
            if state.sequence == 0 {
                state.elapsed += 1;
                let ahead_ms = (state.elapsed - current) * TIME_UNIT_MS - elapsed_ms % TIME_UNIT_MS;
                overtime = Some(Duration::from_millis(ahead_ms.max(0) as u64));
            }
        }

        let id = self.compose(state.elapsed, state.sequence)?;
        Ok((id, overtime))
    }

    fn compose(&self, elapsed: i64, sequence: u16) -> Result<u64> {
        if elapsed < 0 || elapsed >= 1 << BITS_TIME {
            return Err(IdGenError::OverTimeLimit {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok((elapsed as u64) << (BITS_SEQUENCE + BITS_MACHINE_ID)
            | (sequence as u64) << BITS_MACHINE_ID
            | self.machine_id as u64)
    }

    /// Split an id into its time, sequence and machine id parts.
    pub fn decompose(id: u64) -> IdParts {
        IdParts {
            id,
            time: id >> (BITS_SEQUENCE + BITS_MACHINE_ID),
            sequence: (id >> BITS_MACHINE_ID) & SEQUENCE_MASK as u64,
            machine_id: id & MACHINE_ID_MASK,
        }
    }
}

#[async_trait]
impl IdGenerator for Sonyflake {
    async fn next_id(&self) -> std::result::Result<u64, AllocationError> {
        self.generate().await.map_err(AllocationError::from)
    }
}
