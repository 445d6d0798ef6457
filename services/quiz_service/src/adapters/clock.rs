//! services/quiz_service/src/adapters/clock.rs
//!
//! The wall-clock implementation of the `Clock` port.

use chrono::{DateTime, Utc};
use quiz_engine_core::ports::Clock;

/// Reads the system clock in UTC.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
