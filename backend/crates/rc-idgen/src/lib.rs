pub mod error;
pub mod sonyflake;


pub use error::{IdGenError, Result};
pub use sonyflake::{IdParts, Sonyflake, SonyflakeSettings};

/// Bits of elapsed time, in [`TIME_UNIT_MS`] ticks since the start time.
pub const BITS_TIME: u32 = 39;
/// Bits of per-tick sequence.
pub const BITS_SEQUENCE: u32 = 8;
/// Bits of machine id.
pub const BITS_MACHINE_ID: u32 = 16;
/// Length of one time tick in milliseconds.
pub const TIME_UNIT_MS: i64 = 10;
