#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`RangeFinder`**: drives one ultrasonic sensor through periodic measurement cycles
//! - **`RangingState`** / **`RangingEvent`** / **`RangingOutcome`**: the explicit state machine
//!   behind the measurement cycle, one event per interrupt source
//! - **`TimerChannel`**: trait to implement for your hardware timer channels (three are needed)
//! - **`TriggerPin`** / **`EchoInput`**: traits to implement for the sensor's two pins
//! - **`DistanceCell`**: single-word atomic handoff of the latest distance from interrupt
//!   context to the foreground loop
//! - **`DigitFrame`**: banded decomposition of a distance into four display digits
//! - **`DisplayRefresher`**: foreground multiplexing loop over the `SegmentDisplay` trait
//! - **`RangingConfig`**: validated timing constants, all derived from one tick clock
//!
//! All distances are in centimeters as `f32`, derived from echo round-trip ticks by a pure
//! linear conversion. The display renders them in a fixed `XXX.X` format with leading
//! blanking and an all-nines saturation marker at 1000 cm and beyond.

// Re-export the fugit duration type used throughout the configuration API
pub use fugit::MicrosDurationU32;

pub mod config;
pub mod display;
pub mod frame;
pub mod handoff;
pub mod ranging;
pub mod timer;
pub mod types;

pub use config::{ConfigError, RangingConfig, ROUND_TRIP_US_PER_CM};
pub use display::{DelaySource, DisplayRefresher, SegmentDisplay};
pub use frame::{DigitFrame, SATURATION_CM};
pub use handoff::DistanceCell;
pub use ranging::{EchoInput, RangeFinder, RangingEvent, RangingOutcome, RangingState, TriggerPin};
pub use timer::TimerChannel;
pub use types::{DigitPosition, Distance, Edge, Ticks};
