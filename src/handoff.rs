//! Interrupt-to-foreground handoff of the latest distance.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::types::Distance;

/// Single-producer/single-consumer cell carrying the latest distance from
/// the echo interrupt handler to the foreground refresh loop.
///
/// The distance is stored as its `f32` bit pattern in one [`AtomicU32`], so
/// the handoff is a single-word atomic store: the consumer observes either
/// the previous or the new value in full and can never see a torn read,
/// even when the interrupt preempts the load. Relaxed ordering suffices
/// because the cell is the only state shared between the two contexts and
/// each measurement is self-contained.
///
/// Only atomic load and store are used, which keeps the cell available on
/// targets without compare-and-swap support.
pub struct DistanceCell {
    bits: AtomicU32,
}

impl DistanceCell {
    /// Creates a cell holding zero distance.
    ///
    /// `const`, so the cell can live in a `static` shared between the
    /// interrupt handlers and the main loop.
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Publishes a new distance. Called from interrupt context only.
    pub fn publish(&self, distance: Distance) {
        self.bits
            .store(distance.centimeters().to_bits(), Ordering::Relaxed);
    }

    /// Returns the most recently published distance.
    pub fn load(&self) -> Distance {
        Distance::from_centimeters(f32::from_bits(self.bits.load(Ordering::Relaxed)))
    }
}

impl Default for DistanceCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_reads_zero() {
        let cell = DistanceCell::new();
        assert_eq!(cell.load(), Distance::ZERO);
    }

    #[test]
    fn publish_then_load_round_trips() {
        let cell = DistanceCell::new();
        cell.publish(Distance::from_centimeters(123.4));
        assert_eq!(cell.load().centimeters(), 123.4);
    }

    #[test]
    fn publish_overwrites_previous_value() {
        let cell = DistanceCell::new();
        cell.publish(Distance::from_centimeters(10.0));
        cell.publish(Distance::from_centimeters(0.4));
        assert_eq!(cell.load().centimeters(), 0.4);
    }

    #[test]
    fn cell_is_shareable_from_a_static() {
        static CELL: DistanceCell = DistanceCell::new();

        let producer: &DistanceCell = &CELL;
        let consumer: &DistanceCell = &CELL;

        producer.publish(Distance::from_centimeters(42.5));
        assert_eq!(consumer.load().centimeters(), 42.5);
    }
}
