//! Hardware timer channel abstraction.

use crate::types::Ticks;

/// Trait for abstracting one channel of a hardware down-counting timer.
///
/// A channel counts down from its reload value towards zero while started
/// and can optionally raise an interrupt on expiry. Three independent
/// channels drive the ranging subsystem: one bounds the trigger pulse, one
/// bounds and measures the echo round trip, and one paces the interval
/// between measurement cycles.
///
/// Interrupts are single-shot: [`acknowledge_and_clear`] clears the pending
/// flag *and* the interrupt-enable bit, so every firing must be re-armed
/// individually via [`configure`]. A consumer that forgets to disable a
/// channel after use therefore cannot cause runaway repeated firing.
///
/// [`acknowledge_and_clear`]: TimerChannel::acknowledge_and_clear
/// [`configure`]: TimerChannel::configure
pub trait TimerChannel {
    /// Loads the reload value and sets whether expiry raises an interrupt.
    ///
    /// Resets the current count to `reload`. Does not start the channel.
    fn configure(&mut self, reload: Ticks, auto_interrupt: bool);

    /// Starts counting down from the configured reload value.
    fn start(&mut self);

    /// Stops the channel. The current count is frozen and may still be read.
    fn stop(&mut self);

    /// Returns the current count, in ticks remaining until expiry.
    ///
    /// Readable while the channel is running.
    fn read_remaining(&self) -> Ticks;

    /// Clears the pending-interrupt flag and the interrupt-enable bit.
    fn acknowledge_and_clear(&mut self);
}
