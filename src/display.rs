//! Foreground refresh loop for the multiplexed 7-segment display.
//!
//! The display shares one set of segment outputs across four digit
//! positions, so only one position is lit at a time. The refresh loop
//! scans the positions fast enough that all four appear lit to a human
//! observer, holding each just long enough for the hardware to settle.
//!
//! The loop never blocks on the ranging subsystem: every frame simply
//! renders whatever distance the handoff cell currently holds, so a
//! timed-out measurement leaves the previous reading on the display.

use fugit::MicrosDurationU32;

use crate::config::RangingConfig;
use crate::frame::DigitFrame;
use crate::handoff::DistanceCell;
use crate::types::DigitPosition;

/// Trait for abstracting the segment/digit-select output hardware.
///
/// Implement this for your display wiring (GPIO banks, shift registers,
/// driver ICs). The exact pin and bit mapping of segment patterns is the
/// implementation's concern; this crate only asserts which digit value to
/// show at which position.
pub trait SegmentDisplay {
    /// Turns every digit position off.
    fn blank_all(&mut self);

    /// Selects `position` and asserts the segment pattern for `digit`.
    ///
    /// A `digit` of `None` keeps all segments off while the position is
    /// selected. `decimal_point` additionally lights the position's
    /// decimal point segment.
    fn show(&mut self, position: DigitPosition, digit: Option<u8>, decimal_point: bool);
}

/// Trait for abstracting the dwell delay between digit positions.
pub trait DelaySource {
    /// Busy-waits for the given duration.
    fn delay(&mut self, duration: MicrosDurationU32);
}

/// Time-division multiplexes the current distance onto the display.
///
/// Owns the display and delay hardware and reads distances from the
/// [`DistanceCell`] shared with the ranging interrupt handlers.
///
/// # Type Parameters
/// * `'c` - Lifetime of the distance cell reference
/// * `D` - Display implementation type
/// * `W` - Delay implementation type
pub struct DisplayRefresher<'c, D: SegmentDisplay, W: DelaySource> {
    display: D,
    delay: W,
    dwell: MicrosDurationU32,
    distance: &'c DistanceCell,
}

impl<'c, D: SegmentDisplay, W: DelaySource> DisplayRefresher<'c, D, W> {
    /// Creates a refresher with the display blanked.
    pub fn new(display: D, delay: W, config: &RangingConfig, distance: &'c DistanceCell) -> Self {
        let mut display = display;
        display.blank_all();

        Self {
            display,
            delay,
            dwell: config.digit_dwell(),
            distance,
        }
    }

    /// Renders one full frame: all four digit positions, one dwell each.
    ///
    /// The decimal point is asserted together with the units digit, giving
    /// the fixed `XXX.X` centimeter format.
    pub fn refresh_once(&mut self) {
        let frame = DigitFrame::from_distance(self.distance.load());

        for position in DigitPosition::SCAN_ORDER {
            self.display.blank_all();
            self.display.show(
                position,
                frame.digit(position),
                position == DigitPosition::Units,
            );
            self.delay.delay(self.dwell);
        }
    }

    /// Runs the refresh loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.refresh_once();
        }
    }
}
