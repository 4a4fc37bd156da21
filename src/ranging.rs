//! Ultrasonic ranging state machine.
//!
//! Provides [`RangeFinder`], which coordinates three hardware timer
//! channels and a both-edge pin interrupt to produce one distance per
//! measurement cycle: the cycle timer paces the cadence, the trigger timer
//! bounds the outgoing pulse, and the echo timer measures (and bounds) the
//! round trip between the two edges of the echo pulse. Also defines the
//! [`TriggerPin`] and [`EchoInput`] traits for the sensor hardware seam.
//!
//! Every transition handler is meant to be called from the corresponding
//! interrupt handler, runs to completion without blocking, and returns a
//! [`RangingOutcome`] describing what happened. Completed measurements are
//! published to a [`DistanceCell`](crate::handoff::DistanceCell); the
//! foreground display loop reads them from there and is never waited on.

use crate::config::RangingConfig;
use crate::handoff::DistanceCell;
use crate::timer::TimerChannel;
use crate::types::{Distance, Edge};

/// Trait for abstracting the sensor's trigger output line.
///
/// Implement this for the output pin wired to the sensor's trigger input.
/// Handle any hardware errors internally - this method cannot fail.
pub trait TriggerPin {
    /// Drives the trigger line high (`true`) or low (`false`).
    fn set_active(&mut self, active: bool);
}

/// Trait for abstracting the sensor's echo input line.
///
/// The echo pin is configured to interrupt on both edges and may share its
/// interrupt line with unrelated pins.
pub trait EchoInput {
    /// Consumes a pending edge interrupt belonging to the echo pin.
    ///
    /// Implementations must check the interrupt status flag of the echo pin
    /// specifically, clear it, and report the edge direction (typically by
    /// sampling the pin level). Returns `None` when the interrupt was
    /// raised by another pin on the shared line; such interrupts are never
    /// acted upon.
    fn take_edge(&mut self) -> Option<Edge>;
}

/// The current state of a range finder's measurement cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangingState {
    /// Between cycles. The next cycle timer expiry starts a measurement.
    Idle,
    /// Trigger line is high, trigger timer bounds the pulse width.
    Triggering,
    /// Pulse finished, waiting for the sensor to raise the echo line.
    AwaitingEcho,
    /// Echo line is high, echo timer is counting the round trip.
    Measuring,
}

/// Hardware events driving the state machine.
///
/// Each variant corresponds to one interrupt source; the platform's
/// interrupt handlers translate their source into the matching variant and
/// pass it to [`RangeFinder::handle_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangingEvent {
    /// The cycle timer expired: time to start the next measurement.
    CyclePeriodElapsed,
    /// The trigger timer expired: the outgoing pulse reached full width.
    TriggerPulseElapsed,
    /// The echo pin transitioned in the given direction.
    EchoEdge(Edge),
    /// The echo timer expired without a falling edge: the measurement
    /// timed out.
    EchoWindowElapsed,
}

/// What a transition handler did in response to an event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RangingOutcome {
    /// A new measurement cycle began: trigger line raised, pulse timer
    /// running, cadence re-armed.
    CycleStarted,
    /// The cadence was re-armed but no new measurement began because the
    /// previous one is still in flight.
    CycleSkipped,
    /// The trigger pulse ended; now waiting for the echo.
    PulseEnded,
    /// The echo pulse began; the round-trip measurement is running.
    EchoStarted,
    /// The echo pulse ended. Carries the published distance.
    Captured(Distance),
    /// No falling edge arrived within the echo window. The previously
    /// published distance remains in place.
    EchoTimedOut,
    /// The event was spurious in the current state and was discarded.
    Ignored,
}

/// Drives one ultrasonic sensor through periodic measurement cycles.
///
/// The finder owns the trigger output, the echo input and the three timer
/// channels, and holds a reference to the [`DistanceCell`] it publishes
/// into. All handlers are non-blocking and safe to call from interrupt
/// context; spurious events are acknowledged and discarded rather than
/// surfaced as errors, so no event can halt the cadence.
///
/// There is deliberately no stop or cancel operation: once [`start`] arms
/// the cadence, the system is designed to run indefinitely and self-heal
/// every measurement cycle.
///
/// # Type Parameters
/// * `'c` - Lifetime of the distance cell reference
/// * `P` - Trigger output implementation type
/// * `E` - Echo input implementation type
/// * `T` - Timer channel implementation type
///
/// [`start`]: RangeFinder::start
pub struct RangeFinder<'c, P: TriggerPin, E: EchoInput, T: TimerChannel> {
    trigger_pin: P,
    echo_input: E,
    trigger_timer: T,
    echo_timer: T,
    cycle_timer: T,
    config: RangingConfig,
    distance: &'c DistanceCell,
    state: RangingState,
}

impl<'c, P: TriggerPin, E: EchoInput, T: TimerChannel> RangeFinder<'c, P, E, T> {
    /// Creates an idle range finder with the trigger line forced low.
    pub fn new(
        trigger_pin: P,
        echo_input: E,
        trigger_timer: T,
        echo_timer: T,
        cycle_timer: T,
        config: RangingConfig,
        distance: &'c DistanceCell,
    ) -> Self {
        let mut trigger_pin = trigger_pin;
        trigger_pin.set_active(false);

        Self {
            trigger_pin,
            echo_input,
            trigger_timer,
            echo_timer,
            cycle_timer,
            config,
            distance,
            state: RangingState::Idle,
        }
    }

    /// Arms the measurement cadence.
    ///
    /// The first cycle begins one full cycle period after this call; each
    /// cycle then re-arms the next one, producing a fixed cadence
    /// regardless of how individual measurements resolve.
    pub fn start(&mut self) {
        self.cycle_timer
            .configure(self.config.cycle_period_ticks(), true);
        self.cycle_timer.start();
    }

    /// Returns the current state of the measurement cycle.
    pub fn state(&self) -> RangingState {
        self.state
    }

    /// Returns the timing configuration in use.
    pub fn config(&self) -> &RangingConfig {
        &self.config
    }

    /// Handles one hardware event by dispatching to the matching
    /// transition handler.
    pub fn handle_event(&mut self, event: RangingEvent) -> RangingOutcome {
        match event {
            RangingEvent::CyclePeriodElapsed => self.on_cycle_period(),
            RangingEvent::TriggerPulseElapsed => self.on_trigger_pulse(),
            RangingEvent::EchoEdge(edge) => self.on_echo_edge(edge),
            RangingEvent::EchoWindowElapsed => self.on_echo_window(),
        }
    }

    /// Entry point for the shared edge interrupt line.
    ///
    /// Consumes the pending edge from the echo input and dispatches it.
    /// Interrupts raised by unrelated pins on the same line yield `None`
    /// from [`EchoInput::take_edge`] and are ignored without touching the
    /// state machine.
    pub fn on_echo_interrupt(&mut self) -> RangingOutcome {
        match self.echo_input.take_edge() {
            Some(edge) => self.handle_event(RangingEvent::EchoEdge(edge)),
            None => RangingOutcome::Ignored,
        }
    }

    /// Cycle timer expiry: start a new measurement if idle, and re-arm the
    /// cadence either way.
    fn on_cycle_period(&mut self) -> RangingOutcome {
        self.cycle_timer.acknowledge_and_clear();
        self.cycle_timer.stop();

        let outcome = if self.state == RangingState::Idle {
            self.trigger_pin.set_active(true);
            self.trigger_timer
                .configure(self.config.trigger_pulse_ticks(), true);
            self.trigger_timer.start();
            self.state = RangingState::Triggering;
            RangingOutcome::CycleStarted
        } else {
            RangingOutcome::CycleSkipped
        };

        // fixed cadence: the next cycle is scheduled no matter how this
        // one resolves
        self.cycle_timer
            .configure(self.config.cycle_period_ticks(), true);
        self.cycle_timer.start();

        outcome
    }

    /// Trigger timer expiry: the pulse has reached full width.
    fn on_trigger_pulse(&mut self) -> RangingOutcome {
        self.trigger_pin.set_active(false);
        self.trigger_timer.acknowledge_and_clear();
        self.trigger_timer.stop();

        match self.state {
            RangingState::Triggering => {
                self.state = RangingState::AwaitingEcho;
                RangingOutcome::PulseEnded
            }
            _ => RangingOutcome::Ignored,
        }
    }

    /// Edge on the echo pin.
    ///
    /// A rising edge is also accepted from `Idle` to tolerate an echo that
    /// arrives after a previous cycle already retired.
    fn on_echo_edge(&mut self, edge: Edge) -> RangingOutcome {
        match (edge, self.state) {
            (Edge::Rising, RangingState::AwaitingEcho | RangingState::Idle) => {
                self.echo_timer
                    .configure(self.config.echo_window_ticks(), true);
                self.echo_timer.start();
                self.state = RangingState::Measuring;
                RangingOutcome::EchoStarted
            }
            (Edge::Falling, RangingState::Measuring) => {
                let remaining = self.echo_timer.read_remaining();
                self.echo_timer.stop();

                let elapsed = self.config.echo_window_ticks().saturating_sub(remaining);
                let distance = self.config.distance_from_ticks(elapsed);
                self.distance.publish(distance);

                // nothing further happens until the cadence timer fires
                // again, so the completed cycle retires straight to idle
                self.state = RangingState::Idle;
                RangingOutcome::Captured(distance)
            }
            _ => RangingOutcome::Ignored,
        }
    }

    /// Echo timer expiry: no falling edge arrived within the window.
    ///
    /// The previously published distance stays in place; the machine
    /// retires so the next cycle can trigger on schedule.
    fn on_echo_window(&mut self) -> RangingOutcome {
        self.echo_timer.acknowledge_and_clear();
        self.echo_timer.stop();

        match self.state {
            RangingState::Measuring => {
                self.state = RangingState::Idle;
                RangingOutcome::EchoTimedOut
            }
            _ => RangingOutcome::Ignored,
        }
    }
}
