//! Timer core for the EyeCare reminder.
//!
//! This module provides the work/rest state machine:
//! - Phase transitions (Work ↔ Rest)
//! - Countdown bookkeeping, one decrement per delivered tick
//! - Event firing for ticks, state changes and phase completion
//!
//! The core never owns a clock. Whoever drives it calls [`TimerCore::on_tick`]
//! once per elapsed second while it is running (see [`super::clock`]).

use tokio::sync::mpsc;
use tracing::debug;

use crate::types::{TimerPhase, TimerSettings, TimerSnapshot, TimerState};

// ============================================================================
// TimerEvent
// ============================================================================

/// Notifications published by the timer core.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// One second elapsed
    Tick {
        /// Remaining seconds after the decrement
        remaining_seconds: u32,
    },
    /// Any observable field changed
    StateChanged(TimerSnapshot),
    /// The countdown of `phase` reached zero and the timer stopped
    PhaseCompleted {
        /// Phase that just finished
        phase: TimerPhase,
    },
}

// ============================================================================
// TimerCore
// ============================================================================

/// Drives a single work or rest countdown and signals phase transitions.
pub struct TimerCore {
    /// Current countdown state
    state: TimerState,
    /// Durations used on every reset
    settings: TimerSettings,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerCore {
    /// Creates an idle core at the start of a work phase.
    pub fn new(mut settings: TimerSettings, event_tx: mpsc::UnboundedSender<TimerEvent>) -> Self {
        settings.validate();
        Self {
            state: TimerState::new(TimerPhase::Work, &settings),
            settings,
            event_tx,
        }
    }

    /// Starts delivering ticks to the countdown. No-op if already running.
    pub fn start(&mut self) {
        if self.state.running {
            return;
        }
        self.state.running = true;
        debug!(phase = self.state.phase.as_str(), "timer started");
        self.emit_state_changed();
    }

    /// Stops applying ticks. No-op if already paused.
    pub fn pause(&mut self) {
        if !self.state.running {
            return;
        }
        self.state.running = false;
        debug!(phase = self.state.phase.as_str(), "timer paused");
        self.emit_state_changed();
    }

    /// Refills the countdown with the current phase's full duration.
    ///
    /// The running flag is left as it is.
    pub fn reset_current_phase(&mut self) {
        let total = self.settings.duration_for(self.state.phase);
        self.state.remaining_seconds = total;
        self.state.total_seconds = total;
        self.emit_state_changed();
    }

    /// Pauses and returns to the beginning of a work phase.
    pub fn reset_to_work_phase(&mut self) {
        self.pause();
        self.state.phase = TimerPhase::Work;
        self.reset_current_phase();
    }

    /// Flips Work ↔ Rest and resets the countdown. Does not start or pause.
    pub fn switch_phase(&mut self) {
        self.state.phase = self.state.phase.toggled();
        debug!(phase = self.state.phase.as_str(), "phase switched");
        self.reset_current_phase();
    }

    /// Replaces the durations.
    ///
    /// An idle timer is reset at once so the new duration shows; a running
    /// countdown keeps going and picks the change up on its next reset or switch.
    pub fn update_settings(&mut self, mut settings: TimerSettings) {
        settings.validate();
        self.settings = settings;
        if !self.state.running {
            self.reset_current_phase();
        }
    }

    /// Applies one elapsed second.
    ///
    /// Emits `Tick` and `StateChanged`; on reaching zero the timer stops and
    /// `PhaseCompleted` follows. Ticks arriving while idle are ignored.
    pub fn on_tick(&mut self) {
        if !self.state.running {
            return;
        }

        self.state.remaining_seconds = self.state.remaining_seconds.saturating_sub(1);

        self.emit(TimerEvent::Tick {
            remaining_seconds: self.state.remaining_seconds,
        });
        self.emit_state_changed();

        if self.state.remaining_seconds == 0 {
            self.state.running = false;
            debug!(phase = self.state.phase.as_str(), "phase completed");
            self.emit_state_changed();
            self.emit(TimerEvent::PhaseCompleted {
                phase: self.state.phase,
            });
        }
    }

    /// Remaining time as `MM:SS`.
    pub fn formatted_remaining(&self) -> String {
        self.state.formatted_remaining()
    }

    /// Elapsed share of the current phase, 0-100.
    pub fn progress_percentage(&self) -> f64 {
        self.state.progress_percentage()
    }

    /// Returns a reference to the current state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns the durations in effect.
    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    /// Returns a snapshot suitable for display.
    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::from(&self.state)
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn phase(&self) -> TimerPhase {
        self.state.phase
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    pub fn total_seconds(&self) -> u32 {
        self.state.total_seconds
    }

    fn emit_state_changed(&self) {
        self.emit(TimerEvent::StateChanged(self.snapshot()));
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("timer event receiver dropped; event discarded");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
