use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{Point, SlicePath};

/// Where the controller is in its render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartPhase {
    Idle,
    /// Pulling data and diffing layers inside `reload_data`.
    Reconciling,
    /// At least one transaction has not run its completion yet.
    Animating,
}

/// Blocks hit testing while transactions are in flight.
///
/// Clones share the same counter, so a transaction's completion callback can
/// reopen the gate after the controller call that scheduled it has returned.
#[derive(Debug, Clone, Default)]
pub struct InteractionGate {
    in_flight: Rc<Cell<usize>>,
}

impl InteractionGate {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.in_flight.get() == 0
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }

    pub(crate) fn close(&self) {
        self.in_flight.set(self.in_flight.get() + 1);
    }

    pub(crate) fn reopen(&self) {
        self.in_flight.set(self.in_flight.get().saturating_sub(1));
    }
}

/// Touch bookkeeping exposed to host applications.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchState {
    pub last_touch: Option<Point>,
    pub last_selection: Option<SlicePath>,
    pub suppressed_touches: u64,
}

#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    gate: InteractionGate,
    reconciling: bool,
    touch: TouchState,
}

impl InteractionState {
    #[must_use]
    pub fn phase(&self) -> ChartPhase {
        if self.reconciling {
            ChartPhase::Reconciling
        } else if self.gate.is_open() {
            ChartPhase::Idle
        } else {
            ChartPhase::Animating
        }
    }

    #[must_use]
    pub fn gate(&self) -> &InteractionGate {
        &self.gate
    }

    #[must_use]
    pub fn accepts_touches(&self) -> bool {
        !self.reconciling && self.gate.is_open()
    }

    #[must_use]
    pub fn touch(&self) -> TouchState {
        self.touch
    }

    pub fn on_reconcile_start(&mut self) {
        self.reconciling = true;
    }

    pub fn on_reconcile_end(&mut self) {
        self.reconciling = false;
    }

    pub fn on_touch_suppressed(&mut self, point: Point) {
        self.touch.last_touch = Some(point);
        self.touch.suppressed_touches += 1;
    }

    pub fn on_touch_resolved(&mut self, point: Point, selection: Option<SlicePath>) {
        self.touch.last_touch = Some(point);
        self.touch.last_selection = selection;
    }
}
