//! Record of the targets produced during one run.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::Target;

/// Ordered, append-only list of generated targets, shared by a top-level
/// generation and every embedded generation it triggers.
///
/// Cloning the ledger clones the handle, not the entries. A position is
/// reserved when a render starts and filled when it succeeds, so targets are
/// listed in invocation order: an outer target comes before the targets its
/// template embedded, even though those finish first. Reservations of
/// failed renders are never visible.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    slots: Arc<Mutex<Vec<Option<Target>>>>,
}

/// Position reserved for a render in progress.
#[derive(Debug)]
#[must_use = "a reservation is only recorded once committed"]
pub struct Reservation {
    index: usize,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Option<Target>>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reserve the next position for a render that is starting.
    pub fn reserve(&self) -> Reservation {
        let mut slots = self.lock();
        slots.push(None);
        Reservation {
            index: slots.len() - 1,
        }
    }

    /// Record `target` at its reserved position.
    pub fn commit(&self, reservation: Reservation, target: Target) {
        let mut slots = self.lock();
        if let Some(slot) = slots.get_mut(reservation.index) {
            *slot = Some(target);
        }
    }

    /// Generated targets, in invocation order.
    pub fn targets(&self) -> Vec<Target> {
        self.lock().iter().flatten().cloned().collect()
    }

    /// Number of generated targets.
    pub fn len(&self) -> usize {
        self.lock().iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
