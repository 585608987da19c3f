use core::fmt;

use serde::{Deserialize, Serialize};

use crate::*;

/// Change notifications emitted by a [`Board`] after each mutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// The mine layout was generated around the first revealed cell
    MinesPlaced { mine_count: CellCount, safe: Coord2 },
    /// Safe cells were uncovered, in reveal order
    CellsRevealed { cells: Vec<Coord2> },
    /// A mine was uncovered
    MineRevealed { coords: Coord2 },
    /// A flag was placed or removed
    FlagToggled { coords: Coord2, flagged: bool },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Callback = Box<dyn FnMut(&BoardEvent)>;

/// Ordered list of callbacks, invoked synchronously in subscription order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Callback)>,
}

impl Observers {
    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&BoardEvent) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns whether an observer was removed.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn notify(&mut self, event: &BoardEvent) {
        log::trace!("Notifying {} observers of {:?}", self.entries.len(), event);
        for (_, callback) in &mut self.entries {
            callback(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
