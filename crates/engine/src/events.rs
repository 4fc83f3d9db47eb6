//! Engine events and listener registry
//!
//! Events are emitted only after the grid mutation they describe has been
//! committed, so a listener can read the board and see the new state.

use crate::core::TileMove;
use crate::types::{BoardPhase, GridPos, Tile, TileId};

/// Words destroyed in one pass of the cascade
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeStep {
    pub words: Vec<String>,
    /// Distinct tiles destroyed by this step
    pub destroyed: Vec<TileId>,
}

/// Summary of a completed player turn
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TurnReport {
    pub swap: Option<(GridPos, GridPos)>,
    pub steps: Vec<CascadeStep>,
    pub swapped_back: bool,
}

impl TurnReport {
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.steps
            .iter()
            .flat_map(|s| s.words.iter().map(String::as_str))
    }

    /// Distinct tiles destroyed over the whole cascade
    pub fn destroyed_count(&self) -> usize {
        self.steps.iter().map(|s| s.destroyed.len()).sum()
    }

    pub fn found_words(&self) -> bool {
        !self.steps.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    PhaseChanged { from: BoardPhase, to: BoardPhase },
    /// Raised and lowered as the board opens and closes for input
    InteractionChanged(bool),
    TilesSwapped { first: Tile, second: Tile },
    SnapBack { tile: TileId, pos: GridPos },
    WordsFound { words: Vec<String> },
    DestroyStarted { tiles: Vec<TileId> },
    TilesDropped { moves: Vec<TileMove> },
    TilesSpawned { tiles: Vec<Tile> },
    BoardReady { passes: u32 },
    CascadeFinished(TurnReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Ordered list of callbacks. Listeners run in registration order.
pub struct Observers<E> {
    next_id: u64,
    listeners: Vec<(ListenerId, Listener<E>)>,
}

impl<E> Observers<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    pub fn add_listener<C>(&mut self, callback: C) -> ListenerId
    where
        C: FnMut(&E) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// Returns false if `id` was not registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn notify(&mut self, event: &E) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Observers<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_add_notify_remove() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers: Observers<u32> = Observers::new();

        let sink = Rc::clone(&seen);
        let first = observers.add_listener(move |e| sink.borrow_mut().push(("first", *e)));
        let sink = Rc::clone(&seen);
        observers.add_listener(move |e| sink.borrow_mut().push(("second", *e)));

        observers.notify(&1);
        assert!(observers.remove_listener(first));
        assert!(!observers.remove_listener(first));
        observers.notify(&2);

        assert_eq!(
            *seen.borrow(),
            vec![("first", 1), ("second", 1), ("second", 2)]
        );
        assert_eq!(observers.len(), 1);
    }

    #[test]
    fn test_turn_report_counts() {
        let report = TurnReport {
            swap: None,
            steps: vec![
                CascadeStep {
                    words: vec!["cat".into(), "dog".into()],
                    destroyed: vec![TileId(1), TileId(2), TileId(3), TileId(4), TileId(5)],
                },
                CascadeStep {
                    words: vec!["ant".into()],
                    destroyed: vec![TileId(7), TileId(8), TileId(9)],
                },
            ],
            swapped_back: false,
        };
        assert_eq!(report.words().collect::<Vec<_>>(), vec!["cat", "dog", "ant"]);
        assert_eq!(report.destroyed_count(), 8);
        assert!(report.found_words());
    }
}
