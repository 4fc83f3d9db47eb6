//! Match engine - the board state machine
//!
//! The engine owns the grid and walks it through a turn:
//!
//! ```text
//! Idle -> ValidatingSwap -> ResolvingMatches -> AwaitingAnimations -> Compacting
//!                                 ^                                        |
//!                                 +----------------------------------------+
//! ```
//!
//! It never waits on a timer of its own. Phases that depend on the renderer
//! record which tiles must report back through
//! [`MatchEngine::on_animation_complete`] and advance when the last one does.
//! A phase with nothing to wait for advances immediately.
//!
//! A new engine starts in `BoardGeneration` with input closed; call
//! [`MatchEngine::generate_board`] (or [`MatchEngine::load_board`]) to open it.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::core::{find_words, AffectedRegion, BoardGrid, GridSnapshot, TileFactory, WordLookup};
use crate::error::{EngineError, EngineResult};
use crate::events::{CascadeStep, EngineEvent, ListenerId, Observers, TurnReport};
use crate::input::{DragOffset, OverlapResolver, SwapResolver};
use crate::outstanding::OutstandingAnimations;
use crate::types::{BoardPhase, GridPos, SwapMode, Tile, TileId, EVENT_OUTBOX_CAPACITY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Input was closed, or the request did not name two adjacent tiles
    Ignored,
    /// No eligible neighbour; the tile returns to its cell
    SnappedBack,
    Swapped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationReport {
    /// Full-board scans, including the final clean one
    pub passes: u32,
    /// Characters rerolled to break up words
    pub substitutions: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub phase: String,
    pub can_interact: bool,
    pub pending_animations: usize,
    pub grid: GridSnapshot,
}

pub struct MatchEngine<L, F> {
    config: EngineConfig,
    lookup: L,
    factory: F,
    grid: BoardGrid,
    rng: Pcg32,
    phase: BoardPhase,
    outstanding: OutstandingAnimations,
    /// Tiles waiting for their destroy animation, with the cell they occupy
    marked: BTreeMap<TileId, GridPos>,
    pending_region: AffectedRegion,
    turn: TurnReport,
    last_turn: Option<TurnReport>,
    /// Time since the last completion signal while waiting
    waited_ms: u32,
    observers: Observers<EngineEvent>,
    /// Most recent events for `take_events`; the oldest fall off when full
    outbox: VecDeque<EngineEvent>,
}

impl<L: WordLookup, F: TileFactory> MatchEngine<L, F> {
    pub fn new(config: EngineConfig, lookup: L, factory: F) -> EngineResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };

        Ok(Self {
            grid: BoardGrid::new(config.rows, config.columns),
            config,
            lookup,
            factory,
            rng,
            phase: BoardPhase::BoardGeneration,
            outstanding: OutstandingAnimations::new(),
            marked: BTreeMap::new(),
            pending_region: AffectedRegion::new(),
            turn: TurnReport::default(),
            last_turn: None,
            waited_ms: 0,
            observers: Observers::new(),
            outbox: VecDeque::new(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> BoardPhase {
        self.phase
    }

    pub fn can_interact(&self) -> bool {
        self.phase.accepts_input()
    }

    pub fn grid(&self) -> &BoardGrid {
        &self.grid
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The most recently completed turn
    pub fn last_turn(&self) -> Option<&TurnReport> {
        self.last_turn.as_ref()
    }

    /// Tiles the engine is waiting to hear from, in id order
    pub fn pending_animations(&self) -> Vec<TileId> {
        self.outstanding.tiles()
    }

    /// Resolver using the configured overlap ratio
    pub fn overlap_resolver(&self) -> OverlapResolver {
        OverlapResolver::new(self.config.overlap_ratio)
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            phase: self.phase.as_str().to_string(),
            can_interact: self.can_interact(),
            pending_animations: self.outstanding.len(),
            grid: self.grid.snapshot(),
        }
    }

    pub fn add_listener<C>(&mut self, callback: C) -> ListenerId
    where
        C: FnMut(&EngineEvent) + 'static,
    {
        self.observers.add_listener(callback)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.observers.remove_listener(id)
    }

    /// Drain events emitted since the last call. Only the newest
    /// `EVENT_OUTBOX_CAPACITY` are kept between calls.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.outbox.drain(..).collect()
    }

    /// Fill the board with random letters, then keep rerolling the letters of
    /// every word found on a full-board scan until a scan comes back clean.
    ///
    /// Tiles are created once; only their characters change between passes.
    /// On error the engine stays in `BoardGeneration` with input closed.
    pub fn generate_board(&mut self) -> EngineResult<GenerationReport> {
        if !matches!(self.phase, BoardPhase::Idle | BoardPhase::BoardGeneration) {
            return Err(EngineError::Busy(self.phase));
        }
        self.check_lookup()?;
        self.set_phase(BoardPhase::BoardGeneration);
        self.reset_board();

        let positions: Vec<GridPos> = self.grid.positions().collect();
        for pos in positions {
            let character = self.lookup.random_letter(&mut self.rng)?;
            self.grid.spawn_replacement(pos, character, &mut self.factory);
        }

        let cap = self.config.generation_iteration_cap;
        let mut substitutions = 0;
        for pass in 1..=cap {
            let words = find_words(
                &self.lookup,
                &self.grid.all_sequences(),
                self.config.min_word_length,
            )?;

            if words.is_empty() {
                let tiles: Vec<Tile> = self.grid.tiles().copied().collect();
                log::info!(
                    "Generated {}x{} board after {pass} passes ({substitutions} rerolls)",
                    self.grid.rows(),
                    self.grid.columns()
                );
                self.emit(EngineEvent::TilesSpawned { tiles });
                self.emit(EngineEvent::BoardReady { passes: pass });
                self.set_phase(BoardPhase::Idle);
                return Ok(GenerationReport {
                    passes: pass,
                    substitutions,
                });
            }

            let cells: BTreeSet<GridPos> = words
                .iter()
                .flat_map(|w| w.tiles.iter().map(|t| t.pos))
                .collect();
            log::debug!(
                "Generation pass {pass}: {} words, rerolling {} tiles",
                words.len(),
                cells.len()
            );
            for pos in cells {
                let character = self.lookup.random_letter(&mut self.rng)?;
                self.grid.set_character(pos, character);
                substitutions += 1;
            }
        }

        log::warn!("Board generation gave up after {cap} passes");
        Err(EngineError::GenerationDidNotConverge { iterations: cap })
    }

    /// Install a fixed layout, one string per row, and open input.
    /// The layout is not checked for words, but the lookup must be able to
    /// check words and supply refills.
    pub fn load_board<S: AsRef<str>>(&mut self, rows: &[S]) -> EngineResult<()> {
        if !matches!(self.phase, BoardPhase::Idle | BoardPhase::BoardGeneration) {
            return Err(EngineError::Busy(self.phase));
        }
        let shape_ok = rows.len() == self.config.rows
            && rows
                .iter()
                .all(|r| r.as_ref().chars().count() == self.config.columns);
        if !shape_ok {
            return Err(EngineError::InvalidConfig(format!(
                "layout must be {}x{}",
                self.config.rows, self.config.columns
            )));
        }
        self.check_lookup()?;

        self.set_phase(BoardPhase::BoardGeneration);
        self.reset_board();
        self.grid = BoardGrid::from_rows(rows, &mut self.factory);
        let tiles: Vec<Tile> = self.grid.tiles().copied().collect();
        self.emit(EngineEvent::TilesSpawned { tiles });
        self.emit(EngineEvent::BoardReady { passes: 0 });
        self.set_phase(BoardPhase::Idle);
        Ok(())
    }

    /// Finish a drag gesture: swap with the neighbour the resolver picks, or
    /// snap back when there is none.
    pub fn release_drag<R>(
        &mut self,
        origin: GridPos,
        offset: DragOffset,
        resolver: &R,
    ) -> EngineResult<SwapOutcome>
    where
        R: SwapResolver + ?Sized,
    {
        if !self.can_interact() {
            return Ok(SwapOutcome::Ignored);
        }
        match resolver.resolve(origin, offset, self.grid.rows(), self.grid.columns()) {
            Some(target) => self.request_swap(origin, target),
            None => self.snap_back(origin, offset != DragOffset::ZERO),
        }
    }

    /// Swap two adjacent tiles and resolve the resulting cascade.
    ///
    /// Requests that arrive while input is closed are ignored, not errors.
    pub fn request_swap(&mut self, a: GridPos, b: GridPos) -> EngineResult<SwapOutcome> {
        if !self.can_interact() {
            log::trace!("Swap {a} <-> {b} ignored during {}", self.phase.as_str());
            return Ok(SwapOutcome::Ignored);
        }
        if !a.is_adjacent(b) {
            return Ok(SwapOutcome::Ignored);
        }
        let (Some(&tile_a), Some(&tile_b)) = (self.grid.get_pos(a), self.grid.get_pos(b)) else {
            return Ok(SwapOutcome::Ignored);
        };

        self.set_phase(BoardPhase::ValidatingSwap);
        self.grid.swap(a, b);
        self.turn = TurnReport {
            swap: Some((a, b)),
            ..TurnReport::default()
        };
        self.emit_swapped(a, b);
        self.outstanding.expect(tile_a.id);
        self.outstanding.expect(tile_b.id);

        self.pending_region = AffectedRegion::from_positions([a, b]);
        self.set_phase(BoardPhase::ResolvingMatches);
        self.drive()?;
        Ok(SwapOutcome::Swapped)
    }

    /// A tile finished its current animation (swap, snap, destroy or drop)
    pub fn on_animation_complete(&mut self, tile: TileId) -> EngineResult<()> {
        if !self.outstanding.complete(tile) {
            log::warn!(
                "Completion from {tile} ignored: not waiting on it during {}",
                self.phase.as_str()
            );
            return Ok(());
        }
        self.waited_ms = 0;
        self.drive()
    }

    /// Advance the animation watchdog. Returns true if stuck animations were
    /// force-completed.
    pub fn tick(&mut self, elapsed_ms: u32) -> EngineResult<bool> {
        if self.outstanding.is_empty() {
            self.waited_ms = 0;
            return Ok(false);
        }
        self.waited_ms = self.waited_ms.saturating_add(elapsed_ms);

        let Some(timeout) = self.config.animation_timeout_ms else {
            return Ok(false);
        };
        if self.waited_ms < timeout {
            return Ok(false);
        }

        let stuck = self.outstanding.force_clear();
        log::warn!(
            "No completion for {}ms during {}; forcing {} tiles: {:?}",
            self.waited_ms,
            self.phase.as_str(),
            stuck.len(),
            stuck
        );
        self.waited_ms = 0;
        self.drive()?;
        Ok(true)
    }

    fn snap_back(&mut self, origin: GridPos, moving: bool) -> EngineResult<SwapOutcome> {
        let Some(&tile) = self.grid.get_pos(origin) else {
            return Ok(SwapOutcome::Ignored);
        };
        self.set_phase(BoardPhase::SnappingBack);
        self.emit(EngineEvent::SnapBack {
            tile: tile.id,
            pos: origin,
        });
        if moving {
            self.outstanding.expect(tile.id);
        }
        self.drive()?;
        Ok(SwapOutcome::SnappedBack)
    }

    /// Run phases forward until one has to wait on the renderer
    fn drive(&mut self) -> EngineResult<()> {
        loop {
            match self.phase {
                BoardPhase::ResolvingMatches if !self.pending_region.is_empty() => {
                    self.search()?
                }
                _ if !self.outstanding.is_empty() => return Ok(()),
                BoardPhase::ResolvingMatches => self.finish_turn(),
                BoardPhase::AwaitingAnimations => self.compact()?,
                BoardPhase::Compacting => self.set_phase(BoardPhase::ResolvingMatches),
                BoardPhase::SwappingBack => self.close_turn(),
                BoardPhase::SnappingBack => self.set_phase(BoardPhase::Idle),
                BoardPhase::Idle | BoardPhase::ValidatingSwap | BoardPhase::BoardGeneration => {
                    return Ok(())
                }
            }
        }
    }

    /// Search the affected lines and mark every matched tile for destruction
    fn search(&mut self) -> EngineResult<()> {
        let region = self.pending_region.take();
        let sequences = self.grid.sequences_in(&region);
        let words = find_words(&self.lookup, &sequences, self.config.min_word_length)?;
        if words.is_empty() {
            log::debug!("No words in {} lines", sequences.len());
            return Ok(());
        }

        self.marked.clear();
        for word in &words {
            for tile in &word.tiles {
                self.marked.insert(tile.id, tile.pos);
            }
        }
        for &id in self.marked.keys() {
            self.outstanding.expect(id);
        }

        let step = CascadeStep {
            words: words.iter().map(|w| w.word.clone()).collect(),
            destroyed: self.marked.keys().copied().collect(),
        };
        log::debug!(
            "Found {:?}, destroying {} tiles",
            step.words,
            step.destroyed.len()
        );

        self.set_phase(BoardPhase::AwaitingAnimations);
        self.emit(EngineEvent::WordsFound {
            words: step.words.clone(),
        });
        self.emit(EngineEvent::DestroyStarted {
            tiles: step.destroyed.clone(),
        });
        self.turn.steps.push(step);
        Ok(())
    }

    /// Remove the destroyed tiles, drop the survivors and refill from the top.
    ///
    /// Refill letters are drawn before anything is removed. If the lookup
    /// cannot supply them the board is left untouched and input stays closed.
    fn compact(&mut self) -> EngineResult<()> {
        let cells: Vec<GridPos> = self.marked.values().copied().collect();
        let letters = (0..cells.len())
            .map(|_| self.lookup.random_letter(&mut self.rng))
            .collect::<Result<Vec<char>, _>>()?;
        self.marked.clear();

        let compaction = self.grid.remove_and_compact(cells);
        for tile in &compaction.removed {
            self.factory.release_tile(tile.id);
        }
        self.set_phase(BoardPhase::Compacting);

        for m in &compaction.moved {
            self.outstanding.expect(m.id);
        }
        if !compaction.moved.is_empty() {
            self.emit(EngineEvent::TilesDropped {
                moves: compaction.moved.clone(),
            });
        }

        debug_assert_eq!(compaction.vacated.len(), letters.len());
        let mut spawned = Vec::with_capacity(compaction.vacated.len());
        for (&pos, character) in compaction.vacated.iter().zip(letters) {
            if let Some(tile) = self.grid.spawn_replacement(pos, character, &mut self.factory) {
                self.outstanding.expect(tile.id);
                spawned.push(tile);
            }
        }
        debug_assert!(self.grid.is_full());
        debug_assert!(self.grid.check_consistency().is_ok());
        self.emit(EngineEvent::TilesSpawned { tiles: spawned });

        self.pending_region = compaction.affected;
        Ok(())
    }

    fn finish_turn(&mut self) {
        let unproductive = !self.turn.found_words() && !self.turn.swapped_back;
        if self.config.swap_mode == SwapMode::Classic && unproductive {
            if let Some((a, b)) = self.turn.swap {
                self.turn.swapped_back = true;
                self.set_phase(BoardPhase::SwappingBack);
                self.grid.swap(a, b);
                self.emit_swapped(a, b);
                for pos in [a, b] {
                    if let Some(tile) = self.grid.get_pos(pos) {
                        self.outstanding.expect(tile.id);
                    }
                }
                return;
            }
        }
        self.close_turn();
    }

    fn close_turn(&mut self) {
        let report = std::mem::take(&mut self.turn);
        log::info!(
            "Turn finished: {} cascade steps, {} tiles destroyed{}",
            report.steps.len(),
            report.destroyed_count(),
            if report.swapped_back { ", swapped back" } else { "" }
        );
        self.last_turn = Some(report.clone());
        self.set_phase(BoardPhase::Idle);
        self.emit(EngineEvent::CascadeFinished(report));
    }

    /// Fails unless the lookup has both a word list and a character set
    fn check_lookup(&self) -> EngineResult<()> {
        self.lookup.contains("")?;
        self.lookup.random_letter(&mut Pcg32::seed_from_u64(0))?;
        Ok(())
    }

    fn reset_board(&mut self) {
        self.grid.release_all(&mut self.factory);
        self.grid = BoardGrid::new(self.config.rows, self.config.columns);
        self.outstanding.force_clear();
        self.marked.clear();
        self.pending_region.clear();
        self.turn = TurnReport::default();
    }

    fn emit_swapped(&mut self, a: GridPos, b: GridPos) {
        if let (Some(&first), Some(&second)) = (self.grid.get_pos(b), self.grid.get_pos(a)) {
            self.emit(EngineEvent::TilesSwapped { first, second });
        }
    }

    fn set_phase(&mut self, to: BoardPhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        self.waited_ms = 0;
        log::debug!("Phase {} -> {}", from.as_str(), to.as_str());
        self.emit(EngineEvent::PhaseChanged { from, to });
        if from.accepts_input() != to.accepts_input() {
            self.emit(EngineEvent::InteractionChanged(to.accepts_input()));
        }
    }

    fn emit(&mut self, event: EngineEvent) {
        self.observers.notify(&event);
        if self.outbox.len() == EVENT_OUTBOX_CAPACITY {
            self.outbox.pop_front();
        }
        self.outbox.push_back(event);
    }
}

impl<L, F> std::fmt::Debug for MatchEngine<L, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("phase", &self.phase)
            .field("rows", &self.grid.rows())
            .field("columns", &self.grid.columns())
            .field("outstanding", &self.outstanding.total())
            .finish()
    }
}
