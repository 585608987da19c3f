use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::*;

/// Whether the mine layout has been generated yet.
///
/// Valid transitions:
/// - Pending -> Placed, on the first reveal of an in-range cell
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LayoutState {
    /// No mines yet, the plan is used on the first reveal
    Pending(MinePlan),
    /// Mines are fixed for the rest of the board's lifetime
    Placed { mine_count: CellCount },
}

impl LayoutState {
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }
}

/// Grid of cells with lazily placed mines.
///
/// Cells are stored row-major, the cell at `(row, column)` lives at `row * width + column`.
/// Coordinates outside the board are ignored by every mutating operation.
#[derive(Debug)]
pub struct Board {
    config: BoardConfig,
    cells: Vec<Cell>,
    layout: LayoutState,
    revealed_count: CellCount,
    flagged_count: CellCount,
    observers: Observers,
}

impl Board {
    /// A board with the default density and an entropy-seeded layout.
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        Self::from_config(BoardConfig::new(width, height)?)
    }

    pub fn from_config(config: BoardConfig) -> Result<Self> {
        Self::with_generator(config, MinePlan::from_entropy())
    }

    pub fn with_generator(config: BoardConfig, plan: impl Into<MinePlan>) -> Result<Self> {
        config.validate()?;

        let shape = config.shape();
        let cells = (0..shape.height)
            .flat_map(|row| (0..shape.width).map(move |column| Cell::covered((row, column), shape)))
            .collect();

        Ok(Self {
            config,
            cells,
            layout: LayoutState::Pending(plan.into()),
            revealed_count: 0,
            flagged_count: 0,
            observers: Observers::default(),
        })
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn width(&self) -> Coord {
        self.config.width
    }

    pub fn height(&self) -> Coord {
        self.config.height
    }

    pub fn shape(&self) -> GridShape {
        self.config.shape()
    }

    pub fn density(&self) -> f64 {
        self.config.density
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, row: Coord, column: Coord) -> Option<&Cell> {
        self.index_of(row, column).map(|index| &self.cells[index])
    }

    pub fn index_of(&self, row: Coord, column: Coord) -> Option<usize> {
        self.shape().index_of((row, column))
    }

    pub fn layout_state(&self) -> &LayoutState {
        &self.layout
    }

    pub fn is_layout_placed(&self) -> bool {
        self.layout.is_placed()
    }

    /// Number of mines, known only once the layout is placed.
    pub fn mine_count(&self) -> Option<CellCount> {
        match self.layout {
            LayoutState::Pending(_) => None,
            LayoutState::Placed { mine_count } => Some(mine_count),
        }
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Revealed mines, for callers that want to end the game.
    pub fn detonated_cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|cell| cell.is_detonated())
    }

    pub fn subscribe<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&BoardEvent) + 'static,
    {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Reveal a covered cell, placing the mines first if this is the first reveal.
    ///
    /// A zero cell opens its whole zero region and the numbered border around it.
    /// Flagged and revealed cells are left alone.
    pub fn reveal(&mut self, row: Coord, column: Coord) -> RevealOutcome {
        let coords = (row, column);
        let Some(index) = self.index_of(row, column) else {
            log::trace!("Ignoring reveal outside the board at {:?}", coords);
            return RevealOutcome::NoChange;
        };

        self.ensure_mines_placed(coords);

        let cell = &mut self.cells[index];
        if !cell.state.is_covered() {
            log::trace!("Ignoring reveal of {:?} cell at {:?}", cell.state, coords);
            return RevealOutcome::NoChange;
        }

        if cell.is_mine {
            cell.state = CellState::Revealed;
            self.revealed_count += 1;
            log::debug!("Revealed mine at {:?}", coords);
            self.observers.notify(&BoardEvent::MineRevealed { coords });
            return RevealOutcome::HitMine;
        }

        let is_zero = cell.adjacent_mine_count == 0;
        let cells = if is_zero {
            self.flood_reveal(coords)
        } else {
            self.cells[index].state = CellState::Revealed;
            self.revealed_count += 1;
            vec![coords]
        };
        let opened = cells.len() as CellCount;
        log::debug!("Revealed {} cells from {:?}", opened, coords);
        self.observers.notify(&BoardEvent::CellsRevealed { cells });

        RevealOutcome::Opened { cells: opened }
    }

    /// Cycle a cell between covered and flagged, revealed cells cannot be flagged.
    pub fn toggle_flag(&mut self, row: Coord, column: Coord) -> FlagOutcome {
        let coords = (row, column);
        let Some(index) = self.index_of(row, column) else {
            log::trace!("Ignoring flag outside the board at {:?}", coords);
            return FlagOutcome::NoChange;
        };

        let cell = &mut self.cells[index];
        let flagged = match cell.state {
            CellState::Covered => {
                cell.state = CellState::Flagged;
                self.flagged_count += 1;
                true
            }
            CellState::Flagged => {
                cell.state = CellState::Covered;
                self.flagged_count -= 1;
                false
            }
            CellState::Revealed => return FlagOutcome::NoChange,
        };

        self.observers.notify(&BoardEvent::FlagToggled { coords, flagged });
        if flagged {
            FlagOutcome::Flagged
        } else {
            FlagOutcome::Unflagged
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_board(self)
    }

    fn ensure_mines_placed(&mut self, safe: Coord2) {
        let LayoutState::Pending(plan) = &self.layout else {
            return;
        };

        let layout = plan.clone().generate(&self.config, safe);
        self.place_mines(&layout);

        let mine_count = layout.mine_count();
        self.layout = LayoutState::Placed { mine_count };
        log::debug!(
            "Placed {} mines on a {}x{} board, safe cell at {:?}",
            mine_count,
            self.config.width,
            self.config.height,
            safe
        );
        self.observers.notify(&BoardEvent::MinesPlaced { mine_count, safe });
    }

    fn place_mines(&mut self, layout: &MineLayout) {
        for cell in &mut self.cells {
            let coords = cell.coords();
            cell.is_mine = layout.contains_mine(coords);
            // mines keep a zero count
            if !cell.is_mine {
                cell.adjacent_mine_count = layout.adjacent_mine_count(coords);
            }
        }
    }

    /// Depth-first reveal from `start` using an explicit stack, returns the cells it opened.
    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let shape = self.shape();

        let mut visited = HashSet::new();
        let mut to_visit = vec![start];
        let mut opened = Vec::new();

        while let Some(visit_coords) = to_visit.pop() {
            let Some(index) = shape.index_of(visit_coords) else {
                continue;
            };
            if !visited.insert(index) {
                continue;
            }

            // flags, opened cells and mines stay as they are
            let cell = &mut self.cells[index];
            if !cell.state.is_covered() || cell.is_mine {
                log::trace!("Flood skipping cell at {:?}", visit_coords);
                continue;
            }

            cell.state = CellState::Revealed;
            let is_zero = cell.adjacent_mine_count == 0;
            self.revealed_count += 1;
            opened.push(visit_coords);
            log::trace!("Flood opened cell at {:?}", visit_coords);

            if is_zero {
                let cells = &self.cells;
                to_visit.extend(
                    shape
                        .neighbors(visit_coords)
                        .indices()
                        .filter(|index| !visited.contains(index))
                        .filter(|&index| cells[index].state.is_covered() && !cells[index].is_mine)
                        .map(|index| cells[index].coords()),
                );
            }
        }

        opened
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn preset(width: Coord, height: Coord, mines: &[Coord2]) -> Board {
        let config = BoardConfig::new(width, height).unwrap();
        Board::with_generator(config, PresetMineGenerator::new(mines.iter().copied())).unwrap()
    }

    fn state_at(board: &Board, row: Coord, column: Coord) -> CellState {
        board.cell(row, column).unwrap().state()
    }

    #[test]
    fn new_board_is_covered_and_blank() {
        let board = Board::new(5, 3).unwrap();

        assert_eq!(board.width(), 5);
        assert_eq!(board.height(), 3);
        assert_eq!(board.cells().len(), 15);
        assert!(!board.is_layout_placed());
        assert_eq!(board.mine_count(), None);
        for (index, cell) in board.cells().iter().enumerate() {
            assert_eq!(cell.id().index(), index);
            assert_eq!(cell.state(), CellState::Covered);
            assert!(!cell.is_mine());
            assert_eq!(cell.adjacent_mine_count(), 0);
        }
        assert_eq!(board.cells()[7].coords(), (1, 2));
    }

    #[test]
    fn zero_sized_board_is_rejected() {
        assert!(matches!(
            Board::new(0, 4),
            Err(GameError::InvalidSize {
                width: 0,
                height: 4
            })
        ));
        assert!(Board::new(4, 0).is_err());
    }

    #[test]
    fn first_reveal_places_mines_once() {
        let mut board = preset(3, 3, &[(0, 0)]);

        assert_eq!(board.reveal(2, 2), RevealOutcome::Opened { cells: 8 });
        assert_eq!(board.mine_count(), Some(1));
        assert!(board.cell(0, 0).unwrap().is_mine());

        // layout is not regenerated on later reveals
        let layout_before = board.layout_state().clone();
        board.reveal(0, 1);
        assert_eq!(board.layout_state(), &layout_before);
        assert!(board.cell(0, 0).unwrap().is_mine());
    }

    #[test]
    fn adjacency_counts_are_computed_on_placement() {
        let mut board = preset(3, 3, &[(0, 0), (0, 2), (2, 1)]);
        board.reveal(1, 1);

        let counts: Vec<u8> = board
            .cells()
            .iter()
            .map(|cell| cell.adjacent_mine_count())
            .collect();
        // mines keep a zero count
        assert_eq!(counts, vec![0, 2, 0, 2, 3, 2, 1, 0, 1]);
    }

    #[test]
    fn placed_counts_match_the_layout() {
        let mines = [(0, 1), (1, 3), (3, 0), (3, 4), (2, 2)];
        let config = BoardConfig::new(5, 4).unwrap();
        let layout = PresetMineGenerator::new(mines).generate(&config, (0, 4));

        let mut board = preset(5, 4, &mines);
        board.reveal(0, 4);

        for cell in board.cells() {
            assert_eq!(cell.is_mine(), layout.contains_mine(cell.coords()));
            if !cell.is_mine() {
                assert_eq!(
                    cell.adjacent_mine_count(),
                    layout.adjacent_mine_count(cell.coords()),
                    "cell {:?}",
                    cell.coords()
                );
            }
        }
    }

    #[test]
    fn reveal_numbered_cell_opens_only_that_cell() {
        let mut board = preset(3, 3, &[(0, 0)]);

        assert_eq!(board.reveal(1, 1), RevealOutcome::Opened { cells: 1 });
        assert_eq!(state_at(&board, 1, 1), CellState::Revealed);
        assert_eq!(board.revealed_count(), 1);
        assert_eq!(state_at(&board, 2, 2), CellState::Covered);
    }

    #[test]
    fn reveal_zero_cell_floods_region_and_border() {
        let mut board = preset(3, 3, &[(2, 2)]);

        assert_eq!(board.reveal(0, 0), RevealOutcome::Opened { cells: 8 });

        assert_eq!(board.revealed_count(), 8);
        assert_eq!(state_at(&board, 2, 2), CellState::Covered);
        assert_eq!(board.cell(1, 1).unwrap().adjacent_mine_count(), 1);
        assert_eq!(state_at(&board, 1, 1), CellState::Revealed);
        assert_eq!(state_at(&board, 2, 1), CellState::Revealed);
    }

    #[test]
    fn flood_stops_at_numbered_border() {
        // a wall of mines down column 2 splits the board
        let mut board = preset(5, 3, &[(0, 2), (1, 2), (2, 2)]);

        board.reveal(1, 0);

        for row in 0..3 {
            assert_eq!(state_at(&board, row, 0), CellState::Revealed);
            assert_eq!(state_at(&board, row, 1), CellState::Revealed);
            assert_eq!(state_at(&board, row, 2), CellState::Covered);
            assert_eq!(state_at(&board, row, 3), CellState::Covered);
            assert_eq!(state_at(&board, row, 4), CellState::Covered);
        }
        assert_eq!(board.revealed_count(), 6);
    }

    #[test]
    fn flood_leaves_flags_alone() {
        let mut board = preset(4, 4, &[(3, 3)]);
        assert_eq!(board.toggle_flag(0, 2), FlagOutcome::Flagged);

        board.reveal(0, 0);

        assert_eq!(state_at(&board, 0, 2), CellState::Flagged);
        assert_eq!(state_at(&board, 3, 3), CellState::Covered);
        assert_eq!(board.revealed_count(), 14);
    }

    #[test]
    fn reveal_mine_marks_it_revealed() {
        let mut board = preset(2, 2, &[(0, 0)]);
        board.reveal(1, 1);

        assert_eq!(board.reveal(0, 0), RevealOutcome::HitMine);
        assert_eq!(state_at(&board, 0, 0), CellState::Revealed);

        let detonated: Vec<_> = board.detonated_cells().map(Cell::coords).collect();
        assert_eq!(detonated, vec![(0, 0)]);
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut board = preset(3, 3, &[(0, 0)]);
        board.reveal(1, 1);
        let before = board.snapshot();

        assert_eq!(board.reveal(1, 1), RevealOutcome::NoChange);
        assert_eq!(board.snapshot(), before);
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut board = preset(3, 3, &[(0, 0)]);
        board.toggle_flag(1, 1);

        assert_eq!(board.reveal(1, 1), RevealOutcome::NoChange);
        assert_eq!(state_at(&board, 1, 1), CellState::Flagged);
        // the attempt still fixes the layout
        assert!(board.is_layout_placed());

        board.toggle_flag(1, 1);
        assert_eq!(board.reveal(1, 1), RevealOutcome::Opened { cells: 1 });
    }

    #[test]
    fn flag_round_trip() {
        let mut board = preset(3, 3, &[(0, 0)]);

        assert_eq!(board.toggle_flag(2, 2), FlagOutcome::Flagged);
        assert_eq!(state_at(&board, 2, 2), CellState::Flagged);
        assert_eq!(board.flagged_count(), 1);

        assert_eq!(board.toggle_flag(2, 2), FlagOutcome::Unflagged);
        assert_eq!(state_at(&board, 2, 2), CellState::Covered);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut board = preset(3, 3, &[(0, 0)]);
        board.reveal(1, 1);

        assert_eq!(board.toggle_flag(1, 1), FlagOutcome::NoChange);
        assert_eq!(board.toggle_flag(1, 1), FlagOutcome::NoChange);
        assert_eq!(state_at(&board, 1, 1), CellState::Revealed);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn out_of_range_input_changes_nothing() {
        let mut board = preset(4, 3, &[(0, 0)]);
        let before = board.snapshot();

        assert_eq!(board.reveal(3, 0), RevealOutcome::NoChange);
        assert_eq!(board.reveal(0, 4), RevealOutcome::NoChange);
        assert_eq!(board.toggle_flag(3, 0), FlagOutcome::NoChange);
        assert_eq!(board.toggle_flag(Coord::MAX, Coord::MAX), FlagOutcome::NoChange);

        assert!(!board.is_layout_placed());
        assert_eq!(board.snapshot(), before);
        assert_eq!(board.cell(3, 0), None);
        assert_eq!(board.index_of(0, 4), None);
    }

    #[test]
    fn single_cell_board_has_no_mines() {
        let mut board = Board::new(1, 1).unwrap();

        assert_eq!(board.reveal(0, 0), RevealOutcome::Opened { cells: 1 });
        assert_eq!(board.mine_count(), Some(0));
        assert_eq!(state_at(&board, 0, 0), CellState::Revealed);
    }

    #[test]
    fn ten_by_ten_board_places_sixteen_mines() {
        let config = BoardConfig::new(10, 10).unwrap();
        let mut board = Board::with_generator(config, RandomMineGenerator::new(99)).unwrap();

        board.reveal(5, 5);

        assert_eq!(board.mine_count(), Some(16));
        assert_eq!(board.cells().iter().filter(|cell| cell.is_mine()).count(), 16);
        assert!(!board.cell(5, 5).unwrap().is_mine());
    }

    #[test]
    fn observers_see_each_change() {
        let mut board = preset(3, 3, &[(2, 2)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        board.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        board.toggle_flag(0, 1);
        board.reveal(1, 1);
        board.reveal(1, 1);
        board.toggle_flag(1, 1);

        let seen = seen.borrow();
        assert_eq!(seen.len(), 3);
        assert_eq!(
            seen[0],
            BoardEvent::FlagToggled {
                coords: (0, 1),
                flagged: true
            }
        );
        assert_eq!(
            seen[1],
            BoardEvent::MinesPlaced {
                mine_count: 1,
                safe: (1, 1)
            }
        );
        assert_eq!(
            seen[2],
            BoardEvent::CellsRevealed {
                cells: vec![(1, 1)]
            }
        );
    }

    #[test]
    fn unsubscribed_observer_stops_receiving() {
        let mut board = preset(3, 3, &[(2, 2)]);
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let id = board.subscribe(move |_| *sink.borrow_mut() += 1);

        board.toggle_flag(0, 0);
        assert!(board.unsubscribe(id));
        board.toggle_flag(0, 0);

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn flood_event_lists_every_opened_cell() {
        let mut board = preset(3, 3, &[(2, 2)]);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        board.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        board.reveal(0, 0);

        let seen = seen.borrow();
        let BoardEvent::CellsRevealed { cells } = &seen[1] else {
            panic!("expected a reveal event, got {:?}", seen[1]);
        };
        assert_eq!(cells.len(), 8);
        assert_eq!(cells[0], (0, 0));
        assert!(!cells.contains(&(2, 2)));
    }
}
