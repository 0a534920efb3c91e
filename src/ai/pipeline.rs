use std::collections::BTreeSet;

use tracing::{debug, info};

use super::agent::{Decision, Reason};
use super::geometry::LineGeometry;
use super::threats::{Parity, ThreatAnalyzer, ThreatSummary};
use super::traps::TrapAnalyzer;
use crate::error::EngineError;
use crate::game::{Board, Player, Position};

/// Successive narrowing of the candidate columns for one turn.
///
/// Each heuristic proposes a target set; the candidates shrink to the part
/// of it they overlap. An empty overlap leaves them as they were, so the
/// set never runs dry.
#[derive(Debug, Clone)]
pub struct MoveFilter<'a> {
    geometry: LineGeometry<'a>,
    me: Player,
    candidates: BTreeSet<usize>,
}

impl<'a> MoveFilter<'a> {
    /// Start with every column that still has room.
    pub fn new(board: &'a Board, me: Player) -> Self {
        MoveFilter {
            geometry: LineGeometry::new(board),
            me,
            candidates: board.available_moves().keys().copied().collect(),
        }
    }

    pub fn candidates(&self) -> &BTreeSet<usize> {
        &self.candidates
    }

    /// Run the whole heuristic sequence and pick a column.
    pub fn choose(board: &'a Board, me: Player) -> Result<Decision, EngineError> {
        if board.is_full() {
            return Err(EngineError::NoAvailableMove);
        }
        let geometry = LineGeometry::new(board);

        if let Some(column) = winning_column(&geometry, me)? {
            info!(column, "taking immediate win");
            return Ok(Decision::new(column, Reason::Win));
        }
        let opponent = me.other();
        if let Some(column) = winning_column(&geometry, opponent)? {
            info!(column, "blocking opponent win");
            return Ok(Decision::new(column, Reason::Block));
        }

        let mut filter = MoveFilter::new(board, me);
        filter.avoid_almost_wins(opponent)?;
        filter.steer_threats()?;
        filter.prefer_middle_traps(me)?;
        filter.prefer_middle_traps(opponent)?;
        filter.prefer_stack_traps(me)?;
        filter.prefer_stack_traps(opponent)?;

        let column = filter.best_column()?;
        let candidates: Vec<usize> = filter.candidates.iter().copied().collect();
        info!(column, ?candidates, "picked column with most possible wins");
        Ok(Decision::new(column, Reason::Heuristic { candidates }))
    }

    /// Keep only the candidates in `target`, unless none of them are.
    /// Returns whether the candidate set changed.
    pub fn narrow<I>(&mut self, step: &str, target: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let kept: BTreeSet<usize> = target
            .into_iter()
            .filter(|col| self.candidates.contains(col))
            .collect();
        if kept.is_empty() || kept == self.candidates {
            debug!(step, candidates = ?self.candidates, "filter left candidates unchanged");
            return false;
        }
        debug!(step, before = ?self.candidates, after = ?kept, "filter narrowed candidates");
        self.candidates = kept;
        true
    }

    fn landing(&self, col: usize) -> Option<Position> {
        self.geometry
            .board()
            .landing_row(col)
            .map(|row| Position::new(row, col))
    }

    /// Drop columns whose disc would let `player` win on the square above it.
    pub fn avoid_almost_wins(&mut self, player: Player) -> Result<bool, EngineError> {
        let mut safe = BTreeSet::new();
        for &col in &self.candidates {
            if let Some(pos) = self.landing(col) {
                if !self.geometry.below_is_winning_position(pos, player)? {
                    safe.insert(col);
                }
            }
        }
        Ok(self.narrow("avoid almost-wins", safe))
    }

    /// For each row of `parity`, bottom first, steer toward the columns that
    /// would give `player` a threat on that row.
    pub fn build_threats(&mut self, parity: Parity, player: Player) -> Result<(), EngineError> {
        let threats = ThreatAnalyzer::new(self.geometry);
        for row in threats.rows_of(parity) {
            let columns = threats.threat_building_columns(row, player)?;
            self.narrow("build threat", columns);
        }
        Ok(())
    }

    /// `summary` holds exactly one parity: add more threats of that parity.
    fn reinforce_parity(
        &mut self,
        summary: &ThreatSummary,
        player: Player,
    ) -> Result<(), EngineError> {
        match summary.single_parity() {
            Some(held) => self.build_threats(held, player),
            None => Ok(()),
        }
    }

    /// Odd/even threat bookkeeping for both sides.
    ///
    /// A side holding threats of one parity is steered toward more of the
    /// same. When both sides hold one parity each, the mover goes for the
    /// parity that answers the opponent's.
    pub fn steer_threats(&mut self) -> Result<(), EngineError> {
        let me = self.me;
        let opponent = me.other();
        let analyzer = ThreatAnalyzer::new(self.geometry);
        let mine = analyzer.summary(me)?;
        let theirs = analyzer.summary(opponent)?;

        if mine.is_empty() && theirs.is_empty() {
            let (first, second) = if me.moves_first() {
                (me, opponent)
            } else {
                (opponent, me)
            };
            for player in [first, second] {
                self.build_threats(Parity::Odd, player)?;
                self.build_threats(Parity::Even, player)?;
            }
            return Ok(());
        }
        if mine.has_both() || theirs.has_both() {
            return Ok(());
        }
        if theirs.is_empty() {
            return self.reinforce_parity(&mine, me);
        }
        if mine.is_empty() {
            return self.reinforce_parity(&theirs, opponent);
        }

        // Each side holds threats of exactly one parity
        let Some(their_parity) = theirs.single_parity() else {
            return Ok(());
        };
        let wanted = if me.moves_first() {
            their_parity.other()
        } else {
            their_parity
        };
        if mine.get(wanted).is_empty() {
            self.build_threats(wanted, me)
        } else if !me.moves_first() && their_parity == Parity::Even {
            self.avoid_almost_wins(opponent).map(|_| ())
        } else {
            self.avoid_almost_wins(me).map(|_| ())
        }
    }

    pub fn prefer_middle_traps(&mut self, player: Player) -> Result<bool, EngineError> {
        let columns = TrapAnalyzer::new(self.geometry).middle_trap_columns(player)?;
        Ok(self.narrow("middle trap", columns))
    }

    pub fn prefer_stack_traps(&mut self, player: Player) -> Result<bool, EngineError> {
        let columns = TrapAnalyzer::new(self.geometry).stack_trap_columns(player)?;
        Ok(self.narrow("stack trap", columns))
    }

    /// The candidate whose landing cell lies on the most possible wins.
    /// Ties go to the lowest column.
    pub fn best_column(&self) -> Result<usize, EngineError> {
        let mut best: Option<(usize, usize)> = None;
        for &col in &self.candidates {
            let Some(pos) = self.landing(col) else {
                continue;
            };
            let wins = self.geometry.possible_wins(pos)?.len();
            if best.map_or(true, |(_, most)| wins > most) {
                best = Some((col, wins));
            }
        }
        best.map(|(col, _)| col).ok_or(EngineError::NoAvailableMove)
    }
}

/// First column, lowest index first, whose landing cell wins for `player`.
fn winning_column(geometry: &LineGeometry<'_>, player: Player) -> Result<Option<usize>, EngineError> {
    for (&col, &row) in geometry.board().available_moves() {
        if geometry.position_to_win(Position::new(row, col), player)? {
            return Ok(Some(col));
        }
    }
    Ok(None)
}
