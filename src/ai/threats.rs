use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::geometry::LineGeometry;
use crate::error::EngineError;
use crate::game::{Player, Position};

/// Row-index parity of a threat square.
///
/// Discs stack from the bottom, so who ends up owning the squares of one
/// parity in a tempo-neutral endgame decides which threats get cashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    pub fn of(row: usize) -> Parity {
        if row % 2 == 1 {
            Parity::Odd
        } else {
            Parity::Even
        }
    }

    pub fn other(self) -> Parity {
        match self {
            Parity::Odd => Parity::Even,
            Parity::Even => Parity::Odd,
        }
    }
}

/// Empty squares of one parity that would complete a line for a player,
/// keyed by column. When a column holds several, the lowest one is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Threats {
    pub parity: Parity,
    pub squares: BTreeMap<usize, usize>,
}

impl Threats {
    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }
}

/// Both parity classes of one player's threats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatSummary {
    pub odd: Threats,
    pub even: Threats,
}

impl ThreatSummary {
    pub fn is_empty(&self) -> bool {
        self.odd.is_empty() && self.even.is_empty()
    }

    pub fn has_both(&self) -> bool {
        !self.odd.is_empty() && !self.even.is_empty()
    }

    pub fn get(&self, parity: Parity) -> &Threats {
        match parity {
            Parity::Odd => &self.odd,
            Parity::Even => &self.even,
        }
    }

    /// The only parity held, when exactly one class is non-empty.
    pub fn single_parity(&self) -> Option<Parity> {
        match (self.odd.is_empty(), self.even.is_empty()) {
            (false, true) => Some(Parity::Odd),
            (true, false) => Some(Parity::Even),
            _ => None,
        }
    }
}

/// Classifies winning squares by row parity.
#[derive(Debug, Clone, Copy)]
pub struct ThreatAnalyzer<'a> {
    geometry: LineGeometry<'a>,
}

impl<'a> ThreatAnalyzer<'a> {
    pub fn new(geometry: LineGeometry<'a>) -> Self {
        ThreatAnalyzer { geometry }
    }

    pub fn threats(&self, player: Player, parity: Parity) -> Result<Threats, EngineError> {
        let free = self.geometry.board().free_locations_by_row();
        let mut squares = BTreeMap::new();
        // Top to bottom, so a lower square overwrites a higher one
        for (row, columns) in free.iter().enumerate() {
            if Parity::of(row) != parity {
                continue;
            }
            for &col in columns {
                if self.geometry.position_to_win(Position::new(row, col), player)? {
                    squares.insert(col, row);
                }
            }
        }
        Ok(Threats { parity, squares })
    }

    pub fn odd_threats(&self, player: Player) -> Result<Threats, EngineError> {
        self.threats(player, Parity::Odd)
    }

    pub fn even_threats(&self, player: Player) -> Result<Threats, EngineError> {
        self.threats(player, Parity::Even)
    }

    pub fn summary(&self, player: Player) -> Result<ThreatSummary, EngineError> {
        Ok(ThreatSummary {
            odd: self.odd_threats(player)?,
            even: self.even_threats(player)?,
        })
    }

    /// Rows of the given parity, bottom of the board first.
    pub fn rows_of(&self, parity: Parity) -> Vec<usize> {
        (0..self.geometry.board().rows())
            .rev()
            .filter(|&row| Parity::of(row) == parity)
            .collect()
    }

    /// Columns whose landing cell is the last gap of some line `player` could
    /// complete through a free square of `row`. Playing one of them turns that
    /// square into a threat.
    pub fn threat_building_columns(
        &self,
        row: usize,
        player: Player,
    ) -> Result<BTreeSet<usize>, EngineError> {
        let free = self.geometry.board().free_locations_by_row();
        let mut columns = BTreeSet::new();
        for &col in free.get(row).into_iter().flatten() {
            let cells = self
                .geometry
                .follow_up_cells(Position::new(row, col), player)?;
            columns.extend(cells.into_iter().map(|pos| pos.col));
        }
        Ok(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Board;

    #[test]
    fn parity_follows_row_index() {
        assert_eq!(Parity::of(0), Parity::Even);
        assert_eq!(Parity::of(1), Parity::Odd);
        assert_eq!(Parity::of(5), Parity::Odd);
        assert_eq!(Parity::Odd.other(), Parity::Even);
    }

    #[test]
    fn empty_board_has_no_threats() {
        let board = Board::default();
        let analyzer = ThreatAnalyzer::new(LineGeometry::new(&board));
        for player in [Player::One, Player::Two] {
            assert!(analyzer.summary(player).unwrap().is_empty());
        }
    }

    #[test]
    fn threats_split_by_parity() {
        // 1 threatens (4, 3) on row 4; 2 threatens (5, 3) on row 5
        let board = Board::from_rows(&[
            "0000000", "0000000", "0000000", "0000000", "1110000", "2220000",
        ]);
        let analyzer = ThreatAnalyzer::new(LineGeometry::new(&board));

        let one = analyzer.summary(Player::One).unwrap();
        assert!(one.odd.is_empty());
        assert_eq!(one.even.squares.get(&3), Some(&4));
        assert_eq!(one.single_parity(), Some(Parity::Even));

        let two = analyzer.summary(Player::Two).unwrap();
        assert_eq!(two.odd.squares.get(&3), Some(&5));
        assert!(two.even.is_empty());
        assert_eq!(two.single_parity(), Some(Parity::Odd));
    }

    #[test]
    fn summary_reports_both_parities() {
        // 1 holds three on row 4 (even) and three on row 3 (odd), both open at column 3
        let board = Board::from_rows(&[
            "0000000", "0000000", "0000000", "1110000", "1110000", "2212000",
        ]);
        let analyzer = ThreatAnalyzer::new(LineGeometry::new(&board));
        let one = analyzer.summary(Player::One).unwrap();
        assert!(one.has_both());
        assert_eq!(one.single_parity(), None);
        assert_eq!(one.get(Parity::Odd).squares.get(&3), Some(&3));
        assert_eq!(one.get(Parity::Even).squares.get(&3), Some(&4));
    }

    #[test]
    fn lowest_threat_in_column_is_kept() {
        // 1 threatens (4, 3) and (2, 3), both on even rows of column 3
        let board = Board::from_rows(&[
            "0000000", "0000000", "1110000", "2220000", "1110000", "2221000",
        ]);
        let analyzer = ThreatAnalyzer::new(LineGeometry::new(&board));
        let even = analyzer.even_threats(Player::One).unwrap();
        assert_eq!(even.squares.get(&3), Some(&4));
        assert_eq!(even.len(), 1);
    }

    #[test]
    fn rows_of_parity_run_bottom_up() {
        let board = Board::default();
        let analyzer = ThreatAnalyzer::new(LineGeometry::new(&board));
        assert_eq!(analyzer.rows_of(Parity::Odd), vec![5, 3, 1]);
        assert_eq!(analyzer.rows_of(Parity::Even), vec![4, 2, 0]);
    }

    #[test]
    fn threat_building_columns_point_at_the_missing_disc() {
        // Row 5: 1 has (5,1) and (5,2); playing (5,3) would make (5,0) a threat
        // through the window (5,0)..(5,3), so (5,0) lists column 3.
        let board = Board::from_rows(&[
            "0000000", "0000000", "0000000", "0000000", "0000000", "0110200",
        ]);
        let analyzer = ThreatAnalyzer::new(LineGeometry::new(&board));
        let columns = analyzer.threat_building_columns(5, Player::One).unwrap();
        assert!(columns.contains(&3));
        assert!(columns.contains(&0));
        assert!(!columns.contains(&4));
    }
}
