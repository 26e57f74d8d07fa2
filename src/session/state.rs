//! One round of play: stake, reveals, resolution.
//!
//! ## Balance
//!
//! The balance is never stored. It is always
//! `sum(base_revealed_amounts) × multiplier`, so a multiplier found late
//! rescales every cash cell opened before it.
//!
//! ## Disclosure on bust
//!
//! Opening the bomb resolves the round and marks every remaining cell
//! revealed in one step. The bomb comes first in `revealed`, followed by the
//! rest in position order. Staggering that disclosure on screen is the
//! presentation layer's business.

use im::Vector;
use smallvec::SmallVec;

use super::phase::{Outcome, Phase, RoundId};
use super::rejection::Rejection;
use crate::board::{Board, Cell};
use crate::core::{Position, BOARD_SIZE};
use crate::economy::EconomyLedger;
use crate::events::{Settlement, Snapshot};

/// Result of a successful `open`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reveal {
    pub position: Position,
    pub cell: Cell,
    /// Cells disclosed as a side effect (the rest of the board on a bust).
    pub disclosed: SmallVec<[Position; BOARD_SIZE]>,
}

/// Mutable state of one round. Owns its board exclusively.
#[derive(Clone, Debug)]
pub struct Session {
    round: RoundId,
    phase: Phase,
    board: Board,
    revealed: SmallVec<[Position; BOARD_SIZE]>,
    revealed_mask: u16,
    base_amounts: Vector<u32>,
    multiplier: u32,
    outcome: Option<Outcome>,
}

impl Session {
    /// Fresh, not-yet-started session on `board`.
    #[must_use]
    pub fn new(board: Board, round: RoundId) -> Self {
        Self {
            round,
            phase: Phase::NotStarted,
            board,
            revealed: SmallVec::new(),
            revealed_mask: 0,
            base_amounts: Vector::new(),
            multiplier: 1,
            outcome: None,
        }
    }

    // === Commands ===

    /// Pay the stake and open the board for play.
    pub fn start(&mut self, ledger: &mut EconomyLedger, stake_cost: u64) -> Result<(), Rejection> {
        self.require_phase(Phase::NotStarted)?;
        ledger.debit_stake(stake_cost)?;
        self.phase = Phase::Active;
        Ok(())
    }

    /// Open the cell at a raw index.
    pub fn open(&mut self, index: usize) -> Result<Reveal, Rejection> {
        self.require_phase(Phase::Active)?;
        let position = Position::from_index(index).ok_or(Rejection::OutOfRange(index))?;
        if self.is_revealed(position) {
            return Err(Rejection::AlreadyRevealed(position));
        }

        let cell = self.board.get(position);
        self.mark_revealed(position);
        let mut disclosed = SmallVec::new();

        match cell {
            Cell::Cash { amount } => {
                self.base_amounts.push_back(amount);
            }
            Cell::Multiplier { factor } => {
                self.multiplier = self.multiplier.saturating_mul(factor);
            }
            Cell::Bomb => {
                self.phase = Phase::Resolved;
                self.outcome = Some(Outcome::Bust);
                for rest in Position::all() {
                    if !self.is_revealed(rest) {
                        self.mark_revealed(rest);
                        disclosed.push(rest);
                    }
                }
            }
            Cell::Blank => {}
        }

        log::trace!(
            "{} opened {} -> {} (balance {}, x{})",
            self.round,
            position,
            cell,
            self.balance(),
            self.multiplier
        );

        Ok(Reveal {
            position,
            cell,
            disclosed,
        })
    }

    /// Take the current balance and end the round.
    pub fn claim(&mut self) -> Result<u64, Rejection> {
        self.require_phase(Phase::Active)?;
        self.phase = Phase::Resolved;
        self.outcome = Some(Outcome::Claimed);
        Ok(self.balance())
    }

    /// Discard all round state and start over on `board` with the next round id.
    pub fn reset(&mut self, board: Board) {
        *self = Self::new(board, self.round.next());
    }

    // === Queries ===

    #[must_use]
    pub fn round(&self) -> RoundId {
        self.round
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Full layout, hidden cells included.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Revealed positions in reveal order.
    #[must_use]
    pub fn revealed(&self) -> &[Position] {
        &self.revealed
    }

    #[must_use]
    pub fn is_revealed(&self, position: Position) -> bool {
        self.revealed_mask & position.bit() != 0
    }

    /// Contents of a cell, only once it has been revealed.
    #[must_use]
    pub fn revealed_cell(&self, position: Position) -> Option<Cell> {
        self.is_revealed(position).then(|| self.board.get(position))
    }

    /// Raw cash amounts revealed so far, pre-multiplier, in reveal order.
    #[must_use]
    pub fn base_amounts(&self) -> &Vector<u32> {
        &self.base_amounts
    }

    #[must_use]
    pub fn total_base(&self) -> u64 {
        self.base_amounts.iter().map(|&a| u64::from(a)).sum()
    }

    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    /// `total_base × multiplier`.
    #[must_use]
    pub fn balance(&self) -> u64 {
        self.total_base() * u64::from(self.multiplier)
    }

    /// Value shown on a revealed cash cell: its amount scaled by the
    /// current multiplier. `None` for hidden or non-cash cells.
    ///
    /// Cells disclosed by a bust were never collected and show their raw amount.
    #[must_use]
    pub fn display_value(&self, position: Position) -> Option<u64> {
        let amount = match self.revealed_cell(position)? {
            Cell::Cash { amount } => u64::from(amount),
            _ => return None,
        };
        if self.collected_before_bust(position) {
            Some(amount * u64::from(self.multiplier))
        } else {
            Some(amount)
        }
    }

    /// Read-only view of the round.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            round: self.round,
            phase: self.phase,
            revealed: self.revealed.clone(),
            base_revealed_amounts: self.base_amounts.clone(),
            multiplier: self.multiplier,
            balance: self.balance(),
            outcome: self.outcome,
        }
    }

    /// Settlement record, once resolved.
    ///
    /// `crystals` and `crystal_cost` decide `can_save`.
    #[must_use]
    pub fn settlement(&self, crystals: u64, crystal_cost: u64) -> Option<Settlement> {
        self.outcome
            .map(|outcome| self.settlement_for(outcome, crystals, crystal_cost))
    }

    pub(crate) fn settlement_for(&self, outcome: Outcome, crystals: u64, crystal_cost: u64) -> Settlement {
        let settled_amount = self.balance();
        Settlement {
            round: self.round,
            outcome,
            total_base: self.total_base(),
            multiplier: self.multiplier,
            settled_amount,
            can_save: outcome == Outcome::Bust && crystals >= crystal_cost && settled_amount > 0,
            crystal_cost,
        }
    }

    // === Internals ===

    fn require_phase(&self, expected: Phase) -> Result<(), Rejection> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(Rejection::wrong_phase(expected, self.phase))
        }
    }

    fn mark_revealed(&mut self, position: Position) {
        self.revealed.push(position);
        self.revealed_mask |= position.bit();
    }

    /// Whether `position` was opened by the player (as opposed to disclosed by a bust).
    fn collected_before_bust(&self, position: Position) -> bool {
        if self.outcome != Some(Outcome::Bust) {
            return true;
        }
        let bomb_at = self.revealed.iter().position(|&p| self.board.get(p) == Cell::Bomb);
        let cell_at = self.revealed.iter().position(|&p| p == position);
        matches!((cell_at, bomb_at), (Some(c), Some(b)) if c < b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 0:$20 1:x2 2:$30 / 3:_ 4:bomb 5:$10 / 6:$50 7:_ 8:$40
    fn board() -> Board {
        Board::from_cells([
            Cell::cash(20),
            Cell::multiplier(),
            Cell::cash(30),
            Cell::Blank,
            Cell::Bomb,
            Cell::cash(10),
            Cell::cash(50),
            Cell::Blank,
            Cell::cash(40),
        ])
        .unwrap()
    }

    fn active() -> Session {
        let mut session = Session::new(board(), RoundId::default());
        let mut ledger = EconomyLedger::default();
        session.start(&mut ledger, 10).unwrap();
        session
    }

    fn pos(i: usize) -> Position {
        Position::from_index(i).unwrap()
    }

    #[test]
    fn test_new_session() {
        let session = Session::new(board(), RoundId(4));
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.round(), RoundId(4));
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.balance(), 0);
        assert!(session.revealed().is_empty());
        assert!(session.outcome().is_none());
    }

    #[test]
    fn test_start_debits_stake() {
        let mut session = Session::new(board(), RoundId::default());
        let mut ledger = EconomyLedger::new(100, 0);
        session.start(&mut ledger, 10).unwrap();
        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(ledger.money(), 90);

        assert_eq!(
            session.start(&mut ledger, 10),
            Err(Rejection::wrong_phase(Phase::NotStarted, Phase::Active))
        );
        assert_eq!(ledger.money(), 90);
    }

    #[test]
    fn test_start_insufficient_money() {
        let mut session = Session::new(board(), RoundId::default());
        let mut ledger = EconomyLedger::new(5, 0);
        assert!(matches!(session.start(&mut ledger, 10), Err(Rejection::Ledger(_))));
        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(ledger.money(), 5);
    }

    #[test]
    fn test_open_before_start() {
        let mut session = Session::new(board(), RoundId::default());
        assert!(matches!(session.open(0), Err(Rejection::WrongPhase { .. })));
        assert!(session.revealed().is_empty());
    }

    #[test]
    fn test_open_cash() {
        let mut session = active();
        let reveal = session.open(0).unwrap();
        assert_eq!(reveal.cell, Cell::cash(20));
        assert!(reveal.disclosed.is_empty());
        assert_eq!(session.balance(), 20);
        assert_eq!(session.base_amounts().iter().copied().collect::<Vec<_>>(), vec![20]);
    }

    #[test]
    fn test_multiplier_is_retroactive() {
        let mut session = active();
        session.open(0).unwrap();
        session.open(1).unwrap();
        assert_eq!(session.multiplier(), 2);
        assert_eq!(session.balance(), 40);

        session.open(2).unwrap();
        assert_eq!(session.balance(), 100);
        assert_eq!(session.display_value(pos(0)), Some(40));
        assert_eq!(session.display_value(pos(2)), Some(60));
    }

    #[test]
    fn test_open_twice_is_rejected() {
        let mut session = active();
        session.open(0).unwrap();
        assert_eq!(session.open(0), Err(Rejection::AlreadyRevealed(pos(0))));
        assert_eq!(session.balance(), 20);
        assert_eq!(session.revealed(), &[pos(0)]);
    }

    #[test]
    fn test_open_out_of_range() {
        let mut session = active();
        assert_eq!(session.open(9), Err(Rejection::OutOfRange(9)));
        assert!(session.revealed().is_empty());
    }

    #[test]
    fn test_blank_has_no_effect() {
        let mut session = active();
        session.open(3).unwrap();
        assert!(session.is_revealed(pos(3)));
        assert_eq!(session.balance(), 0);
        assert_eq!(session.display_value(pos(3)), None);
    }

    #[test]
    fn test_bomb_busts_and_discloses() {
        let mut session = active();
        session.open(0).unwrap();
        session.open(2).unwrap();
        let reveal = session.open(4).unwrap();

        assert_eq!(session.phase(), Phase::Resolved);
        assert_eq!(session.outcome(), Some(Outcome::Bust));
        assert_eq!(session.revealed().len(), BOARD_SIZE);
        assert_eq!(reveal.disclosed.len(), BOARD_SIZE - 3);
        assert_eq!(session.revealed()[2], pos(4));
        // Disclosed cash is not collected
        assert_eq!(session.balance(), 50);
        assert_eq!(session.display_value(pos(8)), Some(40));

        assert!(matches!(session.open(8), Err(Rejection::WrongPhase { .. })));
        assert!(matches!(session.claim(), Err(Rejection::WrongPhase { .. })));
    }

    #[test]
    fn test_claim() {
        let mut session = active();
        session.open(6).unwrap();
        session.open(8).unwrap();
        assert_eq!(session.claim(), Ok(90));
        assert_eq!(session.outcome(), Some(Outcome::Claimed));
        assert!(matches!(session.claim(), Err(Rejection::WrongPhase { .. })));
    }

    #[test]
    fn test_settlement() {
        let mut session = active();
        assert!(session.settlement(100, 20).is_none());

        session.open(0).unwrap();
        session.open(1).unwrap();
        session.open(4).unwrap();

        let settlement = session.settlement(20, 20).unwrap();
        assert_eq!(settlement.outcome, Outcome::Bust);
        assert_eq!(settlement.total_base, 20);
        assert_eq!(settlement.multiplier, 2);
        assert_eq!(settlement.settled_amount, 40);
        assert!(settlement.can_save);
        assert_eq!(settlement.payout(), 0);

        assert!(!session.settlement(19, 20).unwrap().can_save);
    }

    #[test]
    fn test_zero_bust_cannot_be_saved() {
        let mut session = active();
        session.open(4).unwrap();
        let settlement = session.settlement(100, 20).unwrap();
        assert_eq!(settlement.settled_amount, 0);
        assert!(!settlement.can_save);
    }

    #[test]
    fn test_reset() {
        let mut session = active();
        session.open(0).unwrap();
        session.open(1).unwrap();
        session.reset(board());

        assert_eq!(session.phase(), Phase::NotStarted);
        assert_eq!(session.round(), RoundId(1));
        assert_eq!(session.multiplier(), 1);
        assert_eq!(session.balance(), 0);
        assert!(session.revealed().is_empty());
        assert!(session.base_amounts().is_empty());
    }

    #[test]
    fn test_snapshot_matches_state() {
        let mut session = active();
        session.open(2).unwrap();
        session.open(1).unwrap();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.phase, Phase::Active);
        assert_eq!(snapshot.revealed.as_slice(), &[pos(2), pos(1)]);
        assert_eq!(snapshot.multiplier, 2);
        assert_eq!(snapshot.balance, 60);
        assert_eq!(snapshot.total_base(), 30);
    }
}
