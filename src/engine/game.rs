//! The game facade: one live session, a board source, a ledger handle and
//! the observers watching them.
//!
//! ## Control flow
//!
//! 1. `start` debits the stake and activates the board
//! 2. `open` reveals cells until a bomb or a `claim`
//! 3. resolution publishes one `Settlement`; a claim is credited at once
//! 4. after a bust, `save` may trade crystals for the forfeited value and
//!    deals a fresh board
//! 5. `reset` deals a fresh board from any phase
//!
//! Every successful command ends by publishing `EngineEvent::StateChanged`.
//! A refused command publishes nothing and changes nothing.

use super::command::Command;
use crate::board::{BoardGenerator, BoardSource};
use crate::core::{ConfigError, GameRules, Position};
use crate::economy::{EconomyLedger, SharedLedger};
use crate::events::{EngineEvent, EngineObserver, Settlement, Snapshot};
use crate::session::{Outcome, Phase, Rejection, Reveal, RoundId, Session};

/// A playable game.
pub struct Game<S: BoardSource = BoardGenerator> {
    rules: GameRules,
    ledger: SharedLedger,
    boards: S,
    session: Session,
    settlement: Option<Settlement>,
    observers: Vec<Box<dyn EngineObserver>>,
}

impl Game<BoardGenerator> {
    /// Game with its own ledger and a random board generator.
    ///
    /// ```
    /// use roll_craft::{Game, GameRules, Phase};
    ///
    /// let mut game = Game::new(GameRules::default().with_seed(7)).unwrap();
    /// game.start().unwrap();
    /// assert_eq!(game.snapshot().phase, Phase::Active);
    /// assert_eq!(game.ledger().money(), 90);
    /// ```
    pub fn new(rules: GameRules) -> Result<Self, ConfigError> {
        let ledger = SharedLedger::new(EconomyLedger::from_rules(&rules));
        Self::with_ledger(rules, ledger)
    }

    /// Game drawing on an existing ledger.
    pub fn with_ledger(rules: GameRules, ledger: SharedLedger) -> Result<Self, ConfigError> {
        let boards = match rules.seed {
            Some(seed) => BoardGenerator::new(seed),
            None => BoardGenerator::from_entropy(),
        };
        Self::with_source(rules, ledger, boards)
    }
}

impl<S: BoardSource> Game<S> {
    /// Game with an explicit board source.
    pub fn with_source(rules: GameRules, ledger: SharedLedger, mut boards: S) -> Result<Self, ConfigError> {
        rules.validate()?;
        let session = Session::new(boards.next_board(), RoundId::default());
        Ok(Self {
            rules,
            ledger,
            boards,
            session,
            settlement: None,
            observers: Vec::new(),
        })
    }

    /// Register an observer for all future events.
    pub fn subscribe(&mut self, observer: impl EngineObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Commands ===

    /// Pay the stake and activate the board.
    pub fn start(&mut self) -> Result<(), Rejection> {
        let result = {
            let mut ledger = self.ledger.lock();
            self.session.start(&mut ledger, self.rules.stake_cost)
        };
        result.map_err(|e| self.refused(Command::Start, e))?;

        self.emit_phase_change(Phase::NotStarted, Phase::Active);
        self.emit_ledger();
        self.emit_state();
        Ok(())
    }

    /// Open the cell at a board index.
    pub fn open(&mut self, index: usize) -> Result<Reveal, Rejection> {
        let reveal = self
            .session
            .open(index)
            .map_err(|e| self.refused(Command::Open(index), e))?;

        let round = self.session.round();
        let board = self.session.board().clone();
        self.emit(EngineEvent::CellRevealed {
            round,
            position: reveal.position,
            cell: reveal.cell,
        });
        for &position in &reveal.disclosed {
            self.emit(EngineEvent::CellRevealed {
                round,
                position,
                cell: board.get(position),
            });
        }

        if let Some(outcome) = self.session.outcome() {
            self.emit_phase_change(Phase::Active, Phase::Resolved);
            self.settle(outcome);
        }
        self.emit_state();
        Ok(reveal)
    }

    /// Claim the current balance. The ledger is credited immediately.
    pub fn claim(&mut self) -> Result<Settlement, Rejection> {
        let amount = self.session.claim().map_err(|e| self.refused(Command::Claim, e))?;
        self.ledger.lock().credit_claim(amount);

        self.emit_phase_change(Phase::Active, Phase::Resolved);
        let settlement = self.settle(Outcome::Claimed);
        self.emit_ledger();
        self.emit_state();
        Ok(settlement)
    }

    /// Discard the round and deal a fresh board. Allowed in any phase.
    pub fn reset(&mut self) -> RoundId {
        let board = self.boards.next_board();
        self.session.reset(board);
        self.settlement = None;

        let round = self.session.round();
        log::info!("{} dealt", round);
        self.emit(EngineEvent::BoardReset { round });
        self.emit_state();
        round
    }

    /// Spend crystals to recover a bust's forfeited value, then deal a
    /// fresh board. Returns the amount credited.
    pub fn save(&mut self) -> Result<u64, Rejection> {
        let amount = self.try_save().map_err(|e| self.refused(Command::Save, e))?;
        log::info!("{} saved for {} crystals, recovered {}", self.session.round(), self.rules.save_cost, amount);
        self.emit_ledger();
        self.reset();
        Ok(amount)
    }

    /// Dispatch a command.
    pub fn apply(&mut self, command: Command) -> Result<(), Rejection> {
        match command {
            Command::Start => self.start(),
            Command::Open(index) => self.open(index).map(|_| ()),
            Command::Claim => self.claim().map(|_| ()),
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::Save => self.save().map(|_| ()),
        }
    }

    /// Commands that would currently succeed.
    #[must_use]
    pub fn available_commands(&self) -> Vec<Command> {
        let mut commands = Vec::new();
        match self.session.phase() {
            Phase::NotStarted => {
                if self.ledger.lock().can_afford(self.rules.stake_cost) {
                    commands.push(Command::Start);
                }
            }
            Phase::Active => {
                commands.extend(
                    Position::all()
                        .filter(|&p| !self.session.is_revealed(p))
                        .map(|p| Command::Open(p.index())),
                );
                commands.push(Command::Claim);
            }
            Phase::Resolved => {
                if self.session.outcome() == Some(Outcome::Bust) && self.can_save_now() {
                    commands.push(Command::Save);
                }
            }
        }
        commands.push(Command::Reset);
        commands
    }

    // === Queries ===

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.session.snapshot()
    }

    /// Settlement of the current round, once resolved.
    #[must_use]
    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn ledger(&self) -> &SharedLedger {
        &self.ledger
    }

    #[must_use]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[must_use]
    pub fn round(&self) -> RoundId {
        self.session.round()
    }

    /// Whether work scheduled for `round` still applies.
    #[must_use]
    pub fn is_current_round(&self, round: RoundId) -> bool {
        self.session.round() == round
    }

    // === Internals ===

    fn try_save(&mut self) -> Result<u64, Rejection> {
        if self.session.phase() != Phase::Resolved {
            return Err(Rejection::WrongPhase {
                expected: Phase::Resolved,
                actual: self.session.phase(),
            });
        }
        if self.session.outcome() != Some(Outcome::Bust) {
            return Err(Rejection::NotBusted);
        }
        let amount = self.session.balance();
        self.ledger.lock().save_on_bust(self.rules.save_cost, amount)?;
        Ok(amount)
    }

    fn can_save_now(&self) -> bool {
        self.ledger
            .lock()
            .can_save(self.rules.save_cost, self.session.balance())
    }

    /// Build, store and publish the settlement of a just-resolved round.
    fn settle(&mut self, outcome: Outcome) -> Settlement {
        let crystals = self.ledger.crystals();
        let settlement = self
            .session
            .settlement_for(outcome, crystals, self.rules.save_cost);

        log::info!(
            "{} settled {:?}: base {} x{} = {} (can save: {})",
            settlement.round,
            settlement.outcome,
            settlement.total_base,
            settlement.multiplier,
            settlement.settled_amount,
            settlement.can_save
        );

        self.settlement = Some(settlement.clone());
        self.emit(EngineEvent::Settled(settlement.clone()));
        settlement
    }

    fn refused(&self, command: Command, rejection: Rejection) -> Rejection {
        log::debug!("{} refused {}: {}", self.session.round(), command, rejection);
        rejection
    }

    fn emit_phase_change(&mut self, from: Phase, to: Phase) {
        let round = self.session.round();
        self.emit(EngineEvent::PhaseChanged { round, from, to });
    }

    fn emit_ledger(&mut self) {
        let balances = self.ledger.balances();
        self.emit(EngineEvent::LedgerChanged {
            money: balances.money(),
            crystals: balances.crystals(),
        });
    }

    fn emit_state(&mut self) {
        let snapshot = self.session.snapshot();
        self.emit(EngineEvent::StateChanged(snapshot));
    }

    fn emit(&mut self, event: EngineEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}

impl<S: BoardSource> std::fmt::Debug for Game<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("rules", &self.rules)
            .field("ledger", &self.ledger.balances())
            .field("session", &self.session.snapshot())
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Cell};
    use crate::events::EventLog;

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

    fn game_with(money: u64, crystals: u64) -> Game<impl BoardSource> {
        let rules = GameRules::default();
        let ledger = SharedLedger::new(EconomyLedger::new(money, crystals));
        Game::with_source(rules, ledger, board).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_rules() {
        assert_eq!(
            Game::new(GameRules::default().with_stake_cost(0)).unwrap_err(),
            ConfigError::ZeroStakeCost
        );
    }

    #[test]
    fn test_start_insufficient_money() {
        let mut game = game_with(5, 100);
        assert!(game.start().is_err());
        assert_eq!(game.ledger().money(), 5);
        assert_eq!(game.snapshot().phase, Phase::NotStarted);
        assert_eq!(game.available_commands(), vec![Command::Reset]);
    }

    #[test]
    fn test_claim_credits_ledger() {
        let mut game = game_with(100, 100);
        game.start().unwrap();
        game.open(6).unwrap();
        game.open(8).unwrap();

        let settlement = game.claim().unwrap();
        assert_eq!(settlement.outcome, Outcome::Claimed);
        assert_eq!(settlement.settled_amount, 90);
        assert_eq!(game.ledger().money(), 180);
        assert_eq!(game.settlement(), Some(&settlement));
    }

    #[test]
    fn test_bust_leaves_money_unchanged() {
        let mut game = game_with(100, 100);
        game.start().unwrap();
        game.open(0).unwrap();
        game.open(4).unwrap();

        let settlement = game.settlement().unwrap();
        assert_eq!(settlement.outcome, Outcome::Bust);
        assert_eq!(settlement.settled_amount, 20);
        assert!(settlement.can_save);
        assert_eq!(game.ledger().money(), 90);
        assert_eq!(game.available_commands(), vec![Command::Save, Command::Reset]);
    }

    #[test]
    fn test_save_recovers_and_resets() {
        let mut game = game_with(100, 20);
        game.start().unwrap();
        game.open(0).unwrap();
        game.open(1).unwrap();
        game.open(2).unwrap();
        game.open(4).unwrap();

        assert_eq!(game.save(), Ok(100));
        assert_eq!(game.ledger().crystals(), 0);
        assert_eq!(game.ledger().money(), 190);
        assert_eq!(game.snapshot().phase, Phase::NotStarted);
        assert_eq!(game.round(), RoundId(1));
        assert!(game.settlement().is_none());

        // Nothing left to save
        assert!(game.save().is_err());
    }

    #[test]
    fn test_save_after_claim_is_refused() {
        let mut game = game_with(100, 100);
        game.start().unwrap();
        game.open(0).unwrap();
        game.claim().unwrap();

        assert_eq!(game.save(), Err(Rejection::NotBusted));
        assert_eq!(game.ledger().crystals(), 100);
    }

    #[test]
    fn test_refused_command_emits_nothing() {
        let mut game = game_with(100, 100);
        let log = EventLog::new();
        game.subscribe(log.clone());

        assert!(game.open(0).is_err());
        assert!(game.claim().is_err());
        assert!(game.save().is_err());
        assert!(log.is_empty());
    }

    #[test]
    fn test_bust_event_order() {
        let mut game = game_with(100, 100);
        game.start().unwrap();
        let log = EventLog::new();
        game.subscribe(log.clone());

        game.open(4).unwrap();
        let events = log.events();

        // bomb + 8 disclosed, phase change, settlement, snapshot
        assert_eq!(events.len(), 9 + 3);
        assert!(matches!(
            events[0],
            EngineEvent::CellRevealed { cell: Cell::Bomb, .. }
        ));
        assert!(matches!(
            events[9],
            EngineEvent::PhaseChanged {
                to: Phase::Resolved,
                ..
            }
        ));
        assert!(matches!(events[10], EngineEvent::Settled(_)));
        assert!(matches!(events[11], EngineEvent::StateChanged(_)));
    }

    #[test]
    fn test_apply_dispatch() {
        let mut game = game_with(100, 100);
        game.apply(Command::Start).unwrap();
        game.apply(Command::Open(0)).unwrap();
        assert_eq!(game.apply(Command::Open(0)), Err(Rejection::AlreadyRevealed(Position::from_index(0).unwrap())));
        game.apply(Command::Claim).unwrap();
        game.apply(Command::Reset).unwrap();
        assert_eq!(game.snapshot().phase, Phase::NotStarted);
    }

    #[test]
    fn test_available_commands_active() {
        let mut game = game_with(100, 100);
        game.start().unwrap();
        game.open(3).unwrap();

        let commands = game.available_commands();
        assert!(!commands.contains(&Command::Open(3)));
        assert!(commands.contains(&Command::Open(0)));
        assert!(commands.contains(&Command::Claim));
        assert_eq!(commands.len(), 8 + 2);
    }
}
