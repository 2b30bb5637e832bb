//! The turn engine: the match state machine.
//!
//! ## Flow
//!
//! 1. The acting player reveals cards one at a time (`reveal` for the
//!    human, `play_opponent_turn` for the opponent).
//! 2. Once the selection holds a whole group's worth of cards, `resolve`
//!    turns it into a match (cards stay up, stamped with the actor) or a
//!    miss (cards flip back).
//! 3. `resolve` then hands the turn over, honouring the freeze and trap
//!    latches set by special cards.
//!
//! Selection size comes from the first card revealed: on uniform boards
//! that is always the difficulty's group size, on Extreme boards it is
//! the size of that card's group.
//!
//! ## Phases
//!
//! | Phase               | Meaning                                         |
//! |---------------------|-------------------------------------------------|
//! | `AwaitingSelection` | The selection has room for more cards           |
//! | `GroupComplete`     | The selection is full; `resolve` will act       |
//! | `Resolving`         | Full selection while a paced resolve is pending |
//! | `GameOver`          | Board cleared, or the cooperative clock ran out |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::scoring::{MatchOutcome, ScoringRule};
use crate::cards::{Board, Card, CardId, Selection, Symbol};
use crate::core::{Difficulty, GameMode, GameRng, MatchConfig, PlayerId, PlayerMap};
use crate::effects::{assign_special_effects, EffectTrigger};
use crate::hints::{HintManager, HintOutcome};
use crate::opponent::MemoryModel;
use crate::record::MatchRecord;

/// Observable phase of the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    AwaitingSelection,
    GroupComplete,
    Resolving,
    GameOver,
}

/// What `resolve` did with a full selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// All cards shared a symbol and now belong to `by`.
    Matched { symbol: Symbol, by: PlayerId },
    /// Symbols differed; the cards were turned face-down again.
    Missed { cards: Selection },
}

impl Resolution {
    #[must_use]
    pub fn is_match(&self) -> bool {
        matches!(self, Resolution::Matched { .. })
    }
}

/// State of one match.
#[derive(Clone, Debug)]
pub struct TurnEngine {
    config: MatchConfig,
    board: Board,
    memory: MemoryModel,
    hints: HintManager,
    rng: GameRng,

    /// Revealed but unresolved cards, in reveal order.
    pending: Selection,
    current: PlayerId,

    /// One-shot: the opponent loses its next turn.
    opponent_frozen: bool,
    /// Permanent: the opponent sits out the rest of the match.
    opponent_disabled: bool,
    /// Whether the latest turn hand-over skipped a frozen opponent.
    opponent_skipped: bool,

    /// Symbol exposed by a reveal-all card in the current selection.
    exposed: Option<Symbol>,

    input_locked: bool,
    time_over: bool,
}

impl TurnEngine {
    /// Start a match with an entropy-seeded generator.
    #[must_use]
    pub fn new_match(mode: GameMode, difficulty: Difficulty) -> Self {
        Self::from_config(MatchConfig::new(mode, difficulty))
    }

    /// Start a match: generate the board, place special cards and create
    /// an empty opponent memory.
    #[must_use]
    pub fn from_config(config: MatchConfig) -> Self {
        let mut rng = config.seed.map_or_else(GameRng::from_entropy, GameRng::new);
        let mut board = Board::generate(&config.difficulty.layout(), &mut rng);
        assign_special_effects(&mut board, config.mode, config.difficulty, &mut rng);
        let memory = MemoryModel::for_match(config.difficulty, config.mode);
        Self::with_parts(config, board, memory, rng)
    }

    /// Assemble a match from explicit parts.
    ///
    /// The board is used as given: no shuffling and no effect placement.
    /// `config.seed` is ignored in favour of `rng`.
    #[must_use]
    pub fn with_parts(
        config: MatchConfig,
        board: Board,
        memory: MemoryModel,
        rng: GameRng,
    ) -> Self {
        log::info!(
            "New {} match on {} ({} cards, seed {})",
            config.mode,
            config.difficulty,
            board.len(),
            rng.seed()
        );
        Self {
            hints: HintManager::for_difficulty(config.difficulty),
            config,
            board,
            memory,
            rng,
            pending: Selection::new(),
            current: PlayerId::Human,
            opponent_frozen: false,
            opponent_disabled: false,
            opponent_skipped: false,
            exposed: None,
            input_locked: false,
            time_over: false,
        }
    }

    // === Configuration ===

    #[must_use]
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.config.mode
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    /// Nominal group size of the difficulty.
    #[must_use]
    pub fn group_size(&self) -> usize {
        self.config.difficulty.group_size()
    }

    #[must_use]
    pub fn scoring_rule(&self) -> ScoringRule {
        self.config.difficulty.scoring_rule()
    }

    // === Queries ===

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        self.board.cards()
    }

    #[must_use]
    pub fn memory(&self) -> &MemoryModel {
        &self.memory
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Revealed, unresolved cards in reveal order.
    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    /// Size the current selection must reach. `None` before the first reveal.
    #[must_use]
    pub fn required_group_size(&self) -> Option<usize> {
        let first = self.board.get(*self.pending.first()?)?;
        Some(self.board.group_size_of(first.symbol()))
    }

    #[must_use]
    pub fn is_group_ready(&self) -> bool {
        self.required_group_size()
            .is_some_and(|required| self.pending.len() >= required)
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.is_finished() {
            TurnPhase::GameOver
        } else if self.is_group_ready() && self.input_locked {
            TurnPhase::Resolving
        } else if self.is_group_ready() {
            TurnPhase::GroupComplete
        } else {
            TurnPhase::AwaitingSelection
        }
    }

    /// Unmatched cards sharing the symbol of a reveal-all card the human
    /// turned up in this selection.
    #[must_use]
    pub fn exposed_cards(&self) -> Vec<CardId> {
        self.exposed
            .map(|symbol| {
                self.board
                    .unmatched_with_symbol(symbol)
                    .map(Card::id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The freeze latch is armed and not yet consumed.
    #[must_use]
    pub fn is_opponent_frozen(&self) -> bool {
        self.opponent_frozen
    }

    /// The latest hand-over skipped the opponent because it was frozen.
    #[must_use]
    pub fn opponent_turn_skipped(&self) -> bool {
        self.opponent_skipped
    }

    /// A trap benched the opponent for the rest of the match.
    #[must_use]
    pub fn is_opponent_disabled(&self) -> bool {
        self.opponent_disabled
    }

    /// Every card is matched.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.board.all_matched()
    }

    /// The cooperative time budget ran out first.
    #[must_use]
    pub fn is_time_over(&self) -> bool {
        self.time_over
    }

    /// Terminal for any reason. No reveal is accepted afterwards.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.time_over || self.is_game_over()
    }

    // === Input lock ===

    /// Human input is rejected while a paced step is pending.
    #[must_use]
    pub fn is_input_locked(&self) -> bool {
        self.input_locked
    }

    pub fn lock_input(&mut self) {
        self.input_locked = true;
    }

    pub fn unlock_input(&mut self) {
        self.input_locked = false;
    }

    // === Actions ===

    /// Human reveal of `card`.
    ///
    /// Returns `false` without touching state when input is locked, it is
    /// not the human's turn, the match is over, the card is unknown,
    /// matched or already face-up, or the selection is already full.
    pub fn reveal(&mut self, card: CardId) -> bool {
        if self.input_locked {
            log::trace!("Reveal of {} ignored: input locked", card);
            return false;
        }
        if !self.is_human_turn() {
            log::trace!("Reveal of {} ignored: {} to play", card, self.current);
            return false;
        }
        self.reveal_card(card)
    }

    fn is_human_turn(&self) -> bool {
        !self.config.mode.has_opponent() || self.current == PlayerId::Human
    }

    fn reveal_card(&mut self, id: CardId) -> bool {
        if self.is_finished() || self.is_group_ready() {
            return false;
        }
        let mode = self.config.mode;
        let actor = self.current;

        let Some(card) = self.board.get_mut(id) else {
            return false;
        };
        if !card.is_selectable() {
            return false;
        }
        card.reveal();
        let card = card.clone();
        self.pending.push(id);

        if mode.has_opponent() {
            self.memory.observe(&card);
        }

        if EffectTrigger::lookup(card.special_effect(), mode, actor) == EffectTrigger::ExposeGroup {
            log::debug!("{} exposed every {} card", actor, card.symbol());
            self.exposed = Some(card.symbol());
        }

        log::trace!("{} revealed {} ({})", actor, id, card.symbol());
        true
    }

    /// Resolve a full selection. Does nothing (returns `None`) otherwise.
    ///
    /// After a match or a miss the pending selection is empty and the turn
    /// has been handed over.
    pub fn resolve(&mut self) -> Option<Resolution> {
        if !self.is_group_ready() {
            return None;
        }
        let actor = self.current;
        let mode = self.config.mode;

        let selected: Vec<Card> = self
            .pending
            .iter()
            .filter_map(|&id| self.board.get(id).cloned())
            .collect();
        let triggers: Vec<EffectTrigger> = selected
            .iter()
            .map(|card| EffectTrigger::lookup(card.special_effect(), mode, actor))
            .collect();

        let symbol = selected.first().map(Card::symbol);
        let all_same = selected.iter().all(|card| Some(card.symbol()) == symbol);

        let resolution = match symbol {
            Some(symbol) if all_same => {
                for &id in &self.pending {
                    if let Some(card) = self.board.get_mut(id) {
                        card.mark_matched(actor);
                    }
                }
                if triggers.contains(&EffectTrigger::FreezeOpponentOnMatch) {
                    log::debug!("Opponent frozen for one turn");
                    self.opponent_frozen = true;
                }
                Resolution::Matched { symbol, by: actor }
            }
            _ => {
                for &id in &self.pending {
                    if let Some(card) = self.board.get_mut(id) {
                        card.hide();
                    }
                }
                if triggers.contains(&EffectTrigger::DisableOpponentOnMiss) {
                    log::debug!("Trap sprung, opponent disabled for the rest of the match");
                    self.opponent_disabled = true;
                }
                Resolution::Missed {
                    cards: self.pending.clone(),
                }
            }
        };
        log::debug!("{} resolved {:?}", actor, resolution);

        self.pending.clear();
        self.exposed = None;
        self.switch_turn();

        if self.is_game_over() {
            log::info!(
                "Board cleared: human {} / opponent {}",
                self.score(PlayerId::Human),
                self.score(PlayerId::Opponent)
            );
        }

        Some(resolution)
    }

    fn switch_turn(&mut self) {
        self.opponent_skipped = false;
        if !self.config.mode.has_opponent() {
            return;
        }

        let next = self.current.other();
        self.current = if self.opponent_disabled {
            PlayerId::Human
        } else if next == PlayerId::Opponent && self.opponent_frozen {
            self.opponent_frozen = false;
            self.opponent_skipped = true;
            log::debug!("Frozen opponent skips its turn");
            PlayerId::Human
        } else {
            next
        };
    }

    /// Whether the competitive opponent should move now.
    ///
    /// Always `false` outside competitive mode or once disabled. An armed
    /// freeze latch is consumed here and skips exactly one turn.
    pub fn is_opponent_turn(&mut self) -> bool {
        if self.config.mode != GameMode::Competitive || self.opponent_disabled {
            return false;
        }
        if self.opponent_frozen {
            self.opponent_frozen = false;
            self.opponent_skipped = true;
            return false;
        }
        self.current == PlayerId::Opponent
    }

    /// Whether the driver should play the opponent now, in any mode.
    pub fn opponent_should_act(&mut self) -> bool {
        if self.is_finished() {
            return false;
        }
        match self.config.mode {
            GameMode::Competitive => self.is_opponent_turn(),
            GameMode::Cooperative => {
                !self.opponent_disabled && self.current == PlayerId::Opponent
            }
            GameMode::Zen => false,
        }
    }

    /// Let the opponent pick and reveal its cards.
    ///
    /// Returns the revealed cards. The caller resolves them afterwards,
    /// exactly as for a human selection.
    pub fn play_opponent_turn(&mut self) -> Vec<Card> {
        if !self.config.mode.has_opponent() || self.opponent_disabled || self.is_finished() {
            return Vec::new();
        }

        let chosen = self.memory.choose_cards(&self.board, &mut self.rng);
        let mut revealed = Vec::with_capacity(chosen.len());
        for id in chosen {
            if !self.reveal_card(id) {
                log::warn!("Opponent pick {} was rejected", id);
                continue;
            }
            if let Some(card) = self.board.get(id) {
                revealed.push(card.clone());
            }
        }
        log::debug!("{} revealed {} cards", self.current, revealed.len());
        revealed
    }

    /// End a cooperative match on time. Returns `false` if the match is
    /// not cooperative or already over.
    pub fn expire_time(&mut self) -> bool {
        if self.config.mode != GameMode::Cooperative || self.is_finished() {
            return false;
        }
        log::info!("Cooperative time budget expired");
        self.time_over = true;
        true
    }

    // === Hints ===

    /// Spend one of the human's hints.
    ///
    /// Unavailable once the match is over or while the opponent is to play.
    pub fn use_hint(&mut self) -> HintOutcome {
        if self.is_finished() || !self.is_human_turn() {
            return HintOutcome::Unavailable;
        }
        self.hints.use_hint(&self.board, &mut self.rng)
    }

    #[must_use]
    pub fn remaining_hints(&self) -> u32 {
        self.hints.remaining()
    }

    /// Hinted cards and their symbols, in board order.
    #[must_use]
    pub fn hinted_cards(&self) -> Vec<(CardId, Symbol)> {
        self.hints.hinted_cards()
    }

    // === Scoring ===

    /// Score of `player`, recomputed from the board.
    #[must_use]
    pub fn score(&self, player: PlayerId) -> u32 {
        self.scoring_rule().score(&self.board, player)
    }

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        PlayerMap::new(|player| self.score(player))
    }

    /// Shared cooperative score.
    #[must_use]
    pub fn team_score(&self) -> u32 {
        self.score(PlayerId::Human) + self.score(PlayerId::Opponent)
    }

    /// Final result, once the match is over.
    #[must_use]
    pub fn outcome(&self) -> Option<MatchOutcome> {
        if !self.is_finished() {
            return None;
        }
        Some(match self.config.mode {
            GameMode::Competitive => MatchOutcome::from_scores(
                self.score(PlayerId::Human),
                self.score(PlayerId::Opponent),
            ),
            GameMode::Cooperative if self.time_over => MatchOutcome::Loss,
            GameMode::Cooperative => MatchOutcome::Win,
            GameMode::Zen => MatchOutcome::Complete,
        })
    }

    /// End-of-match payload for the persistence collaborator.
    ///
    /// `None` until the match is over.
    #[must_use]
    pub fn record(&self, player_name: &str, timestamp: DateTime<Utc>) -> Option<MatchRecord> {
        let outcome = self.outcome()?;
        let score = match self.config.mode {
            GameMode::Cooperative => self.team_score(),
            GameMode::Competitive | GameMode::Zen => self.score(PlayerId::Human),
        };
        Some(MatchRecord::new(
            player_name,
            score,
            self.config.mode,
            self.config.difficulty,
            timestamp,
            outcome,
        ))
    }
}
