//! Turn engine tests.
//!
//! These tests drive whole turns through the public engine API: reveals,
//! resolution, turn hand-over, special-card latches, hints and the
//! end-of-match record.

use chrono::{TimeZone, Utc};

use memory_match::{
    Board, BoardLayout, CardId, Difficulty, GameMode, GameRng, HintOutcome, MatchConfig,
    MatchOutcome, MemoryModel, PlayerId, Resolution, SpecialEffect, Symbol, TurnEngine,
};

fn id(n: u32) -> CardId {
    CardId::new(n)
}

/// Engine over a fixed board with optional special cards.
fn engine_with(
    mode: GameMode,
    difficulty: Difficulty,
    layout: BoardLayout,
    symbols: &str,
    specials: &[(u32, SpecialEffect)],
) -> TurnEngine {
    let mut board = Board::from_symbols(&layout, symbols.chars().map(Symbol).collect())
        .expect("valid test board");
    for &(card, effect) in specials {
        assert!(board.set_special_effect(id(card), effect));
    }
    TurnEngine::with_parts(
        MatchConfig::new(mode, difficulty),
        board,
        MemoryModel::for_match(difficulty, mode),
        GameRng::new(42),
    )
}

fn play(engine: &mut TurnEngine, cards: &[u32]) -> Option<Resolution> {
    for &card in cards {
        assert!(engine.reveal(id(card)), "reveal of {card} rejected");
    }
    engine.resolve()
}

// ============================================================================
// Basic turns
// ============================================================================

/// Test a matching pair on Easy competitive.
#[test]
fn test_easy_competitive_match() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "ABCABC",
        &[],
    );
    let before = engine.score(PlayerId::Human);

    let resolution = play(&mut engine, &[1, 4]);

    assert_eq!(resolution, Some(Resolution::Matched { symbol: Symbol('B'), by: PlayerId::Human }));
    for card in [1, 4] {
        let card = engine.board().get(id(card)).unwrap();
        assert!(card.is_matched());
        assert_eq!(card.matched_by(), Some(PlayerId::Human));
    }
    assert_eq!(engine.score(PlayerId::Human), before + 1);
    assert_eq!(engine.current_player(), PlayerId::Opponent);
}

/// Test a failed triple on Medium competitive.
#[test]
fn test_medium_competitive_miss() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Medium,
        BoardLayout::uniform(2, 3),
        "AABABB",
        &[],
    );

    let resolution = play(&mut engine, &[0, 1, 2]);

    assert!(matches!(resolution, Some(Resolution::Missed { .. })));
    for card in [0, 1, 2] {
        assert!(!engine.board().get(id(card)).unwrap().is_revealed());
    }
    assert_eq!(engine.current_player(), PlayerId::Opponent);
    assert_eq!(engine.score(PlayerId::Human), 0);
    assert!(engine.pending().is_empty());
}

/// Test that the fourth reveal on a Medium board is rejected.
#[test]
fn test_full_selection_rejects_reveal() {
    let mut engine = engine_with(
        GameMode::Zen,
        Difficulty::Medium,
        BoardLayout::uniform(2, 3),
        "AAABBB",
        &[],
    );

    for card in [0, 3, 4] {
        assert!(engine.reveal(id(card)));
    }
    assert!(!engine.reveal(id(1)));
    assert!(!engine.board().get(id(1)).unwrap().is_revealed());
    assert_eq!(engine.pending().len(), 3);
}

/// Test that both players take turns and score separately.
#[test]
fn test_alternating_turns_and_scores() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Easy,
        BoardLayout::uniform(2, 2),
        "ABAB",
        &[],
    );

    play(&mut engine, &[0, 2]);
    assert!(engine.is_opponent_turn());

    // Only the B pair is left, so the opponent cannot miss
    let revealed = engine.play_opponent_turn();
    assert_eq!(revealed.len(), 2);
    assert!(revealed.iter().all(|c| c.symbol() == Symbol('B')));
    engine.resolve();

    assert_eq!(engine.score(PlayerId::Human), 1);
    assert_eq!(engine.score(PlayerId::Opponent), 1);
    assert!(engine.is_game_over());
    assert_eq!(engine.outcome(), Some(MatchOutcome::Draw));
}

/// Test that zen never hands the turn over.
#[test]
fn test_zen_keeps_human_turn() {
    let mut engine = engine_with(
        GameMode::Zen,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "ABCABC",
        &[],
    );

    play(&mut engine, &[0, 1]);
    play(&mut engine, &[0, 3]);
    play(&mut engine, &[1, 2]);

    assert_eq!(engine.current_player(), PlayerId::Human);
    assert!(!engine.opponent_should_act());
    assert!(!engine.is_opponent_turn());
}

// ============================================================================
// Special cards
// ============================================================================

/// Test that a matched freeze card skips exactly one opponent turn.
#[test]
fn test_freeze_skips_one_opponent_turn() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "AABBCC",
        &[(0, SpecialEffect::FreezeOpponent)],
    );

    play(&mut engine, &[0, 1]);

    assert_eq!(engine.current_player(), PlayerId::Human);
    assert!(engine.opponent_turn_skipped());
    assert!(!engine.is_opponent_frozen(), "latch is consumed by the skip");
    assert!(!engine.opponent_should_act());

    // Normal alternation resumes
    play(&mut engine, &[2, 4]);
    assert!(!engine.opponent_turn_skipped());
    assert_eq!(engine.current_player(), PlayerId::Opponent);
    assert!(engine.opponent_should_act());
}

/// Test that a missed freeze card does nothing.
#[test]
fn test_freeze_requires_a_match() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "AABBCC",
        &[(0, SpecialEffect::FreezeOpponent)],
    );

    play(&mut engine, &[0, 2]);

    assert!(!engine.opponent_turn_skipped());
    assert_eq!(engine.current_player(), PlayerId::Opponent);
}

/// Test that a freeze card has no effect in cooperative mode.
#[test]
fn test_freeze_inert_in_cooperative() {
    let mut engine = engine_with(
        GameMode::Cooperative,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "AABBCC",
        &[(0, SpecialEffect::FreezeOpponent)],
    );

    play(&mut engine, &[0, 1]);

    assert_eq!(engine.current_player(), PlayerId::Opponent);
    assert!(engine.opponent_should_act());
}

/// Test that a missed trap benches the cooperative opponent for good.
#[test]
fn test_trap_disables_opponent() {
    let mut engine = engine_with(
        GameMode::Cooperative,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "AABBCC",
        &[(0, SpecialEffect::Trap)],
    );

    play(&mut engine, &[0, 2]);

    assert!(engine.is_opponent_disabled());
    assert_eq!(engine.current_player(), PlayerId::Human);
    assert!(!engine.opponent_should_act());
    assert!(engine.play_opponent_turn().is_empty());

    for cards in [[0, 1], [2, 4], [2, 3], [4, 5]] {
        play(&mut engine, &cards);
        assert_eq!(engine.current_player(), PlayerId::Human);
    }
    assert!(engine.is_game_over());
    assert_eq!(engine.outcome(), Some(MatchOutcome::Win));
}

/// Test that a matched trap is harmless.
#[test]
fn test_matched_trap_is_harmless() {
    let mut engine = engine_with(
        GameMode::Cooperative,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "AABBCC",
        &[(0, SpecialEffect::Trap)],
    );

    play(&mut engine, &[0, 1]);

    assert!(!engine.is_opponent_disabled());
    assert_eq!(engine.current_player(), PlayerId::Opponent);
}

/// Test that a reveal-all card exposes its group without revealing it.
#[test]
fn test_reveal_all_exposes_group() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Medium,
        BoardLayout::uniform(2, 3),
        "ABBABA",
        &[(3, SpecialEffect::RevealAll)],
    );

    engine.reveal(id(3));

    assert_eq!(engine.exposed_cards(), vec![id(0), id(3), id(5)]);
    assert!(!engine.board().get(id(0)).unwrap().is_revealed());

    engine.reveal(id(0));
    engine.reveal(id(5));
    engine.resolve();
    assert!(engine.exposed_cards().is_empty());
}

/// Test that reveal-all does nothing in zen.
#[test]
fn test_reveal_all_inert_in_zen() {
    let mut engine = engine_with(
        GameMode::Zen,
        Difficulty::Easy,
        BoardLayout::uniform(2, 2),
        "ABAB",
        &[(0, SpecialEffect::RevealAll)],
    );

    engine.reveal(id(0));
    assert!(engine.exposed_cards().is_empty());
}

// ============================================================================
// Hints
// ============================================================================

/// Test that an exhausted hint budget leaves the hint map unchanged.
#[test]
fn test_hint_with_empty_budget() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Extreme,
        BoardLayout::new(vec![2, 2]),
        "ABAB",
        &[],
    );
    assert_eq!(engine.remaining_hints(), 0);

    let outcome = engine.use_hint();

    assert_eq!(outcome, HintOutcome::Unavailable);
    assert!(!outcome.accepted());
    assert!(engine.hinted_cards().is_empty());
}

/// Test that hints are spent and never flip cards.
#[test]
fn test_hints_are_advisory() {
    let mut engine = engine_with(
        GameMode::Zen,
        Difficulty::Easy,
        BoardLayout::uniform(3, 2),
        "ABCABC",
        &[],
    );

    for _ in 0..3 {
        assert!(engine.use_hint().accepted());
    }
    assert_eq!(engine.remaining_hints(), 0);
    assert_eq!(engine.use_hint(), HintOutcome::Unavailable);

    assert!(engine.cards().iter().all(|c| !c.is_revealed()));
    for (card, symbol) in engine.hinted_cards() {
        assert_eq!(engine.board().get(card).unwrap().symbol(), symbol);
    }
}

// ============================================================================
// Match end
// ============================================================================

/// Test the record of a finished competitive match.
#[test]
fn test_record_after_competitive_win() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Easy,
        BoardLayout::uniform(1, 2),
        "AA",
        &[],
    );
    let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    assert!(engine.record("Bia", at).is_none());

    play(&mut engine, &[0, 1]);

    let record = engine.record("Bia", at).unwrap();
    assert_eq!(record.player_name, "Bia");
    assert_eq!(record.score, 1);
    assert_eq!(record.mode, GameMode::Competitive);
    assert_eq!(record.difficulty, Difficulty::Easy);
    assert_eq!(record.outcome, MatchOutcome::Win);
    assert_eq!(record.timestamp, at);
}

/// Test that a cooperative record carries the team score.
#[test]
fn test_record_uses_team_score_in_cooperative() {
    let mut engine = engine_with(
        GameMode::Cooperative,
        Difficulty::Easy,
        BoardLayout::uniform(2, 2),
        "AABB",
        &[],
    );

    play(&mut engine, &[0, 1]);
    assert!(engine.opponent_should_act());
    engine.play_opponent_turn();
    engine.resolve();

    assert!(engine.is_game_over());
    assert_eq!(engine.team_score(), 2);
    let record = engine.record("Caio", Utc::now()).unwrap();
    assert_eq!(record.score, 2);
    assert_eq!(record.outcome, MatchOutcome::Win);
}

/// Test that nothing moves once the board is cleared.
#[test]
fn test_no_reveal_after_game_over() {
    let mut engine = engine_with(
        GameMode::Competitive,
        Difficulty::Easy,
        BoardLayout::uniform(1, 2),
        "AA",
        &[],
    );
    play(&mut engine, &[0, 1]);

    assert!(!engine.reveal(id(0)));
    assert!(!engine.opponent_should_act());
    assert!(engine.play_opponent_turn().is_empty());
    assert_eq!(engine.resolve(), None);
}

/// Test that seeded matches are reproducible end to end.
#[test]
fn test_seeded_match_is_reproducible() {
    let config = MatchConfig::new(GameMode::Cooperative, Difficulty::Extreme).with_seed(99);
    let mut a = TurnEngine::from_config(config);
    let mut b = TurnEngine::from_config(config);

    assert_eq!(a.board(), b.board());
    assert_eq!(a.use_hint(), b.use_hint());

    let traps = a
        .cards()
        .iter()
        .filter(|c| c.special_effect() == SpecialEffect::Trap)
        .count();
    assert_eq!(traps, 2);
}
