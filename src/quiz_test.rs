use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;

fn note(s: &str) -> Note {
    s.parse().unwrap()
}

// =============================================================
// Settings
// =============================================================

#[test]
fn settings_defaults() {
    let s = QuizSettings::default();
    assert_eq!(s.num_rounds, 4);
    assert_eq!(s.start_fret, 0);
    assert_eq!(s.end_fret, 4);
}

#[test]
fn settings_from_partial_json() {
    let s: QuizSettings = serde_json::from_str(r#"{"numRounds": 3, "endFret": 7}"#).unwrap();
    assert_eq!(s, QuizSettings { num_rounds: 3, start_fret: 0, end_fret: 7 });
}

#[test]
fn board_config_shows_quiz_frets_with_hover() {
    let s = QuizSettings { num_rounds: 1, start_fret: 5, end_fret: 9 };
    let cfg = s.board_config();
    assert_eq!((cfg.start_fret, cfg.end_fret), (5, 9));
    assert!(cfg.draw_dot_on_hover);
    assert!(cfg.validate().is_ok());
}

#[test]
fn reachable_range_under_standard_tuning() {
    let s = QuizSettings::default();
    // Open E2 up to E4+4.
    assert_eq!(s.reachable_range(&Tuning::standard()), Some(40..=68));
}

#[test]
fn reachable_range_that_overflows_is_none() {
    let s = QuizSettings { num_rounds: 1, start_fret: 0, end_fret: i32::MAX };
    assert_eq!(s.reachable_range(&Tuning::standard()), None);
}

#[test]
fn reachable_range_of_empty_tuning_is_none() {
    assert_eq!(QuizSettings::default().reachable_range(&Tuning::new(vec![])), None);
}

// =============================================================
// Rounds
// =============================================================

#[test]
fn random_round_stays_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let round = Round::random(&mut rng, DEFAULT_NOTE_RANGE);
        assert!(DEFAULT_NOTE_RANGE.contains(&round.note_to_guess().midi()));
        assert!(round.guesses().is_empty());
    }
}

#[test]
fn random_round_is_deterministic_for_a_seed() {
    let a = Round::random(&mut StdRng::seed_from_u64(42), DEFAULT_NOTE_RANGE);
    let b = Round::random(&mut StdRng::seed_from_u64(42), DEFAULT_NOTE_RANGE);
    assert_eq!(a, b);
}

#[test]
fn random_round_with_single_value_range() {
    let round = Round::random(&mut StdRng::seed_from_u64(1), 60..=60);
    assert_eq!(round.note_to_guess(), note("C4"));
}

#[test]
#[allow(clippy::reversed_empty_ranges)]
fn random_round_with_empty_range_uses_start() {
    let round = Round::random(&mut StdRng::seed_from_u64(1), 50..=40);
    assert_eq!(round.note_to_guess().midi(), 50);
}

#[test]
fn correct_guess_is_recorded() {
    let tuning = Tuning::standard();
    let mut round = Round::new(note("C4"));
    let g = round.guess(BoardCoordinate::new(1, 1), &tuning);
    assert!(g.is_correct);
    assert!(round.is_solved());
    assert_eq!(round.guesses(), &[g]);
}

#[test]
fn wrong_guess_is_recorded() {
    let tuning = Tuning::standard();
    let mut round = Round::new(note("C4"));
    let g = round.guess(BoardCoordinate::new(1, 2), &tuning);
    assert!(!g.is_correct);
    assert!(!round.is_solved());
    assert_eq!(round.guesses().len(), 1);
}

#[test]
fn enharmonic_guess_counts() {
    let tuning = Tuning::standard();
    let mut round = Round::new(note("Db4"));
    assert!(round.guess(BoardCoordinate::new(1, 2), &tuning).is_correct);
}

#[test]
fn guess_on_missing_string_is_wrong() {
    let mut round = Round::new(note("E2"));
    assert!(!round.guess(BoardCoordinate::new(9, 0), &Tuning::standard()).is_correct);
}

#[test]
fn same_pitch_on_another_string_is_correct() {
    let tuning = Tuning::standard();
    let mut round = Round::new(note("B3"));
    // Open B string and G string fret 4.
    assert!(round.guess(BoardCoordinate::new(2, 4), &tuning).is_correct);
    assert_eq!(round.answers(&tuning, 0, 4), vec![BoardCoordinate::new(1, 0), BoardCoordinate::new(2, 4)]);
}

#[test]
fn named_guess_records_the_player() {
    let mut round = Round::new(note("E2"));
    let g = round.guess_by(3, BoardCoordinate::new(5, 0), &Tuning::standard());
    assert_eq!(g.player, Some(3));
    assert!(g.is_correct);
}

// =============================================================
// Status
// =============================================================

#[test]
fn status_parses_its_display_form() {
    for status in [Status::Init, Status::Playing, Status::RoundOver, Status::GameOver, Status::NoPlayers] {
        assert_eq!(status.to_string().parse::<Status>(), Ok(status));
    }
    assert_eq!("Paused".parse::<Status>(), Err(QuizError::UnknownStatus("Paused".into())));
}

#[test]
fn only_game_over_and_no_players_are_finished() {
    assert!(Status::GameOver.is_finished());
    assert!(Status::NoPlayers.is_finished());
    assert!(!Status::Init.is_finished());
    assert!(!Status::RoundOver.is_finished());
}

// =============================================================
// Game
// =============================================================

const HOST: PlayerId = 1;
const GUEST: PlayerId = 2;

fn game(num_rounds: u32) -> Game {
    Game::new(HOST, QuizSettings { num_rounds, ..QuizSettings::default() })
}

/// A cell that sounds the open round's note.
fn answer(game: &Game) -> BoardCoordinate {
    let s = game.settings();
    game.curr_round().unwrap().answers(game.tuning(), s.start_fret, s.end_fret)[0]
}

/// A cell that does not sound the open round's note.
fn miss(game: &Game) -> BoardCoordinate {
    let target = game.curr_round().unwrap().note_to_guess();
    (0..=4)
        .map(|fret| BoardCoordinate::new(0, fret))
        .find(|c| game.tuning().note_at(*c).is_some_and(|n| !n.is_enharmonic(&target)))
        .unwrap()
}

#[test]
fn new_game_starts_in_init_with_host() {
    let g = game(4);
    assert_eq!(g.status(), Status::Init);
    assert_eq!(g.host_id(), Some(HOST));
    assert_eq!(g.players(), &[HOST]);
    assert!(g.curr_round().is_none());
    assert_eq!(g.note_range(), 40..=68);
}

#[test]
fn start_round_moves_to_playing() {
    let mut g = game(4);
    let note = g.start_round(&mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(g.status(), Status::Playing);
    assert_eq!(g.rounds().len(), 1);
    assert_eq!(g.curr_round().unwrap().note_to_guess(), note);
    assert!(g.note_range().contains(&note.midi()));
}

#[test]
fn start_round_while_playing_is_rejected() {
    let mut g = game(4);
    let mut rng = StdRng::seed_from_u64(3);
    g.start_round(&mut rng).unwrap();
    assert_eq!(
        g.start_round(&mut rng),
        Err(QuizError::WrongStatus { action: "start a round", status: Status::Playing })
    );
    assert_eq!(g.rounds().len(), 1);
}

#[test]
fn wrong_guess_keeps_the_round_open() {
    let mut g = game(4);
    g.start_round(&mut StdRng::seed_from_u64(5)).unwrap();
    let coord = miss(&g);
    let guess = g.guess(HOST, coord).unwrap();
    assert!(!guess.is_correct);
    assert_eq!(g.status(), Status::Playing);
}

#[test]
fn correct_guess_ends_the_round() {
    let mut g = game(4);
    g.start_round(&mut StdRng::seed_from_u64(5)).unwrap();
    let coord = answer(&g);
    assert!(g.guess(HOST, coord).unwrap().is_correct);
    assert_eq!(g.status(), Status::RoundOver);
    assert!(g.curr_round().unwrap().is_solved());
}

#[test]
fn guess_outside_a_round_is_rejected() {
    let mut g = game(4);
    assert_eq!(
        g.guess(HOST, BoardCoordinate::new(0, 0)),
        Err(QuizError::WrongStatus { action: "guess", status: Status::Init })
    );
}

#[test]
fn guess_from_a_stranger_is_rejected() {
    let mut g = game(4);
    g.start_round(&mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(g.guess(99, BoardCoordinate::new(0, 0)), Err(QuizError::NotAPlayer(99)));
    assert!(g.curr_round().unwrap().guesses().is_empty());
}

#[test]
fn solving_every_round_ends_the_game() {
    let mut g = game(3);
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..3 {
        g.start_round(&mut rng).unwrap();
        let coord = answer(&g);
        g.guess(HOST, coord).unwrap();
    }
    assert_eq!(g.status(), Status::GameOver);
    assert_eq!(g.rounds().len(), 3);
    assert!(matches!(g.start_round(&mut rng), Err(QuizError::WrongStatus { status: Status::GameOver, .. })));
    assert!(g.join(GUEST).is_err());
}

#[test]
fn zero_round_game_cannot_start() {
    let mut g = game(0);
    assert_eq!(g.start_round(&mut StdRng::seed_from_u64(1)), Err(QuizError::RoundsExhausted(0)));
    assert_eq!(g.status(), Status::Init);
}

#[test]
fn players_can_join_once_and_guess() {
    let mut g = game(2);
    g.join(GUEST).unwrap();
    g.join(GUEST).unwrap();
    assert_eq!(g.players(), &[HOST, GUEST]);

    g.start_round(&mut StdRng::seed_from_u64(8)).unwrap();
    let coord = answer(&g);
    let guess = g.guess(GUEST, coord).unwrap();
    assert_eq!(guess.player, Some(GUEST));
    assert_eq!(g.status(), Status::RoundOver);
}

#[test]
fn host_leaving_hands_over_to_next_player() {
    let mut g = game(2);
    g.join(GUEST).unwrap();
    g.leave(HOST).unwrap();
    assert_eq!(g.host_id(), Some(GUEST));
    assert_eq!(g.players(), &[GUEST]);
    assert_eq!(g.status(), Status::Init);
}

#[test]
fn last_player_leaving_ends_the_game() {
    let mut g = game(2);
    g.start_round(&mut StdRng::seed_from_u64(2)).unwrap();
    g.leave(HOST).unwrap();
    assert_eq!(g.status(), Status::NoPlayers);
    assert_eq!(g.host_id(), None);
    assert_eq!(g.leave(HOST), Err(QuizError::NotAPlayer(HOST)));
    assert!(g.join(GUEST).is_err());
}

#[test]
fn leaving_a_finished_game_keeps_its_status() {
    let mut g = game(1);
    g.start_round(&mut StdRng::seed_from_u64(4)).unwrap();
    let coord = answer(&g);
    g.guess(HOST, coord).unwrap();
    g.leave(HOST).unwrap();
    assert_eq!(g.status(), Status::GameOver);
}
