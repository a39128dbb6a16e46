//! End-to-end round behaviour through the public API.

use std::time::{Duration, Instant};

use hangman::games::hangman::{
    GuessOutcome, Round, RoundError, RoundSettings, RoundStatus, Score, ScoreRules, SecretWord,
};

fn guess_all(round: &mut Round, letters: &str) {
    for c in letters.chars() {
        round.submit_guess(c).expect("guess accepted");
    }
}

#[test]
fn test_hangman_solved_without_misses() {
    let mut round = Round::start("HANGMAN", 6).unwrap();
    guess_all(&mut round, "HANGM");

    assert_eq!(round.status(), RoundStatus::Won);
    assert_eq!(round.incorrect_guesses(), 0);
    assert_eq!(round.masked_word(), "H A N G M A N");
}

#[test]
fn test_six_misses_lose_the_round() {
    let mut round = Round::start("CAT", 6).unwrap();
    guess_all(&mut round, "XYZQWE");

    assert_eq!(round.status(), RoundStatus::Lost);
    assert_eq!(round.remaining_guesses(), 0);
    assert_eq!(round.incorrect_guesses(), 6);
    assert_eq!(round.submit_guess('C'), Err(RoundError::RoundAlreadyEnded));
}

#[test]
fn test_repeated_letter_is_already_guessed() {
    let mut round = Round::start("DOG", 6).unwrap();
    assert_eq!(round.submit_guess('D').unwrap().outcome, GuessOutcome::Correct);
    assert_eq!(round.submit_guess('D').unwrap().outcome, GuessOutcome::AlreadyGuessed);
    assert_eq!(round.submit_guess('O').unwrap().outcome, GuessOutcome::Correct);
    let last = round.submit_guess('G').unwrap();

    assert_eq!(last.status, RoundStatus::Won);
    assert_eq!(round.incorrect_guesses(), 0);
}

#[test]
fn test_fast_perfect_two_letter_score() {
    let start = Instant::now();
    let mut round =
        Round::start_at(SecretWord::new("AB").unwrap(), RoundSettings::default(), start).unwrap();
    round.submit_guess_at('A', start + Duration::from_secs(3)).unwrap();
    round.submit_guess_at('B', start + Duration::from_secs(5)).unwrap();

    let score = round.score().expect("won round has a score");
    assert_eq!(score.base, 200);
    assert_eq!(score.time_bonus, 950);
    assert_eq!(score.error_penalty, 0);
    assert_eq!(score.total, 1150);

    let earned = round.achievements().unwrap();
    assert!(earned.fast_solve);
    assert!(earned.perfect_solve);
}

#[test]
fn test_guesses_are_case_insensitive() {
    let mut round = Round::start("Rust", 6).unwrap();
    round.submit_guess('r').unwrap();
    assert_eq!(round.submit_guess('R').unwrap().outcome, GuessOutcome::AlreadyGuessed);
    assert_eq!(round.masked_word(), "R _ _ _");
}

#[test]
fn test_single_miss_allowance() {
    let mut round = Round::start("OX", 1).unwrap();
    let report = round.submit_guess('Q').unwrap();
    assert_eq!(report.status, RoundStatus::Lost);
    assert_eq!(round.remaining_guesses(), 0);
}

#[test]
fn test_custom_rules_flow_into_score() {
    let start = Instant::now();
    let settings = RoundSettings {
        max_incorrect_guesses: 6,
        scoring: ScoreRules {
            letter_points: 10,
            max_time_bonus: 0,
            miss_penalty: 5,
            fast_solve_secs: 1,
        },
    };
    let mut round = Round::start_at(SecretWord::new("BEE").unwrap(), settings, start).unwrap();
    round.submit_guess_at('X', start).unwrap();
    round.submit_guess_at('B', start).unwrap();
    round.submit_guess_at('E', start + Duration::from_secs(2)).unwrap();

    assert_eq!(
        round.score().copied(),
        Some(Score::compute(&settings.scoring, 3, Duration::from_secs(2), 1))
    );
    assert_eq!(round.score().unwrap().total, 25);
    assert!(!round.achievements().unwrap().fast_solve);
}
