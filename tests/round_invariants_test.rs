//! Invariants checked over many generated guess sequences.

use std::collections::BTreeSet;

use hangman::games::hangman::{GuessOutcome, Round, RoundError, RoundStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const WORDS: &[&str] = &["A", "CAT", "HANGMAN", "BANANA", "QUIZ", "MISSISSIPPI", "RHYTHM"];

fn random_letter(rng: &mut StdRng) -> char {
    let c = char::from(b'A' + rng.random_range(0..26u8));
    if rng.random_bool(0.5) {
        c.to_ascii_lowercase()
    } else {
        c
    }
}

fn expected_mask(word: &str, guessed: &BTreeSet<char>) -> String {
    word.chars()
        .map(|c| if guessed.contains(&c) { c.to_string() } else { "_".to_string() })
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_invariants_hold_for_random_play() {
    let mut rng = StdRng::seed_from_u64(0x4841_4E47);

    for game in 0..500 {
        let word = WORDS[game % WORDS.len()];
        let max = rng.random_range(1..=8u8);
        let mut round = Round::start(word, max).unwrap();

        for _ in 0..40 {
            let before_status = round.status();
            let before_guessed = round.guessed_letters().clone();
            let before_misses = round.incorrect_guesses();
            let letter = random_letter(&mut rng);

            match round.submit_guess(letter) {
                Ok(report) => {
                    assert_eq!(before_status, RoundStatus::InProgress);
                    if report.outcome == GuessOutcome::AlreadyGuessed {
                        assert_eq!(round.guessed_letters(), &before_guessed);
                        assert_eq!(round.incorrect_guesses(), before_misses);
                    }
                    assert_eq!(report.status, round.status());
                    assert_eq!(report.masked, round.masked_word());
                }
                Err(RoundError::RoundAlreadyEnded) => {
                    assert!(before_status.is_terminal());
                    assert_eq!(round.guessed_letters(), &before_guessed);
                    assert_eq!(round.incorrect_guesses(), before_misses);
                }
                Err(other) => panic!("unexpected error {other:?}"),
            }

            assert!(round.incorrect_guesses() <= max);
            assert_eq!(round.remaining_guesses(), max - round.incorrect_guesses());
            assert_eq!(round.masked_word(), expected_mask(word, round.guessed_letters()));

            let all_found = word.chars().all(|c| round.guessed_letters().contains(&c));
            match round.status() {
                RoundStatus::Won => assert!(all_found),
                RoundStatus::Lost => {
                    assert!(!all_found);
                    assert_eq!(round.incorrect_guesses(), max);
                }
                RoundStatus::InProgress => {
                    assert!(!all_found);
                    assert!(round.incorrect_guesses() < max);
                }
            }
            assert_eq!(round.score().is_some(), round.status() == RoundStatus::Won);
        }
    }
}

#[test]
fn test_misses_count_distinct_wrong_letters() {
    let mut round = Round::start("HANGMAN", 10).unwrap();
    for c in "zzZqQxz".chars() {
        round.submit_guess(c).unwrap();
    }
    assert_eq!(round.incorrect_guesses(), 3);
    assert_eq!(round.wrong_letters().collect::<String>(), "QXZ");
}
