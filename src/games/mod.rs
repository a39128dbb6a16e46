pub mod hangman;
