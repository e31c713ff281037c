//! Multiple-choice self quiz over the learned words.
//!
//! A session moves through `Empty`, `InProgress`, `Answered` and `Completed`.
//! Question order and option order both come from `SliceRandom`, which is a
//! Fisher-Yates shuffle, so every permutation is equally likely.

use std::collections::{BTreeSet, HashSet};

use keyrole_types::{QuizView, WordEntry, WordId};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::progress::round_percent;
use crate::speech::{TextToSpeech, speak_or_log};
use crate::vocabulary::Vocabulary;

/// Wrong options drawn per question
pub const DISTRACTORS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub word: WordEntry,
    /// Display order, the correct answer appears exactly once
    pub options: Vec<String>,
    pub correct_answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Nothing learned yet, only exit makes sense
    Empty,
    InProgress,
    Answered,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// Not waiting for an answer, the first answer stands
    Ignored,
    /// Option number outside the displayed list
    InvalidOption,
}

pub struct QuizSession {
    learned: Vec<WordEntry>,
    /// Every vocabulary word's id and meaning, source of distractors
    meanings: Vec<(WordId, String)>,
    questions: Vec<QuizQuestion>,
    index: usize,
    selected: Option<String>,
    score: usize,
    completed: bool,
}

impl QuizSession {
    /// Activate a session from the current learned set
    pub fn start<R: Rng + ?Sized>(
        vocabulary: &Vocabulary,
        learned_ids: &BTreeSet<WordId>,
        rng: &mut R,
    ) -> Self {
        let learned: Vec<WordEntry> = vocabulary
            .words()
            .iter()
            .filter(|w| learned_ids.contains(&w.id))
            .cloned()
            .collect();
        let meanings = vocabulary
            .words()
            .iter()
            .map(|w| (w.id, w.meaning.clone()))
            .collect();

        let mut session = Self {
            learned,
            meanings,
            questions: Vec::new(),
            index: 0,
            selected: None,
            score: 0,
            completed: false,
        };
        session.questions = build_questions(&session.learned, &session.meanings, rng);

        tracing::info!("Quiz started with {} questions", session.questions.len());
        session
    }

    pub fn state(&self) -> QuizState {
        if self.questions.is_empty() {
            QuizState::Empty
        } else if self.completed {
            QuizState::Completed
        } else if self.selected.is_some() {
            QuizState::Answered
        } else {
            QuizState::InProgress
        }
    }

    /// Lock in an answer for the current question
    pub fn select_answer(&mut self, answer: &str) -> AnswerOutcome {
        if self.state() != QuizState::InProgress {
            return AnswerOutcome::Ignored;
        }

        let correct = self.questions[self.index].correct_answer == answer;
        self.selected = Some(answer.to_string());
        if correct {
            self.score += 1;
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Select by 1-based option number
    pub fn select_option(&mut self, number: usize) -> AnswerOutcome {
        if self.state() != QuizState::InProgress {
            return AnswerOutcome::Ignored;
        }

        let option = number
            .checked_sub(1)
            .and_then(|i| self.questions[self.index].options.get(i))
            .cloned();
        match option {
            Some(answer) => self.select_answer(&answer),
            None => AnswerOutcome::InvalidOption,
        }
    }

    /// Move past an answered question
    pub fn advance(&mut self) -> QuizState {
        if self.state() == QuizState::Answered {
            if self.index + 1 >= self.questions.len() {
                self.completed = true;
                tracing::info!("Quiz completed: {}/{}", self.score, self.total());
            } else {
                self.index += 1;
                self.selected = None;
            }
        }
        self.state()
    }

    /// Fresh question order from the same learned words, only after completion
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.state() != QuizState::Completed {
            return false;
        }

        self.questions = build_questions(&self.learned, &self.meanings, rng);
        self.index = 0;
        self.selected = None;
        self.score = 0;
        self.completed = false;
        true
    }

    /// Question on screen, none when empty or completed
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state() {
            QuizState::InProgress | QuizState::Answered => self.questions.get(self.index),
            QuizState::Empty | QuizState::Completed => None,
        }
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Score as a rounded percentage
    pub fn percent(&self) -> u32 {
        round_percent(self.score, self.total())
    }

    /// Speak the current term, failures never touch quiz state
    pub fn speak_current(&self, tts: &dyn TextToSpeech, lang: &str) {
        if let Some(question) = self.current_question() {
            speak_or_log(tts, &question.word.spanish, lang);
        }
    }

    pub fn view(&self) -> QuizView {
        match self.state() {
            QuizState::Empty => QuizView::Empty,
            QuizState::Completed => QuizView::Completed {
                score: self.score,
                total: self.total(),
                percent: self.percent(),
            },
            QuizState::InProgress | QuizState::Answered => {
                let question = &self.questions[self.index];
                QuizView::Question {
                    number: self.index + 1,
                    total: self.total(),
                    term: question.word.spanish.clone(),
                    transliteration: question.word.transliteration.clone(),
                    malaysian: question.word.malaysian.clone(),
                    options: question.options.clone(),
                    selected: self.selected.clone(),
                    correct: self
                        .selected
                        .as_ref()
                        .map(|_| question.correct_answer.clone()),
                    score: self.score,
                }
            }
        }
    }
}

fn build_questions<R: Rng + ?Sized>(
    learned: &[WordEntry],
    meanings: &[(WordId, String)],
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let mut order: Vec<&WordEntry> = learned.iter().collect();
    order.shuffle(rng);

    order
        .into_iter()
        .map(|word| build_question(word, meanings, rng))
        .collect()
}

fn build_question<R: Rng + ?Sized>(
    word: &WordEntry,
    meanings: &[(WordId, String)],
    rng: &mut R,
) -> QuizQuestion {
    // distinct meanings of other words, never equal to the answer
    let mut seen = HashSet::new();
    let candidates: Vec<&str> = meanings
        .iter()
        .filter(|(id, meaning)| *id != word.id && *meaning != word.meaning)
        .map(|(_, meaning)| meaning.as_str())
        .filter(|meaning| seen.insert(*meaning))
        .collect();

    // fewer candidates than DISTRACTORS just means fewer options
    let mut options: Vec<String> = candidates
        .choose_multiple(rng, DISTRACTORS)
        .map(|meaning| meaning.to_string())
        .collect();
    options.push(word.meaning.clone());
    options.shuffle(rng);

    QuizQuestion {
        word: word.clone(),
        options,
        correct_answer: word.meaning.clone(),
    }
}
