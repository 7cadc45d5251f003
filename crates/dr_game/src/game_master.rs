//! The narrator: a mood plus the line currently on screen.
//!
//! Reaction lines are drawn from fixed pools with a caller-supplied RNG so a
//! seeded session replays the same dialogue.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mood {
    #[default]
    Neutral,
    Amused,
    Impressed,
    Angry,
    Menacing,
    Satisfied,
}

const CORRECT_LINES: [&str; 5] = [
    "Impressive... but don't get cocky.",
    "Correct. You might actually survive this.",
    "Well done. Few make it this far.",
    "You're smarter than you look.",
    "Hmm... perhaps you're worthy after all.",
];

const WRONG_LINES: [&str; 5] = [
    "Wrong. Feel the consequences.",
    "Pathetic. Did you even try?",
    "No... that's not even close.",
    "Your ignorance is painful to watch.",
    "I expected better from you.",
];

const LOW_HEALTH_LINES: [&str; 5] = [
    "You're fading... how amusing.",
    "Can you feel death approaching?",
    "One more mistake, and you're mine forever.",
    "Your life force wanes... delightful.",
    "Weakness. I can smell it.",
];

const HIGH_SCORE_LINES: [&str; 5] = [
    "You've impressed me. That's... rare.",
    "Such skill. Perhaps you deserve a choice.",
    "Remarkable. You might be worthy of power.",
    "Few have shown such prowess.",
    "You're becoming interesting...",
];

#[derive(Debug, Clone)]
pub struct GameMaster {
    mood: Mood,
    dialogue: String,
}

impl GameMaster {
    pub fn new() -> Self {
        Self {
            mood: Mood::Neutral,
            dialogue: "Welcome to my realm...".to_string(),
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn dialogue(&self) -> &str {
        &self.dialogue
    }

    pub fn set_dialogue(&mut self, line: &str) {
        self.dialogue = line.to_string();
    }

    /// Returns true when the mood actually changed.
    pub fn set_mood(&mut self, mood: Mood) -> bool {
        if self.mood == mood {
            return false;
        }
        log::debug!("Game master mood {:?} -> {:?}", self.mood, mood);
        self.mood = mood;
        true
    }

    pub fn react_to_correct_answer(&mut self, rng: &mut impl Rng) -> &'static str {
        self.set_mood(Mood::Impressed);
        pick(&CORRECT_LINES, rng)
    }

    pub fn react_to_wrong_answer(&mut self, rng: &mut impl Rng) -> &'static str {
        self.set_mood(Mood::Angry);
        pick(&WRONG_LINES, rng)
    }

    pub fn react_to_low_health(&mut self, rng: &mut impl Rng) -> &'static str {
        self.set_mood(Mood::Menacing);
        pick(&LOW_HEALTH_LINES, rng)
    }

    pub fn react_to_high_score(&mut self, rng: &mut impl Rng) -> &'static str {
        self.set_mood(Mood::Satisfied);
        pick(&HIGH_SCORE_LINES, rng)
    }
}

impl Default for GameMaster {
    fn default() -> Self {
        Self::new()
    }
}

fn pick(pool: &[&'static str], rng: &mut impl Rng) -> &'static str {
    pool.choose(rng).copied().unwrap_or_default()
}
