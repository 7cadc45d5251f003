//! Riddles: question/answer challenges with hint, damage and reward parameters.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Deadly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RiddleKind {
    #[default]
    TextAnswer,
    MultipleChoice,
    Cipher,
    LogicPuzzle,
    CodeChallenge,
}

/// Immutable once built. The answer is private; callers can only test against it.
#[derive(Debug, Clone)]
pub struct Riddle {
    pub question: String,
    answer: String,
    pub hint: String,
    pub choices: Vec<String>,
    pub difficulty: Difficulty,
    pub kind: RiddleKind,
    /// Seconds, 0 = untimed. Reserved; nothing enforces it yet.
    pub time_limit: u32,
    pub damage_on_failure: i32,
    pub reward_points: i32,
    pub story_context: String,
}

impl Riddle {
    pub fn new(question: &str, answer: &str, hint: &str) -> Self {
        Self {
            question: question.to_string(),
            answer: answer.to_string(),
            hint: hint.to_string(),
            choices: Vec::new(),
            difficulty: Difficulty::default(),
            kind: RiddleKind::default(),
            time_limit: 0,
            damage_on_failure: 15,
            reward_points: 100,
            story_context: String::new(),
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_kind(mut self, kind: RiddleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_stakes(mut self, damage_on_failure: i32, reward_points: i32) -> Self {
        self.damage_on_failure = damage_on_failure;
        self.reward_points = reward_points;
        self
    }

    pub fn with_context(mut self, context: &str) -> Self {
        self.story_context = context.to_string();
        self
    }

    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Exact match after trimming outer whitespace.
    pub fn check_answer(&self, answer: &str) -> bool {
        answer.trim() == self.answer.trim()
    }

    /// Case-insensitive match after trimming outer whitespace. This is the check
    /// gameplay uses.
    pub fn check_answer_case_insensitive(&self, answer: &str) -> bool {
        answer.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }
}

/// The five riddles shared by the story and by the level enemies, indexed 0..5.
pub fn riddle_pool() -> Vec<Riddle> {
    vec![
        Riddle::new(
            "What has keys but no locks, space but no room, and you can enter but can't go inside?",
            "keyboard",
            "It's something you're using right now...",
        )
        .with_difficulty(Difficulty::Easy)
        .with_stakes(10, 50)
        .with_context("The Game Master tests your wit with a simple riddle..."),
        Riddle::new(
            "Decode this message: 'GUVF VF ABG SERR'\nCipher: ROT13",
            "THIS IS NOT FREE",
            "Each letter is shifted by 13 positions in the alphabet",
        )
        .with_difficulty(Difficulty::Medium)
        .with_kind(RiddleKind::Cipher)
        .with_stakes(15, 100)
        .with_context("A cryptic message appears before you..."),
        Riddle::new(
            "Three gates: Gold, Silver, Bronze.\n\
             Gold says: 'Freedom lies behind Silver'\n\
             Silver says: 'Freedom is not here'\n\
             Bronze says: 'Gold speaks truth'\n\
             Only ONE speaks truth. Which gate leads to freedom?",
            "gold",
            "If Bronze is true, then Gold is true - but only one can be true...",
        )
        .with_difficulty(Difficulty::Hard)
        .with_kind(RiddleKind::LogicPuzzle)
        .with_stakes(20, 150)
        .with_context("The Game Master presents you with three gates..."),
        Riddle::new(
            "Convert this binary to text: 01000110 01010010 01000101 01000101",
            "FREE",
            "8 bits = 1 ASCII character",
        )
        .with_difficulty(Difficulty::Medium)
        .with_kind(RiddleKind::CodeChallenge)
        .with_stakes(15, 120)
        .with_context("Numbers dance before your eyes..."),
        Riddle::new(
            "I am the beginning of eternity, the end of time and space.\n\
             I am the beginning of every end, the end of every place. What am I?",
            "e",
            "Look at the first and last letters...",
        )
        .with_difficulty(Difficulty::Deadly)
        .with_stakes(25, 200)
        .with_context("The final test. Your destiny hangs in the balance..."),
    ]
}
