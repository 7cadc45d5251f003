//! Top-level session: which screen is up, plus the player, story and game
//! master that every screen shares.
//!
//! Riddles reach the session from two places, the story graph and enemy
//! contact in a level. Both go through [`Session::submit_answer`]; the
//! [`RiddleSource`] only decides which rewards and penalties apply and where
//! play resumes afterwards.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::game_master::{GameMaster, Mood};
use crate::player::Player;
use crate::riddle::Riddle;
use crate::story::{Ending, StoryEvent, StoryGraph};

const NO_HINTS_NOTICE: &str = "No hints remaining!";
const HINT_LINE: &str = "A hint... but it costs you.";
const DEATH_LINE: &str = "Your life force has faded. You are mine now...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Menu,
    Intro,
    Playing,
    RiddleActive,
    Dialogue,
    GameOver,
    Ending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiddleSource {
    /// The riddle on the current story node.
    Story,
    /// An enemy in the current level, by index into its enemy list.
    Enemy(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveRiddle {
    source: RiddleSource,
    /// Index into the shared riddle pool.
    riddle: usize,
}

/// What a UI needs to show an open riddle.
#[derive(Debug, Clone, PartialEq)]
pub struct RiddlePrompt {
    pub source: RiddleSource,
    pub question: String,
    pub choices: Vec<String>,
    pub context: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiddleOutcome {
    pub source: RiddleSource,
    pub correct: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StateChanged(SessionState),
    GameStarted,
    Narrative(String),
    ChoicesAvailable(Vec<String>),
    GameMasterSpeaks(String),
    RiddlePresented(RiddlePrompt),
    RiddleResult { correct: bool, feedback: String },
    Hint(String),
    GameOver(Ending),
}

#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    state: SessionState,
    player: Player,
    story: StoryGraph,
    game_master: GameMaster,
    rng: StdRng,
    hints_remaining: i32,
    current_attempts: i32,
    paused: bool,
    active_riddle: Option<ActiveRiddle>,
    events: Vec<GameEvent>,
}

impl Session {
    /// Reaction lines come from an RNG seeded by `config.session.rng_seed`.
    pub fn new(config: GameConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.session.rng_seed);
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            config,
            state: SessionState::Menu,
            player: Player::new(config.physics),
            story: StoryGraph::new(),
            game_master: GameMaster::new(),
            rng,
            hints_remaining: config.session.initial_hints,
            current_attempts: 0,
            paused: false,
            active_riddle: None,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn story(&self) -> &StoryGraph {
        &self.story
    }

    pub fn game_master(&self) -> &GameMaster {
        &self.game_master
    }

    pub fn hints_remaining(&self) -> i32 {
        self.hints_remaining
    }

    /// Wrong answers given to the current story riddle run.
    pub fn current_attempts(&self) -> i32 {
        self.current_attempts
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Emits [`GameEvent::StateChanged`] only on an actual change.
    pub fn set_state(&mut self, state: SessionState) {
        if self.state == state {
            return;
        }
        log::debug!("Session state {:?} -> {:?}", self.state, state);
        self.state = state;
        self.events.push(GameEvent::StateChanged(state));
    }

    pub fn start_new_game(&mut self) {
        self.player.reset();
        self.hints_remaining = self.config.session.initial_hints;
        self.current_attempts = 0;
        self.paused = false;
        self.active_riddle = None;
        self.game_master = GameMaster::new();

        self.story.start();
        self.pump_story_events();
        self.set_state(SessionState::Dialogue);

        if let Some(line) = self.story.current_node().map(|n| n.game_master_line.clone()) {
            self.speak(&line);
        }
        log::info!("New game started for {}", self.player.name);
        self.events.push(GameEvent::GameStarted);
    }

    /// Back to free play. A story riddle left open stays on its node and is
    /// presented again on the next choice there.
    pub fn continue_game(&mut self) {
        self.active_riddle = None;
        self.set_state(SessionState::Playing);
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn end_game(&mut self) {
        self.active_riddle = None;
        self.set_state(SessionState::Menu);
    }

    /// Pick a choice on the current node. Only honored in Dialogue or Playing.
    ///
    /// A node that carries a riddle is never left through a choice: choosing on
    /// it presents the riddle instead, so reaching one via a solved riddle
    /// cannot skip it.
    pub fn process_choice(&mut self, index: usize) {
        if !matches!(self.state, SessionState::Dialogue | SessionState::Playing) {
            return;
        }
        let Some(node) = self.story.current_node() else {
            return;
        };
        if node.riddle.is_some() {
            self.present_story_riddle();
            return;
        }
        let health_delta = node.health_delta;
        let line = node.game_master_line.clone();

        self.apply_health_delta(health_delta);
        self.speak(&line);

        self.story.make_choice(index);
        self.pump_story_events();

        if self.story.has_riddle() {
            self.present_story_riddle();
        } else {
            self.set_state(SessionState::Dialogue);
        }

        if !self.player.is_alive() {
            self.on_player_died();
        } else if self.story.is_ended() {
            self.on_story_ending(self.story.ending());
        }
    }

    /// Open an enemy's riddle. Refused unless playing with no riddle open, or
    /// when `riddle` is not in the pool.
    pub fn open_enemy_riddle(&mut self, enemy: usize, riddle: usize) -> bool {
        if self.state != SessionState::Playing || self.active_riddle.is_some() {
            return false;
        }
        if self.story.riddle(riddle).is_none() {
            log::warn!("Enemy {enemy} references unknown riddle {riddle}");
            return false;
        }
        self.active_riddle = Some(ActiveRiddle {
            source: RiddleSource::Enemy(enemy),
            riddle,
        });
        self.set_state(SessionState::RiddleActive);
        if let Some(prompt) = self.riddle_prompt() {
            self.events.push(GameEvent::RiddlePresented(prompt));
        }
        true
    }

    pub fn riddle_prompt(&self) -> Option<RiddlePrompt> {
        let active = self.active_riddle?;
        let riddle = self.story.riddle(active.riddle)?;
        Some(RiddlePrompt {
            source: active.source,
            question: riddle.question.clone(),
            choices: riddle.choices.clone(),
            context: riddle.story_context.clone(),
        })
    }

    pub fn active_source(&self) -> Option<RiddleSource> {
        self.active_riddle.map(|a| a.source)
    }

    /// Answer the open riddle. Returns `None` outside RiddleActive.
    pub fn submit_answer(&mut self, answer: &str) -> Option<RiddleOutcome> {
        if self.state != SessionState::RiddleActive {
            return None;
        }
        let active = self.active_riddle?;
        let riddle = self.story.riddle(active.riddle)?;
        let correct = riddle.check_answer_case_insensitive(answer);
        let (reward, damage) = self.stakes(active.source, riddle);

        log::info!(
            "Riddle {} answered {} ({:?})",
            active.riddle,
            if correct { "correctly" } else { "incorrectly" },
            active.source
        );

        match (active.source, correct) {
            (RiddleSource::Story, true) => {
                self.player.add_score(reward);
                self.player.record_riddle_solved();
                self.current_attempts = 0;
                let feedback = self.game_master.react_to_correct_answer(&mut self.rng);
                self.push_result(true, feedback);

                self.active_riddle = None;
                self.story.solve_riddle(true);
                self.pump_story_events();
                if self.story.is_ended() {
                    self.on_story_ending(self.story.ending());
                } else {
                    self.set_state(SessionState::Dialogue);
                }
            }
            (RiddleSource::Story, false) => {
                self.current_attempts += 1;
                self.damage_player(damage);
                self.player.record_failed_attempt();
                let feedback = self.game_master.react_to_wrong_answer(&mut self.rng);
                self.push_result(false, feedback);
                if !self.player.is_alive() {
                    self.on_player_died();
                }
            }
            (RiddleSource::Enemy(_), true) => {
                self.player.add_score(reward);
                self.heal_player(self.config.combat.enemy_riddle_heal);
                self.player.record_riddle_solved();
                let feedback = self.game_master.react_to_correct_answer(&mut self.rng);
                self.push_result(true, feedback);
                self.close_enemy_riddle();
            }
            (RiddleSource::Enemy(_), false) => {
                self.damage_player(damage);
                self.player.record_failed_attempt();
                let feedback = self.game_master.react_to_wrong_answer(&mut self.rng);
                self.push_result(false, feedback);
                self.close_enemy_riddle();
            }
        }

        Some(RiddleOutcome {
            source: active.source,
            correct,
        })
    }

    /// Dismiss an enemy riddle without answering. Story riddles cannot be
    /// dismissed.
    pub fn cancel_riddle(&mut self) -> Option<RiddleSource> {
        let active = self.active_riddle?;
        if self.state != SessionState::RiddleActive || active.source == RiddleSource::Story {
            return None;
        }
        self.close_enemy_riddle();
        Some(active.source)
    }

    /// Spend a hint on the open riddle. Returns the text shown to the player,
    /// which is a notice once the budget is spent.
    pub fn request_hint(&mut self) -> Option<String> {
        if self.hints_remaining <= 0 {
            self.events.push(GameEvent::Hint(NO_HINTS_NOTICE.to_string()));
            return Some(NO_HINTS_NOTICE.to_string());
        }
        let active = self.active_riddle?;
        let hint = self.story.riddle(active.riddle)?.hint.clone();

        self.hints_remaining -= 1;
        self.damage_player(self.config.session.hint_health_cost);
        self.events.push(GameEvent::Hint(hint.clone()));
        self.speak(HINT_LINE);
        self.game_master.set_mood(Mood::Amused);

        if !self.player.is_alive() {
            match active.source {
                RiddleSource::Story => self.on_player_died(),
                // The level's own death handling takes over.
                RiddleSource::Enemy(_) => self.close_enemy_riddle(),
            }
        }
        Some(hint)
    }

    /// Call after health changed outside the session, e.g. from level hazards.
    pub fn notice_health_change(&mut self, before: i32) {
        if self.player.health() == before {
            return;
        }
        let health = self.player.health();
        let ratio = health as f32 / self.player.max_health().max(1) as f32;
        let line = if ratio <= 0.25 && health > 0 {
            Some(self.game_master.react_to_low_health(&mut self.rng))
        } else if ratio >= 0.9 && self.player.riddles_solved() > 2 {
            Some(self.game_master.react_to_high_score(&mut self.rng))
        } else {
            None
        };
        if let Some(line) = line {
            self.speak(line);
        }
    }

    pub(crate) fn set_hints_remaining(&mut self, hints: i32) {
        self.hints_remaining = hints.max(0);
    }

    /// Place the story at a saved node without announcing it, then enter the
    /// screen that node calls for.
    pub(crate) fn restore_story(&mut self, current: u32, visited: &[u32]) -> Result<(), String> {
        self.story.restore_position(current, visited)?;
        self.active_riddle = None;
        if self.story.is_ended() {
            self.set_state(SessionState::Ending);
        } else if self.story.has_riddle() {
            self.present_story_riddle();
        } else {
            self.set_state(SessionState::Dialogue);
        }
        Ok(())
    }

    fn stakes(&self, source: RiddleSource, riddle: &Riddle) -> (i32, i32) {
        match source {
            RiddleSource::Story => (riddle.reward_points, riddle.damage_on_failure),
            RiddleSource::Enemy(_) => (
                self.config.combat.enemy_riddle_reward,
                self.config.combat.enemy_riddle_damage,
            ),
        }
    }

    fn present_story_riddle(&mut self) {
        let Some(index) = self.story.current_node().and_then(|n| n.riddle) else {
            return;
        };
        self.active_riddle = Some(ActiveRiddle {
            source: RiddleSource::Story,
            riddle: index,
        });
        self.set_state(SessionState::RiddleActive);
        if let Some(context) = self.story.riddle(index).map(|r| r.story_context.clone()) {
            self.speak(&context);
        }
        if let Some(prompt) = self.riddle_prompt() {
            self.events.push(GameEvent::RiddlePresented(prompt));
        }
    }

    fn close_enemy_riddle(&mut self) {
        self.active_riddle = None;
        self.set_state(SessionState::Playing);
    }

    fn apply_health_delta(&mut self, delta: i32) {
        if delta > 0 {
            self.heal_player(delta);
        } else if delta < 0 {
            self.damage_player(-delta);
        }
    }

    fn damage_player(&mut self, amount: i32) {
        let before = self.player.health();
        self.player.take_damage(amount);
        self.notice_health_change(before);
    }

    fn heal_player(&mut self, amount: i32) {
        let before = self.player.health();
        self.player.heal(amount);
        self.notice_health_change(before);
    }

    fn speak(&mut self, line: &str) {
        self.game_master.set_dialogue(line);
        self.events.push(GameEvent::GameMasterSpeaks(line.to_string()));
    }

    fn push_result(&mut self, correct: bool, feedback: &str) {
        self.events.push(GameEvent::RiddleResult {
            correct,
            feedback: feedback.to_string(),
        });
    }

    fn on_player_died(&mut self) {
        self.active_riddle = None;
        self.set_state(SessionState::GameOver);
        self.speak(DEATH_LINE);
        self.game_master.set_mood(Mood::Satisfied);
        log::info!("Game over: {:?}", Ending::DeathsEmbrace);
        self.events.push(GameEvent::GameOver(Ending::DeathsEmbrace));
    }

    fn on_story_ending(&mut self, ending: Ending) {
        self.set_state(SessionState::Ending);
        let mood = match ending {
            Ending::TrueFreedom => Mood::Impressed,
            Ending::TheDeal => Mood::Satisfied,
            _ => Mood::Neutral,
        };
        self.game_master.set_mood(mood);
        log::info!("Story ended: {ending:?}");
        self.events.push(GameEvent::GameOver(ending));
    }

    fn pump_story_events(&mut self) {
        for event in self.story.drain_events() {
            match event {
                StoryEvent::NarrativeChanged(text) => self.events.push(GameEvent::Narrative(text)),
                StoryEvent::ChoicesAvailable(choices) => {
                    self.events.push(GameEvent::ChoicesAvailable(choices))
                }
                StoryEvent::Progressed(id) => log::debug!("Story at node {id}"),
                StoryEvent::EndingReached(ending) => log::debug!("Story reached {ending:?}"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_game() -> Session {
        let mut session = Session::new(GameConfig::default());
        session.start_new_game();
        session.drain_events();
        session
    }

    /// Node 0 -> node 1, which holds the keyboard riddle.
    fn at_first_riddle() -> Session {
        let mut session = new_game();
        session.process_choice(0);
        session.drain_events();
        session
    }

    #[test]
    fn new_game_opens_dialogue_at_entry_node() {
        let mut session = Session::new(GameConfig::default());
        session.start_new_game();
        assert_eq!(session.state(), SessionState::Dialogue);
        assert_eq!(session.story().current_node_id(), 0);
        assert_eq!(session.hints_remaining(), 3);
        assert!(session.game_master().dialogue().starts_with("Welcome, mortal."));
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::StateChanged(SessionState::Dialogue)));
        assert_eq!(events.last(), Some(&GameEvent::GameStarted));
    }

    #[test]
    fn first_choice_reaches_node_one_riddle() {
        let mut session = new_game();
        session.process_choice(0);
        assert_eq!(session.story().current_node_id(), 1);
        assert_eq!(session.state(), SessionState::RiddleActive);
        assert_eq!(session.active_source(), Some(RiddleSource::Story));
        let events = session.drain_events();
        assert!(events.contains(&GameEvent::Narrative(
            "The Game Master's lips curl into a sinister smile.".to_string()
        )));
        assert_eq!(
            session.game_master().dialogue(),
            "The Game Master tests your wit with a simple riddle..."
        );
    }

    #[test]
    fn invalid_choice_keeps_node_and_history() {
        let mut session = new_game();
        session.process_choice(7);
        assert_eq!(session.story().current_node_id(), 0);
        assert_eq!(session.story().visited(), &[0]);
        assert_eq!(session.state(), SessionState::Dialogue);
    }

    #[test]
    fn correct_answer_rewards_and_returns_to_dialogue() {
        let mut session = at_first_riddle();
        let outcome = session.submit_answer("  Keyboard ").expect("riddle open");
        assert!(outcome.correct);
        assert_eq!(session.player().score(), 50);
        assert_eq!(session.player().riddles_solved(), 1);
        assert_eq!(session.state(), SessionState::Dialogue);
        assert_eq!(session.story().current_node_id(), 3);
        assert_eq!(session.game_master().mood(), Mood::Impressed);
    }

    #[test]
    fn wrong_answer_costs_health_and_allows_retry() {
        let mut session = at_first_riddle();
        let outcome = session.submit_answer("piano").expect("riddle open");
        assert!(!outcome.correct);
        assert_eq!(session.player().health(), 90);
        assert_eq!(session.player().failed_attempts(), 1);
        assert_eq!(session.current_attempts(), 1);
        assert_eq!(session.state(), SessionState::RiddleActive);
        assert_eq!(session.story().current_node_id(), 1);
        assert_eq!(session.game_master().mood(), Mood::Angry);
    }

    #[test]
    fn fatal_wrong_answer_ends_in_game_over() {
        let mut session = at_first_riddle();
        for _ in 0..10 {
            session.submit_answer("nope");
        }
        assert_eq!(session.player().health(), 0);
        assert_eq!(session.state(), SessionState::GameOver);
        assert_eq!(session.game_master().dialogue(), DEATH_LINE);
        assert_eq!(session.game_master().mood(), Mood::Satisfied);
        assert!(session
            .drain_events()
            .contains(&GameEvent::GameOver(Ending::DeathsEmbrace)));
        // Further answers are ignored.
        assert!(session.submit_answer("keyboard").is_none());
    }

    #[test]
    fn submit_outside_riddle_is_ignored() {
        let mut session = new_game();
        assert!(session.submit_answer("keyboard").is_none());
        assert_eq!(session.player().score(), 0);
    }

    #[test]
    fn hints_cost_health_until_exhausted() {
        let mut session = at_first_riddle();
        for _ in 0..3 {
            let hint = session.request_hint().expect("hint");
            assert_eq!(hint, "It's something you're using right now...");
        }
        assert_eq!(session.hints_remaining(), 0);
        assert_eq!(session.player().health(), 85);
        assert_eq!(session.game_master().mood(), Mood::Amused);

        assert_eq!(session.request_hint().as_deref(), Some(NO_HINTS_NOTICE));
        assert_eq!(session.player().health(), 85);
    }

    #[test]
    fn hint_without_open_riddle_is_free() {
        let mut session = new_game();
        assert!(session.request_hint().is_none());
        assert_eq!(session.hints_remaining(), 3);
        assert_eq!(session.player().health(), 100);
    }

    #[test]
    fn node_health_delta_applies_when_leaving() {
        let mut session = new_game();
        // Node 0 -> node 2 ("Who are you really?"), then leave node 2 (-10).
        session.process_choice(2);
        assert_eq!(session.player().health(), 100);
        session.process_choice(0);
        assert_eq!(session.player().health(), 90);
        assert_eq!(session.story().current_node_id(), 1);
        assert_eq!(session.state(), SessionState::RiddleActive);
    }

    #[test]
    fn deal_path_reaches_ending() {
        let mut session = at_first_riddle();
        session.submit_answer("keyboard");
        session.process_choice(1); // node 3 -> 5
        session.process_choice(1); // node 5 -> 10
        session.process_choice(0); // node 10 -> 13
        assert!(session.story().is_ended());
        assert_eq!(session.state(), SessionState::Ending);
        assert_eq!(session.game_master().mood(), Mood::Satisfied);
        assert!(session
            .drain_events()
            .contains(&GameEvent::GameOver(Ending::TheDeal)));
    }

    #[test]
    fn solved_riddle_landing_on_riddle_node_cannot_be_skipped() {
        let mut session = at_first_riddle();
        session.submit_answer("keyboard");
        session.process_choice(0); // node 3 -> 4 (cipher)
        assert_eq!(session.state(), SessionState::RiddleActive);
        session.submit_answer("this is not free");
        assert_eq!(session.story().current_node_id(), 6);
        assert_eq!(session.state(), SessionState::Dialogue);

        session.process_choice(0);
        assert_eq!(session.story().current_node_id(), 6);
        assert_eq!(session.state(), SessionState::RiddleActive);
        let prompt = session.riddle_prompt().expect("gate riddle");
        assert!(prompt.question.starts_with("Three gates"));
        assert!(prompt.choices.is_empty());
    }

    #[test]
    fn enemy_riddle_success_heals_and_resumes() {
        let mut session = new_game();
        session.continue_game();
        session.player_mut().take_damage(50);
        assert!(session.open_enemy_riddle(2, 3));
        assert!(!session.open_enemy_riddle(0, 0));

        let outcome = session.submit_answer("free").expect("riddle open");
        assert_eq!(
            outcome,
            RiddleOutcome {
                source: RiddleSource::Enemy(2),
                correct: true
            }
        );
        assert_eq!(session.player().score(), 500);
        assert_eq!(session.player().health(), 75);
        assert_eq!(session.player().riddles_solved(), 1);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn enemy_riddle_failure_damages_and_resumes() {
        let mut session = new_game();
        session.continue_game();
        assert!(session.open_enemy_riddle(0, 0));
        let outcome = session.submit_answer("mouse").expect("riddle open");
        assert!(!outcome.correct);
        assert_eq!(session.player().health(), 75);
        assert_eq!(session.player().failed_attempts(), 1);
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn continuing_sets_a_pending_story_riddle_aside() {
        let mut session = at_first_riddle();
        session.continue_game();
        assert_eq!(session.state(), SessionState::Playing);
        assert!(session.riddle_prompt().is_none());
        assert!(session.open_enemy_riddle(0, 1));

        session.cancel_riddle();
        session.process_choice(0);
        assert_eq!(session.active_source(), Some(RiddleSource::Story));
        assert_eq!(session.story().current_node_id(), 1);
    }

    #[test]
    fn enemy_riddle_needs_playing_state_and_known_riddle() {
        let mut session = new_game();
        assert!(!session.open_enemy_riddle(0, 0));
        session.continue_game();
        assert!(!session.open_enemy_riddle(0, 99));
        assert_eq!(session.state(), SessionState::Playing);
    }

    #[test]
    fn cancel_only_closes_enemy_riddles() {
        let mut session = at_first_riddle();
        assert!(session.cancel_riddle().is_none());
        assert_eq!(session.state(), SessionState::RiddleActive);

        let mut session = new_game();
        session.continue_game();
        session.open_enemy_riddle(1, 1);
        assert_eq!(session.cancel_riddle(), Some(RiddleSource::Enemy(1)));
        assert_eq!(session.state(), SessionState::Playing);
        assert_eq!(session.player().health(), 100);
    }

    #[test]
    fn low_health_provokes_the_game_master() {
        let mut session = new_game();
        let before = session.player().health();
        session.player_mut().take_damage(80);
        session.notice_health_change(before);
        assert_eq!(session.game_master().mood(), Mood::Menacing);
    }

    #[test]
    fn set_state_reports_real_changes_only() {
        let mut session = Session::new(GameConfig::default());
        session.set_state(SessionState::Menu);
        assert!(session.drain_events().is_empty());
        session.set_state(SessionState::Intro);
        assert_eq!(
            session.drain_events(),
            vec![GameEvent::StateChanged(SessionState::Intro)]
        );
    }

    #[test]
    fn same_seed_same_dialogue() {
        let run = || {
            let mut session = at_first_riddle();
            for answer in ["a", "b", "keyboard"] {
                session.submit_answer(answer);
            }
            session.drain_events()
        };
        assert_eq!(run(), run());
    }
}
