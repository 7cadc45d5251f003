//! Branching narrative: nodes with choices, embedded riddles and endings.
//!
//! The graph owns every node and the riddle pool; nodes refer to riddles by
//! index. Moving through the graph queues [`StoryEvent`]s that the session
//! drains after each call.

use crate::riddle::{riddle_pool, Riddle};

pub type NodeId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ending {
    #[default]
    None,
    TrueFreedom,
    TheDeal,
    PartialEscape,
    TheLoop,
    DeathsEmbrace,
}

impl Ending {
    pub fn description(self) -> &'static str {
        match self {
            Ending::TrueFreedom => {
                "TRUE FREEDOM\n\nYou outsmarted Death itself. Through wit, courage, and determination, \
                 you've achieved what few mortals ever do - true escape from the Game Master's realm. \
                 You return to life, forever changed but truly free."
            }
            Ending::TheDeal => {
                "THE DEAL\n\nYou've chosen power over freedom. As the Game Master's apprentice, \
                 you gain immortality and knowledge beyond mortal comprehension. \
                 But at what cost? You'll spend eternity testing other souls, becoming what you once feared."
            }
            Ending::PartialEscape => {
                "PARTIAL ESCAPE\n\nYou've escaped, but not without sacrifice. \
                 Part of you remains forever bound to the Game Master's realm. \
                 You're free, but you'll always feel the shadow watching."
            }
            Ending::TheLoop => {
                "THE LOOP\n\nYou've fallen into the Game Master's trap. \
                 Everything resets. You'll wake up again in the void, \
                 memories hazy, doomed to repeat this cycle until you find the true path."
            }
            Ending::DeathsEmbrace => {
                "DEATH'S EMBRACE\n\nYour health depleted, your will broken. \
                 The Game Master claims your soul. You become another lost spirit \
                 trapped in the void, a warning to future challengers."
            }
            Ending::None => "Unknown ending...",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoryNode {
    pub id: NodeId,
    pub narrative: String,
    pub game_master_line: String,
    /// Index-aligned with `next_node_ids` whenever non-empty.
    pub choices: Vec<String>,
    /// Riddle and pass-through nodes carry exactly one successor and no choices.
    pub next_node_ids: Vec<NodeId>,
    pub riddle: Option<usize>,
    /// Applied by the session when this node is left through a choice.
    pub health_delta: i32,
    pub is_ending: bool,
    pub ending: Ending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StoryEvent {
    NarrativeChanged(String),
    Progressed(NodeId),
    ChoicesAvailable(Vec<String>),
    EndingReached(Ending),
}

#[derive(Debug)]
pub struct StoryGraph {
    nodes: Vec<StoryNode>,
    riddles: Vec<Riddle>,
    current: NodeId,
    visited: Vec<NodeId>,
    ended: bool,
    ending: Ending,
    events: Vec<StoryEvent>,
}

impl StoryGraph {
    /// The authored graph over the shared riddle pool.
    pub fn new() -> Self {
        Self::from_parts(authored_nodes(), riddle_pool())
    }

    /// `nodes[i].id` must equal `i`.
    pub fn from_parts(nodes: Vec<StoryNode>, riddles: Vec<Riddle>) -> Self {
        debug_assert!(nodes.iter().enumerate().all(|(i, n)| n.id as usize == i));
        Self {
            nodes,
            riddles,
            current: 0,
            visited: Vec::new(),
            ended: false,
            ending: Ending::None,
            events: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.current = 0;
        self.visited.clear();
        self.ended = false;
        self.ending = Ending::None;
        self.go_to_node(0);
    }

    pub fn current_node_id(&self) -> NodeId {
        self.current
    }

    pub fn current_node(&self) -> Option<&StoryNode> {
        self.node(self.current)
    }

    pub fn node(&self, id: NodeId) -> Option<&StoryNode> {
        self.nodes.get(id as usize)
    }

    pub fn visited(&self) -> &[NodeId] {
        &self.visited
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn ending(&self) -> Ending {
        self.ending
    }

    pub fn riddle(&self, index: usize) -> Option<&Riddle> {
        self.riddles.get(index)
    }

    pub fn riddle_count(&self) -> usize {
        self.riddles.len()
    }

    /// Out-of-range indices are ignored and leave the history untouched.
    pub fn make_choice(&mut self, index: usize) {
        let Some(next) = self
            .current_node()
            .and_then(|node| node.next_node_ids.get(index).copied())
        else {
            return;
        };
        self.go_to_node(next);
    }

    pub fn go_to_node(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get(id as usize) else {
            log::warn!("Story node {id} does not exist");
            return;
        };

        self.current = id;
        self.visited.push(id);
        self.events.push(StoryEvent::NarrativeChanged(node.narrative.clone()));
        self.events.push(StoryEvent::Progressed(id));

        if node.is_ending {
            self.ended = true;
            self.ending = node.ending;
            self.events.push(StoryEvent::EndingReached(node.ending));
        } else if !node.choices.is_empty() {
            self.events
                .push(StoryEvent::ChoicesAvailable(node.choices.clone()));
        }
    }

    pub fn has_riddle(&self) -> bool {
        self.current_node().is_some_and(|n| n.riddle.is_some())
    }

    pub fn current_riddle(&self) -> Option<&Riddle> {
        self.current_node()
            .and_then(|n| n.riddle)
            .and_then(|i| self.riddles.get(i))
    }

    /// On success the graph follows the node's first successor. Failure leaves
    /// the graph where it is so the player can retry.
    pub fn solve_riddle(&mut self, success: bool) {
        let Some(node) = self.current_node() else {
            return;
        };
        if node.riddle.is_none() || !success {
            return;
        }
        if let Some(&next) = node.next_node_ids.first() {
            self.go_to_node(next);
        }
    }

    /// Restore a saved position without announcing anything. Unknown ids are
    /// dropped from the history; an unknown current id is rejected.
    pub fn restore_position(&mut self, current: NodeId, visited: &[NodeId]) -> Result<(), String> {
        let Some(node) = self.node(current) else {
            return Err(format!("Story node {current} does not exist"));
        };
        let (ended, ending) = (node.is_ending, node.ending);
        self.visited = visited
            .iter()
            .copied()
            .filter(|id| (*id as usize) < self.nodes.len())
            .collect();
        self.current = current;
        self.ended = ended;
        self.ending = if ended { ending } else { Ending::None };
        Ok(())
    }

    pub fn drain_events(&mut self) -> Vec<StoryEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for StoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

struct NodeDef<'a> {
    id: NodeId,
    narrative: &'a str,
    line: &'a str,
    choices: &'a [&'a str],
    next: &'a [NodeId],
    riddle: Option<usize>,
    health_delta: i32,
    ending: Ending,
}

impl NodeDef<'_> {
    fn build(self) -> StoryNode {
        StoryNode {
            id: self.id,
            narrative: self.narrative.to_string(),
            game_master_line: self.line.to_string(),
            choices: self.choices.iter().map(|c| c.to_string()).collect(),
            next_node_ids: self.next.to_vec(),
            riddle: self.riddle,
            health_delta: self.health_delta,
            is_ending: self.ending != Ending::None,
            ending: self.ending,
        }
    }
}

fn authored_nodes() -> Vec<StoryNode> {
    let defs = [
        NodeDef {
            id: 0,
            narrative: "You awaken in an endless void, surrounded by swirling shadows.\n\n\
                        A figure materializes before you - tall, cloaked in darkness, with eyes that pierce through your soul.",
            line: "Welcome, mortal. I am the Game Master, and you are now mine.\n\n\
                   Your previous life? A distant memory. Your future? That depends on your wit.\n\n\
                   Solve my riddles, and perhaps you'll earn your freedom... or something else entirely.",
            choices: &["I'll play your game", "Let me go!", "Who are you really?"],
            next: &[1, 1, 2],
            riddle: None,
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 1,
            narrative: "The Game Master's lips curl into a sinister smile.",
            line: "Good. Let's see if you're as clever as you think.\n\n\
                   Here's your first riddle. Fail, and you'll feel pain. Succeed, and we continue.",
            choices: &[],
            next: &[3],
            riddle: Some(0),
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 2,
            narrative: "The Game Master laughs, a sound that echoes through infinity.",
            line: "You dare question me? Such spirit... or foolishness.\n\n\
                   Very well, let me show you the rules here.",
            choices: &[],
            next: &[1],
            riddle: None,
            health_delta: -10,
            ending: Ending::None,
        },
        NodeDef {
            id: 3,
            narrative: "The void shifts around you. You sense you're being tested for something greater.",
            line: "Impressive. But that was merely a warmup.\n\n\
                   Let me show you what real challenges look like.",
            choices: &["Bring it on", "Can we talk about this?"],
            next: &[4, 5],
            riddle: None,
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 4,
            narrative: "The Game Master nods approvingly.",
            line: "Courage. I respect that. Here's a coded message - decrypt it if you can.",
            choices: &[],
            next: &[6],
            riddle: Some(1),
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 5,
            narrative: "The shadows around you tighten.",
            line: "Talk? There is no negotiation here, only survival.\n\n\
                   Though... if you prove yourself, perhaps we can make a deal.",
            choices: &["Fine, give me the next riddle", "A deal? Tell me more"],
            next: &[4, 10],
            riddle: None,
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 6,
            narrative: "The message was clear: 'THIS IS NOT FREE'. Your escape won't be easy.",
            line: "You're sharper than most. Now for a true test of logic.",
            choices: &[],
            next: &[7],
            riddle: Some(2),
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 7,
            narrative: "The Game Master seems impressed, yet conflicted.",
            line: "You've proven yourself worthy. Few make it this far.\n\n\
                   I offer you a choice: Continue fighting for freedom, or join me. \
                   Become my apprentice and share in eternal power.",
            choices: &[
                "I want freedom, nothing else",
                "Tell me about this power",
                "I'll keep solving your riddles",
            ],
            next: &[8, 11, 8],
            riddle: None,
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 8,
            narrative: "The Game Master's expression darkens.",
            line: "So be it. Let's see if you can decode your way out.",
            choices: &[],
            next: &[9],
            riddle: Some(3),
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 9,
            narrative: "Light begins to pierce through the darkness. Freedom is close...",
            line: "One final riddle. Answer correctly, and you're truly free.\n\n\
                   Fail, and you stay here forever.",
            choices: &[],
            next: &[12],
            riddle: Some(4),
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 10,
            narrative: "The Game Master extends a shadowy hand.",
            line: "As my apprentice, you'll have power over other souls, immortality, \
                   and knowledge beyond mortal comprehension.\n\n\
                   But you'll serve me for eternity. Do you accept?",
            choices: &["I accept", "No, I choose freedom"],
            next: &[13, 8],
            riddle: None,
            health_delta: 0,
            ending: Ending::None,
        },
        NodeDef {
            id: 11,
            narrative: "The Game Master's eyes gleam with dark satisfaction.",
            line: "Power eternal, knowledge infinite. You could be my successor one day.\n\n\
                   But first, you must prove absolute loyalty.",
            choices: &["Show me", "Actually, I want freedom"],
            next: &[10, 8],
            riddle: None,
            health_delta: 10,
            ending: Ending::None,
        },
        NodeDef {
            id: 12,
            narrative: "The letter 'E'. The beginning and end of everything.\n\n\
                        Brilliant light floods the void. The Game Master fades away, defeated by your wit.",
            line: "You... you've actually done it. Go, then. You've earned your freedom.\n\n\
                   But remember - few escape Death itself. You are truly exceptional.",
            choices: &[],
            next: &[],
            riddle: None,
            health_delta: 0,
            ending: Ending::TrueFreedom,
        },
        NodeDef {
            id: 13,
            narrative: "Your hand touches the Game Master's. Power surges through you, dark and intoxicating.",
            line: "Welcome, my apprentice. Your mortal life ends, but your immortal one begins.\n\n\
                   Together, we shall test countless souls...",
            choices: &[],
            next: &[],
            riddle: None,
            health_delta: 0,
            ending: Ending::TheDeal,
        },
    ];
    defs.into_iter().map(NodeDef::build).collect()
}
