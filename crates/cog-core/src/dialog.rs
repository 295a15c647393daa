//! Dialog nodes and choices.
//!
//! A character's conversation is a directed graph of [`DialogNode`]s joined by
//! player-choice-labeled edges. A choice without a `next` id ends the
//! conversation; cycles are permitted, since termination only requires
//! reaching such a choice.

use crate::effect::Effect;

/// One node in a character's dialog graph.
#[derive(Debug, Clone)]
pub struct DialogNode {
    /// Identity, unique within the owning character's graph.
    pub id: String,
    /// The line the character speaks at this node.
    pub text: String,
    /// Player response options, in display order.
    pub choices: Vec<DialogChoice>,
}

impl DialogNode {
    /// Create a node with no choices yet.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: DialogChoice) -> Self {
        self.choices.push(choice);
        self
    }
}

/// A single player response option in a dialog node.
#[derive(Debug, Clone)]
pub struct DialogChoice {
    /// The text the player sees.
    pub text: String,
    /// Node the conversation moves to. `None` ends the conversation.
    pub next: Option<String>,
    /// Directives applied when this choice is selected, in order.
    pub effects: Vec<Effect>,
}

impl DialogChoice {
    /// Create a conversation-ending choice with no effects.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next: None,
            effects: Vec::new(),
        }
    }

    /// Set the node this choice leads to.
    pub fn with_next(mut self, node_id: impl Into<String>) -> Self {
        self.next = Some(node_id.into());
        self
    }

    /// Add an effect.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}
