//! The dialog-walk state machine.
//!
//! A [`Conversation`] is a cursor over one character's dialog graph, starting
//! at the entry node. Choosing a reply applies the choice's effects in order,
//! then either advances the cursor or ends the conversation. Exiting is
//! always available to the caller and is not represented as a choice.

use cog_core::{Character, Effect};

use crate::error::{FictionError, FictionResult};
use crate::player::PlayerState;
use crate::view::DialogView;

/// A conversation in progress with one character.
#[derive(Debug, Clone)]
pub struct Conversation {
    node: String,
}

/// The result of choosing a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Codes granted by the choice's effects, in order of application.
    /// May repeat codes the player already knew; the known-code set
    /// deduplicates.
    pub learned: Vec<String>,
    /// Whether the chosen reply ended the conversation.
    pub ended: bool,
}

impl Conversation {
    /// Begin a conversation at the character's entry node.
    pub fn start(character: &Character) -> Self {
        Self {
            node: character.entry().to_string(),
        }
    }

    /// Id of the node the cursor is on.
    pub fn node_id(&self) -> &str {
        &self.node
    }

    /// The current node rendered as view data.
    pub fn view(&self, character: &Character) -> FictionResult<DialogView> {
        let node = character.node(&self.node)?;
        Ok(DialogView {
            speaker: character.name().to_string(),
            text: node.text.clone(),
            choices: node.choices.iter().map(|c| c.text.clone()).collect(),
        })
    }

    /// Choose a reply by its 1-based index.
    ///
    /// Applies every effect on the choice in order (only `gain` touches the
    /// player's known-code set; unrecognized directives are skipped), then
    /// advances to the choice's `next` node or ends the conversation.
    ///
    /// An out-of-range index fails with [`FictionError::OutOfRange`] and
    /// changes nothing; the caller should re-prompt. A `next` id missing from
    /// the graph is a content bug and surfaces as the fatal tier, though
    /// construction-time validation makes that unreachable for loaded
    /// content.
    pub fn choose(
        &mut self,
        character: &Character,
        index: usize,
        player: &mut PlayerState,
    ) -> FictionResult<Exchange> {
        let node = character.node(&self.node)?;
        let choice = index
            .checked_sub(1)
            .and_then(|i| node.choices.get(i))
            .ok_or(FictionError::OutOfRange {
                index,
                len: node.choices.len(),
            })?;

        let mut learned = Vec::new();
        for effect in &choice.effects {
            match effect {
                Effect::Gain { code } => {
                    player.learn(code.clone());
                    learned.push(code.clone());
                }
                Effect::Unknown { .. } => {}
            }
        }

        match &choice.next {
            Some(next) => {
                // Resolve before moving the cursor so a dangling edge
                // surfaces here, not on the next render.
                character.node(next)?;
                self.node = next.clone();
                Ok(Exchange { learned, ended: false })
            }
            None => Ok(Exchange { learned, ended: true }),
        }
    }
}
