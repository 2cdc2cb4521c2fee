//! Per-chat navigation state kept in the dialogue storage.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::problem_flow::ProblemStep;

/// The menu screen currently shown to a chat
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationNode {
    #[default]
    RoomList,
    HostelZoneList,
    HostelBedList {
        zone: u8,
    },
    LocationActions {
        location: String,
    },
    CleaningTypePicker {
        location: String,
    },
    ProblemFlow {
        location: String,
        step: ProblemStep,
    },
}

impl NavigationNode {
    pub fn is_problem_flow(&self) -> bool {
        matches!(self, NavigationNode::ProblemFlow { .. })
    }
}

/// Session store handle: one `NavigationNode` per chat, in memory only
pub type SessionDialogue = Dialogue<NavigationNode, InMemStorage<NavigationNode>>;
