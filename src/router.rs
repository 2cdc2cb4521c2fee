//! # Navigation Router
//!
//! Pure transducer from (current node, incoming event) to the next node, the
//! reply to show and an optional side effect for the engine to carry out.
//!
//! An action is accepted only if the current node renders it. `NoOp` is valid
//! everywhere, `GoBack` also on the room list, and the "To rooms" button of a
//! completion message only on the room list it led to. Buttons from outdated
//! messages are therefore answered with an "unrecognized command" reply and
//! leave the session untouched.

use chrono::{DateTime, Local};

use crate::action::{Action, LocationActionKind};
use crate::catalog::{Catalog, LocationKind};
use crate::dialogue::NavigationNode;
use crate::localization::{t_args_lang, t_lang};
use crate::menu::{self, location_label, MenuOption};
use crate::problem_flow::{self, ProblemStep, RepromptReason, StepInput, StepOutcome};
use crate::report::{format_timestamp, CleaningRecord, ReportRecord, Reporter};

/// What the user did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Start,
    Help,
    Cancel,
    Action(Action),
    /// Callback data that failed to decode
    Malformed(String),
    Text(String),
    Photo(String),
    Unsupported,
}

/// An input together with who sent it and when
#[derive(Debug, Clone)]
pub struct Event {
    pub reporter: Reporter,
    pub language_code: Option<String>,
    pub received_at: DateTime<Local>,
    pub input: Input,
}

impl Event {
    pub fn new(reporter: Reporter, language_code: Option<String>, input: Input) -> Self {
        Self {
            reporter,
            language_code,
            received_at: Local::now(),
            input,
        }
    }

    pub fn lang(&self) -> Option<&str> {
        self.language_code.as_deref()
    }
}

/// Message text plus buttons to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub options: Vec<MenuOption>,
}

/// Work the engine performs after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SubmitReport(ReportRecord),
    CleaningLogged(CleaningRecord),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub next: NavigationNode,
    pub reply: Option<Reply>,
    pub effect: Option<Effect>,
}

impl Transition {
    fn to(next: NavigationNode, reply: Reply) -> Self {
        Self {
            next,
            reply: Some(reply),
            effect: None,
        }
    }
}

/// Title and buttons of `node`, optionally preceded by a notice
pub fn screen(catalog: &Catalog, node: &NavigationNode, notice: Option<&str>, lang: Option<&str>) -> Reply {
    let title = menu::title(catalog, node, lang);
    let text = match notice {
        Some(notice) => format!("{notice}\n\n{title}"),
        None => title,
    };
    Reply {
        text,
        options: menu::render(catalog, node, lang),
    }
}

/// Whether `action` may be taken from `node`
pub fn is_legal(catalog: &Catalog, node: &NavigationNode, action: &Action) -> bool {
    let rendered = || {
        menu::render(catalog, node, None)
            .iter()
            .any(|option| &option.action == action)
    };

    match action {
        Action::NoOp => true,
        // Back on the room list redraws it
        Action::GoBack => *node == NavigationNode::RoomList || rendered(),
        // Completion messages are only answered from the room list they lead to
        Action::ToRooms => *node == NavigationNode::RoomList,
        _ => rendered(),
    }
}

/// Node shown when pressing "Back" in `node`
pub fn parent(catalog: &Catalog, node: &NavigationNode) -> NavigationNode {
    match node {
        NavigationNode::RoomList | NavigationNode::HostelZoneList => NavigationNode::RoomList,
        NavigationNode::HostelBedList { .. } => NavigationNode::HostelZoneList,
        NavigationNode::LocationActions { location } => {
            match catalog.get(location).map(|l| &l.kind) {
                Some(LocationKind::Bed { zone }) => NavigationNode::HostelBedList { zone: *zone },
                Some(LocationKind::CommonZone) => NavigationNode::HostelZoneList,
                Some(LocationKind::Room) | None => NavigationNode::RoomList,
            }
        }
        NavigationNode::CleaningTypePicker { location }
        | NavigationNode::ProblemFlow { location, .. } => NavigationNode::LocationActions {
            location: location.clone(),
        },
    }
}

/// Compute the next node, the reply and the side effect for `event`
pub fn transition(catalog: &Catalog, node: &NavigationNode, event: &Event) -> Transition {
    let lang = event.lang();
    let stay = |notice: String| {
        Transition::to(
            node.clone(),
            screen(catalog, node, Some(notice.as_str()), lang),
        )
    };

    match &event.input {
        Input::Start => Transition::to(
            NavigationNode::RoomList,
            Reply {
                text: t_lang("welcome", lang),
                options: menu::render(catalog, &NavigationNode::RoomList, lang),
            },
        ),
        Input::Help => stay(t_lang("help", lang)),
        Input::Cancel => {
            let key = if node.is_problem_flow() {
                "cancelled"
            } else {
                "nothing-to-cancel"
            };
            Transition::to(
                NavigationNode::RoomList,
                Reply {
                    text: t_lang(key, lang),
                    options: menu::render(catalog, &NavigationNode::RoomList, lang),
                },
            )
        }
        Input::Malformed(_) => stay(t_lang("unrecognized-command", lang)),
        Input::Unsupported => stay(t_lang("unsupported-message", lang)),
        Input::Action(action) if !is_legal(catalog, node, action) => {
            stay(t_lang("unrecognized-command", lang))
        }
        Input::Action(action) => match (action, node) {
            (Action::SubLocation(sub), NavigationNode::ProblemFlow { location, step }) => {
                route_step(catalog, location, step, StepInput::SubLocation(*sub), event)
            }
            _ => route_action(catalog, node, action, event),
        },
        Input::Text(text) => match node {
            NavigationNode::ProblemFlow { location, step } => {
                route_step(catalog, location, step, StepInput::Text(text), event)
            }
            _ => stay(t_lang("use-buttons", lang)),
        },
        Input::Photo(file_id) => match node {
            NavigationNode::ProblemFlow { location, step } => {
                route_step(catalog, location, step, StepInput::Photo(file_id), event)
            }
            _ => stay(t_lang("use-buttons", lang)),
        },
    }
}

fn route_action(catalog: &Catalog, node: &NavigationNode, action: &Action, event: &Event) -> Transition {
    let lang = event.lang();
    let go = |next: NavigationNode| {
        let reply = screen(catalog, &next, None, lang);
        Transition::to(next, reply)
    };

    match action {
        // Sub-locations are fed to the form by `transition`
        Action::NoOp | Action::SubLocation(_) => Transition {
            next: node.clone(),
            reply: None,
            effect: None,
        },
        Action::GoBack => go(parent(catalog, node)),
        Action::ToRooms => go(NavigationNode::RoomList),
        Action::OpenHostel => go(NavigationNode::HostelZoneList),
        Action::SelectHostelZone(zone) => go(NavigationNode::HostelBedList { zone: *zone }),
        Action::SelectRoom(id) | Action::SelectBed(id) | Action::SelectCommonZone(id) => {
            go(NavigationNode::LocationActions {
                location: id.clone(),
            })
        }
        Action::LocationAction(LocationActionKind::Clean, id) => {
            go(NavigationNode::CleaningTypePicker {
                location: id.clone(),
            })
        }
        // Always a fresh form: whatever was typed before is gone
        Action::LocationAction(LocationActionKind::Report, id) => go(NavigationNode::ProblemFlow {
            location: id.clone(),
            step: ProblemStep::AwaitingDescription,
        }),
        Action::CleaningType(kind, id) => {
            let record = CleaningRecord {
                timestamp: event.received_at,
                reporter: event.reporter.clone(),
                location: id.clone(),
                kind: *kind,
            };
            let text = t_args_lang(
                "cleaning-complete",
                &[
                    ("location", location_label(catalog, id, lang)),
                    ("kind", menu::cleaning_kind_label(*kind, lang).as_str()),
                    ("time", format_timestamp(&record.timestamp).as_str()),
                    ("user", event.reporter.display().as_str()),
                ],
                lang,
            );
            Transition {
                next: NavigationNode::RoomList,
                reply: Some(done_reply(text, lang)),
                effect: Some(Effect::CleaningLogged(record)),
            }
        }
    }
}

fn route_step(
    catalog: &Catalog,
    location: &str,
    step: &ProblemStep,
    input: StepInput<'_>,
    event: &Event,
) -> Transition {
    let lang = event.lang();
    let current = NavigationNode::ProblemFlow {
        location: location.to_string(),
        step: step.clone(),
    };

    match problem_flow::advance(step, input) {
        StepOutcome::Advance(step) => {
            let next = NavigationNode::ProblemFlow {
                location: location.to_string(),
                step,
            };
            let reply = screen(catalog, &next, None, lang);
            Transition::to(next, reply)
        }
        StepOutcome::Complete(draft) => {
            let record = draft.into_record(location, &event.reporter, event.received_at);
            let text = t_args_lang(
                "problem-reported",
                &[
                    ("location", location_label(catalog, location, lang)),
                    ("time", format_timestamp(&record.timestamp).as_str()),
                    ("user", event.reporter.display().as_str()),
                ],
                lang,
            );
            Transition {
                next: NavigationNode::RoomList,
                reply: Some(done_reply(text, lang)),
                effect: Some(Effect::SubmitReport(record)),
            }
        }
        StepOutcome::Reprompt(reason) => {
            let reply = match reason {
                RepromptReason::EmptyDescription => Reply {
                    text: t_lang("description-empty", lang),
                    options: menu::render(catalog, &current, lang),
                },
                RepromptReason::DescriptionTooLong => Reply {
                    text: t_lang("description-too-long", lang),
                    options: menu::render(catalog, &current, lang),
                },
                RepromptReason::EmptyText | RepromptReason::ExpectedPhotoOrText => Reply {
                    text: t_lang("photo-text-empty", lang),
                    options: menu::render(catalog, &current, lang),
                },
                RepromptReason::ExpectedDescription => Reply {
                    text: t_lang("description-expected", lang),
                    options: menu::render(catalog, &current, lang),
                },
                RepromptReason::ExpectedSubLocation => {
                    screen(catalog, &current, Some(t_lang("use-buttons", lang).as_str()), lang)
                }
            };
            Transition::to(current, reply)
        }
    }
}

/// Completion message with a single button leading back to the room list
fn done_reply(text: String, lang: Option<&str>) -> Reply {
    Reply {
        text,
        options: vec![MenuOption::new(t_lang("to-rooms", lang), Action::ToRooms)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_parent_depends_on_location_kind() {
        let catalog = catalog();
        let actions = |id: &str| NavigationNode::LocationActions {
            location: id.to_string(),
        };
        assert_eq!(parent(&catalog, &actions("101")), NavigationNode::RoomList);
        assert_eq!(
            parent(&catalog, &actions("M6")),
            NavigationNode::HostelBedList { zone: 2 }
        );
        assert_eq!(parent(&catalog, &actions("lounge")), NavigationNode::HostelZoneList);
    }

    #[test]
    fn test_back_only_where_shown() {
        let catalog = catalog();
        let picker = NavigationNode::CleaningTypePicker {
            location: "101".into(),
        };
        assert!(!is_legal(&catalog, &picker, &Action::GoBack));
        assert!(is_legal(&catalog, &picker, &Action::NoOp));
        assert!(!is_legal(&catalog, &picker, &Action::SelectRoom("101".into())));

        assert!(is_legal(&catalog, &NavigationNode::RoomList, &Action::GoBack));
        assert!(is_legal(&catalog, &NavigationNode::HostelZoneList, &Action::GoBack));
    }

    #[test]
    fn test_to_rooms_only_from_room_list() {
        let catalog = catalog();
        assert!(is_legal(&catalog, &NavigationNode::RoomList, &Action::ToRooms));
        assert!(!is_legal(
            &catalog,
            &NavigationNode::HostelBedList { zone: 1 },
            &Action::ToRooms
        ));
        assert!(!is_legal(
            &catalog,
            &NavigationNode::ProblemFlow {
                location: "205".into(),
                step: ProblemStep::AwaitingDescription,
            },
            &Action::ToRooms
        ));
    }

    #[test]
    fn test_room_from_other_list_is_not_legal() {
        let catalog = catalog();
        assert!(!is_legal(
            &catalog,
            &NavigationNode::HostelZoneList,
            &Action::SelectRoom("101".into())
        ));
        assert!(is_legal(
            &catalog,
            &NavigationNode::HostelZoneList,
            &Action::SelectCommonZone("kitchen".into())
        ));
    }
}
