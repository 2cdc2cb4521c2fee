//! Menu rendering: which buttons a navigation node shows, in which order.
//!
//! Rendering is pure and deterministic. The router also uses it to decide
//! which actions are legal in the current node.

use crate::action::{Action, CleaningKind, LocationActionKind, SubLocation};
use crate::catalog::Catalog;
use crate::dialogue::NavigationNode;
use crate::localization::{get_localization_manager, t_args_lang, t_lang};
use crate::problem_flow::ProblemStep;

/// Label of the filler button padding the bed grid
pub const FILLER_LABEL: &str = "·";

/// One selectable button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    pub label: String,
    pub action: Action,
}

impl MenuOption {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

pub fn back_option(lang: Option<&str>) -> MenuOption {
    MenuOption::new(t_lang("back", lang), Action::GoBack)
}

pub fn cleaning_kind_label(kind: CleaningKind, lang: Option<&str>) -> String {
    let key = match kind {
        CleaningKind::Current => "cleaning-current",
        CleaningKind::Checkout => "cleaning-checkout",
        CleaningKind::General => "cleaning-general",
    };
    t_lang(key, lang)
}

pub fn sub_location_label(sub: SubLocation, lang: Option<&str>) -> String {
    let key = match sub {
        SubLocation::Entryway => "sub-entry",
        SubLocation::Room => "sub-room",
        SubLocation::Wc => "sub-wc",
    };
    t_lang(key, lang)
}

/// Display label of a location in the user's language, falling back to its id
pub fn location_label<'a>(catalog: &'a Catalog, id: &'a str, lang: Option<&str>) -> &'a str {
    let language = get_localization_manager().resolve_language(lang);
    catalog.get(id).map(|l| l.label_in(language)).unwrap_or(id)
}

/// Buttons shown for `node`
pub fn render(catalog: &Catalog, node: &NavigationNode, lang: Option<&str>) -> Vec<MenuOption> {
    match node {
        NavigationNode::RoomList => {
            let mut options: Vec<MenuOption> = catalog
                .rooms()
                .map(|room| MenuOption::new(room.label.clone(), Action::SelectRoom(room.id.clone())))
                .collect();
            options.push(MenuOption::new(t_lang("hostel-button", lang), Action::OpenHostel));
            options
        }
        NavigationNode::HostelZoneList => {
            let mut options: Vec<MenuOption> = catalog
                .zones()
                .iter()
                .map(|zone| {
                    MenuOption::new(
                        t_args_lang("zone-button", &[("number", zone.number.to_string().as_str())], lang),
                        Action::SelectHostelZone(zone.number),
                    )
                })
                .collect();
            options.extend(catalog.common_zones().map(|common| {
                MenuOption::new(
                    location_label(catalog, &common.id, lang),
                    Action::SelectCommonZone(common.id.clone()),
                )
            }));
            options.push(back_option(lang));
            options
        }
        NavigationNode::HostelBedList { zone } => {
            let mut options: Vec<MenuOption> = catalog
                .hostel_zone(*zone)
                .unwrap_or_default()
                .into_iter()
                .map(|bed| MenuOption::new(bed.label.clone(), Action::SelectBed(bed.id.clone())))
                .collect();
            options.push(MenuOption::new(FILLER_LABEL, Action::NoOp));
            options.push(back_option(lang));
            options
        }
        NavigationNode::LocationActions { location } => vec![
            MenuOption::new(
                t_lang("clean-done", lang),
                Action::LocationAction(LocationActionKind::Clean, location.clone()),
            ),
            MenuOption::new(
                t_lang("report-problem", lang),
                Action::LocationAction(LocationActionKind::Report, location.clone()),
            ),
            back_option(lang),
        ],
        NavigationNode::CleaningTypePicker { location } => CleaningKind::ALL
            .iter()
            .map(|kind| {
                MenuOption::new(
                    cleaning_kind_label(*kind, lang),
                    Action::CleaningType(*kind, location.clone()),
                )
            })
            .collect(),
        NavigationNode::ProblemFlow { step, .. } => match step {
            ProblemStep::AwaitingSubLocation { .. } => {
                let mut options: Vec<MenuOption> = SubLocation::ALL
                    .iter()
                    .map(|sub| MenuOption::new(sub_location_label(*sub, lang), Action::SubLocation(*sub)))
                    .collect();
                options.push(back_option(lang));
                options
            }
            ProblemStep::AwaitingDescription | ProblemStep::AwaitingPhotoOrText { .. } => {
                vec![back_option(lang)]
            }
        },
    }
}

/// Prompt text shown above the buttons of `node`
pub fn title(catalog: &Catalog, node: &NavigationNode, lang: Option<&str>) -> String {
    match node {
        NavigationNode::RoomList => t_lang("rooms-title", lang),
        NavigationNode::HostelZoneList => t_lang("hostel-zones-title", lang),
        NavigationNode::HostelBedList { zone } => {
            t_args_lang("bed-list-title", &[("number", zone.to_string().as_str())], lang)
        }
        NavigationNode::LocationActions { location } => t_args_lang(
            "location-actions-title",
            &[("location", location_label(catalog, location, lang))],
            lang,
        ),
        NavigationNode::CleaningTypePicker { location } => t_args_lang(
            "cleaning-type-title",
            &[("location", location_label(catalog, location, lang))],
            lang,
        ),
        NavigationNode::ProblemFlow { location, step } => match step {
            ProblemStep::AwaitingDescription => t_args_lang(
                "problem-description-prompt",
                &[("location", location_label(catalog, location, lang))],
                lang,
            ),
            ProblemStep::AwaitingSubLocation { .. } => t_lang("problem-sub-location-prompt", lang),
            ProblemStep::AwaitingPhotoOrText { .. } => t_lang("problem-photo-prompt", lang),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_label_falls_back_to_id() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(location_label(&catalog, "kitchen", Some("en")), "Kitchen");
        assert_eq!(location_label(&catalog, "kitchen", Some("ru")), "Кухня");
        assert_eq!(location_label(&catalog, "kitchen", Some("de")), "Kitchen");
        assert_eq!(location_label(&catalog, "999", Some("ru")), "999");
    }

    #[test]
    fn test_cleaning_picker_has_no_back_button() {
        let catalog = Catalog::builtin().unwrap();
        let node = NavigationNode::CleaningTypePicker {
            location: "101".into(),
        };
        let options = render(&catalog, &node, Some("en"));
        assert_eq!(options.len(), 3);
        assert!(options.iter().all(|o| o.action != Action::GoBack));
    }
}
