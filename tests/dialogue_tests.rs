use anyhow::Result;
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use teloxide::types::ChatId;

use housekeeping::action::{Action, SubLocation};
use housekeeping::catalog::Catalog;
use housekeeping::dialogue::{NavigationNode, SessionDialogue};
use housekeeping::menu;
use housekeeping::problem_flow::{
    advance, validate_description, ProblemStep, RepromptReason, StepInput, StepOutcome,
    MAX_DESCRIPTION_LEN,
};

/// Sessions start at the room list and are kept per chat
#[tokio::test]
async fn test_session_storage_per_chat() -> Result<()> {
    let storage = InMemStorage::<NavigationNode>::new();
    let first: SessionDialogue = Dialogue::new(storage.clone(), ChatId(1));
    let second: SessionDialogue = Dialogue::new(storage, ChatId(2));

    assert_eq!(first.get_or_default().await?, NavigationNode::RoomList);

    first
        .update(NavigationNode::HostelBedList { zone: 2 })
        .await?;

    assert_eq!(
        first.get_or_default().await?,
        NavigationNode::HostelBedList { zone: 2 }
    );
    assert_eq!(second.get_or_default().await?, NavigationNode::RoomList);

    first.exit().await?;
    assert_eq!(first.get().await?, None);

    Ok(())
}

/// Nodes carry every answer given so far and survive serialization
#[tokio::test]
async fn test_problem_node_serialization() -> Result<()> {
    let node = NavigationNode::ProblemFlow {
        location: "205".into(),
        step: ProblemStep::AwaitingPhotoOrText {
            description: "leaking tap".into(),
            sub_location: SubLocation::Wc,
        },
    };

    let json = serde_json::to_string(&node)?;
    let restored: NavigationNode = serde_json::from_str(&json)?;
    assert_eq!(restored, node);

    Ok(())
}

#[tokio::test]
async fn test_description_validation() -> Result<()> {
    assert_eq!(validate_description("  leaking tap \n"), Ok("leaking tap".to_string()));
    assert_eq!(validate_description(" \n\t"), Err(RepromptReason::EmptyDescription));
    assert_eq!(
        validate_description(&"x".repeat(MAX_DESCRIPTION_LEN + 1)),
        Err(RepromptReason::DescriptionTooLong)
    );
    assert!(validate_description(&"я".repeat(MAX_DESCRIPTION_LEN)).is_ok());

    Ok(())
}

#[tokio::test]
async fn test_form_steps_in_order() -> Result<()> {
    let step = match advance(&ProblemStep::AwaitingDescription, StepInput::Text("mould")) {
        StepOutcome::Advance(step) => step,
        other => panic!("Unexpected outcome: {other:?}"),
    };
    assert_eq!(
        step,
        ProblemStep::AwaitingSubLocation {
            description: "mould".into()
        }
    );

    let step = match advance(&step, StepInput::SubLocation(SubLocation::Entryway)) {
        StepOutcome::Advance(step) => step,
        other => panic!("Unexpected outcome: {other:?}"),
    };

    match advance(&step, StepInput::Text("нет")) {
        StepOutcome::Complete(draft) => {
            assert_eq!(draft.description, "mould");
            assert_eq!(draft.sub_location, SubLocation::Entryway);
            assert_eq!(draft.attachment.cell(), "no");
        }
        other => panic!("Unexpected outcome: {other:?}"),
    }

    match advance(&step, StepInput::Text("behind the door")) {
        StepOutcome::Complete(draft) => assert_eq!(draft.attachment.cell(), "behind the door"),
        other => panic!("Unexpected outcome: {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn test_menus_per_node() -> Result<()> {
    let catalog = Catalog::builtin()?;

    for location in catalog.locations() {
        let options = menu::render(
            &catalog,
            &NavigationNode::LocationActions {
                location: location.id.clone(),
            },
            Some("en"),
        );
        let labels: Vec<&str> = options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Cleaning done", "Report a problem", "Back"]);
    }

    let picker = menu::render(
        &catalog,
        &NavigationNode::CleaningTypePicker {
            location: "101".into(),
        },
        Some("en"),
    );
    let labels: Vec<&str> = picker.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["Current", "Post-checkout", "General"]);

    let subs = menu::render(
        &catalog,
        &NavigationNode::ProblemFlow {
            location: "101".into(),
            step: ProblemStep::AwaitingSubLocation {
                description: "mould".into(),
            },
        },
        Some("en"),
    );
    let actions: Vec<&Action> = subs.iter().map(|o| &o.action).collect();
    assert_eq!(
        actions,
        vec![
            &Action::SubLocation(SubLocation::Entryway),
            &Action::SubLocation(SubLocation::Room),
            &Action::SubLocation(SubLocation::Wc),
            &Action::GoBack,
        ]
    );

    let zones = menu::render(&catalog, &NavigationNode::HostelZoneList, Some("en"));
    let actions: Vec<Action> = zones.iter().map(|o| o.action.clone()).collect();
    assert_eq!(
        actions,
        vec![
            Action::SelectHostelZone(1),
            Action::SelectHostelZone(2),
            Action::SelectHostelZone(3),
            Action::SelectHostelZone(4),
            Action::SelectCommonZone("kitchen".into()),
            Action::SelectCommonZone("showers".into()),
            Action::SelectCommonZone("lounge".into()),
            Action::GoBack,
        ]
    );
    let labels: Vec<&str> = zones.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Zone 1", "Zone 2", "Zone 3", "Zone 4", "Kitchen", "Showers", "Lounge", "Back"]
    );

    let zones_ru = menu::render(&catalog, &NavigationNode::HostelZoneList, Some("ru"));
    let labels: Vec<&str> = zones_ru.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Блок 1", "Блок 2", "Блок 3", "Блок 4", "Кухня", "Душевые", "Гостиная", "Назад"]
    );

    let beds = menu::render(&catalog, &NavigationNode::HostelBedList { zone: 2 }, Some("en"));
    let labels: Vec<&str> = beds.iter().map(|o| o.label.as_str()).collect();
    assert_eq!(labels, vec!["M5", "M6", "M7", "M8", menu::FILLER_LABEL, "Back"]);

    Ok(())
}
