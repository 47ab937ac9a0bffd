use std::sync::Once;

use drive_core::{update, AppState, DisplayedItem, Effect, Msg, Point, Rect};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(drive_logging::initialize_for_tests);
}

fn tile(item_id: &str, x: i32, y: i32) -> DisplayedItem {
    DisplayedItem {
        item_id: item_id.to_string(),
        bounds: Rect::from_corners(Point { x, y }, Point { x: x + 10, y: y + 10 }),
    }
}

/// A three-tile folder view with nothing selected.
fn folder_view(state: AppState) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::CollectionChanged {
            items: vec![tile("a", 0, 0), tile("b", 20, 0), tile("c", 40, 0)],
            selected: Vec::new(),
        },
    )
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn plain_click_replaces_and_activates() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());

    let (state, effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "a".to_string(),
            modifier: false,
        },
    );
    assert_eq!(
        effects,
        vec![
            Effect::SelectionChanged { selected: ids(&["a"]) },
            Effect::ItemActivated {
                item_id: "a".to_string()
            },
        ]
    );

    // A second plain click replaces, never accumulates.
    let (state, effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "b".to_string(),
            modifier: false,
        },
    );
    assert_eq!(state.view().selected, ids(&["b"]));
    assert_eq!(
        effects,
        vec![
            Effect::SelectionChanged { selected: ids(&["b"]) },
            Effect::ItemActivated {
                item_id: "b".to_string()
            },
        ]
    );
}

#[test]
fn modified_click_toggles_without_activation() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());

    let (state, effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "a".to_string(),
            modifier: true,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::SelectionChanged { selected: ids(&["a"]) }]
    );

    let (state, effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "b".to_string(),
            modifier: true,
        },
    );
    assert_eq!(state.view().selected, ids(&["a", "b"]));
    assert_eq!(
        effects,
        vec![Effect::SelectionChanged {
            selected: ids(&["a", "b"])
        }]
    );

    // Plain click afterwards collapses the set to the clicked item.
    let (state, effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "c".to_string(),
            modifier: false,
        },
    );
    assert_eq!(state.view().selected, ids(&["c"]));
    assert_eq!(
        effects,
        vec![
            Effect::SelectionChanged { selected: ids(&["c"]) },
            Effect::ItemActivated {
                item_id: "c".to_string()
            },
        ]
    );
}

#[test]
fn checkbox_toggle_is_an_involution() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());
    let (state, _effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "a".to_string(),
            modifier: true,
        },
    );
    let before = state.view().selected.clone();

    let (state, _effects) = update(
        state,
        Msg::CheckboxToggled {
            item_id: "b".to_string(),
        },
    );
    assert_eq!(state.view().selected, ids(&["a", "b"]));

    let (state, _effects) = update(
        state,
        Msg::CheckboxToggled {
            item_id: "b".to_string(),
        },
    );
    assert_eq!(state.view().selected, before);
}

#[test]
fn checkbox_never_activates() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());
    let (_state, effects) = update(
        state,
        Msg::CheckboxToggled {
            item_id: "a".to_string(),
        },
    );
    assert!(effects
        .iter()
        .all(|effect| !matches!(effect, Effect::ItemActivated { .. })));
}

#[test]
fn open_leaves_selection_alone() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());
    let (state, _effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "a".to_string(),
            modifier: false,
        },
    );
    let before = state.view().selected.clone();

    let (state, effects) = update(
        state,
        Msg::ItemOpened {
            item_id: "a".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::OpenItem {
            item_id: "a".to_string()
        }]
    );
    assert_eq!(state.view().selected, before);
}

#[test]
fn sync_overwrites_prior_state() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());
    let (state, _effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "a".to_string(),
            modifier: false,
        },
    );

    let (state, effects) = update(
        state,
        Msg::SelectionSynced {
            selected: ids(&["b", "c"]),
        },
    );
    // Owner-supplied values are not echoed back.
    assert!(effects.is_empty());
    assert_eq!(state.view().selected, ids(&["b", "c"]));
}

#[test]
fn sync_drops_ids_not_displayed() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());
    let (state, _effects) = update(
        state,
        Msg::SelectionSynced {
            selected: ids(&["a", "ghost"]),
        },
    );
    assert_eq!(state.view().selected, ids(&["a"]));
}

#[test]
fn navigation_resets_selection() {
    init_logging();
    let (state, _effects) = folder_view(AppState::new());
    let (state, _effects) = update(
        state,
        Msg::ItemClicked {
            item_id: "a".to_string(),
            modifier: false,
        },
    );

    // Different folder, different items: stale ids must not survive.
    let (state, effects) = update(
        state,
        Msg::CollectionChanged {
            items: vec![tile("x", 0, 0), tile("y", 20, 0)],
            selected: Vec::new(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().selected, Vec::<String>::new());
    assert_eq!(state.view().selection_count, 0);
}
