use image::{Rgb, RgbImage};

use statepainter::color::ProvinceKey;
use statepainter::draft::{Draft, RoleSlot};
use statepainter::editor::EditorState;

/// 6x4 map: columns 0-2 are #112233, columns 3-5 are #445566.
fn two_region_map() -> RgbImage {
    let mut img = RgbImage::new(6, 4);
    for y in 0..4 {
        for x in 0..6 {
            let c = if x < 3 {
                [0x11, 0x22, 0x33]
            } else {
                [0x44, 0x55, 0x66]
            };
            img.put_pixel(x, y, Rgb(c));
        }
    }
    img
}

fn editor_with_map() -> EditorState {
    let mut editor = EditorState::new();
    editor.load_map(two_region_map());
    editor
}

fn selected_hexes(editor: &EditorState) -> Vec<String> {
    editor.draft.provinces.iter().map(|k| k.hex()).collect()
}

#[test]
fn selection_keeps_click_order_and_toggles_off() {
    let mut editor = editor_with_map();

    assert!(editor.handle_click(1, 1));
    assert_eq!(selected_hexes(&editor), ["#112233"]);

    assert!(editor.handle_click(4, 1));
    assert_eq!(selected_hexes(&editor), ["#112233", "#445566"]);

    // Clicking the first region again deselects it and restores its pixels.
    assert!(editor.handle_click(1, 1));
    assert_eq!(selected_hexes(&editor), ["#445566"]);
    let map = editor.map.as_ref().unwrap();
    assert_eq!(map.working_pixel(1, 1).unwrap(), [0x11, 0x22, 0x33]);
}

#[test]
fn double_toggle_leaves_working_buffer_pristine() {
    let mut editor = editor_with_map();
    editor.handle_click(1, 1);
    editor.handle_click(1, 1);
    assert!(editor.draft.provinces.is_empty());
    let map = editor.map.as_ref().unwrap();
    assert_eq!(map.working().as_raw(), map.pristine().as_raw());
}

#[test]
fn out_of_bounds_click_is_ignored() {
    let mut editor = editor_with_map();
    assert!(!editor.handle_click(99, 99));
    assert!(editor.draft.provinces.is_empty());
}

#[test]
fn click_without_map_is_ignored() {
    let mut editor = EditorState::new();
    assert!(!editor.handle_click(0, 0));
}

#[test]
fn armed_role_binds_on_selecting_click_and_disarms() {
    let mut editor = editor_with_map();
    editor.armed_role = Some(RoleSlot::City);
    editor.handle_click(1, 1);

    let key = ProvinceKey([0x11, 0x22, 0x33]);
    assert_eq!(editor.draft.roles[RoleSlot::City.index()], Some(key));
    assert_eq!(editor.draft.provinces, [key]);
    assert_eq!(editor.armed_role, None);
}

#[test]
fn rebinding_a_slot_evicts_the_previous_occupant() {
    let mut editor = editor_with_map();
    editor.armed_role = Some(RoleSlot::City);
    editor.handle_click(1, 1); // city = #112233
    editor.armed_role = Some(RoleSlot::City);
    editor.handle_click(4, 1); // city = #445566

    let a = ProvinceKey([0x11, 0x22, 0x33]);
    let b = ProvinceKey([0x44, 0x55, 0x66]);
    assert_eq!(editor.draft.roles[RoleSlot::City.index()], Some(b));
    assert_eq!(editor.draft.role_of(a), None);
    // Both provinces stay selected; only the role moved.
    assert_eq!(editor.draft.provinces, [a, b]);
}

#[test]
fn binding_a_key_elsewhere_evicts_its_old_slot() {
    let mut draft = Draft::new([0, 0, 0]);
    let key = ProvinceKey([0x11, 0x22, 0x33]);
    draft.bind_role(RoleSlot::City, key);
    draft.bind_role(RoleSlot::Mine, key);
    assert_eq!(draft.roles[RoleSlot::City.index()], None);
    assert_eq!(draft.roles[RoleSlot::Mine.index()], Some(key));
}

#[test]
fn deselecting_click_does_not_consume_armed_role() {
    let mut editor = editor_with_map();
    editor.handle_click(1, 1); // select, no role armed
    editor.armed_role = Some(RoleSlot::Port);
    editor.handle_click(1, 1); // deselect

    assert!(editor.draft.provinces.is_empty());
    assert_eq!(editor.armed_role, Some(RoleSlot::Port));
}

#[test]
fn deselecting_frees_the_keys_role_slot() {
    let mut editor = editor_with_map();
    editor.armed_role = Some(RoleSlot::Farm);
    editor.handle_click(1, 1); // select + bind farm
    editor.handle_click(1, 1); // deselect

    assert_eq!(editor.draft.roles[RoleSlot::Farm.index()], None);
}

#[test]
fn committed_provinces_are_locked_against_reselection() {
    let mut editor = editor_with_map();
    editor.handle_click(1, 1);
    editor.draft.id_text = "7".into();
    editor.draft.name = "Test Region".into();
    editor.draft.arable_land = "5".into();
    let old_color = editor.draft.color;
    editor.save_state().unwrap();

    // The committed highlight stays painted; that is the lock.
    let map = editor.map.as_ref().unwrap();
    assert_eq!(map.working_pixel(1, 1).unwrap(), old_color);

    // A click on the committed region is a silent no-op.
    assert!(!editor.handle_click(1, 1));
    assert!(editor.draft.provinces.is_empty());

    // The fresh draft got a different color than the committed one.
    assert_ne!(editor.draft.color, old_color);

    // The other region is still selectable.
    assert!(editor.handle_click(4, 1));
    assert_eq!(selected_hexes(&editor), ["#445566"]);

    // The committed record round-trips through export.
    let blob = editor.registry.export_all();
    assert!(blob.contains("STATE_TEST_REGION = {"));
    assert!(blob.contains("    id = 7\n"));
    assert!(blob.contains("    provinces = { \"#112233\" }\n"));
}

#[test]
fn failed_commit_changes_nothing() {
    let mut editor = editor_with_map();
    editor.handle_click(1, 1);
    let color = editor.draft.color;

    // Name left empty.
    editor.draft.id_text = "7".into();
    editor.draft.arable_land = "5".into();
    let err = editor.save_state().unwrap_err();
    assert_eq!(err.to_string(), "Please enter a state name.");

    assert!(editor.registry.records().is_empty());
    assert_eq!(editor.draft.color, color);
    assert_eq!(selected_hexes(&editor), ["#112233"]);
}
