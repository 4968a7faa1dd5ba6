use image::RgbImage;

use crate::canvas::MapBuffer;
use crate::color::{allocate_color, ProvinceKey};
use crate::draft::{Draft, RoleSlot};
use crate::export::{render_state_block, CommitError, StateRegistry};
use crate::fill::FloodFill;
use crate::log_warn;

/// Central selection state: the loaded map, the active draft, the committed
/// registry, and the pending role request.
///
/// Every province's status is one of unselected, selected-in-draft, or
/// locked-by-committed-state. Locked is never stored — it is re-derived on
/// each click by comparing the working-buffer pixel color against the
/// committed color set, exactly as the displayed map encodes it.
pub struct EditorState {
    pub map: Option<MapBuffer>,
    fill: FloodFill,
    pub draft: Draft,
    pub registry: StateRegistry,
    /// Armed role request; the next selecting click binds this slot and
    /// disarms it.
    pub armed_role: Option<RoleSlot>,
    /// Last rendered draft text, shown in the form's preview box.
    pub rendered: String,
}

impl EditorState {
    pub fn new() -> Self {
        let registry = StateRegistry::new();
        let color = allocate_color(registry.used_colors());
        Self {
            map: None,
            fill: FloodFill::new(),
            draft: Draft::new(color),
            registry,
            armed_role: None,
            rendered: String::new(),
        }
    }

    /// Install a freshly loaded province map. Draft and registry survive a
    /// reload; the new working buffer starts pristine.
    pub fn load_map(&mut self, pristine: RgbImage) {
        self.map = Some(MapBuffer::new(pristine));
    }

    /// Handle a seed click at image coordinates. Returns true when the
    /// working buffer changed (the caller re-uploads the texture).
    ///
    /// Out-of-bounds clicks and clicks on locked provinces are silent
    /// no-ops — deliberate, so rapid painting is never interrupted.
    pub fn handle_click(&mut self, x: u32, y: u32) -> bool {
        let Some(map) = self.map.as_mut() else {
            return false;
        };
        let Ok(visible) = map.working_pixel(x, y) else {
            return false;
        };
        if self.registry.is_used_color(visible) {
            return false;
        }
        let Ok(pristine) = map.pristine_pixel(x, y) else {
            return false;
        };
        let key = ProvinceKey(pristine);

        if let Some(pos) = self.draft.provinces.iter().position(|k| *k == key) {
            // Deselect: drop from the ordered selection, free any role slot
            // the key held, restore the region from pristine. An armed role
            // request stays armed through a deselect click.
            self.draft.provinces.remove(pos);
            self.draft.clear_role_of(key);
            if let Err(e) = self.fill.remove_highlight(map, (x, y)) {
                log_warn!("remove_highlight at ({}, {}): {}", x, y, e);
            }
        } else {
            // Select, binding the armed role slot in the same click if one
            // is pending. The request is consumed by exactly one bind.
            if let Some(slot) = self.armed_role.take() {
                self.draft.bind_role(slot, key);
            }
            self.draft.provinces.push(key);
            if let Err(e) = self.fill.apply_highlight(map, (x, y), self.draft.color) {
                log_warn!("apply_highlight at ({}, {}): {}", x, y, e);
            }
        }

        self.refresh_text();
        true
    }

    /// Re-render the draft preview text. Called after every mutating edit.
    pub fn refresh_text(&mut self) {
        self.rendered = render_state_block(&self.draft);
    }

    /// Commit the draft: validate, freeze it into the registry, then reset
    /// the form with a fresh display color. The working buffer keeps the
    /// committed highlights painted — that is what locks those provinces.
    pub fn save_state(&mut self) -> Result<u64, CommitError> {
        let id = self.registry.commit(&self.draft)?;
        let color = allocate_color(self.registry.used_colors());
        self.draft.reset(color);
        self.armed_role = None;
        self.rendered.clear();
        Ok(id)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}
