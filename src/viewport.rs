use eframe::egui;
use egui::{Color32, ColorImage, Rect, Sense, TextureHandle, TextureOptions, Vec2};
use image::RgbImage;

use crate::canvas::MapBuffer;

/// Scrolled/zoomed view of the working buffer.
///
/// Thin display glue: uploads the working buffer as one texture, pans with
/// a middle- or right-button drag, zooms around the pointer on scroll, and
/// maps primary clicks back to image pixel coordinates for the editor.
pub struct Viewport {
    pub zoom: f32,
    pan: Vec2,
    texture: Option<TextureHandle>,
    dirty: bool,
    fit_on_next_show: bool,
}

impl Viewport {
    pub fn new() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            texture: None,
            dirty: true,
            fit_on_next_show: false,
        }
    }

    /// Forget the current texture and re-fit the next frame. Called when a
    /// new map is loaded.
    pub fn reset(&mut self) {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        self.texture = None;
        self.dirty = true;
        self.fit_on_next_show = true;
    }

    /// The working buffer changed; re-upload on the next frame.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Draw the map and handle pan/zoom/click. Returns the image pixel the
    /// user seed-clicked this frame, if any.
    pub fn show(&mut self, ui: &mut egui::Ui, map: &MapBuffer) -> Option<(u32, u32)> {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let canvas_rect = response.rect;

        if self.fit_on_next_show {
            let fit_x = canvas_rect.width() / map.width() as f32;
            let fit_y = canvas_rect.height() / map.height() as f32;
            self.zoom = fit_x.min(fit_y).min(1.0);
            self.fit_on_next_show = false;
        }

        // Pan with middle or right button so a primary click stays a seed
        // click.
        if response.dragged()
            && ui.input(|i| i.pointer.middle_down() || i.pointer.secondary_down())
        {
            self.pan += response.drag_delta();
        }

        // Zoom around the pointer: the image point under the cursor stays
        // put across the zoom change.
        if let Some(pos) = response.hover_pos() {
            let scroll = ui.input(|i| i.scroll_delta.y);
            if scroll != 0.0 {
                let factor = if scroll > 0.0 { 1.3 } else { 1.0 / 1.3 };
                let new_zoom = (self.zoom * factor).clamp(0.02, 64.0);
                let v = pos - canvas_rect.center();
                self.pan = v - (v - self.pan) * (new_zoom / self.zoom);
                self.zoom = new_zoom;
            }
        }

        if self.dirty || self.texture.is_none() {
            let img = color_image_from(map.working());
            match &mut self.texture {
                Some(tex) => tex.set(img, TextureOptions::NEAREST),
                None => {
                    self.texture = Some(ui.ctx().load_texture("map", img, TextureOptions::NEAREST))
                }
            }
            self.dirty = false;
        }

        painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(28));

        let texture = self.texture.as_ref()?;
        let size = egui::vec2(map.width() as f32, map.height() as f32) * self.zoom;
        let image_rect = Rect::from_center_size(canvas_rect.center() + self.pan, size);
        painter.image(
            texture.id(),
            image_rect,
            Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            Color32::WHITE,
        );

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let p = (pos - image_rect.min) / self.zoom;
                if p.x >= 0.0 && p.y >= 0.0 {
                    let (x, y) = (p.x as u32, p.y as u32);
                    if x < map.width() && y < map.height() {
                        return Some((x, y));
                    }
                }
            }
        }
        None
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

fn color_image_from(img: &RgbImage) -> ColorImage {
    let size = [img.width() as usize, img.height() as usize];
    let pixels = img
        .pixels()
        .map(|p| Color32::from_rgb(p[0], p[1], p[2]))
        .collect();
    ColorImage { size, pixels }
}
