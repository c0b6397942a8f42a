use eframe::egui;
use shared::{Grid, PointerInput, Renderer};

const ALIVE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x0a, 0x13, 0x10);
const DEAD_COLOR: egui::Color32 = egui::Color32::from_rgb(0xf6, 0xf8, 0xfb);
const GRID_LINE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x1f, 0x29, 0x37);

/// Renderer half of the window: keeps the figures shown in the header and
/// asks egui for a repaint whenever the simulation changes.
#[derive(Default)]
pub struct CanvasRenderer {
    ctx: Option<egui::Context>,
    pub generation: u64,
    pub population: usize,
}

impl CanvasRenderer {
    pub fn attach(&mut self, ctx: egui::Context) {
        ctx.request_repaint();
        self.ctx = Some(ctx);
    }
}

impl Renderer for CanvasRenderer {
    fn on_state_changed(&mut self, grid: &Grid, generation: u64) {
        self.generation = generation;
        self.population = grid.population();
        if let Some(ctx) = &self.ctx {
            ctx.request_repaint();
        }
    }
}

/// Paint every cell and return the clicked cell, if any.
pub fn draw_grid(ui: &mut egui::Ui, grid: &Grid, input: &PointerInput) -> Option<(usize, usize)> {
    let cell_size = input.cell_size();
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(cell_size * grid.cols() as f32, cell_size * grid.rows() as f32),
        egui::Sense::click(),
    );

    let painter = ui.painter_at(rect);
    for (row_index, row) in grid.iter_rows().enumerate() {
        for (col_index, cell) in row.iter().enumerate() {
            let pos = rect.min + egui::vec2(col_index as f32 * cell_size, row_index as f32 * cell_size);
            let cell_rect = egui::Rect::from_min_size(pos, egui::vec2(cell_size, cell_size));

            let color = if cell.is_alive() { ALIVE_COLOR } else { DEAD_COLOR };
            painter.rect_filled(cell_rect, 0.0, color);
            painter.rect_stroke(cell_rect, 0.0, egui::Stroke::new(0.5, GRID_LINE_COLOR));
        }
    }

    if !response.clicked() {
        return None;
    }
    let pointer = response.interact_pointer_pos()?;
    let local = pointer - rect.min;
    input.cell_at(local.x, local.y)
}
