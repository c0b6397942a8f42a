mod canvas;

use std::time::{Duration, Instant};

use anyhow::Context;
use canvas::{draw_grid, CanvasRenderer};
use clap::Parser;
use eframe::egui;
use eframe::run_native;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::{Command, Grid, PointerInput, SimulationConfig, SimulationController};

const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 1_000;
const HEADER_HEIGHT: f32 = 90.0;

/// Conway's Game of Life on a wrap-around grid.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Number of rows in the grid.
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,
    /// Number of columns in the grid.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,
    /// Edge length of a cell in pixels.
    #[arg(long = "cell-size", value_name = "PIXELS", default_value_t = 12.0)]
    cell_size: f32,
    /// Milliseconds between generations while running.
    #[arg(
        long = "tick-ms",
        value_name = "MILLISECONDS",
        default_value_t = SimulationConfig::DEFAULT_TICK_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    tick_ms: u64,
    /// Chance for each cell to start alive when randomizing.
    #[arg(long, default_value_t = SimulationConfig::DEFAULT_LIVE_PROBABILITY)]
    density: f64,
    /// Seed for the random generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Start paused instead of running.
    #[arg(long)]
    paused: bool,
}

struct GuiOfLife {
    controller: SimulationController<CanvasRenderer>,
    input: PointerInput,
    tick_ms: u64,
    steps_since_log: u32,
    last_rate_log: Instant,
}

impl GuiOfLife {
    fn new(cc: &eframe::CreationContext<'_>, mut controller: SimulationController<CanvasRenderer>, input: PointerInput) -> Self {
        controller.renderer_mut().attach(cc.egui_ctx.clone());
        let tick_ms = controller.config().tick_interval.as_millis() as u64;
        Self {
            controller,
            input,
            tick_ms,
            steps_since_log: 0,
            last_rate_log: Instant::now(),
        }
    }

    fn apply(&mut self, command: Command) {
        if let Err(err) = self.controller.apply(command, Instant::now()) {
            log::warn!("{:?} rejected: {}", command, err);
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let (space, n, r, c) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Space),
                i.key_pressed(egui::Key::N),
                i.key_pressed(egui::Key::R),
                i.key_pressed(egui::Key::C),
            )
        });
        if space {
            self.apply(Command::ToggleRunning);
        }
        if n {
            self.apply(Command::Step);
        }
        if r {
            self.apply(Command::Randomize);
        }
        if c {
            self.apply(Command::Clear);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Game of Life");
        ui.horizontal(|ui| {
            let renderer = self.controller.renderer();
            ui.label(format!("Generation: {}", renderer.generation));
            ui.separator();
            ui.label(format!("Alive: {}", renderer.population));
        });
        ui.horizontal(|ui| {
            let run_label = if self.controller.is_running() { "Pause" } else { "Start" };
            if ui.button(run_label).clicked() {
                self.apply(Command::ToggleRunning);
            }
            if ui.button("Step").clicked() {
                self.apply(Command::Step);
            }
            if ui.button("Randomize").clicked() {
                self.apply(Command::Randomize);
            }
            if ui.button("Clear").clicked() {
                self.apply(Command::Clear);
            }
            ui.separator();
            let slider = egui::Slider::new(&mut self.tick_ms, MIN_TICK_MS..=MAX_TICK_MS).text("ms / tick");
            if ui.add(slider).changed() {
                self.apply(PointerInput::rate_change(self.tick_ms as f64));
            }
        });
    }

    fn log_rate(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_rate_log);
        if elapsed >= Duration::from_secs(1) {
            if self.steps_since_log > 0 {
                let rate = self.steps_since_log as f64 / elapsed.as_secs_f64();
                log::info!("generations per second: {:.1}", rate);
            }
            self.steps_since_log = 0;
            self.last_rate_log = now;
        }
    }
}

impl eframe::App for GuiOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.controller.tick(now) {
            self.steps_since_log += 1;
        }
        self.log_rate(now);
        self.handle_keys(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| self.controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                let clicked = draw_grid(ui, self.controller.grid(), &self.input);
                if let Some((row, col)) = clicked {
                    self.apply(Command::ToggleCell { row, col });
                }
            });
        });

        if let Some(due) = self.controller.scheduler().next_due() {
            ctx.request_repaint_after(due.saturating_duration_since(Instant::now()));
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = SimulationConfig::new(args.tick_ms, !args.paused, args.density).context("invalid simulation settings")?;
    let grid = Grid::new(args.rows as usize, args.cols as usize).context("create grid")?;
    let input = PointerInput::for_grid(args.cell_size, &grid);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let window_size = [
        (args.cell_size * args.cols as f32 + 32.0).max(480.0),
        args.cell_size * args.rows as f32 + HEADER_HEIGHT + 32.0,
    ];

    let mut controller = SimulationController::new(grid, config, CanvasRenderer::default(), rng, Instant::now())?;
    controller.randomize()?;
    log::info!(
        "starting {}x{} grid, {} ms per tick, {}",
        args.rows,
        args.cols,
        args.tick_ms,
        if controller.is_running() { "running" } else { "paused" }
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Game of Life")
            .with_inner_size(window_size),
        ..Default::default()
    };

    run_native(
        "Game of Life GUI",
        options,
        Box::new(move |cc| Ok(Box::new(GuiOfLife::new(cc, controller, input)))),
    )
    .map_err(|err| anyhow::anyhow!("event loop failed: {err}"))?;
    Ok(())
}
