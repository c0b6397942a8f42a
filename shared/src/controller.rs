use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rand::rngs::StdRng;

use crate::error::LifeError;
use crate::grid::Grid;
use crate::scheduler::Scheduler;

/// Receives the full grid after every mutation and redraws it.
pub trait Renderer {
    fn on_state_changed(&mut self, grid: &Grid, generation: u64);
}

impl<F> Renderer for F
where
    F: FnMut(&Grid, u64),
{
    fn on_state_changed(&mut self, grid: &Grid, generation: u64) {
        self(grid, generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub tick_interval: Duration,
    pub running: bool,
    /// Chance for each cell to come up alive on `randomize`.
    pub live_probability: f64,
}

impl SimulationConfig {
    pub const DEFAULT_TICK_MS: u64 = 200;
    pub const DEFAULT_LIVE_PROBABILITY: f64 = 0.3;

    pub fn new(tick_ms: u64, running: bool, live_probability: f64) -> Result<Self, LifeError> {
        let config = SimulationConfig {
            tick_interval: interval_from_millis(tick_ms)?,
            running,
            live_probability,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LifeError> {
        if self.tick_interval.is_zero() {
            return Err(LifeError::InvalidInterval(0));
        }
        if !(0.0..=1.0).contains(&self.live_probability) {
            return Err(LifeError::InvalidProbability(self.live_probability));
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            tick_interval: Duration::from_millis(Self::DEFAULT_TICK_MS),
            running: true,
            live_probability: Self::DEFAULT_LIVE_PROBABILITY,
        }
    }
}

pub fn interval_from_millis(ms: u64) -> Result<Duration, LifeError> {
    if ms == 0 {
        return Err(LifeError::InvalidInterval(ms));
    }
    Ok(Duration::from_millis(ms))
}

/// One variant per external gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleRunning,
    SetTickInterval(u64),
    Step,
    Randomize,
    Clear,
    ToggleCell { row: usize, col: usize },
}

/// Owns the grid, the run state and the only timer; every mutation ends with
/// a call to the renderer.
pub struct SimulationController<R: Renderer> {
    grid: Grid,
    config: SimulationConfig,
    scheduler: Scheduler,
    renderer: R,
    rng: StdRng,
}

impl<R: Renderer> SimulationController<R> {
    /// Take ownership of `grid`, draw it once and, if the config says so, start ticking from `now`.
    pub fn new(
        grid: Grid,
        config: SimulationConfig,
        renderer: R,
        rng: StdRng,
        now: Instant,
    ) -> Result<Self, LifeError> {
        config.validate()?;
        let mut controller = SimulationController {
            grid,
            config,
            scheduler: Scheduler::new(),
            renderer,
            rng,
        };
        controller.sync_timer(now);
        controller.notify();
        Ok(controller)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.grid.generation()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.config.running
    }

    pub fn run_state(&self) -> RunState {
        if self.config.running {
            RunState::Running
        } else {
            RunState::Paused
        }
    }

    pub fn toggle_running(&mut self, now: Instant) -> RunState {
        self.config.running = !self.config.running;
        self.sync_timer(now);
        debug!("simulation {:?}", self.run_state());
        self.run_state()
    }

    /// Change the tick interval. A running timer is replaced, never doubled.
    pub fn set_tick_interval(&mut self, ms: u64, now: Instant) -> Result<(), LifeError> {
        let interval = interval_from_millis(ms).inspect_err(|err| warn!("{err}"))?;
        self.config.tick_interval = interval;
        self.sync_timer(now);
        debug!("tick interval set to {ms} ms");
        Ok(())
    }

    pub fn set_live_probability(&mut self, live_probability: f64) -> Result<(), LifeError> {
        if !(0.0..=1.0).contains(&live_probability) {
            return Err(LifeError::InvalidProbability(live_probability));
        }
        self.config.live_probability = live_probability;
        Ok(())
    }

    /// Advance exactly one generation, whatever the run state.
    pub fn step(&mut self) {
        if !self.grid.advance() {
            debug!("generation {} is static", self.grid.generation());
        }
        self.notify();
    }

    /// Drive the timer. Steps once and returns `true` when a tick was due.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.scheduler.poll(now) {
            return false;
        }
        trace!("tick -> generation {}", self.grid.generation() + 1);
        self.step();
        true
    }

    pub fn randomize(&mut self) -> Result<(), LifeError> {
        self.grid
            .randomize(&mut self.rng, self.config.live_probability)?;
        debug!(
            "randomized grid, {} cells alive",
            self.grid.population()
        );
        self.notify();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.grid.clear();
        debug!("cleared grid");
        self.notify();
    }

    /// Flip a cell while paused. Returns `false` without touching the grid while running.
    pub fn handle_cell_toggle(&mut self, row: usize, col: usize) -> Result<bool, LifeError> {
        if self.config.running {
            return Ok(false);
        }
        self.grid
            .toggle_cell(row, col)
            .inspect_err(|err| warn!("{err}"))?;
        self.notify();
        Ok(true)
    }

    pub fn apply(&mut self, command: Command, now: Instant) -> Result<(), LifeError> {
        trace!("applying {:?}", command);
        match command {
            Command::ToggleRunning => {
                self.toggle_running(now);
            }
            Command::SetTickInterval(ms) => self.set_tick_interval(ms, now)?,
            Command::Step => self.step(),
            Command::Randomize => self.randomize()?,
            Command::Clear => self.clear(),
            Command::ToggleCell { row, col } => {
                self.handle_cell_toggle(row, col)?;
            }
        }
        Ok(())
    }

    fn sync_timer(&mut self, now: Instant) {
        if self.config.running {
            self.scheduler.start(self.config.tick_interval, now);
        } else {
            self.scheduler.cancel();
        }
    }

    fn notify(&mut self) {
        self.renderer
            .on_state_changed(&self.grid, self.grid.generation());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CellState;
    use rand::SeedableRng;

    #[derive(Default)]
    struct Recorder {
        generations: Vec<u64>,
    }

    impl Renderer for Recorder {
        fn on_state_changed(&mut self, _grid: &Grid, generation: u64) {
            self.generations.push(generation);
        }
    }

    fn controller(running: bool, now: Instant) -> SimulationController<Recorder> {
        let config = SimulationConfig::new(100, running, 0.3).unwrap();
        SimulationController::new(
            Grid::new(8, 8).unwrap(),
            config,
            Recorder::default(),
            StdRng::seed_from_u64(3),
            now,
        )
        .unwrap()
    }

    #[test]
    fn config_rejects_zero_interval() {
        assert_eq!(
            SimulationConfig::new(0, true, 0.3).unwrap_err(),
            LifeError::InvalidInterval(0)
        );
        assert!(SimulationConfig::new(10, true, -0.1).is_err());
    }

    #[test]
    fn construction_draws_and_arms_timer() {
        let now = Instant::now();
        let running = controller(true, now);
        assert_eq!(running.renderer().generations, vec![0]);
        assert_eq!(running.run_state(), RunState::Running);
        assert!(running.scheduler().is_active());

        let paused = controller(false, now);
        assert!(!paused.scheduler().is_active());
    }

    #[test]
    fn toggle_running_starts_and_stops_timer() {
        let now = Instant::now();
        let mut ctl = controller(true, now);
        assert_eq!(ctl.toggle_running(now), RunState::Paused);
        assert!(!ctl.scheduler().is_active());
        assert!(!ctl.tick(now + Duration::from_secs(1)));

        assert_eq!(ctl.toggle_running(now), RunState::Running);
        assert!(ctl.scheduler().is_active());
    }

    #[test]
    fn set_tick_interval_rejects_zero() {
        let now = Instant::now();
        let mut ctl = controller(true, now);
        let id = ctl.scheduler().active_id();
        assert_eq!(
            ctl.set_tick_interval(0, now).unwrap_err(),
            LifeError::InvalidInterval(0)
        );
        assert_eq!(ctl.scheduler().active_id(), id);
        assert_eq!(ctl.config().tick_interval, Duration::from_millis(100));
    }

    #[test]
    fn set_tick_interval_while_paused_keeps_timer_off() {
        let now = Instant::now();
        let mut ctl = controller(false, now);
        ctl.set_tick_interval(50, now).unwrap();
        assert!(!ctl.scheduler().is_active());
        assert_eq!(ctl.config().tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn toggle_is_ignored_while_running() {
        let now = Instant::now();
        let mut ctl = controller(true, now);
        assert!(!ctl.handle_cell_toggle(1, 1).unwrap());
        assert_eq!(ctl.grid().get(1, 1).unwrap(), CellState::Dead);
        assert_eq!(ctl.renderer().generations.len(), 1);
    }

    #[test]
    fn apply_dispatches_commands() {
        let now = Instant::now();
        let mut ctl = controller(false, now);
        ctl.apply(Command::ToggleCell { row: 2, col: 3 }, now).unwrap();
        assert_eq!(ctl.grid().get(2, 3).unwrap(), CellState::Alive);
        ctl.apply(Command::Step, now).unwrap();
        assert_eq!(ctl.generation(), 1);
        ctl.apply(Command::Clear, now).unwrap();
        assert_eq!(ctl.generation(), 0);
        ctl.apply(Command::ToggleRunning, now).unwrap();
        assert!(ctl.is_running());
        assert!(ctl
            .apply(Command::ToggleCell { row: 99, col: 0 }, now)
            .is_ok());
        ctl.apply(Command::ToggleRunning, now).unwrap();
        assert!(ctl
            .apply(Command::ToggleCell { row: 99, col: 0 }, now)
            .is_err());
    }

    #[test]
    fn closures_can_render() {
        let mut seen = Vec::new();
        {
            let mut ctl = SimulationController::new(
                Grid::new(3, 3).unwrap(),
                SimulationConfig::default(),
                |grid: &Grid, generation: u64| seen.push((grid.population(), generation)),
                StdRng::seed_from_u64(0),
                Instant::now(),
            )
            .unwrap();
            ctl.step();
        }
        assert_eq!(seen, vec![(0, 0), (0, 1)]);
    }
}
