use anyhow::{bail, Context, Result};

use frameloop_core::core::App;
use frameloop_core::time::FrameClock;

pub const SPEED_ENV: &str = "FRAMELOOP_GAME_SPEED";

/// How often `game_update` reports progress.
const REPORT_EVERY: u64 = 120;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Ball speed in world units per second.
    pub speed: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { speed: 120.0 }
    }
}

impl GameConfig {
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::var(SPEED_ENV).ok().as_deref())
    }

    fn parse(speed: Option<&str>) -> Result<Self> {
        let Some(raw) = speed else {
            return Ok(Self::default());
        };

        let speed: f32 = raw
            .trim()
            .parse()
            .with_context(|| format!("{SPEED_ENV}={raw:?} is not a number"))?;
        if !speed.is_finite() || speed <= 0.0 {
            bail!("{SPEED_ENV} must be a finite positive number, got {speed}");
        }

        Ok(Self { speed })
    }
}

/// A ball bouncing inside an axis-aligned box.
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    pub size: (f32, f32),
    pub pos:  (f32, f32),
    pub vel:  (f32, f32),
}

impl World {
    pub fn new(config: &GameConfig) -> Self {
        let size = (320.0, 180.0);
        Self {
            size,
            pos: (size.0 / 2.0, size.1 / 2.0),
            vel: (config.speed * 0.8, config.speed * 0.6),
        }
    }

    pub fn step(&mut self, dt: f32) {
        let (x, vx) = bounce(self.pos.0 + self.vel.0 * dt, self.vel.0, self.size.0);
        let (y, vy) = bounce(self.pos.1 + self.vel.1 * dt, self.vel.1, self.size.1);
        self.pos = (x, y);
        self.vel = (vx, vy);
    }
}

/// Reflects `p` back into `[0, max]`, flipping `v` on contact.
fn bounce(p: f32, v: f32, max: f32) -> (f32, f32) {
    if p < 0.0 {
        ((-p).min(max), v.abs())
    } else if p > max {
        ((2.0 * max - p).max(0.0), -v.abs())
    } else {
        (p, v)
    }
}

/// The sample application: `game_init` once, `game_update` every frame.
#[derive(Default)]
pub struct Game {
    world: Option<World>,
    clock: FrameClock,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game_init(&mut self) -> Result<()> {
        self.init_with(GameConfig::from_env()?)
    }

    fn init_with(&mut self, config: GameConfig) -> Result<()> {
        log::info!("game init: speed {}", config.speed);
        self.world = Some(World::new(&config));
        self.clock.reset();
        Ok(())
    }

    pub fn game_update(&mut self) {
        let Some(world) = self.world.as_mut() else {
            return;
        };

        let ft = self.clock.tick();
        world.step(ft.dt);

        if ft.frame_index % REPORT_EVERY == 0 {
            log::info!(
                "frame {:>6}  t {:8.2}s  ball ({:6.1}, {:6.1})  {:7.1} fps",
                ft.frame_index,
                ft.elapsed.as_secs_f32(),
                world.pos.0,
                world.pos.1,
                ft.fps,
            );
        }
    }
}

impl App for Game {
    fn on_init(&mut self) -> Result<()> {
        self.game_init()
    }

    fn on_frame(&mut self) {
        self.game_update();
    }
}
