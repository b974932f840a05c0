//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in [`GameState`]; nothing is global,
//! so independent runs (tests, replays, demo) can coexist.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::{FrameModel, SimConfig, TurnModel};
use crate::consts::*;
use crate::{heading_vector, polar_to_cartesian};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Nothing running, waiting for the host to start a run
    Menu,
    /// "Get ready" banner, no gameplay mutation
    Countdown,
    /// Active gameplay
    Playing,
    /// Rocket destroyed, waiting for restart
    GameOver,
}

/// Visible play area supplied by the host
///
/// Fields are private so every size, deserialized ones included, passes
/// through the clamp in [`Viewport::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawViewport")]
pub struct Viewport {
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct RawViewport {
    width: f32,
    height: f32,
}

impl From<RawViewport> for Viewport {
    fn from(raw: RawViewport) -> Self {
        Self::new(raw.width, raw.height)
    }
}

impl Viewport {
    /// Build a viewport, clamping degenerate sizes to 1x1
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn half(&self) -> Vec2 {
        self.size() * 0.5
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// The player's rocket
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    /// World position
    pub pos: Vec2,
    /// Heading in radians (not normalized, may wind freely)
    pub angle: f32,
    /// Forward speed per frame
    pub speed: f32,
    /// Turn rate carried between frames (inertial turning only)
    pub angular_vel: f32,
}

impl Rocket {
    /// Canonical start pose: bottom third of the view, pointing up
    pub fn at_start(viewport: &Viewport) -> Self {
        Self {
            pos: Vec2::new(
                viewport.width() / 2.0,
                viewport.height() * ROCKET_START_Y_FRACTION,
            ),
            angle: -std::f32::consts::FRAC_PI_2,
            speed: ROCKET_SPEED,
            angular_vel: 0.0,
        }
    }

    pub fn heading(&self) -> Vec2 {
        heading_vector(self.angle)
    }

    /// Where projectiles leave the rocket
    pub fn nose(&self) -> Vec2 {
        self.pos + polar_to_cartesian(NOSE_OFFSET, self.angle)
    }

    /// Apply steering. `turn` is -1 (left), 0 or +1 (right).
    pub fn steer(&mut self, turn: f32, model: TurnModel, frames: f32) {
        match model {
            TurnModel::Instant => {
                self.angle += turn * TURN_RATE * frames;
            }
            TurnModel::Inertial => {
                self.angular_vel += turn * TURN_ACCEL * frames;
                self.angular_vel *= TURN_DAMPING.powf(frames);
                self.angle += self.angular_vel * frames;
            }
        }
    }

    /// Move forward along the current heading
    pub fn advance(&mut self, frames: f32) {
        self.pos += self.heading() * self.speed * frames;
    }

    /// Screen-fixed mode: wrap horizontally, hold inside the vertical safe band
    pub fn confine(&mut self, viewport: &Viewport) {
        if self.pos.x < 0.0 {
            self.pos.x = viewport.width();
        } else if self.pos.x > viewport.width() {
            self.pos.x = 0.0;
        }

        let top = SAFE_BAND_MARGIN;
        let bottom = viewport.height() - SAFE_BAND_MARGIN;
        self.pos.y = if top <= bottom {
            self.pos.y.clamp(top, bottom)
        } else {
            viewport.height() / 2.0
        };
    }
}

/// A falling hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Sprite size; the hit circle has radius `size / 2`
    pub size: f32,
    /// Downward speed per frame
    pub fall_speed: f32,
    /// Which of the interchangeable sprites to draw
    pub variant: u8,
    /// Rarer, larger, slower, worth more
    pub cluster: bool,
}

impl Asteroid {
    pub fn plain(id: u32, pos: Vec2, variant: u8) -> Self {
        Self {
            id,
            pos,
            size: ASTEROID_SIZE,
            fall_speed: ASTEROID_FALL_SPEED,
            variant,
            cluster: false,
        }
    }

    pub fn cluster(id: u32, pos: Vec2, variant: u8) -> Self {
        Self {
            id,
            pos,
            size: CLUSTER_SIZE,
            fall_speed: CLUSTER_FALL_SPEED,
            variant,
            cluster: true,
        }
    }

    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    /// Score awarded for destroying this hazard
    pub fn points(&self) -> u64 {
        if self.cluster {
            SCORE_CLUSTER
        } else {
            SCORE_ASTEROID
        }
    }

    pub fn fall(&mut self, frames: f32) {
        self.pos.y += self.fall_speed * frames;
    }
}

/// A shot fired from the rocket's nose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Heading at the moment of firing; never changes afterwards
    pub angle: f32,
    pub speed: f32,
}

impl Projectile {
    pub fn advance(&mut self, frames: f32) {
        self.pos += heading_vector(self.angle) * self.speed * frames;
    }
}

/// Transient explosion marker (cosmetic only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    /// Ticks since creation
    pub frame: u32,
}

impl Explosion {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, frame: 0 }
    }

    /// Linear fade from 1.0 at creation to 0.0 at the end of its life
    pub fn alpha(&self) -> f32 {
        (1.0 - self.frame as f32 / EXPLOSION_FRAMES as f32).max(0.0)
    }

    pub fn expired(&self) -> bool {
        self.frame > EXPLOSION_FRAMES
    }
}

/// Things that happened during a tick, for the host's UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CountdownFinished,
    AsteroidDestroyed { id: u32, cluster: bool, points: u64 },
    RocketDestroyed { score: u64 },
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub config: SimConfig,
    pub viewport: Viewport,
    pub phase: GamePhase,
    /// Countdown time left (only meaningful in `Countdown`)
    pub countdown_ms: f32,
    /// Play time in milliseconds; only advances while `Playing`
    pub clock_ms: f64,
    pub last_asteroid_ms: f64,
    pub last_cluster_ms: f64,
    pub score: u64,
    pub rocket: Rocket,
    /// Top-left corner of the view in world coordinates
    pub camera: Vec2,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    /// Vertical scroll of the background image, in [0, viewport height)
    pub background_offset: f32,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create an idle state (in `Menu`) with the given seed
    pub fn new(seed: u64, config: SimConfig, viewport: Viewport) -> Self {
        let mut state = Self {
            seed,
            config,
            viewport,
            phase: GamePhase::Menu,
            countdown_ms: 0.0,
            clock_ms: 0.0,
            last_asteroid_ms: 0.0,
            last_cluster_ms: 0.0,
            score: 0,
            rocket: Rocket::at_start(&viewport),
            camera: Vec2::ZERO,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            explosions: Vec::new(),
            background_offset: 0.0,
            events: Vec::new(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        };
        state.update_camera();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Recompute the camera from the rocket position
    pub fn update_camera(&mut self) {
        self.camera = match self.config.frame {
            FrameModel::ScreenFixed => Vec2::ZERO,
            FrameModel::CameraFollow => self.rocket.pos - self.viewport.half(),
        };
    }

    /// Translate a world position into screen coordinates
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera
    }

    /// Add a hazard at an explicit position, returning its id
    pub fn push_asteroid(&mut self, pos: Vec2, cluster: bool, variant: u8) -> u32 {
        let id = self.next_entity_id();
        let asteroid = if cluster {
            Asteroid::cluster(id, pos, variant)
        } else {
            Asteroid::plain(id, pos, variant)
        };
        self.asteroids.push(asteroid);
        id
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
