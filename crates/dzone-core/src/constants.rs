//! Simulation constants and tuning values.

// --- Timing ---

/// Nominal frame rate for the headless runner (Hz).
pub const TICK_RATE: u32 = 60;
/// Nominal seconds per frame.
pub const DT: f64 = 1.0 / TICK_RATE as f64;
/// Longest substep the engine integrates at once; longer ticks are split.
pub const MAX_FRAME_DT: f64 = 0.1;

// --- Arena ---

pub const ARENA_WIDTH: f64 = 960.0;
pub const ARENA_HEIGHT: f64 = 720.0;
/// Fraction of outward velocity kept when a tank hits a wall.
pub const WALL_RESTITUTION: f64 = 0.5;
/// Spawn points in fill order (corners first, then edge midpoints).
pub const SPAWN_POINTS: [(f64, f64); 6] = [
    (66.5, 66.5),
    (893.5, 653.5),
    (893.5, 66.5),
    (66.5, 653.5),
    (479.5, 66.5),
    (479.5, 653.5),
];

// --- Tank base stats ---

pub const TANK_BASE_SIZE: f64 = 30.0;
pub const TANK_BASE_SHIELD: f64 = 40.0;
pub const TANK_BASE_ENERGY: f64 = 100.0;
/// Weapon energy regained per second while alive.
pub const ENERGY_REGEN_RATE: f64 = 10.0;

// --- Tank physics ---

/// Acceleration per unit of thrust and speed stat (units/s²).
pub const THRUST_ACCEL: f64 = 200.0;
/// Max linear speed per unit of speed stat (units/s).
pub const MAX_SPEED_PER_STAT: f64 = 100.0;
/// Proportional braking rate with no thrust (1/s).
pub const BRAKE_RATE: f64 = 3.0;
/// Below this speed a braking tank stops dead.
pub const MIN_SPEED: f64 = 0.1;
/// Angular velocity per unit of rotation power and rotation stat (rad/s).
pub const ROTATION_POWER: f64 = 3.0;
/// Rate at which angular velocity blends toward its target (1/s).
pub const ROTATION_BLEND_RATE: f64 = 18.0;
/// Rate at which angular velocity decays with no rotation input (1/s).
pub const ROTATION_DECAY_RATE: f64 = 24.0;
/// Below this angular speed a decaying tank stops turning.
pub const MIN_ANGULAR_SPEED: f64 = 0.01;
/// Velocity kept along the contact normal in tank-tank collisions.
pub const TANK_RESTITUTION: f64 = 0.8;

// --- Projectiles ---

/// Direction blend per guidance step.
pub const GUIDANCE_STRENGTH: f64 = 0.1;
/// Range at which a guided projectile acquires a target.
pub const GUIDANCE_RANGE: f64 = 400.0;
pub const DEFAULT_PROJECTILE_RADIUS: f64 = 3.0;

/// Generic projectile used for weapon types with no recipe.
pub const FALLBACK_DAMAGE: f64 = 3.0;
pub const FALLBACK_SPEED: f64 = 200.0;
pub const FALLBACK_LIFETIME: f64 = 3.0;

// --- Explosions ---

pub const EXPLOSION_DURATION: f64 = 1.0;
/// Velocity imparted at the center of a blast, falling off with distance (units/s).
pub const EXPLOSION_KNOCKBACK: f64 = 150.0;

// --- Upgrades ---

pub const SPEED_UPGRADE_FACTOR: f64 = 1.5;
pub const ROTATION_UPGRADE_FACTOR: f64 = 1.5;
pub const ARMOR_UPGRADE_FACTOR: f64 = 1.33;
pub const ENERGY_UPGRADE_FACTOR: f64 = 1.5;
/// Upgrades are binary: level 0 or 1.
pub const MAX_UPGRADE_LEVEL: u8 = 1;

// --- Economy ---

/// Score points per price-multiplier step.
pub const PRICE_SCORE_STEP: u32 = 10;
/// Price increase per step.
pub const PRICE_STEP_FACTOR: f64 = 0.05;
