//! Physical constants, model tuning parameters, and sweep defaults.

// --- Physics ---

/// Gravitational acceleration (m/s²).
pub const GRAVITY: f64 = 9.81;

// --- Area-kill model ---

/// Along-track aiming dispersion of a strike (meters, one sigma).
pub const AREA_DISPERSION_X: f64 = 4.0;

/// Cross-track aiming dispersion of a strike (meters, one sigma).
pub const AREA_DISPERSION_Y: f64 = 4.0;

// --- Line of sight ---

/// Altitude at and above which terrain line-of-sight is considered (meters).
/// Below it the defense never sees the attacker.
pub const LOS_ALTITUDE_THRESHOLD: f64 = 50.0;

/// Per-meter line-of-sight gain applied above the threshold altitude.
pub const LOS_ALTITUDE_GAIN: f64 = 0.1;

/// Constant subtracted from the altitude gain (threshold / threshold).
pub const LOS_ALTITUDE_OFFSET: f64 = LOS_ALTITUDE_THRESHOLD / LOS_ALTITUDE_THRESHOLD;

// --- Intercept accrual ---

/// Hard ceiling on accrual steps per battery before a scenario is failed.
/// Once the corridor is spent, the rest of a corridor-or-stock walk is
/// resolved in one step, so this bounds only the corridor itself.
pub const ACCRUAL_STEP_LIMIT: usize = 10_000;

// --- Vectoring turn solve ---

/// Starting lead angle for the Newton solve (degrees).
pub const NEWTON_START_ANGLE: f64 = 0.5;

/// Step size below which the Newton solve is considered converged.
pub const NEWTON_TOLERANCE: f64 = 1e-6;

/// Maximum Newton iterations.
pub const NEWTON_MAX_ITERATIONS: usize = 100;

// --- Sweep defaults ---

/// Smallest formation size swept.
pub const FORMATION_MIN: u32 = 1;

/// Largest formation size swept.
pub const FORMATION_MAX: u32 = 5;

/// Approach speed range (m/s, inclusive).
pub const SPEED_MIN: u32 = 100;
pub const SPEED_MAX: u32 = 300;
pub const SPEED_STEP: u32 = 50;

/// Altitude range (meters, inclusive).
pub const ALTITUDE_MIN: u32 = 50;
pub const ALTITUDE_MAX: u32 = 450;
pub const ALTITUDE_STEP: u32 = 50;

/// Lateral offset sweep extent in multiples of the aircraft's dispersion sigma.
pub const LATERAL_SIGMA_SPAN: f64 = 3.0;

/// Lateral offset step (meters).
pub const LATERAL_STEP: u32 = 100;
