//! The controller seam between the engine and decision logic.

use glam::DVec2;

use dzone_core::types::{ControlIntent, TankId};

/// Another tank as seen by a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub id: TankId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub alive: bool,
}

/// Everything a controller may look at for one decision.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerContext {
    pub id: TankId,
    pub position: DVec2,
    pub angle: f64,
    pub alive: bool,
    /// True if the tank could fire its active weapon right now.
    pub can_fire: bool,
    pub energy: f64,
    /// Every other tank in the arena.
    pub others: Vec<TargetInfo>,
    /// Frame time in seconds.
    pub dt: f64,
}

impl ControllerContext {
    /// Closest living tank other than this one, ties broken by id.
    pub fn nearest_enemy(&self) -> Option<&TargetInfo> {
        self.others
            .iter()
            .filter(|t| t.alive && t.id != self.id)
            .min_by(|a, b| {
                let da = a.position.distance_squared(self.position);
                let db = b.position.distance_squared(self.position);
                da.total_cmp(&db).then(a.id.cmp(&b.id))
            })
    }
}

/// Pluggable decision strategy for a non-human tank.
pub trait TankController: Send {
    /// Decide this frame's intents.
    fn decide(&mut self, ctx: &ControllerContext) -> ControlIntent;
}
