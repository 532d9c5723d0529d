//! Abstract per-tank input state with edge detection.
//!
//! The engine holds the current and previous frame's pressed controls per
//! tank. `end_frame` copies current into previous; "just pressed" is
//! pressed now and not pressed last frame.

use std::collections::{BTreeMap, BTreeSet};

use dzone_core::enums::{Control, Port};
use dzone_core::types::{ControlIntent, TankId};

#[derive(Debug, Clone, Default)]
pub struct InputState {
    current: BTreeMap<TankId, BTreeSet<Control>>,
    previous: BTreeMap<TankId, BTreeSet<Control>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, tank: TankId, control: Control) {
        self.current.entry(tank).or_default().insert(control);
    }

    pub fn release(&mut self, tank: TankId, control: Control) {
        if let Some(set) = self.current.get_mut(&tank) {
            set.remove(&control);
        }
    }

    pub fn is_pressed(&self, tank: TankId, control: Control) -> bool {
        held(&self.current, tank, control)
    }

    pub fn is_just_pressed(&self, tank: TankId, control: Control) -> bool {
        held(&self.current, tank, control) && !held(&self.previous, tank, control)
    }

    pub fn is_just_released(&self, tank: TankId, control: Control) -> bool {
        !held(&self.current, tank, control) && held(&self.previous, tank, control)
    }

    /// Latch this frame's state for next frame's edge detection.
    pub fn end_frame(&mut self) {
        self.previous = self.current.clone();
    }

    /// Forget everything, including held controls.
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
    }

    /// Map a tank's controls to this frame's intent. Opposing controls cancel.
    pub fn intent_for(&self, tank: TankId) -> ControlIntent {
        let axis = |neg: Control, pos: Control| {
            let mut value = 0.0;
            if self.is_pressed(tank, pos) {
                value += 1.0;
            }
            if self.is_pressed(tank, neg) {
                value -= 1.0;
            }
            value
        };
        ControlIntent {
            thrust: axis(Control::Backward, Control::Forward),
            rotation: axis(Control::TurnLeft, Control::TurnRight),
            fire: self.is_just_pressed(tank, Control::Fire),
            next_weapon: self.is_just_pressed(tank, Control::ChangeWeapon),
            select_port: Port::ALL
                .into_iter()
                .find(|p| self.is_just_pressed(tank, Control::SelectPort(*p)))
                .map(Port::number),
        }
    }
}

fn held(map: &BTreeMap<TankId, BTreeSet<Control>>, tank: TankId, control: Control) -> bool {
    map.get(&tank).is_some_and(|set| set.contains(&control))
}
