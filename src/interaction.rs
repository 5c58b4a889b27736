//! "press E" interactions with town buildings and landmarks
use bevy::input::ButtonInput;
use bevy::prelude::*;

use crate::config::WorldConfig;
use crate::world::Overworld;
use crate::zones::{Building, BuildingKind, Landmark};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionAction {
    /// restore the party; carried out by the persistence layer
    Heal,
    /// show the message, nothing else
    Notice,
}

#[derive(Event, Clone, Debug, PartialEq)]
pub struct InteractionEvent {
    pub label: String,
    pub message: String,
    pub action: InteractionAction,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target<'a> {
    Building(&'a Building),
    Landmark(&'a Landmark),
}

impl Target<'_> {
    pub fn center(&self) -> Vec2 {
        match self {
            Target::Building(b) => b.area.center(),
            Target::Landmark(l) => l.area.center(),
        }
    }

    pub fn radius(&self) -> f32 {
        match self {
            Target::Building(b) => b.radius,
            Target::Landmark(l) => l.radius,
        }
    }

    pub fn event(&self) -> InteractionEvent {
        match self {
            Target::Building(b) => InteractionEvent {
                label: b.label.clone(),
                message: b.message.clone(),
                action: match b.kind {
                    BuildingKind::Hospital => InteractionAction::Heal,
                    BuildingKind::Shop => InteractionAction::Notice,
                },
            },
            Target::Landmark(l) => InteractionEvent {
                label: l.label.clone(),
                message: l.message.clone(),
                action: InteractionAction::Notice,
            },
        }
    }
}

/// Everything whose centre is strictly closer than its radius to `pos`.
/// Buildings first, then landmarks, each in declared order.
pub fn in_reach<'a>(
    pos: Vec2,
    buildings: &'a [Building],
    landmarks: &'a [Landmark],
) -> Vec<Target<'a>> {
    buildings
        .iter()
        .map(Target::Building)
        .chain(landmarks.iter().map(Target::Landmark))
        .filter(|t| pos.distance(t.center()) < t.radius())
        .collect()
}

pub fn interact_system(
    keys: Res<ButtonInput<KeyCode>>,
    world: Res<Overworld>,
    config: Res<WorldConfig>,
    mut events: EventWriter<InteractionEvent>,
) {
    if !keys.just_pressed(KeyCode::KeyE) || world.is_locked() {
        return;
    }
    for target in in_reach(world.player.pos, &config.buildings, &config.landmarks) {
        let ev = target.event();
        info!("interaction: {} ({:?})", ev.label, ev.action);
        events.send(ev);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reach_is_measured_from_centre() {
        let c = WorldConfig::default();
        // shrine centre (2150, 2150), radius 400
        let near = in_reach(Vec2::new(2150.0, 2549.0), &c.buildings, &c.landmarks);
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].event().label, "ANCIENT SHRINE");
        assert!(in_reach(Vec2::new(2150.0, 2550.0), &c.buildings, &c.landmarks).is_empty());
    }

    #[test]
    fn hospital_heals_shop_notices() {
        let c = WorldConfig::default();
        // hospital centre (4700, 4675), shop centre (5300, 4675)
        let near = in_reach(Vec2::new(4700.0, 4700.0), &c.buildings, &c.landmarks);
        assert_eq!(near.len(), 1);
        assert_eq!(near[0].event().action, InteractionAction::Heal);

        let near = in_reach(Vec2::new(5300.0, 4700.0), &c.buildings, &c.landmarks);
        assert_eq!(near[0].event().action, InteractionAction::Notice);
    }

    #[test]
    fn nothing_in_reach_in_the_wilds() {
        let c = WorldConfig::default();
        assert!(in_reach(Vec2::new(100.0, 100.0), &c.buildings, &c.landmarks).is_empty());
    }
}
