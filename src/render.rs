//! sprites for everything that is not a terrain tile
//!
//! World coordinates grow downward; bevy's y grows up, so every transform
//! here negates y. Sprites are centred, world positions are top‑left.

use bevy::prelude::*;
use bevy::utils::HashMap;

use crate::components::*;
use crate::config::WorldConfig;
use crate::constants::CREATURE_BLINK_SECS;
use crate::interaction::InteractionEvent;
use crate::movement::Encounter;
use crate::spawn::CreatureId;
use crate::world::Overworld;
use crate::zones::Area;

/// top‑left world rect → centred bevy transform
#[inline]
fn area_transform(area: &Area, z: f32) -> Transform {
    let c = area.center();
    Transform::from_xyz(c.x, -c.y, z)
}

fn label(text: &str, size: f32, at: Vec2, z: f32) -> (Text2d, TextFont, TextColor, Transform) {
    (
        Text2d::new(text),
        TextFont { font_size: size, ..default() },
        TextColor(Color::WHITE),
        Transform::from_xyz(at.x, -at.y, z),
    )
}

/* ===========================================================
   startup
   =========================================================== */
pub fn setup_scene(mut commands: Commands, config: Res<WorldConfig>, world: Res<Overworld>) {
    /* camera: zoom < 1 shows more world ------------------------------- */
    commands.spawn((
        Camera2d,
        OrthographicProjection {
            scale: 1.0 / config.zoom,
            ..OrthographicProjection::default_2d()
        },
    ));

    /* world floor ------------------------------------------------------ */
    let whole = Area::new(0.0, 0.0, config.world.width, config.world.height);
    commands.spawn((
        Sprite::from_color(Color::BLACK, area_size(&whole)),
        area_transform(&whole, -2.0),
    ));

    /* town ------------------------------------------------------------- */
    commands.spawn((
        Sprite::from_color(Color::srgb_u8(0x11, 0x11, 0x11), area_size(&config.town)),
        area_transform(&config.town, 1.0),
    ));

    for b in &config.buildings {
        commands.spawn((
            Sprite::from_color(Color::srgb_u8(0x28, 0x28, 0x28), area_size(&b.area)),
            area_transform(&b.area, 1.1),
        ));
        commands.spawn(label(&b.label, 24.0, b.area.center(), 1.2));
        commands.spawn((
            label("[E] Interact", 16.0, Vec2::new(b.area.center().x, b.area.y - 20.0), 1.2),
            Visibility::Hidden,
            ReachPrompt { center: b.area.center(), radius: b.radius },
        ));
    }

    /* landmarks -------------------------------------------------------- */
    for l in &config.landmarks {
        let [r, g, b] = l.tint;
        commands.spawn((
            Sprite::from_color(Color::srgb_u8(r, g, b), area_size(&l.area)),
            area_transform(&l.area, 1.0),
        ));
        commands.spawn(label(&l.label, 20.0, l.area.center(), 1.2));
        commands.spawn((
            label(&l.prompt, 16.0, Vec2::new(l.area.center().x, l.area.y - 20.0), 1.2),
            Visibility::Hidden,
            ReachPrompt { center: l.area.center(), radius: l.radius },
        ));
    }

    /* player ----------------------------------------------------------- */
    let p = world.player.footprint();
    commands.spawn((
        Sprite::from_color(Color::WHITE, area_size(&p)),
        area_transform(&p, 10.0),
        PlayerSprite,
    ));

    /* hud -------------------------------------------------------------- */
    commands.spawn((
        Text::new(""),
        TextFont { font_size: 20.0, ..default() },
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(20.0),
            ..default()
        },
        PositionText,
    ));
    commands.spawn((
        Text::new(""),
        TextFont { font_size: 18.0, ..default() },
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            left: Val::Px(20.0),
            ..default()
        },
        MessageText,
    ));
}

#[inline]
fn area_size(area: &Area) -> Vec2 {
    Vec2::new(area.w, area.h)
}

/* ===========================================================
   per‑frame
   =========================================================== */
pub fn player_sprite_system(
    world: Res<Overworld>,
    mut q: Query<&mut Transform, With<PlayerSprite>>,
) {
    let Ok(mut tf) = q.get_single_mut() else { return };
    let c = world.player.footprint().center();
    tf.translation.x = c.x;
    tf.translation.y = -c.y;
}

/// Keep one sprite per live creature; despawn the ones that were taken.
pub fn sync_creature_sprites_system(
    mut commands: Commands,
    world: Res<Overworld>,
    q: Query<(Entity, &CreatureSprite)>,
) {
    if !world.is_changed() {
        return;
    }

    let mut existing: HashMap<CreatureId, Entity> =
        q.iter().map(|(e, tag)| (tag.0, e)).collect();

    for c in world.creatures.iter() {
        if existing.remove(&c.id).is_some() {
            continue;
        }
        let fp = c.footprint();
        commands.spawn((
            Sprite::from_color(world.creatures.rarities().color_of(c.rarity), area_size(&fp)),
            area_transform(&fp, 5.0),
            CreatureSprite(c.id),
        ));
    }

    for (_, e) in existing {
        commands.entity(e).despawn();
    }
}

/// Creatures blink: visible for one period, hidden for the next.
pub fn blink_creatures_system(
    time: Res<Time>,
    mut q: Query<&mut Visibility, With<CreatureSprite>>,
) {
    let on = (time.elapsed_secs() / CREATURE_BLINK_SECS) as u64 % 2 == 0;
    let vis = if on { Visibility::Inherited } else { Visibility::Hidden };
    for mut v in &mut q {
        v.set_if_neq(vis);
    }
}

pub fn reach_prompt_system(
    world: Res<Overworld>,
    mut q: Query<(&ReachPrompt, &mut Visibility)>,
) {
    let pos = world.player.pos;
    for (prompt, mut vis) in &mut q {
        let near = pos.distance(prompt.center) < prompt.radius;
        vis.set_if_neq(if near { Visibility::Inherited } else { Visibility::Hidden });
    }
}

pub fn hud_system(
    world: Res<Overworld>,
    mut interactions: EventReader<InteractionEvent>,
    mut encounters: EventReader<Encounter>,
    mut pos_q: Query<&mut Text, (With<PositionText>, Without<MessageText>)>,
    mut msg_q: Query<&mut Text, (With<MessageText>, Without<PositionText>)>,
) {
    if let Ok(mut text) = pos_q.get_single_mut() {
        let p = world.player.pos;
        text.0 = format!("Pos: {}, {}", p.x.round(), p.y.round());
    }

    let Ok(mut msg) = msg_q.get_single_mut() else { return };
    for ev in interactions.read() {
        msg.0 = format!("{}: {}", ev.label, ev.message);
    }
    for ev in encounters.read() {
        msg.0 = format!("A wild {} creature appeared! [Enter] to finish", ev.rarity);
    }
}
