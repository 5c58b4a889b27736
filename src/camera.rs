use bevy::prelude::*;

use crate::world::Overworld;
use crate::zones::{Area, WorldBounds};

/// The slice of the world currently on screen, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraView {
    /// top‑left corner
    pub pos: Vec2,
    /// screen size divided by zoom
    pub size: Vec2,
}

impl CameraView {
    /// Effective viewport for a window of `screen` pixels at `zoom`.
    pub fn effective_size(screen: Vec2, zoom: f32) -> Vec2 {
        screen / zoom
    }

    /// Centre on `target`, then clamp so the view never leaves the world.
    /// A viewport larger than the world is shrunk to the world.
    pub fn follow(target: Vec2, size: Vec2, bounds: &WorldBounds) -> Self {
        let size = size.min(bounds.size());
        let pos = (target - size * 0.5).clamp(Vec2::ZERO, bounds.size() - size);
        Self { pos, size }
    }

    #[inline]
    pub fn area(&self) -> Area {
        Area::new(self.pos.x, self.pos.y, self.size.x, self.size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// pixel snapping helper – keeps the camera on whole pixels so sprites never
/// land on half‑pixels and shimmer
#[inline]
fn snap(v: f32) -> f32 {
    v.round()
}

/// Window size → effective viewport. Runs before the tick so the camera clamp
/// uses the current window.
pub fn track_viewport_system(window_q: Query<&Window>, mut world: ResMut<Overworld>) {
    let Ok(window) = window_q.get_single() else { return };
    let screen = Vec2::new(window.width(), window.height());
    // mutable access only on a real resize; it flags `Overworld` as changed
    if CameraView::effective_size(screen, world.zoom) != world.camera.size {
        world.set_screen(screen);
    }
}

/// Place the bevy camera at the centre of the clamped view.
///
/// NOTE: runs in **PostUpdate**; world y grows downward, bevy's grows up.
pub fn camera_follow_system(
    mut cam_q: Query<&mut Transform, With<Camera>>,
    world: Res<Overworld>,
) {
    let Ok(mut cam_tf) = cam_q.get_single_mut() else { return };
    let center = world.camera.center();
    cam_tf.translation.x = snap(center.x);
    cam_tf.translation.y = snap(-center.y);
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: WorldBounds = WorldBounds { width: 10_000.0, height: 10_000.0 };

    #[test]
    fn centres_on_target() {
        let v = CameraView::follow(Vec2::new(5000.0, 5000.0), Vec2::new(2000.0, 1000.0), &WORLD);
        assert_eq!(v.pos, Vec2::new(4000.0, 4500.0));
    }

    #[test]
    fn clamps_at_corners() {
        let size = Vec2::new(2133.0, 1200.0);
        let v = CameraView::follow(Vec2::ZERO, size, &WORLD);
        assert_eq!(v.pos, Vec2::ZERO);
        let v = CameraView::follow(Vec2::splat(9_990.0), size, &WORLD);
        assert_eq!(v.pos, Vec2::new(10_000.0 - 2133.0, 10_000.0 - 1200.0));
    }

    #[test]
    fn oversized_viewport_is_shrunk() {
        let small = WorldBounds { width: 500.0, height: 400.0 };
        let v = CameraView::follow(Vec2::new(250.0, 200.0), Vec2::new(3200.0, 1800.0), &small);
        assert_eq!(v.pos, Vec2::ZERO);
        assert_eq!(v.size, Vec2::new(500.0, 400.0));
    }

    #[test]
    fn zoom_widens_the_view() {
        let s = CameraView::effective_size(Vec2::new(1280.0, 720.0), 0.5);
        assert_eq!(s, Vec2::new(2560.0, 1440.0));
    }

    #[derive(Resource, Default)]
    struct Seen(Vec<bool>);

    fn record_change(world: Res<Overworld>, mut seen: ResMut<Seen>) {
        seen.0.push(world.is_changed());
    }

    #[test]
    fn steady_window_leaves_world_unchanged() {
        let config = crate::config::WorldConfig { spawn_seed: Some(1), ..default() };
        let mut app = App::new();
        app.insert_resource(Overworld::new(&config, Vec2::new(1280.0, 720.0)))
            .init_resource::<Seen>()
            .add_systems(Update, (track_viewport_system, record_change).chain());
        let window = app.world_mut().spawn(Window::default()).id();

        app.update(); // first run sees the insert
        app.update();
        assert_eq!(app.world().resource::<Seen>().0, vec![true, false]);

        app.world_mut()
            .get_mut::<Window>(window)
            .unwrap()
            .resolution
            .set(800.0, 600.0);
        app.update();
        assert_eq!(app.world().resource::<Seen>().0, vec![true, false, true]);
        assert_eq!(
            app.world().resource::<Overworld>().camera.size,
            Vec2::new(800.0, 600.0) / config.zoom
        );
    }
}
