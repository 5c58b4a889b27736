//! windowed bootstrap for the overworld demo
//!
//! Arrows / WASD to walk, E to interact near a landmark, Enter to leave an
//! encounter. F11 toggles borderless fullscreen.

use bevy::diagnostic::{
    EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin,
};
use bevy::input::ButtonInput;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};

use overworld::config::WorldConfig;
use overworld::OverworldPlugin;

/* ------------------------------------------------------------------------ */
/* F11 borderless‑fullscreen toggle                                         */
/* ------------------------------------------------------------------------ */
fn toggle_fullscreen(
    keys: Res<ButtonInput<KeyCode>>,
    mut window_q: Query<&mut Window, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::F11) {
        let Ok(mut window) = window_q.get_single_mut() else { return };
        window.mode = match window.mode {
            WindowMode::Windowed => {
                WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
            }
            _ => WindowMode::Windowed,
        };
    }
}

/* ------------------------------------------------------------------------ */
/* main                                                                     */
/* ------------------------------------------------------------------------ */
fn main() {
    let path = WorldConfig::default_path();
    // logging is not up yet; report a bad config once the app starts
    let (config, rejected) = match WorldConfig::load_or_default(&path) {
        Ok(config) => (config, None),
        Err(e) => (WorldConfig::default(), Some(e.to_string())),
    };

    App::new()
        /* diagnostics ----------------------------------------------------- */
        .add_plugins((
            LogDiagnosticsPlugin::default(),
            FrameTimeDiagnosticsPlugin::default(),
            EntityCountDiagnosticsPlugin::default(),
        ))

        /* bevy core ------------------------------------------------------- */
        .insert_resource(ClearColor(Color::BLACK))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Overworld".into(),
                resolution: (1280., 720.).into(),
                mode: WindowMode::Windowed,
                ..default()
            }),
            ..default()
        }))

        /* game ------------------------------------------------------------ */
        .insert_resource(config)
        .add_plugins(OverworldPlugin)
        .add_systems(Startup, move || {
            if let Some(reason) = &rejected {
                warn!("invalid config, using defaults: {reason}");
            }
        })
        .add_systems(Update, toggle_fullscreen)
        .run();
}
