use bevy::prelude::*;
use bevy::sprite::{Anchor, MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::configuration::config::DisplayConfig;
use crate::simulation::scenario::Scenario;
use crate::simulation::systems::{SimulationPlugin, StepSchedule};
use crate::visualization::{distance_label, world_to_screen};

#[derive(Component)]
struct BodyIndex(pub usize);

#[derive(Component)]
struct BodyLabel(pub usize);

const LABEL_Z: f32 = 2.0;
const BODY_Z: f32 = 1.0;

fn rgb(c: [u8; 3]) -> Color {
    Color::srgb_u8(c[0], c[1], c[2])
}

/// Open the viewer window and run until it is closed or the simulation halts
pub fn run_2d(scenario: Scenario, display: DisplayConfig) -> AppExit {
    let window = Window {
        title: display.title.clone(),
        resolution: (display.width as f32, display.height as f32).into(),
        ..default()
    };

    App::new()
        .insert_resource(ClearColor(rgb(display.background)))
        .insert_resource(Time::<Fixed>::from_hz(display.fps))
        .insert_resource(scenario)
        .insert_resource(display)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(window),
            ..default()
        }))
        .add_plugins(SimulationPlugin { schedule: StepSchedule::Fixed })
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (sync_transforms_system, update_labels_system, draw_trails_system))
        .run()
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    display: Res<DisplayConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    info!("run_2d: starting 2D viewer with {} bodies", scenario.system.bodies.len());

    commands.spawn(Camera2dBundle::default());

    for (i, body) in scenario.system.bodies.iter().enumerate() {
        let pos = world_to_screen(body.position(), display.pixels_per_au);
        let color = scenario.colors.get(i).copied().map(rgb).unwrap_or(Color::WHITE);

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(body.radius as f32))),
                material: materials.add(ColorMaterial::from(color)),
                transform: Transform::from_translation(pos.extend(BODY_Z)),
                ..default()
            },
            BodyIndex(i),
        ));

        if display.show_labels && !body.is_reference {
            commands.spawn((
                Text2dBundle {
                    text: Text::from_section(
                        String::new(),
                        TextStyle {
                            font_size: display.label_font_size,
                            color: Color::WHITE,
                            ..default()
                        },
                    ),
                    text_anchor: Anchor::TopLeft,
                    transform: Transform::from_translation(pos.extend(LABEL_Z)),
                    ..default()
                },
                BodyLabel(i),
            ));
        }
    }
}

fn sync_transforms_system(
    scenario: Res<Scenario>,
    display: Res<DisplayConfig>,
    mut query: Query<(&BodyIndex, &mut Transform)>,
) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.system.bodies.get(*i) {
            let pos = world_to_screen(b.position(), display.pixels_per_au);
            transform.translation.x = pos.x;
            transform.translation.y = pos.y;
        }
    }
}

fn update_labels_system(
    scenario: Res<Scenario>,
    display: Res<DisplayConfig>,
    mut query: Query<(&BodyLabel, &mut Text, &mut Transform)>,
) {
    for (BodyLabel(i), mut text, mut transform) in &mut query {
        let Some(b) = scenario.system.bodies.get(*i) else {
            continue;
        };
        let pos = world_to_screen(b.position(), display.pixels_per_au);
        // label hangs off the lower right of the body
        let r = b.radius as f32;
        transform.translation.x = pos.x + r;
        transform.translation.y = pos.y - r;

        if let (Some(label), Some(section)) = (distance_label(b), text.sections.first_mut()) {
            section.value = label;
        }
    }
}

fn draw_trails_system(scenario: Res<Scenario>, display: Res<DisplayConfig>, mut gizmos: Gizmos) {
    if !display.show_trails {
        return;
    }

    for (i, body) in scenario.system.bodies.iter().enumerate() {
        if body.trail_len() < 2 {
            continue;
        }
        let [r, g, b] = scenario.colors.get(i).copied().unwrap_or([255, 255, 255]);
        let scale = display.pixels_per_au;
        gizmos.linestrip_2d(
            body.trail().map(|p| world_to_screen(p, scale)),
            Color::srgba_u8(r, g, b, display.trail_color_alpha),
        );
    }
}
