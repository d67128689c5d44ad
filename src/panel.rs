use bevy::prelude::*;

use super::controls;

/// On-screen control panel: play/pause plus the two fire actions. Buttons
/// emit the same action events as the keyboard bindings.
#[derive(Component, Clone, Copy, Debug)]
enum PanelAction {
    Play,
    Pause,
    FireShips,
    FireStation,
}

#[derive(Component)]
struct PanelRoot;

pub struct Plugin;

impl Plugin {
    fn spawn_panel(mut commands: Commands) {
        commands
            .spawn((
                PanelRoot,
                Name::new("ControlPanel"),
                BackgroundColor(Color::srgb(0.10, 0.11, 0.13)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(12.0),
                    left: Val::Px(12.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(6.0),
                    padding: UiRect::all(Val::Px(10.0)),
                    ..default()
                },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Text::new("Animation"),
                    TextFont {
                        font_size: 16.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));

                let buttons = [
                    (PanelAction::Play, "Play"),
                    (PanelAction::Pause, "Pause"),
                    (PanelAction::FireShips, "Fire ships"),
                    (PanelAction::FireStation, "Fire station"),
                ];

                for (action, label) in buttons {
                    parent
                        .spawn((
                            Button,
                            action,
                            BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                            Node {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(6.0)),
                                justify_content: JustifyContent::Center,
                                ..default()
                            },
                        ))
                        .with_children(|parent| {
                            parent.spawn((
                                Text::new(label),
                                TextFont {
                                    font_size: 14.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                            ));
                        });
                }
            });
    }

    fn panel_interactions(
        mut buttons: Query<
            (&Interaction, &PanelAction, &mut BackgroundColor),
            (Changed<Interaction>, With<Button>),
        >,
        mut play_event_writer: EventWriter<controls::Play>,
        mut pause_event_writer: EventWriter<controls::Pause>,
        mut fire_ships_event_writer: EventWriter<controls::FireShips>,
        mut fire_station_event_writer: EventWriter<controls::FireStation>,
    ) {
        for (interaction, action, mut background) in buttons.iter_mut() {
            match *interaction {
                Interaction::Pressed => {
                    *background = BackgroundColor(Color::srgb(0.18, 0.20, 0.24));
                    match action {
                        PanelAction::Play => {
                            play_event_writer.send(controls::Play);
                        }
                        PanelAction::Pause => {
                            pause_event_writer.send(controls::Pause);
                        }
                        PanelAction::FireShips => {
                            fire_ships_event_writer.send(controls::FireShips);
                        }
                        PanelAction::FireStation => {
                            fire_station_event_writer.send(controls::FireStation);
                        }
                    }
                }
                Interaction::Hovered => *background = BackgroundColor(Color::srgb(0.26, 0.28, 0.32)),
                Interaction::None => *background = BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
            }
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, Self::spawn_panel)
            .add_systems(Update, Self::panel_interactions);
    }
}
