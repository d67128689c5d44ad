use bevy::input::{keyboard::KeyCode, mouse::MouseButton};
use bevy::prelude::*;

/// Animation running flag. When false the orbit tick is skipped; live
/// projectiles keep drifting, matching the always-on render loop of the
/// original scene.
#[derive(Resource, Debug)]
pub struct Playing(pub bool);

impl Default for Playing {
    fn default() -> Self {
        Playing(true)
    }
}

#[derive(Event, Clone, Copy, Default)]
pub struct Play;

#[derive(Event, Clone, Copy, Default)]
pub struct Pause;

/// Fire one laser from each orbiting ship.
#[derive(Event, Clone, Copy, Default)]
pub struct FireShips;

/// Fire the station's beam.
#[derive(Event, Clone, Copy, Default)]
pub struct FireStation;

#[derive(Resource, Debug)]
pub struct Controls {
    pub play: ButtonInput,
    pub pause: ButtonInput,
    pub fire_ships: ButtonInput,
    pub fire_station: ButtonInput,
}

impl Controls {
    pub fn new() -> Self {
        Controls {
            play: ButtonInput::Keyboard(KeyCode::KeyP),
            pause: ButtonInput::Keyboard(KeyCode::KeyO),
            fire_ships: ButtonInput::Keyboard(KeyCode::KeyF),
            fire_station: ButtonInput::Keyboard(KeyCode::KeyG),
        }
    }
}

#[derive(Debug)]
pub enum ButtonInput {
    Keyboard(KeyCode),
    Mouse(MouseButton),
}

impl ButtonInput {
    fn just_pressed(
        &self,
        keyboard_input: &bevy::input::ButtonInput<KeyCode>,
        mouse_input: &bevy::input::ButtonInput<MouseButton>,
    ) -> bool {
        match *self {
            ButtonInput::Keyboard(key_code) => keyboard_input.just_pressed(key_code),
            ButtonInput::Mouse(mouse_button) => mouse_input.just_pressed(mouse_button),
        }
    }
}

pub struct Plugin;

impl Plugin {
    fn process_inputs(
        controls: Res<Controls>,
        keyboard_input: Res<bevy::input::ButtonInput<KeyCode>>,
        mouse_input: Res<bevy::input::ButtonInput<MouseButton>>,
        mut play_event_writer: EventWriter<Play>,
        mut pause_event_writer: EventWriter<Pause>,
        mut fire_ships_event_writer: EventWriter<FireShips>,
        mut fire_station_event_writer: EventWriter<FireStation>,
    ) {
        if controls.play.just_pressed(&keyboard_input, &mouse_input) {
            play_event_writer.send(Play);
        }

        if controls.pause.just_pressed(&keyboard_input, &mouse_input) {
            pause_event_writer.send(Pause);
        }

        if controls.fire_ships.just_pressed(&keyboard_input, &mouse_input) {
            fire_ships_event_writer.send(FireShips);
        }

        if controls
            .fire_station
            .just_pressed(&keyboard_input, &mouse_input)
        {
            fire_station_event_writer.send(FireStation);
        }
    }

    fn apply_playback(
        mut playing: ResMut<Playing>,
        mut play_event_reader: EventReader<Play>,
        mut pause_event_reader: EventReader<Pause>,
    ) {
        if play_event_reader.read().last().is_some() {
            playing.0 = true;
        }

        if pause_event_reader.read().last().is_some() {
            playing.0 = false;
        }
    }
}

impl bevy::app::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Controls::new())
            .init_resource::<Playing>()
            .add_event::<Play>()
            .add_event::<Pause>()
            .add_event::<FireShips>()
            .add_event::<FireStation>()
            .add_systems(
                Update,
                (Self::process_inputs, Self::apply_playback).chain(),
            );
    }
}
