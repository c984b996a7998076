use bevy::{
    input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel},
    prelude::*,
};

use crate::settings::InputSettings;

/// Mouse axes for the current frame, in axis units rather than pixels.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct MouseAxes {
    /// Positive when the mouse moves right.
    pub x: f32,
    /// Positive when the mouse moves up.
    pub y: f32,
    /// Positive when the wheel scrolls forward (zoom in).
    pub scroll: f32,
}

pub fn read_mouse_axes(
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    settings: Res<InputSettings>,
    mut axes: ResMut<MouseAxes>,
) {
    let delta: Vec2 = mouse_motion.read().map(|event| event.delta).sum();

    let scroll: f32 = mouse_wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y * settings.scroll_line_scale,
            MouseScrollUnit::Pixel => event.y * settings.scroll_pixel_scale,
        })
        .sum();

    *axes = MouseAxes {
        x: delta.x * settings.mouse_axis_scale,
        // Screen space grows downward
        y: -delta.y * settings.mouse_axis_scale,
        scroll,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn motion_and_wheel_become_axes() {
        let mut app = App::new();
        app.add_event::<MouseMotion>()
            .add_event::<MouseWheel>()
            .init_resource::<InputSettings>()
            .init_resource::<MouseAxes>()
            .add_systems(Update, read_mouse_axes);

        app.world_mut().send_event(MouseMotion {
            delta: Vec2::new(10.0, -4.0),
        });
        app.world_mut().send_event(MouseMotion {
            delta: Vec2::new(2.0, 0.0),
        });
        app.world_mut().send_event(MouseWheel {
            unit: MouseScrollUnit::Line,
            x: 0.0,
            y: -1.0,
            window: Entity::PLACEHOLDER,
        });
        app.update();

        let axes = *app.world().resource::<MouseAxes>();
        assert!((axes.x - 1.2).abs() < 1e-5);
        assert!((axes.y - 0.4).abs() < 1e-5);
        assert!((axes.scroll + 0.1).abs() < 1e-5);

        // Nothing new next frame
        app.update();
        assert_eq!(*app.world().resource::<MouseAxes>(), MouseAxes::default());
    }
}
