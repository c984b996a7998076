use bevy::prelude::*;

use super::cursor::CursorLock;
use super::input::MouseAxes;
use super::rig::{
    first_person_turn, CameraAnchors, CameraAttachment, OrbitStep, PlayerCamera, RigError, RigPart,
};
use crate::player::{ControllerState, Player, PlayerCharacterController};
use crate::settings::CameraSettings;

fn set_fov(projection: &mut Projection, degrees: f32) {
    if let Projection::Perspective(perspective) = projection {
        perspective.fov = degrees.to_radians();
    }
}

/// Positions the camera after the character has moved this frame.
///
/// Anchors are children of the body, so their world pose is rebuilt from the
/// body's current `Transform` instead of last frame's `GlobalTransform`.
pub fn update_camera(
    time: Res<Time>,
    axes: Res<MouseAxes>,
    cursor: Res<CursorLock>,
    settings: Res<CameraSettings>,
    mut cameras: Query<
        (&mut PlayerCamera, &CameraAnchors, &mut Transform, &mut Projection),
        Without<Player>,
    >,
    mut bodies: Query<(&mut PlayerCharacterController, &mut Transform), With<Player>>,
    anchors: Query<&Transform, (Without<Player>, Without<PlayerCamera>)>,
) {
    let delta_secs = time.delta_secs();

    for (mut camera, rig, mut camera_transform, mut projection) in cameras.iter_mut() {
        let Ok((mut controller, mut body)) = bodies.get_mut(rig.body) else {
            continue;
        };
        let (Ok(head), Ok(look_target), Ok(orbit_target)) = (
            anchors.get(rig.head),
            anchors.get(rig.look_target),
            anchors.get(rig.orbit_target),
        ) else {
            continue;
        };

        let head_world = body.mul_transform(*head);

        match controller.state {
            ControllerState::ThirdPersonMode => {
                if cursor.is_locked() && camera.orbit(&axes, &settings) == OrbitStep::EnterFirstPerson {
                    let look_world = body.transform_point(look_target.translation);
                    camera.attach_to_head(&head_world, look_world);
                    set_fov(&mut projection, settings.first_person_fov);
                    controller.state = ControllerState::FirstPersonMode;
                    info!("Camera switched to first person");
                }
            }
            ControllerState::FirstPersonMode => {
                if cursor.is_locked() {
                    camera.look_vertical(axes.y, delta_secs, &settings);
                    body.rotate(first_person_turn(axes.x, delta_secs, &settings));

                    if axes.scroll < 0.0 {
                        let current = camera.head_pose(&body.mul_transform(*head));
                        camera.detach_to_orbit(current.rotation, &settings);
                        set_fov(&mut projection, settings.third_person_fov);
                        controller.state = ControllerState::ThirdPersonMode;
                        info!("Camera switched to third person");
                    }
                }
            }
            ControllerState::Disabled => continue,
        }

        *camera_transform = match camera.attachment {
            CameraAttachment::Head => camera.head_pose(&body.mul_transform(*head)),
            CameraAttachment::OrbitTarget => {
                camera.orbit_pose(body.transform_point(orbit_target.translation))
            }
        };
    }
}

/// Fails fast when the player camera points at entities that do not exist.
pub fn verify_camera_rig(
    cameras: Query<&CameraAnchors, With<PlayerCamera>>,
    bodies: Query<(), (With<Player>, With<PlayerCharacterController>, With<Transform>)>,
    anchors: Query<(), With<Transform>>,
    mut exit: EventWriter<AppExit>,
) {
    let result = match cameras.get_single() {
        Ok(rig) => rig.validate(|part, entity| match part {
            RigPart::CharacterController => bodies.contains(entity),
            _ => anchors.contains(entity),
        }),
        Err(_) => Err(RigError::CameraCount),
    };

    match result {
        Ok(()) => info!("Camera rig ready"),
        Err(err) => {
            error!("Camera rig misconfigured: {err}");
            exit.send(AppExit::error());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{HEAD_OFFSET, LOOK_TARGET_OFFSET, ORBIT_TARGET_OFFSET};

    struct Rig {
        body: Entity,
        camera: Entity,
    }

    fn camera_app(state: ControllerState, camera: PlayerCamera) -> (App, Rig) {
        let mut app = App::new();
        app.init_resource::<Time>()
            .init_resource::<MouseAxes>()
            .init_resource::<CursorLock>()
            .init_resource::<CameraSettings>()
            .add_systems(Update, update_camera);

        let world = app.world_mut();
        let body = world
            .spawn((
                Player,
                PlayerCharacterController::new(state),
                Transform::from_xyz(0.0, 0.9, 0.0),
            ))
            .id();
        let head = world.spawn(Transform::from_translation(HEAD_OFFSET)).id();
        let look_target = world.spawn(Transform::from_translation(LOOK_TARGET_OFFSET)).id();
        let orbit_target = world.spawn(Transform::from_translation(ORBIT_TARGET_OFFSET)).id();
        let camera = world
            .spawn((
                camera,
                CameraAnchors {
                    body,
                    head,
                    look_target,
                    orbit_target,
                },
                Transform::default(),
                Projection::Perspective(PerspectiveProjection::default()),
            ))
            .id();

        (app, Rig { body, camera })
    }

    fn set_scroll(app: &mut App, scroll: f32) {
        app.world_mut().resource_mut::<MouseAxes>().scroll = scroll;
    }

    fn state(app: &App, rig: &Rig) -> ControllerState {
        app.world().get::<PlayerCharacterController>(rig.body).unwrap().state
    }

    fn fov_degrees(app: &App, rig: &Rig) -> f32 {
        match app.world().get::<Projection>(rig.camera).unwrap() {
            Projection::Perspective(perspective) => perspective.fov.to_degrees(),
            _ => panic!("expected a perspective projection"),
        }
    }

    #[test]
    fn zoom_in_past_minimum_attaches_to_head() {
        let (mut app, rig) = camera_app(ControllerState::ThirdPersonMode, PlayerCamera::new(1.2));
        set_scroll(&mut app, 0.1);
        app.update();

        assert_eq!(state(&app, &rig), ControllerState::FirstPersonMode);
        assert!((fov_degrees(&app, &rig) - 90.0).abs() < 1e-3);
        let transform = app.world().get::<Transform>(rig.camera).unwrap();
        let expected = Vec3::new(0.0, 0.9, 0.0) + HEAD_OFFSET;
        assert!(transform.translation.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn third_person_tracks_orbit_target() {
        let (mut app, rig) = camera_app(ControllerState::ThirdPersonMode, PlayerCamera::new(3.5));
        set_scroll(&mut app, 0.1);
        app.update();

        assert_eq!(state(&app, &rig), ControllerState::ThirdPersonMode);
        let camera = app.world().get::<PlayerCamera>(rig.camera).unwrap();
        assert!((camera.distance - 3.0).abs() < 1e-4);
        let transform = app.world().get::<Transform>(rig.camera).unwrap();
        let target = Vec3::new(0.0, 0.9, 0.0) + ORBIT_TARGET_OFFSET;
        assert!(transform.translation.abs_diff_eq(target + Vec3::new(0.0, 0.0, 3.0), 1e-4));
    }

    #[test]
    fn any_negative_scroll_leaves_first_person() {
        let (mut app, rig) = camera_app(ControllerState::FirstPersonMode, PlayerCamera::new(1.2));

        app.update();
        assert_eq!(state(&app, &rig), ControllerState::FirstPersonMode);

        set_scroll(&mut app, -0.001);
        app.update();
        assert_eq!(state(&app, &rig), ControllerState::ThirdPersonMode);
        assert!((fov_degrees(&app, &rig) - 70.0).abs() < 1e-3);
    }

    #[test]
    fn positive_scroll_keeps_first_person() {
        let (mut app, rig) = camera_app(ControllerState::FirstPersonMode, PlayerCamera::new(1.2));
        app.world_mut().get_mut::<PlayerCamera>(rig.camera).unwrap().attachment = CameraAttachment::Head;

        set_scroll(&mut app, 0.5);
        app.update();
        assert_eq!(state(&app, &rig), ControllerState::FirstPersonMode);
        let camera = app.world().get::<PlayerCamera>(rig.camera).unwrap();
        assert_eq!(camera.attachment, CameraAttachment::Head);
        assert!((camera.distance - 1.2).abs() < 1e-4);
    }

    #[test]
    fn unlocked_cursor_ignores_scroll() {
        let (mut app, rig) = camera_app(ControllerState::FirstPersonMode, PlayerCamera::new(1.2));
        // Unlock against a detached controller so the body stays in first person
        let mut detached = PlayerCharacterController::new(ControllerState::FirstPersonMode);
        app.world_mut().resource_mut::<CursorLock>().toggle(&mut detached);
        set_scroll(&mut app, -1.0);
        app.update();
        assert_eq!(state(&app, &rig), ControllerState::FirstPersonMode);
    }

    #[test]
    fn disabled_character_freezes_camera() {
        let (mut app, rig) = camera_app(ControllerState::Disabled, PlayerCamera::new(3.5));
        set_scroll(&mut app, 1.0);
        app.update();
        let transform = app.world().get::<Transform>(rig.camera).unwrap();
        assert_eq!(*transform, Transform::default());
    }

    #[test]
    fn missing_anchor_requests_exit() {
        let mut app = App::new();
        app.add_event::<AppExit>().add_systems(Update, verify_camera_rig);
        let body = app
            .world_mut()
            .spawn((Player, PlayerCharacterController::default(), Transform::default()))
            .id();
        app.world_mut().spawn((
            PlayerCamera::new(3.5),
            CameraAnchors {
                body,
                head: body,
                look_target: Entity::from_raw(999),
                orbit_target: body,
            },
        ));
        app.update();

        assert!(app.should_exit().is_some_and(|exit| exit.is_error()));
    }
}
