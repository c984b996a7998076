//! First and third person camera state.
//!
//! Yaw and pitch are tracked in degrees: positive yaw turns right, positive
//! pitch looks down. [`orbit_rotation`] maps them onto Bevy's right-handed,
//! -Z forward frame.

use bevy::prelude::*;
use thiserror::Error;

use super::input::MouseAxes;
use crate::settings::CameraSettings;

/// Anchor the camera pose is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraAttachment {
    /// Sits on the head anchor and turns with the body.
    Head,
    /// Orbits the orbit target at `distance`.
    #[default]
    OrbitTarget,
}

/// Outcome of a third person input frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbitStep {
    Orbit,
    /// Zoomed in past the minimum distance.
    EnterFirstPerson,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerCamera {
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub attachment: CameraAttachment,
    /// Rotation relative to the head anchor while attached to it.
    pub head_look: Quat,
}

impl PlayerCamera {
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            yaw: 0.0,
            pitch: 0.0,
            attachment: CameraAttachment::OrbitTarget,
            head_look: Quat::IDENTITY,
        }
    }

    /// Creates an orbiting camera whose accumulators match `rotation`.
    pub fn from_rotation(distance: f32, rotation: Quat) -> Self {
        let mut camera = Self::new(distance);
        camera.reset_angles(rotation);
        camera
    }

    pub fn reset_angles(&mut self, rotation: Quat) {
        let (yaw, pitch, _) = rotation.to_euler(EulerRot::YXZ);
        self.yaw = -yaw.to_degrees();
        self.pitch = -pitch.to_degrees();
    }

    /// Applies one frame of third person mouse input.
    ///
    /// Distance is left untouched when the zoom would go below the minimum;
    /// the caller switches to first person instead.
    pub fn orbit(&mut self, axes: &MouseAxes, settings: &CameraSettings) -> OrbitStep {
        self.yaw += axes.x * settings.third_person_mouse_x_speed * self.distance * settings.orbit_scale;
        self.pitch -= axes.y * settings.third_person_mouse_y_speed * settings.orbit_scale;
        self.pitch = clamp_angle(self.pitch, settings.pitch_min, settings.pitch_max);

        let desired = self.distance - axes.scroll * settings.zoom_speed;
        if desired < settings.min_distance {
            return OrbitStep::EnterFirstPerson;
        }
        self.distance = desired.clamp(settings.min_distance, settings.max_distance);
        OrbitStep::Orbit
    }

    /// Camera pose orbiting `target` at the current angles and distance.
    pub fn orbit_pose(&self, target: Vec3) -> Transform {
        let rotation = orbit_rotation(self.pitch, self.yaw);
        // Bevy looks down -Z, so behind the target is +Z
        let translation = rotation * Vec3::new(0.0, 0.0, self.distance) + target;
        Transform::from_translation(translation).with_rotation(rotation)
    }

    /// Snaps onto `head`, facing `look_target`, and returns the new world pose.
    pub fn attach_to_head(&mut self, head: &Transform, look_target: Vec3) -> Transform {
        let pose = Transform::from_translation(head.translation).looking_at(look_target, Vec3::Y);
        self.head_look = head.rotation.inverse() * pose.rotation;
        self.attachment = CameraAttachment::Head;
        self.reset_angles(pose.rotation);
        pose
    }

    /// Leaves the head anchor; `rotation` is the camera's current world rotation.
    ///
    /// Pitch is brought inside the orbit limits so the first orbit frame does not jump.
    pub fn detach_to_orbit(&mut self, rotation: Quat, settings: &CameraSettings) {
        self.attachment = CameraAttachment::OrbitTarget;
        self.reset_angles(rotation);
        self.pitch = clamp_angle(self.pitch, settings.pitch_min, settings.pitch_max);
    }

    /// Pitches the first person view around its local right axis. Mouse up looks up.
    pub fn look_vertical(&mut self, mouse_y: f32, delta_secs: f32, settings: &CameraSettings) {
        let degrees = mouse_y * settings.first_person_mouse_y_speed * delta_secs;
        self.head_look *= Quat::from_rotation_x(degrees.to_radians());
    }

    /// Camera pose while attached to `head` (given in world space).
    pub fn head_pose(&self, head: &Transform) -> Transform {
        Transform::from_translation(head.translation).with_rotation(head.rotation * self.head_look)
    }
}

/// World-space turn applied to the body for one first person frame. Mouse right turns right.
pub fn first_person_turn(mouse_x: f32, delta_secs: f32, settings: &CameraSettings) -> Quat {
    let degrees = mouse_x * settings.first_person_mouse_x_speed * delta_secs;
    Quat::from_rotation_y(-degrees.to_radians())
}

/// Rotation for accumulated `pitch` and `yaw` in degrees.
pub fn orbit_rotation(pitch: f32, yaw: f32) -> Quat {
    Quat::from_euler(EulerRot::YXZ, -yaw.to_radians(), -pitch.to_radians(), 0.0)
}

/// Pulls the angle back by one turn if it is outside ±360, then clamps.
///
/// Only a single turn is removed, so angles beyond ±720 are not fully normalized.
pub fn clamp_angle(mut angle: f32, min: f32, max: f32) -> f32 {
    if angle < -360.0 {
        angle += 360.0;
    }
    if angle > 360.0 {
        angle -= 360.0;
    }
    angle.clamp(min, max)
}

/// Part of the camera rig that must exist for the camera to work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigPart {
    CharacterController,
    HeadAnchor,
    LookTargetAnchor,
    OrbitTarget,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RigError {
    #[error("expected exactly one player camera")]
    CameraCount,
    #[error("player camera references a missing {part:?} ({entity:?})")]
    MissingReference { part: RigPart, entity: Entity },
}

/// Entities the player camera reads every frame.
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraAnchors {
    /// Player body carrying the character controller.
    pub body: Entity,
    pub head: Entity,
    pub look_target: Entity,
    pub orbit_target: Entity,
}

impl CameraAnchors {
    pub fn parts(&self) -> [(RigPart, Entity); 4] {
        [
            (RigPart::CharacterController, self.body),
            (RigPart::HeadAnchor, self.head),
            (RigPart::LookTargetAnchor, self.look_target),
            (RigPart::OrbitTarget, self.orbit_target),
        ]
    }

    /// Checks every reference with `resolves`, reporting the first one that fails.
    pub fn validate(&self, mut resolves: impl FnMut(RigPart, Entity) -> bool) -> Result<(), RigError> {
        for (part, entity) in self.parts() {
            if !resolves(part, entity) {
                return Err(RigError::MissingReference { part, entity });
            }
        }
        Ok(())
    }
}
