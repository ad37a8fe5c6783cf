use glam::{Mat4, Vec3};

use depositkit_settings::CameraSettings;

/// Closest the camera is placed when framing a deposit
const MIN_FIT_DISTANCE: f32 = 1.0;

/// Movement keys held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CameraInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl CameraInput {
    pub fn is_idle(&self) -> bool {
        !(self.forward || self.back || self.left || self.right)
    }
}

/// Free-flight camera
///
/// Moves along its look direction and strafes sideways; cursor motion turns
/// it. `yaw` and `pitch` are kept in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub front: Vec3,
    pub up: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub fov: f32, // degrees
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
    last_cursor: Option<(f32, f32)>,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl FlyCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        let mut camera = Self {
            position: Vec3::from_array(settings.position),
            front: Vec3::from_array(settings.front),
            up: Vec3::from_array(settings.up),
            yaw: settings.yaw_deg,
            pitch: settings.pitch_deg,
            speed: settings.speed,
            sensitivity: settings.sensitivity,
            fov: settings.fov_deg,
            aspect_ratio: 1.0,
            near: settings.near,
            far: settings.far,
            last_cursor: None,
        };
        camera.update_aspect_ratio(
            settings.viewport_width as f32,
            settings.viewport_height as f32,
        );
        camera
    }

    pub fn update_aspect_ratio(&mut self, width: f32, height: f32) {
        if height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Move one step for every held key
    pub fn process_input(&mut self, input: &CameraInput) {
        if input.forward {
            self.position += self.front * self.speed;
        }
        if input.back {
            self.position -= self.front * self.speed;
        }

        let right = self.front.cross(self.up).normalize_or_zero();
        if input.left {
            self.position -= right * self.speed;
        }
        if input.right {
            self.position += right * self.speed;
        }
    }

    /// Turn the camera by the cursor's motion since the previous call
    ///
    /// The first call only records where the cursor is.
    pub fn handle_cursor(&mut self, x: f32, y: f32) {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return;
        };

        // Screen y grows downwards
        let delta_x = (x - last_x) * self.sensitivity;
        let delta_y = (last_y - y) * self.sensitivity;

        self.yaw += delta_x;
        self.pitch = (self.pitch + delta_y).clamp(-89.0, 89.0);

        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        self.front = Vec3::new(cos_yaw * cos_pitch, sin_pitch, sin_yaw * cos_pitch).normalize();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// Back away from the box along the current look direction until it fits
    /// in the field of view
    pub fn fit_to_bounds(&mut self, min: Vec3, max: Vec3) {
        let center = (min + max) * 0.5;
        let max_dim = (max - min).max_element();

        // tan(fov/2) = (size/2) / distance, with a 20% margin
        let half_fov = self.fov.to_radians() / 2.0;
        let distance = ((max_dim * 1.2) / half_fov.tan()).max(MIN_FIT_DISTANCE);

        let direction = self.front.try_normalize().unwrap_or(Vec3::NEG_Z);
        self.position = center - direction * distance;
    }
}
