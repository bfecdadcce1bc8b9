//! # Orbit Camera
//!
//! A perspective camera that circles the origin. Mouse drags queue up
//! rotation which is bled off a little every frame, so the view keeps
//! drifting briefly after the drag ends.

use lattice_core::Position;

/// Where the camera starts, looking at the origin.
const INITIAL_EYE: [f64; 3] = [5.0, 5.0, 10.0];
/// Vertical field of view in degrees.
const FIELD_OF_VIEW: f64 = 75.0;
/// Points closer than this to the camera plane are not drawn.
const NEAR_PLANE: f64 = 0.1;
/// Fraction of the queued rotation applied (and removed) per frame.
const DAMPING_FACTOR: f64 = 0.05;
/// Radians of rotation per pixel dragged.
const ROTATE_SPEED: f64 = 0.01;
const ZOOM_STEP: f64 = 0.95;
const MIN_DISTANCE: f64 = 1.0;
const MAX_DISTANCE: f64 = 200.0;
/// Keeps the view direction off the vertical axis.
const MAX_PITCH: f64 = std::f64::consts::FRAC_PI_2 - 0.01;
const UP: [f64; 3] = [0.0, 1.0, 0.0];

/// A point after projection onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f32,
    pub y: f32,
    /// Distance along the view direction; larger is further away.
    pub depth: f64,
    /// Pixels per lattice unit at this depth.
    pub scale: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    yaw: f64,
    pitch: f64,
    distance: f64,
    pending_yaw: f64,
    pending_pitch: f64,
}

impl Default for Camera {
    fn default() -> Self {
        let [x, y, z] = INITIAL_EYE;
        let distance = (x * x + y * y + z * z).sqrt();
        Self {
            yaw: x.atan2(z),
            pitch: (y / distance).asin(),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }
}

impl Camera {
    /// Queues rotation for a drag of `dx`, `dy` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx as f64 * ROTATE_SPEED;
        self.pending_pitch += dy as f64 * ROTATE_SPEED;
    }

    /// Moves closer for positive `lines`, further away for negative.
    pub fn zoom(&mut self, lines: f32) {
        self.distance = (self.distance * ZOOM_STEP.powf(lines as f64)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Advances the damped rotation by one frame.
    ///
    /// # Returns
    /// * `true` if the camera moved
    pub fn update(&mut self) -> bool {
        if self.pending_yaw.abs() < 1e-6 && self.pending_pitch.abs() < 1e-6 {
            self.pending_yaw = 0.0;
            self.pending_pitch = 0.0;
            return false;
        }
        self.yaw += self.pending_yaw * DAMPING_FACTOR;
        self.pitch = (self.pitch + self.pending_pitch * DAMPING_FACTOR).clamp(-MAX_PITCH, MAX_PITCH);
        self.pending_yaw *= 1.0 - DAMPING_FACTOR;
        self.pending_pitch *= 1.0 - DAMPING_FACTOR;
        true
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn eye(&self) -> [f64; 3] {
        let horizontal = self.distance * self.pitch.cos();
        [
            horizontal * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            horizontal * self.yaw.cos(),
        ]
    }

    /// Projects `position` onto a canvas of the given size.
    ///
    /// Returns `None` for points behind (or too close to) the camera.
    pub fn project(&self, position: Position, width: f32, height: f32) -> Option<Projected> {
        let eye = self.eye();
        let forward = normalize([-eye[0], -eye[1], -eye[2]]);
        let right = normalize(cross(forward, UP));
        let up = cross(right, forward);

        let v = [position.x - eye[0], position.y - eye[1], position.z - eye[2]];
        let depth = dot(v, forward);
        if depth < NEAR_PLANE {
            return None;
        }

        let focal = (height as f64 / 2.0) / (FIELD_OF_VIEW.to_radians() / 2.0).tan();
        let scale = focal / depth;
        Some(Projected {
            x: (width as f64 / 2.0 + dot(v, right) * scale) as f32,
            y: (height as f64 / 2.0 - dot(v, up) * scale) as f32,
            depth,
            scale,
        })
    }
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let len = dot(v, v).sqrt();
    [v[0] / len, v[1] / len, v[2] / len]
}
