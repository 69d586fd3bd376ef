use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

const MIN_POLAR: f32 = 1e-3;
const MAX_POLAR: f32 = std::f32::consts::PI - 1e-3;

// Perspective camera placed on a sphere around its target.
// The position is kept in spherical form: `azimuth` around +Y (zero looks
// down -Z from +Z) and `polar` measured from +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub target: Vec3,
    pub distance: f32,
    pub azimuth: f32,
    pub polar: f32,
    pub fov_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        let offset = config.position - config.target;
        let distance = offset.length().max(config.near);
        let polar = (offset.y / distance).clamp(-1.0, 1.0).acos();
        let azimuth = offset.x.atan2(offset.z);

        Self {
            target: config.target,
            distance,
            azimuth,
            polar: polar.clamp(MIN_POLAR, MAX_POLAR),
            fov_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn position(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target
            + Vec3::new(
                self.distance * sin_polar * sin_az,
                self.distance * cos_polar,
                self.distance * sin_polar * cos_az,
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn proj_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_proj_matrix(&self) -> Mat4 {
        self.proj_matrix() * self.view_matrix()
    }

    pub fn update_aspect_ratio(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }
}

// Drag-to-orbit controls with optional zoom and pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControls {
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
}

impl OrbitControls {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            enable_zoom: config.enable_zoom,
            enable_pan: config.enable_pan,
            rotate_speed: config.rotate_speed,
        }
    }

    // Rotates the camera for a drag of `(dx, dy)` pixels inside a region
    // `region_height` pixels tall. A drag across the full height turns one
    // full revolution.
    pub fn rotate(&self, camera: &mut PerspectiveCamera, dx: f32, dy: f32, region_height: f32) {
        if region_height <= 0.0 {
            return;
        }
        let per_pixel = std::f32::consts::TAU * self.rotate_speed / region_height;
        camera.azimuth -= dx * per_pixel;
        camera.polar = (camera.polar - dy * per_pixel).clamp(MIN_POLAR, MAX_POLAR);
        camera.azimuth = camera.azimuth.rem_euclid(std::f32::consts::TAU);
    }

    // Applies a zoom gesture. Returns whether the camera changed.
    pub fn zoom(&self, camera: &mut PerspectiveCamera, delta: f32) -> bool {
        if !self.enable_zoom || delta == 0.0 {
            return false;
        }
        let factor = 0.95_f32.powf(delta);
        camera.distance = (camera.distance * factor).clamp(camera.near, camera.far);
        true
    }

    // Applies a pan gesture in view space. Returns whether the camera changed.
    pub fn pan(&self, camera: &mut PerspectiveCamera, dx: f32, dy: f32, region_height: f32) -> bool {
        if !self.enable_pan || region_height <= 0.0 {
            return false;
        }
        let half_fov = (camera.fov_degrees.to_radians() * 0.5).tan();
        let units_per_pixel = 2.0 * camera.distance * half_fov / region_height;

        let view = camera.view_matrix();
        let right = Vec3::new(view.x_axis.x, view.y_axis.x, view.z_axis.x);
        let up = Vec3::new(view.x_axis.y, view.y_axis.y, view.z_axis.y);
        camera.target += (-right * dx + up * dy) * units_per_pixel;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_camera() -> (PerspectiveCamera, OrbitControls) {
        let config = CameraConfig::default();
        (PerspectiveCamera::new(&config, 2.7), OrbitControls::new(&config))
    }

    #[test]
    fn initial_position_round_trips() {
        let (camera, _) = reference_camera();
        let pos = camera.position();
        assert!((pos - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-4);
        assert!((camera.distance - 5.0).abs() < 1e-6);
    }

    #[test]
    fn drag_orbits_at_fixed_distance() {
        let (mut camera, controls) = reference_camera();
        let before = camera.position();
        controls.rotate(&mut camera, 100.0, 0.0, 400.0);
        let after = camera.position();
        assert!((after - before).length() > 0.1);
        assert!(((after - camera.target).length() - 5.0).abs() < 1e-4);
        // Dragging right swings the camera toward -X.
        assert!(after.x < 0.0);
    }

    #[test]
    fn vertical_drag_is_clamped_at_poles() {
        let (mut camera, controls) = reference_camera();
        controls.rotate(&mut camera, 0.0, 10_000.0, 400.0);
        assert!(camera.polar >= MIN_POLAR);
        controls.rotate(&mut camera, 0.0, -10_000.0, 400.0);
        assert!(camera.polar <= MAX_POLAR);
        assert!(camera.view_matrix().is_finite());
    }

    #[test]
    fn zoom_disabled_keeps_distance() {
        let (mut camera, controls) = reference_camera();
        assert!(!controls.zoom(&mut camera, 3.0));
        assert_eq!(camera.distance, 5.0);
    }

    #[test]
    fn pan_disabled_keeps_target() {
        let (mut camera, controls) = reference_camera();
        assert!(!controls.pan(&mut camera, 40.0, 10.0, 400.0));
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn enabled_zoom_and_pan_move_the_camera() {
        let config = CameraConfig {
            enable_zoom: true,
            enable_pan: true,
            ..CameraConfig::default()
        };
        let mut camera = PerspectiveCamera::new(&config, 1.0);
        let controls = OrbitControls::new(&config);
        assert!(controls.zoom(&mut camera, 1.0));
        assert!(camera.distance < 5.0);
        assert!(controls.pan(&mut camera, 10.0, 0.0, 400.0));
        assert!(camera.target.x < 0.0);
    }
}
