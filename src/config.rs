use glam::Vec3;

// === CONSTANTS ===
pub const DIMX: u32 = 1080;
pub const DIMY: u32 = 720;
pub const WINDOW_TITLE: &str = "ΚΑΤΑΛΥΤΙΚΑ";
// Frame Count Modulus for trace logging of the render loop.
pub const LOGGING_TIMESTEP: u64 = 240;

// Animation, scene and layering parameters of the page.
// `Default` carries the reference values of the landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    // Delay added per stagger index, in seconds.
    pub stagger: f32,
    // Entrance duration of every section, in seconds.
    pub section_duration: f32,
    // Height reserved for the canvas band, in logical pixels.
    pub canvas_height: f32,
    pub rotation_rate_x: f32,
    pub rotation_rate_y: f32,
    pub camera: CameraConfig,
    pub lights: LightConfig,
    pub cube_size: f32,
    pub cube_color: [f32; 3],
    pub gesture: GestureConfig,
    // Logical pixels scrolled per wheel line.
    pub scroll_line_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightConfig {
    pub ambient_intensity: f32,
    pub point_position: Vec3,
    pub point_intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub hover_scale: f32,
    pub tap_scale: f32,
    // Upward travel of a hovered glass card.
    pub card_lift: f32,
    pub card_lift_duration: f32,
    // Exponential approach rate of the scale, per second.
    pub response: f32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            stagger: 0.2,
            section_duration: 0.5,
            canvas_height: 400.0,
            rotation_rate_x: 0.2,
            rotation_rate_y: 0.3,
            camera: CameraConfig::default(),
            lights: LightConfig::default(),
            cube_size: 2.0,
            cube_color: hex_rgb(0x4F46E5),
            gesture: GestureConfig::default(),
            scroll_line_height: 48.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            enable_zoom: false,
            enable_pan: false,
            rotate_speed: 1.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: 0.5,
            point_position: Vec3::new(10.0, 10.0, 10.0),
            point_intensity: 1.0,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            hover_scale: 1.05,
            tap_scale: 0.95,
            card_lift: 5.0,
            card_lift_duration: 0.3,
            response: 18.0,
        }
    }
}

// Converts `0xRRGGBB` into `[r, g, b]` in `0..=1`.
pub const fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

pub const fn hex_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = hex_rgb(hex);
    [r, g, b, alpha]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_values() {
        let config = PageConfig::default();
        assert_eq!(config.stagger, 0.2);
        assert_eq!(config.section_duration, 0.5);
        assert_eq!(config.canvas_height, 400.0);
        assert!(!config.camera.enable_zoom);
        assert!(!config.camera.enable_pan);
    }

    #[test]
    fn hex_conversion() {
        assert_eq!(hex_rgb(0xFF0000), [1.0, 0.0, 0.0]);
        assert_eq!(hex_rgba(0x0000FF, 0.5), [0.0, 0.0, 1.0, 0.5]);
    }
}
