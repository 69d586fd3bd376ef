use crate::config::GestureConfig;

// Hover and press feedback for one interactive element.
// The scale eases exponentially toward its target (hover grows, press
// shrinks), so it never overshoots. Glass cards additionally lift while
// hovered at a constant rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverFeedback {
    config: GestureConfig,
    lifts: bool,
    hovered: bool,
    pressed: bool,
    scale: f32,
    lift: f32,
}

impl HoverFeedback {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            lifts: false,
            hovered: false,
            pressed: false,
            scale: 1.0,
            lift: 0.0,
        }
    }

    pub fn glass_card(config: GestureConfig) -> Self {
        Self {
            lifts: true,
            ..Self::new(config)
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
        if !hovered {
            self.pressed = false;
        }
    }

    pub fn set_pressed(&mut self, pressed: bool) {
        self.pressed = pressed;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    pub fn target_scale(&self) -> f32 {
        if self.pressed {
            self.config.tap_scale
        } else if self.hovered {
            self.config.hover_scale
        } else {
            1.0
        }
    }

    pub fn target_lift(&self) -> f32 {
        if self.lifts && self.hovered {
            self.config.card_lift
        } else {
            0.0
        }
    }

    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        let target = self.target_scale();
        let blend = 1.0 - (-self.config.response * dt).exp();
        self.scale += (target - self.scale) * blend;
        if (target - self.scale).abs() < 1e-4 {
            self.scale = target;
        }

        let target_lift = self.target_lift();
        let rate = if self.config.card_lift_duration > 0.0 {
            self.config.card_lift / self.config.card_lift_duration
        } else {
            f32::INFINITY
        };
        let step = rate * dt;
        let diff = target_lift - self.lift;
        self.lift = if diff.abs() <= step {
            target_lift
        } else {
            self.lift + step.copysign(diff)
        };
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    // Upward travel in logical pixels (positive is up).
    pub fn lift(&self) -> f32 {
        self.lift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(feedback: &mut HoverFeedback) {
        for _ in 0..120 {
            feedback.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn hover_grows_and_press_shrinks() {
        let mut cta = HoverFeedback::new(GestureConfig::default());
        cta.set_hovered(true);
        settle(&mut cta);
        assert!((cta.scale() - 1.05).abs() < 1e-3);

        cta.set_pressed(true);
        settle(&mut cta);
        assert!((cta.scale() - 0.95).abs() < 1e-3);

        cta.set_hovered(false);
        assert!(!cta.is_pressed());
        settle(&mut cta);
        assert!((cta.scale() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn scale_approach_never_overshoots() {
        let mut cta = HoverFeedback::new(GestureConfig::default());
        cta.set_hovered(true);
        let mut last = cta.scale();
        for _ in 0..60 {
            cta.tick(0.05);
            assert!(cta.scale() >= last);
            assert!(cta.scale() <= 1.05 + 1e-6);
            last = cta.scale();
        }
    }

    #[test]
    fn glass_card_lifts_over_its_duration() {
        let mut card = HoverFeedback::glass_card(GestureConfig::default());
        card.set_hovered(true);
        card.tick(0.15);
        assert!((card.lift() - 2.5).abs() < 1e-4);
        card.tick(0.3);
        assert_eq!(card.lift(), 5.0);

        card.set_hovered(false);
        card.tick(0.3);
        assert_eq!(card.lift(), 0.0);
    }

    #[test]
    fn plain_elements_do_not_lift() {
        let mut cta = HoverFeedback::new(GestureConfig::default());
        cta.set_hovered(true);
        settle(&mut cta);
        assert_eq!(cta.lift(), 0.0);
    }
}
