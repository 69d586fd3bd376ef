// Presentational state of one element: opacity and vertical offset in
// logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    pub opacity: f32,
    pub offset_y: f32,
}

impl VisualState {
    pub const SETTLED: VisualState = VisualState::new(1.0, 0.0);

    pub const fn new(opacity: f32, offset_y: f32) -> Self {
        Self { opacity, offset_y }
    }

    pub const fn hidden(offset_y: f32) -> Self {
        Self::new(0.0, offset_y)
    }

    pub fn lerp(&self, to: &VisualState, t: f32) -> VisualState {
        VisualState {
            opacity: self.opacity + (to.opacity - self.opacity) * t,
            offset_y: self.offset_y + (to.offset_y - self.offset_y) * t,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    // Quadratic ease-out.
    #[default]
    EaseOut,
}

impl Easing {
    // Maps linear progress onto eased progress. Both curves are
    // non-decreasing on `[0, 1]` and fix both endpoints.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: f32,
    pub easing: Easing,
}

impl Transition {
    pub const fn new(duration: f32, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

// A statically declared element taking part in the entrance sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimatedElement {
    pub name: &'static str,
    pub initial: VisualState,
    pub target: VisualState,
    // Stagger index among siblings.
    pub index: usize,
    pub transition: Transition,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    Pending,
    Running,
    Done,
}

// ======================================
// === ENTRANCE TASKS ===
// ======================================

#[derive(Debug, Clone)]
struct TransitionTask {
    element: AnimatedElement,
    start_delay: f32,
    progress: f32,
    current: VisualState,
}

impl TransitionTask {
    fn phase(&self, clock: f32) -> TaskPhase {
        if self.progress >= 1.0 {
            TaskPhase::Done
        } else if clock > self.start_delay {
            TaskPhase::Running
        } else {
            TaskPhase::Pending
        }
    }

    fn advance(&mut self, clock: f32) {
        let local = clock - self.start_delay;
        if local <= 0.0 {
            return;
        }

        let duration = self.element.transition.duration;
        let linear = if duration <= 0.0 {
            1.0
        } else {
            (local / duration).min(1.0)
        };

        // Progress only ever moves forward.
        self.progress = self.progress.max(linear);
        let eased = self.element.transition.easing.apply(self.progress);
        self.current = self.element.initial.lerp(&self.element.target, eased);
    }
}

// Starting is fire-and-forget: nothing observes completion, and a started
// sequence cannot be restarted.
pub struct Sequencer {
    stagger: f32,
    tasks: Vec<TransitionTask>,
    clock: f32,
    started: bool,
}

impl Sequencer {
    pub fn new(stagger: f32) -> Self {
        Self {
            stagger: stagger.max(0.0),
            tasks: Vec::new(),
            clock: 0.0,
            started: false,
        }
    }

    pub fn register(&mut self, element: AnimatedElement) -> ElementId {
        let id = ElementId(self.tasks.len());
        let start_delay = element.index as f32 * self.stagger;
        log::debug!(
            "sequencer: registered '{}' (index {}, delay {:.2}s)",
            element.name,
            element.index,
            start_delay
        );
        self.tasks.push(TransitionTask {
            current: element.initial,
            element,
            start_delay,
            progress: 0.0,
        });
        id
    }

    // Starts every registered transition. Later calls are ignored.
    pub fn start(&mut self) {
        if self.started {
            log::debug!("sequencer: already started, ignoring");
            return;
        }
        self.started = true;
        self.clock = 0.0;
        log::info!("sequencer: started {} transitions", self.tasks.len());
    }

    pub fn tick(&mut self, dt: f32) {
        if !self.started || self.is_settled() {
            return;
        }

        self.clock += dt.max(0.0);
        for task in &mut self.tasks {
            task.advance(self.clock);
        }

        if self.is_settled() {
            log::debug!("sequencer: settled at {:.3}s", self.clock);
        }
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_settled(&self) -> bool {
        self.tasks.iter().all(|t| t.progress >= 1.0)
    }

    pub fn elapsed(&self) -> f32 {
        self.clock
    }

    pub fn stagger(&self) -> f32 {
        self.stagger
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn state(&self, id: ElementId) -> Option<VisualState> {
        self.tasks.get(id.0).map(|t| t.current)
    }

    pub fn progress(&self, id: ElementId) -> Option<f32> {
        self.tasks.get(id.0).map(|t| t.progress)
    }

    pub fn start_delay(&self, id: ElementId) -> Option<f32> {
        self.tasks.get(id.0).map(|t| t.start_delay)
    }

    pub fn phase(&self, id: ElementId) -> Option<TaskPhase> {
        self.tasks.get(id.0).map(|t| t.phase(self.clock))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn fade(name: &'static str, index: usize, offset: f32) -> AnimatedElement {
        AnimatedElement {
            name,
            initial: VisualState::hidden(offset),
            target: VisualState::SETTLED,
            index,
            transition: Transition::new(0.5, Easing::Linear),
        }
    }

    fn run_frames(seq: &mut Sequencer, frames: usize, dt: f32) {
        for _ in 0..frames {
            seq.tick(dt);
        }
    }

    #[test]
    fn start_delay_is_index_times_stagger() {
        let mut seq = Sequencer::new(0.2);
        let ids: Vec<_> = (0..4).map(|i| seq.register(fade("s", i, 50.0))).collect();
        for (i, id) in ids.iter().enumerate() {
            let delay = seq.start_delay(*id).unwrap();
            assert!((delay - i as f32 * 0.2).abs() < EPS);
        }
    }

    #[test]
    fn nothing_moves_before_start() {
        let mut seq = Sequencer::new(0.2);
        let id = seq.register(fade("header", 0, -50.0));
        run_frames(&mut seq, 10, 0.1);
        assert_eq!(seq.state(id), Some(VisualState::hidden(-50.0)));
        assert_eq!(seq.elapsed(), 0.0);
    }

    #[test]
    fn observed_start_is_within_one_frame_of_delay() {
        let dt = 1.0 / 60.0;
        let mut seq = Sequencer::new(0.2);
        let ids: Vec<_> = (0..4).map(|i| seq.register(fade("s", i, 0.0))).collect();
        seq.start();

        let mut first_moved = vec![None; ids.len()];
        for frame in 1..=120 {
            seq.tick(dt);
            for (slot, id) in first_moved.iter_mut().zip(&ids) {
                if slot.is_none() && seq.state(*id).unwrap().opacity > 0.0 {
                    *slot = Some(frame as f32 * dt);
                }
            }
        }

        for (i, observed) in first_moved.into_iter().enumerate() {
            let observed = observed.unwrap();
            let expected = i as f32 * 0.2;
            assert!(observed >= expected - EPS, "element {i} started early");
            assert!(observed - expected <= dt + EPS, "element {i} started late");
        }
    }

    #[test]
    fn first_element_settles_while_second_is_running() {
        let mut seq = Sequencer::new(0.2);
        let first = seq.register(fade("header", 0, -50.0));
        let second = seq.register(fade("hero", 1, 0.0));
        seq.start();

        seq.tick(0.2);
        assert_eq!(seq.state(second).unwrap().opacity, 0.0);
        assert_eq!(seq.phase(second), Some(TaskPhase::Pending));
        assert!(seq.state(first).unwrap().opacity > 0.0);

        seq.tick(0.01);
        assert!(seq.state(second).unwrap().opacity > 0.0);

        seq.tick(0.3);
        assert!((seq.state(first).unwrap().opacity - 1.0).abs() < EPS);
        assert!(seq.state(first).unwrap().offset_y.abs() < EPS);
        assert_eq!(seq.phase(first), Some(TaskPhase::Done));
        assert_eq!(seq.phase(second), Some(TaskPhase::Running));
    }

    #[test]
    fn interpolation_is_monotonic() {
        let mut seq = Sequencer::new(0.0);
        let mut element = fade("about", 0, 50.0);
        element.transition.easing = Easing::EaseOut;
        let id = seq.register(element);
        seq.start();

        let mut last = seq.state(id).unwrap();
        for _ in 0..40 {
            seq.tick(0.02);
            let now = seq.state(id).unwrap();
            assert!(now.opacity >= last.opacity);
            assert!(now.offset_y <= last.offset_y);
            last = now;
        }
        assert_eq!(last, VisualState::SETTLED);
    }

    #[test]
    fn negative_delta_does_not_reverse() {
        let mut seq = Sequencer::new(0.0);
        let id = seq.register(fade("hero", 0, 0.0));
        seq.start();
        seq.tick(0.25);
        let before = seq.state(id).unwrap();
        seq.tick(-1.0);
        assert_eq!(seq.state(id).unwrap(), before);
    }

    #[test]
    fn second_start_is_ignored() {
        let mut seq = Sequencer::new(0.2);
        let id = seq.register(fade("hero", 1, 0.0));
        seq.start();
        seq.tick(0.45);
        let before = seq.state(id).unwrap();
        seq.start();
        assert!((seq.elapsed() - 0.45).abs() < EPS);
        assert_eq!(seq.state(id).unwrap(), before);
    }

    #[test]
    fn zero_duration_jumps_to_target() {
        let mut seq = Sequencer::new(0.0);
        let mut element = fade("instant", 0, 10.0);
        element.transition.duration = 0.0;
        let id = seq.register(element);
        seq.start();
        seq.tick(0.001);
        assert_eq!(seq.state(id), Some(VisualState::SETTLED));
        assert!(seq.is_settled());
    }

    #[test]
    fn ease_out_fixes_endpoints() {
        assert_eq!(Easing::EaseOut.apply(0.0), 0.0);
        assert_eq!(Easing::EaseOut.apply(1.0), 1.0);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
    }
}
