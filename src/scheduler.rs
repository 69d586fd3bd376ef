#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

type FrameCallback<S> = Box<dyn FnMut(&mut S, f32)>;

pub struct FrameScheduler<S> {
    callbacks: Vec<(CallbackId, FrameCallback<S>)>,
    next_id: u64,
    ticks: u64,
}

impl<S> FrameScheduler<S> {
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
            next_id: 0,
            ticks: 0,
        }
    }

    pub fn register<F>(&mut self, callback: F) -> CallbackId
    where
        F: FnMut(&mut S, f32) + 'static,
    {
        let id = CallbackId(self.next_id);
        self.next_id += 1;
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    pub fn unregister(&mut self, id: CallbackId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(cb_id, _)| *cb_id != id);
        self.callbacks.len() != before
    }

    pub fn tick(&mut self, state: &mut S, delta_time: f32) {
        self.ticks += 1;
        for (_, callback) in &mut self.callbacks {
            callback(state, delta_time);
        }
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl<S> Default for FrameScheduler<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callbacks_receive_delta_in_order() {
        let mut scheduler: FrameScheduler<Vec<(u8, f32)>> = FrameScheduler::new();
        scheduler.register(|log, dt| log.push((1, dt)));
        scheduler.register(|log, dt| log.push((2, dt)));

        let mut log = Vec::new();
        scheduler.tick(&mut log, 0.016);
        assert_eq!(log, vec![(1, 0.016), (2, 0.016)]);
        assert_eq!(scheduler.ticks(), 1);
    }

    #[test]
    fn unregistered_callbacks_stop_running() {
        let mut scheduler: FrameScheduler<f32> = FrameScheduler::new();
        let id = scheduler.register(|total, dt| *total += dt);
        let mut total = 0.0;
        scheduler.tick(&mut total, 1.0);
        assert!(scheduler.unregister(id));
        assert!(!scheduler.unregister(id));
        scheduler.tick(&mut total, 1.0);
        assert_eq!(total, 1.0);
    }

    #[test]
    fn clear_drops_everything() {
        let mut scheduler: FrameScheduler<u32> = FrameScheduler::new();
        scheduler.register(|count, _| *count += 1);
        scheduler.register(|count, _| *count += 1);
        scheduler.clear();
        assert!(scheduler.is_empty());
        let mut count = 0;
        scheduler.tick(&mut count, 0.1);
        assert_eq!(count, 0);
    }
}
