use bitflags::bitflags;
use glam::Vec2;

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct PointerButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    Orbit,
    Pan,
}

impl DragKind {
    // Left drags orbit, right and middle drags pan.
    pub fn for_button(button: PointerButtons) -> Option<DragKind> {
        if button.contains(PointerButtons::LEFT) {
            Some(DragKind::Orbit)
        } else if button.intersects(PointerButtons::RIGHT | PointerButtons::MIDDLE) {
            Some(DragKind::Pan)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    kind: DragKind,
    button: PointerButtons,
    last: Vec2,
}

// Pointer position (viewport space), held buttons and the active drag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    position: Option<Vec2>,
    buttons: PointerButtons,
    drag: Option<Drag>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    pub fn dragging(&self) -> Option<DragKind> {
        self.drag.map(|d| d.kind)
    }

    pub fn press(&mut self, button: PointerButtons) {
        self.buttons.insert(button);
    }

    // Starts a drag from the current position with a held button. Only one
    // drag at a time.
    pub fn begin_drag(&mut self, button: PointerButtons) -> Option<DragKind> {
        if self.drag.is_some() || !self.buttons.contains(button) {
            return None;
        }
        let position = self.position?;
        let kind = DragKind::for_button(button)?;
        self.drag = Some(Drag {
            kind,
            button,
            last: position,
        });
        Some(kind)
    }

    // Records a move. Returns the drag kind and the delta since the last
    // move while a drag is active.
    pub fn move_to(&mut self, position: Vec2) -> Option<(DragKind, Vec2)> {
        self.position = Some(position);
        let drag = self.drag.as_mut()?;
        let delta = position - drag.last;
        drag.last = position;
        Some((drag.kind, delta))
    }

    // Releases a button. Returns the drag it ended, if any.
    pub fn release(&mut self, button: PointerButtons) -> Option<DragKind> {
        self.buttons.remove(button);
        match self.drag {
            Some(drag) if drag.button == button => {
                self.drag = None;
                Some(drag.kind)
            }
            _ => None,
        }
    }

    pub fn leave(&mut self) {
        self.position = None;
        self.buttons = PointerButtons::empty();
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_reports_incremental_deltas() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(10.0, 10.0));
        pointer.press(PointerButtons::LEFT);
        assert_eq!(pointer.begin_drag(PointerButtons::LEFT), Some(DragKind::Orbit));

        let (kind, delta) = pointer.move_to(Vec2::new(15.0, 12.0)).unwrap();
        assert_eq!(kind, DragKind::Orbit);
        assert_eq!(delta, Vec2::new(5.0, 2.0));
        let (_, delta) = pointer.move_to(Vec2::new(16.0, 12.0)).unwrap();
        assert_eq!(delta, Vec2::new(1.0, 0.0));

        assert_eq!(pointer.release(PointerButtons::LEFT), Some(DragKind::Orbit));
        assert!(pointer.move_to(Vec2::new(30.0, 30.0)).is_none());
    }

    #[test]
    fn drag_needs_a_known_position() {
        let mut pointer = PointerState::new();
        pointer.press(PointerButtons::LEFT);
        assert_eq!(pointer.begin_drag(PointerButtons::LEFT), None);
    }

    #[test]
    fn drag_needs_a_held_button() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::ZERO);
        assert_eq!(pointer.begin_drag(PointerButtons::LEFT), None);

        pointer.press(PointerButtons::LEFT);
        pointer.release(PointerButtons::LEFT);
        assert_eq!(pointer.begin_drag(PointerButtons::LEFT), None);
        assert_eq!(pointer.dragging(), None);
    }

    #[test]
    fn right_button_pans_and_other_buttons_do_not_end_it() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::ZERO);
        pointer.press(PointerButtons::RIGHT);
        assert_eq!(pointer.begin_drag(PointerButtons::RIGHT), Some(DragKind::Pan));
        pointer.press(PointerButtons::LEFT);
        assert_eq!(pointer.begin_drag(PointerButtons::LEFT), None);
        assert_eq!(pointer.release(PointerButtons::LEFT), None);
        assert_eq!(pointer.dragging(), Some(DragKind::Pan));
    }
}
