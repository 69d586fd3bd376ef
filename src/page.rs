use glam::Vec2;

use crate::canvas::{Canvas, MountFlag};
use crate::config::{PageConfig, hex_rgba};
use crate::content::{Icon, PageContent};
use crate::gesture::HoverFeedback;
use crate::input::{DragKind, PointerButtons, PointerState};
use crate::layout::{HitTarget, Layer, PageLayout, Rect, Scroll};
use crate::paint::{CanvasView, DrawList, Fill, Panel};
use crate::scene::SceneSetup;
use crate::sequencer::{AnimatedElement, ElementId, Easing, Sequencer, Transition, VisualState};

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const INDIGO_200: [f32; 4] = hex_rgba(0xC7D2FE, 1.0);
const INDIGO_300: [f32; 4] = hex_rgba(0xA5B4FC, 1.0);
const INDIGO_600: [f32; 4] = hex_rgba(0x4F46E5, 1.0);
const INDIGO_800: [f32; 4] = hex_rgba(0x3730A3, 1.0);
const GLASS: [f32; 4] = [1.0, 1.0, 1.0, 0.1];

const BACKGROUND_OPACITY: f32 = 0.8;
const PATTERN_COLOR: [f32; 4] = hex_rgba(0x9C92AC, 0.1);
const PATTERN_STEP: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Header,
    Hero,
    About,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [Section::Header, Section::Hero, Section::About, Section::Contact];

    // The stagger index is the section's position on the page.
    pub fn entrance(self, config: &PageConfig) -> AnimatedElement {
        let (name, index, offset) = match self {
            Section::Header => ("header", 0, -50.0),
            Section::Hero => ("hero", 1, 0.0),
            Section::About => ("about", 2, 50.0),
            Section::Contact => ("contact", 3, 50.0),
        };
        AnimatedElement {
            name,
            initial: VisualState::hidden(offset),
            target: VisualState::SETTLED,
            index,
            transition: Transition::new(config.section_duration, Easing::EaseOut),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    // Carries the call to action's `tel:` target.
    Dial(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    Zoomed,
    Scrolled,
    Ignored,
}

// Owns the content, the layout, the entrance sequencer and the canvas.
// Activation starts the sequencer and mounts the canvas once; after that the
// two timelines are ticked from the same frame but never read each other.
pub struct Page {
    config: PageConfig,
    content: PageContent,
    layout: PageLayout,
    scroll: Scroll,

    sequencer: Sequencer,
    sections: [ElementId; 4],

    mount_flag: MountFlag,
    canvas: Canvas,
    torn_down: bool,

    pointer: PointerState,
    hovered: Option<HitTarget>,
    cta_feedback: HoverFeedback,
    feature_feedback: Vec<HoverFeedback>,
    contact_feedback: Vec<HoverFeedback>,
}

impl Page {
    pub fn new(config: PageConfig, content: PageContent, viewport: Vec2) -> Self {
        let layout = PageLayout::new(viewport, &content, &config);

        let mut sequencer = Sequencer::new(config.stagger);
        let sections = Section::ALL.map(|section| sequencer.register(section.entrance(&config)));

        let gesture = config.gesture;
        Self {
            feature_feedback: vec![HoverFeedback::glass_card(gesture); content.features.len()],
            contact_feedback: vec![HoverFeedback::glass_card(gesture); content.contacts.len()],
            cta_feedback: HoverFeedback::new(gesture),
            config,
            content,
            layout,
            scroll: Scroll::default(),
            sequencer,
            sections,
            mount_flag: MountFlag::new(),
            canvas: Canvas::new(),
            torn_down: false,
            pointer: PointerState::new(),
            hovered: None,
        }
    }

    // Post-layout activation hook. The sequencer starts once and the canvas
    // mounts once, however often this is called.
    pub fn activate(&mut self) {
        if self.torn_down {
            return;
        }

        self.sequencer.start();

        if self.mount_flag.set() {
            let region = self.layout.canvas_region;
            let setup = SceneSetup::from_config(&self.config, region.w / region.h);
            self.canvas.mount(setup);
        }
    }

    // Called once the object's GPU resources exist.
    pub fn attach_canvas_object(&mut self) -> bool {
        self.canvas.attach_object()
    }

    pub fn frame(&mut self, delta_time: f32) {
        if self.torn_down {
            return;
        }
        self.sequencer.tick(delta_time);
        self.cta_feedback.tick(delta_time);
        for feedback in self.feature_feedback.iter_mut().chain(&mut self.contact_feedback) {
            feedback.tick(delta_time);
        }
        self.canvas.frame(delta_time);
    }

    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.canvas.release();
        self.pointer.leave();
        self.torn_down = true;
        log::info!("page: torn down");
    }

    pub fn resize(&mut self, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        self.layout = PageLayout::new(viewport, &self.content, &self.config);
        self.scroll.clamp_to(&self.layout);
        let region = self.layout.canvas_region;
        if let Some(setup) = self.canvas.setup_mut() {
            setup.camera.update_aspect_ratio(region.w / region.h);
        }
    }

    // === Pointer input (viewport space, logical pixels) ===

    pub fn pointer_moved(&mut self, position: Vec2) {
        if let Some((kind, delta)) = self.pointer.move_to(position) {
            self.apply_drag(kind, delta);
        }
        self.refresh_hover();
    }

    pub fn pointer_left(&mut self) {
        self.pointer.leave();
        self.set_hovered(None);
        self.cta_feedback.set_pressed(false);
    }

    pub fn pointer_pressed(&mut self, button: PointerButtons) {
        self.pointer.press(button);
        match self.hovered {
            Some(HitTarget::CallToAction) if button == PointerButtons::LEFT => {
                self.cta_feedback.set_pressed(true);
            }
            Some(HitTarget::Canvas) => {
                if let Some(kind) = self.pointer.begin_drag(button) {
                    log::trace!("page: {kind:?} drag started");
                }
            }
            _ => {}
        }
    }

    pub fn pointer_released(&mut self, button: PointerButtons) -> Option<PageAction> {
        self.pointer.release(button);
        if button != PointerButtons::LEFT || !self.cta_feedback.is_pressed() {
            return None;
        }
        self.cta_feedback.set_pressed(false);
        if self.hovered == Some(HitTarget::CallToAction) {
            log::info!("page: call to action -> {}", self.content.cta_target);
            return Some(PageAction::Dial(self.content.cta_target.clone()));
        }
        None
    }

    // Wheel over the canvas tries to zoom first. With zoom disabled the
    // gesture falls through and scrolls the document.
    pub fn wheel(&mut self, delta_y: f32) -> WheelOutcome {
        if self.hovered == Some(HitTarget::Canvas) {
            if let Some(setup) = self.canvas.setup_mut() {
                let controls = setup.controls;
                if controls.zoom(&mut setup.camera, -delta_y / self.config.scroll_line_height) {
                    return WheelOutcome::Zoomed;
                }
            }
        }

        if self.scroll.scroll_by(delta_y, &self.layout) {
            self.refresh_hover();
            WheelOutcome::Scrolled
        } else {
            WheelOutcome::Ignored
        }
    }

    fn apply_drag(&mut self, kind: DragKind, delta: Vec2) {
        let region_height = self.layout.canvas_region.h;
        let Some(setup) = self.canvas.setup_mut() else {
            return;
        };
        let controls = setup.controls;
        match kind {
            DragKind::Orbit => controls.rotate(&mut setup.camera, delta.x, delta.y, region_height),
            DragKind::Pan => {
                controls.pan(&mut setup.camera, delta.x, delta.y, region_height);
            }
        }
    }

    fn refresh_hover(&mut self) {
        let target = self.pointer.position().map(|p| {
            let doc = self.scroll.to_document(p);
            self.layout
                .hit_test(doc, self.canvas.is_running(), |target, rect| self.placed(target, rect))
        });
        self.set_hovered(target);
    }

    fn set_hovered(&mut self, target: Option<HitTarget>) {
        if self.hovered == target {
            return;
        }
        if let Some(previous) = self.hovered {
            if let Some(feedback) = self.feedback_mut(previous) {
                feedback.set_hovered(false);
            }
        }
        if let Some(next) = target {
            if let Some(feedback) = self.feedback_mut(next) {
                feedback.set_hovered(true);
            }
        }
        self.hovered = target;
    }

    // Document-space box of an interactive element where it is drawn this
    // frame: moved by its section's entrance, lifted and scaled by feedback.
    fn placed(&self, target: HitTarget, rect: &Rect) -> Rect {
        let (section, feedback) = match target {
            HitTarget::CallToAction => (Section::Hero, Some(&self.cta_feedback)),
            HitTarget::FeatureCard(i) => (Section::About, self.feature_feedback.get(i)),
            HitTarget::ContactCard(i) => (Section::Contact, self.contact_feedback.get(i)),
            HitTarget::Canvas | HitTarget::Document => return *rect,
        };
        let offset = self.section_state(section).offset_y;
        match feedback {
            Some(f) => rect.translated(0.0, offset - f.lift()).scaled(f.scale()),
            None => rect.translated(0.0, offset),
        }
    }

    fn feedback_mut(&mut self, target: HitTarget) -> Option<&mut HoverFeedback> {
        match target {
            HitTarget::CallToAction => Some(&mut self.cta_feedback),
            HitTarget::FeatureCard(i) => self.feature_feedback.get_mut(i),
            HitTarget::ContactCard(i) => self.contact_feedback.get_mut(i),
            HitTarget::Canvas | HitTarget::Document => None,
        }
    }

    // === Accessors ===

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.offset()
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn section_id(&self, section: Section) -> ElementId {
        self.sections[section as usize]
    }

    pub fn section_state(&self, section: Section) -> VisualState {
        self.sequencer
            .state(self.section_id(section))
            .unwrap_or(VisualState::SETTLED)
    }

    pub fn is_mounted(&self) -> bool {
        self.mount_flag.is_set()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn hovered(&self) -> Option<HitTarget> {
        self.hovered
    }

    pub fn dragging(&self) -> Option<DragKind> {
        self.pointer.dragging()
    }

    pub fn cta_feedback(&self) -> &HoverFeedback {
        &self.cta_feedback
    }

    pub fn feature_feedback(&self, index: usize) -> Option<&HoverFeedback> {
        self.feature_feedback.get(index)
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    // === Painting ===

    // This frame's draw list, in viewport space.
    pub fn draw_list(&self) -> DrawList {
        let mut list = DrawList::default();
        let layout = &self.layout;

        // Background: translucent diagonal gradient over the whole document
        // with the cross pattern on top.
        let document = Rect::new(0.0, 0.0, layout.viewport.x, layout.content_height);
        let gradient = Fill::Diagonal {
            from: hex_rgba(0x312E81, 1.0),
            via: hex_rgba(0x4338CA, 1.0),
            to: hex_rgba(0x6B21A8, 1.0),
        };
        list.push(
            Panel::new(Layer::Background, self.scroll.to_viewport(&document), gradient)
                .with_opacity(BACKGROUND_OPACITY),
        );
        push_cross_pattern(&mut list, layout.viewport, self.scroll.offset(), layout.content_height);

        let place = |rect: &Rect, state: &VisualState| {
            self.scroll.to_viewport(&rect.translated(0.0, state.offset_y))
        };
        let place_target = |target: HitTarget, rect: &Rect| {
            self.scroll.to_viewport(&self.placed(target, rect))
        };

        // Header
        let header = self.section_state(Section::Header);
        push_logo(&mut list, place(&layout.logo, &header), header.opacity);
        push_text(&mut list, place(&layout.title, &header), WHITE, header.opacity);

        // Hero
        let hero = self.section_state(Section::Hero);
        push_text(&mut list, place(&layout.hero_heading, &hero), WHITE, hero.opacity);
        push_text(&mut list, place(&layout.hero_subtitle, &hero), INDIGO_200, hero.opacity);
        let cta = place_target(HitTarget::CallToAction, &layout.cta);
        list.push(Panel::solid(Layer::Content, cta, WHITE, cta.h * 0.5).with_opacity(hero.opacity));
        let label = Rect::new(cta.x + 32.0, cta.y + cta.h * 0.3, cta.w - 64.0, cta.h * 0.4);
        push_text(&mut list, label, INDIGO_800, hero.opacity);

        // About
        let about = self.section_state(Section::About);
        list.push(Panel::solid(Layer::Content, place(&layout.about_card, &about), GLASS, 20.0).with_opacity(about.opacity));
        for line in &layout.about_text {
            push_text(&mut list, place(line, &about), INDIGO_200, about.opacity);
        }
        for (i, (card, feature)) in layout.feature_cards.iter().zip(&self.content.features).enumerate() {
            let rect = place_target(HitTarget::FeatureCard(i), card);
            push_card(&mut list, rect, about.opacity, feature.icon, true);
        }

        // Contact
        let contact = self.section_state(Section::Contact);
        push_text(&mut list, place(&layout.contact_heading, &contact), WHITE, contact.opacity);
        for (i, (card, entry)) in layout.contact_cards.iter().zip(&self.content.contacts).enumerate() {
            let rect = place_target(HitTarget::ContactCard(i), card);
            push_card(&mut list, rect, contact.opacity, entry.icon, false);
        }

        // Footer is not part of the entrance sequence.
        let footer = self.scroll.to_viewport(&layout.footer);
        list.push(Panel::solid(Layer::Content, footer, hex_rgba(0x312E81, 0.5), 0.0));
        push_text(&mut list, self.scroll.to_viewport(&layout.footer_text), WHITE, 1.0);

        list.canvas = self.canvas_view();
        list
    }

    // The band sits in the hero section and fades in with it.
    fn canvas_view(&self) -> Option<CanvasView> {
        let setup = self.canvas.setup()?;
        let object = self.canvas.object()?;
        Some(CanvasView {
            region: self.scroll.to_viewport(&self.layout.canvas_region),
            camera: setup.camera,
            model: object.model_matrix(),
            ambient: setup.ambient,
            point: setup.point,
            color: setup.cube_color,
            cube_size: setup.cube_size,
            opacity: self.section_state(Section::Hero).opacity,
        })
    }
}

// Plus-shaped marks every 30 px of the document, 5 px into each cell.
// Only the rows inside the viewport are emitted.
fn push_cross_pattern(list: &mut DrawList, viewport: Vec2, scroll: f32, content_height: f32) {
    let bottom = (scroll + viewport.y).min(content_height);
    let first_row = ((scroll - 10.0) / PATTERN_STEP).floor().max(0.0) as u32;
    let last_row = (bottom / PATTERN_STEP).ceil() as u32;
    let columns = (viewport.x / PATTERN_STEP).ceil() as u32;

    for row in first_row..=last_row {
        let cy = row as f32 * PATTERN_STEP + 5.0 - scroll;
        for column in 0..=columns {
            let cx = column as f32 * PATTERN_STEP + 5.0;
            for rect in [
                Rect::new(cx - 1.0, cy - 5.0, 2.0, 10.0),
                Rect::new(cx - 5.0, cy - 1.0, 4.0, 2.0),
                Rect::new(cx + 1.0, cy - 1.0, 4.0, 2.0),
            ] {
                list.push(Panel::solid(Layer::Background, rect, PATTERN_COLOR, 0.0));
            }
        }
    }
}

// Disc with a white triangle and a dot inside it, on a 100-unit grid.
fn push_logo(list: &mut DrawList, rect: Rect, opacity: f32) {
    let unit = rect.w / 100.0;
    let at = |x: f32, y: f32| Vec2::new(rect.x + x * unit, rect.y + y * unit);
    list.push(Panel::circle(Layer::Content, at(50.0, 50.0), 45.0 * unit, INDIGO_600).with_opacity(opacity));
    let apex = at(30.0, 30.0);
    let triangle = Rect::new(apex.x, apex.y, 40.0 * unit, 40.0 * unit);
    list.push(Panel::triangle(Layer::Content, triangle, WHITE).with_opacity(opacity));
    list.push(Panel::circle(Layer::Content, at(50.0, 55.0), 5.0 * unit, INDIGO_600).with_opacity(opacity));
}

// Text is drawn as a rounded bar over the run's box.
fn push_text(list: &mut DrawList, rect: Rect, color: [f32; 4], opacity: f32) {
    let bar_h = rect.h * 0.6;
    let bar = Rect::new(rect.x, rect.y + (rect.h - bar_h) * 0.5, rect.w, bar_h);
    list.push(Panel::solid(Layer::Content, bar, color, bar_h * 0.5).with_opacity(opacity * 0.9));
}

fn push_card(list: &mut DrawList, rect: Rect, opacity: f32, icon: Icon, icon_on_top: bool) {
    list.push(Panel::solid(Layer::Content, rect, GLASS, 20.0).with_opacity(opacity));
    let (area, label) = if icon_on_top {
        let area = Rect::new(rect.center().x - 20.0, rect.y + 24.0, 40.0, 40.0);
        let label = Rect::new(rect.x + 24.0, area.bottom() + 16.0, rect.w - 48.0, 18.0);
        (area, label)
    } else {
        let area = Rect::new(rect.x + 24.0, rect.center().y - 16.0, 32.0, 32.0);
        let label = Rect::new(area.right() + 16.0, rect.center().y - 9.0, rect.w - 96.0, 18.0);
        (area, label)
    };
    for panel in icon_panels(icon, area) {
        list.push(panel.with_opacity(opacity));
    }
    push_text(list, label, WHITE, opacity);
}

// Glyph for an icon inside `area`, built from a few flat shapes.
fn icon_panels(icon: Icon, area: Rect) -> Vec<Panel> {
    let u = area.w / 24.0;
    let r = |x: f32, y: f32, w: f32, h: f32| Rect::new(area.x + x * u, area.y + y * u, w * u, h * u);
    let at = |x: f32, y: f32| Vec2::new(area.x + x * u, area.y + y * u);
    let shape = |rect: Rect, color, radius: f32| Panel::solid(Layer::Content, rect, color, radius * u);

    match icon {
        // Handset body with its screen.
        Icon::Phone => vec![
            shape(r(6.0, 2.0, 12.0, 20.0), INDIGO_300, 3.0),
            shape(r(8.0, 5.0, 8.0, 12.0), INDIGO_800, 1.0),
            Panel::circle(Layer::Content, at(12.0, 19.5), 1.0 * u, INDIGO_800),
        ],
        // Envelope with its flap raised.
        Icon::Mail => vec![
            Panel::triangle(Layer::Content, r(2.0, 2.0, 20.0, 7.0), INDIGO_300),
            shape(r(2.0, 9.0, 20.0, 12.0), INDIGO_300, 2.0),
            shape(r(4.0, 11.0, 16.0, 2.0), INDIGO_800, 1.0),
        ],
        // Round head over a pointed stem, hollow centre.
        Icon::MapPin => vec![
            Panel::circle(Layer::Content, at(12.0, 9.0), 7.0 * u, INDIGO_300),
            shape(r(11.0, 14.0, 2.0, 8.0), INDIGO_300, 1.0),
            Panel::circle(Layer::Content, at(12.0, 9.0), 3.0 * u, INDIGO_800),
        ],
        // Medal on two ribbon tails.
        Icon::Award => vec![
            shape(r(7.0, 13.0, 3.0, 9.0), INDIGO_300, 1.0),
            shape(r(14.0, 13.0, 3.0, 9.0), INDIGO_300, 1.0),
            Panel::circle(Layer::Content, at(12.0, 8.0), 7.0 * u, INDIGO_300),
            Panel::circle(Layer::Content, at(12.0, 8.0), 3.5 * u, INDIGO_800),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::CanvasState;
    use crate::paint::Shape;

    fn page() -> Page {
        Page::new(PageConfig::default(), PageContent::default(), Vec2::new(1080.0, 720.0))
    }

    fn hover(page: &mut Page, doc_point: Vec2) {
        let p = Vec2::new(doc_point.x, doc_point.y - page.scroll_offset());
        page.pointer_moved(p);
    }

    #[test]
    fn sections_are_staggered_by_position() {
        let page = page();
        for (i, section) in Section::ALL.iter().enumerate() {
            let delay = page.sequencer().start_delay(page.section_id(*section)).unwrap();
            assert!((delay - 0.2 * i as f32).abs() < 1e-6);
        }
    }

    #[test]
    fn activation_mounts_once() {
        let mut page = page();
        assert!(!page.is_mounted());
        assert_eq!(page.canvas().state(), CanvasState::Unmounted);

        page.activate();
        assert!(page.is_mounted());
        assert!(page.sequencer().is_started());
        assert_eq!(page.canvas().state(), CanvasState::Running);

        page.activate();
        assert!(page.is_mounted());
        assert_eq!(page.canvas().state(), CanvasState::Running);
    }

    #[test]
    fn cta_click_dials() {
        let mut page = page();
        page.activate();
        let cta = page.layout().cta.center();
        hover(&mut page, cta);
        assert_eq!(page.hovered(), Some(HitTarget::CallToAction));

        page.pointer_pressed(PointerButtons::LEFT);
        assert!(page.cta_feedback().is_pressed());
        assert_eq!(page.dragging(), None);

        let action = page.pointer_released(PointerButtons::LEFT);
        assert_eq!(action, Some(PageAction::Dial("tel:6982284087".into())));
    }

    #[test]
    fn cta_release_elsewhere_does_nothing() {
        let mut page = page();
        page.activate();
        let cta = page.layout().cta.center();
        hover(&mut page, cta);
        page.pointer_pressed(PointerButtons::LEFT);
        let heading = page.layout().hero_heading.center();
        hover(&mut page, heading);
        assert_eq!(page.pointer_released(PointerButtons::LEFT), None);
    }

    #[test]
    fn drag_over_canvas_orbits() {
        let mut page = page();
        page.activate();
        let start = page.canvas().setup().unwrap().camera.position();

        let heading = page.layout().hero_heading.center();
        hover(&mut page, heading);
        page.pointer_pressed(PointerButtons::LEFT);
        assert_eq!(page.dragging(), Some(DragKind::Orbit));
        hover(&mut page, heading + Vec2::new(80.0, 0.0));
        page.pointer_released(PointerButtons::LEFT);

        let end = page.canvas().setup().unwrap().camera.position();
        assert!((end - start).length() > 0.1);
        assert!((end.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn wheel_over_canvas_scrolls_instead_of_zooming() {
        let mut page = page();
        page.activate();
        let heading = page.layout().hero_heading.center();
        hover(&mut page, heading);
        assert_eq!(page.hovered(), Some(HitTarget::Canvas));

        assert_eq!(page.wheel(48.0), WheelOutcome::Scrolled);
        assert_eq!(page.canvas().setup().unwrap().camera.distance, 5.0);
        assert_eq!(page.scroll_offset(), 48.0);
    }

    #[test]
    fn hovered_card_lifts_and_grows() {
        let mut page = page();
        page.activate();
        let card = page.layout().feature_cards[1];
        hover(&mut page, card.center());
        assert_eq!(page.hovered(), Some(HitTarget::FeatureCard(1)));
        for _ in 0..60 {
            page.frame(1.0 / 60.0);
        }
        let feedback = page.feature_feedback(1).unwrap();
        assert_eq!(feedback.lift(), 5.0);
        assert!(feedback.scale() > 1.04);
        assert_eq!(page.feature_feedback(0).unwrap().lift(), 0.0);
    }

    #[test]
    fn no_canvas_draw_until_object_attached() {
        let mut page = page();
        assert!(page.draw_list().canvas.is_none());
        page.activate();
        page.frame(0.016);
        assert!(page.draw_list().canvas.is_none());
        assert!(page.attach_canvas_object());
        assert!(page.draw_list().canvas.is_some());
    }

    #[test]
    fn resize_keeps_band_height() {
        let mut page = page();
        page.activate();
        page.resize(Vec2::new(640.0, 480.0));
        assert_eq!(page.layout().canvas_region.h, 400.0);
        let camera = page.canvas().setup().unwrap().camera;
        assert!((camera.aspect - 640.0 / 400.0).abs() < 1e-6);
    }

    #[test]
    fn teardown_releases_canvas() {
        let mut page = page();
        page.activate();
        page.attach_canvas_object();
        page.teardown();
        assert_eq!(page.canvas().state(), CanvasState::Released);
        assert!(page.is_mounted());
        page.activate();
        assert_eq!(page.canvas().state(), CanvasState::Released);
    }

    #[test]
    fn cube_fades_in_with_the_hero() {
        let mut page = page();
        page.activate();
        page.attach_canvas_object();

        for dt in [0.1, 0.2, 0.15, 0.3, 0.5] {
            page.frame(dt);
            let view = page.draw_list().canvas.unwrap();
            assert_eq!(view.opacity, page.section_state(Section::Hero).opacity);
        }
        assert_eq!(page.draw_list().canvas.unwrap().opacity, 1.0);
    }

    #[test]
    fn cube_is_transparent_before_the_hero_enters() {
        let mut page = page();
        page.activate();
        page.attach_canvas_object();
        page.frame(0.1);
        assert_eq!(page.draw_list().canvas.unwrap().opacity, 0.0);
    }

    #[test]
    fn cards_are_hit_where_they_are_drawn() {
        let mut page = page();
        page.activate();
        // About has not started: its cards are drawn 50 px below their boxes.
        let top_card = page.layout().feature_cards[0];
        let bottom_card = page.layout().feature_cards[2];

        hover(&mut page, Vec2::new(top_card.center().x, top_card.y + 10.0));
        assert_eq!(page.hovered(), Some(HitTarget::Document));

        let below = Vec2::new(bottom_card.center().x, bottom_card.bottom() + 25.0);
        hover(&mut page, below);
        assert_eq!(page.hovered(), Some(HitTarget::FeatureCard(2)));

        for _ in 0..60 {
            page.frame(1.0 / 30.0);
        }
        hover(&mut page, below);
        assert_eq!(page.hovered(), Some(HitTarget::Document));
        hover(&mut page, bottom_card.center());
        assert_eq!(page.hovered(), Some(HitTarget::FeatureCard(2)));
    }

    #[test]
    fn each_icon_has_its_own_glyph() {
        let area = Rect::new(0.0, 0.0, 40.0, 40.0);
        let icons = [Icon::Phone, Icon::Mail, Icon::MapPin, Icon::Award];
        for (i, a) in icons.iter().enumerate() {
            assert!(icon_panels(*a, area).iter().all(|p| area.intersect(&p.rect).is_some()));
            for b in &icons[i + 1..] {
                assert_ne!(icon_panels(*a, area), icon_panels(*b, area), "{a:?} vs {b:?}");
            }
        }
    }

    #[test]
    fn card_glyph_follows_its_content() {
        let settled = |content: PageContent| {
            let mut page = Page::new(PageConfig::default(), content, Vec2::new(1080.0, 720.0));
            page.activate();
            for _ in 0..40 {
                page.frame(0.05);
            }
            page.draw_list()
        };
        let mut swapped = PageContent::default();
        assert_eq!(swapped.features[0].icon, Icon::Award);
        swapped.features[0].icon = Icon::Phone;
        assert_ne!(settled(PageContent::default()), settled(swapped));
    }

    #[test]
    fn background_is_a_diagonal_gradient_under_crosses() {
        let page = page();
        let list = page.draw_list();
        let mut background = list.layer(Layer::Background);

        let gradient = background.next().unwrap();
        assert!(matches!(gradient.fill, Fill::Diagonal { .. }));
        assert_eq!(gradient.rect.h, page.layout().content_height);
        assert!(gradient.fill.corners().iter().all(|c| (c[3] - 0.8).abs() < 1e-6));

        let crosses: Vec<_> = background.collect();
        assert!(crosses.len() > 100);
        assert!(crosses.iter().all(|p| p.fill == Fill::Solid(PATTERN_COLOR)));
        let first = Vec2::new(5.0, 5.0);
        assert!(crosses.iter().any(|p| p.rect.contains(first)));
    }

    #[test]
    fn logo_has_triangle_and_dot() {
        let mut page = page();
        page.activate();
        page.frame(1.0);
        let logo = page.layout().logo;
        let within = |r: &Rect| {
            r.x >= logo.x && r.y >= logo.y && r.right() <= logo.right() && r.bottom() <= logo.bottom()
        };
        let list = page.draw_list();
        let inside: Vec<_> = list.layer(Layer::Content).filter(|p| within(&p.rect)).collect();
        assert_eq!(inside.len(), 3);
        assert_eq!(inside[1].shape, Shape::Triangle);
        assert_eq!(inside[2].fill, Fill::Solid(INDIGO_600));
        assert!(inside[2].rect.w < inside[1].rect.w);
    }
}
