use glam::Vec2;

use crate::config::PageConfig;
use crate::content::PageContent;

const CONTAINER_MAX: f32 = 1024.0;
const CONTAINER_PAD: f32 = 16.0;
const CHAR_WIDTH: f32 = 0.55;
const LINE_HEIGHT: f32 = 1.5;

// Paint order, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    Background,
    Canvas,
    Content,
}

impl Layer {
    pub const PAINT_ORDER: [Layer; 3] = [Layer::Background, Layer::Canvas, Layer::Content];
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    pub fn translated(&self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    pub fn scaled(&self, factor: f32) -> Rect {
        let c = self.center();
        let (w, h) = (self.w * factor, self.h * factor);
        Rect::new(c.x - w * 0.5, c.y - h * 0.5, w, h)
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 > x0 && y1 > y0 {
            Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
        } else {
            None
        }
    }
}

// What a pointer lands on, topmost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    CallToAction,
    FeatureCard(usize),
    ContactCard(usize),
    Canvas,
    Document,
}

impl HitTarget {
    pub fn layer(self) -> Layer {
        match self {
            HitTarget::Canvas => Layer::Canvas,
            HitTarget::Document => Layer::Background,
            _ => Layer::Content,
        }
    }
}

// ======================================
// === TEXT METRICS ===
// ======================================

// Width of a single-line run of `text` at `font_px`.
pub fn text_width(text: &str, font_px: f32) -> f32 {
    text.chars().count() as f32 * font_px * CHAR_WIDTH
}

// Lays `text` out as wrapped lines inside `width`, one rect per line.
pub fn text_lines(text: &str, font_px: f32, x: f32, y: f32, width: f32) -> Vec<Rect> {
    let line_h = font_px * LINE_HEIGHT;
    let per_line = ((width / (font_px * CHAR_WIDTH)).floor() as usize).max(1);

    let mut lines = Vec::new();
    let mut current = 0usize;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        let needed = if current == 0 { len } else { current + 1 + len };
        if needed > per_line && current > 0 {
            lines.push(current);
            current = len;
        } else {
            current = needed;
        }
    }
    if current > 0 {
        lines.push(current);
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, chars)| {
            let w = (chars as f32 * font_px * CHAR_WIDTH).min(width);
            Rect::new(x, y + i as f32 * line_h, w, font_px)
        })
        .collect()
}

fn centered_run(text: &str, font_px: f32, center_x: f32, y: f32) -> Rect {
    let w = text_width(text, font_px);
    Rect::new(center_x - w * 0.5, y, w, font_px)
}

// ======================================
// === PAGE LAYOUT ===
// ======================================

// Logical pixels, origin at the top-left of the document. The canvas band
// has a fixed height before anything mounts.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub viewport: Vec2,
    pub content_height: f32,

    pub header: Rect,
    pub logo: Rect,
    pub title: Rect,

    pub hero: Rect,
    pub canvas_region: Rect,
    pub hero_heading: Rect,
    pub hero_subtitle: Rect,
    pub cta: Rect,

    pub about: Rect,
    pub about_card: Rect,
    pub about_text: Vec<Rect>,
    pub feature_cards: Vec<Rect>,

    pub contact: Rect,
    pub contact_heading: Rect,
    pub contact_cards: Vec<Rect>,

    pub footer: Rect,
    pub footer_text: Rect,
}

impl PageLayout {
    pub fn new(viewport: Vec2, content: &PageContent, config: &PageConfig) -> Self {
        let container_w = viewport.x.min(CONTAINER_MAX) - CONTAINER_PAD * 2.0;
        let container_x = (viewport.x - viewport.x.min(CONTAINER_MAX)) * 0.5 + CONTAINER_PAD;
        let center_x = viewport.x * 0.5;

        // Header: logo above the title.
        let logo = Rect::new(center_x - 40.0, 32.0, 80.0, 80.0);
        let title = centered_run(&content.title, 72.0, center_x, logo.bottom() + 16.0);
        let header = Rect::new(0.0, 0.0, viewport.x, title.bottom() + 32.0);

        // Hero: canvas band behind the text, text pushed down by pt-40.
        let hero_top = header.bottom() + 48.0;
        let canvas_region = Rect::new(0.0, hero_top, viewport.x, config.canvas_height);
        let hero_heading = centered_run(&content.hero_heading, 48.0, center_x, hero_top + 160.0);
        let hero_subtitle =
            centered_run(&content.hero_subtitle, 20.0, center_x, hero_heading.bottom() + 16.0);
        let cta_w = text_width(&content.cta_label, 18.0) + 64.0 + 28.0;
        let cta = Rect::new(center_x - cta_w * 0.5, hero_subtitle.bottom() + 32.0, cta_w, 52.0);
        let hero = Rect::new(container_x, hero_top, container_w, cta.bottom() - hero_top);

        // About: text card on the left, 2x2 feature grid on the right.
        let about_top = hero.bottom().max(canvas_region.bottom()) + 64.0;
        let column_w = (container_w - 48.0) * 0.5;
        let inner_w = column_w - 64.0;
        let mut about_text = vec![Rect::new(
            container_x + 32.0,
            about_top + 32.0,
            text_width(&content.about_heading, 24.0).min(inner_w),
            24.0,
        )];
        let mut cursor = about_top + 32.0 + 24.0 + 16.0;
        for paragraph in &content.about_paragraphs {
            let lines = text_lines(paragraph, 16.0, container_x + 32.0, cursor, inner_w);
            cursor += lines.len() as f32 * 16.0 * LINE_HEIGHT + 16.0;
            about_text.extend(lines);
        }
        let about_card = Rect::new(container_x, about_top, column_w, cursor - about_top + 16.0);

        let card_w = (column_w - 24.0) * 0.5;
        let card_h = 24.0 * 2.0 + 40.0 + 16.0 + 28.0;
        let grid_x = container_x + column_w + 48.0;
        let feature_cards: Vec<Rect> = (0..content.features.len())
            .map(|i| {
                let (col, row) = ((i % 2) as f32, (i / 2) as f32);
                Rect::new(
                    grid_x + col * (card_w + 24.0),
                    about_top + row * (card_h + 24.0),
                    card_w,
                    card_h,
                )
            })
            .collect();
        let grid_bottom = feature_cards.iter().map(Rect::bottom).fold(about_top, f32::max);
        let about = Rect::new(
            container_x,
            about_top,
            container_w,
            about_card.bottom().max(grid_bottom) - about_top,
        );

        // Contact: heading over a centred 2-column grid.
        let contact_top = about.bottom() + 64.0;
        let contact_heading = centered_run(&content.contact_heading, 30.0, center_x, contact_top);
        let grid_w = container_w.min(896.0);
        let grid_x = center_x - grid_w * 0.5;
        let contact_w = (grid_w - 24.0) * 0.5;
        let contact_h = 24.0 * 2.0 + 32.0;
        let grid_top = contact_heading.bottom() + 32.0;
        let contact_cards: Vec<Rect> = (0..content.contacts.len())
            .map(|i| {
                let (col, row) = ((i % 2) as f32, (i / 2) as f32);
                Rect::new(
                    grid_x + col * (contact_w + 24.0),
                    grid_top + row * (contact_h + 24.0),
                    contact_w,
                    contact_h,
                )
            })
            .collect();
        let contact_bottom = contact_cards.iter().map(Rect::bottom).fold(grid_top, f32::max);
        let contact = Rect::new(container_x, contact_top, container_w, contact_bottom - contact_top);

        let footer_top = contact.bottom() + 64.0 + 48.0 + 64.0;
        let footer = Rect::new(0.0, footer_top, viewport.x, 88.0);
        let footer_text = centered_run(&content.footer, 16.0, center_x, footer_top + 36.0);

        Self {
            viewport,
            content_height: footer.bottom(),
            header,
            logo,
            title,
            hero,
            canvas_region,
            hero_heading,
            hero_subtitle,
            cta,
            about,
            about_card,
            about_text,
            feature_cards,
            contact,
            contact_heading,
            contact_cards,
            footer,
            footer_text,
        }
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.viewport.y).max(0.0)
    }

    // Topmost target under a document-space point. `place` moves each
    // capturing element from its layout box to where it is drawn.
    //
    // Only the call to action and the cards capture the pointer. Text above
    // the canvas is transparent to it, so the band still receives drags
    // there once the canvas is mounted.
    pub fn hit_test(
        &self,
        p: Vec2,
        canvas_mounted: bool,
        place: impl Fn(HitTarget, &Rect) -> Rect,
    ) -> HitTarget {
        if place(HitTarget::CallToAction, &self.cta).contains(p) {
            return HitTarget::CallToAction;
        }
        let cards = self
            .feature_cards
            .iter()
            .enumerate()
            .map(|(i, r)| (HitTarget::FeatureCard(i), r))
            .chain(
                self.contact_cards
                    .iter()
                    .enumerate()
                    .map(|(i, r)| (HitTarget::ContactCard(i), r)),
            );
        for (target, rect) in cards {
            if place(target, rect).contains(p) {
                return target;
            }
        }
        if canvas_mounted && self.canvas_region.contains(p) {
            return HitTarget::Canvas;
        }
        HitTarget::Document
    }
}

// Vertical document scroll, clamped to the content height.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scroll {
    offset: f32,
}

impl Scroll {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn scroll_by(&mut self, dy: f32, layout: &PageLayout) -> bool {
        let next = (self.offset + dy).clamp(0.0, layout.max_scroll());
        let moved = next != self.offset;
        self.offset = next;
        moved
    }

    pub fn clamp_to(&mut self, layout: &PageLayout) {
        self.offset = self.offset.clamp(0.0, layout.max_scroll());
    }

    pub fn to_document(&self, viewport_point: Vec2) -> Vec2 {
        Vec2::new(viewport_point.x, viewport_point.y + self.offset)
    }

    pub fn to_viewport(&self, rect: &Rect) -> Rect {
        rect.translated(0.0, -self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_place(_: HitTarget, rect: &Rect) -> Rect {
        *rect
    }

    fn reference_layout() -> PageLayout {
        PageLayout::new(
            Vec2::new(1080.0, 720.0),
            &PageContent::default(),
            &PageConfig::default(),
        )
    }

    #[test]
    fn canvas_band_has_fixed_height() {
        let layout = reference_layout();
        assert_eq!(layout.canvas_region.h, 400.0);
        assert_eq!(layout.canvas_region.w, 1080.0);
        assert_eq!(layout.canvas_region.y, layout.hero.y);
    }

    #[test]
    fn hero_text_sits_inside_the_band() {
        let layout = reference_layout();
        assert!(layout.canvas_region.contains(layout.hero_heading.center()));
        assert!(layout.canvas_region.contains(layout.cta.center()));
        assert!(layout.about.y >= layout.canvas_region.bottom());
    }

    #[test]
    fn cta_captures_pointer_above_canvas() {
        let layout = reference_layout();
        let p = layout.cta.center();
        assert_eq!(layout.hit_test(p, true, in_place), HitTarget::CallToAction);
        assert_eq!(HitTarget::CallToAction.layer(), Layer::Content);
    }

    #[test]
    fn text_passes_pointer_to_mounted_canvas() {
        let layout = reference_layout();
        let p = layout.hero_heading.center();
        assert_eq!(layout.hit_test(p, true, in_place), HitTarget::Canvas);
        assert_eq!(layout.hit_test(p, false, in_place), HitTarget::Document);
    }

    #[test]
    fn cards_are_hit_individually() {
        let layout = reference_layout();
        for (i, card) in layout.feature_cards.iter().enumerate() {
            assert_eq!(layout.hit_test(card.center(), true, in_place), HitTarget::FeatureCard(i));
        }
        for (i, card) in layout.contact_cards.iter().enumerate() {
            assert_eq!(layout.hit_test(card.center(), true, in_place), HitTarget::ContactCard(i));
        }
    }

    #[test]
    fn hit_test_follows_placed_rects() {
        let layout = reference_layout();
        let card = layout.feature_cards[0];
        let below = |target: HitTarget, rect: &Rect| match target {
            HitTarget::FeatureCard(0) => rect.translated(0.0, 50.0),
            _ => *rect,
        };
        let p = Vec2::new(card.center().x, card.y + 10.0);
        assert_eq!(layout.hit_test(p, true, in_place), HitTarget::FeatureCard(0));
        assert_ne!(layout.hit_test(p, true, below), HitTarget::FeatureCard(0));
        let moved = Vec2::new(card.center().x, card.bottom() + 10.0);
        assert_eq!(layout.hit_test(moved, true, below), HitTarget::FeatureCard(0));
    }

    #[test]
    fn scroll_is_clamped() {
        let layout = reference_layout();
        assert!(layout.content_height > layout.viewport.y);
        let mut scroll = Scroll::default();
        assert!(!scroll.scroll_by(-50.0, &layout));
        assert!(scroll.scroll_by(100_000.0, &layout));
        assert_eq!(scroll.offset(), layout.max_scroll());
        let p = scroll.to_document(Vec2::new(10.0, 0.0));
        assert_eq!(p.y, layout.max_scroll());
    }

    #[test]
    fn wrapped_lines_fit_width() {
        let text = PageContent::default().about_paragraphs[0].clone();
        let lines = text_lines(&text, 16.0, 0.0, 0.0, 300.0);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.w <= 300.0));
    }

    #[test]
    fn paint_order_puts_canvas_under_content() {
        assert!(Layer::Canvas < Layer::Content);
        assert_eq!(Layer::PAINT_ORDER[1], Layer::Canvas);
    }
}
