//! Flow layout on top of the writer: pages are created on demand and decorated as
//! they appear; columns advance down the page and spill onto the next one.

use super::metrics::{text_width, wrap};
use super::writer::{Color, Document, Font, Page};

/// Pages plus the decoration every new page gets (backgrounds, bands, page numbers).
pub struct Sheet<'a> {
    pages: Vec<Page>,
    decorate: Box<dyn Fn(&mut Page, usize) + 'a>,
}

impl<'a> Sheet<'a> {
    pub fn new(decorate: impl Fn(&mut Page, usize) + 'a) -> Self {
        Sheet {
            pages: Vec::new(),
            decorate: Box::new(decorate),
        }
    }

    /// Page `index`, creating and decorating any missing pages up to it.
    pub fn page(&mut self, index: usize) -> &mut Page {
        while self.pages.len() <= index {
            let mut page = Page::default();
            (self.decorate)(&mut page, self.pages.len());
            self.pages.push(page);
        }
        &mut self.pages[index]
    }

    pub fn finish(mut self, title: &str, author: &str) -> Document {
        self.page(0);
        Document {
            title: title.to_string(),
            author: author.to_string(),
            pages: self.pages,
        }
    }
}

/// A vertical run of content. `y` is the top of the next block.
#[derive(Debug, Clone)]
pub struct Column {
    pub x: f32,
    pub width: f32,
    first_top: f32,
    top: f32,
    bottom: f32,
    pub page: usize,
    pub y: f32,
}

impl Column {
    /// `first_top` applies on the first page, `top` on continuation pages.
    pub fn new(x: f32, width: f32, first_top: f32, top: f32, bottom: f32) -> Self {
        Column {
            x,
            width,
            first_top,
            top,
            bottom,
            page: 0,
            y: first_top,
        }
    }

    fn page_top(&self) -> f32 {
        if self.page == 0 {
            self.first_top
        } else {
            self.top
        }
    }

    /// Move to the next page unless `height` still fits. A block taller than a whole
    /// page is placed anyway rather than looping.
    pub fn reserve(&mut self, height: f32) {
        if self.y + height > self.bottom && self.y > self.page_top() {
            self.page += 1;
            self.y = self.top;
        }
    }

    pub fn gap(&mut self, height: f32) {
        self.y += height;
    }

    pub fn line(&mut self, sheet: &mut Sheet, text: &str, font: Font, size: f32, color: Color) {
        let leading = size * 1.35;
        self.reserve(leading);
        sheet.page(self.page).text(self.x, self.y + size, size, font, color, text);
        self.y += leading;
    }

    /// Left and right text on one line, the right part flush with the column edge.
    pub fn split_line(
        &mut self,
        sheet: &mut Sheet,
        left: (&str, Font, Color),
        right: (&str, Font, Color),
        size: f32,
    ) {
        let leading = size * 1.35;
        let right_w = text_width(right.0, right.1, size);
        let left_max = (self.width - right_w - 8.0).max(self.width * 0.4);
        let left_lines = wrap(left.0, left.1, size, left_max);
        self.reserve(leading * left_lines.len().max(1) as f32);
        let page = sheet.page(self.page);
        page.text(self.x + self.width - right_w, self.y + size, size, right.1, right.2, right.0);
        for (i, l) in left_lines.iter().enumerate() {
            page.text(self.x, self.y + size + leading * i as f32, size, left.1, left.2, l);
        }
        self.y += leading * left_lines.len().max(1) as f32;
    }

    pub fn paragraph(&mut self, sheet: &mut Sheet, text: &str, font: Font, size: f32, color: Color) {
        for l in wrap(text, font, size, self.width) {
            if l.is_empty() {
                self.gap(size * 0.6);
                continue;
            }
            self.line(sheet, &l, font, size, color);
        }
    }

    /// Section heading, kept on the same page as at least one following line.
    pub fn heading(&mut self, sheet: &mut Sheet, text: &str, size: f32, color: Color, rule: Option<Color>) {
        self.reserve(size * 1.35 + 30.0);
        self.line(sheet, text, Font::Bold, size, color);
        if let Some(rule) = rule {
            let y = self.y;
            sheet.page(self.page).line(self.x, y, self.x + self.width, y, 0.8, rule);
            self.gap(6.0);
        }
        self.gap(4.0);
    }

    /// Skill name above a track filled to `level` percent.
    pub fn bar(
        &mut self,
        sheet: &mut Sheet,
        label: &str,
        level: u8,
        size: f32,
        colors: (Color, Color, Color),
    ) {
        let (text, track, fill) = colors;
        self.reserve(size * 1.35 + 10.0);
        self.split_line(sheet, (label, Font::Regular, text), (&format!("{}%", level.min(100)), Font::Regular, text), size);
        let y = self.y;
        let page = sheet.page(self.page);
        page.rect(self.x, y, self.width, 4.0, track);
        page.rect(self.x, y, self.width * level.min(100) as f32 / 100.0, 4.0, fill);
        self.gap(10.0);
    }

    /// Rounded-looking tags laid out left to right, wrapping to new rows.
    pub fn pills(&mut self, sheet: &mut Sheet, items: &[String], size: f32, fill: Color, text: Color) {
        let pad = 5.0;
        let height = size + pad * 1.6;
        let mut cursor = self.x;
        self.reserve(height);
        for item in items {
            let label = super::metrics::fit(item, Font::Regular, size, self.width - pad * 2.0);
            let w = text_width(&label, Font::Regular, size) + pad * 2.0;
            if cursor > self.x && cursor + w > self.x + self.width {
                cursor = self.x;
                self.gap(height + 4.0);
                self.reserve(height);
            }
            let r = height / 2.0;
            let y = self.y;
            let page = sheet.page(self.page);
            page.rect(cursor + r, y, (w - 2.0 * r).max(0.0), height, fill);
            page.circle(cursor + r, y + r, r, fill);
            page.circle(cursor + w - r, y + r, r, fill);
            page.text(cursor + pad, y + height - pad * 0.9, size, Font::Regular, text, &label);
            cursor += w + 4.0;
        }
        self.gap(height + 6.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::writer::{Op, A4_HEIGHT};

    #[test]
    fn pages_are_decorated_once_each() {
        let mut sheet = Sheet::new(|page: &mut Page, idx: usize| {
            page.text(10.0, 10.0, 8.0, Font::Regular, Color::BLACK, &format!("page {}", idx + 1));
        });
        sheet.page(2);
        sheet.page(1);
        let doc = sheet.finish("t", "a");
        assert_eq!(doc.pages.len(), 3);
        assert_eq!(doc.pages[2].texts(), vec!["page 3"]);
        assert_eq!(doc.pages[1].texts(), vec!["page 2"]);
    }

    #[test]
    fn column_spills_to_next_page_at_continuation_top() {
        let mut sheet = Sheet::new(|_: &mut Page, _: usize| {});
        let mut col = Column::new(40.0, 200.0, 300.0, 50.0, A4_HEIGHT - 40.0);
        for i in 0..80 {
            col.line(&mut sheet, &format!("line {}", i), Font::Regular, 10.0, Color::BLACK);
        }
        assert!(col.page >= 1);
        let doc = sheet.finish("", "");
        let first_on_page_two = doc.pages[1].ops.iter().find_map(|op| match op {
            Op::Text { y, .. } => Some(*y),
            _ => None,
        });
        assert_eq!(first_on_page_two, Some(60.0));
    }

    #[test]
    fn pills_wrap_within_width() {
        let mut sheet = Sheet::new(|_: &mut Page, _: usize| {});
        let mut col = Column::new(0.0, 120.0, 0.0, 0.0, A4_HEIGHT);
        let items: Vec<String> = ["Rust", "Distributed Systems", "Docker", "CI/CD"].iter().map(|s| s.to_string()).collect();
        col.pills(&mut sheet, &items, 8.0, Color::WHITE, Color::BLACK);
        let doc = sheet.finish("", "");
        for op in &doc.pages[0].ops {
            if let Op::Rect { x, w, .. } = op {
                assert!(x + w <= 120.0 + 0.01);
            }
        }
        assert!(col.y > 8.0 * 2.0 + 8.0);
    }
}
