//! Two-column CV: a colored sidebar (profile, contact, skills, knowledge) next to the
//! main column (summary, experience, education). The sidebar band repeats on every page.

use super::layout::{Column, Sheet};
use super::writer::{Document, Font, Page, A4_HEIGHT, A4_WIDTH};
use super::{CvData, CvEntry, Ink};
use crate::render::initials;

const SIDEBAR_WIDTH: f32 = 190.0;
const MARGIN: f32 = 36.0;
const GUTTER: f32 = 28.0;

pub fn render(data: &CvData, ink: &Ink) -> Document {
    let page_ink = ink.clone();
    let mut sheet = Sheet::new(move |page: &mut Page, index: usize| {
        page.rect(0.0, 0.0, A4_WIDTH, A4_HEIGHT, page_ink.background);
        page.rect(0.0, 0.0, SIDEBAR_WIDTH, A4_HEIGHT, page_ink.primary);
        let label = format!("{}", index + 1);
        page.text(A4_WIDTH - MARGIN, A4_HEIGHT - 20.0, 8.0, Font::Regular, page_ink.muted, &label);
    });

    let side_text = ink.on_primary;
    let side_soft = ink.on_primary.mix(ink.primary, 0.35);
    let mut side = Column::new(22.0, SIDEBAR_WIDTH - 44.0, MARGIN, MARGIN, A4_HEIGHT - MARGIN);

    // Avatar disc with initials
    let letters = initials(&data.name);
    if !letters.is_empty() {
        let r = 38.0;
        let cx = SIDEBAR_WIDTH / 2.0;
        let cy = side.y + r;
        let page = sheet.page(0);
        page.circle(cx, cy, r, ink.on_primary.mix(ink.primary, 0.75));
        let size = 26.0;
        let w = super::metrics::text_width(&letters, Font::Bold, size);
        page.text(cx - w / 2.0, cy + size * 0.35, size, Font::Bold, side_text, &letters);
        side.gap(r * 2.0 + 18.0);
    }

    if !data.contacts.is_empty() {
        side.heading(&mut sheet, "CONTACT", 10.0, side_text, Some(side_soft));
        for (label, value) in &data.contacts {
            side.line(&mut sheet, label, Font::Bold, 7.5, side_soft);
            side.paragraph(&mut sheet, value, Font::Regular, 8.5, side_text);
            side.gap(4.0);
        }
        side.gap(10.0);
    }

    if !data.skills.is_empty() {
        side.heading(&mut sheet, "SKILLS", 10.0, side_text, Some(side_soft));
        for (name, level) in &data.skills {
            side.bar(&mut sheet, name, *level, 8.5, (side_text, side_soft, side_text));
        }
        side.gap(10.0);
    }

    if !data.knowledge.is_empty() {
        side.heading(&mut sheet, "KNOWLEDGE", 10.0, side_text, Some(side_soft));
        side.pills(&mut sheet, &data.knowledge, 7.5, side_soft, ink.primary);
    }

    // Main column flows independently of the sidebar.
    let main_x = SIDEBAR_WIDTH + GUTTER;
    let mut main = Column::new(main_x, A4_WIDTH - main_x - MARGIN, MARGIN + 4.0, MARGIN, A4_HEIGHT - MARGIN);

    main.line(&mut sheet, &super::metrics::fit(data.display_name(), Font::Bold, 24.0, main.width), Font::Bold, 24.0, ink.text);
    if !data.role.is_empty() {
        main.line(&mut sheet, &data.role, Font::Regular, 12.0, ink.primary);
    }
    main.gap(14.0);

    if !data.summary.is_empty() {
        main.heading(&mut sheet, "Profile", 13.0, ink.text, Some(ink.border));
        main.paragraph(&mut sheet, &data.summary, Font::Regular, 9.5, ink.text);
        main.gap(12.0);
    }

    for (title, entries) in [("Experience", &data.experience), ("Education", &data.education)] {
        if entries.is_empty() {
            continue;
        }
        main.heading(&mut sheet, title, 13.0, ink.text, Some(ink.border));
        for (i, entry) in entries.iter().enumerate() {
            entry_block(&mut main, &mut sheet, entry, ink, i);
        }
        main.gap(8.0);
    }

    sheet.finish(data.display_name(), &data.name)
}

fn entry_block(col: &mut Column, sheet: &mut Sheet, entry: &CvEntry, ink: &Ink, index: usize) {
    col.reserve(40.0);
    let accent = ink.variant(index);
    // accent tick beside the entry head
    sheet.page(col.page).rect(col.x - 10.0, col.y + 1.0, 3.0, 12.0, accent);
    col.split_line(
        sheet,
        (&entry.title, Font::Bold, ink.text),
        (&entry.period, Font::Regular, ink.muted),
        10.5,
    );
    if !entry.organization.is_empty() {
        col.line(sheet, &entry.organization, Font::Oblique, 9.5, accent);
    }
    if !entry.description.is_empty() {
        col.paragraph(sheet, &entry.description, Font::Regular, 9.0, ink.text);
    }
    col.gap(8.0);
}
