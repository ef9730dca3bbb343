//! Single-column CV under a header band scattered with a seeded dot pattern.

use super::layout::{Column, Sheet};
use super::metrics::{fit, text_width};
use super::pattern::{dot_pattern, seed_for, Dot};
use super::writer::{Color, Document, Font, Page, A4_HEIGHT, A4_WIDTH};
use super::{CvData, Ink};
use crate::theme::Mode;

const BAND_HEIGHT: f32 = 150.0;
const THIN_BAND: f32 = 22.0;
const MARGIN: f32 = 48.0;

pub fn render(data: &CvData, ink: &Ink, mode: Mode) -> Document {
    let seed = seed_for(data.display_name(), mode);
    let band_dots = dot_pattern(&seed, 70, A4_WIDTH, BAND_HEIGHT);
    let corner_dots = dot_pattern(&format!("{}:corner", seed), 24, 140.0, 110.0);

    let page_ink = ink.clone();
    let mut sheet = Sheet::new(move |page: &mut Page, index: usize| {
        page.rect(0.0, 0.0, A4_WIDTH, A4_HEIGHT, page_ink.background);
        if index == 0 {
            page.rect(0.0, 0.0, A4_WIDTH, BAND_HEIGHT, page_ink.primary);
            draw_dots(page, &band_dots, 1.0, &page_ink);
        } else {
            page.rect(0.0, 0.0, A4_WIDTH, THIN_BAND, page_ink.primary);
            draw_dots(page, &band_dots, THIN_BAND / BAND_HEIGHT, &page_ink);
        }
        // muted dots in the bottom-right corner
        for d in &corner_dots {
            let color = page_ink.background.mix(page_ink.secondary, d.strength * 0.5);
            page.circle(A4_WIDTH - 140.0 + d.x, A4_HEIGHT - 110.0 + d.y, d.r * 0.8, color);
        }
        let label = format!("{}", index + 1);
        let w = text_width(&label, Font::Regular, 8.0);
        page.text((A4_WIDTH - w) / 2.0, A4_HEIGHT - 20.0, 8.0, Font::Regular, page_ink.muted, &label);
    });

    // Header text sits on the band of the first page.
    {
        let page = sheet.page(0);
        let width = A4_WIDTH - MARGIN * 2.0;
        page.text(
            MARGIN,
            72.0,
            28.0,
            Font::Bold,
            ink.on_primary,
            &fit(data.display_name(), Font::Bold, 28.0, width),
        );
        if !data.role.is_empty() {
            page.text(MARGIN, 96.0, 13.0, Font::Regular, ink.on_primary, &fit(&data.role, Font::Regular, 13.0, width));
        }
        if !data.contacts.is_empty() {
            let line = data
                .contacts
                .iter()
                .map(|(_, v)| v.as_str())
                .collect::<Vec<_>>()
                .join("  \u{2022}  ");
            page.text(MARGIN, 124.0, 8.5, Font::Regular, ink.on_primary, &fit(&line, Font::Regular, 8.5, width));
        }
    }

    let mut col = Column::new(
        MARGIN,
        A4_WIDTH - MARGIN * 2.0,
        BAND_HEIGHT + 30.0,
        THIN_BAND + 30.0,
        A4_HEIGHT - MARGIN,
    );

    if !data.summary.is_empty() {
        section_heading(&mut col, &mut sheet, "Profile", ink);
        col.paragraph(&mut sheet, &data.summary, Font::Regular, 10.0, ink.text);
        col.gap(14.0);
    }

    // Full contact list only when the header line had to be cut.
    if data.contacts.len() > 3 {
        section_heading(&mut col, &mut sheet, "Contact", ink);
        for (label, value) in &data.contacts {
            col.split_line(&mut sheet, (value, Font::Regular, ink.text), (label, Font::Regular, ink.muted), 9.5);
        }
        col.gap(14.0);
    }

    for (title, entries) in [("Experience", &data.experience), ("Education", &data.education)] {
        if entries.is_empty() {
            continue;
        }
        section_heading(&mut col, &mut sheet, title, ink);
        for (i, entry) in entries.iter().enumerate() {
            col.reserve(40.0);
            let accent = ink.variant(i);
            let dot_y = col.y + 6.0;
            sheet.page(col.page).circle(col.x + 3.0, dot_y, 3.0, accent);
            let mut inner = col.clone();
            inner.x += 14.0;
            inner.width -= 14.0;
            inner.split_line(
                &mut sheet,
                (&entry.title, Font::Bold, ink.text),
                (&entry.period, Font::Regular, ink.muted),
                11.0,
            );
            if !entry.organization.is_empty() {
                inner.line(&mut sheet, &entry.organization, Font::Oblique, 10.0, accent);
            }
            if !entry.description.is_empty() {
                inner.paragraph(&mut sheet, &entry.description, Font::Regular, 9.5, ink.text);
            }
            col.page = inner.page;
            col.y = inner.y;
            col.gap(10.0);
        }
        col.gap(6.0);
    }

    if !data.skills.is_empty() {
        section_heading(&mut col, &mut sheet, "Skills", ink);
        // two skills per row
        let half = (col.width - 24.0) / 2.0;
        for (row, pair) in data.skills.chunks(2).enumerate() {
            col.reserve(24.0);
            let start = col.clone();
            let mut lowest = col.y;
            for (i, (name, level)) in pair.iter().enumerate() {
                let mut cell = start.clone();
                cell.x += i as f32 * (half + 24.0);
                cell.width = half;
                let fill = ink.variant(row * 2 + i);
                cell.bar(&mut sheet, name, *level, 9.0, (ink.text, ink.border, fill));
                lowest = lowest.max(cell.y);
            }
            col.y = lowest;
        }
        col.gap(8.0);
    }

    if !data.knowledge.is_empty() {
        section_heading(&mut col, &mut sheet, "Knowledge", ink);
        col.pills(&mut sheet, &data.knowledge, 8.5, ink.surface.mix(ink.primary, 0.15), ink.text);
    }

    sheet.finish(data.display_name(), &data.name)
}

fn section_heading(col: &mut Column, sheet: &mut Sheet, title: &str, ink: &Ink) {
    col.reserve(50.0);
    let y = col.y + 7.0;
    sheet.page(col.page).circle(col.x + 4.0, y, 4.0, ink.primary);
    let mut inner = col.clone();
    inner.x += 14.0;
    inner.width -= 14.0;
    inner.heading(sheet, title, 13.0, ink.text, None);
    col.page = inner.page;
    col.y = inner.y;
}

/// Band dots, squashed vertically by `scale_y` on the thin continuation band.
fn draw_dots(page: &mut Page, dots: &[Dot], scale_y: f32, ink: &Ink) {
    for d in dots {
        let color: Color = ink.primary.mix(ink.on_primary, d.strength);
        let r = if scale_y < 1.0 { (d.r * 0.5).max(1.0) } else { d.r };
        page.circle(d.x, d.y * scale_y, r, color);
    }
}
