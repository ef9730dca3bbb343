//! Minimal PDF 1.4 writer: base-14 Helvetica text, filled rectangles and circles,
//! stroked lines. Coordinates are in points with the origin at the top-left corner.

use std::fmt::Write as _;

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(…)`/`rgba(…)` and a few keywords.
    /// Alpha is ignored.
    pub fn from_css(raw: &str) -> Option<Color> {
        let s = raw.trim().to_ascii_lowercase();
        if let Some(hex) = s.strip_prefix('#') {
            let expand = |c: char| c.to_digit(16).map(|d| (d * 17) as u8);
            let pair = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            return match hex.len() {
                3 | 4 => {
                    let mut it = hex.chars();
                    Some(Color::rgb(expand(it.next()?)?, expand(it.next()?)?, expand(it.next()?)?))
                }
                6 | 8 => Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?)),
                _ => None,
            };
        }
        if let Some(args) = s.strip_prefix("rgba(").or_else(|| s.strip_prefix("rgb(")) {
            let args = args.strip_suffix(')')?;
            let parts: Vec<u8> = args
                .split(|c| c == ',' || c == ' ' || c == '/')
                .filter(|p| !p.is_empty())
                .take(3)
                .map(|p| p.trim().parse::<f32>().ok().map(|v| v.clamp(0.0, 255.0) as u8))
                .collect::<Option<Vec<u8>>>()?;
            if parts.len() == 3 {
                return Some(Color::rgb(parts[0], parts[1], parts[2]));
            }
            return None;
        }
        match s.as_str() {
            "white" => Some(Color::WHITE),
            "black" => Some(Color::BLACK),
            _ => None,
        }
    }

    /// Linear blend: `t = 0` is `self`, `t = 1` is `other`.
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Relative luminance, 0 (black) to 1 (white).
    pub fn luminance(self) -> f32 {
        0.2126 * self.r + 0.7152 * self.g + 0.0722 * self.b
    }
}

/// The three Helvetica faces every page resource dictionary carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
    Oblique,
}

impl Font {
    pub const ALL: [Font; 3] = [Font::Regular, Font::Bold, Font::Oblique];

    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
        }
    }

    fn base_font(&self) -> &'static str {
        match self {
            Font::Regular => "Helvetica",
            Font::Bold => "Helvetica-Bold",
            Font::Oblique => "Helvetica-Oblique",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rect { x: f32, y: f32, w: f32, h: f32, fill: Color },
    Circle { cx: f32, cy: f32, r: f32, fill: Color },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color },
    /// `y` is the baseline.
    Text { x: f32, y: f32, size: f32, font: Font, color: Color, text: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<Op>,
}

impl Page {
    pub fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, fill: Color) {
        self.ops.push(Op::Rect { x, y, w, h, fill });
    }

    pub fn circle(&mut self, cx: f32, cy: f32, r: f32, fill: Color) {
        self.ops.push(Op::Circle { cx, cy, r, fill });
    }

    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Color) {
        self.ops.push(Op::Line { x1, y1, x2, y2, width, color });
    }

    pub fn text(&mut self, x: f32, y: f32, size: f32, font: Font, color: Color, text: &str) {
        if text.is_empty() {
            return;
        }
        self.ops.push(Op::Text {
            x,
            y,
            size,
            font,
            color,
            text: text.to_string(),
        });
    }

    /// Every text run on the page, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn content_stream(&self) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::new();
        for op in &self.ops {
            match op {
                Op::Rect { x, y, w, h, fill } => {
                    let s = format!(
                        "{} rg\n{} {} {} {} re f\n",
                        color_args(fill),
                        num(*x),
                        num(A4_HEIGHT - y - h),
                        num(*w),
                        num(*h)
                    );
                    out.extend_from_slice(s.as_bytes());
                }
                Op::Circle { cx, cy, r, fill } => {
                    out.extend_from_slice(circle_path(*cx, A4_HEIGHT - cy, *r, fill).as_bytes());
                }
                Op::Line { x1, y1, x2, y2, width, color } => {
                    let s = format!(
                        "{} RG\n{} w\n{} {} m {} {} l S\n",
                        color_args(color),
                        num(*width),
                        num(*x1),
                        num(A4_HEIGHT - y1),
                        num(*x2),
                        num(A4_HEIGHT - y2)
                    );
                    out.extend_from_slice(s.as_bytes());
                }
                Op::Text { x, y, size, font, color, text } => {
                    let head = format!(
                        "BT\n/{} {} Tf\n{} rg\n{} {} Td\n(",
                        font.resource(),
                        num(*size),
                        color_args(color),
                        num(*x),
                        num(A4_HEIGHT - y)
                    );
                    out.extend_from_slice(head.as_bytes());
                    out.extend_from_slice(&escape_string(text));
                    out.extend_from_slice(b") Tj\nET\n");
                }
            }
        }
        out
    }
}

/// A multi-page document. Pages are A4 portrait.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub title: String,
    pub author: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn new(title: &str, author: &str) -> Self {
        Document {
            title: title.to_string(),
            author: author.to_string(),
            pages: Vec::new(),
        }
    }

    /// Serialize to PDF bytes. A document with no pages gets one blank page.
    pub fn to_bytes(&self) -> Vec<u8> {
        let blank = [Page::default()];
        let pages: &[Page] = if self.pages.is_empty() { &blank } else { &self.pages };

        // 1 catalog, 2 pages, 3..=5 fonts, 6 info, then (page, content) pairs.
        let first_page_obj = 7;
        let page_ids: Vec<usize> = (0..pages.len()).map(|i| first_page_obj + i * 2).collect();

        let mut objects: Vec<Vec<u8>> = Vec::new();
        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());

        let kids: Vec<String> = page_ids.iter().map(|id| format!("{} 0 R", id)).collect();
        objects.push(format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids.join(" "), pages.len()).into_bytes());

        for font in Font::ALL {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .into_bytes(),
            );
        }

        let mut info = b"<< /Producer (folio) /Title (".to_vec();
        info.extend_from_slice(&escape_string(&self.title));
        info.extend_from_slice(b") /Author (");
        info.extend_from_slice(&escape_string(&self.author));
        info.extend_from_slice(b") >>");
        objects.push(info);

        for (i, page) in pages.iter().enumerate() {
            let content_id = page_ids[i] + 1;
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R /F3 5 0 R >> >> /Contents {} 0 R >>",
                    num(A4_WIDTH),
                    num(A4_HEIGHT),
                    content_id
                )
                .into_bytes(),
            );
            let stream = page.content_stream();
            let mut obj = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            obj.extend_from_slice(&stream);
            obj.extend_from_slice(b"\nendstream");
            objects.push(obj);
        }

        let mut out: Vec<u8> = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (i, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_at = out.len();
        let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for off in &offsets {
            let _ = write!(xref, "{:010} 00000 n \n", off);
        }
        let _ = write!(
            xref,
            "trailer\n<< /Size {} /Root 1 0 R /Info 6 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_at
        );
        out.extend_from_slice(xref.as_bytes());
        out
    }
}

fn num(v: f32) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn color_args(c: &Color) -> String {
    format!("{} {} {}", num(c.r), num(c.g), num(c.b))
}

fn circle_path(cx: f32, cy: f32, r: f32, fill: &Color) -> String {
    // cubic Bezier quarter-circle constant
    let k = 0.552_284_8 * r;
    format!(
        "{c} rg\n{x0} {y} m\n{x0} {yk1} {xk1} {y1} {x} {y1} c\n{xk2} {y1} {x1} {yk1} {x1} {y} c\n\
         {x1} {yk2} {xk2} {y0} {x} {y0} c\n{xk1} {y0} {x0} {yk2} {x0} {y} c\nf\n",
        c = color_args(fill),
        x = num(cx),
        y = num(cy),
        x0 = num(cx - r),
        x1 = num(cx + r),
        y0 = num(cy - r),
        y1 = num(cy + r),
        xk1 = num(cx - k),
        xk2 = num(cx + k),
        yk1 = num(cy + k),
        yk2 = num(cy - k),
    )
}

/// Encode as WinAnsi bytes for a literal string, escaping delimiters.
/// Characters outside WinAnsi become `?`.
fn escape_string(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = win_ansi(ch).unwrap_or(b'?');
        match byte {
            b'\\' | b'(' | b')' => {
                out.push(b'\\');
                out.push(byte);
            }
            b'\n' | b'\r' | b'\t' => out.push(b' '),
            _ => out.push(byte),
        }
    }
    out
}

fn win_ansi(ch: char) -> Option<u8> {
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) || (0xA0..=0xFF).contains(&code) || ch == '\n' || ch == '\t' {
        return Some(code as u8);
    }
    let byte = match ch {
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn css_colors() {
        assert_eq!(Color::from_css("#fff"), Some(Color::WHITE));
        assert_eq!(Color::from_css("#000000"), Some(Color::BLACK));
        assert_eq!(Color::from_css("#FF000080"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_css("rgb(0, 128, 255)"), Some(Color::rgb(0, 128, 255)));
        assert_eq!(Color::from_css("rgba(0,128,255,0.5)"), Some(Color::rgb(0, 128, 255)));
        assert_eq!(Color::from_css("tomato"), None);
        assert_eq!(Color::from_css("#12"), None);
    }

    #[test]
    fn mix_blends_linearly() {
        let grey = Color::BLACK.mix(Color::WHITE, 0.5);
        assert!((grey.r - 0.5).abs() < 1e-6);
        assert_eq!(Color::BLACK.mix(Color::WHITE, 2.0), Color::WHITE);
    }

    #[test]
    fn strings_are_escaped_and_encoded() {
        assert_eq!(escape_string("a(b)\\c"), b"a\\(b\\)\\\\c".to_vec());
        assert_eq!(escape_string("café – ok"), vec![b'c', b'a', b'f', 0xE9, b' ', 0x96, b' ', b'o', b'k']);
        assert_eq!(escape_string("日"), b"?".to_vec());
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(num(12.0), "12");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(0.333), "0.33");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let mut doc = Document::new("CV", "Ada");
        let mut page = Page::default();
        page.rect(10.0, 10.0, 100.0, 20.0, Color::BLACK);
        page.text(20.0, 40.0, 12.0, Font::Bold, Color::BLACK, "Hello (world)");
        doc.pages.push(page);
        let bytes = doc.to_bytes();

        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(bytes.ends_with(b"%%EOF\n"));

        let startxref = find(&bytes, b"startxref\n").unwrap() + b"startxref\n".len();
        let tail = std::str::from_utf8(&bytes[startxref..]).unwrap();
        let xref_at: usize = tail.lines().next().unwrap().parse().unwrap();
        assert!(bytes[xref_at..].starts_with(b"xref\n"));

        let table = std::str::from_utf8(&bytes[xref_at..startxref]).unwrap();
        let entries: Vec<&str> = table.lines().skip(3).take_while(|l| l.ends_with(" n ")).collect();
        assert_eq!(entries.len(), 8);
        for (i, entry) in entries.iter().enumerate() {
            let off: usize = entry[..10].parse().unwrap();
            assert!(bytes[off..].starts_with(format!("{} 0 obj", i + 1).as_bytes()));
        }
        assert!(find(&bytes, b"(Hello \\(world\\)) Tj").is_some());
        assert!(find(&bytes, b"/BaseFont /Helvetica-Bold").is_some());
    }

    #[test]
    fn empty_document_still_has_a_page() {
        let bytes = Document::new("", "").to_bytes();
        assert!(find(&bytes, b"/Count 1").is_some());
    }
}
