//! Renders a [`Report`] as a single-column, letter-size PDF with a
//! navigable outline: level-1 entries for categories, level-2 for subtags,
//! level-3 for each numbered question.

use crate::model::report::Report;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;

const HEADING1_SIZE: f32 = 18.0;
const HEADING2_SIZE: f32 = 14.0;
const BODY_SIZE: f32 = 10.0;
const SPACER: f32 = 12.0;

const FONT_REGULAR: Name = Name(b"F1");
const FONT_BOLD: Name = Name(b"F2");

/// Renders the report to PDF bytes. An empty report yields a valid
/// document with one blank page and no outline entries.
pub fn render(report: &Report) -> Vec<u8> {
    let layout = Layout::build(report);

    let mut alloc = RefAllocator::default();
    let catalog_id = alloc.next();
    let page_tree_id = alloc.next();
    let font_regular_id = alloc.next();
    let font_bold_id = alloc.next();
    let outline_root_id = alloc.next();

    let page_refs: Vec<(Ref, Ref)> = layout
        .pages
        .iter()
        .map(|_| (alloc.next(), alloc.next()))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id)
        .pages(page_tree_id)
        .outlines(outline_root_id);
    pdf.pages(page_tree_id)
        .kids(page_refs.iter().map(|(page_id, _)| *page_id))
        .count(page_refs.len() as i32);

    for (page, (page_id, content_id)) in layout.pages.iter().zip(&page_refs) {
        let mut writer = pdf.page(*page_id);
        writer.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        writer.parent(page_tree_id);
        writer.contents(*content_id);
        {
            let mut resources = writer.resources();
            let mut fonts = resources.fonts();
            fonts.pair(FONT_REGULAR, font_regular_id);
            fonts.pair(FONT_BOLD, font_bold_id);
        }
        writer.finish();

        let mut content = Content::new();
        for line in &page.lines {
            let encoded = win_ansi(&line.text);
            content.begin_text();
            content.set_font(if line.bold { FONT_BOLD } else { FONT_REGULAR }, line.size);
            content.next_line(MARGIN, line.y);
            content.show(Str(&encoded));
            content.end_text();
        }
        pdf.stream(*content_id, &content.finish());
    }

    pdf.type1_font(font_regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(font_bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    write_outline(
        &mut pdf,
        &mut alloc,
        outline_root_id,
        &layout.bookmarks,
        &page_refs,
    );

    pdf.finish()
}

#[derive(Default)]
struct RefAllocator {
    count: i32,
}

impl RefAllocator {
    fn next(&mut self) -> Ref {
        self.count += 1;
        Ref::new(self.count)
    }
}

struct Line {
    y: f32,
    size: f32,
    bold: bool,
    text: String,
}

#[derive(Default)]
struct Page {
    lines: Vec<Line>,
}

struct Bookmark {
    title: String,
    level: u8,
    page: usize,
    y: f32,
}

/// First pass: flows the report into positioned text lines and records
/// where each bookmark destination lands.
struct Layout {
    pages: Vec<Page>,
    bookmarks: Vec<Bookmark>,
    cursor: f32,
}

impl Layout {
    fn build(report: &Report) -> Layout {
        let mut layout = Layout {
            pages: vec![Page::default()],
            bookmarks: vec![],
            cursor: PAGE_HEIGHT - MARGIN,
        };

        for category in &report.categories {
            let anchor = layout.paragraph(&category.name, HEADING1_SIZE, true);
            layout.mark(&category.name, 1, anchor);
            layout.spacer();

            for subtag in &category.subtags {
                let anchor = layout.paragraph(&subtag.name, HEADING2_SIZE, true);
                layout.mark(&subtag.name, 2, anchor);
                layout.spacer();

                for (index, entry) in subtag.entries.iter().enumerate() {
                    let question = format!("Question {}: {}", index + 1, entry.question);
                    let anchor = layout.paragraph(&question, BODY_SIZE, true);
                    layout.mark(&question, 3, anchor);

                    layout.paragraph(&format!("Answer: {}", entry.answer), BODY_SIZE, false);
                    layout.spacer();
                }
            }
        }

        layout
    }

    /// Flows a wrapped paragraph from the cursor downwards, breaking pages
    /// at the bottom margin. Returns the (page, top) anchor of its first line.
    fn paragraph(&mut self, text: &str, size: f32, bold: bool) -> (usize, f32) {
        let leading = size * 1.2;
        let mut anchor = None;

        for line in wrap(text, size, CONTENT_WIDTH) {
            if self.cursor - leading < MARGIN {
                self.pages.push(Page::default());
                self.cursor = PAGE_HEIGHT - MARGIN;
            }
            anchor.get_or_insert((self.pages.len() - 1, self.cursor));

            self.cursor -= leading;
            self.pages
                .last_mut()
                .unwrap()
                .lines
                .push(Line {
                    y: self.cursor,
                    size,
                    bold,
                    text: line,
                });
        }

        // A paragraph always has at least one line; wrap never returns empty.
        anchor.unwrap_or((self.pages.len() - 1, self.cursor))
    }

    fn spacer(&mut self) {
        self.cursor -= SPACER;
    }

    fn mark(&mut self, title: &str, level: u8, anchor: (usize, f32)) {
        self.bookmarks.push(Bookmark {
            title: title.to_string(),
            level,
            page: anchor.0,
            y: anchor.1,
        });
    }
}

/// Emits the outline tree. Bookmarks arrive in document order with levels
/// 1..=3; an entry's children are the following deeper entries up to the
/// next entry at its own level or above. Object references are allocated
/// monotonically, so duplicate titles never collide.
fn write_outline(
    pdf: &mut Pdf,
    alloc: &mut RefAllocator,
    root_id: Ref,
    bookmarks: &[Bookmark],
    page_refs: &[(Ref, Ref)],
) {
    let ids: Vec<Ref> = bookmarks.iter().map(|_| alloc.next()).collect();

    // Sibling/parent wiring per entry, resolved with a level stack.
    let mut parents: Vec<Ref> = vec![root_id; bookmarks.len()];
    let mut prevs: Vec<Option<usize>> = vec![None; bookmarks.len()];
    let mut nexts: Vec<Option<usize>> = vec![None; bookmarks.len()];
    let mut firsts: Vec<Option<usize>> = vec![None; bookmarks.len()];
    let mut lasts: Vec<Option<usize>> = vec![None; bookmarks.len()];
    let mut counts: Vec<i32> = vec![0; bookmarks.len()];

    let mut root_first: Option<usize> = None;
    let mut root_last: Option<usize> = None;

    // Stack of (index, level) of currently open ancestors.
    let mut stack: Vec<(usize, u8)> = vec![];
    for (i, bookmark) in bookmarks.iter().enumerate() {
        while let Some(&(_, level)) = stack.last() {
            if level >= bookmark.level {
                stack.pop();
            } else {
                break;
            }
        }

        if let Some(&(parent, _)) = stack.last() {
            parents[i] = ids[parent];
            if let Some(prev) = lasts[parent] {
                prevs[i] = Some(prev);
                nexts[prev] = Some(i);
            }
            firsts[parent].get_or_insert(i);
            lasts[parent] = Some(i);
        } else {
            if let Some(prev) = root_last {
                prevs[i] = Some(prev);
                nexts[prev] = Some(i);
            }
            root_first.get_or_insert(i);
            root_last = Some(i);
        }

        // Every open ancestor sees this entry as a visible descendant.
        for &(ancestor, _) in &stack {
            counts[ancestor] += 1;
        }

        stack.push((i, bookmark.level));
    }

    let mut root = pdf.outline(root_id);
    if let (Some(first), Some(last)) = (root_first, root_last) {
        root.first(ids[first]).last(ids[last]);
        root.count(bookmarks.len() as i32);
    }
    root.finish();

    for (i, bookmark) in bookmarks.iter().enumerate() {
        let mut item = pdf.outline_item(ids[i]);
        item.title(TextStr(&bookmark.title));
        item.parent(parents[i]);
        if let Some(prev) = prevs[i] {
            item.prev(ids[prev]);
        }
        if let Some(next) = nexts[i] {
            item.next(ids[next]);
        }
        if let (Some(first), Some(last)) = (firsts[i], lasts[i]) {
            item.first(ids[first]).last(ids[last]);
            item.count(counts[i]);
        }
        item.dest()
            .page(page_refs[bookmark.page].0)
            .xyz(MARGIN, bookmark.y, None);
        item.finish();
    }
}

/// Greedy word wrap against approximate Helvetica metrics. Words wider
/// than a full line are split mid-word.
fn wrap(text: &str, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = vec![];
    let mut current = String::new();
    let mut current_width = 0.0;
    let space_width = char_factor(' ') * size;

    for word in text.split_whitespace() {
        let word_width = text_width(word, size);

        if current.is_empty() {
            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
            } else {
                current_width = hard_split(word, size, max_width, &mut lines, &mut current);
            }
        } else if current_width + space_width + word_width <= max_width {
            current.push(' ');
            current.push_str(word);
            current_width += space_width + word_width;
        } else {
            lines.push(std::mem::take(&mut current));
            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
            } else {
                current_width = hard_split(word, size, max_width, &mut lines, &mut current);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits an overlong word character by character, leaving the tail in
/// `current`. Returns the tail's width.
fn hard_split(
    word: &str,
    size: f32,
    max_width: f32,
    lines: &mut Vec<String>,
    current: &mut String,
) -> f32 {
    let mut width = 0.0;
    for c in word.chars() {
        let w = char_factor(c) * size;
        if !current.is_empty() && width + w > max_width {
            lines.push(std::mem::take(current));
            width = 0.0;
        }
        current.push(c);
        width += w;
    }
    width
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().map(|c| char_factor(c) * size).sum()
}

// Rough per-glyph advance as a fraction of the font size. Close enough to
// Helvetica for wrapping; exact metrics are not needed.
fn char_factor(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' | '`' => 0.28,
        'f' | 't' | 'r' | ' ' | '(' | ')' | '[' | ']' | '-' | '/' | '\\' => 0.35,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => 0.89,
        'A'..='Z' | '0'..='9' | '_' | '?' | '#' | '$' | '&' | '+' | '=' => 0.67,
        _ => 0.56,
    }
}

/// Encodes text for the WinAnsi-declared standard fonts. Characters
/// outside the code page degrade to '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20..=0x7e => c as u8,
            0xa0..=0xff => c as u8,
            _ => match c {
                '\u{2018}' => 0x91,
                '\u{2019}' => 0x92,
                '\u{201c}' => 0x93,
                '\u{201d}' => 0x94,
                '\u{2013}' => 0x96,
                '\u{2014}' => 0x97,
                _ => b'?',
            },
        })
        .collect()
}
