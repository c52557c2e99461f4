//! Pure pagination of report text onto fixed-geometry pages.
//!
//! Everything here is plain arithmetic over the section text, so the page
//! breaks and truncation can be asserted on without parsing PDF bytes. The
//! renderer in [`crate::pdf`] realizes the resulting operations verbatim.

/// A4 portrait, in points.
pub const PAGE_WIDTH_PT: f32 = 595.2756;
pub const PAGE_HEIGHT_PT: f32 = 841.8898;

/// Left margin for the title and section labels.
pub const MARGIN_X: f32 = 50.0;
/// Body lines sit indented inside their section.
pub const BODY_INDENT: f32 = 10.0;
/// First baseline on every page.
pub const TOP_Y: f32 = PAGE_HEIGHT_PT - 50.0;
/// A body line below this baseline moves to a fresh page instead.
pub const PAGE_BREAK_Y: f32 = 80.0;

/// Longest rendered line; anything longer is cut, not reflowed.
pub const MAX_LINE_CHARS: usize = 1000;

const TITLE_DROP: f32 = 25.0;
const LABEL_DROP: f32 = 15.0;
const LINE_DROP: f32 = 13.0;
const SECTION_GAP: f32 = 10.0;

/// Typographic role of a text operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontRole {
    /// Bold, 14 pt
    Title,
    /// Bold, 11 pt
    Label,
    /// Regular, 10 pt
    Body,
}

impl FontRole {
    pub fn size(self) -> f32 {
        match self {
            FontRole::Title => 14.0,
            FontRole::Label => 11.0,
            FontRole::Body => 10.0,
        }
    }

    pub fn bold(self) -> bool {
        matches!(self, FontRole::Title | FontRole::Label)
    }
}

/// One positioned piece of text. Coordinates are points from the bottom-left
/// page corner, PDF style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub role: FontRole,
    pub text: String,
}

/// A report section: bold label plus preformatted body text.
#[derive(Debug, Clone)]
pub struct Section {
    pub label: String,
    pub body: String,
}

impl Section {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

/// A fully paginated report, ready for a renderer.
#[derive(Debug, Clone)]
pub struct ReportLayout {
    pub title: String,
    pub pages: usize,
    pub ops: Vec<TextOp>,
}

/// Lay the title and sections out onto pages.
///
/// The cursor walks down from [`TOP_Y`]; only body lines check for the page
/// break, and the check happens before the line is placed. Body lines are
/// truncated to [`MAX_LINE_CHARS`] characters, never reflowed.
pub fn paginate(title: &str, sections: &[Section]) -> ReportLayout {
    let mut ops = Vec::new();
    let mut page = 0usize;
    let mut y = TOP_Y;

    ops.push(TextOp {
        page,
        x: MARGIN_X,
        y,
        role: FontRole::Title,
        text: title.to_string(),
    });
    y -= TITLE_DROP;

    for section in sections {
        ops.push(TextOp {
            page,
            x: MARGIN_X,
            y,
            role: FontRole::Label,
            text: section.label.clone(),
        });
        y -= LABEL_DROP;

        for line in section.body.split('\n') {
            if y < PAGE_BREAK_Y {
                page += 1;
                y = TOP_Y;
            }
            ops.push(TextOp {
                page,
                x: MARGIN_X + BODY_INDENT,
                y,
                role: FontRole::Body,
                text: truncate_chars(line, MAX_LINE_CHARS),
            });
            y -= LINE_DROP;
        }
        y -= SECTION_GAP;
    }

    ReportLayout {
        title: title.to_string(),
        pages: page + 1,
        ops,
    }
}

/// Cut at a character boundary; never splits a code point.
pub fn truncate_chars(line: &str, max_chars: usize) -> String {
    line.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_ops(layout: &ReportLayout) -> Vec<&TextOp> {
        layout
            .ops
            .iter()
            .filter(|op| op.role == FontRole::Body)
            .collect()
    }

    #[test]
    fn title_and_label_positions() {
        let layout = paginate(
            "Report",
            &[Section::new("First:", "one\ntwo"), Section::new("Second:", "three")],
        );

        let title = &layout.ops[0];
        assert_eq!(title.role, FontRole::Title);
        assert_eq!(title.page, 0);
        assert_eq!(title.x, MARGIN_X);
        assert_eq!(title.y, TOP_Y);

        let label = &layout.ops[1];
        assert_eq!(label.role, FontRole::Label);
        assert_eq!(label.y, TOP_Y - 25.0);

        let first_line = &layout.ops[2];
        assert_eq!(first_line.role, FontRole::Body);
        assert_eq!(first_line.x, MARGIN_X + BODY_INDENT);
        assert_eq!(first_line.y, TOP_Y - 25.0 - 15.0);
        assert_eq!(first_line.text, "one");
    }

    #[test]
    fn single_section_fits_on_one_page() {
        let body = vec!["line"; 20].join("\n");
        let layout = paginate("Report", &[Section::new("Notes:", body)]);

        assert_eq!(layout.pages, 1);
        assert!(layout.ops.iter().all(|op| op.page == 0));
    }

    #[test]
    fn long_section_breaks_to_a_fresh_page() {
        let body = (0..100).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let layout = paginate("Report", &[Section::new("Notes:", body)]);

        assert_eq!(layout.pages, 2);

        // 52 body lines fit under the title and label before y drops below 80.
        let ops = body_ops(&layout);
        let on_first: Vec<_> = ops.iter().filter(|op| op.page == 0).collect();
        let on_second: Vec<_> = ops.iter().filter(|op| op.page == 1).collect();
        assert_eq!(on_first.len(), 52);
        assert_eq!(on_second.len(), 48);

        assert_eq!(on_first.last().map(|op| op.text.as_str()), Some("line 51"));
        let first_on_second = on_second.first().copied();
        assert_eq!(first_on_second.map(|op| op.text.as_str()), Some("line 52"));
        assert_eq!(first_on_second.map(|op| op.y), Some(TOP_Y));
    }

    #[test]
    fn body_lines_never_sit_below_the_break_line() {
        let body = (0..500).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");
        let layout = paginate("Report", &[Section::new("Notes:", body)]);

        assert!(layout.pages > 2);
        assert!(body_ops(&layout).iter().all(|op| op.y >= PAGE_BREAK_Y));
    }

    #[test]
    fn lines_are_truncated_by_characters_not_bytes() {
        let long = "á".repeat(1200);
        let layout = paginate("Report", &[Section::new("Notes:", long)]);

        let line = body_ops(&layout)[0];
        assert_eq!(line.text.chars().count(), MAX_LINE_CHARS);
        assert_eq!(line.text, "á".repeat(MAX_LINE_CHARS));
    }

    #[test]
    fn short_lines_pass_through_unchanged() {
        assert_eq!(truncate_chars("hello", 1000), "hello");
        assert_eq!(truncate_chars("", 1000), "");
        assert_eq!(truncate_chars("abc", 2), "ab");
    }

    #[test]
    fn empty_body_still_takes_one_line_slot() {
        let layout = paginate("Report", &[Section::new("Notes:", "")]);

        let ops = body_ops(&layout);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].text, "");
    }

    #[test]
    fn sections_appear_in_order_with_their_text() {
        let layout = paginate(
            "Report",
            &[
                Section::new("A:", "alpha"),
                Section::new("B:", "beta\ngamma"),
            ],
        );

        let texts: Vec<_> = layout.ops.iter().map(|op| op.text.as_str()).collect();
        assert_eq!(texts, ["Report", "A:", "alpha", "B:", "beta", "gamma"]);
    }
}
