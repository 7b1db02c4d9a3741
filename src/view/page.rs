//! Full-page rendering into an off-screen buffer.
//!
//! The whole page is laid out once at its natural height. The TUI shows a
//! window of it ([`PageViewport`]); `--plain` prints all of it.

use super::cards::{self, Card, CardOptions, StatCard};
use super::styles::PageStyles;
use crate::integration::PageOutcome;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Blank rows between sections.
const SECTION_GAP: u16 = 1;

/// Height of the stat card row: border, label, value, border.
const STAT_ROW_HEIGHT: u16 = 4;

/// Settings for one page render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageOptions {
    /// Colours for every element.
    pub styles: PageStyles,
    /// Dependencies listed before expansion.
    pub dependency_preview: usize,
    /// Scorecard checks listed.
    pub scorecard_preview: usize,
    /// List every dependency.
    pub show_all_dependencies: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            styles: PageStyles::default(),
            dependency_preview: 10,
            scorecard_preview: 5,
            show_all_dependencies: false,
        }
    }
}

enum Section {
    Plain(Vec<Line<'static>>),
    Stats([StatCard; 4]),
    Card(Card),
}

impl Section {
    fn height(&self) -> u16 {
        match self {
            Section::Plain(lines) => u16::try_from(lines.len()).unwrap_or(u16::MAX),
            Section::Stats(_) => STAT_ROW_HEIGHT,
            Section::Card(card) => card.height(),
        }
    }
}

fn sections(outcome: &PageOutcome, options: &PageOptions, width: u16) -> Vec<Section> {
    let styles = &options.styles;

    let card_options = CardOptions {
        width: usize::from(width.saturating_sub(2)),
        dependency_preview: options.dependency_preview,
        scorecard_preview: options.scorecard_preview,
        show_all_dependencies: options.show_all_dependencies,
    };

    let (identifier, insight) = match outcome {
        PageOutcome::Loaded {
            identifier,
            insight,
        } => (identifier, insight.as_ref()),
        PageOutcome::Failed { message } => {
            return vec![Section::Card(cards::failure_card(
                *message,
                styles,
                &card_options,
            ))];
        }
    };

    let mut sections = vec![
        Section::Plain(cards::header_lines(identifier, styles)),
        Section::Stats(cards::stat_cards(insight, styles)),
        Section::Card(cards::vulnerabilities_card(insight, styles, &card_options)),
        Section::Card(cards::dependencies_card(insight, styles, &card_options)),
        Section::Card(cards::license_card(insight, styles)),
        Section::Card(cards::scorecard_card(insight, styles, &card_options)),
    ];
    sections.extend(cards::repository_card(insight, styles).map(Section::Card));
    sections.extend(cards::published_card(insight).map(Section::Card));
    sections
}

/// Render the page for `outcome` at `width` columns.
///
/// The returned buffer is exactly as tall as the content.
pub fn render_page(outcome: &PageOutcome, options: &PageOptions, width: u16) -> Buffer {
    let sections = sections(outcome, options, width);

    let gaps = u16::try_from(sections.len().saturating_sub(1))
        .unwrap_or(u16::MAX)
        .saturating_mul(SECTION_GAP);
    let height = sections
        .iter()
        .fold(gaps, |total, s| total.saturating_add(s.height()));

    let mut buf = Buffer::empty(Rect::new(0, 0, width, height));
    let mut y = 0u16;

    for section in sections {
        let section_height = section.height();
        let area = Rect::new(0, y, width, section_height).intersection(buf.area);

        match section {
            Section::Plain(lines) => Paragraph::new(lines).render(area, &mut buf),
            Section::Stats(stats) => render_stat_row(&stats, &options.styles, area, &mut buf),
            Section::Card(card) => render_card(card, &options.styles, area, &mut buf),
        }

        y = y.saturating_add(section_height).saturating_add(SECTION_GAP);
    }

    buf
}

fn render_card(card: Card, styles: &PageStyles, area: Rect, buf: &mut Buffer) {
    let block = Block::default()
        .title(format!(" {} ", card.title))
        .title_style(styles.label)
        .borders(Borders::ALL)
        .border_style(styles.border);

    Paragraph::new(card.lines).block(block).render(area, buf);
}

fn render_stat_row(stats: &[StatCard; 4], styles: &PageStyles, area: Rect, buf: &mut Buffer) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    for (stat, column) in stats.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(styles.border);
        let lines = vec![
            Line::styled(stat.label, styles.muted),
            Line::from(stat.value.clone()),
        ];
        Paragraph::new(lines).block(block).render(*column, buf);
    }
}

/// Page height at `width`, without keeping the buffer.
pub fn page_height(outcome: &PageOutcome, options: &PageOptions, width: u16) -> usize {
    usize::from(render_page(outcome, options, width).area.height)
}

// ===== PageViewport Widget =====

/// Shows `page` starting at row `scroll`.
pub struct PageViewport<'a> {
    page: &'a Buffer,
    scroll: usize,
}

impl<'a> PageViewport<'a> {
    /// Viewport over `page` starting at row `scroll`.
    pub fn new(page: &'a Buffer, scroll: usize) -> Self {
        Self { page, scroll }
    }
}

impl Widget for PageViewport<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let page_area = self.page.area;
        let Ok(scroll) = u16::try_from(self.scroll) else {
            return;
        };

        for row in 0..area.height {
            let Some(src_y) = scroll.checked_add(row) else {
                break;
            };
            if src_y >= page_area.height {
                break;
            }
            for col in 0..area.width.min(page_area.width) {
                buf[(area.x + col, area.y + row)] = self.page[(col, src_y)].clone();
            }
        }
    }
}

/// Plain text of a buffer, one line per row, trailing spaces trimmed.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::new();

    for y in area.top()..area.bottom() {
        let mut row = String::new();
        for x in area.left()..area.right() {
            row.push_str(buffer[(x, y)].symbol());
        }
        out.push_str(row.trim_end());
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integration::load_page;
    use crate::model::UserMessage;
    use crate::source::MockSource;

    fn express() -> PageOutcome {
        load_page(&MockSource::instant(), "npm", "express", "4.10.5")
    }

    #[test]
    fn loaded_page_has_every_section() {
        let text = buffer_to_string(&render_page(&express(), &PageOptions::default(), 100));

        for needle in [
            "express",
            "4.10.5",
            "Ecosystem: NPM",
            "Security information for express 4.10.5",
            "Vulnerabilities",
            "Direct Dependencies",
            "Security Score",
            "Dependencies (24)",
            "Show 14 More",
            "This package is distributed under the MIT license.",
            "Security Scorecard",
            "OSSF Score 7.2/10",
            "7/9 checks passed",
            "66,020",
            "December 11, 2014",
        ] {
            assert!(text.contains(needle), "missing {:?} in:\n{}", needle, text);
        }
    }

    #[test]
    fn failure_page_shows_message_only() {
        let outcome = PageOutcome::Failed {
            message: UserMessage::Generic,
        };
        let text = buffer_to_string(&render_page(&outcome, &PageOptions::default(), 100));

        assert!(text.contains("Unable to Load Package"));
        assert!(text.contains(UserMessage::Generic.as_str()));
        assert!(text.contains("please try again later or contact support"));
        assert!(!text.contains("Dependencies"));
    }

    #[test]
    fn expanding_dependencies_grows_page() {
        let outcome = express();
        let collapsed = page_height(&outcome, &PageOptions::default(), 100);
        let expanded = page_height(
            &outcome,
            &PageOptions {
                show_all_dependencies: true,
                ..PageOptions::default()
            },
            100,
        );
        assert_eq!(expanded, collapsed + 14);
    }

    #[test]
    fn buffer_height_matches_content() {
        let page = render_page(&express(), &PageOptions::default(), 100);
        let text = buffer_to_string(&page);
        assert_eq!(text.lines().count(), usize::from(page.area.height));
        // Last row is the bottom border of the final card
        assert!(text.lines().last().unwrap().starts_with('└'));
    }

    #[test]
    fn viewport_shows_window_at_scroll() {
        let page = render_page(&express(), &PageOptions::default(), 60);
        let mut frame = Buffer::empty(Rect::new(0, 0, 60, 3));
        PageViewport::new(&page, 1).render(frame.area, &mut frame);

        let shown = buffer_to_string(&frame);
        assert!(shown.starts_with("Ecosystem: NPM"), "{}", shown);
    }

    #[test]
    fn viewport_past_end_is_blank() {
        let page = render_page(&express(), &PageOptions::default(), 60);
        let mut frame = Buffer::empty(Rect::new(0, 0, 60, 3));
        PageViewport::new(&page, 10_000).render(frame.area, &mut frame);

        assert_eq!(buffer_to_string(&frame).trim(), "");
    }
}
