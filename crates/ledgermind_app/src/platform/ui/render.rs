use ledgermind_core::{AppViewModel, Role};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::block::Title;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::constants::*;
use super::layout;

/// How far the transcript is scrolled back from its newest line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptScroll {
    from_bottom: u16,
}

impl TranscriptScroll {
    pub fn up(&mut self) {
        self.from_bottom = self.from_bottom.saturating_add(SCROLL_STEP);
    }

    pub fn down(&mut self) {
        self.from_bottom = self.from_bottom.saturating_sub(SCROLL_STEP);
    }

    /// Snap back to the newest line.
    pub fn follow(&mut self) {
        self.from_bottom = 0;
    }

    /// Row offset of the first visible line, clamping the scroll to the content.
    fn top_offset(&mut self, total_lines: usize, height: u16) -> u16 {
        let max = total_lines
            .saturating_sub(usize::from(height))
            .min(usize::from(u16::MAX)) as u16;
        self.from_bottom = self.from_bottom.min(max);
        max - self.from_bottom
    }
}

pub fn render(frame: &mut Frame, view: &AppViewModel, scroll: &mut TranscriptScroll, tick: usize) {
    let areas = layout::split(frame.area());
    render_header(frame, areas.header);
    render_transcript(frame, areas.transcript, view, scroll, tick);
    render_input(frame, areas.input, view);
    render_status(frame, areas.status, view);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(APP_SUBTITLE, dim())),
    ];
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(dim());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_transcript(
    frame: &mut Frame,
    area: Rect,
    view: &AppViewModel,
    scroll: &mut TranscriptScroll,
    tick: usize,
) {
    let block = Block::default().borders(Borders::ALL).border_style(dim());
    let inner_width = usize::from(area.width.saturating_sub(2));
    let inner_height = area.height.saturating_sub(2);

    let lines = transcript_lines(view, inner_width, tick);
    let top = scroll.top_offset(lines.len(), inner_height);
    frame.render_widget(Paragraph::new(lines).block(block).scroll((top, 0)), area);
}

fn render_input(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let border_color = if view.pending {
        Color::DarkGray
    } else {
        Color::Cyan
    };
    let send_style = if view.send_enabled {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        dim()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(INPUT_TITLE)
        .title(Title::from(Span::styled(SEND_HINT, send_style)).alignment(Alignment::Right));

    let (visible, visible_width) =
        draft_tail(&view.draft, usize::from(area.width.saturating_sub(3)));
    let content = if view.draft.is_empty() {
        Line::from(Span::styled(INPUT_PLACEHOLDER, dim()))
    } else {
        Line::from(visible)
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    let cursor_x = area.x + 1 + visible_width as u16;
    frame.set_cursor_position((cursor_x, area.y + 1));
}

/// Longest suffix of the draft that fits in `max_width` columns, and its width.
/// Keeps the end of a long draft (and the cursor) in view.
fn draft_tail(draft: &str, max_width: usize) -> (&str, usize) {
    let mut start = draft.len();
    let mut width = 0;
    for (idx, ch) in draft.char_indices().rev() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        start = idx;
    }
    (&draft[start..], width)
}

fn render_status(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let text = if view.pending {
        STATUS_PENDING
    } else {
        STATUS_READY
    };
    frame.render_widget(Paragraph::new(Line::from(Span::styled(text, dim()))), area);
}

/// Builds the transcript body: user entries on the right, assistant entries
/// on the left, then the thinking indicator while a request is in flight.
fn transcript_lines(view: &AppViewModel, width: usize, tick: usize) -> Vec<Line<'static>> {
    // Entries take at most three quarters of the width, like chat bubbles.
    let bubble_width = (width * 3 / 4).max(1);

    if view.show_placeholder {
        return wrap_text(EMPTY_TRANSCRIPT_HINT, width.max(1))
            .into_iter()
            .map(|line| Line::from(Span::styled(line, dim())))
            .collect();
    }

    let mut lines = Vec::new();
    for message in &view.transcript {
        let (label, label_style, alignment) = match message.role() {
            Role::User => (
                USER_LABEL,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                Alignment::Right,
            ),
            Role::Assistant => (
                ASSISTANT_LABEL,
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Alignment::Left,
            ),
        };
        lines.push(Line::from(Span::styled(label, label_style)).alignment(alignment));
        lines.extend(
            wrap_text(message.content(), bubble_width)
                .into_iter()
                .map(|text| Line::from(text).alignment(alignment)),
        );
        lines.push(Line::default());
    }

    if view.pending {
        let frame = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
        lines.push(Line::from(Span::styled(
            format!("{frame} {THINKING_TEXT}"),
            dim(),
        )));
    }
    lines
}

/// Greedy word wrap on display columns. Words wider than `width` are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw_line in text.lines() {
        let mut current = String::new();
        let mut len = 0usize;
        for word in raw_line.split_whitespace() {
            if len > 0 && len + 1 + word.width() > width {
                out.push(std::mem::take(&mut current));
                len = 0;
            }
            if len > 0 {
                current.push(' ');
                len += 1;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if len > 0 && len + ch_width > width {
                    out.push(std::mem::take(&mut current));
                    len = 0;
                }
                current.push(ch);
                len += ch_width;
            }
        }
        out.push(current);
    }

    if out.is_empty() {
        out.push(String::new());
    }
    out
}

fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgermind_core::{update, AppState, Msg};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn line_text(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|span| span.content.as_ref())
            .collect()
    }

    fn screen_text(view: &AppViewModel) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).expect("terminal");
        let mut scroll = TranscriptScroll::default();
        terminal
            .draw(|frame| render(frame, view, &mut scroll, 0))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn pending_view() -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::DraftChanged("Top holdings?".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        state.view()
    }

    #[test]
    fn wrap_breaks_on_words_and_splits_long_ones() {
        assert_eq!(wrap_text("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }

    #[test]
    fn wrap_counts_wide_chars_as_two_columns() {
        assert_eq!(wrap_text("日本語の文字", 4), vec!["日本", "語の", "文字"]);
        assert_eq!(wrap_text("AUM 総額", 6), vec!["AUM", "総額"]);
    }

    #[test]
    fn draft_tail_measures_display_width() {
        assert_eq!(draft_tail("holdings", 20), ("holdings", 8));
        assert_eq!(draft_tail("holdings", 4), ("ings", 4));
        assert_eq!(draft_tail("資産総額", 5), ("総額", 4));
        assert_eq!(draft_tail("", 5), ("", 0));
    }

    #[test]
    fn empty_session_shows_placeholder() {
        let lines = transcript_lines(&AppState::new().view(), 200, 0);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), EMPTY_TRANSCRIPT_HINT);
    }

    #[test]
    fn pending_session_shows_thinking_indicator() {
        let lines = transcript_lines(&pending_view(), 60, 1);

        assert_eq!(line_text(&lines[0]), USER_LABEL);
        assert_eq!(lines[0].alignment, Some(Alignment::Right));
        assert_eq!(line_text(&lines[1]), "Top holdings?");
        let last = lines.last().expect("indicator");
        assert_eq!(
            line_text(last),
            format!("{} {THINKING_TEXT}", SPINNER_FRAMES[1])
        );
    }

    #[test]
    fn assistant_entries_are_left_aligned() {
        let (state, _) = update(AppState::new(), Msg::DraftChanged("foo".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::AnswerResolved {
                request_id: 1,
                outcome: Ok("bar".into()),
            },
        );
        let lines = transcript_lines(&state.view(), 60, 0);
        let texts: Vec<String> = lines.iter().map(line_text).collect();

        assert_eq!(texts, vec![USER_LABEL, "foo", "", ASSISTANT_LABEL, "bar", ""]);
        assert_eq!(lines[3].alignment, Some(Alignment::Left));
    }

    #[test]
    fn full_frame_renders_chrome() {
        let text = screen_text(&AppState::new().view());
        assert!(text.contains(APP_TITLE));
        assert!(text.contains(APP_SUBTITLE));
        assert!(text.contains(INPUT_PLACEHOLDER));
        assert!(text.contains(STATUS_READY));

        let text = screen_text(&pending_view());
        assert!(text.contains(THINKING_TEXT));
        assert!(text.contains(STATUS_PENDING));
    }

    #[test]
    fn scroll_is_clamped_to_content() {
        let mut scroll = TranscriptScroll::default();
        assert_eq!(scroll.top_offset(30, 10), 20);

        scroll.up();
        assert_eq!(scroll.top_offset(30, 10), 15);

        for _ in 0..10 {
            scroll.up();
        }
        assert_eq!(scroll.top_offset(30, 10), 0);

        scroll.down();
        assert_eq!(scroll.top_offset(30, 10), 5);

        scroll.follow();
        assert_eq!(scroll.top_offset(5, 10), 0);
    }
}
