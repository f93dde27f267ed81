use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use resume_core::display::{Entries, ResultView};

use crate::app::App;
use crate::theme::Theme;
use crate::view::truncate;

/// Render the parsed-result panels. Clamps `app.result_scroll` to the content
/// and records the details height as the page size.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(result) = app.session.state().result() else {
        return;
    };
    let theme = &app.theme;
    let view = ResultView::new(result);

    let chunks = Layout::vertical([
        Constraint::Length(3), // personal info
        Constraint::Length(3), // match score
        Constraint::Min(0),    // skills, education, experience, full text
    ])
    .split(area);

    render_personal_info(f, &view, theme, chunks[0]);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border_style())
                .title(" Match Score "),
        )
        .gauge_style(Style::default().fg(theme.gauge))
        .ratio(view.score_ratio())
        .label(Span::styled(
            view.score_label(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(gauge, chunks[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Details ");
    let inner = block.inner(chunks[2]);
    let lines = detail_lines(&view, theme, inner.width as usize, app.full_text_expanded);

    // Counted before the block is attached so only wrapped text rows count
    let details = Paragraph::new(lines).wrap(Wrap { trim: false });
    let max_scroll = details
        .line_count(inner.width)
        .saturating_sub(inner.height as usize);
    app.result_scroll = app
        .result_scroll
        .min(u16::try_from(max_scroll).unwrap_or(u16::MAX));
    app.visible_rows = (inner.height as usize).max(1);

    let details = details.block(block).scroll((app.result_scroll, 0));
    f.render_widget(details, chunks[2]);
}

fn render_personal_info(f: &mut Frame, view: &ResultView<'_>, theme: &Theme, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border_style())
        .title(" Personal Information ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(inner);

    for ((label, value), column) in [("Name", view.name), ("Email", view.email), ("Phone", view.phone)]
        .into_iter()
        .zip(columns.iter())
    {
        let room = (column.width as usize).saturating_sub(label.len() + 3);
        let line = Line::from(vec![
            Span::styled(format!(" {label}: "), Style::default().fg(theme.dim)),
            Span::styled(
                truncate(value, room),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(Paragraph::new(line), *column);
    }
}

fn detail_lines<'a>(
    view: &ResultView<'a>,
    theme: &Theme,
    width: usize,
    full_text_expanded: bool,
) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    section_header(&mut lines, "Skills", theme);
    match view.skills {
        Entries::Items(skills) => {
            for row in pack_tags(skills, width.saturating_sub(2)) {
                let mut spans = vec![Span::raw("  ")];
                for tag in row {
                    spans.push(Span::styled(format!(" {tag} "), theme.tag_style()));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
            }
        }
        Entries::Empty(message) => placeholder(&mut lines, message, theme),
    }
    lines.push(Line::from(""));

    section_header(&mut lines, "Education", theme);
    bullet_list(&mut lines, view.education, theme);
    lines.push(Line::from(""));

    section_header(&mut lines, "Experience", theme);
    bullet_list(&mut lines, view.experience, theme);
    lines.push(Line::from(""));

    if full_text_expanded {
        lines.push(Line::from(vec![
            Span::styled(
                "  \u{25BE} Full Resume Text",
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (t to collapse)", Style::default().fg(theme.dim)),
        ]));
        for raw in view.full_text.split('\n') {
            let text = raw.strip_suffix('\r').unwrap_or(raw).replace('\t', "    ");
            lines.push(Line::from(Span::styled(
                format!("    {text}"),
                Style::default().fg(theme.text),
            )));
        }
    } else {
        lines.push(Line::from(vec![
            Span::styled(
                "  \u{25B8} Full Resume Text",
                Style::default()
                    .fg(theme.active)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (t to expand)", Style::default().fg(theme.dim)),
        ]));
    }

    lines
}

fn section_header<'a>(lines: &mut Vec<Line<'a>>, title: &'a str, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD),
    )));
}

fn placeholder<'a>(lines: &mut Vec<Line<'a>>, message: &'a str, theme: &Theme) {
    lines.push(Line::from(Span::styled(
        format!("    {message}"),
        Style::default().fg(theme.dim),
    )));
}

fn bullet_list<'a>(lines: &mut Vec<Line<'a>>, entries: Entries<'a>, theme: &Theme) {
    match entries {
        Entries::Items(items) => {
            for item in items {
                lines.push(Line::from(vec![
                    Span::styled("    \u{2022} ", Style::default().fg(theme.dim)),
                    Span::styled(item.as_str(), Style::default().fg(theme.text)),
                ]));
            }
        }
        Entries::Empty(message) => placeholder(lines, message, theme),
    }
}

/// Greedily pack tags into rows no wider than `width`. A tag is drawn as
/// ` tag ` followed by one space; a tag wider than a row gets a row to itself.
fn pack_tags(tags: &[String], width: usize) -> Vec<Vec<&str>> {
    let mut rows: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut used = 0;

    for tag in tags {
        let cost = tag.chars().count() + 3;
        if !current.is_empty() && used + cost > width {
            rows.push(std::mem::take(&mut current));
            used = 0;
        }
        current.push(tag.as_str());
        used += cost;
    }
    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn tags_pack_into_rows() {
        let skills = tags(&["Python", "SQL", "Machine Learning"]);
        // " Python " + gap = 9, " SQL " + gap = 6, " Machine Learning " + gap = 19
        assert_eq!(pack_tags(&skills, 20), vec![vec!["Python", "SQL"], vec!["Machine Learning"]]);
        assert_eq!(pack_tags(&skills, 40), vec![vec!["Python", "SQL", "Machine Learning"]]);
    }

    #[test]
    fn oversized_tag_gets_its_own_row() {
        let skills = tags(&["Go", "Distributed Systems Engineering", "C"]);
        assert_eq!(
            pack_tags(&skills, 10),
            vec![vec!["Go"], vec!["Distributed Systems Engineering"], vec!["C"]]
        );
    }
}
