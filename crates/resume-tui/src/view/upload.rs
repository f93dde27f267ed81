use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::app::App;
use crate::view::{result, spinner_char, truncate};

const INTRO: &str = "Upload a resume to extract contact details, skills, education and \
                     experience, and to score it against the target profile.";

/// Render the main screen: drop zone, submit button, error alert and results.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let has_notice = app.notice.is_some();
    let error = app.session.state().error().map(str::to_string);
    let has_result = app.session.state().result().is_some();

    let mut constraints = vec![
        Constraint::Length(1), // header
        Constraint::Length(2), // intro
        Constraint::Length(5), // drop zone
    ];
    if has_notice {
        constraints.push(Constraint::Length(1));
    }
    if error.is_some() {
        constraints.push(Constraint::Length(4));
    }
    constraints.push(Constraint::Length(3)); // submit button
    constraints.push(Constraint::Min(0)); // results
    constraints.push(Constraint::Length(1)); // footer

    let chunks = Layout::vertical(constraints).split(area);
    let mut idx = 0;

    render_header(f, app, chunks[idx]);
    idx += 1;

    let intro = Paragraph::new(Span::styled(INTRO, Style::default().fg(app.theme.dim)))
        .wrap(Wrap { trim: true });
    f.render_widget(intro, chunks[idx]);
    idx += 1;

    render_drop_zone(f, app, chunks[idx]);
    idx += 1;

    if let Some(notice) = &app.notice {
        let line = Line::from(Span::styled(
            format!(" ! {notice}"),
            Style::default().fg(app.theme.warning),
        ));
        f.render_widget(Paragraph::new(line), chunks[idx]);
        idx += 1;
    }

    if let Some(message) = &error {
        let alert = Paragraph::new(message.as_str())
            .style(Style::default().fg(app.theme.error))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(app.theme.error))
                    .title(" Error "),
            );
        f.render_widget(alert, chunks[idx]);
        idx += 1;
    }

    render_submit_button(f, app, chunks[idx]);
    idx += 1;

    if has_result {
        result::render_in(f, app, chunks[idx]);
    }
    idx += 1;

    let footer = Line::from(Span::styled(
        " o:open file  Enter/p:parse  t:full text  j/k:scroll  ?:help  q:quit",
        app.theme.footer_style(),
    ));
    f.render_widget(Paragraph::new(footer), chunks[idx]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let header = Line::from(vec![
        Span::styled(" RESUME PARSER ", theme.header_style()),
        Span::styled(
            " > Resume Parser & Matcher",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.endpoint),
            Style::default().fg(theme.dim),
        ),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn render_drop_zone(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let selected = app.session.selected();

    let mut lines = vec![
        Line::from(Span::styled(
            "Drag & drop resume here",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "or press o to select a file (PDF or DOCX)",
            Style::default().fg(theme.dim),
        )),
    ];
    match selected {
        Some(file) => {
            let room = (area.width as usize).saturating_sub(14);
            lines.push(Line::from(vec![
                Span::styled("Selected: ", Style::default().fg(theme.dim)),
                Span::styled(
                    truncate(&file.name, room),
                    Style::default()
                        .fg(theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }
        None => lines.push(Line::from("")),
    }

    let border = if selected.is_some() {
        Style::default().fg(theme.active)
    } else {
        theme.border_style()
    };
    let zone = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(" Resume "),
    );
    f.render_widget(zone, area);
}

fn render_submit_button(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let button = Layout::horizontal([Constraint::Length(24)])
        .flex(Flex::Center)
        .split(area)[0];

    let (label, style, border) = if app.session.state().is_loading() {
        (
            format!("{} Processing...", spinner_char(app.tick)),
            Style::default()
                .fg(theme.spinner)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(theme.spinner),
        )
    } else if app.session.can_submit() {
        (
            "Parse Resume".to_string(),
            theme.header_style(),
            Style::default().fg(theme.active),
        )
    } else {
        (
            "Parse Resume".to_string(),
            Style::default().fg(theme.dim),
            theme.border_style(),
        )
    };

    let widget = Paragraph::new(Line::from(Span::styled(label, style)))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border),
        );
    f.render_widget(widget, button);
}
