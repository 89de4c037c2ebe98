use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::tui::app::{Match, Mode, PickerApp};

pub fn render(frame: &mut Frame, app: &mut PickerApp, colors: &ColorConfig) {
    let header_height = app
        .header
        .as_ref()
        .map(|text| text.height() as u16 + 2)
        .unwrap_or(0);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Max(header_height), // Detail header
            Constraint::Min(3),             // Entries
            Constraint::Length(1),          // Prompt
            Constraint::Length(1),          // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0], colors);
    if app.mode == Mode::Select {
        render_entries(frame, app, chunks[1], colors);
    }
    render_prompt(frame, app, chunks[2], colors);
    render_status_bar(frame, app, chunks[3], colors);

    let typed = prompt_prefix(app).chars().count() + app.query.chars().count();
    let cursor_x = chunks[2].x.saturating_add(typed as u16);
    let last_column = chunks[2].right().saturating_sub(1);
    frame.set_cursor_position((cursor_x.min(last_column), chunks[2].y));
}

fn render_header(frame: &mut Frame, app: &PickerApp, area: Rect, colors: &ColorConfig) {
    let Some(header) = app.header.clone() else {
        return;
    };
    if area.height == 0 {
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));
    let paragraph = Paragraph::new(header).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_entries(frame: &mut Frame, app: &mut PickerApp, area: Rect, colors: &ColorConfig) {
    let items: Vec<ListItem> = app
        .matches
        .iter()
        .map(|m| ListItem::new(highlighted(&app.entries[m.index], m, colors)))
        .collect();

    let title = if app.loading {
        format!(" {} (loading...) ", app.prompt)
    } else {
        format!(" {} ", app.prompt)
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn highlighted(entry: &str, m: &Match, colors: &ColorConfig) -> Line<'static> {
    if m.positions.is_empty() {
        return Line::from(entry.to_string());
    }

    let highlight = Style::default()
        .fg(colors.match_highlight)
        .add_modifier(Modifier::BOLD);
    let spans: Vec<Span> = entry
        .chars()
        .enumerate()
        .map(|(i, c)| {
            if m.positions.contains(&i) {
                Span::styled(c.to_string(), highlight)
            } else {
                Span::raw(c.to_string())
            }
        })
        .collect();
    Line::from(spans)
}

fn prompt_prefix(app: &PickerApp) -> String {
    match app.mode {
        Mode::Select => "> ".to_string(),
        Mode::Input => format!("{}: ", app.prompt),
    }
}

fn render_prompt(frame: &mut Frame, app: &PickerApp, area: Rect, colors: &ColorConfig) {
    let mut spans = vec![
        Span::styled(
            prompt_prefix(app),
            Style::default().fg(colors.prompt).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.query.clone(), Style::default().fg(colors.query)),
    ];

    if app.mode == Mode::Select {
        spans.push(Span::styled(
            format!("  {}/{}", app.matches.len(), app.entries.len()),
            Style::default().fg(colors.border),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status_bar(frame: &mut Frame, app: &PickerApp, area: Rect, colors: &ColorConfig) {
    let status = app.status_message.clone().unwrap_or_else(|| match app.mode {
        Mode::Select => "Type to filter | ↑/↓: move | Enter: select | Esc: back".to_string(),
        Mode::Input => "Enter: confirm | Esc: back".to_string(),
    });

    let paragraph = Paragraph::new(status).style(
        Style::default()
            .bg(colors.status_bg)
            .fg(colors.status_fg),
    );

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, text::Text, Terminal};

    fn draw(app: &mut PickerApp) -> String {
        let colors = ColorConfig::default();
        let mut terminal = Terminal::new(TestBackend::new(60, 14)).unwrap();
        terminal.draw(|frame| render(frame, app, &colors)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let mut screen = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                screen.push_str(buffer[(x, y)].symbol());
            }
            screen.push('\n');
        }
        screen
    }

    #[test]
    fn test_renders_entries_and_counts() {
        let mut app = PickerApp::new(Mode::Select, "Select a movie");
        app.push_entries(vec!["Heat (1995)".into(), "Alien (1979)".into()]);

        let screen = draw(&mut app);
        assert!(screen.contains("Select a movie (loading...)"));
        assert!(screen.contains("> Heat (1995)"));
        assert!(screen.contains("2/2"));
    }

    #[test]
    fn test_renders_header_and_input_prompt() {
        let mut app = PickerApp::new(Mode::Input, "Enter search term")
            .with_header(Text::from("Name: Heat"));
        app.insert_char('h');

        let screen = draw(&mut app);
        assert!(screen.contains("Name: Heat"));
        assert!(screen.contains("Enter search term: h"));
    }
}
