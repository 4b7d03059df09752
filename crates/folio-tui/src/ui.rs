use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::api::ProfileApi;
use crate::app::{App, InputMode, View};
use folio_shared::Profile;

pub fn draw<A: ProfileApi>(f: &mut Frame, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_header(f, chunks[0], app);

    match app.view {
        View::ProfileList => draw_profile_list(f, chunks[1], app),
        View::Portfolio(_) => match app.current_profile() {
            Some(profile) => draw_portfolio(f, chunks[1], profile),
            None => draw_message(f, chunks[1], "Profile not found"),
        },
    }

    draw_status_bar(f, chunks[2], app);

    if app.confirming_delete {
        draw_delete_confirm_popup(f, app);
    }

    // Draw error overlay if present
    if let Some(ref error) = app.error_message {
        draw_error_popup(f, error);
    }

    // Draw loading overlay if loading
    if app.loading {
        draw_loading_overlay(f, &app.loading_message);
    }
}

fn draw_header<A: ProfileApi>(f: &mut Frame, area: Rect, app: &App<A>) {
    let context = match app.current_profile() {
        Some(profile) => profile.name.clone(),
        None => format!("{} profiles", app.cache.profiles().len()),
    };

    let header = Paragraph::new(vec![Line::from(vec![
        Span::styled(
            "FOLIO ADMIN",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" | "),
        Span::styled(context, Style::default().fg(Color::Yellow)),
    ])])
    .block(Block::default().borders(Borders::BOTTOM));

    f.render_widget(header, area);
}

fn draw_profile_list<A: ProfileApi>(f: &mut Frame, area: Rect, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Min(0),    // List
        ])
        .split(area);

    let searching = app.input_mode == InputMode::Search;
    let search_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let search_text = if searching {
        format!("{}_", app.search)
    } else {
        app.search.clone()
    };
    let search = Paragraph::new(search_text).block(
        Block::default()
            .title(" Search (name, profession, company) ")
            .borders(Borders::ALL)
            .border_style(search_style),
    );
    f.render_widget(search, chunks[0]);

    let profiles = app.visible_profiles();
    if profiles.is_empty() {
        let message = if app.cache.profiles().is_empty() {
            "No profiles yet. Press 'n' to create one."
        } else {
            "No profile matches the search."
        };
        draw_message(f, chunks[1], message);
        return;
    }

    let items: Vec<ListItem> = profiles
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            let style = if i == app.selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            let mut spans = vec![
                Span::raw("  "),
                Span::styled(profile.name.as_str(), style.add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(profile.profession.as_str(), Style::default().fg(Color::Cyan)),
            ];
            if let Some(company) = profile.company.as_deref() {
                spans.push(Span::styled(
                    format!("  @ {}", company),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Profiles ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, chunks[1]);
}

fn label(name: &str) -> Span<'static> {
    Span::styled(format!("{}: ", name), Style::default().fg(Color::Cyan))
}

fn section(lines: &mut Vec<Line<'static>>, title: &str) {
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )));
}

fn draw_portfolio(f: &mut Frame, area: Rect, profile: &Profile) {
    let mut lines: Vec<Line<'static>> = vec![
        Line::from(Span::styled(
            profile.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            profile.profession.clone(),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let details = [
        ("Company", &profile.company),
        ("Address", &profile.address),
        ("Email", &profile.email),
        ("Phone", &profile.phone),
        ("Website", &profile.website),
        ("CV", &profile.cv_url),
    ];
    if details.iter().any(|(_, v)| v.is_some()) || profile.years_of_experience.is_some() {
        section(&mut lines, "Contact");
    }
    for (name, value) in details {
        if let Some(value) = value {
            lines.push(Line::from(vec![label(name), Span::raw(value.clone())]));
        }
    }
    if let Some(years) = profile.years_of_experience {
        lines.push(Line::from(vec![
            label("Experience"),
            Span::raw(format!("{} years", years)),
        ]));
    }

    if let Some(bio) = &profile.bio {
        section(&mut lines, "About");
        for line in bio.lines() {
            lines.push(Line::from(format!("  {}", line)));
        }
    }

    let social = profile.social_links();
    if !social.is_empty() {
        section(&mut lines, "Social");
        for (name, url) in social {
            lines.push(Line::from(vec![label(name), Span::raw(url.to_string())]));
        }
    }

    for (title, items) in [
        ("Skills", &profile.skills),
        ("Specializations", &profile.specializations),
        ("Languages", &profile.languages),
        ("Certifications", &profile.certifications),
        ("Awards", &profile.awards),
    ] {
        if !items.is_empty() {
            section(&mut lines, title);
            lines.push(Line::from(format!("  {}", items.join(", "))));
        }
    }

    for (title, projects) in [
        ("Projects", &profile.projects),
        ("Personal projects", &profile.personal_projects),
    ] {
        if projects.is_empty() {
            continue;
        }
        section(&mut lines, title);
        for project in projects {
            let mut spans = vec![Span::styled(
                format!("  • {}", project.title),
                Style::default().add_modifier(Modifier::BOLD),
            )];
            if let Some(link) = &project.link {
                spans.push(Span::styled(
                    format!("  {}", link),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(spans));
            if !project.description.is_empty() {
                lines.push(Line::from(format!("    {}", project.description)));
            }
        }
    }

    if !profile.previous_positions.is_empty() {
        section(&mut lines, "Experience");
        for position in &profile.previous_positions {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  • {}", position.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(" @ {}", position.company)),
                Span::styled(
                    format!("  {}", position.duration),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
            if !position.description.is_empty() {
                lines.push(Line::from(format!("    {}", position.description)));
            }
        }
    }

    if !profile.education.is_empty() {
        section(&mut lines, "Education");
        for education in &profile.education {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("  • {}", education.degree),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(", {}", education.institution)),
                Span::styled(
                    format!("  {}", education.year),
                    Style::default().fg(Color::DarkGray),
                ),
            ]));
        }
    }

    let portfolio = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Portfolio ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(portfolio, area);
}

fn draw_status_bar<A: ProfileApi>(f: &mut Frame, area: Rect, app: &App<A>) {
    let (mode, mode_color) = if app.confirming_delete {
        ("DELETE", Color::Red)
    } else if app.input_mode == InputMode::Search {
        ("SEARCH", Color::Green)
    } else {
        ("NORMAL", Color::Blue)
    };

    let hints = match app.view {
        _ if app.confirming_delete => "y: confirm | n/Esc: cancel",
        _ if app.input_mode == InputMode::Search => "type to filter | Enter: keep | Esc: clear",
        View::ProfileList => {
            "/: search | j/k: select | Enter: open | n: new | e: edit | d: delete | y: link | r: reload | q: quit"
        }
        View::Portfolio(_) => {
            "s: save vCard | c: save contact | y: link | Backspace: back | q: quit"
        }
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default().bg(mode_color).fg(Color::White),
        ),
        Span::raw(" "),
    ];
    match &app.status_message {
        Some(message) => spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        )),
        None => spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray))),
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_delete_confirm_popup<A: ProfileApi>(f: &mut Frame, app: &App<A>) {
    let area = centered_rect(50, 20, f.area());

    f.render_widget(Clear, area);

    let name = app
        .selected_profile()
        .map(|p| p.name.as_str())
        .unwrap_or("Unknown");

    let block = Block::default()
        .title(" Confirm Delete ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Message
            Constraint::Length(2), // Hint
            Constraint::Min(0),    // Spacer
        ])
        .split(inner);

    let message = Paragraph::new(vec![
        Line::from(Span::raw("Delete profile:")),
        Line::from(Span::styled(
            format!("\"{}\"", name),
            Style::default().fg(Color::Yellow),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(message, chunks[0]);

    let hint = Paragraph::new("y: yes, delete | n: no, cancel")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[1]);
}

fn draw_message(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(text, area);
}

fn draw_loading_overlay(f: &mut Frame, message: &str) {
    let area = centered_rect(40, 10, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Loading ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let text = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(block);

    f.render_widget(text, area);
}

fn draw_error_popup(f: &mut Frame, error: &str) {
    let area = centered_rect(60, 20, f.area());

    f.render_widget(Clear, area);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let text = Paragraph::new(error)
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: true })
        .block(block);

    f.render_widget(text, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
