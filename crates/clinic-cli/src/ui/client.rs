//! Client dashboard: profile on the left, booking on the right.

use clinic_dashboard::ClientDashboard;
use clinic_store_sqlite::SqliteStore;
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::field_line;
use crate::app::App;

pub fn draw(f: &mut Frame, area: Rect, dash: &ClientDashboard<SqliteStore>, app: &App) {
  let [left, right] =
    Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(area);

  draw_profile(f, left, dash, app.focus);
  draw_booking(f, right, dash, app);
}

fn pane(title: &str, area: Rect, f: &mut Frame) -> Rect {
  let block = Block::default()
    .title(format!(" {title} "))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  inner
}

fn draw_profile(f: &mut Frame, area: Rect, dash: &ClientDashboard<SqliteStore>, focus: usize) {
  let inner = pane("Patient details", area, f);
  let editing = dash.profile.is_editing();
  let profile = if editing { dash.profile.draft() } else { dash.profile.profile() };

  let lines = vec![
    field_line("Name", &profile.name, editing && focus == 0),
    field_line("Contact", &profile.contact_details, editing && focus == 1),
    field_line("History", &profile.medical_history, editing && focus == 2),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}

fn draw_booking(f: &mut Frame, area: Rect, dash: &ClientDashboard<SqliteStore>, app: &App) {
  let inner = pane("Book an appointment", area, f);

  if !dash.booking.is_visible() {
    let hint = Paragraph::new("Press b to book an appointment.")
      .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, inner);
    return;
  }

  let roster = app.filtered_roster();
  let doctor = roster
    .get(app.doctor_cursor)
    .map(|d| format!("{} ({})", d.profile.name, d.profile.specialization))
    .unwrap_or_else(|| "(none)".to_string());

  let form = &dash.booking.form;
  let mut lines = vec![
    field_line("Search doctor", &app.doctor_query, app.focus == 0),
    Line::from(vec![
      Span::styled(
        format!("{:<16}", "Doctor"),
        Style::default()
          .fg(Color::Cyan)
          .add_modifier(Modifier::BOLD),
      ),
      Span::raw(format!("◀ {doctor} ▶")),
    ]),
    field_line("Date/time", &form.date_time, app.focus == 1),
    field_line("Notes", &form.notes, app.focus == 2),
    Line::styled(
      "  date/time as YYYY-MM-DDTHH:MM",
      Style::default().fg(Color::DarkGray),
    ),
    Line::from(""),
    Line::styled(
      format!("Doctors ({}/{})", roster.len(), dash.roster().len()),
      Style::default().fg(Color::DarkGray),
    ),
  ];

  lines.extend(roster.iter().enumerate().map(|(i, d)| {
    let style = if i == app.doctor_cursor {
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
    } else {
      Style::default()
    };
    Line::styled(format!("{}  {}", d.profile.name, d.profile.specialization), style)
  }));

  f.render_widget(Paragraph::new(lines), inner);
}
