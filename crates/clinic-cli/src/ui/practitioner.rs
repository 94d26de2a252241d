//! Practitioner dashboard: details, schedule and live appointments.

use clinic_dashboard::{PractitionerDashboard, Section};
use clinic_store_sqlite::SqliteStore;
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Tabs},
};

use super::field_line;
use crate::app::App;

// ─── Public entry ─────────────────────────────────────────────────────────────

pub fn draw(f: &mut Frame, area: Rect, dash: &PractitionerDashboard<SqliteStore>, app: &App) {
  let [tabs_area, body] =
    Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

  let selected = Section::ALL
    .iter()
    .position(|s| *s == dash.section)
    .unwrap_or_default();
  let tabs = Tabs::new(Section::ALL.iter().map(|s| s.title()))
    .select(selected)
    .style(Style::default().fg(Color::DarkGray))
    .highlight_style(
      Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    );
  f.render_widget(tabs, tabs_area);

  let block = Block::default()
    .title(format!(" {} ", dash.section.title()))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(body);
  f.render_widget(block, body);

  let lines = match dash.section {
    Section::Details => details(dash, app.focus),
    Section::Schedule => schedule(dash, app.focus),
    Section::Appointments => appointments(dash),
  };
  let scroll = if dash.section == Section::Appointments { app.scroll as u16 } else { 0 };
  f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

// ─── Sections ─────────────────────────────────────────────────────────────────

fn details(dash: &PractitionerDashboard<SqliteStore>, focus: usize) -> Vec<Line<'static>> {
  let editing = dash.profile.is_editing();
  let profile = if editing { dash.profile.draft() } else { dash.profile.profile() };
  vec![
    field_line("Name", &profile.name, editing && focus == 0),
    field_line("Specialization", &profile.specialization, editing && focus == 1),
  ]
}

fn schedule(dash: &PractitionerDashboard<SqliteStore>, focus: usize) -> Vec<Line<'static>> {
  let form = &dash.slots.form;
  let available = if form.available { "[x]" } else { "[ ]" };
  let mut lines = vec![
    field_line("Start (HH:MM)", &form.start_time, focus == 0),
    field_line("End (HH:MM)", &form.end_time, focus == 1),
    field_line("Available", available, focus == 2),
    Line::from(""),
  ];

  if dash.slots.slots().is_empty() {
    lines.push(dim("No slots added yet."));
  }
  lines.extend(dash.slots.slots().iter().map(|slot| Line::from(slot.to_string())));
  lines
}

fn appointments(dash: &PractitionerDashboard<SqliteStore>) -> Vec<Line<'static>> {
  if dash.appointments().is_empty() {
    return vec![dim("No appointments booked.")];
  }
  dash
    .appointments()
    .iter()
    .map(|appt| {
      Line::from(vec![
        Span::styled(
          format!("{:<26}", appt.date_time.to_locale_string()),
          Style::default().fg(Color::Cyan),
        ),
        Span::styled(
          format!("{:<14}", appt.patient_id),
          Style::default().fg(Color::DarkGray),
        ),
        Span::raw(appt.notes.clone()),
      ])
    })
    .collect()
}

fn dim(text: &'static str) -> Line<'static> {
  Line::styled(text, Style::default().fg(Color::DarkGray))
}
