//! TUI rendering. Draws the header, the current screen and the status bar.

pub mod client;
pub mod login;
pub mod practitioner;

use chrono::Local;
use clinic_dashboard::Section;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match &app.screen {
    Screen::Login(form) => login::draw(f, rows[1], form, app.focus),
    Screen::Practitioner(dash) => practitioner::draw(f, rows[1], dash, app),
    Screen::Client(dash) => client::draw(f, rows[1], dash, app),
  }
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let title = match &app.screen {
    Screen::Login(_) => " clinic".to_string(),
    Screen::Practitioner(_) => format!(" clinic  doctor {}", user_label(app)),
    Screen::Client(_) => format!(" clinic  patient {}", user_label(app)),
  };
  let left = Span::styled(
    title,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!("{date} "),
    Style::default().fg(Color::DarkGray),
  );

  // Simple left-right header: pad the middle.
  let left_width = left.content.len() as u16;
  let right_width = right.content.len() as u16;
  let pad = area
    .width
    .saturating_sub(left_width)
    .saturating_sub(right_width);

  let line = Line::from(vec![
    left,
    Span::raw(" ".repeat(pad as usize)),
    right,
  ]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

fn user_label(app: &App) -> String {
  app.user().map(ToString::to_string).unwrap_or_default()
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match &app.screen {
    Screen::Login(_) => ("LOGIN", "Tab switch field  Enter sign in  Esc quit"),
    Screen::Practitioner(dash) if dash.profile.is_editing() => {
      ("EDIT", "↑↓ field  Enter save  Esc cancel")
    }
    Screen::Practitioner(dash) => match dash.section {
      Section::Details => ("DETAILS", "e edit  Tab section  ^L sign out  q quit"),
      Section::Schedule => {
        ("SCHEDULE", "↑↓ field  Space available  Enter add slot  Tab section")
      }
      Section::Appointments => ("APPTS", "↑↓/jk scroll  Tab section  ^L sign out  q quit"),
    },
    Screen::Client(dash) if dash.profile.is_editing() => {
      ("EDIT", "↑↓ field  Enter save  Esc cancel")
    }
    Screen::Client(dash) if dash.booking.is_visible() => {
      ("BOOK", "↑↓ field  ←→ doctor  type to filter  Enter book  Esc hide")
    }
    Screen::Client(_) => ("PROFILE", "e edit  b book  ^L sign out  q quit"),
  };

  let (status, status_style) = match &app.notice {
    Some(notice) if notice.is_error() => {
      (notice.to_string(), Style::default().fg(Color::Red))
    }
    Some(notice) => (notice.to_string(), Style::default().fg(Color::Green)),
    None => (hints.to_string(), Style::default().fg(Color::DarkGray)),
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), status_style);

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Shared widgets ───────────────────────────────────────────────────────────

/// One `label  value` form row; the focused row gets a cursor.
pub(crate) fn field_line<'a>(label: &'a str, value: &str, focused: bool) -> Line<'a> {
  let label_style = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);
  let value = if focused { format!("{value}_") } else { value.to_string() };
  let value_style = if focused {
    Style::default().fg(Color::Yellow)
  } else {
    Style::default()
  };
  Line::from(vec![
    Span::styled(format!("{label:<16}"), label_style),
    Span::styled(value, value_style),
  ])
}
