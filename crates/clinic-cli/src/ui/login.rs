//! Sign-in form.

use ratatui::{
  Frame,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph},
};

use super::field_line;
use crate::app::LoginForm;

pub fn draw(f: &mut Frame, area: Rect, form: &LoginForm, focus: usize) {
  let [row] = Layout::vertical([Constraint::Length(6)])
    .flex(Flex::Center)
    .areas(area);
  let [boxed] = Layout::horizontal([Constraint::Length(48)])
    .flex(Flex::Center)
    .areas(row);

  let block = Block::default()
    .title(" Sign in ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(boxed);
  f.render_widget(block, boxed);

  let masked = "*".repeat(form.password.chars().count());
  let lines = vec![
    field_line("Username", &form.username, focus == 0),
    field_line("Password", &masked, focus == 1),
    Line::from(""),
    Line::styled(
      "New here? Run `clinic signup`.",
      Style::default().fg(Color::DarkGray),
    ),
  ];
  f.render_widget(Paragraph::new(lines), inner);
}
