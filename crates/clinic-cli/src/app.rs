//! Application state machine and event dispatcher.

use std::sync::Arc;

use clinic_core::{
  identity::{IdentityProvider, Role, UserId},
  navigation::{Navigator, Route},
  profile::{ClientProfile, PractitionerProfile, StoredProfile},
};
use clinic_dashboard::{
  Backend, ClientDashboard, Notice, PractitionerDashboard, Section, SessionEvent,
  SessionGate, ViewLifetime,
};
use clinic_store_sqlite::{SqliteIdentity, SqliteStore};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::navigator::RouteSlot;

pub type ClinicBackend = Backend<SqliteStore, SqliteIdentity, RouteSlot>;

type Doctor = StoredProfile<PractitionerProfile>;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct LoginForm {
  pub username: String,
  pub password: String,
}

pub enum Screen {
  Login(LoginForm),
  Practitioner(Box<PractitionerDashboard<SqliteStore>>),
  Client(Box<ClientDashboard<SqliteStore>>),
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub backend: ClinicBackend,

  /// Lives for the whole process; the dashboards come and go underneath it.
  gate: SessionGate<RouteSlot>,

  pub screen: Screen,

  /// Index of the focused input field on the current screen.
  pub focus: usize,

  /// Scroll offset within the appointment list.
  pub scroll: usize,

  /// Fuzzy query narrowing the doctor picker in the booking form.
  pub doctor_query: String,

  /// Cursor within the *filtered* roster.
  pub doctor_cursor: usize,

  /// Outcome of the last action, shown in the status bar.
  pub notice: Option<Notice>,
}

impl App {
  pub fn new(backend: ClinicBackend) -> Self {
    let gate = SessionGate::mount(backend.identity.as_ref(), Arc::clone(&backend.navigator));
    Self {
      backend,
      gate,
      screen: Screen::Login(LoginForm::default()),
      focus: 0,
      scroll: 0,
      doctor_query: String::new(),
      doctor_cursor: 0,
      notice: None,
    }
  }

  pub fn user(&self) -> Option<&UserId> { self.gate.user() }

  // ── Session and routing ───────────────────────────────────────────────────

  /// Apply session notifications, pending redirects and feed updates.
  pub async fn tick(&mut self) -> anyhow::Result<()> {
    while let Some(event) = self.gate.poll() {
      if let SessionEvent::SignedIn(user) = event {
        self.route_signed_in(&user).await?;
      }
    }

    if let Some(route) = self.backend.navigator.take() {
      self.navigate(route).await;
    }

    if let Screen::Practitioner(dash) = &mut self.screen {
      dash.poll_appointments();
    }
    Ok(())
  }

  async fn route_signed_in(&mut self, user: &UserId) -> anyhow::Result<()> {
    match self.backend.identity.role_of(user).await? {
      Some(Role::Practitioner) => {
        self.backend.navigator.redirect(Route::PractitionerDashboard)
      }
      Some(Role::Client) => self.backend.navigator.redirect(Route::ClientDashboard),
      None => {
        tracing::warn!(user_id = %user, "signed-in user has no role");
        self.notice = Some(Notice::error("No role is recorded for this account."));
      }
    }
    Ok(())
  }

  /// Tear down the current view and mount the one for `route`.
  async fn navigate(&mut self, route: Route) {
    self.close_dashboard();
    self.focus = 0;
    self.scroll = 0;
    self.doctor_query.clear();
    self.doctor_cursor = 0;

    let user = match (route, self.gate.user()) {
      (Route::Login, _) | (_, None) => {
        self.screen = Screen::Login(LoginForm::default());
        return;
      }
      (_, Some(user)) => user.clone(),
    };

    let store = Arc::clone(&self.backend.store);
    let mounted = if route == Route::PractitionerDashboard {
      PractitionerDashboard::mount(store, user, ViewLifetime::new())
        .await
        .map(|d| Screen::Practitioner(Box::new(d)))
    } else {
      ClientDashboard::mount(store, user, ViewLifetime::new())
        .await
        .map(|d| Screen::Client(Box::new(d)))
    };

    self.screen = match mounted {
      Ok(screen) => screen,
      Err(e) => {
        tracing::warn!(error = %e, ?route, "mounting dashboard failed");
        self.notice = Some(Notice::error(format!("Error loading dashboard: {e}")));
        Screen::Login(LoginForm::default())
      }
    };
  }

  fn close_dashboard(&mut self) {
    match &mut self.screen {
      Screen::Practitioner(dash) => dash.unmount(),
      Screen::Client(dash) => dash.unmount(),
      Screen::Login(_) => {}
    }
  }

  // ── Doctor picker ─────────────────────────────────────────────────────────

  /// The roster narrowed by `doctor_query`.
  pub fn filtered_roster(&self) -> Vec<&Doctor> {
    match &self.screen {
      Screen::Client(dash) => filter_roster(dash.roster(), &self.doctor_query),
      _ => Vec::new(),
    }
  }

  /// Write the doctor under the picker cursor into the booking form.
  fn sync_doctor_selection(&mut self) {
    let selected = self
      .filtered_roster()
      .get(self.doctor_cursor)
      .map(|d| d.id.to_string())
      .unwrap_or_default();
    if let Screen::Client(dash) = &mut self.screen {
      dash.booking.form.doctor_id = selected;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    // Any key dismisses the previous notice.
    self.notice = None;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
      match key.code {
        KeyCode::Char('c') => return Ok(false),
        KeyCode::Char('l') => {
          if self.gate.user().is_some() {
            self.gate.sign_out(self.backend.identity.as_ref()).await?;
          }
          return Ok(true);
        }
        _ => {}
      }
    }

    match self.screen {
      Screen::Login(_) => self.handle_login_key(key).await,
      Screen::Practitioner(_) => self.handle_practitioner_key(key).await,
      Screen::Client(_) => self.handle_client_key(key).await,
    }
  }

  async fn handle_login_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let Screen::Login(form) = &mut self.screen else {
      return Ok(true);
    };
    let field = if self.focus == 0 { &mut form.username } else { &mut form.password };

    match key.code {
      KeyCode::Esc => return Ok(false),
      KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
        self.focus = 1 - self.focus.min(1);
      }
      KeyCode::Backspace => {
        field.pop();
      }
      KeyCode::Char(c) => field.push(c),
      KeyCode::Enter => {
        match self.backend.identity.sign_in(&form.username, &form.password).await {
          Ok(_) => self.notice = None,
          Err(e) => {
            form.password.clear();
            self.focus = 1;
            self.notice = Some(Notice::error(format!("Sign-in failed: {e}")));
          }
        }
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_practitioner_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let Screen::Practitioner(dash) = &mut self.screen else {
      return Ok(true);
    };

    // Section switching, unless a profile edit is in progress.
    if !dash.profile.is_editing() {
      match key.code {
        KeyCode::Tab => {
          dash.section = dash.section.next();
          self.focus = 0;
          return Ok(true);
        }
        KeyCode::BackTab => {
          dash.section = dash.section.prev();
          self.focus = 0;
          return Ok(true);
        }
        _ => {}
      }
    }

    match dash.section {
      Section::Details if dash.profile.is_editing() => match key.code {
        KeyCode::Esc => dash.profile.cancel_edit(),
        KeyCode::Enter => self.notice = dash.save_profile().await,
        code => {
          let field = practitioner_field(dash.profile.draft_mut(), self.focus);
          edit_field(field, code, &mut self.focus, 2);
        }
      },
      Section::Details => match key.code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Char('e') => {
          dash.profile.begin_edit();
          self.focus = 0;
        }
        _ => {}
      },

      Section::Schedule => match key.code {
        KeyCode::Enter => self.notice = Some(dash.add_slot()),
        KeyCode::Char(' ') if self.focus == 2 => {
          dash.slots.form.available = !dash.slots.form.available;
        }
        code => {
          let form = &mut dash.slots.form;
          let field = if self.focus == 0 { &mut form.start_time } else { &mut form.end_time };
          if self.focus == 2 {
            move_focus(code, &mut self.focus, 3);
          } else {
            edit_field(field, code, &mut self.focus, 3);
          }
        }
      },

      Section::Appointments => match key.code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Down | KeyCode::Char('j') => {
          if self.scroll + 1 < dash.appointments().len() {
            self.scroll += 1;
          }
        }
        KeyCode::Up | KeyCode::Char('k') => {
          self.scroll = self.scroll.saturating_sub(1);
        }
        _ => {}
      },
    }
    Ok(true)
  }

  async fn handle_client_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    let Screen::Client(dash) = &mut self.screen else {
      return Ok(true);
    };

    if dash.profile.is_editing() {
      match key.code {
        KeyCode::Esc => dash.profile.cancel_edit(),
        KeyCode::Enter => self.notice = dash.save_profile().await,
        code => {
          let field = client_field(dash.profile.draft_mut(), self.focus);
          edit_field(field, code, &mut self.focus, 3);
        }
      }
      return Ok(true);
    }

    if !dash.booking.is_visible() {
      match key.code {
        KeyCode::Char('q') => return Ok(false),
        KeyCode::Char('e') => {
          dash.profile.begin_edit();
          self.focus = 0;
        }
        KeyCode::Char('b') => {
          dash.toggle_booking();
          self.focus = 0;
          self.sync_doctor_selection();
        }
        _ => {}
      }
      return Ok(true);
    }

    match key.code {
      KeyCode::Esc => dash.toggle_booking(),
      KeyCode::Enter => {
        self.notice = dash.submit_booking().await;
        if self.notice.as_ref().is_some_and(|n| !n.is_error()) {
          self.doctor_query.clear();
          self.doctor_cursor = 0;
          self.focus = 0;
          self.sync_doctor_selection();
        }
      }

      // Doctor picker.
      KeyCode::Left | KeyCode::Right if self.focus == 0 => {
        let len = self.filtered_roster().len();
        if len > 0 {
          self.doctor_cursor = if key.code == KeyCode::Right {
            (self.doctor_cursor + 1) % len
          } else {
            (self.doctor_cursor + len - 1) % len
          };
        }
        self.sync_doctor_selection();
      }
      code if self.focus == 0 => {
        let before = self.doctor_query.len();
        edit_field(&mut self.doctor_query, code, &mut self.focus, 3);
        if self.doctor_query.len() != before {
          self.doctor_cursor = 0;
          self.sync_doctor_selection();
        }
      }

      code => {
        let form = &mut dash.booking.form;
        let field = if self.focus == 1 { &mut form.date_time } else { &mut form.notes };
        edit_field(field, code, &mut self.focus, 3);
      }
    }
    Ok(true)
  }
}

// ─── Field helpers ────────────────────────────────────────────────────────────

/// Fuzzy-match `query` against doctor names and specializations.
pub fn filter_roster<'a>(roster: &'a [Doctor], query: &str) -> Vec<&'a Doctor> {
  if query.is_empty() {
    return roster.iter().collect();
  }
  let matcher = SkimMatcherV2::default();
  roster
    .iter()
    .filter(|d| {
      matcher.fuzzy_match(&d.profile.name, query).is_some()
        || matcher.fuzzy_match(&d.profile.specialization, query).is_some()
    })
    .collect()
}

fn practitioner_field(profile: &mut PractitionerProfile, focus: usize) -> &mut String {
  match focus {
    0 => &mut profile.name,
    _ => &mut profile.specialization,
  }
}

fn client_field(profile: &mut ClientProfile, focus: usize) -> &mut String {
  match focus {
    0 => &mut profile.name,
    1 => &mut profile.contact_details,
    _ => &mut profile.medical_history,
  }
}

/// Apply a text-editing key to `field`, or move focus among `count` fields.
fn edit_field(field: &mut String, code: KeyCode, focus: &mut usize, count: usize) {
  match code {
    KeyCode::Char(c) => field.push(c),
    KeyCode::Backspace => {
      field.pop();
    }
    code => move_focus(code, focus, count),
  }
}

fn move_focus(code: KeyCode, focus: &mut usize, count: usize) {
  match code {
    KeyCode::Down => *focus = (*focus + 1) % count,
    KeyCode::Up => *focus = (*focus + count - 1) % count,
    _ => {}
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn doctor(id: &str, name: &str, specialization: &str) -> Doctor {
    StoredProfile {
      id:      UserId::from(id),
      profile: PractitionerProfile {
        name:           name.into(),
        specialization: specialization.into(),
      },
    }
  }

  #[test]
  fn empty_query_keeps_whole_roster() {
    let roster = [doctor("d1", "Grey", "Surgery"), doctor("d2", "House", "Diagnostics")];
    assert_eq!(filter_roster(&roster, "").len(), 2);
  }

  #[test]
  fn query_matches_name_or_specialization() {
    let roster = [doctor("d1", "Grey", "Surgery"), doctor("d2", "House", "Diagnostics")];
    let by_name: Vec<_> = filter_roster(&roster, "hse").iter().map(|d| d.id.as_str()).collect();
    assert_eq!(by_name, ["d2"]);
    let by_field: Vec<_> = filter_roster(&roster, "surg").iter().map(|d| d.id.as_str()).collect();
    assert_eq!(by_field, ["d1"]);
  }

  #[test]
  fn focus_wraps_around() {
    let mut focus = 0;
    let mut field = String::new();
    edit_field(&mut field, KeyCode::Up, &mut focus, 3);
    assert_eq!(focus, 2);
    edit_field(&mut field, KeyCode::Down, &mut focus, 3);
    assert_eq!(focus, 0);
    edit_field(&mut field, KeyCode::Char('x'), &mut focus, 3);
    edit_field(&mut field, KeyCode::Backspace, &mut focus, 3);
    assert!(field.is_empty());
  }
}
