//! Navigation between the login surface and the two dashboards.

/// The places a view can send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
  Login,
  PractitionerDashboard,
  ClientDashboard,
}

/// Performs navigation on behalf of a view.
pub trait Navigator: Send + Sync {
  fn redirect(&self, route: Route);
}
