//! Login page

use learnloop_common::Route;

use crate::context::{PageContext, ViewStatus};

#[derive(Debug)]
pub struct LoginPage {
    ctx: PageContext,
    pub status: ViewStatus,
}

impl LoginPage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            status: ViewStatus::default(),
        }
    }

    /// Send an already signed-in user straight to their dashboard.
    ///
    /// Returns true when a redirect happened.
    pub fn mount(&mut self) -> bool {
        match self.ctx.session().get() {
            Some(session) => {
                self.ctx.navigate(session.identity.role.dashboard());
                true
            }
            None => false,
        }
    }

    /// Sign in and open the dashboard for the user's role.
    ///
    /// On failure the session is left as it was and the backend's message
    /// is shown on the form.
    pub async fn submit(&mut self, email: &str, password: &str) -> bool {
        if email.trim().is_empty() || password.is_empty() {
            self.status.fail("Email and password are required.");
            return false;
        }

        self.status.begin();
        let result = self.ctx.api().login(email, password).await;
        if !self.ctx.is_on(Route::Login) {
            return false;
        }

        match result {
            Ok(session) => {
                let dashboard = session.identity.role.dashboard();
                self.ctx
                    .session()
                    .set(session.identity, session.credential);
                self.status.done();
                self.ctx.navigate(dashboard);
                true
            }
            Err(e) => {
                self.status.fail(e.to_string());
                false
            }
        }
    }
}
