//! Shared page plumbing: collaborators, view status, mutate-then-refresh

use std::future::Future;
use std::sync::Arc;

use learnloop_client::{ApiClient, ApiError};
use learnloop_common::{ClientConfig, Route};
use learnloop_session::{
    guard, GuardOutcome, HistoryNavigator, Navigator, RoleSet, SessionStore, TabSessionStore,
};

/// What every page controller is built from
#[derive(Clone)]
pub struct PageContext {
    api: ApiClient,
    session: Arc<dyn SessionStore>,
    navigator: Arc<dyn Navigator>,
}

impl std::fmt::Debug for PageContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageContext")
            .field("api", &self.api)
            .field("route", &self.navigator.current())
            .finish()
    }
}

impl PageContext {
    /// Pages share the client's session store and navigator
    pub fn new(api: ApiClient) -> Self {
        let session = Arc::clone(api.session());
        let navigator = Arc::clone(api.navigator());
        Self {
            api,
            session,
            navigator,
        }
    }

    /// A fresh tab: empty session, on the login page
    pub fn for_tab(config: ClientConfig) -> Result<Self, ApiError> {
        let session: Arc<dyn SessionStore> = Arc::new(TabSessionStore::new());
        let navigator: Arc<dyn Navigator> = Arc::new(HistoryNavigator::default());
        let api = ApiClient::from_config(config, session, navigator)?;
        Ok(Self::new(api))
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.session.as_ref()
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub fn guard(&self, allowed: RoleSet) -> GuardOutcome {
        guard(self.session(), self.navigator(), allowed)
    }

    /// False once the user has navigated away (or been sent to login)
    pub fn is_on(&self, route: Route) -> bool {
        self.navigator.is_on(route)
    }

    pub fn navigate(&self, route: Route) {
        self.navigator.navigate(route);
    }

    pub fn logout(&self) {
        self.api.logout();
    }

    /// Run `mutation`, then `refresh` on success.
    ///
    /// Returns the refreshed value, which the caller displays as is.
    /// `Ok(None)` means the session ended during the mutation (a 401) and
    /// no refresh was issued. A failed mutation is returned without a
    /// refresh.
    pub async fn mutate_then_refresh<M, O, F, Fut, T>(
        &self,
        mutation: M,
        refresh: F,
    ) -> Result<Option<T>, ApiError>
    where
        M: Future<Output = Result<O, ApiError>>,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        mutation.await?;
        if !self.session.is_authenticated() {
            tracing::debug!("Session ended during mutation, skipping refresh");
            return Ok(None);
        }
        refresh().await.map(Some)
    }
}

/// Loading flag plus the inline message a page shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl ViewStatus {
    /// Start a call: loading, previous messages cleared
    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.notice = None;
    }

    pub fn done(&mut self) {
        self.loading = false;
    }

    pub fn succeed(&mut self, notice: impl Into<String>) {
        self.loading = false;
        self.notice = Some(notice.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "Page action failed");
        self.loading = false;
        self.error = Some(message);
    }
}
