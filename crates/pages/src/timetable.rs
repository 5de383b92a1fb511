//! Timetable editor for teachers

use learnloop_client::{TimetableDay, TimetableSlot};
use learnloop_common::Route;
use learnloop_session::{GuardOutcome, RoleSet, Session};
use serde_json::Value;

use crate::context::{PageContext, ViewStatus};

const ROUTE: Route = Route::Timetable;

#[derive(Debug)]
pub struct TimetablePage {
    ctx: PageContext,
    pub session: Option<Session>,
    pub profile: Option<Value>,
    pub timetables: Vec<Value>,
    pub status: ViewStatus,
}

impl TimetablePage {
    pub fn new(ctx: PageContext) -> Self {
        Self {
            ctx,
            session: None,
            profile: None,
            timetables: Vec::new(),
            status: ViewStatus::default(),
        }
    }

    pub async fn mount(&mut self) -> bool {
        let GuardOutcome::Allow(session) = self.ctx.guard(RoleSet::TEACHER_ONLY) else {
            return false;
        };
        self.session = Some(session);
        self.status.begin();

        let profile = self.ctx.api().profile().await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match profile {
            Ok(profile) => self.profile = profile,
            Err(e) => {
                self.status.fail(e.to_string());
                return false;
            }
        }

        self.refresh().await
    }

    pub async fn refresh(&mut self) -> bool {
        let result = self.ctx.api().teacher_timetables().await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(timetables) => {
                self.timetables = timetables;
                self.status.done();
                true
            }
            Err(e) => {
                self.status.fail(e.to_string());
                false
            }
        }
    }

    /// Save one day's periods, then reload the list
    pub async fn save(&mut self, day: &str, slots: Vec<TimetableSlot>) -> bool {
        let day = day.trim();
        if day.is_empty() {
            self.status.fail("Day is required.");
            return false;
        }
        let incomplete = |s: &&TimetableSlot| {
            s.subject.trim().is_empty() || s.start.trim().is_empty() || s.end.trim().is_empty()
        };
        if let Some(slot) = slots.iter().find(incomplete) {
            tracing::debug!(?slot, "Incomplete timetable slot");
            self.status.fail("Each period needs a subject, start and end time.");
            return false;
        }

        let entry = TimetableDay {
            day: day.to_string(),
            items: slots,
        };

        self.status.begin();
        let api = self.ctx.api();
        let result = self
            .ctx
            .mutate_then_refresh(api.save_timetable(&entry), || api.teacher_timetables())
            .await;
        if !self.ctx.is_on(ROUTE) {
            return false;
        }
        match result {
            Ok(Some(timetables)) => {
                self.timetables = timetables;
                self.status.succeed("Timetable saved.");
                true
            }
            Ok(None) => {
                self.status.done();
                false
            }
            Err(e) => {
                self.status.fail(e.to_string());
                false
            }
        }
    }

    pub fn back(&self) {
        self.ctx.navigate(Route::TeacherDashboard);
    }
}
