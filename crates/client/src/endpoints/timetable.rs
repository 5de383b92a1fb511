//! Timetables and teaching schedules

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::ApiClient;
use crate::endpoints::list_from;
use crate::error::ApiError;
use crate::request::RequestOptions;

pub const TEACHER_SCHEDULE_PATH: &str = "/api/teacher/schedule/me";
pub const TEACHER_TIMETABLES_PATH: &str = "/api/teacher/timetables";
pub const TEACHER_TIMETABLE_PATH: &str = "/api/teacher/timetable";

/// One period in a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableSlot {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher: Option<String>,
    pub start: String,
    pub end: String,
}

/// A day's timetable as saved by a teacher
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableDay {
    pub day: String,
    pub items: Vec<TimetableSlot>,
}

impl ApiClient {
    /// A student's week, keyed by student id
    pub async fn student_week(&self, student_id: i64) -> Result<Vec<Value>, ApiError> {
        let value = self
            .request(&format!("/api/timetable/{}", student_id), RequestOptions::get())
            .await?;
        Ok(list_from(value, Some("week")))
    }

    /// Periods the signed-in teacher teaches today
    pub async fn teacher_schedule(&self) -> Result<Vec<Value>, ApiError> {
        let value = self
            .request(TEACHER_SCHEDULE_PATH, RequestOptions::get())
            .await?;
        Ok(list_from(value, Some("schedule")))
    }

    pub async fn teacher_timetables(&self) -> Result<Vec<Value>, ApiError> {
        let value = self
            .request(TEACHER_TIMETABLES_PATH, RequestOptions::get())
            .await?;
        Ok(list_from(value, Some("timetables")))
    }

    /// Create or replace the entry for `day.day`
    pub async fn save_timetable(&self, day: &TimetableDay) -> Result<Option<Value>, ApiError> {
        let options = RequestOptions::json(Method::PUT, day)?;
        self.request(TEACHER_TIMETABLE_PATH, options).await
    }
}
