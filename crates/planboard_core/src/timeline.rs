//! Places year-plan activities on a fixed twelve-month grid.
//!
//! Each activity becomes exactly one [`TimelineBar`], in input order. Bars are
//! never merged or stacked; row layout belongs to whoever draws them.

use crate::dates::{month_index, parse_calendar_date};
use crate::error::AppError;
use crate::model::{Activity, ActivityCategory};
use log::{debug, warn};
use serde::Serialize;

pub const MONTHS_IN_YEAR: u8 = 12;

const ENGLISH_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const THAI_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.", "ต.ค.", "พ.ย.", "ธ.ค.",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineBar {
    pub left_month_index: u8,
    pub width_in_months: u8,
    pub label: String,
}

impl TimelineBar {
    /// Whether grid column `month` (0-based) falls inside the bar.
    pub fn covers(&self, month: u8) -> bool {
        month >= self.left_month_index && month < self.left_month_index + self.width_in_months
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelLocale {
    #[default]
    English,
    Thai,
}

impl LabelLocale {
    pub fn month_abbrev(self, index: u8) -> &'static str {
        let slot = usize::from(index.min(MONTHS_IN_YEAR - 1));
        match self {
            Self::English => ENGLISH_MONTHS[slot],
            Self::Thai => THAI_MONTHS[slot],
        }
    }

    pub fn whole_year(self) -> &'static str {
        match self {
            Self::English => "whole year",
            Self::Thai => "ตลอดทั้งปี",
        }
    }

    /// Legend text for a category.
    pub fn category_name(self, category: ActivityCategory) -> &'static str {
        match (self, category) {
            (Self::English, ActivityCategory::Ongoing) => "Ongoing all year",
            (Self::English, ActivityCategory::Partial) => "Ongoing for part of the year",
            (Self::English, ActivityCategory::Event) => "Student event",
            (Self::English, ActivityCategory::Training) => "Training",
            (Self::English, ActivityCategory::Design) => "Design work",
            (Self::English, ActivityCategory::Other) => "Other work",
            (Self::Thai, ActivityCategory::Ongoing) => "งานต่อเนื่องตลอดปี",
            (Self::Thai, ActivityCategory::Partial) => "งานต่อเนื่องบางช่วง",
            (Self::Thai, ActivityCategory::Event) => "กิจกรรมนักศึกษา",
            (Self::Thai, ActivityCategory::Training) => "การอบรม",
            (Self::Thai, ActivityCategory::Design) => "งานออกแบบ",
            (Self::Thai, ActivityCategory::Other) => "งานอื่นๆ",
        }
    }
}

/// Lays out `activities` for `year` with English labels.
pub fn layout(activities: &[Activity], year: i32) -> Result<Vec<TimelineBar>, AppError> {
    layout_with_locale(activities, year, LabelLocale::English)
}

pub fn layout_with_locale(
    activities: &[Activity],
    year: i32,
    locale: LabelLocale,
) -> Result<Vec<TimelineBar>, AppError> {
    let bars = activities
        .iter()
        .map(|activity| place_activity(activity, year, locale))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(
        "event=timeline_layout module=timeline year={} activities={}",
        year,
        bars.len()
    );
    Ok(bars)
}

fn place_activity(
    activity: &Activity,
    year: i32,
    locale: LabelLocale,
) -> Result<TimelineBar, AppError> {
    // Stored dates are irrelevant for whole-year work, valid or not.
    if activity.category == ActivityCategory::Ongoing {
        return Ok(TimelineBar {
            left_month_index: 0,
            width_in_months: MONTHS_IN_YEAR,
            label: locale.whole_year().to_string(),
        });
    }

    let start = parse_calendar_date(
        &activity.start_date,
        &format!("activity {} start_date", activity.id),
    )?;
    let end = parse_calendar_date(
        &activity.end_date,
        &format!("activity {} end_date", activity.id),
    )?;
    if start > end {
        return Err(AppError::validation(format!(
            "activity {}: start_date {} is after end_date {}",
            activity.id, activity.start_date, activity.end_date
        )));
    }

    if start.year() != year || end.year() != year {
        warn!(
            "event=activity_outside_year module=timeline activity_id={} year={} start={} end={}",
            activity.id, year, start, end
        );
    }

    let start_month = month_index(start);
    let bar = match activity.category {
        ActivityCategory::Partial => {
            let end_month = month_index(end);
            // A range running into a later year stops at the grid's right edge.
            let last_column = if end.year() > start.year() {
                MONTHS_IN_YEAR - 1
            } else {
                end_month
            };
            TimelineBar {
                left_month_index: start_month,
                width_in_months: last_column - start_month + 1,
                label: format!(
                    "{} - {}",
                    locale.month_abbrev(start_month),
                    locale.month_abbrev(end_month)
                ),
            }
        }
        ActivityCategory::Ongoing
        | ActivityCategory::Event
        | ActivityCategory::Training
        | ActivityCategory::Design
        | ActivityCategory::Other => TimelineBar {
            left_month_index: start_month,
            width_in_months: 1,
            label: format!("{} {}", start.day(), locale.month_abbrev(start_month)),
        },
    };

    Ok(bar)
}
