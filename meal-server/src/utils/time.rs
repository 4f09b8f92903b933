//! 时间工具函数 — 时钟、营业时区与日期区间
//!
//! 截止时间判断与"今天"都经由 [`Clock`] 取得当前时间，测试中用
//! [`FixedClock`] 固定时间。

use std::fmt;

use chrono::{Datelike, Days, Local, Months, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;
use shared::models::{DATE_FORMAT, WeekType};

use super::{AppError, AppResult};

/// 当前时间来源 (业务本地时间，无时区偏移)
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> NaiveDateTime;

    /// 业务日期
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// 系统时钟
///
/// 配置了 IANA 时区时按该时区换算，否则使用服务器本地时间。
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    tz: Option<Tz>,
}

impl SystemClock {
    pub fn new(tz: Option<Tz>) -> Self {
        Self { tz }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
            None => Local::now().naive_local(),
        }
    }
}

/// 固定时钟 (测试用)，可通过 [`FixedClock::set`] 拨动
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// `"YYYY-MM-DD HH:MM:SS"`
    pub fn at(s: &str) -> AppResult<Self> {
        let now = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .map_err(|e| AppError::invalid_format(format!("Invalid datetime '{}': {}", s, e)))?;
        Ok(Self::new(now))
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.now.lock() = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.lock()
    }
}

/// 解析日期字符串 (YYYY-MM-DD)，错误信息带上解析失败原因
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    let trimmed = date.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        AppError::invalid_format(format!("Invalid date '{}': {}", trimmed, e))
            .with_detail("value", trimmed)
    })
}

/// 解析 IANA 时区名，失败返回 `None` 并记录警告
pub fn parse_timezone(name: &str) -> Option<Tz> {
    match name.trim().parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(e) => {
            tracing::warn!("Unknown TIMEZONE '{}': {}, falling back to local time", name, e);
            None
        }
    }
}

/// 本周一
pub fn week_monday(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// 当月首日与末日
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = date.with_day(1).unwrap_or(date);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date);
    (first, last)
}

/// 按周类型计算日期区间 (闭区间)
///
/// - `Current`: 本周一至周五
/// - `Next`: 下周一至周五
/// - `Month`: 本月首日至末日
pub fn week_range(today: NaiveDate, week_type: WeekType) -> (NaiveDate, NaiveDate) {
    let monday = week_monday(today);
    let workweek = |start: NaiveDate| {
        let friday = start.checked_add_days(Days::new(4)).unwrap_or(start);
        (start, friday)
    };
    match week_type {
        WeekType::Current => workweek(monday),
        WeekType::Next => workweek(monday.checked_add_days(Days::new(7)).unwrap_or(monday)),
        WeekType::Month => month_bounds(today),
    }
}

/// 闭区间内的所有日期，`from > to` 时为空
pub fn dates_between(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}
