//! 截止日期的解析与显示
//!
//! 存储使用 UTC 时间戳，界面按本地日期 `dd/mm/yyyy` 显示。

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{Result, TaskError};
use crate::storage::tasks::Task;

/// 显示格式
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// 本地今天
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// 解析用户输入的日期: dd/mm/yyyy、yyyy-mm-dd、today、tomorrow
pub fn parse_due_date(text: &str, today: NaiveDate) -> Result<NaiveDate> {
    let trimmed = text.trim();

    match trimmed.to_lowercase().as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    // chrono 的 %Y 接受任意位数的年份，先确认年份是四位数字
    let parsed = if trimmed.rsplit('/').next().is_some_and(is_full_year) {
        NaiveDate::parse_from_str(trimmed, DISPLAY_FORMAT).ok()
    } else if trimmed.split('-').next().is_some_and(is_full_year) {
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
    } else {
        None
    };

    parsed.ok_or_else(|| {
        TaskError::invalid_date(format!(
            "'{}' (expected dd/mm/yyyy, yyyy-mm-dd, today or tomorrow)",
            trimmed
        ))
    })
}

fn is_full_year(part: &str) -> bool {
    part.len() == 4 && part.bytes().all(|b| b.is_ascii_digit())
}

/// 本地日期的零点，转换为 UTC 时间戳
pub fn to_due_date(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight).earliest() {
        Some(local) => local.with_timezone(&Utc),
        // 零点落在夏令时空档里
        None => midnight.and_utc(),
    }
}

/// 截止日期对应的本地日期
pub fn local_day(due_date: &DateTime<Utc>) -> NaiveDate {
    due_date.with_timezone(&Local).date_naive()
}

/// 格式化为 dd/mm/yyyy
pub fn format_due_date(due_date: &DateTime<Utc>) -> String {
    local_day(due_date).format(DISPLAY_FORMAT).to_string()
}

/// 未完成且截止日期早于今天
pub fn is_overdue(task: &Task, today: NaiveDate) -> bool {
    !task.is_completed && local_day(&task.due_date) < today
}
