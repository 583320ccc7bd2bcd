//! Human-readable rendering of the distance between a push and a deadline.

use std::fmt;

use chrono::TimeDelta;

/// Language used for rendered durations and spreadsheet labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// English, e.g. "1 hour 30 minutes before deadline".
    #[default]
    English,
    /// Simplified Chinese, e.g. "截止时间前 1小时30分钟".
    Chinese,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "zh" | "cn" | "chinese" => Ok(Self::Chinese),
            other => Err(format!("unsupported language: {other} (supported: en, zh)")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::English => write!(f, "en"),
            Self::Chinese => write!(f, "zh"),
        }
    }
}

#[derive(Clone, Copy)]
enum Unit {
    Minute,
    Hour,
    Day,
}

fn quantity(count: i64, unit: Unit, language: Language) -> String {
    match language {
        Language::English => {
            let name = match unit {
                Unit::Minute => "minute",
                Unit::Hour => "hour",
                Unit::Day => "day",
            };
            if count == 1 {
                format!("{count} {name}")
            } else {
                format!("{count} {name}s")
            }
        }
        Language::Chinese => {
            let name = match unit {
                Unit::Minute => "分钟",
                Unit::Hour => "小时",
                Unit::Day => "天",
            };
            format!("{count}{name}")
        }
    }
}

fn pair(major: String, minor: Option<String>, language: Language) -> String {
    match (minor, language) {
        (None, _) => major,
        (Some(minor), Language::English) => format!("{major} {minor}"),
        (Some(minor), Language::Chinese) => format!("{major}{minor}"),
    }
}

/// Renders a non-negative duration.
///
/// Under an hour: minutes. Under a day: hours plus any leftover minutes.
/// Otherwise: days plus any leftover hours. Seconds are truncated.
pub fn format_duration(delta: TimeDelta, language: Language) -> String {
    let minutes = delta.num_minutes().max(0);

    if minutes < 60 {
        return quantity(minutes, Unit::Minute, language);
    }

    if minutes < 24 * 60 {
        let hours = minutes / 60;
        let rest = minutes % 60;
        let minor = (rest > 0).then(|| quantity(rest, Unit::Minute, language));
        return pair(quantity(hours, Unit::Hour, language), minor, language);
    }

    let hours = minutes / 60;
    let days = hours / 24;
    let rest = hours % 24;
    let minor = (rest > 0).then(|| quantity(rest, Unit::Hour, language));
    pair(quantity(days, Unit::Day, language), minor, language)
}

/// Renders the distance to the deadline with its before/after label.
pub fn describe_difference(delta: TimeDelta, on_time: bool, language: Language) -> String {
    let duration = format_duration(delta, language);
    match (language, on_time) {
        (Language::English, true) => format!("{duration} before deadline"),
        (Language::English, false) => format!("{duration} after deadline"),
        (Language::Chinese, true) => format!("截止时间前 {duration}"),
        (Language::Chinese, false) => format!("超过截止时间 {duration}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en(minutes: i64) -> String {
        format_duration(TimeDelta::minutes(minutes), Language::English)
    }

    fn zh(minutes: i64) -> String {
        format_duration(TimeDelta::minutes(minutes), Language::Chinese)
    }

    #[test]
    fn minutes_only() {
        assert_eq!(en(0), "0 minutes");
        assert_eq!(en(1), "1 minute");
        assert_eq!(en(45), "45 minutes");
        assert_eq!(en(59), "59 minutes");
    }

    #[test]
    fn hours_and_minutes() {
        assert_eq!(en(60), "1 hour");
        assert_eq!(en(90), "1 hour 30 minutes");
        assert_eq!(en(125), "2 hours 5 minutes");
        assert_eq!(en(23 * 60 + 59), "23 hours 59 minutes");
    }

    #[test]
    fn days_and_hours() {
        assert_eq!(en(24 * 60), "1 day");
        assert_eq!(en(25 * 60), "1 day 1 hour");
        assert_eq!(en(50 * 60 + 30), "2 days 2 hours");
    }

    #[test]
    fn chinese_units() {
        assert_eq!(zh(45), "45分钟");
        assert_eq!(zh(90), "1小时30分钟");
        assert_eq!(zh(25 * 60), "1天1小时");
        assert_eq!(zh(120), "2小时");
    }

    #[test]
    fn seconds_are_truncated() {
        let delta = TimeDelta::seconds(59 * 60 + 59);
        assert_eq!(format_duration(delta, Language::English), "59 minutes");
    }

    #[test]
    fn difference_labels() {
        let hour = TimeDelta::hours(1);
        assert_eq!(
            describe_difference(hour, true, Language::English),
            "1 hour before deadline"
        );
        assert_eq!(
            describe_difference(hour, false, Language::English),
            "1 hour after deadline"
        );
        assert_eq!(
            describe_difference(hour, true, Language::Chinese),
            "截止时间前 1小时"
        );
        assert_eq!(
            describe_difference(TimeDelta::minutes(25), false, Language::Chinese),
            "超过截止时间 25分钟"
        );
    }

    #[test]
    fn language_from_str() {
        assert_eq!("zh".parse::<Language>(), Ok(Language::Chinese));
        assert_eq!("EN".parse::<Language>(), Ok(Language::English));
        assert!("fr".parse::<Language>().is_err());
    }
}
