//! Shared formatting and timing helpers for BWR crates.

/// Date utility functions
pub mod dates {
    use chrono::{DateTime, NaiveDate, Utc};

    /// Format a date the way the Bulgarian locale does: "DD.MM.YYYY г."
    pub fn format_date_bg(date: &NaiveDate) -> String {
        format!("{} г.", date.format("%d.%m.%Y"))
    }

    /// Format the calendar date of a UTC timestamp, see [`format_date_bg`].
    pub fn format_timestamp_bg(timestamp: &DateTime<Utc>) -> String {
        format_date_bg(&timestamp.date_naive())
    }

}

/// Number formatting for volumes and flows
pub mod numbers {
    /// Group the integer part of a volume in thousands separated by spaces,
    /// e.g. 218260000 -> "218 260 000". Fractions are rounded away.
    pub fn format_volume(value: f64) -> String {
        let rounded = value.round();
        let negative = rounded < 0.0;
        let digits = format!("{}", rounded.abs() as u64);
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }
        if negative {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Format a flow rate with two decimals.
    pub fn format_flow(value: f64) -> String {
        format!("{:.2}", value)
    }

    /// Parse a number that may arrive as a string with surrounding whitespace.
    /// Mirrors the lenient parsing used for API payloads.
    pub fn parse_lenient(s: &str) -> Option<f64> {
        match s.trim().to_lowercase().as_str() {
            "" | "null" | "n/a" | "na" | "nan" => None,
            other => other.parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_format_volume() {
            assert_eq!(format_volume(218260000.0), "218 260 000");
            assert_eq!(format_volume(999.0), "999");
            assert_eq!(format_volume(1000.4), "1 000");
            assert_eq!(format_volume(-12345.0), "-12 345");
            assert_eq!(format_volume(0.0), "0");
        }

        #[test]
        fn test_format_flow() {
            assert_eq!(format_flow(4.2), "4.20");
            assert_eq!(format_flow(15.678), "15.68");
        }

        #[test]
        fn test_parse_lenient() {
            assert_eq!(parse_lenient(" 305564000.00 "), Some(305564000.0));
            assert_eq!(parse_lenient("null"), None);
            assert_eq!(parse_lenient(""), None);
            assert_eq!(parse_lenient("abc"), None);
        }
    }
}

/// Bulgarian month names as shown on the time slider
pub mod months {
    pub const MONTHS_BG: [&str; 12] = [
        "Януари",
        "Февруари",
        "Март",
        "Април",
        "Май",
        "Юни",
        "Юли",
        "Август",
        "Септември",
        "Октомври",
        "Ноември",
        "Декември",
    ];

    /// Month name for a 1-based month number.
    pub fn month_name(month: u32) -> Option<&'static str> {
        MONTHS_BG.get(month.checked_sub(1)? as usize).copied()
    }

    /// 1-based month number for a Bulgarian month name (case-insensitive).
    pub fn month_number(name: &str) -> Option<u32> {
        let needle = name.trim().to_lowercase();
        MONTHS_BG
            .iter()
            .position(|m| m.to_lowercase() == needle)
            .map(|i| i as u32 + 1)
    }

}

/// Async sleep that works both natively and in the browser.
pub mod time {
    use std::time::Duration;

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn sleep(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn sleep(duration: Duration) {
        let millis = duration.as_millis().min(i32::MAX as u128) as i32;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| match web_sys::window() {
            Some(window) => {
                let _ = window
                    .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
            }
            None => {
                let _ = resolve.call0(&wasm_bindgen::JsValue::NULL);
            }
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }

    /// Delay before the given 1-based retry attempt, doubling from `base`.
    pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
        base.saturating_mul(1u32 << attempt.saturating_sub(1).min(16))
    }

}
