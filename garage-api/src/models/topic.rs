/// Prefix shared by every door notification topic.
pub const TOPIC_PREFIX: &str = "door_open-";

/// Derives the push notification topic for a device.
///
/// Topic names only accept `[A-Za-z0-9-_.~%]`; every other character of the
/// build timestamp is replaced with `.` so any firmware build string maps to
/// a valid topic deterministically.
pub fn notification_topic(build_timestamp: &str) -> String {
    let sanitized: String = build_timestamp
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~' | '%') {
                c
            } else {
                '.'
            }
        })
        .collect();

    format!("{TOPIC_PREFIX}{sanitized}")
}
