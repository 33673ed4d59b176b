/// 获取当前 UTC 时间戳（毫秒）
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a new resource ID (UUID v4, hyphenated).
///
/// Every persisted record (users, tables, menus, usages, orders) is keyed by
/// one of these; route parameters are parsed back with `Uuid`.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
