use chrono::Utc;
use uuid::Uuid;

/// Generates an opaque token for slot sets and slots: current time in
/// milliseconds plus a random component. Unique enough within one publishing
/// session; collisions are a theoretical, unhandled case.
pub fn generate() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("id-{}-{}", Utc::now().timestamp_millis(), &random[..8])
}
