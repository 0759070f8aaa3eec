/// Generate a fresh v4 UUID string, used for message ids.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
