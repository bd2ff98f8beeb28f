use uuid::Uuid;

const SUFFIX_LEN: usize = 7;

/// Produce a session-scoped opaque identifier of the form `prefix_xxxxxxx`.
///
/// The suffix is drawn from a fresh v4 UUID, so collisions are possible in
/// principle but negligible for identifiers that never leave the process.
pub fn make_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &suffix[..SUFFIX_LEN])
}
