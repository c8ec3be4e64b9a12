use std::sync::Mutex;

// Serializes tests that touch process-global env vars; cargo runs test
// functions in parallel by default.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified, restoring the
/// previous values afterwards (also on panic).
///
/// `changes` is a list of `(key, value)` pairs: `Some(v)` sets the variable,
/// `None` removes it.
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().expect("ENV_LOCK poisoned");

    let previous: Vec<(String, Option<String>)> = changes
        .iter()
        .map(|(key, _)| (key.to_string(), std::env::var(key).ok()))
        .collect();
    let _restore = RestoreEnv { previous };

    for (key, value) in changes {
        apply(key, *value);
    }

    f()
}

struct RestoreEnv {
    previous: Vec<(String, Option<String>)>,
}

impl Drop for RestoreEnv {
    fn drop(&mut self) {
        for (key, value) in &self.previous {
            apply(key, value.as_deref());
        }
    }
}

fn apply(key: &str, value: Option<&str>) {
    match value {
        Some(v) => std::env::set_var(key, v),
        None => std::env::remove_var(key),
    }
}
