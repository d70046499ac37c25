use crate::config::EnvMap;

/// Applies allow/deny lists to `env` in place.
///
/// A key is dropped when it is missing from a non-empty `include`, or present
/// in a non-empty `exclude`. With both lists set, both conditions apply.
pub fn filter_env<'a>(env: &'a mut EnvMap, include: &[String], exclude: &[String]) -> &'a mut EnvMap {
    if include.is_empty() && exclude.is_empty() {
        return env;
    }

    env.retain(|key, _| {
        let not_included = !include.is_empty() && !include.contains(key);
        let excluded = !exclude.is_empty() && exclude.contains(key);
        !(not_included || excluded)
    });
    env
}
