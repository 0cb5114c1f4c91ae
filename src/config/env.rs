use std::env;

use super::types::Config;

pub(super) fn apply_env(config: &mut Config) {
    if let Ok(val) = env::var("GPUSH_LOG_FILE") {
        config.log_file = if val.trim().is_empty() { None } else { Some(val) };
    }
    if let Ok(val) = env::var("GPUSH_LOG_MAX_LINES") {
        if let Ok(n) = val.parse() {
            config.log_max_lines = n;
        }
    }
}
