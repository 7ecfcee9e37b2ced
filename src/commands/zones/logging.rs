use env_logger::Env;

const CRATE_TARGET: &str = "zone_connector";

/// A bare level applies to this crate only; dependencies stay at `warn`.
/// Full directives such as `debug,zone_connector::commands::zones::nearest_pair=trace`
/// are passed through untouched.
pub fn filter_spec(level: Option<&str>) -> String {
    let level = level.map(str::trim).filter(|l| !l.is_empty()).unwrap_or("info");
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("warn,{}={}", CRATE_TARGET, level)
    }
}

/// `RUST_LOG` still wins when set. Returns false if a logger was already installed.
pub fn init(level: Option<&str>) -> bool {
    env_logger::Builder::from_env(Env::default().default_filter_or(filter_spec(level)))
        .format_timestamp(None)
        .format_module_path(false)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_crate() {
        assert_eq!(filter_spec(None), "warn,zone_connector=info");
        assert_eq!(filter_spec(Some(" debug ")), "warn,zone_connector=debug");
        assert_eq!(filter_spec(Some("")), "warn,zone_connector=info");
    }

    #[test]
    fn full_directives_pass_through() {
        assert_eq!(filter_spec(Some("trace,env_logger=off")), "trace,env_logger=off");
        assert_eq!(filter_spec(Some("zone_connector=trace")), "zone_connector=trace");
    }
}
