//! The `utils` module provides shared pieces used across `popbus`:
//! the crate error type and logging setup.

pub mod error;
pub mod logging;

#[cfg(test)]
mod tests {
    use super::logging;
    use tracing::Level;

    #[test]
    fn logging_init_accepts_levels() {
        // Should not panic
        logging::init("info");
        logging::init("debug");
        logging::init("bogus");
    }

    #[test]
    fn parse_level_is_case_insensitive() {
        assert_eq!(logging::parse_level("WARN"), Some(Level::WARN));
        assert_eq!(logging::parse_level("warning"), Some(Level::WARN));
        assert_eq!(logging::parse_level("Trace"), Some(Level::TRACE));
        assert_eq!(logging::parse_level("loud"), None);
    }
}
