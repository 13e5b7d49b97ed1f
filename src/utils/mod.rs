//! Utilities: diagnostic logging setup, console sink, plaintext log file.
//!
//! Key items:
//!   init_logging / derive_level
//!   Console / StdConsole
//!   LogFile (append-only user log, see `logfile.rs`)

pub mod logfile;

pub use logfile::LogFile;

/// Diagnostic logging helpers (tracing -> stderr).
pub mod logging {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::EnvFilter;

    /// Map `-v` / `-q` flags to a level. `RUST_LOG`, when set, wins.
    pub fn derive_level(verbose: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::ERROR;
        }
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    pub fn init_logging(level: LevelFilter) {
        let filter = EnvFilter::builder()
            .with_default_directive(level.into())
            .from_env_lossy();
        // A second init (tests) is harmless.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

pub use logging::{derive_level, init_logging};

/// Where user-facing output goes. Stdout in the binary, a buffer in tests.
pub trait Console: Send + Sync {
    fn print(&self, text: &str);
}

pub struct StdConsole;

impl Console for StdConsole {
    fn print(&self, text: &str) {
        println!("{text}");
    }
}

#[cfg(test)]
pub mod testing {
    use super::Console;
    use std::sync::Mutex;

    /// Console that records every printed block.
    #[derive(Default)]
    pub struct RecordingConsole {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingConsole {
        pub fn printed(&self) -> Vec<String> {
            self.lines.lock().unwrap().clone()
        }

        pub fn joined(&self) -> String {
            self.printed().join("\n")
        }
    }

    impl Console for RecordingConsole {
        fn print(&self, text: &str) {
            self.lines.lock().unwrap().push(text.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn level_from_flags() {
        assert_eq!(derive_level(0, false), LevelFilter::WARN);
        assert_eq!(derive_level(1, false), LevelFilter::DEBUG);
        assert_eq!(derive_level(5, false), LevelFilter::TRACE);
        assert_eq!(derive_level(2, true), LevelFilter::ERROR, "quiet wins");
    }

    #[test]
    fn recording_console_keeps_order() {
        let c = testing::RecordingConsole::default();
        c.print("a");
        c.print("b");
        assert_eq!(c.printed(), vec!["a", "b"]);
        assert_eq!(c.joined(), "a\nb");
    }
}
