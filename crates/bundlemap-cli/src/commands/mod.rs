pub mod config;
pub mod report;
pub mod specifiers;

pub use config::{handle_config_command, load_config, ConfigCommand};
pub use report::{run_report, ReportRunOptions};
pub use specifiers::{resolve_specifiers, run_specifiers, SpecifiersRunOptions};
