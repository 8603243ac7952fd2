pub mod parser;
pub mod run;

pub use parser::{Command, OutputFormat, ToolOpts};
pub use run::{effective_config, run, run_with_source};
