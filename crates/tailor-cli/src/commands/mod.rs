//! One module per subcommand. Handlers translate arguments into core calls
//! and render the results; no business logic lives here.

pub mod add_package;
pub mod completions;
pub mod config;
pub mod init;
pub mod setup;
