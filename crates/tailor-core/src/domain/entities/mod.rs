pub mod common;
pub mod customization;
pub mod layout;
pub mod package;
pub mod rename;
pub mod replacement;
pub mod report;
pub mod skip;
