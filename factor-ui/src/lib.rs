pub mod config;
pub mod logging;
pub mod oneshot;
pub mod panel;
pub mod prompt;

/// Title shown by both interactive front ends.
pub const TITLE: &str = "FINANCIAL CALCULATOR CLI";

/// Subtitle lines under [`TITLE`].
pub const SUBTITLE: [&str; 2] = [
    "Type mathematical expressions, finance factors, or commands.",
    "Type 'help' for instructions, 'cls' to clear, 'case' to start a scoped session.",
];
