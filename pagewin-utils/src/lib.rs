/// Paged source listings for the code viewer.
pub mod code;
/// Generic embed builders shared across commands.
pub mod embed;
/// Single source of truth for the message-command prefix.
pub const COMMAND_PREFIX: char = '!';
/// Pagination math, component tokens, and interaction utilities.
pub mod pagination;
/// Pure parser helpers.
pub mod parse;
