//! Field annotation syntax.

/// Separator between the key segment and any trailing options of a field annotation.
pub const TAG_SEPARATOR: char = ',';
