//! Domain-level constants.

// =============================================================================
// Startup sequence
// =============================================================================

/// User id looked up by the default startup sequence
pub const DEFAULT_LOOKUP_USER_ID: i32 = 2;
