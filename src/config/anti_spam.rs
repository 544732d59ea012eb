/// Configuration for anti-spam and anti-flood protection.
/// All values are in seconds or counts per second.
/// Painting while dragging sends many requests, so the paint budget is generous;
/// speed changes and clears are rare in normal use and get a much smaller one.
pub const MAX_PAINTS_PER_SECOND: u32 = 240;
pub const MAX_CONTROLS_PER_SECOND: u32 = 10;
pub const MAX_ERRORS_PER_SECOND: u32 = 10;
pub const BAN_DURATION_SECONDS: u64 = 60;
