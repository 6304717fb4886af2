pub const CONFIRM_TIMEOUT_SECS: u64 = 90;
pub const CONFIRM_POLL_INTERVAL_MS: u64 = 500;
