use std::time::Duration;

/// Static pages shown by the palette before anything is typed.
pub const PALETTE_PREVIEW_LEN: usize = 6;

/// Maximum number of palette results across all kinds.
pub const PALETTE_RESULT_LIMIT: usize = 12;

/// Delay before a deep-linked record is scrolled into view, letting layout settle.
pub const DEEP_LINK_SCROLL_DELAY: Duration = Duration::from_millis(100);

/// Tunable limits shared by the surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTuning {
    pub palette_preview_len: usize,
    pub palette_result_limit: usize,
    pub scroll_delay: Duration,
}

impl Default for EngineTuning {
    fn default() -> Self {
        Self {
            palette_preview_len: PALETTE_PREVIEW_LEN,
            palette_result_limit: PALETTE_RESULT_LIMIT,
            scroll_delay: DEEP_LINK_SCROLL_DELAY,
        }
    }
}
