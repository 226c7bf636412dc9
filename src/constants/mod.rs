pub mod prompts;

/// Upper bound on checklist items kept from one LLM reply.
pub const MAX_CHECKLIST_ITEMS: usize = 10;

/// Items shorter than this (after prefix stripping) are dropped.
pub const MIN_CHECKLIST_ITEM_CHARS: usize = 10;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const MAX_QUESTION_COUNT: usize = 10;

/// Results requested from the video search; only the first is used.
pub const VIDEO_RESULT_CAP: u8 = 3;
