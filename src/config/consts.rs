// src/config/consts.rs

// Source
pub const DEFAULT_SOURCE: &str = "data.csv";
pub const POLL_INTERVAL_SECS: u64 = 60;
pub const USER_AGENT: &str = "arcade_board/0.4";
pub const NET_TIMEOUT_SECS: u64 = 15;

// Input columns (header text, exact)
pub const COL_NAME: &str = "User Name";
pub const COL_ACCESS: &str = "Access Code Redemption Status";
pub const COL_SKILL_COUNT: &str = "# of Skill Badges Completed";
pub const COL_SKILL_NAMES: &str = "Names of Completed Skill Badges";
pub const COL_ARCADE_COUNT: &str = "# of Arcade Games Completed";
pub const COL_ARCADE_NAMES: &str = "Names of Completed Arcade Games";
pub const COL_COMPLETED: &str = "All Skill Badges & Games Completed";

pub const LIST_SEP: char = '|';
pub const YES: &str = "yes";

// Goals
pub const SKILL_GOAL: u32 = 15;
pub const ARCADE_GOAL: u32 = 1;
pub const TIER_GOALS: [u32; 3] = [30, 50, 70];

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "arcade_board.log";
pub const CONFIG_FILE: &str = "arcade_board.conf";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "leaderboard";

// Presentation
pub const RETRY_HINT: &str = "Please check your network connection and try reloading.";
