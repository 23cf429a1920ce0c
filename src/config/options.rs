// src/config/options.rs
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::consts::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub source: SourceOptions,
    pub policy: Policy,
    pub goals: Goals,
    pub export: ExportOptions,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            source: SourceOptions::default(),
            policy: Policy::default(),
            goals: Goals::default(),
            export: ExportOptions::default(),
        }
    }
}

/* ---------------- Source ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    /// Local path or `http://host[:port]/path`
    pub location: String,
    pub poll_secs: u64,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            location: s!(DEFAULT_SOURCE),
            poll_secs: POLL_INTERVAL_SECS,
        }
    }
}

impl SourceOptions {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_secs.max(1))
    }
}

/* ---------------- Business-rule policies ---------------- */

/// What the ranking engine sorts by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Metric {
    /// Skill badges + arcade games
    #[default]
    Combined,
    SkillBadges,
}

/// Where the "all completed" flag comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Completion {
    /// Upstream column, verbatim
    #[default]
    Trusted,
    /// Recomputed from counts against `Goals`
    Derived,
}

/// How "Yes" cells are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum YesMatch {
    #[default]
    IgnoreCase,
    Exact,
}

impl YesMatch {
    pub fn is_yes(self, value: &str) -> bool {
        let v = value.trim();
        match self {
            YesMatch::IgnoreCase => v.eq_ignore_ascii_case(YES),
            YesMatch::Exact => v == "Yes",
        }
    }
}

/// Rank numbers shown for a filtered view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RankDisplay {
    /// Position in the full leaderboard
    #[default]
    Canonical,
    /// 1..K within the filtered list
    Renumber,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Policy {
    pub metric: Metric,
    pub completion: Completion,
    pub yes_match: YesMatch,
    pub rank_display: RankDisplay,
}

macro_rules! keyword_enum {
    ($ty:ty { $($kw:literal => $variant:expr),+ $(,)? }) => {
        impl FromStr for $ty {
            type Err = String;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($kw => Ok($variant),)+
                    other => Err(format!("unknown value `{}`", other)),
                }
            }
        }
    };
}

keyword_enum!(Metric { "combined" => Metric::Combined, "badges" => Metric::SkillBadges });
keyword_enum!(Completion { "trusted" => Completion::Trusted, "derived" => Completion::Derived });
keyword_enum!(YesMatch { "ignore-case" => YesMatch::IgnoreCase, "exact" => YesMatch::Exact });
keyword_enum!(RankDisplay { "canonical" => RankDisplay::Canonical, "renumber" => RankDisplay::Renumber });

/* ---------------- Goals ---------------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tier {
    pub label: String,
    /// Target headcount of fully-completed participants
    pub goal: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Goals {
    pub skill_goal: u32,
    pub arcade_goal: u32,
    pub tiers: [Tier; 3],
}

impl Default for Goals {
    fn default() -> Self {
        let [t1, t2, t3] = TIER_GOALS;
        Self {
            skill_goal: SKILL_GOAL,
            arcade_goal: ARCADE_GOAL,
            tiers: [
                Tier { label: s!("Tier 1"), goal: t1 },
                Tier { label: s!("Tier 2"), goal: t2 },
                Tier { label: s!("Tier 3"), goal: t3 },
            ],
        }
    }
}

/* ---------------- Export ---------------- */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> char {
        match self { ExportFormat::Csv => ',', ExportFormat::Tsv => '\t' }
    }
}

keyword_enum!(ExportFormat { "csv" => ExportFormat::Csv, "tsv" => ExportFormat::Tsv });

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Explicit target; `None` means `out/leaderboard.<ext>`
    pub out_path: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self { format: ExportFormat::Csv, out_path: None }
    }
}

impl ExportOptions {
    pub fn out_path(&self) -> PathBuf {
        match &self.out_path {
            Some(p) => p.clone(),
            None => PathBuf::from(DEFAULT_OUT_DIR)
                .join(format!("{}.{}", DEFAULT_FILE, self.format.ext())),
        }
    }
}
