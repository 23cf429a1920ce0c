// src/config/file.rs
//
// `key = value` config file, one setting per line, `#` starts a comment.
// Missing file → defaults. Unknown keys are logged and skipped; a known key
// with a bad value is an error so typos in policies don't go unnoticed.

use std::{fs, path::Path};

use crate::error::ConfigError;
use super::options::AppOptions;

pub fn load(path: &Path) -> Result<AppOptions, ConfigError> {
    let mut opts = AppOptions::default();
    if !path.exists() {
        logd!("Config: {} not found, using defaults", path.display());
        return Ok(opts);
    }
    let text = fs::read_to_string(path)?;
    apply(&mut opts, &text)?;
    logf!("Config: loaded {}", path.display());
    Ok(opts)
}

/// Apply config text on top of `opts`.
pub fn apply(opts: &mut AppOptions, text: &str) -> Result<(), ConfigError> {
    for (ix, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some(eq) = line.find('=') else {
            logw!("Config: line {} has no `=`, skipped", ix + 1);
            continue;
        };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();

        let bad = || ConfigError::InvalidValue { line: ix + 1, key: s!(key), value: s!(val) };

        match key {
            "source" => opts.source.location = s!(val),
            "poll_secs" => opts.source.poll_secs = val.parse().map_err(|_| bad())?,
            "metric" => opts.policy.metric = val.parse().map_err(|_| bad())?,
            "completion" => opts.policy.completion = val.parse().map_err(|_| bad())?,
            "yes_match" => opts.policy.yes_match = val.parse().map_err(|_| bad())?,
            "rank_display" => opts.policy.rank_display = val.parse().map_err(|_| bad())?,
            "skill_goal" => opts.goals.skill_goal = val.parse().map_err(|_| bad())?,
            "arcade_goal" => opts.goals.arcade_goal = val.parse().map_err(|_| bad())?,
            "tier1" | "tier2" | "tier3" => {
                let slot = (key.as_bytes()[4] - b'1') as usize;
                opts.goals.tiers[slot].goal = val.parse().map_err(|_| bad())?;
            }
            "format" => opts.export.format = val.parse().map_err(|_| bad())?,
            other => logw!("Config: unknown key `{}` on line {}, ignored", other, ix + 1),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::{Metric, RankDisplay};

    #[test]
    fn applies_known_keys_and_skips_noise() {
        let mut opts = AppOptions::default();
        let text = "\
# leaderboard settings
source = http://example.org/data.csv
poll_secs=30
metric = badges
rank_display = renumber
tier2 = 80
mystery = 1
not a setting
";
        apply(&mut opts, text).unwrap();
        assert_eq!(opts.source.location, "http://example.org/data.csv");
        assert_eq!(opts.source.poll_secs, 30);
        assert_eq!(opts.policy.metric, Metric::SkillBadges);
        assert_eq!(opts.policy.rank_display, RankDisplay::Renumber);
        assert_eq!(opts.goals.tiers[1].goal, 80);
        assert_eq!(opts.goals.tiers[0].goal, 30);
    }

    #[test]
    fn bad_value_reports_line() {
        let mut opts = AppOptions::default();
        let err = apply(&mut opts, "\n\nmetric = loudest\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { line, key, .. } => {
                assert_eq!(line, 3);
                assert_eq!(key, "metric");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_gives_defaults() {
        let opts = load(Path::new("definitely/not/here.conf")).unwrap();
        assert_eq!(opts, AppOptions::default());
    }
}
