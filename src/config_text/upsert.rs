//! Pattern upsert: replace every matching line, or append when nothing matches

use super::persist::{read_config, write_if_changed};
use crate::exceptions::Result;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::path::Path;

/// A single "replace if present, else maybe insert" edit.
///
/// `pattern` is evaluated line-wise: `^` and `$` anchor at line boundaries.
/// `replacement` goes through the regex expansion syntax (`$1`, `${name}`, `$$`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertRule {
    pub pattern: String,
    pub replacement: String,
    pub insert_if_absent: bool,
}

/// What an upsert did to the content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// This many matches were rewritten
    Replaced(usize),
    /// No match; the replacement was appended as the final line
    Inserted,
    /// No match and insertion not requested
    Unchanged,
}

impl UpsertRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>, insert_if_absent: bool) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
            insert_if_absent,
        }
    }

    /// Rewrite matching lines, appending the replacement when none match
    pub fn upsert(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::new(pattern, replacement, true)
    }

    /// Rewrite matching lines only; absent lines stay absent
    pub fn replace(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self::new(pattern, replacement, false)
    }

    fn compile(&self) -> Result<Regex> {
        Ok(RegexBuilder::new(&self.pattern).multi_line(true).build()?)
    }

    /// Apply the rule to `content`, returning the new text
    pub fn apply(&self, content: &str) -> Result<(String, UpsertOutcome)> {
        let regex = self.compile()?;
        let matches = regex.find_iter(content).count();

        if matches == 0 {
            if self.insert_if_absent {
                let mut updated = String::with_capacity(content.len() + self.replacement.len() + 1);
                updated.push_str(content);
                updated.push('\n');
                updated.push_str(&self.replacement);
                return Ok((updated, UpsertOutcome::Inserted));
            }
            return Ok((content.to_string(), UpsertOutcome::Unchanged));
        }

        let updated = regex
            .replace_all(content, self.replacement.as_str())
            .into_owned();
        Ok((updated, UpsertOutcome::Replaced(matches)))
    }
}

/// Apply `rule` to the file at `path`, rewriting it in full
pub fn upsert_file(path: &Path, rule: &UpsertRule) -> Result<UpsertOutcome> {
    let content = read_config(path)?;
    let (updated, outcome) = rule.apply(&content)?;
    write_if_changed(path, &content, &updated)?;
    debug!(
        "✏️  {:?}: /{}/ -> {:?}: {:?}",
        path, rule.pattern, rule.replacement, outcome
    );
    Ok(outcome)
}

/// Apply rules in order; each rule sees the previous rule's result.
///
/// The file is read once and written once, after every rule has been applied.
pub fn upsert_all(path: &Path, rules: &[UpsertRule]) -> Result<Vec<UpsertOutcome>> {
    let original = read_config(path)?;
    let mut content = original.clone();
    let mut outcomes = Vec::with_capacity(rules.len());

    for rule in rules {
        let (updated, outcome) = rule.apply(&content)?;
        debug!(
            "✏️  {:?}: /{}/ -> {:?}: {:?}",
            path, rule.pattern, rule.replacement, outcome
        );
        content = updated;
        outcomes.push(outcome);
    }

    write_if_changed(path, &original, &content)?;
    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exceptions::InstallerError;
    use std::fs;
    use tempfile::TempDir;

    fn hdmi_mode() -> UpsertRule {
        UpsertRule::upsert(r"^hdmi_mode=.*$", "hdmi_mode=87")
    }

    #[test]
    fn test_existing_line_replaced_in_place() {
        let (out, outcome) = hdmi_mode().apply("a\nhdmi_mode=1\nb\n").unwrap();
        assert_eq!(out, "a\nhdmi_mode=87\nb\n");
        assert_eq!(outcome, UpsertOutcome::Replaced(1));
    }

    #[test]
    fn test_missing_line_appended_when_inserting() {
        let (out, outcome) = hdmi_mode().apply("a\nb\n").unwrap();
        assert_eq!(out, "a\nb\n\nhdmi_mode=87");
        assert_eq!(outcome, UpsertOutcome::Inserted);
    }

    #[test]
    fn test_missing_line_left_alone_without_insert() {
        let rule = UpsertRule::replace(r"^[^#]*dtoverlay=vc4-kms-v3d.*$", "#dtoverlay=vc4-kms-v3d");
        let (out, outcome) = rule.apply("a\nb\n").unwrap();
        assert_eq!(out, "a\nb\n");
        assert_eq!(outcome, UpsertOutcome::Unchanged);
    }

    #[test]
    fn test_every_match_replaced() {
        let content = "hdmi_group=1\nx=1\n#hdmi_group=0\n";
        let rule = UpsertRule::upsert(r"^.*hdmi_group.*$", "hdmi_group=2");
        let (out, outcome) = rule.apply(content).unwrap();
        assert_eq!(out, "hdmi_group=2\nx=1\nhdmi_group=2\n");
        assert_eq!(outcome, UpsertOutcome::Replaced(2));
    }

    #[test]
    fn test_match_ignores_insert_flag() {
        let content = "hdmi_mode=4\n";
        let (with_insert, _) = UpsertRule::upsert(r"^hdmi_mode=.*$", "hdmi_mode=87")
            .apply(content)
            .unwrap();
        let (without_insert, _) = UpsertRule::replace(r"^hdmi_mode=.*$", "hdmi_mode=87")
            .apply(content)
            .unwrap();
        assert_eq!(with_insert, without_insert);
    }

    #[test]
    fn test_empty_replacement_blanks_lines() {
        let content = "a\nhdmi_cvt=480 640 60 1 0 0 0\nb\n";
        let (out, _) = UpsertRule::replace(r"^hdmi_cvt=.*$", "").apply(content).unwrap();
        assert_eq!(out, "a\n\nb\n");
    }

    #[test]
    fn test_commenting_skips_already_commented_lines() {
        let content = "dtoverlay=vc4-kms-v3d\n#dtoverlay=vc4-kms-v3d,foo\n";
        let rule = UpsertRule::replace(r"^[^#]*dtoverlay=vc4-kms-v3d.*$", "#dtoverlay=vc4-kms-v3d");
        let (out, outcome) = rule.apply(content).unwrap();
        assert_eq!(out, "#dtoverlay=vc4-kms-v3d\n#dtoverlay=vc4-kms-v3d,foo\n");
        assert_eq!(outcome, UpsertOutcome::Replaced(1));
    }

    #[test]
    fn test_replacement_expands_capture_groups() {
        let rule = UpsertRule::replace(r"^#\s*(dtparam=\w+)=off$", "${1}=on");
        let (out, _) = rule.apply("#dtparam=spi=off\n").unwrap();
        assert_eq!(out, "dtparam=spi=on\n");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = UpsertRule::upsert("^(unclosed", "x").apply("a\n").unwrap_err();
        assert!(matches!(err, InstallerError::InvalidPattern(_)));
    }

    #[test]
    fn test_upsert_file_rewrites_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "a\nhdmi_mode=1\nb\n").unwrap();

        let outcome = upsert_file(&path, &hdmi_mode()).unwrap();
        assert_eq!(outcome, UpsertOutcome::Replaced(1));
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nhdmi_mode=87\nb\n");
    }

    #[test]
    fn test_upsert_file_missing_file_is_io_failure() {
        let dir = TempDir::new().unwrap();
        let err = upsert_file(&dir.path().join("nope.txt"), &hdmi_mode()).unwrap_err();
        assert!(matches!(err, InstallerError::FileError { .. }));
    }

    #[test]
    fn test_upsert_all_chains_rules() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "hdmi_group=1\n").unwrap();

        let outcomes = upsert_all(
            &path,
            &[
                UpsertRule::upsert(r"^.*hdmi_group.*$", "hdmi_group=2"),
                UpsertRule::upsert(r"^.*hdmi_mode.*$", "hdmi_mode=87"),
            ],
        )
        .unwrap();

        assert_eq!(outcomes, vec![UpsertOutcome::Replaced(1), UpsertOutcome::Inserted]);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "hdmi_group=2\n\nhdmi_mode=87"
        );
    }

    #[test]
    fn test_bad_rule_in_batch_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, "hdmi_group=1\n").unwrap();

        let result = upsert_all(
            &path,
            &[
                UpsertRule::upsert(r"^.*hdmi_group.*$", "hdmi_group=2"),
                UpsertRule::upsert("(", "broken"),
            ],
        );

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hdmi_group=1\n");
    }
}
