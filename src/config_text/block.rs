//! Sentinel-delimited block owned by the installer inside a shared config file
//!
//! The block is a run of lines that starts with one marker line and ends with
//! another. Everything outside the block belongs to the user (or other tools)
//! and is carried through byte for byte. Only the first block is considered;
//! a start marker with no end marker after it is reported as corrupt and the
//! file is left alone.

use super::persist::{read_config, write_if_changed};
use crate::exceptions::{InstallerError, Result};
use log::{debug, info};
use std::path::Path;

/// Start and end marker lines of an owned block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedBlock {
    start: String,
    end: String,
}

/// Result of a removal that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The block was deleted; it spanned this many lines including markers
    Removed { lines: usize },
    /// No start marker in the file
    NotFound,
}

/// Where the block sits in a file, by 0-based line index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLocation {
    Absent,
    Found { start: usize, end: usize },
    Unterminated { start: usize },
}

/// Lines with their terminators kept, so joining them restores the input
fn split_lines(content: &str) -> Vec<&str> {
    content.split_inclusive('\n').collect()
}

fn line_text(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

impl OwnedBlock {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    pub fn start_marker(&self) -> &str {
        &self.start
    }

    pub fn end_marker(&self) -> &str {
        &self.end
    }

    /// Find the first start marker and the first end marker following it
    pub fn locate(&self, content: &str) -> BlockLocation {
        let lines = split_lines(content);
        let Some(start) = lines.iter().position(|l| line_text(l) == self.start) else {
            return BlockLocation::Absent;
        };

        match lines[start..].iter().position(|l| line_text(l) == self.end) {
            Some(offset) => BlockLocation::Found {
                start,
                end: start + offset,
            },
            None => BlockLocation::Unterminated { start },
        }
    }

    /// Remove the block from `content`.
    ///
    /// Returns `None` when there is no start marker. `path` only labels the
    /// corruption error.
    pub fn remove_from(&self, content: &str, path: &Path) -> Result<Option<(String, usize)>> {
        match self.locate(content) {
            BlockLocation::Absent => Ok(None),
            BlockLocation::Unterminated { start } => Err(InstallerError::CorruptBlock {
                path: path.to_path_buf(),
                start_line: start + 1,
            }),
            BlockLocation::Found { start, end } => {
                let lines = split_lines(content);
                let mut kept = String::with_capacity(content.len());
                for line in lines[..start].iter().chain(lines[end + 1..].iter()) {
                    kept.push_str(line);
                }
                Ok(Some((kept, end - start + 1)))
            }
        }
    }

    /// Render the block: start marker, payload lines, end marker, each newline-terminated
    pub fn render(&self, payload: &[String]) -> String {
        let mut out = String::new();
        out.push_str(&self.start);
        out.push('\n');
        for line in payload {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(&self.end);
        out.push('\n');
        out
    }

    /// Append a freshly rendered block after all existing content
    pub fn append_to(&self, content: &str, payload: &[String]) -> String {
        let block = self.render(payload);
        let mut out = String::with_capacity(content.len() + block.len() + 1);
        out.push_str(content);
        if !content.is_empty() && !content.ends_with('\n') {
            out.push('\n');
        }
        out.push_str(&block);
        out
    }

    /// Remove the block from the file at `path`
    pub fn remove_block(&self, path: &Path) -> Result<RemoveOutcome> {
        let content = read_config(path)?;
        match self.remove_from(&content, path)? {
            None => {
                info!("Nothing to remove from {}", path.display());
                Ok(RemoveOutcome::NotFound)
            }
            Some((updated, lines)) => {
                write_if_changed(path, &content, &updated)?;
                debug!("🧹 Removed {lines}-line installer block from {:?}", path);
                Ok(RemoveOutcome::Removed { lines })
            }
        }
    }

    /// Append a new block carrying `payload` to the file at `path`
    pub fn append_block(&self, path: &Path, payload: &[String]) -> Result<()> {
        let content = read_config(path)?;
        let updated = self.append_to(&content, payload);
        write_if_changed(path, &content, &updated)?;
        debug!("📝 Appended {}-line installer block to {:?}", payload.len() + 2, path);
        Ok(())
    }

    /// Remove any existing block, then append a fresh one, in a single write.
    ///
    /// A corrupt existing block aborts before anything is written.
    pub fn replace_block(&self, path: &Path, payload: &[String]) -> Result<RemoveOutcome> {
        let content = read_config(path)?;
        let (base, outcome) = match self.remove_from(&content, path)? {
            Some((kept, lines)) => (kept, RemoveOutcome::Removed { lines }),
            None => {
                debug!("No previous installer block in {:?}", path);
                (content.clone(), RemoveOutcome::NotFound)
            }
        };

        let updated = self.append_to(&base, payload);
        write_if_changed(path, &content, &updated)?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const START: &str = "# --- begin test block ---";
    const END: &str = "# --- end test block ---";

    fn block() -> OwnedBlock {
        OwnedBlock::new(START, END)
    }

    fn payload() -> Vec<String> {
        vec!["[all]".to_string(), "dtparam=spi=on".to_string()]
    }

    fn config_file(content: &str) -> (TempDir, std::path::PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.txt");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_locate_states() {
        let b = block();
        assert_eq!(b.locate("a\nb\n"), BlockLocation::Absent);
        assert_eq!(
            b.locate(&format!("a\n{START}\nx\n{END}\nb\n")),
            BlockLocation::Found { start: 1, end: 3 }
        );
        assert_eq!(
            b.locate(&format!("a\n{START}\nx\n")),
            BlockLocation::Unterminated { start: 1 }
        );
    }

    #[test]
    fn test_end_marker_before_start_is_unterminated() {
        let content = format!("{END}\na\n{START}\nx\n");
        assert_eq!(block().locate(&content), BlockLocation::Unterminated { start: 2 });
    }

    #[test]
    fn test_markers_must_match_whole_line() {
        let content = format!("  {START}\n{START} trailing\n");
        assert_eq!(block().locate(&content), BlockLocation::Absent);
    }

    #[test]
    fn test_crlf_markers_are_recognized() {
        let content = format!("a\r\n{START}\r\nx\r\n{END}\r\nb\r\n");
        let (kept, lines) = block()
            .remove_from(&content, Path::new("config.txt"))
            .unwrap()
            .unwrap();
        assert_eq!(kept, "a\r\nb\r\n");
        assert_eq!(lines, 3);
    }

    #[test]
    fn test_remove_without_block_leaves_file_identical() {
        let original = "a\nb\nno trailing newline";
        let (_dir, path) = config_file(original);

        assert_eq!(block().remove_block(&path).unwrap(), RemoveOutcome::NotFound);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_remove_corrupt_block_fails_without_writing() {
        let original = format!("a\n{START}\nx\ny\n");
        let (_dir, path) = config_file(&original);

        let err = block().remove_block(&path).unwrap_err();
        match err {
            InstallerError::CorruptBlock { start_line, .. } => assert_eq!(start_line, 2),
            other => panic!("expected CorruptBlock, got {other:?}"),
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_remove_deletes_inclusive_range_only() {
        let (_dir, path) = config_file(&format!("a\n{START}\nx\n{END}\nb\n"));

        let outcome = block().remove_block(&path).unwrap();
        assert_eq!(outcome, RemoveOutcome::Removed { lines: 3 });
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_remove_only_first_block() {
        let (_dir, path) = config_file(&format!("{START}\n1\n{END}\nmid\n{START}\n2\n{END}\n"));

        block().remove_block(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("mid\n{START}\n2\n{END}\n")
        );
    }

    #[test]
    fn test_append_then_remove_round_trips() {
        for original in ["", "a\n", "arm_freq=1500\n\n[pi4]\nx=1\n"] {
            let (_dir, path) = config_file(original);
            let b = block();

            b.append_block(&path, &payload()).unwrap();
            assert_ne!(fs::read_to_string(&path).unwrap(), original);
            assert_eq!(b.remove_block(&path).unwrap(), RemoveOutcome::Removed { lines: 4 });
            assert_eq!(fs::read_to_string(&path).unwrap(), original);
        }
    }

    #[test]
    fn test_round_trip_without_trailing_newline_keeps_separator() {
        // Upserts leave the last line unterminated; removal keeps the newline added before the block
        let original = "a\nb\n\nhdmi_mode=87";
        let (_dir, path) = config_file(original);
        let b = block();

        b.append_block(&path, &payload()).unwrap();
        b.remove_block(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("{original}\n")
        );

        b.append_block(&path, &payload()).unwrap();
        b.remove_block(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("{original}\n")
        );
    }

    #[test]
    fn test_append_preserves_prior_content() {
        let (_dir, path) = config_file("a\nb");
        block().append_block(&path, &payload()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("a\nb\n{START}\n[all]\ndtparam=spi=on\n{END}\n")
        );
    }

    #[test]
    fn test_replace_is_idempotent() {
        let (_dir, path) = config_file("a\n");
        let b = block();

        assert_eq!(b.replace_block(&path, &payload()).unwrap(), RemoveOutcome::NotFound);
        let once = fs::read_to_string(&path).unwrap();

        assert_eq!(
            b.replace_block(&path, &payload()).unwrap(),
            RemoveOutcome::Removed { lines: 4 }
        );
        let twice = fs::read_to_string(&path).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.matches(START).count(), 1);
    }

    #[test]
    fn test_replace_moves_block_to_end_with_new_payload() {
        let (_dir, path) = config_file(&format!("a\n{START}\nold\n{END}\nb\n"));

        block().replace_block(&path, &payload()).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            format!("a\nb\n{START}\n[all]\ndtparam=spi=on\n{END}\n")
        );
    }

    #[test]
    fn test_replace_refuses_corrupt_block() {
        let original = format!("a\n{START}\nold\n");
        let (_dir, path) = config_file(&original);

        assert!(block().replace_block(&path, &payload()).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
