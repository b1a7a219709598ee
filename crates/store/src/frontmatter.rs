//! Task file format: YAML frontmatter followed by a markdown body.
//!
//! ```text
//! ---
//! id: 12
//! title: Refactor I/O layer
//! status: todo
//! ---
//!
//! Body text.
//! ```

use std::path::Path;

use taskwatch_protocol::{Task, TaskId};

use crate::error::{Result, StoreError};

const OPENING: &str = "---\n";
const CLOSING: &str = "\n---\n";
const CLOSING_AT_EOF: &str = "\n---";
const MAX_SLUG_LEN: usize = 50;

/// Splits file content into frontmatter and body.
///
/// The body has leading blank lines removed.
///
/// # Errors
///
/// Returns the reason the content is not a task file.
pub fn split(content: &str) -> std::result::Result<(&str, &str), &'static str> {
    let Some(rest) = content.strip_prefix(OPENING) else {
        return Err("file does not start with ---");
    };

    if let Some(idx) = rest.find(CLOSING) {
        let body = rest[idx + CLOSING.len()..].trim_start_matches('\n');
        return Ok((&rest[..idx], body));
    }
    if let Some(frontmatter) = rest.strip_suffix(CLOSING_AT_EOF) {
        return Ok((frontmatter, ""));
    }
    Err("missing closing ---")
}

/// Parses a task from file content. `path` is only used in errors.
///
/// # Errors
///
/// Returns an error if the frontmatter is missing or not valid task YAML.
pub fn parse(path: &Path, content: &str) -> Result<Task> {
    let (frontmatter, body) = split(content).map_err(|reason| StoreError::Frontmatter {
        path: path.to_path_buf(),
        reason,
    })?;

    let mut task: Task = serde_yaml::from_str(frontmatter).map_err(|e| StoreError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })?;
    task.body = body.to_string();
    Ok(task)
}

/// Renders a task back into file content.
///
/// # Errors
///
/// Returns an error if the task cannot be serialized.
pub fn render(task: &Task) -> Result<String> {
    let yaml = serde_yaml::to_string(task).map_err(|e| StoreError::Serialize {
        id: task.id,
        source: e,
    })?;

    let mut out = String::with_capacity(yaml.len() + task.body.len() + 16);
    out.push_str(OPENING);
    out.push_str(&yaml);
    if !yaml.ends_with('\n') {
        out.push('\n');
    }
    out.push_str("---\n");
    if !task.body.is_empty() {
        out.push('\n');
        out.push_str(&task.body);
        if !task.body.ends_with('\n') {
            out.push('\n');
        }
    }
    Ok(out)
}

/// Reads a task file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn read_task(path: &Path) -> Result<Task> {
    let content = std::fs::read_to_string(path).map_err(|e| StoreError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(path, &content)
}

/// Writes a task file, replacing any previous content.
///
/// # Errors
///
/// Returns an error if the task cannot be serialized or written.
pub fn write_task(path: &Path, task: &Task) -> Result<()> {
    let content = render(task)?;
    std::fs::write(path, content).map_err(|e| StoreError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Returns the numeric prefix of a `<id>-<slug>.md` file name.
///
/// # Examples
///
/// ```
/// use taskwatch_store::frontmatter::id_from_file_name;
///
/// assert_eq!(id_from_file_name("007-ship-it.md"), Some(7));
/// assert_eq!(id_from_file_name("notes.md"), None);
/// ```
#[must_use]
pub fn id_from_file_name(name: &str) -> Option<TaskId> {
    let (prefix, _) = name.split_once('-')?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    prefix.parse().ok()
}

/// Builds the file name for a new task: zero-padded ID and a title slug.
///
/// # Examples
///
/// ```
/// use taskwatch_store::frontmatter::file_name;
///
/// assert_eq!(file_name(7, "Refactor I/O layer!"), "007-refactor-i-o-layer.md");
/// assert_eq!(file_name(1234, "x"), "1234-x.md");
/// ```
#[must_use]
pub fn file_name(id: TaskId, title: &str) -> String {
    format!("{id:03}-{}.md", slug(title))
}

fn slug(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');

    if slug.len() <= MAX_SLUG_LEN {
        return slug.to_string();
    }
    let cut = &slug[..MAX_SLUG_LEN];
    let cut = if slug.as_bytes()[MAX_SLUG_LEN] == b'-' {
        cut
    } else {
        cut.rfind('-').filter(|&i| i > 0).map_or(cut, |i| &cut[..i])
    };
    cut.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use taskwatch_protocol::Priority;

    fn path() -> PathBuf {
        PathBuf::from("001-test.md")
    }

    #[test]
    fn split_with_body() {
        let (fm, body) = split("---\nid: 1\n---\n\n\nHello\n").unwrap();
        assert_eq!(fm, "id: 1");
        assert_eq!(body, "Hello\n");
    }

    #[test]
    fn split_closing_at_eof() {
        let (fm, body) = split("---\nid: 1\n---").unwrap();
        assert_eq!(fm, "id: 1");
        assert_eq!(body, "");
    }

    #[test]
    fn split_rejects_missing_markers() {
        assert!(split("id: 1\n").is_err());
        assert!(split("---\nid: 1\n").is_err());
    }

    #[test]
    fn parse_full_frontmatter() {
        let content = "---\n\
id: 12\n\
title: Refactor I/O layer\n\
status: in-progress\n\
priority: high\n\
created: 2025-01-15T10:30:00Z\n\
updated: 2025-01-16T08:00:00Z\n\
assignee: sam\n\
tags:\n  - api\n\
due: 2025-02-01\n\
blocked: true\n\
claimed_by: agent-7\n\
---\n\nLine one\\nLine two\n";
        let task = parse(&path(), content).unwrap();

        assert_eq!(task.id, 12);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.assignee.as_deref(), Some("sam"));
        assert_eq!(task.tags, vec!["api"]);
        assert!(task.blocked);
        assert_eq!(task.claimed_by.as_deref(), Some("agent-7"));
        assert_eq!(task.due.map(|d| d.to_string()).as_deref(), Some("2025-02-01"));
        assert_eq!(task.body, "Line one\\nLine two\n");
    }

    #[test]
    fn parse_reports_yaml_errors() {
        let err = parse(&path(), "---\nid: [oops\n---\n").unwrap_err();
        assert!(matches!(err, StoreError::Yaml { .. }));
    }

    #[test]
    fn render_then_parse_preserves_task() {
        let task = Task::new(3, "Write docs", "todo")
            .with_tags(["docs"])
            .with_body("Some body");
        let content = render(&task).unwrap();
        assert!(content.starts_with("---\nid: 3\n"));
        assert!(content.ends_with("---\n\nSome body\n"));

        let back = parse(&path(), &content).unwrap();
        assert_eq!(back.title, task.title);
        assert_eq!(back.tags, task.tags);
        assert_eq!(back.body, "Some body\n");
    }

    #[test]
    fn render_omits_empty_optionals() {
        let content = render(&Task::new(1, "Bare", "todo")).unwrap();
        assert!(!content.contains("assignee"));
        assert!(!content.contains("blocked"));
        assert!(!content.contains("tags"));
    }

    #[test]
    fn id_prefix_ignores_leading_zeros() {
        assert_eq!(id_from_file_name("0042-answer.md"), Some(42));
        assert_eq!(id_from_file_name("-x.md"), None);
        assert_eq!(id_from_file_name("v1-x.md"), None);
    }

    #[test]
    fn long_slugs_break_at_word_boundary() {
        let title = "a very long title that keeps going and going well past the limit";
        let name = file_name(1, title);
        let slug = name.trim_start_matches("001-").trim_end_matches(".md");
        assert!(slug.len() <= MAX_SLUG_LEN);
        assert!(!slug.ends_with('-'));
        assert!(title.replace(' ', "-").starts_with(slug));
    }
}
