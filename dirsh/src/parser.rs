//! Composition classifier
//!
//! Decides which single directive applies to a line. Priority is `|`, then
//! `>>`, then `>`; anything an earlier directive leaves behind is plain
//! argument text.

use crate::ast::{Composition, RedirectKind};
use crate::error::{ShellError, ShellResult};

const PIPE: char = '|';

/// Classify a raw input line.
pub fn parse(line: &str) -> ShellResult<Composition> {
    let line = line.trim();

    if line.contains(PIPE) {
        let segments = line.split(PIPE).map(|s| s.trim().to_string()).collect();
        return Ok(Composition::Pipe(segments));
    }

    for kind in [RedirectKind::Append, RedirectKind::Overwrite] {
        if let Some((command, target)) = line.split_once(kind.operator()) {
            let target = target.trim();
            if target.is_empty() {
                return Err(ShellError::Usage("Please specify a target file.".to_string()));
            }
            return Ok(Composition::Redirect {
                command: command.trim().to_string(),
                target: target.to_string(),
                kind,
            });
        }
    }

    Ok(Composition::Plain(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redirect(command: &str, target: &str, kind: RedirectKind) -> Composition {
        Composition::Redirect {
            command: command.to_string(),
            target: target.to_string(),
            kind,
        }
    }

    #[test]
    fn test_plain() {
        assert_eq!(parse("  pwd ").unwrap(), Composition::Plain("pwd".into()));
    }

    #[test]
    fn test_pipe_segments_are_trimmed() {
        assert_eq!(
            parse("pwd |  mkdir x ").unwrap(),
            Composition::Pipe(vec!["pwd".into(), "mkdir x".into()])
        );
    }

    #[test]
    fn test_empty_pipe_segments_are_kept() {
        assert_eq!(
            parse("pwd || cat f |").unwrap(),
            Composition::Pipe(vec!["pwd".into(), String::new(), "cat f".into(), String::new()])
        );
    }

    #[test]
    fn test_overwrite() {
        assert_eq!(
            parse("pwd > out.txt").unwrap(),
            redirect("pwd", "out.txt", RedirectKind::Overwrite)
        );
    }

    #[test]
    fn test_append_beats_overwrite() {
        assert_eq!(
            parse("pwd>>out.txt").unwrap(),
            redirect("pwd", "out.txt", RedirectKind::Append)
        );
    }

    #[test]
    fn test_pipe_beats_redirect() {
        assert_eq!(
            parse("pwd > a | cat b").unwrap(),
            Composition::Pipe(vec!["pwd > a".into(), "cat b".into()])
        );
    }

    #[test]
    fn test_redirect_splits_on_first_operator_only() {
        assert_eq!(
            parse("pwd >> a >> b").unwrap(),
            redirect("pwd", "a >> b", RedirectKind::Append)
        );
    }

    #[test]
    fn test_missing_target_is_usage_error() {
        assert!(matches!(parse("pwd >"), Err(ShellError::Usage(_))));
        assert!(matches!(parse("pwd >>   "), Err(ShellError::Usage(_))));
    }

    #[test]
    fn test_redirect_without_command_keeps_empty_command() {
        assert_eq!(
            parse("> out.txt").unwrap(),
            redirect("", "out.txt", RedirectKind::Overwrite)
        );
    }
}
