//! Dispatch and composition engine
//!
//! Every line ends up here: the classifier picks a [`Composition`], the
//! matching executor runs the command(s), and the text to display comes
//! back to the caller. Command failures are ordinary text at this level;
//! only [`ShellError::Exit`] travels up as an error.

use crate::ast::{Composition, Invocation, RedirectKind};
use crate::error::{ShellError, ShellResult};
use crate::help::help_text;
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::shell::Shell;

mod builtins_fs;
pub mod registry;

use builtins_fs::{
    cmd_cat, cmd_cd, cmd_ls, cmd_mkdir, cmd_mv, cmd_pwd, cmd_rm, cmd_rmdir, cmd_touch,
};
use registry::{Args, Builtin, OutputShape};

/// What a single command produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    pub text: String,
    pub is_error: bool,
    pub shape: OutputShape,
}

impl CommandResult {
    pub fn ok(text: impl Into<String>, shape: OutputShape) -> Self {
        Self {
            text: text.into(),
            is_error: false,
            shape,
        }
    }

    /// Errors always read as a status report.
    pub fn error(err: &ShellError) -> Self {
        Self {
            text: err.to_line(),
            is_error: true,
            shape: OutputShape::Status,
        }
    }
}

impl Shell {
    /// Execute one input line.
    ///
    /// Returns the text to show on the terminal, if any. Redirected output
    /// goes to its file and yields `None` unless the write failed.
    pub async fn execute(&mut self, line: &str) -> ShellResult<Option<String>> {
        let composition = match parse(line) {
            Ok(composition) => composition,
            Err(e) => return Ok(Some(e.to_line())),
        };
        tracing::debug!(%composition, "Classified line");

        let output = match composition {
            Composition::Pipe(segments) => self.execute_pipeline(&segments).await?,
            Composition::Redirect {
                command,
                target,
                kind,
            } => self.execute_redirect(&command, &target, kind).await?,
            Composition::Plain(command) => self.dispatch(&command, "").await?.text,
        };

        Ok((!output.is_empty()).then_some(output))
    }

    /// Run segments in order, each stage's text becoming the next stage's
    /// piped input. Returns the last stage's text.
    pub async fn execute_pipeline(&mut self, segments: &[String]) -> ShellResult<String> {
        let mut previous = String::new();
        for segment in segments {
            previous = self.dispatch(segment, &previous).await?.text;
        }
        Ok(previous)
    }

    /// Run one command with no piped input and send its text to `target`.
    /// Returns an error line when the write fails, empty text otherwise.
    pub async fn execute_redirect(
        &mut self,
        command: &str,
        target: &str,
        kind: RedirectKind,
    ) -> ShellResult<String> {
        let result = self.dispatch(command, "").await?;
        let path = self.session.resolve(target);

        match self.fs().write_text(&path, &result.text, kind.write_mode()).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), mode = kind.operator(), "Redirected output");
                Ok(String::new())
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Redirect failed");
                Ok(ShellError::Io(format!("{target}: {e}")).to_line())
            }
        }
    }

    /// Resolve one command segment and run it.
    ///
    /// `piped` replaces the segment's own parameters when non-empty, except
    /// for commands that always read their own argument (`cat`).
    pub async fn dispatch(&mut self, segment: &str, piped: &str) -> ShellResult<CommandResult> {
        let Invocation { name, params } = tokenize(segment);
        let Some(builtin) = Builtin::from_name(&name) else {
            tracing::debug!(command = %name, "Unknown command");
            return Ok(CommandResult::error(&ShellError::UnknownCommand(name)));
        };

        let spec = builtin.spec();
        let params = builtin.effective_params(&params, piped);
        let args = match spec.arity.parse(params) {
            Ok(args) => args,
            Err(e) => return Ok(CommandResult::error(&e)),
        };
        tracing::debug!(command = spec.name, ?args, piped = !piped.is_empty(), "Dispatching");

        match self.run_builtin(builtin, args).await {
            Ok(text) => Ok(CommandResult::ok(text, spec.output)),
            Err(ShellError::Exit(code)) => Err(ShellError::Exit(code)),
            Err(e) => {
                tracing::debug!(command = spec.name, error = ?e, "Command failed");
                Ok(CommandResult::error(&e))
            }
        }
    }

    async fn run_builtin(&mut self, builtin: Builtin, args: Args<'_>) -> ShellResult<String> {
        let fs = self.fs();
        let fs = fs.as_ref();
        match (builtin, args) {
            (Builtin::Help, _) => Ok(help_text()),
            (Builtin::Pwd, _) => Ok(cmd_pwd(&self.session)),
            (Builtin::Exit, _) => Err(ShellError::Exit(0)),
            (Builtin::Cd, Args::One(dir)) => cmd_cd(fs, &mut self.session, dir).await,
            (Builtin::Ls, Args::Flags(flags)) => cmd_ls(fs, &self.session, &flags).await,
            (Builtin::Mkdir, Args::One(dir)) => cmd_mkdir(fs, &self.session, dir).await,
            (Builtin::Rmdir, Args::One(dir)) => cmd_rmdir(fs, &self.session, dir).await,
            (Builtin::Touch, Args::One(file)) => cmd_touch(fs, &self.session, file).await,
            (Builtin::Mv, Args::Two(source, destination)) => {
                cmd_mv(fs, &self.session, source, destination).await
            }
            (Builtin::Rm, Args::One(file)) => cmd_rm(fs, &self.session, file).await,
            (Builtin::Cat, Args::One(file)) => cmd_cat(fs, &self.session, file).await,
            (builtin, args) => Err(ShellError::Usage(format!(
                "{}: unexpected arguments {args:?}",
                builtin.name()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::Session;
    use tempfile::TempDir;

    fn shell_in(temp: &TempDir) -> Shell {
        Shell::new(Session::new(temp.path()))
    }

    #[tokio::test]
    async fn test_unknown_command_is_error_text() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let result = shell.dispatch("foo bar", "").await.unwrap();
        assert!(result.is_error);
        assert_eq!(result.text, "$[error]> Unknown command: foo");
        assert_eq!(result.shape, OutputShape::Status);
    }

    #[tokio::test]
    async fn test_results_carry_declared_shape() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let cwd = shell.dispatch("pwd", "").await.unwrap();
        assert_eq!(cwd.shape, OutputShape::Text);

        let created = shell.dispatch("touch notes.txt", "").await.unwrap();
        assert_eq!(created, CommandResult::ok("File created: notes.txt", OutputShape::Status));
    }

    #[tokio::test]
    async fn test_arity_is_checked_before_running() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);
        std::fs::write(temp.path().join("a"), "x").unwrap();

        let out = shell.execute("mv a b c").await.unwrap();
        assert_eq!(out.as_deref(), Some("$[error]> Please provide source and destination."));
        assert!(temp.path().join("a").is_file());

        let out = shell.execute("ls docs").await.unwrap();
        assert_eq!(out.as_deref(), Some("$[error]> Unknown option: docs"));

        let out = shell.execute("rmdir").await.unwrap();
        assert_eq!(out.as_deref(), Some("$[error]> Please specify a directory name."));
    }

    #[tokio::test]
    async fn test_empty_segment_is_unknown_command() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let result = shell.dispatch("", "").await.unwrap();
        assert!(result.is_error);
        assert_eq!(result.text, "$[error]> Unknown command: ");
    }

    #[tokio::test]
    async fn test_exit_propagates() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        assert_eq!(shell.execute("exit").await, Err(ShellError::Exit(0)));
        assert_eq!(shell.execute("pwd | exit").await, Err(ShellError::Exit(0)));
    }

    #[tokio::test]
    async fn test_plain_output() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let out = shell.execute("pwd").await.unwrap();
        assert_eq!(out, Some(temp.path().display().to_string()));
    }

    #[tokio::test]
    async fn test_pipe_overrides_declared_params() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);
        std::fs::write(temp.path().join("name.txt"), "fresh\n").unwrap();

        let out = shell.execute("cat name.txt | mkdir ignored").await.unwrap();
        assert_eq!(out.as_deref(), Some("Directory created: fresh"));
        assert!(temp.path().join("fresh").is_dir());
        assert!(!temp.path().join("ignored").exists());
    }

    #[tokio::test]
    async fn test_pwd_piped_into_mkdir_targets_pwd_output() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        // `pwd` yields an absolute path, and joining an absolute path onto the
        // cwd replaces it, so mkdir targets the existing cwd itself.
        let out = shell.execute("pwd | mkdir ignored").await.unwrap().unwrap();
        assert!(out.starts_with("$[error]> Directory already exists: "));
        assert!(out.ends_with(&temp.path().display().to_string()));
        assert!(!temp.path().join("ignored").exists());
    }

    #[tokio::test]
    async fn test_cat_ignores_piped_text() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);
        std::fs::write(temp.path().join("a"), "from a").unwrap();
        std::fs::write(temp.path().join("b"), "from b").unwrap();

        let out = shell.execute("cat a | cat b").await.unwrap();
        assert_eq!(out.as_deref(), Some("from b"));

        let out = shell.execute("pwd | cat").await.unwrap().unwrap();
        assert_eq!(out, "$[error]> Please specify a file name.");
    }

    #[tokio::test]
    async fn test_mv_reads_two_names_from_pipe() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);
        std::fs::write(temp.path().join("plan"), "old.txt new.txt").unwrap();
        std::fs::write(temp.path().join("old.txt"), "x").unwrap();

        let out = shell.execute("cat plan | mv").await.unwrap();
        assert_eq!(out.as_deref(), Some("File moved from old.txt to new.txt"));
        assert!(temp.path().join("new.txt").is_file());
    }

    #[tokio::test]
    async fn test_empty_tail_output_is_swallowed() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        std::fs::write(temp.path().join("empty.txt"), "").unwrap();

        assert_eq!(shell.execute("pwd | cat empty.txt").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_error_text_flows_through_pipeline() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let out = shell.execute("foo | touch").await.unwrap().unwrap();
        assert_eq!(out, "File created: $[error]> Unknown command: foo");
    }

    #[tokio::test]
    async fn test_redirect_overwrite_and_append() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);
        let cwd = temp.path().display().to_string();

        assert_eq!(shell.execute("pwd > out.txt").await.unwrap(), None);
        assert_eq!(shell.execute("pwd >> out.txt").await.unwrap(), None);
        let written = std::fs::read_to_string(temp.path().join("out.txt")).unwrap();
        assert_eq!(written, format!("{cwd}{cwd}"));

        assert_eq!(shell.execute("pwd > out.txt").await.unwrap(), None);
        let written = std::fs::read_to_string(temp.path().join("out.txt")).unwrap();
        assert_eq!(written, cwd);
    }

    #[tokio::test]
    async fn test_redirect_captures_status_lines() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);
        std::fs::write(temp.path().join("junk"), "").unwrap();

        assert_eq!(shell.execute("rm junk > log").await.unwrap(), None);
        let log = std::fs::read_to_string(temp.path().join("log")).unwrap();
        assert_eq!(log, "File removed: junk");
    }

    #[tokio::test]
    async fn test_redirect_write_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let out = shell.execute("pwd > missing/dir/out.txt").await.unwrap().unwrap();
        assert!(out.starts_with("$[error]> missing/dir/out.txt: "));
    }

    #[tokio::test]
    async fn test_redirect_missing_target_is_usage_error() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let out = shell.execute("pwd >").await.unwrap();
        assert_eq!(out.as_deref(), Some("$[error]> Please specify a target file."));
    }

    #[tokio::test]
    async fn test_session_survives_errors() {
        let temp = TempDir::new().unwrap();
        let mut shell = shell_in(&temp);

        let out = shell.execute("foo").await.unwrap().unwrap();
        assert!(out.contains("foo"));
        assert!(shell.execute("pwd").await.unwrap().is_some());
    }
}
