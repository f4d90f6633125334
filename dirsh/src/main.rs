use clap::Parser;
use dirsh::{Session, Shell, ShellError, FAREWELL};
use dirsh_config::{DirshConfig, LogFormat, ShellConfig};
use std::io::{IsTerminal, Write};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use tokio::io::{AsyncBufReadExt, BufReader};

mod completer;

/// dirsh - Interactive shell for everyday directory and file chores
#[derive(Parser, Debug)]
#[command(name = "dirsh", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(long, env = "DIRSH_CONFIG")]
    config: Option<String>,

    /// Start in this directory instead of the current one
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Execute command and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Script file to execute, one command per line
    script: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => dirsh_config::load_from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: Failed to load config from {path}: {e}");
            std::process::exit(1);
        }),
        None => dirsh_config::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config: {e}, using defaults");
            DirshConfig::default()
        }),
    };

    init_logging(&config);

    let session = match &args.dir {
        Some(dir) => Session::new(std::fs::canonicalize(dir).map_err(|e| {
            format!("cannot use '{}' as working directory: {e}", dir.display())
        })?),
        None => Session::from_current_dir()?,
    };
    tracing::debug!(cwd = %session.cwd_display(), "Session started");
    let mut shell = Shell::new(session);

    let code = if let Some(command) = args.command {
        match run_line(&mut shell, &command).await {
            ControlFlow::Break(code) => code,
            ControlFlow::Continue(()) => 0,
        }
    } else if let Some(script_path) = args.script {
        match std::fs::read_to_string(&script_path) {
            Ok(content) => run_script(&mut shell, &content).await,
            Err(e) => {
                eprintln!("dirsh: cannot read '{script_path}': {e}");
                1
            }
        }
    } else if std::io::stdin().is_terminal() {
        run_repl(&mut shell, &config.shell).await?
    } else {
        run_piped(&mut shell, &config.shell).await
    };

    std::process::exit(code);
}

fn init_logging(config: &DirshConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.directive()));

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter);
    match config.logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

/// Execute one line and print what it produced.
async fn run_line(shell: &mut Shell, line: &str) -> ControlFlow<i32> {
    match shell.execute(line).await {
        Ok(Some(output)) => {
            println!("{output}");
            ControlFlow::Continue(())
        }
        Ok(None) => ControlFlow::Continue(()),
        Err(ShellError::Exit(code)) => {
            println!("{FAREWELL}");
            ControlFlow::Break(code)
        }
        Err(e) => {
            eprintln!("{}", e.to_line());
            ControlFlow::Continue(())
        }
    }
}

/// Run every line of a script as if typed. Reaching the end of the file
/// without `exit` counts as success.
async fn run_script(shell: &mut Shell, content: &str) -> i32 {
    for line in content.lines().map(str::trim) {
        if let ControlFlow::Break(code) = run_line(shell, line).await {
            return code;
        }
    }
    0
}

/// Line loop for non-terminal stdin. The session only ends cleanly through
/// `exit`; running out of input is a failure.
async fn run_piped(shell: &mut Shell, shell_config: &ShellConfig) -> i32 {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}", shell_config.render_prompt(&shell.session.cwd_display()));
        let _ = std::io::stdout().flush();

        match lines.next_line().await {
            Ok(Some(line)) => {
                if let ControlFlow::Break(code) = run_line(shell, line.trim()).await {
                    return code;
                }
            }
            Ok(None) => {
                println!();
                tracing::debug!("Input closed before exit");
                return 1;
            }
            Err(e) => {
                eprintln!("Error: {e}");
                return 1;
            }
        }
    }
}

async fn run_repl(
    shell: &mut Shell,
    shell_config: &ShellConfig,
) -> Result<i32, Box<dyn std::error::Error>> {
    use completer::DirshHelper;
    use rustyline::error::ReadlineError;
    use rustyline::{CompletionType, Config, Editor};

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(shell_config.history.max_entries)?
        .history_ignore_dups(true)?
        .history_ignore_space(true)
        .build();

    let cwd = Arc::new(RwLock::new(shell.session.cwd.clone()));
    let helper = DirshHelper::new(shell.fs(), Arc::clone(&cwd));

    let mut rl = Editor::with_config(rl_config)?;
    rl.set_helper(Some(helper));

    let history_path = shell_config
        .history
        .enabled
        .then(|| shell_config.history.path());
    if let Some(path) = &history_path {
        let _ = rl.load_history(path);
    }

    if shell_config.banner {
        println!("dirsh v{}", env!("CARGO_PKG_VERSION"));
        println!("Type 'exit' to quit, 'help' for help.");
        println!();
    }

    let code = loop {
        if let Ok(mut cwd_guard) = cwd.write() {
            cwd_guard.clone_from(&shell.session.cwd);
        }

        let prompt = shell_config.render_prompt(&shell.session.cwd_display());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    let _ = rl.add_history_entry(line);
                }

                if let ControlFlow::Break(code) = run_line(shell, line).await {
                    break code;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                break 1;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break 1;
            }
        }
    };

    if let Some(path) = &history_path {
        if let Err(e) = rl.save_history(path) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to save history");
        }
    }

    Ok(code)
}
