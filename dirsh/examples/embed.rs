//! Embed dirsh in your Rust application with a custom filesystem backend.
//!
//! The backend below lets every read through to the local disk and refuses
//! every mutation, so the session can browse but never change anything.
//!
//! Run:  cargo run -p dirsh --example embed

use async_trait::async_trait;
use dirsh::fs::DirEntry;
use dirsh::{FileSystem, LocalFs, Session, Shell, ShellError, WriteMode};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

struct ReadOnlyFs(LocalFs);

fn denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "read-only session")
}

#[async_trait]
impl FileSystem for ReadOnlyFs {
    async fn create_dir(&self, _path: &Path) -> io::Result<()> {
        Err(denied())
    }

    async fn remove_empty_dir(&self, _path: &Path) -> io::Result<()> {
        Err(denied())
    }

    async fn create_file(&self, _path: &Path) -> io::Result<()> {
        Err(denied())
    }

    async fn remove_file(&self, _path: &Path) -> io::Result<()> {
        Err(denied())
    }

    async fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
        Err(denied())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        self.0.read_to_string(path).await
    }

    async fn write_text(&self, _path: &Path, _content: &str, _mode: WriteMode) -> io::Result<()> {
        Err(denied())
    }

    async fn list_dir(&self, path: &Path) -> io::Result<Vec<DirEntry>> {
        self.0.list_dir(path).await
    }

    async fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        self.0.canonicalize(path).await
    }

    async fn exists(&self, path: &Path) -> bool {
        self.0.exists(path).await
    }

    async fn is_dir(&self, path: &Path) -> bool {
        self.0.is_dir(path).await
    }

    async fn is_file(&self, path: &Path) -> bool {
        self.0.is_file(path).await
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(std::env::current_dir()?);
    let mut shell = Shell::with_fs(session, Arc::new(ReadOnlyFs(LocalFs)));

    println!("dirsh embedded demo (read-only)");
    for line in ["pwd", "ls", "mkdir scratch", "pwd > cwd.txt", "ls | cat Cargo.toml", "exit"] {
        println!("\n$> {line}");
        match shell.execute(line).await {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => println!("<no output>"),
            Err(ShellError::Exit(code)) => {
                println!("exit requested with code {code}");
                break;
            }
            Err(e) => println!("{}", e.to_line()),
        }
    }

    for line in ["pwd", "touch scratch.txt"] {
        let result = shell.dispatch(line, "").await?;
        println!("\n{line}: {:?} -> {}", result.shape, result.text);
    }

    Ok(())
}
