use std::io;

use crate::error::{ShellError, ShellResult};
use crate::fs::FileSystem;
use crate::shell::Session;

pub(super) fn cmd_pwd(session: &Session) -> String {
    session.cwd_display()
}

pub(super) async fn cmd_cd(
    fs: &dyn FileSystem,
    session: &mut Session,
    dir: &str,
) -> ShellResult<String> {
    let target = session.resolve(dir);
    if !fs.is_dir(&target).await {
        return Err(ShellError::NotFound(format!("No such directory: {dir}")));
    }

    let target = fs
        .canonicalize(&target)
        .await
        .map_err(|e| ShellError::Io(format!("{dir}: {e}")))?;
    session.cwd = target;
    Ok(format!("Current directory: {}", session.cwd_display()))
}

pub(super) async fn cmd_ls(
    fs: &dyn FileSystem,
    session: &Session,
    flags: &[&str],
) -> ShellResult<String> {
    let mut show_hidden = false;
    let mut reverse = false;
    for flag in flags {
        for letter in flag.chars().skip(1) {
            match letter {
                'a' => show_hidden = true,
                'r' => reverse = true,
                _ => return Err(ShellError::Usage(format!("Unknown option: {flag}"))),
            }
        }
    }

    let entries = fs
        .list_dir(&session.cwd)
        .await
        .map_err(|e| ShellError::Io(e.to_string()))?;
    let mut names: Vec<String> = entries
        .into_iter()
        .filter(|e| show_hidden || !e.name.starts_with('.'))
        .map(|e| if e.is_dir { format!("{}/", e.name) } else { e.name })
        .collect();
    if reverse {
        names.reverse();
    }
    Ok(names.join("\n"))
}

pub(super) async fn cmd_mkdir(
    fs: &dyn FileSystem,
    session: &Session,
    dir: &str,
) -> ShellResult<String> {
    match fs.create_dir(&session.resolve(dir)).await {
        Ok(()) => Ok(format!("Directory created: {dir}")),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(ShellError::AlreadyExists(
            format!("Directory already exists: {dir}"),
        )),
        Err(e) => Err(ShellError::OperationFailed(format!(
            "Directory cannot be created: {dir}: {e}"
        ))),
    }
}

pub(super) async fn cmd_rmdir(
    fs: &dyn FileSystem,
    session: &Session,
    dir: &str,
) -> ShellResult<String> {
    let path = session.resolve(dir);
    if !fs.is_dir(&path).await {
        return Err(ShellError::NotFound(format!("No such directory: {dir}")));
    }

    fs.remove_empty_dir(&path).await.map_err(|e| {
        ShellError::OperationFailed(format!("Directory could not be removed: {dir}: {e}"))
    })?;
    Ok(format!("Directory removed: {dir}"))
}

pub(super) async fn cmd_touch(
    fs: &dyn FileSystem,
    session: &Session,
    file: &str,
) -> ShellResult<String> {
    match fs.create_file(&session.resolve(file)).await {
        Ok(()) => Ok(format!("File created: {file}")),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            Err(ShellError::AlreadyExists(format!("File already exists: {file}")))
        }
        Err(e) => Err(ShellError::Io(format!(
            "An error occurred while creating the file: {file}: {e}"
        ))),
    }
}

pub(super) async fn cmd_mv(
    fs: &dyn FileSystem,
    session: &Session,
    source: &str,
    destination: &str,
) -> ShellResult<String> {
    let from = session.resolve(source);
    if !fs.exists(&from).await {
        return Err(ShellError::NotFound(format!(
            "Source file does not exist: {source}"
        )));
    }

    let mut to = session.resolve(destination);
    if fs.is_dir(&to).await {
        if let Some(name) = from.file_name() {
            to.push(name);
        }
    }

    fs.rename(&from, &to).await.map_err(|e| {
        ShellError::OperationFailed(format!("Failed to move file: {source}: {e}"))
    })?;
    Ok(format!("File moved from {source} to {destination}"))
}

pub(super) async fn cmd_rm(
    fs: &dyn FileSystem,
    session: &Session,
    file: &str,
) -> ShellResult<String> {
    let path = session.resolve(file);
    if !fs.exists(&path).await {
        return Err(ShellError::NotFound(format!("File does not exist: {file}")));
    }

    fs.remove_file(&path).await.map_err(|e| {
        ShellError::OperationFailed(format!("Failed to remove file: {file}: {e}"))
    })?;
    Ok(format!("File removed: {file}"))
}

pub(super) async fn cmd_cat(
    fs: &dyn FileSystem,
    session: &Session,
    file: &str,
) -> ShellResult<String> {
    let path = session.resolve(file);
    if !fs.is_file(&path).await {
        return Err(ShellError::NotFound(format!("File does not exist: {file}")));
    }

    let content = fs
        .read_to_string(&path)
        .await
        .map_err(|e| ShellError::Io(e.to_string()))?;
    Ok(content.trim_end().to_string())
}
