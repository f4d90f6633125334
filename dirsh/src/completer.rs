use dirsh::eval::registry::command_names;
use dirsh::FileSystem;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

pub struct DirshHelper {
    pub fs: Arc<dyn FileSystem>,
    pub cwd: Arc<RwLock<PathBuf>>,
    pub runtime: tokio::runtime::Handle,
}

impl DirshHelper {
    pub fn new(fs: Arc<dyn FileSystem>, cwd: Arc<RwLock<PathBuf>>) -> Self {
        Self {
            fs,
            cwd,
            runtime: tokio::runtime::Handle::current(),
        }
    }

    fn complete_path(&self, word: &str) -> Vec<Pair> {
        let cwd = match self.cwd.read() {
            Ok(guard) => guard.clone(),
            Err(_) => return vec![],
        };

        let (dir_prefix, partial) = match word.rfind('/') {
            Some(last_slash) => word.split_at(last_slash + 1),
            None => ("", word),
        };
        let dir = cwd.join(dir_prefix);

        let fs = Arc::clone(&self.fs);
        let entries = tokio::task::block_in_place(|| {
            self.runtime.block_on(async { fs.list_dir(&dir).await })
        })
        .unwrap_or_default();

        entries
            .into_iter()
            .filter(|e| e.name.starts_with(partial))
            .map(|e| {
                let name = if e.is_dir { format!("{}/", e.name) } else { e.name };
                Pair {
                    replacement: format!("{dir_prefix}{name}"),
                    display: name,
                }
            })
            .collect()
    }
}

impl Completer for DirshHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line_to_cursor = &line[..pos];
        let (start, word) = find_word_start(line_to_cursor);

        let is_first_word = line_to_cursor[..start]
            .chars()
            .rev()
            .find(|c| !c.is_whitespace())
            .map_or(true, |c| c == '|');

        let completions = if is_first_word {
            command_names()
                .filter(|name| name.starts_with(word))
                .map(|name| Pair {
                    display: name.to_string(),
                    replacement: name.to_string(),
                })
                .collect()
        } else {
            self.complete_path(word)
        };

        Ok((start, completions))
    }
}

fn find_word_start(line: &str) -> (usize, &str) {
    let mut start = line.len();
    for (i, c) in line.char_indices().rev() {
        if c.is_whitespace() || c == '|' || c == '>' {
            break;
        }
        start = i;
    }
    (start, &line[start..])
}

impl Hinter for DirshHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for DirshHelper {
    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Borrowed(hint)
    }
}

impl Validator for DirshHelper {}

impl Helper for DirshHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_start_stops_at_operators() {
        assert_eq!(find_word_start("pwd | mk"), (6, "mk"));
        assert_eq!(find_word_start("pwd >out"), (5, "out"));
        assert_eq!(find_word_start("cat "), (4, ""));
    }
}
