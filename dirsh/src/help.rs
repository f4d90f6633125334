use crate::eval::registry::COMMANDS;

pub struct CommandHelp {
    pub usage: &'static str,
    pub summary: &'static str,
}

const DIRECTIVES: &[(&str, &str)] = &[
    (">", "overwrite file with output"),
    (">>", "append output to file"),
    ("|", "pipe output into the next command"),
];

/// Text printed by the `help` command.
pub fn help_text() -> String {
    let mut out = String::from("Available commands:\n");
    for spec in COMMANDS {
        out.push_str(&format!(" {}: {}\n", spec.help.usage, spec.help.summary));
    }
    out.push_str(" =============================\n");
    out.push_str(" Optional directives:\n");
    let directives: Vec<String> = DIRECTIVES
        .iter()
        .map(|(op, what)| format!(" {op} [{what}]"))
        .collect();
    out.push_str(&directives.join("\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lists_every_command() {
        let text = help_text();
        for spec in COMMANDS {
            assert!(text.contains(spec.help.usage), "missing {}", spec.name);
        }
    }

    #[test]
    fn test_help_lists_directives() {
        let text = help_text();
        assert!(text.contains(" > [overwrite"));
        assert!(text.contains(" >> [append"));
        assert!(text.ends_with(" | [pipe output into the next command]"));
    }
}
