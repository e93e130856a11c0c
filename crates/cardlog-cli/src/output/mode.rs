use crate::cli::Commands;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Add { json, .. }
        | Commands::List { json, .. }
        | Commands::Edit { json, .. }
        | Commands::Delete { json, .. }
        | Commands::Advance { json, .. }
        | Commands::Purge { json, .. }
        | Commands::Summary { json, .. } => *json,
    };

    if json {
        OutputMode::Json
    } else {
        OutputMode::Text
    }
}

#[cfg(test)]
mod tests {
    use super::{OutputMode, mode_for_command};
    use crate::cli::parse_from;

    #[test]
    fn mode_uses_json_with_json_flag() {
        for args in [
            vec!["cardlog", "list", "--json"],
            vec!["cardlog", "advance", "--months", "2", "--json"],
            vec!["cardlog", "purge", "--yes", "--json"],
            vec!["cardlog", "summary", "--json"],
        ] {
            let parsed = parse_from(args);
            assert!(parsed.is_ok());
            if let Ok(cli) = parsed {
                assert_eq!(mode_for_command(&cli.command), OutputMode::Json);
            }
        }
    }

    #[test]
    fn mode_uses_text_without_json_flag() {
        let parsed = parse_from(["cardlog", "delete", "3", "--yes"]);
        assert!(parsed.is_ok());
        if let Ok(cli) = parsed {
            assert_eq!(mode_for_command(&cli.command), OutputMode::Text);
        }
    }
}
