use keyrole_types::{AssistKind, CategoryFilter, UiCommand, ViewMode, WordId};

fn parse_id(arg: Option<&str>, usage: &str) -> Result<WordId, String> {
    let arg = arg.ok_or_else(|| format!("Usage: {usage}"))?;
    arg.parse()
        .map_err(|_| format!("'{arg}' is not a word id. Usage: {usage}"))
}

/// Parse one typed line
pub fn parse_command(line: &str) -> Result<UiCommand, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then_some(rest);

    let command = match verb.to_lowercase().as_str() {
        "search" | "s" | "/" => UiCommand::Search(rest.to_string()),
        "category" | "cat" => UiCommand::Category(CategoryFilter::parse(rest)),
        "categories" | "cats" => UiCommand::ListCategories,
        "clear" => UiCommand::ClearFilters,
        "view" => {
            let mode = arg
                .and_then(|a| a.parse::<ViewMode>().ok())
                .ok_or_else(|| "Usage: view grid|list".to_string())?;
            UiCommand::SetView(mode)
        }
        "list" | "ls" => UiCommand::List,
        "learn" | "learned" => UiCommand::ToggleLearned(parse_id(arg, "learn <id>")?),
        "fav" | "favorite" => UiCommand::ToggleFavorite(parse_id(arg, "fav <id>")?),
        "show" => UiCommand::Show(parse_id(arg, "show <id>")?),
        "mnemonic" => UiCommand::Mnemonic(parse_id(arg, "mnemonic <id>")?),
        "ai" => UiCommand::Assist {
            id: parse_id(arg, "ai <id>")?,
            kind: AssistKind::Mnemonic,
        },
        "usage" => UiCommand::Assist {
            id: parse_id(arg, "usage <id>")?,
            kind: AssistKind::Usage,
        },
        "speak" | "say" => match arg {
            Some(_) => UiCommand::Speak(Some(parse_id(arg, "speak [id]")?)),
            None => UiCommand::Speak(None),
        },
        "stats" => UiCommand::Stats,
        "quiz" => UiCommand::StartQuiz,
        "answer" | "a" => {
            let number = arg
                .and_then(|a| a.parse().ok())
                .ok_or_else(|| "Usage: answer <option number>".to_string())?;
            UiCommand::Answer(number)
        }
        "next" | "n" => UiCommand::Next,
        "restart" | "retry" => UiCommand::Restart,
        "exit" | "close" => UiCommand::ExitQuiz,
        "help" | "?" => UiCommand::Help,
        "quit" | "q" => UiCommand::Quit,
        // bare digits answer the current question
        digits if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) && arg.is_none() => {
            UiCommand::Answer(digits.parse().map_err(|_| format!("Bad option '{digits}'"))?)
        }
        other => return Err(format!("Unknown command '{other}', type help")),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_keeps_spaces() {
        assert_eq!(
            parse_command("search  buenos días "),
            Ok(UiCommand::Search("buenos días".to_string()))
        );
        assert_eq!(parse_command("search"), Ok(UiCommand::Search(String::new())));
    }

    #[test]
    fn test_category() {
        assert_eq!(
            parse_command("category all"),
            Ok(UiCommand::Category(CategoryFilter::All))
        );
        assert_eq!(
            parse_command("cat Food"),
            Ok(UiCommand::Category(CategoryFilter::Only("Food".into())))
        );
    }

    #[test]
    fn test_id_commands() {
        assert_eq!(parse_command("learn 12"), Ok(UiCommand::ToggleLearned(12)));
        assert_eq!(parse_command("FAV 3"), Ok(UiCommand::ToggleFavorite(3)));
        assert_eq!(
            parse_command("usage 4"),
            Ok(UiCommand::Assist {
                id: 4,
                kind: AssistKind::Usage
            })
        );
        assert_eq!(parse_command("speak"), Ok(UiCommand::Speak(None)));
        assert_eq!(parse_command("speak 9"), Ok(UiCommand::Speak(Some(9))));
        assert!(parse_command("learn").is_err());
        assert!(parse_command("learn x").is_err());
    }

    #[test]
    fn test_quiz_commands() {
        assert_eq!(parse_command("quiz"), Ok(UiCommand::StartQuiz));
        assert_eq!(parse_command("answer 2"), Ok(UiCommand::Answer(2)));
        assert_eq!(parse_command("3"), Ok(UiCommand::Answer(3)));
        assert_eq!(parse_command("n"), Ok(UiCommand::Next));
        assert_eq!(parse_command("retry"), Ok(UiCommand::Restart));
        assert_eq!(parse_command("exit"), Ok(UiCommand::ExitQuiz));
        assert!(parse_command("answer").is_err());
    }

    #[test]
    fn test_view_and_unknown() {
        assert_eq!(parse_command("view list"), Ok(UiCommand::SetView(ViewMode::List)));
        assert!(parse_command("view cards").is_err());
        assert!(parse_command("dance").is_err());
    }
}
