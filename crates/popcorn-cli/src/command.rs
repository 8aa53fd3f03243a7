/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Search(String),
    Retry,
    Select(Target),
    Close,
    Add(f32),
    Remove(String),
    List,
    Help,
    Quit,
}

/// A movie picked either by its position in the result list (1-based) or
/// by its external id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Index(usize),
    Id(String),
}

pub const HELP: &str = "\
commands:
  search <title>   (s)  search by title; short queries clear the results
  retry                 run the current search again
  select <n|id>    (o)  open a result by number or id; again to close
  close            (c)  close the detail panel
  add <0-10>       (a)  add the open movie to your watched list with a rating
  remove <id>      (rm) remove a movie from your watched list
  list             (l)  show your watched list
  help             (h)  this text
  quit             (q)";

impl Command {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "search" | "s" => Ok(Self::Search(rest.to_string())),
            "retry" => Ok(Self::Retry),
            "select" | "o" => {
                if rest.is_empty() {
                    return Err("select needs a result number or id".into());
                }
                Ok(Self::Select(match rest.parse::<usize>() {
                    Ok(n) => Target::Index(n),
                    Err(_) => Target::Id(rest.to_string()),
                }))
            }
            "close" | "c" => Ok(Self::Close),
            "add" | "a" => rest
                .parse::<f32>()
                .map(Self::Add)
                .map_err(|_| format!("add needs a rating between 0 and 10, got {rest:?}")),
            "remove" | "rm" => {
                if rest.is_empty() {
                    Err("remove needs a movie id".into())
                } else {
                    Ok(Self::Remove(rest.to_string()))
                }
            }
            "list" | "l" => Ok(Self::List),
            "help" | "h" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            "" => Err(String::new()),
            other => Err(format!("unknown command {other:?}; type help")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_keeps_inner_spaces() {
        assert_eq!(
            Command::parse("search  the dark knight ").unwrap(),
            Command::Search("the dark knight".into())
        );
        assert_eq!(Command::parse("s").unwrap(), Command::Search(String::new()));
    }

    #[test]
    fn test_select_by_index_or_id() {
        assert_eq!(
            Command::parse("select 2").unwrap(),
            Command::Select(Target::Index(2))
        );
        assert_eq!(
            Command::parse("o tt0816692").unwrap(),
            Command::Select(Target::Id("tt0816692".into()))
        );
        assert!(Command::parse("select").is_err());
    }

    #[test]
    fn test_add_rating() {
        assert_eq!(Command::parse("add 8.5").unwrap(), Command::Add(8.5));
        assert!(Command::parse("add great").is_err());
    }

    #[test]
    fn test_unknown_and_blank() {
        assert!(Command::parse("dance").unwrap_err().contains("unknown"));
        assert_eq!(Command::parse("   ").unwrap_err(), "");
        assert_eq!(Command::parse("QUIT").unwrap(), Command::Quit);
    }
}
