//! Terminal command grammar.

use std::str::FromStr;

use bookclub_core::validation::{parse_position, parse_rating};
use bookclub_core::IconType;

use crate::error::ApiError;

pub const HELP: &str = "\
Commands:
  list                      show the current view
  filter <all|reading|completed|archived>
  search <query>            look books up in the catalog
  add <result-id>           add a result from the open search results
  close                     close the search results (they can no longer be added)
  complete <id>             mark as completed
  reading <id>              mark as reading again
  rate <id> <0-5>           set stars (0 clears)
  icon <id> <frog|elephant>
  archive <id> / unarchive <id>
  delete <id>               asks for confirmation
  up <n> / down <n>         move the n-th book of the view
  order <id> <id> ...       set the whole order (books left out are removed)
  help
  quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Filter(String),
    Search(String),
    Add(String),
    Close,
    Complete(String),
    Reading(String),
    Rate(String, u8),
    Icon(String, IconType),
    Archive(String),
    Unarchive(String),
    Delete(String),
    Up(usize),
    Down(usize),
    Order(Vec<String>),
    Help,
    Quit,
}

fn usage(form: &str) -> ApiError {
    ApiError::validation(format!("usage: {form}"))
}

fn one_arg(args: &[&str], form: &str) -> Result<String, ApiError> {
    match args {
        [arg] => Ok(arg.to_string()),
        _ => Err(usage(form)),
    }
}

impl FromStr for Command {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" => Command::List,
            "filter" => Command::Filter(one_arg(&args, "filter <all|reading|completed|archived>")?),
            "search" => Command::Search(rest.trim().to_string()),
            "add" => Command::Add(one_arg(&args, "add <result-id>")?),
            "close" => Command::Close,
            "complete" => Command::Complete(one_arg(&args, "complete <id>")?),
            "reading" => Command::Reading(one_arg(&args, "reading <id>")?),
            "rate" => match args.as_slice() {
                [id, stars] => Command::Rate(id.to_string(), parse_rating(stars)?),
                _ => return Err(usage("rate <id> <0-5>")),
            },
            "icon" => match args.as_slice() {
                [id, icon] => Command::Icon(id.to_string(), icon.parse()?),
                _ => return Err(usage("icon <id> <frog|elephant>")),
            },
            "archive" => Command::Archive(one_arg(&args, "archive <id>")?),
            "unarchive" => Command::Unarchive(one_arg(&args, "unarchive <id>")?),
            "delete" | "rm" => Command::Delete(one_arg(&args, "delete <id>")?),
            "up" => Command::Up(parse_position(&one_arg(&args, "up <n>")?)?),
            "down" => Command::Down(parse_position(&one_arg(&args, "down <n>")?)?),
            "order" => {
                if args.is_empty() {
                    return Err(usage("order <id> <id> ..."));
                }
                Command::Order(args.iter().map(|s| s.to_string()).collect())
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command: '{other}'. Type help for a list."
                )))
            }
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn parse(line: &str) -> Command {
        line.parse().unwrap()
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse("list"), Command::List);
        assert_eq!(parse("  HELP "), Command::Help);
        assert_eq!(parse("quit"), Command::Quit);
        assert_eq!(parse("close"), Command::Close);
    }

    #[test]
    fn test_search_keeps_whole_query() {
        assert_eq!(
            parse("search the left hand of darkness"),
            Command::Search("the left hand of darkness".to_string())
        );
        assert_eq!(parse("search"), Command::Search(String::new()));
    }

    #[test]
    fn test_id_commands() {
        assert_eq!(parse("complete v1"), Command::Complete("v1".to_string()));
        assert_eq!(parse("reading v1"), Command::Reading("v1".to_string()));
        assert_eq!(parse("archive v1"), Command::Archive("v1".to_string()));
        assert_eq!(parse("delete v1"), Command::Delete("v1".to_string()));
        assert!("complete".parse::<Command>().is_err());
        assert!("complete a b".parse::<Command>().is_err());
    }

    #[test]
    fn test_rate_and_icon() {
        assert_eq!(parse("rate v1 4"), Command::Rate("v1".to_string(), 4));
        assert_eq!(parse("icon v1 elephant"), Command::Icon("v1".to_string(), IconType::Elephant));

        let err = "rate v1 7".parse::<Command>().unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!("icon v1 giraffe".parse::<Command>().is_err());
    }

    #[test]
    fn test_positions_are_one_based() {
        assert_eq!(parse("up 1"), Command::Up(0));
        assert_eq!(parse("down 3"), Command::Down(2));
        assert!("up 0".parse::<Command>().is_err());
        assert!("down x".parse::<Command>().is_err());
    }

    #[test]
    fn test_order() {
        assert_eq!(
            parse("order c a"),
            Command::Order(vec!["c".to_string(), "a".to_string()])
        );
        assert!("order".parse::<Command>().is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = "dance".parse::<Command>().unwrap_err();
        assert!(err.message.contains("dance"));
    }
}
