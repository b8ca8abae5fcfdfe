//! # Command Protocol
//!
//! The read port speaks a one-shot line protocol: a client connects, sends at
//! most one command, gets one reply, and the connection closes.
//!
//! | Request        | Reply                                     |
//! |----------------|-------------------------------------------|
//! | (nothing)      | text of the newest snippet                |
//! | `get [idx]`    | raw text of the snippet at `idx`          |
//! | `list`         | table of every snippet, oldest first      |
//! | `grep <term>`  | table of every line containing `term`     |
//! | `drop [idx]`   | nothing; the snippet is removed           |
//! | anything else  | `# Unknown command`                       |
//!
//! Index errors are silent on the wire: `get 99` simply replies with nothing.
//! Inside the crate they stay explicit, [`execute`] returns them as errors and
//! [`wire_reply`] decides what (if anything) the client sees.

use crate::api::PastryApi;
use crate::error::{PastryError, Result};
use crate::render::{render_grep, render_list, UNKNOWN_COMMAND};
use crate::store::DataStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Get(Option<String>),
    List,
    Grep(String),
    Drop(Option<String>),
    Unknown(String),
    Empty,
}

impl Request {
    /// The request implied by a client that sent nothing.
    pub fn implicit() -> Self {
        Request::Get(None)
    }

    /// Parses one request. Newlines are removed before tokenizing, so a
    /// request split over several lines reads as one.
    pub fn parse(raw: &str) -> Self {
        let line: String = raw.chars().filter(|c| !matches!(c, '\n' | '\r')).collect();
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return Request::Empty;
        };
        let arg = tokens.next().map(str::to_string);

        match command {
            "get" => Request::Get(arg),
            "list" => Request::List,
            // The term is the raw remainder so that inner spaces survive.
            "grep" => Request::Grep(
                line.split_once("grep ")
                    .map(|(_, term)| term.to_string())
                    .unwrap_or_default(),
            ),
            "drop" => Request::Drop(arg),
            other => Request::Unknown(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Request::Get(_) => "get",
            Request::List => "list",
            Request::Grep(_) => "grep",
            Request::Drop(_) => "drop",
            Request::Unknown(name) => name,
            Request::Empty => "",
        }
    }

    /// Whether executing the request may write to disk.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Request::Drop(_))
    }
}

/// Runs a request against the store and returns the reply body.
pub fn execute<S: DataStore>(api: &PastryApi<S>, request: &Request) -> Result<String> {
    match request {
        Request::Get(arg) => api.get(arg.as_deref()),
        Request::List => Ok(render_list(&api.list())),
        Request::Grep(term) => Ok(render_grep(&api.grep(term))),
        Request::Drop(arg) => api.drop(arg.as_deref()).map(|_| String::new()),
        Request::Unknown(name) => Err(PastryError::UnknownCommand(name.clone())),
        Request::Empty => Ok(String::new()),
    }
}

/// What the client gets to see for an execution result.
pub fn wire_reply(result: &Result<String>) -> &str {
    match result {
        Ok(body) => body,
        Err(PastryError::UnknownCommand(_)) => UNKNOWN_COMMAND,
        Err(_) => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn apples_api() -> PastryApi<InMemoryStore> {
        let api = PastryApi::new(InMemoryStore::new());
        for text in ["one apple", "two apples", "three apple"] {
            api.append(text.as_bytes()).unwrap();
        }
        api
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Request::parse("get\n"), Request::Get(None));
        assert_eq!(Request::parse("get -1\n"), Request::Get(Some("-1".into())));
        assert_eq!(Request::parse("list"), Request::List);
        assert_eq!(Request::parse("drop 2\r\n"), Request::Drop(Some("2".into())));
        assert_eq!(Request::parse("  \n"), Request::Empty);
        assert_eq!(Request::parse("frobnicate 1"), Request::Unknown("frobnicate".into()));
    }

    #[test]
    fn test_extra_tokens_are_ignored() {
        assert_eq!(
            Request::parse("get 1 2 3"),
            Request::Get(Some("1".into()))
        );
    }

    #[test]
    fn test_grep_keeps_inner_spaces() {
        assert_eq!(
            Request::parse("grep two apples\n"),
            Request::Grep("two apples".into())
        );
        assert_eq!(
            Request::parse("grep  padded term "),
            Request::Grep(" padded term ".into())
        );
    }

    #[test]
    fn test_bare_grep_has_empty_term() {
        assert_eq!(Request::parse("grep\n"), Request::Grep(String::new()));
    }

    #[test]
    fn test_commands_are_case_sensitive() {
        assert_eq!(Request::parse("LIST"), Request::Unknown("LIST".into()));
    }

    #[test]
    fn test_execute_get() {
        let api = apples_api();
        assert_eq!(execute(&api, &Request::implicit()).unwrap(), "three apple");
        assert_eq!(
            execute(&api, &Request::parse("get 0")).unwrap(),
            "one apple"
        );
    }

    #[test]
    fn test_execute_list_and_grep() {
        let api = apples_api();
        let list = execute(&api, &Request::List).unwrap();
        assert_eq!(list.lines().count(), 3);
        assert!(list.starts_with("#  0\t"));
        assert!(list.ends_with("\tthree apple\n"));

        let grep = execute(&api, &Request::parse("grep two")).unwrap();
        assert_eq!(grep.lines().count(), 1);
        assert!(grep.starts_with("#  1\t  1\t"));
        assert!(grep.ends_with("\ttwo apples\n"));
    }

    #[test]
    fn test_execute_drop_replies_with_nothing() {
        let api = apples_api();
        assert_eq!(execute(&api, &Request::parse("drop")).unwrap(), "");
        assert_eq!(api.len(), 2);
    }

    #[test]
    fn test_out_of_bounds_is_explicit_but_silent() {
        let api = apples_api();
        let result = execute(&api, &Request::parse("get 9"));
        assert!(matches!(result, Err(PastryError::OutOfBounds(_))));
        assert_eq!(wire_reply(&result), "");

        let result = execute(&api, &Request::parse("drop nope"));
        assert!(matches!(result, Err(PastryError::OutOfBounds(_))));
        assert_eq!(api.len(), 3);
    }

    #[test]
    fn test_unknown_command_notice() {
        let api = apples_api();
        let result = execute(&api, &Request::parse("paste hello"));
        assert!(matches!(result, Err(PastryError::UnknownCommand(_))));
        assert_eq!(wire_reply(&result), "# Unknown command\n");
    }

    #[test]
    fn test_implicit_get_on_empty_store_is_silent() {
        let api = PastryApi::new(InMemoryStore::new());
        let result = execute(&api, &Request::implicit());
        assert!(result.is_err());
        assert_eq!(wire_reply(&result), "");
    }
}
