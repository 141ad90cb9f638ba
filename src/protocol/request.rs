//! Request classification
//!
//! A client line is either a quit token or text to be echoed.

/// Tokens that end a session at the protocol level
pub const QUIT_TOKENS: [&str; 2] = ["quit", "exit"];

/// A parsed client line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// `quit` or `exit`, after trimming
    Quit,

    /// Anything else, trimmed
    Text(String),
}

impl Request {
    /// Classify a raw line as read off the wire.
    ///
    /// Surrounding whitespace (including the `\n`/`\r\n` terminator) is
    /// dropped first; the quit match is exact and case-sensitive.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if is_quit(trimmed) {
            Request::Quit
        } else {
            Request::Text(trimmed.to_string())
        }
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Request::Quit)
    }
}

/// Exact match against the quit tokens
pub(crate) fn is_quit(trimmed: &str) -> bool {
    QUIT_TOKENS.contains(&trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_tokens_with_whitespace() {
        assert_eq!(Request::parse("quit\n"), Request::Quit);
        assert_eq!(Request::parse("  exit \r\n"), Request::Quit);
    }

    #[test]
    fn test_quit_is_case_sensitive() {
        assert_eq!(Request::parse("QUIT\n"), Request::Text("QUIT".to_string()));
        assert_eq!(Request::parse("quit now\n"), Request::Text("quit now".to_string()));
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(Request::parse("\t hello world  \n"), Request::Text("hello world".to_string()));
        assert_eq!(Request::parse("\n"), Request::Text(String::new()));
    }
}
