use crate::StrError;
use std::str::{FromStr, SplitWhitespace};

/// Reads whitespace-separated tokens from the contents of a text file
pub(crate) struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    /// Allocates a new instance
    pub fn new(text: &'a str) -> Self {
        Tokens {
            iter: text.split_whitespace(),
        }
    }

    /// Returns the next token
    pub fn next_str(&mut self) -> Result<&'a str, StrError> {
        self.iter.next().ok_or("unexpected end of file")
    }

    /// Parses the next token
    pub fn next<T: FromStr>(&mut self) -> Result<T, StrError> {
        self.next_str()?.parse().map_err(|_| "cannot parse token")
    }

    /// Skips tokens until (and including) the given marker
    pub fn skip_past(&mut self, marker: &str) -> Result<(), StrError> {
        for token in self.iter.by_ref() {
            if token == marker {
                return Ok(());
            }
        }
        Err("cannot find section marker")
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
