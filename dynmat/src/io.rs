//! Plain-text input for vectors and matrices.
//!
//! Values are read as whitespace-separated tokens. A token stream may span any number of
//! lines, and a single [`Tokens`] reader can be shared between consecutive reads so that
//! e.g. the rows of a matrix may be laid out on one line or many.

use crate::error::{DynError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::str::FromStr;

/// A whitespace-separated token reader over a [`BufRead`]
pub struct Tokens<R> {
    reader: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Tokens {
            reader,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next token, or `None` once the underlying reader is exhausted
    pub fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(self.line.split_whitespace().map(str::to_owned));
        }
    }

    /// Returns the underlying reader, discarding any buffered tokens
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Fills `slots` in order from `tokens`
///
/// `first_index` is the position of `slots[0]` within the enclosing container, and is only
/// used to report where parsing stopped.
pub(crate) fn read_elements<T: FromStr, R: BufRead>(
    slots: &mut [T],
    tokens: &mut Tokens<R>,
    first_index: usize,
) -> Result<()> {
    let expected = first_index + slots.len();
    for (i, slot) in slots.iter_mut().enumerate() {
        let index = first_index + i;
        let Some(token) = tokens.next_token()? else {
            return Err(DynError::UnexpectedEof {
                expected,
                read: index,
            });
        };
        *slot = token
            .parse()
            .map_err(|_| DynError::Parse { index, token })?;
    }
    Ok(())
}

/// Parses every token in `s`
pub(crate) fn parse_all<T: FromStr>(s: &str) -> Result<Vec<T>> {
    s.split_whitespace()
        .enumerate()
        .map(|(index, token)| {
            token.parse().map_err(|_| DynError::Parse {
                index,
                token: token.to_owned(),
            })
        })
        .collect()
}
