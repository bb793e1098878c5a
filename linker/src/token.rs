/// Cursor over the whitespace-separated tokens of an input text.
///
/// The buffer is never mutated; consuming tokens only advances `pos`.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    buf: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    pub fn new(text: &'a str) -> Self {
        Tokens {
            buf: text.split_whitespace().collect(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Peek : Watch next token without consuming it
    pub fn peek(&self) -> Option<&'a str> {
        self.buf.get(self.pos).copied()
    }

    /// Take : Consume exactly `n` tokens, or report how many are missing
    pub fn take_span(&mut self, n: usize) -> Result<&[&'a str], usize> {
        let available = self.remaining();
        if n > available {
            return Err(n - available);
        }
        let span = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_any_whitespace() {
        let mut tokens = Tokens::new(" 1 xy 2\n\t2 z  xy \n");
        assert_eq!(tokens.remaining(), 6);
        assert_eq!(tokens.take_span(6), Ok(&["1", "xy", "2", "2", "z", "xy"][..]));
        assert!(tokens.at_end());
    }

    #[test]
    fn take_advances_cursor() {
        let mut tokens = Tokens::new("a b c d");
        assert_eq!(tokens.take_span(3), Ok(&["a", "b", "c"][..]));
        assert_eq!(tokens.position(), 3);
        assert_eq!(tokens.peek(), Some("d"));
        assert_eq!(tokens.remaining(), 1);
    }

    #[test]
    fn take_past_end_reports_missing() {
        let mut tokens = Tokens::new("a b");
        assert_eq!(tokens.take_span(5), Err(3));
        assert_eq!(tokens.position(), 0);
        assert_eq!(tokens.peek(), Some("a"));
    }

    #[test]
    fn take_from_owned_cursor() {
        // an owned cursor must still yield a span, not an iterator adaptor
        let span: Result<Vec<&str>, usize> =
            Tokens::new("x y z").take_span(2).map(|span| span.to_vec());
        assert_eq!(span, Ok(vec!["x", "y"]));
    }

    #[test]
    fn empty_input() {
        let tokens = Tokens::new("  \n ");
        assert!(tokens.at_end());
        assert_eq!(tokens.peek(), None);
    }
}
