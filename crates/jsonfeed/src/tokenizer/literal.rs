use crate::token::Token;

/// Outcome of [`ExpectedLiteral::step`].
#[derive(Debug, PartialEq)]
pub(crate) enum Step {
    NeedMore,
    /// The literal is complete.
    Done(Token),
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    True,
    False,
    Null,
}

/// Tracks the unmatched remainder of `true`, `false` or `null`.
///
/// `None` means no literal is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ExpectedLiteral(Option<(&'static [u8], Literal)>);

impl ExpectedLiteral {
    /// Begins a match; `first` is the byte already consumed.
    pub(crate) fn start(first: u8) -> Self {
        match first {
            b'n' => Self(Some((b"ull", Literal::Null))),
            b't' => Self(Some((b"rue", Literal::True))),
            b'f' => Self(Some((b"alse", Literal::False))),
            _ => Self(None),
        }
    }

    pub(crate) fn step(&mut self, byte: u8) -> Step {
        let Some((bytes, kind)) = self.0 else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((expected, rest)) if *expected == byte => {
                if rest.is_empty() {
                    self.0 = None;
                    Step::Done(match kind {
                        Literal::True => Token::True,
                        Literal::False => Token::False,
                        Literal::Null => Token::Null,
                    })
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => Step::Reject,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.0.is_some()
    }
}
