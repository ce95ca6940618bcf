//! Dispatch outcome.

use super::HandlerId;

/// Result of dispatching one request.
///
/// `Unhandled` is an ordinary outcome: the request reached the end of the
/// traversed path without any handler accepting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<Resp> {
    /// A handler accepted the request.
    Handled {
        /// The accepting handler.
        handler: HandlerId,
        /// Its response.
        response: Resp,
    },
    /// No handler on the path accepted the request.
    Unhandled,
}

impl<Resp> Outcome<Resp> {
    /// Whether a handler accepted the request.
    #[inline]
    pub fn is_handled(&self) -> bool {
        matches!(self, Outcome::Handled { .. })
    }

    /// Whether the request fell off the end of the path.
    #[inline]
    pub fn is_unhandled(&self) -> bool {
        matches!(self, Outcome::Unhandled)
    }

    /// The accepting handler, if any.
    pub fn handled_by(&self) -> Option<HandlerId> {
        match self {
            Outcome::Handled { handler, .. } => Some(*handler),
            Outcome::Unhandled => None,
        }
    }

    /// Borrow the response, if any.
    pub fn response(&self) -> Option<&Resp> {
        match self {
            Outcome::Handled { response, .. } => Some(response),
            Outcome::Unhandled => None,
        }
    }

    /// Take the response, dropping which handler produced it.
    pub fn into_response(self) -> Option<Resp> {
        match self {
            Outcome::Handled { response, .. } => Some(response),
            Outcome::Unhandled => None,
        }
    }

    /// Transform the response, keeping the accepting handler.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(Resp) -> U,
    {
        match self {
            Outcome::Handled { handler, response } => Outcome::Handled {
                handler,
                response: f(response),
            },
            Outcome::Unhandled => Outcome::Unhandled,
        }
    }
}

impl<Resp> From<Outcome<Resp>> for Option<Resp> {
    fn from(outcome: Outcome<Resp>) -> Self {
        outcome.into_response()
    }
}
