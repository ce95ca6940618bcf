//! Handlers keyed on an exact request value.

use std::borrow::Borrow;

use super::Handler;

/// Handler that accepts exactly one request value.
pub struct EqHandler<T, A> {
    expected: T,
    action: A,
}

impl<T, A> EqHandler<T, A> {
    /// Create a new equality handler.
    pub fn new(expected: T, action: A) -> Self {
        Self { expected, action }
    }

    /// The value this handler accepts.
    pub fn expected(&self) -> &T {
        &self.expected
    }
}

impl<Req, Resp, T, A> Handler<Req, Resp> for EqHandler<T, A>
where
    Req: ?Sized + PartialEq,
    T: Borrow<Req>,
    A: Fn(&Req) -> Resp,
{
    #[inline]
    fn accepts(&self, request: &Req) -> bool {
        self.expected.borrow() == request
    }

    #[inline]
    fn act(&self, request: &Req) -> Resp {
        (self.action)(request)
    }
}

/// Build a handler that accepts requests equal to `expected`.
///
/// `expected` may be any owner of the request type: `&str` or `String`
/// for `str` requests, the value itself for sized requests.
pub fn when_eq<Req, Resp, T, A>(expected: T, action: A) -> EqHandler<T, A>
where
    Req: ?Sized + PartialEq,
    T: Borrow<Req>,
    A: Fn(&Req) -> Resp,
{
    EqHandler::new(expected, action)
}
