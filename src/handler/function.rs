//! Closure-backed handlers.

use super::Handler;

/// Handler built from a predicate closure and an action closure.
pub struct FnHandler<P, A> {
    predicate: P,
    action: A,
}

impl<P, A> FnHandler<P, A> {
    /// Create a new closure handler.
    pub fn new(predicate: P, action: A) -> Self {
        Self { predicate, action }
    }
}

impl<Req, Resp, P, A> Handler<Req, Resp> for FnHandler<P, A>
where
    Req: ?Sized,
    P: Fn(&Req) -> bool,
    A: Fn(&Req) -> Resp,
{
    #[inline]
    fn accepts(&self, request: &Req) -> bool {
        (self.predicate)(request)
    }

    #[inline]
    fn act(&self, request: &Req) -> Resp {
        (self.action)(request)
    }
}

/// Build a handler from a predicate and an action.
///
/// The bounds here pin the closures' argument type, so closure parameters
/// only need an annotation when `Req` cannot be inferred from the call site.
pub fn from_fn<Req, Resp, P, A>(predicate: P, action: A) -> FnHandler<P, A>
where
    Req: ?Sized,
    P: Fn(&Req) -> bool,
    A: Fn(&Req) -> Resp,
{
    FnHandler::new(predicate, action)
}
