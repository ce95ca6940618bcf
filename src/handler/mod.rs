//! Handler module - the unit of dispatch logic.
//!
//! A handler answers two questions about a request: does it accept it
//! ([`Handler::accepts`]), and if so, what is the response ([`Handler::act`]).
//! Forwarding to the successor is done by the [`Chain`](crate::Chain), never
//! by the handler itself, so handlers cannot observe or alter chain
//! structure.
//!
//! Provides:
//! - [`Handler`] - the `{accepts, act}` capability
//! - [`FnHandler`] / [`from_fn`] - predicate and action closures
//! - [`EqHandler`] / [`when_eq`] - accepts requests equal to a fixed value
//!
//! # Example
//!
//! ```
//! use handoff::handler::{self, Handler};
//!
//! let squirrel = handler::when_eq("Nut", |food: &str| format!("Squirrel: I'll eat the {food}."));
//! assert!(squirrel.accepts("Nut"));
//! assert!(!squirrel.accepts("Banana"));
//!
//! let big = handler::from_fn(|n: &u32| *n > 100, |n: &u32| n * 2);
//! assert_eq!(big.act(&150), 300);
//! ```

mod equals;
mod function;

pub use equals::{when_eq, EqHandler};
pub use function::{from_fn, FnHandler};

/// Trait for dispatch handlers.
///
/// `Req` is the application's request type and may be unsized (`str`,
/// `[u8]`). Neither method receives mutable access to the request.
pub trait Handler<Req: ?Sized, Resp> {
    /// Whether this handler takes the request instead of forwarding it.
    fn accepts(&self, request: &Req) -> bool;

    /// Produce the response. Only called after `accepts` returned true.
    fn act(&self, request: &Req) -> Resp;
}

impl<Req: ?Sized, Resp, H> Handler<Req, Resp> for Box<H>
where
    H: Handler<Req, Resp> + ?Sized,
{
    fn accepts(&self, request: &Req) -> bool {
        (**self).accepts(request)
    }

    fn act(&self, request: &Req) -> Resp {
        (**self).act(request)
    }
}
