//! # handoff
//!
//! Ordered, runtime-rewirable handler chains for request dispatch.
//!
//! A request is offered to an entry handler; each handler either accepts it
//! and produces the response, or the request moves on to the handler's
//! successor. If the end of the path is reached, the outcome is
//! [`Outcome::Unhandled`], an ordinary value rather than an error.
//!
//! ## Architecture
//!
//! - **Handlers** ([`handler`]): `{accepts, act}` capabilities supplied per
//!   instance, as closures or [`Handler`] implementations.
//! - **Chain** ([`Chain`]): owns all handlers; successor links are
//!   [`HandlerId`] indices, so relinking never affects ownership. Any
//!   handler can be a dispatch entry point (sub-chain dispatch).
//!
//! ## Wiring
//!
//! [`Chain::set_next`] returns the handler it installed, *not* the one it
//! was called on. Fluent wiring therefore walks the tail:
//! `chain.link(a).set_next(b)?.set_next(c)?` wires `a -> b -> c`. Setting a
//! new successor replaces the old one, which detaches everything that was
//! only reachable through it.
//!
//! ## Example
//!
//! ```
//! use handoff::{handler, Chain, Outcome};
//!
//! fn main() -> handoff::Result<()> {
//!     let mut chain: Chain<str, String> = Chain::new();
//!     let monkey = chain.add("Monkey", handler::when_eq("Banana", |f: &str| format!("Monkey: I'll eat the {f}.")));
//!     let squirrel = chain.add("Squirrel", handler::when_eq("Nut", |f: &str| format!("Squirrel: I'll eat the {f}.")));
//!     let dog = chain.add("Dog", handler::when_eq("MeatBall", |f: &str| format!("Dog: I'll eat the {f}.")));
//!     chain.wire(&[monkey, squirrel, dog])?;
//!
//!     assert_eq!(chain.describe(monkey)?, "Monkey > Squirrel > Dog");
//!
//!     match chain.dispatch(monkey, "Nut")? {
//!         Outcome::Handled { response, .. } => assert_eq!(response, "Squirrel: I'll eat the Nut."),
//!         Outcome::Unhandled => unreachable!(),
//!     }
//!     assert!(chain.dispatch(monkey, "Cup of coffee")?.is_unhandled());
//!     Ok(())
//! }
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod handler;

pub use chain::{Chain, HandlerId, HandlerRef, Link, Outcome, Path};
pub use config::ChainConfig;
pub use error::{ChainError, Result};
pub use handler::Handler;
