//! Chain module - handler ownership, wiring, and dispatch.
//!
//! A [`Chain`] owns every handler added to it. Successor links are
//! [`HandlerId`] indices into that owned set, so rewiring never changes
//! who owns what. Any handler can be used as a dispatch entry point;
//! starting from an interior handler dispatches through that sub-chain only.
//!
//! # Example
//!
//! ```
//! use handoff::{handler, Chain};
//!
//! let mut chain: Chain<str, String> = Chain::new();
//! let monkey = chain.add("Monkey", handler::when_eq("Banana", |f: &str| format!("Monkey: I'll eat the {f}.")));
//! let squirrel = chain.add("Squirrel", handler::when_eq("Nut", |f: &str| format!("Squirrel: I'll eat the {f}.")));
//! let dog = chain.add("Dog", handler::when_eq("MeatBall", |f: &str| format!("Dog: I'll eat the {f}.")));
//!
//! // Each call returns a cursor on the handler just installed.
//! chain.link(monkey).set_next(squirrel).unwrap().set_next(dog).unwrap();
//!
//! let outcome = chain.dispatch(monkey, "Nut").unwrap();
//! assert_eq!(outcome.handled_by(), Some(squirrel));
//! assert!(chain.dispatch(squirrel, "Banana").unwrap().is_unhandled());
//! ```

mod dispatch;
mod link;
mod outcome;

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

pub use dispatch::{HandlerRef, Path};
pub use link::Link;
pub use outcome::Outcome;

use crate::config::ChainConfig;
use crate::error::{ChainError, Result};
use crate::handler::{FnHandler, Handler};

/// Source of per-chain tags. Tags are never reused within a process.
static NEXT_CHAIN_TAG: AtomicU64 = AtomicU64::new(1);

/// Non-owning reference to a handler inside a [`Chain`].
///
/// Ids are issued by [`Chain::add`] in insertion order and stay valid for
/// the lifetime of the chain. Each id carries the tag of the chain that
/// issued it, so an id from another chain is rejected even when its index
/// is in range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId {
    chain: u64,
    index: usize,
}

impl HandlerId {
    /// Position of the handler in insertion order.
    #[inline]
    pub fn index(self) -> usize {
        self.index
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handler#{}", self.index)
    }
}

/// A handler plus its successor link.
struct Slot<Req: ?Sized, Resp> {
    name: String,
    handler: Box<dyn Handler<Req, Resp>>,
    next: Option<HandlerId>,
}

/// Owned set of handlers and the successor links between them.
pub struct Chain<Req: ?Sized, Resp> {
    tag: u64,
    slots: Vec<Slot<Req, Resp>>,
    config: ChainConfig,
}

impl<Req: ?Sized, Resp> Chain<Req, Resp> {
    /// Create an empty chain with the default configuration.
    pub fn new() -> Self {
        Self::with_config(ChainConfig::default())
    }

    /// Create an empty chain with the given configuration.
    pub fn with_config(config: ChainConfig) -> Self {
        Self {
            tag: NEXT_CHAIN_TAG.fetch_add(1, Ordering::Relaxed),
            slots: Vec::new(),
            config,
        }
    }

    /// Configuration in effect.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Number of handlers owned by the chain, linked or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no handler has been added.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Add a handler. It starts unlinked: no successor, and no handler
    /// points at it.
    pub fn add<H>(&mut self, name: impl Into<String>, handler: H) -> HandlerId
    where
        H: Handler<Req, Resp> + 'static,
    {
        let id = HandlerId {
            chain: self.tag,
            index: self.slots.len(),
        };
        self.slots.push(Slot {
            name: name.into(),
            handler: Box::new(handler),
            next: None,
        });
        id
    }

    /// Add a handler built from a predicate and an action.
    pub fn add_fn<P, A>(&mut self, name: impl Into<String>, predicate: P, action: A) -> HandlerId
    where
        P: Fn(&Req) -> bool + 'static,
        A: Fn(&Req) -> Resp + 'static,
    {
        self.add(name, FnHandler::new(predicate, action))
    }

    /// Name given to the handler when it was added.
    pub fn name(&self, id: HandlerId) -> Option<&str> {
        self.check(id).ok()?;
        Some(self.slots[id.index].name.as_str())
    }

    /// Current successor of `id`, if any.
    pub fn next_of(&self, id: HandlerId) -> Option<HandlerId> {
        self.check(id).ok()?;
        self.slots[id.index].next
    }

    /// Install `next` as the successor of `handler` and return `next`.
    ///
    /// The return value is the handler just installed, not `handler`, which
    /// is what lets `set_next` calls be chained left to right along the
    /// tail. Any previous successor of `handler` is replaced; handlers that
    /// were only reachable through it become unreachable from `handler`.
    ///
    /// # Errors
    ///
    /// - [`ChainError::UnknownHandler`] if either id is foreign to the chain.
    /// - [`ChainError::Cycle`] if cycle checks are on and the path from
    ///   `next` already reaches `handler` (including `handler == next`).
    pub fn set_next(&mut self, handler: HandlerId, next: HandlerId) -> Result<HandlerId> {
        self.check(handler)?;
        self.check(next)?;

        if self.config.check_cycles && self.reaches(next, handler) {
            return Err(ChainError::Cycle { handler, next });
        }

        let previous = self.slots[handler.index].next.replace(next);
        match previous {
            Some(prev) if prev != next => tracing::debug!(
                handler = %self.slots[handler.index].name,
                next = %self.slots[next.index].name,
                replaced = %self.slots[prev.index].name,
                "Successor replaced"
            ),
            Some(_) => {}
            None => tracing::debug!(
                handler = %self.slots[handler.index].name,
                next = %self.slots[next.index].name,
                "Successor linked"
            ),
        }

        Ok(next)
    }

    /// Remove the successor of `handler`, making it the end of its path.
    ///
    /// Returns the detached successor.
    pub fn clear_next(&mut self, handler: HandlerId) -> Result<Option<HandlerId>> {
        self.check(handler)?;

        let previous = self.slots[handler.index].next.take();
        if let Some(prev) = previous {
            tracing::debug!(
                handler = %self.slots[handler.index].name,
                detached = %self.slots[prev.index].name,
                "Successor cleared"
            );
        }
        Ok(previous)
    }

    /// Start a fluent wiring cursor at `handler`.
    ///
    /// `chain.link(a).set_next(b)?.set_next(c)?` wires `a -> b` and
    /// `b -> c`.
    pub fn link(&mut self, handler: HandlerId) -> Link<'_, Req, Resp> {
        Link::new(self, handler)
    }

    /// Link `ids` in order, each to the one after it, and return the last.
    ///
    /// Returns `Ok(None)` for an empty slice. The last handler keeps
    /// whatever successor it already had. The whole sequence is validated
    /// first, cycles included, so a failed `wire` changes no link.
    pub fn wire(&mut self, ids: &[HandlerId]) -> Result<Option<HandlerId>> {
        for &id in ids {
            self.check(id)?;
        }

        if self.config.check_cycles {
            let mut pending = HashMap::new();
            for pair in ids.windows(2) {
                let (handler, next) = (pair[0], pair[1]);
                if self.reaches_with(next, handler, &pending) {
                    return Err(ChainError::Cycle { handler, next });
                }
                pending.insert(handler, next);
            }
        }

        for pair in ids.windows(2) {
            self.set_next(pair[0], pair[1])?;
        }

        Ok(ids.last().copied())
    }

    /// Render the dispatch path from `entry` as `"A > B > C"`.
    pub fn describe(&self, entry: HandlerId) -> Result<String> {
        let names: Vec<&str> = self
            .path(entry)?
            .map(|id| self.slots[id.index].name.as_str())
            .collect();
        Ok(names.join(" > "))
    }

    /// Fail with `UnknownHandler` unless `id` was issued by this chain.
    fn check(&self, id: HandlerId) -> Result<()> {
        if id.chain == self.tag && id.index < self.slots.len() {
            Ok(())
        } else {
            Err(ChainError::UnknownHandler(id))
        }
    }

    /// Whether `target` lies on the path starting at `from`.
    fn reaches(&self, from: HandlerId, target: HandlerId) -> bool {
        Path::new(self, from).any(|id| id == target)
    }

    /// Like `reaches`, with `pending` links taking precedence over the
    /// installed ones.
    fn reaches_with(
        &self,
        from: HandlerId,
        target: HandlerId,
        pending: &HashMap<HandlerId, HandlerId>,
    ) -> bool {
        let mut current = Some(from);
        for _ in 0..self.slots.len() {
            match current {
                Some(id) if id == target => return true,
                Some(id) => {
                    current = pending
                        .get(&id)
                        .copied()
                        .or(self.slots[id.index].next)
                }
                None => return false,
            }
        }
        false
    }
}

impl<Req: ?Sized, Resp> Default for Chain<Req, Resp> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Req: ?Sized, Resp> fmt::Debug for Chain<Req, Resp> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let links: Vec<(&str, Option<&str>)> = self
            .slots
            .iter()
            .map(|s| (s.name.as_str(), s.next.map(|n| self.slots[n.index].name.as_str())))
            .collect();

        f.debug_struct("Chain")
            .field("links", &links)
            .field("config", &self.config)
            .finish()
    }
}
