//! Request dispatch along a chain.
//!
//! Dispatch walks successor links from the entry handler in an explicit
//! loop: the first handler whose predicate accepts the request produces the
//! response and the walk stops. Dispatch takes `&Chain`, so it can never
//! rewire anything and repeated dispatches of the same request agree.

use std::num::NonZeroUsize;

use super::{Chain, HandlerId, Outcome};
use crate::error::{ChainError, Result};

impl<Req: ?Sized, Resp> Chain<Req, Resp> {
    /// Borrow a handler as a dispatch entry point.
    pub fn handler(&self, id: HandlerId) -> Result<HandlerRef<'_, Req, Resp>> {
        self.check(id)?;
        Ok(HandlerRef { chain: self, id })
    }

    /// Dispatch `request` starting at `entry`.
    ///
    /// Only `entry` and the handlers after it are considered; an interior
    /// entry dispatches through that sub-chain alone. Equivalent to
    /// `self.handler(entry)?.handle(request)`.
    ///
    /// # Errors
    ///
    /// - [`ChainError::UnknownHandler`] if `entry` is foreign to the chain.
    /// - [`ChainError::HopLimit`] if the walk visits more handlers than
    ///   allowed (only reachable with cycle checks off or `max_hops` set).
    pub fn dispatch(&self, entry: HandlerId, request: &Req) -> Result<Outcome<Resp>> {
        self.check(entry)?;
        self.run(entry, request)
    }

    /// Handlers a dispatch from `entry` would visit, in order.
    pub fn path(&self, entry: HandlerId) -> Result<Path<'_, Req, Resp>> {
        self.check(entry)?;
        Ok(Path::new(self, entry))
    }

    fn hop_limit(&self) -> usize {
        self.config
            .max_hops
            .map_or(self.slots.len(), NonZeroUsize::get)
    }

    fn run(&self, entry: HandlerId, request: &Req) -> Result<Outcome<Resp>> {
        let limit = self.hop_limit();
        let mut current = Some(entry);
        let mut hops = 0;

        while let Some(id) = current {
            if hops == limit {
                tracing::warn!(
                    entry = %self.slots[entry.index].name,
                    limit,
                    "Dispatch hop limit reached"
                );
                return Err(ChainError::HopLimit { entry, limit });
            }
            hops += 1;

            // Links are validated when installed, so indexing cannot fail.
            let slot = &self.slots[id.index];
            tracing::trace!(handler = %slot.name, hop = hops, "Offering request");

            if slot.handler.accepts(request) {
                tracing::debug!(handler = %slot.name, hops, "Request handled");
                return Ok(Outcome::Handled {
                    handler: id,
                    response: slot.handler.act(request),
                });
            }

            current = slot.next;
        }

        tracing::debug!(entry = %self.slots[entry.index].name, hops, "Request unhandled");
        Ok(Outcome::Unhandled)
    }
}

/// A handler viewed as a dispatch entry point.
///
/// Borrowing the chain immutably keeps topology fixed for as long as the
/// reference lives.
pub struct HandlerRef<'a, Req: ?Sized, Resp> {
    chain: &'a Chain<Req, Resp>,
    id: HandlerId,
}

impl<'a, Req: ?Sized, Resp> HandlerRef<'a, Req, Resp> {
    /// Id of this handler.
    #[inline]
    pub fn id(&self) -> HandlerId {
        self.id
    }

    /// Name of this handler.
    pub fn name(&self) -> &'a str {
        &self.chain.slots[self.id.index].name
    }

    /// The successor, as an entry point of its own sub-chain.
    pub fn successor(&self) -> Option<HandlerRef<'a, Req, Resp>> {
        self.chain.slots[self.id.index].next.map(|id| HandlerRef {
            chain: self.chain,
            id,
        })
    }

    /// Whether this handler alone would accept the request.
    pub fn accepts(&self, request: &Req) -> bool {
        self.chain.slots[self.id.index].handler.accepts(request)
    }

    /// Handle `request` here or pass it down the chain.
    pub fn handle(&self, request: &Req) -> Result<Outcome<Resp>> {
        self.chain.run(self.id, request)
    }
}

impl<Req: ?Sized, Resp> Clone for HandlerRef<'_, Req, Resp> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Req: ?Sized, Resp> Copy for HandlerRef<'_, Req, Resp> {}

/// Iterator over the handlers on a dispatch path.
///
/// Yields at most as many ids as the chain holds handlers, so it ends even
/// on a looped chain.
pub struct Path<'a, Req: ?Sized, Resp> {
    chain: &'a Chain<Req, Resp>,
    next: Option<HandlerId>,
    remaining: usize,
}

impl<'a, Req: ?Sized, Resp> Path<'a, Req, Resp> {
    pub(super) fn new(chain: &'a Chain<Req, Resp>, entry: HandlerId) -> Self {
        Self {
            chain,
            next: Some(entry),
            remaining: chain.slots.len(),
        }
    }
}

impl<Req: ?Sized, Resp> Iterator for Path<'_, Req, Resp> {
    type Item = HandlerId;

    fn next(&mut self) -> Option<HandlerId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.next?;
        self.remaining -= 1;
        self.next = self.chain.slots.get(id.index).and_then(|s| s.next);
        Some(id)
    }
}
