//! Fluent wiring cursor.

use super::{Chain, HandlerId};
use crate::error::Result;

/// Cursor positioned on one handler of a chain, for fluent wiring.
///
/// [`Link::set_next`] moves the cursor to the handler it just installed,
/// mirroring [`Chain::set_next`] returning its argument. The cursor never
/// goes back to the head: `a.set_next(b).set_next(c)` wires `a -> b` and
/// `b -> c`, not `a -> b` and `a -> c`.
pub struct Link<'a, Req: ?Sized, Resp> {
    chain: &'a mut Chain<Req, Resp>,
    at: HandlerId,
}

impl<'a, Req: ?Sized, Resp> Link<'a, Req, Resp> {
    pub(super) fn new(chain: &'a mut Chain<Req, Resp>, at: HandlerId) -> Self {
        Self { chain, at }
    }

    /// Handler the cursor is positioned on.
    #[inline]
    pub fn id(&self) -> HandlerId {
        self.at
    }

    /// Install `next` after the current handler and move the cursor to it.
    pub fn set_next(self, next: HandlerId) -> Result<Link<'a, Req, Resp>> {
        let at = self.chain.set_next(self.at, next)?;
        Ok(Link {
            chain: self.chain,
            at,
        })
    }
}
