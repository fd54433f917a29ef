//! Consult-everything selection.

use crate::ports::{SelectionContext, Selector};
use async_trait::async_trait;

/// Offers every source once, in pool order, ignoring feasibility.
///
/// The control loop re-checks feasibility itself and declines what the
/// budget cannot cover; because declined sources drop out of
/// [`SelectionContext::available`], this selector never re-offers them.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsultAll;

#[async_trait]
impl<A, V, T> Selector<A, V, T> for ConsultAll
where
    A: Send + Sync,
    V: Send + Sync,
    T: Send + Sync,
{
    async fn next(&mut self, ctx: SelectionContext<'_, A, V, T>) -> Option<usize> {
        ctx.available().next()
    }
}
