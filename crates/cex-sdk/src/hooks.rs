//! Page transform hooks
//!
//! The designated extension point of the transaction stream: every loaded
//! page is threaded through the attached transforms before any of its
//! records become visible to the consumer. A transform receives the whole
//! page and returns a replacement, so it can drop, enrich, or inject
//! records wholesale.
//!
//! Transforms run synchronously during a page load and are trusted
//! collaborators: they must not fetch from or restart the stream they are
//! attached to.
//!
//! # Example
//!
//! ```
//! use cex_sdk::hooks::PageHooks;
//!
//! let mut hooks = PageHooks::new();
//! let id = hooks.attach(|page| {
//!     page.into_iter().filter(|tx| tx.amount.is_sign_positive()).collect()
//! });
//! assert!(hooks.detach(id));
//! ```

use cex_types::Transaction;

/// A page transform: consumes the loaded page, returns the page the
/// consumer will see
pub type PageTransform = Box<dyn FnMut(Vec<Transaction>) -> Vec<Transaction> + Send>;

/// Handle identifying an attached transform, used to detach it later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// Ordered list of page transforms
///
/// Dispatch order is attachment order; the final page is whatever the last
/// transform returned.
#[derive(Default)]
pub struct PageHooks {
    next_id: u64,
    hooks: Vec<(HookId, PageTransform)>,
}

impl PageHooks {
    /// Create an empty hook list
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a transform; returns a handle for later detachment
    pub fn attach(
        &mut self,
        transform: impl FnMut(Vec<Transaction>) -> Vec<Transaction> + Send + 'static,
    ) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.hooks.push((id, Box::new(transform)));
        id
    }

    /// Detach a previously attached transform
    ///
    /// Returns false if the handle is unknown (already detached).
    pub fn detach(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(hook_id, _)| *hook_id != id);
        self.hooks.len() != before
    }

    /// Number of attached transforms
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// True when no transforms are attached
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every transform over the page, in attachment order
    pub fn dispatch(&mut self, mut page: Vec<Transaction>) -> Vec<Transaction> {
        for (_, transform) in &mut self.hooks {
            page = transform(page);
        }
        page
    }
}

impl std::fmt::Debug for PageHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageHooks")
            .field("attached", &self.hooks.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tx(id: &str) -> Transaction {
        serde_json::from_value(json!({
            "id": id,
            "time": "2020-01-01T00:00:00.000Z",
            "type": "buy",
            "amount": "1"
        }))
        .unwrap()
    }

    #[test]
    fn test_dispatch_without_hooks_is_identity() {
        let mut hooks = PageHooks::new();
        let page = vec![tx("1"), tx("2")];
        let out = hooks.dispatch(page.clone());
        assert_eq!(out, page);
    }

    #[test]
    fn test_dispatch_runs_in_attachment_order() {
        let mut hooks = PageHooks::new();
        hooks.attach(|mut page| {
            page.push(tx("first"));
            page
        });
        hooks.attach(|mut page| {
            page.push(tx("second"));
            page
        });

        let out = hooks.dispatch(vec![]);
        let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["first", "second"]);
    }

    #[test]
    fn test_transform_can_drop_records() {
        let mut hooks = PageHooks::new();
        hooks.attach(|page| page.into_iter().filter(|t| t.id != "2").collect());

        let out = hooks.dispatch(vec![tx("1"), tx("2"), tx("3")]);
        let ids: Vec<&str> = out.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["1", "3"]);
    }

    #[test]
    fn test_detach_stops_transform() {
        let mut hooks = PageHooks::new();
        let id = hooks.attach(|_| vec![]);
        assert_eq!(hooks.len(), 1);

        assert!(hooks.detach(id));
        assert!(hooks.is_empty());
        assert!(!hooks.detach(id));

        let out = hooks.dispatch(vec![tx("1")]);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_hook_ids_are_unique_across_detach() {
        let mut hooks = PageHooks::new();
        let first = hooks.attach(|page| page);
        hooks.detach(first);
        let second = hooks.attach(|page| page);
        assert_ne!(first, second);
    }
}
