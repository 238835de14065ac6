//! Resolving a requested tool id to its descriptor and loader.
//!
//! [`resolve_activation`] is the one-shot form. [`Activation`] tracks a
//! sequence of requests where a slow load may finish after a newer request
//! has been issued; only the newest request is allowed to become ready.

use crate::registry::{Registry, ToolDescriptor, ToolId};

#[derive(Debug)]
pub enum Resolution<'r, L> {
    Found {
        descriptor: &'r ToolDescriptor,
        loader: L,
    },
    NotFound {
        requested: String,
    },
}

/// Validates `raw_id` against the registry. `make_loader` only runs for a
/// known id.
pub fn resolve_activation<'r, L>(
    registry: &'r Registry,
    raw_id: &str,
    make_loader: impl FnOnce(ToolId) -> L,
) -> Resolution<'r, L> {
    match registry.lookup(raw_id) {
        Some(descriptor) => Resolution::Found {
            descriptor,
            loader: make_loader(descriptor.id),
        },
        None => {
            log::debug!("Requested unknown tool `{raw_id}`");
            Resolution::NotFound {
                requested: raw_id.to_string(),
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActivationState {
    #[default]
    Unresolved,
    Resolving(ToolId),
    Ready(ToolId),
    NotFound,
}

/// Handle for one in-flight load. Completing a ticket from a superseded
/// request has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    pub id: ToolId,
    generation: u64,
}

#[derive(Debug, Default)]
pub struct Activation {
    state: ActivationState,
    generation: u64,
}

impl Activation {
    pub fn new() -> Self {
        Activation::default()
    }

    pub fn state(&self) -> ActivationState {
        self.state
    }

    /// The tool whose load finished last, if the newest request succeeded.
    pub fn current(&self) -> Option<ToolId> {
        match self.state {
            ActivationState::Ready(id) => Some(id),
            _ => None,
        }
    }

    /// Starts a new activation, discarding whatever the previous one was.
    ///
    /// Returns a ticket when the id is known; the state is then `Resolving`
    /// until that ticket completes. Unknown ids go straight to `NotFound`.
    pub fn request(&mut self, registry: &Registry, raw_id: &str) -> Option<Ticket> {
        self.generation += 1;
        match registry.lookup(raw_id) {
            Some(descriptor) => {
                self.state = ActivationState::Resolving(descriptor.id);
                Some(Ticket {
                    id: descriptor.id,
                    generation: self.generation,
                })
            }
            None => {
                self.state = ActivationState::NotFound;
                None
            }
        }
    }

    /// Marks the load behind `ticket` as finished. Returns `false` and leaves
    /// the state alone when a newer request has been made since.
    pub fn complete(&mut self, ticket: Ticket) -> bool {
        if ticket.generation != self.generation {
            log::debug!("Ignoring stale activation of `{}`", ticket.id);
            return false;
        }
        self.state = ActivationState::Ready(ticket.id);
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_unknown_id_never_builds_a_loader() {
        let registry = Registry::builtin();
        let calls = Cell::new(0);

        let resolution = resolve_activation(&registry, "not-a-tool", |_| calls.set(calls.get() + 1));

        assert!(matches!(
            resolution,
            Resolution::NotFound { ref requested } if requested == "not-a-tool"
        ));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_known_id_builds_its_loader() {
        let registry = Registry::builtin();
        let resolution = resolve_activation(&registry, "reverser", |id| id);

        match resolution {
            Resolution::Found { descriptor, loader } => {
                assert_eq!(descriptor.name, "Text Reverser");
                assert_eq!(loader, ToolId::Reverser);
            }
            Resolution::NotFound { .. } => panic!("reverser should resolve"),
        }
    }

    #[test]
    fn test_activation_lifecycle() {
        let registry = Registry::builtin();
        let mut activation = Activation::new();
        assert_eq!(activation.state(), ActivationState::Unresolved);

        let ticket = activation.request(&registry, "counter").unwrap();
        assert_eq!(activation.state(), ActivationState::Resolving(ToolId::Counter));

        assert_eq!(activation.current(), None);

        assert!(activation.complete(ticket));
        assert_eq!(activation.state(), ActivationState::Ready(ToolId::Counter));
        assert_eq!(activation.current(), Some(ToolId::Counter));
    }

    #[test]
    fn test_unknown_request_is_not_found() {
        let registry = Registry::builtin();
        let mut activation = Activation::new();
        assert!(activation.request(&registry, "bogus").is_none());
        assert_eq!(activation.state(), ActivationState::NotFound);
    }

    #[test]
    fn test_last_request_wins() {
        let registry = Registry::builtin();
        let mut activation = Activation::new();

        let slow = activation.request(&registry, "diff-tool").unwrap();
        let fast = activation.request(&registry, "csv-tool").unwrap();

        assert!(activation.complete(fast));
        assert!(!activation.complete(slow));
        assert_eq!(activation.state(), ActivationState::Ready(ToolId::CsvTool));
    }

    #[test]
    fn test_superseded_by_unknown_id() {
        let registry = Registry::builtin();
        let mut activation = Activation::new();

        let pending = activation.request(&registry, "counter").unwrap();
        assert!(activation.request(&registry, "missing").is_none());
        assert!(!activation.complete(pending));
        assert_eq!(activation.state(), ActivationState::NotFound);
    }
}
