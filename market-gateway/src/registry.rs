//! Operation registry: the mapping from request path to operation descriptor.
//!
//! Built once at startup and shared read-only by every request.

use axum::http::{Method, StatusCode};
use indexmap::IndexMap;
use market_core::PayloadKind;
use market_state::Operation;

/// The only method any operation accepts.
pub const REQUIRED_METHOD: Method = Method::POST;

/// Returned when a path is registered twice.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("path {0} is already registered")]
pub struct DuplicatePath(pub String);

/// How one path is served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    path: String,
    operation: Operation,
    success_status: StatusCode,
}

impl OperationDescriptor {
    /// Describe `operation` at `/<operation-name>` with its standard
    /// success status.
    #[must_use]
    pub fn new(operation: Operation) -> Self {
        Self {
            path: format!("/{}", operation.name()),
            operation,
            success_status: standard_success_status(operation),
        }
    }

    /// Serve the operation at a different path.
    #[must_use]
    pub fn at(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn method(&self) -> Method {
        REQUIRED_METHOD
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The payload decoded before the call; derived from the operation so
    /// the two can never disagree.
    #[must_use]
    pub fn payload(&self) -> PayloadKind {
        self.operation.payload()
    }

    #[must_use]
    pub fn success_status(&self) -> StatusCode {
        self.success_status
    }
}

/// Success status for each operation: `201` for commands that produce
/// something, `200` for cleanups.
#[must_use]
pub fn standard_success_status(operation: Operation) -> StatusCode {
    match operation {
        Operation::CleanupAllManifests
        | Operation::CleanupAllAuctions
        | Operation::CleanupAllPricelistHistories => StatusCode::OK,
        _ => StatusCode::CREATED,
    }
}

/// Path-keyed operation descriptors, matched by exact equality.
#[derive(Debug, Clone, Default)]
pub struct OperationRegistry {
    by_path: IndexMap<String, OperationDescriptor>,
}

impl OperationRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry with every operation at its standard path.
    #[must_use]
    pub fn standard() -> Self {
        let by_path = Operation::ALL
            .into_iter()
            .map(OperationDescriptor::new)
            .map(|d| (d.path.clone(), d))
            .collect();
        Self { by_path }
    }

    /// Add a descriptor.
    ///
    /// # Errors
    /// Returns [`DuplicatePath`] if its path is already taken; the registry
    /// is left unchanged.
    pub fn register(&mut self, descriptor: OperationDescriptor) -> Result<(), DuplicatePath> {
        if self.by_path.contains_key(descriptor.path()) {
            return Err(DuplicatePath(descriptor.path));
        }
        self.by_path.insert(descriptor.path.clone(), descriptor);
        Ok(())
    }

    /// Find the descriptor registered for exactly `path`.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<&OperationDescriptor> {
        self.by_path.get(path)
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &OperationDescriptor> {
        self.by_path.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_registry_covers_every_operation_once() {
        let registry = OperationRegistry::standard();
        assert_eq!(registry.len(), Operation::ALL.len());
        for op in Operation::ALL {
            let path = format!("/{}", op.name());
            match registry.lookup(&path) {
                Some(d) => {
                    assert_eq!(d.operation(), op);
                    assert_eq!(d.method(), Method::POST);
                }
                None => panic!("{path} missing from standard registry"),
            }
        }
    }

    #[test]
    fn standard_success_statuses_match_table() {
        let expected = [
            ("/download-all-auctions", StatusCode::CREATED, false),
            ("/cleanup-all-manifests", StatusCode::OK, false),
            ("/cleanup-all-auctions", StatusCode::OK, false),
            ("/compute-all-live-auctions", StatusCode::CREATED, true),
            ("/compute-all-pricelist-histories", StatusCode::CREATED, true),
            ("/sync-all-items", StatusCode::CREATED, true),
            ("/cleanup-all-pricelist-histories", StatusCode::OK, false),
        ];
        let registry = OperationRegistry::standard();
        for (path, status, has_payload) in expected {
            let Some(d) = registry.lookup(path) else {
                panic!("{path} missing");
            };
            assert_eq!(d.success_status(), status, "{path}");
            assert_eq!(d.payload().has_body(), has_payload, "{path}");
        }
    }

    #[test]
    fn lookup_is_exact_not_prefix() {
        let registry = OperationRegistry::standard();
        assert!(registry.lookup("/sync-all-items/").is_none());
        assert!(registry.lookup("/sync-all-items/extra").is_none());
        assert!(registry.lookup("/SYNC-ALL-ITEMS").is_none());
        assert!(registry.lookup("sync-all-items").is_none());
        assert!(registry.lookup("/").is_none());
    }

    #[test]
    fn register_rejects_duplicate_path() {
        let mut registry = OperationRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.register(OperationDescriptor::new(Operation::SyncAllItems)), Ok(()));

        let clash = OperationDescriptor::new(Operation::DownloadAllAuctions).at("/sync-all-items");
        assert_eq!(
            registry.register(clash),
            Err(DuplicatePath("/sync-all-items".to_owned()))
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup("/sync-all-items").map(OperationDescriptor::operation),
            Some(Operation::SyncAllItems)
        );
    }

    #[test]
    fn iter_preserves_registration_order() {
        let mut registry = OperationRegistry::new();
        for op in [Operation::CleanupAllAuctions, Operation::DownloadAllAuctions] {
            if let Err(e) = registry.register(OperationDescriptor::new(op)) {
                panic!("unexpected error: {e}");
            }
        }
        let order: Vec<Operation> = registry.iter().map(OperationDescriptor::operation).collect();
        assert_eq!(order, vec![Operation::CleanupAllAuctions, Operation::DownloadAllAuctions]);
    }
}
