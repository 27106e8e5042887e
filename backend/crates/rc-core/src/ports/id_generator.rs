use crate::AllocationError;

use async_trait::async_trait;

/// Source of globally unique user identifiers.
///
/// Every value returned must be unique for the lifetime of the whole system,
/// across all generator instances. Unused identifiers are allowed; callers may
/// abandon an id when a later step fails.
#[async_trait]
pub trait IdGenerator: Send + Sync {
    async fn next_id(&self) -> Result<u64, AllocationError>;
}
