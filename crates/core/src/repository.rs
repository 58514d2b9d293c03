//! Repository contract for aggregate persistence.

use async_trait::async_trait;

use crate::aggregate::AggregateRoot;
use crate::error::DomainResult;

/// Persistence contract, one implementation per aggregate type.
///
/// The domain layer only depends on this trait; concrete implementations
/// (storage engine, soft vs. hard delete, upsert vs. insert semantics,
/// optimistic version checks) live outside the domain. Cancellation is
/// cooperative: dropping the returned future abandons the operation.
#[async_trait]
pub trait Repository<A>: Send + Sync
where
    A: AggregateRoot + Send + Sync,
    A::Id: Send,
{
    /// Load an aggregate by id; `None` when no such aggregate exists.
    async fn get(&self, id: A::Id) -> DomainResult<Option<A>>;

    /// Persist a new aggregate.
    async fn add(&self, aggregate: &A) -> DomainResult<()>;

    /// Persist the new state of an existing aggregate.
    async fn update(&self, aggregate: &A) -> DomainResult<()>;

    /// Remove an aggregate.
    async fn delete(&self, aggregate: &A) -> DomainResult<()>;
}
