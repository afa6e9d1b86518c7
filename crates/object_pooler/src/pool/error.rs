//! Pool errors

/// Errors returned by [`ObjectPool::spawn`](super::ObjectPool::spawn)
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PoolError<E: std::error::Error + 'static> {
    /// A host primitive failed; the host's error is passed through as is
    #[error(transparent)]
    Host(#[from] E),

    /// A non-expandable pool with no members has nothing to hand out
    #[error("Pool '{pool}' is empty and cannot grow")]
    Empty {
        /// Name of the pool's template
        pool: String,
    },
}
