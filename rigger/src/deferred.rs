//! Factories that produce pending asynchronous values

use crate::{Context, FactoryResolver, error::Error, factory};
use futures_util::{
    FutureExt,
    future::{BoxFuture, Shared},
};

/// A pending value that can be cloned and awaited from many places
///
/// Every clone completes with the same output.
pub type Deferred<T> = Shared<BoxFuture<'static, T>>;

/// Creates a factory resolver whose callback resolves its dependencies
/// synchronously and returns a future
///
/// The container stores and returns the [`Deferred`] without awaiting it.
///
/// # Example
/// ```no_run
/// use rigger::{Container, Deferred, deferred};
///
/// # async fn dox() -> Result<(), rigger::error::Error> {
/// let mut container = Container::new();
/// container
///     .add("dsn", "postgres://localhost")?
///     .add("db", deferred(|cx| {
///         let dsn = cx.resolve::<String>("dsn")?;
///         Ok(async move { format!("connected to {dsn}") })
///     }).singleton())?;
///
/// let db = container.resolve::<Deferred<String>>("db")?.await;
/// assert_eq!(db, "connected to postgres://localhost");
/// # Ok(())
/// # }
/// ```
pub fn deferred<T, Fut, F>(f: F) -> FactoryResolver
where
    T: Clone + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
    F: Fn(&Context<'_>) -> Result<Fut, Error> + Send + Sync + 'static,
{
    factory(move |cx| f(cx).map(|fut| fut.boxed().shared()))
}
