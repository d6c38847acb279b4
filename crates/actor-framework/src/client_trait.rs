//! # ActorClient Trait
//!
//! Typed clients (`ProductClient`, `OrderClient`, ...) wrap a [`ResourceClient`] and
//! translate [`FrameworkError`] into their own error enum. Implementing this trait
//! gives them `get`, `query` and `delete` for free.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard read and delete operations.
///
/// # Example
///
/// ```rust
/// use actor_framework::{
///     ActorClient, ActorEntity, Filter, FrameworkError, ResourceActor, ResourceClient,
/// };
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Oven { id: u32, hot: bool }
/// #[derive(Debug)] struct OvenCreate { hot: bool }
/// #[derive(Debug)] struct OvenUpdate;
/// #[derive(Debug)] enum OvenAction {}
///
/// #[derive(Debug, thiserror::Error)]
/// enum OvenError {
///     #[error("oven plumbing: {0}")]
///     Plumbing(String),
/// }
/// impl From<String> for OvenError {
///     fn from(s: String) -> Self { OvenError::Plumbing(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Oven {
///     type Id = u32; type Create = OvenCreate; type Update = OvenUpdate;
///     type Action = OvenAction; type ActionResult = ();
///     type Context = (); type Error = OvenError;
///     fn from_create_params(id: u32, p: OvenCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, hot: p.hot })
///     }
///     async fn on_update(&mut self, _: OvenUpdate, _: &()) -> Result<(), Self::Error> {
///         Ok(())
///     }
///     async fn handle_action(&mut self, _: OvenAction, _: &()) -> Result<(), Self::Error> {
///         Ok(())
///     }
/// }
///
/// struct OvenClient { inner: ResourceClient<Oven> }
///
/// #[async_trait]
/// impl ActorClient<Oven> for OvenClient {
///     type Error = OvenError;
///     fn inner(&self) -> &ResourceClient<Oven> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { OvenError::Plumbing(e.to_string()) }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, inner) = ResourceActor::<Oven>::new(10);
///     tokio::spawn(actor.run(()));
///     let ovens = OvenClient { inner };
///     ovens.inner().create(OvenCreate { hot: true }).await.unwrap();
///     ovens.inner().create(OvenCreate { hot: false }).await.unwrap();
///
///     let hot = ovens.query(Filter::new("hot", |o: &Oven| o.hot)).await.unwrap();
///     assert_eq!(hot.len(), 1);
///     ovens.delete(hot[0].id).await.unwrap();
///     assert!(ovens.get(hot[0].id).await.unwrap().is_none());
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `filter`.
    #[tracing::instrument(skip(self))]
    async fn query(&self, filter: Filter<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(filter).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
