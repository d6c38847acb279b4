//! Declarative helpers shared by the model and client modules.

/// Declares a typed `u32` identifier named `<Entity>Id`.
///
/// Ids are handed out by the owning actor, display as `<prefix>_<n>` in logs and
/// errors, and serialize as the bare number.
macro_rules! entity_id {
    ($entity:ident, $prefix:literal) => {
        paste::paste! {
            #[doc = concat!("Type-safe identifier for [`", stringify!($entity), "`] entities.")]
            #[derive(
                Debug,
                Clone,
                Copy,
                PartialEq,
                Eq,
                PartialOrd,
                Ord,
                Hash,
                serde::Serialize,
                serde::Deserialize,
            )]
            #[serde(transparent)]
            pub struct [<$entity Id>](pub u32);

            impl From<u32> for [<$entity Id>] {
                fn from(id: u32) -> Self {
                    Self(id)
                }
            }

            impl std::fmt::Display for [<$entity Id>] {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    write!(f, concat!($prefix, "_{}"), self.0)
                }
            }
        }
    };
}

/// Implements [`ActorClient`](actor_framework::ActorClient) for a typed client whose
/// `inner` field holds the generic `ResourceClient`.
///
/// The entity's own error comes back out of the framework box untouched; plumbing
/// errors are mapped onto the `NotFound`, `Locked` and `ActorCommunicationError`
/// variants every actor error enum carries.
macro_rules! impl_actor_client {
    ($client:ident, $entity:ty, $error:ident) => {
        #[async_trait::async_trait]
        impl actor_framework::ActorClient<$entity> for $client {
            type Error = $error;

            fn inner(&self) -> &actor_framework::ResourceClient<$entity> {
                &self.inner
            }

            fn map_error(e: actor_framework::FrameworkError) -> Self::Error {
                match e.downcast_entity::<$error>() {
                    Ok(typed) => typed,
                    Err(actor_framework::FrameworkError::NotFound(id)) => $error::NotFound(id),
                    Err(actor_framework::FrameworkError::Locked(id)) => $error::Locked(id),
                    Err(other) => $error::ActorCommunicationError(other.to_string()),
                }
            }
        }
    };
}
