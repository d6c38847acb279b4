//! # Owner Profile Client
use crate::model::{
    Actor, OwnerProfile, OwnerProfileCreate, OwnerProfileId, OwnerProfileUpdate, Role, UserId,
};
use crate::owner_profile_actor::{OwnerProfileAction, OwnerProfileError};
use actor_framework::{ActorClient, Filter, ResourceClient};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

/// Client for interacting with the OwnerProfile actor.
///
/// Creation checks for an existing profile first; the gate makes that check and the
/// create one step for every clone of the client.
#[derive(Clone)]
pub struct OwnerProfileClient {
    inner: ResourceClient<OwnerProfile>,
    gate: Arc<Mutex<()>>,
}

impl_actor_client!(OwnerProfileClient, OwnerProfile, OwnerProfileError);

impl OwnerProfileClient {
    pub fn new(inner: ResourceClient<OwnerProfile>) -> Self {
        Self {
            inner,
            gate: Arc::new(Mutex::new(())),
        }
    }

    #[instrument(skip(self))]
    pub async fn profile_for(
        &self,
        user_id: UserId,
    ) -> Result<Option<OwnerProfile>, OwnerProfileError> {
        let profiles = self
            .query(Filter::new("user", move |p: &OwnerProfile| p.user_id == user_id))
            .await?;
        Ok(profiles.into_iter().next())
    }

    #[instrument(skip(self))]
    pub async fn create_profile(
        &self,
        actor: Actor,
        params: OwnerProfileCreate,
    ) -> Result<OwnerProfileId, OwnerProfileError> {
        debug!("Sending request");
        if actor.role != Role::Owner || actor.id != params.user_id {
            return Err(OwnerProfileError::Unauthorized(
                "Owners create their own profile.".into(),
            ));
        }
        let _guard = self.gate.lock().await;
        if self.profile_for(params.user_id).await?.is_some() {
            warn!(user_id = %params.user_id, "Profile already exists");
            return Err(OwnerProfileError::AlreadyExists(params.user_id.to_string()));
        }
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        actor: Actor,
        id: OwnerProfileId,
        company_name: Option<String>,
        description: Option<String>,
    ) -> Result<OwnerProfile, OwnerProfileError> {
        debug!("Sending request");
        self.inner
            .update(
                id,
                OwnerProfileUpdate {
                    by: actor.id,
                    company_name,
                    description,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    /// Admin-only.
    #[instrument(skip(self))]
    pub async fn verify(
        &self,
        actor: Actor,
        id: OwnerProfileId,
    ) -> Result<OwnerProfile, OwnerProfileError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OwnerProfileAction::Verify { by: actor })
            .await
            .map_err(Self::map_error)
    }
}
