use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::catalog::{sort_by_position, EntityPatch, OrderableEntity};
use crate::domain::errors::DomainError;
use crate::domain::ports::AdminApi;

/// A notice for the operator plus the list reloaded after the change.
#[derive(Debug, Clone)]
pub struct Refreshed<E> {
    pub message: String,
    pub items: Vec<E>,
}

/// Activation and deletion of categories and banners.
pub struct CatalogService<A: ?Sized, E> {
    api: Arc<A>,
    _entity: PhantomData<fn() -> E>,
}

impl<A, E> CatalogService<A, E>
where
    A: AdminApi + ?Sized,
    E: OrderableEntity,
{
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            _entity: PhantomData,
        }
    }

    async fn reload(&self) -> Result<Vec<E>, DomainError> {
        let mut items = E::load_all(self.api.as_ref()).await?;
        sort_by_position(&mut items);
        Ok(items)
    }

    async fn find(&self, id: &str) -> Result<E, DomainError> {
        self.reload()
            .await?
            .into_iter()
            .find(|e| e.id() == id)
            .ok_or_else(|| DomainError::NotFound(format!("{} {}", E::KIND, id)))
    }

    pub async fn toggle_active(&self, id: &str) -> Result<Refreshed<E>, DomainError> {
        let entity = self.find(id).await?;
        let active = !entity.is_active();

        self.api
            .update_entity(E::KIND, id, &EntityPatch::active(active))
            .await
            .map_err(|e| {
                log::error!("Failed to toggle {} {}: {}", E::KIND, id, e);
                e
            })?;
        log::info!("{} {} active={}", E::KIND, id, active);

        let verb = if active { "activated" } else { "deactivated" };
        Ok(Refreshed {
            message: format!("\"{}\" {}", entity.display_name(), verb),
            items: self.reload().await?,
        })
    }

    pub async fn delete(&self, id: &str) -> Result<Refreshed<E>, DomainError> {
        let entity = self.find(id).await?;
        if let Err(e) = entity.ensure_deletable() {
            log::warn!("Rejected delete of {} {}: {}", E::KIND, id, e);
            return Err(e);
        }

        self.api.delete_entity(E::KIND, id).await.map_err(|e| {
            log::error!("Failed to delete {} {}: {}", E::KIND, id, e);
            e
        })?;
        log::info!("Deleted {} {}", E::KIND, id);

        Ok(Refreshed {
            message: format!("\"{}\" deleted", entity.display_name()),
            items: self.reload().await?,
        })
    }
}
