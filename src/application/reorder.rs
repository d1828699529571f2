use std::marker::PhantomData;
use std::sync::Arc;

use crate::domain::catalog::{sort_by_position, EntityPatch, OrderableEntity};
use crate::domain::errors::DomainError;
use crate::domain::ports::AdminApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Outcome of a move. `items` is always the list as reloaded after the
/// writes settled; `failures` holds the writes the backend refused.
#[derive(Debug)]
pub struct ReorderOutcome<E> {
    pub items: Vec<E>,
    pub moved: bool,
    pub failures: Vec<DomainError>,
}

impl<E> ReorderOutcome<E> {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn message(&self) -> &'static str {
        match (self.moved, self.is_success()) {
            (false, _) => "Position unchanged",
            (true, true) => "Position changed",
            (true, false) => "Failed to change position",
        }
    }
}

/// Adjacent-swap reordering of a position-sorted list.
pub struct ListReorderer<A: ?Sized, E> {
    api: Arc<A>,
    _entity: PhantomData<fn() -> E>,
}

impl<A, E> ListReorderer<A, E>
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

    pub async fn load(&self) -> Result<Vec<E>, DomainError> {
        let mut items = E::load_all(self.api.as_ref()).await.map_err(|e| {
            log::error!("Failed to load {}: {}", E::KIND, e);
            e
        })?;
        sort_by_position(&mut items);
        Ok(items)
    }

    pub async fn move_up(&self, list: Vec<E>, index: usize) -> Result<ReorderOutcome<E>, DomainError> {
        self.shift(list, index, Direction::Up).await
    }

    pub async fn move_down(&self, list: Vec<E>, index: usize) -> Result<ReorderOutcome<E>, DomainError> {
        self.shift(list, index, Direction::Down).await
    }

    /// Reload the list, locate `id` and move it one slot.
    pub async fn move_by_id(&self, id: &str, direction: Direction) -> Result<ReorderOutcome<E>, DomainError> {
        let list = self.load().await?;
        let index = list
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| DomainError::NotFound(format!("{} {}", E::KIND, id)))?;
        self.shift(list, index, direction).await
    }

    async fn shift(
        &self,
        list: Vec<E>,
        index: usize,
        direction: Direction,
    ) -> Result<ReorderOutcome<E>, DomainError> {
        if index >= list.len() {
            return Err(DomainError::InvalidInput(format!(
                "index {} out of range for {} {}",
                index,
                list.len(),
                E::KIND
            )));
        }

        let neighbour = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&i| i < list.len()),
        };
        let Some(neighbour) = neighbour else {
            return Ok(ReorderOutcome {
                items: list,
                moved: false,
                failures: vec![],
            });
        };

        let (a, b) = (&list[index], &list[neighbour]);
        let (a_pos, b_pos) = (a.position(), b.position());

        // Both writes use the positions captured above and are attempted
        // regardless of each other's outcome.
        let (first, second) = tokio::join!(
            self.write_position(a.id(), b_pos),
            self.write_position(b.id(), a_pos),
        );
        let failures: Vec<DomainError> = [first, second]
            .into_iter()
            .filter_map(Result::err)
            .collect();

        if !failures.is_empty() {
            log::warn!(
                "Swap of {} {} and {} left {} failed write(s); reloading",
                E::KIND,
                a.id(),
                b.id(),
                failures.len()
            );
        }

        Ok(ReorderOutcome {
            items: self.load().await?,
            moved: true,
            failures,
        })
    }

    async fn write_position(&self, id: &str, position: i32) -> Result<(), DomainError> {
        self.api
            .update_entity(E::KIND, id, &EntityPatch::position(position))
            .await
            .map(|()| log::info!("Set {} {} position to {}", E::KIND, id, position))
            .map_err(|e| {
                log::error!("Failed to set {} {} position: {}", E::KIND, id, e);
                e
            })
    }
}
