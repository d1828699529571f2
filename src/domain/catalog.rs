use std::fmt;

use async_trait::async_trait;

use super::errors::DomainError;
use super::ports::AdminApi;

/// Lists whose display order is controlled by a `position` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Categories,
    Banners,
}

impl EntityKind {
    /// Path segment used by the collaborator API.
    pub fn as_path(self) -> &'static str {
        match self {
            EntityKind::Categories => "categories",
            EntityKind::Banners => "banners",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// Partial update of an orderable entity. Unset fields are left untouched
/// by the collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPatch {
    pub position: Option<i32>,
    pub is_active: Option<bool>,
}

impl EntityPatch {
    pub fn position(position: i32) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn active(is_active: bool) -> Self {
        Self {
            is_active: Some(is_active),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait OrderableEntity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn id(&self) -> &str;
    fn position(&self) -> i32;
    fn is_active(&self) -> bool;
    fn display_name(&self) -> &str;

    /// Checked before a delete request is issued.
    fn ensure_deletable(&self) -> Result<(), DomainError> {
        Ok(())
    }

    /// Fetch the full list of this kind from the collaborator.
    async fn load_all<A>(api: &A) -> Result<Vec<Self>, DomainError>
    where
        A: AdminApi + ?Sized;
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub position: i32,
    pub is_active: bool,
    pub products_count: u32,
}

#[async_trait]
impl OrderableEntity for Category {
    const KIND: EntityKind = EntityKind::Categories;

    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn ensure_deletable(&self) -> Result<(), DomainError> {
        if self.products_count > 0 {
            return Err(DomainError::CategoryNotEmpty {
                name: self.name.clone(),
                products: self.products_count,
            });
        }
        Ok(())
    }

    async fn load_all<A>(api: &A) -> Result<Vec<Self>, DomainError>
    where
        A: AdminApi + ?Sized,
    {
        api.list_categories().await
    }
}

#[derive(Debug, Clone)]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub image: Option<String>,
    /// `NONE`, or the kind of target `link_value` points at.
    pub link_type: String,
    pub link_value: Option<String>,
    pub position: i32,
    pub is_active: bool,
}

#[async_trait]
impl OrderableEntity for Banner {
    const KIND: EntityKind = EntityKind::Banners;

    fn id(&self) -> &str {
        &self.id
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn is_active(&self) -> bool {
        self.is_active
    }

    fn display_name(&self) -> &str {
        &self.title
    }

    async fn load_all<A>(api: &A) -> Result<Vec<Self>, DomainError>
    where
        A: AdminApi + ?Sized,
    {
        api.list_banners().await
    }
}

/// Stable ascending sort by `position`; entries with equal positions keep
/// the order the collaborator returned them in.
pub fn sort_by_position<E: OrderableEntity>(items: &mut [E]) {
    items.sort_by_key(|e| e.position());
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn category(id: &str, position: i32) -> Category {
        Category {
            id: id.to_string(),
            name: format!("Category {}", id),
            slug: id.to_lowercase(),
            description: None,
            position,
            is_active: true,
            products_count: 0,
        }
    }

    pub(crate) fn banner(id: &str, position: i32) -> Banner {
        Banner {
            id: id.to_string(),
            title: format!("Banner {}", id),
            image: None,
            link_type: "NONE".to_string(),
            link_value: None,
            position,
            is_active: true,
        }
    }

    #[test]
    fn sort_is_ascending_and_stable() {
        let mut items = vec![
            category("C", 2),
            category("A", 0),
            category("B1", 1),
            category("B2", 1),
        ];
        sort_by_position(&mut items);
        let ids: Vec<_> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["A", "B1", "B2", "C"]);
    }

    #[test]
    fn patch_constructors_set_one_field() {
        assert_eq!(
            EntityPatch::position(3),
            EntityPatch {
                position: Some(3),
                is_active: None
            }
        );
        assert_eq!(EntityPatch::active(false).position, None);
    }

    #[test]
    fn category_with_products_cannot_be_deleted() {
        let mut c = category("A", 0);
        assert!(c.ensure_deletable().is_ok());
        c.products_count = 3;
        assert!(matches!(
            c.ensure_deletable(),
            Err(DomainError::CategoryNotEmpty { products: 3, .. })
        ));
        assert!(banner("b", 0).ensure_deletable().is_ok());
    }

    #[test]
    fn kinds_map_to_api_paths() {
        assert_eq!(EntityKind::Categories.as_path(), "categories");
        assert_eq!(EntityKind::Banners.to_string(), "banners");
        assert_eq!(<Banner as OrderableEntity>::KIND, EntityKind::Banners);
    }
}
