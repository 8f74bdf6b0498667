use std::sync::Arc;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectionTrait, EntityTrait, QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::supplier,
    errors::ServiceError,
    events::{Event, EventSender},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplier {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub contact_name: Option<String>,
    #[validate(email(message = "contactEmail must be a valid email address"))]
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}

/// The canonical rating update: a weighted running mean over every rating
/// ever accepted, never a two-term average.
pub fn next_average(puan: f64, puan_sayisi: i32, rating: u8) -> f64 {
    (puan * puan_sayisi as f64 + rating as f64) / (puan_sayisi as f64 + 1.0)
}

/// Applies a rating to a supplier inside the caller's transaction. Returns
/// `None` when the supplier does not exist so the caller can skip silently.
pub async fn apply_rating<C: ConnectionTrait>(
    conn: &C,
    supplier_id: Uuid,
    rating: u8,
) -> Result<Option<supplier::Model>, ServiceError> {
    let Some(existing) = supplier::Entity::find_by_id(supplier_id).one(conn).await? else {
        return Ok(None);
    };

    let mut active: supplier::ActiveModel = existing.clone().into();
    active.puan = Set(next_average(existing.puan, existing.puan_sayisi, rating));
    active.puan_sayisi = Set(existing.puan_sayisi + 1);
    active.updated_at = Set(Utc::now());

    let updated = active.update(conn).await?;
    Ok(Some(updated))
}

/// Supplier master-data management. Ratings arrive exclusively through the
/// invoice price-check side effect.
#[derive(Clone)]
pub struct SupplierService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl SupplierService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, cmd))]
    pub async fn create_supplier(
        &self,
        cmd: CreateSupplier,
    ) -> Result<supplier::Model, ServiceError> {
        cmd.validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let now = Utc::now();
        let model = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(cmd.name),
            contact_name: Set(cmd.contact_name),
            contact_email: Set(cmd.contact_email),
            contact_phone: Set(cmd.contact_phone),
            puan: Set(0.0),
            puan_sayisi: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(supplier_id = %model.id, "supplier created");
        self.event_sender
            .send(Event::SupplierCreated(model.id))
            .await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: Uuid) -> Result<Option<supplier::Model>, ServiceError> {
        let model = supplier::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list_suppliers(&self) -> Result<Vec<supplier::Model>, ServiceError> {
        let suppliers = supplier::Entity::find()
            .order_by_asc(supplier::Column::Name)
            .all(&*self.db)
            .await?;
        Ok(suppliers)
    }
}
