use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::contract_invoice::{self, ContractInvoiceStatus},
    errors::ServiceError,
    events::{Event, EventSender},
};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractInvoice {
    #[validate(length(min = 1, message = "contractNo is required"))]
    pub contract_no: String,
    pub amount: Decimal,
}

/// Tracks contract invoices through their strictly-sequential lifecycle
/// (PENDING → ISSUED → RECEIVED → PAID_OUT), independent of purchase
/// requests.
#[derive(Clone)]
pub struct ContractInvoiceService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl ContractInvoiceService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, cmd))]
    pub async fn create_invoice(
        &self,
        cmd: CreateContractInvoice,
    ) -> Result<contract_invoice::Model, ServiceError> {
        cmd.validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let duplicate = contract_invoice::Entity::find()
            .filter(contract_invoice::Column::ContractNo.eq(cmd.contract_no.clone()))
            .one(&*self.db)
            .await?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(format!(
                "contract invoice with number '{}' already exists",
                cmd.contract_no
            )));
        }

        let now = Utc::now();
        let model = contract_invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            contract_no: Set(cmd.contract_no),
            amount: Set(cmd.amount),
            status: Set(ContractInvoiceStatus::Pending),
            issued_date: Set(None),
            payment_received_date: Set(None),
            academician_paid_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(invoice_id = %model.id, "contract invoice created");
        self.event_sender
            .send(Event::ContractInvoiceCreated(model.id))
            .await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_invoice(
        &self,
        id: Uuid,
    ) -> Result<Option<contract_invoice::Model>, ServiceError> {
        let model = contract_invoice::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        status: Option<ContractInvoiceStatus>,
    ) -> Result<Vec<contract_invoice::Model>, ServiceError> {
        let mut query = contract_invoice::Entity::find();
        if let Some(status) = status {
            query = query.filter(contract_invoice::Column::Status.eq(status));
        }
        let invoices = query
            .order_by_desc(contract_invoice::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(invoices)
    }

    /// Moves an invoice one step along its lifecycle, stamping the matching
    /// date field. Out-of-order requests fail naming both statuses.
    #[instrument(skip(self), fields(invoice_id = %id, requested = %requested))]
    pub async fn transition(
        &self,
        id: Uuid,
        requested: ContractInvoiceStatus,
        date: Option<DateTime<Utc>>,
    ) -> Result<contract_invoice::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let invoice = contract_invoice::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Contract invoice {} not found", id)))?;

        let current = invoice.status;
        if current.next() != Some(requested) {
            return Err(ServiceError::InvalidStatus(format!(
                "invalid transition from {} to {}",
                current, requested
            )));
        }

        let stamp = date.unwrap_or_else(Utc::now);
        let mut active: contract_invoice::ActiveModel = invoice.into();
        match requested {
            ContractInvoiceStatus::Issued => active.issued_date = Set(Some(stamp)),
            ContractInvoiceStatus::Received => active.payment_received_date = Set(Some(stamp)),
            ContractInvoiceStatus::PaidOut => active.academician_paid_date = Set(Some(stamp)),
            // PENDING is the initial state, never a transition target
            ContractInvoiceStatus::Pending => {}
        }
        active.status = Set(requested);
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(invoice_id = %updated.id, from = %current, to = %requested, "contract invoice status changed");
        self.event_sender
            .send(Event::ContractInvoiceStatusChanged {
                invoice_id: updated.id,
                from: current.to_string(),
                to: requested.to_string(),
            })
            .await;
        Ok(updated)
    }
}
