use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of a contract invoice. Strictly sequential: every invoice
/// walks PENDING → ISSUED → RECEIVED → PAID_OUT one step at a time.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    strum::Display,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractInvoiceStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "ISSUED")]
    Issued,
    #[sea_orm(string_value = "RECEIVED")]
    Received,
    #[sea_orm(string_value = "PAID_OUT")]
    PaidOut,
}

impl ContractInvoiceStatus {
    /// The only status reachable from this one.
    pub fn next(self) -> Option<Self> {
        match self {
            ContractInvoiceStatus::Pending => Some(ContractInvoiceStatus::Issued),
            ContractInvoiceStatus::Issued => Some(ContractInvoiceStatus::Received),
            ContractInvoiceStatus::Received => Some(ContractInvoiceStatus::PaidOut),
            ContractInvoiceStatus::PaidOut => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contract_invoices")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_no: String,
    pub amount: Decimal,
    pub status: ContractInvoiceStatus,
    pub issued_date: Option<DateTime<Utc>>,
    pub payment_received_date: Option<DateTime<Utc>>,
    pub academician_paid_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_form_a_single_chain() {
        assert_eq!(
            ContractInvoiceStatus::Pending.next(),
            Some(ContractInvoiceStatus::Issued)
        );
        assert_eq!(
            ContractInvoiceStatus::Issued.next(),
            Some(ContractInvoiceStatus::Received)
        );
        assert_eq!(
            ContractInvoiceStatus::Received.next(),
            Some(ContractInvoiceStatus::PaidOut)
        );
        assert_eq!(ContractInvoiceStatus::PaidOut.next(), None);
    }

    #[test]
    fn status_uses_screaming_snake_wire_names() {
        let json = serde_json::to_string(&ContractInvoiceStatus::PaidOut).unwrap();
        assert_eq!(json, "\"PAID_OUT\"");
        assert_eq!(ContractInvoiceStatus::PaidOut.to_string(), "PAID_OUT");
    }
}
