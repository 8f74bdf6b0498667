use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Position of a purchase request in the fixed six-step approval pipeline.
///
/// The integer values are the wire representation; `stage` serializes as a
/// plain number. Stage 5 carries the fixed display label "Sipariş Onayı".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
pub enum Stage {
    #[sea_orm(num_value = 1)]
    InitialSubmission,
    #[sea_orm(num_value = 2)]
    AwaitingSecondApproval,
    #[sea_orm(num_value = 3)]
    PriceResearch,
    #[sea_orm(num_value = 4)]
    SeniorManagementApproval,
    #[sea_orm(num_value = 5)]
    OrderApproval,
    #[sea_orm(num_value = 6)]
    Closing,
}

impl Stage {
    pub fn as_int(self) -> i32 {
        match self {
            Stage::InitialSubmission => 1,
            Stage::AwaitingSecondApproval => 2,
            Stage::PriceResearch => 3,
            Stage::SeniorManagementApproval => 4,
            Stage::OrderApproval => 5,
            Stage::Closing => 6,
        }
    }

    pub fn from_int(value: i32) -> Option<Self> {
        match value {
            1 => Some(Stage::InitialSubmission),
            2 => Some(Stage::AwaitingSecondApproval),
            3 => Some(Stage::PriceResearch),
            4 => Some(Stage::SeniorManagementApproval),
            5 => Some(Stage::OrderApproval),
            6 => Some(Stage::Closing),
            _ => None,
        }
    }

    /// Display label shown alongside the numeric stage.
    pub fn label(self) -> &'static str {
        match self {
            Stage::InitialSubmission => "Initial Submission",
            Stage::AwaitingSecondApproval => "Awaiting Second Approval",
            Stage::PriceResearch => "Price Research",
            Stage::SeniorManagementApproval => "Senior Management Approval",
            Stage::OrderApproval => "Sipariş Onayı",
            Stage::Closing => "Closing",
        }
    }
}

impl Serialize for Stage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_int())
    }
}

impl<'de> Deserialize<'de> for Stage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i32::deserialize(deserializer)?;
        Stage::from_int(value)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid stage {}", value)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
}

/// A supplier's price quote, embedded in its owning purchase request.
/// Offers are replaced wholesale, never mutated in place; the generated
/// `id` gives the selection a stable identity independent of array order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: Uuid,
    pub supplier_id: Option<Uuid>,
    pub supplier_name: String,
    pub price: Decimal,
    pub status: OfferStatus,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_requests")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub requester_id: Uuid,
    pub unit: String,
    pub item_name: String,
    pub item_spec: Option<String>,
    pub justification: Option<String>,
    pub quantity: i32,
    pub category_id: Option<Uuid>,
    pub stage: Stage,
    pub stage_label: String,
    pub approved: bool,
    pub rejected: bool,
    pub rejection_reason: Option<String>,
    #[sea_orm(column_type = "Json")]
    pub offers: Json,
    #[sea_orm(column_type = "Json", nullable)]
    pub selected_offer: Option<Json>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// Decodes the embedded offer list.
    pub fn offer_list(&self) -> Result<Vec<Offer>, serde_json::Error> {
        serde_json::from_value(self.offers.clone())
    }

    /// Decodes the selected-offer snapshot, if one was recorded.
    pub fn selected(&self) -> Option<Offer> {
        self.selected_offer
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_invoice::Entity")]
    PurchaseInvoices,
}

impl Related<super::purchase_invoice::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
