use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    config::MAX_UPLOAD_BYTES,
    db::DbPool,
    entities::{
        purchase_invoice,
        purchase_request::{self, Offer, OfferStatus, Stage},
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::suppliers,
    storage::FileStore,
};

/// MIME types accepted for invoice uploads
const ALLOWED_UPLOAD_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/jpg",
    "image/png",
];

/// Reviewer actions on a purchase request. `Approve` and `Reject` double as
/// the invoice price-check actions.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, utoipa::ToSchema,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RequestAction {
    Approve,
    Reject,
    Hold,
    SaveOffers,
    NewOffer,
}

/// Incoming quote as submitted by a reviewer; ids and statuses are assigned
/// when the offer is attached to a request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OfferInput {
    pub supplier_id: Option<Uuid>,
    #[validate(length(min = 1, message = "supplierName is required"))]
    pub supplier_name: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub requester_id: Uuid,
    #[validate(length(min = 1, message = "unit is required"))]
    pub unit: String,
    #[validate(length(min = 1, message = "itemName is required"))]
    pub item_name: String,
    pub item_spec: Option<String>,
    pub justification: Option<String>,
    #[validate(range(min = 1, message = "quantity must be at least 1"))]
    pub quantity: i32,
    pub category_id: Option<Uuid>,
}

/// A reviewer action against a request, as received on the wire.
#[derive(Debug, Clone)]
pub struct RequestActionCommand {
    pub id: Uuid,
    pub action: RequestAction,
    pub rejection_reason: Option<String>,
    pub offers: Option<Vec<OfferInput>>,
    pub selected_offer_index: Option<usize>,
    pub new_offers: Option<Vec<OfferInput>>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub stage: Option<Stage>,
    pub approved: Option<bool>,
    pub rejected: Option<bool>,
}

#[derive(Debug)]
pub struct UploadInvoiceCommand {
    pub purchase_request_id: Uuid,
    pub amount: Decimal,
    pub uploaded_by: Uuid,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PriceCheckCommand {
    pub invoice_id: Uuid,
    pub action: RequestAction,
    pub rejection_reason: Option<String>,
    pub supplier_rating: Option<u8>,
}

/// The transition table: which reviewer actions are legal at which stage.
/// Every action is validated here before any per-action handling runs, so
/// legality lives in exactly one place.
fn action_allowed(stage: Stage, action: RequestAction) -> bool {
    matches!(
        (stage, action),
        (Stage::AwaitingSecondApproval, RequestAction::Approve)
            | (Stage::AwaitingSecondApproval, RequestAction::Reject)
            | (Stage::AwaitingSecondApproval, RequestAction::SaveOffers)
            | (Stage::PriceResearch, RequestAction::Approve)
            | (Stage::PriceResearch, RequestAction::Reject)
            | (Stage::PriceResearch, RequestAction::NewOffer)
            | (Stage::SeniorManagementApproval, RequestAction::Approve)
            | (Stage::SeniorManagementApproval, RequestAction::Hold)
    )
}

fn attach_offers(inputs: &[OfferInput]) -> Vec<Offer> {
    inputs
        .iter()
        .map(|input| Offer {
            id: Uuid::new_v4(),
            supplier_id: input.supplier_id,
            supplier_name: input.supplier_name.clone(),
            price: input.price,
            status: OfferStatus::Pending,
        })
        .collect()
}

fn require_reason(reason: &Option<String>) -> Result<String, ServiceError> {
    reason
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ServiceError::ValidationError("rejectionReason is required".to_string()))
}

/// Validates an upload before anything is stored or inserted.
fn validate_upload(content_type: &str, size: usize) -> Result<(), ServiceError> {
    if !ALLOWED_UPLOAD_TYPES.contains(&content_type) {
        return Err(ServiceError::ValidationError(format!(
            "unsupported file type '{}'; allowed types are PDF, JPEG and PNG",
            content_type
        )));
    }
    if size == 0 {
        return Err(ServiceError::ValidationError("file is required".to_string()));
    }
    if size > MAX_UPLOAD_BYTES {
        return Err(ServiceError::ValidationError(format!(
            "file exceeds the {} MB upload limit",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

fn offers_to_json(offers: &[Offer]) -> Result<serde_json::Value, ServiceError> {
    serde_json::to_value(offers)
        .map_err(|e| ServiceError::InternalError(format!("encode offers: {}", e)))
}

/// Drives purchase requests through the six-stage approval pipeline and the
/// delivery-invoice price check.
#[derive(Clone)]
pub struct PurchasingService {
    db: Arc<DbPool>,
    event_sender: Arc<EventSender>,
    file_store: Arc<dyn FileStore>,
}

impl PurchasingService {
    pub fn new(db: Arc<DbPool>, event_sender: Arc<EventSender>, file_store: Arc<dyn FileStore>) -> Self {
        Self {
            db,
            event_sender,
            file_store,
        }
    }

    /// Creates a request. Submission is the implicit first stage; the new
    /// record immediately awaits second approval.
    #[instrument(skip(self, cmd))]
    pub async fn create_request(
        &self,
        cmd: CreatePurchaseRequest,
    ) -> Result<purchase_request::Model, ServiceError> {
        cmd.validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let now = Utc::now();
        let stage = Stage::AwaitingSecondApproval;
        let model = purchase_request::ActiveModel {
            id: Set(Uuid::new_v4()),
            requester_id: Set(cmd.requester_id),
            unit: Set(cmd.unit),
            item_name: Set(cmd.item_name),
            item_spec: Set(cmd.item_spec),
            justification: Set(cmd.justification),
            quantity: Set(cmd.quantity),
            category_id: Set(cmd.category_id),
            stage: Set(stage),
            stage_label: Set(stage.label().to_string()),
            approved: Set(false),
            rejected: Set(false),
            rejection_reason: Set(None),
            offers: Set(serde_json::json!([])),
            selected_offer: Set(None),
            version: Set(1),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&*self.db)
        .await?;

        info!(request_id = %model.id, "purchase request created");
        self.event_sender
            .send(Event::PurchaseRequestCreated(model.id))
            .await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_request(
        &self,
        id: Uuid,
    ) -> Result<Option<purchase_request::Model>, ServiceError> {
        let model = purchase_request::Entity::find_by_id(id)
            .one(&*self.db)
            .await?;
        Ok(model)
    }

    /// Lists requests filtered by stage and review flags, newest first.
    #[instrument(skip(self))]
    pub async fn list_requests(
        &self,
        filter: RequestFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<purchase_request::Model>, u64), ServiceError> {
        let mut query = purchase_request::Entity::find();
        if let Some(stage) = filter.stage {
            query = query.filter(purchase_request::Column::Stage.eq(stage));
        }
        if let Some(approved) = filter.approved {
            query = query.filter(purchase_request::Column::Approved.eq(approved));
        }
        if let Some(rejected) = filter.rejected {
            query = query.filter(purchase_request::Column::Rejected.eq(rejected));
        }
        let query = query.order_by_desc(purchase_request::Column::CreatedAt);

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((items, total))
    }

    /// Applies a reviewer action to a request. Legality is checked against
    /// the transition table before any state is touched; the whole mutation
    /// commits in one transaction.
    #[instrument(skip(self, cmd), fields(request_id = %cmd.id, action = %cmd.action))]
    pub async fn apply_action(
        &self,
        cmd: RequestActionCommand,
    ) -> Result<purchase_request::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let request = purchase_request::Entity::find_by_id(cmd.id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase request {} not found", cmd.id))
            })?;

        let stage = request.stage;
        if !action_allowed(stage, cmd.action) {
            return Err(ServiceError::InvalidStatus(format!(
                "action '{}' is not valid for a purchase request at stage {} ({})",
                cmd.action,
                stage.as_int(),
                stage.label()
            )));
        }

        let mut active: purchase_request::ActiveModel = request.clone().into();
        let event;

        match (stage, cmd.action) {
            (Stage::AwaitingSecondApproval, RequestAction::Approve) => {
                if request.approved || request.rejected {
                    return Err(ServiceError::InvalidStatus(format!(
                        "purchase request {} has already been reviewed at stage 2",
                        cmd.id
                    )));
                }
                if let Some(inputs) = cmd.offers.as_deref() {
                    if !inputs.is_empty() {
                        active.offers = Set(offers_to_json(&attach_offers(inputs))?);
                    }
                }
                let next = Stage::PriceResearch;
                active.stage = Set(next);
                active.stage_label = Set(next.label().to_string());
                active.approved = Set(true);
                active.rejected = Set(false);
                active.rejection_reason = Set(None);
                event = Event::PurchaseRequestApproved {
                    request_id: cmd.id,
                    stage: next.as_int(),
                };
            }
            (Stage::AwaitingSecondApproval, RequestAction::Reject) => {
                let reason = require_reason(&cmd.rejection_reason)?;
                active.approved = Set(false);
                active.rejected = Set(true);
                active.rejection_reason = Set(Some(reason));
                // stage stays pinned at 2
                event = Event::PurchaseRequestRejected {
                    request_id: cmd.id,
                    stage: stage.as_int(),
                };
            }
            (Stage::AwaitingSecondApproval, RequestAction::SaveOffers) => {
                let inputs = cmd.offers.as_deref().ok_or_else(|| {
                    ServiceError::ValidationError("offers is required for saveOffers".to_string())
                })?;
                let offers = attach_offers(inputs);
                active.offers = Set(offers_to_json(&offers)?);
                event = Event::OffersSaved {
                    request_id: cmd.id,
                    count: offers.len(),
                };
            }
            (Stage::PriceResearch, RequestAction::Approve) => {
                let mut offers = request.offer_list().map_err(|e| {
                    ServiceError::InternalError(format!("decode offers: {}", e))
                })?;
                if offers.is_empty() {
                    return Err(ServiceError::ValidationError(
                        "no offers to select from".to_string(),
                    ));
                }
                let index = cmd.selected_offer_index.ok_or_else(|| {
                    ServiceError::ValidationError("selectedOfferIndex is required".to_string())
                })?;
                if index >= offers.len() {
                    return Err(ServiceError::ValidationError(format!(
                        "selectedOfferIndex {} is out of bounds for {} offers",
                        index,
                        offers.len()
                    )));
                }

                for (i, offer) in offers.iter_mut().enumerate() {
                    offer.status = if i == index {
                        OfferStatus::Accepted
                    } else {
                        OfferStatus::Rejected
                    };
                }
                let chosen = offers[index].clone();

                active.offers = Set(offers_to_json(&offers)?);
                active.selected_offer = Set(Some(
                    serde_json::to_value(&chosen).map_err(|e| {
                        ServiceError::InternalError(format!("encode selected offer: {}", e))
                    })?,
                ));
                let next = Stage::SeniorManagementApproval;
                active.stage = Set(next);
                active.stage_label = Set(next.label().to_string());
                active.approved = Set(true);
                active.rejected = Set(false);
                active.rejection_reason = Set(None);
                event = Event::OfferSelected {
                    request_id: cmd.id,
                    offer_id: chosen.id,
                };
            }
            (Stage::PriceResearch, RequestAction::Reject) => {
                let reason = require_reason(&cmd.rejection_reason)?;
                active.approved = Set(false);
                active.rejected = Set(true);
                active.rejection_reason = Set(Some(reason));
                // stage explicitly pinned back to price research
                active.stage = Set(Stage::PriceResearch);
                active.stage_label = Set(Stage::PriceResearch.label().to_string());
                event = Event::PurchaseRequestRejected {
                    request_id: cmd.id,
                    stage: Stage::PriceResearch.as_int(),
                };
            }
            (Stage::PriceResearch, RequestAction::NewOffer) => {
                let inputs = cmd
                    .new_offers
                    .as_deref()
                    .filter(|list| !list.is_empty())
                    .ok_or_else(|| {
                        ServiceError::ValidationError(
                            "newOffers must be a non-empty list".to_string(),
                        )
                    })?;
                let offers = attach_offers(inputs);
                active.offers = Set(offers_to_json(&offers)?);
                active.approved = Set(false);
                active.rejected = Set(false);
                active.rejection_reason = Set(None);
                event = Event::OffersSaved {
                    request_id: cmd.id,
                    count: offers.len(),
                };
            }
            (Stage::SeniorManagementApproval, RequestAction::Approve) => {
                let next = Stage::OrderApproval;
                active.stage = Set(next);
                active.stage_label = Set(next.label().to_string());
                active.approved = Set(true);
                active.rejected = Set(false);
                active.rejection_reason = Set(None);
                event = Event::PurchaseRequestApproved {
                    request_id: cmd.id,
                    stage: next.as_int(),
                };
            }
            (Stage::SeniorManagementApproval, RequestAction::Hold) => {
                // acknowledge without advancing; only updated_at moves
                event = Event::PurchaseRequestHeld(cmd.id);
            }
            _ => unreachable!("action_allowed admitted an unhandled transition"),
        }

        active.version = Set(request.version + 1);
        active.updated_at = Set(Utc::now());
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(request_id = %cmd.id, action = %cmd.action, stage = updated.stage.as_int(), "purchase request action applied");
        self.event_sender.send(event).await;
        Ok(updated)
    }

    /// Stores an uploaded delivery invoice against a request in the order
    /// stage. Validation runs before anything is written.
    #[instrument(skip(self, cmd), fields(purchase_request_id = %cmd.purchase_request_id, size = cmd.bytes.len()))]
    pub async fn upload_invoice(
        &self,
        cmd: UploadInvoiceCommand,
    ) -> Result<purchase_invoice::Model, ServiceError> {
        let content_type = cmd.content_type.as_deref().unwrap_or_default();
        validate_upload(content_type, cmd.bytes.len())?;

        let request = purchase_request::Entity::find_by_id(cmd.purchase_request_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Purchase request {} not found",
                    cmd.purchase_request_id
                ))
            })?;

        if request.stage < Stage::OrderApproval {
            return Err(ServiceError::InvalidStatus(format!(
                "purchase request {} is at stage {} ({}) and is not accepting invoices",
                request.id,
                request.stage.as_int(),
                request.stage.label()
            )));
        }

        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(&cmd.file_name));
        let file_url = self.file_store.put(&stored_name, &cmd.bytes).await?;

        let invoice = purchase_invoice::ActiveModel {
            id: Set(Uuid::new_v4()),
            purchase_request_id: Set(request.id),
            file_url: Set(file_url),
            amount: Set(cmd.amount),
            approved: Set(false),
            rejection_reason: Set(None),
            supplier_rated: Set(false),
            uploaded_by: Set(cmd.uploaded_by),
            created_at: Set(Utc::now()),
        }
        .insert(&*self.db)
        .await?;

        info!(invoice_id = %invoice.id, request_id = %request.id, "invoice uploaded");
        self.event_sender
            .send(Event::InvoiceUploaded {
                invoice_id: invoice.id,
                request_id: request.id,
            })
            .await;
        Ok(invoice)
    }

    #[instrument(skip(self))]
    pub async fn get_invoice(
        &self,
        id: Uuid,
    ) -> Result<Option<purchase_invoice::Model>, ServiceError> {
        let model = purchase_invoice::Entity::find_by_id(id).one(&*self.db).await?;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn list_invoices(
        &self,
        purchase_request_id: Option<Uuid>,
    ) -> Result<Vec<purchase_invoice::Model>, ServiceError> {
        let mut query = purchase_invoice::Entity::find();
        if let Some(id) = purchase_request_id {
            query = query.filter(purchase_invoice::Column::PurchaseRequestId.eq(id));
        }
        let invoices = query
            .order_by_desc(purchase_invoice::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(invoices)
    }

    /// The stage-5 price check. Approval closes the request (stage 6) and,
    /// when a valid rating and a resolvable supplier are present, feeds the
    /// supplier's running average, all in one transaction. An unresolvable
    /// supplier silently skips the rating; the approval still stands.
    #[instrument(skip(self, cmd), fields(invoice_id = %cmd.invoice_id, action = %cmd.action))]
    pub async fn price_check(
        &self,
        cmd: PriceCheckCommand,
    ) -> Result<purchase_invoice::Model, ServiceError> {
        if let Some(rating) = cmd.supplier_rating {
            if !(1..=5).contains(&rating) {
                return Err(ServiceError::ValidationError(
                    "supplierRating must be between 1 and 5".to_string(),
                ));
            }
        }

        let txn = self.db.begin().await?;

        let invoice = purchase_invoice::Entity::find_by_id(cmd.invoice_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Invoice {} not found", cmd.invoice_id))
            })?;

        let request = purchase_request::Entity::find_by_id(invoice.purchase_request_id)
            .one(&txn)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Purchase request {} not found",
                    invoice.purchase_request_id
                ))
            })?;

        if request.stage < Stage::OrderApproval {
            return Err(ServiceError::InvalidStatus(format!(
                "purchase request {} is at stage {} ({}) and has no invoice to check",
                request.id,
                request.stage.as_int(),
                request.stage.label()
            )));
        }

        let mut invoice_active: purchase_invoice::ActiveModel = invoice.clone().into();
        let mut request_active: purchase_request::ActiveModel = request.clone().into();
        let mut rated: Option<(Uuid, u8)> = None;
        let approved;

        match cmd.action {
            RequestAction::Approve => {
                approved = true;
                invoice_active.approved = Set(true);
                invoice_active.rejection_reason = Set(None);

                let next = Stage::Closing;
                request_active.stage = Set(next);
                request_active.stage_label = Set(next.label().to_string());
                request_active.approved = Set(true);
                request_active.rejected = Set(false);
                request_active.rejection_reason = Set(None);

                if let Some(rating) = cmd.supplier_rating {
                    match request.selected().and_then(|offer| offer.supplier_id) {
                        Some(supplier_id) => {
                            match suppliers::apply_rating(&txn, supplier_id, rating).await? {
                                Some(supplier) => {
                                    invoice_active.supplier_rated = Set(true);
                                    rated = Some((supplier.id, rating));
                                }
                                None => debug!(
                                    %supplier_id,
                                    "supplier not found; rating skipped"
                                ),
                            }
                        }
                        None => debug!(
                            request_id = %request.id,
                            "selected offer missing or without supplier id; rating skipped"
                        ),
                    }
                }
            }
            RequestAction::Reject => {
                approved = false;
                let reason = require_reason(&cmd.rejection_reason)?;
                invoice_active.approved = Set(false);
                invoice_active.rejection_reason = Set(Some(reason.clone()));

                // the request stays in the order stage for another cycle
                request_active.stage = Set(Stage::OrderApproval);
                request_active.stage_label = Set(Stage::OrderApproval.label().to_string());
                request_active.approved = Set(false);
                request_active.rejected = Set(true);
                request_active.rejection_reason = Set(Some(reason));
            }
            other => {
                return Err(ServiceError::InvalidStatus(format!(
                    "action '{}' is not valid for an invoice price check",
                    other
                )));
            }
        }

        request_active.version = Set(request.version + 1);
        request_active.updated_at = Set(Utc::now());

        let updated_invoice = invoice_active.update(&txn).await?;
        request_active.update(&txn).await?;
        txn.commit().await?;

        info!(invoice_id = %updated_invoice.id, approved, "invoice price check applied");
        if approved {
            self.event_sender
                .send(Event::InvoicePriceApproved {
                    invoice_id: updated_invoice.id,
                    request_id: request.id,
                })
                .await;
        } else {
            self.event_sender
                .send(Event::InvoicePriceRejected {
                    invoice_id: updated_invoice.id,
                    request_id: request.id,
                })
                .await;
        }
        if let Some((supplier_id, rating)) = rated {
            self.event_sender
                .send(Event::SupplierRated {
                    supplier_id,
                    rating,
                })
                .await;
        }

        Ok(updated_invoice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(Stage::AwaitingSecondApproval, RequestAction::Approve, true)]
    #[test_case(Stage::AwaitingSecondApproval, RequestAction::Reject, true)]
    #[test_case(Stage::AwaitingSecondApproval, RequestAction::SaveOffers, true)]
    #[test_case(Stage::AwaitingSecondApproval, RequestAction::Hold, false)]
    #[test_case(Stage::AwaitingSecondApproval, RequestAction::NewOffer, false)]
    #[test_case(Stage::PriceResearch, RequestAction::Approve, true)]
    #[test_case(Stage::PriceResearch, RequestAction::Reject, true)]
    #[test_case(Stage::PriceResearch, RequestAction::NewOffer, true)]
    #[test_case(Stage::PriceResearch, RequestAction::SaveOffers, false)]
    #[test_case(Stage::PriceResearch, RequestAction::Hold, false)]
    #[test_case(Stage::SeniorManagementApproval, RequestAction::Approve, true)]
    #[test_case(Stage::SeniorManagementApproval, RequestAction::Hold, true)]
    #[test_case(Stage::SeniorManagementApproval, RequestAction::Reject, false)]
    #[test_case(Stage::InitialSubmission, RequestAction::Approve, false)]
    #[test_case(Stage::OrderApproval, RequestAction::Approve, false)]
    #[test_case(Stage::OrderApproval, RequestAction::Hold, false)]
    #[test_case(Stage::Closing, RequestAction::Approve, false)]
    fn transition_table(stage: Stage, action: RequestAction, allowed: bool) {
        assert_eq!(action_allowed(stage, action), allowed);
    }

    #[test]
    fn attached_offers_start_pending_with_fresh_ids() {
        let inputs = vec![
            OfferInput {
                supplier_id: Some(Uuid::new_v4()),
                supplier_name: "Acme".into(),
                price: rust_decimal_macros::dec!(100),
            },
            OfferInput {
                supplier_id: None,
                supplier_name: "Globex".into(),
                price: rust_decimal_macros::dec!(95.50),
            },
        ];
        let offers = attach_offers(&inputs);
        assert_eq!(offers.len(), 2);
        assert!(offers.iter().all(|o| o.status == OfferStatus::Pending));
        assert_ne!(offers[0].id, offers[1].id);
        assert_eq!(offers[1].supplier_name, "Globex");
    }

    #[test]
    fn reject_requires_a_non_empty_reason() {
        assert!(require_reason(&None).is_err());
        assert!(require_reason(&Some("   ".into())).is_err());
        assert_eq!(require_reason(&Some(" too costly ".into())).unwrap(), "too costly");
    }

    #[test]
    fn upload_validation_enforces_type_and_size() {
        assert!(validate_upload("application/pdf", 1024).is_ok());
        assert!(validate_upload("image/png", MAX_UPLOAD_BYTES).is_ok());

        assert!(validate_upload("text/plain", 1024).is_err());
        assert!(validate_upload("", 1024).is_err());
        assert!(validate_upload("application/pdf", 0).is_err());
        assert!(validate_upload("application/pdf", MAX_UPLOAD_BYTES + 1).is_err());
    }

    #[test]
    fn file_names_are_sanitized() {
        assert_eq!(sanitize_file_name("fatura 2025/06.pdf"), "fatura_2025_06.pdf");
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[test]
    fn action_names_match_the_wire_format() {
        assert_eq!(RequestAction::SaveOffers.to_string(), "saveOffers");
        assert_eq!(RequestAction::NewOffer.to_string(), "newOffer");
        let parsed: RequestAction = serde_json::from_str("\"saveOffers\"").unwrap();
        assert_eq!(parsed, RequestAction::SaveOffers);
    }
}
