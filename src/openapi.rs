use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portal API",
        description = r#"
Backend for the internal procurement portal.

Purchase requests move through a fixed six-stage approval pipeline: second
approval, price research with supplier offers, senior-management approval,
order approval with delivery-invoice upload, and a closing price check that
can feed the supplier's running rating. Contract invoices are tracked
through their own strictly-sequential lifecycle.

All endpoints require a JWT bearer token:

```
Authorization: Bearer <your-jwt-token>
```
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    paths(
        handlers::purchase_requests::create_purchase_request,
        handlers::purchase_requests::list_purchase_requests,
        handlers::purchase_requests::get_purchase_request,
        handlers::purchase_requests::act_on_purchase_request,
        handlers::purchase_invoices::upload_invoice,
        handlers::purchase_invoices::list_invoices,
        handlers::purchase_invoices::get_invoice,
        handlers::purchase_invoices::price_check_invoice,
        handlers::suppliers::create_supplier,
        handlers::suppliers::list_suppliers,
        handlers::suppliers::get_supplier,
        handlers::contract_invoices::create_contract_invoice,
        handlers::contract_invoices::list_contract_invoices,
        handlers::contract_invoices::get_contract_invoice,
        handlers::contract_invoices::update_contract_invoice_status,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::services::purchasing::RequestAction,
        crate::entities::contract_invoice::ContractInvoiceStatus,
        handlers::purchase_requests::CreatePurchaseRequestRequest,
        handlers::purchase_requests::OfferRequest,
        handlers::purchase_requests::PurchaseRequestActionRequest,
        handlers::purchase_invoices::InvoicePriceCheckRequest,
        handlers::suppliers::CreateSupplierRequest,
        handlers::contract_invoices::CreateContractInvoiceRequest,
        handlers::contract_invoices::ContractInvoiceStatusRequest,
    )),
    tags(
        (name = "purchase-requests", description = "Purchase request approval pipeline"),
        (name = "purchase-invoices", description = "Delivery invoice upload and price check"),
        (name = "suppliers", description = "Supplier master data and ratings"),
        (name = "contract-invoices", description = "Contract invoice lifecycle tracking"),
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_generates() {
        let doc = ApiDoc::openapi();
        let json = serde_json::to_string(&doc).expect("openapi document serializes");
        assert!(json.contains("/api/v1/purchase-requests"));
        assert!(json.contains("/api/v1/contract-invoices/{id}/status"));
    }
}
