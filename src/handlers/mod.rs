pub mod common;
pub mod contract_invoices;
pub mod purchase_invoices;
pub mod purchase_requests;
pub mod suppliers;

use std::sync::Arc;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::storage::FileStore;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer encapsulating the business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub purchasing: Arc<crate::services::purchasing::PurchasingService>,
    pub suppliers: Arc<crate::services::suppliers::SupplierService>,
    pub contract_invoices: Arc<crate::services::contract_invoices::ContractInvoiceService>,
}

impl AppServices {
    pub fn new(
        db: Arc<DbPool>,
        event_sender: Arc<EventSender>,
        file_store: Arc<dyn FileStore>,
    ) -> Self {
        let purchasing = Arc::new(crate::services::purchasing::PurchasingService::new(
            db.clone(),
            event_sender.clone(),
            file_store,
        ));
        let suppliers = Arc::new(crate::services::suppliers::SupplierService::new(
            db.clone(),
            event_sender.clone(),
        ));
        let contract_invoices = Arc::new(
            crate::services::contract_invoices::ContractInvoiceService::new(db, event_sender),
        );

        Self {
            purchasing,
            suppliers,
            contract_invoices,
        }
    }
}
