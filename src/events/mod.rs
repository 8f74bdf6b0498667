use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Events emitted by the workflow services. Delivery is best-effort; a
/// failed send never fails the originating request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    PurchaseRequestCreated(Uuid),
    PurchaseRequestApproved {
        request_id: Uuid,
        stage: i32,
    },
    PurchaseRequestRejected {
        request_id: Uuid,
        stage: i32,
    },
    PurchaseRequestHeld(Uuid),
    OffersSaved {
        request_id: Uuid,
        count: usize,
    },
    OfferSelected {
        request_id: Uuid,
        offer_id: Uuid,
    },
    InvoiceUploaded {
        invoice_id: Uuid,
        request_id: Uuid,
    },
    InvoicePriceApproved {
        invoice_id: Uuid,
        request_id: Uuid,
    },
    InvoicePriceRejected {
        invoice_id: Uuid,
        request_id: Uuid,
    },
    SupplierCreated(Uuid),
    SupplierRated {
        supplier_id: Uuid,
        rating: u8,
    },
    ContractInvoiceCreated(Uuid),
    ContractInvoiceStatusChanged {
        invoice_id: Uuid,
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, logging on failure instead of propagating it.
    pub async fn send(&self, event: Event) {
        if let Err(e) = self.sender.send(event).await {
            warn!("Failed to dispatch event: {}", e);
        }
    }
}

/// Consumes workflow events and logs them. The processing loop exits when
/// every sender has been dropped.
pub async fn process_events(mut receiver: mpsc::Receiver<Event>) {
    info!("Event processor started");
    while let Some(event) = receiver.recv().await {
        debug!(?event, "event received");
    }
    info!("Event processor stopped");
}
