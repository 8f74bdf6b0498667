pub mod contract_invoice;
pub mod purchase_invoice;
pub mod purchase_request;
pub mod supplier;
