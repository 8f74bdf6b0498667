pub mod contract_invoices;
pub mod purchasing;
pub mod suppliers;
