// Sessions module: one open invoice form or POS cart and its pricing

pub mod models;
pub mod services;

pub use models::{
    InvoicePayload, PayloadItem, PricingSession, SeniatFields, SessionKind, SessionStatus,
    TransactionType,
};
pub use services::{
    OverlayStatus, PricingEngine, Quote, ReferenceOutcome, ReferenceOverlay, ReferenceRequest,
};
