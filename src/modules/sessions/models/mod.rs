mod payload;
mod seniat;
mod session;

pub use payload::{InvoicePayload, PayloadItem};
pub use seniat::{SeniatFields, TransactionType};
pub use session::{PricingSession, SessionKind, SessionStatus};
