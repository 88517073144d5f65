pub mod pricing_engine;
pub mod reference_overlay;

pub use pricing_engine::{PricingEngine, Quote, ReferenceRequest};
pub use reference_overlay::{OverlayStatus, ReferenceOutcome, ReferenceOverlay};
