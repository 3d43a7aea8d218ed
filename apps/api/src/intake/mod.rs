// Intake: turns raw request payloads into validated domain values.
// Consent is asserted here before a candidate reaches the store.

pub mod handlers;
pub mod payloads;
