// Domain-specific error types
pub mod errors;

// Outcome and exit status of a lookup
pub mod outcome;

// Port interfaces
pub mod ports;

// JSON-RPC envelopes
pub mod rpc;

// Query, item id and value types
pub mod types;
