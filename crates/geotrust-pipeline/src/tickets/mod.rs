//! Ticket Generator: remediation tickets for stores behind unverified
//! transactions, at most one per `(store_id, day)`.

pub mod document;
pub mod generator;

pub use document::TicketDocument;
pub use generator::{plan_tickets, TicketGenerator, TicketKey, TicketOutcome, TicketPlan};
