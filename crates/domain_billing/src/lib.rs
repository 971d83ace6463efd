//! Billing Domain - Payment Allocation and Reconciliation
//!
//! This crate distributes a single payment across a firm's outstanding
//! invoices, possibly in currencies other than the payment's own, while
//! keeping every amount exact at its currency's precision.
//!
//! # Guarantees
//!
//! - No invoice is allocated more than its remaining balance plus the
//!   tolerance epsilon
//! - Each line's settlement and invoice-currency amounts derive from each
//!   other through its exchange rate
//! - A payment is only submitted when its declared total equals the sum of
//!   its allocations
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::PaymentSession;
//!
//! let mut session = PaymentSession::open(registry, firm_id, eur.id, dec!(0.92), invoices)?;
//! session.update_amount(invoice_a, Money::from_decimal(dec!(800.00), 2)?)?;
//! session.sync_amount_to_allocations()?;
//! session.set_date(today);
//!
//! let submission = session.submit("PAY-2024-0001")?;
//! ```

pub mod invoice;
pub mod conversion;
pub mod allocation;
pub mod payment;
pub mod reconciliation;
pub mod submission;
pub mod session;
pub mod error;

pub use invoice::{Invoice, InvoiceBook, InvoiceSource, InvoiceStatus};
pub use allocation::{AllocationLine, AllocationSet};
pub use payment::{Payment, PaymentMode};
pub use reconciliation::{ReconciliationValidator, Verdict};
pub use submission::{PaymentSubmission, SubmissionLine};
pub use session::PaymentSession;
pub use error::{BillingError, ErrorDetail};
