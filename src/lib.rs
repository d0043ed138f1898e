//! `french_amortization` calculates fixed-installment loan schedules.
//!
//! Under the French method (the Price table) every month's payment is the
//! same, while the split between interest and amortization shifts as the
//! balance declines. Currency has no sub-unit here: every figure is rounded to
//! a whole unit, ties to even.
//!
//! The engine lives in [`payment`] and [`schedule`] and is pure: no I/O, no
//! shared state, no validation. [`request`], [`response`] and [`server`] wrap
//! it in the small HTTP calculator the `amortization-server` binary runs.
//!
//! ## Usage
//!
//! ```rust
//! use french_amortization::generate_schedule;
//! use rust_decimal_macros::dec;
//!
//! fn main() {
//!     let result = generate_schedule(dec!(1200), dec!(12), 12);
//!
//!     for row in &result.rows {
//!         println!(
//!             "{:>3} {:>6} {:>5} {:>6} {:>6}",
//!             row.period, row.installment, row.interest, row.principal_portion, row.remaining_balance
//!         );
//!     }
//!     println!("Total interest: {}", result.total_interest);
//!     println!("Total cost:     {}", result.total_cost);
//!
//!     assert_eq!(result.rows.len(), 12);
//!     assert_eq!(result.rows[0].installment, dec!(107));
//! }
//! ```

pub mod config;
pub mod error;
pub mod money;
pub mod payment;
pub mod request;
pub mod response;
pub mod schedule;
pub mod server;

pub use money::{Money, Rate, round_money};
pub use payment::{calculate_installment, periodic_rate};
pub use schedule::{AmortizationResult, InstallmentRow, LoanTerms, generate_schedule};
