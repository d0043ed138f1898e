//! JSON bodies returned by the calculator endpoint.
//!
//! Field names are the ones the existing web front end reads, so they stay in
//! Spanish even though the engine's own types are in English.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::request::ValidatedLoan;
use crate::schedule::{AmortizationResult, InstallmentRow};

/// One row of `tabla`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub mes: u32,
    pub cuota: Money,
    pub interes: Money,
    pub amortizacion: Money,
    pub saldo: Money,
}

impl From<&InstallmentRow> for ScheduleRow {
    fn from(row: &InstallmentRow) -> Self {
        Self {
            mes: row.period,
            cuota: row.installment,
            interes: row.interest,
            amortizacion: row.principal_portion,
            saldo: row.remaining_balance,
        }
    }
}

/// Echoed inputs plus the computed schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub client: String,
    pub invoice: String,
    pub salesperson: String,
    pub loan_amount: Money,
    pub initial_payment: Money,
    pub principal: Money,
    pub term: u32,
    pub annual_rate: Decimal,
    pub cuota_mensual: Money,
    pub interes_total: Money,
    pub costo_total: Money,
    pub tabla: Vec<ScheduleRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResponse {
    pub success: bool,
    pub result: CalculationResult,
}

impl CalculationResponse {
    pub fn success(loan: &ValidatedLoan, schedule: &AmortizationResult) -> Self {
        Self {
            success: true,
            result: CalculationResult {
                client: loan.client.clone(),
                invoice: loan.invoice.clone(),
                salesperson: loan.salesperson.clone(),
                loan_amount: loan.loan_amount,
                initial_payment: loan.initial_payment,
                principal: loan.principal,
                term: loan.term_months,
                annual_rate: loan.annual_rate_percent,
                cuota_mensual: schedule.fixed_installment,
                interes_total: schedule.total_interest,
                costo_total: schedule.total_cost,
                tabla: schedule.rows.iter().map(ScheduleRow::from).collect(),
            },
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
