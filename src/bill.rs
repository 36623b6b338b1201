use chrono::{DateTime, Duration, Local};
use iso_11649::RfCreditorReference;
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::validate::{Constraint, FieldRules, Validatable};

/// Settlement currency of a bill. Swiss QR bills settle in francs or
/// euros only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Chf,
    Eur,
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Chf
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Chf => write!(f, "CHF"),
            Currency::Eur => write!(f, "EUR"),
        }
    }
}

/// A bill in the making: the creditor side of the payment slip, an
/// optional debtor, and the payment details.
///
/// This is plain data for the slip encoder and renderer downstream.
/// Nothing here is checked on assignment; run validation before handing
/// the bill on. An absent `amount` produces a slip where the payer fills
/// in the amount.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// IBAN of the account the payment goes to.
    pub account: String,
    pub creditor: Address,
    pub debtor: Option<Address>,
    pub amount: Option<f64>,
    pub currency: Currency,
    /// ISO 11649 creditor reference ("RF…").
    pub reference: Option<String>,
    /// Unstructured message shown to the payer.
    pub additional_info: Option<String>,
    pub date: DateTime<Local>,
    pub due_date: DateTime<Local>,
}

impl Bill {
    /// Builds an ISO 11649 creditor reference from the bill number, the
    /// customer number and the billing year. The base encodes all three,
    /// truncated to fixed widths, so a reference can be traced back to
    /// the bill it belongs to; the check digits come from the RF scheme.
    pub fn generate_reference(bill_number: u64, customer_number: u64, year: i32) -> String {
        let base = format!(
            "{:04}C{:03}B{:04}",
            year,
            customer_number % 1000,
            bill_number % 10_000
        );
        let reference = RfCreditorReference::new(base.as_str());

        reference.to_string()
    }
}

impl Default for Bill {
    fn default() -> Self {
        let now = Local::now();
        let due_date = now + Duration::days(30);

        Self {
            account: String::new(),
            creditor: Address::new(),
            debtor: None,
            amount: None,
            currency: Currency::default(),
            reference: None,
            additional_info: None,
            date: now,
            due_date,
        }
    }
}

impl Validatable for Bill {
    fn validation_rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new(
                "account",
                Some(self.account.as_str()),
                &[Constraint::NotBlank, Constraint::Iban],
            ),
            FieldRules::new(
                "reference",
                self.reference.as_deref(),
                &[Constraint::MaxLength(25)],
            ),
            FieldRules::new(
                "additional_info",
                self.additional_info.as_deref(),
                &[Constraint::MaxLength(140)],
            ),
        ]
    }

    fn nested(&self) -> Vec<(&'static str, &dyn Validatable)> {
        let mut nested: Vec<(&'static str, &dyn Validatable)> = vec![("creditor", &self.creditor)];

        if let Some(debtor) = &self.debtor {
            nested.push(("debtor", debtor));
        }

        nested
    }
}
