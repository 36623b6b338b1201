//! Data groups and validation for Swiss QR-bill payment slips.
//!
//! The crate covers the data side of a payment slip only: the [`Address`]
//! data group with its display and export contracts, the [`Bill`]
//! container owning addresses in the creditor and debtor roles, and a
//! declarative validation layer. Encoding the payment code and rendering
//! documents are jobs for the consumers of these types.

pub mod address;
pub mod bill;
pub mod country;
pub mod validate;

pub use address::Address;
pub use bill::{Bill, Currency};
pub use country::is_valid_country_code;
pub use validate::{
    validate, Constraint, FieldRules, Validatable, ValidationError, Violation,
};

/// Export contract for the machine-readable payment code.
///
/// Data groups hand their fields to the payment-code encoder as an
/// ordered sequence of optional values. The encoder depends on position
/// and count, never on field names, so for any given data group the
/// sequence is fixed.
pub trait QrCodeData {
    fn qr_code_data(&self) -> Vec<Option<&str>>;
}
