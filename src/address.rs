use serde::{Deserialize, Serialize};

use crate::validate::{Constraint, FieldRules, Validatable};
use crate::QrCodeData;

/// Postal address of a creditor or debtor on a payment slip.
///
/// An address starts out empty and is filled through its setters, which
/// chain. None of the fields are checked on the way in; rule violations
/// only surface when the instance is validated. `country` is always
/// stored upper-cased, and an unset field stays distinguishable from one
/// set to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Name or company.
    name: Option<String>,
    /// Street or P.O. box, without the house number.
    street: Option<String>,
    house_number: Option<String>,
    /// Postal code without a country prefix.
    postal_code: Option<String>,
    city: Option<String>,
    /// ISO 3166-1 alpha-2, upper-case.
    country: Option<String>,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn street(&self) -> Option<&str> {
        self.street.as_deref()
    }

    /// Sets or clears the street. House numbers go through
    /// [`set_house_number`](Address::set_house_number) instead.
    pub fn set_street(&mut self, street: Option<String>) -> &mut Self {
        self.street = street;
        self
    }

    pub fn house_number(&self) -> Option<&str> {
        self.house_number.as_deref()
    }

    pub fn set_house_number(&mut self, house_number: Option<String>) -> &mut Self {
        self.house_number = house_number;
        self
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn set_postal_code(&mut self, postal_code: impl Into<String>) -> &mut Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn set_city(&mut self, city: impl Into<String>) -> &mut Self {
        self.city = Some(city.into());
        self
    }

    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    /// Stores the country upper-cased, whatever the input case.
    pub fn set_country(&mut self, country: impl Into<String>) -> &mut Self {
        self.country = Some(country.into().to_uppercase());
        self
    }

    /// The human-readable multi-line form:
    ///
    /// ```text
    /// Jane Doe
    /// Main St 12
    /// CH-8000 Zurich
    /// ```
    ///
    /// The street line only appears when the street is set and non-empty,
    /// with the house number appended on the same line when present.
    /// Never validates; unset fields render as empty segments.
    pub fn full_address(&self) -> String {
        let mut address = self.name.clone().unwrap_or_default();

        if let Some(street) = self.street.as_deref().filter(|s| !s.is_empty()) {
            address.push('\n');
            address.push_str(street);

            if let Some(number) = self.house_number.as_deref().filter(|n| !n.is_empty()) {
                address.push(' ');
                address.push_str(number);
            }
        }

        address.push_str(&format!(
            "\n{}-{} {}",
            self.country.as_deref().unwrap_or_default(),
            self.postal_code.as_deref().unwrap_or_default(),
            self.city.as_deref().unwrap_or_default()
        ));

        address
    }
}

impl QrCodeData for Address {
    /// Always six positions in the order name, street, house number,
    /// postal code, city, country. The payment-code encoder consuming
    /// this relies on position and count only.
    fn qr_code_data(&self) -> Vec<Option<&str>> {
        vec![
            self.name.as_deref(),
            self.street.as_deref(),
            self.house_number.as_deref(),
            self.postal_code.as_deref(),
            self.city.as_deref(),
            self.country.as_deref(),
        ]
    }
}

impl Validatable for Address {
    fn validation_rules(&self) -> Vec<FieldRules<'_>> {
        vec![
            FieldRules::new(
                "name",
                self.name.as_deref(),
                &[Constraint::NotBlank, Constraint::MaxLength(70)],
            ),
            FieldRules::new("street", self.street.as_deref(), &[Constraint::MaxLength(70)]),
            FieldRules::new(
                "house_number",
                self.house_number.as_deref(),
                &[Constraint::MaxLength(16)],
            ),
            FieldRules::new(
                "postal_code",
                self.postal_code.as_deref(),
                &[Constraint::NotBlank, Constraint::MaxLength(16)],
            ),
            FieldRules::new(
                "city",
                self.city.as_deref(),
                &[Constraint::NotBlank, Constraint::MaxLength(35)],
            ),
            FieldRules::new(
                "country",
                self.country.as_deref(),
                &[Constraint::NotBlank, Constraint::CountryCode],
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::validate;

    fn sample() -> Address {
        let mut address = Address::new();
        address
            .set_name("Jane Doe")
            .set_street(Some("Main St".to_string()))
            .set_house_number(Some("12".to_string()))
            .set_postal_code("8000")
            .set_city("Zurich")
            .set_country("ch");
        address
    }

    #[test]
    fn country_is_stored_upper_case() {
        let mut address = Address::new();
        address.set_country("ch");
        assert_eq!(address.country(), Some("CH"));
        address.set_country("Li");
        assert_eq!(address.country(), Some("LI"));
    }

    #[test]
    fn full_address_with_street_and_house_number() {
        assert_eq!(
            sample().full_address(),
            "Jane Doe\nMain St 12\nCH-8000 Zurich"
        );
    }

    #[test]
    fn full_address_without_street() {
        let mut address = Address::new();
        address
            .set_name("Acme")
            .set_postal_code("1000")
            .set_city("Lausanne")
            .set_country("CH");
        assert_eq!(address.full_address(), "Acme\nCH-1000 Lausanne");
    }

    #[test]
    fn full_address_with_street_but_no_house_number() {
        let mut address = sample();
        address.set_house_number(None);
        assert_eq!(address.full_address(), "Jane Doe\nMain St\nCH-8000 Zurich");
    }

    #[test]
    fn empty_street_suppresses_the_street_line() {
        let mut address = sample();
        address.set_street(Some(String::new()));
        // still set, just not rendered, and the house number goes with it
        assert_eq!(address.street(), Some(""));
        assert_eq!(address.full_address(), "Jane Doe\nCH-8000 Zurich");
    }

    #[test]
    fn house_number_renders_only_with_a_street() {
        let mut address = sample();
        address.set_street(None);
        assert_eq!(address.house_number(), Some("12"));
        assert_eq!(address.full_address(), "Jane Doe\nCH-8000 Zurich");
    }

    #[test]
    fn qr_code_data_always_has_six_positions() {
        assert_eq!(Address::new().qr_code_data(), vec![None; 6]);
        assert_eq!(
            sample().qr_code_data(),
            vec![
                Some("Jane Doe"),
                Some("Main St"),
                Some("12"),
                Some("8000"),
                Some("Zurich"),
                Some("CH"),
            ]
        );
    }

    #[test]
    fn setters_overwrite() {
        let mut address = Address::new();
        address.set_name("First").set_name("Second");
        assert_eq!(address.name(), Some("Second"));
    }

    #[test]
    fn getters_are_repeatable() {
        let address = sample();
        assert_eq!(address.name(), address.name());
        assert_eq!(address.qr_code_data(), address.qr_code_data());
        assert_eq!(address.full_address(), address.full_address());
    }

    #[test]
    fn valid_address_passes_validation() {
        assert!(sample().is_valid());
        assert!(sample().violations().is_empty());
    }

    #[test]
    fn missing_name_is_reported_on_the_name_field() {
        let mut address = Address::new();
        address
            .set_postal_code("8000")
            .set_city("Zurich")
            .set_country("CH");
        let violations = address.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "name");
    }

    #[test]
    fn unknown_country_code_fails_validation() {
        let mut address = sample();
        address.set_country("zz");
        let violations = address.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "country");
    }

    #[test]
    fn length_limits_are_enforced() {
        let mut address = sample();
        address.set_name("x".repeat(71));
        assert!(!address.is_valid());
        address.set_name("x".repeat(70));
        assert!(address.is_valid());
    }

    #[test]
    fn empty_address_reports_every_required_field() {
        let err = validate(&Address::new()).unwrap_err();
        let fields: Vec<&str> = err.violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, ["name", "postal_code", "city", "country"]);
    }

    #[test]
    fn json_shape_round_trips() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["country"], "CH");
        assert_eq!(value["house_number"], "12");

        let restored: Address = serde_json::from_value(value).unwrap();
        assert_eq!(restored, sample());
    }
}
