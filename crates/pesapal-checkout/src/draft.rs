//! Form state holder: the mutable draft of user input.
//!
//! Edits are tagged ([`FieldEdit`]) and applied by two independent merge
//! functions, one per record, so an edit to one field never touches another.
//! No validation happens on edit; [`DraftPayment::check_constraints`] mirrors
//! the native form-control constraints for hosts without a browser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COUNTRY_CODE, DEFAULT_CURRENCY};
use crate::error::CheckoutError;
use crate::payment::parse_amount;

/// Billing contact details required by the payments backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub email_address: String,
    pub phone_number: String,
    pub country_code: String,
    pub first_name: String,
    pub last_name: String,
    pub line_1: String,
}

impl Default for BillingAddress {
    fn default() -> Self {
        Self {
            email_address: String::new(),
            phone_number: String::new(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            first_name: String::new(),
            last_name: String::new(),
            line_1: String::new(),
        }
    }
}

/// In-progress payment form. `amount` is kept as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPayment {
    pub amount: String,
    pub currency: String,
    pub description: String,
    pub billing_address: BillingAddress,
}

impl Default for DraftPayment {
    fn default() -> Self {
        Self {
            amount: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            description: String::new(),
            billing_address: BillingAddress::default(),
        }
    }
}

/// Fields of the top-level record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RootField {
    Amount,
    Currency,
    Description,
}

/// Fields of the nested billing address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    EmailAddress,
    PhoneNumber,
    CountryCode,
    FirstName,
    LastName,
    Line1,
}

impl RootField {
    pub const ALL: [RootField; 3] = [RootField::Amount, RootField::Currency, RootField::Description];

    pub fn name(self) -> &'static str {
        match self {
            RootField::Amount => "amount",
            RootField::Currency => "currency",
            RootField::Description => "description",
        }
    }
}

impl AddressField {
    pub const ALL: [AddressField; 6] = [
        AddressField::EmailAddress,
        AddressField::PhoneNumber,
        AddressField::CountryCode,
        AddressField::FirstName,
        AddressField::LastName,
        AddressField::Line1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AddressField::EmailAddress => "email_address",
            AddressField::PhoneNumber => "phone_number",
            AddressField::CountryCode => "country_code",
            AddressField::FirstName => "first_name",
            AddressField::LastName => "last_name",
            AddressField::Line1 => "line_1",
        }
    }
}

impl FromStr for RootField {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RootField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| CheckoutError::UnknownField(s.to_string()))
    }
}

impl FromStr for AddressField {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressField::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| CheckoutError::UnknownField(format!("billing_address.{s}")))
    }
}

/// Which record an edit lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldTarget {
    Root(RootField),
    Address(AddressField),
}

impl FieldTarget {
    /// Resolve a form control name. `is_address` selects the billing record.
    pub fn from_name(name: &str, is_address: bool) -> Result<Self, CheckoutError> {
        if is_address {
            name.parse().map(FieldTarget::Address)
        } else {
            name.parse().map(FieldTarget::Root)
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldTarget::Root(f) => f.name(),
            FieldTarget::Address(f) => f.name(),
        }
    }

    pub fn is_address(self) -> bool {
        matches!(self, FieldTarget::Address(_))
    }
}

impl fmt::Display for FieldTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldTarget::Root(field) => f.write_str(field.name()),
            FieldTarget::Address(field) => write!(f, "billing_address.{}", field.name()),
        }
    }
}

/// A single keystroke-level edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub target: FieldTarget,
    pub value: String,
}

impl FieldEdit {
    pub fn new(target: FieldTarget, value: impl Into<String>) -> Self {
        Self {
            target,
            value: value.into(),
        }
    }

    pub fn root(field: RootField, value: impl Into<String>) -> Self {
        Self::new(FieldTarget::Root(field), value)
    }

    pub fn address(field: AddressField, value: impl Into<String>) -> Self {
        Self::new(FieldTarget::Address(field), value)
    }
}

impl DraftPayment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one edit into the draft; every other field is preserved.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit.target {
            FieldTarget::Root(field) => self.apply_root(field, edit.value),
            FieldTarget::Address(field) => self.billing_address.apply_address(field, edit.value),
        }
    }

    /// Name-based update used by generic input handlers.
    pub fn set_field(
        &mut self,
        name: &str,
        value: impl Into<String>,
        is_address: bool,
    ) -> Result<(), CheckoutError> {
        let target = FieldTarget::from_name(name, is_address)?;
        self.apply(FieldEdit::new(target, value));
        Ok(())
    }

    fn apply_root(&mut self, field: RootField, value: String) {
        match field {
            RootField::Amount => self.amount = value,
            RootField::Currency => self.currency = value,
            RootField::Description => self.description = value,
        }
    }

    pub fn value(&self, target: FieldTarget) -> &str {
        match target {
            FieldTarget::Root(RootField::Amount) => &self.amount,
            FieldTarget::Root(RootField::Currency) => &self.currency,
            FieldTarget::Root(RootField::Description) => &self.description,
            FieldTarget::Address(field) => self.billing_address.value(field),
        }
    }

    /// Same checks a browser applies to the rendered controls
    /// (`required`, `type=email`, `type=number`).
    pub fn check_constraints(&self) -> Result<(), CheckoutError> {
        const REQUIRED: [FieldTarget; 7] = [
            FieldTarget::Root(RootField::Amount),
            FieldTarget::Root(RootField::Description),
            FieldTarget::Address(AddressField::FirstName),
            FieldTarget::Address(AddressField::LastName),
            FieldTarget::Address(AddressField::EmailAddress),
            FieldTarget::Address(AddressField::PhoneNumber),
            FieldTarget::Address(AddressField::Line1),
        ];

        if let Some(missing) = REQUIRED.iter().find(|t| self.value(**t).trim().is_empty()) {
            return Err(CheckoutError::Constraint(format!("{missing} is required")));
        }

        let email = self.billing_address.email_address.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => {
                return Err(CheckoutError::Constraint(
                    "billing_address.email_address must contain an '@'".to_string(),
                ))
            }
        }

        parse_amount(&self.amount)?;
        Ok(())
    }
}

impl BillingAddress {
    fn apply_address(&mut self, field: AddressField, value: String) {
        match field {
            AddressField::EmailAddress => self.email_address = value,
            AddressField::PhoneNumber => self.phone_number = value,
            AddressField::CountryCode => self.country_code = value,
            AddressField::FirstName => self.first_name = value,
            AddressField::LastName => self.last_name = value,
            AddressField::Line1 => self.line_1 = value,
        }
    }

    pub fn value(&self, field: AddressField) -> &str {
        match field {
            AddressField::EmailAddress => &self.email_address,
            AddressField::PhoneNumber => &self.phone_number,
            AddressField::CountryCode => &self.country_code,
            AddressField::FirstName => &self.first_name,
            AddressField::LastName => &self.last_name,
            AddressField::Line1 => &self.line_1,
        }
    }
}
