use serde::{Deserialize, Serialize};

use crate::draft::{BillingAddress, DraftPayment};
use crate::error::CheckoutError;

/// Wire-format body of `POST /api/payments/initiate-payment/`.
///
/// Same shape as [`DraftPayment`] except that `amount` is a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitiatePaymentRequest {
    pub amount: f64,
    pub currency: String,
    pub description: String,
    pub billing_address: BillingAddress,
}

impl InitiatePaymentRequest {
    /// Snapshot a draft, coercing the amount text to a number.
    pub fn from_draft(draft: &DraftPayment) -> Result<Self, CheckoutError> {
        Ok(Self {
            amount: parse_amount(&draft.amount)?,
            currency: draft.currency.clone(),
            description: draft.description.clone(),
            billing_address: draft.billing_address.clone(),
        })
    }
}

impl TryFrom<&DraftPayment> for InitiatePaymentRequest {
    type Error = CheckoutError;

    fn try_from(draft: &DraftPayment) -> Result<Self, Self::Error> {
        Self::from_draft(draft)
    }
}

/// Parse the amount text as typed into a `type=number` control.
/// Only positive finite values are accepted.
pub fn parse_amount(raw: &str) -> Result<f64, CheckoutError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CheckoutError::InvalidAmount(raw.to_string()))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(CheckoutError::InvalidAmount(raw.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::{AddressField, FieldEdit, RootField};

    #[test]
    fn test_amount_is_sent_as_number() {
        let mut draft = DraftPayment::new();
        draft.apply(FieldEdit::root(RootField::Amount, "150.50"));
        draft.apply(FieldEdit::root(RootField::Description, "Invoice 7"));
        draft.apply(FieldEdit::address(AddressField::EmailAddress, "a@b.co"));

        let req = InitiatePaymentRequest::from_draft(&draft).unwrap();
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["amount"], serde_json::json!(150.5));
        assert!(json["amount"].is_number());
        assert_eq!(json["currency"], "KES");
        assert_eq!(json["description"], "Invoice 7");
        assert_eq!(json["billing_address"]["email_address"], "a@b.co");
        assert_eq!(json["billing_address"]["country_code"], "KE");
    }

    #[test]
    fn test_body_has_exactly_the_wire_fields() {
        let mut draft = DraftPayment::new();
        draft.amount = "1".to_string();
        let json = serde_json::to_value(InitiatePaymentRequest::try_from(&draft).unwrap()).unwrap();

        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["amount", "billing_address", "currency", "description"]);

        let mut address_keys: Vec<_> = json["billing_address"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        address_keys.sort();
        assert_eq!(
            address_keys,
            [
                "country_code",
                "email_address",
                "first_name",
                "last_name",
                "line_1",
                "phone_number"
            ]
        );
    }

    #[test]
    fn test_parse_amount_accepts_decimal_and_whitespace() {
        assert_eq!(parse_amount("150.50").unwrap(), 150.5);
        assert_eq!(parse_amount(" 20 ").unwrap(), 20.0);
        assert_eq!(parse_amount("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_amount_rejects_empty_zero_negative_and_nan() {
        for raw in ["", "abc", "0", "-1", "NaN", "inf"] {
            assert!(
                matches!(parse_amount(raw), Err(CheckoutError::InvalidAmount(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
