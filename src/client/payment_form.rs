use crate::client::ClientConfig;
use crate::domain::payment::{ContactInfo, PaymentMethod};
use serde::Serialize;
use uuid::Uuid;

pub const INCOMPLETE_CONTACT: &str = "Please fill all contact information";
pub const MISSING_TRANSACTION_ID: &str = "Please enter transaction ID for digital payments";
pub const PAYMENT_FAILED: &str = "Payment failed";
pub const NETWORK_ERROR: &str = "Network error. Please try again.";

#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub transaction_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    transaction_id: Option<&'a str>,
    contact_info: ContactInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Registered { msg: String, body: serde_json::Value },
    Rejected(String),
    NetworkError,
}

impl SubmitOutcome {
    pub fn alert(&self) -> Option<&str> {
        match self {
            Self::Registered { .. } => None,
            Self::Rejected(message) => Some(message.as_str()),
            Self::NetworkError => Some(NETWORK_ERROR),
        }
    }
}

impl PaymentForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if [&self.full_name, &self.email, &self.phone, &self.address]
            .iter()
            .any(|v| v.is_empty())
        {
            return Err(INCOMPLETE_CONTACT);
        }
        if self.payment_method.is_digital() && self.transaction_id.is_empty() {
            return Err(MISSING_TRANSACTION_ID);
        }
        Ok(())
    }

    fn body(&self) -> RegisterBody<'_> {
        RegisterBody {
            payment_method: self.payment_method,
            transaction_id: Some(self.transaction_id.as_str()).filter(|t| !t.is_empty()),
            contact_info: ContactInfo {
                full_name: self.full_name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                address: Some(self.address.clone()),
            },
        }
    }

    pub async fn submit(&self, http: &reqwest::Client, config: &ClientConfig, event_id: Uuid) -> SubmitOutcome {
        let url = format!("{}/payments/register-paid-event/{}", config.base_url, event_id);
        let resp = match http
            .post(url)
            .bearer_auth(&config.token)
            .json(&self.body())
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "registration request failed");
                return SubmitOutcome::NetworkError;
            }
        };

        let body: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "registration response was not json");
                return SubmitOutcome::NetworkError;
            }
        };

        match body.get("msg").and_then(|m| m.as_str()) {
            Some(msg) => SubmitOutcome::Registered {
                msg: msg.to_string(),
                body: body.clone(),
            },
            None => SubmitOutcome::Rejected(
                body.get("error")
                    .and_then(|e| e.as_str())
                    .unwrap_or(PAYMENT_FAILED)
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PaymentForm {
        PaymentForm {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9800000000".to_string(),
            address: "MG Road".to_string(),
            payment_method: PaymentMethod::GPay,
            transaction_id: "T1".to_string(),
        }
    }

    #[test]
    fn form_requires_address() {
        let form = PaymentForm {
            address: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(INCOMPLETE_CONTACT));
    }

    #[test]
    fn digital_payment_requires_transaction_id() {
        let form = PaymentForm {
            transaction_id: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(MISSING_TRANSACTION_ID));
    }

    #[test]
    fn cash_needs_no_transaction_id() {
        let form = PaymentForm {
            payment_method: PaymentMethod::CashOnRegistration,
            transaction_id: String::new(),
            ..filled()
        };
        assert!(form.validate().is_ok());
        let body = serde_json::to_value(form.body()).unwrap();
        assert!(body.get("transactionId").is_none());
        assert_eq!(body["paymentMethod"], "Cash on Registration");
        assert_eq!(body["contactInfo"]["fullName"], "Asha Rao");
    }
}
