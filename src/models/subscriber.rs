// src/models/subscriber.rs

//! Subscriber registration models.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Form fields that must be present on a registration POST.
pub const REQUIRED_INPUTS: [&str; 2] = ["inputName", "inputEmail"];

/// Registration form fields submitted from the landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub company: String,
    pub name: String,
    pub job: String,
    pub email: String,
    pub phone: String,
}

impl RegistrationForm {
    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// Returns `None` when a required field is missing. Optional fields
    /// default to the empty string; repeated keys keep the first value.
    pub fn parse(body: &str) -> Option<Self> {
        let mut fields: HashMap<String, String> = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body.as_bytes()) {
            fields
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        for required in REQUIRED_INPUTS {
            if !fields.contains_key(required) {
                return None;
            }
        }
        let mut take = |key: &str| fields.remove(key).unwrap_or_default();
        Some(Self {
            company: take("inputCompany"),
            name: take("inputName"),
            job: take("inputJob"),
            email: take("inputEmail"),
            phone: take("inputPhone"),
        })
    }
}

/// Customer identity resolved from a marketplace registration token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedCustomer {
    pub customer_identifier: String,
    pub customer_aws_account_id: String,
    pub product_code: String,
}

/// Subscriber record persisted on registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriberRecord {
    pub company_name: String,
    pub contact_email: String,
    pub contact_job: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub last_update: DateTime<Utc>,
    pub customer_aws_account_id: String,
    pub customer_identifier: String,
    pub product_code: String,
}

impl SubscriberRecord {
    /// Combine a resolved customer identity with the submitted form.
    pub fn new(customer: ResolvedCustomer, form: RegistrationForm, now: DateTime<Utc>) -> Self {
        Self {
            company_name: form.company,
            contact_email: form.email,
            contact_job: form.job,
            contact_name: form.name,
            contact_phone: form.phone,
            last_update: now,
            customer_aws_account_id: customer.customer_aws_account_id,
            customer_identifier: customer.customer_identifier,
            product_code: customer.product_code,
        }
    }
}
