//! Bookable home services

use serde::{Deserialize, Serialize};

/// A service offered on the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Service ID
    pub id: i64,
    /// Title
    pub title: String,
    /// Cover image URL
    #[serde(default)]
    pub image_url: String,
    /// One-line description shown in listings
    #[serde(default)]
    pub short_description: String,
    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Base price
    #[serde(default)]
    pub price: f64,
    /// Whether customers can book it; absent means active
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

/// Create/update form for a service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInput {
    /// Title
    pub title: String,
    /// One-line description
    pub short_description: String,
    /// Long description
    pub description: String,
    /// Base price
    pub price: f64,
    /// Cover image URL
    pub image_url: String,
    /// Whether customers can book it
    pub is_active: bool,
}

impl ServiceInput {
    /// Check required fields before submitting
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title or a non-positive price.
    pub fn validate(&self) -> crate::Result<()> {
        if self.title.trim().is_empty() {
            return Err(crate::Error::validation("title", "is required"));
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(crate::Error::validation("price", "must be greater than zero"));
        }
        Ok(())
    }
}

impl From<&Service> for ServiceInput {
    fn from(service: &Service) -> Self {
        Self {
            title: service.title.clone(),
            short_description: service.short_description.clone(),
            description: service.description.clone().unwrap_or_default(),
            price: service.price,
            image_url: service.image_url.clone(),
            is_active: service.is_active,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input() -> ServiceInput {
        ServiceInput {
            title: "Ev Temizliği".to_string(),
            short_description: "3+1 daire temizliği".to_string(),
            description: String::new(),
            price: 1500.0,
            image_url: String::new(),
            is_active: true,
        }
    }

    #[test]
    fn test_validate_accepts_complete_form() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_title_and_bad_price() {
        let mut form = input();
        form.title = "   ".to_string();
        assert!(form.validate().is_err());

        let mut form = input();
        form.price = 0.0;
        assert!(form.validate().is_err());

        let mut form = input();
        form.price = f64::NAN;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_service_round_trips_camel_case() {
        let service: Service = serde_json::from_value(json!({
            "id": 3,
            "title": "Ofis Temizliği",
            "imageUrl": "https://cdn.example.com/office.jpg",
            "shortDescription": "Haftalık ofis temizliği",
            "price": 2500.5,
            "isActive": false
        }))
        .unwrap();

        assert!(!service.is_active);
        assert!(service.description.is_none());

        let form = ServiceInput::from(&service);
        let wire = serde_json::to_value(&form).unwrap();
        assert_eq!(wire["shortDescription"], "Haftalık ofis temizliği");
        assert_eq!(wire["isActive"], false);
    }
}
