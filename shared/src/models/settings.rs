//! Hotel Settings Model
//!
//! Settings live in a key/value table; `HotelSettings` is the typed view
//! the API exposes. Boolean values are stored as "1"/"0".

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw settings row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Setting {
    pub key: String,
    pub value: String,
}

/// Typed settings view assembled from the key/value rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelSettings {
    #[serde(rename = "hotelName")]
    pub hotel_name: String,
    #[serde(rename = "hotelAddress")]
    pub hotel_address: String,
    #[serde(rename = "hotelEmail")]
    pub hotel_email: String,
    #[serde(rename = "hotelPhone")]
    pub hotel_phone: String,
    #[serde(rename = "emailNotifications")]
    pub email_notifications: bool,
    #[serde(rename = "autoCheckout")]
    pub auto_checkout: bool,
}

impl Default for HotelSettings {
    fn default() -> Self {
        Self {
            hotel_name: "Mon Hôtel".to_string(),
            hotel_address: String::new(),
            hotel_email: String::new(),
            hotel_phone: String::new(),
            email_notifications: true,
            auto_checkout: false,
        }
    }
}

impl HotelSettings {
    /// Build the typed view from raw rows, falling back to defaults for
    /// missing keys
    pub fn from_rows(rows: &[Setting]) -> Self {
        let map: BTreeMap<&str, &str> = rows
            .iter()
            .map(|s| (s.key.as_str(), s.value.as_str()))
            .collect();
        let defaults = Self::default();
        Self {
            hotel_name: map
                .get("hotelName")
                .map(|v| v.to_string())
                .unwrap_or(defaults.hotel_name),
            hotel_address: map
                .get("hotelAddress")
                .map(|v| v.to_string())
                .unwrap_or(defaults.hotel_address),
            hotel_email: map
                .get("hotelEmail")
                .map(|v| v.to_string())
                .unwrap_or(defaults.hotel_email),
            hotel_phone: map
                .get("hotelPhone")
                .map(|v| v.to_string())
                .unwrap_or(defaults.hotel_phone),
            email_notifications: map
                .get("emailNotifications")
                .map(|v| parse_flag(v))
                .unwrap_or(defaults.email_notifications),
            auto_checkout: map
                .get("autoCheckout")
                .map(|v| parse_flag(v))
                .unwrap_or(defaults.auto_checkout),
        }
    }

    /// Flatten back to key/value pairs for persistence
    pub fn to_rows(&self) -> Vec<Setting> {
        vec![
            Setting {
                key: "hotelName".to_string(),
                value: self.hotel_name.clone(),
            },
            Setting {
                key: "hotelAddress".to_string(),
                value: self.hotel_address.clone(),
            },
            Setting {
                key: "hotelEmail".to_string(),
                value: self.hotel_email.clone(),
            },
            Setting {
                key: "hotelPhone".to_string(),
                value: self.hotel_phone.clone(),
            },
            Setting {
                key: "emailNotifications".to_string(),
                value: flag_str(self.email_notifications).to_string(),
            },
            Setting {
                key: "autoCheckout".to_string(),
                value: flag_str(self.auto_checkout).to_string(),
            },
        ]
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value, "1" | "true")
}

fn flag_str(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let rows = vec![Setting {
            key: "hotelName".into(),
            value: "Grand Palace".into(),
        }];
        let settings = HotelSettings::from_rows(&rows);
        assert_eq!(settings.hotel_name, "Grand Palace");
        assert!(settings.email_notifications);
        assert!(!settings.auto_checkout);
    }

    #[test]
    fn rows_round_trip() {
        let settings = HotelSettings {
            hotel_name: "Grand Palace".into(),
            hotel_address: "1 rue de la Paix".into(),
            hotel_email: "contact@palace.fr".into(),
            hotel_phone: "+33 1 23 45 67 89".into(),
            email_notifications: false,
            auto_checkout: true,
        };
        let rows = settings.to_rows();
        assert_eq!(HotelSettings::from_rows(&rows), settings);
    }
}
