//! Crop listings published by farmers.
//!
//! # Record Store
//! [`Crop`] implements the [`Record`](record_store::Record) trait (see
//! [`crop_actor::entity`](crate::crop_actor::entity)), allowing it to be stored by a
//! [`RecordStore`](record_store::RecordStore).
//!
//! - Creation parameters ([`CropCreate`])
//! - Update parameters ([`CropUpdate`], wrapping a [`CropPatch`])
//! - Scan parameters ([`CropFilter`])

use crate::model::UserId;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Crops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CropId(pub u32);

impl From<u32> for CropId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for CropId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "crop_{}", self.0)
    }
}

/// Crop category. Stored as a plain string; values outside the known set are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CropType {
    Vegetables,
    Fruits,
    Grains,
    Pulses,
    Other(String),
}

impl CropType {
    pub fn as_str(&self) -> &str {
        match self {
            CropType::Vegetables => "vegetables",
            CropType::Fruits => "fruits",
            CropType::Grains => "grains",
            CropType::Pulses => "pulses",
            CropType::Other(raw) => raw,
        }
    }
}

impl From<String> for CropType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "vegetables" => CropType::Vegetables,
            "fruits" => CropType::Fruits,
            "grains" => CropType::Grains,
            "pulses" => CropType::Pulses,
            _ => CropType::Other(raw),
        }
    }
}

impl From<&str> for CropType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<CropType> for String {
    fn from(value: CropType) -> Self {
        match value {
            CropType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unit that `quantity` and `pricePerUnit` are expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Unit {
    Kg,
    Ton,
    Quintal,
    Other(String),
}

impl Unit {
    pub fn as_str(&self) -> &str {
        match self {
            Unit::Kg => "kg",
            Unit::Ton => "ton",
            Unit::Quintal => "quintal",
            Unit::Other(raw) => raw,
        }
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "kg" => Unit::Kg,
            "ton" => Unit::Ton,
            "quintal" => Unit::Quintal,
            _ => Unit::Other(raw),
        }
    }
}

impl From<&str> for Unit {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<Unit> for String {
    fn from(value: Unit) -> Self {
        match value {
            Unit::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
    pub address: String,
}

/// Disease screening result attached to a listing. Filled in externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseStatus {
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    #[serde(rename = "_id")]
    pub id: CropId,
    pub name: String,
    #[serde(rename = "type")]
    pub crop_type: CropType,
    pub image_url: String,
    pub farmer_id: UserId,
    pub farmer_name: String,
    pub location: Location,
    /// Calendar date as entered by the farmer. Never parsed.
    pub harvest_date: String,
    pub quantity: f64,
    pub unit: Unit,
    pub price_per_unit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_status: Option<DiseaseStatus>,
    pub published: bool,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub sales: u64,
}

/// The farmer-supplied part of a listing, stored verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CropFields {
    pub name: String,
    pub crop_type: CropType,
    pub image_url: String,
    pub location: Location,
    pub harvest_date: String,
    pub quantity: f64,
    pub unit: Unit,
    pub price_per_unit: f64,
    pub disease_status: Option<DiseaseStatus>,
    pub published: bool,
}

/// Payload for inserting a crop. Built by [`CropClient::create`](crate::clients::CropClient::create)
/// from the fields and the resolved caller.
#[derive(Debug, Clone)]
pub struct CropCreate {
    pub farmer_id: UserId,
    pub farmer_name: String,
    pub fields: CropFields,
}

/// Partial update. `None` leaves the stored value alone.
///
/// Ownership, counters and the disease status are not patchable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropPatch {
    pub name: Option<String>,
    pub crop_type: Option<CropType>,
    pub image_url: Option<String>,
    pub location: Option<Location>,
    pub harvest_date: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<Unit>,
    pub price_per_unit: Option<f64>,
    pub published: Option<bool>,
}

/// A patch plus the user asking for it. The crops table checks ownership before applying it.
#[derive(Debug, Clone)]
pub struct CropUpdate {
    pub caller: UserId,
    pub patch: CropPatch,
}

/// Conjunctive scan filter. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropFilter {
    pub published: Option<bool>,
    pub farmer_id: Option<UserId>,
    pub crop_type: Option<CropType>,
}

impl CropFilter {
    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn farmer(mut self, farmer_id: UserId) -> Self {
        self.farmer_id = Some(farmer_id);
        self
    }

    pub fn crop_type(mut self, crop_type: impl Into<CropType>) -> Self {
        self.crop_type = Some(crop_type.into());
        self
    }

    pub fn matches(&self, crop: &Crop) -> bool {
        self.published.map_or(true, |p| crop.published == p)
            && self.farmer_id.map_or(true, |f| crop.farmer_id == f)
            && self.crop_type.as_ref().map_or(true, |t| &crop.crop_type == t)
    }
}

impl Crop {
    /// Builds a fresh listing with zeroed counters.
    pub fn new(id: CropId, params: CropCreate) -> Self {
        let CropCreate {
            farmer_id,
            farmer_name,
            fields,
        } = params;
        Self {
            id,
            name: fields.name,
            crop_type: fields.crop_type,
            image_url: fields.image_url,
            farmer_id,
            farmer_name,
            location: fields.location,
            harvest_date: fields.harvest_date,
            quantity: fields.quantity,
            unit: fields.unit,
            price_per_unit: fields.price_per_unit,
            disease_status: fields.disease_status,
            published: fields.published,
            views: 0,
            sales: 0,
        }
    }

    /// Applies every field the patch carries.
    pub fn apply(&mut self, patch: CropPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(crop_type) = patch.crop_type {
            self.crop_type = crop_type;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(harvest_date) = patch.harvest_date {
            self.harvest_date = harvest_date;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(unit) = patch.unit {
            self.unit = unit;
        }
        if let Some(price_per_unit) = patch.price_per_unit {
            self.price_per_unit = price_per_unit;
        }
        if let Some(published) = patch.published {
            self.published = published;
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn fields(name: &str) -> CropFields {
        CropFields {
            name: name.to_string(),
            crop_type: CropType::Vegetables,
            image_url: "https://img.example/tomato.jpg".to_string(),
            location: Location {
                lat: 18.52,
                lng: 73.85,
                address: "Pune".to_string(),
            },
            harvest_date: "2024-03-01".to_string(),
            quantity: 100.0,
            unit: Unit::Kg,
            price_per_unit: 50.0,
            disease_status: None,
            published: true,
        }
    }

    pub fn crop(id: u32, farmer: u32) -> Crop {
        Crop::new(
            CropId(id),
            CropCreate {
                farmer_id: UserId(farmer),
                farmer_name: "Asha".to_string(),
                fields: fields("Tomato"),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::crop;
    use super::*;

    #[test]
    fn unknown_categories_are_preserved() {
        assert_eq!(CropType::from("fruits"), CropType::Fruits);
        let odd = CropType::from("spices");
        assert_eq!(odd, CropType::Other("spices".to_string()));
        assert_eq!(String::from(odd), "spices");
        assert_eq!(Unit::from("bushel").as_str(), "bushel");
    }

    #[test]
    fn new_listing_starts_with_zero_counters() {
        let crop = crop(1, 9);
        assert_eq!(crop.views, 0);
        assert_eq!(crop.sales, 0);
        assert_eq!(crop.farmer_id, UserId(9));
    }

    #[test]
    fn patch_touches_only_supplied_fields() {
        let mut crop = crop(1, 9);
        crop.apply(CropPatch {
            price_per_unit: Some(42.5),
            published: Some(false),
            ..Default::default()
        });
        assert_eq!(crop.price_per_unit, 42.5);
        assert!(!crop.published);
        assert_eq!(crop.name, "Tomato");
        assert_eq!(crop.quantity, 100.0);
    }

    #[test]
    fn filter_is_conjunctive() {
        let mut other = crop(2, 7);
        other.crop_type = CropType::Grains;
        let mine = crop(1, 9);

        let filter = CropFilter::default().farmer(UserId(9)).crop_type("vegetables");
        assert!(filter.matches(&mine));
        assert!(!filter.matches(&other));

        assert!(CropFilter::default().matches(&other));
        assert!(!CropFilter::default().published(false).matches(&mine));
    }
}
