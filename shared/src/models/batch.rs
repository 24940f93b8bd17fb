//! Crop batch models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::types::UnknownCode;

/// A harvested crop batch in storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropBatch {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub crop_type: CropType,
    pub estimated_weight_kg: Decimal,
    pub harvest_date: NaiveDate,
    /// Location code, normally one of [`crate::StorageLocation`]
    pub storage_location: String,
    pub storage_type: StorageType,
    pub status: BatchStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Crop types that can be stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CropType {
    #[default]
    Paddy,
}

impl CropType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CropType::Paddy => "PADDY",
        }
    }
}

impl std::fmt::Display for CropType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PADDY" => Ok(CropType::Paddy),
            _ => Err(UnknownCode::new("crop type", s)),
        }
    }
}

/// How a batch is stored
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageType {
    JuteBag,
    Silo,
    OpenArea,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::JuteBag => "JUTE_BAG",
            StorageType::Silo => "SILO",
            StorageType::OpenArea => "OPEN_AREA",
        }
    }
}

impl std::fmt::Display for StorageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "JUTE_BAG" => Ok(StorageType::JuteBag),
            "SILO" => Ok(StorageType::Silo),
            "OPEN_AREA" => Ok(StorageType::OpenArea),
            _ => Err(UnknownCode::new("storage type", s)),
        }
    }
}

/// Lifecycle status of a batch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    #[default]
    Active,
    Completed,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatus::Active => "ACTIVE",
            BatchStatus::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BatchStatus {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(BatchStatus::Active),
            "COMPLETED" => Ok(BatchStatus::Completed),
            _ => Err(UnknownCode::new("batch status", s)),
        }
    }
}

/// The batch facts visible to risk rules and advisories
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchContext {
    pub batch_id: Option<Uuid>,
    pub storage_location: String,
    pub storage_type: Option<StorageType>,
}

impl From<&CropBatch> for BatchContext {
    fn from(batch: &CropBatch) -> Self {
        Self {
            batch_id: Some(batch.id),
            storage_location: batch.storage_location.clone(),
            storage_type: Some(batch.storage_type),
        }
    }
}
