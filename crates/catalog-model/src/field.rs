//! Canonical product fields and the `products` column layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A canonical field that a source column can be mapped onto.
///
/// Generated columns (`id`, `merchant_id`, timestamps) are not mappable and
/// live only in [`Column`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetField {
    Code,
    Description,
    Price,
    Details,
    Listed,
    Quantity,
    Category,
    Brand,
    Package,
    MeasuringUnit,
    Origin,
    Cost,
    MinimalQuantity,
    Weight,
    GtinEan,
    TaxCategories,
}

impl TargetField {
    /// All mappable fields in table column order.
    pub const ALL: [TargetField; 16] = [
        TargetField::Code,
        TargetField::Description,
        TargetField::Price,
        TargetField::Details,
        TargetField::Listed,
        TargetField::Quantity,
        TargetField::Category,
        TargetField::Brand,
        TargetField::Package,
        TargetField::MeasuringUnit,
        TargetField::Origin,
        TargetField::Cost,
        TargetField::MinimalQuantity,
        TargetField::Weight,
        TargetField::GtinEan,
        TargetField::TaxCategories,
    ];

    pub fn as_str(&self) -> &'static str {
        self.column().as_str()
    }

    /// The table column this field is written to.
    pub fn column(&self) -> Column {
        match self {
            TargetField::Code => Column::Code,
            TargetField::Description => Column::Description,
            TargetField::Price => Column::Price,
            TargetField::Details => Column::Details,
            TargetField::Listed => Column::Listed,
            TargetField::Quantity => Column::Quantity,
            TargetField::Category => Column::Category,
            TargetField::Brand => Column::Brand,
            TargetField::Package => Column::Package,
            TargetField::MeasuringUnit => Column::MeasuringUnit,
            TargetField::Origin => Column::Origin,
            TargetField::Cost => Column::Cost,
            TargetField::MinimalQuantity => Column::MinimalQuantity,
            TargetField::Weight => Column::Weight,
            TargetField::GtinEan => Column::GtinEan,
            TargetField::TaxCategories => Column::TaxCategories,
        }
    }
}

impl fmt::Display for TargetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| ModelError::UnknownField(s.to_string()))
    }
}

/// Storage type of a `products` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Uuid,
    Text,
    Float,
    Integer,
    Boolean,
    Json,
    Timestamp,
}

/// A column of the `products` table, in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Id,
    Code,
    Description,
    Price,
    Details,
    Listed,
    Quantity,
    Category,
    Brand,
    Package,
    MeasuringUnit,
    Origin,
    Cost,
    MinimalQuantity,
    Weight,
    GtinEan,
    TaxCategories,
    MerchantId,
    InsertedAt,
    UpdatedAt,
}

impl Column {
    /// Fixed INSERT column order.
    pub const ALL: [Column; 20] = [
        Column::Id,
        Column::Code,
        Column::Description,
        Column::Price,
        Column::Details,
        Column::Listed,
        Column::Quantity,
        Column::Category,
        Column::Brand,
        Column::Package,
        Column::MeasuringUnit,
        Column::Origin,
        Column::Cost,
        Column::MinimalQuantity,
        Column::Weight,
        Column::GtinEan,
        Column::TaxCategories,
        Column::MerchantId,
        Column::InsertedAt,
        Column::UpdatedAt,
    ];

    pub const COUNT: usize = Self::ALL.len();

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Id => "id",
            Column::Code => "code",
            Column::Description => "description",
            Column::Price => "price",
            Column::Details => "details",
            Column::Listed => "listed",
            Column::Quantity => "quantity",
            Column::Category => "category",
            Column::Brand => "brand",
            Column::Package => "package",
            Column::MeasuringUnit => "measuring_unit",
            Column::Origin => "origin",
            Column::Cost => "cost",
            Column::MinimalQuantity => "minimal_quantity",
            Column::Weight => "weight",
            Column::GtinEan => "gtin_ean",
            Column::TaxCategories => "tax_categories",
            Column::MerchantId => "merchant_id",
            Column::InsertedAt => "inserted_at",
            Column::UpdatedAt => "updated_at",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Id => ColumnKind::Uuid,
            Column::Price | Column::Cost | Column::Weight => ColumnKind::Float,
            Column::Quantity | Column::MinimalQuantity => ColumnKind::Integer,
            Column::Listed => ColumnKind::Boolean,
            Column::Package | Column::TaxCategories => ColumnKind::Json,
            Column::InsertedAt | Column::UpdatedAt => ColumnKind::Timestamp,
            Column::Code
            | Column::Description
            | Column::Details
            | Column::Category
            | Column::Brand
            | Column::MeasuringUnit
            | Column::Origin
            | Column::GtinEan
            | Column::MerchantId => ColumnKind::Text,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
