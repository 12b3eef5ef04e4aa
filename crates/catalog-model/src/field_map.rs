//! Source header to canonical field mapping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::field::TargetField;

/// Static mapping of localized CSV header → canonical field.
///
/// Header keys are matched exactly (case- and accent-sensitive). Each target
/// field may be fed by at most one header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, TargetField>", into = "BTreeMap<String, TargetField>")]
pub struct FieldMap {
    entries: Vec<(String, TargetField)>,
}

impl FieldMap {
    pub fn new<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, TargetField)>,
        S: Into<String>,
    {
        let mut collected: Vec<(String, TargetField)> = Vec::new();
        for (header, field) in entries {
            let header = header.into();
            if let Some((existing, _)) = collected.iter().find(|(_, f)| *f == field) {
                return Err(ModelError::DuplicateTarget {
                    field: field.as_str().to_string(),
                    first: existing.clone(),
                    second: header,
                });
            }
            if let Some(slot) = collected.iter_mut().find(|(h, _)| *h == header) {
                slot.1 = field;
            } else {
                collected.push((header, field));
            }
        }
        if collected.is_empty() {
            return Err(ModelError::EmptyFieldMap);
        }
        Ok(Self { entries: collected })
    }

    /// Parses a JSON object of `{"<header>": "<field>"}` pairs.
    pub fn from_json(text: &str) -> Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(text)?;
        let entries = raw
            .into_iter()
            .map(|(header, field)| Ok((header, field.parse::<TargetField>()?)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, TargetField)> {
        self.entries
            .iter()
            .map(|(header, field)| (header.as_str(), *field))
    }

    pub fn target_for(&self, header: &str) -> Option<TargetField> {
        self.entries
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, field)| *field)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FieldMap {
    /// Header layout of the ERP product export.
    fn default() -> Self {
        Self {
            entries: vec![
                ("Código (SKU)".to_string(), TargetField::Code),
                ("Descrição".to_string(), TargetField::Description),
                ("Preço".to_string(), TargetField::Price),
                ("Observações".to_string(), TargetField::Details),
                ("Situação".to_string(), TargetField::Listed),
                ("Estoque".to_string(), TargetField::Quantity),
                ("Categoria".to_string(), TargetField::Category),
                ("Marca".to_string(), TargetField::Brand),
                ("Formato embalagem".to_string(), TargetField::Package),
                ("Unidade".to_string(), TargetField::MeasuringUnit),
                ("Origem".to_string(), TargetField::Origin),
                ("Preço de custo".to_string(), TargetField::Cost),
                ("Estoque mínimo".to_string(), TargetField::MinimalQuantity),
                ("Peso líquido (Kg)".to_string(), TargetField::Weight),
                ("GTIN/EAN".to_string(), TargetField::GtinEan),
                ("CEST".to_string(), TargetField::TaxCategories),
            ],
        }
    }
}

impl TryFrom<BTreeMap<String, TargetField>> for FieldMap {
    type Error = ModelError;

    fn try_from(value: BTreeMap<String, TargetField>) -> Result<Self> {
        Self::new(value)
    }
}

impl From<FieldMap> for BTreeMap<String, TargetField> {
    fn from(value: FieldMap) -> Self {
        value.entries.into_iter().collect()
    }
}
