use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeficiencyType {
    Normal,
    ProtanDeutan,
    Tritan,
    Combined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    None,
    Mild,
    Moderate,
    Severe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub deficiency: DeficiencyType,
    pub severity: Severity,
}

impl DeficiencyType {
    /// Label written to the `Tipo` column.
    pub fn label(self) -> &'static str {
        match self {
            DeficiencyType::Normal => "Normal",
            DeficiencyType::ProtanDeutan => "Protan/Deutan",
            DeficiencyType::Tritan => "Tritan",
            DeficiencyType::Combined => "Combinado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        type_order().iter().copied().find(|t| t.label() == label)
    }
}

impl Severity {
    /// Label written to the `Severidad` column.
    pub fn label(self) -> &'static str {
        match self {
            Severity::None => "—",
            Severity::Mild => "Leve",
            Severity::Moderate => "Moderada",
            Severity::Severe => "Severa",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        severity_order().iter().copied().find(|s| s.label() == label)
    }
}

pub fn type_order() -> &'static [DeficiencyType] {
    &[
        DeficiencyType::Normal,
        DeficiencyType::ProtanDeutan,
        DeficiencyType::Tritan,
        DeficiencyType::Combined,
    ]
}

pub fn severity_order() -> &'static [Severity] {
    &[
        Severity::None,
        Severity::Mild,
        Severity::Moderate,
        Severity::Severe,
    ]
}
