use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

static NUCLEAR_CHARGES: Map<&'static str, f64> = phf_map! {
    "H" => 1.0,
    "C" => 6.0,
    "N" => 7.0,
};

// Free-atom energies in Hartree.
static PBE_ENERGIES: Map<&'static str, f64> = phf_map! {
    "H" => 0.46437552,
    "C" => 37.19463954,
    "N" => 53.68235533,
};

static CCSD_ENERGIES: Map<&'static str, f64> = phf_map! {
    "H" => 0.49984482,
    "C" => 37.72993039,
    "N" => 54.41916828,
};

/// Level of theory used for free-atom reference energies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceLevel {
    #[default]
    Pbe,
    Ccsd,
}

/// Per-element constants used to populate interaction-matrix diagonals.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ElementParams {
    pub nuclear_charge: f64,
    pub pbe_energy: f64,
    pub ccsd_energy: f64,
}

impl ElementParams {
    pub fn reference_energy(&self, level: ReferenceLevel) -> f64 {
        match level {
            ReferenceLevel::Pbe => self.pbe_energy,
            ReferenceLevel::Ccsd => self.ccsd_energy,
        }
    }
}

#[derive(Debug, Error)]
pub enum ElementTableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid value for element '{symbol}': {field} must be finite{extra}")]
    InvalidValue {
        symbol: String,
        field: &'static str,
        extra: &'static str,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ElementTableFile {
    #[serde(default)]
    elements: HashMap<String, ElementParams>,
}

/// Immutable lookup of element constants, injected into the interaction engine.
///
/// The default table covers H, C and N. Additional elements (or corrected values)
/// can be layered on top from a TOML file with [`ElementTable::load`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementTable {
    params: HashMap<String, ElementParams>,
}

impl Default for ElementTable {
    fn default() -> Self {
        let params = NUCLEAR_CHARGES
            .entries()
            .filter_map(|(symbol, &z)| {
                let pbe = PBE_ENERGIES.get(*symbol)?;
                let ccsd = CCSD_ENERGIES.get(*symbol)?;
                Some((
                    symbol.to_string(),
                    ElementParams {
                        nuclear_charge: z,
                        pbe_energy: *pbe,
                        ccsd_energy: *ccsd,
                    },
                ))
            })
            .collect();
        Self { params }
    }
}

impl ElementTable {
    pub fn get(&self, symbol: &str) -> Option<&ElementParams> {
        self.params.get(symbol)
    }

    pub fn insert(&mut self, symbol: &str, params: ElementParams) -> Option<ElementParams> {
        self.params.insert(symbol.to_string(), params)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Entries sorted by nuclear charge, then symbol.
    pub fn entries(&self) -> Vec<(&str, &ElementParams)> {
        let mut entries: Vec<_> = self
            .params
            .iter()
            .map(|(s, p)| (s.as_str(), p))
            .collect();
        entries.sort_by(|a, b| {
            a.1.nuclear_charge
                .total_cmp(&b.1.nuclear_charge)
                .then_with(|| a.0.cmp(b.0))
        });
        entries
    }

    /// Loads a TOML element table and merges it over the built-in defaults.
    pub fn load(path: &Path) -> Result<Self, ElementTableError> {
        let content = std::fs::read_to_string(path).map_err(|e| ElementTableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let overrides: ElementTableFile =
            toml::from_str(&content).map_err(|e| ElementTableError::Toml {
                path: path.to_string_lossy().to_string(),
                source: e,
            })?;

        let mut table = Self::default();
        for (symbol, params) in overrides.elements {
            validate(&symbol, &params)?;
            table.insert(&symbol, params);
        }
        Ok(table)
    }
}

fn validate(symbol: &str, params: &ElementParams) -> Result<(), ElementTableError> {
    let invalid = |field, extra| ElementTableError::InvalidValue {
        symbol: symbol.to_string(),
        field,
        extra,
    };
    if !params.nuclear_charge.is_finite() || params.nuclear_charge <= 0.0 {
        return Err(invalid("nuclear-charge", " and positive"));
    }
    if !params.pbe_energy.is_finite() {
        return Err(invalid("pbe-energy", ""));
    }
    if !params.ccsd_energy.is_finite() {
        return Err(invalid("ccsd-energy", ""));
    }
    Ok(())
}
