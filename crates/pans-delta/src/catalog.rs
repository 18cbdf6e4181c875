//! Named registry of filter-width providers.

use crate::cube_root_vol::CubeRootVolDelta;
use crate::error::{DeltaError, DeltaResult};
use crate::max_delta_xyz::MaxDeltaxyzDelta;
use crate::prandtl::PrandtlDelta;
use crate::traits::FilterWidth;
use crate::uniform::UniformDelta;
use pans_config::DeltaCoeffsDef;
use std::collections::BTreeMap;

/// Prandtl may wrap another provider; bound the chain so a self-reference fails.
const MAX_NESTING: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterWidthCatalogEntry {
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
}

impl FilterWidthCatalogEntry {
    pub fn matches_name(&self, name: &str) -> bool {
        let name = name.trim();
        self.canonical_id.eq_ignore_ascii_case(name)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(name))
    }
}

const FILTER_WIDTH_CATALOG: [FilterWidthCatalogEntry; 4] = [
    FilterWidthCatalogEntry {
        canonical_id: CubeRootVolDelta::NAME,
        display_name: "Cube root of cell volume",
        aliases: &["cube_root_vol"],
    },
    FilterWidthCatalogEntry {
        canonical_id: MaxDeltaxyzDelta::NAME,
        display_name: "Largest cell edge",
        aliases: &["max_delta_xyz"],
    },
    FilterWidthCatalogEntry {
        canonical_id: PrandtlDelta::NAME,
        display_name: "Prandtl near-wall damping",
        aliases: &["prandtlDelta"],
    },
    FilterWidthCatalogEntry {
        canonical_id: UniformDelta::NAME,
        display_name: "Uniform length",
        aliases: &["constant"],
    },
];

pub fn filter_width_catalog() -> &'static [FilterWidthCatalogEntry] {
    &FILTER_WIDTH_CATALOG
}

fn lookup(name: &str) -> DeltaResult<&'static FilterWidthCatalogEntry> {
    FILTER_WIDTH_CATALOG
        .iter()
        .find(|entry| entry.matches_name(name))
        .ok_or_else(|| DeltaError::UnknownProvider {
            name: name.to_string(),
            known: FILTER_WIDTH_CATALOG
                .iter()
                .map(|e| e.canonical_id)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// Resolve a provider by name, reading its sub-block from `coeffs`.
///
/// Sub-blocks are looked up under the canonical name first, then under the
/// name exactly as given.
pub fn build_filter_width(
    name: &str,
    coeffs: &BTreeMap<String, DeltaCoeffsDef>,
) -> DeltaResult<Box<dyn FilterWidth>> {
    build_nested(name, coeffs, 0)
}

fn build_nested(
    name: &str,
    coeffs: &BTreeMap<String, DeltaCoeffsDef>,
    depth: usize,
) -> DeltaResult<Box<dyn FilterWidth>> {
    if depth >= MAX_NESTING {
        return Err(DeltaError::NestingTooDeep {
            name: name.to_string(),
            depth: MAX_NESTING,
        });
    }

    let entry = lookup(name)?;
    let block = coeffs
        .get(entry.canonical_id)
        .or_else(|| coeffs.get(name));

    let provider: Box<dyn FilterWidth> = match entry.canonical_id {
        CubeRootVolDelta::NAME => Box::new(CubeRootVolDelta::from_coeffs(block)?),
        MaxDeltaxyzDelta::NAME => Box::new(MaxDeltaxyzDelta::from_coeffs(block)?),
        UniformDelta::NAME => Box::new(UniformDelta::from_coeffs(block)?),
        PrandtlDelta::NAME => {
            let inner_name = block
                .and_then(|b| b.delta.as_deref())
                .unwrap_or(CubeRootVolDelta::NAME);
            let geometric = build_nested(inner_name, coeffs, depth + 1)?;
            Box::new(PrandtlDelta::new(
                geometric,
                block
                    .and_then(|b| b.kappa)
                    .unwrap_or(PrandtlDelta::DEFAULT_KAPPA),
                block
                    .and_then(|b| b.c_delta)
                    .unwrap_or(PrandtlDelta::DEFAULT_C_DELTA),
            )?)
        }
        other => {
            return Err(DeltaError::UnknownProvider {
                name: other.to_string(),
                known: String::new(),
            });
        }
    };

    tracing::debug!(provider = provider.name(), depth, "resolved filter width");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_accepts_aliases() {
        assert_eq!(lookup("CUBEROOTVOL").unwrap().canonical_id, "cubeRootVol");
        assert_eq!(lookup("max_delta_xyz").unwrap().canonical_id, "maxDeltaxyz");
    }

    #[test]
    fn unknown_name_lists_known_providers() {
        let err = lookup("vanDriest").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("vanDriest"));
        assert!(msg.contains("cubeRootVol"));
    }

    #[test]
    fn self_wrapping_prandtl_is_rejected() {
        let mut coeffs = BTreeMap::new();
        coeffs.insert(
            "Prandtl".to_string(),
            DeltaCoeffsDef {
                delta: Some("Prandtl".to_string()),
                ..DeltaCoeffsDef::default()
            },
        );
        let err = build_filter_width("Prandtl", &coeffs).err().unwrap();
        assert!(matches!(err, DeltaError::NestingTooDeep { .. }));
    }

    #[test]
    fn uniform_requires_value() {
        let err = build_filter_width("uniform", &BTreeMap::new()).err().unwrap();
        assert!(matches!(err, DeltaError::MissingCoeff { key: "value", .. }));
    }
}
