//! # Master Data
//!
//! Reference lists (provinces, facilities, org chart, channels, products,
//! fleet, holidays) deserialized from TOML. The reference dataset is compiled into
//! the library; `MasterData::load` swaps in a replacement file when one is
//! configured.
//!
//! Structural problems that would make generation meaningless (unknown
//! sales profile keys, inverted salary bands, a seasonality table that is
//! not twelve months long) are rejected here rather than inside the
//! generators.

pub mod types;

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

pub use self::types::*;
use crate::error::{DistSimError, Result};

const REFERENCE_TOML: &str = include_str!("../../data/reference.toml");

impl MasterData {
    /// The bundled reference dataset.
    pub fn reference() -> Result<Self> {
        Self::from_toml_str(REFERENCE_TOML, "bundled reference data")
    }

    /// Load from `path`, or the bundled dataset when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::reference(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DistSimError::MasterData {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let data: MasterData = toml::from_str(content).map_err(|e| DistSimError::MasterData {
            message: format!("Failed to parse {}: {}", origin, e),
        })?;
        data.validate()?;
        debug!(
            origin,
            provinces = data.provinces.len(),
            centers = data.centers.len(),
            departments = data.departments.len(),
            "master data loaded"
        );
        Ok(data)
    }

    /// Check cross-references and shapes serde cannot enforce.
    pub fn validate(&self) -> Result<()> {
        if self.provinces.is_empty() {
            return Err(invalid("at least one province is required"));
        }
        let mut seen = HashSet::new();
        for province in &self.provinces {
            if !seen.insert(province.id.as_str()) {
                return Err(invalid(format!("duplicate province id '{}'", province.id)));
            }
            if province.area_km2 <= 0.0 {
                return Err(invalid(format!(
                    "province '{}' has non-positive area {}",
                    province.name, province.area_km2
                )));
            }
        }

        if !self
            .socioeconomic
            .regions
            .contains_key(&self.socioeconomic.fallback_region)
        {
            return Err(invalid(format!(
                "socioeconomic fallback region '{}' has no weight table",
                self.socioeconomic.fallback_region
            )));
        }

        let mut role_keys = HashSet::new();
        for department in &self.departments {
            for role in &department.roles {
                if !role_keys.insert(role.key.as_str()) {
                    return Err(invalid(format!("duplicate role key '{}'", role.key)));
                }
                if role.salary_min > role.salary_max {
                    return Err(invalid(format!(
                        "role '{}' has salary_min {} above salary_max {}",
                        role.key, role.salary_min, role.salary_max
                    )));
                }
                if let Some(profile) = &role.sales_profile {
                    if !self.sales_profiles.contains_key(profile) {
                        return Err(invalid(format!(
                            "role '{}' refers to unknown sales profile '{}'",
                            role.key, profile
                        )));
                    }
                }
            }
        }

        if self.seasonality.monthly.len() != 12 {
            return Err(invalid(format!(
                "seasonality.monthly must have 12 entries, found {}",
                self.seasonality.monthly.len()
            )));
        }

        if self.vehicle_models.is_empty() {
            return Err(invalid("at least one vehicle model is required"));
        }

        if self.products.is_empty() {
            return Err(invalid("at least one product is required"));
        }
        let mut skus = HashSet::new();
        for product in &self.products {
            if !skus.insert(product.sku.as_str()) {
                return Err(invalid(format!("duplicate product sku '{}'", product.sku)));
            }
        }

        Ok(())
    }

    /// Every role across departments, in declaration order.
    pub fn roles(&self) -> impl Iterator<Item = (&Department, &Role)> {
        self.departments
            .iter()
            .flat_map(|d| d.roles.iter().map(move |r| (d, r)))
    }

    /// Role by its key.
    pub fn role(&self, key: &str) -> Option<&Role> {
        self.roles().map(|(_, role)| role).find(|role| role.key == key)
    }

    /// Sales profile for a role key, when the role sells.
    pub fn sales_profile_for_role(&self, key: &str) -> Option<&SalesProfile> {
        self.role(key)
            .and_then(|role| role.sales_profile.as_ref())
            .and_then(|profile| self.sales_profiles.get(profile))
    }

    /// Excise rate for a brand in an excise class. Brands compare
    /// case-insensitively and the first matching entry wins.
    pub fn excise_rate(&self, brand: &str, tax_class: &str) -> Option<f64> {
        self.excise
            .iter()
            .find(|e| e.tax_class == tax_class && e.brand.to_uppercase() == brand.to_uppercase())
            .map(|e| e.rate)
    }

    /// Base seasonality factor for a month (1..=12).
    pub fn monthly_factor(&self, month: u32) -> f64 {
        self.seasonality
            .monthly
            .get(month.saturating_sub(1) as usize)
            .copied()
            .unwrap_or(1.0)
    }
}

fn invalid(message: impl Into<String>) -> DistSimError {
    DistSimError::MasterData {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_data_loads() {
        let data = MasterData::reference().unwrap();
        assert_eq!(data.provinces.len(), 32);
        assert_eq!(data.centers.len(), 12);
        assert_eq!(data.holidays.len(), 72);
        assert_eq!(data.vehicle_models.len(), 6);
        assert_eq!(data.products.len(), 55);
        assert_eq!(data.principal_center.capacity_pallets, 45_000);
        assert_eq!(data.seasonality.monthly.len(), 12);
    }

    #[test]
    fn test_every_channel_has_segment_weights() {
        let data = MasterData::reference().unwrap();
        for channel in &data.channels {
            assert_eq!(channel.segment_weights.len(), 6, "{}", channel.name);
        }
    }

    #[test]
    fn test_sales_profile_lookup_is_by_role_key() {
        let data = MasterData::reference().unwrap();
        let (_, kam_role) = data
            .roles()
            .find(|(_, r)| r.sales_profile.as_deref() == Some("kam"))
            .unwrap();
        let kam = data.sales_profile_for_role(&kam_role.key).unwrap();
        assert_eq!(kam.daily_visits, 15);
        assert!(data.sales_profile_for_role(&kam_role.title).is_none());
        assert!(data.sales_profile_for_role("no_such_role").is_none());
    }

    #[test]
    fn test_shared_title_resolves_by_key() {
        let mut data = MasterData::reference().unwrap();
        let seller = data
            .roles()
            .map(|(_, r)| r.clone())
            .find(|r| r.sales_profile.is_some())
            .unwrap();
        let clerk = Role {
            key: "asistente_homonimo".to_string(),
            title: seller.title.clone(),
            sales_profile: None,
            ..seller.clone()
        };
        data.departments.last_mut().unwrap().roles.push(clerk);
        data.validate().unwrap();

        assert!(data.sales_profile_for_role(&seller.key).is_some());
        assert!(data.sales_profile_for_role("asistente_homonimo").is_none());
    }

    #[test]
    fn test_duplicate_role_key_rejected() {
        let mut data = MasterData::reference().unwrap();
        let dup = data.departments[0].roles[0].clone();
        data.departments.last_mut().unwrap().roles.push(dup);
        let err = data.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate role key"), "{err}");
    }

    #[test]
    fn test_monthly_factor() {
        let data = MasterData::reference().unwrap();
        assert_eq!(data.monthly_factor(12), 1.40);
        assert_eq!(data.monthly_factor(13), 1.0);
    }

    #[test]
    fn test_unknown_sales_profile_rejected() {
        let mut data = MasterData::reference().unwrap();
        data.departments[0].roles[0].sales_profile = Some("nope".to_string());
        let err = data.validate().unwrap_err().to_string();
        assert!(err.contains("unknown sales profile"));
    }

    #[test]
    fn test_duplicate_province_rejected() {
        let mut data = MasterData::reference().unwrap();
        let dup = data.provinces[0].clone();
        data.provinces.push(dup);
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("master.toml");
        std::fs::write(&path, REFERENCE_TOML).unwrap();
        let data = MasterData::load(Some(&path)).unwrap();
        assert_eq!(data.plant.id, "PLN-01");

        std::fs::write(&path, "provinces = 3").unwrap();
        assert!(MasterData::from_path(&path).is_err());
    }

    #[test]
    fn test_excise_rate_matches_brand_case_insensitively() {
        let data = MasterData::reference().unwrap();
        assert_eq!(data.excise_rate("COCA-COLA", "CSD"), Some(0.10));
        assert_eq!(data.excise_rate("Monster", "ENERGIZANTE"), Some(0.15));
        assert_eq!(data.excise_rate("Coca-Cola", "AGUA"), None);
        assert_eq!(data.excise_rate("Dasani", "AGUA"), None);
    }

    #[test]
    fn test_duplicate_sku_rejected() {
        let mut data = MasterData::reference().unwrap();
        let dup = data.products[0].clone();
        data.products.push(dup);
        let err = data.validate().unwrap_err().to_string();
        assert!(err.contains("duplicate product sku"), "{err}");
    }
}
