use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Every reference list the generators draw from.
///
/// Deserialized from TOML. The bundled dataset describes a beverage
/// distributor in the Dominican Republic; a replacement file with the same
/// shape can be supplied through `run.master_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterData {
    pub provinces: Vec<Province>,
    pub socioeconomic: Socioeconomic,
    pub plant: Plant,
    pub warehouse: Warehouse,
    pub principal_center: PrincipalCenter,
    pub centers: Vec<CenterSeed>,
    pub departments: Vec<Department>,
    /// Sales profiles keyed by profile key. Roles refer to them by key.
    pub sales_profiles: IndexMap<String, SalesProfile>,
    pub channels: Vec<Channel>,
    pub clusters: Vec<ClusterSeed>,
    pub promotions: Vec<PromotionSeed>,
    pub holidays: Vec<Holiday>,
    pub seasonality: Seasonality,
    pub vehicle_models: Vec<VehicleModel>,
    pub products: Vec<Product>,
    /// Catalogue category → reporting category, excise class, seasonality.
    #[serde(default)]
    pub product_categories: IndexMap<String, ProductCategory>,
    #[serde(default)]
    pub excise: Vec<ExciseRate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Province {
    pub id: String,
    pub name: String,
    pub region: String,
    pub population: i64,
    pub area_km2: f64,
    pub lat: f64,
    pub lon: f64,
    /// Nominal share of commercial activity. Normalized at generation time.
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socioeconomic {
    pub levels: Vec<String>,
    /// Region whose weights apply to regions missing from `regions`.
    pub fallback_region: String,
    /// Region → (level → weight).
    pub regions: IndexMap<String, IndexMap<String, f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub municipality: String,
    pub province: String,
    pub lat: f64,
    pub lon: f64,
    pub capacity_liters_day: i64,
    pub opened: NaiveDate,
    pub status: String,
    pub certifications: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub kind: String,
    pub capacity_m3: i64,
    pub capacity_pallets: i64,
    pub refrigerated: bool,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalCenter {
    pub id: String,
    /// Province name, resolved against the geography table.
    pub province: String,
    pub capacity_pallets: i64,
}

/// A regional distribution center as listed in master data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CenterSeed {
    pub id: String,
    pub name: String,
    /// Province name, resolved against the geography table.
    pub province: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub capacity_pallets: Option<i64>,
    #[serde(default = "default_center_kind")]
    pub kind: String,
    #[serde(default = "default_active")]
    pub status: String,
}

fn default_center_kind() -> String {
    "Regional".to_string()
}

fn default_active() -> String {
    "Activo".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentKind {
    Operational,
    Commercial,
    Administrative,
}

impl DepartmentKind {
    pub fn label(self) -> &'static str {
        match self {
            DepartmentKind::Operational => "Operativo",
            DepartmentKind::Commercial => "Comercial",
            DepartmentKind::Administrative => "Administrativo",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepartmentTier {
    Executive,
    Operational,
}

impl DepartmentTier {
    pub fn label(self) -> &'static str {
        match self {
            DepartmentTier::Executive => "Dirección",
            DepartmentTier::Operational => "Operativo",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub key: String,
    pub name: String,
    pub kind: DepartmentKind,
    pub tier: DepartmentTier,
    pub roles: Vec<Role>,
}

/// Hierarchy level of a job role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleLevel {
    Executive,
    Specialist,
    Operational,
}

impl RoleLevel {
    pub fn label(self) -> &'static str {
        match self {
            RoleLevel::Executive => "Gerencial/Directivo",
            RoleLevel::Specialist => "Mando Medio/Especialista",
            RoleLevel::Operational => "Operativo/Técnico",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    pub key: String,
    pub title: String,
    pub level: RoleLevel,
    pub salary_min: f64,
    pub salary_max: f64,
    pub headcount: u32,
    /// Key into `MasterData::sales_profiles` for roles that sell.
    #[serde(default)]
    pub sales_profile: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesProfile {
    /// Agent type label written to the agent and route tables.
    pub label: String,
    pub focus: String,
    pub monthly_target: f64,
    pub commission: f64,
    pub supervisor: bool,
    pub daily_visits: i64,
}

/// Customer socioeconomic segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    A,
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C-")]
    CMinus,
    D,
    E,
}

impl Segment {
    pub fn label(self) -> &'static str {
        match self {
            Segment::A => "A",
            Segment::B => "B",
            Segment::CPlus => "C+",
            Segment::CMinus => "C-",
            Segment::D => "D",
            Segment::E => "E",
        }
    }

    /// A and B customers go to the high-priority clusters.
    pub fn is_premium(self) -> bool {
        matches!(self, Segment::A | Segment::B)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentWeight {
    pub segment: Segment,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub weight: f64,
    pub target_segments: Vec<Segment>,
    pub low_ticket: bool,
    /// Segment mix of customers acquired through this channel.
    #[serde(default)]
    pub segment_weights: Vec<SegmentWeight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSeed {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// 1 is the highest priority.
    pub priority: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromotionSeed {
    pub name: String,
    /// Expected sales uplift as a fraction (0.23 = +23%).
    pub uplift: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seasonality {
    /// January..December base factors.
    pub monthly: Vec<f64>,
    pub holiday_impact: HolidayImpact,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HolidayImpact {
    pub before: f64,
    pub on: f64,
    pub after: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleModel {
    pub model: String,
    pub kind: String,
    pub capacity_ton: f64,
    pub volume_m3: f64,
    pub km_per_liter: f64,
    pub daily_cost: f64,
    pub usage: String,
    pub depreciation: f64,
    /// Fleet mix weight at principal centers.
    pub principal_weight: f64,
    /// Fleet mix weight at regional centers.
    pub regional_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub sku: String,
    pub name: String,
    pub brand: String,
    pub flavor: String,
    pub category: String,
    pub liters: f64,
    pub package: String,
    pub units_per_case: i64,
    pub list_price: f64,
    pub unit_cost: f64,
    /// Relative share of sales volume.
    pub sales_weight: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    pub global: String,
    pub tax_class: String,
    #[serde(default = "neutral_factor")]
    pub seasonality: f64,
}

fn neutral_factor() -> f64 {
    1.0
}

/// Selective consumption tax rate for a brand within an excise class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExciseRate {
    pub brand: String,
    pub tax_class: String,
    pub rate: f64,
}
