// ==========================================
// 运输任务数据 - 规划视图校验器
// ==========================================
// 校验顺序（遇到第一条违规即返回）:
// 1. 字段完整: 名称/地址非空，重量/载重/数量为正
// 2. 库存覆盖需求: 每种需求货物必须有库存，且总需求 ≤ 总库存
// 3. 名称唯一: 各分区内名称唯一，站点内货物类型唯一
// ==========================================

use crate::domain::planning_view::{PlanningView, SiteView};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// 规划校验错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlanValidationError {
    #[error("字段未填写 ({section}[{index}]): {field}")]
    EmptyField {
        section: String,
        index: usize,
        field: &'static str,
    },

    #[error("目的地 {destination} 需求的货物无任何仓库库存: {cargo_type}")]
    UnstockedCargo {
        cargo_type: String,
        destination: String,
    },

    #[error("货物库存不足: {cargo_type}（需求 {required}，库存 {available}）")]
    InsufficientStock {
        cargo_type: String,
        required: f64,
        available: f64,
    },

    #[error("名称重复 ({section}): {name}")]
    DuplicateName { section: String, name: String },
}

pub type PlanResult<T> = Result<T, PlanValidationError>;

pub struct PlanValidator;

impl PlanValidator {
    pub fn validate(&self, view: &PlanningView) -> PlanResult<()> {
        self.validate_fields_filled(view)?;
        self.validate_stock_covers_demand(view)?;
        self.validate_unique_names(view)?;
        Ok(())
    }

    /// 字段完整性
    pub fn validate_fields_filled(&self, view: &PlanningView) -> PlanResult<()> {
        for (index, cargo) in view.cargo_types.iter().enumerate() {
            require(is_filled(&cargo.name), "cargoTypes", index, "name")?;
            require(cargo.weight > 0.0, "cargoTypes", index, "weight")?;
        }

        for (index, truck) in view.truck_types.iter().enumerate() {
            require(is_filled(&truck.name), "truckTypes", index, "name")?;
            require(truck.capacity > 0.0, "truckTypes", index, "capacity")?;
        }

        check_sites_filled("warehouses", &view.warehouses)?;
        check_sites_filled("destinations", &view.destinations)?;
        Ok(())
    }

    /// 库存覆盖需求（按货物类型名称汇总）
    pub fn validate_stock_covers_demand(&self, view: &PlanningView) -> PlanResult<()> {
        let mut available: HashMap<&str, f64> = HashMap::new();
        for entry in view.warehouses.iter().flat_map(|w| w.cargos.iter()) {
            *available.entry(entry.cargo_type.as_str()).or_default() += entry.quantity.as_f64();
        }

        // 保留首次出现顺序，保证报错稳定
        let mut demanded: Vec<&str> = Vec::new();
        let mut required: HashMap<&str, f64> = HashMap::new();
        for dest in &view.destinations {
            for entry in &dest.cargos {
                let cargo_type = entry.cargo_type.as_str();
                if !available.contains_key(cargo_type) {
                    return Err(PlanValidationError::UnstockedCargo {
                        cargo_type: cargo_type.to_string(),
                        destination: dest.name.clone(),
                    });
                }
                let total = required.entry(cargo_type).or_insert_with(|| {
                    demanded.push(cargo_type);
                    0.0
                });
                *total += entry.quantity.as_f64();
            }
        }

        for cargo_type in demanded {
            let need = required.get(cargo_type).copied().unwrap_or_default();
            let have = available.get(cargo_type).copied().unwrap_or_default();
            if need > have {
                return Err(PlanValidationError::InsufficientStock {
                    cargo_type: cargo_type.to_string(),
                    required: need,
                    available: have,
                });
            }
        }

        Ok(())
    }

    /// 名称唯一性
    pub fn validate_unique_names(&self, view: &PlanningView) -> PlanResult<()> {
        check_unique("cargoTypes", view.cargo_types.iter().map(|c| c.name.as_str()))?;

        for (section, sites) in [
            ("warehouses", &view.warehouses),
            ("destinations", &view.destinations),
        ] {
            check_unique(section, sites.iter().map(|s| s.name.as_str()))?;
            for site in sites.iter() {
                check_unique(
                    &format!("{}/{}", section, site.name),
                    site.cargos.iter().map(|c| c.cargo_type.as_str()),
                )?;
            }
        }

        Ok(())
    }
}

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn require(ok: bool, section: &str, index: usize, field: &'static str) -> PlanResult<()> {
    if ok {
        Ok(())
    } else {
        Err(PlanValidationError::EmptyField {
            section: section.to_string(),
            index,
            field,
        })
    }
}

fn check_sites_filled(section: &str, sites: &[SiteView]) -> PlanResult<()> {
    for (index, site) in sites.iter().enumerate() {
        require(is_filled(&site.name), section, index, "name")?;
        require(is_filled(&site.address), section, index, "address")?;

        let cargo_section = format!("{}[{}].cargos", section, index);
        for (cargo_index, entry) in site.cargos.iter().enumerate() {
            require(
                is_filled(entry.cargo_type.as_str()),
                &cargo_section,
                cargo_index,
                "type",
            )?;
            require(
                entry.quantity.as_f64() > 0.0,
                &cargo_section,
                cargo_index,
                "quantity",
            )?;
        }
    }
    Ok(())
}

fn check_unique<'a>(section: &str, names: impl Iterator<Item = &'a str>) -> PlanResult<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(PlanValidationError::DuplicateName {
                section: section.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}
