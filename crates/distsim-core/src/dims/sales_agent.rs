//! DimVendedor: the sales force, derived from active employees whose role
//! carries a sales profile.
//!
//! Supervisors (territory managers) are created alongside the field agents.
//! Every non-supervisor then reports to a supervisor based at the same
//! center when one exists.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::Rng;

use crate::columns::{empleado, puesto, status, tables, vendedor as col};
use crate::dims::pick;
use crate::error::Result;
use crate::fakes;
use crate::geo::round_to;
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::value::Value;
use crate::table::Table;

pub const SPEC: GeneratorSpec = GeneratorSpec {
    table: tables::VENDEDOR,
    depends_on: &[tables::EMPLEADO, tables::PUESTO],
    schema,
    defaults: Defaults::new,
    generate,
};

const EXPERIENCE_TIERS: [&str; 4] = ["Junior", "Intermedio", "Senior", "Master"];

pub fn schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(col::ID, Text)
        .column(col::EMPLEADO_ID, Text)
        .column(col::PUESTO_ID, Text)
        .column(col::NOMBRE, Text)
        .column(col::CEDI_ID, Text)
        .column(col::TIPO, Categorical)
        .column(col::ENFOQUE_CANAL, Categorical)
        .column(col::META, Float64)
        .column(col::COMISION, Float32)
        .column(col::TELEFONO_FLOTA, Text)
        .column(col::NIVEL_EXPERIENCIA, Categorical)
        .column(col::FECHA_ASIGNACION, Date)
        .column(col::ESTADO, Categorical)
        .column(col::GERENTE_ID, Text)
        .column(col::VISITAS_DIA, Int16)
        .column(col::ES_SUPERVISOR, Boolean)
}

fn generate(ctx: &GenContext<'_>, inputs: &Inputs<'_>, rng: &mut StdRng) -> Result<Table> {
    let employees = inputs.get(tables::EMPLEADO)?;
    let titles = inputs.get(tables::PUESTO)?;

    let mut role_keys: HashMap<&str, &str> = HashMap::new();
    for row in titles.rows() {
        role_keys.insert(row.str(puesto::ID)?, row.str(puesto::CLAVE)?);
    }

    let mut rows = Vec::new();
    for emp in employees.rows() {
        if emp.str(empleado::ESTATUS)? != status::ACTIVO {
            continue;
        }
        let title_id = emp.str(empleado::PUESTO_ID)?;
        let Some(profile) = role_keys
            .get(title_id)
            .and_then(|key| ctx.master.sales_profile_for_role(key))
        else {
            continue;
        };

        let target = round_to(profile.monthly_target * rng.random_range(0.9..1.1), 2);
        rows.push(row! {
            col::ID => emp.str(empleado::ID)?.to_string(),
            col::EMPLEADO_ID => emp.str(empleado::ID)?.to_string(),
            col::PUESTO_ID => title_id.to_string(),
            col::NOMBRE => emp.str(empleado::NOMBRE)?.to_string(),
            col::CEDI_ID => emp.str(empleado::CEDI_ID)?.to_string(),
            col::TIPO => profile.label.clone(),
            col::ENFOQUE_CANAL => profile.focus.clone(),
            col::META => target,
            col::COMISION => profile.commission,
            col::TELEFONO_FLOTA => fakes::fleet_phone(rng),
            col::NIVEL_EXPERIENCIA => *pick(rng, &EXPERIENCE_TIERS),
            col::FECHA_ASIGNACION => emp.date(empleado::FECHA_CONTRATACION)?,
            col::ESTADO => status::ACTIVO,
            col::GERENTE_ID => Value::Null,
            col::VISITAS_DIA => if profile.supervisor { 0 } else { profile.daily_visits },
            col::ES_SUPERVISOR => profile.supervisor,
        });
    }

    let mut supervisors: HashMap<String, Vec<String>> = HashMap::new();
    for row in &rows {
        if row.get(col::ES_SUPERVISOR).and_then(Value::as_bool) == Some(true) {
            if let (Some(center), Some(id)) = (
                row.get(col::CEDI_ID).and_then(Value::as_str),
                row.get(col::ID).and_then(Value::as_str),
            ) {
                supervisors.entry(center.to_string()).or_default().push(id.to_string());
            }
        }
    }

    for row in &mut rows {
        if row.get(col::ES_SUPERVISOR).and_then(Value::as_bool) == Some(true) {
            continue;
        }
        let manager = row
            .get(col::CEDI_ID)
            .and_then(Value::as_str)
            .and_then(|center| supervisors.get(center))
            .map(|ids| pick(rng, ids).clone());
        if let Some(manager) = manager {
            row.insert(col::GERENTE_ID, Value::owned(manager));
        }
    }

    Ok(Table::from_rows(tables::VENDEDOR, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::testing::{build_until, small_config};
    use crate::master::{MasterData, Role, RoleLevel};

    #[test]
    fn test_agents_are_active_sales_employees() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::VENDEDOR, 2);
        let agents = registry.get(tables::VENDEDOR).unwrap();
        let titles = registry.get(tables::PUESTO).unwrap();

        assert!(agents.conforms_to(&schema()));
        assert!(agents.num_rows() > 0);

        let keys: HashMap<&str, &str> = titles
            .rows()
            .map(|r| (r.str(puesto::ID).unwrap(), r.str(puesto::CLAVE).unwrap()))
            .collect();
        for agent in agents.rows() {
            assert_eq!(agent.str(col::ID).unwrap(), agent.str(col::EMPLEADO_ID).unwrap());
            let key = keys[agent.str(col::PUESTO_ID).unwrap()];
            let profile = master.sales_profile_for_role(key).unwrap();
            assert_eq!(agent.str(col::TIPO).unwrap(), profile.label);
            let target = agent.float(col::META).unwrap();
            assert!(target >= profile.monthly_target * 0.9 - 0.01);
            assert!(target <= profile.monthly_target * 1.1 + 0.01);
        }
    }

    #[test]
    fn test_managers_are_supervisors_at_same_center() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::VENDEDOR, 3);
        let agents = registry.get(tables::VENDEDOR).unwrap();

        let by_id: HashMap<&str, (&str, bool)> = agents
            .rows()
            .map(|r| {
                (
                    r.str(col::ID).unwrap(),
                    (r.str(col::CEDI_ID).unwrap(), r.bool(col::ES_SUPERVISOR).unwrap()),
                )
            })
            .collect();

        for agent in agents.rows() {
            let supervisor = agent.bool(col::ES_SUPERVISOR).unwrap();
            let manager = agent.opt_str(col::GERENTE_ID).unwrap();
            if supervisor {
                assert!(manager.is_none());
                assert_eq!(agent.int(col::VISITAS_DIA).unwrap(), 0);
            } else if let Some(manager) = manager {
                let (center, is_sup) = by_id[manager];
                assert!(is_sup);
                assert_eq!(center, agent.str(col::CEDI_ID).unwrap());
            }
        }
    }

    #[test]
    fn test_role_sharing_a_sales_title_does_not_sell() {
        let mut master = MasterData::reference().unwrap();
        let seller = master
            .roles()
            .map(|(_, r)| r.clone())
            .find(|r| r.sales_profile.is_some() && r.level != RoleLevel::Executive)
            .unwrap();
        master.departments.last_mut().unwrap().roles.push(Role {
            key: "asistente_homonimo".to_string(),
            headcount: 3,
            sales_profile: None,
            ..seller.clone()
        });
        master.validate().unwrap();

        let registry = build_until(&small_config(), &master, tables::VENDEDOR, 6);
        let titles = registry.get(tables::PUESTO).unwrap();
        let keys: HashMap<&str, &str> = titles
            .rows()
            .map(|r| (r.str(puesto::ID).unwrap(), r.str(puesto::CLAVE).unwrap()))
            .collect();

        let employees = registry.get(tables::EMPLEADO).unwrap();
        let clerks = employees
            .rows()
            .filter(|e| keys[e.str(empleado::PUESTO_ID).unwrap()] == "asistente_homonimo")
            .count();
        assert_eq!(clerks, 3);

        let agents = registry.get(tables::VENDEDOR).unwrap();
        let mut sellers = 0;
        for agent in agents.rows() {
            let key = keys[agent.str(col::PUESTO_ID).unwrap()];
            assert_ne!(key, "asistente_homonimo");
            if key == seller.key {
                sellers += 1;
            }
        }
        assert_eq!(sellers, seller.headcount as usize);
    }
}
