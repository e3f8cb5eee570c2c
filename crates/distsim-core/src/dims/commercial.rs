//! Commercial catalogs: distribution channels, customer clusters and
//! promotions.

use rand::rngs::StdRng;

use crate::columns::{canal, cluster, promocion, status, tables};
use crate::error::Result;
use crate::orchestrate::{GenContext, GeneratorSpec, Inputs};
use crate::row;
use crate::table::conform::Defaults;
use crate::table::schema::{SchemaSpec, SemanticType::*};
use crate::table::Table;
use crate::weights::{normalize, validate, VALIDATE_TOLERANCE};

pub const CHANNELS: GeneratorSpec = GeneratorSpec {
    table: tables::CANAL,
    depends_on: &[],
    schema: channel_schema,
    defaults: Defaults::new,
    generate: generate_channels,
};

pub const CLUSTERS: GeneratorSpec = GeneratorSpec {
    table: tables::CLUSTER,
    depends_on: &[],
    schema: cluster_schema,
    defaults: Defaults::new,
    generate: generate_clusters,
};

pub const PROMOTIONS: GeneratorSpec = GeneratorSpec {
    table: tables::PROMOCION,
    depends_on: &[],
    schema: promotion_schema,
    defaults: Defaults::new,
    generate: generate_promotions,
};

pub const NO_PROMOTION_ID: &str = "PROM-000";

pub fn channel_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(canal::ID, Text)
        .column(canal::NOMBRE, Text)
        .column(canal::PESO, Float64)
        .column(canal::PESO_NORMALIZADO, Float64)
        .column(canal::SEGMENTOS, Text)
        .column(canal::TICKET_BAJO, Boolean)
        .column(canal::ESTADO, Categorical)
}

pub fn cluster_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(cluster::ID, Int8)
        .column(cluster::NOMBRE, Text)
        .column(cluster::DESCRIPCION, Text)
        .column(cluster::PRIORIDAD, Int8)
}

pub fn promotion_schema() -> SchemaSpec {
    SchemaSpec::new()
        .column(promocion::ID, Text)
        .column(promocion::NOMBRE, Text)
        .column(promocion::DESCRIPCION, Text)
        .column(promocion::FACTOR, Float32)
        .column(promocion::PESO_USO, Float32)
        .column(promocion::ACTIVA, Boolean)
}

fn generate_channels(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let channels = &ctx.master.channels;
    let raw: Vec<f64> = channels.iter().map(|c| c.weight).collect();
    let normalized = normalize("channels", &raw, ctx.config.run.weight_tolerance)?;
    validate("channels", &normalized, VALIDATE_TOLERANCE);

    let rows = channels
        .iter()
        .zip(normalized)
        .enumerate()
        .map(|(i, (channel, weight))| {
            let segments: Vec<&str> = channel.target_segments.iter().map(|s| s.label()).collect();
            row! {
                canal::ID => format!("CAN-{:02}", i + 1),
                canal::NOMBRE => channel.name.clone(),
                canal::PESO => channel.weight,
                canal::PESO_NORMALIZADO => weight,
                canal::SEGMENTOS => segments.join(","),
                canal::TICKET_BAJO => channel.low_ticket,
                canal::ESTADO => status::ACTIVO,
            }
        })
        .collect();
    Ok(Table::from_rows(tables::CANAL, rows))
}

fn generate_clusters(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let rows = ctx
        .master
        .clusters
        .iter()
        .map(|c| {
            row! {
                cluster::ID => c.id,
                cluster::NOMBRE => c.name.clone(),
                cluster::DESCRIPCION => c.description.clone(),
                cluster::PRIORIDAD => c.priority,
            }
        })
        .collect();
    Ok(Table::from_rows(tables::CLUSTER, rows))
}

fn generate_promotions(ctx: &GenContext<'_>, _inputs: &Inputs<'_>, _rng: &mut StdRng) -> Result<Table> {
    let mut rows = vec![row! {
        promocion::ID => NO_PROMOTION_ID,
        promocion::NOMBRE => "Sin Promoción",
        promocion::DESCRIPCION => "Venta regular sin descuento ni incentivo promocional",
        promocion::FACTOR => 1.0,
        promocion::PESO_USO => 0.0,
        promocion::ACTIVA => true,
    }];

    for (i, promo) in ctx.master.promotions.iter().enumerate() {
        rows.push(row! {
            promocion::ID => format!("PROM-{:03}", i + 1),
            promocion::NOMBRE => promo.name.clone(),
            promocion::DESCRIPCION => format!(
                "Promoción '{}' con impacto estimado de {:.1}% sobre la venta base",
                promo.name,
                promo.uplift * 100.0
            ),
            promocion::FACTOR => 1.0 + promo.uplift,
            promocion::PESO_USO => promo.uplift,
            promocion::ACTIVA => true,
        });
    }
    Ok(Table::from_rows(tables::PROMOCION, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dims::testing::{build_until, small_config};
    use crate::master::MasterData;

    #[test]
    fn test_channel_weights_normalized() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::CANAL, 1);
        let channels = registry.get(tables::CANAL).unwrap();
        assert!(channels.conforms_to(&channel_schema()));
        let total: f64 = channels
            .rows()
            .map(|r| r.float(canal::PESO_NORMALIZADO).unwrap())
            .sum();
        assert!((total - 1.0).abs() < 1e-9);
        let first = channels.row(0).unwrap();
        assert_eq!(first.str(canal::ID).unwrap(), "CAN-01");
        assert_eq!(first.str(canal::SEGMENTOS).unwrap(), "C-,D,E");
    }

    #[test]
    fn test_clusters_copy_master_data() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::CLUSTER, 1);
        let clusters = registry.get(tables::CLUSTER).unwrap();
        assert!(clusters.conforms_to(&cluster_schema()));
        assert_eq!(clusters.num_rows(), master.clusters.len());
    }

    #[test]
    fn test_promotions_start_with_no_promotion() {
        let master = MasterData::reference().unwrap();
        let registry = build_until(&small_config(), &master, tables::PROMOCION, 1);
        let promotions = registry.get(tables::PROMOCION).unwrap();
        assert!(promotions.conforms_to(&promotion_schema()));
        assert_eq!(promotions.num_rows(), master.promotions.len() + 1);

        let none = promotions.row(0).unwrap();
        assert_eq!(none.str(promocion::ID).unwrap(), NO_PROMOTION_ID);
        assert_eq!(none.float(promocion::FACTOR).unwrap(), 1.0);
        assert_eq!(none.float(promocion::PESO_USO).unwrap(), 0.0);

        let first = promotions.row(1).unwrap();
        let uplift = master.promotions[0].uplift;
        assert_eq!(first.str(promocion::ID).unwrap(), "PROM-001");
        assert_eq!(
            first.float(promocion::FACTOR).unwrap(),
            (1.0 + uplift) as f32 as f64
        );
        assert!(first.str(promocion::DESCRIPCION).unwrap().contains('%'));
    }
}
