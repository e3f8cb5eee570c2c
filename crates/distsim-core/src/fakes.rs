//! Fake text values: customer and employee names, contact details and route
//! zone labels. Every function draws from the caller's RNG so output stays a
//! function of the run seed.
//!
//! `fake` ships no Spanish locale, so names and zone labels draw from the
//! Dominican pools below; `fake` still supplies email addresses and digit
//! patterns.

use fake::faker::internet::en::SafeEmail;
use fake::faker::number::en::NumberWithFormat;
use fake::Fake;
use rand::Rng;

use crate::dims::pick;

const GIVEN_NAMES: [&str; 24] = [
    "José", "Juan", "Luis", "Carlos", "Miguel", "Rafael", "Pedro", "Francisco",
    "Ramón", "Manuel", "Ángel", "Wilson", "María", "Ana", "Carmen", "Rosa",
    "Yolanda", "Altagracia", "Juana", "Francisca", "Mercedes", "Yokasta", "Lucía", "Esther",
];

const SURNAMES: [&str; 24] = [
    "Rodríguez", "Pérez", "Martínez", "García", "Santos", "Sánchez", "Ramírez", "Reyes",
    "Díaz", "Hernández", "Jiménez", "Peña", "Batista", "Féliz", "Castillo", "Almonte",
    "Núñez", "Guzmán", "Mejía", "Vásquez", "Polanco", "Taveras", "Rosario", "Encarnación",
];

const BUSINESS_KINDS: [&str; 10] = [
    "Colmado", "Supermercado", "Minimarket", "Farmacia", "Cafetería",
    "Bodega", "Distribuidora", "Comedor", "Bar", "Repostería",
];

const ZONE_KINDS: [&str; 6] = ["Sector", "Barrio", "Ensanche", "Residencial", "Urbanización", "Villa"];

const AREA_CODES: [&str; 3] = ["809", "829", "849"];

pub fn company_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let kind = *pick(rng, &BUSINESS_KINDS);
    if rng.random_bool(0.5) {
        format!("{} {}", kind, pick(rng, &SURNAMES))
    } else {
        format!("{} {} {}", kind, pick(rng, &GIVEN_NAMES), pick(rng, &SURNAMES))
    }
}

/// Given name plus paternal and maternal surnames.
pub fn person_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{} {} {}",
        pick(rng, &GIVEN_NAMES),
        pick(rng, &SURNAMES),
        pick(rng, &SURNAMES)
    )
}

/// Email address made unique by embedding `index` in the local part.
pub fn email<R: Rng + ?Sized>(rng: &mut R, index: usize) -> String {
    let email: String = SafeEmail().fake_with_rng(rng);
    match email.split_once('@') {
        Some((local, domain)) => format!("{}.{}@{}", local, index, domain),
        None => format!("empleado{}@example.com", index),
    }
}

/// Contact number in the local `8X9-NNN-NNNN` format.
pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let area = *pick(rng, &AREA_CODES);
    let number: String = NumberWithFormat("^##-####").fake_with_rng(rng);
    format!("{}-{}", area, number)
}

/// Fleet line in the local `809-NNN-NNNN` format.
pub fn fleet_phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "809-{}-{}",
        rng.random_range(200..=999),
        rng.random_range(1000..=9999)
    )
}

/// Neighborhood-style zone label for a route.
pub fn zone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{} {}", pick(rng, &ZONE_KINDS), pick(rng, &SURNAMES))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_email_embeds_index() {
        let mut rng = StdRng::seed_from_u64(1);
        let email = email(&mut rng, 42);
        let (local, domain) = email.split_once('@').unwrap();
        assert!(local.ends_with(".42"), "got {email}");
        assert!(!domain.is_empty());
    }

    #[test]
    fn test_fleet_phone_format() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..50 {
            let phone = fleet_phone(&mut rng);
            let parts: Vec<&str> = phone.split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "809");
            assert_eq!(parts[1].len(), 3);
            assert_eq!(parts[2].len(), 4);
        }
    }

    #[test]
    fn test_same_seed_same_names() {
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (company_name(&mut rng), person_name(&mut rng), zone(&mut rng))
        };
        assert_eq!(draw(9), draw(9));
    }

    #[test]
    fn test_names_are_spanish() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let name = person_name(&mut rng);
            let parts: Vec<&str> = name.split(' ').collect();
            assert_eq!(parts.len(), 3, "{name}");
            assert!(GIVEN_NAMES.contains(&parts[0]));
            assert!(SURNAMES.contains(&parts[1]) && SURNAMES.contains(&parts[2]));

            let company = company_name(&mut rng);
            assert!(BUSINESS_KINDS.iter().any(|k| company.starts_with(k)), "{company}");

            let zone = zone(&mut rng);
            assert!(ZONE_KINDS.iter().any(|k| zone.starts_with(k)), "{zone}");
        }
    }

    #[test]
    fn test_phone_format() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let phone = phone(&mut rng);
            let parts: Vec<&str> = phone.split('-').collect();
            assert_eq!(parts.len(), 3, "{phone}");
            assert!(AREA_CODES.contains(&parts[0]));
            assert_eq!(parts[1].len(), 3);
            assert!(!parts[1].starts_with('0'));
            assert_eq!(parts[2].len(), 4);
            assert!(phone.chars().all(|c| c == '-' || c.is_ascii_digit()));
        }
    }
}
