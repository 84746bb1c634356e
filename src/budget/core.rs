use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    config::Personne,
    entry::{Depense, Revenu},
};

/// A personal budget record: individual charges, incomes and the monthly
/// transfer towards the family account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Whose budget this is.
    pub personne: Personne,
    /// The monthly charges.
    pub charges: Vec<Depense>,
    /// The incomes, including synchronized transfer mirrors.
    pub revenus: Vec<Revenu>,
    /// The fixed monthly transfer towards the joint family account.
    #[serde(rename = "virementFamille")]
    pub virement_famille: Decimal,
}

fn parse_montant(raw: &str) -> Result<Decimal, Error> {
    raw.parse()
        .map_err(|error: rust_decimal::Error| Error::CorruptRecord(error.to_string()))
}

/// Fetch a personal budget record.
///
/// # Errors
/// Returns [Error::NotFound] if the person has no budget record yet.
pub fn fetch_budget(connection: &Connection, personne: Personne) -> Result<Budget, Error> {
    let (charges_json, revenus_json, virement_famille) = connection.query_row(
        "SELECT charges, revenus, virement_famille FROM budget WHERE personne = ?1",
        params![personne.as_str()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        },
    )?;

    Ok(Budget {
        personne,
        charges: serde_json::from_str(&charges_json)?,
        revenus: serde_json::from_str(&revenus_json)?,
        virement_famille: parse_montant(&virement_famille)?,
    })
}

/// Fetch a personal budget record, creating an empty one on first access.
///
/// A fresh budget has no charges, no incomes and a zero family transfer.
pub fn fetch_or_create_budget(
    connection: &Connection,
    personne: Personne,
) -> Result<Budget, Error> {
    connection.execute(
        "INSERT OR IGNORE INTO budget (personne, charges, revenus, virement_famille)
         VALUES (?1, '[]', '[]', '0')",
        params![personne.as_str()],
    )?;

    fetch_budget(connection, personne)
}

/// Replace a personal budget record whole, creating it if absent, and return
/// the stored record.
pub fn upsert_budget(
    connection: &Connection,
    personne: Personne,
    charges: &[Depense],
    revenus: &[Revenu],
    virement_famille: Decimal,
) -> Result<Budget, Error> {
    connection.execute(
        "INSERT INTO budget (personne, charges, revenus, virement_famille)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(personne) DO UPDATE
         SET charges = ?2, revenus = ?3, virement_famille = ?4",
        params![
            personne.as_str(),
            serde_json::to_string(charges)?,
            serde_json::to_string(revenus)?,
            virement_famille.to_string()
        ],
    )?;

    fetch_budget(connection, personne)
}

/// Replace only the income list of a personal budget.
///
/// This is the write the transfer synchronizer performs on a destination
/// budget; charges and the family transfer amount are left untouched.
///
/// # Errors
/// Returns [Error::NotFound] if the person has no budget record yet.
pub fn update_revenus_budget(
    connection: &Connection,
    personne: Personne,
    revenus: &[Revenu],
) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE budget SET revenus = ?1 WHERE personne = ?2",
        params![serde_json::to_string(revenus)?, personne.as_str()],
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// The person's current family transfer amount, or zero if they have no
/// budget record yet.
pub fn fetch_virement_famille(
    connection: &Connection,
    personne: Personne,
) -> Result<Decimal, Error> {
    let raw = connection
        .query_row(
            "SELECT virement_famille FROM budget WHERE personne = ?1",
            params![personne.as_str()],
            |row| row.get::<_, String>(0),
        )
        .optional()?;

    match raw {
        Some(raw) => parse_montant(&raw),
        None => Ok(Decimal::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use time::macros::datetime;

    use crate::{
        config::{AccountsConfig, Personne},
        db::initialize,
        entry::{Depense, DepenseType, Revenu},
    };

    use super::{
        fetch_or_create_budget, fetch_virement_famille, update_revenus_budget, upsert_budget,
    };

    fn get_test_connection() -> Connection {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection, &AccountsConfig::default()).unwrap();
        connection
    }

    #[test]
    fn first_fetch_creates_an_empty_budget() {
        let connection = get_test_connection();

        let budget = fetch_or_create_budget(&connection, Personne::Marine).unwrap();

        assert_eq!(budget.personne, Personne::Marine);
        assert!(budget.charges.is_empty());
        assert!(budget.revenus.is_empty());
        assert_eq!(budget.virement_famille, Decimal::ZERO);
    }

    #[test]
    fn second_fetch_returns_the_stored_budget() {
        let connection = get_test_connection();

        let charges = vec![Depense {
            id: Some("c1".to_owned()),
            nom: "Téléphone".to_owned(),
            montant: "19.99".parse().unwrap(),
            kind: DepenseType::Prelevement,
            date: datetime!(2024-02-01 0:00 UTC),
            compte_destination: None,
            pointe: Some(true),
        }];
        upsert_budget(
            &connection,
            Personne::Benoit,
            &charges,
            &[],
            "300".parse().unwrap(),
        )
        .unwrap();

        let budget = fetch_or_create_budget(&connection, Personne::Benoit).unwrap();

        assert_eq!(budget.charges, charges);
        assert_eq!(budget.virement_famille, Decimal::from(300));
    }

    #[test]
    fn upsert_creates_then_replaces() {
        let connection = get_test_connection();

        upsert_budget(&connection, Personne::Marine, &[], &[], "250".parse().unwrap()).unwrap();
        let budget = upsert_budget(
            &connection,
            Personne::Marine,
            &[],
            &[],
            "275.50".parse().unwrap(),
        )
        .unwrap();

        assert_eq!(budget.virement_famille, "275.50".parse::<Decimal>().unwrap());
    }

    #[test]
    fn virement_famille_is_zero_without_a_record() {
        let connection = get_test_connection();

        let montant = fetch_virement_famille(&connection, Personne::Benoit).unwrap();

        assert_eq!(montant, Decimal::ZERO);
    }

    #[test]
    fn update_revenus_requires_an_existing_record() {
        let connection = get_test_connection();

        let revenus = vec![Revenu {
            id: None,
            nom: "Salaire".to_owned(),
            montant: "2000".parse().unwrap(),
            date: datetime!(2024-02-01 0:00 UTC),
            pointe: None,
        }];

        assert!(update_revenus_budget(&connection, Personne::Marine, &revenus).is_err());

        fetch_or_create_budget(&connection, Personne::Marine).unwrap();
        assert!(update_revenus_budget(&connection, Personne::Marine, &revenus).is_ok());
    }
}
