use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    entry::{Depense, Revenu},
};

/// A joint bank account record: pooled expenses and incomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compte {
    /// The fixed store key of the record.
    pub id: String,
    /// The logical account name, e.g. "bred".
    pub nom: String,
    /// The expenses on the account.
    pub depenses: Vec<Depense>,
    /// The incomes on the account, including synchronized transfer mirrors.
    pub revenus: Vec<Revenu>,
}

/// Fetch a joint account record by its store key.
///
/// # Errors
/// Returns [Error::NotFound] if no record has that key, or an error if the
/// stored lists cannot be parsed.
pub fn fetch_compte(connection: &Connection, key: &str) -> Result<Compte, Error> {
    let (id, nom, depenses_json, revenus_json) = connection.query_row(
        "SELECT id, nom, depenses, revenus FROM compte WHERE id = ?1",
        params![key],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        },
    )?;

    Ok(Compte {
        id,
        nom,
        depenses: serde_json::from_str(&depenses_json)?,
        revenus: serde_json::from_str(&revenus_json)?,
    })
}

/// Replace both lists of a joint account record and return the updated record.
///
/// # Errors
/// Returns [Error::NotFound] if no record has that key.
pub fn update_compte(
    connection: &Connection,
    key: &str,
    depenses: &[Depense],
    revenus: &[Revenu],
) -> Result<Compte, Error> {
    let rows_updated = connection.execute(
        "UPDATE compte SET depenses = ?1, revenus = ?2 WHERE id = ?3",
        params![
            serde_json::to_string(depenses)?,
            serde_json::to_string(revenus)?,
            key
        ],
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    fetch_compte(connection, key)
}

/// Replace only the income list of a joint account record.
///
/// This is the write the transfer synchronizer performs on a destination
/// account; the expense list is left untouched.
///
/// # Errors
/// Returns [Error::NotFound] if no record has that key.
pub fn update_revenus_compte(
    connection: &Connection,
    key: &str,
    revenus: &[Revenu],
) -> Result<(), Error> {
    let rows_updated = connection.execute(
        "UPDATE compte SET revenus = ?1 WHERE id = ?2",
        params![serde_json::to_string(revenus)?, key],
    )?;

    if rows_updated == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        config::{AccountsConfig, CompteJoint},
        db::initialize,
        entry::{Depense, DepenseType, Revenu},
    };

    use super::{fetch_compte, update_compte, update_revenus_compte};

    fn get_test_connection() -> (Connection, AccountsConfig) {
        let connection = Connection::open_in_memory().unwrap();
        let accounts = AccountsConfig::default();
        initialize(&connection, &accounts).unwrap();
        (connection, accounts)
    }

    #[test]
    fn fetch_returns_the_seeded_record() {
        let (connection, accounts) = get_test_connection();

        let compte =
            fetch_compte(&connection, accounts.key_for(CompteJoint::HelloBank)).unwrap();

        assert_eq!(compte.nom, "hellobank");
        assert!(compte.depenses.is_empty());
        assert!(compte.revenus.is_empty());
    }

    #[test]
    fn fetch_unknown_key_is_not_found() {
        let (connection, _) = get_test_connection();

        let result = fetch_compte(&connection, "no-such-key");

        assert_eq!(result, Err(Error::NotFound));
    }

    #[test]
    fn update_replaces_both_lists() {
        let (connection, accounts) = get_test_connection();
        let key = accounts.key_for(CompteJoint::Sumeria);

        let depenses = vec![Depense {
            id: Some("d1".to_owned()),
            nom: "Courses".to_owned(),
            montant: "82.40".parse().unwrap(),
            kind: DepenseType::Prelevement,
            date: datetime!(2024-03-01 0:00 UTC),
            compte_destination: None,
            pointe: None,
        }];
        let revenus = vec![Revenu {
            id: Some("r1".to_owned()),
            nom: "Salaire".to_owned(),
            montant: "2000".parse().unwrap(),
            date: datetime!(2024-03-01 0:00 UTC),
            pointe: None,
        }];

        let updated = update_compte(&connection, key, &depenses, &revenus).unwrap();

        assert_eq!(updated.depenses, depenses);
        assert_eq!(updated.revenus, revenus);
    }

    #[test]
    fn update_revenus_leaves_depenses_untouched() {
        let (connection, accounts) = get_test_connection();
        let key = accounts.key_for(CompteJoint::Bred);

        let depenses = vec![Depense {
            id: Some("d1".to_owned()),
            nom: "Assurance".to_owned(),
            montant: "45".parse().unwrap(),
            kind: DepenseType::PaiementRecurrent,
            date: datetime!(2024-03-01 0:00 UTC),
            compte_destination: None,
            pointe: None,
        }];
        update_compte(&connection, key, &depenses, &[]).unwrap();

        let revenus = vec![Revenu {
            id: Some("r1".to_owned()),
            nom: "Virement".to_owned(),
            montant: "300".parse().unwrap(),
            date: datetime!(2024-03-02 0:00 UTC),
            pointe: None,
        }];
        update_revenus_compte(&connection, key, &revenus).unwrap();

        let compte = fetch_compte(&connection, key).unwrap();
        assert_eq!(compte.depenses, depenses);
        assert_eq!(compte.revenus, revenus);
    }

    #[test]
    fn update_unknown_key_is_not_found() {
        let (connection, _) = get_test_connection();

        let result = update_revenus_compte(&connection, "no-such-key", &[]);

        assert_eq!(result, Err(Error::NotFound));
    }
}
