//! Keeps recurring transfers and their mirrored incomes consistent across
//! records.
//!
//! When an expense of kind `virement_recurrent` points at another account or
//! at a personal budget, an income named after the source account and the
//! expense is upserted on the destination record. The income name is the
//! idempotency key: synchronizing the same expense twice updates the same
//! entry instead of appending a duplicate.
//!
//! Synchronization is best-effort by design. The source record is the system
//! of record; a failure while fetching or persisting the destination is
//! logged and never propagated, so the source-side write goes through even
//! when the mirror lags behind. There is no transaction spanning the two
//! records and no retry.

use rusqlite::Connection;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    Error,
    budget::{fetch_budget, fetch_virement_famille, update_revenus_budget},
    compte::{Compte, fetch_compte, update_revenus_compte},
    config::{AccountsConfig, CompteJoint, DestinationRef, Personne},
    entry::{Depense, DepenseType, Revenu},
};

/// The name of the mirrored income for a recurring transfer.
///
/// This name is the idempotency key on the destination record, so it must be
/// deterministic for a given source account and expense name.
pub fn nom_miroir(source: CompteJoint, depense: &Depense) -> String {
    format!(
        "Virement de {}: {}",
        source.as_str().to_uppercase(),
        depense.nom
    )
}

/// The name of the mirrored family transfer income for a person.
pub fn nom_virement_famille(personne: Personne) -> String {
    format!("Virement Famille {}", personne.display_name())
}

/// Mirror a recurring transfer expense as an income on its destination.
///
/// Does nothing unless the expense is a recurring transfer whose destination
/// resolves to a joint account or a person. Store failures on the destination
/// are logged and swallowed so the caller's own write is never blocked.
pub fn sync_virement_recurrent(
    connection: &Connection,
    accounts: &AccountsConfig,
    depense: &Depense,
    source: CompteJoint,
) {
    if let Err(error) = try_sync(connection, accounts, depense, source) {
        tracing::error!(
            "could not synchronize transfer \"{}\" from {source}: {error}",
            depense.nom
        );
    }
}

/// Remove the mirrored income for a recurring transfer from its destination.
///
/// Invoked when a transfer disappears from a source account's expense list,
/// so the previously created mirror does not survive as an orphan. Same
/// preconditions and best-effort policy as [sync_virement_recurrent].
pub fn cleanup_virement_recurrent(
    connection: &Connection,
    accounts: &AccountsConfig,
    depense: &Depense,
    source: CompteJoint,
) {
    if let Err(error) = try_cleanup(connection, accounts, depense, source) {
        tracing::error!(
            "could not clean up transfer \"{}\" from {source}: {error}",
            depense.nom
        );
    }
}

/// Synchronize a source account's transfers after a full expense-list update.
///
/// Transfers present in `avant` but absent from `apres` (same name, kind and
/// destination) have their mirrors removed first; then every expense in
/// `apres` is synchronized. Non-transfer expenses are ignored on both sides.
pub fn sync_depenses(
    connection: &Connection,
    accounts: &AccountsConfig,
    source: CompteJoint,
    avant: &[Depense],
    apres: &[Depense],
) {
    for ancienne in avant {
        if ancienne.kind != DepenseType::VirementRecurrent {
            continue;
        }

        let toujours_presente = apres.iter().any(|depense| {
            depense.kind == DepenseType::VirementRecurrent
                && depense.nom == ancienne.nom
                && depense.compte_destination == ancienne.compte_destination
        });

        if !toujours_presente {
            cleanup_virement_recurrent(connection, accounts, ancienne, source);
        }
    }

    for depense in apres {
        sync_virement_recurrent(connection, accounts, depense, source);
    }
}

fn try_sync(
    connection: &Connection,
    accounts: &AccountsConfig,
    depense: &Depense,
    source: CompteJoint,
) -> Result<(), Error> {
    if depense.kind != DepenseType::VirementRecurrent {
        return Ok(());
    }

    let nom = nom_miroir(source, depense);

    match DestinationRef::resolve(depense.compte_destination.as_deref()) {
        DestinationRef::None => Ok(()),
        DestinationRef::Joint(compte) => {
            let key = accounts.key_for(compte);
            let mut revenus = fetch_compte(connection, key)?.revenus;
            upsert_revenu(&mut revenus, &nom, depense.montant, depense.date);
            update_revenus_compte(connection, key, &revenus)
        }
        DestinationRef::Budget(personne) => {
            let mut revenus = fetch_budget(connection, personne)?.revenus;
            upsert_revenu(&mut revenus, &nom, depense.montant, depense.date);
            update_revenus_budget(connection, personne, &revenus)
        }
    }
}

fn try_cleanup(
    connection: &Connection,
    accounts: &AccountsConfig,
    depense: &Depense,
    source: CompteJoint,
) -> Result<(), Error> {
    if depense.kind != DepenseType::VirementRecurrent {
        return Ok(());
    }

    let nom = nom_miroir(source, depense);

    match DestinationRef::resolve(depense.compte_destination.as_deref()) {
        DestinationRef::None => Ok(()),
        DestinationRef::Joint(compte) => {
            let key = accounts.key_for(compte);
            let mut revenus = fetch_compte(connection, key)?.revenus;
            revenus.retain(|revenu| revenu.nom != nom);
            update_revenus_compte(connection, key, &revenus)
        }
        DestinationRef::Budget(personne) => {
            let mut revenus = fetch_budget(connection, personne)?.revenus;
            revenus.retain(|revenu| revenu.nom != nom);
            update_revenus_budget(connection, personne, &revenus)
        }
    }
}

/// Update the first income named `nom` in place, or append a new one.
///
/// Only the amount and date are replaced on an existing entry: its position,
/// id and pointed flag are preserved.
fn upsert_revenu(revenus: &mut Vec<Revenu>, nom: &str, montant: Decimal, date: OffsetDateTime) {
    match revenus.iter_mut().find(|revenu| revenu.nom == nom) {
        Some(existing) => {
            existing.montant = montant;
            existing.date = date;
        }
        None => revenus.push(Revenu {
            id: Some(Uuid::new_v4().to_string()),
            nom: nom.to_owned(),
            montant,
            date,
            pointe: None,
        }),
    }
}

/// Re-derive the family transfer incomes on the family account and return the
/// up-to-date record.
///
/// For each person with a positive `virementFamille`, the income named
/// `"Virement Famille <Name>"` is updated to that amount, or appended with
/// the current time if missing. The record is written back only when the
/// derived income list differs from the stored one.
///
/// Unlike the per-expense synchronization, this runs on the family account's
/// own fetch path, so errors propagate to the caller.
pub fn sync_virements_famille(
    connection: &Connection,
    accounts: &AccountsConfig,
) -> Result<Compte, Error> {
    let key = accounts.key_for(accounts.compte_famille());
    let compte = fetch_compte(connection, key)?;

    let mut revenus = compte.revenus.clone();
    for personne in Personne::ALL {
        let montant = fetch_virement_famille(connection, personne)?;
        if montant <= Decimal::ZERO {
            continue;
        }

        let nom = nom_virement_famille(personne);
        match revenus.iter_mut().find(|revenu| revenu.nom == nom) {
            // The existing entry keeps its original date: only the amount follows the budget.
            Some(existing) => existing.montant = montant,
            None => revenus.push(Revenu {
                id: Some(Uuid::new_v4().to_string()),
                nom,
                montant,
                date: OffsetDateTime::now_utc(),
                pointe: None,
            }),
        }
    }

    if revenus == compte.revenus {
        return Ok(compte);
    }

    update_revenus_compte(connection, key, &revenus)?;
    fetch_compte(connection, key)
}
