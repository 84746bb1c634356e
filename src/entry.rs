//! The expense and income entries stored on account and budget records.
//!
//! Field names follow the stored JSON records (`nom`, `montant`, `type`,
//! `compteDestination`), so these types deserialize the payloads clients
//! already send.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// The kind of a recorded expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepenseType {
    /// A direct debit.
    Prelevement,
    /// A recurring card payment.
    PaiementRecurrent,
    /// A standing order towards another account or budget.
    ///
    /// Only this kind participates in transfer synchronization.
    VirementRecurrent,
}

/// An expense on a joint account, or a charge on a personal budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depense {
    /// A stable identifier, assigned server-side when the entry is first persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The label of the expense.
    pub nom: String,
    /// The amount in euros.
    pub montant: Decimal,
    /// The kind of expense.
    #[serde(rename = "type")]
    pub kind: DepenseType,
    /// When the entry was created.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Where a recurring transfer lands, as a raw reference.
    ///
    /// Resolved against the closed set of accounts and persons by
    /// [crate::DestinationRef::resolve]; `"aucun"` means no destination.
    #[serde(
        rename = "compteDestination",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub compte_destination: Option<String>,
    /// Whether the entry has been checked against a bank statement.
    ///
    /// Only used on personal budgets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointe: Option<bool>,
}

/// An income on a joint account or personal budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Revenu {
    /// A stable identifier, assigned server-side when the entry is first persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// The label of the income.
    pub nom: String,
    /// The amount in euros.
    pub montant: Decimal,
    /// When the entry was created.
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    /// Whether the entry has been checked against a bank statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointe: Option<bool>,
}

/// Assign a fresh id to every expense that does not have one yet.
///
/// Clients may still address entries positionally in their own state, but
/// stored entries always carry a stable id so edits cannot silently target
/// the wrong entry after a reorder.
pub fn assigner_ids_depenses(depenses: &mut [Depense]) {
    for depense in depenses {
        if depense.id.is_none() {
            depense.id = Some(Uuid::new_v4().to_string());
        }
    }
}

/// Assign a fresh id to every income that does not have one yet.
pub fn assigner_ids_revenus(revenus: &mut [Revenu]) {
    for revenu in revenus {
        if revenu.id.is_none() {
            revenu.id = Some(Uuid::new_v4().to_string());
        }
    }
}
