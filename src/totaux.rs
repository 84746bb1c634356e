//! Totals, balances and the pointed/unpointed partition for a fetched record.
//!
//! Everything here sums [Decimal](rust_decimal::Decimal) amounts straight
//! from the stored entries. Rounding to two decimals is display-only and
//! never happens on this side, so repeated updates cannot compound rounding
//! error.

use rust_decimal::Decimal;

use crate::entry::{Depense, Revenu};

/// The sum of all expense amounts.
pub fn total_depenses(depenses: &[Depense]) -> Decimal {
    depenses.iter().map(|depense| depense.montant).sum()
}

/// The sum of all income amounts.
pub fn total_revenus(revenus: &[Revenu]) -> Decimal {
    revenus.iter().map(|revenu| revenu.montant).sum()
}

/// The balance of a joint account: incomes minus expenses.
pub fn solde_compte(revenus: &[Revenu], depenses: &[Depense]) -> Decimal {
    total_revenus(revenus) - total_depenses(depenses)
}

/// The balance of a personal budget: incomes minus charges minus the monthly
/// family transfer.
pub fn solde_budget(
    revenus: &[Revenu],
    charges: &[Depense],
    virement_famille: Decimal,
) -> Decimal {
    total_revenus(revenus) - total_depenses(charges) - virement_famille
}

/// Amounts split by whether the entries were checked against a bank statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointage {
    /// The sum of checked entries.
    pub pointe: Decimal,
    /// The sum of unchecked entries.
    pub non_pointe: Decimal,
}

/// Split the expense amounts into checked and unchecked sums.
pub fn pointage_depenses(depenses: &[Depense]) -> Pointage {
    partition(depenses.iter().map(|d| (d.montant, d.pointe)))
}

/// Split the income amounts into checked and unchecked sums.
pub fn pointage_revenus(revenus: &[Revenu]) -> Pointage {
    partition(revenus.iter().map(|r| (r.montant, r.pointe)))
}

fn partition(montants: impl Iterator<Item = (Decimal, Option<bool>)>) -> Pointage {
    let mut pointage = Pointage {
        pointe: Decimal::ZERO,
        non_pointe: Decimal::ZERO,
    };

    for (montant, pointe) in montants {
        if pointe == Some(true) {
            pointage.pointe += montant;
        } else {
            pointage.non_pointe += montant;
        }
    }

    pointage
}
