//! The closed set of accounts and persons, and the mapping from logical
//! account names to store keys.
//!
//! The store keys used to be literals scattered across every route handler.
//! They now live in a single [AccountsConfig] that is injected into both the
//! endpoints and the transfer synchronizer through the app state.

use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

/// The sentinel value clients send when a recurring transfer has no destination.
pub const DESTINATION_AUCUN: &str = "aucun";

/// One of the three joint bank accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompteJoint {
    /// The HelloBank checking account.
    HelloBank,
    /// The Sumeria account.
    Sumeria,
    /// The BRED family account, which also carries the family transfers.
    Bred,
}

impl CompteJoint {
    /// Every joint account, in seeding order.
    pub const ALL: [CompteJoint; 3] = [
        CompteJoint::HelloBank,
        CompteJoint::Sumeria,
        CompteJoint::Bred,
    ];

    /// The lowercase name used in URLs and destination references.
    pub fn as_str(&self) -> &'static str {
        match self {
            CompteJoint::HelloBank => "hellobank",
            CompteJoint::Sumeria => "sumeria",
            CompteJoint::Bred => "bred",
        }
    }
}

impl Display for CompteJoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CompteJoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hellobank" => Ok(CompteJoint::HelloBank),
            "sumeria" => Ok(CompteJoint::Sumeria),
            "bred" => Ok(CompteJoint::Bred),
            other => Err(Error::UnknownCompte(other.to_owned())),
        }
    }
}

/// One of the two persons with a personal budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personne {
    /// Benoit's budget.
    Benoit,
    /// Marine's budget.
    Marine,
}

impl Personne {
    /// Both persons.
    pub const ALL: [Personne; 2] = [Personne::Benoit, Personne::Marine];

    /// The lowercase identifier used in URLs, destination references and the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Personne::Benoit => "benoit",
            Personne::Marine => "marine",
        }
    }

    /// The capitalized name used in the family transfer income names.
    pub fn display_name(&self) -> &'static str {
        match self {
            Personne::Benoit => "Benoit",
            Personne::Marine => "Marine",
        }
    }
}

impl Display for Personne {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Personne {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "benoit" => Ok(Personne::Benoit),
            "marine" => Ok(Personne::Marine),
            other => Err(Error::UnknownPersonne(other.to_owned())),
        }
    }
}

/// A typed destination for a recurring transfer.
///
/// `compteDestination` arrives as a free string. It is resolved once at the
/// boundary into this variant so the synchronizer never branches on raw
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationRef {
    /// The transfer lands on a joint account.
    Joint(CompteJoint),
    /// The transfer lands on a personal budget.
    Budget(Personne),
    /// No destination: missing, the "aucun" sentinel, or an unknown value.
    None,
}

impl DestinationRef {
    /// Resolve a raw destination reference against the closed set of targets.
    ///
    /// Unknown values resolve to [DestinationRef::None] rather than an error:
    /// the synchronizer treats them as "nothing to mirror".
    pub fn resolve(raw: Option<&str>) -> DestinationRef {
        let Some(raw) = raw else {
            return DestinationRef::None;
        };

        if raw == DESTINATION_AUCUN {
            return DestinationRef::None;
        }

        if let Ok(compte) = raw.parse::<CompteJoint>() {
            return DestinationRef::Joint(compte);
        }

        if let Ok(personne) = raw.parse::<Personne>() {
            return DestinationRef::Budget(personne);
        }

        DestinationRef::None
    }
}

/// The mapping from joint accounts to their fixed store keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountsConfig {
    hellobank_key: String,
    sumeria_key: String,
    bred_key: String,
}

impl AccountsConfig {
    /// Create a config with explicit store keys for the three joint accounts.
    pub fn new(hellobank_key: &str, sumeria_key: &str, bred_key: &str) -> Self {
        Self {
            hellobank_key: hellobank_key.to_owned(),
            sumeria_key: sumeria_key.to_owned(),
            bred_key: bred_key.to_owned(),
        }
    }

    /// The store key for a joint account record.
    pub fn key_for(&self, compte: CompteJoint) -> &str {
        match compte {
            CompteJoint::HelloBank => &self.hellobank_key,
            CompteJoint::Sumeria => &self.sumeria_key,
            CompteJoint::Bred => &self.bred_key,
        }
    }

    /// The joint account that receives the monthly family transfers.
    pub fn compte_famille(&self) -> CompteJoint {
        CompteJoint::Bred
    }
}

impl Default for AccountsConfig {
    /// The fixed keys the account records were seeded with at deployment time.
    fn default() -> Self {
        Self::new(
            "00000000-0000-0000-0000-000000000001",
            "00000000-0000-0000-0000-000000000002",
            "00000000-0000-0000-0000-000000000003",
        )
    }
}
