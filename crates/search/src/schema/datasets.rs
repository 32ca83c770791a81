//! The searchable datasets and their column registries.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::registry::{ColumnDef, ColumnRegistry};

/// A grid-backed dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    /// ACRIS master documents joined with their lot legals.
    AcrisDocuments,
    /// ACRIS parties.
    AcrisParties,
    /// PLUTO land use and zoning.
    Pluto,
    /// Property tax valuations.
    Valuations,
    /// Owner contacts.
    Contacts,
}

impl Dataset {
    /// All datasets.
    pub const ALL: [Dataset; 5] = [
        Dataset::AcrisDocuments,
        Dataset::AcrisParties,
        Dataset::Pluto,
        Dataset::Valuations,
        Dataset::Contacts,
    ];

    /// Returns the URL slug of the dataset.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dataset::AcrisDocuments => "acris-documents",
            Dataset::AcrisParties => "acris-parties",
            Dataset::Pluto => "pluto",
            Dataset::Valuations => "valuations",
            Dataset::Contacts => "contacts",
        }
    }

    /// Returns true if queries must be scoped to a single borough/block/lot.
    pub fn is_property_scoped(&self) -> bool {
        matches!(
            self,
            Dataset::AcrisDocuments | Dataset::Valuations | Dataset::Contacts
        )
    }

    /// Returns the column registry for the dataset.
    pub fn registry(&self) -> &'static ColumnRegistry {
        match self {
            Dataset::AcrisDocuments => &ACRIS_DOCUMENTS,
            Dataset::AcrisParties => &ACRIS_PARTIES,
            Dataset::Pluto => &PLUTO,
            Dataset::Valuations => &VALUATIONS,
            Dataset::Contacts => &CONTACTS,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dataset::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown dataset: {}", s))
    }
}

fn with_lot_columns(registry: ColumnRegistry) -> ColumnRegistry {
    registry
        .with_column("borough", ColumnDef::keyword("borough"))
        .with_column("block", ColumnDef::integer_id("block"))
        .with_column("lot", ColumnDef::integer_id("lot"))
}

static ACRIS_DOCUMENTS: LazyLock<ColumnRegistry> = LazyLock::new(|| {
    with_lot_columns(ColumnRegistry::new())
        .with_column("document_id", ColumnDef::keyword("document_id"))
        .with_column("record_type", ColumnDef::keyword("record_type"))
        .with_column("crfn", ColumnDef::keyword("crfn"))
        .with_column("doc_type", ColumnDef::keyword("doc_type"))
        .with_column("doc_type_description", ColumnDef::text("doc_type_description"))
        .with_column("class_code_description", ColumnDef::text("class_code_description"))
        .with_column("document_date", ColumnDef::date("document_date"))
        .with_column("recorded_datetime", ColumnDef::date("recorded_datetime"))
        .with_column("document_amt", ColumnDef::number("document_amt"))
        .with_column("percent_trans", ColumnDef::number("percent_trans"))
        .with_column("street_number", ColumnDef::keyword("street_number"))
        .with_column("street_name", ColumnDef::text("street_name"))
        .with_column("unit", ColumnDef::keyword("unit"))
});

static ACRIS_PARTIES: LazyLock<ColumnRegistry> = LazyLock::new(|| {
    ColumnRegistry::new()
        .with_column("document_id", ColumnDef::keyword("document_id"))
        .with_column("party_type", ColumnDef::keyword("party_type"))
        .with_column("name", ColumnDef::text("name"))
        .with_column("address_1", ColumnDef::text("address_1"))
        .with_column("address_2", ColumnDef::text("address_2"))
        .with_column("city", ColumnDef::text("city"))
        .with_column("state", ColumnDef::keyword("state"))
        .with_column("zip", ColumnDef::keyword("zip"))
        .with_column("country", ColumnDef::keyword("country"))
});

static PLUTO: LazyLock<ColumnRegistry> = LazyLock::new(|| {
    with_lot_columns(ColumnRegistry::new())
        .with_column("bbl", ColumnDef::keyword("bbl"))
        .with_column("address", ColumnDef::text("address"))
        .with_column("ownername", ColumnDef::text("ownername"))
        .with_column("zipcode", ColumnDef::keyword("zipcode"))
        .with_column("landuse", ColumnDef::keyword("landuse"))
        .with_column("bldgclass", ColumnDef::keyword("bldgclass"))
        .with_column("zonedist1", ColumnDef::keyword("zonedist1"))
        .with_column("numfloors", ColumnDef::number("numfloors"))
        .with_column("unitsres", ColumnDef::number("unitsres"))
        .with_column("unitstotal", ColumnDef::number("unitstotal"))
        .with_column("lotarea", ColumnDef::number("lotarea"))
        .with_column("bldgarea", ColumnDef::number("bldgarea"))
        .with_column("yearbuilt", ColumnDef::number("yearbuilt"))
        .with_column("assesstot", ColumnDef::number("assesstot"))
});

static VALUATIONS: LazyLock<ColumnRegistry> = LazyLock::new(|| {
    with_lot_columns(ColumnRegistry::new())
        .with_column("year", ColumnDef::keyword("year"))
        .with_column("owner", ColumnDef::text("owner"))
        .with_column("bldg_class", ColumnDef::keyword("bldg_class"))
        .with_column("tax_class", ColumnDef::keyword("tax_class"))
        .with_column("curmkttot", ColumnDef::number("curmkttot"))
        .with_column("curacttot", ColumnDef::number("curacttot"))
        .with_column("curtxbtot", ColumnDef::number("curtxbtot"))
});

static CONTACTS: LazyLock<ColumnRegistry> = LazyLock::new(|| {
    with_lot_columns(ColumnRegistry::new())
        .with_column("owner_name", ColumnDef::text("owner_name"))
        .with_column("contact_name", ColumnDef::text("contact_name"))
        .with_column("phone", ColumnDef::keyword("phone"))
        .with_column("email", ColumnDef::keyword("email"))
        .with_column("mailing_address", ColumnDef::text("mailing_address"))
        .with_column("source", ColumnDef::keyword("source"))
        .with_column("updated_at", ColumnDef::date("updated_at"))
});
