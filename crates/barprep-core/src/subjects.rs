//! Catalog of tested subjects.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subject {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const SUBJECTS: [Subject; 12] = [
    Subject {
        id: "civ-pro",
        name: "Civil Procedure",
        description: "Jurisdiction, Venue, Preclusion",
    },
    Subject {
        id: "con-law",
        name: "Constitutional Law",
        description: "Powers, Rights, First Amendment",
    },
    Subject {
        id: "contracts",
        name: "Contracts",
        description: "Formation, Performance, Breach",
    },
    Subject {
        id: "crim-law",
        name: "Criminal Law & Procedure",
        description: "Crimes, 4th/5th/6th Amendment",
    },
    Subject {
        id: "evidence",
        name: "Evidence",
        description: "Relevance, Hearsay, Impeachment",
    },
    Subject {
        id: "property",
        name: "Real Property",
        description: "Ownership, Rights, Landlord-Tenant",
    },
    Subject {
        id: "torts",
        name: "Torts",
        description: "Negligence, Intentional Torts, Strict Liability",
    },
    Subject {
        id: "wills",
        name: "Trusts & Wills",
        description: "Intestacy, Formation, Administration",
    },
    Subject {
        id: "comm-prop",
        name: "Community Property",
        description: "Classification, Management, Division",
    },
    Subject {
        id: "biz-org",
        name: "Corporations & Agency",
        description: "Formation, Fiduciary Duties",
    },
    Subject {
        id: "pro-resp",
        name: "Professional Responsibility",
        description: "Duties to Client, Court, Public",
    },
    Subject {
        id: "remedies",
        name: "Remedies",
        description: "Damages, Injunctions, Restitution",
    },
];

/// Look up a subject by its id.
pub fn find(id: &str) -> Option<&'static Subject> {
    SUBJECTS.iter().find(|s| s.id == id)
}
