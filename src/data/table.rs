//! The cutoff table: a read-only mapping from (campus, branch) to the
//! qualifying score for that pairing.
//!
//! The table is loaded once at startup, either from the builtin data or
//! from a TOML override file, and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::error::DataError;
use crate::query::Selector;

// ============================================================================
// Campus
// ============================================================================

/// One of the three institute campuses, in canonical display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Campus {
    Pilani,
    Goa,
    Hyderabad,
}

impl Campus {
    /// All campuses in canonical order.
    pub const ALL: [Campus; 3] = [Campus::Pilani, Campus::Goa, Campus::Hyderabad];

    /// Uppercase display name used in reply headers.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Pilani => "PILANI",
            Self::Goa => "GOA",
            Self::Hyderabad => "HYDERABAD",
        }
    }

    /// Emoji marker for the campus section header.
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Pilani => "\u{1f3db}\u{fe0f}",
            Self::Goa => "\u{1f3d6}\u{fe0f}",
            Self::Hyderabad => "\u{1f3d9}\u{fe0f}",
        }
    }

    /// Short tagline shown under the campus header.
    pub fn tagline(&self) -> &'static str {
        match self {
            Self::Pilani => "OG campus vibes",
            Self::Goa => "Beach life + studies",
            Self::Hyderabad => "Tech city energy",
        }
    }

    /// Parse a snake_case config key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pilani" => Some(Self::Pilani),
            "goa" => Some(Self::Goa),
            "hyderabad" => Some(Self::Hyderabad),
            _ => None,
        }
    }
}

// ============================================================================
// Branch
// ============================================================================

/// An academic program offered at one or more campuses, in canonical
/// display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    Cse,
    Ece,
    Eee,
    Mechanical,
    Chemical,
    Civil,
    Manufacturing,
    MathAndComputing,
    Instrumentation,
    Biology,
    Chemistry,
    Physics,
    Economics,
    Mathematics,
    BPharm,
}

/// Program group a branch belongs to, used for section headers when a
/// whole campus is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramGroup {
    Engineering,
    MscScience,
    Pharmacy,
}

impl ProgramGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Engineering => "**Engineering:**",
            Self::MscScience => "**M.Sc Programs:**",
            Self::Pharmacy => "**Pharmacy:**",
        }
    }
}

impl Branch {
    /// All branches in canonical order.
    pub const ALL: [Branch; 15] = [
        Branch::Cse,
        Branch::Ece,
        Branch::Eee,
        Branch::Mechanical,
        Branch::Chemical,
        Branch::Civil,
        Branch::Manufacturing,
        Branch::MathAndComputing,
        Branch::Instrumentation,
        Branch::Biology,
        Branch::Chemistry,
        Branch::Physics,
        Branch::Economics,
        Branch::Mathematics,
        Branch::BPharm,
    ];

    /// Uppercase display name used in reply lines.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Cse => "CSE",
            Self::Ece => "ECE",
            Self::Eee => "EEE",
            Self::Mechanical => "MECHANICAL",
            Self::Chemical => "CHEMICAL",
            Self::Civil => "CIVIL",
            Self::Manufacturing => "MANUFACTURING",
            Self::MathAndComputing => "MATH & COMPUTING",
            Self::Instrumentation => "INSTRUMENTATION",
            Self::Biology => "BIOLOGY",
            Self::Chemistry => "CHEMISTRY",
            Self::Physics => "PHYSICS",
            Self::Economics => "ECONOMICS",
            Self::Mathematics => "MATHEMATICS",
            Self::BPharm => "B.PHARM",
        }
    }

    /// Which section of a per-campus listing this branch renders under.
    pub fn group(&self) -> ProgramGroup {
        match self {
            Self::Cse
            | Self::Ece
            | Self::Eee
            | Self::Mechanical
            | Self::Chemical
            | Self::Civil
            | Self::Manufacturing
            | Self::MathAndComputing
            | Self::Instrumentation => ProgramGroup::Engineering,
            Self::Biology
            | Self::Chemistry
            | Self::Physics
            | Self::Economics
            | Self::Mathematics => ProgramGroup::MscScience,
            Self::BPharm => ProgramGroup::Pharmacy,
        }
    }

    /// Parse a snake_case config key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "cse" => Some(Self::Cse),
            "ece" => Some(Self::Ece),
            "eee" => Some(Self::Eee),
            "mechanical" => Some(Self::Mechanical),
            "chemical" => Some(Self::Chemical),
            "civil" => Some(Self::Civil),
            "manufacturing" => Some(Self::Manufacturing),
            "math_and_computing" => Some(Self::MathAndComputing),
            "instrumentation" => Some(Self::Instrumentation),
            "biology" => Some(Self::Biology),
            "chemistry" => Some(Self::Chemistry),
            "physics" => Some(Self::Physics),
            "economics" => Some(Self::Economics),
            "mathematics" => Some(Self::Mathematics),
            "b_pharm" => Some(Self::BPharm),
            _ => None,
        }
    }
}

// ============================================================================
// Cutoff Entry
// ============================================================================

/// A single row of the cutoff table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffEntry {
    pub campus: Campus,
    pub branch: Branch,
    /// Minimum qualifying score for this pairing.
    pub score: u16,
    /// Maximum attainable score the cutoff is quoted against.
    pub max_score: u16,
}

// ============================================================================
// Cutoff Table
// ============================================================================

/// The full cutoff table, stored in campus-major canonical order.
#[derive(Debug, Clone)]
pub struct CutoffTable {
    entries: Vec<CutoffEntry>,
}

/// On-disk shape of a table override file: one `[campus]` table per campus
/// with `branch_key = score` pairs, plus an optional top-level `max_score`.
#[derive(Debug, Deserialize)]
struct TableFile {
    #[serde(default = "default_max_score")]
    max_score: u16,
    #[serde(flatten)]
    campuses: std::collections::BTreeMap<String, std::collections::BTreeMap<String, u16>>,
}

fn default_max_score() -> u16 {
    MAX_SCORE
}

/// Maximum attainable exam score the builtin cutoffs are quoted against.
pub const MAX_SCORE: u16 = 390;

/// Builtin cutoff data: (campus, branch, score). Branches absent at a
/// campus are simply not listed, which is what makes a campus/branch
/// pairing a normal no-data case rather than an error.
const BUILTIN: &[(Campus, Branch, u16)] = &[
    (Campus::Pilani, Branch::Cse, 327),
    (Campus::Pilani, Branch::Ece, 314),
    (Campus::Pilani, Branch::Eee, 292),
    (Campus::Pilani, Branch::Mechanical, 266),
    (Campus::Pilani, Branch::Chemical, 247),
    (Campus::Pilani, Branch::Civil, 238),
    (Campus::Pilani, Branch::Manufacturing, 243),
    (Campus::Pilani, Branch::MathAndComputing, 318),
    (Campus::Pilani, Branch::Instrumentation, 282),
    (Campus::Pilani, Branch::Biology, 236),
    (Campus::Pilani, Branch::Chemistry, 241),
    (Campus::Pilani, Branch::Physics, 254),
    (Campus::Pilani, Branch::Economics, 271),
    (Campus::Pilani, Branch::BPharm, 165),
    (Campus::Goa, Branch::Cse, 301),
    (Campus::Goa, Branch::Ece, 287),
    (Campus::Goa, Branch::Eee, 278),
    (Campus::Goa, Branch::Mechanical, 254),
    (Campus::Goa, Branch::Chemical, 239),
    (Campus::Goa, Branch::MathAndComputing, 295),
    (Campus::Goa, Branch::Instrumentation, 270),
    (Campus::Goa, Branch::Biology, 234),
    (Campus::Goa, Branch::Chemistry, 236),
    (Campus::Goa, Branch::Physics, 243),
    (Campus::Goa, Branch::Economics, 263),
    (Campus::Hyderabad, Branch::Cse, 298),
    (Campus::Hyderabad, Branch::Ece, 284),
    (Campus::Hyderabad, Branch::Eee, 275),
    (Campus::Hyderabad, Branch::Mechanical, 251),
    (Campus::Hyderabad, Branch::Chemical, 238),
    (Campus::Hyderabad, Branch::Civil, 235),
    (Campus::Hyderabad, Branch::MathAndComputing, 293),
    (Campus::Hyderabad, Branch::Instrumentation, 270),
    (Campus::Hyderabad, Branch::Biology, 234),
    (Campus::Hyderabad, Branch::Chemistry, 235),
    (Campus::Hyderabad, Branch::Physics, 245),
    (Campus::Hyderabad, Branch::Economics, 261),
    (Campus::Hyderabad, Branch::BPharm, 161),
];

impl CutoffTable {
    /// Build the table from the builtin data.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|&(campus, branch, score)| CutoffEntry {
                campus,
                branch,
                score,
                max_score: MAX_SCORE,
            })
            .collect();
        Self { entries }
    }

    /// Parse a table from a TOML override string.
    pub fn from_toml_str(content: &str) -> Result<Self, DataError> {
        let file: TableFile = toml::from_str(content)?;
        let mut entries = Vec::new();
        for (campus_key, branches) in &file.campuses {
            let campus = Campus::from_key(campus_key)
                .ok_or_else(|| DataError::UnknownCampus(campus_key.clone()))?;
            for (branch_key, &score) in branches {
                let branch = Branch::from_key(branch_key)
                    .ok_or_else(|| DataError::UnknownBranch(branch_key.clone()))?;
                entries.push(CutoffEntry {
                    campus,
                    branch,
                    score,
                    max_score: file.max_score,
                });
            }
        }
        if entries.is_empty() {
            return Err(DataError::EmptyTable);
        }
        Self::from_entries(entries)
    }

    /// Load a table from a TOML override file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DataError::ReadFile)?;
        Self::from_toml_str(&content)
    }

    /// Build a table from explicit entries, enforcing per-pairing uniqueness
    /// and sorting into canonical campus-major order.
    pub fn from_entries(mut entries: Vec<CutoffEntry>) -> Result<Self, DataError> {
        entries.sort_by_key(|e| (canonical_campus_index(e.campus), canonical_branch_index(e.branch)));
        for pair in entries.windows(2) {
            if pair[0].campus == pair[1].campus && pair[0].branch == pair[1].branch {
                return Err(DataError::DuplicateEntry {
                    campus: pair[0].campus.display_name().to_string(),
                    branch: pair[0].branch.display_name().to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// All entries in canonical order.
    pub fn entries(&self) -> &[CutoffEntry] {
        &self.entries
    }

    /// Look up entries matching the given campus/branch selectors.
    ///
    /// An unconstrained selector (`All` or `Unspecified`) matches every
    /// value on that axis. The result is in campus-major canonical order.
    /// An empty result for a fully-constrained query is a normal outcome,
    /// not an error: it means the branch is not offered at that campus.
    pub fn lookup(
        &self,
        campus: Selector<Campus>,
        branch: Selector<Branch>,
    ) -> Vec<&CutoffEntry> {
        self.entries
            .iter()
            .filter(|e| campus.admits(&e.campus) && branch.admits(&e.branch))
            .collect()
    }
}

fn canonical_campus_index(campus: Campus) -> usize {
    Campus::ALL.iter().position(|&c| c == campus).unwrap_or(0)
}

fn canonical_branch_index(branch: Branch) -> usize {
    Branch::ALL.iter().position(|&b| b == branch).unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
