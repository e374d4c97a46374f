//! Response renderer.
//!
//! Turns a parsed query plus the matching table rows into reply text:
//! a personalized opener, campus sections, one `branch: score/max` line
//! per entry, and a closing flourish. Output structure is stable across
//! filter combinations so replies stay parseable; the flourish pick is a
//! stable hash, so rendering is a pure function of its inputs.

use crate::data::{Branch, Campus, CutoffEntry, ProgramGroup};
use crate::query::ParsedQuery;

/// Default footer link appended to every reply.
pub const DEFAULT_FOOTER_URL: &str =
    "https://www.bitsadmission.com/FD/BITSAT_cutoffs.html?06012025";

/// Renders replies from lookup results.
#[derive(Debug, Clone)]
pub struct ReplyRenderer {
    footer_url: String,
    /// Mixed into the flourish hash so operators can rotate the voice
    /// without changing any lookup logic.
    flourish_seed: u64,
}

const OPENERS_BOTH: &[&str] = &[
    "Arre {author}, {branch} at {campus}? Time for some brutal honesty",
    "Yo {author}! {branch} {campus} cutoff? Prepare for emotional damage",
    "Dekh {author}, {campus} {branch} ka scene - reality check incoming",
    "Bhai {author}, {branch} for {campus}? Here's your dose of harsh truth",
];

const OPENERS_BRANCH: &[&str] = &[
    "Arre {author}, {branch} cutoffs? Time to crush some dreams across campuses",
    "Yo {author}! {branch} ka complete breakdown across all campuses",
    "Dekh {author}, {branch} cutoffs - campus wise reality slap",
    "Bhai {author}, {branch} ke liye sabhi campus ka brutal data",
];

const OPENERS_CAMPUS: &[&str] = &[
    "Arre {author}, {campus} campus? Prepare for complete emotional devastation",
    "Yo {author}! {campus} campus - all branches reality check",
    "Dekh {author}, {campus} ka complete cutoff massacre",
    "Bhai {author}, {campus} campus cutoffs - full destruction mode",
];

const OPENERS_FULL: &[&str] = &[
    "Arre {author}, complete BITSAT cutoff data? RIP your mental peace",
    "Yo {author}! Full cutoff breakdown? Time for existential crisis",
    "Dekh {author}, complete BITSAT cutoff apocalypse incoming",
    "Bhai {author}, comprehensive cutoff data - prepare for trauma",
];

const FLOURISHES: &[&str] = &[
    "Numbers don't define you - but they sure love to roast you! \u{1f480}",
    "Cutoff dekh ke cry mat kar, grind kar! Tears won't get you admission \u{1f608}",
    "Every topper was once crying over cutoffs - now it's your turn! \u{1f525}",
    "These scores are just life's way of saying 'try harder' \u{1f4aa}",
    "Remember: suffering today = flexing tomorrow (maybe) \u{1f605}",
    "Cutoffs are temporary, but the trauma is permanent! Stay strong \u{1f3ad}",
    "These numbers are just suggestions from the universe to work harder \u{1f4af}",
];

impl Default for ReplyRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_FOOTER_URL, 0)
    }
}

impl ReplyRenderer {
    /// Create a renderer with the given footer link and flourish seed.
    pub fn new(footer_url: impl Into<String>, flourish_seed: u64) -> Self {
        Self {
            footer_url: footer_url.into(),
            flourish_seed,
        }
    }

    /// Render the reply for a parsed query and its matching entries.
    pub fn render(&self, query: &ParsedQuery, entries: &[&CutoffEntry], author: &str) -> String {
        if entries.is_empty() {
            return self.render_no_data(query, author);
        }

        let mut reply = String::new();
        reply.push_str(&self.opener(query, author));
        reply.push_str(":\n\n");

        match (query.branch.as_one(), query.campus.as_one()) {
            // Single pairing: one campus section, one line.
            (Some(_), Some(campus)) => {
                let entry = entries[0];
                self.push_campus_header(&mut reply, *campus);
                reply.push_str(&format!(
                    "\u{2022} {}: **{}/{}**\n",
                    entry.branch.display_name(),
                    entry.score,
                    entry.max_score
                ));
            }
            // One branch across campuses.
            (Some(branch), None) => {
                reply.push_str(&format!(
                    "**{} CUTOFFS ACROSS CAMPUSES:**\n\n",
                    branch.display_name()
                ));
                for entry in entries {
                    reply.push_str(&format!(
                        "{} **{}**\n\u{2022} {}/{}\n\n",
                        entry.campus.emoji(),
                        entry.campus.display_name(),
                        entry.score,
                        entry.max_score
                    ));
                }
            }
            // Whole campus, or the full table: grouped campus sections.
            _ => {
                for campus in Campus::ALL {
                    let rows: Vec<&CutoffEntry> = entries
                        .iter()
                        .filter(|e| e.campus == campus)
                        .copied()
                        .collect();
                    if rows.is_empty() {
                        continue;
                    }
                    self.push_campus_header(&mut reply, campus);
                    self.push_grouped_rows(&mut reply, &rows);
                    reply.push('\n');
                }
            }
        }

        reply.push_str(&format!("\n{}\n", self.flourish(author, query)));
        reply.push_str(&format!("\n\u{1f4ca} More detailed info: {}", self.footer_url));
        reply
    }

    fn render_no_data(&self, query: &ParsedQuery, author: &str) -> String {
        let branch = query
            .branch
            .as_one()
            .map(Branch::display_name)
            .unwrap_or("that branch");
        let campus = query
            .campus
            .as_one()
            .map(Campus::display_name)
            .unwrap_or("that campus");
        format!(
            "Arre {author}, no data for {branch} at {campus} - that combination \
             isn't offered, so nobody gets rejected from it. Silver lining? \
             \u{1f480}\n\n\u{1f4ca} More detailed info: {}",
            self.footer_url
        )
    }

    fn push_campus_header(&self, reply: &mut String, campus: Campus) {
        reply.push_str(&format!(
            "{} **{} CAMPUS**\n*{}*\n\n",
            campus.emoji(),
            campus.display_name(),
            campus.tagline()
        ));
    }

    /// Render one campus's rows with program-group subheaders, in
    /// canonical branch order.
    fn push_grouped_rows(&self, reply: &mut String, rows: &[&CutoffEntry]) {
        for (i, group) in [
            ProgramGroup::Engineering,
            ProgramGroup::MscScience,
            ProgramGroup::Pharmacy,
        ]
        .into_iter()
        .enumerate()
        {
            let in_group: Vec<&CutoffEntry> = rows
                .iter()
                .filter(|e| e.branch.group() == group)
                .copied()
                .collect();
            if in_group.is_empty() {
                continue;
            }
            if i > 0 {
                reply.push('\n');
            }
            reply.push_str(group.heading());
            reply.push('\n');
            for entry in in_group {
                reply.push_str(&format!(
                    "\u{2022} {}: {}/{}\n",
                    entry.branch.display_name(),
                    entry.score,
                    entry.max_score
                ));
            }
        }
    }

    fn opener(&self, query: &ParsedQuery, author: &str) -> String {
        let (pool, branch, campus) = match (query.branch.as_one(), query.campus.as_one()) {
            (Some(b), Some(c)) => (OPENERS_BOTH, b.display_name(), c.display_name()),
            (Some(b), None) => (OPENERS_BRANCH, b.display_name(), ""),
            (None, Some(c)) => (OPENERS_CAMPUS, "", c.display_name()),
            (None, None) => (OPENERS_FULL, "", ""),
        };
        let idx = self.pick(author, pool.len());
        pool[idx]
            .replace("{author}", author)
            .replace("{branch}", branch)
            .replace("{campus}", campus)
    }

    fn flourish(&self, author: &str, query: &ParsedQuery) -> &str {
        // Offset by the query shape so the same user sees some variety
        // across different queries while staying fully deterministic.
        let shape = query.branch.is_constrained() as usize * 2
            + query.campus.is_constrained() as usize;
        let idx = (self.pick(author, FLOURISHES.len()) + shape) % FLOURISHES.len();
        FLOURISHES[idx]
    }

    /// Stable deterministic pick: FNV-1a over the author name and the
    /// configured seed. `std::hash` is not guaranteed stable across
    /// releases, so the hash is spelled out.
    fn pick(&self, author: &str, len: usize) -> usize {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0100_0000_01b3;
        let mut hash = FNV_OFFSET ^ self.flourish_seed;
        for byte in author.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        (hash % len as u64) as usize
    }
}

// ============================================================================
// Tests
// ============================================================================
