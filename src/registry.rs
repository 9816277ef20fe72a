//! Field registry
//!
//! The output schema is fixed configuration, not discovered data: an
//! ordered list of canonical line-item names. Registry order is output
//! column order in the serialized table.

/// How a field name is located inside a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring containment. This mirrors the source
    /// behavior and can false-positive when one field's name occurs inside
    /// an unrelated line ("Total Assets" inside "Total Assets Held").
    Substring,
    /// Case-insensitive match bounded by non-alphanumeric characters (or
    /// line start/end) on both sides
    ExactToken,
}

/// One canonical financial line item in the output schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub match_mode: MatchMode,
}

impl FieldSpec {
    pub fn substring(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            match_mode: MatchMode::Substring,
        }
    }

    pub fn exact_token(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            match_mode: MatchMode::ExactToken,
        }
    }

    /// Whether `line` mentions this field, under this field's match mode
    pub fn matches_line(&self, line: &str) -> bool {
        let line_lower = line.to_lowercase();
        let name_lower = self.name.to_lowercase();

        match self.match_mode {
            MatchMode::Substring => line_lower.contains(&name_lower),
            MatchMode::ExactToken => {
                let mut search_from = 0;
                while let Some(rel) = line_lower[search_from..].find(&name_lower) {
                    let start = search_from + rel;
                    let end = start + name_lower.len();
                    let bounded_left = start == 0
                        || !line_lower[..start]
                            .chars()
                            .next_back()
                            .is_some_and(|c| c.is_alphanumeric());
                    let bounded_right = end == line_lower.len()
                        || !line_lower[end..]
                            .chars()
                            .next()
                            .is_some_and(|c| c.is_alphanumeric());
                    if bounded_left && bounded_right {
                        return true;
                    }
                    let step = line_lower[start..]
                        .chars()
                        .next()
                        .map_or(1, |c| c.len_utf8());
                    search_from = start + step;
                }
                false
            }
        }
    }
}

/// Ordered collection of field specs defining the output schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRegistry {
    fields: Vec<FieldSpec>,
}

impl FieldRegistry {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The 15 balance-sheet line items recognized by default, all using
    /// substring matching
    pub fn balance_sheet() -> Self {
        let names = [
            "Total Assets",
            "Total Liabilities",
            "Total Equity",
            "Total Capitalization",
            "Common Stock Equity",
            "Capital Lease Obligations",
            "Net Tangible Assets",
            "Working Capital",
            "Invested Capital",
            "Tangible Book Value",
            "Total Debt",
            "Net Debt",
            "Share Issued",
            "Ordinary Shares Number",
            "Treasury Shares Number",
        ];
        Self::new(names.into_iter().map(FieldSpec::substring).collect())
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldSpec> {
        self.fields.iter()
    }

    /// Field names in registry order
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::balance_sheet()
    }
}
