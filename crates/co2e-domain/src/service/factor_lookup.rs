//! Temporal emission factor lookup
//!
//! Factor rows are append-only and effective-dated: the row in effect
//! for a reference date is the one with the most recent
//! `effective_date <= reference`. Lookup is two-tiered: a row whose
//! `fuel_type` override equals the vehicle's fuel type wins over the
//! category default (`fuel_type = None`).

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::model::EmissionFactor;

/// Key: (macro fuel type id, override-or-default)
type FactorKey<'a> = (&'a str, Option<&'a str>);

/// In-memory index of the factor rows in effect at one reference date
///
/// Built once per resolution call from the catalog snapshot; both the
/// single-lookup and the bulk path resolve through [`FactorIndex::lookup`],
/// so the two paths cannot diverge.
#[derive(Debug)]
pub struct FactorIndex<'a> {
    effective: HashMap<FactorKey<'a>, &'a EmissionFactor>,
}

impl<'a> FactorIndex<'a> {
    /// Index the rows effective at `reference`
    ///
    /// Rows dated after the reference date never participate, however
    /// recent. Within a key, the latest effective date wins regardless
    /// of input order.
    pub fn build(factors: &'a [EmissionFactor], reference: NaiveDate) -> Self {
        let mut effective: HashMap<FactorKey<'a>, &'a EmissionFactor> = HashMap::new();
        for factor in factors.iter().filter(|f| f.effective_date <= reference) {
            let key = (factor.macro_fuel_type_id.as_str(), factor.fuel_type.as_deref());
            match effective.get(&key) {
                Some(current) if current.effective_date >= factor.effective_date => {}
                _ => {
                    effective.insert(key, factor);
                }
            }
        }
        Self { effective }
    }

    /// Resolve the factor row for a (macro fuel type, vehicle fuel type)
    /// pair
    ///
    /// Tiers are tried in order: the fuel-type-specific override first,
    /// then the category default. Returns None when neither tier has a
    /// row in effect.
    pub fn lookup(&self, macro_fuel_type_id: &'a str, fuel_type: &'a str) -> Option<&'a EmissionFactor> {
        let tiers = [Some(fuel_type), None];
        tiers
            .iter()
            .find_map(|tier| self.effective.get(&(macro_fuel_type_id, *tier)).copied())
    }

    pub fn is_empty(&self) -> bool {
        self.effective.is_empty()
    }
}
