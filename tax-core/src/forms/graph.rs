//! Static check of the reads-from relation between forms.
//!
//! Every form declares which other forms its formulas read
//! ([`FormKind::reads_from`]). Subordinate forms are handed the forms they
//! read at construction, so a child can only read forms built before it.
//! This module verifies the declared relation is acyclic and yields the
//! order forms can be built in.

use thiserror::Error;

use super::FormKind;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormGraphError {
    /// The listed forms read from each other, directly or transitively.
    #[error("forms read from each other in a cycle: {}", join_designations(.0))]
    Cycle(Vec<FormKind>),

    /// A form reads from a form outside the graph being checked.
    #[error("{form} reads from {missing}, which is not part of the return")]
    UnknownDependency { form: FormKind, missing: FormKind },
}

fn join_designations(forms: &[FormKind]) -> String {
    forms
        .iter()
        .map(FormKind::designation)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build order of every known form: each form after all forms it reads.
///
/// # Errors
///
/// Returns [`FormGraphError`] if the declared reads-from table has a cycle.
pub fn evaluation_order() -> Result<Vec<FormKind>, FormGraphError> {
    topo_order(&FormKind::ALL, FormKind::reads_from)
}

/// Orders `forms` so every form comes after the forms it reads.
///
/// Uses Kahn's algorithm. Ties are broken by position in `forms`, so the
/// result is deterministic.
///
/// # Errors
///
/// - [`FormGraphError::UnknownDependency`] if a form reads one not in `forms`
/// - [`FormGraphError::Cycle`] listing every form that could not be ordered
pub fn topo_order(
    forms: &[FormKind],
    reads_from: impl Fn(&FormKind) -> &'static [FormKind],
) -> Result<Vec<FormKind>, FormGraphError> {
    let mut unresolved: Vec<usize> = Vec::with_capacity(forms.len());

    for form in forms {
        let dependencies = reads_from(form);
        if let Some(missing) = dependencies.iter().find(|dep| !forms.contains(dep)) {
            return Err(FormGraphError::UnknownDependency {
                form: *form,
                missing: *missing,
            });
        }
        unresolved.push(dependencies.len());
    }

    let mut order = Vec::with_capacity(forms.len());
    let mut placed = vec![false; forms.len()];

    // Smallest ready index first keeps the order stable.
    while let Some(next) = (0..forms.len()).find(|&i| !placed[i] && unresolved[i] == 0) {
        placed[next] = true;
        let done = forms[next];
        order.push(done);

        for (i, form) in forms.iter().enumerate() {
            if !placed[i] {
                let reads = reads_from(form).iter().filter(|dep| **dep == done).count();
                unresolved[i] -= reads;
            }
        }
    }

    if order.len() < forms.len() {
        let cycle = forms
            .iter()
            .zip(&placed)
            .filter(|(_, placed)| !**placed)
            .map(|(form, _)| *form)
            .collect();
        return Err(FormGraphError::Cycle(cycle));
    }

    Ok(order)
}
