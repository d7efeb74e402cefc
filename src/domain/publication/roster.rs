// src/domain/publication/roster.rs
use crate::domain::employee::Employee;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::proposal::{ChangeKind, ChangeProposal};

/// Applies `proposals` to `roster` in order and returns the resulting roster.
///
/// The input is never partially applied: any unresolvable proposal fails the
/// whole batch.
/// - add: appends `after`; an id already on the roster is a `Conflict`.
/// - edit: replaces the matching employee with `after` in full; a missing
///   target is `NotFound`.
/// - delete: removes the matching employee; a missing target is a no-op.
pub fn apply_proposals(
    mut roster: Vec<Employee>,
    proposals: &[ChangeProposal],
) -> DomainResult<Vec<Employee>> {
    for proposal in proposals {
        proposal.validate()?;
        match proposal.kind {
            ChangeKind::Add => {
                let after = required_after(proposal)?;
                if roster.iter().any(|employee| employee.id == after.id) {
                    return Err(DomainError::Conflict(format!(
                        "proposal {} adds employee {} which already exists",
                        proposal.id, after.id
                    )));
                }
                roster.push(after.clone());
            }
            ChangeKind::Edit => {
                let target = proposal.target_id()?;
                let after = required_after(proposal)?;
                let slot = roster
                    .iter_mut()
                    .find(|employee| &employee.id == target)
                    .ok_or_else(|| {
                        DomainError::NotFound(format!(
                            "proposal {} edits employee {target} which does not exist",
                            proposal.id
                        ))
                    })?;
                *slot = after.clone();
            }
            ChangeKind::Delete => {
                let target = proposal.target_id()?;
                roster.retain(|employee| &employee.id != target);
            }
        }
    }
    Ok(roster)
}

fn required_after(proposal: &ChangeProposal) -> DomainResult<&Employee> {
    proposal.after.as_ref().ok_or_else(|| {
        DomainError::Validation(format!(
            "proposal {} is missing its `after` employee",
            proposal.id
        ))
    })
}
