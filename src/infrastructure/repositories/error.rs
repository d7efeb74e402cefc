use crate::domain::errors::DomainError;

const CNT_EMPLOYEE_ID: &str = "employees_pkey";
const CNT_PROPOSAL_ID: &str = "change_proposals_id_key";
const CNT_SNAPSHOT_ID: &str = "snapshots_id_key";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(constraint) = db_err.constraint() {
                return match constraint {
                    CNT_EMPLOYEE_ID => DomainError::Conflict("employee already exists".into()),
                    CNT_PROPOSAL_ID => DomainError::Conflict("proposal already exists".into()),
                    CNT_SNAPSHOT_ID => DomainError::Conflict("version already exists".into()),
                    other => {
                        DomainError::Persistence(format!("database constraint violation: {other}"))
                    }
                };
            }

            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    "23505" => {
                        return DomainError::Conflict("unique constraint violated".into());
                    }
                    "23514" => {
                        return DomainError::Validation("check constraint violated".into());
                    }
                    _ => {}
                }
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
