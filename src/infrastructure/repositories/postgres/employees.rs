// src/infrastructure/repositories/postgres/employees.rs
use super::PostgresDirectoryStore;
use super::rows::{EMPLOYEE_COLUMNS, EmployeeRow};
use crate::domain::employee::{Employee, EmployeeId, EmployeeRepository};
use crate::domain::errors::DomainResult;
use crate::infrastructure::repositories::map_sqlx;
use async_trait::async_trait;
use sqlx::PgConnection;

/// Replaces the whole roster inside the caller's transaction, keeping order.
pub(super) async fn replace_roster(
    conn: &mut PgConnection,
    employees: &[Employee],
) -> DomainResult<()> {
    sqlx::query("DELETE FROM employees")
        .execute(&mut *conn)
        .await
        .map_err(map_sqlx)?;

    for (position, employee) in employees.iter().enumerate() {
        insert_at(&mut *conn, employee, position as i64).await?;
    }
    Ok(())
}

/// Roster as seen inside the caller's transaction.
pub(super) async fn load_roster(conn: &mut PgConnection) -> DomainResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
        "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY position"
    ))
    .fetch_all(conn)
    .await
    .map_err(map_sqlx)?;

    rows.into_iter().map(Employee::try_from).collect()
}

async fn insert_at(conn: &mut PgConnection, employee: &Employee, position: i64) -> DomainResult<()> {
    sqlx::query(
        "INSERT INTO employees (id, position, first_name, last_name, email, extension,
             phone_number, location, team, department, title, photo_url)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
    )
    .bind(employee.id.as_str())
    .bind(position)
    .bind(employee.first_name.as_str())
    .bind(employee.last_name.as_str())
    .bind(employee.email.as_deref())
    .bind(employee.extension.as_deref())
    .bind(employee.phone_number.as_deref())
    .bind(employee.location.as_str())
    .bind(employee.team.as_deref())
    .bind(employee.department.as_deref())
    .bind(employee.title.as_deref())
    .bind(employee.photo_url.as_deref())
    .execute(conn)
    .await
    .map_err(map_sqlx)?;
    Ok(())
}

#[async_trait]
impl EmployeeRepository for PostgresDirectoryStore {
    async fn list(&self) -> DomainResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY position"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Employee::try_from).collect()
    }

    async fn find_by_id(&self, id: &EmployeeId) -> DomainResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Employee::try_from).transpose()
    }

    async fn insert(&self, employee: Employee) -> DomainResult<Employee> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx)?;
        let next: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(position) + 1, 0) FROM employees")
                .fetch_one(&mut *tx)
                .await
                .map_err(map_sqlx)?;
        insert_at(&mut tx, &employee, next).await?;
        tx.commit().await.map_err(map_sqlx)?;
        Ok(employee)
    }
}
