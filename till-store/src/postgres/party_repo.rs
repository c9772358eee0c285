use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use till_core::repository::{CustomerRepository, EmployeeRepository};
use till_core::CoreResult;
use till_shared::models::{Customer, Employee};
use till_shared::pii::Masked;

use super::db_err;

/// Customers and employees share one repository; the API serves them from the
/// same state entry and their tables are shaped alike.
pub struct PgPartyRepository {
    pool: PgPool,
}

impl PgPartyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: String,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Customer {
            id: row.id,
            name: row.name,
            email: row.email.map(Masked),
            phone: Masked(row.phone),
        }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id: Uuid,
    name: String,
    email: String,
    phone: String,
    role: String,
}

impl From<EmployeeRow> for Employee {
    fn from(row: EmployeeRow) -> Self {
        Employee {
            id: row.id,
            name: row.name,
            email: Masked(row.email),
            phone: Masked(row.phone),
            role: row.role,
        }
    }
}

#[async_trait]
impl CustomerRepository for PgPartyRepository {
    async fn create_customer(&self, customer: &Customer) -> CoreResult<()> {
        sqlx::query("INSERT INTO customers (id, name, email, phone) VALUES ($1, $2, $3, $4)")
            .bind(customer.id)
            .bind(&customer.name)
            .bind(customer.email.as_ref().map(|e| e.as_inner().as_str()))
            .bind(customer.phone.as_inner())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn get_customer(&self, id: Uuid) -> CoreResult<Option<Customer>> {
        let row = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, email, phone FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Customer::from))
    }

    async fn update_customer(&self, customer: &Customer) -> CoreResult<bool> {
        let result =
            sqlx::query("UPDATE customers SET name = $2, email = $3, phone = $4 WHERE id = $1")
                .bind(customer.id)
                .bind(&customer.name)
                .bind(customer.email.as_ref().map(|e| e.as_inner().as_str()))
                .bind(customer.phone.as_inner())
                .execute(&self.pool)
                .await
                .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_customer(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_customers(&self) -> CoreResult<Vec<Customer>> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            "SELECT id, name, email, phone FROM customers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }
}

#[async_trait]
impl EmployeeRepository for PgPartyRepository {
    async fn create_employee(&self, employee: &Employee) -> CoreResult<()> {
        sqlx::query(
            "INSERT INTO employees (id, name, email, phone, role) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(employee.id)
        .bind(&employee.name)
        .bind(employee.email.as_inner())
        .bind(employee.phone.as_inner())
        .bind(&employee.role)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(())
    }

    async fn get_employee(&self, id: Uuid) -> CoreResult<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, email, phone, role FROM employees WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(row.map(Employee::from))
    }

    async fn update_employee(&self, employee: &Employee) -> CoreResult<bool> {
        let result = sqlx::query(
            "UPDATE employees SET name = $2, email = $3, phone = $4, role = $5 WHERE id = $1",
        )
        .bind(employee.id)
        .bind(&employee.name)
        .bind(employee.email.as_inner())
        .bind(employee.phone.as_inner())
        .bind(&employee.role)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_employee(&self, id: Uuid) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_employees(&self) -> CoreResult<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(
            "SELECT id, name, email, phone, role FROM employees ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(rows.into_iter().map(Employee::from).collect())
    }
}
