use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::DbPool,
    entities::{
        customer::{self, Entity as CustomerEntity},
        delivery_receipt,
        employee::{self, Entity as EmployeeEntity, Role},
        purchase_order, release_record, sales_transaction,
        supplier::{self, Entity as SupplierEntity},
    },
    errors::ServiceError,
    events::{Event, EventSender},
};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub contact_info: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub role: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Credential must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateEmployeeRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub role: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    /// When present, replaces the stored credential hash.
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    pub contact_info: String,
    pub address: String,
}

/// Employee representation with the credential hash stripped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    pub email: String,
    pub created_at: chrono::DateTime<Utc>,
}

impl From<employee::Model> for EmployeeResponse {
    fn from(model: employee::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            role: model.role,
            email: model.email,
            created_at: model.created_at,
        }
    }
}

/// CRUD over Customer, Employee, and Supplier master records. The only
/// business rules here are employee email uniqueness and refusing deletes
/// that would orphan transaction headers.
#[derive(Clone)]
pub struct PartyDirectoryService {
    db: Arc<DbPool>,
    event_sender: Option<EventSender>,
}

impl PartyDirectoryService {
    pub fn new(db: Arc<DbPool>, event_sender: Option<EventSender>) -> Self {
        Self { db, event_sender }
    }

    // ---- customers ----

    #[instrument(skip(self, request))]
    pub async fn create_customer(
        &self,
        request: CreateCustomerRequest,
    ) -> Result<customer::Model, ServiceError> {
        request.validate()?;

        let model = customer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            contact_info: Set(request.contact_info),
            created_at: Set(Utc::now()),
        };
        let created = model.insert(&*self.db).await.map_err(ServiceError::DatabaseError)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::CustomerCreated(created.id)).await;
        }
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: Uuid) -> Result<customer::Model, ServiceError> {
        CustomerEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Customer {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update_customer(
        &self,
        id: Uuid,
        request: CreateCustomerRequest,
    ) -> Result<customer::Model, ServiceError> {
        request.validate()?;
        let existing = self.get_customer(id).await?;
        let mut active: customer::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.contact_info = Set(request.contact_info);
        active.update(&*self.db).await.map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: Uuid) -> Result<(), ServiceError> {
        let cust = self.get_customer(id).await?;

        let references = sales_transaction::Entity::find()
            .filter(sales_transaction::Column::CustomerId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Customer '{}' is referenced by {} sales transaction(s)",
                cust.name, references
            )));
        }

        CustomerEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_customers(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<customer::Model>, u64), ServiceError> {
        let paginator = CustomerEntity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok((rows, total))
    }

    // ---- employees ----

    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn create_employee(
        &self,
        request: CreateEmployeeRequest,
    ) -> Result<EmployeeResponse, ServiceError> {
        request.validate()?;
        let role = parse_role(&request.role)?;

        let duplicate = EmployeeEntity::find()
            .filter(employee::Column::Email.eq(request.email.clone()))
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if duplicate.is_some() {
            return Err(ServiceError::Conflict(format!(
                "Employee email '{}' is already in use",
                request.email
            )));
        }

        let password_hash = hash_credential(&request.password)?;

        let model = employee::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            role: Set(role.to_string()),
            email: Set(request.email),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
        };
        let created = model.insert(&*self.db).await.map_err(|e| {
            // The unique index is authoritative if a concurrent insert won.
            warn!(error = %e, "Employee insert failed");
            map_unique_violation(e, "Employee email is already in use")
        })?;

        info!(employee_id = %created.id, "Employee created");
        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::EmployeeCreated(created.id)).await;
        }
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn get_employee(&self, id: Uuid) -> Result<EmployeeResponse, ServiceError> {
        self.get_employee_model(id).await.map(Into::into)
    }

    pub(crate) async fn get_employee_model(
        &self,
        id: Uuid,
    ) -> Result<employee::Model, ServiceError> {
        EmployeeEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Employee {id} not found")))
    }

    #[instrument(skip(self, request), fields(employee_id = %id))]
    pub async fn update_employee(
        &self,
        id: Uuid,
        request: UpdateEmployeeRequest,
    ) -> Result<EmployeeResponse, ServiceError> {
        request.validate()?;
        let role = parse_role(&request.role)?;

        let existing = self.get_employee_model(id).await?;

        if request.email != existing.email {
            let duplicate = EmployeeEntity::find()
                .filter(employee::Column::Email.eq(request.email.clone()))
                .one(&*self.db)
                .await
                .map_err(ServiceError::DatabaseError)?;
            if duplicate.is_some() {
                return Err(ServiceError::Conflict(format!(
                    "Employee email '{}' is already in use",
                    request.email
                )));
            }
        }

        let mut active: employee::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.role = Set(role.to_string());
        active.email = Set(request.email);
        if let Some(password) = request.password {
            if password.len() < 8 {
                return Err(ServiceError::ValidationError(
                    "Credential must be at least 8 characters".to_string(),
                ));
            }
            active.password_hash = Set(hash_credential(&password)?);
        }

        let updated = active
            .update(&*self.db)
            .await
            .map_err(|e| map_unique_violation(e, "Employee email is already in use"))?;
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_employee(&self, id: Uuid) -> Result<(), ServiceError> {
        let emp = self.get_employee_model(id).await?;

        let sales = sales_transaction::Entity::find()
            .filter(sales_transaction::Column::EmployeeId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        let releases = release_record::Entity::find()
            .filter(release_record::Column::EmployeeId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        let receipts = delivery_receipt::Entity::find()
            .filter(delivery_receipt::Column::ReceivedBy.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;

        let references = sales + releases + receipts;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Employee '{}' is referenced by {} transaction header(s)",
                emp.name, references
            )));
        }

        EmployeeEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_employees(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<EmployeeResponse>, u64), ServiceError> {
        let paginator = EmployeeEntity::find()
            .order_by_desc(employee::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok((rows.into_iter().map(Into::into).collect(), total))
    }

    /// Verifies a credential for the external authentication collaborator.
    /// Returns the employee on success, `NotFound` on a bad email or secret
    /// (deliberately the same error for both).
    #[instrument(skip(self, password))]
    pub async fn verify_employee_credential(
        &self,
        email: &str,
        password: &str,
    ) -> Result<EmployeeResponse, ServiceError> {
        let employee = EmployeeEntity::find()
            .filter(employee::Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound("Invalid email or credential".to_string()))?;

        let parsed = PasswordHash::new(&employee.password_hash).map_err(|e| {
            ServiceError::InternalError(format!("Stored credential hash is malformed: {e}"))
        })?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| ServiceError::NotFound("Invalid email or credential".to_string()))?;

        Ok(employee.into())
    }

    // ---- suppliers ----

    #[instrument(skip(self, request))]
    pub async fn create_supplier(
        &self,
        request: CreateSupplierRequest,
    ) -> Result<supplier::Model, ServiceError> {
        request.validate()?;

        let model = supplier::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            contact_info: Set(request.contact_info),
            address: Set(request.address),
            created_at: Set(Utc::now()),
        };
        let created = model.insert(&*self.db).await.map_err(ServiceError::DatabaseError)?;

        if let Some(sender) = &self.event_sender {
            sender.send_or_log(Event::SupplierCreated(created.id)).await;
        }
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_supplier(&self, id: Uuid) -> Result<supplier::Model, ServiceError> {
        SupplierEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?
            .ok_or_else(|| ServiceError::NotFound(format!("Supplier {id} not found")))
    }

    #[instrument(skip(self, request))]
    pub async fn update_supplier(
        &self,
        id: Uuid,
        request: CreateSupplierRequest,
    ) -> Result<supplier::Model, ServiceError> {
        request.validate()?;
        let existing = self.get_supplier(id).await?;
        let mut active: supplier::ActiveModel = existing.into();
        active.name = Set(request.name);
        active.contact_info = Set(request.contact_info);
        active.address = Set(request.address);
        active.update(&*self.db).await.map_err(ServiceError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn delete_supplier(&self, id: Uuid) -> Result<(), ServiceError> {
        let sup = self.get_supplier(id).await?;

        let references = purchase_order::Entity::find()
            .filter(purchase_order::Column::SupplierId.eq(id))
            .count(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        if references > 0 {
            return Err(ServiceError::Conflict(format!(
                "Supplier '{}' is referenced by {} purchase order(s)",
                sup.name, references
            )));
        }

        SupplierEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_suppliers(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<supplier::Model>, u64), ServiceError> {
        let paginator = SupplierEntity::find()
            .order_by_desc(supplier::Column::CreatedAt)
            .paginate(&*self.db, per_page.max(1));

        let total = paginator.num_items().await.map_err(ServiceError::DatabaseError)?;
        let rows = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(ServiceError::DatabaseError)?;
        Ok((rows, total))
    }
}

fn parse_role(raw: &str) -> Result<Role, ServiceError> {
    Role::from_str(raw)
        .map_err(|_| ServiceError::ValidationError(format!("Unknown employee role '{raw}'")))
}

fn hash_credential(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::InternalError(format!("Failed to hash credential: {e}")))
}

fn map_unique_violation(err: sea_orm::DbErr, message: &str) -> ServiceError {
    let text = err.to_string();
    if text.contains("UNIQUE") || text.contains("unique") || text.contains("duplicate") {
        ServiceError::Conflict(message.to_string())
    } else {
        ServiceError::DatabaseError(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credential_hashing_is_verifiable_and_salted() {
        let first = hash_credential("s3cret-pass").unwrap();
        let second = hash_credential("s3cret-pass").unwrap();
        assert_ne!(first, second);
        assert!(first.starts_with("$argon2"));

        let parsed = PasswordHash::new(&first).unwrap();
        assert!(Argon2::default()
            .verify_password(b"s3cret-pass", &parsed)
            .is_ok());
        assert!(Argon2::default()
            .verify_password(b"wrong-pass", &parsed)
            .is_err());
    }

    #[test]
    fn unknown_roles_are_rejected() {
        assert!(parse_role("Cook").is_ok());
        assert!(parse_role("Inventory Custodian").is_ok());
        assert!(matches!(
            parse_role("Janitor"),
            Err(ServiceError::ValidationError(_))
        ));
    }
}
