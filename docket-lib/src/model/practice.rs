//! Typed practice entities
//!
//! The list views of the practice manager: clients, cases and invoices. Each
//! keeps strongly typed fields and exposes them to the table engine through
//! [`TableRow`], plus a default column preset. Loosely typed [`Record`]s
//! convert into them with `TryFrom`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::Column;
use super::ColumnOption;
use super::EditType;
use super::Record;
use super::TableRow;
use super::Value;
use crate::error::FieldError;

fn required<T>(record: &Record, field: &str, value: Option<T>) -> Result<T, FieldError> {
    value.ok_or_else(|| FieldError::missing(record.id(), field))
}

fn required_string(record: &Record, field: &str) -> Result<String, FieldError> {
    required(record, field, record.get_string(field)?).map(str::to_string)
}

/// An absent field reads as `None` for optional entity fields.
fn optional_string(record: &Record, field: &str) -> Result<Option<String>, FieldError> {
    if !record.contains(field) {
        return Ok(None);
    }
    Ok(record.get_string(field)?.map(str::to_string))
}

// =============================================================================
// Client
// =============================================================================

/// A client of the firm.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub created_on: NaiveDate,
}

impl Client {
    /// Columns of the clients list.
    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("name", "Name").sortable().editable(EditType::Text),
            Column::new("email", "Email").sortable().editable(EditType::Email),
            Column::new("phone", "Phone").editable(EditType::Phone),
            Column::new("status", "Status")
                .sortable()
                .editable(EditType::Select)
                .with_options([
                    ColumnOption::new("active", "Active"),
                    ColumnOption::new("inactive", "Inactive"),
                    ColumnOption::new("prospect", "Prospect"),
                ]),
            Column::new("created_on", "Client Since").sortable(),
        ]
    }
}

impl TableRow for Client {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::from(self.id.as_str()),
            "name" => Value::from(self.name.as_str()),
            "email" => Value::from(self.email.clone()),
            "phone" => Value::from(self.phone.clone()),
            "status" => Value::from(self.status.as_str()),
            "created_on" => Value::from(self.created_on),
            _ => Value::Null,
        }
    }
}

impl TryFrom<&Record> for Client {
    type Error = FieldError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id().to_string(),
            name: required_string(record, "name")?,
            email: optional_string(record, "email")?,
            phone: optional_string(record, "phone")?,
            status: required_string(record, "status")?,
            created_on: required(record, "created_on", record.get_date("created_on")?)?,
        })
    }
}

// =============================================================================
// Case
// =============================================================================

/// A legal matter handled for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: String,
    pub title: String,
    pub client_name: String,
    pub status: String,
    pub priority: String,
    pub opened_on: NaiveDate,
}

impl Case {
    /// Columns of the cases list; `status` drives the case board.
    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("title", "Case").sortable().editable(EditType::Text),
            Column::new("client_name", "Client").sortable(),
            Column::new("status", "Status")
                .sortable()
                .editable(EditType::Status)
                .with_options([
                    ColumnOption::new("open", "Open"),
                    ColumnOption::new("in_progress", "In Progress"),
                    ColumnOption::new("pending", "Pending"),
                    ColumnOption::new("closed", "Closed"),
                ]),
            Column::new("priority", "Priority")
                .sortable()
                .editable(EditType::Select)
                .with_options([
                    ColumnOption::new("low", "Low"),
                    ColumnOption::new("medium", "Medium"),
                    ColumnOption::new("high", "High"),
                ]),
            Column::new("opened_on", "Opened").sortable(),
        ]
    }
}

impl TableRow for Case {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::from(self.id.as_str()),
            "title" => Value::from(self.title.as_str()),
            "client_name" => Value::from(self.client_name.as_str()),
            "status" => Value::from(self.status.as_str()),
            "priority" => Value::from(self.priority.as_str()),
            "opened_on" => Value::from(self.opened_on),
            _ => Value::Null,
        }
    }

    fn is_read_only(&self) -> bool {
        self.status == "closed"
    }
}

impl TryFrom<&Record> for Case {
    type Error = FieldError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id().to_string(),
            title: required_string(record, "title")?,
            client_name: required_string(record, "client_name")?,
            status: required_string(record, "status")?,
            priority: required_string(record, "priority")?,
            opened_on: required(record, "opened_on", record.get_date("opened_on")?)?,
        })
    }
}

// =============================================================================
// Invoice
// =============================================================================

/// A bill issued to a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub number: String,
    pub client_name: String,
    pub amount: Decimal,
    pub status: String,
    pub due_date: NaiveDate,
}

impl Invoice {
    /// Columns of the invoices list.
    pub fn columns() -> Vec<Column> {
        vec![
            Column::new("number", "Invoice #").sortable(),
            Column::new("client_name", "Client").sortable(),
            Column::new("amount", "Amount").sortable().editable(EditType::Text),
            Column::new("status", "Status")
                .sortable()
                .editable(EditType::Select)
                .with_options([
                    ColumnOption::new("draft", "Draft"),
                    ColumnOption::new("sent", "Sent"),
                    ColumnOption::new("paid", "Paid"),
                    ColumnOption::new("overdue", "Overdue"),
                ]),
            Column::new("due_date", "Due").sortable(),
        ]
    }
}

impl TableRow for Invoice {
    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::from(self.id.as_str()),
            "number" => Value::from(self.number.as_str()),
            "client_name" => Value::from(self.client_name.as_str()),
            "amount" => Value::from(self.amount),
            "status" => Value::from(self.status.as_str()),
            "due_date" => Value::from(self.due_date),
            _ => Value::Null,
        }
    }

    fn is_read_only(&self) -> bool {
        self.status == "paid"
    }
}

impl TryFrom<&Record> for Invoice {
    type Error = FieldError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id().to_string(),
            number: required_string(record, "number")?,
            client_name: required_string(record, "client_name")?,
            amount: required(record, "amount", record.get_decimal("amount")?)?,
            status: required_string(record, "status")?,
            due_date: required(record, "due_date", record.get_date("due_date")?)?,
        })
    }
}
