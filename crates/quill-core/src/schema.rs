//! Database schema model
//!
//! A plain read-only object graph describing tables and columns. The engine
//! never looks inside it; template functions extract what they need.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSchema {
    #[serde(default)]
    pub tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Owning schema, e.g. `dbo`
    #[serde(default = "default_schema")]
    pub schema: String,

    pub table_name: String,

    #[serde(default)]
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub column_name: String,

    /// Database type, e.g. `nvarchar(100)`
    pub sql_data_type: String,

    /// Type used in generated code, e.g. `string`
    pub clr_type: String,

    #[serde(default)]
    pub is_nullable: bool,

    #[serde(default)]
    pub is_primary_key: bool,
}

fn default_schema() -> String {
    "dbo".to_string()
}

impl DatabaseSchema {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_name == name)
    }
}

impl Table {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            schema: default_schema(),
            table_name: table_name.into(),
            columns: Vec::new(),
        }
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }
}

impl Column {
    pub fn new(
        column_name: impl Into<String>,
        sql_data_type: impl Into<String>,
        clr_type: impl Into<String>,
    ) -> Self {
        Self {
            column_name: column_name.into(),
            sql_data_type: sql_data_type.into(),
            clr_type: clr_type.into(),
            is_nullable: false,
            is_primary_key: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }
}
