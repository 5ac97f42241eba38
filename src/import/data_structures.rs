//! Columnar batches for bulk inserts.
//!
//! Parsed rows are transposed into one vector per column so the whole file can
//! be written with a single `INSERT ... SELECT FROM UNNEST(...)` statement, one
//! array parameter per column. All column vectors have the same length.

use crate::import::coerce::CellValue;
use crate::import::reader::Row;
use crate::schema::{EntityDescriptor, FieldDescriptor};

/// Values of one column, typed the way they are bound.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Text(Vec<Option<String>>),
    Bool(Vec<Option<bool>>),
}

impl ColumnData {
    fn for_field(field: &FieldDescriptor, capacity: usize) -> Self {
        if field.kind.is_boolean() {
            ColumnData::Bool(Vec::with_capacity(capacity))
        } else {
            ColumnData::Text(Vec::with_capacity(capacity))
        }
    }

    fn push(&mut self, value: Option<CellValue>) {
        match self {
            ColumnData::Text(values) => values.push(value.map(|cell| match cell {
                CellValue::Text(text) => text,
                CellValue::Bool(flag) => flag.to_string(),
            })),
            ColumnData::Bool(values) => values.push(value.and_then(|cell| match cell {
                CellValue::Bool(flag) => Some(flag),
                // Boolean columns are only ever fed by the flag coercion.
                CellValue::Text(_) => None,
            })),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Text(values) => values.len(),
            ColumnData::Bool(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// PostgreSQL array type used for the bound parameter.
    pub fn array_type(&self) -> &'static str {
        match self {
            ColumnData::Text(_) => "text[]",
            ColumnData::Bool(_) => "boolean[]",
        }
    }
}

/// All rows of one file, stored column by column.
#[derive(Debug, Clone)]
pub struct RowBatch {
    pub entity: &'static EntityDescriptor,
    pub fields: Vec<&'static FieldDescriptor>,
    pub columns: Vec<ColumnData>,
    rows: usize,
}

impl RowBatch {
    pub fn from_rows(
        entity: &'static EntityDescriptor,
        fields: &[&'static FieldDescriptor],
        rows: Vec<Row>,
    ) -> Self {
        let mut columns: Vec<ColumnData> = fields
            .iter()
            .map(|field| ColumnData::for_field(field, rows.len()))
            .collect();

        let row_count = rows.len();
        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }

        Self {
            entity,
            fields: fields.to_vec(),
            columns,
            rows: row_count,
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Build the single-statement insert for this batch.
    ///
    /// ```text
    /// INSERT INTO usda_nutrition_foodgroup (code, description)
    /// SELECT c1, c2 FROM UNNEST($1::text[], $2::text[]) AS t(c1, c2)
    /// ```
    pub fn insert_sql(&self) -> String {
        let columns: Vec<&str> = self.fields.iter().map(|field| field.name).collect();

        let selects: Vec<String> = self
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| match field.kind.insert_cast() {
                Some(cast) => format!("c{}::{}", idx + 1, cast),
                None => format!("c{}", idx + 1),
            })
            .collect();

        let params: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| format!("${}::{}", idx + 1, column.array_type()))
            .collect();

        let aliases: Vec<String> = (1..=self.fields.len()).map(|idx| format!("c{idx}")).collect();

        format!(
            "INSERT INTO {} ({}) SELECT {} FROM UNNEST({}) AS t({})",
            self.entity.table,
            columns.join(", "),
            selects.join(", "),
            params.join(", "),
            aliases.join(", ")
        )
    }
}
