// SPDX-License-Identifier: MIT OR Apache-2.0

use super::error::{Error, ERROR};
use crate::error::Result;
use crate::xml::{xml_enum, Field, FromRecord, Record, Schema, XmlEntity};

xml_enum! {
    pub enum OperationStatus {
        InProgress => "InProgress",
        Succeeded => "Succeeded",
        Failed => "Failed",
    }
}

const OPERATION: Schema = Schema {
    name: "Operation",
    fields: &[
        Field::text("ID"),
        Field::text("Status"),
        Field::text("HttpStatusCode"),
        Field::entity("Error", &ERROR),
    ],
};

/// Status of an asynchronous request, looked up by its request id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub id: String,
    pub status: OperationStatus,
    pub http_status_code: Option<u16>,
    /// Present once a failed operation has completed.
    pub error: Option<Error>,
}

impl Operation {
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(
            self.status,
            OperationStatus::Succeeded | OperationStatus::Failed
        )
    }
}

impl FromRecord for Operation {
    fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            id: record.required("ID")?,
            status: record
                .enumeration("Status")
                .unwrap_or(OperationStatus::Unrecognized),
            http_status_code: record.number("HttpStatusCode")?,
            error: record.child("Error")?,
        })
    }
}

impl XmlEntity for Operation {
    const SCHEMA: &'static Schema = &OPERATION;
}
