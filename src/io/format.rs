//! Line-oriented text format for ledger dumps.
//!
//! Fields are separated by `;`. Records end with `\n` in dump files and with `|`
//! in the legacy single-file layout. Dump records carry a trailing `;` before the
//! newline; the decoder accepts it or its absence.
//!
//! Nothing is quoted or escaped. A `;`, `|` or newline inside a phone, category
//! or favorite name produces a file that does not read back correctly. Adding
//! escaping would change the bytes of existing dumps, so it needs a new
//! `FORMAT_VERSION`.
//!
//! Payment and favorite IDs must be UUIDs. A dump whose `id` column holds any
//! other string is rejected with a parse error naming the file and line.

use std::path::Path;

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use uuid::Uuid;

use crate::application::LedgerError;
use crate::domain::{Account, Favorite, Payment, PaymentStatus, Phone};

/// Version of the record layout written by this module; logged with every export.
pub const FORMAT_VERSION: u32 = 1;

pub const ACCOUNTS_FILE: &str = "accounts.dump";
pub const PAYMENTS_FILE: &str = "payments.dump";
pub const FAVORITES_FILE: &str = "favorites.dump";

const FIELD_DELIMITER: u8 = b';';

/// How records are framed on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    terminator: u8,
    trailing_delimiter: bool,
}

impl Layout {
    /// `id;phone;balance;\n` per record.
    pub const DUMP: Layout = Layout {
        terminator: b'\n',
        trailing_delimiter: true,
    };

    /// `id;phone;balance|` per record, all on one line.
    pub const LEGACY: Layout = Layout {
        terminator: b'|',
        trailing_delimiter: false,
    };

    // Legacy files are a single line, so the record number is more useful there.
    fn locate(&self, record: &StringRecord, index: usize) -> u64 {
        match record.position() {
            Some(position) if self.terminator == b'\n' => position.line(),
            _ => index as u64 + 1,
        }
    }
}

/// A field that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// An entity with a fixed field order in the text format.
pub trait Record: Sized {
    fn to_fields(&self) -> Vec<String>;
    fn from_fields(record: &StringRecord) -> Result<Self, FieldError>;
}

/// Encode records into a single buffer.
pub fn encode<'a, T, I>(records: I, layout: Layout) -> Result<Vec<u8>, LedgerError>
where
    T: Record + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut buffer = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .delimiter(FIELD_DELIMITER)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(layout.terminator))
            .from_writer(&mut buffer);

        for record in records {
            let mut fields = record.to_fields();
            if layout.trailing_delimiter {
                fields.push(String::new());
            }
            writer.write_record(&fields)?;
        }
        writer.flush().map_err(csv::Error::from)?;
    }
    Ok(buffer)
}

/// Decode every record in `data`. The first bad field aborts with a parse error
/// naming `path` and the offending line.
pub fn decode<T: Record>(data: &[u8], layout: Layout, path: &Path) -> Result<Vec<T>, LedgerError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(layout.terminator))
        .from_reader(data);

    let mut records = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let parsed = T::from_fields(&record).map_err(|err| LedgerError::Parse {
            path: path.to_path_buf(),
            line: layout.locate(&record, index),
            field: err.field,
            reason: err.reason,
        })?;
        records.push(parsed);
    }
    Ok(records)
}

fn field<'r>(record: &'r StringRecord, index: usize, name: &'static str) -> Result<&'r str, FieldError> {
    record
        .get(index)
        .ok_or_else(|| FieldError::new(name, "missing field"))
}

fn int_field(record: &StringRecord, index: usize, name: &'static str) -> Result<i64, FieldError> {
    let value = field(record, index, name)?;
    value
        .parse()
        .map_err(|err| FieldError::new(name, format!("'{}': {}", value, err)))
}

fn uuid_field(record: &StringRecord, index: usize, name: &'static str) -> Result<Uuid, FieldError> {
    let value = field(record, index, name)?;
    Uuid::parse_str(value).map_err(|err| FieldError::new(name, format!("'{}': {}", value, err)))
}

impl Record for Account {
    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.phone.to_string(),
            self.balance.to_string(),
        ]
    }

    fn from_fields(record: &StringRecord) -> Result<Self, FieldError> {
        Ok(Account {
            id: int_field(record, 0, "id")?,
            phone: Phone::new(field(record, 1, "phone")?),
            balance: int_field(record, 2, "balance")?,
        })
    }
}

impl Record for Payment {
    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.account_id.to_string(),
            self.amount.to_string(),
            self.category.clone(),
            self.status.as_str().to_string(),
        ]
    }

    fn from_fields(record: &StringRecord) -> Result<Self, FieldError> {
        let status = field(record, 4, "status")?;
        Ok(Payment {
            id: uuid_field(record, 0, "id")?,
            account_id: int_field(record, 1, "account_id")?,
            amount: int_field(record, 2, "amount")?,
            category: field(record, 3, "category")?.to_string(),
            status: PaymentStatus::from_str(status)
                .ok_or_else(|| FieldError::new("status", format!("unknown status '{}'", status)))?,
        })
    }
}

impl Record for Favorite {
    fn to_fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.account_id.to_string(),
            self.name.clone(),
            self.amount.to_string(),
            self.category.clone(),
        ]
    }

    fn from_fields(record: &StringRecord) -> Result<Self, FieldError> {
        Ok(Favorite {
            id: uuid_field(record, 0, "id")?,
            account_id: int_field(record, 1, "account_id")?,
            name: field(record, 2, "name")?.to_string(),
            amount: int_field(record, 3, "amount")?,
            category: field(record, 4, "category")?.to_string(),
        })
    }
}
