//! Which row type a data file is read as.

use std::path::Path;

use clap::ValueEnum;
use docket_lib::error::FieldError;
use docket_lib::model::Column;
use docket_lib::model::Record;
use docket_lib::model::TableRow;
use docket_lib::model::practice::Case;
use docket_lib::model::practice::Client;
use docket_lib::model::practice::Invoice;
use log::debug;

use crate::data;
use crate::error::CliError;

/// Row type of a data file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum RowKind {
    /// Free-form records; columns are derived from their fields.
    #[default]
    Records,
    Clients,
    Cases,
    Invoices,
}

/// Something to do with a set of rows, whatever their type.
pub trait RowsAction {
    fn run<R: TableRow>(self, rows: Vec<R>, columns: Vec<Column>) -> Result<(), CliError>;
}

/// Loads `data` as `kind` and hands the rows to `action`.
///
/// Typed kinds use their preset columns unless `columns` names a file.
pub fn dispatch(
    kind: RowKind,
    data: &Path,
    columns: Option<&Path>,
    action: impl RowsAction,
) -> Result<(), CliError> {
    let records = data::load_records(data)?;
    match kind {
        RowKind::Records => {
            let columns = data::load_columns(columns, &records)?;
            action.run(records, columns)
        }
        RowKind::Clients => typed::<Client>(&records, columns, Client::columns(), action),
        RowKind::Cases => typed::<Case>(&records, columns, Case::columns(), action),
        RowKind::Invoices => typed::<Invoice>(&records, columns, Invoice::columns(), action),
    }
}

fn typed<R>(
    records: &[Record],
    columns: Option<&Path>,
    preset: Vec<Column>,
    action: impl RowsAction,
) -> Result<(), CliError>
where
    R: TableRow + for<'a> TryFrom<&'a Record, Error = FieldError>,
{
    let rows = records
        .iter()
        .map(R::try_from)
        .collect::<Result<Vec<R>, _>>()?;
    let columns = match columns {
        Some(path) => data::load_columns(Some(path), records)?,
        None => preset,
    };
    debug!("Converted {} typed rows", rows.len());
    action.run(rows, columns)
}
